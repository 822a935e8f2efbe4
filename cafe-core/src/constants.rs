//! Fixed timings, keys and endpoint paths shared by every storefront surface.

// Countdown ------------------------------------------------------------------
pub const DELIVERY_COUNTDOWN_SECS: u32 = 20 * 60;
pub const TICK_INTERVAL_MS: u32 = 1_000;

// UI timings -------------------------------------------------------------------
pub const ADDED_LABEL_RESET_MS: u32 = 1_200;
pub const AUTH_REDIRECT_DELAY_MS: u32 = 1_200;
pub const TAGLINE_TICK_MS: u32 = 120;

// Persistence ------------------------------------------------------------------
pub const SESSION_USER_KEY: &str = "cafe_user";

// Backend ----------------------------------------------------------------------
pub const DEFAULT_API_PORT: u16 = 5000;
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const SAVE_ORDER_PATH: &str = "/save-order";
pub const ORDERS_PATH_PREFIX: &str = "/orders/";
pub const HEALTH_PATH: &str = "/health";

// Fallback messages when the backend declines without one ------------------
pub const LOGIN_REJECTED_FALLBACK: &str = "Invalid credentials";
pub const REGISTER_REJECTED_FALLBACK: &str = "Registration failed";
pub const ORDER_REJECTED_FALLBACK: &str = "Order not saved";

// Fixed stage copy ---------------------------------------------------------
pub const PREPARING_MESSAGE: &str = "⏳ Your order is being prepared with love…";
pub const CAFE_MAP_EMBED_URL: &str =
    "https://www.google.com/maps?q=18.53559062907352,73.88057564859866&output=embed";
