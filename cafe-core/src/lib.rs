//! Cafe.com storefront core
//!
//! Platform-agnostic ordering logic: cart, bill rendering, the order stage
//! machine with its delivery countdown, and the session client that talks to
//! the cafe backend. Browser and native front ends supply an [`ApiTransport`],
//! a [`SessionStore`] and a [`Ticker`].

pub mod api;
pub mod bill;
pub mod cart;
pub mod config;
pub mod constants;
pub mod context;
pub mod countdown;
pub mod error;
pub mod menu;
pub mod session;
pub mod stage;
pub mod storefront;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use api::{ApiReply, ApiTransport, HealthStatus, OrderRecord, TransportError};
pub use bill::{BillLine, BillView, render as render_bill};
pub use cart::{Cart, LineItem, OrderLine};
pub use config::ApiConfig;
pub use context::{
    AuthForm, FormStatus, HistoryStatus, OrderContext, OrderStatus, OrderTicket, Section,
};
pub use countdown::{Countdown, CountdownTick, ImmediateTicker, Ticker, format_clock};
#[cfg(feature = "async")]
pub use countdown::IntervalTicker;
pub use error::{AuthError, OrderError, StoreError, ValidationError};
pub use menu::{Menu, MenuCategory, MenuError, MenuItem};
pub use session::{
    Confirmation, MemorySessionStore, Session, SessionClient, SessionState, SessionStore,
};
pub use stage::{
    OrderFlow, OrderStage, StageControl, StageError, StageView, TickOutcome, Transition,
};
pub use storefront::Storefront;
