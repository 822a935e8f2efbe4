pub mod account_page;
pub mod auth_forms;
pub mod bill;
pub mod delivery;
pub mod footer;
pub mod header;
pub mod home;
pub mod menu_card;
pub mod menu_page;
pub mod nav;
pub mod not_found;
pub mod order_history;
pub mod orders_page;
pub mod stage_controls;
pub mod status;
pub mod tagline;
