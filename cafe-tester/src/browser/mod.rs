mod page;
mod session;

pub use page::{PageError, StorefrontPage, parse_clock};
pub use session::{BrowserConfig, BrowserKind, new_session};
