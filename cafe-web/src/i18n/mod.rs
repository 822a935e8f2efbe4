mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{current_lang, set_lang};
pub use format::{fmt_amount, fmt_currency, fmt_date_iso};
pub use locales::{LocaleMeta, locales};
pub use render::{t, tr};
