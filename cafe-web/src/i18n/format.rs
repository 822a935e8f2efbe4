#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
#[cfg(target_arch = "wasm32")]
use js_sys::Date;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Format whole rupees, e.g. `₹250`.
#[must_use]
pub fn fmt_currency(rupees: u64) -> String {
    format!("₹{rupees}")
}

/// Format a stored amount, dropping a zero paise part (`100.00` → `₹100`).
#[must_use]
pub fn fmt_amount(amount: f64) -> String {
    if amount.fract().abs() < f64::EPSILON {
        format!("₹{amount:.0}")
    } else {
        format!("₹{amount:.2}")
    }
}

/// Format an ISO 8601 timestamp using the current locale (browser-side).
#[must_use]
pub fn fmt_date_iso(date_iso: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            let date = Date::new(&JsValue::from_str(date_iso));
            if date.get_time().is_nan() {
                return date_iso.to_string();
            }
            date.to_locale_string(&bundle.lang, &JsValue::UNDEFINED)
                .as_string()
                .unwrap_or_else(|| date_iso.to_string())
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        date_iso.to_string()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_rupee_sign() {
        assert_eq!(fmt_currency(250), "₹250");
        assert_eq!(fmt_currency(0), "₹0");
    }

    #[test]
    fn amounts_drop_zero_paise() {
        assert_eq!(fmt_amount(100.0), "₹100");
        assert_eq!(fmt_amount(99.5), "₹99.50");
    }

    #[test]
    fn date_formatter_returns_input_on_host() {
        assert_eq!(fmt_date_iso("2024-05-01 10:00:00"), "2024-05-01 10:00:00");
    }
}
