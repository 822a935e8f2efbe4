//! Deployment base path handling.

/// Base path for the router (e.g., `/cafe` when hosted under a subdirectory).
///
/// Set through `PUBLIC_URL` at compile time. Returns `None` when no base path
/// is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::router_base_with_base;

    #[test]
    fn empty_base_means_root() {
        assert_eq!(router_base_with_base(""), None);
        assert_eq!(router_base_with_base("/"), None);
    }

    #[test]
    fn base_is_trimmed() {
        assert_eq!(router_base_with_base("/cafe/"), Some(String::from("/cafe")));
        assert_eq!(router_base_with_base(" /shop "), Some(String::from("/shop")));
    }
}
