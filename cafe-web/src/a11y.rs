// Accessibility helpers

/// CSS for visible focus rings and the screen-reader-only helper class.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #ffb347;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Id of the polite live region rendered by the app shell.
pub const STATUS_REGION_ID: &str = "cafe-status";

/// Announce `msg` to assistive technology through the live region.
pub fn set_status(msg: &str) {
    if let Some(node) =
        crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}
