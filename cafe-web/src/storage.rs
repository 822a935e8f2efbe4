use cafe_core::constants::SESSION_USER_KEY;
use cafe_core::{SessionStore, StoreError};

use crate::dom;

/// Session store backed by `localStorage["cafe_user"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn load_user(&self) -> Option<String> {
        dom::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(SESSION_USER_KEY).ok().flatten())
    }

    fn save_user(&self, username: &str) -> Result<(), StoreError> {
        let storage = dom::local_storage()
            .map_err(|err| StoreError::Unavailable(dom::js_error_message(&err)))?;
        storage
            .set_item(SESSION_USER_KEY, username)
            .map_err(|err| StoreError::Unavailable(dom::js_error_message(&err)))
    }
}
