//! Authentication and order submission against the cafe backend.
use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{
    ApiReply, ApiTransport, Credentials, HealthStatus, OrderRecord, SaveOrderRequest,
    TransportError,
};
use crate::cart::Cart;
use crate::constants::{
    HEALTH_PATH, LOGIN_PATH, LOGIN_REJECTED_FALLBACK, ORDER_REJECTED_FALLBACK,
    ORDERS_PATH_PREFIX, REGISTER_PATH, REGISTER_REJECTED_FALLBACK, SAVE_ORDER_PATH,
};
use crate::error::{AuthError, OrderError, StoreError, ValidationError};

/// Persistent home of the last signed-in username.
pub trait SessionStore {
    fn load_user(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn save_user(&self, username: &str) -> Result<(), StoreError>;
}

/// Store that lives only as long as the process. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn with_user(username: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(username.to_string()))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load_user(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save_user(&self, username: &str) -> Result<(), StoreError> {
        self.slot.replace(Some(username.to_string()));
        Ok(())
    }
}

/// A confirmed login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

/// Who is signed in right now, mirrored from the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    current_user: Option<String>,
}

impl SessionState {
    /// State for a persisted username; blank values count as signed out.
    #[must_use]
    pub fn restored(persisted: Option<String>) -> Self {
        Self {
            current_user: persisted.filter(|name| !name.trim().is_empty()),
        }
    }

    pub fn sign_in(&mut self, session: Session) {
        self.current_user = Some(session.username);
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub username: String,
    pub item_count: usize,
    pub total: u64,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionClient<T, S> {
    transport: T,
    store: S,
}

impl<T, S> SessionClient<T, S>
where
    T: ApiTransport,
    S: SessionStore,
{
    pub const fn new(transport: T, store: S) -> Self {
        Self { transport, store }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Session state as it was when the page was last left.
    #[must_use]
    pub fn restore(&self) -> SessionState {
        SessionState::restored(self.store.load_user())
    }

    /// # Errors
    ///
    /// Fails on blank fields, an unreachable backend, or a declined login.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.authenticate(LOGIN_PATH, LOGIN_REJECTED_FALLBACK, username, password)
            .await
    }

    /// # Errors
    ///
    /// Fails on blank fields, an unreachable backend, or a declined registration.
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.authenticate(REGISTER_PATH, REGISTER_REJECTED_FALLBACK, username, password)
            .await
    }

    async fn authenticate(
        &self,
        path: &str,
        fallback: &str,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ValidationError::EmptyField.into());
        }

        let body = serde_json::to_value(Credentials { username, password })
            .map_err(TransportError::from)?;
        let reply = self.send(path, body).await?;
        if !reply.success {
            return Err(AuthError::Rejected(reply.message_or(fallback)));
        }

        if let Err(err) = self.store.save_user(username) {
            warn!("signed in as {username} but could not persist it: {err}");
        }
        info!("signed in as {username} via {path}");
        Ok(Session {
            username: username.to_string(),
        })
    }

    /// Submit the cart for the signed-in user.
    ///
    /// # Errors
    ///
    /// Fails without touching the network when nobody is signed in or the
    /// cart is empty; otherwise fails on an unreachable backend or a decline.
    pub async fn place_order(
        &self,
        session: &SessionState,
        cart: &Cart,
    ) -> Result<Confirmation, OrderError> {
        let username = session.current_user().ok_or(OrderError::NotAuthenticated)?;
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let total = cart.total();
        let body = serde_json::to_value(SaveOrderRequest {
            username,
            items: cart.order_lines(),
            total,
        })
        .map_err(TransportError::from)?;
        let reply = self.send(SAVE_ORDER_PATH, body).await?;
        if !reply.success {
            return Err(OrderError::Rejected(
                reply.message_or(ORDER_REJECTED_FALLBACK),
            ));
        }

        info!("order saved for {username}: {} items, total {total}", cart.len());
        Ok(Confirmation {
            username: username.to_string(),
            item_count: cart.len(),
            total,
            message: reply.message,
        })
    }

    /// Past orders for `username`, newest first.
    ///
    /// # Errors
    ///
    /// Fails on an unreachable backend or a declined lookup.
    pub async fn order_history(&self, username: &str) -> Result<Vec<OrderRecord>, OrderError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(OrderError::NotAuthenticated);
        }
        let path = format!("{ORDERS_PATH_PREFIX}{}", urlencoding::encode(username));
        let reply: ApiReply = decode(self.transport.get_json(&path).await?)?;
        if !reply.success {
            return Err(OrderError::Rejected(
                reply.message_or(ORDER_REJECTED_FALLBACK),
            ));
        }
        Ok(reply.orders)
    }

    /// # Errors
    ///
    /// Fails when the backend cannot be reached or answers with something else.
    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        decode(self.transport.get_json(HEALTH_PATH).await?)
    }

    async fn send(&self, path: &str, body: Value) -> Result<ApiReply, TransportError> {
        decode(self.transport.post_json(path, body).await?)
    }
}

fn decode<R: serde::de::DeserializeOwned>(value: Value) -> Result<R, TransportError> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use futures::executor::block_on;
    use serde_json::json;

    fn client(transport: MockTransport) -> SessionClient<MockTransport, MemorySessionStore> {
        SessionClient::new(transport, MemorySessionStore::default())
    }

    #[test]
    fn login_success_persists_username() {
        let transport = MockTransport::replying(json!({"success": true, "message": "Login successful"}));
        let client = client(transport.clone());
        let session = block_on(client.login("  asha ", "secret")).unwrap();
        assert_eq!(session.username, "asha");
        assert_eq!(client.store().load_user().as_deref(), Some("asha"));
        assert_eq!(client.restore().current_user(), Some("asha"));

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, "/login");
        assert_eq!(sent[0].body, Some(json!({"username": "asha", "password": "secret"})));
    }

    #[test]
    fn rejected_login_surfaces_backend_message() {
        let client = client(MockTransport::replying(
            json!({"success": false, "message": "bad credentials"}),
        ));
        let err = block_on(client.login("asha", "wrong")).unwrap_err();
        assert_eq!(err, AuthError::Rejected("bad credentials".into()));
        assert_eq!(err.to_string(), "bad credentials");
        assert!(client.store().load_user().is_none());
    }

    #[test]
    fn rejection_without_message_uses_fallbacks() {
        let client = client(MockTransport::replying(json!({"success": false})));
        assert_eq!(
            block_on(client.login("a", "b")).unwrap_err(),
            AuthError::Rejected(LOGIN_REJECTED_FALLBACK.into())
        );
        assert_eq!(
            block_on(client.register("a", "b")).unwrap_err(),
            AuthError::Rejected(REGISTER_REJECTED_FALLBACK.into())
        );
    }

    #[test]
    fn blank_fields_never_reach_the_network() {
        let transport = MockTransport::replying(json!({"success": true}));
        let client = client(transport.clone());
        assert_eq!(
            block_on(client.register("   ", "pw")).unwrap_err(),
            AuthError::Validation(ValidationError::EmptyField)
        );
        assert_eq!(
            block_on(client.login("user", "")).unwrap_err(),
            AuthError::Validation(ValidationError::EmptyField)
        );
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn unreachable_backend_maps_to_server_unreachable() {
        let client = client(MockTransport::offline());
        assert_eq!(
            block_on(client.login("asha", "pw")).unwrap_err(),
            AuthError::ServerUnreachable
        );
    }

    #[test]
    fn place_order_requires_a_user() {
        let transport = MockTransport::replying(json!({"success": true}));
        let client = client(transport.clone());
        let mut cart = Cart::new();
        cart.add("Coffee", 100);
        let err = block_on(client.place_order(&SessionState::default(), &cart)).unwrap_err();
        assert_eq!(err, OrderError::NotAuthenticated);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn place_order_rejects_empty_cart_locally() {
        let transport = MockTransport::replying(json!({"success": true}));
        let client = client(transport.clone());
        let session = SessionState::restored(Some("asha".into()));
        let err = block_on(client.place_order(&session, &Cart::new())).unwrap_err();
        assert_eq!(err, OrderError::Validation(ValidationError::EmptyCart));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn place_order_posts_items_and_total() {
        let transport =
            MockTransport::replying(json!({"success": true, "message": "Order saved! 2 items stored."}));
        let client = client(transport.clone());
        let session = SessionState::restored(Some("asha".into()));
        let mut cart = Cart::new();
        cart.add("Coffee", 100);
        cart.add("Sandwich", 150);

        let confirmation = block_on(client.place_order(&session, &cart)).unwrap();
        assert_eq!(confirmation.total, 250);
        assert_eq!(confirmation.item_count, 2);

        let sent = transport.requests();
        assert_eq!(sent[0].path, "/save-order");
        assert_eq!(
            sent[0].body,
            Some(json!({
                "username": "asha",
                "items": [{"name": "Coffee", "price": 100}, {"name": "Sandwich", "price": 150}],
                "total": 250
            }))
        );
    }

    #[test]
    fn order_history_encodes_username() {
        let transport = MockTransport::replying(json!({
            "success": true,
            "orders": [{"item_name": "Coffee", "price": "100.00", "total": "100.00"}]
        }));
        let client = client(transport.clone());
        let orders = block_on(client.order_history("asha k")).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(transport.requests()[0].path, "/orders/asha%20k");
        assert_eq!(transport.requests()[0].body, None);
    }

    #[test]
    fn health_decodes_status() {
        let client = client(MockTransport::replying(
            json!({"status": "ok", "message": "running"}),
        ));
        assert!(block_on(client.health()).unwrap().is_ok());
    }

    #[test]
    fn restored_state_ignores_blank_usernames() {
        assert!(!SessionState::restored(Some("  ".into())).is_signed_in());
        assert!(!SessionState::restored(None).is_signed_in());
        assert!(SessionState::restored(Some("asha".into())).is_signed_in());
        let client = SessionClient::new(MockTransport::offline(), MemorySessionStore::with_user("ravi"));
        assert_eq!(client.restore().current_user(), Some("ravi"));
    }
}
