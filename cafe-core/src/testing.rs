//! In-process stand-ins for the cafe backend.
//!
//! `MockTransport` replays canned replies and records what was sent.
//! `InMemoryBackend` behaves like the real backend (accounts, duplicate
//! usernames, order rows) so whole storefront flows can run without a server.
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::{ApiTransport, TransportError};
use crate::constants::{
    HEALTH_PATH, LOGIN_PATH, ORDERS_PATH_PREFIX, REGISTER_PATH, SAVE_ORDER_PATH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

type Reply = Result<Value, TransportError>;

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<Reply>,
    fallback: Option<Reply>,
    requests: Vec<RecordedRequest>,
}

/// Scripted transport. Clones share the script and the request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    /// Answers every request with `body`.
    #[must_use]
    pub fn replying(body: Value) -> Self {
        let transport = Self::default();
        transport.state.borrow_mut().fallback = Some(Ok(body));
        transport
    }

    /// Fails every request as if the server were down.
    #[must_use]
    pub fn offline() -> Self {
        let transport = Self::default();
        transport.state.borrow_mut().fallback = Some(Err(TransportError::Unreachable(
            "connection refused".to_string(),
        )));
        transport
    }

    /// Queue a one-off reply ahead of the fallback.
    pub fn push_reply(&self, reply: Result<Value, TransportError>) {
        self.state.borrow_mut().queued.push_back(reply);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.borrow().requests.clone()
    }

    fn answer(&self, method: Method, path: &str, body: Option<Value>) -> Reply {
        let mut state = self.state.borrow_mut();
        state.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });
        state
            .queued
            .pop_front()
            .or_else(|| state.fallback.clone())
            .unwrap_or_else(|| Err(TransportError::Unreachable("no reply scripted".to_string())))
    }
}

#[async_trait(?Send)]
impl ApiTransport for MockTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        self.answer(Method::Post, path, Some(body))
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        self.answer(Method::Get, path, None)
    }
}

#[derive(Debug, Default)]
struct BackendState {
    passwords: HashMap<String, String>,
    orders: Vec<Value>,
    next_order_id: u64,
    online: bool,
}

/// Behavioural model of the cafe backend.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    state: Rc<RefCell<BackendState>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(BackendState {
                online: true,
                next_order_id: 1,
                ..BackendState::default()
            })),
        }
    }
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_account(self, username: &str, password: &str) -> Self {
        self.state
            .borrow_mut()
            .passwords
            .insert(username.to_string(), password.to_string());
        self
    }

    pub fn set_online(&self, online: bool) {
        self.state.borrow_mut().online = online;
    }

    #[must_use]
    pub fn order_rows(&self) -> usize {
        self.state.borrow().orders.len()
    }

    fn credentials(body: &Value) -> (String, String) {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        (field("username"), field("password"))
    }

    fn register(&self, body: &Value) -> Value {
        let (username, password) = Self::credentials(body);
        if username.is_empty() || password.is_empty() {
            return json!({"success": false, "message": "Username and password required"});
        }
        let mut state = self.state.borrow_mut();
        if state.passwords.contains_key(&username) {
            return json!({"success": false, "message": "Username already taken"});
        }
        state.passwords.insert(username.clone(), password);
        json!({"success": true, "message": "Registered successfully", "username": username})
    }

    fn login(&self, body: &Value) -> Value {
        let (username, password) = Self::credentials(body);
        if username.is_empty() || password.is_empty() {
            return json!({"success": false, "message": "Username and password required"});
        }
        let state = self.state.borrow();
        if state.passwords.get(&username) == Some(&password) {
            json!({"success": true, "message": "Login successful", "username": username})
        } else {
            json!({"success": false, "message": "Invalid username or password"})
        }
    }

    fn save_order(&self, body: &Value) -> Value {
        let username = body
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or("guest")
            .to_string();
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        if items.is_empty() {
            return json!({"success": false, "message": "Cart is empty"});
        }
        let total = body.get("total").cloned().unwrap_or(json!(0));
        let mut state = self.state.borrow_mut();
        for item in &items {
            let id = state.next_order_id;
            state.next_order_id += 1;
            state.orders.push(json!({
                "id": id,
                "username": username,
                "item_name": item.get("name").cloned().unwrap_or(Value::Null),
                "price": item.get("price").cloned().unwrap_or(json!(0)),
                "total": total,
            }));
        }
        json!({"success": true, "message": format!("Order saved! {} items stored.", items.len())})
    }

    fn orders_for(&self, username: &str) -> Value {
        let state = self.state.borrow();
        let rows: Vec<Value> = state
            .orders
            .iter()
            .rev()
            .filter(|row| row.get("username").and_then(Value::as_str) == Some(username))
            .cloned()
            .collect();
        json!({"success": true, "orders": rows})
    }

    fn ensure_online(&self) -> Result<(), TransportError> {
        if self.state.borrow().online {
            Ok(())
        } else {
            Err(TransportError::Unreachable("backend offline".to_string()))
        }
    }
}

#[async_trait(?Send)]
impl ApiTransport for InMemoryBackend {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        self.ensure_online()?;
        match path {
            REGISTER_PATH => Ok(self.register(&body)),
            LOGIN_PATH => Ok(self.login(&body)),
            SAVE_ORDER_PATH => Ok(self.save_order(&body)),
            other => Err(TransportError::Decode(format!("no POST route for {other}"))),
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        self.ensure_online()?;
        if path == HEALTH_PATH {
            return Ok(json!({"status": "ok", "message": "Cafe.com API is running"}));
        }
        let Some(encoded) = path.strip_prefix(ORDERS_PATH_PREFIX) else {
            return Err(TransportError::Decode(format!("no GET route for {path}")));
        };
        let username = urlencoding::decode(encoded)
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        Ok(self.orders_for(&username))
    }
}
