//! Async controller that drives an [`OrderContext`] against a backend.
use log::{debug, info};

use crate::api::{ApiTransport, HealthStatus, TransportError};
use crate::context::{AuthForm, HistoryStatus, OrderContext, OrderStatus, Section};
use crate::countdown::Ticker;
use crate::session::{SessionClient, SessionStore};
use crate::stage::{OrderFlow, TickOutcome, Transition};

pub struct Storefront<T, S> {
    context: OrderContext,
    client: SessionClient<T, S>,
}

impl<T, S> Storefront<T, S>
where
    T: ApiTransport,
    S: SessionStore,
{
    /// Open the storefront with whatever session the store remembers.
    pub fn open(client: SessionClient<T, S>) -> Self {
        Self::open_with_flow(client, OrderFlow::new())
    }

    pub fn open_with_flow(client: SessionClient<T, S>, flow: OrderFlow) -> Self {
        let context = OrderContext::with_flow(client.restore(), flow);
        if let Some(user) = context.session().current_user() {
            info!("restored session for {user}");
        }
        Self { context, client }
    }

    pub const fn context(&self) -> &OrderContext {
        &self.context
    }

    pub const fn context_mut(&mut self) -> &mut OrderContext {
        &mut self.context
    }

    pub const fn client(&self) -> &SessionClient<T, S> {
        &self.client
    }

    /// Returns whether the login succeeded. On success the customer is sent
    /// back to the home section.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        self.context.begin_auth(AuthForm::Login);
        let result = self.client.login(username, password).await;
        self.finish_auth(AuthForm::Login, result)
    }

    pub async fn register(&mut self, username: &str, password: &str) -> bool {
        self.context.begin_auth(AuthForm::Register);
        let result = self.client.register(username, password).await;
        self.finish_auth(AuthForm::Register, result)
    }

    fn finish_auth(
        &mut self,
        form: AuthForm,
        result: Result<crate::session::Session, crate::error::AuthError>,
    ) -> bool {
        let signed_in = self.context.finish_auth(form, result);
        if signed_in {
            self.context.show(Section::Home);
        }
        signed_in
    }

    /// Submit the cart and apply the outcome to the flow.
    pub async fn place_order(&mut self) -> OrderStatus {
        let Ok(ticket) = self.context.begin_order() else {
            return self.context.order_status().clone();
        };
        let result = self
            .client
            .place_order(self.context.session(), self.context.cart())
            .await;
        self.context.finish_order(ticket, result);
        self.context.order_status().clone()
    }

    pub async fn load_history(&mut self) -> &HistoryStatus {
        if let Some(user) = self.context.begin_history() {
            let result = self.client.order_history(&user).await;
            self.context.finish_history(result);
        }
        self.context.history()
    }

    /// # Errors
    ///
    /// Fails when the backend cannot be reached or answers with something else.
    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.client.health().await
    }

    /// Tick the live countdown until it delivers or is cancelled. Returns the
    /// delivery transition, or `None` if no countdown was running.
    pub async fn run_countdown<K: Ticker + ?Sized>(&mut self, ticker: &mut K) -> Option<Transition> {
        loop {
            let generation = self.context.flow().ticker_key()?;
            ticker.tick().await;
            match self.context.tick(generation) {
                TickOutcome::Running { remaining } => {
                    if remaining % 60 == 0 {
                        debug!("delivery in {remaining}s");
                    }
                }
                TickOutcome::Delivered(transition) => return Some(transition),
                TickOutcome::Ignored => return None,
            }
        }
    }
}
