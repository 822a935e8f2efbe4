//! The storefront's whole mutable state in one place.
//!
//! Every customer action is a method here. Network work is split into a
//! `begin_*` half that validates and marks the form pending, and a `finish_*`
//! half that applies the result; the caller awaits the request in between.
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::api::OrderRecord;
use crate::bill::BillView;
use crate::cart::{Cart, LineItem};
use crate::error::{AuthError, OrderError, ValidationError};
use crate::session::{Confirmation, Session, SessionState};
use crate::stage::{
    OrderFlow, OrderStage, StageControl, StageError, StageView, TickOutcome, Transition,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[default]
    Home,
    Menu,
    Orders,
    Account,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::Home, Self::Menu, Self::Orders, Self::Account];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Menu => "menu",
            Self::Orders => "orders",
            Self::Account => "account",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthForm {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(AuthError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Idle,
    Pending,
    /// Backend stored the order; carries its confirmation text.
    Saved(Option<String>),
    /// Backend could not be reached; the order went ahead locally.
    NotSaved,
    Failed(OrderError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum HistoryStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<OrderRecord>),
    Failed(OrderError),
}

/// Handle for an in-flight order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTicket {
    generation: u64,
}

impl OrderTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderContext {
    cart: Cart,
    flow: OrderFlow,
    session: SessionState,
    section: Section,
    active_form: AuthForm,
    login_status: FormStatus,
    register_status: FormStatus,
    order_status: OrderStatus,
    history: HistoryStatus,
}

impl Default for OrderContext {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

impl OrderContext {
    #[must_use]
    pub fn new(session: SessionState) -> Self {
        Self::with_flow(session, OrderFlow::new())
    }

    #[must_use]
    pub fn with_flow(session: SessionState, flow: OrderFlow) -> Self {
        Self {
            cart: Cart::new(),
            flow,
            session,
            section: Section::Home,
            active_form: AuthForm::Login,
            login_status: FormStatus::Idle,
            register_status: FormStatus::Idle,
            order_status: OrderStatus::Idle,
            history: HistoryStatus::NotLoaded,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn flow(&self) -> &OrderFlow {
        &self.flow
    }

    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub const fn stage(&self) -> OrderStage {
        self.flow.stage()
    }

    #[must_use]
    pub const fn active_form(&self) -> AuthForm {
        self.active_form
    }

    #[must_use]
    pub const fn form_status(&self, form: AuthForm) -> &FormStatus {
        match form {
            AuthForm::Login => &self.login_status,
            AuthForm::Register => &self.register_status,
        }
    }

    #[must_use]
    pub const fn order_status(&self) -> &OrderStatus {
        &self.order_status
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryStatus {
        &self.history
    }

    pub fn add_item(&mut self, name: &str, price: u32) {
        self.cart.add(name, price);
        debug!("added {name} ({price}); cart holds {}", self.cart.len());
    }

    /// Drop the bill line at `index` and redraw the placed bill.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        let removed = self.cart.remove(index);
        let transition = self.flow.enter(OrderStage::Placed, &mut self.cart);
        self.settle_order_status(&transition);
        removed
    }

    /// Switch the visible section. Opening the orders view restarts the flow
    /// at `Placed`.
    pub fn show(&mut self, section: Section) -> Option<Transition> {
        self.section = section;
        if section != Section::Orders {
            return None;
        }
        let transition = self.flow.enter(OrderStage::Placed, &mut self.cart);
        self.settle_order_status(&transition);
        Some(transition)
    }

    /// # Errors
    ///
    /// Returns [`StageError::DeliveredIsTimerOnly`] for a manual jump to
    /// `Delivered`.
    pub fn select_stage(&mut self, stage: OrderStage) -> Result<Transition, StageError> {
        let transition = self.flow.navigate(stage, &mut self.cart)?;
        self.settle_order_status(&transition);
        Ok(transition)
    }

    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        let outcome = self.flow.tick(generation, &mut self.cart);
        if let TickOutcome::Delivered(transition) = &outcome {
            self.settle_order_status(transition);
        }
        outcome
    }

    /// Validate an order locally and mark it pending.
    ///
    /// # Errors
    ///
    /// Fails when nobody is signed in or the cart is empty; the failure is
    /// also recorded as the order status.
    pub fn begin_order(&mut self) -> Result<OrderTicket, OrderError> {
        let check = if !self.session.is_signed_in() {
            Err(OrderError::NotAuthenticated)
        } else if self.cart.is_empty() {
            Err(OrderError::Validation(ValidationError::EmptyCart))
        } else {
            Ok(())
        };
        if let Err(err) = check {
            self.order_status = OrderStatus::Failed(err.clone());
            return Err(err);
        }
        self.order_status = OrderStatus::Pending;
        Ok(OrderTicket {
            generation: self.flow.generation(),
        })
    }

    /// Apply the backend's answer to a submission. Answers for a flow that has
    /// since moved on are dropped.
    pub fn finish_order(
        &mut self,
        ticket: OrderTicket,
        result: Result<Confirmation, OrderError>,
    ) -> Option<Transition> {
        if ticket.generation != self.flow.generation() {
            debug!(
                "discarding order result from generation {} (now {})",
                ticket.generation,
                self.flow.generation()
            );
            return None;
        }
        match result {
            Ok(confirmation) => {
                info!(
                    "order confirmed for {}: {} items",
                    confirmation.username, confirmation.item_count
                );
                self.order_status = OrderStatus::Saved(confirmation.message);
                Some(self.flow.enter(OrderStage::Preparing, &mut self.cart))
            }
            Err(OrderError::ServerUnreachable) => {
                warn!("order not saved: backend unreachable, continuing locally");
                self.order_status = OrderStatus::NotSaved;
                Some(self.flow.enter(OrderStage::Preparing, &mut self.cart))
            }
            Err(err) => {
                self.order_status = OrderStatus::Failed(err);
                None
            }
        }
    }

    pub fn switch_form(&mut self, form: AuthForm) {
        self.active_form = form;
    }

    pub fn begin_auth(&mut self, form: AuthForm) {
        self.active_form = form;
        *self.form_status_mut(form) = FormStatus::Pending;
    }

    /// Record an auth outcome; returns whether a user is now signed in.
    pub fn finish_auth(&mut self, form: AuthForm, result: Result<Session, AuthError>) -> bool {
        match result {
            Ok(session) => {
                self.session.sign_in(session);
                self.history = HistoryStatus::NotLoaded;
                *self.form_status_mut(form) = FormStatus::Succeeded;
                true
            }
            Err(err) => {
                *self.form_status_mut(form) = FormStatus::Failed(err);
                false
            }
        }
    }

    pub fn begin_history(&mut self) -> Option<String> {
        let user = self.session.current_user()?.to_string();
        self.history = HistoryStatus::Loading;
        Some(user)
    }

    pub fn finish_history(&mut self, result: Result<Vec<OrderRecord>, OrderError>) {
        self.history = match result {
            Ok(rows) => HistoryStatus::Loaded(rows),
            Err(err) => HistoryStatus::Failed(err),
        };
    }

    #[must_use]
    pub fn stage_view(&self) -> StageView {
        self.flow.view(&self.cart)
    }

    /// The bill as the current stage presents it; empty outside bill stages.
    #[must_use]
    pub fn bill_view(&self) -> BillView {
        match self.stage_view() {
            StageView::Bill(bill) => bill,
            StageView::OnTheWay { .. } | StageView::Delivered { .. } => BillView::Empty,
        }
    }

    #[must_use]
    pub fn controls(&self) -> [StageControl; 4] {
        self.flow.controls()
    }

    /// A stage change orphans any in-flight submission, and a fresh `Placed`
    /// bill starts without the previous order's outcome.
    fn settle_order_status(&mut self, transition: &Transition) {
        if transition.to == OrderStage::Placed || self.order_status == OrderStatus::Pending {
            self.order_status = OrderStatus::Idle;
        }
    }

    fn form_status_mut(&mut self, form: AuthForm) -> &mut FormStatus {
        match form {
            AuthForm::Login => &mut self.login_status,
            AuthForm::Register => &mut self.register_status,
        }
    }
}
