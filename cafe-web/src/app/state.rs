use std::rc::Rc;

use cafe_core::{
    AuthError, AuthForm, Confirmation, Menu, OrderContext, OrderError, OrderRecord, OrderStage,
    OrderTicket, Section, Session, SessionState, TickOutcome,
};
use log::debug;
use yew::prelude::*;

use crate::api::WebSessionClient;

/// Everything a customer can do, as reducer input.
#[derive(Debug)]
pub enum StoreAction {
    AddItem { name: String, price: u32 },
    RemoveItem(usize),
    Show(Section),
    SelectStage(OrderStage),
    Tick(u64),
    BeginOrder,
    FinishOrder(OrderTicket, Result<Confirmation, OrderError>),
    SwitchForm(AuthForm),
    BeginAuth(AuthForm),
    FinishAuth(AuthForm, Result<Session, AuthError>),
    BeginHistory,
    FinishHistory(Result<Vec<OrderRecord>, OrderError>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub context: OrderContext,
}

impl StoreState {
    /// State on page load: the remembered user and the section in the URL.
    #[must_use]
    pub fn restored(session: SessionState, section: Section) -> Self {
        let mut context = OrderContext::new(session);
        context.show(section);
        Self { context }
    }

    pub fn apply(&mut self, action: StoreAction) {
        let ctx = &mut self.context;
        match action {
            StoreAction::AddItem { name, price } => ctx.add_item(&name, price),
            StoreAction::RemoveItem(index) => {
                ctx.remove_item(index);
            }
            StoreAction::Show(section) => {
                ctx.show(section);
            }
            StoreAction::SelectStage(stage) => {
                if let Err(err) = ctx.select_stage(stage) {
                    debug!("stage control ignored: {err}");
                }
            }
            StoreAction::Tick(generation) => {
                if let TickOutcome::Delivered(transition) = ctx.tick(generation) {
                    debug!("delivered at generation {}", transition.generation);
                }
            }
            StoreAction::BeginOrder => {
                if let Err(err) = ctx.begin_order() {
                    debug!("order not submitted: {err}");
                }
            }
            StoreAction::FinishOrder(ticket, result) => {
                ctx.finish_order(ticket, result);
            }
            StoreAction::SwitchForm(form) => ctx.switch_form(form),
            StoreAction::BeginAuth(form) => ctx.begin_auth(form),
            StoreAction::FinishAuth(form, result) => {
                ctx.finish_auth(form, result);
            }
            StoreAction::BeginHistory => {
                if ctx.begin_history().is_none() {
                    debug!("order history skipped: nobody signed in");
                }
            }
            StoreAction::FinishHistory(result) => ctx.finish_history(result),
        }
    }
}

impl Reducible for StoreState {
    type Action = StoreAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: UseReducerHandle<StoreState>,
    pub client: Rc<WebSessionClient>,
    pub menu: Rc<Menu>,
    pub current_language: UseStateHandle<String>,
}

#[hook]
pub fn use_app_state(initial_section: Section) -> AppState {
    let client = use_memo((), |()| crate::api::session_client());
    let store = {
        let client = client.clone();
        use_reducer(move || StoreState::restored(client.restore(), initial_section))
    };
    AppState {
        store,
        client,
        menu: use_memo((), |()| Menu::default_menu().clone()),
        current_language: use_state(crate::i18n::current_lang),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::{BillView, OrderStatus, StageView};

    fn signed_in(section: Section) -> StoreState {
        StoreState::restored(SessionState::restored(Some("asha".into())), section)
    }

    #[test]
    fn restored_state_opens_requested_section() {
        let state = signed_in(Section::Orders);
        assert_eq!(state.context.section(), Section::Orders);
        assert_eq!(state.context.stage(), OrderStage::Placed);
        assert_eq!(state.context.session().current_user(), Some("asha"));
    }

    #[test]
    fn reducer_runs_the_bill_example() {
        let mut state = signed_in(Section::Menu);
        state.apply(StoreAction::AddItem {
            name: "Coffee".into(),
            price: 100,
        });
        state.apply(StoreAction::AddItem {
            name: "Sandwich".into(),
            price: 150,
        });
        state.apply(StoreAction::Show(Section::Orders));
        assert_eq!(state.context.bill_view().total(), 250);

        state.apply(StoreAction::RemoveItem(0));
        let bill = state.context.bill_view();
        assert_eq!(bill.total(), 150);
        assert_eq!(bill.lines()[0].name, "Sandwich");
    }

    #[test]
    fn ticks_for_old_generations_do_nothing() {
        let mut state = signed_in(Section::Orders);
        state.apply(StoreAction::AddItem {
            name: "Coffee".into(),
            price: 100,
        });
        state.apply(StoreAction::SelectStage(OrderStage::OnTheWay));
        let live = state.context.flow().ticker_key().expect("countdown is live");
        state.apply(StoreAction::SelectStage(OrderStage::OnTheWay));
        state.apply(StoreAction::Tick(live));
        let StageView::OnTheWay { remaining, .. } = state.context.stage_view() else {
            panic!("still on the way");
        };
        assert_eq!(remaining, 1200);
    }

    #[test]
    fn manual_delivered_is_ignored() {
        let mut state = signed_in(Section::Orders);
        state.apply(StoreAction::AddItem {
            name: "Coffee".into(),
            price: 100,
        });
        state.apply(StoreAction::SelectStage(OrderStage::Delivered));
        assert_eq!(state.context.stage(), OrderStage::Placed);
        assert_eq!(state.context.cart().len(), 1);
    }

    #[test]
    fn leaving_mid_order_keeps_place_button_usable() {
        let mut state = signed_in(Section::Orders);
        state.apply(StoreAction::AddItem {
            name: "Coffee".into(),
            price: 100,
        });
        let ticket = state.context.clone().begin_order().expect("order is valid");
        state.apply(StoreAction::BeginOrder);
        assert_eq!(state.context.order_status(), &OrderStatus::Pending);

        state.apply(StoreAction::Show(Section::Orders));
        state.apply(StoreAction::FinishOrder(
            ticket,
            Ok(Confirmation {
                username: "asha".into(),
                item_count: 1,
                total: 100,
                message: None,
            }),
        ));
        assert_eq!(state.context.stage(), OrderStage::Placed);
        assert_ne!(state.context.order_status(), &OrderStatus::Pending);
        assert!(state.context.bill_view().has_place_action());
    }

    #[test]
    fn guest_order_attempt_is_reported() {
        let mut state = StoreState::restored(SessionState::default(), Section::Orders);
        state.apply(StoreAction::AddItem {
            name: "Coffee".into(),
            price: 100,
        });
        state.apply(StoreAction::BeginOrder);
        assert_eq!(
            state.context.order_status(),
            &OrderStatus::Failed(OrderError::NotAuthenticated)
        );
        assert_ne!(state.context.bill_view(), BillView::Empty);
    }

    #[test]
    fn reduce_returns_a_new_state() {
        let state = Rc::new(signed_in(Section::Home));
        let next = state.clone().reduce(StoreAction::Show(Section::Account));
        assert_eq!(state.context.section(), Section::Home);
        assert_eq!(next.context.section(), Section::Account);
    }
}
