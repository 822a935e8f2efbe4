use cafe_core::constants::AUTH_REDIRECT_DELAY_MS;
use cafe_core::{AuthForm, OrderStage, Section};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::state::{AppState, StoreAction};

#[derive(Clone)]
pub struct AppHandlers {
    pub show: Callback<Section>,
    pub add_item: Callback<(String, u32)>,
    pub remove_item: Callback<usize>,
    pub select_stage: Callback<OrderStage>,
    pub place_order: Callback<()>,
    pub switch_form: Callback<AuthForm>,
    pub login: Callback<(String, String)>,
    pub register: Callback<(String, String)>,
    pub load_history: Callback<()>,
    pub lang_change: Callback<String>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            show: build_show(state),
            add_item: build_add_item(state),
            remove_item: build_remove_item(state),
            select_stage: build_select_stage(state),
            place_order: build_place_order(state),
            switch_form: build_switch_form(state),
            login: build_auth(state, AuthForm::Login),
            register: build_auth(state, AuthForm::Register),
            load_history: build_load_history(state),
            lang_change: build_lang_change(state),
        }
    }
}

fn build_show(state: &AppState) -> Callback<Section> {
    let dispatcher = state.store.dispatcher();
    Callback::from(move |section| dispatcher.dispatch(StoreAction::Show(section)))
}

fn build_add_item(state: &AppState) -> Callback<(String, u32)> {
    let dispatcher = state.store.dispatcher();
    Callback::from(move |(name, price)| dispatcher.dispatch(StoreAction::AddItem { name, price }))
}

fn build_remove_item(state: &AppState) -> Callback<usize> {
    let dispatcher = state.store.dispatcher();
    Callback::from(move |index| dispatcher.dispatch(StoreAction::RemoveItem(index)))
}

fn build_select_stage(state: &AppState) -> Callback<OrderStage> {
    let dispatcher = state.store.dispatcher();
    Callback::from(move |stage| dispatcher.dispatch(StoreAction::SelectStage(stage)))
}

fn build_place_order(state: &AppState) -> Callback<()> {
    let store = state.store.clone();
    let client = state.client.clone();
    Callback::from(move |()| {
        // The request carries the cart as rendered; the reducer repeats the checks.
        let mut snapshot = store.context.clone();
        let ticket = snapshot.begin_order();
        store.dispatch(StoreAction::BeginOrder);
        let Ok(ticket) = ticket else {
            return;
        };

        let dispatcher = store.dispatcher();
        let client = client.clone();
        spawn_local(async move {
            let result = client
                .place_order(snapshot.session(), snapshot.cart())
                .await;
            dispatcher.dispatch(StoreAction::FinishOrder(ticket, result));
        });
    })
}

fn build_switch_form(state: &AppState) -> Callback<AuthForm> {
    let dispatcher = state.store.dispatcher();
    Callback::from(move |form| dispatcher.dispatch(StoreAction::SwitchForm(form)))
}

fn build_auth(state: &AppState, form: AuthForm) -> Callback<(String, String)> {
    let dispatcher = state.store.dispatcher();
    let client = state.client.clone();
    Callback::from(move |(username, password): (String, String)| {
        dispatcher.dispatch(StoreAction::BeginAuth(form));
        let dispatcher = dispatcher.clone();
        let client = client.clone();
        spawn_local(async move {
            let result = match form {
                AuthForm::Login => client.login(&username, &password).await,
                AuthForm::Register => client.register(&username, &password).await,
            };
            let signed_in = result.is_ok();
            dispatcher.dispatch(StoreAction::FinishAuth(form, result));
            if signed_in {
                let _ = crate::dom::sleep_ms(AUTH_REDIRECT_DELAY_MS).await;
                dispatcher.dispatch(StoreAction::Show(Section::Home));
            }
        });
    })
}

fn build_load_history(state: &AppState) -> Callback<()> {
    let store = state.store.clone();
    let client = state.client.clone();
    Callback::from(move |()| {
        let Some(user) = store.context.session().current_user().map(str::to_string) else {
            return;
        };
        store.dispatch(StoreAction::BeginHistory);
        let dispatcher = store.dispatcher();
        let client = client.clone();
        spawn_local(async move {
            let result = client.order_history(&user).await;
            dispatcher.dispatch(StoreAction::FinishHistory(result));
        });
    })
}

fn build_lang_change(state: &AppState) -> Callback<String> {
    let current_language = state.current_language.clone();
    Callback::from(move |lang: String| {
        crate::i18n::set_lang(&lang);
        current_language.set(crate::i18n::current_lang());
    })
}
