use std::collections::BTreeMap;

use cafe_core::{AuthForm, FormStatus, HistoryStatus};
use yew::prelude::*;

use crate::components::auth_forms::AuthForms;
use crate::components::order_history::OrderHistory;
use crate::components::status::form_status_text;
use crate::i18n::{t, tr};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub user: Option<AttrValue>,
    pub active_form: AuthForm,
    pub login_status: FormStatus,
    pub register_status: FormStatus,
    pub history: HistoryStatus,
    pub on_switch: Callback<AuthForm>,
    pub on_login: Callback<(String, String)>,
    pub on_register: Callback<(String, String)>,
    pub on_refresh_history: Callback<()>,
}

#[function_component(AccountPage)]
pub fn account_page(p: &Props) -> Html {
    {
        // First visit after sign-in fetches the history once.
        let needs_history =
            p.user.is_some() && matches!(p.history, HistoryStatus::NotLoaded);
        let load = p.on_refresh_history.clone();
        use_effect_with(needs_history, move |needs| {
            if *needs {
                load.emit(());
            }
        });
    }

    let Some(user) = p.user.as_ref() else {
        return html! {
            <section id="account" class="section" aria-labelledby="account-title">
                <h2 id="account-title">{ t("nav.account") }</h2>
                <AuthForms
                    active_form={p.active_form}
                    login_status={p.login_status.clone()}
                    register_status={p.register_status.clone()}
                    on_switch={p.on_switch.clone()}
                    on_login={p.on_login.clone()}
                    on_register={p.on_register.clone()}
                />
                <p class="hint">{ t("history.login_hint") }</p>
            </section>
        };
    };

    let mut args = BTreeMap::new();
    args.insert("name", user.as_str());
    let status = match p.active_form {
        AuthForm::Login => &p.login_status,
        AuthForm::Register => &p.register_status,
    };

    html! {
        <section id="account" class="section" aria-labelledby="account-title">
            <h2 id="account-title">{ t("nav.account") }</h2>
            <p class="signed-in">{ tr("auth.signed_in_as", Some(&args)) }</p>
            if let Some(text) = form_status_text(p.active_form, status) {
                <p class="form-status">{ text }</p>
            }
            <OrderHistory status={p.history.clone()} on_refresh={p.on_refresh_history.clone()} />
        </section>
    }
}
