use cafe_core::{AuthForm, FormStatus};
use yew::prelude::*;

use crate::components::status::form_status_text;
use crate::i18n::t;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub active_form: AuthForm,
    pub login_status: FormStatus,
    pub register_status: FormStatus,
    pub on_switch: Callback<AuthForm>,
    pub on_login: Callback<(String, String)>,
    pub on_register: Callback<(String, String)>,
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<web_sys::HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[function_component(AuthForms)]
pub fn auth_forms(p: &Props) -> Html {
    let username_ref = use_node_ref();
    let password_ref = use_node_ref();

    let form = p.active_form;
    let (status, submit, id_prefix, button_key) = match form {
        AuthForm::Login => (&p.login_status, p.on_login.clone(), "login", "auth.login_button"),
        AuthForm::Register => (
            &p.register_status,
            p.on_register.clone(),
            "register",
            "auth.register_button",
        ),
    };
    let pending = matches!(status, FormStatus::Pending);

    let on_submit = {
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit((input_value(&username_ref), input_value(&password_ref)));
        })
    };

    let tab = |tab_form: AuthForm, label_key: &str| {
        let cb = p.on_switch.clone();
        let selected = tab_form == form;
        html! {
            <button
                type="button"
                role="tab"
                class={classes!("tab", selected.then_some("active"))}
                aria-selected={selected.to_string()}
                onclick={Callback::from(move |_| cb.emit(tab_form))}
            >
                { t(label_key) }
            </button>
        }
    };

    html! {
        <div class="auth-forms">
            <div class="tabs" role="tablist" aria-label={t("auth.tabs")}>
                { tab(AuthForm::Login, "auth.login_tab") }
                { tab(AuthForm::Register, "auth.register_tab") }
            </div>
            <form id={format!("{id_prefix}-form")} class="auth-form" onsubmit={on_submit}>
                <label for={format!("{id_prefix}-username")}>{ t("auth.username") }</label>
                <input
                    id={format!("{id_prefix}-username")}
                    type="text"
                    autocomplete="username"
                    ref={username_ref}
                />
                <label for={format!("{id_prefix}-password")}>{ t("auth.password") }</label>
                <input
                    id={format!("{id_prefix}-password")}
                    type="password"
                    autocomplete={if form == AuthForm::Login { "current-password" } else { "new-password" }}
                    ref={password_ref}
                />
                <button type="submit" class="action-btn" disabled={pending}>{ t(button_key) }</button>
            </form>
            if let Some(text) = form_status_text(form, status) {
                <p id={format!("{id_prefix}-status")} class="form-status">{ text }</p>
            }
        </div>
    }
}
