use std::collections::BTreeMap;

use crate::i18n::{locales, t, tr};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Signed-in username, if any.
    #[prop_or_default]
    pub user: Option<AttrValue>,
    pub current_lang: String,
    pub on_lang_change: Callback<String>,
    pub on_account: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(sel.value());
            }
        })
    };
    let open_account = {
        let cb = p.on_account.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let user_label = p.user.as_ref().map_or_else(
        || t("header.login"),
        |name| {
            let mut args = BTreeMap::new();
            args.insert("name", name.as_str());
            tr("header.user", Some(&args))
        },
    );

    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <span class="brand">{ "☕ " }{ t("brand.name") }</span>
                <div class="header-right">
                    <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                    <select id="lang-select" onchange={on_change} aria-label={t("nav.language")}>
                        { for locales().iter().map(|meta| html! {
                            <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
                        }) }
                    </select>
                    <button id="user-btn" class={classes!("user-btn", p.user.is_some().then_some("signed-in"))} onclick={open_account}>
                        { user_label }
                    </button>
                </div>
            </div>
        </header>
    }
}
