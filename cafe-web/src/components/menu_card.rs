use std::collections::BTreeMap;

use cafe_core::MenuItem;
use cafe_core::constants::ADDED_LABEL_RESET_MS;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::i18n::{fmt_currency, t, tr};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub item: MenuItem,
    pub on_add: Callback<(String, u32)>,
}

/// One menu entry. The add button briefly confirms each press.
#[function_component(MenuCard)]
pub fn menu_card(p: &Props) -> Html {
    let added = use_state_eq(|| false);
    let on_click = {
        let cb = p.on_add.clone();
        let name = p.item.name.clone();
        let price = p.item.price;
        let added = added.clone();
        Callback::from(move |_| {
            cb.emit((name.clone(), price));
            added.set(true);
            let added = added.clone();
            spawn_local(async move {
                let _ = crate::dom::sleep_ms(ADDED_LABEL_RESET_MS).await;
                added.set(false);
            });
        })
    };

    let mut args = BTreeMap::new();
    args.insert("name", p.item.name.as_str());
    let add_label = tr("menu.add_label", Some(&args));
    let label = if *added { t("menu.added") } else { t("menu.add") };

    html! {
        <article class="menu-card" data-item={p.item.id.clone()}>
            <h3>{ p.item.name.clone() }</h3>
            if !p.item.desc.is_empty() {
                <p class="desc">{ p.item.desc.clone() }</p>
            }
            <p class="price">{ fmt_currency(u64::from(p.item.price)) }</p>
            <button
                class={classes!("add-btn", (*added).then_some("added"))}
                aria-label={add_label}
                onclick={on_click}
            >
                { label }
            </button>
        </article>
    }
}
