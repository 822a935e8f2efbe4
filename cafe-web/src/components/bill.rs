use std::collections::BTreeMap;

use cafe_core::BillView;
use yew::prelude::*;

use crate::i18n::{fmt_currency, t, tr};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: BillView,
    pub on_remove: Callback<usize>,
    pub on_place: Callback<()>,
    /// Disables the place button while a request is in flight.
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(BillPanel)]
pub fn bill_panel(p: &Props) -> Html {
    let BillView::Items {
        lines,
        total,
        message,
        place_action,
    } = &p.view
    else {
        return html! {
            <div id="bill" class="bill empty">
                <p>{ t("bill.empty") }</p>
                <p class="hint">{ t("bill.empty_hint") }</p>
            </div>
        };
    };

    let count = lines.len().to_string();
    let mut count_args = BTreeMap::new();
    count_args.insert("count", count.as_str());
    let total_str = fmt_currency(*total);
    let mut total_args = BTreeMap::new();
    total_args.insert("amount", total_str.as_str());

    let on_place = {
        let cb = p.on_place.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div id="bill" class="bill">
            <p class="bill-count">{ tr("bill.items", Some(&count_args)) }</p>
            <ul class="bill-lines">
                { for lines.iter().map(|line| {
                    let mut args = BTreeMap::new();
                    args.insert("name", line.name.as_str());
                    let remove_label = tr("bill.remove", Some(&args));
                    let on_remove = {
                        let cb = p.on_remove.clone();
                        let index = line.index;
                        Callback::from(move |_| cb.emit(index))
                    };
                    html! {
                        <li class="bill-line">
                            <span class="name">{ line.name.clone() }</span>
                            <span class="price">{ fmt_currency(u64::from(line.price)) }</span>
                            if line.removable {
                                <button class="remove-btn" aria-label={remove_label} onclick={on_remove}>{ "✖" }</button>
                            }
                        </li>
                    }
                }) }
            </ul>
            <p class="bill-total"><strong>{ tr("bill.total", Some(&total_args)) }</strong></p>
            if let Some(message) = message {
                <p class="bill-message">{ message.clone() }</p>
            }
            if *place_action {
                <button id="place-order-btn" class="action-btn" disabled={p.busy} onclick={on_place}>
                    { t("bill.place") }
                </button>
            }
        </div>
    }
}
