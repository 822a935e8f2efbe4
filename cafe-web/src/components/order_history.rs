use cafe_core::{HistoryStatus, OrderRecord};
use yew::prelude::*;

use crate::i18n::{fmt_amount, fmt_date_iso, t};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub status: HistoryStatus,
    pub on_refresh: Callback<()>,
}

fn render_row(order: &OrderRecord) -> Html {
    let placed = order
        .created_at
        .as_deref()
        .map(fmt_date_iso)
        .unwrap_or_default();
    html! {
        <tr>
            <td>{ order.item_name.clone() }</td>
            <td class="num">{ fmt_amount(order.price) }</td>
            <td class="num">{ fmt_amount(order.total) }</td>
            <td>{ placed }</td>
        </tr>
    }
}

#[function_component(OrderHistory)]
pub fn order_history(p: &Props) -> Html {
    let on_refresh = {
        let cb = p.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let body = match &p.status {
        HistoryStatus::NotLoaded => Html::default(),
        HistoryStatus::Loading => html! { <p class="loading">{ t("history.loading") }</p> },
        HistoryStatus::Failed(_) => html! { <p class="error">{ t("history.failed") }</p> },
        HistoryStatus::Loaded(orders) if orders.is_empty() => {
            html! { <p class="empty">{ t("history.empty") }</p> }
        }
        HistoryStatus::Loaded(orders) => html! {
            <table class="history-table">
                <tbody>
                    { for orders.iter().map(render_row) }
                </tbody>
            </table>
        },
    };

    html! {
        <div id="order-history" class="order-history">
            <div class="history-header">
                <h3>{ t("history.title") }</h3>
                <button
                    id="history-refresh"
                    class="link-btn"
                    disabled={matches!(p.status, HistoryStatus::Loading)}
                    onclick={on_refresh}
                >
                    { t("history.refresh") }
                </button>
            </div>
            { body }
        </div>
    }
}
