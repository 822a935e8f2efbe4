use cafe_core::{OrderStage, OrderStatus, StageControl, StageView};
use yew::prelude::*;

use crate::components::bill::BillPanel;
use crate::components::delivery::{CountdownPanel, DeliveredPanel};
use crate::components::stage_controls::StageControls;
use crate::components::status::order_status_text;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: StageView,
    pub controls: [StageControl; 4],
    pub order_status: OrderStatus,
    pub on_remove: Callback<usize>,
    pub on_place: Callback<()>,
    pub on_select: Callback<OrderStage>,
}

#[function_component(OrdersPage)]
pub fn orders_page(p: &Props) -> Html {
    let body = match &p.view {
        StageView::Bill(bill) => html! {
            <BillPanel
                view={bill.clone()}
                on_remove={p.on_remove.clone()}
                on_place={p.on_place.clone()}
                busy={matches!(p.order_status, OrderStatus::Pending)}
            />
        },
        StageView::OnTheWay { clock, .. } => html! {
            <CountdownPanel clock={AttrValue::from(clock.clone())} />
        },
        StageView::Delivered { map_embed_url } => html! {
            <DeliveredPanel map_embed_url={AttrValue::Static(*map_embed_url)} />
        },
    };
    let status_class = match p.order_status {
        OrderStatus::Saved(_) => "ok",
        OrderStatus::NotSaved | OrderStatus::Failed(_) => "error",
        OrderStatus::Idle | OrderStatus::Pending => "info",
    };

    html! {
        <section id="orders" class="section" aria-labelledby="orders-title">
            <h2 id="orders-title" class="sr-only">{ crate::i18n::t("nav.orders") }</h2>
            <StageControls controls={p.controls} on_select={p.on_select.clone()} />
            { body }
            if let Some(text) = order_status_text(&p.order_status) {
                <p id="order-status" class={classes!("order-status", status_class)}>{ text }</p>
            }
        </section>
    }
}
