//! Panels for the two stages that replace the bill.
use yew::prelude::*;

use crate::i18n::t;

#[derive(Properties, PartialEq, Clone)]
pub struct CountdownProps {
    pub clock: AttrValue,
}

#[function_component(CountdownPanel)]
pub fn countdown_panel(p: &CountdownProps) -> Html {
    html! {
        <div id="delivery" class="delivery">
            <p class="lead">{ t("delivery.on_the_way") }</p>
            <p class="arriving">
                { t("delivery.arriving") }{ " " }
                <span id="countdown" class="countdown" role="timer">{ p.clock.clone() }</span>
            </p>
            <p class="note">{ t("delivery.note") }</p>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct DeliveredProps {
    pub map_embed_url: AttrValue,
}

#[function_component(DeliveredPanel)]
pub fn delivered_panel(p: &DeliveredProps) -> Html {
    html! {
        <div id="delivered" class="delivered">
            <h3>{ "🎉 " }{ t("delivered.title") }</h3>
            <p>{ t("delivered.body") }</p>
            <h4>{ t("delivered.visit") }</h4>
            <iframe
                class="cafe-map"
                src={p.map_embed_url.clone()}
                title={t("delivered.map_title")}
                width="100%"
                height="250"
                loading="lazy"
            ></iframe>
        </div>
    }
}
