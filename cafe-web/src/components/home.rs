use cafe_core::constants::TAGLINE_TICK_MS;
use yew::prelude::*;

use crate::components::tagline::Tagline;
use crate::i18n::t;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_browse: Callback<()>,
}

#[function_component(HomePage)]
pub fn home_page(p: &Props) -> Html {
    let on_click = {
        let cb = p.on_browse.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let taglines: Vec<AttrValue> = ["home.tagline_1", "home.tagline_2", "home.tagline_3"]
        .into_iter()
        .map(|key| AttrValue::from(t(key)))
        .collect();

    html! {
        <section id="home" class="section hero" aria-labelledby="home-title">
            <h1 id="home-title">{ t("home.title") }</h1>
            <p class="subtitle">{ t("home.subtitle") }</p>
            <Tagline texts={taglines} tick_ms={TAGLINE_TICK_MS} />
            <button id="browse-btn" class="action-btn" onclick={on_click}>{ t("home.cta") }</button>
        </section>
    }
}
