use cafe_core::Section;
use yew::prelude::*;

use crate::i18n::t;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub active: Section,
    pub on_show: Callback<Section>,
}

#[function_component(Nav)]
pub fn nav(p: &Props) -> Html {
    html! {
        <nav class="site-nav" aria-label={t("nav.label")}>
            { for Section::ALL.into_iter().map(|section| {
                let on_click = {
                    let cb = p.on_show.clone();
                    Callback::from(move |_| cb.emit(section))
                };
                let active = section == p.active;
                html! {
                    <button
                        id={format!("nav-{}", section.key())}
                        class={classes!("nav-link", active.then_some("active"))}
                        aria-current={active.then_some("page")}
                        onclick={on_click}
                    >
                        { t(&format!("nav.{}", section.key())) }
                    </button>
                }
            }) }
        </nav>
    }
}
