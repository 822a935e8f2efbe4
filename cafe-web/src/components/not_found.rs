use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(p: &Props) -> Html {
    let go_home = {
        let cb = p.on_home.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="section not-found" aria-labelledby="not-found-title">
            <h2 id="not-found-title">{ t("not_found.title") }</h2>
            <button class="action-btn" onclick={go_home}>{ t("not_found.back") }</button>
        </section>
    }
}
