mod handlers;
mod sections;

pub use handlers::AppHandlers;

use crate::app::state::AppState;
use crate::router::Route;
use yew::prelude::*;

pub fn render_app(state: &AppState, route: Option<&Route>) -> Html {
    let handlers = AppHandlers::new(state);
    let ctx = &state.store.context;
    let user = ctx.session().current_user().map(AttrValue::from);
    let main_view = sections::render_section(state, &handlers, route);

    let open_account = {
        let show = handlers.show.clone();
        Callback::from(move |()| show.emit(cafe_core::Section::Account))
    };

    html! {
        <>
            <crate::components::header::Header
                user={user}
                current_lang={(*state.current_language).clone()}
                on_lang_change={handlers.lang_change.clone()}
                on_account={open_account}
            />
            <crate::components::nav::Nav active={ctx.section()} on_show={handlers.show.clone()} />
            <main id="main" role="main">
                <style>{ crate::a11y::visible_focus_css() }</style>
                <p id={crate::a11y::STATUS_REGION_ID} class="sr-only" aria-live="polite"></p>
                { main_view }
            </main>
            <crate::components::footer::Footer />
        </>
    }
}
