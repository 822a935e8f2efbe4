#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod effects;
pub mod routing;
pub mod state;
pub mod view;

pub use state::{AppState, StoreAction, StoreState};

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let app_state = state::use_app_state(routing::initial_section(route.as_ref()));

    routing::use_sync_route_with_section(&app_state.store, navigator, route.clone());
    routing::use_sync_section_with_route(&app_state.store, route.clone());
    effects::use_delivery_ticker(&app_state.store);
    effects::use_status_announcer(&app_state.store);

    view::render_app(&app_state, route.as_ref())
}
