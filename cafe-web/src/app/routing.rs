use crate::router::Route;
use cafe_core::Section;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

#[cfg(target_arch = "wasm32")]
use crate::app::state::{StoreAction, StoreState};

/// Route to push after the section changed, if the URL does not show it yet.
#[cfg(any(target_arch = "wasm32", test))]
fn next_route_for_section(section: Section, current_route: Option<&Route>) -> Option<Route> {
    let new_route = Route::from_section(section);
    (Some(&new_route) != current_route).then_some(new_route)
}

/// Section to open after the URL changed, if it differs from the current one.
#[cfg(any(target_arch = "wasm32", test))]
fn next_section_for_route(current: Section, route: Option<&Route>) -> Option<Section> {
    let next = route.and_then(Route::to_section)?;
    (next != current).then_some(next)
}

/// Section the page should open on for the URL it was loaded with.
#[must_use]
pub fn initial_section(route: Option<&Route>) -> Section {
    route.and_then(Route::to_section).unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_route_with_section(
    store: &UseReducerHandle<StoreState>,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    let section = store.context.section();
    use_effect_with(section, move |section| {
        if let (Some(nav), Some(route)) = (
            navigator.as_ref(),
            next_route_for_section(*section, active_route.as_ref()),
        ) {
            nav.push(&route);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_section_with_route(store: &UseReducerHandle<StoreState>, route: Option<Route>) {
    let section = store.context.section();
    let dispatcher = store.dispatcher();
    use_effect_with(route, move |route| {
        if let Some(next) = next_section_for_route(section, route.as_ref()) {
            dispatcher.dispatch(StoreAction::Show(next));
        }
    });
}
