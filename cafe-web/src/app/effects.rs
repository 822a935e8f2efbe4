use cafe_core::constants::TICK_INTERVAL_MS;
use yew::prelude::*;

use crate::app::state::{StoreAction, StoreState};
use crate::interval::IntervalTask;

/// Keep a one-second interval alive exactly while the flow has a live
/// countdown. Re-entering "on the way" changes the key, which drops the old
/// interval before the new one starts.
#[hook]
pub fn use_delivery_ticker(store: &UseReducerHandle<StoreState>) {
    let key = store.context.flow().ticker_key();
    let dispatcher = store.dispatcher();
    use_effect_with(key, move |key| {
        let task = key.and_then(|generation| {
            IntervalTask::start(TICK_INTERVAL_MS, move || {
                dispatcher.dispatch(StoreAction::Tick(generation));
            })
            .map_err(|err| {
                crate::dom::console_error(&format!(
                    "delivery countdown could not start: {}",
                    crate::dom::js_error_message(&err)
                ));
            })
            .ok()
        });
        move || drop(task)
    });
}

/// Mirror the latest order or form status into the live region.
#[hook]
pub fn use_status_announcer(store: &UseReducerHandle<StoreState>) {
    let message = crate::components::status::announcement(&store.context);
    use_effect_with(message, |message| {
        if let Some(message) = message {
            crate::a11y::set_status(message);
        }
    });
}
