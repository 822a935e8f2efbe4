use cafe_core::{AuthForm, Section};
use yew::prelude::*;

use crate::app::state::AppState;
use crate::app::view::AppHandlers;
use crate::components::account_page::AccountPage;
use crate::components::home::HomePage;
use crate::components::menu_page::MenuPage;
use crate::components::not_found::NotFound;
use crate::components::orders_page::OrdersPage;
use crate::router::Route;

pub fn render_section(state: &AppState, handlers: &AppHandlers, route: Option<&Route>) -> Html {
    let ctx = &state.store.context;
    let go_to = |section: Section| {
        let show = handlers.show.clone();
        Callback::from(move |()| show.emit(section))
    };

    if route == Some(&Route::NotFound) {
        return html! { <NotFound on_home={go_to(Section::Home)} /> };
    }

    match ctx.section() {
        Section::Home => html! { <HomePage on_browse={go_to(Section::Menu)} /> },
        Section::Menu => html! {
            <MenuPage menu={state.menu.clone()} on_add={handlers.add_item.clone()} />
        },
        Section::Orders => html! {
            <OrdersPage
                view={ctx.stage_view()}
                controls={ctx.controls()}
                order_status={ctx.order_status().clone()}
                on_remove={handlers.remove_item.clone()}
                on_place={handlers.place_order.clone()}
                on_select={handlers.select_stage.clone()}
            />
        },
        Section::Account => html! {
            <AccountPage
                user={ctx.session().current_user().map(AttrValue::from)}
                active_form={ctx.active_form()}
                login_status={ctx.form_status(AuthForm::Login).clone()}
                register_status={ctx.form_status(AuthForm::Register).clone()}
                history={ctx.history().clone()}
                on_switch={handlers.switch_form.clone()}
                on_login={handlers.login.clone()}
                on_register={handlers.register.clone()}
                on_refresh_history={handlers.load_history.clone()}
            />
        },
    }
}
