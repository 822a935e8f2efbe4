use std::rc::Rc;

use cafe_core::Menu;
use yew::prelude::*;

use crate::components::menu_card::MenuCard;
use crate::i18n::t;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub menu: Rc<Menu>,
    pub on_add: Callback<(String, u32)>,
}

#[function_component(MenuPage)]
pub fn menu_page(p: &Props) -> Html {
    html! {
        <section id="menu" class="section" aria-labelledby="menu-title">
            <h2 id="menu-title">{ t("menu.title") }</h2>
            { for p.menu.categories.iter().map(|category| html! {
                <div class="menu-category" key={category.id.clone()}>
                    <h3 class="category-title">{ category.name.clone() }</h3>
                    <div class="menu-grid">
                        { for category.items.iter().map(|item| html! {
                            <MenuCard key={item.id.clone()} item={item.clone()} on_add={p.on_add.clone()} />
                        }) }
                    </div>
                </div>
            }) }
        </section>
    }
}
