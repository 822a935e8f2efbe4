use cafe_core::{OrderStage, StageControl};
use yew::prelude::*;

use crate::i18n::t;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub controls: [StageControl; 4],
    pub on_select: Callback<OrderStage>,
}

#[function_component(StageControls)]
pub fn stage_controls(p: &Props) -> Html {
    html! {
        <div class="stage-controls" role="group" aria-label={t("stages.label")}>
            { for p.controls.iter().map(|control| {
                let stage = control.stage;
                let on_click = {
                    let cb = p.on_select.clone();
                    Callback::from(move |_| cb.emit(stage))
                };
                html! {
                    <button
                        id={format!("stage-{}", stage.key())}
                        class={classes!("stage-btn", control.active.then_some("active"))}
                        aria-pressed={control.active.to_string()}
                        disabled={!control.enabled}
                        onclick={on_click}
                    >
                        { t(&format!("stages.{}", stage.key())) }
                    </button>
                }
            }) }
        </div>
    }
}
