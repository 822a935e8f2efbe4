//! Typewriter effect cycling through the home page taglines.
use yew::prelude::*;

/// Position of the typewriter: which text, and how many of its characters
/// are showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingState {
    text: usize,
    chars: usize,
}

impl TypingState {
    #[must_use]
    pub fn visible<'a>(&self, texts: &'a [AttrValue]) -> &'a str {
        let Some(text) = texts.get(self.text) else {
            return "";
        };
        let end = text
            .char_indices()
            .nth(self.chars)
            .map_or(text.len(), |(idx, _)| idx);
        &text[..end]
    }

    /// One keystroke. After the whole text has shown, start over with the next.
    #[must_use]
    pub fn advance(self, texts: &[AttrValue]) -> Self {
        let len = texts.get(self.text).map_or(0, |text| text.chars().count());
        if self.chars >= len {
            Self {
                text: (self.text + 1) % texts.len().max(1),
                chars: 0,
            }
        } else {
            Self {
                chars: self.chars + 1,
                ..self
            }
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub texts: Vec<AttrValue>,
    pub tick_ms: u32,
}

#[function_component(Tagline)]
pub fn tagline(p: &Props) -> Html {
    let typing = use_reducer_eq(|| TypingStateCell(TypingState::default()));
    {
        let dispatcher = typing.dispatcher();
        let texts = p.texts.clone();
        use_effect_with((texts, p.tick_ms), move |(texts, tick_ms)| {
            let task = if texts.is_empty() {
                None
            } else {
                let texts = texts.clone();
                crate::interval::IntervalTask::start(*tick_ms, move || {
                    dispatcher.dispatch(texts.clone());
                })
                .ok()
            };
            move || drop(task)
        });
    }
    html! {
        <p class="tagline" aria-hidden="true">
            <span id="typing">{ typing.0.visible(&p.texts) }</span>
            <span class="caret">{ "|" }</span>
        </p>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypingStateCell(TypingState);

impl Reducible for TypingStateCell {
    type Action = Vec<AttrValue>;

    fn reduce(self: std::rc::Rc<Self>, texts: Self::Action) -> std::rc::Rc<Self> {
        std::rc::Rc::new(Self(self.0.advance(&texts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts() -> Vec<AttrValue> {
        vec![AttrValue::from("ab"), AttrValue::from("ç☕")]
    }

    #[test]
    fn types_one_character_per_step_then_moves_on() {
        let texts = texts();
        let mut state = TypingState::default();
        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(state.visible(&texts).to_string());
            state = state.advance(&texts);
        }
        assert_eq!(seen, ["", "a", "ab", "", "ç", "ç☕", ""]);
    }

    #[test]
    fn empty_list_is_harmless() {
        let state = TypingState::default().advance(&[]);
        assert_eq!(state.visible(&[]), "");
    }
}
