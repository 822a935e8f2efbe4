use cafe_core::Section;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/menu")]
    Menu,
    #[at("/orders")]
    Orders,
    #[at("/account")]
    Account,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_section(section: Section) -> Self {
        match section {
            Section::Home => Self::Home,
            Section::Menu => Self::Menu,
            Section::Orders => Self::Orders,
            Section::Account => Self::Account,
        }
    }

    /// `None` for the not-found page, which keeps the current section.
    #[must_use]
    pub const fn to_section(&self) -> Option<Section> {
        match self {
            Self::Home => Some(Section::Home),
            Self::Menu => Some(Section::Menu),
            Self::Orders => Some(Section::Orders),
            Self::Account => Some(Section::Account),
            Self::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_round_trip_through_routes() {
        for section in Section::ALL {
            assert_eq!(Route::from_section(section).to_section(), Some(section));
        }
        assert_eq!(Route::NotFound.to_section(), None);
    }

    #[test]
    fn paths_match_section_keys() {
        assert_eq!(Route::Home.to_path(), "/");
        for section in [Section::Menu, Section::Orders, Section::Account] {
            assert_eq!(
                Route::from_section(section).to_path(),
                format!("/{}", section.key())
            );
        }
    }
}
