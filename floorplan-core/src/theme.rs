/// Colour scheme of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    /// Accessible label for the toggle button.
    pub fn toggle_label(self) -> String {
        format!("Switch to {} mode", self.toggled().as_str())
    }

    /// Theme at startup: a stored choice wins, then the OS preference.
    pub fn resolve_initial(saved: Option<&str>, prefers_dark: bool) -> Self {
        saved
            .and_then(Theme::parse)
            .unwrap_or_else(|| Theme::from_system(prefers_dark))
    }

    /// Theme to switch to when the OS preference changes, or `None` while
    /// the user has a stored choice.
    pub fn follow_system(saved: Option<&str>, prefers_dark: bool) -> Option<Self> {
        match saved {
            Some(_) => None,
            None => Some(Theme::from_system(prefers_dark)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_choice_beats_system() {
        assert_eq!(Theme::resolve_initial(Some("light"), true), Theme::Light);
        assert_eq!(Theme::resolve_initial(Some("dark"), false), Theme::Dark);
    }

    #[test]
    fn falls_back_to_system_then_light() {
        assert_eq!(Theme::resolve_initial(None, true), Theme::Dark);
        assert_eq!(Theme::resolve_initial(None, false), Theme::Light);
        assert_eq!(Theme::resolve_initial(Some("sepia"), false), Theme::Light);
    }

    #[test]
    fn system_changes_ignored_once_user_chose() {
        assert_eq!(Theme::follow_system(Some("light"), true), None);
        assert_eq!(Theme::follow_system(None, true), Some(Theme::Dark));
    }

    #[test]
    fn toggle_flips_and_labels() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark mode");
    }
}
