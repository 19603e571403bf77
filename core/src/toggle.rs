//! Landing/projects toggle state, mirrored into the URL fragment.

pub const PROJECTS_FRAGMENT: &str = "projects";

/// True when a location hash selects the projects view. Accepts the
/// hash with or without its leading `#`.
pub fn fragment_shows_projects(hash: &str) -> bool {
    hash.trim().trim_start_matches('#') == PROJECTS_FRAGMENT
}

/// Fragment to write for a visibility state; `None` clears the hash.
pub fn fragment_for(projects_visible: bool) -> Option<&'static str> {
    projects_visible.then_some(PROJECTS_FRAGMENT)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleState {
    projects_visible: bool,
}

impl ToggleState {
    pub fn from_fragment(hash: &str) -> Self {
        Self {
            projects_visible: fragment_shows_projects(hash),
        }
    }

    pub fn projects_visible(&self) -> bool {
        self.projects_visible
    }

    /// Returns whether the state changed; repeated calls in the same
    /// direction are no-ops.
    pub fn show_projects(&mut self) -> bool {
        let changed = !self.projects_visible;
        self.projects_visible = true;
        changed
    }

    pub fn show_landing(&mut self) -> bool {
        let changed = self.projects_visible;
        self.projects_visible = false;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_parse() {
        assert!(fragment_shows_projects("#projects"));
        assert!(fragment_shows_projects("projects"));
        assert!(!fragment_shows_projects(""));
        assert!(!fragment_shows_projects("#about"));
        assert!(!fragment_shows_projects("#Projects"));
    }

    #[test]
    fn fragment_round_trip() {
        assert_eq!(fragment_for(true), Some("projects"));
        assert_eq!(fragment_for(false), None);
        assert!(fragment_shows_projects(fragment_for(true).unwrap()));
    }

    #[test]
    fn deep_link_seeds_state() {
        assert!(ToggleState::from_fragment("#projects").projects_visible());
        assert!(!ToggleState::from_fragment("").projects_visible());
    }

    #[test]
    fn toggling_is_idempotent() {
        let mut state = ToggleState::default();
        assert!(state.show_projects());
        assert!(!state.show_projects());
        assert!(state.show_landing());
        assert!(!state.show_landing());
    }
}
