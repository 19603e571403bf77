/// One-based page cursor over a loaded document.
///
/// `current` stays inside `[1, total]` once a total is known; stepping
/// past either end returns `None` and leaves the cursor untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    total: u32,
}

impl Pager {
    pub fn new() -> Self {
        Self {
            current: 1,
            total: 0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn set_total(&mut self, total: u32) {
        self.total = total;
        if total > 0 && self.current > total {
            self.current = total;
        }
    }

    pub fn can_prev(&self) -> bool {
        self.current > 1
    }

    pub fn can_next(&self) -> bool {
        self.current < self.total
    }

    pub fn prev(&mut self) -> Option<u32> {
        if !self.can_prev() {
            return None;
        }
        self.current -= 1;
        Some(self.current)
    }

    pub fn next(&mut self) -> Option<u32> {
        if !self.can_next() {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_in_bounds() {
        let mut pager = Pager::new();
        pager.set_total(3);
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.next(), Some(2));
        assert_eq!(pager.next(), Some(3));
        assert_eq!(pager.next(), None);
        assert_eq!(pager.current(), 3);
        assert_eq!(pager.prev(), Some(2));
    }

    #[test]
    fn button_state_tracks_edges() {
        let mut pager = Pager::new();
        pager.set_total(2);
        assert!(!pager.can_prev());
        assert!(pager.can_next());
        pager.next();
        assert!(pager.can_prev());
        assert!(!pager.can_next());
    }

    #[test]
    fn label_format() {
        let mut pager = Pager::new();
        pager.set_total(12);
        pager.next();
        assert_eq!(pager.label(), "Page 2 of 12");
    }

    #[test]
    fn shrinking_total_clamps_current() {
        let mut pager = Pager::new();
        pager.set_total(5);
        while pager.next().is_some() {}
        pager.set_total(2);
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn empty_document_never_advances() {
        let mut pager = Pager::new();
        assert_eq!(pager.next(), None);
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.current(), 1);
    }
}
