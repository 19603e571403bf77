//! Render sequencing for the document viewer.
//!
//! Only one rasterization is ever logically current. Each render begins
//! a new pass; a completion may touch UI state only while its pass is
//! still the current one, so a slow superseded render can never clobber
//! a faster later one.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerPhase {
    Booting,
    LoadingEngine,
    LoadingDocument,
    Idle,
    Rendering,
    Failed,
}

impl ViewerPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewerPhase::Failed)
    }
}

/// Token handed to one render attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderPass(u64);

#[derive(Debug, Default)]
pub struct RenderSeq {
    next: u64,
    current: Option<u64>,
}

impl RenderSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new pass, superseding any outstanding one.
    pub fn begin(&mut self) -> RenderPass {
        self.next += 1;
        self.current = Some(self.next);
        RenderPass(self.next)
    }

    pub fn is_current(&self, pass: &RenderPass) -> bool {
        self.current == Some(pass.0)
    }

    /// Marks the pass complete. Returns false for superseded passes,
    /// whose effects must be discarded.
    pub fn finish(&mut self, pass: &RenderPass) -> bool {
        if !self.is_current(pass) {
            return false;
        }
        self.current = None;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_begun_pass_wins() {
        let mut seq = RenderSeq::new();
        let first = seq.begin();
        let second = seq.begin();
        // The superseded completion arrives late and is discarded.
        assert!(!seq.finish(&first));
        assert!(seq.finish(&second));
        assert!(!seq.in_flight());
    }

    #[test]
    fn win_is_by_navigation_order_not_completion_order() {
        let mut seq = RenderSeq::new();
        let a = seq.begin();
        let b = seq.begin();
        // B completes first, then A straggles in.
        assert!(seq.finish(&b));
        assert!(!seq.finish(&a));
    }

    #[test]
    fn in_flight_tracks_outstanding_pass() {
        let mut seq = RenderSeq::new();
        assert!(!seq.in_flight());
        let pass = seq.begin();
        assert!(seq.in_flight());
        seq.finish(&pass);
        assert!(!seq.in_flight());
    }

    #[test]
    fn finish_is_single_shot() {
        let mut seq = RenderSeq::new();
        let pass = seq.begin();
        assert!(seq.finish(&pass));
        assert!(!seq.finish(&pass));
    }
}
