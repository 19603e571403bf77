//! Per-gesture interaction state. Each value is created when a gesture
//! starts and dropped when it ends; nothing here outlives the fingers.

/// Mouse-drag pan: scroll offsets captured at press time, target offsets
/// derived from the pointer's total travel since then.
#[derive(Clone, Copy, Debug)]
pub struct DragAnchor {
    start_x: f64,
    start_y: f64,
    scroll_left: f64,
    scroll_top: f64,
}

impl DragAnchor {
    pub fn begin(start_x: f64, start_y: f64, scroll_left: f64, scroll_top: f64) -> Self {
        Self {
            start_x,
            start_y,
            scroll_left,
            scroll_top,
        }
    }

    pub fn scroll_for(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.scroll_left - (x - self.start_x),
            self.scroll_top - (y - self.start_y),
        )
    }
}

/// Single-finger pan: incremental deltas per move tick, anchor updated
/// every tick.
#[derive(Clone, Copy, Debug)]
pub struct TouchPan {
    last_x: f64,
    last_y: f64,
}

impl TouchPan {
    pub fn begin(x: f64, y: f64) -> Self {
        Self { last_x: x, last_y: y }
    }

    /// Returns the scroll delta to apply for this tick.
    pub fn advance(&mut self, x: f64, y: f64) -> (f64, f64) {
        let delta = (self.last_x - x, self.last_y - y);
        self.last_x = x;
        self.last_y = y;
        delta
    }
}

/// Two-finger pinch: the zoom recorded at gesture start scaled by the
/// ratio of the current inter-touch distance to the starting one.
#[derive(Clone, Copy, Debug)]
pub struct Pinch {
    start_distance: f64,
    start_zoom: f64,
}

impl Pinch {
    pub fn begin(start_distance: f64, start_zoom: f64) -> Self {
        Self {
            start_distance,
            start_zoom,
        }
    }

    /// Unclamped zoom for the current inter-touch distance; the caller
    /// clamps when applying. A degenerate start distance keeps the
    /// starting zoom.
    pub fn zoom_for(&self, distance: f64) -> f64 {
        if self.start_distance <= 0.0 {
            return self.start_zoom;
        }
        self.start_zoom * (distance / self.start_distance)
    }
}

pub fn touch_distance(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_anchor_tracks_total_travel() {
        let anchor = DragAnchor::begin(100.0, 50.0, 30.0, 20.0);
        assert_eq!(anchor.scroll_for(110.0, 45.0), (20.0, 25.0));
        // Same anchor, later pointer position: offsets are absolute.
        assert_eq!(anchor.scroll_for(100.0, 50.0), (30.0, 20.0));
    }

    #[test]
    fn touch_pan_emits_incremental_deltas() {
        let mut pan = TouchPan::begin(10.0, 10.0);
        assert_eq!(pan.advance(14.0, 7.0), (-4.0, 3.0));
        assert_eq!(pan.advance(14.0, 7.0), (0.0, 0.0));
    }

    #[test]
    fn pinch_scales_start_zoom_by_distance_ratio() {
        let pinch = Pinch::begin(100.0, 1.0);
        assert!((pinch.zoom_for(150.0) - 1.5).abs() < 1e-9);
        assert!((pinch.zoom_for(50.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn pinch_with_degenerate_start_is_inert() {
        let pinch = Pinch::begin(0.0, 0.8);
        assert_eq!(pinch.zoom_for(200.0), 0.8);
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((touch_distance(3.0, 4.0) - 5.0).abs() < 1e-9);
    }
}
