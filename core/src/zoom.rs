//! Display-zoom state.
//!
//! Pages are rasterized once at [`RENDER_SCALE`] and every zoom change
//! afterwards is a CSS transform on the existing raster, so these values
//! never trigger a re-render.

/// Rasterization scale, decoupled from display zoom.
pub const RENDER_SCALE: f64 = 3.0;

pub const ZOOM_MIN: f64 = 0.25;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Single source of truth for the zoom applied before any user input;
/// the slider is seeded from this when the viewer DOM is built.
pub const ZOOM_DEFAULT: f64 = 0.25;

pub fn clamp_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return ZOOM_DEFAULT;
    }
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

pub fn step_in(zoom: f64) -> f64 {
    clamp_zoom(zoom + ZOOM_STEP)
}

pub fn step_out(zoom: f64) -> f64 {
    clamp_zoom(zoom - ZOOM_STEP)
}

/// Modifier-held wheel: scrolling away from the user zooms out.
pub fn from_wheel(zoom: f64, delta_y: f64) -> f64 {
    if delta_y > 0.0 {
        step_out(zoom)
    } else {
        step_in(zoom)
    }
}

pub fn percent_label(zoom: f64) -> String {
    format!("{}%", (zoom * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_holds_bounds() {
        assert_eq!(clamp_zoom(0.1), ZOOM_MIN);
        assert_eq!(clamp_zoom(9.0), ZOOM_MAX);
        assert_eq!(clamp_zoom(1.3), 1.3);
    }

    #[test]
    fn clamp_rejects_non_finite() {
        assert_eq!(clamp_zoom(f64::NAN), ZOOM_DEFAULT);
        assert_eq!(clamp_zoom(f64::INFINITY), ZOOM_DEFAULT);
    }

    #[test]
    fn steps_saturate_at_bounds() {
        assert_eq!(step_in(ZOOM_MAX), ZOOM_MAX);
        assert_eq!(step_out(ZOOM_MIN), ZOOM_MIN);
        let stepped = step_in(1.0);
        assert!((stepped - 1.1).abs() < 1e-9);
    }

    #[test]
    fn wheel_direction_maps_to_steps() {
        assert!(from_wheel(1.0, 120.0) < 1.0);
        assert!(from_wheel(1.0, -120.0) > 1.0);
    }

    #[test]
    fn percent_label_rounds() {
        assert_eq!(percent_label(0.25), "25%");
        assert_eq!(percent_label(1.0), "100%");
        assert_eq!(percent_label(0.666), "67%");
    }
}
