//! View-state logic for the portfolio frontend, kept free of browser
//! types so it can be exercised with native `cargo test`.

pub mod error;
pub mod gesture;
pub mod lifecycle;
pub mod pager;
pub mod toggle;
pub mod zoom;

pub use error::ViewerError;
pub use gesture::{touch_distance, DragAnchor, Pinch, TouchPan};
pub use lifecycle::{RenderPass, RenderSeq, ViewerPhase};
pub use pager::Pager;
pub use toggle::{fragment_for, fragment_shows_projects, ToggleState, PROJECTS_FRAGMENT};
pub use zoom::{clamp_zoom, RENDER_SCALE, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
