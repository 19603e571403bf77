//! Landing/projects view toggle.
//!
//! Binds the "more" trigger and the back arrow when they exist, keeps
//! the `landing-dismissed` marker class on `<body>` in sync with the
//! toggle state, and mirrors the state into the `#projects` URL
//! fragment with history replacement so deep links survive reloads
//! without polluting the back stack.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsValue;
use web_sys::{Document, Event};

use folio_core::{fragment_for, ToggleState};

pub(crate) const MORE_BTN_ID: &str = "more-btn";
pub(crate) const BACK_ARROW_ID: &str = "back-arrow";
pub(crate) const LANDING_DISMISSED_CLASS: &str = "landing-dismissed";

pub(crate) struct PageNav {
    state: RefCell<ToggleState>,
    listeners: RefCell<Vec<EventListener>>,
}

impl PageNav {
    /// Builds the toggle and seeds its state from the current URL
    /// fragment. A `#projects` deep link becomes visible immediately,
    /// without a redundant URL rewrite.
    pub(crate) fn mount(document: &Document) -> Option<Rc<Self>> {
        let hash = web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default();
        let state = ToggleState::from_fragment(&hash);
        let nav = Rc::new(Self {
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
        });
        if state.projects_visible() {
            nav.show_projects(true);
        }
        nav.attach(document);
        console::log!("page nav ready");
        Some(nav)
    }

    fn attach(self: &Rc<Self>, document: &Document) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(more_btn) = document.get_element_by_id(MORE_BTN_ID) {
            let nav = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                &more_btn,
                "click",
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    event.prevent_default();
                    nav.show_projects(false);
                },
            ));
        }
        if let Some(back_arrow) = document.get_element_by_id(BACK_ARROW_ID) {
            let nav = Rc::clone(self);
            listeners.push(EventListener::new(&back_arrow, "click", move |_: &Event| {
                nav.show_landing(false);
            }));
        }
    }

    pub(crate) fn show_projects(&self, skip_url_update: bool) {
        self.state.borrow_mut().show_projects();
        set_body_marker(true);
        if !skip_url_update {
            replace_fragment(fragment_for(true));
        }
    }

    pub(crate) fn show_landing(&self, skip_url_update: bool) {
        self.state.borrow_mut().show_landing();
        set_body_marker(false);
        if !skip_url_update {
            replace_fragment(fragment_for(false));
        }
    }

    pub(crate) fn projects_visible(&self) -> bool {
        self.state.borrow().projects_visible()
    }
}

fn set_body_marker(present: bool) {
    let Some(document) = crate::dom::document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let class_list = body.class_list();
    let _ = if present {
        class_list.add_1(LANDING_DISMISSED_CLASS)
    } else {
        class_list.remove_1(LANDING_DISMISSED_CLASS)
    };
}

/// Rewrites the current URL's fragment in place. Uses history
/// replacement so no navigation entry is added; if the history API is
/// unavailable the visual state still changed and the URL stays as-is.
fn replace_fragment(fragment: Option<&str>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    let new_url = fragment_url(&path, &search, fragment);
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&new_url));
    }
}

fn fragment_url(path: &str, search: &str, fragment: Option<&str>) -> String {
    match fragment {
        Some(fragment) => format!("{path}{search}#{fragment}"),
        None => format!("{path}{search}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_url_appends_hash() {
        assert_eq!(
            fragment_url("/work", "?tab=1", Some("projects")),
            "/work?tab=1#projects"
        );
    }

    #[test]
    fn fragment_url_clears_hash() {
        assert_eq!(fragment_url("/work", "", None), "/work");
        assert_eq!(fragment_url("/", "?a=b", None), "/?a=b");
    }
}
