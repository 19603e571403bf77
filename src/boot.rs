//! Page bootstrap.
//!
//! Mounts whichever components the current page carries hooks for and
//! parks them in thread-local slots so their event listeners stay
//! alive for the page's lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;

use crate::page_nav::PageNav;
use crate::viewer::PdfViewer;

thread_local! {
    static PAGE_NAV: RefCell<Option<Rc<PageNav>>> = const { RefCell::new(None) };
    static PDF_VIEWER: RefCell<Option<Rc<PdfViewer>>> = const { RefCell::new(None) };
    static READY_LISTENER: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

pub(crate) fn start() {
    let Some(document) = crate::dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", move |_| {
            READY_LISTENER.with(|slot| slot.borrow_mut().take());
            init();
        });
        READY_LISTENER.with(|slot| *slot.borrow_mut() = Some(listener));
    } else {
        init();
    }
}

fn init() {
    let Some(document) = crate::dom::document() else {
        return;
    };
    if let Some(nav) = PageNav::mount(&document) {
        console::log!("page nav mounted");
        PAGE_NAV.with(|slot| *slot.borrow_mut() = Some(nav));
    }
    if let Some(viewer) = PdfViewer::mount(&document) {
        console::log!("pdf viewer mounted");
        PDF_VIEWER.with(|slot| *slot.borrow_mut() = Some(viewer));
    }
}
