mod boot;
mod dom;
mod page_nav;
mod pdfjs;
mod viewer;

fn main() {
    boot::start();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    use crate::page_nav::PageNav;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn install_nav_dom(document: &web_sys::Document) {
        let body = document.body().unwrap();
        body.set_inner_html(
            "<button id=\"more-btn\">More</button>\
             <button id=\"back-arrow\">Back</button>",
        );
        let _ = body.class_list().remove_1("landing-dismissed");
    }

    #[wasm_bindgen_test]
    fn show_projects_marks_body() {
        let document = document();
        install_nav_dom(&document);

        let nav = PageNav::mount(&document).expect("nav should mount");
        nav.show_projects(false);

        assert!(document
            .body()
            .unwrap()
            .class_list()
            .contains("landing-dismissed"));

        nav.show_landing(false);
        assert!(!document
            .body()
            .unwrap()
            .class_list()
            .contains("landing-dismissed"));
    }

    #[wasm_bindgen_test]
    fn viewer_skips_mount_without_hook() {
        let document = document();
        document.body().unwrap().set_inner_html("");
        assert!(crate::viewer::PdfViewer::mount(&document).is_none());
    }
}
