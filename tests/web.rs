// Browser tests for the web-sys backed document. Run with
// `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use portfolio_motion::dom::{Dom, Role};
use portfolio_motion::web::dom::WebDom;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_dom() -> WebDom {
    let doc = web_sys::window().unwrap().document().unwrap();
    doc.body().unwrap().set_inner_html(
        r##"<nav id="navbar">
             <button id="langToggle"><span class="lang-text">EN</span></button>
             <a class="nav-link" href="#about" data-en="About" data-th="เกี่ยวกับ">เกี่ยวกับ</a>
           </nav>
           <div class="progress-fill" style="width: 75%"></div>"##,
    );
    WebDom::new(doc)
}

#[wasm_bindgen_test]
fn web_dom_queries_roles() {
    let dom = fresh_dom();
    assert_eq!(dom.query_all(Role::Translatable).len(), 1);
    assert_eq!(dom.query_all(Role::AnchorLink).len(), 1);
    let toggle = dom.query(Role::LanguageToggle).unwrap();
    assert_eq!(dom.query_within(&toggle, Role::LanguageLabel).len(), 1);
}

#[wasm_bindgen_test]
fn web_dom_translates_and_styles() {
    let mut dom = fresh_dom();
    portfolio_motion::prefs::translate(&mut dom, portfolio_motion::Language::En);
    let link = dom.query(Role::NavLink).unwrap();
    assert_eq!(dom.text(&link), "About");

    let bar = dom.query(Role::ProgressFill).unwrap();
    assert_eq!(dom.style(&bar, "width"), "75%");
    dom.set_style(&bar, "width", "0%");
    assert_eq!(dom.style(&bar, "width"), "0%");
    assert!(dom.toggle_class(&bar, "active"));
    assert!(dom.has_class(&bar, "active"));
}

#[wasm_bindgen_test]
fn start_after_load_marks_body_and_runs_once() {
    let doc = fresh_dom().document().clone();
    assert_eq!(doc.ready_state(), "complete");

    portfolio_motion::web::start(portfolio_motion::PageConfig::default()).unwrap();
    portfolio_motion::web::start(portfolio_motion::PageConfig::default()).unwrap();

    let body = doc.body().unwrap();
    assert!(body.class_list().contains("loaded"));
    let markers = doc.query_selector_all(".cursor-trail").unwrap();
    assert_eq!(markers.length(), 1);
    portfolio_motion::web::stop_animations();
}
