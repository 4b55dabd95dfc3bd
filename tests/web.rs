//! Browser-side checks of the wasm surface. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use cafe_engine::CafeApp;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn connect_brew_collect() {
    let mut app = CafeApp::new(None, 1).unwrap();
    assert!(app.start_brew(0.0).is_err());
    assert!(app.toggle_wallet());
    app.start_brew(0.0).unwrap();
    assert!(app.brew_timer_active());
    assert_eq!(app.refresh(1_800_000.0), 12.0);
    assert!(app.collect_brew(1_800_000.0).is_ok());
    assert_eq!(app.collect_brew(1_800_000.0).unwrap_err().as_string().as_deref(),
        Some("Nothing brewed yet — start your Brew first."));
}

#[wasm_bindgen_test]
fn bad_config_is_reported() {
    let err = CafeApp::new(Some("{ \"feed_capacity\": 0 }".into()), 1).err().unwrap();
    assert!(err.as_string().unwrap().contains("feed_capacity"));
}

#[wasm_bindgen_test]
fn nav_highlight_from_js_pairs() {
    let app = CafeApp::new(None, 1).unwrap();
    let sections = serde_wasm_bindgen::to_value(&vec![("hero", 0.0), ("bar", 800.0)]).unwrap();
    assert_eq!(app.active_section(700.0, sections), "bar");
    assert_eq!(app.active_section(0.0, JsValue::NULL), "hero");
}
