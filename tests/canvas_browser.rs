#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = window().expect("window").document().expect("document");
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .expect("create canvas")
        .dyn_into()
        .expect("canvas element");
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
}

#[wasm_bindgen_test]
fn canvas_2d_stroke_and_export_work() {
    let canvas = fresh_canvas(64, 64);
    let context = canvas
        .get_context("2d")
        .expect("context request")
        .expect("2d support")
        .dyn_into::<CanvasRenderingContext2d>()
        .expect("2d context");
    context.set_line_width(2.0);
    context.set_line_cap("round");
    context.set_stroke_style_str("black");
    context.begin_path();
    context.move_to(4.0, 4.0);
    context.line_to(48.0, 48.0);
    context.stroke();
    let url = canvas.to_data_url().expect("data url export");
    assert!(url.starts_with("data:image/png"));
}

#[wasm_bindgen_test]
fn canvas_export_is_stable_for_a_blank_surface() {
    let first = fresh_canvas(32, 32).to_data_url().expect("data url");
    let second = fresh_canvas(32, 32).to_data_url().expect("data url");
    assert_eq!(first, second);
}
