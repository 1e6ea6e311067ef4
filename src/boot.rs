use std::cell::Cell;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

// Hooks into the hosting page's loader object so it can show startup
// progress and failures before the board takes over.
const BOOT_OBJECT_KEY: &str = "__SG_BOOT";

thread_local! {
    static READY_SENT: Cell<bool> = Cell::new(false);
}

fn boot_object() -> Option<js_sys::Object> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(BOOT_OBJECT_KEY)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    value.dyn_into::<js_sys::Object>().ok()
}

fn call(method: &str, args: &[JsValue]) {
    let Some(boot) = boot_object() else {
        return;
    };
    let Ok(value) = Reflect::get(&boot, &JsValue::from_str(method)) else {
        return;
    };
    let Ok(func) = value.dyn_into::<Function>() else {
        return;
    };
    let array = js_sys::Array::new();
    for arg in args {
        array.push(arg);
    }
    let _ = func.apply(&boot, &array);
}

pub(crate) fn set_phase(label: &str, detail: &str) {
    call(
        "setPhase",
        &[JsValue::from_str(label), JsValue::from_str(detail)],
    );
}

pub(crate) fn set_progress(value: f32) {
    call("setProgress", &[JsValue::from_f64(value as f64)]);
}

pub(crate) fn fail(code: &str, message: &str, hint: &str) {
    call(
        "fail",
        &[
            JsValue::from_str(code),
            JsValue::from_str(message),
            JsValue::from_str(hint),
        ],
    );
}

pub(crate) fn ready() {
    let already_sent = READY_SENT.with(|flag| {
        if flag.get() {
            true
        } else {
            flag.set(true);
            false
        }
    });
    if already_sent {
        return;
    }
    call("ready", &[]);
}
