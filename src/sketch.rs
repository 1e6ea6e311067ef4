use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, MouseEvent, TouchEvent};

pub(crate) const DRAW_CANVAS_ID: &str = "drawCanvas";
const STROKE_WIDTH: f64 = 2.0;
const DEFAULT_COLOR: &str = "black";

// Freehand drawing pad for the submission form. Strokes go straight into
// the canvas; the export is whatever the canvas holds at submit time.
pub(crate) struct SketchPad {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    drawing: Rc<Cell<bool>>,
    _listeners: Vec<EventListener>,
    _change_color: Closure<dyn FnMut(JsValue)>,
    _clear_canvas: Closure<dyn FnMut()>,
}

fn stroke_to(context: &CanvasRenderingContext2d, color: &str, x: f64, y: f64) {
    context.set_line_width(STROKE_WIDTH);
    context.set_line_cap("round");
    context.set_stroke_style_str(color);
    context.line_to(x, y);
    context.stroke();
}

fn mouse_position(event: &MouseEvent, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    )
}

fn touch_position(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
    let touch = event.touches().get(0)?;
    let rect = canvas.get_bounding_client_rect();
    Some((
        touch.client_x() as f64 - rect.left(),
        touch.client_y() as f64 - rect.top(),
    ))
}

impl SketchPad {
    // The drawing pad is optional page furniture; a page without the
    // canvas simply has no pad.
    pub(crate) fn attach(document: &Document) -> Option<Rc<Self>> {
        let canvas = document
            .get_element_by_id(DRAW_CANVAS_ID)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let drawing = Rc::new(Cell::new(false));
        let color = Rc::new(RefCell::new(DEFAULT_COLOR.to_string()));
        let mut listeners = Vec::new();

        {
            let drawing = Rc::clone(&drawing);
            let context = context.clone();
            let canvas_for_events = canvas.clone();
            listeners.push(EventListener::new(&canvas, "mousedown", move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                drawing.set(true);
                let (x, y) = mouse_position(event, &canvas_for_events);
                context.begin_path();
                context.move_to(x, y);
            }));
        }
        {
            let drawing = Rc::clone(&drawing);
            let color = Rc::clone(&color);
            let context = context.clone();
            let canvas_for_events = canvas.clone();
            listeners.push(EventListener::new(&canvas, "mousemove", move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if !drawing.get() {
                    return;
                }
                let (x, y) = mouse_position(event, &canvas_for_events);
                stroke_to(&context, &color.borrow(), x, y);
            }));
        }
        {
            let drawing = Rc::clone(&drawing);
            listeners.push(EventListener::new(&canvas, "mouseup", move |_event: &Event| {
                drawing.set(false);
            }));
        }
        {
            let drawing = Rc::clone(&drawing);
            let context = context.clone();
            let canvas_for_events = canvas.clone();
            listeners.push(EventListener::new_with_options(
                &canvas,
                "touchstart",
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    let Some(event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    event.prevent_default();
                    let Some((x, y)) = touch_position(event, &canvas_for_events) else {
                        return;
                    };
                    drawing.set(true);
                    context.begin_path();
                    context.move_to(x, y);
                },
            ));
        }
        {
            let drawing = Rc::clone(&drawing);
            let color = Rc::clone(&color);
            let context = context.clone();
            let canvas_for_events = canvas.clone();
            listeners.push(EventListener::new_with_options(
                &canvas,
                "touchmove",
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    let Some(event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    event.prevent_default();
                    if !drawing.get() {
                        return;
                    }
                    let Some((x, y)) = touch_position(event, &canvas_for_events) else {
                        return;
                    };
                    stroke_to(&context, &color.borrow(), x, y);
                },
            ));
        }
        {
            let drawing = Rc::clone(&drawing);
            listeners.push(EventListener::new(&canvas, "touchend", move |_event: &Event| {
                drawing.set(false);
            }));
        }

        // The palette and clear buttons live in page markup and call these
        // window hooks, as the page always has.
        let change_color = {
            let color = Rc::clone(&color);
            Closure::wrap(Box::new(move |value: JsValue| {
                if let Some(next) = value.as_string() {
                    *color.borrow_mut() = next;
                }
            }) as Box<dyn FnMut(JsValue)>)
        };
        let clear_canvas = {
            let context = context.clone();
            let canvas_for_hook = canvas.clone();
            Closure::wrap(Box::new(move || {
                context.clear_rect(
                    0.0,
                    0.0,
                    canvas_for_hook.width() as f64,
                    canvas_for_hook.height() as f64,
                );
            }) as Box<dyn FnMut()>)
        };
        if let Some(window) = web_sys::window() {
            let _ = Reflect::set(
                &window,
                &JsValue::from_str("changeColor"),
                change_color.as_ref(),
            );
            let _ = Reflect::set(
                &window,
                &JsValue::from_str("clearCanvas"),
                clear_canvas.as_ref(),
            );
        }

        Some(Rc::new(Self {
            canvas,
            context,
            drawing,
            _listeners: listeners,
            _change_color: change_color,
            _clear_canvas: clear_canvas,
        }))
    }

    pub(crate) fn clear(&self) {
        self.drawing.set(false);
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    pub(crate) fn to_data_url(&self) -> Result<String, JsValue> {
        self.canvas.to_data_url()
    }
}
