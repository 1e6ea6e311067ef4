mod app_core;
mod board_view;
mod boot;
mod input;
mod sketch;
mod submit;
mod tile_images;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
#[cfg(target_arch = "wasm32")]
use js_sys::Date;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, MouseEvent, TouchEvent};

#[cfg(target_arch = "wasm32")]
use crate::app_core::{GameCore, GameSubscription, BOARD_COLS, BOARD_ROWS, CELL_SIZE, TILE_KINDS};
#[cfg(target_arch = "wasm32")]
use crate::board_view::BoardView;
#[cfg(target_arch = "wasm32")]
use crate::input::{client_to_cell, ClickGesture};
#[cfg(target_arch = "wasm32")]
use crate::sketch::SketchPad;

#[cfg(target_arch = "wasm32")]
struct App {
    _view: Rc<BoardView>,
    _subscription: GameSubscription,
    _board_listeners: Vec<EventListener>,
    _sketch: Option<Rc<SketchPad>>,
    _submit_listener: Option<EventListener>,
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f32 {
    (Date::now() % 1_000_000.0) as f32
}

#[cfg(target_arch = "wasm32")]
fn attach_board_input(core: &Rc<GameCore>, view: &Rc<BoardView>) -> Vec<EventListener> {
    let canvas = view.canvas().clone();
    let gesture = Rc::new(RefCell::new(ClickGesture::new_default()));
    let mut listeners = Vec::new();
    {
        let gesture = Rc::clone(&gesture);
        listeners.push(EventListener::new(&canvas, "mousedown", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                gesture
                    .borrow_mut()
                    .arm(event.client_x() as f32, event.client_y() as f32, now_ms());
            }
        }));
    }
    {
        let gesture = Rc::clone(&gesture);
        listeners.push(EventListener::new(&canvas, "mousemove", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                gesture
                    .borrow_mut()
                    .update(event.client_x() as f32, event.client_y() as f32);
            }
        }));
    }
    {
        let gesture = Rc::clone(&gesture);
        let core = Rc::clone(core);
        let canvas_for_events = canvas.clone();
        listeners.push(EventListener::new(&canvas, "mouseup", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let is_click = gesture.borrow().is_click(now_ms());
            gesture.borrow_mut().clear();
            if !is_click {
                return;
            }
            activate_at(
                &core,
                &canvas_for_events,
                event.client_x() as f32,
                event.client_y() as f32,
            );
        }));
    }
    {
        let gesture = Rc::clone(&gesture);
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
                if let Some(touch) = event.touches().get(0) {
                    gesture.borrow_mut().arm(
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                        now_ms(),
                    );
                }
            },
        ));
    }
    {
        let gesture = Rc::clone(&gesture);
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
                if let Some(touch) = event.touches().get(0) {
                    gesture
                        .borrow_mut()
                        .update(touch.client_x() as f32, touch.client_y() as f32);
                }
            },
        ));
    }
    {
        let gesture = Rc::clone(&gesture);
        let core = Rc::clone(core);
        let canvas_for_events = canvas.clone();
        listeners.push(EventListener::new_with_options(
            &canvas,
            "touchend",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                event.prevent_default();
                let is_click = gesture.borrow().is_click(now_ms());
                gesture.borrow_mut().clear();
                if !is_click {
                    return;
                }
                if let Some(touch) = event.changed_touches().get(0) {
                    activate_at(
                        &core,
                        &canvas_for_events,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                }
            },
        ));
    }
    listeners
}

#[cfg(target_arch = "wasm32")]
fn activate_at(core: &Rc<GameCore>, canvas: &web_sys::HtmlCanvasElement, x: f32, y: f32) {
    let Some((cell_x, cell_y)) = client_to_cell(x, y, canvas, CELL_SIZE, BOARD_COLS, BOARD_ROWS)
    else {
        return;
    };
    if let Some(removal) = core.activate_cell(cell_x, cell_y) {
        gloo::console::log!(
            "board: cleared",
            removal.cleared.len() as u32,
            "tiles for",
            removal.score_delta,
        );
        if core.snapshot().game_over {
            gloo::console::log!("board: no moves left");
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn start() {
    boot::set_phase("assets", "loading tile images");
    let images = match tile_images::load_tile_images(TILE_KINDS as usize).await {
        Ok(images) => images,
        Err(message) => {
            boot::fail("assets", &message, "check the deployed tile images");
            return;
        }
    };

    boot::set_phase("board", "preparing the board");
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        boot::fail("board", "document unavailable", "reload the page");
        return;
    };
    let core = GameCore::shared();
    let view = match BoardView::new(&document, images, BOARD_COLS, BOARD_ROWS) {
        Ok(view) => Rc::new(view),
        Err(err) => {
            let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
            boot::fail("board", &detail, "the page is missing its board markup");
            return;
        }
    };

    let view_for_render = Rc::clone(&view);
    let core_for_render = Rc::clone(&core);
    let subscription = core.subscribe(Rc::new(move || {
        view_for_render.render(&core_for_render.snapshot());
    }));
    let board_listeners = attach_board_input(&core, &view);
    let sketch = SketchPad::attach(&document);
    if sketch.is_none() {
        gloo::console::log!("sketch: no drawing canvas on this page");
    }
    let submit_listener =
        submit::attach_submit_form(&document, Rc::clone(&core), sketch.clone());

    // Seeds and renders the first board; a dead deal shows its game-over
    // state right away.
    core.new_game();
    boot::ready();

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            _view: view,
            _subscription: subscription,
            _board_listeners: board_listeners,
            _sketch: sketch,
            _submit_listener: submit_listener,
        });
    });
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        boot::set_phase("boot", "starting");
        wasm_bindgen_futures::spawn_local(start());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("samegame runs in the browser; build for wasm32-unknown-unknown");
    }
}
