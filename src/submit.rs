use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) const SUBMIT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbwB3e3AVjkTqhx6geH4aI4AiXmrSznM_9sDGbMn3xevfUmHxeT3q8n4MQdcaSWJ3DgC/exec";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreSubmission {
    pub(crate) name: String,
    pub(crate) score: u32,
    pub(crate) image: String,
}

#[derive(Debug)]
pub(crate) enum SubmitError {
    Serialize(String),
    Network(String),
    Status(u16),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Serialize(detail) => {
                write!(f, "could not serialize submission: {detail}")
            }
            SubmitError::Network(detail) => write!(f, "request failed: {detail}"),
            SubmitError::Status(status) => write!(f, "endpoint answered with status {status}"),
        }
    }
}

impl std::error::Error for SubmitError {}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::rc::Rc;

    use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::{spawn_local, JsFuture};
    use web_sys::{Document, Event, HtmlInputElement, Request, RequestInit, RequestMode, Response};

    use super::{ScoreSubmission, SubmitError, SUBMIT_ENDPOINT};
    use crate::app_core::GameCore;
    use crate::sketch::SketchPad;

    const SUBMIT_FORM_ID: &str = "submitForm";
    const NAME_INPUT_ID: &str = "nameInput";

    fn js_detail(value: JsValue) -> String {
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"))
    }

    pub(crate) async fn submit_score(submission: &ScoreSubmission) -> Result<(), SubmitError> {
        let body = serde_json::to_string(submission)
            .map_err(|err| SubmitError::Serialize(err.to_string()))?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&JsValue::from_str(&body));
        let request = Request::new_with_str_and_init(SUBMIT_ENDPOINT, &init)
            .map_err(|err| SubmitError::Network(js_detail(err)))?;
        let window =
            web_sys::window().ok_or_else(|| SubmitError::Network("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| SubmitError::Network(js_detail(err)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|err| SubmitError::Network(js_detail(err)))?;
        if !response.ok() {
            return Err(SubmitError::Status(response.status()));
        }
        // Drain the body; the endpoint's reply text is not used.
        if let Ok(text) = response.text() {
            let _ = JsFuture::from(text).await;
        }
        Ok(())
    }

    // Wires the score form: on submit, collect name + final score + the
    // drawing and post them. The engine is never told about the outcome.
    pub(crate) fn attach_submit_form(
        document: &Document,
        core: Rc<GameCore>,
        pad: Option<Rc<SketchPad>>,
    ) -> Option<EventListener> {
        let form = document.get_element_by_id(SUBMIT_FORM_ID)?;
        let name_input = document
            .get_element_by_id(NAME_INPUT_ID)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok());
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };
        Some(EventListener::new_with_options(
            &form,
            "submit",
            options,
            move |event: &Event| {
                event.prevent_default();
                let name = name_input
                    .as_ref()
                    .map(|input| input.value())
                    .unwrap_or_default();
                let image = pad
                    .as_ref()
                    .and_then(|pad| pad.to_data_url().ok())
                    .unwrap_or_default();
                let submission = ScoreSubmission {
                    name,
                    score: core.snapshot().score,
                    image,
                };
                let pad = pad.clone();
                spawn_local(async move {
                    match submit_score(&submission).await {
                        Ok(()) => {
                            gloo::console::log!("submit: accepted");
                            if let Some(pad) = pad.as_ref() {
                                pad.clear();
                            }
                            if let Some(window) = web_sys::window() {
                                let _ = window.alert_with_message("登録完了！");
                                let _ = window.location().reload();
                            }
                        }
                        Err(err) => {
                            gloo::console::log!("submit: failed", err.to_string());
                            if let Some(window) = web_sys::window() {
                                let _ = window.alert_with_message("登録失敗...");
                            }
                        }
                    }
                });
            },
        ))
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use wasm::attach_submit_form;
