use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    HtmlInputElement,
};

use crate::app_core::{GameSnapshot, CELL_SIZE};

pub(crate) const BOARD_CANVAS_ID: &str = "gameCanvas";
const SCORE_ID: &str = "score";
const GAME_OVER_ID: &str = "gameOver";
const SCORE_FORM_ID: &str = "scoreForm";
const SCORE_INPUT_ID: &str = "scoreInput";

pub(crate) struct BoardView {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    images: Vec<HtmlImageElement>,
    score_el: HtmlElement,
    game_over_el: HtmlElement,
    score_form_el: Option<HtmlElement>,
    score_input_el: Option<HtmlInputElement>,
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("unexpected element type for #{id}")))
}

impl BoardView {
    pub(crate) fn new(
        document: &Document,
        images: Vec<HtmlImageElement>,
        cols: usize,
        rows: usize,
    ) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = element(document, BOARD_CANVAS_ID)?;
        canvas.set_width((cols as f32 * CELL_SIZE) as u32);
        canvas.set_height((rows as f32 * CELL_SIZE) as u32);
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let score_el: HtmlElement = element(document, SCORE_ID)?;
        let game_over_el: HtmlElement = element(document, GAME_OVER_ID)?;
        // The submission form is optional page furniture; the board works
        // without it.
        let score_form_el: Option<HtmlElement> = element(document, SCORE_FORM_ID).ok();
        let score_input_el: Option<HtmlInputElement> = element(document, SCORE_INPUT_ID).ok();
        Ok(Self {
            canvas,
            context,
            images,
            score_el,
            game_over_el,
            score_form_el,
            score_input_el,
        })
    }

    pub(crate) fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub(crate) fn render(&self, snapshot: &GameSnapshot) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        for y in 0..snapshot.rows {
            for x in 0..snapshot.cols {
                let Some(kind) = snapshot.cells[y * snapshot.cols + x] else {
                    continue;
                };
                let Some(image) = self.images.get(kind as usize) else {
                    continue;
                };
                let _ = self.context.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    x as f64 * CELL_SIZE as f64,
                    y as f64 * CELL_SIZE as f64,
                    CELL_SIZE as f64,
                    CELL_SIZE as f64,
                );
            }
        }
        self.score_el
            .set_text_content(Some(&snapshot.score.to_string()));
        if snapshot.game_over {
            self.show_game_over(snapshot.score);
        } else {
            self.hide_game_over();
        }
    }

    fn show_game_over(&self, score: u32) {
        let message = format!("🎉 ゲーム終了！あなたのスコアは {score} 点です 🎉");
        self.game_over_el.set_text_content(Some(&message));
        let _ = self.game_over_el.style().set_property("display", "block");
        if let Some(form) = self.score_form_el.as_ref() {
            let _ = form.style().set_property("display", "block");
        }
        if let Some(input) = self.score_input_el.as_ref() {
            input.set_value(&score.to_string());
        }
    }

    fn hide_game_over(&self) {
        let _ = self.game_over_el.style().set_property("display", "none");
        if let Some(form) = self.score_form_el.as_ref() {
            let _ = form.style().set_property("display", "none");
        }
    }
}
