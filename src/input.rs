use web_sys::{DomRect, HtmlCanvasElement};

pub(crate) const CLICK_MAX_DURATION_MS: f32 = 240.0;
pub(crate) const CLICK_QUICK_TAP_MS: f32 = 120.0;
pub(crate) const CLICK_DEFAULT_SLOP_PX: f32 = 4.0;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ClientRect {
    pub(crate) left: f32,
    pub(crate) top: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> ClientRect;
}

impl HasClientRect for HtmlCanvasElement {
    fn client_rect(&self) -> ClientRect {
        let rect: DomRect = self.get_bounding_client_rect();
        ClientRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }
}

// Maps a client-space point to a grid cell. The canvas may be scaled by
// CSS, so client offsets are rescaled to the canvas logical size before
// the integer division by the cell size.
pub(crate) fn client_to_cell(
    client_x: f32,
    client_y: f32,
    element: &impl HasClientRect,
    cell_size: f32,
    cols: usize,
    rows: usize,
) -> Option<(usize, usize)> {
    let rect = element.client_rect();
    if rect.width <= 0.0 || rect.height <= 0.0 || cell_size <= 0.0 {
        return None;
    }
    let logical_width = cols as f32 * cell_size;
    let logical_height = rows as f32 * cell_size;
    let local_x = (client_x - rect.left) * logical_width / rect.width;
    let local_y = (client_y - rect.top) * logical_height / rect.height;
    if local_x < 0.0 || local_y < 0.0 {
        return None;
    }
    let x = (local_x / cell_size) as usize;
    let y = (local_y / cell_size) as usize;
    if x >= cols || y >= rows {
        return None;
    }
    Some((x, y))
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ClickGesture {
    start: [f32; 2],
    start_ms: f32,
    max_slop: f32,
    moved: bool,
    active: bool,
}

impl ClickGesture {
    pub(crate) fn new_default() -> Self {
        Self::new_with_slop(CLICK_DEFAULT_SLOP_PX)
    }

    pub(crate) fn new_with_slop(max_slop: f32) -> Self {
        Self {
            start: [0.0, 0.0],
            start_ms: 0.0,
            max_slop,
            moved: false,
            active: false,
        }
    }

    pub(crate) fn arm(&mut self, x: f32, y: f32, now_ms: f32) {
        self.start = [x, y];
        self.start_ms = now_ms;
        self.moved = false;
        self.active = true;
    }

    pub(crate) fn update(&mut self, x: f32, y: f32) {
        if !self.active || self.moved {
            return;
        }
        let dx = x - self.start[0];
        let dy = y - self.start[1];
        if dx * dx + dy * dy > self.max_slop * self.max_slop {
            self.moved = true;
        }
    }

    pub(crate) fn is_click(&self, now_ms: f32) -> bool {
        if !self.active {
            return false;
        }
        let elapsed = (now_ms - self.start_ms).max(0.0);
        if CLICK_QUICK_TAP_MS > 0.0 && elapsed <= CLICK_QUICK_TAP_MS {
            return true;
        }
        if self.moved {
            return false;
        }
        elapsed <= CLICK_MAX_DURATION_MS
    }

    pub(crate) fn clear(&mut self) {
        self.active = false;
        self.moved = false;
    }
}
