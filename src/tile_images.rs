use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::boot;

pub(crate) const TILE_IMAGE_PREFIX: &str = "img";

// img0.png .. img{count-1}.png, one visual variant per tile kind. The
// board renders only after every variant has decoded.
pub(crate) async fn load_tile_images(count: usize) -> Result<Vec<HtmlImageElement>, String> {
    let mut images = Vec::with_capacity(count);
    for index in 0..count {
        let src = format!("{TILE_IMAGE_PREFIX}{index}.png");
        let image = HtmlImageElement::new().map_err(|_| "image element creation failed".to_string())?;
        image.set_src(&src);
        JsFuture::from(image.decode())
            .await
            .map_err(|_| format!("failed to load {src}"))?;
        gloo::console::log!("assets: loaded", src);
        boot::set_progress((index + 1) as f32 / count.max(1) as f32);
        images.push(image);
    }
    Ok(images)
}
