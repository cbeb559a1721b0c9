//! Single-point color sampling with aspect-fit viewport mapping.

use super::SampledColor;
use crate::bitmap::Bitmap;

/// The on-screen viewport an image is letterboxed into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Sample the single pixel under a normalized viewport coordinate.
///
/// `(u, v)` is in [0, 1] over the viewport, not the image: the image is
/// aspect-fit and centered inside the viewport, so a point landing in a
/// letterbox margin returns `None`. No quantization or filtering; the
/// sample carries `percentage = 0` because a single pixel has no area
/// weight.
pub fn sample_point(bitmap: &Bitmap, viewport: Viewport, u: f64, v: f64) -> Option<SampledColor> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return None;
    }
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }

    let img_w = f64::from(bitmap.width());
    let img_h = f64::from(bitmap.height());

    let scale = (viewport.width / img_w).min(viewport.height / img_h);
    let display_w = img_w * scale;
    let display_h = img_h * scale;
    let offset_x = (viewport.width - display_w) / 2.0;
    let offset_y = (viewport.height - display_h) / 2.0;

    let px = u * viewport.width;
    let py = v * viewport.height;

    if px < offset_x || px >= offset_x + display_w || py < offset_y || py >= offset_y + display_h {
        return None;
    }

    let x = (((px - offset_x) / scale) as u32).min(bitmap.width() - 1);
    let y = (((py - offset_y) / scale) as u32).min(bitmap.height() - 1);

    let [r, g, b, _] = bitmap.pixel(x, y);
    Some(SampledColor::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        0.0,
    ))
}
