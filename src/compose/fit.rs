use crate::foundation::core::Rect;

/// Destination rectangle that makes an `img_w` x `img_h` image cover a
/// `canvas_w` x `canvas_h` canvas, preserving aspect ratio and centering the overflow.
pub fn cover_fit(img_w: f64, img_h: f64, canvas_w: f64, canvas_h: f64) -> Rect {
    if img_w <= 0.0 || img_h <= 0.0 || canvas_w <= 0.0 || canvas_h <= 0.0 {
        return Rect::ZERO;
    }
    let img_ratio = img_w / img_h;
    let canvas_ratio = canvas_w / canvas_h;
    if img_ratio > canvas_ratio {
        let draw_w = canvas_h * img_ratio;
        let x = (canvas_w - draw_w) / 2.0;
        Rect::new(x, 0.0, x + draw_w, canvas_h)
    } else {
        let draw_h = canvas_w / img_ratio;
        let y = (canvas_h - draw_h) / 2.0;
        Rect::new(0.0, y, canvas_w, y + draw_h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fit.rs"]
mod tests;
