use crate::foundation::error::{StayframeError, StayframeResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite an equally sized premultiplied buffer over `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> StayframeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StayframeError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite one flat premultiplied color over every pixel of `dst`.
pub fn fill_over_in_place(dst: &mut [u8], color: PremulRgba8) {
    if color[3] == 0 {
        return;
    }
    for d in dst.chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], color);
        d.copy_from_slice(&out);
    }
}

/// A `width` x `height` premultiplied buffer positioned on a larger canvas.
#[derive(Clone, Copy, Debug)]
pub struct Placed<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub x: i64,
    pub y: i64,
}

/// Composite `src` over `dst` at an integer offset, clipping to `dst`.
pub fn over_at(dst: &mut [u8], dst_w: u32, dst_h: u32, src: Placed<'_>) -> StayframeResult<()> {
    if dst.len() != (dst_w as usize) * (dst_h as usize) * 4
        || src.data.len() != (src.width as usize) * (src.height as usize) * 4
    {
        return Err(StayframeError::render("over_at buffer size mismatch"));
    }
    let x0 = src.x.max(0);
    let y0 = src.y.max(0);
    let x1 = (src.x + i64::from(src.width)).min(i64::from(dst_w));
    let y1 = (src.y + i64::from(src.height)).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }
    for y in y0..y1 {
        let sy = (y - src.y) as usize;
        for x in x0..x1 {
            let sx = (x - src.x) as usize;
            let si = (sy * src.width as usize + sx) * 4;
            let di = (y as usize * dst_w as usize + x as usize) * 4;
            let s = &src.data[si..si + 4];
            if s[3] == 0 {
                continue;
            }
            let d = &mut dst[di..di + 4];
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
