use crate::foundation::error::{StayframeError, StayframeResult};

/// Kernel radius and sigma for a canvas-style `shadowBlur` of `blur_px`.
///
/// Canvas defines the shadow as a Gaussian with sigma of half the blur value;
/// three sigmas cover all visible falloff.
pub fn shadow_blur_params(blur_px: f32) -> (u32, f32) {
    if !blur_px.is_finite() || blur_px <= 0.0 {
        return (0, 0.0);
    }
    let sigma = blur_px / 2.0;
    ((sigma * 3.0).ceil() as u32, sigma)
}

/// Gaussian blur of a premultiplied RGBA8 buffer. Samples past the edges repeat the edge pixel.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> StayframeResult<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(|| StayframeError::render("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(StayframeError::render(format!(
            "blur input is {} bytes, expected {len} for {width}x{height}",
            src.len()
        )));
    }
    if radius == 0 || len == 0 {
        return Ok(src.to_vec());
    }
    let weights = kernel(radius, sigma)?;

    let (w, h) = (width as usize, height as usize);
    let mut rows = vec![0.0f32; len];
    for y in 0..h {
        convolve(src, &mut rows, y * w * 4, 4, w, &weights);
    }
    let mut cols = vec![0.0f32; len];
    for x in 0..w {
        convolve(&rows, &mut cols, x * 4, w * 4, h, &weights);
    }
    Ok(cols
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect())
}

/// Normalized taps for offsets `-radius..=radius`.
fn kernel(radius: u32, sigma: f32) -> StayframeResult<Vec<f32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StayframeError::validation("blur sigma must be > 0"));
    }
    let two_sigma_sq = 2.0 * sigma * sigma;
    let r = radius as i32;
    let raw: Vec<f32> = (-r..=r)
        .map(|i| (-((i * i) as f32) / two_sigma_sq).exp())
        .collect();
    let total: f32 = raw.iter().sum();
    Ok(raw.into_iter().map(|t| t / total).collect())
}

/// 1-D convolution of `count` pixels starting at byte `start`, `stride` bytes apart.
fn convolve<S: Copy + Into<f32>>(
    src: &[S],
    dst: &mut [f32],
    start: usize,
    stride: usize,
    count: usize,
    weights: &[f32],
) {
    let radius = weights.len() / 2;
    let last = count - 1;
    for i in 0..count {
        let mut acc = [0.0f32; 4];
        for (k, wt) in weights.iter().enumerate() {
            let j = (i + k).saturating_sub(radius).min(last);
            let at = start + j * stride;
            for (c, a) in acc.iter_mut().enumerate() {
                *a += wt * src[at + c].into();
            }
        }
        let at = start + i * stride;
        dst[at..at + 4].copy_from_slice(&acc);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
