use std::path::Path;

use anyhow::Context as _;

use crate::{
    core::Canvas,
    error::{BounceError, BounceResult},
    sprite::Sprite,
};

pub type PremulRgba8 = [u8; 4];

/// One rendered output frame, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Allocate a frame filled with `clear_rgba` (straight alpha, premultiplied on
/// fill).
pub fn blank_frame(canvas: Canvas, clear_rgba: [u8; 4]) -> FrameRgba {
    let a = u16::from(clear_rgba[3]);
    let clear: PremulRgba8 = [
        mul_div255(u16::from(clear_rgba[0]), a),
        mul_div255(u16::from(clear_rgba[1]), a),
        mul_div255(u16::from(clear_rgba[2]), a),
        clear_rgba[3],
    ];
    let px_count = (canvas.width as usize) * (canvas.height as usize);
    let mut data = vec![0u8; px_count * 4];
    if clear != [0, 0, 0, 0] {
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&clear);
        }
    }
    FrameRgba {
        width: canvas.width,
        height: canvas.height,
        data,
    }
}

/// Composite the sprite onto the frame at `(x, y)` with the premultiplied
/// `over` operator.
///
/// The simulator guarantees in-bounds placements, so an out-of-bounds blit is
/// a bug upstream and is reported as an error rather than clipped silently.
pub fn blit_over(frame: &mut FrameRgba, sprite: &Sprite, x: i64, y: i64) -> BounceResult<()> {
    let sw = i64::from(sprite.width());
    let sh = i64::from(sprite.height());
    if x < 0 || y < 0 || x + sw > i64::from(frame.width) || y + sh > i64::from(frame.height) {
        return Err(BounceError::config(format!(
            "sprite placement ({x},{y}) {sw}x{sh} exceeds frame {}x{}",
            frame.width, frame.height
        )));
    }

    let fw = frame.width as usize;
    let src = sprite.data();
    for row in 0..sh as usize {
        let src_start = row * sw as usize * 4;
        let dst_start = ((y as usize + row) * fw + x as usize) * 4;
        let src_row = &src[src_start..src_start + sw as usize * 4];
        let dst_row = &mut frame.data[dst_start..dst_start + sw as usize * 4];
        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Persist a frame as a PNG.
pub fn save_png(frame: &FrameRgba, path: &Path) -> BounceResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
