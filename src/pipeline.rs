//! The frame driver: owns the render loop around the simulator.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    composite::{blank_frame, blit_over, save_png},
    core::FrameIndex,
    error::BounceResult,
    model::BounceConfig,
    sim,
    sprite::Sprite,
    stitch::{StitchConfig, stitch_frames},
};

/// Options for [`render_frames`].
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Background color (straight alpha) each frame is cleared to.
    pub clear_rgba: [u8; 4],
    /// Also write `left.png` / `right.png` stills of the centered sprite in
    /// both orientations before the sequence.
    pub center_stills: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            clear_rgba: [0, 0, 0, 0],
            center_stills: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    /// Number of horizontal mirror events over the run.
    pub flips: u64,
}

/// Render the full PNG frame sequence into `out_dir`.
///
/// Per frame: advance the simulator, mirror the sprite when the step signals a
/// flip, composite onto a fresh blank canvas, and persist
/// `<zero-padded index>.png`. Positions are computed serially since each step
/// depends on the previous one.
pub fn render_frames(
    cfg: &BounceConfig,
    sprite: &mut Sprite,
    out_dir: &Path,
    opts: &RenderOpts,
) -> BounceResult<RenderStats> {
    cfg.validate_sprite(sprite.width(), sprite.height())?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory '{}'", out_dir.display()))?;

    let frames = cfg.frame_count();
    let digits = frame_digits(frames);
    let mut bbox = cfg.centered_box(sprite.width(), sprite.height());
    let mut direction = cfg.direction;

    if opts.center_stills {
        write_center_stills(cfg, sprite, out_dir, opts, bbox.x(), bbox.y())?;
    }

    tracing::info!(
        frames,
        canvas_w = cfg.canvas.width,
        canvas_h = cfg.canvas.height,
        velocity = cfg.velocity,
        "rendering frame sequence to '{}'",
        out_dir.display()
    );

    let mut stats = RenderStats {
        frames_total: frames,
        flips: 0,
    };
    for index in 0..frames {
        let out = sim::step(bbox, direction, cfg.canvas, cfg.velocity);
        bbox = out.bbox;
        direction = out.direction;

        if out.flipped {
            sprite.flip_horizontal();
            stats.flips += 1;
        }

        let mut frame = blank_frame(cfg.canvas, opts.clear_rgba);
        blit_over(&mut frame, sprite, bbox.x(), bbox.y())?;
        save_png(&frame, &out_dir.join(frame_filename(FrameIndex(index), digits)))?;

        if index.is_multiple_of(u64::from(cfg.fps) * 5) {
            tracing::debug!(frame = index, total = frames, "progress");
        }
    }

    Ok(stats)
}

/// Render the sequence and stitch it into an MP4 with the system `ffmpeg`.
pub fn render_to_mp4(
    cfg: &BounceConfig,
    sprite: &mut Sprite,
    out_dir: &Path,
    out_path: impl Into<PathBuf>,
    overwrite: bool,
    opts: &RenderOpts,
) -> BounceResult<RenderStats> {
    let stats = render_frames(cfg, sprite, out_dir, opts)?;
    stitch_frames(&StitchConfig {
        fps: cfg.fps,
        pattern: frame_pattern(out_dir, frame_digits(cfg.frame_count())),
        out_path: out_path.into(),
        overwrite,
    })?;
    Ok(stats)
}

/// Width of the zero-padded frame filenames for an `n`-frame run.
pub fn frame_digits(n: u64) -> usize {
    n.to_string().len()
}

/// `0007.png` style filename for one frame.
pub fn frame_filename(frame: FrameIndex, digits: usize) -> String {
    format!("{:0width$}.png", frame.0, width = digits)
}

/// printf-style input pattern for the stitcher, e.g. `out/%04d.png`.
pub fn frame_pattern(out_dir: &Path, digits: usize) -> PathBuf {
    out_dir.join(format!("%0{digits}d.png"))
}

fn write_center_stills(
    cfg: &BounceConfig,
    sprite: &mut Sprite,
    out_dir: &Path,
    opts: &RenderOpts,
    x: i64,
    y: i64,
) -> BounceResult<()> {
    let mut left = blank_frame(cfg.canvas, opts.clear_rgba);
    blit_over(&mut left, sprite, x, y)?;
    save_png(&left, &out_dir.join("left.png"))?;

    sprite.flip_horizontal();
    let mut right = blank_frame(cfg.canvas, opts.clear_rgba);
    blit_over(&mut right, sprite, x, y)?;
    save_png(&right, &out_dir.join("right.png"))?;
    sprite.flip_horizontal();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_digits_matches_decimal_width() {
        assert_eq!(frame_digits(1), 1);
        assert_eq!(frame_digits(9), 1);
        assert_eq!(frame_digits(10), 2);
        assert_eq!(frame_digits(1200), 4);
    }

    #[test]
    fn frame_filename_is_zero_padded() {
        assert_eq!(frame_filename(FrameIndex(7), 4), "0007.png");
        assert_eq!(frame_filename(FrameIndex(1199), 4), "1199.png");
    }

    #[test]
    fn frame_pattern_uses_printf_placeholder() {
        let p = frame_pattern(Path::new("out"), 4);
        assert_eq!(p, Path::new("out").join("%04d.png"));
    }
}
