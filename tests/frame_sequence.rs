use std::path::{Path, PathBuf};

use dvdbounce::{
    BounceConfig, BoundingBox, Canvas, Direction, RenderOpts, Sprite, render_frames, simulate,
};

fn tiny_config() -> BounceConfig {
    BounceConfig {
        canvas: Canvas {
            width: 64,
            height: 48,
        },
        fps: 10,
        duration_secs: 2,
        velocity: 5,
        direction: Direction::Southeast,
    }
}

fn tiny_sprite() -> Sprite {
    // 4x2 opaque sprite, asymmetric so a mirror is observable.
    #[rustfmt::skip]
    let px = vec![
        255, 0, 0, 255,  0, 255, 0, 255,  0, 0, 255, 255,  255, 255, 0, 255,
        255, 0, 0, 255,  255, 0, 0, 255,  255, 0, 0, 255,  0, 0, 0, 255,
    ];
    Sprite::from_straight_rgba8(4, 2, px).unwrap()
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn renders_the_full_file_set() {
    let cfg = tiny_config();
    let dir = fresh_dir("seq_file_set");
    let mut sprite = tiny_sprite();

    let stats = render_frames(&cfg, &mut sprite, &dir, &RenderOpts::default()).unwrap();
    assert_eq!(stats.frames_total, 20);

    for i in 0..20 {
        let path = dir.join(format!("{i:02}.png"));
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert!(dir.join("left.png").is_file());
    assert!(dir.join("right.png").is_file());
}

#[test]
fn no_stills_option_skips_the_stills() {
    let cfg = tiny_config();
    let dir = fresh_dir("seq_no_stills");
    let mut sprite = tiny_sprite();

    let opts = RenderOpts {
        center_stills: false,
        ..RenderOpts::default()
    };
    render_frames(&cfg, &mut sprite, &dir, &opts).unwrap();

    assert!(!dir.join("left.png").exists());
    assert!(!dir.join("right.png").exists());
    assert!(dir.join("00.png").is_file());
}

#[test]
fn two_runs_are_byte_identical() {
    let cfg = tiny_config();
    let dir_a = fresh_dir("seq_determinism_a");
    let dir_b = fresh_dir("seq_determinism_b");

    render_frames(&cfg, &mut tiny_sprite(), &dir_a, &RenderOpts::default()).unwrap();
    render_frames(&cfg, &mut tiny_sprite(), &dir_b, &RenderOpts::default()).unwrap();

    for i in 0..cfg.frame_count() {
        let name = format!("{i:02}.png");
        let a = std::fs::read(dir_a.join(&name)).unwrap();
        let b = std::fs::read(dir_b.join(&name)).unwrap();
        assert_eq!(a, b, "frame {name} differs between runs");
    }
}

#[test]
fn rendered_frames_track_the_simulated_positions() {
    let cfg = tiny_config();
    let dir = fresh_dir("seq_positions");
    let mut sprite = tiny_sprite();

    render_frames(&cfg, &mut sprite, &dir, &RenderOpts::default()).unwrap();

    let initial = cfg.centered_box(4, 2);
    let steps = simulate(
        initial,
        cfg.direction,
        cfg.canvas,
        cfg.velocity,
        cfg.frame_count(),
    );

    for (i, step) in steps.iter().enumerate() {
        assert!(step.bbox.contained_in(cfg.canvas));
        assert_first_opaque_pixel_at(&dir.join(format!("{i:02}.png")), step.bbox);
    }
}

#[test]
fn sprite_orientation_parity_matches_flip_count() {
    let cfg = tiny_config();
    let dir = fresh_dir("seq_parity");
    let mut sprite = tiny_sprite();

    let stats = render_frames(&cfg, &mut sprite, &dir, &RenderOpts::default()).unwrap();

    let flipped_steps = simulate(
        cfg.centered_box(4, 2),
        cfg.direction,
        cfg.canvas,
        cfg.velocity,
        cfg.frame_count(),
    )
    .iter()
    .filter(|s| s.flipped)
    .count() as u64;

    assert_eq!(stats.flips, flipped_steps);
    assert_eq!(sprite.mirrored(), stats.flips % 2 == 1);
}

/// Decode the frame and assert the sprite's top-left corner is where the
/// simulator said it should be (every canvas pixel outside the box is fully
/// transparent, and the box's rows are opaque).
fn assert_first_opaque_pixel_at(path: &Path, bbox: BoundingBox) {
    let img = image::open(path).unwrap().to_rgba8();
    let (w, _h) = img.dimensions();

    let first_opaque = img
        .pixels()
        .position(|p| p.0[3] != 0)
        .expect("frame should contain the sprite");
    let x = (first_opaque as u32 % w) as i64;
    let y = (first_opaque as u32 / w) as i64;
    assert_eq!((x, y), (bbox.x(), bbox.y()), "sprite misplaced in {path:?}");
}
