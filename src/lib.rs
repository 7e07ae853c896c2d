#![forbid(unsafe_code)]

pub mod composite;
pub mod core;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod sim;
pub mod sprite;
pub mod stitch;

pub use composite::{FrameRgba, blank_frame, blit_over, save_png};
pub use core::{Canvas, FrameIndex};
pub use error::{BounceError, BounceResult};
pub use model::BounceConfig;
pub use pipeline::{RenderOpts, RenderStats, render_frames, render_to_mp4};
pub use sim::{BoundingBox, Direction, Step, simulate, step};
pub use sprite::Sprite;
pub use stitch::{StitchConfig, is_ffmpeg_on_path, stitch_frames};
