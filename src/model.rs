use crate::{
    core::Canvas,
    error::{BounceError, BounceResult},
    sim::{BoundingBox, Direction},
};

/// Configuration for one bounce run.
///
/// Serializable so a run can be described as a JSON file and replayed:
/// identical configs (plus an identical sprite) always produce identical
/// position sequences.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BounceConfig {
    pub canvas: Canvas,
    /// Output frames per second.
    pub fps: u32,
    /// Run length in seconds; total frames = fps * duration_secs.
    pub duration_secs: u32,
    /// Per-frame displacement along each axis, in pixels.
    pub velocity: u32,
    /// Starting travel direction.
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

fn default_direction() -> Direction {
    Direction::Southeast
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 3840,
                height: 2160,
            },
            fps: 30,
            duration_secs: 40,
            velocity: 10,
            direction: default_direction(),
        }
    }
}

impl BounceConfig {
    /// Total number of frames this run generates.
    pub fn frame_count(&self) -> u64 {
        u64::from(self.fps) * u64::from(self.duration_secs)
    }

    pub fn validate(&self) -> BounceResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(BounceError::config("canvas width/height must be > 0"));
        }
        if self.fps == 0 {
            return Err(BounceError::config("fps must be > 0"));
        }
        if self.duration_secs == 0 {
            return Err(BounceError::config("duration_secs must be > 0"));
        }
        if self.velocity == 0 {
            return Err(BounceError::config("velocity must be > 0"));
        }
        Ok(())
    }

    /// Reject sprite/canvas combinations the simulator is undefined over:
    /// the sprite must be strictly smaller than the canvas on both axes, and
    /// its centered placement must start fully in bounds.
    pub fn validate_sprite(&self, sprite_width: u32, sprite_height: u32) -> BounceResult<()> {
        self.validate()?;
        if sprite_width == 0 || sprite_height == 0 {
            return Err(BounceError::config("sprite width/height must be > 0"));
        }
        if sprite_width >= self.canvas.width || sprite_height >= self.canvas.height {
            return Err(BounceError::config(format!(
                "sprite {}x{} must be strictly smaller than the canvas {}x{}",
                sprite_width, sprite_height, self.canvas.width, self.canvas.height
            )));
        }
        let initial = self.centered_box(sprite_width, sprite_height);
        if !initial.contained_in(self.canvas) {
            return Err(BounceError::config(format!(
                "initial sprite placement {initial:?} is outside the canvas"
            )));
        }
        Ok(())
    }

    /// Initial placement: sprite centered on the canvas (integer-floored).
    pub fn centered_box(&self, sprite_width: u32, sprite_height: u32) -> BoundingBox {
        let center_x = i64::from(self.canvas.width) / 2;
        let center_y = i64::from(self.canvas.height) / 2;
        let w = i64::from(sprite_width);
        let h = i64::from(sprite_height);
        BoundingBox::from_origin(center_x - w / 2, center_y - h / 2, w, h)
    }
}
