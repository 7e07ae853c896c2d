use crate::error::{BounceError, BounceResult};

/// Absolute 0-based frame index in output-sequence order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> BounceResult<Self> {
        if width == 0 || height == 0 {
            return Err(BounceError::config("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 1080).is_err());
        assert!(Canvas::new(1920, 0).is_err());
        assert!(Canvas::new(1920, 1080).is_ok());
    }

    #[test]
    fn frame_index_orders_naturally() {
        assert!(FrameIndex(2) < FrameIndex(10));
    }
}
