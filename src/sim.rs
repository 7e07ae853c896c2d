//! The bounce state machine.
//!
//! One [`step`] advances the sprite's bounding box by one frame: move along the
//! current diagonal, detect boundary crossings against the tentative position,
//! reflect the crossed axis (or both on a corner hit), and clamp the box exactly
//! tangent to the crossed boundary. A step reports `flipped == true` whenever
//! the horizontal direction component reversed, which the driver turns into one
//! horizontal mirror of the sprite.

use crate::core::Canvas;

/// Axis-aligned sprite placement on the canvas, in pixels.
///
/// `right >= left` and `bottom >= top` always hold; the size is fixed for the
/// lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl BoundingBox {
    /// Build a box from its top-left corner and size.
    pub fn from_origin(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            left: x,
            right: x + width,
            top: y,
            bottom: y + height,
        }
    }

    pub fn x(self) -> i64 {
        self.left
    }

    pub fn y(self) -> i64 {
        self.top
    }

    pub fn width(self) -> i64 {
        self.right - self.left
    }

    pub fn height(self) -> i64 {
        self.bottom - self.top
    }

    /// Return a copy shifted by `(dx, dy)`.
    pub fn translated(self, dx: i64, dy: i64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            top: self.top + dy,
            bottom: self.bottom + dy,
        }
    }

    /// `true` when the box lies fully inside the canvas (edges may touch).
    pub fn contained_in(self, canvas: Canvas) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right <= i64::from(canvas.width)
            && self.bottom <= i64::from(canvas.height)
    }
}

/// One of the four diagonal travel directions.
///
/// The direction space is a 4-cycle under single-axis reflection; axis-aligned
/// or zero vectors cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Southeast,
    Northeast,
    Northwest,
    Southwest,
}

impl Direction {
    /// Horizontal sign component, +1 east / -1 west.
    pub fn dx(self) -> i64 {
        match self {
            Self::Southeast | Self::Northeast => 1,
            Self::Northwest | Self::Southwest => -1,
        }
    }

    /// Vertical sign component, +1 south / -1 north.
    pub fn dy(self) -> i64 {
        match self {
            Self::Southeast | Self::Southwest => 1,
            Self::Northeast | Self::Northwest => -1,
        }
    }

    /// Reverse the east/west component.
    pub fn reflect_horizontal(self) -> Self {
        match self {
            Self::Southeast => Self::Southwest,
            Self::Southwest => Self::Southeast,
            Self::Northeast => Self::Northwest,
            Self::Northwest => Self::Northeast,
        }
    }

    /// Reverse the north/south component.
    pub fn reflect_vertical(self) -> Self {
        match self {
            Self::Southeast => Self::Northeast,
            Self::Northeast => Self::Southeast,
            Self::Southwest => Self::Northwest,
            Self::Northwest => Self::Southwest,
        }
    }
}

/// Result of one simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Sprite placement for this frame, always inside the canvas.
    pub bbox: BoundingBox,
    /// Travel direction for the next step.
    pub direction: Direction,
    /// `true` iff the horizontal component reversed this step.
    pub flipped: bool,
}

/// Advance the simulation by one frame.
///
/// Pure over its explicit inputs. The caller must have validated that `bbox`
/// is inside the canvas, `velocity > 0`, and the sprite is strictly smaller
/// than the canvas on both axes (see
/// [`BounceConfig::validate_sprite`](crate::model::BounceConfig::validate_sprite));
/// given that, the step is total and the returned box still satisfies
/// containment.
///
/// Overshoot policy: the box lands exactly tangent to a crossed boundary
/// (e.g. `right == canvas.width` on an east bounce), never past it.
pub fn step(bbox: BoundingBox, direction: Direction, canvas: Canvas, velocity: u32) -> Step {
    let v = i64::from(velocity);
    let width = i64::from(canvas.width);
    let height = i64::from(canvas.height);

    let tentative = bbox.translated(direction.dx() * v, direction.dy() * v);

    // Per-axis correction pulling an overshot box back onto the boundary.
    // Zero means the axis was not crossed; touching an edge is not a crossing.
    let dx_correct = if tentative.left < 0 {
        -tentative.left
    } else if tentative.right > width {
        width - tentative.right
    } else {
        0
    };
    let dy_correct = if tentative.top < 0 {
        -tentative.top
    } else if tentative.bottom > height {
        height - tentative.bottom
    } else {
        0
    };

    let mut next_direction = direction;
    if dx_correct != 0 {
        next_direction = next_direction.reflect_horizontal();
    }
    if dy_correct != 0 {
        next_direction = next_direction.reflect_vertical();
    }

    Step {
        bbox: tentative.translated(dx_correct, dy_correct),
        direction: next_direction,
        flipped: dx_correct != 0,
    }
}

/// Fold [`step`] over `frames` iterations, collecting every step.
///
/// Strictly serial: frame N+1 depends on frame N's output, so there is no
/// frame-level parallelism to be had here (rendering of already-computed
/// positions is a separate concern).
pub fn simulate(
    initial: BoundingBox,
    direction: Direction,
    canvas: Canvas,
    velocity: u32,
    frames: u64,
) -> Vec<Step> {
    let mut out = Vec::with_capacity(frames.min(4096) as usize);
    let mut bbox = initial;
    let mut dir = direction;
    for _ in 0..frames {
        let next = step(bbox, dir, canvas, velocity);
        bbox = next.bbox;
        dir = next.direction;
        out.push(next);
    }
    out
}
