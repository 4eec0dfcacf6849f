//! Collision primitives.
//!
//! Positions are tracked as `f32` in simulation space.  Integer rectangles
//! exist only for presentation and are always derived, never stored.

/// Axis-aligned collision rectangle with an attached damage value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
    pub center: (f32, f32),
    pub damage: i32,
}

impl Hitbox {
    pub fn new(width: f32, height: f32, center: (f32, f32), damage: i32) -> Self {
        Hitbox {
            width,
            height,
            center,
            damage,
        }
    }

    /// Move the centre by the same delta its owner moved.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.center = (self.center.0 + dx, self.center.1 + dy);
    }

    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let dx = (self.center.0 - other.center.0).abs();
        let dy = (self.center.1 - other.center.1).abs();
        dx * 2.0 < self.width + other.width && dy * 2.0 < self.height + other.height
    }

    /// Integer rectangle for drawing the box (calibration overlay).
    pub fn display_rect(&self) -> DisplayRect {
        DisplayRect::around(self.center, self.width as i32, self.height as i32)
    }
}

/// Anything that can be tested against a ship hitbox.
pub trait Collider {
    fn hitbox(&self) -> Hitbox;
}

impl Collider for Hitbox {
    fn hitbox(&self) -> Hitbox {
        *self
    }
}

/// Indices of every member of `pool` overlapping `probe`, in pool order.
pub fn overlapping<C: Collider>(probe: &Hitbox, pool: &[C]) -> Vec<usize> {
    pool.iter()
        .enumerate()
        .filter(|(_, member)| probe.overlaps(&member.hitbox()))
        .map(|(i, _)| i)
        .collect()
}

// ── Presentation space ────────────────────────────────────────────────────────

/// Integer rectangle in screen pixels.  Recomputed every frame from a float
/// position and never written back into simulation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DisplayRect {
    /// Truncating conversion, as a pixel grid would do it.
    pub fn at(top_left: (f32, f32), width: i32, height: i32) -> Self {
        DisplayRect {
            x: top_left.0 as i32,
            y: top_left.1 as i32,
            width,
            height,
        }
    }

    pub fn around(center: (f32, f32), width: i32, height: i32) -> Self {
        let cx = center.0 as i32;
        let cy = center.1 as i32;
        DisplayRect {
            x: cx - width / 2,
            y: cy - height / 2,
            width,
            height,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Top-left and bottom-right pixels.
    pub fn corners(&self) -> [(i32, i32); 2] {
        [(self.x, self.y), (self.x + self.width, self.y + self.height)]
    }
}
