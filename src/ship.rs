//! The player ship: movement, boundaries, energy, shields and overdrive.

use tracing::debug;

use crate::geometry::{DisplayRect, Hitbox};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Tuning ────────────────────────────────────────────────────────────────────

pub const START_POSITION: (f32, f32) = (345.0, 400.0);
pub const IMAGE_SIZE: (i32, i32) = (134, 100);

pub const MAX_ENERGY: i32 = 100;
pub const MAX_SHIELD: i32 = 5;
/// Energy traded for one shield level, both ways.
pub const SHIELD_COST: i32 = 20;
/// One energy point comes back every this many frames.
pub const REGEN_PERIOD: u64 = 65;

pub const OVERDRIVE_COST: i32 = 25;
pub const OVERDRIVE_BOOST: f32 = 1.5;
pub const OVERDRIVE_FRAMES: u32 = 400;

/// Diagonal input is divided by this and scaled by `DIAGONAL_SCALE`, so it
/// lands close to, but not exactly on, cardinal speed.
pub const DIAGONAL_DIVISOR: f32 = 1.414;
pub const DIAGONAL_SCALE: f32 = 1.1;

/// Distance from each edge at which movement towards that edge stops.
pub const MARGIN_LEFT: f32 = 5.0;
pub const MARGIN_RIGHT: f32 = 120.0;
pub const MARGIN_TOP: f32 = 15.0;
pub const MARGIN_BOTTOM: f32 = 140.0;

// ── Shield overlay ────────────────────────────────────────────────────────────

/// Cosmetic shield ring composited over the ship image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShieldOverlay {
    /// Opacity 0-255.
    pub alpha: u8,
    pub ring_width: u8,
    /// Extra white ring, only at full shields.
    pub white_width: u8,
}

impl ShieldOverlay {
    pub fn for_level(level: i32) -> Self {
        let (alpha, ring_width, white_width) = match level {
            1 => (65, 1, 0),
            2 => (120, 1, 0),
            3 => (150, 2, 0),
            4 => (210, 2, 0),
            l if l >= MAX_SHIELD => (210, 3, 1),
            _ => (0, 0, 0),
        };
        ShieldOverlay {
            alpha,
            ring_width,
            white_width,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0
    }
}

/// Result of applying damage to the ship.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Damage {
    Absorbed,
    Destroyed,
}

impl Damage {
    pub fn is_destroyed(self) -> bool {
        self == Damage::Destroyed
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    /// Authoritative top-left of the ship image.
    pub position: (f32, f32),
    /// Velocity applied on the last update (zero when blocked by an edge).
    pub velocity: (f32, f32),
    /// Tall strip along the fuselage.
    pub vertical_hitbox: Hitbox,
    /// Wide strip across the wings.
    pub horizontal_hitbox: Hitbox,
    pub energy: i32,
    pub shield_level: i32,
    pub shield: ShieldOverlay,
    pub boost: f32,
    pub boost_timer: u32,
}

impl Default for Ship {
    fn default() -> Self {
        Ship::new()
    }
}

impl Ship {
    pub fn new() -> Self {
        Ship::at(START_POSITION)
    }

    pub fn at(position: (f32, f32)) -> Self {
        let (x, y) = position;
        Ship {
            position,
            velocity: (0.0, 0.0),
            vertical_hitbox: Hitbox::new(18.0, 67.0, (x + 62.0, y + 52.0), 0),
            horizontal_hitbox: Hitbox::new(50.0, 11.0, (x + 62.0, y + 74.0), 0),
            energy: MAX_ENERGY,
            shield_level: 0,
            shield: ShieldOverlay::for_level(0),
            boost: 1.0,
            boost_timer: 0,
        }
    }

    pub fn hitboxes(&self) -> [Hitbox; 2] {
        [self.vertical_hitbox, self.horizontal_hitbox]
    }

    /// One frame: move from directional intent, tick the overdrive timer and
    /// regenerate energy.  `distance_traveled` is the running frame count.
    pub fn update(&mut self, x_speed: f32, y_speed: f32, distance_traveled: u64) {
        let mut x_speed = x_speed * self.boost;
        let mut y_speed = y_speed * self.boost;

        if x_speed != 0.0 && y_speed != 0.0 {
            x_speed = round3(x_speed / DIAGONAL_DIVISOR * DIAGONAL_SCALE);
            y_speed = round3(y_speed / DIAGONAL_DIVISOR * DIAGONAL_SCALE);
        }

        self.update_position(x_speed, y_speed);

        if self.boost_timer > 0 {
            self.boost_timer -= 1;
            if self.boost_timer == 0 {
                self.boost = 1.0;
                debug!("overdrive expired");
            }
        }

        if distance_traveled % REGEN_PERIOD == 0 && self.energy < MAX_ENERGY {
            self.energy += 1;
        }
    }

    /// Move the image and both hitboxes by the same delta, unless an edge
    /// blocks the move.
    pub fn update_position(&mut self, x_speed: f32, y_speed: f32) {
        if !self.check_boundary(x_speed, y_speed) {
            self.velocity = (0.0, 0.0);
            return;
        }
        self.velocity = (x_speed, y_speed);
        self.position = (self.position.0 + x_speed, self.position.1 + y_speed);
        self.vertical_hitbox.translate(x_speed, y_speed);
        self.horizontal_hitbox.translate(x_speed, y_speed);
    }

    /// `false` when the ship is inside an edge margin and moving towards that
    /// edge.  Moving away is always allowed.
    pub fn check_boundary(&self, x_speed: f32, y_speed: f32) -> bool {
        let (x, y) = self.position;
        if x < MARGIN_LEFT && x_speed < 0.0 {
            return false;
        }
        if x > SCREEN_WIDTH - MARGIN_RIGHT && x_speed > 0.0 {
            return false;
        }
        if y < MARGIN_TOP && y_speed < 0.0 {
            return false;
        }
        if y > SCREEN_HEIGHT - MARGIN_BOTTOM && y_speed > 0.0 {
            return false;
        }
        true
    }

    /// Spend energy on a timed speed boost.  No effect while one is running.
    pub fn overdrive(&mut self) {
        if self.energy >= OVERDRIVE_COST && self.boost_timer == 0 {
            self.boost = OVERDRIVE_BOOST;
            self.boost_timer = OVERDRIVE_FRAMES;
            self.energy -= OVERDRIVE_COST;
            debug!(energy = self.energy, "overdrive engaged");
        }
    }

    pub fn increase_shields(&mut self) {
        if self.energy >= SHIELD_COST && self.shield_level < MAX_SHIELD {
            self.shield_level += 1;
            self.energy -= SHIELD_COST;
            self.draw_shield();
        }
    }

    /// Convert one shield level back into energy (capped).
    pub fn decrease_shields(&mut self) {
        if self.shield_level > 0 {
            self.shield_level -= 1;
            self.energy = (self.energy + SHIELD_COST).min(MAX_ENERGY);
            self.draw_shield();
        }
    }

    /// Recompose the overlay for the current shield level.
    pub fn draw_shield(&mut self) {
        self.shield = ShieldOverlay::for_level(self.shield_level);
    }

    /// Shield levels double as hit points.  Damage past zero destroys the
    /// ship; the stored level never leaves `0..=MAX_SHIELD`.
    pub fn take_damage(&mut self, damage: i32) -> Damage {
        debug_assert!(damage >= 0, "negative damage {damage}");
        let remaining = self.shield_level - damage;
        if remaining < 0 {
            self.shield_level = 0;
            self.draw_shield();
            return Damage::Destroyed;
        }
        self.shield_level = remaining;
        self.draw_shield();
        Damage::Absorbed
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_timer > 0
    }

    pub fn display_rect(&self) -> DisplayRect {
        DisplayRect::at(self.position, IMAGE_SIZE.0, IMAGE_SIZE.1)
    }
}

fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}
