//! Enemy projectiles.
//!
//! An attack is a short line drawn on a 30×60 surface plus one hitbox.  The
//! three variants share every rule and differ only in launch data and hitbox
//! calibration.

use std::collections::BTreeSet;

use crate::geometry::{Collider, DisplayRect, Hitbox};

/// Attacks are discarded once they travel this far down.
pub const OFFSCREEN_Y: f32 = 1000.0;
/// Speed bonus applied to every attack when it is fired.
pub const MUZZLE_BOOST: f32 = 1.1;
/// Size of the surface the attack line is drawn on.
pub const SURFACE_SIZE: (i32, i32) = (30, 60);

/// Where the attack line starts on its surface, for every enemy launcher.
pub const LINE_ORIGIN: (f32, f32) = (15.0, 14.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShotId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Straight,
    Angled,
    Heavy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Red,
    Blue,
}

/// Hitbox size and its centre relative to the attack position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub size: (f32, f32),
    pub offset: (f32, f32),
}

impl AttackKind {
    pub fn calibration(self, angle: f32) -> Calibration {
        match self {
            AttackKind::Straight => Calibration {
                size: (2.0, 8.0),
                offset: (15.0, 30.0),
            },
            // Left-leaning shots sit on the other side of the surface.
            AttackKind::Angled if angle > 0.0 => Calibration {
                size: (3.0, 6.0),
                offset: (19.0, 22.0),
            },
            AttackKind::Angled => Calibration {
                size: (3.0, 6.0),
                offset: (10.0, 22.0),
            },
            AttackKind::Heavy => Calibration {
                size: (2.0, 17.0),
                offset: (16.0, 28.0),
            },
        }
    }
}

// ── Launch data ───────────────────────────────────────────────────────────────

/// Everything needed to fire one attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Launch {
    pub kind: AttackKind,
    /// Point on the enemy the attack leaves from.
    pub source: (f32, f32),
    pub line_origin: (f32, f32),
    /// Radians, 0 is straight down, positive leans right.
    pub angle: f32,
    pub speed: f32,
    pub damage: i32,
    pub line_length: f32,
    pub line_width: u16,
    pub tint: Tint,
}

impl Launch {
    /// Single red laser of the basic enemy.
    pub fn straight(source: (f32, f32)) -> Self {
        Launch {
            kind: AttackKind::Straight,
            source,
            line_origin: LINE_ORIGIN,
            angle: 0.0,
            speed: 7.0,
            damage: 1,
            line_length: 15.0,
            line_width: 1,
            tint: Tint::Red,
        }
    }

    /// One half of the fighter's twin volley.
    pub fn angled(source: (f32, f32), angle: f32) -> Self {
        Launch {
            kind: AttackKind::Angled,
            source,
            line_origin: LINE_ORIGIN,
            angle,
            speed: 6.0,
            damage: 1,
            line_length: 15.0,
            line_width: 1,
            tint: Tint::Red,
        }
    }

    /// The fighter's slow blue power laser.
    pub fn heavy(source: (f32, f32)) -> Self {
        Launch {
            kind: AttackKind::Heavy,
            source,
            line_origin: LINE_ORIGIN,
            angle: 0.0,
            speed: 5.0,
            damage: 2,
            line_length: 23.0,
            line_width: 3,
            tint: Tint::Blue,
        }
    }
}

// ── Attack ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Attack {
    pub id: ShotId,
    pub kind: AttackKind,
    /// Authoritative top-left of the attack surface.
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub angle: f32,
    pub damage: i32,
    pub line_origin: (f32, f32),
    pub line_terminus: (f32, f32),
    pub line_width: u16,
    pub tint: Tint,
    pub hitbox: Hitbox,
}

impl Attack {
    pub fn new(id: ShotId, launch: Launch) -> Self {
        let position = (launch.source.0 - 15.0, launch.source.1 - 7.0);

        // Rotate the vertical launch speed; magnitude is kept.
        let x_factor = launch.angle.sin();
        let y_factor = launch.angle.cos();
        let velocity = (
            launch.speed * x_factor * MUZZLE_BOOST,
            launch.speed * y_factor * MUZZLE_BOOST,
        );
        let line_terminus = (
            launch.line_origin.0 + x_factor * launch.line_length,
            launch.line_origin.1 + y_factor * launch.line_length,
        );

        let cal = launch.kind.calibration(launch.angle);
        let hitbox = Hitbox::new(
            cal.size.0,
            cal.size.1,
            (position.0 + cal.offset.0, position.1 + cal.offset.1),
            launch.damage,
        );

        Attack {
            id,
            kind: launch.kind,
            position,
            velocity,
            angle: launch.angle,
            damage: launch.damage,
            line_origin: launch.line_origin,
            line_terminus,
            line_width: launch.line_width,
            tint: launch.tint,
            hitbox,
        }
    }

    /// Advance one frame.  Returns `false` when the attack should be dropped:
    /// it ran off screen or its hitbox was already consumed by a collision.
    pub fn update(&mut self, armed: bool) -> bool {
        let (dx, dy) = self.velocity;
        self.position = (self.position.0 + dx, self.position.1 + dy);
        self.hitbox.translate(dx, dy);

        self.position.1 <= OFFSCREEN_Y && armed
    }

    pub fn display_rect(&self) -> DisplayRect {
        DisplayRect::at(self.position, SURFACE_SIZE.0, SURFACE_SIZE.1)
    }
}

impl Collider for Attack {
    fn hitbox(&self) -> Hitbox {
        self.hitbox
    }
}

// ── Pool ──────────────────────────────────────────────────────────────────────

/// Live attacks, kept as two registries: every attack is drawable, and the
/// `shots` set holds the ids whose hitbox can still collide.  A hit removes
/// the id from `shots`; the attack itself leaves the drawable list in the
/// same frame.
#[derive(Clone, Debug)]
pub struct AttackPool {
    attacks: Vec<Attack>,
    shots: BTreeSet<ShotId>,
    next_id: u64,
    collisions_enabled: bool,
}

impl Default for AttackPool {
    fn default() -> Self {
        AttackPool::new()
    }
}

impl AttackPool {
    pub fn new() -> Self {
        AttackPool {
            attacks: Vec::new(),
            shots: BTreeSet::new(),
            next_id: 0,
            collisions_enabled: true,
        }
    }

    /// When disabled, attacks still fly and draw but never hit.
    pub fn set_collisions(&mut self, enabled: bool) {
        self.collisions_enabled = enabled;
    }

    pub fn fire(&mut self, launch: Launch) -> ShotId {
        let id = ShotId(self.next_id);
        self.next_id += 1;
        self.attacks.push(Attack::new(id, launch));
        self.shots.insert(id);
        id
    }

    /// Advance every attack, dropping the dead ones.
    pub fn update(&mut self) {
        let shots = &mut self.shots;
        self.attacks.retain_mut(|attack| {
            let alive = attack.update(shots.contains(&attack.id));
            if !alive {
                shots.remove(&attack.id);
            }
            alive
        });
    }

    /// Collidable attacks overlapping `probe`.
    pub fn hits(&self, probe: &Hitbox) -> Vec<ShotId> {
        if !self.collisions_enabled {
            return Vec::new();
        }
        self.attacks
            .iter()
            .filter(|a| self.shots.contains(&a.id) && probe.overlaps(&a.hitbox))
            .map(|a| a.id)
            .collect()
    }

    /// Remove a hitbox from the collidable set, returning its damage.
    /// `None` if it was already consumed this frame.
    pub fn consume(&mut self, id: ShotId) -> Option<i32> {
        if !self.shots.remove(&id) {
            return None;
        }
        self.get(id).map(|a| a.hitbox.damage)
    }

    /// Drop attacks whose hitbox has been consumed.
    pub fn prune_consumed(&mut self) {
        let shots = &self.shots;
        self.attacks.retain(|a| shots.contains(&a.id));
    }

    pub fn get(&self, id: ShotId) -> Option<&Attack> {
        self.attacks.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ShotId) -> Option<&mut Attack> {
        self.attacks.iter_mut().find(|a| a.id == id)
    }

    pub fn is_collidable(&self, id: ShotId) -> bool {
        self.shots.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attack> {
        self.attacks.iter()
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    pub fn collidable_len(&self) -> usize {
        self.shots.len()
    }
}
