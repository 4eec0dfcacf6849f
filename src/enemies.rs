//! Enemy ships: lifecycle state machine, attack triggers and spawning.
//!
//! Every enemy drops in from above the screen (`Intro`), hovers and attacks
//! until its lifetime runs out (`Active`), then accelerates off the bottom
//! (`Outro`).  Variants differ only in their [`EnemyProfile`] and attack table.

use std::f32::consts::PI;

use tracing::debug;

use crate::attacks::{AttackPool, Launch};
use crate::dice::Dice;
use crate::geometry::{Collider, DisplayRect, Hitbox};
use crate::SCREEN_HEIGHT;

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Downward speed while entering the screen.
pub const INTRO_SPEED: f32 = 1.0;
pub const CRUISE_VELOCITY: (f32, f32) = (0.0, 0.5);
/// Intro ends once the enemy is this many image-heights down.
pub const INTRO_DEPTH: f32 = 1.8;
pub const OUTRO_ACCELERATION: f32 = 0.35;
pub const OUTRO_MAX_SPEED: f32 = 5.0;
/// Outro accelerates on every n-th frame.
pub const OUTRO_PERIOD: i32 = 5;
/// Cooldown forced during the outro so no more attacks fire.
pub const SUPPRESSED_COOLDOWN: i32 = 1000;
pub const BASE_COOLDOWN: i32 = 50;
pub const LIFETIME: i32 = 310;
/// Extra cooldown after a fighter's heavy shot.
pub const HEAVY_COOLDOWN_PENALTY: i32 = 20;

/// Horizontal spawn range, inclusive.
pub const SPAWN_X: (i32, i32) = (10, 790);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fighter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Intro,
    Active,
    Outro,
}

/// Fixed per-variant data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    pub image: (f32, f32),
    /// Collision box, centred on the enemy position.  The fighter's is
    /// smaller than its image to skip the empty corners.
    pub collision: (f32, f32),
    /// Damage dealt to the ship on a ram.
    pub mass: i32,
    /// Subtracted from the position to place the explosion animation.
    pub explosion_offset: (f32, f32),
}

impl EnemyKind {
    pub fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Basic => EnemyProfile {
                image: (21.0, 22.0),
                collision: (21.0, 22.0),
                mass: 1,
                explosion_offset: (15.0, 12.0),
            },
            EnemyKind::Fighter => EnemyProfile {
                image: (31.0, 36.0),
                collision: (27.0, 31.0),
                mass: 2,
                explosion_offset: (15.0, 12.0),
            },
        }
    }
}

/// What the pool should do with an enemy after its update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyStep {
    Alive,
    Despawn,
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Authoritative centre.
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub state: Lifecycle,
    pub cooldown_remaining: i32,
    pub cooldown_base: i32,
    pub lifetime_remaining: i32,
    pub mass: i32,
}

impl Enemy {
    /// A fresh enemy one image-height above the top edge.
    pub fn new(kind: EnemyKind, x: f32) -> Self {
        let profile = kind.profile();
        Enemy {
            kind,
            position: (x, -profile.image.1),
            velocity: CRUISE_VELOCITY,
            state: Lifecycle::Intro,
            cooldown_remaining: SUPPRESSED_COOLDOWN,
            cooldown_base: BASE_COOLDOWN,
            lifetime_remaining: LIFETIME,
            mass: profile.mass,
        }
    }

    /// New enemy at a random column.
    pub fn spawn(kind: EnemyKind, dice: &mut impl Dice) -> Self {
        let x = dice.roll(SPAWN_X.0, SPAWN_X.1);
        Enemy::new(kind, x as f32)
    }

    pub fn profile(&self) -> EnemyProfile {
        self.kind.profile()
    }

    /// One frame of behaviour.  Attacks are pushed straight into `attacks`.
    /// Lifetime counts from spawn, so the intro eats into it.
    pub fn update(&mut self, dice: &mut impl Dice, attacks: &mut AttackPool) -> EnemyStep {
        self.lifetime_remaining -= 1;
        if self.state == Lifecycle::Intro {
            self.intro();
            return EnemyStep::Alive;
        }

        if self.state == Lifecycle::Active && self.lifetime_remaining < 0 {
            self.state = Lifecycle::Outro;
        }
        if self.state == Lifecycle::Outro {
            self.outro();
        }

        self.advance(self.velocity);
        if self.position.1 > SCREEN_HEIGHT + self.profile().image.1 * 2.0 {
            return EnemyStep::Despawn;
        }

        self.attack(dice, attacks);
        EnemyStep::Alive
    }

    /// Drift onto the screen; become active once deep enough.
    pub fn intro(&mut self) {
        self.advance((0.0, INTRO_SPEED));
        if self.position.1 > self.profile().image.1 * INTRO_DEPTH {
            self.state = Lifecycle::Active;
            self.cooldown_remaining = 0;
        }
    }

    /// Speed up towards the bottom edge, holding fire.  Acceleration stops
    /// once the speed reaches `OUTRO_MAX_SPEED`, so the last step may land
    /// slightly past it.
    pub fn outro(&mut self) {
        if self.lifetime_remaining.rem_euclid(OUTRO_PERIOD) == 0 {
            if self.velocity.1 < OUTRO_MAX_SPEED {
                self.velocity.1 += OUTRO_ACCELERATION;
            }
            self.cooldown_remaining = SUPPRESSED_COOLDOWN;
        }
    }

    fn advance(&mut self, (dx, dy): (f32, f32)) {
        self.position = (self.position.0 + dx, self.position.1 + dy);
    }

    /// Count the cooldown down and maybe fire, per the variant's table.
    pub fn attack(&mut self, dice: &mut impl Dice, attacks: &mut AttackPool) {
        self.cooldown_remaining -= 1;
        let (x, y) = self.position;

        match self.kind {
            EnemyKind::Basic => {
                // 1 in 101 per frame.
                if dice.roll(0, 100) > 99 && self.cooldown_remaining < 0 {
                    attacks.fire(Launch::straight((x, y)));
                    self.cooldown_remaining = self.cooldown_base;
                    debug!(kind = ?self.kind, x, y, "straight shot fired");
                }
            }
            EnemyKind::Fighter => {
                let select = dice.roll(1, 1000);
                if self.cooldown_remaining >= 0 {
                    return;
                }
                match select {
                    965..=985 => {
                        let angle = PI / 6.0;
                        attacks.fire(Launch::angled((x + 9.0, y - 4.0), angle));
                        attacks.fire(Launch::angled((x - 3.0, y - 4.0), -angle));
                        self.cooldown_remaining = self.cooldown_base;
                        debug!(kind = ?self.kind, x, y, "twin volley fired");
                    }
                    986..=1000 => {
                        attacks.fire(Launch::heavy((x + 3.0, y - 8.0)));
                        self.cooldown_remaining = self.cooldown_base + HEAVY_COOLDOWN_PENALTY;
                        debug!(kind = ?self.kind, x, y, "heavy laser fired");
                    }
                    _ => {}
                }
            }
        }
    }

    /// Where the explosion animation goes when this enemy dies.
    pub fn explosion_point(&self) -> (f32, f32) {
        let offset = self.profile().explosion_offset;
        (self.position.0 - offset.0, self.position.1 - offset.1)
    }

    pub fn display_rect(&self) -> DisplayRect {
        let image = self.profile().image;
        DisplayRect::around(self.position, image.0 as i32, image.1 as i32)
    }
}

impl Collider for Enemy {
    fn hitbox(&self) -> Hitbox {
        let (w, h) = self.profile().collision;
        Hitbox::new(w, h, self.position, self.mass)
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Wave pacing: one enemy every `interval` frames, fighters mixed in from
/// `fighters_from` onwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawner {
    pub interval: u64,
    pub fighters_from: u64,
    /// Out of 10.
    pub fighter_odds: i32,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner {
            interval: 75,
            fighters_from: 900,
            fighter_odds: 4,
        }
    }
}

impl Spawner {
    pub fn poll(&self, distance: u64, dice: &mut impl Dice) -> Option<Enemy> {
        if self.interval == 0 || distance % self.interval != 0 {
            return None;
        }
        let kind = if distance >= self.fighters_from && dice.roll(1, 10) <= self.fighter_odds {
            EnemyKind::Fighter
        } else {
            EnemyKind::Basic
        };
        let enemy = Enemy::spawn(kind, dice);
        debug!(?kind, x = enemy.position.0, distance, "enemy spawned");
        Some(enemy)
    }
}
