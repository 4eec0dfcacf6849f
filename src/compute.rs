//! Per-frame orchestration.
//!
//! [`Simulation`] owns every entity pool and advances them in a fixed order:
//! ship, spawner, enemies, attacks, collisions, explosions.  Reordering these
//! phases changes what the player sees, so `step` is the only place that
//! drives them.  [`run`] wraps `step` with input, drawing and frame pacing.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::attacks::AttackPool;
use crate::dice::Dice;
use crate::enemies::{Enemy, EnemyStep, Spawner};
use crate::explosion::Explosion;
use crate::geometry::{overlapping, Collider};
use crate::hud::HudStatus;
use crate::input::{Controls, Flow, InputEvent, InputSource};
use crate::render::Renderer;
use crate::ship::{Damage, Ship};

/// Enemies only start spawning after this many frames.
pub const STARTUP_DELAY: u64 = 25;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Destroyed,
}

// ── Simulation state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Simulation {
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub attacks: AttackPool,
    pub explosions: Vec<Explosion>,
    pub controls: Controls,
    pub spawner: Spawner,
    /// Frame counter, starting at 1.  Drives energy regen and spawning.
    pub distance_traveled: u64,
    pub status: GameStatus,
    /// Draw hitboxes on top of everything.
    pub show_hitboxes: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Simulation {
            ship: Ship::new(),
            enemies: Vec::new(),
            attacks: AttackPool::new(),
            explosions: Vec::new(),
            controls: Controls::default(),
            spawner: Spawner::default(),
            distance_traveled: 1,
            status: GameStatus::Playing,
            show_hitboxes: false,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Flow {
        self.controls.apply(event, &mut self.ship)
    }

    /// Advance one frame.  Randomness only comes through `dice`.
    pub fn step(&mut self, dice: &mut impl Dice) -> GameStatus {
        if self.status == GameStatus::Destroyed {
            return self.status;
        }

        self.ship.update(
            self.controls.x_speed,
            self.controls.y_speed,
            self.distance_traveled,
        );

        if self.distance_traveled > STARTUP_DELAY {
            if let Some(enemy) = self.spawner.poll(self.distance_traveled, dice) {
                self.enemies.push(enemy);
            }
        }

        let attacks = &mut self.attacks;
        self.enemies
            .retain_mut(|enemy| enemy.update(dice, attacks) == EnemyStep::Alive);

        self.attacks.update();
        self.resolve_collisions();
        self.update_explosions();

        self.distance_traveled += 1;
        self.status
    }

    /// Test both ship hitboxes against enemies (rams) and collidable attacks
    /// (shots).  Everything that hits is removed before the next probe, so a
    /// single enemy or shot is never counted twice.
    pub fn resolve_collisions(&mut self) -> GameStatus {
        for probe in self.ship.hitboxes() {
            // Indices come back ascending; remove from the back.
            let rammed: Vec<Enemy> = overlapping(&probe, &self.enemies)
                .into_iter()
                .rev()
                .map(|i| self.enemies.remove(i))
                .collect();

            for id in self.attacks.hits(&probe) {
                if let Some(damage) = self.attacks.consume(id) {
                    self.apply_damage(damage, "shot");
                }
            }

            for enemy in rammed {
                self.explosions.push(Explosion::spawn(enemy.explosion_point()));
                self.apply_damage(enemy.mass, "ram");
            }
        }

        self.attacks.prune_consumed();
        self.status
    }

    fn apply_damage(&mut self, damage: i32, kind: &'static str) {
        if self.status == GameStatus::Destroyed {
            return;
        }
        let outcome = self.ship.take_damage(damage);
        debug!(
            kind,
            damage,
            shield = self.ship.shield_level,
            "ship hit"
        );
        if outcome == Damage::Destroyed {
            self.status = GameStatus::Destroyed;
            info!(distance = self.distance_traveled, "ship destroyed");
        }
    }

    fn update_explosions(&mut self) {
        for explosion in &mut self.explosions {
            explosion.advance();
        }
        self.explosions.retain(|e| !e.is_finished());
    }

    pub fn hud(&self) -> HudStatus {
        HudStatus::from_ship(&self.ship)
    }

    /// Issue the draw calls for one frame.
    pub fn draw(&self, renderer: &mut impl Renderer) -> io::Result<()> {
        renderer.clear()?;
        renderer.draw_ship(&self.ship)?;
        for attack in self.attacks.iter() {
            renderer.draw_attack(attack)?;
        }
        for explosion in &self.explosions {
            renderer.draw_explosion(explosion)?;
        }
        for enemy in &self.enemies {
            renderer.draw_enemy(enemy)?;
        }
        if self.show_hitboxes {
            for hitbox in self.ship.hitboxes() {
                renderer.draw_hitbox(&hitbox)?;
            }
            for enemy in &self.enemies {
                renderer.draw_hitbox(&enemy.hitbox())?;
            }
            for attack in self.attacks.iter() {
                renderer.draw_hitbox(&attack.hitbox)?;
            }
        }
        renderer.draw_hud(&self.hud())?;
        renderer.present()
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Frame budget and optional frame limit for [`run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Minimum wall time per frame; zero runs flat out.
    pub frame: Duration,
    pub max_frames: Option<u64>,
}

impl Pacing {
    pub fn realtime(fps: u32) -> Self {
        Pacing {
            frame: Duration::from_secs(1) / fps.max(1),
            max_frames: None,
        }
    }

    pub fn unthrottled() -> Self {
        Pacing {
            frame: Duration::ZERO,
            max_frames: None,
        }
    }

    pub fn with_max_frames(self, max_frames: Option<u64>) -> Self {
        Pacing { max_frames, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Destroyed,
    FrameLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub exit: Exit,
    pub frames: u64,
}

/// Run until the player quits, the ship is destroyed or the frame limit is
/// reached.  Quit is checked once per frame, before anything moves.
pub fn run(
    sim: &mut Simulation,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
    dice: &mut impl Dice,
    pacing: Pacing,
) -> io::Result<RunSummary> {
    let mut frames: u64 = 0;

    loop {
        if pacing.max_frames.is_some_and(|max| frames >= max) {
            return Ok(RunSummary {
                exit: Exit::FrameLimit,
                frames,
            });
        }
        let frame_start = Instant::now();

        for event in input.poll()? {
            if sim.handle(event) == Flow::Quit {
                info!(frames, "quit requested");
                return Ok(RunSummary {
                    exit: Exit::Quit,
                    frames,
                });
            }
        }

        let status = sim.step(dice);
        frames += 1;
        sim.draw(renderer)?;

        if status == GameStatus::Destroyed {
            return Ok(RunSummary {
                exit: Exit::Destroyed,
                frames,
            });
        }

        let elapsed = frame_start.elapsed();
        if elapsed < pacing.frame {
            thread::sleep(pacing.frame - elapsed);
        }
    }
}
