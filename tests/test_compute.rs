use std::collections::VecDeque;
use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;

use star_shooter::attacks::{Attack, Launch};
use star_shooter::compute::*;
use star_shooter::dice::{RngDice, ScriptedDice};
use star_shooter::enemies::{Enemy, EnemyKind, Lifecycle, Spawner};
use star_shooter::explosion::Explosion;
use star_shooter::geometry::Hitbox;
use star_shooter::hud::HudStatus;
use star_shooter::input::{Idle, InputEvent, InputSource, Key};
use star_shooter::render::{NullRenderer, Renderer};
use star_shooter::ship::Ship;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Simulation with spawning switched off.
fn quiet_sim() -> Simulation {
    let mut sim = Simulation::new();
    sim.spawner = Spawner {
        interval: 0,
        ..Spawner::default()
    };
    sim
}

fn enemy_at(kind: EnemyKind, position: (f32, f32)) -> Enemy {
    let mut e = Enemy::new(kind, position.0);
    e.position = position;
    e.state = Lifecycle::Active;
    e
}

/// Fire a shot and park its hitbox on `center`.
fn shot_at(sim: &mut Simulation, launch: Launch, center: (f32, f32)) {
    let id = sim.attacks.fire(launch);
    let attack = sim.attacks.get_mut(id).unwrap();
    let dx = center.0 - attack.hitbox.center.0;
    let dy = center.1 - attack.hitbox.center.1;
    attack.position = (attack.position.0 + dx, attack.position.1 + dy);
    attack.hitbox.center = center;
}

/// Replays one batch of events per frame.
struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        ScriptedInput {
            frames: frames.into(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
struct RecordingRenderer {
    clears: usize,
    ships: usize,
    enemies: usize,
    attacks: usize,
    explosions: usize,
    hitboxes: usize,
    huds: Vec<HudStatus>,
    presents: usize,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
    fn draw_ship(&mut self, _ship: &Ship) -> io::Result<()> {
        self.ships += 1;
        Ok(())
    }
    fn draw_enemy(&mut self, _enemy: &Enemy) -> io::Result<()> {
        self.enemies += 1;
        Ok(())
    }
    fn draw_attack(&mut self, _attack: &Attack) -> io::Result<()> {
        self.attacks += 1;
        Ok(())
    }
    fn draw_explosion(&mut self, _explosion: &Explosion) -> io::Result<()> {
        self.explosions += 1;
        Ok(())
    }
    fn draw_hitbox(&mut self, _hitbox: &Hitbox) -> io::Result<()> {
        self.hitboxes += 1;
        Ok(())
    }
    fn draw_hud(&mut self, hud: &HudStatus) -> io::Result<()> {
        self.huds.push(*hud);
        Ok(())
    }
    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

// ── Collision pass ────────────────────────────────────────────────────────────

#[test]
fn ram_removes_enemy_and_spawns_explosion() {
    let mut sim = quiet_sim();
    sim.ship.shield_level = 5;
    let center = sim.ship.vertical_hitbox.center;
    let enemy = enemy_at(EnemyKind::Fighter, center);
    let expected = enemy.explosion_point();
    sim.enemies.push(enemy);

    assert_eq!(sim.resolve_collisions(), GameStatus::Playing);
    assert!(sim.enemies.is_empty());
    assert_eq!(sim.explosions.len(), 1);
    assert_eq!(sim.explosions[0].position, expected);
    assert_eq!(sim.explosions[0].position, (center.0 - 15.0, center.1 - 12.0));
    assert_eq!(sim.ship.shield_level, 3);
}

#[test]
fn enemy_touching_both_hitboxes_counts_once() {
    let mut sim = quiet_sim();
    sim.ship.shield_level = 5;
    // Where the fuselage and wing strips cross.
    let center = sim.ship.horizontal_hitbox.center;
    sim.enemies.push(enemy_at(EnemyKind::Basic, center));

    sim.resolve_collisions();
    assert_eq!(sim.explosions.len(), 1);
    assert_eq!(sim.ship.shield_level, 4);
}

#[test]
fn distant_enemy_is_left_alone() {
    let mut sim = quiet_sim();
    sim.enemies.push(enemy_at(EnemyKind::Basic, (50.0, 50.0)));

    sim.resolve_collisions();
    assert_eq!(sim.enemies.len(), 1);
    assert!(sim.explosions.is_empty());
}

#[test]
fn only_overlapping_enemies_are_removed() {
    let mut sim = quiet_sim();
    sim.ship.shield_level = 5;
    let center = sim.ship.vertical_hitbox.center;
    sim.enemies.push(enemy_at(EnemyKind::Basic, (50.0, 50.0)));
    sim.enemies.push(enemy_at(EnemyKind::Basic, center));
    sim.enemies.push(enemy_at(EnemyKind::Basic, (700.0, 50.0)));

    sim.resolve_collisions();
    let xs: Vec<f32> = sim.enemies.iter().map(|e| e.position.0).collect();
    assert_eq!(xs, vec![50.0, 700.0]);
}

#[test]
fn shot_hit_consumes_hitbox_and_drops_attack() {
    let mut sim = quiet_sim();
    sim.ship.shield_level = 5;
    let center = sim.ship.vertical_hitbox.center;
    shot_at(&mut sim, Launch::heavy((0.0, 0.0)), center);

    sim.resolve_collisions();
    assert_eq!(sim.ship.shield_level, 3);
    assert!(sim.attacks.is_empty());
    assert_eq!(sim.attacks.collidable_len(), 0);
}

#[test]
fn shot_across_both_hitboxes_counts_once() {
    let mut sim = quiet_sim();
    sim.ship.shield_level = 5;
    let center = sim.ship.horizontal_hitbox.center;
    shot_at(&mut sim, Launch::straight((0.0, 0.0)), center);

    sim.resolve_collisions();
    assert_eq!(sim.ship.shield_level, 4);
}

#[test]
fn disabled_collisions_let_shots_pass() {
    let mut sim = quiet_sim();
    sim.attacks.set_collisions(false);
    let center = sim.ship.vertical_hitbox.center;
    shot_at(&mut sim, Launch::straight((0.0, 0.0)), center);

    assert_eq!(sim.resolve_collisions(), GameStatus::Playing);
    assert_eq!(sim.attacks.len(), 1);
}

#[test]
fn unshielded_hit_destroys_ship() {
    let mut sim = quiet_sim();
    let center = sim.ship.vertical_hitbox.center;
    shot_at(&mut sim, Launch::straight((0.0, 0.0)), center);

    assert_eq!(sim.resolve_collisions(), GameStatus::Destroyed);
    assert_eq!(sim.status, GameStatus::Destroyed);
}

#[test]
fn destruction_is_latched() {
    let mut sim = quiet_sim();
    let center = sim.ship.vertical_hitbox.center;
    shot_at(&mut sim, Launch::straight((0.0, 0.0)), center);
    sim.enemies.push(enemy_at(EnemyKind::Basic, (50.0, 50.0)));
    sim.resolve_collisions();

    let distance = sim.distance_traveled;
    assert_eq!(sim.step(&mut ScriptedDice::default()), GameStatus::Destroyed);
    assert_eq!(sim.distance_traveled, distance);
    assert_eq!(sim.enemies[0].position, (50.0, 50.0));
}

// ── Step ──────────────────────────────────────────────────────────────────────

#[test]
fn energy_regenerates_once_per_period() {
    let mut sim = quiet_sim();
    sim.ship.energy = 10;
    let mut dice = ScriptedDice::default();

    for _ in 0..200 {
        sim.step(&mut dice);
    }
    assert_eq!(sim.ship.energy, 10 + 200 / 65);
}

#[test]
fn energy_regeneration_caps_at_max() {
    let mut sim = quiet_sim();
    sim.ship.energy = 99;
    let mut dice = ScriptedDice::default();

    for _ in 0..300 {
        sim.step(&mut dice);
    }
    assert_eq!(sim.ship.energy, 100);
}

#[test]
fn no_spawns_during_startup_delay() {
    let mut sim = Simulation::new();
    sim.spawner.interval = 5;
    let mut dice = ScriptedDice::default();

    for _ in 0..STARTUP_DELAY {
        sim.step(&mut dice);
    }
    assert!(sim.enemies.is_empty());

    for _ in 0..5 {
        sim.step(&mut dice);
    }
    assert_eq!(sim.enemies.len(), 1);
}

#[test]
fn first_default_spawn_on_interval() {
    let mut sim = Simulation::new();
    let mut dice = ScriptedDice::default();

    for _ in 0..74 {
        sim.step(&mut dice);
    }
    assert!(sim.enemies.is_empty());
    sim.step(&mut dice);
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.enemies[0].position.0, 10.0);
}

#[test]
fn enemy_shot_is_fired_and_flies_in_same_frame() {
    let mut sim = quiet_sim();
    let mut enemy = enemy_at(EnemyKind::Basic, (100.0, 100.0));
    enemy.cooldown_remaining = 0;
    sim.enemies.push(enemy);

    sim.step(&mut ScriptedDice::new([100]));
    assert_eq!(sim.attacks.len(), 1);
    let shot = sim.attacks.iter().next().unwrap();
    // Fired from the enemy's advanced position, then moved once.
    assert_eq!(shot.position.0, 85.0);
    assert!((shot.position.1 - (100.5 - 7.0 + 7.7)).abs() < 1e-3);
}

#[test]
fn explosions_play_out_and_vanish() {
    let mut sim = quiet_sim();
    sim.explosions.push(Explosion::new((100.0, 100.0)));
    let mut dice = ScriptedDice::default();

    for _ in 0..19 {
        sim.step(&mut dice);
    }
    assert_eq!(sim.explosions.len(), 1);
    sim.step(&mut dice);
    assert!(sim.explosions.is_empty());
}

#[test]
fn rammed_enemy_explosion_steps_twice_on_first_frame() {
    let mut sim = quiet_sim();
    sim.ship.shield_level = 5;
    let center = sim.ship.vertical_hitbox.center;
    sim.enemies.push(enemy_at(EnemyKind::Basic, center));
    let mut dice = ScriptedDice::default();

    sim.step(&mut dice);
    assert_eq!(sim.explosions.len(), 1);
    assert_eq!(sim.explosions[0].ticks_remaining, 18);
    assert_eq!(sim.explosions[0].frame_offset, (-180, -10));

    for _ in 0..17 {
        sim.step(&mut dice);
    }
    assert_eq!(sim.explosions.len(), 1);
    sim.step(&mut dice);
    assert!(sim.explosions.is_empty());
}

#[test]
fn held_key_moves_until_released() {
    let mut sim = quiet_sim();
    let mut dice = ScriptedDice::default();

    sim.handle(InputEvent::KeyDown(Key::Right));
    sim.step(&mut dice);
    sim.step(&mut dice);
    assert_eq!(sim.ship.position.0, 353.0);

    sim.handle(InputEvent::KeyUp(Key::Right));
    sim.step(&mut dice);
    assert_eq!(sim.ship.position.0, 353.0);
}

#[test]
fn seeded_runs_are_reproducible() {
    let play = || {
        let mut sim = Simulation::new();
        sim.ship.shield_level = 5;
        let mut dice = RngDice(StdRng::seed_from_u64(42));
        for _ in 0..1500 {
            sim.step(&mut dice);
        }
        (
            sim.enemies.len(),
            sim.attacks.len(),
            sim.ship.shield_level,
            sim.status,
        )
    };
    assert_eq!(play(), play());
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[test]
fn run_stops_at_frame_limit() {
    let mut sim = quiet_sim();
    sim.ship.energy = 0;
    let pacing = Pacing::unthrottled().with_max_frames(Some(130));

    let summary = run(
        &mut sim,
        &mut Idle,
        &mut NullRenderer,
        &mut ScriptedDice::default(),
        pacing,
    )
    .unwrap();
    assert_eq!(summary.exit, Exit::FrameLimit);
    assert_eq!(summary.frames, 130);
    assert_eq!(sim.ship.energy, 2);
}

#[test]
fn quit_short_circuits_before_update() {
    let mut sim = quiet_sim();
    let mut input = ScriptedInput::new(vec![vec![
        InputEvent::KeyDown(Key::Left),
        InputEvent::Quit,
    ]]);
    let mut renderer = RecordingRenderer::default();

    let summary = run(
        &mut sim,
        &mut input,
        &mut renderer,
        &mut ScriptedDice::default(),
        Pacing::unthrottled(),
    )
    .unwrap();
    assert_eq!(summary.exit, Exit::Quit);
    assert_eq!(summary.frames, 0);
    assert_eq!(sim.distance_traveled, 1);
    assert_eq!(sim.ship.position, (345.0, 400.0));
    assert_eq!(renderer.presents, 0);
}

#[test]
fn run_ends_on_destruction() {
    let mut sim = quiet_sim();
    let center = sim.ship.vertical_hitbox.center;
    shot_at(&mut sim, Launch::straight((0.0, 0.0)), center);
    let mut renderer = RecordingRenderer::default();

    let summary = run(
        &mut sim,
        &mut Idle,
        &mut renderer,
        &mut ScriptedDice::default(),
        Pacing::unthrottled(),
    )
    .unwrap();
    assert_eq!(summary.exit, Exit::Destroyed);
    assert_eq!(summary.frames, 1);
    assert_eq!(renderer.presents, 1);
}

#[test]
fn action_keys_reach_the_ship() {
    let mut sim = quiet_sim();
    let mut input = ScriptedInput::new(vec![
        vec![InputEvent::KeyDown(Key::ShieldUp)],
        vec![InputEvent::KeyDown(Key::Overdrive)],
    ]);
    let mut renderer = RecordingRenderer::default();

    run(
        &mut sim,
        &mut input,
        &mut renderer,
        &mut ScriptedDice::default(),
        Pacing::unthrottled().with_max_frames(Some(2)),
    )
    .unwrap();
    assert_eq!(sim.ship.shield_level, 1);
    assert_eq!(sim.ship.energy, 55);
    assert!(sim.ship.is_boosted());
    assert!(renderer.huds[1].overdrive);
}

#[test]
fn each_frame_draws_everything_once() {
    let mut sim = quiet_sim();
    sim.show_hitboxes = true;
    sim.enemies.push(enemy_at(EnemyKind::Basic, (50.0, 50.0)));
    sim.attacks.fire(Launch::straight((600.0, 50.0)));
    let mut renderer = RecordingRenderer::default();

    run(
        &mut sim,
        &mut Idle,
        &mut renderer,
        &mut ScriptedDice::default(),
        Pacing::unthrottled().with_max_frames(Some(3)),
    )
    .unwrap();
    assert_eq!(renderer.clears, 3);
    assert_eq!(renderer.ships, 3);
    assert_eq!(renderer.enemies, 3);
    assert_eq!(renderer.attacks, 3);
    assert_eq!(renderer.explosions, 0);
    assert_eq!(renderer.hitboxes, 3 * 4);
    assert_eq!(renderer.huds.len(), 3);
    assert_eq!(renderer.presents, 3);
}
