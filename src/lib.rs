//! Simulation core of a vertical scrolling shooter.
//!
//! Everything in this crate is pure game logic: entity motion, enemy
//! behaviour, collision resolution and the frame loop.  Drawing and input
//! are reached only through the [`render::Renderer`] and
//! [`input::InputSource`] traits, implemented by the binary.

pub mod attacks;
pub mod compute;
pub mod dice;
pub mod enemies;
pub mod explosion;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod render;
pub mod ship;

/// Logical screen width; every calibration offset is expressed in this space.
pub const SCREEN_WIDTH: f32 = 800.0;
/// Logical screen height.
pub const SCREEN_HEIGHT: f32 = 600.0;
