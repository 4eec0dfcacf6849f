//! Drawing seam.  The core decides what is on screen and where; an
//! implementation decides what it looks like.

use std::io;

use crate::attacks::Attack;
use crate::enemies::Enemy;
use crate::explosion::Explosion;
use crate::geometry::Hitbox;
use crate::hud::HudStatus;
use crate::ship::Ship;

pub trait Renderer {
    /// Start a new frame.
    fn clear(&mut self) -> io::Result<()>;
    fn draw_ship(&mut self, ship: &Ship) -> io::Result<()>;
    fn draw_enemy(&mut self, enemy: &Enemy) -> io::Result<()>;
    fn draw_attack(&mut self, attack: &Attack) -> io::Result<()>;
    fn draw_explosion(&mut self, explosion: &Explosion) -> io::Result<()>;
    /// Calibration overlay; ignored unless a renderer cares.
    fn draw_hitbox(&mut self, _hitbox: &Hitbox) -> io::Result<()> {
        Ok(())
    }
    fn draw_hud(&mut self, hud: &HudStatus) -> io::Result<()>;
    /// Flip the finished frame onto the screen.
    fn present(&mut self) -> io::Result<()>;
}

/// Draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn draw_ship(&mut self, _ship: &Ship) -> io::Result<()> {
        Ok(())
    }

    fn draw_enemy(&mut self, _enemy: &Enemy) -> io::Result<()> {
        Ok(())
    }

    fn draw_attack(&mut self, _attack: &Attack) -> io::Result<()> {
        Ok(())
    }

    fn draw_explosion(&mut self, _explosion: &Explosion) -> io::Result<()> {
        Ok(())
    }

    fn draw_hud(&mut self, _hud: &HudStatus) -> io::Result<()> {
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}
