//! Terminal renderer. All screen I/O lives here.
//!
//! The simulation works in an 800×600 pixel space; this module scales that
//! space onto whatever terminal grid is available and draws each entity as
//! a few glyphs.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use star_shooter::attacks::{Attack, AttackKind, Tint};
use star_shooter::enemies::{Enemy, EnemyKind};
use star_shooter::explosion::Explosion;
use star_shooter::geometry::{DisplayRect, Hitbox};
use star_shooter::hud::HudStatus;
use star_shooter::render::Renderer;
use star_shooter::ship::Ship;
use star_shooter::{SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HUD_BOOST: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_SHIELD: Color = Color::Rgb { r: 51, g: 92, b: 214 };
const C_SHIELD_FULL: Color = Color::White;
const C_ENEMY_BASIC: Color = Color::Green;
const C_ENEMY_FIGHTER: Color = Color::Red;
const C_ATTACK_RED: Color = Color::Red;
const C_ATTACK_BLUE: Color = Color::Blue;
const C_EXPLOSION: Color = Color::Yellow;
const C_HITBOX: Color = Color::Green;

const EXPLOSION_GLYPHS: [&str; 4] = ["✺", "✶", "*", "·"];

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(TerminalRenderer { out, cols, rows })
    }

    /// Rows 1..rows-2 are the play area; row 0 and the last row are chrome.
    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(3).max(1)
    }

    fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    /// Map a screen pixel onto a terminal cell, if it is on screen.
    fn cell(&self, (x, y): (i32, i32)) -> Option<(u16, u16)> {
        let (x, y) = (x as f32, y as f32);
        if !(0.0..SCREEN_WIDTH).contains(&x) || !(0.0..SCREEN_HEIGHT).contains(&y) {
            return None;
        }
        let col = 1 + (x / SCREEN_WIDTH * self.play_cols() as f32) as u16;
        let row = 2 + (y / SCREEN_HEIGHT * self.play_rows() as f32) as u16;
        Some((col, row))
    }

    fn put(&mut self, at: (u16, u16), color: Color, glyph: &str) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(at.0, at.1))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    /// Glyph string centred on a display rect.
    fn put_centered(&mut self, rect: DisplayRect, color: Color, glyph: &str) -> std::io::Result<()> {
        if let Some((col, row)) = self.cell(rect.center()) {
            let half = glyph.chars().count() as u16 / 2;
            self.put((col.saturating_sub(half).max(1), row), color, glyph)?;
        }
        Ok(())
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    /// Final-frame overlay shown after the ship is destroyed.
    pub fn draw_game_over(&mut self, distance: u64) -> std::io::Result<()> {
        let lines: [(String, Color); 5] = [
            ("╔════════════════════╗".to_string(), Color::Red),
            ("║    GAME  OVER      ║".to_string(), Color::Red),
            ("╚════════════════════╝".to_string(), Color::Red),
            (format!("Distance: {distance:>6}"), Color::Yellow),
            ("Press any key".to_string(), Color::White),
        ];

        let cx = self.cols / 2;
        let start_row = (self.rows / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (msg, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.put((col, start_row + i as u16), *color, msg)?;
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw_ship(&mut self, ship: &Ship) -> std::io::Result<()> {
        // Sprite (2 rows, 3 cols), centred on the ship image:
        //   ▲
        //  /█\
        let Some((col, row)) = self.cell(ship.display_rect().center()) else {
            return Ok(());
        };

        self.put((col, row), C_PLAYER, "▲")?;
        if row + 1 < self.rows.saturating_sub(2) {
            self.put((col.saturating_sub(1).max(1), row + 1), C_PLAYER, "/█\\")?;
        }

        if ship.shield.is_visible() {
            let color = if ship.shield.white_width > 0 {
                C_SHIELD_FULL
            } else {
                C_SHIELD
            };
            let (left, right) = match ship.shield.ring_width {
                1 => ("(", ")"),
                2 => ("((", "))"),
                _ => ("(((", ")))"),
            };
            let lw = left.chars().count() as u16;
            self.put((col.saturating_sub(1 + lw).max(1), row + 1), color, left)?;
            self.put((col + 2, row + 1), color, right)?;
        }
        Ok(())
    }

    fn draw_enemy(&mut self, enemy: &Enemy) -> std::io::Result<()> {
        let (glyph, color) = match enemy.kind {
            EnemyKind::Basic => ("«▼»", C_ENEMY_BASIC),
            EnemyKind::Fighter => ("(◎)", C_ENEMY_FIGHTER),
        };
        self.put_centered(enemy.display_rect(), color, glyph)
    }

    fn draw_attack(&mut self, attack: &Attack) -> std::io::Result<()> {
        let glyph = match attack.kind {
            AttackKind::Straight => "│",
            AttackKind::Angled if attack.angle > 0.0 => "╲",
            AttackKind::Angled => "╱",
            AttackKind::Heavy => "┃",
        };
        let color = match attack.tint {
            Tint::Red => C_ATTACK_RED,
            Tint::Blue => C_ATTACK_BLUE,
        };
        self.put_centered(attack.display_rect(), color, glyph)
    }

    fn draw_explosion(&mut self, explosion: &Explosion) -> std::io::Result<()> {
        let index = (explosion.frame_index() / 5).clamp(0, 3) as usize;
        self.put_centered(explosion.display_rect(), C_EXPLOSION, EXPLOSION_GLYPHS[index])
    }

    fn draw_hitbox(&mut self, hitbox: &Hitbox) -> std::io::Result<()> {
        for corner in hitbox.display_rect().corners() {
            if let Some(at) = self.cell(corner) {
                self.put(at, C_HITBOX, "+")?;
            }
        }
        Ok(())
    }

    fn draw_hud(&mut self, hud: &HudStatus) -> std::io::Result<()> {
        let [energy, shield, overdrive] = hud.fields();
        let row = self.rows.saturating_sub(1);

        self.put((1, row), C_HUD, &energy)?;
        self.put((16, row), C_HUD, &shield)?;
        let color = if hud.overdrive { C_HUD_BOOST } else { C_HUD };
        self.put((36, row), color, &overdrive)?;

        self.put(
            (1, 0),
            Color::DarkGrey,
            "← ↑ → ↓ : Move   D/A : Shield +/-   W : Overdrive   Q : Quit",
        )
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
