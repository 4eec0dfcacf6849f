//! Cosmetic explosion left behind by a destroyed enemy.
//!
//! The animation is a 40×40 window sliding over a sheet of frames: four
//! frames per row, moving down a row every four ticks.

use crate::geometry::DisplayRect;

pub const DURATION: i32 = 20;
pub const WINDOW_SIZE: (i32, i32) = (40, 40);
pub const FIRST_FRAME: (i32, i32) = (-20, -10);
const COLUMN_STEP: i32 = 80;
const ROW_STEP: i32 = 60;
const ROW_END: i32 = -320;

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub position: (f32, f32),
    /// Offset of the sheet under the window.
    pub frame_offset: (i32, i32),
    pub ticks_remaining: i32,
}

impl Explosion {
    pub fn new(position: (f32, f32)) -> Self {
        Explosion {
            position,
            frame_offset: FIRST_FRAME,
            ticks_remaining: DURATION,
        }
    }

    /// Explosion as it appears in play: the first frame is shown the moment it
    /// is created, so the window has already stepped once.
    pub fn spawn(position: (f32, f32)) -> Self {
        let mut explosion = Explosion::new(position);
        explosion.advance();
        explosion
    }

    /// Step the animation one frame.
    pub fn advance(&mut self) {
        self.ticks_remaining -= 1;

        self.frame_offset.0 -= COLUMN_STEP;
        if self.frame_offset.0 < ROW_END {
            self.frame_offset.0 = FIRST_FRAME.0;
        }
        if self.ticks_remaining % 4 == 0 {
            self.frame_offset.1 -= ROW_STEP;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ticks_remaining <= 0
    }

    pub fn display_rect(&self) -> DisplayRect {
        DisplayRect::at(self.position, WINDOW_SIZE.0, WINDOW_SIZE.1)
    }

    /// 0-based frame index into the sheet, for renderers without images.
    pub fn frame_index(&self) -> i32 {
        DURATION - self.ticks_remaining
    }
}
