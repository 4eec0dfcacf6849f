//! HUD text.  Formatting is core state; drawing the text is the renderer's job.

use std::fmt;

use crate::ship::{Ship, MAX_ENERGY, MAX_SHIELD};

/// A gauge that reads `MAX` once full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gauge {
    Value(i32),
    Max,
}

impl Gauge {
    fn new(value: i32, max: i32) -> Self {
        if value >= max {
            Gauge::Max
        } else {
            Gauge::Value(value)
        }
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gauge::Value(v) => write!(f, "{v}"),
            Gauge::Max => write!(f, "MAX"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudStatus {
    pub energy: Gauge,
    pub shield: Gauge,
    pub overdrive: bool,
}

impl HudStatus {
    pub fn new(energy: i32, shield_level: i32, boost: f32) -> Self {
        HudStatus {
            energy: Gauge::new(energy, MAX_ENERGY),
            shield: Gauge::new(shield_level, MAX_SHIELD),
            // Any multiplier other than 1 counts as a boost.
            overdrive: boost != 1.0,
        }
    }

    pub fn from_ship(ship: &Ship) -> Self {
        HudStatus::new(ship.energy, ship.shield_level, ship.boost)
    }

    pub fn energy_text(&self) -> String {
        format!("Energy: {}", self.energy)
    }

    pub fn shield_text(&self) -> String {
        format!("Shield Level: {}", self.shield)
    }

    pub fn overdrive_text(&self) -> String {
        let state = if self.overdrive { "Enabled" } else { "Disabled" };
        format!("Overdrive:  {state}")
    }

    /// The three fields, left to right.
    pub fn fields(&self) -> [String; 3] {
        [self.energy_text(), self.shield_text(), self.overdrive_text()]
    }
}
