//! Data-driven run configuration
//!
//! Everything the surrounding app decides before a run starts lands here:
//! the selected character's ability bundle, the VIP flag and the starting
//! biome. The simulation treats these as opaque multipliers on its base
//! constants and never computes them itself.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Per-character ability modifiers, expressed as fractional bonuses
/// (0.1 = +10%). `coin_yield` is the base coin value instead, so the
/// default character banks exactly one coin per pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Abilities {
    /// Bonus on the maximum scroll speed
    pub speed: f32,
    /// Base value of a collected coin
    pub coin_yield: f32,
    /// Bonus on the jump impulse
    pub jump_power: f32,
    /// Bonus on the shield effect duration
    pub shield_duration: f32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            speed: 0.0,
            coin_yield: 1.0,
            jump_power: 0.0,
            shield_duration: 0.0,
        }
    }
}

/// Immutable configuration for one run, supplied at `start`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub abilities: Abilities,
    /// VIP subscribers bank double coin value
    pub vip: bool,
    /// Biome the run begins in (cosmetic, clamped to the biome table)
    pub start_biome: u32,
}

impl RunConfig {
    /// Effective jump impulse (negative, y grows down)
    pub fn jump_impulse(&self) -> f32 {
        JUMP_IMPULSE * (1.0 + self.abilities.jump_power.max(0.0))
    }

    /// Effective scroll speed cap
    pub fn max_speed(&self) -> f32 {
        MAX_SPEED * (1.0 + self.abilities.speed.max(0.0))
    }

    /// Effective shield duration in ticks
    pub fn shield_duration(&self) -> u32 {
        (POWERUP_DURATION as f32 * (1.0 + self.abilities.shield_duration.max(0.0))) as u32
    }

    /// Coins banked per pickup, after abilities and VIP
    pub fn coin_value(&self) -> u32 {
        let vip = if self.vip { 2.0 } else { 1.0 };
        (self.abilities.coin_yield.max(0.0) * vip).round().max(1.0) as u32
    }
}
