//! Timed power-up effect registry
//!
//! At most one entry per effect kind. Re-collecting a kind refreshes its
//! clock to the new duration, it never stacks.

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;
use crate::consts::MULTIPLIER_BONUS;

/// A single running effect instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Remaining duration in ticks
    pub remaining: u32,
}

/// All running effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub entries: Vec<ActivePowerUp>,
}

impl ActiveEffects {
    /// Start an effect, or refresh its clock if the kind is already running
    pub fn activate(&mut self, kind: PowerUpKind, duration: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.kind == kind) {
            entry.remaining = duration;
        } else {
            self.entries.push(ActivePowerUp {
                kind,
                remaining: duration,
            });
        }
    }

    /// Decrement every entry by one tick, dropping the ones that ran out.
    /// Returns the expired kinds.
    pub fn tick_down(&mut self) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining = entry.remaining.saturating_sub(1);
            if entry.remaining == 0 {
                expired.push(entry.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Remove an effect outright (shield absorption). Returns whether it
    /// was running.
    pub fn consume(&mut self, kind: PowerUpKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.kind != kind);
        self.entries.len() != before
    }

    pub fn has(&self, kind: PowerUpKind) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }

    pub fn has_shield(&self) -> bool {
        self.has(PowerUpKind::Shield)
    }

    pub fn has_magnet(&self) -> bool {
        self.has(PowerUpKind::Magnet)
    }

    /// 2x while a multiplier effect runs, 1x otherwise
    pub fn score_multiplier(&self) -> f32 {
        if self.has(PowerUpKind::Multiplier) {
            MULTIPLIER_BONUS
        } else {
            1.0
        }
    }

    /// Remaining ticks of a kind, 0 when not running
    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_refreshes_instead_of_stacking() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Shield, 300);
        for _ in 0..100 {
            effects.tick_down();
        }
        assert_eq!(effects.remaining(PowerUpKind::Shield), 200);

        effects.activate(PowerUpKind::Shield, 300);
        assert_eq!(effects.entries.len(), 1);
        assert_eq!(effects.remaining(PowerUpKind::Shield), 300);
    }

    #[test]
    fn effects_expire_at_zero() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Magnet, 3);
        assert!(effects.has_magnet());
        assert!(effects.tick_down().is_empty());
        assert!(effects.tick_down().is_empty());
        let expired = effects.tick_down();
        assert_eq!(expired, vec![PowerUpKind::Magnet]);
        assert!(!effects.has_magnet());
        assert!(effects.entries.is_empty());
    }

    #[test]
    fn distinct_kinds_run_independently() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Shield, 10);
        effects.activate(PowerUpKind::Multiplier, 5);
        assert_eq!(effects.entries.len(), 2);
        assert_eq!(effects.score_multiplier(), MULTIPLIER_BONUS);

        for _ in 0..5 {
            effects.tick_down();
        }
        assert_eq!(effects.score_multiplier(), 1.0);
        assert!(effects.has_shield());
    }

    #[test]
    fn consume_removes_a_running_effect() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Shield, 300);
        assert!(effects.consume(PowerUpKind::Shield));
        assert!(!effects.has_shield());
        assert!(!effects.consume(PowerUpKind::Shield));
    }
}
