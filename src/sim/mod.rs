//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies
//! - Consumers get a read-only snapshot plus the per-tick event list, and
//!   act through [`TickInput`] and the state's action methods

pub mod collision;
pub mod effects;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, in_magnet_range, magnet_step};
pub use effects::{ActiveEffects, ActivePowerUp};
pub use spawn::{SpawnClock, SpawnDecisions, Spawner};
pub use state::{
    Coin, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Particle, Player, PowerUp,
    PowerUpKind,
};
pub use tick::{TickInput, tick};
