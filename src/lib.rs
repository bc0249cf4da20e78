//! Neon Rush - an endless-runner arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `tuning`: Data-driven run configuration (character abilities, VIP, biome)
//! - `settings`: Player preferences with JSON persistence
//! - `highscores`: Local leaderboard with JSON persistence
//!
//! Rendering, audio and backend services are external collaborators: they
//! read the simulation snapshot and the per-tick event list, and feed input
//! back through [`sim::TickInput`] and the state's action methods.

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz logical rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 6;

    /// Visible world width; screen-style coordinates, y grows downward
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 400.0;
    /// Ground line entities stand on
    pub const GROUND_Y: f32 = 320.0;

    /// Player box; x never changes, the world scrolls instead
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Gravity per tick (positive pulls toward the floor)
    pub const GRAVITY: f32 = 0.8;
    /// Upward jump impulse
    pub const JUMP_IMPULSE: f32 = -15.0;

    /// Scroll speed ramp: starts at BASE_SPEED, creeps to MAX_SPEED
    pub const BASE_SPEED: f32 = 5.0;
    pub const MAX_SPEED: f32 = 14.0;
    pub const SPEED_RAMP: f32 = 0.002;

    /// Entities enter at SPAWN_X and are pruned once left of PRUNE_X
    pub const SPAWN_X: f32 = 850.0;
    pub const PRUNE_X: f32 = -100.0;

    /// Spawn cadence in ticks (base + jitter drawn per reset)
    pub const OBSTACLE_INTERVAL: u32 = 90;
    /// Obstacle interval floor so spawn density stays reactable
    pub const OBSTACLE_INTERVAL_MIN: u32 = 40;
    pub const OBSTACLE_JITTER: u32 = 50;
    pub const COIN_INTERVAL: u32 = 55;
    pub const COIN_JITTER: u32 = 45;
    pub const POWERUP_INTERVAL: u32 = 600;
    pub const POWERUP_JITTER: u32 = 480;

    /// Trailing spike offset for the double-spike draw
    pub const DOUBLE_SPIKE_GAP: f32 = 45.0;
    /// Vertical bounce speed of the oscillating obstacle
    pub const MOVING_OBSTACLE_SPEED: f32 = 2.0;

    /// Pickup boxes
    pub const COIN_SIZE: f32 = 20.0;
    pub const POWERUP_SIZE: f32 = 28.0;
    /// Coin spin animation advance per tick
    pub const COIN_SPIN_RATE: f32 = 0.15;

    /// Inward hitbox padding on lethal collisions (near-miss forgiveness)
    pub const HITBOX_PADDING: f32 = 6.0;

    /// Power-up effect duration in ticks (5 s at 60 Hz)
    pub const POWERUP_DURATION: u32 = 300;
    /// Score multiplier while the multiplier effect runs
    pub const MULTIPLIER_BONUS: f32 = 2.0;

    /// Magnet capture radius and per-tick pull step
    pub const MAGNET_RADIUS: f32 = 120.0;
    pub const MAGNET_PULL: f32 = 6.0;

    /// Score gained per tick is speed * SCORE_RATE * multiplier
    pub const SCORE_RATE: f32 = 0.2;
    pub const COIN_SCORE: f32 = 10.0;
    pub const PASS_SCORE: f32 = 5.0;
    /// Distance gained per tick is speed * DISTANCE_RATE
    pub const DISTANCE_RATE: f32 = 0.1;

    /// Biome rollover distance and biome count (cosmetic only)
    pub const BIOME_DISTANCE_STEP: f32 = 500.0;
    pub const BIOME_COUNT: u32 = 5;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;
    pub const PARTICLE_GRAVITY: f32 = 0.15;
    pub const PARTICLE_DECAY: f32 = 0.03;
}
