//! Entity factories and spawn scheduling
//!
//! Factories are pure given an id and the run RNG: they pick a kind, a
//! spawn height and (for the oscillating obstacle) a bounce band, always
//! entering the world at the right edge. The spawner owns three
//! independent tick clocks whose thresholds are base-plus-jitter; the
//! obstacle clock tightens as the world speeds up.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Coin, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::consts::*;

/// Weighted obstacle kind table; every kind stays reachable
const OBSTACLE_WEIGHTS: [(ObstacleKind, u32); 5] = [
    (ObstacleKind::Spike, 30),
    (ObstacleKind::Block, 25),
    (ObstacleKind::Flying, 20),
    (ObstacleKind::DoubleSpike, 15),
    (ObstacleKind::Moving, 10),
];

/// Draw an obstacle kind by cumulative weight
pub fn roll_obstacle_kind(rng: &mut Pcg32) -> ObstacleKind {
    let total: u32 = OBSTACLE_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for (kind, weight) in OBSTACLE_WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    ObstacleKind::Spike
}

/// Build a freshly rolled obstacle at the spawn edge
pub fn make_obstacle(id: u32, rng: &mut Pcg32) -> Obstacle {
    let kind = roll_obstacle_kind(rng);
    make_obstacle_of(id, kind, rng)
}

/// Build an obstacle of a specific kind at the spawn edge
pub fn make_obstacle_of(id: u32, kind: ObstacleKind, rng: &mut Pcg32) -> Obstacle {
    let (size, y, vel_y, min_y, max_y) = match kind {
        ObstacleKind::Spike | ObstacleKind::DoubleSpike => {
            let size = Vec2::new(30.0, 40.0);
            (size, GROUND_Y - size.y, 0.0, 0.0, 0.0)
        }
        ObstacleKind::Block => {
            let size = Vec2::new(44.0, 44.0);
            (size, GROUND_Y - size.y, 0.0, 0.0, 0.0)
        }
        ObstacleKind::Flying => {
            let size = Vec2::new(40.0, 30.0);
            // Floats in a band the player can duck... no ducking here, so
            // high enough to run under at full height
            let y = GROUND_Y - size.y - rng.random_range(60.0..140.0);
            (size, y, 0.0, 0.0, 0.0)
        }
        ObstacleKind::Moving => {
            let size = Vec2::new(40.0, 40.0);
            let top = GROUND_Y - size.y - rng.random_range(90.0..160.0);
            let bottom = GROUND_Y - size.y - rng.random_range(0.0..40.0);
            // A degenerate draw is reordered rather than discarded
            let (min_y, max_y) = if top <= bottom { (top, bottom) } else { (bottom, top) };
            (size, min_y, MOVING_OBSTACLE_SPEED, min_y, max_y)
        }
    };

    Obstacle {
        id,
        kind,
        pos: Vec2::new(SPAWN_X, y),
        size,
        passed: false,
        vel_y,
        min_y,
        max_y,
    }
}

/// Build a coin in the jump-reachable height band
pub fn make_coin(id: u32, rng: &mut Pcg32) -> Coin {
    let y = GROUND_Y - COIN_SIZE - rng.random_range(10.0..170.0);
    Coin {
        id,
        pos: Vec2::new(SPAWN_X, y),
        size: Vec2::splat(COIN_SIZE),
        collected: false,
        phase: rng.random_range(0.0..std::f32::consts::TAU),
    }
}

/// Build a power-up pickup; the three kinds are equally likely
pub fn make_powerup(id: u32, rng: &mut Pcg32) -> PowerUp {
    let kind = match rng.random_range(0..3u32) {
        0 => PowerUpKind::Shield,
        1 => PowerUpKind::Magnet,
        _ => PowerUpKind::Multiplier,
    };
    let y = GROUND_Y - POWERUP_SIZE - rng.random_range(20.0..150.0);
    PowerUp {
        id,
        kind,
        pos: Vec2::new(SPAWN_X, y),
        size: Vec2::splat(POWERUP_SIZE),
        collected: false,
    }
}

/// One spawn category's clock: counts ticks up to a jittered threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnClock {
    pub ticks: u32,
    pub next_at: u32,
}

impl SpawnClock {
    fn new(next_at: u32) -> Self {
        Self {
            ticks: 0,
            next_at: next_at.max(1),
        }
    }

    /// Count one tick; on reaching the threshold the counter resets and
    /// the firing is reported. The caller re-arms `next_at`.
    fn advance(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.next_at {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}

/// What a spawner step decided to inject this tick
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnDecisions {
    pub obstacle: bool,
    pub coin: bool,
    pub powerup: bool,
}

/// The three independent spawn clocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacle: SpawnClock,
    pub coin: SpawnClock,
    pub powerup: SpawnClock,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            obstacle: SpawnClock::new(OBSTACLE_INTERVAL),
            coin: SpawnClock::new(COIN_INTERVAL),
            powerup: SpawnClock::new(POWERUP_INTERVAL),
        }
    }
}

impl Spawner {
    /// Re-arm all clocks with fresh jitter, as at run start
    pub fn reset(&mut self, rng: &mut Pcg32, speed: f32) {
        self.obstacle = SpawnClock::new(obstacle_interval(rng, speed));
        self.coin = SpawnClock::new(coin_interval(rng));
        self.powerup = SpawnClock::new(powerup_interval(rng));
    }

    /// Advance all clocks by one tick. Jitter for the next threshold is
    /// drawn only when a clock fires, keeping the RNG stream stable.
    pub fn advance(&mut self, rng: &mut Pcg32, speed: f32) -> SpawnDecisions {
        let mut decisions = SpawnDecisions::default();
        if self.obstacle.advance() {
            self.obstacle.next_at = obstacle_interval(rng, speed).max(1);
            decisions.obstacle = true;
        }
        if self.coin.advance() {
            self.coin.next_at = coin_interval(rng).max(1);
            decisions.coin = true;
        }
        if self.powerup.advance() {
            self.powerup.next_at = powerup_interval(rng).max(1);
            decisions.powerup = true;
        }
        decisions
    }
}

/// Obstacle cadence: tighter at higher speed, floored so the spawn
/// density never outruns human reaction
fn obstacle_interval(rng: &mut Pcg32, speed: f32) -> u32 {
    let shrink = ((speed - BASE_SPEED).max(0.0) * 6.0) as u32;
    let base = OBSTACLE_INTERVAL
        .saturating_sub(shrink)
        .max(OBSTACLE_INTERVAL_MIN);
    base + rng.random_range(0..OBSTACLE_JITTER)
}

fn coin_interval(rng: &mut Pcg32) -> u32 {
    COIN_INTERVAL + rng.random_range(0..COIN_JITTER)
}

fn powerup_interval(rng: &mut Pcg32) -> u32 {
    POWERUP_INTERVAL + rng.random_range(0..POWERUP_JITTER)
}
