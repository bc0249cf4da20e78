//! Game state and core simulation types
//!
//! All state that must survive a snapshot lives here. Cosmetic buffers
//! (particles, the per-tick event list) are skipped on serialization.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::spawn::Spawner;
use crate::consts::*;
use crate::tuning::RunConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Booted, no run started yet
    Idle,
    /// Active gameplay
    Playing,
    /// Frozen mid-run, resumable
    Paused,
    /// Run ended; one revive may still be available
    GameOver,
}

/// The runner character. X is fixed; only the vertical axis is simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    /// True iff the player rests exactly on the ground line
    pub grounded: bool,
    /// Airborne from a jump (as opposed to walking off nothing - which
    /// cannot happen on a flat ground, but the renderer keys off this)
    pub jumping: bool,
    /// Run-cycle animation counter, advanced while grounded
    pub frame: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            grounded: true,
            jumping: false,
            frame: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Block,
    /// Floats in a band above the ground; run under it
    Flying,
    /// Spike that spawns with a trailing twin; both must be cleared in one jump
    DoubleSpike,
    /// Bounces vertically between `min_y` and `max_y`
    Moving,
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Cleared the player's x and was scored
    pub passed: bool,
    /// Vertical bounce state, used by the Moving kind only
    #[serde(default)]
    pub vel_y: f32,
    #[serde(default)]
    pub min_y: f32,
    #[serde(default)]
    pub max_y: f32,
}

impl Obstacle {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Advance the vertical bounce; a no-op for every kind but Moving
    pub fn oscillate(&mut self) {
        if self.kind != ObstacleKind::Moving {
            return;
        }
        self.pos.y += self.vel_y;
        if self.pos.y <= self.min_y {
            self.pos.y = self.min_y;
            self.vel_y = self.vel_y.abs();
        } else if self.pos.y >= self.max_y {
            self.pos.y = self.max_y;
            self.vel_y = -self.vel_y.abs();
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Spin animation phase
    pub phase: f32,
}

impl Coin {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Power-up effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs one obstacle hit
    Shield,
    /// Pulls nearby coins toward the player
    Magnet,
    /// Doubles score gain
    Multiplier,
}

/// A power-up pickup entity (the timed effect it grants lives in
/// [`ActiveEffects`])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
}

impl PowerUp {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// A particle for visual effects; never consulted by collision logic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Things that happened during the last tick, drained by the presentation
/// layer (audio, haptics, UI toasts). The sim never calls those back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Jumped,
    CoinCollected { value: u32 },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    /// A shield soaked an obstacle hit that would have ended the run
    ShieldAbsorbedHit,
    ObstaclePassed,
    BiomeChanged { biome: u32 },
    RunEnded,
    RunRevived,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state, recomputed every tick. The single source of truth
/// read by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG; a restored snapshot restarts the stream
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Abilities/VIP/biome bundle supplied at run start
    pub config: RunConfig,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<PowerUp>,
    /// Running timed effects
    pub effects: ActiveEffects,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events of the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,

    /// Monotonically accumulated while playing
    pub score: u64,
    #[serde(default)]
    score_carry: f32,
    pub distance: f32,
    pub coins_collected: u32,
    /// Current world scroll speed
    pub speed: f32,
    /// Active biome id (cosmetic, strictly increasing within a run)
    pub biome: u32,

    pub revive_available: bool,
    pub revive_used: bool,

    pub spawner: Spawner,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state with the given seed. No run is active until
    /// [`GameState::start`] is called.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            time_ticks: 0,
            config: RunConfig::default(),
            player: Player::new(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            particles: Vec::new(),
            events: Vec::new(),
            score: 0,
            score_carry: 0.0,
            distance: 0.0,
            coins_collected: 0,
            speed: BASE_SPEED,
            biome: 0,
            revive_available: false,
            revive_used: false,
            spawner: Spawner::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Begin a fresh run. Valid from any phase; resets every aggregate and
    /// entity list, then enters Playing.
    pub fn start(&mut self, config: RunConfig) {
        self.player = Player::new();
        self.obstacles.clear();
        self.coins.clear();
        self.powerups.clear();
        self.particles.clear();
        self.effects = ActiveEffects::default();
        self.score = 0;
        self.score_carry = 0.0;
        self.distance = 0.0;
        self.coins_collected = 0;
        self.speed = BASE_SPEED;
        self.biome = config.start_biome.min(BIOME_COUNT - 1);
        self.revive_available = false;
        self.revive_used = false;
        self.time_ticks = 0;
        self.config = config;
        self.spawner.reset(&mut self.rng, self.speed);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunStarted);
        log::info!("run started (seed {}, biome {})", self.seed, self.biome);
    }

    /// End the current run. The first game over of a run leaves one revive
    /// available.
    pub fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.revive_available = !self.revive_used;
        self.events.push(GameEvent::RunEnded);
        log::info!(
            "game over: score {} distance {:.0} coins {}",
            self.score,
            self.distance,
            self.coins_collected
        );
    }

    /// Continue the run after a game over. At most once per run; invalid
    /// calls are no-ops.
    pub fn revive(&mut self) {
        if self.phase != GamePhase::GameOver || !self.revive_available || self.revive_used {
            return;
        }
        self.obstacles.clear();
        self.player = Player::new();
        self.revive_used = true;
        self.revive_available = false;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunRevived);
        log::info!("revived at distance {:.0}", self.distance);
    }

    /// Leave the game-over screen back to the idle menu state
    pub fn go_home(&mut self) {
        if self.phase == GamePhase::GameOver {
            self.phase = GamePhase::Idle;
        }
    }

    /// Bank fractional score points; `score` itself only ever grows by
    /// whole units.
    pub(crate) fn add_score(&mut self, points: f32) {
        self.score_carry += points.max(0.0);
        let whole = self.score_carry.floor();
        if whole > 0.0 {
            self.score += whole as u64;
            self.score_carry -= whole;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_and_grounded() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, GROUND_Y - PLAYER_HEIGHT);
    }

    #[test]
    fn start_resets_aggregates() {
        let mut state = GameState::new(7);
        state.start(RunConfig::default());
        state.score = 500;
        state.distance = 123.0;
        state.coins_collected = 9;
        state.start(RunConfig::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.coins_collected, 0);
        assert!(state.is_playing());
    }

    #[test]
    fn revive_is_single_use() {
        let mut state = GameState::new(7);
        state.start(RunConfig::default());
        state.end_game();
        assert!(state.revive_available);
        state.revive();
        assert!(state.is_playing());
        assert!(state.revive_used);

        state.end_game();
        assert!(!state.revive_available);
        state.revive();
        assert!(state.is_game_over());
    }

    #[test]
    fn revive_outside_game_over_is_a_noop() {
        let mut state = GameState::new(7);
        state.start(RunConfig::default());
        state.revive();
        assert!(state.is_playing());
        assert!(!state.revive_used);
    }

    #[test]
    fn end_game_keeps_run_totals() {
        let mut state = GameState::new(7);
        state.start(RunConfig::default());
        state.add_score(42.0);
        state.coins_collected = 3;
        state.end_game();
        assert_eq!(state.score, 42);
        assert_eq!(state.coins_collected, 3);
    }

    #[test]
    fn score_carry_accumulates_fractions() {
        let mut state = GameState::new(7);
        state.start(RunConfig::default());
        for _ in 0..10 {
            state.add_score(0.25);
        }
        assert_eq!(state.score, 2);
    }

    #[test]
    fn oscillating_obstacle_stays_in_band() {
        let mut o = Obstacle {
            id: 1,
            kind: ObstacleKind::Moving,
            pos: Vec2::new(400.0, 200.0),
            size: Vec2::new(40.0, 40.0),
            passed: false,
            vel_y: MOVING_OBSTACLE_SPEED,
            min_y: 180.0,
            max_y: 260.0,
        };
        for _ in 0..500 {
            o.oscillate();
            assert!(o.pos.y >= o.min_y && o.pos.y <= o.max_y);
        }
    }
}
