//! Neon Rush headless driver
//!
//! Runs the simulation core at its fixed logical rate with a demo
//! autopilot, logging run progress and folding the result into the local
//! high-score table. A rendering front end would replace this loop with
//! its own frame callback and feed real input through [`TickInput`].

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};

use neon_rush::consts::*;
use neon_rush::highscores::{HighScoreEntry, HighScores};
use neon_rush::settings::Settings;
use neon_rush::sim::{GameEvent, GameState, TickInput, tick};
use neon_rush::tuning::RunConfig;

const SETTINGS_PATH: &str = "neon_rush_settings.json";
const HIGHSCORES_PATH: &str = "neon_rush_highscores.json";

/// Owns the simulation state and drains fixed steps from a real-time
/// accumulator
struct Runner {
    state: GameState,
    input: TickInput,
    accumulator: f32,
    last: Instant,
}

impl Runner {
    fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            accumulator: 0.0,
            last: Instant::now(),
        }
    }

    /// Run as many fixed steps as wall time allows, capped to avoid the
    /// spiral of death after a stall
    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32().min(0.1);
        self.last = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.pause = false;

            self.report_events();
        }
    }

    /// Surface per-tick events the way a presentation layer would
    fn report_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::CoinCollected { value } => debug!("coin collected (+{value})"),
                GameEvent::PowerUpCollected(kind) => info!("{kind:?} power-up online"),
                GameEvent::PowerUpExpired(kind) => debug!("{kind:?} power-up expired"),
                GameEvent::ShieldAbsorbedHit => info!("shield absorbed a hit"),
                GameEvent::BiomeChanged { biome } => info!("biome changed to {biome}"),
                GameEvent::ObstaclePassed
                | GameEvent::Jumped
                | GameEvent::RunStarted
                | GameEvent::RunEnded
                | GameEvent::RunRevived => {}
            }
        }
    }
}

struct Args {
    seed: u64,
    secs: u64,
    vip: bool,
}

fn parse_args() -> Args {
    let mut seed = None;
    let mut secs = 60;
    let mut vip = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().and_then(|v| v.parse().ok()),
            "--secs" => secs = args.next().and_then(|v| v.parse().ok()).unwrap_or(secs),
            "--vip" => vip = true,
            other => warn!("ignoring unknown argument {other:?}"),
        }
    }

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    Args { seed, secs, vip }
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let mut highscores = HighScores::load(Path::new(HIGHSCORES_PATH));

    let mut runner = Runner::new(args.seed);
    runner.input.autopilot = true;
    runner.state.start(RunConfig {
        vip: args.vip,
        ..Default::default()
    });

    let deadline = Instant::now() + Duration::from_secs(args.secs);
    let mut revived = false;
    let mut last_report = 0;

    loop {
        runner.update();

        let state = &runner.state;
        if state.is_playing() && state.time_ticks / 60 > last_report {
            last_report = state.time_ticks / 60;
            info!(
                "t={last_report}s score={} distance={:.0} coins={} speed={:.1} biome={}",
                state.score, state.distance, state.coins_collected, state.speed, state.biome
            );
            if settings.show_fps {
                debug!(
                    "live entities: {} obstacles, {} coins, {} power-ups, {} particles",
                    state.obstacles.len(),
                    state.coins.len(),
                    state.powerups.len(),
                    state.particles.len()
                );
            }
        }

        if runner.state.is_game_over() {
            if !revived && runner.state.revive_available {
                revived = true;
                runner.state.revive();
            } else {
                break;
            }
        }
        if Instant::now() >= deadline {
            break;
        }

        std::thread::sleep(Duration::from_millis(2));
    }

    let state = &runner.state;
    info!(
        "final: score={} distance={:.0} coins={} biome={} ({} ticks)",
        state.score, state.distance, state.coins_collected, state.biome, state.time_ticks
    );

    let entry = HighScoreEntry {
        score: state.score,
        distance: state.distance as u32,
        coins: state.coins_collected,
        biome: state.biome,
    };
    match highscores.add_score(entry) {
        Some(rank) => info!("new high score, rank {rank}"),
        None => info!(
            "no new high score (best {})",
            highscores.top_score().unwrap_or(0)
        ),
    }
    highscores.save(Path::new(HIGHSCORES_PATH));
}
