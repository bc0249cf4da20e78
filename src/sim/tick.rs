//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one logical step. The stage
//! order is load-bearing: physics first, then spawning, then obstacle,
//! coin and power-up interaction against the already-integrated player
//! box, then scrolling and pruning, then effect clocks, particles and the
//! aggregate recompute. Effects activated by a pickup become visible to
//! the derived queries on the next tick.

use glam::Vec2;
use rand::Rng;

use super::collision::{aabb_overlap, in_magnet_range, magnet_step};
use super::physics;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, ObstacleKind, Particle, PowerUpKind};
use crate::consts::*;

/// Particle color tags, resolved to real colors by the renderer
const COLOR_DUST: u32 = 0;
const COLOR_COIN: u32 = 1;
const COLOR_SHIELD: u32 = 2;
const COLOR_MAGNET: u32 = 3;
const COLOR_MULTIPLIER: u32 = 4;
const COLOR_DEATH: u32 = 5;

/// Input commands for a single tick. One-shots are captured by the
/// presentation layer and take effect at the top of the next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump press (tap/space)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the sim jumps for itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Pause toggle applies before anything else moves
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Idle | GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Let the death burst play out; nothing else moves
            advance_particles(state);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Derived queries reflect the effects as of the previous tick; a
    // pickup later in this tick must not change them mid-flight
    let multiplier = state.effects.score_multiplier();
    let has_shield = state.effects.has_shield();
    let has_magnet = state.effects.has_magnet();

    // --- input and player physics ---
    let wants_jump = input.jump || (input.autopilot && autopilot_wants_jump(state));
    if wants_jump && physics::jump(&mut state.player, state.config.jump_impulse()) {
        let feet = Vec2::new(state.player.pos.x + state.player.size.x * 0.5, GROUND_Y);
        spawn_burst(state, feet, 6, COLOR_DUST);
        state.events.push(GameEvent::Jumped);
    }
    physics::integrate(&mut state.player);

    // --- spawn decisions ---
    let decisions = state.spawner.advance(&mut state.rng, state.speed);
    if decisions.obstacle {
        let id = state.next_entity_id();
        let obstacle = spawn::make_obstacle(id, &mut state.rng);
        let anchor_x = obstacle.pos.x;
        let double = obstacle.kind == ObstacleKind::DoubleSpike;
        state.obstacles.push(obstacle);
        if double {
            // The double draw is a pairing rule: a trailing spike forces
            // both to be cleared in one jump
            let id = state.next_entity_id();
            let mut twin = spawn::make_obstacle_of(id, ObstacleKind::Spike, &mut state.rng);
            twin.pos.x = anchor_x + DOUBLE_SPIKE_GAP;
            state.obstacles.push(twin);
        }
    }
    if decisions.coin {
        let id = state.next_entity_id();
        let coin = spawn::make_coin(id, &mut state.rng);
        state.coins.push(coin);
    }
    if decisions.powerup {
        let id = state.next_entity_id();
        let powerup = spawn::make_powerup(id, &mut state.rng);
        state.powerups.push(powerup);
    }

    let player_pos = state.player.pos;
    let player_size = state.player.size;
    let player_center = state.player.center();

    // --- obstacles: bounce, then at most one resolved hit per tick ---
    for obstacle in &mut state.obstacles {
        obstacle.oscillate();
    }

    let mut absorbed: Option<usize> = None;
    let mut fatal = false;
    for (i, obstacle) in state.obstacles.iter().enumerate() {
        if aabb_overlap(
            player_pos,
            player_size,
            obstacle.pos,
            obstacle.size,
            HITBOX_PADDING,
        ) {
            if has_shield {
                absorbed = Some(i);
            } else {
                fatal = true;
            }
            break;
        }
    }
    if let Some(i) = absorbed {
        let obstacle = state.obstacles.remove(i);
        state.effects.consume(PowerUpKind::Shield);
        spawn_burst(state, obstacle.center(), 14, COLOR_SHIELD);
        state.events.push(GameEvent::ShieldAbsorbedHit);
        log::debug!("shield absorbed obstacle {}", obstacle.id);
    } else if fatal {
        spawn_burst(state, player_center, 24, COLOR_DEATH);
        state.end_game();
        return;
    }

    // --- coins: collect at the drawn position, then magnet pull ---
    let coin_value = state.config.coin_value();
    let mut collected_coins: Vec<Vec2> = Vec::new();
    for coin in &mut state.coins {
        if coin.collected {
            continue;
        }
        if aabb_overlap(player_pos, player_size, coin.pos, coin.size, 0.0) {
            coin.collected = true;
            collected_coins.push(coin.center());
            continue;
        }
        if has_magnet && in_magnet_range(coin.center(), player_center) {
            let pulled = magnet_step(coin.center(), player_center);
            coin.pos = pulled - coin.size * 0.5;
        }
        coin.phase += COIN_SPIN_RATE;
    }
    for center in collected_coins {
        state.coins_collected += coin_value;
        state.add_score(COIN_SCORE * multiplier);
        spawn_burst(state, center, 8, COLOR_COIN);
        state.events.push(GameEvent::CoinCollected { value: coin_value });
    }

    // --- power-ups: every distinct overlapping pickup activates ---
    let mut activated: Vec<(PowerUpKind, Vec2)> = Vec::new();
    for powerup in &mut state.powerups {
        if powerup.collected {
            continue;
        }
        if aabb_overlap(player_pos, player_size, powerup.pos, powerup.size, 0.0) {
            powerup.collected = true;
            activated.push((powerup.kind, powerup.center()));
        }
    }
    for (kind, center) in activated {
        let duration = match kind {
            PowerUpKind::Shield => state.config.shield_duration(),
            PowerUpKind::Magnet | PowerUpKind::Multiplier => POWERUP_DURATION,
        };
        state.effects.activate(kind, duration);
        spawn_burst(state, center, 12, powerup_color(kind));
        state.events.push(GameEvent::PowerUpCollected(kind));
    }

    // --- scroll the world, prune what left it ---
    let speed = state.speed;
    let mut passes = 0u32;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
        if !obstacle.passed && obstacle.pos.x + obstacle.size.x < player_pos.x {
            obstacle.passed = true;
            passes += 1;
        }
    }
    for coin in &mut state.coins {
        coin.pos.x -= speed;
    }
    for powerup in &mut state.powerups {
        powerup.pos.x -= speed;
    }
    state.obstacles.retain(|o| o.pos.x > PRUNE_X);
    state.coins.retain(|c| !c.collected && c.pos.x > PRUNE_X);
    state.powerups.retain(|p| !p.collected && p.pos.x > PRUNE_X);
    for _ in 0..passes {
        state.add_score(PASS_SCORE * multiplier);
        state.events.push(GameEvent::ObstaclePassed);
    }

    // --- effect clocks ---
    for kind in state.effects.tick_down() {
        state.events.push(GameEvent::PowerUpExpired(kind));
    }

    // --- particles ---
    advance_particles(state);

    // --- aggregates: difficulty ramp, score, biome ---
    state.speed = (state.speed + SPEED_RAMP).min(state.config.max_speed());
    state.distance += state.speed * DISTANCE_RATE;
    state.add_score(state.speed * SCORE_RATE * multiplier);

    let biome = biome_for_distance(state.distance, state.config.start_biome);
    if biome > state.biome {
        state.biome = biome;
        state.events.push(GameEvent::BiomeChanged { biome });
        log::debug!("entered biome {biome}");
    }
}

/// Biome id for a distance, clamped to the last biome - the scenery only
/// ever moves forward
fn biome_for_distance(distance: f32, start_biome: u32) -> u32 {
    let steps = (distance / BIOME_DISTANCE_STEP) as u32;
    (start_biome + steps).min(BIOME_COUNT - 1)
}

/// Demo-mode brain: jump when a ground-level obstacle enters the
/// speed-scaled reaction window
fn autopilot_wants_jump(state: &GameState) -> bool {
    if !state.player.grounded {
        return false;
    }
    let front = state.player.pos.x + state.player.size.x;
    let look_ahead = state.speed * 14.0;
    state.obstacles.iter().any(|o| {
        let gap = o.pos.x - front;
        gap > 0.0 && gap < look_ahead && o.pos.y + o.size.y > GROUND_Y - 70.0
    })
}

fn powerup_color(kind: PowerUpKind) -> u32 {
    match kind {
        PowerUpKind::Shield => COLOR_SHIELD,
        PowerUpKind::Magnet => COLOR_MAGNET,
        PowerUpKind::Multiplier => COLOR_MULTIPLIER,
    }
}

/// Radial particle burst at `center`, capped at the particle budget
fn spawn_burst(state: &mut GameState, center: Vec2, count: usize, color: u32) {
    for _ in 0..count {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(1.0..4.0);
        let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - 1.5);
        let size = state.rng.random_range(2.0..5.0);
        state.particles.push(Particle {
            pos: center,
            vel,
            color,
            life: 1.0,
            size,
        });
    }
}

fn advance_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.vel *= 0.98;
        particle.life -= PARTICLE_DECAY;
        particle.size *= 0.97;
    }
    state.particles.retain(|p| p.life > 0.0);
}
