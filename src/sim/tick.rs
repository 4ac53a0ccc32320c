//! Session lifecycle and the per-frame pipeline
//!
//! Frame order is fixed: spawn, fruit physics, slice check, particles, trail
//! fade. Slicing runs on post-integration positions, and sliced fruit are
//! removed before the next spawn is considered.

use super::fruit::Fruit;
use super::kinematics::sanitize_dt;
use super::slice::find_hits;
use super::state::{GameEvent, GameState, SessionPhase};
use crate::consts::MAX_FRAME_DT;

/// Begin a session (from Idle, or restart from Ended).
///
/// Returns false and changes nothing if a session is already running.
pub fn start_session(state: &mut GameState) -> bool {
    if state.phase == SessionPhase::Active {
        log::warn!("start ignored: session already active");
        return false;
    }

    state.score = 0;
    state.lives = state.tuning.lives;
    state.final_score = None;
    state.frame_count = 0;
    state.last_frame_ms = None;
    state.spawner.reset(&state.tuning);
    state.fruits.clear();
    state.particles.clear();
    state.trail.clear();
    state.gesture.reset();
    state.phase = SessionPhase::Active;

    log::info!(
        "Session started (seed {}, lives {}, spawn interval {}ms)",
        state.seed,
        state.lives,
        state.spawner.interval_ms()
    );

    let lives = state.lives;
    state.emit(GameEvent::SessionStarted { lives });
    state.emit(GameEvent::ScoreChanged { score: 0 });
    state.emit(GameEvent::LivesChanged { lives });
    true
}

/// Stop the running session and freeze the score.
///
/// Returns false if no session is running.
pub fn end_session(state: &mut GameState) -> bool {
    if state.phase != SessionPhase::Active {
        log::warn!("end ignored: no active session ({:?})", state.phase);
        return false;
    }

    state.phase = SessionPhase::Ended;
    state.final_score = Some(state.score);
    state.gesture.release();

    log::info!(
        "Session ended: score {} after {} frames",
        state.score,
        state.frame_count
    );
    let final_score = state.score;
    state.emit(GameEvent::SessionEnded { final_score });
    true
}

/// Advance one display frame at host time `now_ms`.
///
/// Returns whether the host should schedule another frame.
pub fn frame(state: &mut GameState, now_ms: f64) -> bool {
    if state.phase != SessionPhase::Active {
        return false;
    }

    let dt = match state.last_frame_ms {
        Some(last) => sanitize_dt((now_ms - last) / 1000.0, MAX_FRAME_DT),
        None => 0.0,
    };
    state.last_frame_ms = Some(now_ms);
    state.frame_count += 1;

    // Spawn
    if let Some(request) =
        state
            .spawner
            .tick(now_ms, &state.viewport, &state.tuning, &mut state.rng)
    {
        let id = state.next_entity_id();
        let fruit = Fruit::launch(id, request, &state.tuning, &mut state.rng);
        log::debug!(
            "Spawned {} #{} at x={:.2} (next interval {}ms)",
            fruit.kind.as_str(),
            id,
            request.x,
            state.spawner.interval_ms()
        );
        let kind = fruit.kind;
        state.fruits.push(fruit);
        state.emit(GameEvent::FruitSpawned { id, kind });
    }

    // Fruit physics and misses
    let mut missed = Vec::new();
    state.fruits.integrate(dt, &state.tuning, &mut missed);
    for id in missed {
        state.emit(GameEvent::FruitMissed { id });
        lose_life(state);
    }

    // Slicing against the held gesture point
    resolve_slices(state, now_ms);

    // Visual effects keep running on the frame the session ends
    state
        .particles
        .integrate(dt, now_ms, state.tuning.particle_gravity);
    state.trail.update(now_ms);

    state.phase == SessionPhase::Active
}

/// Slice every fruit the current gesture reaches. Returns the number sliced.
///
/// No-op outside an active session, so the score is frozen once it ends.
pub fn resolve_slices(state: &mut GameState, now_ms: f64) -> usize {
    if state.phase != SessionPhase::Active {
        return 0;
    }

    let hits = find_hits(&state.fruits.fruits, state.gesture.state(), &state.tuning);
    if hits.is_empty() {
        return 0;
    }

    let mut sliced = Vec::with_capacity(hits.len());
    for fruit in &mut state.fruits.fruits {
        if hits.contains(&fruit.id) {
            fruit.sliced = true;
            sliced.push((fruit.id, fruit.kind, fruit.pos()));
        }
    }
    state.fruits.remove_sliced();

    for &(id, kind, pos) in &sliced {
        state
            .particles
            .spawn_explosion(pos, kind.color(), now_ms, &state.tuning, &mut state.rng);
        state.score += 1;
        log::debug!("Sliced {} #{} (score {})", kind.as_str(), id, state.score);

        let score = state.score;
        state.emit(GameEvent::FruitSliced { id, kind });
        state.emit(GameEvent::ScoreChanged { score });
    }

    sliced.len()
}

/// An unsliced fruit fell out of play
fn lose_life(state: &mut GameState) {
    if state.phase != SessionPhase::Active {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    log::debug!("Fruit missed, {} lives left", state.lives);
    let lives = state.lives;
    state.emit(GameEvent::LivesChanged { lives });

    if state.lives == 0 {
        end_session(state);
    }
}
