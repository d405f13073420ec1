//! Per-frame simulation step
//!
//! Frame order: regenerate floor, draw tiles, reset rule, input, player,
//! pizzas, draw player. [`tick`] runs the same sequence without drawing.

use super::collision::Resolver;
use super::pizza::{Pizza, update_pizzas};
use super::state::GameState;
use crate::renderer::{self, Renderer};

/// Input state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump
    pub up: bool,
    pub left: bool,
    pub right: bool,
    /// Crouch (held)
    pub down: bool,
    /// Throw a pizza (fires on press)
    pub throw: bool,
    /// Leave the game loop
    pub quit: bool,
}

/// Timing for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Monotonic timestamp (seconds) used for expiries
    pub now: f64,
}

/// Source of per-frame input
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Source of per-frame timing
pub trait Clock {
    fn advance(&mut self) -> FrameTime;
}

/// Advance the session by one frame without drawing
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now: f64) {
    begin_frame(state);
    simulate(state, input, dt, now);
}

/// Advance the session by one frame, drawing through `renderer`
pub fn frame<R: Renderer>(
    state: &mut GameState,
    input: &TickInput,
    time: FrameTime,
    renderer: &mut R,
) {
    begin_frame(state);
    renderer::render_tiles(state, renderer);
    simulate(state, input, time.dt, time.now);
    renderer::render_actors(state, renderer);
}

/// Run frames until the input source asks to quit. Returns frames run.
pub fn run<I, C, R>(state: &mut GameState, input: &mut I, clock: &mut C, renderer: &mut R) -> u64
where
    I: InputSource,
    C: Clock,
    R: Renderer,
{
    let mut frames = 0;
    loop {
        let time = clock.advance();
        let sampled = input.poll();
        if sampled.quit {
            log::info!("Quit after {} frames", frames);
            return frames;
        }
        frame(state, &sampled, time, renderer);
        frames += 1;
    }
}

fn begin_frame(state: &mut GameState) {
    state.time_ticks += 1;
    if let Err(err) = state.regenerate_floor() {
        log::error!("Floor regeneration failed: {}", err);
    }
}

fn simulate(state: &mut GameState, input: &TickInput, dt: f32, now: f64) {
    state.world.remove_expired(now);

    // Reset rule
    if state.fell_out() {
        log::info!(
            "Player fell out at ({:.1}, {:.1}), resetting level",
            state.player.pos.x,
            state.player.pos.y
        );
        if let Err(err) = state.reset() {
            log::error!("Level reset failed: {}", err);
        }
    }

    // Player input
    let resolver = Resolver::new(&state.world, &state.rules);
    state.player.apply_input(input, &resolver, &state.tuning, dt);

    if input.throw && !state.player.throw_held {
        throw_pizza(state, now);
    }
    state.player.throw_held = input.throw;

    // Player physics
    let resolver = Resolver::new(&state.world, &state.rules);
    state.player.integrate(&resolver, &state.tuning, dt);

    // Pizzas
    let destroyed = update_pizzas(
        &mut state.pizzas,
        &mut state.world,
        &state.rules,
        state.tuning.pizza_speed,
        dt,
        now,
    );
    state.tiles_destroyed += destroyed as u32;
}

fn throw_pizza(state: &mut GameState, now: f64) {
    let lifetime = state.tuning.pizza_lifetime_secs;
    let id = state.next_entity_id();
    if let Some(pizza) = Pizza::thrown_by(id, &state.player, now, lifetime) {
        log::debug!(
            "Pizza {} thrown {:?} from ({:.1}, {:.1})",
            pizza.id,
            pizza.direction,
            pizza.pos.x,
            pizza.pos.y
        );
        state.pizzas.push(pizza);
    }
}
