//! Pizza Boi - A tile-world side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile world, terrain, collision, player, pizzas)
//! - `renderer`: Render collaborator interface and camera conversion
//! - `tuning`: Data-driven physics constants

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Edge length of one tile in pixels
    pub const BLOCK_SIZE: f32 = 20.0;

    /// Window dimensions in pixels
    pub const WIDTH: i32 = 1280;
    pub const HEIGHT: i32 = 720;

    /// Window dimensions in tiles
    pub const W_BLOCKS: i32 = WIDTH / BLOCK_SIZE as i32;
    pub const H_BLOCKS: i32 = HEIGHT / BLOCK_SIZE as i32;

    /// Gravitational acceleration (tiles/s²)
    pub const GRAVITY: f32 = 25.0;

    /// Horizontal speed (tiles/s)
    pub const WALK_SPEED: f32 = 10.0;
    pub const CROUCH_SPEED: f32 = 7.0;

    /// Jump apex height (tiles)
    pub const JUMP_HEIGHT: f32 = 4.0;
    pub const CROUCH_JUMP_HEIGHT: f32 = 2.0;

    /// Contact tolerance for floor/ceiling checks (pixels)
    pub const VERTICAL_PADDING_PX: f32 = 7.0;
    /// Contact tolerance for wall checks (pixels)
    pub const HORIZONTAL_PADDING_PX: f32 = 10.0;

    /// Pizza flight speed (tiles/s)
    pub const PIZZA_SPEED: f32 = 20.0;
    /// Seconds a thrown pizza lives if it hits nothing
    pub const PIZZA_LIFETIME_SECS: f64 = 1.5;

    /// Floor tiles laid past each edge of the visible window
    pub const FLOOR_MARGIN: i32 = 5;
    /// Tiles below the window a player may fall before the session resets
    pub const FALL_MARGIN: i32 = 1;
}

/// Cell index at or below a continuous coordinate
#[inline]
pub fn floor_cell(v: f32) -> i32 {
    v.floor() as i32
}

/// Cell index at or above a continuous coordinate
#[inline]
pub fn ceil_cell(v: f32) -> i32 {
    v.ceil() as i32
}

/// Cell index when the coordinate sits exactly on a cell, `None` otherwise
#[inline]
pub fn exact_cell(v: f32) -> Option<i32> {
    (v.fract() == 0.0).then_some(v as i32)
}

/// Round to one decimal place
#[inline]
pub fn round_tenth(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}
