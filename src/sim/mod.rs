//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep and clock only
//! - Seeded RNG only
//! - No behavior depends on tile iteration order; pizzas update in throw order
//! - No platform dependencies; drawing goes through [`crate::renderer::Renderer`]

pub mod collision;
pub mod pizza;
pub mod player;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod tile;

pub use collision::{Resolver, SideContacts};
pub use pizza::{Pizza, PizzaKind, update_pizzas};
pub use player::{Direction, Player, Stuck};
pub use state::{GameState, Level};
pub use terrain::{
    TerrainError, build_block, build_floor, build_hill, build_staircase, map_0, map_procedural,
};
pub use tick::{Clock, FrameTime, InputSource, TickInput, frame, run, tick};
pub use tile::{KindSet, Tile, TileKind, TileRules, TileWorld};
