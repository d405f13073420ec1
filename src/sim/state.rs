//! Session state and the reset rule
//!
//! Everything here lives for one session and is rebuilt from scratch when
//! the player falls out of the world.

use glam::IVec2;

use super::pizza::Pizza;
use super::player::Player;
use super::terrain::{self, TerrainError};
use super::tile::{TileRules, TileWorld};
use crate::consts::*;
use crate::floor_cell;
use crate::tuning::Tuning;

/// Which layout a session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    /// Fixed opening level
    #[default]
    Classic,
    /// Seeded run of hills and breakable clusters
    Procedural { seed: u64 },
}

impl Level {
    /// Write this layout into `world` and return the spawn cell
    pub fn build(self, world: &mut TileWorld, floor_margin: i32) -> Result<IVec2, TerrainError> {
        match self {
            Level::Classic => terrain::map_0(world, floor_margin),
            Level::Procedural { seed } => terrain::map_procedural(world, floor_margin, seed),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Blocking/breakable sets derived from `tuning`
    pub rules: TileRules,
    pub level: Level,
    pub world: TileWorld,
    pub spawn: IVec2,
    pub player: Player,
    /// Live pizzas in throw order
    pub pizzas: Vec<Pizza>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Times the session was rebuilt after a fall
    pub resets: u32,
    /// Breakable tiles knocked out this session
    pub tiles_destroyed: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New session on `level` with default tuning
    pub fn new(level: Level) -> Result<Self, TerrainError> {
        Self::with_tuning(Tuning::default(), level)
    }

    pub fn with_tuning(tuning: Tuning, level: Level) -> Result<Self, TerrainError> {
        let mut world = TileWorld::new();
        let spawn = level.build(&mut world, tuning.floor_margin)?;
        log::info!("Level {:?} built: {} tiles, spawn at {}", level, world.len(), spawn);

        Ok(Self {
            rules: TileRules::from_tuning(&tuning),
            tuning,
            level,
            world,
            spawn,
            player: Player::new(spawn),
            pizzas: Vec::new(),
            time_ticks: 0,
            resets: 0,
            tiles_destroyed: 0,
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Player has dropped more than `fall_margin` rows below the window
    pub fn fell_out(&self) -> bool {
        self.player.pos.y > (H_BLOCKS + self.tuning.fall_margin) as f32
    }

    /// Rebuild the level and put the player back at spawn.
    ///
    /// The layout is generated into a fresh world first; on error the
    /// current session is left untouched.
    pub fn reset(&mut self) -> Result<(), TerrainError> {
        let mut world = TileWorld::new();
        let spawn = self.level.build(&mut world, self.tuning.floor_margin)?;

        self.world = world;
        self.spawn = spawn;
        self.player.respawn(spawn);
        self.pizzas.clear();
        self.resets += 1;
        Ok(())
    }

    /// Re-lay the floor under the window following the player
    pub fn regenerate_floor(&mut self) -> Result<(), TerrainError> {
        terrain::build_floor(
            &mut self.world,
            floor_cell(self.player.pos.x),
            W_BLOCKS,
            self.tuning.floor_margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::TileKind;

    #[test]
    fn test_new_session() {
        let state = GameState::new(Level::Classic).unwrap();
        assert_eq!(state.spawn, IVec2::new(W_BLOCKS / 2, H_BLOCKS - 3));
        assert_eq!(state.player.pos, state.spawn.as_vec2());
        assert!(state.pizzas.is_empty());
        assert!(!state.fell_out());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(Level::Classic).unwrap();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_fell_out_threshold() {
        let mut state = GameState::new(Level::Classic).unwrap();
        state.player.pos.y = (H_BLOCKS + 1) as f32;
        assert!(!state.fell_out());
        state.player.pos.y = (H_BLOCKS + 2) as f32;
        assert!(state.fell_out());
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut state = GameState::new(Level::Classic).unwrap();
        let pristine = state.world.cells_of(TileKind::Breakable);

        state.world.remove(pristine[0]);
        state.world.place(IVec2::new(-40, 3), TileKind::Ground);
        state.player.pos.x = 100.0;
        state.player.jump_velocity = 30.0;

        state.reset().unwrap();
        assert_eq!(state.world.cells_of(TileKind::Breakable), pristine);
        assert!(state.world.get(IVec2::new(-40, 3)).is_none());
        assert_eq!(state.player, Player::new(state.spawn));
        assert_eq!(state.resets, 1);
    }

    #[test]
    fn test_floor_follows_player() {
        let mut state = GameState::new(Level::Classic).unwrap();
        let far = 500;
        assert!(state.world.get(IVec2::new(far, H_BLOCKS - 2)).is_none());
        state.player.pos.x = far as f32 + 0.4;
        state.regenerate_floor().unwrap();
        assert!(state.world.get(IVec2::new(far, H_BLOCKS - 2)).is_some());
        assert!(state.world.get(IVec2::new(far, H_BLOCKS - 1)).is_some());
    }
}
