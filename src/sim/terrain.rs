//! Procedural terrain: floors, staircases, hills and level layouts
//!
//! Every builder writes straight into a [`TileWorld`]. Placement overwrites,
//! so re-running a builder over the same cells is idempotent.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use super::tile::{TileKind, TileWorld};
use crate::consts::*;

/// Rejected terrain parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: i32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: i32 },
}

fn require_positive(name: &'static str, value: i32) -> Result<(), TerrainError> {
    if value <= 0 {
        return Err(TerrainError::NonPositive { name, value });
    }
    Ok(())
}

/// Integer ceiling division for positive operands
#[inline]
fn div_ceil(a: i32, b: i32) -> i32 {
    (a + b - 1) / b
}

/// Row of the floor surface
pub const FLOOR_ROW: i32 = H_BLOCKS - 2;

/// Row standing bodies rest on top of the floor
pub const GROUND_LEVEL: i32 = H_BLOCKS - 3;

/// Lay the two-row floor under the window anchored at `anchor_x`.
///
/// Columns span `width + 2 * extra_margin`, starting `width / 2 + extra_margin`
/// left of the anchor.
pub fn build_floor(
    world: &mut TileWorld,
    anchor_x: i32,
    width: i32,
    extra_margin: i32,
) -> Result<(), TerrainError> {
    require_positive("width", width)?;
    if extra_margin < 0 {
        return Err(TerrainError::Negative {
            name: "extra_margin",
            value: extra_margin,
        });
    }

    let left = anchor_x - width / 2 - extra_margin;
    for i in 0..width + 2 * extra_margin {
        world.place(IVec2::new(left + i, FLOOR_ROW + 1), TileKind::Ground);
        world.place(IVec2::new(left + i, FLOOR_ROW), TileKind::Ground);
    }
    Ok(())
}

/// Staircase with unit rise. Returns the horizontal span.
///
/// Group `i` covers `step_length` columns filled from `start.y` up to
/// `start.y - i`. Ascending stairs are laid left to right from `start.x`;
/// descending stairs are mirrored so the tallest group sits at `start.x`.
pub fn build_staircase(
    world: &mut TileWorld,
    start: IVec2,
    kind: TileKind,
    steps: i32,
    step_length: i32,
    ascending: bool,
) -> Result<i32, TerrainError> {
    build_stepped(world, start, kind, steps, step_length, 1, ascending)
}

/// Staircase where each group is `step_height` rows taller than the last
pub fn build_stepped(
    world: &mut TileWorld,
    start: IVec2,
    kind: TileKind,
    steps: i32,
    step_length: i32,
    step_height: i32,
    ascending: bool,
) -> Result<i32, TerrainError> {
    require_positive("steps", steps)?;
    require_positive("step_length", step_length)?;
    require_positive("step_height", step_height)?;

    for i in 0..steps {
        let slot = if ascending { i } else { steps - 1 - i };
        let top = start.y - ((i + 1) * step_height - 1);
        for dx in 0..step_length {
            let x = start.x + slot * step_length + dx;
            for y in top..=start.y {
                world.place(IVec2::new(x, y), kind);
            }
        }
    }

    Ok(steps * step_length)
}

/// Symmetric stepped hill. Returns the total horizontal span.
///
/// Odd `length` truncates to `length / 2` steps per side.
pub fn build_hill(
    world: &mut TileWorld,
    start: IVec2,
    kind: TileKind,
    height: i32,
    length: i32,
) -> Result<i32, TerrainError> {
    require_positive("height", height)?;
    require_positive("length", length)?;

    let stair_height = div_ceil(height, 2 * length);
    let stair_length = div_ceil(length, 2 * stair_height);
    let steps = length / 2;

    let up = build_stepped(world, start, kind, steps, stair_length, stair_height, true)?;
    let down = build_stepped(
        world,
        start + IVec2::new(up, 0),
        kind,
        steps,
        stair_length,
        stair_height,
        false,
    )?;
    Ok(up + down)
}

/// Solid rectangle of `width` x `height` tiles resting on row `base.y`
pub fn build_block(
    world: &mut TileWorld,
    base: IVec2,
    kind: TileKind,
    width: i32,
    height: i32,
) -> Result<(), TerrainError> {
    require_positive("width", width)?;
    require_positive("height", height)?;
    for dx in 0..width {
        for dy in 0..height {
            world.place(IVec2::new(base.x + dx, base.y - dy), kind);
        }
    }
    Ok(())
}

/// Where the player starts on every level
pub fn spawn_cell() -> IVec2 {
    IVec2::new(W_BLOCKS / 2, GROUND_LEVEL)
}

/// The fixed opening level. Returns the spawn cell.
pub fn map_0(world: &mut TileWorld, floor_margin: i32) -> Result<IVec2, TerrainError> {
    let spawn = spawn_cell();
    let (x, y) = (spawn.x, GROUND_LEVEL);

    build_floor(world, x, W_BLOCKS, floor_margin)?;

    // Knock-out bricks just right of spawn
    build_block(world, IVec2::new(x + 6, y), TileKind::Breakable, 2, 2)?;

    let first = x + 14;
    let span = build_hill(world, IVec2::new(first, y), TileKind::Ground, 4, 8)?;
    build_hill(
        world,
        IVec2::new(first + span + 8, y),
        TileKind::Ground,
        20,
        6,
    )?;

    world.place(IVec2::new(x - 10, 6), TileKind::Cloud);
    world.place(IVec2::new(x - 9, 6), TileKind::Cloud);
    world.place(IVec2::new(x + 20, 4), TileKind::Cloud);
    world.place(IVec2::new(x - 4, y), TileKind::Bush);

    Ok(spawn)
}

/// Seeded level: a run of hills with breakable clusters in between.
/// Same seed, same layout. Returns the spawn cell.
pub fn map_procedural(
    world: &mut TileWorld,
    floor_margin: i32,
    seed: u64,
) -> Result<IVec2, TerrainError> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let spawn = spawn_cell();
    let y = GROUND_LEVEL;

    build_floor(world, spawn.x, W_BLOCKS, floor_margin)?;

    let mut x = spawn.x + rng.random_range(5..9);
    let hills = rng.random_range(3..6);
    for _ in 0..hills {
        if rng.random_bool(0.5) {
            let height = rng.random_range(1..3);
            let width = rng.random_range(1..4);
            build_block(world, IVec2::new(x, y), TileKind::Breakable, width, height)?;
            x += width + rng.random_range(3..6);
        }

        let height = rng.random_range(2..13);
        let length = rng.random_range(2..17);
        x += build_hill(world, IVec2::new(x, y), TileKind::Ground, height, length)?;
        x += rng.random_range(4..11);

        if rng.random_bool(0.3) {
            world.place(IVec2::new(x - 2, y), TileKind::Bush);
        }
        if rng.random_bool(0.5) {
            world.place(IVec2::new(x, rng.random_range(2..9)), TileKind::Cloud);
        }
    }

    log::debug!("Procedural level {} built, extends to column {}", seed, x);
    Ok(spawn)
}
