//! Tile collision against the sparse grid
//!
//! Bodies keep a continuous position measured in tiles. A body straddling a
//! cell boundary may touch two cells, so every probe samples both the floor
//! and the ceiling of the relevant coordinate and reports contact if either
//! is blocking. Padding tolerances are in pixels and are compared against
//! positions scaled by [`BLOCK_SIZE`].

use glam::{IVec2, Vec2};

use super::tile::{TileRules, TileWorld};
use crate::consts::BLOCK_SIZE;
use crate::{ceil_cell, exact_cell, floor_cell};

/// Walls touching a body this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideContacts {
    pub left: bool,
    pub right: bool,
}

/// Grid probes for one tile world under one set of rules
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    world: &'a TileWorld,
    rules: &'a TileRules,
}

impl<'a> Resolver<'a> {
    pub fn new(world: &'a TileWorld, rules: &'a TileRules) -> Self {
        Self { world, rules }
    }

    #[inline]
    pub fn solid(&self, cell: IVec2) -> bool {
        self.world.is_solid(cell, self.rules)
    }

    /// Either of the columns `floor(x)` / `ceil(x)` is blocking on `row`
    #[inline]
    fn straddle_solid(&self, x: f32, row: i32) -> bool {
        self.solid(IVec2::new(floor_cell(x), row)) || self.solid(IVec2::new(ceil_cell(x), row))
    }

    /// Solid support under a body that has settled exactly on a row.
    ///
    /// Bodies mid-cell never count as supported here, only the integrator
    /// snaps them onto a row.
    pub fn support_below(&self, pos: Vec2) -> bool {
        match exact_cell(pos.y) {
            Some(row) => self.straddle_solid(pos.x, row + 1),
            None => false,
        }
    }

    /// Landing contact: ground one row under `ceil(y)`, body not rising, and
    /// within `padding_px` of the cell boundary.
    pub fn ground_contact(&self, pos: Vec2, vy: f32, padding_px: f32) -> bool {
        let row = ceil_cell(pos.y) + 1;
        self.straddle_solid(pos.x, row)
            && vy >= 0.0
            && pos.y * BLOCK_SIZE + padding_px >= pos.y.ceil() * BLOCK_SIZE
    }

    /// Wall contacts on the feet row `ceil(y)` and, unless crouched, on the
    /// head row `ceil(y - 1)`.
    pub fn side_contacts(&self, pos: Vec2, crouch: bool, padding_px: f32) -> SideContacts {
        let right_col = ceil_cell(pos.x);
        let left_col = floor_cell(pos.x);
        let feet = ceil_cell(pos.y);
        let head = ceil_cell(pos.y - 1.0);

        let touches = |col: i32| {
            self.solid(IVec2::new(col, feet)) || (!crouch && self.solid(IVec2::new(col, head)))
        };

        let within_right = (pos.x + 1.0) * BLOCK_SIZE + padding_px >= pos.x.ceil() * BLOCK_SIZE;
        let within_left = pos.x * BLOCK_SIZE + padding_px >= pos.x.floor() * BLOCK_SIZE;

        SideContacts {
            left: touches(left_col) && within_left,
            right: touches(right_col) && within_right,
        }
    }

    /// Ceiling contact: a blocking tile right above the hitbox (two rows up
    /// standing, one row up crouched), body not falling, within padding.
    pub fn ceiling_contact(&self, pos: Vec2, vy: f32, crouch: bool, padding_px: f32) -> bool {
        let reach = if crouch { 1.0 } else { 2.0 };
        let row = floor_cell(pos.y - reach);
        // Top edge of the hitbox, in rows
        let top = pos.y - reach + 1.0;

        self.straddle_solid(pos.x, row)
            && vy <= 0.0
            && top * BLOCK_SIZE - padding_px <= top.floor() * BLOCK_SIZE
    }

    /// Blocking cells a small body at `pos` overlaps on its own row
    pub fn overlapping(&self, pos: Vec2) -> impl Iterator<Item = IVec2> + '_ {
        let row = ceil_cell(pos.y);
        let left = IVec2::new(floor_cell(pos.x), row);
        let right = IVec2::new(ceil_cell(pos.x), row);
        let cells = if left == right {
            [Some(left), None]
        } else {
            [Some(left), Some(right)]
        };
        cells.into_iter().flatten().filter(move |c| self.solid(*c))
    }
}
