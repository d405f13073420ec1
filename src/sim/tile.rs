//! Sparse tile grid
//!
//! Cells are integer (x, y) with x rightward and y downward. Absent cells
//! are empty and never block anything. Placing onto an occupied cell
//! overwrites it.

use std::collections::HashMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Brick ground, floors and hills
    #[default]
    Ground,
    /// Brick that a pizza can knock out
    Breakable,
    /// Sky decoration
    Cloud,
    /// Ground-level decoration
    Bush,
}

impl TileKind {
    pub const ALL: [TileKind; 4] = [
        TileKind::Ground,
        TileKind::Breakable,
        TileKind::Cloud,
        TileKind::Bush,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A compact set of tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSet(u8);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);

    #[inline]
    pub fn contains(self, kind: TileKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: TileKind) {
        self.0 |= kind.bit();
    }

    pub fn intersection(self, other: KindSet) -> KindSet {
        KindSet(self.0 & other.0)
    }
}

impl FromIterator<TileKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = TileKind>>(iter: I) -> Self {
        let mut set = KindSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// Which kinds stop bodies and which of those pizzas destroy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRules {
    pub blocking: KindSet,
    /// Always a subset of `blocking`
    pub breakable: KindSet,
}

impl TileRules {
    pub fn new(blocking: KindSet, breakable: KindSet) -> Self {
        Self {
            blocking,
            breakable: breakable.intersection(blocking),
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.blocking.iter().copied().collect(),
            tuning.breakable.iter().copied().collect(),
        )
    }

    #[inline]
    pub fn is_solid(&self, kind: TileKind) -> bool {
        self.blocking.contains(kind)
    }

    #[inline]
    pub fn is_breakable(&self, kind: TileKind) -> bool {
        self.breakable.contains(kind)
    }
}

impl Default for TileRules {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

/// A placed tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    /// Absolute clock time after which the tile vanishes (static tiles: `None`)
    pub expires_at: Option<f64>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            expires_at: None,
        }
    }

    pub fn timed(kind: TileKind, expires_at: f64) -> Self {
        Self {
            kind,
            expires_at: Some(expires_at),
        }
    }
}

/// All placed tiles of one session
#[derive(Debug, Clone, Default)]
pub struct TileWorld {
    tiles: HashMap<IVec2, Tile>,
    /// Tiles carrying an expiry
    timed: usize,
}

impl TileWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a static tile, overwriting whatever was there
    pub fn place(&mut self, cell: IVec2, kind: TileKind) {
        self.insert(cell, Tile::new(kind));
    }

    pub fn insert(&mut self, cell: IVec2, tile: Tile) {
        if tile.expires_at.is_some() {
            self.timed += 1;
        }
        if let Some(old) = self.tiles.insert(cell, tile) {
            self.forget(old);
        }
    }

    #[inline]
    pub fn get(&self, cell: IVec2) -> Option<Tile> {
        self.tiles.get(&cell).copied()
    }

    /// Remove a tile, returning it if the cell was occupied
    pub fn remove(&mut self, cell: IVec2) -> Option<Tile> {
        let old = self.tiles.remove(&cell)?;
        self.forget(old);
        Some(old)
    }

    fn forget(&mut self, old: Tile) {
        if old.expires_at.is_some() {
            self.timed -= 1;
        }
    }

    /// True if the cell holds a tile the rules consider blocking
    #[inline]
    pub fn is_solid(&self, cell: IVec2, rules: &TileRules) -> bool {
        self.get(cell).is_some_and(|t| rules.is_solid(t.kind))
    }

    /// Drop every timed tile whose expiry has passed
    pub fn remove_expired(&mut self, now: f64) -> usize {
        if self.timed == 0 {
            return 0;
        }
        let before = self.tiles.len();
        self.tiles
            .retain(|_, tile| tile.expires_at.is_none_or(|at| now < at));
        let removed = before - self.tiles.len();
        self.timed -= removed;
        removed
    }

    /// Number of tiles that will expire
    pub fn timed_len(&self) -> usize {
        self.timed
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.timed = 0;
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over occupied cells (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().map(|(cell, tile)| (*cell, *tile))
    }

    /// Occupied cells of one kind, sorted by (x, y)
    pub fn cells_of(&self, kind: TileKind) -> Vec<IVec2> {
        let mut cells: Vec<IVec2> = self
            .tiles
            .iter()
            .filter(|(_, t)| t.kind == kind)
            .map(|(c, _)| *c)
            .collect();
        cells.sort_by_key(|c| (c.x, c.y));
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_place_get_remove() {
        let mut world = TileWorld::new();
        let cell = IVec2::new(3, -7);
        assert!(world.get(cell).is_none());

        world.place(cell, TileKind::Ground);
        assert_eq!(world.get(cell).map(|t| t.kind), Some(TileKind::Ground));

        world.place(cell, TileKind::Breakable);
        assert_eq!(world.get(cell).map(|t| t.kind), Some(TileKind::Breakable));
        assert_eq!(world.len(), 1);

        assert!(world.remove(cell).is_some());
        assert!(world.remove(cell).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_default_rules() {
        let rules = TileRules::default();
        assert!(rules.is_solid(TileKind::Ground));
        assert!(rules.is_solid(TileKind::Breakable));
        assert!(!rules.is_solid(TileKind::Cloud));
        assert!(!rules.is_solid(TileKind::Bush));
        assert!(rules.is_breakable(TileKind::Breakable));
        assert!(!rules.is_breakable(TileKind::Ground));
    }

    #[test]
    fn test_breakable_is_subset_of_blocking() {
        let rules = TileRules::new(
            [TileKind::Ground].into_iter().collect(),
            [TileKind::Breakable, TileKind::Ground].into_iter().collect(),
        );
        assert!(!rules.is_breakable(TileKind::Breakable));
        assert!(rules.is_breakable(TileKind::Ground));
    }

    #[test]
    fn test_decorative_tiles_are_not_solid() {
        let mut world = TileWorld::new();
        let rules = TileRules::default();
        world.place(IVec2::new(0, 0), TileKind::Cloud);
        world.place(IVec2::new(1, 0), TileKind::Ground);
        assert!(!world.is_solid(IVec2::new(0, 0), &rules));
        assert!(world.is_solid(IVec2::new(1, 0), &rules));
        assert!(!world.is_solid(IVec2::new(2, 0), &rules));
    }

    #[test]
    fn test_remove_expired() {
        let mut world = TileWorld::new();
        world.place(IVec2::new(0, 0), TileKind::Ground);
        world.insert(IVec2::new(1, 0), Tile::timed(TileKind::Breakable, 2.0));

        assert_eq!(world.timed_len(), 1);
        assert_eq!(world.remove_expired(1.5), 0);
        assert_eq!(world.remove_expired(2.0), 1);
        assert!(world.get(IVec2::new(1, 0)).is_none());
        assert!(world.get(IVec2::new(0, 0)).is_some());
        assert_eq!(world.timed_len(), 0);
    }

    #[test]
    fn test_timed_count_follows_overwrites() {
        let mut world = TileWorld::new();
        let cell = IVec2::new(4, 4);

        world.insert(cell, Tile::timed(TileKind::Breakable, 1.0));
        world.insert(cell, Tile::timed(TileKind::Ground, 3.0));
        assert_eq!(world.timed_len(), 1);

        // A static tile over a timed one never expires
        world.place(cell, TileKind::Ground);
        assert_eq!(world.timed_len(), 0);
        assert_eq!(world.remove_expired(10.0), 0);
        assert!(world.get(cell).is_some());

        world.insert(cell, Tile::timed(TileKind::Ground, 3.0));
        world.insert(IVec2::new(5, 4), Tile::timed(TileKind::Ground, 3.0));
        assert!(world.remove(cell).is_some());
        assert_eq!(world.timed_len(), 1);

        world.clear();
        assert_eq!(world.timed_len(), 0);
        assert!(world.is_empty());
    }

    fn kind_strategy() -> impl Strategy<Value = TileKind> {
        prop::sample::select(TileKind::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn last_write_wins(
            writes in prop::collection::vec(((-20i32..20, -20i32..20), kind_strategy()), 0..100),
            probes in prop::collection::vec((-25i32..25, -25i32..25), 0..50),
        ) {
            let mut world = TileWorld::new();
            let mut expected: HashMap<IVec2, TileKind> = HashMap::new();
            for ((x, y), kind) in &writes {
                world.place(IVec2::new(*x, *y), *kind);
                expected.insert(IVec2::new(*x, *y), *kind);
            }
            prop_assert_eq!(world.len(), expected.len());
            for (x, y) in probes {
                let cell = IVec2::new(x, y);
                prop_assert_eq!(world.get(cell).map(|t| t.kind), expected.get(&cell).copied());
            }
        }
    }
}
