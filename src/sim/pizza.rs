//! Thrown pizzas
//!
//! A pizza flies horizontally until its expiry timestamp passes. Striking a
//! blocking tile cuts the expiry short so the next sweep removes it; a
//! breakable tile it strikes is deleted on the spot.

use glam::{IVec2, Vec2};

use super::collision::Resolver;
use super::player::{Direction, Player};
use super::tile::{TileRules, TileWorld};

/// Full pizzas are thrown standing, minis while crouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PizzaKind {
    Full,
    Mini,
}

/// A pizza entity
#[derive(Debug, Clone, PartialEq)]
pub struct Pizza {
    pub id: u32,
    pub pos: Vec2,
    /// Left or Right, never Front
    pub direction: Direction,
    pub kind: PizzaKind,
    /// Absolute clock time at which the pizza is swept away
    pub expires_at: f64,
}

impl Pizza {
    /// Pizza leaving the thrower's hand, or `None` when facing Front.
    ///
    /// Spawns one tile ahead, at head height standing or chest height
    /// crouched.
    pub fn thrown_by(id: u32, player: &Player, now: f64, lifetime: f64) -> Option<Self> {
        let dx = player.direction.sign()?;
        let (row, kind) = if player.crouch {
            (player.pos.y, PizzaKind::Mini)
        } else {
            (player.pos.y - 1.0, PizzaKind::Full)
        };

        Some(Self {
            id,
            pos: Vec2::new(player.pos.x + dx, row),
            direction: player.direction,
            kind,
            expires_at: now + lifetime,
        })
    }

    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        now >= self.expires_at
    }

    pub fn advance(&mut self, dt: f32, speed: f32) {
        if let Some(sign) = self.direction.sign() {
            self.pos.x += sign * dt * speed;
        }
    }

    /// Resolve contact with the grid. Returns the breakable cells destroyed.
    pub fn strike(&mut self, world: &mut TileWorld, rules: &TileRules, now: f64) -> Vec<IVec2> {
        let hits: Vec<IVec2> = Resolver::new(world, rules).overlapping(self.pos).collect();
        if hits.is_empty() {
            return Vec::new();
        }

        self.expires_at = self.expires_at.min(now);

        let mut broken = Vec::new();
        for cell in hits {
            let breakable = world
                .get(cell)
                .is_some_and(|tile| rules.is_breakable(tile.kind));
            if breakable && world.remove(cell).is_some() {
                broken.push(cell);
            }
        }
        broken
    }
}

/// Sweep expired pizzas, then fly and resolve the rest.
/// Returns the number of tiles destroyed.
pub fn update_pizzas(
    pizzas: &mut Vec<Pizza>,
    world: &mut TileWorld,
    rules: &TileRules,
    speed: f32,
    dt: f32,
    now: f64,
) -> usize {
    pizzas.retain(|pizza| {
        let expired = pizza.is_expired(now);
        if expired {
            log::debug!("Pizza {} gone at ({:.1}, {:.1})", pizza.id, pizza.pos.x, pizza.pos.y);
        }
        !expired
    });

    let mut destroyed = 0;
    for pizza in pizzas.iter_mut() {
        pizza.advance(dt, speed);
        for cell in pizza.strike(world, rules, now) {
            log::debug!("Pizza {} broke tile at ({}, {})", pizza.id, cell.x, cell.y);
            destroyed += 1;
        }
    }
    destroyed
}
