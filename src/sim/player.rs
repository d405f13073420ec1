//! Player body: input handling, gravity and tile collision
//!
//! Grounded/airborne, crouch and facing combine freely, so they are kept as
//! independent fields rather than one state enum. Stuck flags are recomputed
//! from the current geometry every tick.

use glam::{IVec2, Vec2};

use super::collision::Resolver;
use super::tick::TickInput;
use crate::consts::BLOCK_SIZE;
use crate::round_tenth;
use crate::tuning::Tuning;

/// Share of the landing window a falling body may cover in one tick
const FALL_STEP_FRACTION: f32 = 0.9;

/// Direction the player is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Front,
    Left,
    Right,
}

impl Direction {
    /// Horizontal sign of travel (Front has none)
    pub fn sign(self) -> Option<f32> {
        match self {
            Direction::Front => None,
            Direction::Left => Some(-1.0),
            Direction::Right => Some(1.0),
        }
    }
}

/// Which sides are blocked this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stuck {
    pub from_left: bool,
    pub from_right: bool,
    pub from_top: bool,
}

/// The player entity
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Position in tiles: x is the column, y the row of the feet
    pub pos: Vec2,
    /// Vertical velocity (tiles/s, positive is down)
    pub jump_velocity: f32,
    pub crouch: bool,
    pub stuck: Stuck,
    pub direction: Direction,
    /// Throw input was down last tick (throws fire on the press only)
    pub throw_held: bool,
}

impl Player {
    pub fn new(spawn: IVec2) -> Self {
        Self {
            pos: spawn.as_vec2(),
            jump_velocity: 0.0,
            crouch: false,
            stuck: Stuck::default(),
            direction: Direction::Front,
            throw_held: false,
        }
    }

    /// Back to the spawn cell with all motion and flags cleared
    pub fn respawn(&mut self, spawn: IVec2) {
        *self = Self::new(spawn);
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.jump_velocity != 0.0
    }

    /// Start a jump if standing on something and nothing is overhead.
    /// Returns whether the jump happened.
    pub fn try_jump(&mut self, resolver: &Resolver<'_>, tuning: &Tuning) -> bool {
        if self.stuck.from_top || !resolver.support_below(self.pos) {
            return false;
        }
        self.jump_velocity = -(2.0 * tuning.gravity * tuning.jump_apex(self.crouch)).sqrt();
        true
    }

    /// Apply one tick of held input.
    ///
    /// Speed and jump height come from last tick's crouch state; crouch is
    /// re-evaluated afterwards and latches while a ceiling is overhead.
    pub fn apply_input(
        &mut self,
        input: &TickInput,
        resolver: &Resolver<'_>,
        tuning: &Tuning,
        dt: f32,
    ) {
        self.direction = Direction::Front;

        if input.up {
            self.try_jump(resolver, tuning);
        }

        let speed = tuning.speed(self.crouch);
        if input.left {
            if !self.stuck.from_left {
                self.pos.x -= dt * speed;
            }
            self.direction = Direction::Left;
        }
        if input.right {
            if !self.stuck.from_right {
                self.pos.x += dt * speed;
            }
            self.direction = Direction::Right;
        }

        self.crouch = input.down || (self.crouch && self.stuck.from_top);

        self.pos.x = round_tenth(self.pos.x);
    }

    /// Advance under gravity, then resolve floor, walls and ceiling in that
    /// order.
    ///
    /// A falling body drops less than `vertical_padding_px` per tick so it
    /// cannot skip the landing window, whatever `dt` is.
    pub fn integrate(&mut self, resolver: &Resolver<'_>, tuning: &Tuning, dt: f32) {
        // Floor
        if resolver.ground_contact(self.pos, self.jump_velocity, tuning.vertical_padding_px) {
            self.jump_velocity = 0.0;
            self.pos.y = self.pos.y.ceil();
        } else {
            let max_drop = FALL_STEP_FRACTION * tuning.vertical_padding_px / BLOCK_SIZE;
            let drop = self.jump_velocity * dt + 0.5 * tuning.gravity * dt * dt;
            self.pos.y += drop.min(max_drop);
            self.jump_velocity = (self.jump_velocity + tuning.gravity * dt).min(max_drop / dt);
        }

        // Walls: both sides are probed before either snap
        let sides = resolver.side_contacts(self.pos, self.crouch, tuning.horizontal_padding_px);
        if sides.right {
            self.pos.x = self.pos.x.floor();
        }
        self.stuck.from_right = sides.right;
        if sides.left {
            self.pos.x = self.pos.x.ceil();
        }
        self.stuck.from_left = sides.left;

        // Ceiling
        let ceiling = resolver.ceiling_contact(
            self.pos,
            self.jump_velocity,
            self.crouch,
            tuning.vertical_padding_px,
        );
        if ceiling {
            self.jump_velocity = 0.0;
            self.pos.y = self.pos.y.floor();
        }
        self.stuck.from_top = ceiling;
    }
}
