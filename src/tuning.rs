//! Physics and gameplay tuning
//!
//! Loaded from a JSON file; any missing field falls back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::TileKind;

/// Errors raised while reading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("cannot read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value: {0}")]
    Invalid(String),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (tiles/s²)
    pub gravity: f32,
    /// Horizontal speed while standing (tiles/s)
    pub walk_speed: f32,
    /// Horizontal speed while crouched (tiles/s)
    pub crouch_speed: f32,
    /// Jump apex while standing (tiles)
    pub jump_height: f32,
    /// Jump apex while crouched (tiles)
    pub crouch_jump_height: f32,

    // === Collision ===
    /// Floor/ceiling contact tolerance (pixels)
    pub vertical_padding_px: f32,
    /// Wall contact tolerance (pixels)
    pub horizontal_padding_px: f32,
    /// Kinds that stop bodies
    pub blocking: Vec<TileKind>,
    /// Blocking kinds a pizza destroys
    pub breakable: Vec<TileKind>,

    // === Pizzas ===
    pub pizza_speed: f32,
    pub pizza_lifetime_secs: f64,

    // === World ===
    /// Floor tiles laid past each window edge
    pub floor_margin: i32,
    /// Rows below the window before the session resets
    pub fall_margin: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            walk_speed: WALK_SPEED,
            crouch_speed: CROUCH_SPEED,
            jump_height: JUMP_HEIGHT,
            crouch_jump_height: CROUCH_JUMP_HEIGHT,

            vertical_padding_px: VERTICAL_PADDING_PX,
            horizontal_padding_px: HORIZONTAL_PADDING_PX,
            blocking: vec![TileKind::Ground, TileKind::Breakable],
            breakable: vec![TileKind::Breakable],

            pizza_speed: PIZZA_SPEED,
            pizza_lifetime_secs: PIZZA_LIFETIME_SECS,

            floor_margin: FLOOR_MARGIN,
            fall_margin: FALL_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate tuning from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from a file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning ({})", err);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("walk_speed", self.walk_speed),
            ("crouch_speed", self.crouch_speed),
            ("jump_height", self.jump_height),
            ("crouch_jump_height", self.crouch_jump_height),
            ("pizza_speed", self.pizza_speed),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        let padding = [
            ("vertical_padding_px", self.vertical_padding_px),
            ("horizontal_padding_px", self.horizontal_padding_px),
        ];
        for (name, value) in padding {
            if value.is_nan() || value <= 0.0 || value >= BLOCK_SIZE {
                return Err(TuningError::Invalid(format!(
                    "{name} must lie in (0, {BLOCK_SIZE}), got {value}"
                )));
            }
        }
        if self.pizza_lifetime_secs.is_nan() || self.pizza_lifetime_secs <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "pizza_lifetime_secs must be positive, got {}",
                self.pizza_lifetime_secs
            )));
        }
        if self.floor_margin < 0 || self.fall_margin < 0 {
            return Err(TuningError::Invalid("margins must not be negative".into()));
        }
        if let Some(kind) = self.breakable.iter().find(|k| !self.blocking.contains(k)) {
            return Err(TuningError::Invalid(format!(
                "breakable kind {kind:?} is not blocking"
            )));
        }
        Ok(())
    }

    /// Horizontal speed for the given crouch state
    pub fn speed(&self, crouch: bool) -> f32 {
        if crouch { self.crouch_speed } else { self.walk_speed }
    }

    /// Jump apex for the given crouch state
    pub fn jump_apex(&self, crouch: bool) -> f32 {
        if crouch {
            self.crouch_jump_height
        } else {
            self.jump_height
        }
    }
}
