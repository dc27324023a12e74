//! Nova Raid - a wave-based arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, game state)
//! - `bridge`: Frame snapshots and events for the host's presentation layer
//!
//! The crate is headless. The host owns the frame clock (~60 Hz), reads its
//! input devices into an [`sim::InputState`], calls [`sim::tick`] once per
//! frame, and hands the resulting [`bridge::FrameSnapshot`] to whatever does
//! the drawing.

pub mod bridge;
pub mod sim;

pub use bridge::{FrameSnapshot, Presenter, publish};
pub use sim::{Command, GameSession, InputState, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default viewport size (overridable per session)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;
    /// Height of the HUD band reserved at the bottom of the viewport;
    /// the player cannot fly into it
    pub const HUD_MARGIN: f32 = 60.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// The ship starts this far above the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 120.0;
    /// Ticks between shots at level 1 (drops by 2 per level-up)
    pub const BASE_SHOOT_RATE: u32 = 15;
    pub const MIN_SHOOT_RATE: u32 = 8;
    pub const STARTING_LIVES: u32 = 3;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    /// Player shots travel straight up at this speed (px/tick)
    pub const PLAYER_SHOT_SPEED: f32 = 8.0;
    /// Sideways drift of the outer shots in a spread volley
    pub const SPREAD_SHOT_DRIFT: f32 = 3.0;
    /// Enemy shots travel down at this speed plus the difficulty multiplier
    pub const ENEMY_SHOT_BASE_SPEED: f32 = 3.0;
    /// Enemies only fire while above this margin off the bottom edge
    pub const ENEMY_FIRE_BAND_MARGIN: f32 = 200.0;

    /// Falling pickups: sizes and fall speeds (px/tick)
    pub const POWERUP_SIZE: f32 = 25.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const PLATFORM_WIDTH: f32 = 60.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    pub const PLATFORM_FALL_SPEED: f32 = 1.5;
    pub const WEAPON_BLOCK_SIZE: f32 = 30.0;
    pub const WEAPON_BLOCK_FALL_SPEED: f32 = 1.8;
    /// Every pickup family collides against the player with this square box
    pub const PICKUP_HITBOX: f32 = 25.0;

    /// Spawn intervals in ticks (enemies scale with level/time, see `sim::spawn`)
    pub const POWERUP_SPAWN_INTERVAL: u32 = 900;
    pub const PLATFORM_SPAWN_INTERVAL: u32 = 1800;
    pub const WEAPON_BLOCK_SPAWN_INTERVAL: u32 = 1200;

    /// Timed effects (ticks; 60 ticks = 1 s)
    pub const EFFECT_DURATION: u32 = 300;
    pub const WEAPON_DURATION: u32 = 450;
    pub const PARTICLE_LIFE: u32 = 30;
    /// Explosion flashes render as a square this big, centered on the blast
    pub const EXPLOSION_SIZE: f32 = 40.0;

    /// Level progression
    pub const MAX_LEVEL: u32 = 3;
    pub const LEVEL_THRESHOLDS: [u64; 3] = [2000, 5000, 10_000];
    pub const LEVEL_BONUS_PER_LIFE: u64 = 500;
    /// Pause on the level-complete screen before a final-level victory
    pub const VICTORY_DELAY: u32 = 180;
}

/// Center point of an axis-aligned box given its top-left corner and size
#[inline]
pub fn center_of(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
