//! Deterministic simulation core
//!
//! Everything that decides gameplay sits in this module, under three rules:
//! - Tick-driven only (one call = one 60 Hz frame)
//! - All randomness comes from the session's seeded RNG
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::aabb_overlap;
pub use spawn::enemy_spawn_interval;
pub use state::{
    ActiveEffects, Command, Enemy, EnemyClass, GamePhase, GameSession, LifePlatform, Particle,
    ParticleCue, Player, Powerup, PowerupKind, Projectile, ProjectileOwner, SessionEvent,
    SpecialWeapon, WeaponBlock, WeaponKind,
};
pub use tick::{InputState, tick};
