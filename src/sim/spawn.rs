//! Timer-driven entity spawning
//!
//! Four independent timers tick up every frame; each one that reaches its
//! threshold resets to zero and injects one entity of its family. Enemy
//! pressure scales with level and elapsed time; the pickup families run on
//! fixed intervals.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{
    Enemy, EnemyClass, GameSession, LifePlatform, Powerup, PowerupKind, SpecialWeapon, WeaponBlock,
};
use crate::consts::*;

/// One counter per spawnable family
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy: u32,
    pub powerup: u32,
    pub platform: u32,
    pub weapon_block: u32,
}

/// Ticks between enemy spawns for a given level and elapsed tick count.
/// Non-increasing in both, floored at 30.
pub fn enemy_spawn_interval(level: u32, tick: u64) -> u32 {
    let interval = 120 - i64::from(level) * 20 - (tick / 1000) as i64 * 10;
    interval.max(30) as u32
}

/// Advance all spawn timers and inject whatever came due this tick
pub(crate) fn run(session: &mut GameSession) {
    session.spawn_timers.enemy += 1;
    if session.spawn_timers.enemy >= enemy_spawn_interval(session.level, session.tick_count) {
        session.spawn_timers.enemy = 0;
        spawn_enemy(session);
    }

    session.spawn_timers.powerup += 1;
    if session.spawn_timers.powerup >= POWERUP_SPAWN_INTERVAL {
        session.spawn_timers.powerup = 0;
        spawn_powerup(session);
    }

    session.spawn_timers.platform += 1;
    if session.spawn_timers.platform >= PLATFORM_SPAWN_INTERVAL {
        session.spawn_timers.platform = 0;
        spawn_platform(session);
    }

    session.spawn_timers.weapon_block += 1;
    if session.spawn_timers.weapon_block >= WEAPON_BLOCK_SPAWN_INTERVAL {
        session.spawn_timers.weapon_block = 0;
        spawn_weapon_block(session);
    }
}

/// One uniform draw decides the class. Bosses only appear from level 3,
/// mediums from level 2; the medium band sits behind the boss band so a
/// level-3 draw splits 10% / 20% / 70%.
fn roll_class(session: &mut GameSession) -> EnemyClass {
    let roll: f32 = session.rng.random();
    if session.level >= 3 && roll < 0.1 {
        EnemyClass::Boss
    } else if session.level >= 2 && roll < 0.3 {
        EnemyClass::Medium
    } else {
        EnemyClass::Basic
    }
}

fn spawn_enemy(session: &mut GameSession) {
    let class = roll_class(session);
    let size = class.size();
    let x = session.rng.random_range(0.0..session.view.x - size.x);
    let vel = Vec2::new(
        (session.rng.random::<f32>() - 0.5) * 2.0,
        (1.0 + session.game_speed + session.rng.random::<f32>()) * class.descent_damping(),
    );
    let shoot_timer = session.rng.random_range(60..180);
    let id = session.next_entity_id();
    session.enemies.push(Enemy {
        id,
        pos: Vec2::new(x, -size.y),
        vel,
        class,
        health: class.health(),
        shoot_timer,
    });
    log::debug!("spawned {:?} enemy #{id} at x={x:.0}", class);
}

fn spawn_powerup(session: &mut GameSession) {
    let kind = match session.rng.random_range(0..3) {
        0 => PowerupKind::Rapid,
        1 => PowerupKind::Shield,
        _ => PowerupKind::MultiShot,
    };
    let x = session.rng.random_range(0.0..session.view.x - POWERUP_SIZE);
    let id = session.next_entity_id();
    session.powerups.push(Powerup {
        id,
        pos: Vec2::new(x, -POWERUP_SIZE),
        vel: Vec2::new(0.0, POWERUP_FALL_SPEED),
        kind,
    });
    log::debug!("spawned {:?} powerup #{id}", kind);
}

fn spawn_platform(session: &mut GameSession) {
    let x = session.rng.random_range(0.0..session.view.x - PLATFORM_WIDTH);
    let id = session.next_entity_id();
    session.platforms.push(LifePlatform {
        id,
        pos: Vec2::new(x, -PLATFORM_HEIGHT),
        vel: Vec2::new(0.0, PLATFORM_FALL_SPEED),
    });
    log::debug!("spawned life platform #{id}");
}

fn spawn_weapon_block(session: &mut GameSession) {
    let kind = match session.rng.random_range(0..3) {
        0 => SpecialWeapon::Rocket,
        1 => SpecialWeapon::Triple,
        _ => SpecialWeapon::Laser,
    };
    let x = session
        .rng
        .random_range(0.0..session.view.x - WEAPON_BLOCK_SIZE);
    let id = session.next_entity_id();
    session.weapon_blocks.push(WeaponBlock {
        id,
        pos: Vec2::new(x, -WEAPON_BLOCK_SIZE),
        vel: Vec2::new(0.0, WEAPON_BLOCK_FALL_SPEED),
        kind,
    });
    log::debug!("spawned {:?} weapon block #{id}", kind);
}
