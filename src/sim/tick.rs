//! Per-frame simulation step
//!
//! One call advances the session by one 60 Hz frame: sample input, integrate
//! movement, run timers and fire control, cull what left the viewport, let
//! the spawner inject newcomers, resolve collisions, then check level
//! progression. The host is expected to call this from its frame clock and
//! simply stop calling while the game is paused.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::spawn;
use super::state::{GamePhase, GameSession, Projectile, ProjectileOwner, WeaponKind};
use crate::consts::*;

/// Instantaneous key state, sampled once per tick (never blocked on)
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Advance the game state by one frame
pub fn tick(session: &mut GameSession, input: &InputState) {
    match session.phase {
        GamePhase::Playing => {}
        GamePhase::LevelComplete if session.victory_countdown > 0 => {
            // The only motion outside Playing: the delayed victory
            // transition after clearing the final level
            session.victory_countdown -= 1;
            if session.victory_countdown == 0 {
                session.game_over(true);
            }
            return;
        }
        _ => return,
    }

    session.tick_count += 1;

    handle_input(session, input);
    update_projectiles(session);
    update_enemies(session);
    update_pickups(session);
    update_particles(session);
    spawn::run(session);
    collision::resolve(session);

    // Effects wind down after resolution; a shield on its last tick still
    // blocks this tick's hits
    session.player.effects.step();
    session.player.step_weapon();

    check_level_complete(session);
}

/// Clamp-move the ship and handle the fire key with its cooldown
fn handle_input(session: &mut GameSession, input: &InputState) {
    let view = session.view;
    {
        let player = &mut session.player;
        if input.left {
            player.pos.x = (player.pos.x - PLAYER_SPEED).max(0.0);
        }
        if input.right {
            player.pos.x = (player.pos.x + PLAYER_SPEED).min(view.x - PLAYER_WIDTH);
        }
        if input.up {
            player.pos.y = (player.pos.y - PLAYER_SPEED).max(0.0);
        }
        if input.down {
            player.pos.y =
                (player.pos.y + PLAYER_SPEED).min(view.y - PLAYER_HEIGHT - HUD_MARGIN);
        }
    }

    if input.fire && session.player.shoot_cooldown == 0 {
        fire_volley(session);
        let rate = session.player.shoot_rate;
        session.player.shoot_cooldown = if session.player.effects.rapid_fire() {
            rate / 3
        } else {
            rate
        };
    }
    session.player.shoot_cooldown = session.player.shoot_cooldown.saturating_sub(1);
}

/// Spawn the ship's shots: one straight up, or a three-way spread while
/// triple/multi-shot is active
fn fire_volley(session: &mut GameSession) {
    let kind = session.player.shot_kind();
    let damage = kind.damage();
    let origin = Vec2::new(
        session.player.pos.x + PLAYER_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0,
        session.player.pos.y,
    );
    let drifts: &[f32] = if session.player.spread_active() {
        &[0.0, -SPREAD_SHOT_DRIFT, SPREAD_SHOT_DRIFT]
    } else {
        &[0.0]
    };
    for &dx in drifts {
        let id = session.next_entity_id();
        session.projectiles.push(Projectile {
            id,
            pos: origin,
            vel: Vec2::new(dx, -PLAYER_SHOT_SPEED),
            owner: ProjectileOwner::Player,
            kind,
            damage,
        });
    }
}

/// Integrate shots and cull the ones that left the viewport
fn update_projectiles(session: &mut GameSession) {
    let view_h = session.view.y;
    session.projectiles.retain_mut(|shot| {
        shot.pos += shot.vel;
        match shot.owner {
            ProjectileOwner::Player => shot.pos.y >= 0.0,
            ProjectileOwner::Enemy => shot.pos.y <= view_h,
        }
    });
}

/// Integrate enemies (scaled by difficulty), bounce off the side walls,
/// run fire control, cull whatever escaped out the bottom
fn update_enemies(session: &mut GameSession) {
    let view = session.view;
    let mut muzzles: Vec<Vec2> = Vec::new();

    for enemy in session.enemies.iter_mut() {
        enemy.pos += enemy.vel * session.game_speed;

        let size = enemy.size();
        if enemy.pos.x <= 0.0 || enemy.pos.x >= view.x - size.x {
            enemy.vel.x = -enemy.vel.x;
        }

        // The timer always counts down; expiry only matters while the
        // enemy is inside the on-screen firing band
        enemy.shoot_timer -= 1;
        if enemy.shoot_timer <= 0
            && enemy.pos.y > 0.0
            && enemy.pos.y < view.y - ENEMY_FIRE_BAND_MARGIN
        {
            if session.rng.random::<f32>() < enemy.class.fire_chance() {
                muzzles.push(Vec2::new(
                    enemy.pos.x + size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
                    enemy.pos.y + size.y,
                ));
            }
            enemy.shoot_timer = session.rng.random_range(60..240);
        }
    }

    session.enemies.retain(|e| e.pos.y <= view.y);

    // Deferred so the enemy loop doesn't fight the projectile list
    let shot_speed = ENEMY_SHOT_BASE_SPEED + session.game_speed;
    for muzzle in muzzles {
        let id = session.next_entity_id();
        session.projectiles.push(Projectile {
            id,
            pos: muzzle,
            vel: Vec2::new(0.0, shot_speed),
            owner: ProjectileOwner::Enemy,
            kind: WeaponKind::Standard,
            damage: 1,
        });
    }
}

/// All three pickup families just fall and vanish past the bottom edge
fn update_pickups(session: &mut GameSession) {
    let view_h = session.view.y;
    session.powerups.retain_mut(|p| {
        p.pos += p.vel;
        p.pos.y <= view_h
    });
    session.platforms.retain_mut(|p| {
        p.pos += p.vel;
        p.pos.y <= view_h
    });
    session.weapon_blocks.retain_mut(|b| {
        b.pos += b.vel;
        b.pos.y <= view_h
    });
}

fn update_particles(session: &mut GameSession) {
    for particle in session.particles.iter_mut() {
        particle.life = particle.life.saturating_sub(1);
    }
    session.particles.retain(|p| p.life > 0);
}

/// Fire the level-complete transition the instant the threshold is crossed.
/// Only checked while Playing, so the transition (and its bonus) cannot
/// re-fire for the same crossing.
fn check_level_complete(session: &mut GameSession) {
    if session.phase != GamePhase::Playing || session.level > MAX_LEVEL {
        return;
    }
    let threshold = LEVEL_THRESHOLDS[(session.level - 1) as usize];
    if session.score >= threshold {
        session.complete_level();
    }
}
