//! Axis-aligned collision detection and ordered resolution
//!
//! Everything in the game is a box, so detection is a single "not disjoint"
//! test. Resolution runs in a fixed pass order once per tick; entities
//! consumed by an earlier pass are marked dead and skipped by later passes,
//! then compacted out in one sweep. Nothing is removed mid-iteration.

use glam::Vec2;

use super::state::{GameSession, ParticleCue, PowerupKind, ProjectileOwner, SpecialWeapon};
use crate::center_of;
use crate::consts::*;

/// Strict "not disjoint" box test. Touching edges count as overlap.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    !(a_pos.x + a_size.x < b_pos.x
        || a_pos.x > b_pos.x + b_size.x
        || a_pos.y + a_size.y < b_pos.y
        || a_pos.y > b_pos.y + b_size.y)
}

/// Drop every element whose flag in `dead` is set, preserving order
fn compact<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !dead[idx];
        idx += 1;
        keep
    });
}

/// Resolve all pairwise interactions for this tick.
///
/// Pass order: player shots × enemies, enemy shots × player, enemies ×
/// player, then the three pickup families × player. The order keeps score
/// and explosion effects consistent with what the player saw happen first.
pub(crate) fn resolve(session: &mut GameSession) {
    let mut shot_dead = vec![false; session.projectiles.len()];
    let mut enemy_dead = vec![false; session.enemies.len()];
    let mut explosions: Vec<Vec2> = Vec::new();

    // 1. Player shots vs enemies
    for pi in 0..session.projectiles.len() {
        if shot_dead[pi] || session.projectiles[pi].owner != ProjectileOwner::Player {
            continue;
        }
        let shot_pos = session.projectiles[pi].pos;
        let shot_size = session.projectiles[pi].size();
        let damage = session.projectiles[pi].damage;

        for ei in 0..session.enemies.len() {
            if enemy_dead[ei] {
                continue;
            }
            let enemy = &mut session.enemies[ei];
            if aabb_overlap(shot_pos, shot_size, enemy.pos, enemy.size()) {
                shot_dead[pi] = true;
                enemy.health -= damage;
                if enemy.health <= 0 {
                    enemy_dead[ei] = true;
                    explosions.push(center_of(enemy.pos, enemy.size()));
                    session.score += enemy.class.score_value() * 100 * damage as u64;
                }
                // The shot is spent either way
                break;
            }
        }
    }

    let player_pos = session.player.pos;
    let player_size = session.player.size();
    let shield = session.player.effects.shield();
    let mut hits = 0u32;

    // 2. Enemy shots vs player (shield blocks the whole pass)
    if !shield {
        for pi in 0..session.projectiles.len() {
            if shot_dead[pi] || session.projectiles[pi].owner != ProjectileOwner::Enemy {
                continue;
            }
            let shot = &session.projectiles[pi];
            if aabb_overlap(shot.pos, shot.size(), player_pos, player_size) {
                shot_dead[pi] = true;
                hits += 1;
            }
        }
    }

    // 3. Enemies vs player (ramming destroys the enemy too)
    if !shield {
        for ei in 0..session.enemies.len() {
            if enemy_dead[ei] {
                continue;
            }
            let enemy = &session.enemies[ei];
            if aabb_overlap(enemy.pos, enemy.size(), player_pos, player_size) {
                enemy_dead[ei] = true;
                explosions.push(center_of(enemy.pos, enemy.size()));
                hits += 1;
            }
        }
    }

    compact(&mut session.projectiles, &shot_dead);
    compact(&mut session.enemies, &enemy_dead);
    for center in explosions {
        session.spawn_particle(center, ParticleCue::Blast);
    }
    for _ in 0..hits {
        session.player_hit();
    }

    // 4. Powerups vs player
    let pickup_box = Vec2::splat(PICKUP_HITBOX);
    let mut collected: Vec<PowerupKind> = Vec::new();
    session.powerups.retain(|p| {
        if aabb_overlap(player_pos, player_size, p.pos, pickup_box) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        session.activate_powerup(kind);
    }

    // 5. Life platforms vs player
    let mut platforms_taken = 0u32;
    session.platforms.retain(|p| {
        if aabb_overlap(player_pos, player_size, p.pos, pickup_box) {
            platforms_taken += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..platforms_taken {
        session.gain_life();
    }

    // 6. Weapon blocks vs player
    let mut armed: Vec<SpecialWeapon> = Vec::new();
    session.weapon_blocks.retain(|b| {
        if aabb_overlap(player_pos, player_size, b.pos, pickup_box) {
            armed.push(b.kind);
            false
        } else {
            true
        }
    });
    for kind in armed {
        session.player.arm(kind);
        log::debug!("special weapon {:?} armed", kind);
    }
}
