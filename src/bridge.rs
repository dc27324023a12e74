//! Presentation bridge
//!
//! The simulation never reaches into rendering resources. After each tick
//! the host builds a [`FrameSnapshot`] — HUD numbers plus a flat sprite
//! list — and hands it to its [`Presenter`], together with whatever
//! transition events the tick produced (pause/resume screens, the
//! level-complete screen with its literal score and bonus, game over with
//! the victory flag).

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::{
    EnemyClass, GamePhase, GameSession, ParticleCue, PowerupKind, ProjectileOwner, SessionEvent,
    SpecialWeapon, WeaponKind,
};

/// What a sprite should be drawn as
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpriteKind {
    Ship { shield: bool },
    Enemy(EnemyClass),
    PlayerShot(WeaponKind),
    EnemyShot,
    Powerup(PowerupKind),
    LifePlatform,
    WeaponBlock(SpecialWeapon),
    Explosion { cue: ParticleCue, life_frac: f32 },
}

/// One drawable box
#[derive(Debug, Clone, Serialize)]
pub struct Sprite {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: SpriteKind,
}

/// The numbers the host's HUD shows
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub game_speed: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub hud: Hud,
    pub sprites: Vec<Sprite>,
}

/// Copy the live entities into a flat, render-ready sprite list
pub fn build_frame(session: &GameSession) -> FrameSnapshot {
    let mut sprites = Vec::with_capacity(
        1 + session.enemies.len()
            + session.projectiles.len()
            + session.powerups.len()
            + session.platforms.len()
            + session.weapon_blocks.len()
            + session.particles.len(),
    );

    sprites.push(Sprite {
        pos: session.player.pos,
        size: session.player.size(),
        kind: SpriteKind::Ship {
            shield: session.player.effects.shield(),
        },
    });

    for enemy in &session.enemies {
        sprites.push(Sprite {
            pos: enemy.pos,
            size: enemy.size(),
            kind: SpriteKind::Enemy(enemy.class),
        });
    }

    for shot in &session.projectiles {
        let kind = match shot.owner {
            ProjectileOwner::Player => SpriteKind::PlayerShot(shot.kind),
            ProjectileOwner::Enemy => SpriteKind::EnemyShot,
        };
        sprites.push(Sprite {
            pos: shot.pos,
            size: shot.size(),
            kind,
        });
    }

    for powerup in &session.powerups {
        sprites.push(Sprite {
            pos: powerup.pos,
            size: Vec2::splat(POWERUP_SIZE),
            kind: SpriteKind::Powerup(powerup.kind),
        });
    }

    for platform in &session.platforms {
        sprites.push(Sprite {
            pos: platform.pos,
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            kind: SpriteKind::LifePlatform,
        });
    }

    for block in &session.weapon_blocks {
        sprites.push(Sprite {
            pos: block.pos,
            size: Vec2::splat(WEAPON_BLOCK_SIZE),
            kind: SpriteKind::WeaponBlock(block.kind),
        });
    }

    for particle in &session.particles {
        // Particle positions are blast centers; fade out over the lifetime
        let size = Vec2::splat(EXPLOSION_SIZE);
        sprites.push(Sprite {
            pos: particle.pos - size * 0.5,
            size,
            kind: SpriteKind::Explosion {
                cue: particle.cue,
                life_frac: particle.life as f32 / PARTICLE_LIFE as f32,
            },
        });
    }

    FrameSnapshot {
        tick: session.tick_count,
        phase: session.phase,
        hud: Hud {
            score: session.score,
            lives: session.lives,
            level: session.level,
            game_speed: session.game_speed,
        },
        sprites,
    }
}

/// Host-implemented sink for frames and state-transition events
pub trait Presenter {
    fn frame(&mut self, frame: &FrameSnapshot);
    fn event(&mut self, event: &SessionEvent);
}

/// Build this tick's snapshot and flush it, plus any pending events, to the
/// presenter. Call once after each `tick`.
pub fn publish(session: &mut GameSession, presenter: &mut dyn Presenter) {
    let frame = build_frame(session);
    presenter.frame(&frame);
    for event in session.drain_events() {
        presenter.event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, tick};

    #[test]
    fn snapshot_lists_every_live_entity() {
        let mut session = GameSession::new(31);
        session.apply(Command::Start);
        // Run long enough for the spawner to inject a few enemies
        for _ in 0..300 {
            tick(&mut session, &Default::default());
        }
        let frame = build_frame(&session);
        assert_eq!(
            frame.sprites.len(),
            1 + session.enemies.len()
                + session.projectiles.len()
                + session.powerups.len()
                + session.platforms.len()
                + session.weapon_blocks.len()
                + session.particles.len()
        );
        assert!(matches!(frame.sprites[0].kind, SpriteKind::Ship { .. }));
        assert_eq!(frame.hud.lives, session.lives);
        assert_eq!(frame.tick, session.tick_count);
    }

    #[test]
    fn shield_flag_reaches_the_ship_sprite() {
        let mut session = GameSession::new(31);
        session.apply(Command::Start);
        session.player.effects.shield_ticks = 100;
        let frame = build_frame(&session);
        assert_eq!(frame.sprites[0].kind, SpriteKind::Ship { shield: true });
    }

    struct Recorder {
        frames: usize,
        events: Vec<SessionEvent>,
    }

    impl Presenter for Recorder {
        fn frame(&mut self, _frame: &FrameSnapshot) {
            self.frames += 1;
        }
        fn event(&mut self, event: &SessionEvent) {
            self.events.push(event.clone());
        }
    }

    #[test]
    fn publish_forwards_frames_and_drains_events() {
        let mut session = GameSession::new(31);
        let mut recorder = Recorder {
            frames: 0,
            events: Vec::new(),
        };
        session.apply(Command::Start);
        publish(&mut session, &mut recorder);
        assert_eq!(recorder.frames, 1);
        assert_eq!(recorder.events, vec![SessionEvent::Started]);

        // Already drained
        publish(&mut session, &mut recorder);
        assert_eq!(recorder.events.len(), 1);
    }
}
