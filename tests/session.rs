//! End-to-end session tests driven through the public API only.

use glam::Vec2;
use nova_raid::consts::*;
use nova_raid::sim::{
    Command, Enemy, EnemyClass, GamePhase, GameSession, InputState, SessionEvent,
    enemy_spawn_interval, tick,
};
use proptest::prelude::*;

fn started(seed: u64) -> GameSession {
    let mut session = GameSession::new(seed);
    session.apply(Command::Start);
    session.drain_events();
    session
}

/// Park a quiet enemy directly on the ship so the next tick resolves a ram
fn ram_player(session: &mut GameSession) {
    let pos = session.player.pos;
    let id = session.next_entity_id();
    session.enemies.push(Enemy {
        id,
        pos,
        vel: Vec2::ZERO,
        class: EnemyClass::Basic,
        health: 1,
        shoot_timer: 600,
    });
}

// ── Full-run outcomes ─────────────────────────────────────────────────────────

#[test]
fn three_unblocked_rams_end_the_run_in_defeat() {
    let mut session = started(9);
    let mut events = Vec::new();

    for _ in 0..3 {
        ram_player(&mut session);
        tick(&mut session, &InputState::default());
        events.extend(session.drain_events());
    }

    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.lives, 0);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SessionEvent::PlayerHit { .. }))
            .count(),
        3
    );
    assert!(events.contains(&SessionEvent::GameOver {
        score: 0,
        level: 1,
        victory: false,
    }));

    // A dead session stays dead until the host restarts it
    tick(&mut session, &InputState::default());
    assert_eq!(session.phase, GamePhase::GameOver);
    session.apply(Command::Restart);
    assert_eq!(session.phase, GamePhase::Start);
    assert_eq!(session.lives, STARTING_LIVES);
}

#[test]
fn final_level_threshold_ends_the_run_in_victory() {
    let mut session = started(9);
    session.level = MAX_LEVEL;
    session.score = LEVEL_THRESHOLDS[MAX_LEVEL as usize - 1];

    tick(&mut session, &InputState::default());
    assert_eq!(session.phase, GamePhase::LevelComplete);

    // The victory transition is delayed, not instant
    for _ in 0..VICTORY_DELAY {
        assert_ne!(session.phase, GamePhase::GameOver);
        tick(&mut session, &InputState::default());
    }
    assert_eq!(session.phase, GamePhase::GameOver);

    let events = session.drain_events();
    let expected_score = 10_000 + session.lives as u64 * LEVEL_BONUS_PER_LIFE;
    assert!(events.contains(&SessionEvent::GameOver {
        score: expected_score,
        level: MAX_LEVEL,
        victory: true,
    }));
}

#[test]
fn cleared_levels_chain_through_the_advance_command() {
    let mut session = started(9);
    session.score = LEVEL_THRESHOLDS[0];
    tick(&mut session, &InputState::default());
    assert_eq!(session.phase, GamePhase::LevelComplete);

    session.apply(Command::AdvanceLevel);
    assert_eq!(session.phase, GamePhase::Playing);
    assert_eq!(session.level, 2);
    assert_eq!(session.game_speed, 1.5);

    // The bonus alone never reaches the next threshold from 2000
    assert!(session.score < LEVEL_THRESHOLDS[1]);
}

#[test]
fn culled_entities_never_reappear() {
    let mut session = started(9);
    let id = session.next_entity_id();
    session.enemies.push(Enemy {
        id,
        pos: Vec2::new(100.0, session.view.y - 1.0),
        vel: Vec2::new(0.0, 5.0),
        class: EnemyClass::Basic,
        health: 1,
        shoot_timer: 600,
    });
    tick(&mut session, &InputState::default());
    assert!(session.enemies.is_empty());

    // Well before the first spawner interval elapses, nothing comes back
    for _ in 0..30 {
        tick(&mut session, &InputState::default());
        assert!(session.enemies.is_empty());
    }
}

#[test]
fn snapshot_round_trip_resumes_the_same_run() {
    let mut live = started(77);
    let input = InputState {
        fire: true,
        right: true,
        ..Default::default()
    };
    for _ in 0..500 {
        tick(&mut live, &input);
    }

    // A host snapshot drops cosmetic particles and pending events only
    let json = serde_json::to_string(&live).expect("session serializes");
    let mut restored: GameSession = serde_json::from_str(&json).expect("session deserializes");

    for _ in 0..500 {
        tick(&mut live, &input);
        tick(&mut restored, &input);
    }
    assert_eq!(live.tick_count, restored.tick_count);
    assert_eq!(live.score, restored.score);
    assert_eq!(live.lives, restored.lives);
    assert_eq!(live.player.pos, restored.player.pos);
    assert_eq!(live.enemies.len(), restored.enemies.len());
    for (a, b) in live.enemies.iter().zip(&restored.enemies) {
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.health, b.health);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn spawn_interval_is_monotone_and_floored(
        level in 1u32..=MAX_LEVEL,
        elapsed in 0u64..5_000_000,
    ) {
        let interval = enemy_spawn_interval(level, elapsed);
        prop_assert!(interval >= 30);
        prop_assert!(interval <= 120);
        // Non-increasing in elapsed time and in level
        prop_assert!(enemy_spawn_interval(level, elapsed + 1000) <= interval);
        if level < MAX_LEVEL {
            prop_assert!(enemy_spawn_interval(level + 1, elapsed) <= interval);
        }
    }

    #[test]
    fn enemy_integration_is_position_plus_scaled_velocity(
        x in 100.0f32..700.0,
        y in 10.0f32..300.0,
        vx in -2.0f32..2.0,
        vy in 0.5f32..3.0,
        speed_steps in 0u32..4,
    ) {
        let mut session = started(1);
        session.game_speed = 1.0 + speed_steps as f32 * 0.5;
        let pos = Vec2::new(x, y);
        let vel = Vec2::new(vx, vy);
        let id = session.next_entity_id();
        session.enemies.push(Enemy {
            id,
            pos,
            vel,
            class: EnemyClass::Basic,
            health: 1,
            shoot_timer: 600,
        });

        let expected = pos + vel * session.game_speed;
        tick(&mut session, &InputState::default());
        prop_assert_eq!(session.enemies[0].pos, expected);
    }

    #[test]
    fn restart_is_idempotent_from_any_point_in_a_run(run_ticks in 0u64..600) {
        let mut session = started(4242);
        let input = InputState { fire: true, ..Default::default() };
        for _ in 0..run_ticks {
            tick(&mut session, &input);
        }

        session.apply(Command::Restart);
        prop_assert_eq!(session.phase, GamePhase::Start);
        prop_assert_eq!(session.score, 0);
        prop_assert_eq!(session.lives, STARTING_LIVES);
        prop_assert_eq!(session.level, 1);
        prop_assert_eq!(session.game_speed, 1.0);
        prop_assert_eq!(session.tick_count, 0);
        prop_assert!(session.enemies.is_empty());
        prop_assert!(session.projectiles.is_empty());
        prop_assert!(session.powerups.is_empty());
        prop_assert!(session.platforms.is_empty());
        prop_assert!(session.weapon_blocks.is_empty());
    }
}
