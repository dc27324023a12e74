//! Nova Raid headless demo
//!
//! Runs a scripted session against a logging presenter: the pilot holds
//! fire and strafes side to side until the run ends. Useful for watching
//! the simulation behave (`RUST_LOG=debug cargo run`) and as a living
//! example of the host-side wiring.

use std::error::Error;

use nova_raid::bridge::{FrameSnapshot, Presenter, build_frame, publish};
use nova_raid::sim::{Command, GamePhase, GameSession, InputState, SessionEvent, tick};

struct LogPresenter;

impl Presenter for LogPresenter {
    fn frame(&mut self, frame: &FrameSnapshot) {
        // One HUD line per second of game time
        if frame.tick > 0 && frame.tick % 60 == 0 {
            log::debug!(
                "t={:>4}s score={:<6} lives={} level={} sprites={}",
                frame.tick / 60,
                frame.hud.score,
                frame.hud.lives,
                frame.hud.level,
                frame.sprites.len()
            );
        }
    }

    fn event(&mut self, event: &SessionEvent) {
        log::info!("event: {event:?}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    log::info!("nova-raid demo starting (seed {seed})");

    let mut session = GameSession::new(seed);
    let mut presenter = LogPresenter;
    session.apply(Command::Start);

    // Scripted pilot: hold fire, swap strafe direction every two seconds
    let mut input = InputState {
        fire: true,
        ..Default::default()
    };
    const MAX_TICKS: u64 = 60 * 60 * 5; // five minutes of game time

    for frame in 0..MAX_TICKS {
        input.left = (frame / 120) % 2 == 0;
        input.right = !input.left;

        tick(&mut session, &input);
        publish(&mut session, &mut presenter);

        if session.phase == GamePhase::GameOver {
            break;
        }
        // The demo host advances levels as soon as they clear
        if session.phase == GamePhase::LevelComplete && session.victory_countdown == 0 {
            session.apply(Command::AdvanceLevel);
        }
    }

    let hud = build_frame(&session).hud;
    println!("{}", serde_json::to_string_pretty(&hud)?);
    Ok(())
}
