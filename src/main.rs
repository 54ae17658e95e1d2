//! Headless demo driver
//!
//! Plays one unattended match: a scripted "human" that chases the ball with
//! pointer input against the AI, stepped at a nominal 60 Hz. Stands in for
//! the real scheduler/input/persistence collaborators and doubles as a smoke
//! test of the whole loop.
//!
//! Usage: `neon-pong [preset] [seed]` (defaults: medium, 42)

use neon_pong::sim::{GameEvent, GameState, MatchPhase, TickInput, step};
use neon_pong::{GameConfig, HighScores};

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_TICKS: u32 = 1_000_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "medium".to_string());
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut state = match GameState::from_preset(GameConfig::default(), &preset, seed) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            std::process::exit(1);
        }
    };

    let mut board = HighScores::new();
    let mut wall_bounces = 0u32;
    let mut paddle_hits = 0u32;

    step(
        &mut state,
        &TickInput { start: true, ..Default::default() },
        FRAME_MS,
    );

    for _ in 0..MAX_TICKS {
        // Scripted player: pointer tracks the ball, slightly behind center
        let input = TickInput {
            pointer_y: Some(state.ball.center().y),
            ..Default::default()
        };

        for event in step(&mut state, &input, FRAME_MS) {
            match event {
                GameEvent::WallBounce => wall_bounces += 1,
                GameEvent::PaddleHit { .. } => paddle_hits += 1,
                GameEvent::Scored(side) => log::debug!("scored: {side:?}"),
                GameEvent::MatchWon(side) => println!("winner: {side:?}"),
                GameEvent::HighScore { score, duration_ms } => {
                    board.add_score(score, duration_ms);
                }
            }
        }

        if state.phase == MatchPhase::GameOver {
            break;
        }
    }

    println!(
        "final score {} - {} in {:.1}s ({} paddle hits, {} wall bounces)",
        state.scoreboard.player,
        state.scoreboard.ai,
        state.elapsed_ms / 1000.0,
        paddle_hits,
        wall_bounces,
    );

    if !board.entries.is_empty() {
        // How a persistence collaborator would serialize the board
        match serde_json::to_string_pretty(&board) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("leaderboard serialization failed: {err}"),
        }
    }
}
