//! Per-tick driver and match state machine
//!
//! An external scheduler calls [`step`] once per rendered frame with a
//! pre-sanitized input snapshot and the frame's wall-clock delta. The update
//! order inside a Playing tick is a hard contract: human input, then AI, then
//! ball integration and collision resolution, then scoring, then win
//! evaluation. Collision outcomes depend on paddle positions already updated
//! this tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::ai_update;
use super::collision::{CollisionOutcome, resolve};
use super::state::{GameState, MatchPhase, Side};

/// Logical input snapshot for a single tick
///
/// Produced by the input collaborator; the core never reads devices.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    /// Pointer-style control: desired vertical center of the human paddle
    pub pointer_y: Option<f32>,
    /// Menu -> Playing
    pub start: bool,
    /// Playing <-> Paused toggle
    pub pause: bool,
    /// GameOver -> Menu
    pub restart: bool,
}

/// Events emitted by one tick, in occurrence order
///
/// Consumers (audio, effects, persistence collaborators) process these after
/// `step` returns; the core never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    PaddleHit { side: Side, pos: Vec2 },
    Scored(Side),
    MatchWon(Side),
    /// Emitted alongside `MatchWon(Player)` for the persistence collaborator
    HighScore { score: u32, duration_ms: u64 },
}

/// Advance the match by one tick
///
/// Outside `Playing` this only services state-machine transitions; entity
/// positions and the clock stay frozen and the event list comes back empty.
pub fn step(state: &mut GameState, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        MatchPhase::Menu => {
            if input.start {
                state.reset_match();
                state.phase = MatchPhase::Playing;
                log::info!("match started ({:?} difficulty)", state.difficulty);
            }
            return events;
        }
        MatchPhase::Paused => {
            if input.pause {
                state.phase = MatchPhase::Playing;
            }
            return events;
        }
        MatchPhase::GameOver => {
            if input.restart {
                state.reset_match();
                state.phase = MatchPhase::Menu;
                log::info!("match reset to menu");
            }
            return events;
        }
        MatchPhase::Playing => {}
    }

    if input.pause {
        state.phase = MatchPhase::Paused;
        return events;
    }

    state.elapsed_ms += dt_ms;

    // Human paddle first, AI second: the AI reacts to this tick's ball, and
    // the resolver must see both paddles at their final positions.
    state
        .player
        .apply_intent(input.move_up, input.move_down, input.pointer_y);
    state.player.clamp_to_bounds(state.config.canvas_height);

    ai_update(
        &mut state.ai,
        &state.ball,
        &state.difficulty,
        &state.config,
        &mut state.rng,
    );

    state.ball.record_trail();
    match resolve(&mut state.ball, &state.player, &state.ai, &state.config) {
        CollisionOutcome::None => {}
        CollisionOutcome::WallBounce => events.push(GameEvent::WallBounce),
        CollisionOutcome::PaddleHit(side) => events.push(GameEvent::PaddleHit {
            side,
            pos: state.ball.center(),
        }),
        CollisionOutcome::Scored(side) => {
            state.scoreboard.record_point(side);
            events.push(GameEvent::Scored(side));
            log::info!(
                "point for {:?}: {} - {}",
                side,
                state.scoreboard.player,
                state.scoreboard.ai
            );

            if let Some(winner) = state.scoreboard.winner(state.config.win_score) {
                state.phase = MatchPhase::GameOver;
                state.winner = Some(winner);
                events.push(GameEvent::MatchWon(winner));
                log::info!(
                    "match won by {:?} after {:.1}s",
                    winner,
                    state.elapsed_ms / 1000.0
                );
                if winner == Side::Player {
                    events.push(GameEvent::HighScore {
                        score: state.scoreboard.player,
                        duration_ms: state.elapsed_ms as u64,
                    });
                }
            } else {
                // Rally over, serve again
                state.ball.reset(&state.config, &mut state.rng);
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DifficultyProfile, GameConfig};
    use proptest::prelude::*;

    const DT: f64 = 1000.0 / 60.0;

    fn session() -> GameState {
        GameState::from_preset(GameConfig::default(), "medium", 42).unwrap()
    }

    fn playing_session() -> GameState {
        let mut state = session();
        step(
            &mut state,
            &TickInput { start: true, ..Default::default() },
            DT,
        );
        state
    }

    /// A difficulty that effectively pins the AI paddle in place
    fn inert_ai() -> DifficultyProfile {
        DifficultyProfile { speed: 1e-4, accuracy: 0.0 }
    }

    #[test]
    fn test_menu_to_playing_resets() {
        let mut state = session();
        state.scoreboard.player = 3;
        state.elapsed_ms = 5000.0;

        let events = step(
            &mut state,
            &TickInput { start: true, ..Default::default() },
            DT,
        );
        assert!(events.is_empty());
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.scoreboard.player, 0);
        assert_eq!(state.elapsed_ms, 0.0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = playing_session();
        step(
            &mut state,
            &TickInput { pause: true, ..Default::default() },
            DT,
        );
        assert_eq!(state.phase, MatchPhase::Paused);

        let ball_pos = state.ball.pos;
        let player_y = state.player.pos.y;
        let ai_y = state.ai.pos.y;
        let elapsed = state.elapsed_ms;

        // Movement input while paused must change nothing
        let events = step(
            &mut state,
            &TickInput { move_down: true, ..Default::default() },
            DT,
        );
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, ball_pos);
        assert_eq!(state.player.pos.y, player_y);
        assert_eq!(state.ai.pos.y, ai_y);
        assert_eq!(state.elapsed_ms, elapsed);

        // Toggle back
        step(
            &mut state,
            &TickInput { pause: true, ..Default::default() },
            DT,
        );
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_menu_step_is_noop() {
        let mut state = session();
        let ball_pos = state.ball.pos;

        let events = step(
            &mut state,
            &TickInput { move_up: true, ..Default::default() },
            DT,
        );
        assert!(events.is_empty());
        assert_eq!(state.phase, MatchPhase::Menu);
        assert_eq!(state.ball.pos, ball_pos);
    }

    #[test]
    fn test_elapsed_accumulates_only_while_playing() {
        let mut state = playing_session();
        for _ in 0..10 {
            step(&mut state, &TickInput::default(), DT);
        }
        assert!((state.elapsed_ms - 10.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn test_scoring_scenario_right_exit() {
        let config = GameConfig::default();
        let mut state = GameState::new(config, inert_ai(), 42).unwrap();
        step(
            &mut state,
            &TickInput { start: true, ..Default::default() },
            DT,
        );

        // Move the AI paddle out of the lane, then serve a flat ball right
        state.ai.pos.y = 350.0;
        state.ball.pos = Vec2::new(395.0, 242.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        let mut scored = None;
        for _ in 0..200 {
            let events = step(&mut state, &TickInput::default(), DT);
            if let Some(event) = events.first() {
                scored = Some(*event);
                break;
            }
        }

        assert_eq!(scored, Some(GameEvent::Scored(Side::Player)));
        assert_eq!(state.scoreboard.player, 1);
        // Fresh serve: recentered with a full-strength launch
        assert_eq!(state.ball.pos, Vec2::new(392.0, 242.0));
        let speed = state.ball.vel.length();
        assert!((speed - state.config.initial_ball_speed).abs() < 1e-4);
    }

    #[test]
    fn test_win_transitions_same_tick() {
        let config = GameConfig { win_score: 1, ..Default::default() };
        let mut state = GameState::new(config, inert_ai(), 7).unwrap();
        step(
            &mut state,
            &TickInput { start: true, ..Default::default() },
            DT,
        );

        state.ai.pos.y = 350.0;
        state.ball.pos = Vec2::new(795.0, 242.0);
        state.ball.vel = Vec2::new(10.0, 0.0);

        let events = step(&mut state, &TickInput::default(), DT);
        assert_eq!(events[0], GameEvent::Scored(Side::Player));
        assert_eq!(events[1], GameEvent::MatchWon(Side::Player));
        assert!(matches!(
            events[2],
            GameEvent::HighScore { score: 1, .. }
        ));
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(state.winner, Some(Side::Player));

        // Scores and clock frozen after the match
        let elapsed = state.elapsed_ms;
        step(&mut state, &TickInput::default(), DT);
        assert_eq!(state.elapsed_ms, elapsed);
        assert_eq!(state.scoreboard.player, 1);
    }

    #[test]
    fn test_ai_win_emits_no_high_score() {
        let config = GameConfig { win_score: 1, ..Default::default() };
        let mut state = GameState::new(config, inert_ai(), 7).unwrap();
        step(
            &mut state,
            &TickInput { start: true, ..Default::default() },
            DT,
        );

        state.ball.pos = Vec2::new(30.0, 400.0);
        state.ball.vel = Vec2::new(-10.0, 0.0);

        let mut events = Vec::new();
        for _ in 0..20 {
            events = step(&mut state, &TickInput::default(), DT);
            if !events.is_empty() {
                break;
            }
        }
        assert_eq!(events[0], GameEvent::Scored(Side::Ai));
        assert_eq!(events[1], GameEvent::MatchWon(Side::Ai));
        assert_eq!(events.len(), 2);
        assert_eq!(state.winner, Some(Side::Ai));
    }

    #[test]
    fn test_restart_returns_to_menu() {
        let config = GameConfig { win_score: 1, ..Default::default() };
        let mut state = GameState::new(config, inert_ai(), 7).unwrap();
        step(
            &mut state,
            &TickInput { start: true, ..Default::default() },
            DT,
        );
        state.ai.pos.y = 350.0;
        state.ball.pos = Vec2::new(795.0, 242.0);
        state.ball.vel = Vec2::new(10.0, 0.0);
        step(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, MatchPhase::GameOver);

        step(
            &mut state,
            &TickInput { restart: true, ..Default::default() },
            DT,
        );
        assert_eq!(state.phase, MatchPhase::Menu);
        assert_eq!(state.scoreboard, Default::default());
        assert_eq!(state.winner, None);
        assert_eq!(state.elapsed_ms, 0.0);
    }

    #[test]
    fn test_scoreboard_monotonic() {
        let mut state = playing_session();
        let mut last = (0, 0);
        for _ in 0..2000 {
            step(&mut state, &TickInput::default(), DT);
            let now = (state.scoreboard.player, state.scoreboard.ai);
            assert!(now.0 >= last.0 && now.1 >= last.1);
            last = now;
            if state.phase == MatchPhase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn test_paddle_hit_event_carries_position() {
        let mut state = playing_session();
        state.ball.pos = Vec2::new(22.0, state.player.center_y() - state.ball.size / 2.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        let events = step(&mut state, &TickInput::default(), DT);
        match events.first() {
            Some(GameEvent::PaddleHit { side: Side::Player, pos }) => {
                assert_eq!(pos.x, state.ball.center().x);
            }
            other => panic!("expected player paddle hit, got {other:?}"),
        }
    }

    #[test]
    fn test_determinism_same_seed_same_trajectory() {
        let inputs = [
            TickInput { start: true, ..Default::default() },
            TickInput { move_up: true, ..Default::default() },
            TickInput { move_up: true, ..Default::default() },
            TickInput { pointer_y: Some(300.0), ..Default::default() },
            TickInput::default(),
            TickInput::default(),
        ];

        let mut a = session();
        let mut b = session();
        for input in &inputs {
            let ea = step(&mut a, input, DT);
            let eb = step(&mut b, input, DT);
            assert_eq!(ea, eb);
        }

        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.ball.vel, b.ball.vel);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.ai.pos, b.ai.pos);
        assert_eq!(a.scoreboard, b.scoreboard);
    }

    proptest! {
        /// Both paddles stay inside the canvas for every Playing tick, under
        /// arbitrary input streams.
        #[test]
        fn prop_paddles_stay_in_bounds(
            seed in 0u64..1000,
            moves in prop::collection::vec(
                (any::<bool>(), any::<bool>(), prop::option::of(-200.0f32..700.0)),
                1..300,
            ),
        ) {
            let mut state = GameState::from_preset(GameConfig::default(), "hard", seed).unwrap();
            step(&mut state, &TickInput { start: true, ..Default::default() }, DT);

            for (up, down, pointer) in moves {
                let input = TickInput {
                    move_up: up,
                    move_down: down,
                    pointer_y: pointer,
                    ..Default::default()
                };
                step(&mut state, &input, DT);

                for paddle in [&state.player, &state.ai] {
                    prop_assert!(paddle.pos.y >= 0.0);
                    prop_assert!(
                        paddle.pos.y <= state.config.canvas_height - paddle.height
                    );
                }
            }
        }

        /// Ball speed never exceeds the cap over a long stretch of play.
        #[test]
        fn prop_ball_speed_capped(seed in 0u64..500) {
            let mut state = GameState::from_preset(GameConfig::default(), "hard", seed).unwrap();
            step(&mut state, &TickInput { start: true, ..Default::default() }, DT);

            for _ in 0..3000 {
                let pointer_y = state.ball.center().y;
                step(&mut state, &TickInput { pointer_y: Some(pointer_y), ..Default::default() }, DT);
                prop_assert!(state.ball.vel.length() <= state.config.max_ball_speed + 1e-3);
                if state.phase == MatchPhase::GameOver {
                    break;
                }
            }
        }
    }
}
