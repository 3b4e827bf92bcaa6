//! Snakeball entry point
//!
//! Runs the simulation headless at a fixed 60 Hz with a scripted driver
//! that chases the ball, which is enough to exercise the full game loop,
//! log a running commentary and keep the scoreboard file up to date.
//! A graphical frontend would consume `render::build_frame` instead.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use snakeball::consts::SIM_DT;
use snakeball::render::build_frame;
use snakeball::scores::{MatchRecord, Scoreboard};
use snakeball::sim::{
    GamePhase, GameState, GreedyChase, Mode, ModeState, TickInput, tick,
};
use snakeball::Settings;

struct Args {
    mode: Mode,
    seed: u64,
    max_ticks: u64,
    data_dir: PathBuf,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        mode: Mode::Hole,
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
        max_ticks: 60 * 60 * 5,
        data_dir: PathBuf::from("."),
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--mode" => {
                let value = it.next().ok_or("--mode needs a value")?;
                args.mode = match value.as_str() {
                    "hole" => Mode::Hole,
                    "match" => Mode::Match,
                    other => return Err(format!("unknown mode: {other}")),
                };
            }
            "--seed" => {
                let value = it.next().ok_or("--seed needs a value")?;
                args.seed = value.parse().map_err(|e| format!("bad seed: {e}"))?;
            }
            "--ticks" => {
                let value = it.next().ok_or("--ticks needs a value")?;
                args.max_ticks = value.parse().map_err(|e| format!("bad tick count: {e}"))?;
            }
            "--data-dir" => {
                let value = it.next().ok_or("--data-dir needs a value")?;
                args.data_dir = PathBuf::from(value);
            }
            "--help" | "-h" => {
                return Err(
                    "usage: snakeball [--mode hole|match] [--seed N] [--ticks N] [--data-dir DIR]"
                        .to_string(),
                );
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

/// Scripted driver: always steer toward the ball
fn chase_input(state: &GameState) -> TickInput {
    let to_ball = state.ball.pos - state.player.pos;
    let move_dir = Vec2::new(to_ball.x.signum(), to_ball.y.signum());
    TickInput {
        move_dir,
        ..TickInput::default()
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let settings = Settings::load(&args.data_dir.join("settings.json"));
    let scoreboard_path = args.data_dir.join("scores.json");
    let mut scoreboard = Scoreboard::load(&scoreboard_path);

    log::info!(
        "snakeball starting, mode {:?}, seed {}, up to {} ticks",
        args.mode,
        args.seed,
        args.max_ticks
    );

    let mut state = GameState::new(args.mode, args.seed);
    while state.phase == GamePhase::Playing && state.tick_count < args.max_ticks {
        let input = chase_input(&state);
        tick(&mut state, &input, &GreedyChase, SIM_DT);

        // Once a second, report where things stand
        if state.tick_count % 60 == 0 {
            match &state.mode {
                ModeState::Hole(win) => {
                    log::debug!(
                        "t={:.0}s ball {:.0?} hole state {:?}",
                        state.elapsed,
                        state.ball.pos,
                        win.state
                    );
                }
                ModeState::Match(matchplay) => {
                    log::debug!(
                        "t={:.0}s {} - {} ({})",
                        state.elapsed,
                        matchplay.player_score,
                        matchplay.enemy_score,
                        matchplay.formatted_time()
                    );
                }
            }
        }
    }

    let frame = build_frame(&state, &settings);
    log::info!(
        "final frame: {} draw commands, phase {:?}",
        frame.commands.len(),
        state.phase
    );

    match &state.mode {
        ModeState::Hole(_) => {
            let standing = state
                .enemies
                .iter()
                .filter(|e| e.snake_boss().is_some_and(|b| !b.is_defeated()))
                .count();
            println!(
                "{:?} after {} ticks, {} snake boss(es) still standing",
                state.phase, state.tick_count, standing
            );
        }
        ModeState::Match(matchplay) => {
            println!(
                "{:?} after {} ticks, final score {} - {}",
                state.phase, state.tick_count, matchplay.player_score, matchplay.enemy_score
            );
            let record = MatchRecord {
                player_goals: matchplay.player_score,
                enemy_goals: matchplay.enemy_score,
                player_level: state.player.player().map(|p| p.level).unwrap_or(1),
                timestamp: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as f64)
                    .unwrap_or(0.0),
            };
            match scoreboard.add_record(record) {
                Some(rank) => {
                    println!("made the scoreboard at rank {rank}");
                    if let Err(err) = scoreboard.save(&scoreboard_path) {
                        log::warn!("could not save scoreboard: {err}");
                    }
                }
                None => log::info!("result did not make the scoreboard"),
            }
        }
    }
}
