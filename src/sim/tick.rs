//! Game state and fixed-timestep tick
//!
//! `GameState` owns the whole simulation: world grid, player, ball, snake
//! bosses, the active game mode and the seeded RNG. `tick` consumes wall
//! clock time into fixed substeps so the same seed and input sequence
//! always replays the same game.

use glam::Vec2;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT, WORLD_HEIGHT, WORLD_WIDTH};
use super::ball::{self, BallKind, BallOwnership};
use super::entity::Entity;
use super::matchplay::{GoalScorer, MatchPlay};
use super::player;
use super::snake::{self, Pathfinder};
use super::win::{HOLE_RADIUS, WinCondition};
use super::world::World;

/// Snake boss length at kickoff
const SNAKE_INITIAL_LENGTH: usize = 3;

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Free play around the hole
    Hole,
    /// Timed soccer match
    Match,
}

/// Per-mode live state
#[derive(Debug, Clone)]
pub enum ModeState {
    Hole(WinCondition),
    Match(MatchPlay),
}

/// Coarse game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// Input sampled for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement vector, each axis in -1..=1
    pub move_dir: Vec2,
    /// Edge-triggered pause toggle
    pub toggle_pause: bool,
    /// Restart the game with the original seed
    pub reset: bool,
    /// Debug hook: force a goal for one side (match mode only)
    pub force_goal: Option<GoalScorer>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    pub player: Entity,
    pub ball: Entity,
    pub enemies: Vec<Entity>,
    pub mode: ModeState,
    pub phase: GamePhase,
    pub rng: Pcg32,
    pub tick_count: u64,
    pub elapsed: f32,
    mode_kind: Mode,
    seed: u64,
    accumulator: f32,
}

impl GameState {
    /// Build a fresh game: bordered arena with the standard obstacles,
    /// kickoff entity layout, mode state and a seeded RNG
    pub fn new(mode: Mode, seed: u64) -> Self {
        let mut world = World::with_default_layout(WORLD_WIDTH, WORLD_HEIGHT);
        let center = world.pixel_center();

        let mode_state = match mode {
            Mode::Hole => {
                // Hole sits in the open upper half of the arena
                ModeState::Hole(WinCondition::new(
                    Vec2::new(center.x, center.y / 2.0),
                    HOLE_RADIUS,
                ))
            }
            Mode::Match => ModeState::Match(MatchPlay::new(&mut world)),
        };

        let player = player::spawn(center - Vec2::new(100.0, 0.0));
        let ball = ball::spawn(BallKind::Standard, center - Vec2::new(0.0, 50.0));
        let snake_cell = World::world_to_tile(center + Vec2::new(50.0, 100.0));
        let enemies = vec![snake::spawn(snake_cell, SNAKE_INITIAL_LENGTH)];

        info!("new game, mode {mode:?}, seed {seed}");
        Self {
            world,
            player,
            ball,
            enemies,
            mode: mode_state,
            phase: GamePhase::Playing,
            rng: Pcg32::seed_from_u64(seed),
            tick_count: 0,
            elapsed: 0.0,
            mode_kind: mode,
            seed,
            accumulator: 0.0,
        }
    }

    pub fn mode_kind(&self) -> Mode {
        self.mode_kind
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart with the original mode and seed
    pub fn reset(&mut self) {
        *self = Self::new(self.mode_kind, self.seed);
    }
}

/// Consume `dt` of wall clock time, running fixed substeps
///
/// At most [`MAX_SUBSTEPS`] substeps run per call; any further backlog is
/// dropped so a long stall cannot snowball.
pub fn tick(state: &mut GameState, input: &TickInput, pathfinder: &dyn Pathfinder, dt: f32) {
    if input.reset {
        state.reset();
        return;
    }
    if input.toggle_pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.accumulator += dt;
    let mut substeps = 0;
    while state.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
        step(state, input, pathfinder);
        state.accumulator -= SIM_DT;
        substeps += 1;
    }
    if substeps == MAX_SUBSTEPS {
        state.accumulator = 0.0;
    }
}

/// One fixed step: player, ball, snakes, then the mode logic
fn step(state: &mut GameState, input: &TickInput, pathfinder: &dyn Pathfinder) {
    let GameState {
        world,
        player,
        ball,
        enemies,
        mode,
        phase,
        rng,
        ..
    } = state;

    player::update(player, world, input.move_dir, SIM_DT);
    ball::update(ball, world, player);
    for enemy in enemies.iter_mut() {
        snake::update(enemy, world, ball, player, pathfinder, SIM_DT);
    }

    match mode {
        ModeState::Hole(win) => {
            win.update(ball, player, enemies, rng, SIM_DT);
        }
        ModeState::Match(matchplay) => {
            if let Some(scorer) = input.force_goal {
                if let Some(data) = ball.ball_mut() {
                    data.set_ownership(match scorer {
                        GoalScorer::Player => BallOwnership::Player,
                        GoalScorer::Enemy => BallOwnership::Enemy,
                    });
                }
                matchplay.handle_goal(scorer, player, enemies);
            }
            matchplay.update(ball, player, enemies, SIM_DT);
        }
    }

    // Outcome checks
    if player.player().is_some_and(|d| d.is_defeated()) {
        *phase = GamePhase::GameOver;
        info!("player defeated");
    } else {
        match mode {
            ModeState::Hole(_) => {
                let all_defeated = enemies
                    .iter()
                    .all(|e| e.snake_boss().is_some_and(|b| b.is_defeated()));
                if all_defeated && !enemies.is_empty() {
                    *phase = GamePhase::Victory;
                    info!("all snake bosses defeated");
                }
            }
            ModeState::Match(matchplay) => {
                if matchplay.is_finished() {
                    *phase = if matchplay.player_score > matchplay.enemy_score {
                        GamePhase::Victory
                    } else {
                        GamePhase::GameOver
                    };
                }
            }
        }
    }

    state.tick_count += 1;
    state.elapsed += SIM_DT;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::snake::{GreedyChase, SnakeState};

    fn playing_input() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_kickoff_layout_is_on_open_floor() {
        let state = GameState::new(Mode::Hole, 1);
        assert!(!state.world.is_wall_at_pixel(state.player.pos));
        assert!(!state.world.is_wall_at_pixel(state.ball.pos));
        let boss = state.enemies[0].snake_boss().unwrap();
        assert_eq!(boss.segment_count(), SNAKE_INITIAL_LENGTH);
    }

    #[test]
    fn test_tick_advances_fixed_steps() {
        let mut state = GameState::new(Mode::Hole, 1);
        tick(&mut state, &playing_input(), &GreedyChase, SIM_DT);
        assert_eq!(state.tick_count, 1);

        // A long frame is clamped to the substep cap
        tick(&mut state, &playing_input(), &GreedyChase, 1.0);
        assert_eq!(state.tick_count, 1 + crate::consts::MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_pause_stops_the_ball() {
        let mut state = GameState::new(Mode::Hole, 1);
        state.ball.vel = Vec2::new(4.0, 0.0);

        let pause = TickInput {
            toggle_pause: true,
            ..TickInput::default()
        };
        tick(&mut state, &pause, &GreedyChase, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let pos = state.ball.pos;
        tick(&mut state, &playing_input(), &GreedyChase, SIM_DT);
        assert_eq!(state.ball.pos, pos);

        tick(&mut state, &pause, &GreedyChase, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_forced_goal_scores_in_match_mode() {
        let mut state = GameState::new(Mode::Match, 1);
        let input = TickInput {
            force_goal: Some(GoalScorer::Player),
            ..TickInput::default()
        };
        tick(&mut state, &input, &GreedyChase, SIM_DT);

        let ModeState::Match(matchplay) = &state.mode else {
            panic!("match mode expected");
        };
        assert_eq!(matchplay.player_score, 1);
    }

    #[test]
    fn test_defeating_all_snakes_wins_hole_mode() {
        let mut state = GameState::new(Mode::Hole, 1);
        for enemy in &mut state.enemies {
            enemy.snake_boss_mut().unwrap().state = SnakeState::Defeated;
        }
        tick(&mut state, &playing_input(), &GreedyChase, SIM_DT);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_player_death_ends_the_game() {
        let mut state = GameState::new(Mode::Hole, 1);
        state.player.player_mut().unwrap().current_health = 0.0;
        tick(&mut state, &playing_input(), &GreedyChase, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let mut a = GameState::new(Mode::Hole, 99);
        let mut b = GameState::new(Mode::Hole, 99);
        let input = TickInput {
            move_dir: Vec2::new(1.0, 0.0),
            ..TickInput::default()
        };

        for _ in 0..600 {
            tick(&mut a, &input, &GreedyChase, SIM_DT);
            tick(&mut b, &input, &GreedyChase, SIM_DT);
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.tick_count, b.tick_count);
    }

    #[test]
    fn test_reset_restores_kickoff() {
        let mut state = GameState::new(Mode::Hole, 5);
        for _ in 0..120 {
            tick(
                &mut state,
                &TickInput {
                    move_dir: Vec2::new(0.0, -1.0),
                    ..TickInput::default()
                },
                &GreedyChase,
                SIM_DT,
            );
        }
        let reset = TickInput {
            reset: true,
            ..TickInput::default()
        };
        tick(&mut state, &reset, &GreedyChase, SIM_DT);

        let fresh = GameState::new(Mode::Hole, 5);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.player.pos, fresh.player.pos);
        assert_eq!(state.ball.pos, fresh.ball.pos);
    }
}
