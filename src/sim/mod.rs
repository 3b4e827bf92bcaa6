//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (owned by `GameState`)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod color;
pub mod entity;
pub mod matchplay;
pub mod player;
pub mod snake;
pub mod tick;
pub mod win;
pub mod world;

pub use ball::{BallData, BallKind, BallOwnership};
pub use collision::{Rect, circle_rect_overlap, reflect};
pub use color::Color;
pub use entity::{Direction, Entity, EntityKind};
pub use matchplay::{Goal, GoalScorer, MatchPlay, MatchState};
pub use player::PlayerData;
pub use snake::{GreedyChase, Pathfinder, SnakeBossData, SnakeState};
pub use tick::{GamePhase, GameState, Mode, ModeState, TickInput, tick};
pub use win::{ThunderParticle, WinCondition, WinState};
pub use world::{Tile, World};
