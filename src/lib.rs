//! Snakeball - a 2D arena game
//!
//! A player kicks a physics ball around a tiled arena while a snake boss
//! chases it. The ball carries an ownership tag (who propelled it last) that
//! decides whether a goal damages the enemies or the player.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, snake boss, goal logic)
//! - `render`: Frame description built from simulation state (no GPU code)
//! - `settings`: Player preferences, persisted as JSON
//! - `scores`: Match result leaderboard, persisted as JSON

pub mod render;
pub mod scores;
pub mod settings;
pub mod sim;

pub use scores::Scoreboard;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; the per-frame ball displacement
    /// constants are tuned for exactly this rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions in tiles
    pub const WORLD_WIDTH: i32 = 76;
    pub const WORLD_HEIGHT: i32 = 120;

    /// Tile dimensions in pixels
    pub const TILE_WIDTH: f32 = 8.0;
    pub const TILE_HEIGHT: f32 = 8.0;

    /// Sprite dimensions (player bounding box)
    pub const SPRITE_WIDTH: f32 = 16.0;
    pub const SPRITE_HEIGHT: f32 = 16.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 4.0;
    pub const BALL_INITIAL_SPEED: f32 = 2.0;
    pub const BALL_MAX_SPEED: f32 = 8.0;
    pub const BALL_BOUNCE_FACTOR: f32 = 0.8;
    pub const BALL_FRICTION: f32 = 0.98;
    /// Kick force applied when the player touches the ball
    pub const PLAYER_PUSH_FORCE: f32 = 5.0;
    /// Below this per-axis speed the ball snaps to rest
    pub const BALL_SPEED_FLOOR: f32 = 0.1;

    /// Player movement (accel/decel are per second, max speed is per frame)
    pub const PLAYER_ACCEL: f32 = 7.0;
    pub const PLAYER_MAX_SPEED: f32 = 1.5;
    pub const PLAYER_DECEL: f32 = 2.5;

    /// XP awarded for each ball hit landed on an enemy
    pub const PLAYER_XP_PER_HIT: u32 = 10;
}

/// Unit vector pointing along `angle` radians
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
