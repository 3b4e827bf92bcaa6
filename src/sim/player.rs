//! Player movement and progression
//!
//! The player accelerates toward the input vector and coasts to a stop
//! without it. Movement resolves per axis against the wall grid so sliding
//! along a wall works. Progression is a small XP/level counter fed by ball
//! hits on the snake boss.

use glam::Vec2;
use log::debug;

use crate::consts::{
    PLAYER_ACCEL, PLAYER_DECEL, PLAYER_MAX_SPEED, SPRITE_HEIGHT, SPRITE_WIDTH,
};
use super::entity::{Direction, Entity, EntityKind};
use super::world::World;

/// Player payload: health, mana and progression
#[derive(Debug, Clone)]
pub struct PlayerData {
    pub level: u32,
    pub xp: u32,
    pub max_health: f32,
    pub current_health: f32,
    pub max_mana: f32,
    pub current_mana: f32,
}

impl PlayerData {
    pub fn new() -> Self {
        Self {
            level: 1,
            xp: 0,
            max_health: 100.0,
            current_health: 100.0,
            max_mana: 100.0,
            current_mana: 100.0,
        }
    }

    /// XP required to finish the current level
    pub fn xp_to_next_level(&self) -> u32 {
        self.level * 100
    }

    /// Add XP, consuming level thresholds as they are crossed
    pub fn award_xp(&mut self, amount: u32) {
        self.xp += amount;
        while self.xp >= self.xp_to_next_level() {
            self.xp -= self.xp_to_next_level();
            self.level += 1;
            debug!("player reached level {}", self.level);
        }
    }

    /// Subtract health, floored at zero
    pub fn apply_damage(&mut self, damage: f32) {
        self.current_health = (self.current_health - damage).max(0.0);
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health <= 0.0
    }
}

impl Default for PlayerData {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the player entity
pub fn spawn(pos: Vec2) -> Entity {
    Entity::new(
        pos,
        Vec2::new(SPRITE_WIDTH, SPRITE_HEIGHT),
        EntityKind::Player(PlayerData::new()),
    )
}

/// Advance the player one frame from the movement input vector
pub fn update(player: &mut Entity, world: &World, move_dir: Vec2, dt: f32) {
    if !player.active || player.player().is_none() {
        return;
    }

    let prev = player.pos;

    player.vel += move_dir * PLAYER_ACCEL * dt;

    // Coast to a stop on axes without input
    if move_dir.x == 0.0 {
        player.vel.x = decelerate(player.vel.x, PLAYER_DECEL * dt);
    }
    if move_dir.y == 0.0 {
        player.vel.y = decelerate(player.vel.y, PLAYER_DECEL * dt);
    }

    player.vel = player
        .vel
        .clamp(Vec2::splat(-PLAYER_MAX_SPEED), Vec2::splat(PLAYER_MAX_SPEED));

    // Per-axis move and revert, so one blocked axis still allows sliding
    player.pos.x += player.vel.x;
    if world.is_wall_at_pixel(player.pos) {
        player.pos.x = prev.x;
        player.vel.x = 0.0;
    }
    player.pos.y += player.vel.y;
    if world.is_wall_at_pixel(player.pos) {
        player.pos.y = prev.y;
        player.vel.y = 0.0;
    }

    // Facing follows the dominant movement axis
    if player.vel.x.abs() > player.vel.y.abs() {
        if player.vel.x > 0.0 {
            player.facing = Direction::Right;
        } else if player.vel.x < 0.0 {
            player.facing = Direction::Left;
        }
    } else if player.vel.y != 0.0 {
        player.facing = if player.vel.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
    }
}

fn decelerate(speed: f32, amount: f32) -> f32 {
    if speed > 0.0 {
        (speed - amount).max(0.0)
    } else if speed < 0.0 {
        (speed + amount).min(0.0)
    } else {
        0.0
    }
}

/// Put the player back at `pos`, stopped and facing down
pub fn reset(player: &mut Entity, pos: Vec2) {
    if player.player().is_none() {
        return;
    }
    player.pos = pos;
    player.vel = Vec2::ZERO;
    player.facing = Direction::Down;
}
