//! Ball physics
//!
//! The ball moves by per-frame displacement with multiplicative friction,
//! bounces off wall tiles and arena borders, and gets kicked around by the
//! player and the snake boss. It carries an ownership tag recording who
//! propelled it last; ownership decides the damage direction when the ball
//! lands in the hole or the goal, and tints the ball accordingly.

use glam::Vec2;

use crate::consts::{
    BALL_BOUNCE_FACTOR, BALL_FRICTION, BALL_MAX_SPEED, BALL_RADIUS, BALL_SPEED_FLOOR,
    PLAYER_PUSH_FORCE, TILE_HEIGHT, TILE_WIDTH,
};
use super::collision::reflect;
use super::color::Color;
use super::entity::{Entity, EntityKind};
use super::world::World;

/// Ball flavor; only colors and tuning differ, the elemental on-hit
/// effects are not implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    Standard,
    Fire,
    Ice,
    Lightning,
}

/// Who propelled the ball last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallOwnership {
    /// White, damages nobody
    #[default]
    Neutral,
    /// Blue, damages the snake boss
    Player,
    /// Red, damages the player
    Enemy,
}

/// Ball payload
#[derive(Debug, Clone)]
pub struct BallData {
    pub kind: BallKind,
    pub radius: f32,
    pub bounce_factor: f32,
    pub friction: f32,
    pub damage: f32,
    pub has_special_effect: bool,
    pub ownership: BallOwnership,
    pub inner_color: Color,
    pub outer_color: Color,
}

impl BallData {
    pub fn new(kind: BallKind) -> Self {
        let mut data = Self {
            kind,
            radius: BALL_RADIUS,
            bounce_factor: BALL_BOUNCE_FACTOR,
            friction: BALL_FRICTION,
            damage: 10.0,
            has_special_effect: false,
            ownership: BallOwnership::Neutral,
            inner_color: Color::WHITE,
            outer_color: Color::WHITE,
        };
        match kind {
            BallKind::Standard => {}
            BallKind::Fire => {
                data.damage = 15.0;
                data.has_special_effect = true;
            }
            BallKind::Ice => {
                data.bounce_factor = 0.95;
                data.friction = 0.99;
                data.damage = 8.0;
                data.has_special_effect = true;
            }
            BallKind::Lightning => {
                data.bounce_factor = 0.7;
                data.damage = 20.0;
                data.has_special_effect = true;
            }
        }
        data
    }

    /// Set the ownership tag and the matching tint
    pub fn set_ownership(&mut self, ownership: BallOwnership) {
        self.ownership = ownership;
        let (inner, outer) = match ownership {
            BallOwnership::Neutral => (Color::WHITE, Color::WHITE),
            BallOwnership::Player => (Color::BLUE, Color::SKYBLUE),
            BallOwnership::Enemy => (Color::RED, Color::MAROON),
        };
        self.inner_color = inner;
        self.outer_color = outer;
    }
}

/// Create a ball entity at rest
pub fn spawn(kind: BallKind, pos: Vec2) -> Entity {
    let diameter = BALL_RADIUS * 2.0;
    Entity::new(
        pos,
        Vec2::new(diameter, diameter),
        EntityKind::Ball(BallData::new(kind)),
    )
}

/// Advance the ball one frame: integrate, apply friction, resolve wall and
/// player collisions, then snap near-zero velocity to rest
pub fn update(ball: &mut Entity, world: &World, player: &Entity) {
    if !ball.active {
        return;
    }
    let Some(friction) = ball.ball().map(|d| d.friction) else {
        return;
    };

    let prev = ball.pos;
    ball.pos += ball.vel;
    ball.vel *= friction;

    wall_collision(ball, world, prev);
    player_collision(ball, player);

    // Stop tiny residual drift outright
    if ball.vel.x.abs() < BALL_SPEED_FLOOR {
        ball.vel.x = 0.0;
    }
    if ball.vel.y.abs() < BALL_SPEED_FLOOR {
        ball.vel.y = 0.0;
    }
}

/// Bounce the ball off wall tiles in its 3x3 neighborhood, then clamp it
/// into the arena
///
/// Horizontal and vertical axes are swept separately against the previous
/// position, so a corner can reflect both components in one frame.
pub fn wall_collision(ball: &mut Entity, world: &World, prev: Vec2) {
    let Some((radius, bounce)) = ball.ball().map(|d| (d.radius, d.bounce_factor)) else {
        return;
    };

    let tile = World::world_to_tile(ball.pos);
    for dy in -1..=1 {
        for dx in -1..=1 {
            let cell = glam::IVec2::new(tile.x + dx, tile.y + dy);
            if !world.is_wall_at(cell.x, cell.y) {
                continue;
            }

            let left = cell.x as f32 * TILE_WIDTH;
            let right = left + TILE_WIDTH;
            let top = cell.y as f32 * TILE_HEIGHT;
            let bottom = top + TILE_HEIGHT;

            if ball.pos.y > top && ball.pos.y < bottom {
                if prev.x + radius < left && ball.pos.x + radius >= left {
                    ball.pos.x = left - radius;
                    ball.vel.x = -ball.vel.x * bounce;
                } else if prev.x - radius > right && ball.pos.x - radius <= right {
                    ball.pos.x = right + radius;
                    ball.vel.x = -ball.vel.x * bounce;
                }
            }

            if ball.pos.x > left && ball.pos.x < right {
                if prev.y + radius < top && ball.pos.y + radius >= top {
                    ball.pos.y = top - radius;
                    ball.vel.y = -ball.vel.y * bounce;
                } else if prev.y - radius > bottom && ball.pos.y - radius <= bottom {
                    ball.pos.y = bottom + radius;
                    ball.vel.y = -ball.vel.y * bounce;
                }
            }
        }
    }

    let extent = world.pixel_size();
    if ball.pos.x - radius < 0.0 {
        ball.pos.x = radius;
        ball.vel.x = -ball.vel.x * bounce;
    } else if ball.pos.x + radius > extent.x {
        ball.pos.x = extent.x - radius;
        ball.vel.x = -ball.vel.x * bounce;
    }
    if ball.pos.y - radius < 0.0 {
        ball.pos.y = radius;
        ball.vel.y = -ball.vel.y * bounce;
    } else if ball.pos.y + radius > extent.y {
        ball.pos.y = extent.y - radius;
        ball.vel.y = -ball.vel.y * bounce;
    }
}

/// Kick the ball when the player touches it
///
/// Pushes the ball out of the player's collision circle, launches it along
/// the contact normal plus half the player's velocity, and marks it
/// player-owned.
pub fn player_collision(ball: &mut Entity, player: &Entity) {
    let Entity { pos, vel, kind, .. } = ball;
    let EntityKind::Ball(data) = kind else {
        return;
    };

    let offset = *pos - player.pos;
    let distance = offset.length();
    let player_radius = player.body_radius();
    if distance <= 0.0 || distance >= data.radius + player_radius {
        return;
    }

    let normal = offset / distance;
    *pos = player.pos + normal * (data.radius + player_radius);
    *vel = normal * PLAYER_PUSH_FORCE + player.vel * 0.5;
    *vel = vel.clamp_length_max(BALL_MAX_SPEED);

    data.set_ownership(BallOwnership::Player);
}

/// Elastic bounce off a round-bodied enemy; returns whether contact occurred
///
/// Reflects only when the ball is moving toward the enemy, so an already
/// separating ball is repositioned but keeps its velocity.
pub fn enemy_collision(ball: &mut Entity, enemy: &Entity) -> bool {
    let Entity { pos, vel, kind, .. } = ball;
    let EntityKind::Ball(data) = kind else {
        return false;
    };

    let offset = *pos - enemy.pos;
    let distance = offset.length();
    let enemy_radius = enemy.body_radius();
    if distance <= 0.0 || distance >= data.radius + enemy_radius {
        return false;
    }

    let normal = offset / distance;
    *pos = enemy.pos + normal * (data.radius + enemy_radius);

    if vel.dot(normal) < 0.0 {
        *vel = reflect(*vel, normal) * data.bounce_factor;
    }
    true
}

/// Add an impulse to the ball, capping the resulting speed
pub fn apply_force(ball: &mut Entity, force: Vec2) {
    if !ball.active || ball.ball().is_none() {
        return;
    }
    ball.vel = (ball.vel + force).clamp_length_max(BALL_MAX_SPEED);
}

/// Put the ball back at `pos`, stopped and active
pub fn reset(ball: &mut Entity, pos: Vec2) {
    if ball.ball().is_none() {
        return;
    }
    ball.pos = pos;
    ball.vel = Vec2::ZERO;
    ball.active = true;
}
