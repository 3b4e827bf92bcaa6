//! Base entity record shared by every simulated object
//!
//! The player, the ball and the snake boss all share the same positional
//! core; the kind-specific state hangs off a closed enum so collision and
//! scoring code can match exhaustively instead of downcasting.

use glam::Vec2;

use super::ball::BallData;
use super::player::PlayerData;
use super::snake::SnakeBossData;

/// Cardinal facing directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid step for this direction (screen coordinates, +y is down)
    pub fn delta(self) -> glam::IVec2 {
        match self {
            Direction::Up => glam::IVec2::new(0, -1),
            Direction::Down => glam::IVec2::new(0, 1),
            Direction::Left => glam::IVec2::new(-1, 0),
            Direction::Right => glam::IVec2::new(1, 0),
        }
    }

    /// Scan order used when probing candidate moves
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// Kind-specific payload
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(PlayerData),
    Ball(BallData),
    SnakeBoss(SnakeBossData),
}

/// A simulated object: position, velocity, bounding box and payload
#[derive(Debug, Clone)]
pub struct Entity {
    /// Center position in world pixels
    pub pos: Vec2,
    /// Displacement per fixed 60 Hz step, not per second
    pub vel: Vec2,
    /// Bounding box extents
    pub size: Vec2,
    /// Inactive entities are skipped by update, render and collision
    pub active: bool,
    pub facing: Direction,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, kind: EntityKind) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            active: true,
            facing: Direction::Down,
            kind,
        }
    }

    /// Collision radius approximation for box-shaped entities:
    /// mean of width and height, halved
    pub fn body_radius(&self) -> f32 {
        (self.size.x + self.size.y) / 4.0
    }

    pub fn ball(&self) -> Option<&BallData> {
        match &self.kind {
            EntityKind::Ball(data) => Some(data),
            _ => None,
        }
    }

    pub fn ball_mut(&mut self) -> Option<&mut BallData> {
        match &mut self.kind {
            EntityKind::Ball(data) => Some(data),
            _ => None,
        }
    }

    pub fn player(&self) -> Option<&PlayerData> {
        match &self.kind {
            EntityKind::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.kind {
            EntityKind::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn snake_boss(&self) -> Option<&SnakeBossData> {
        match &self.kind {
            EntityKind::SnakeBoss(data) => Some(data),
            _ => None,
        }
    }

    pub fn snake_boss_mut(&mut self) -> Option<&mut SnakeBossData> {
        match &mut self.kind {
            EntityKind::SnakeBoss(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_direction_delta_is_unit_step() {
        for dir in Direction::ALL {
            let d = dir.delta();
            assert_eq!(d.x.abs() + d.y.abs(), 1);
        }
    }

    #[test]
    fn test_body_radius() {
        let e = Entity::new(
            Vec2::ZERO,
            Vec2::new(16.0, 16.0),
            EntityKind::Player(PlayerData::new()),
        );
        assert!((e.body_radius() - 8.0).abs() < 1e-6);
    }
}
