//! Snake boss
//!
//! A grid-locked snake that chases the ball. It moves one cell per tick of
//! its move timer, never reverses, grows and speeds up when it eats a
//! neutral or enemy ball, and shrinks and slows down when hit by a
//! player-owned ball. Losing the last body segment defeats it.

use glam::{IVec2, Vec2};
use log::{debug, info};

use crate::consts::{PLAYER_XP_PER_HIT, TILE_HEIGHT, TILE_WIDTH};
use super::ball::{self, BallOwnership};
use super::collision::{Rect, circle_rect_overlap};
use super::color::Color;
use super::entity::{Direction, Entity, EntityKind};
use super::world::World;

const INITIAL_MOVE_INTERVAL: f32 = 0.2;
const MIN_MOVE_INTERVAL: f32 = 0.05;
const INTERVAL_STEP: f32 = 0.05;
const GROW_TIME: f32 = 2.0;
const SHRINK_TIME: f32 = 2.0;
/// Replan the chase path every this many grid moves
const MOVES_PER_REPLAN: u32 = 3;

const SEGMENT_WIDTH_TILES: i32 = 2;
const SEGMENT_HEIGHT_TILES: i32 = 2;
const SEGMENT_WIDTH: f32 = TILE_WIDTH * SEGMENT_WIDTH_TILES as f32;
const SEGMENT_HEIGHT: f32 = TILE_HEIGHT * SEGMENT_HEIGHT_TILES as f32;
const HEAD_RADIUS_FACTOR: f32 = 1.5;
pub const HEAD_RADIUS: f32 = (SEGMENT_WIDTH + SEGMENT_HEIGHT) / 4.0 * HEAD_RADIUS_FACTOR;

const HEAD_HIT_DAMAGE: f32 = 10.0;
const HEAD_PUSH_FORCE: f32 = 5.0;
const BODY_HIT_DAMAGE: f32 = 5.0;
const BODY_PUSH_FORCE: f32 = 3.0;
const EAT_KICK_FORCE: f32 = 6.0;
const HIT_BOUNCE_FORCE: f32 = 0.5;

/// Snake boss behavior states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    /// Waiting for a first target
    Idle,
    /// Picking a fresh target from the ball position
    Tracking,
    /// Stepping along the grid toward the target
    Moving,
    /// Growth pause after eating the ball
    Growing,
    /// Shrink pause after being hit
    Shrinking,
    /// Out of segments, inert
    Defeated,
}

/// One body cell, kept in both grid and world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub cell: IVec2,
    pub world: Vec2,
}

impl Segment {
    fn at(cell: IVec2) -> Self {
        Self {
            cell,
            world: segment_world(cell),
        }
    }
}

/// Center of a snake segment anchored at grid cell `cell`
pub fn segment_world(cell: IVec2) -> Vec2 {
    Vec2::new(
        cell.x as f32 * TILE_WIDTH + SEGMENT_WIDTH / 2.0,
        cell.y as f32 * TILE_HEIGHT + SEGMENT_HEIGHT / 2.0,
    )
}

/// Snake boss payload; `segments[0]` is the head
#[derive(Debug, Clone)]
pub struct SnakeBossData {
    pub state: SnakeState,
    pub current_dir: Direction,
    pub next_dir: Direction,
    pub move_timer: f32,
    pub move_interval: f32,
    pub grow_timer: f32,
    pub shrink_timer: f32,
    pub target: Option<IVec2>,
    moves_since_replan: u32,
    pub segments: Vec<Segment>,
    pub head_color: Color,
    pub body_color: Color,
}

impl SnakeBossData {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn is_defeated(&self) -> bool {
        self.state == SnakeState::Defeated
    }

    /// Whether the head may move onto `cell`: inside the arena, not a wall,
    /// and not occupied by a body segment (the head cell itself is allowed,
    /// the tail vacates it during the shift)
    pub fn is_valid_cell(&self, cell: IVec2, world: &World) -> bool {
        if world.is_wall_at_pixel(World::tile_center(cell)) {
            return false;
        }
        !self.segments[1..].iter().any(|s| s.cell == cell)
    }

    /// Remaining fraction of the grow pause, 1.0 right after eating
    pub fn grow_effect(&self) -> f32 {
        if self.state == SnakeState::Growing {
            (1.0 - self.grow_timer / GROW_TIME).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Remaining fraction of the shrink pause, 1.0 right after a hit
    pub fn shrink_effect(&self) -> f32 {
        if self.state == SnakeState::Shrinking {
            (1.0 - self.shrink_timer / SHRINK_TIME).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Direction-choice strategy for the chase
pub trait Pathfinder {
    /// Pick the next move toward `target`, or `None` when every
    /// non-reversing neighbor cell is blocked
    fn next_direction(
        &self,
        boss: &SnakeBossData,
        target: IVec2,
        world: &World,
    ) -> Option<Direction>;
}

/// Greedy single-step chase: of the three non-reversing neighbor cells,
/// take the one with the smallest Manhattan distance to the target, even
/// when that distance is larger than the current one
pub struct GreedyChase;

impl Pathfinder for GreedyChase {
    fn next_direction(
        &self,
        boss: &SnakeBossData,
        target: IVec2,
        world: &World,
    ) -> Option<Direction> {
        let head = boss.head()?.cell;
        let opposite = boss.current_dir.opposite();

        let mut best: Option<(Direction, i32)> = None;
        for dir in Direction::ALL {
            if dir == opposite {
                continue;
            }
            let next = head + dir.delta();
            if !boss.is_valid_cell(next, world) {
                continue;
            }
            let dist = (target - next).abs().element_sum();
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((dir, dist));
            }
        }
        best.map(|(dir, _)| dir)
    }
}

/// Create a snake boss with its head at `cell` and the body extending left
pub fn spawn(cell: IVec2, initial_length: usize) -> Entity {
    let segments = (0..initial_length.max(1))
        .map(|i| Segment::at(IVec2::new(cell.x - i as i32, cell.y)))
        .collect::<Vec<_>>();

    let data = SnakeBossData {
        state: SnakeState::Idle,
        current_dir: Direction::Right,
        next_dir: Direction::Right,
        move_timer: 0.0,
        move_interval: INITIAL_MOVE_INTERVAL,
        grow_timer: 0.0,
        shrink_timer: 0.0,
        target: None,
        moves_since_replan: 0,
        segments,
        head_color: Color::ORANGE,
        body_color: Color::DARKORANGE,
    };
    let mut entity = Entity::new(
        segment_world(cell),
        Vec2::new(SEGMENT_WIDTH, SEGMENT_HEIGHT),
        EntityKind::SnakeBoss(data),
    );
    entity.facing = Direction::Right;
    entity
}

/// Advance the snake boss one frame
pub fn update(
    snake: &mut Entity,
    world: &World,
    ball: &mut Entity,
    player: &mut Entity,
    pathfinder: &dyn Pathfinder,
    dt: f32,
) {
    if !snake.active {
        return;
    }
    let EntityKind::SnakeBoss(boss) = &mut snake.kind else {
        return;
    };
    if boss.segments.is_empty() {
        return;
    }

    match boss.state {
        SnakeState::Idle | SnakeState::Tracking => {
            // Re-target on the ball's current cell and start moving
            let target = World::world_to_tile(ball.pos);
            boss.target = Some(target);
            if let Some(dir) = pathfinder.next_direction(boss, target, world) {
                boss.next_dir = dir;
            }
            boss.state = SnakeState::Moving;
        }
        SnakeState::Moving => {
            boss.move_timer += dt;
            if boss.move_timer >= boss.move_interval {
                boss.move_timer = 0.0;
                boss.current_dir = boss.next_dir;

                let moved = step(boss, world);

                let head = boss.segments[0].cell;
                if boss.target == Some(head) {
                    boss.target = None;
                    boss.state = SnakeState::Tracking;
                } else if !moved {
                    boss.target = None;
                    boss.state = SnakeState::Tracking;
                }

                boss.moves_since_replan += 1;
                if boss.moves_since_replan >= MOVES_PER_REPLAN {
                    boss.moves_since_replan = 0;
                    let ball_cell = World::world_to_tile(ball.pos);
                    if boss.target != Some(ball_cell) {
                        boss.target = Some(ball_cell);
                        if let Some(dir) = pathfinder.next_direction(boss, ball_cell, world) {
                            boss.next_dir = dir;
                        }
                    }
                }
            }
        }
        SnakeState::Growing => {
            boss.grow_timer += dt;
            if boss.grow_timer >= GROW_TIME {
                boss.grow_timer = 0.0;
                boss.state = SnakeState::Tracking;
                boss.target = None;
            }
        }
        SnakeState::Shrinking => {
            boss.shrink_timer += dt;
            if boss.shrink_timer >= SHRINK_TIME {
                boss.shrink_timer = 0.0;
                boss.state = SnakeState::Tracking;
                boss.target = None;
            }
        }
        SnakeState::Defeated => {}
    }

    snake.pos = boss.segments[0].world;
    snake.facing = boss.current_dir;

    handle_ball_collision(boss, ball, player);
    handle_player_collision(boss, player);
}

/// Step one cell in the current direction; false if the cell is blocked
pub fn step(boss: &mut SnakeBossData, world: &World) -> bool {
    let Some(head) = boss.head() else {
        return false;
    };
    let next = head.cell + boss.current_dir.delta();
    if !boss.is_valid_cell(next, world) {
        return false;
    }

    // Shift body cells toward the head, then place the head
    for i in (1..boss.segments.len()).rev() {
        boss.segments[i] = Segment::at(boss.segments[i - 1].cell);
    }
    boss.segments[0] = Segment::at(next);
    true
}

/// Append a tail segment and speed the snake up
pub fn grow(boss: &mut SnakeBossData) {
    let Some(tail) = boss.segments.last().copied() else {
        return;
    };
    boss.segments.push(tail);
    boss.move_interval = (boss.move_interval - INTERVAL_STEP).max(MIN_MOVE_INTERVAL);
}

/// Drop the tail segment and slow the snake down; false when only the head
/// remains, which defeats the snake
pub fn shrink(boss: &mut SnakeBossData) -> bool {
    if boss.segments.len() <= 1 {
        return false;
    }
    boss.segments.pop();
    boss.move_interval = (boss.move_interval + INTERVAL_STEP).min(INITIAL_MOVE_INTERVAL);
    true
}

/// Resolve ball contact: the head eats neutral and enemy balls, any part of
/// the snake takes damage from a player-owned ball
pub fn handle_ball_collision(
    boss: &mut SnakeBossData,
    ball: &mut Entity,
    player: &mut Entity,
) -> bool {
    if boss.segments.is_empty() {
        return false;
    }
    let Some((ball_radius, ownership)) = ball.ball().map(|d| (d.radius, d.ownership)) else {
        return false;
    };

    let head = boss.segments[0].world;
    if ball.pos.distance(head) < HEAD_RADIUS + ball_radius {
        if ownership == BallOwnership::Player {
            if boss.state != SnakeState::Shrinking && boss.state != SnakeState::Defeated {
                damage_snake(boss, ball, player, head);
            }
        } else if boss.state != SnakeState::Growing {
            boss.state = SnakeState::Growing;
            boss.grow_timer = 0.0;
            grow(boss);

            ball::apply_force(ball, (ball.pos - head) * EAT_KICK_FORCE);
            if let Some(data) = ball.ball_mut() {
                data.set_ownership(BallOwnership::Enemy);
            }
            info!("snake ate the ball, now {} segments", boss.segments.len());
        }
        return true;
    }

    // Body sweep only matters for a damaging ball
    if ownership == BallOwnership::Player {
        for i in 1..boss.segments.len() {
            let seg = boss.segments[i].world;
            let rect = Rect::centered(seg, Vec2::new(SEGMENT_WIDTH, SEGMENT_HEIGHT));
            if circle_rect_overlap(ball.pos, ball_radius, &rect) {
                if boss.state != SnakeState::Shrinking && boss.state != SnakeState::Defeated {
                    damage_snake(boss, ball, player, seg);
                }
                return true;
            }
        }
    }
    false
}

fn damage_snake(boss: &mut SnakeBossData, ball: &mut Entity, player: &mut Entity, contact: Vec2) {
    boss.state = SnakeState::Shrinking;
    boss.shrink_timer = 0.0;
    if !shrink(boss) {
        boss.state = SnakeState::Defeated;
        info!("snake boss defeated");
    }

    ball::apply_force(ball, (ball.pos - contact) * HIT_BOUNCE_FORCE);

    if let Some(data) = player.player_mut() {
        data.award_xp(PLAYER_XP_PER_HIT);
    }
    debug!("snake hit, {} segments left", boss.segments.len());
}

/// Resolve player contact: the head hits hard, body segments hit softer
///
/// Every overlapping body segment lands its own hit, so brushing along the
/// body hurts more than clipping a single segment.
pub fn handle_player_collision(boss: &mut SnakeBossData, player: &mut Entity) -> bool {
    if boss.segments.is_empty() {
        return false;
    }
    let player_radius = player.body_radius();
    let player_rect = Rect::centered(player.pos, player.size);
    let mut hit = false;

    let head = boss.segments[0].world;
    if player.pos.distance(head) < HEAD_RADIUS + player_radius {
        if let Some(data) = player.player_mut() {
            data.apply_damage(HEAD_HIT_DAMAGE);
        }
        player.vel += (player.pos - head) * HEAD_PUSH_FORCE;
        hit = true;
    }

    for i in 1..boss.segments.len() {
        let seg = boss.segments[i].world;
        let rect = Rect::centered(seg, Vec2::new(SEGMENT_WIDTH, SEGMENT_HEIGHT));
        if rect.overlaps(&player_rect) {
            if let Some(data) = player.player_mut() {
                data.apply_damage(BODY_HIT_DAMAGE);
            }
            player.vel += (player.pos - seg) * BODY_PUSH_FORCE;
            hit = true;
        }
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::ball::BallKind;
    use crate::sim::player;
    use proptest::prelude::*;

    fn boss_data(snake: &Entity) -> &SnakeBossData {
        snake.snake_boss().unwrap()
    }

    fn boss_data_mut(snake: &mut Entity) -> &mut SnakeBossData {
        snake.snake_boss_mut().unwrap()
    }

    #[test]
    fn test_spawn_extends_body_left() {
        let snake = spawn(IVec2::new(10, 10), 3);
        let boss = boss_data(&snake);
        assert_eq!(boss.segments.len(), 3);
        assert_eq!(boss.segments[0].cell, IVec2::new(10, 10));
        assert_eq!(boss.segments[1].cell, IVec2::new(9, 10));
        assert_eq!(boss.segments[2].cell, IVec2::new(8, 10));
        assert_eq!(boss.state, SnakeState::Idle);
        assert!((boss.move_interval - INITIAL_MOVE_INTERVAL).abs() < 1e-6);
    }

    #[test]
    fn test_greedy_chase_moves_toward_target() {
        let world = World::new(40, 40);
        let snake = spawn(IVec2::new(10, 10), 1);
        let boss = boss_data(&snake);

        let dir = GreedyChase
            .next_direction(boss, IVec2::new(15, 10), &world)
            .unwrap();
        assert_eq!(dir, Direction::Right);

        let dir = GreedyChase
            .next_direction(boss, IVec2::new(10, 20), &world)
            .unwrap();
        assert_eq!(dir, Direction::Down);
    }

    #[test]
    fn test_greedy_chase_never_reverses() {
        let world = World::new(40, 40);
        let snake = spawn(IVec2::new(10, 10), 1);
        let boss = boss_data(&snake);
        assert_eq!(boss.current_dir, Direction::Right);

        // Target directly behind: any answer but Left is acceptable
        let dir = GreedyChase
            .next_direction(boss, IVec2::new(5, 10), &world)
            .unwrap();
        assert_ne!(dir, Direction::Left);
    }

    #[test]
    fn test_step_shifts_segments() {
        let world = World::new(40, 40);
        let mut snake = spawn(IVec2::new(10, 10), 3);
        let boss = boss_data_mut(&mut snake);

        assert!(step(boss, &world));
        assert_eq!(boss.segments[0].cell, IVec2::new(11, 10));
        assert_eq!(boss.segments[1].cell, IVec2::new(10, 10));
        assert_eq!(boss.segments[2].cell, IVec2::new(9, 10));
        assert_eq!(boss.segments[0].world, segment_world(IVec2::new(11, 10)));
    }

    #[test]
    fn test_step_blocked_by_own_body() {
        let world = World::new(40, 40);
        let mut snake = spawn(IVec2::new(10, 10), 5);
        let boss = boss_data_mut(&mut snake);

        // Coil the body so the cell right of the head is occupied
        let coil = [
            IVec2::new(10, 10),
            IVec2::new(10, 9),
            IVec2::new(11, 9),
            IVec2::new(11, 10),
            IVec2::new(12, 10),
        ];
        for (seg, cell) in boss.segments.iter_mut().zip(coil) {
            *seg = Segment {
                cell,
                world: segment_world(cell),
            };
        }
        assert_eq!(boss.current_dir, Direction::Right);

        assert!(!boss.is_valid_cell(IVec2::new(11, 10), &world));
        assert!(!step(boss, &world));
        assert_eq!(boss.segments[0].cell, IVec2::new(10, 10));
    }

    #[test]
    fn test_step_blocked_by_wall() {
        let world = World::new(40, 40);
        // Head one cell inside the right border
        let mut snake = spawn(IVec2::new(38, 10), 1);
        let boss = boss_data_mut(&mut snake);
        assert!(!step(boss, &world));
        assert_eq!(boss.segments[0].cell, IVec2::new(38, 10));
    }

    #[test]
    fn test_grow_and_shrink_adjust_speed() {
        let mut snake = spawn(IVec2::new(10, 10), 2);
        let boss = boss_data_mut(&mut snake);

        grow(boss);
        assert_eq!(boss.segments.len(), 3);
        assert_eq!(boss.segments[2], boss.segments[1]);
        assert!((boss.move_interval - 0.15).abs() < 1e-6);

        // Shrinking twice restores the cap, a third returns false
        assert!(shrink(boss));
        assert!(shrink(boss));
        assert!((boss.move_interval - INITIAL_MOVE_INTERVAL).abs() < 1e-6);
        assert!(!shrink(boss));
        assert_eq!(boss.segments.len(), 1);
    }

    #[test]
    fn test_head_eats_neutral_ball() {
        let mut snake = spawn(IVec2::new(10, 10), 2);
        let mut player = player::spawn(Vec2::new(300.0, 300.0));
        let head = segment_world(IVec2::new(10, 10));
        let mut ball = ball::spawn(BallKind::Standard, head + Vec2::new(1.0, 0.0));

        let boss = boss_data_mut(&mut snake);
        assert!(handle_ball_collision(boss, &mut ball, &mut player));

        assert_eq!(boss.state, SnakeState::Growing);
        assert_eq!(boss.segments.len(), 3);
        let data = ball.ball().unwrap();
        assert_eq!(data.ownership, BallOwnership::Enemy);
        assert!((ball.vel.x - EAT_KICK_FORCE).abs() < 1e-4);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_player_ball_shrinks_snake_and_awards_xp() {
        let mut snake = spawn(IVec2::new(10, 10), 3);
        let mut player = player::spawn(Vec2::new(300.0, 300.0));
        let head = segment_world(IVec2::new(10, 10));
        let mut ball = ball::spawn(BallKind::Standard, head + Vec2::new(2.0, 0.0));
        ball.ball_mut().unwrap().set_ownership(BallOwnership::Player);

        let boss = boss_data_mut(&mut snake);
        assert!(handle_ball_collision(boss, &mut ball, &mut player));

        assert_eq!(boss.state, SnakeState::Shrinking);
        assert_eq!(boss.segments.len(), 2);
        assert_eq!(player.player().unwrap().xp, PLAYER_XP_PER_HIT);
    }

    #[test]
    fn test_last_segment_hit_defeats_snake() {
        let mut snake = spawn(IVec2::new(10, 10), 1);
        let mut player = player::spawn(Vec2::new(300.0, 300.0));
        let head = segment_world(IVec2::new(10, 10));
        let mut ball = ball::spawn(BallKind::Standard, head);
        ball.ball_mut().unwrap().set_ownership(BallOwnership::Player);

        let boss = boss_data_mut(&mut snake);
        handle_ball_collision(boss, &mut ball, &mut player);
        assert_eq!(boss.state, SnakeState::Defeated);
    }

    #[test]
    fn test_body_hit_damages_player() {
        let mut snake = spawn(IVec2::new(10, 10), 3);
        // Left of the tail segment, clear of the larger head circle
        let tail = segment_world(IVec2::new(8, 10));
        let mut player = player::spawn(tail + Vec2::new(-8.0, 0.0));
        assert!(player.pos.distance(segment_world(IVec2::new(10, 10))) >= HEAD_RADIUS + 8.0);

        let boss = boss_data_mut(&mut snake);
        assert!(handle_player_collision(boss, &mut player));
        assert_eq!(player.player().unwrap().current_health, 100.0 - BODY_HIT_DAMAGE);
        assert!(player.vel.x < 0.0);
    }

    #[test]
    fn test_every_overlapping_body_segment_hits() {
        let mut snake = spawn(IVec2::new(10, 10), 4);
        // Straddles the three body segments at (9,10), (8,10) and (7,10)
        // while staying exactly at head distance 20, outside the head circle
        let mut player = player::spawn(Vec2::new(68.0, 88.0));

        let boss = boss_data_mut(&mut snake);
        assert!(handle_player_collision(boss, &mut player));
        assert_eq!(
            player.player().unwrap().current_health,
            100.0 - 3.0 * BODY_HIT_DAMAGE
        );
    }

    proptest! {
        #[test]
        fn prop_segments_stay_distinct_and_off_walls(
            bx in 24.0f32..296.0,
            by in 24.0f32..296.0,
            frames in 1usize..400,
        ) {
            let world = World::new(40, 40);
            let mut snake = spawn(IVec2::new(20, 20), 4);
            let mut player = player::spawn(Vec2::new(310.0, 310.0));
            let mut ball = ball::spawn(BallKind::Standard, Vec2::new(bx, by));

            for _ in 0..frames {
                ball::update(&mut ball, &world, &player);
                update(&mut snake, &world, &mut ball, &mut player, &GreedyChase, SIM_DT);

                let boss = snake.snake_boss().unwrap();
                prop_assert!(boss.segment_count() >= 1);
                let cells: Vec<IVec2> = boss.segments.iter().map(|s| s.cell).collect();
                for (i, cell) in cells.iter().enumerate() {
                    prop_assert!(!world.is_wall_at(cell.x, cell.y));
                    for other in &cells[i + 1..] {
                        if cell == other {
                            // A duplicate is only the freshly grown tail,
                            // which stays coincident until the next step
                            prop_assert!(cells[i..].iter().all(|c| c == cell));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_update_targets_ball_and_moves() {
        let world = World::new(40, 40);
        let mut snake = spawn(IVec2::new(10, 10), 2);
        let mut player = player::spawn(Vec2::new(300.0, 300.0));
        let mut ball = ball::spawn(BallKind::Standard, World::tile_center(IVec2::new(20, 10)));

        // First update leaves Idle and picks a target
        update(&mut snake, &world, &mut ball, &mut player, &GreedyChase, SIM_DT);
        let boss = boss_data(&snake);
        assert_eq!(boss.state, SnakeState::Moving);
        assert_eq!(boss.target, Some(IVec2::new(20, 10)));

        // Enough frames for several move intervals
        for _ in 0..60 {
            update(&mut snake, &world, &mut ball, &mut player, &GreedyChase, SIM_DT);
        }
        let boss = boss_data(&snake);
        assert!(boss.segments[0].cell.x > 10);
        assert_eq!(snake.pos, boss.segments[0].world);
    }
}
