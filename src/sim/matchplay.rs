//! Soccer match mode
//!
//! A timed variant built around a walled goal near the top of the arena.
//! Scoring branches on ball ownership: a player goal shrinks the snake
//! boss, an enemy goal costs the player health, and a neutral ball that
//! drifts in is simply put back into play. Each goal pauses play for a
//! celebration, then resets positions; the match ends when the clock
//! runs out.

use glam::{IVec2, Vec2};
use log::info;

use crate::consts::{TILE_HEIGHT, TILE_WIDTH};
use super::ball::{self, BallOwnership};
use super::collision::{Rect, circle_rect_overlap};
use super::entity::{Entity, EntityKind};
use super::snake::{self, Segment};
use super::world::{Tile, World};

const MATCH_DURATION_MINUTES: f32 = 3.0;
const GOAL_CELEBRATION_DURATION: f32 = 3.0;
const GOAL_WIDTH_TILES: i32 = 10;
const GOAL_HEIGHT_TILES: i32 = 6;
/// A player goal shrinks the snake once per 10 damage points
const GOAL_PLAYER_SCORE_DAMAGE: f32 = 30.0;
const GOAL_ENEMY_SCORE_DAMAGE: f32 = 20.0;

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Playing,
    /// Play paused while the goal celebration runs
    GoalCelebration,
    Finished,
}

/// Which side scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalScorer {
    Player,
    Enemy,
}

/// The goal structure built into the world grid
#[derive(Debug, Clone)]
pub struct Goal {
    /// Top-left tile of the goal frame
    pub origin: IVec2,
    pub width_tiles: i32,
    pub height_tiles: i32,
    /// Full goal footprint in pixels
    pub area: Rect,
    /// Open region between the posts where a goal counts
    pub net_entrance: Rect,
}

/// Match scoreboard and state machine
#[derive(Debug, Clone)]
pub struct MatchPlay {
    pub state: MatchState,
    pub last_scorer: Option<GoalScorer>,
    pub player_score: u32,
    pub enemy_score: u32,
    /// Total match length in seconds
    pub match_time: f32,
    pub time_remaining: f32,
    pub celebration_timer: f32,
    pub goal: Goal,
    arena_center: Vec2,
}

impl MatchPlay {
    /// Create a match and carve its goal into the world
    pub fn new(world: &mut World) -> Self {
        let goal = build_goal(world);
        let match_time = MATCH_DURATION_MINUTES * 60.0;
        info!(
            "match created, {} minute duration, goal at tile ({}, {})",
            MATCH_DURATION_MINUTES as i32, goal.origin.x, goal.origin.y
        );
        Self {
            state: MatchState::Playing,
            last_scorer: None,
            player_score: 0,
            enemy_score: 0,
            match_time,
            time_remaining: match_time,
            celebration_timer: 0.0,
            goal,
            arena_center: world.pixel_center(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == MatchState::Finished
    }

    /// Remaining time as MM:SS
    pub fn formatted_time(&self) -> String {
        let total = self.time_remaining as u32;
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    /// Advance the match one frame
    pub fn update(
        &mut self,
        ball: &mut Entity,
        player: &mut Entity,
        enemies: &mut [Entity],
        dt: f32,
    ) {
        match self.state {
            MatchState::Playing => {
                self.time_remaining -= dt;
                if self.time_remaining <= 0.0 {
                    self.time_remaining = 0.0;
                    self.state = MatchState::Finished;
                    info!(
                        "match finished, final score player {} - enemy {}",
                        self.player_score, self.enemy_score
                    );
                    return;
                }
                if let Some(scorer) = self.check_goal(ball) {
                    self.handle_goal(scorer, player, enemies);
                }
            }
            MatchState::GoalCelebration => {
                self.celebration_timer += dt;
                if self.celebration_timer >= GOAL_CELEBRATION_DURATION {
                    self.celebration_timer = 0.0;
                    self.state = MatchState::Playing;
                    self.reset_positions(ball, player, enemies);
                }
            }
            MatchState::Finished => {}
        }
    }

    /// Detect a scored goal; a neutral ball in the net is reset into play
    /// as a side effect and scores for nobody
    pub fn check_goal(&self, ball: &mut Entity) -> Option<GoalScorer> {
        if self.state != MatchState::Playing {
            return None;
        }
        let data = ball.ball()?;

        if !circle_rect_overlap(ball.pos, data.radius, &self.goal.net_entrance) {
            return None;
        }

        // Require the ball to be well inside the frame, not grazing a post
        let goal_center = self.goal.area.center();
        let min_distance = (self.goal.area.size.x + self.goal.area.size.y) / 5.0;
        if ball.pos.distance(goal_center) >= min_distance {
            return None;
        }

        match data.ownership {
            BallOwnership::Player => Some(GoalScorer::Player),
            BallOwnership::Enemy => Some(GoalScorer::Enemy),
            BallOwnership::Neutral => {
                ball::reset(ball, self.arena_center - Vec2::new(0.0, 50.0));
                info!("neutral ball in goal, back into play");
                None
            }
        }
    }

    /// Record a goal and start the celebration
    pub fn handle_goal(
        &mut self,
        scorer: GoalScorer,
        player: &mut Entity,
        enemies: &mut [Entity],
    ) {
        self.state = MatchState::GoalCelebration;
        self.last_scorer = Some(scorer);
        self.celebration_timer = 0.0;

        match scorer {
            GoalScorer::Player => {
                self.player_score += 1;
                apply_damage_to_enemies(GOAL_PLAYER_SCORE_DAMAGE, enemies);
            }
            GoalScorer::Enemy => {
                self.enemy_score += 1;
                if let Some(data) = player.player_mut() {
                    data.apply_damage(GOAL_ENEMY_SCORE_DAMAGE);
                }
            }
        }
        info!(
            "goal! score player {} - enemy {}",
            self.player_score, self.enemy_score
        );
    }

    /// Kickoff layout: ball above center, player left of center, snake
    /// boss below right
    pub fn reset_positions(&self, ball: &mut Entity, player: &mut Entity, enemies: &mut [Entity]) {
        let center = self.arena_center;

        ball::reset(ball, center - Vec2::new(0.0, 50.0));
        super::player::reset(player, center - Vec2::new(100.0, 0.0));

        for enemy in enemies.iter_mut() {
            reset_snake_position(enemy, center + Vec2::new(0.0, 100.0));
        }
    }
}

/// Shrink every snake boss once per 10 damage points, stopping at one
/// segment
fn apply_damage_to_enemies(damage: f32, enemies: &mut [Entity]) {
    let shrink_count = (damage / 10.0) as u32;
    for enemy in enemies.iter_mut() {
        let EntityKind::SnakeBoss(boss) = &mut enemy.kind else {
            continue;
        };
        for _ in 0..shrink_count {
            if boss.segment_count() <= 1 {
                break;
            }
            snake::shrink(boss);
        }
    }
}

/// Park the snake boss with its head right of `anchor` and the body
/// trailing further right
fn reset_snake_position(enemy: &mut Entity, anchor: Vec2) {
    let EntityKind::SnakeBoss(boss) = &mut enemy.kind else {
        return;
    };
    if boss.segments.is_empty() {
        return;
    }

    let head = IVec2::new(
        ((anchor.x + 50.0) / TILE_WIDTH) as i32,
        (anchor.y / TILE_HEIGHT) as i32,
    );
    for (i, segment) in boss.segments.iter_mut().enumerate() {
        let cell = IVec2::new(head.x + i as i32, head.y);
        *segment = Segment {
            cell,
            world: snake::segment_world(cell),
        };
    }
    enemy.pos = boss.segments[0].world;
}

/// Carve the goal into the world: clear the footprint, wall the frame,
/// and add the line across the middle
fn build_goal(world: &mut World) -> Goal {
    let origin = IVec2::new((world.width() - GOAL_WIDTH_TILES) / 2, GOAL_HEIGHT_TILES + 15);
    let (gx, gy) = (origin.x, origin.y);

    for x in gx..gx + GOAL_WIDTH_TILES {
        for y in gy..gy + GOAL_HEIGHT_TILES {
            world.set_tile(x, y, Tile::Floor);
        }
    }

    // Crossbars and posts
    for x in gx..gx + GOAL_WIDTH_TILES {
        world.set_tile(x, gy, Tile::Wall);
        world.set_tile(x, gy + GOAL_HEIGHT_TILES - 1, Tile::Wall);
    }
    for y in gy..gy + GOAL_HEIGHT_TILES {
        world.set_tile(gx, y, Tile::Wall);
        world.set_tile(gx + GOAL_WIDTH_TILES - 1, y, Tile::Wall);
    }

    // Goal line across the middle
    for x in gx + 2..gx + GOAL_WIDTH_TILES - 2 {
        world.set_tile(x, gy + GOAL_HEIGHT_TILES / 2, Tile::Wall);
    }

    let area = Rect::new(
        gx as f32 * TILE_WIDTH,
        gy as f32 * TILE_HEIGHT,
        GOAL_WIDTH_TILES as f32 * TILE_WIDTH,
        GOAL_HEIGHT_TILES as f32 * TILE_HEIGHT,
    );
    let net_entrance = Rect::new(
        (gx + 1) as f32 * TILE_WIDTH,
        (gy + 1) as f32 * TILE_HEIGHT,
        (GOAL_WIDTH_TILES - 2) as f32 * TILE_WIDTH,
        (GOAL_HEIGHT_TILES - 2) as f32 * TILE_HEIGHT,
    );

    Goal {
        origin,
        width_tiles: GOAL_WIDTH_TILES,
        height_tiles: GOAL_HEIGHT_TILES,
        area,
        net_entrance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SIM_DT, WORLD_HEIGHT, WORLD_WIDTH};
    use crate::sim::ball::BallKind;
    use crate::sim::player;

    fn setup() -> (MatchPlay, World, Entity, Entity, Vec<Entity>) {
        let mut world = World::with_default_layout(WORLD_WIDTH, WORLD_HEIGHT);
        let matchplay = MatchPlay::new(&mut world);
        let ball = ball::spawn(BallKind::Standard, Vec2::new(100.0, 400.0));
        let player = player::spawn(Vec2::new(200.0, 480.0));
        let enemies = vec![snake::spawn(IVec2::new(44, 72), 5)];
        (matchplay, world, ball, player, enemies)
    }

    #[test]
    fn test_goal_walls_carved_into_world() {
        let (matchplay, world, ..) = setup();
        let o = matchplay.goal.origin;

        // Frame is walls
        assert!(world.is_wall_at(o.x, o.y));
        assert!(world.is_wall_at(o.x + GOAL_WIDTH_TILES - 1, o.y + GOAL_HEIGHT_TILES - 1));
        // Entrance tile just inside the left post, above the middle line
        assert!(!world.is_wall_at(o.x + 1, o.y + 1));
    }

    #[test]
    fn test_player_goal_scores_and_damages_enemies() {
        let (mut matchplay, _world, mut ball, mut player, mut enemies) = setup();
        ball.pos = matchplay.goal.area.center();
        ball.ball_mut().unwrap().set_ownership(BallOwnership::Player);

        matchplay.update(&mut ball, &mut player, &mut enemies, SIM_DT);

        assert_eq!(matchplay.state, MatchState::GoalCelebration);
        assert_eq!(matchplay.player_score, 1);
        assert_eq!(matchplay.last_scorer, Some(GoalScorer::Player));
        // 30 damage is three shrinks: 5 segments down to 2
        assert_eq!(enemies[0].snake_boss().unwrap().segment_count(), 2);
        assert_eq!(player.player().unwrap().current_health, 100.0);
    }

    #[test]
    fn test_enemy_goal_damages_player() {
        let (mut matchplay, _world, mut ball, mut player, mut enemies) = setup();
        ball.pos = matchplay.goal.area.center();
        ball.ball_mut().unwrap().set_ownership(BallOwnership::Enemy);

        matchplay.update(&mut ball, &mut player, &mut enemies, SIM_DT);

        assert_eq!(matchplay.enemy_score, 1);
        assert_eq!(
            player.player().unwrap().current_health,
            100.0 - GOAL_ENEMY_SCORE_DAMAGE
        );
        assert_eq!(enemies[0].snake_boss().unwrap().segment_count(), 5);
    }

    #[test]
    fn test_neutral_ball_in_goal_resets_into_play() {
        let (mut matchplay, world, mut ball, mut player, mut enemies) = setup();
        ball.pos = matchplay.goal.area.center();

        matchplay.update(&mut ball, &mut player, &mut enemies, SIM_DT);

        assert_eq!(matchplay.state, MatchState::Playing);
        assert_eq!(matchplay.player_score + matchplay.enemy_score, 0);
        assert_eq!(ball.pos, world.pixel_center() - Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_celebration_resets_positions() {
        let (mut matchplay, world, mut ball, mut player, mut enemies) = setup();
        ball.pos = matchplay.goal.area.center();
        ball.ball_mut().unwrap().set_ownership(BallOwnership::Player);

        matchplay.update(&mut ball, &mut player, &mut enemies, SIM_DT);
        assert_eq!(matchplay.state, MatchState::GoalCelebration);

        let frames = (GOAL_CELEBRATION_DURATION / SIM_DT) as usize + 2;
        for _ in 0..frames {
            matchplay.update(&mut ball, &mut player, &mut enemies, SIM_DT);
        }
        assert_eq!(matchplay.state, MatchState::Playing);

        let center = world.pixel_center();
        assert_eq!(ball.pos, center - Vec2::new(0.0, 50.0));
        assert_eq!(player.pos, center - Vec2::new(100.0, 0.0));
        let boss = enemies[0].snake_boss().unwrap();
        let expected_head = IVec2::new(
            ((center.x + 50.0) / TILE_WIDTH) as i32,
            ((center.y + 100.0) / TILE_HEIGHT) as i32,
        );
        assert_eq!(boss.segments[0].cell, expected_head);
        assert_eq!(boss.segments[1].cell, expected_head + IVec2::new(1, 0));
    }

    #[test]
    fn test_clock_runs_out() {
        let (mut matchplay, _world, mut ball, mut player, mut enemies) = setup();
        matchplay.time_remaining = 0.5;

        for _ in 0..60 {
            matchplay.update(&mut ball, &mut player, &mut enemies, SIM_DT);
        }
        assert!(matchplay.is_finished());
        assert_eq!(matchplay.time_remaining, 0.0);
    }
}
