//! Frame description built from simulation state
//!
//! Rendering is split from the simulation: each frame the game builds a
//! flat display list of primitives plus HUD text, and a backend draws it.
//! Nothing in here mutates game state.

use glam::Vec2;

use crate::Settings;
use crate::consts::{TILE_HEIGHT, TILE_WIDTH};
use crate::sim::snake::HEAD_RADIUS;
use crate::sim::{
    BallOwnership, Color, Entity, GamePhase, GameState, MatchState, ModeState, Rect, Tile,
    WinState, World,
};

const WALL_COLOR: Color = Color::DARKGRAY;
const FLOOR_COLOR: Color = Color::rgb(32, 32, 32);
const HOLE_COLOR: Color = Color::BLACK;
const HOLE_RIM_COLOR: Color = Color::GRAY;
const NET_COLOR: Color = Color::rgba(200, 200, 200, 60);
const PLAYER_COLOR: Color = Color::SKYBLUE;
const THUNDER_COLOR: Color = Color::YELLOW;
const HUD_TEXT_SIZE: f32 = 10.0;
const BANNER_TEXT_SIZE: f32 = 20.0;

/// One drawable primitive, in world pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    RectLines {
        rect: Rect,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    CircleLines {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// A complete frame, commands in back-to-front draw order
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn rect_lines(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::RectLines { rect, color });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn circle_lines(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::CircleLines {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, text: String, pos: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text,
            pos,
            size,
            color,
        });
    }
}

/// Build the display list for the current game state
pub fn build_frame(state: &GameState, settings: &Settings) -> Frame {
    let mut frame = Frame::default();

    draw_world(&mut frame, &state.world);
    draw_mode_underlay(&mut frame, state);
    draw_ball(&mut frame, &state.ball);
    for enemy in &state.enemies {
        draw_snake(&mut frame, enemy);
    }
    draw_player(&mut frame, &state.player, settings);
    draw_mode_overlay(&mut frame, state, settings);
    draw_hud(&mut frame, state, settings);

    frame
}

fn draw_world(frame: &mut Frame, world: &World) {
    frame.rect(
        Rect::new(0.0, 0.0, world.pixel_size().x, world.pixel_size().y),
        FLOOR_COLOR,
    );
    for y in 0..world.height() {
        for x in 0..world.width() {
            if world.tile(x, y) == Some(Tile::Wall) {
                let origin = World::tile_origin(glam::IVec2::new(x, y));
                frame.rect(
                    Rect::new(origin.x, origin.y, TILE_WIDTH, TILE_HEIGHT),
                    WALL_COLOR,
                );
            }
        }
    }
}

/// Mode elements drawn under the entities (hole, goal net)
fn draw_mode_underlay(frame: &mut Frame, state: &GameState) {
    match &state.mode {
        ModeState::Hole(win) => {
            frame.circle(win.pos, win.radius, HOLE_COLOR);
            frame.circle_lines(win.pos, win.radius, HOLE_RIM_COLOR);
        }
        ModeState::Match(matchplay) => {
            frame.rect(matchplay.goal.net_entrance, NET_COLOR);
            frame.rect_lines(matchplay.goal.area, HOLE_RIM_COLOR);
        }
    }
}

fn draw_ball(frame: &mut Frame, ball: &Entity) {
    let Some(data) = ball.ball() else { return };
    frame.circle(ball.pos, data.radius, data.outer_color);
    frame.circle(ball.pos, data.radius * 0.6, data.inner_color);
    if data.has_special_effect {
        frame.circle_lines(ball.pos, data.radius + 2.0, Color::YELLOW.fade(0.7));
    }
}

fn draw_snake(frame: &mut Frame, snake: &Entity) {
    let Some(boss) = snake.snake_boss() else {
        return;
    };

    // Body first (tail to head) so the head overlaps its neck
    let segment = Vec2::new(TILE_WIDTH * 2.0, TILE_HEIGHT * 2.0);
    for seg in boss.segments[1..].iter().rev() {
        frame.rect(Rect::centered(seg.world, segment), boss.body_color);
    }
    if let Some(head) = boss.head() {
        let head_color = if boss.is_defeated() {
            boss.head_color.fade(0.4)
        } else {
            boss.head_color
        };
        frame.circle(head.world, HEAD_RADIUS, head_color);

        // State effect rings fade out over the grow/shrink pause
        let grow = boss.grow_effect();
        if grow > 0.0 {
            frame.circle_lines(head.world, HEAD_RADIUS + 4.0, Color::GREEN.fade(grow));
        }
        let shrink = boss.shrink_effect();
        if shrink > 0.0 {
            frame.circle_lines(head.world, HEAD_RADIUS + 4.0, Color::RED.fade(shrink));
        }
        if boss.is_defeated() {
            frame.circle_lines(head.world, HEAD_RADIUS + 2.0, Color::RED);
            frame.circle_lines(head.world, HEAD_RADIUS + 5.0, Color::YELLOW);
        }
    }
}

fn draw_player(frame: &mut Frame, player: &Entity, settings: &Settings) {
    frame.rect(Rect::centered(player.pos, player.size), PLAYER_COLOR);
    if settings.debug_overlay {
        frame.circle_lines(player.pos, player.body_radius(), Color::GREEN);
    }
}

/// Mode elements drawn over the entities (particles, flash text)
fn draw_mode_overlay(frame: &mut Frame, state: &GameState, settings: &Settings) {
    let ModeState::Hole(win) = &state.mode else {
        return;
    };

    for particle in win.particles.iter().filter(|p| p.active) {
        frame.circle(particle.pos, particle.size, THUNDER_COLOR.fade(particle.alpha));
    }

    if win.flash_text_active && settings.effective_flash() {
        let text = match win.state {
            WinState::PlayerScored | WinState::NeutralHold => "GOAL!",
            WinState::EnemyScored => "ENEMY SCORES!",
            WinState::Idle => "GOAL!",
        };
        let center = Vec2::new(state.world.pixel_center().x, win.pos.y - win.radius - 16.0);
        frame.text(
            text.to_string(),
            center,
            BANNER_TEXT_SIZE,
            Color::YELLOW.fade(win.flash_text_alpha),
        );
    }
}

fn draw_hud(frame: &mut Frame, state: &GameState, settings: &Settings) {
    let mut line = 0.0;
    let mut push = |frame: &mut Frame, text: String, color: Color| {
        frame.text(
            text,
            Vec2::new(4.0, 4.0 + line * (HUD_TEXT_SIZE + 2.0)),
            HUD_TEXT_SIZE,
            color,
        );
        line += 1.0;
    };

    if let Some(data) = state.player.player() {
        push(
            frame,
            format!("HP {:.0}/{:.0}", data.current_health, data.max_health),
            Color::RED,
        );
        push(
            frame,
            format!("LVL {} XP {}/{}", data.level, data.xp, data.xp_to_next_level()),
            Color::SKYBLUE,
        );
    }

    if let ModeState::Match(matchplay) = &state.mode {
        push(
            frame,
            format!(
                "{} - {}  {}",
                matchplay.player_score,
                matchplay.enemy_score,
                matchplay.formatted_time()
            ),
            Color::WHITE,
        );
        if matchplay.state == MatchState::GoalCelebration {
            // Blinks during the celebration; steady under reduced flash
            let blink_on = (matchplay.celebration_timer * 6.0) as i32 % 2 == 0;
            if blink_on || !settings.effective_flash() {
                push(frame, "GOAL!".to_string(), Color::YELLOW);
            }
        }
        if matchplay.is_finished() {
            let center = state.world.pixel_center();
            frame.text(
                "FULL TIME".to_string(),
                center - Vec2::new(0.0, BANNER_TEXT_SIZE * 1.5),
                BANNER_TEXT_SIZE,
                Color::WHITE,
            );
        }
    }

    if settings.show_fps {
        push(frame, format!("tick {}", state.tick_count), Color::GRAY);
    }

    let banner = match state.phase {
        GamePhase::Paused => Some(("PAUSED", Color::WHITE)),
        GamePhase::GameOver => Some(("GAME OVER", Color::RED)),
        GamePhase::Victory => Some(("VICTORY", Color::GREEN)),
        GamePhase::Playing => None,
    };
    if let Some((text, color)) = banner {
        let center = state.world.pixel_center();
        frame.text(text.to_string(), center, BANNER_TEXT_SIZE, color);
    }

    // Ownership readout doubles as a debug aid
    if settings.debug_overlay {
        if let Some(data) = state.ball.ball() {
            let tag = match data.ownership {
                BallOwnership::Neutral => "neutral",
                BallOwnership::Player => "player",
                BallOwnership::Enemy => "enemy",
            };
            push(frame, format!("ball: {tag}"), Color::LIGHTGRAY);
        }
    }
}
