//! Hole win condition
//!
//! A fixed circular hole on the arena floor. When the ball drops in, the
//! outcome depends on who kicked it last: a player-owned ball zaps the
//! snake boss, an enemy-owned ball hurts the player, a neutral ball just
//! sits there. Either way the ball is held at the hole center for a few
//! seconds, neutralized, then ejected at a random angle.

use glam::Vec2;
use log::info;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::BALL_INITIAL_SPEED;
use crate::unit_from_angle;
use super::ball::{self, BallOwnership};
use super::entity::{Entity, EntityKind};
use super::snake::{self, SnakeState};

/// Default hole radius in pixels
pub const HOLE_RADIUS: f32 = 20.0;

const THUNDER_PARTICLE_COUNT: usize = 60;
const THUNDER_PARTICLE_SPEED: f32 = 100.0;
const THUNDER_PARTICLE_SIZE: f32 = 3.0;
/// Alpha lost per second
const THUNDER_DECAY: f32 = 2.0;

const NEUTRAL_HOLD_TIME: f32 = 3.0;
const FLASH_TEXT_DURATION: f32 = 2.0;
const FLASH_SPEED_HZ: f32 = 10.0;
const EJECT_SPEED_FACTOR: f32 = 1.5;

/// Segments the snake boss loses when the player scores
const PLAYER_SCORE_SNAKE_SEGMENTS: u32 = 3;
/// Health the player loses when an enemy scores
const ENEMY_SCORE_PLAYER_DAMAGE: f32 = 20.0;

/// Win condition states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinState {
    /// Ball free, watching for it to drop in
    Idle,
    /// Player-owned ball dropped in this frame
    PlayerScored,
    /// Enemy-owned ball dropped in this frame
    EnemyScored,
    /// Holding the neutralized ball before ejecting it
    NeutralHold,
}

/// One spark of the scoring effect
#[derive(Debug, Clone, Copy)]
pub struct ThunderParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub active: bool,
}

impl ThunderParticle {
    fn inactive() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 0.0,
            alpha: 0.0,
            active: false,
        }
    }
}

/// The hole and its surrounding state machine
#[derive(Debug, Clone)]
pub struct WinCondition {
    pub pos: Vec2,
    pub radius: f32,
    pub state: WinState,
    pub state_timer: f32,
    /// Fixed-size pool, recycled in place
    pub particles: Vec<ThunderParticle>,
    pub flash_text_active: bool,
    pub flash_text_timer: f32,
    pub flash_text_alpha: f32,
}

impl WinCondition {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            state: WinState::Idle,
            state_timer: 0.0,
            particles: vec![ThunderParticle::inactive(); THUNDER_PARTICLE_COUNT],
            flash_text_active: false,
            flash_text_timer: 0.0,
            flash_text_alpha: 0.0,
        }
    }

    /// The ball counts as in the hole once its center is well inside the
    /// hole radius, so it reads as captured rather than grazing the rim
    pub fn is_ball_in_hole(&self, ball: &Entity) -> bool {
        let Some(data) = ball.ball() else {
            return false;
        };
        ball.pos.distance(self.pos) < self.radius - data.radius * 0.8
    }

    fn update_thunder(&mut self, dt: f32) {
        for particle in &mut self.particles {
            if !particle.active {
                continue;
            }
            particle.pos += particle.vel * dt;
            particle.alpha -= THUNDER_DECAY * dt;
            if particle.alpha <= 0.0 {
                particle.active = false;
            }
        }
    }

    fn update_flash_text(&mut self, dt: f32) {
        if !self.flash_text_active {
            return;
        }
        self.flash_text_timer += dt;
        self.flash_text_alpha = 0.5 + 0.5 * (self.flash_text_timer * FLASH_SPEED_HZ).sin();
        if self.flash_text_timer >= FLASH_TEXT_DURATION {
            self.flash_text_active = false;
        }
    }

    /// Light up a sparse particle line from `origin` to `target`
    pub fn trigger_thunder(&mut self, origin: Vec2, target: Vec2, rng: &mut Pcg32) {
        let offset = target - origin;
        let distance = offset.length();
        let dir = if distance > 0.0 {
            offset / distance
        } else {
            Vec2::ZERO
        };

        let count = self.particles.len();
        for (i, particle) in self.particles.iter_mut().enumerate() {
            // Every third slot, for a sparse bolt
            if i % 3 != 0 {
                continue;
            }
            let progress = i as f32 / count as f32;
            let jitter = Vec2::new(
                rng.random_range(-10..=10) as f32,
                rng.random_range(-10..=10) as f32,
            );
            particle.pos = origin + dir * (distance * progress) + jitter;
            particle.vel = dir * THUNDER_PARTICLE_SPEED
                + Vec2::new(
                    rng.random_range(-20..=20) as f32 / 10.0,
                    rng.random_range(-20..=20) as f32 / 10.0,
                );
            particle.size =
                THUNDER_PARTICLE_SIZE * (1.0 - rng.random_range(0..=5) as f32 / 10.0);
            particle.alpha = 1.0;
            particle.active = true;
        }
    }

    pub fn trigger_flash_text(&mut self) {
        self.flash_text_active = true;
        self.flash_text_timer = 0.0;
        self.flash_text_alpha = 1.0;
    }

    /// Player scored: shrink every live snake boss and arc thunder at it
    fn handle_player_score(&mut self, enemies: &mut [Entity], rng: &mut Pcg32) {
        self.trigger_flash_text();

        for enemy in enemies.iter_mut() {
            let enemy_pos = enemy.pos;
            let EntityKind::SnakeBoss(boss) = &mut enemy.kind else {
                continue;
            };
            if boss.is_defeated() {
                continue;
            }

            for _ in 0..PLAYER_SCORE_SNAKE_SEGMENTS {
                if !snake::shrink(boss) {
                    boss.state = SnakeState::Defeated;
                    break;
                }
            }
            if !boss.is_defeated() {
                boss.state = SnakeState::Shrinking;
                boss.shrink_timer = 0.0;
            }

            self.trigger_thunder(self.pos, enemy_pos, rng);
        }
        info!("player scored at the hole");
    }

    /// Enemy scored: damage the player and arc thunder at them
    fn handle_enemy_score(&mut self, player: &mut Entity, rng: &mut Pcg32) {
        self.trigger_flash_text();

        let player_pos = player.pos;
        if let Some(data) = player.player_mut() {
            data.apply_damage(ENEMY_SCORE_PLAYER_DAMAGE);
            self.trigger_thunder(self.pos, player_pos, rng);
            info!("enemy scored, player health {}", data.current_health);
        }
    }

    /// Pin the neutralized ball to the hole center; true once the hold
    /// timer expires
    fn hold_neutral_ball(&mut self, ball: &mut Entity, dt: f32) -> bool {
        self.state_timer += dt;

        ball.pos = self.pos;
        ball.vel = Vec2::ZERO;
        if let Some(data) = ball.ball_mut() {
            data.set_ownership(BallOwnership::Neutral);
        }

        self.state_timer >= NEUTRAL_HOLD_TIME
    }

    /// Launch the ball out of the hole at a random angle
    pub fn eject_ball(&mut self, ball: &mut Entity, rng: &mut Pcg32) {
        let Some(radius) = ball.ball().map(|d| d.radius) else {
            return;
        };
        if let Some(data) = ball.ball_mut() {
            data.set_ownership(BallOwnership::Neutral);
        }

        let angle = (rng.random_range(0..=359) as f32).to_radians();
        let dir = unit_from_angle(angle);
        ball::apply_force(ball, dir * BALL_INITIAL_SPEED * EJECT_SPEED_FACTOR);

        // Place it just outside the rim so it is not recaptured next frame
        ball.pos = self.pos + dir * (self.radius + radius);
        info!("ball ejected at {:.0} degrees", angle.to_degrees());
    }

    /// Advance the win condition one frame
    pub fn update(
        &mut self,
        ball: &mut Entity,
        player: &mut Entity,
        enemies: &mut [Entity],
        rng: &mut Pcg32,
        dt: f32,
    ) {
        self.update_thunder(dt);
        self.update_flash_text(dt);

        match self.state {
            WinState::Idle => {
                if !self.is_ball_in_hole(ball) {
                    return;
                }
                match ball.ball().map(|d| d.ownership) {
                    Some(BallOwnership::Player) => {
                        self.state = WinState::PlayerScored;
                        self.handle_player_score(enemies, rng);
                    }
                    Some(BallOwnership::Enemy) => {
                        self.state = WinState::EnemyScored;
                        self.handle_enemy_score(player, rng);
                    }
                    Some(BallOwnership::Neutral) => {
                        self.state = WinState::NeutralHold;
                        self.state_timer = 0.0;
                    }
                    None => return,
                }
                ball.vel = Vec2::ZERO;
                ball.pos = self.pos;
            }
            // Scored states last one frame, then the hold begins
            WinState::PlayerScored | WinState::EnemyScored => {
                self.state = WinState::NeutralHold;
                self.state_timer = 0.0;
            }
            WinState::NeutralHold => {
                if self.hold_neutral_ball(ball, dt) {
                    self.eject_ball(ball, rng);
                    self.state = WinState::Idle;
                }
            }
        }
    }
}
