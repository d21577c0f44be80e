//! Deterministic stand-in engine for offline runs, benchmarks, and tests.
//!
//! Renders a bright sprite drifting over a dark backdrop with a static row
//! of HUD icons across the bottom rows. Slide actions shift the viewpoint,
//! which moves the sprite the opposite way across the screen; firing inside
//! the hit window resolves the episode.

use motion_tracker_core::frame::{ChannelOrder, CHANNELS};
use motion_tracker_core::rng::SeededRng;
use motion_tracker_core::steer::{ActionLayout, Steering};

use crate::engine::{EngineError, EngineTick, GameEngine, ScreenFormat};

pub const HIT_REWARD: f64 = 100.0;
pub const SHOT_COST: f64 = -5.0;
pub const LIVING_COST: f64 = -1.0;

pub const BACKDROP_RGB: [u8; 3] = [16, 16, 16];
pub const SPRITE_RGB: [u8; 3] = [220, 210, 60];
pub const HUD_RGB: [u8; 3] = [230, 230, 230];

pub const HUD_ICON_SIZE: u32 = 8;
pub const HUD_ICON_PITCH: u32 = 50;
pub const HUD_ICON_MARGIN: u32 = 20;

#[derive(Clone, Copy, Debug)]
pub struct ScriptedConfig {
    pub width: u32,
    pub height: u32,
    pub channel_order: ChannelOrder,
    /// Engine-enforced episode length in tics.
    pub episode_timeout: u32,
    pub sprite_half: u32,
    /// Sprite drift per tic, in pixels.
    pub drift_speed: i32,
    /// Viewpoint slide per move action, in pixels of apparent sprite motion.
    pub slide_speed: i32,
    /// Half-width of the hit window around screen center. Must stay wider
    /// than any pilot's fire band or in-band shots can miss forever.
    pub hit_halfwidth: f64,
    pub starting_ammo: u32,
}

impl Default for ScriptedConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            channel_order: ChannelOrder::Rgb,
            episode_timeout: 600,
            sprite_half: 6,
            drift_speed: 3,
            slide_speed: 6,
            hit_halfwidth: 30.0,
            starting_ammo: 50,
        }
    }
}

pub struct ScriptedEngine {
    config: ScriptedConfig,
    layout: ActionLayout,
    rng: SeededRng,
    active: bool,
    tic: u32,
    sprite_x: i32,
    sprite_y: u32,
    drift: i32,
    ammo: u32,
    episode_reward: f64,
}

impl ScriptedEngine {
    pub fn new(config: ScriptedConfig, seed: u32) -> Self {
        Self {
            config,
            layout: ActionLayout::standard(),
            rng: SeededRng::new(seed),
            active: false,
            tic: 0,
            sprite_x: config.width as i32 / 2,
            sprite_y: config.height / 3,
            drift: config.drift_speed,
            ammo: config.starting_ammo,
            episode_reward: 0.0,
        }
    }

    fn hud_top(&self) -> u32 {
        self.config.height - self.config.height / 8
    }

    fn hud_pixel(&self, x: u32, y: u32) -> bool {
        let top = self.hud_top();
        if y < top || y >= top + HUD_ICON_SIZE || x < HUD_ICON_MARGIN {
            return false;
        }
        (x - HUD_ICON_MARGIN) % HUD_ICON_PITCH < HUD_ICON_SIZE
    }

    fn min_x(&self) -> i32 {
        self.config.sprite_half as i32
    }

    fn max_x(&self) -> i32 {
        self.config.width as i32 - 1 - self.config.sprite_half as i32
    }

    fn sprite_in_hit_window(&self) -> bool {
        let center = self.config.width as f64 / 2.0;
        (self.sprite_x as f64 - center).abs() <= self.config.hit_halfwidth
    }

    fn advance_sprite(&mut self, slide: i32) {
        self.sprite_x += self.drift + slide;
        if self.sprite_x <= self.min_x() {
            self.sprite_x = self.min_x();
            self.drift = self.config.drift_speed;
        } else if self.sprite_x >= self.max_x() {
            self.sprite_x = self.max_x();
            self.drift = -self.config.drift_speed;
        }
    }

    fn render_screen(&self) -> Vec<u8> {
        let width = self.config.width;
        let height = self.config.height;
        let half = self.config.sprite_half as i32;
        let mut buffer = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                let rgb = if self.hud_pixel(x, y) {
                    HUD_RGB
                } else {
                    let dx = x as i32 - self.sprite_x;
                    let dy = y as i32 - self.sprite_y as i32;
                    if dx.abs() <= half && dy.abs() <= half {
                        SPRITE_RGB
                    } else {
                        BACKDROP_RGB
                    }
                };
                match self.config.channel_order {
                    ChannelOrder::Rgb => buffer.extend_from_slice(&rgb),
                    ChannelOrder::Bgr => buffer.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]),
                }
            }
        }
        buffer
    }
}

impl GameEngine for ScriptedEngine {
    fn screen_format(&self) -> ScreenFormat {
        ScreenFormat {
            width: self.config.width,
            height: self.config.height,
            order: self.config.channel_order,
        }
    }

    fn action_layout(&self) -> ActionLayout {
        self.layout.clone()
    }

    fn new_episode(&mut self) -> Result<(), EngineError> {
        self.active = true;
        self.tic = 0;
        self.ammo = self.config.starting_ammo;
        self.episode_reward = 0.0;
        self.sprite_x = self.rng.next_range(self.min_x(), self.max_x() + 1);
        self.drift = if self.rng.next_int(2) == 0 {
            self.config.drift_speed
        } else {
            -self.config.drift_speed
        };
        Ok(())
    }

    fn episode_finished(&self) -> bool {
        !self.active
    }

    fn tick_state(&mut self) -> Result<EngineTick, EngineError> {
        if !self.active {
            return Err(EngineError::EpisodeNotActive);
        }
        Ok(EngineTick {
            tic: self.tic,
            screen_buffer: self.render_screen(),
            game_variables: vec![self.ammo as f64],
        })
    }

    fn apply_action(&mut self, action: &[f64]) -> Result<f64, EngineError> {
        if !self.active {
            return Err(EngineError::EpisodeNotActive);
        }
        if action.len() != self.layout.button_count() {
            return Err(EngineError::Unavailable {
                reason: format!(
                    "action vector has {} entries, engine is configured for {}",
                    action.len(),
                    self.layout.button_count()
                ),
            });
        }

        let mut reward = LIVING_COST;
        let mut slide = 0;
        match self.layout.decode(action) {
            Some(Steering::Left) => slide = self.config.slide_speed,
            Some(Steering::Right) => slide = -self.config.slide_speed,
            Some(Steering::Fire) => {
                reward += SHOT_COST;
                self.ammo = self.ammo.saturating_sub(1);
                if self.sprite_in_hit_window() {
                    reward += HIT_REWARD;
                    self.active = false;
                }
            }
            None => {}
        }

        self.advance_sprite(slide);
        self.tic += 1;
        if self.tic >= self.config.episode_timeout {
            self.active = false;
        }
        self.episode_reward += reward;
        Ok(reward)
    }

    fn total_reward(&self) -> f64 {
        self.episode_reward
    }
}
