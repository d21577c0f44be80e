use crate::engine::GameEngine;
use crate::pilots::{create_pilot, pilot_fingerprint, Pilot};
use crate::scripted::{ScriptedConfig, ScriptedEngine};
use anyhow::{anyhow, Context, Result};
use motion_tracker_core::steer::Steering;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub episodes: u32,
    /// Runner-side cap per episode, on top of whatever timeout the engine
    /// enforces itself.
    pub max_tics: u32,
    /// Optional pacing between tics, for watching a live engine.
    pub tick_delay: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            episodes: 10,
            max_tics: 700,
            tick_delay: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct EpisodeMetrics {
    pub episode: u32,
    pub tics: u32,
    pub total_reward: f64,
    pub left_tics: u32,
    pub right_tics: u32,
    pub fire_tics: u32,
    pub idle_tics: u32,
    /// True when the engine ended the episode itself rather than running
    /// into the runner's tic cap.
    pub resolved: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub pilot_id: String,
    pub pilot_fingerprint: String,
    pub seed: u32,
    pub max_tics: u32,
    pub avg_reward: f64,
    pub best_reward: f64,
    pub total_tics: u32,
    pub resolved_episodes: u32,
    pub episodes: Vec<EpisodeMetrics>,
}

pub fn run_pilot(pilot_id: &str, seed: u32, options: RunOptions) -> Result<RunReport> {
    let mut pilot = create_pilot(pilot_id).ok_or_else(|| anyhow!("unknown pilot '{pilot_id}'"))?;
    let mut engine = ScriptedEngine::new(ScriptedConfig::default(), seed);
    run_pilot_instance(&mut engine, pilot.as_mut(), seed, options)
}

pub fn run_pilot_instance(
    engine: &mut dyn GameEngine,
    pilot: &mut dyn Pilot,
    seed: u32,
    options: RunOptions,
) -> Result<RunReport> {
    if options.episodes == 0 {
        return Err(anyhow!("episodes must be > 0"));
    }
    if options.max_tics == 0 {
        return Err(anyhow!("max_tics must be > 0"));
    }

    let format = engine.screen_format();
    let layout = engine.action_layout();
    let mut episodes = Vec::with_capacity(options.episodes as usize);

    for episode in 0..options.episodes {
        pilot.reset(seed.wrapping_add(episode));
        engine
            .new_episode()
            .with_context(|| format!("engine failed to start episode {episode}"))?;

        let mut metrics = EpisodeMetrics {
            episode,
            tics: 0,
            total_reward: 0.0,
            left_tics: 0,
            right_tics: 0,
            fire_tics: 0,
            idle_tics: 0,
            resolved: false,
        };

        while !engine.episode_finished() && metrics.tics < options.max_tics {
            let tick = engine.tick_state().with_context(|| {
                format!("engine failed to deliver a frame in episode {episode}")
            })?;
            let action = pilot.next_action(&format, &layout, &tick).with_context(|| {
                format!("pilot failed on tic {} of episode {episode}", tick.tic)
            })?;
            let reward = engine
                .apply_action(&action)
                .with_context(|| format!("engine rejected the action on tic {}", tick.tic))?;

            match layout.decode(&action) {
                Some(Steering::Left) => metrics.left_tics += 1,
                Some(Steering::Right) => metrics.right_tics += 1,
                Some(Steering::Fire) => metrics.fire_tics += 1,
                None => metrics.idle_tics += 1,
            }
            metrics.tics += 1;
            debug!(episode, tic = tick.tic, reward, "tic applied");

            if let Some(delay) = options.tick_delay {
                thread::sleep(delay);
            }
        }

        metrics.resolved = engine.episode_finished();
        metrics.total_reward = engine.total_reward();
        if !metrics.resolved {
            warn!(
                episode,
                tics = metrics.tics,
                "tic cap reached before the engine finished the episode"
            );
        }
        info!(
            episode,
            tics = metrics.tics,
            reward = metrics.total_reward,
            resolved = metrics.resolved,
            "episode complete"
        );
        episodes.push(metrics);
    }

    Ok(summarize(pilot.id(), seed, options.max_tics, episodes))
}

fn summarize(pilot_id: &str, seed: u32, max_tics: u32, episodes: Vec<EpisodeMetrics>) -> RunReport {
    let count = episodes.len() as f64;
    let avg_reward = episodes.iter().map(|e| e.total_reward).sum::<f64>() / count;
    let best_reward = episodes
        .iter()
        .map(|e| e.total_reward)
        .fold(f64::NEG_INFINITY, f64::max);

    RunReport {
        pilot_id: pilot_id.to_string(),
        pilot_fingerprint: pilot_fingerprint(pilot_id)
            .unwrap_or_else(|| "unknown".to_string()),
        seed,
        max_tics,
        avg_reward,
        best_reward,
        total_tics: episodes.iter().map(|e| e.tics).sum(),
        resolved_episodes: episodes.iter().filter(|e| e.resolved).count() as u32,
        episodes,
    }
}

pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    let encoded = serde_json::to_vec_pretty(report).context("failed to serialize run report")?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
