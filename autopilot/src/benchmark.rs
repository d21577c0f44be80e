use crate::pilots::pilot_ids;
use crate::runner::{run_pilot, write_report, RunOptions, RunReport};
use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub episodes: u32,
    pub max_tics: u32,
    pub out_dir: PathBuf,
    pub save_top: usize,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub pilot_id: String,
    pub pilot_fingerprint: String,
    pub seed: u32,
    pub seed_hex: String,
    pub episodes: u32,
    pub total_tics: u32,
    pub avg_reward: f64,
    pub best_reward: f64,
    pub resolved_episodes: u32,
    pub left_tics: u32,
    pub right_tics: u32,
    pub fire_tics: u32,
    pub idle_tics: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PilotAggregate {
    pub pilot_id: String,
    pub pilot_fingerprint: String,
    pub runs: usize,
    pub avg_reward: f64,
    pub best_reward: f64,
    /// Mean tics per episode across every run of this pilot.
    pub avg_tics: f64,
    /// Fraction of episodes the engine ended itself.
    pub resolve_rate: f64,
    pub avg_fire_tics: f64,
    pub avg_steer_tics: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedReportRecord {
    pub rank: usize,
    pub metric: String,
    pub pilot_id: String,
    pub pilot_fingerprint: String,
    pub seed: u32,
    pub seed_hex: String,
    pub avg_reward: f64,
    pub total_tics: u32,
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub episodes_per_run: u32,
    pub max_tics: u32,
    pub jobs: Option<usize>,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub pilot_rankings: Vec<PilotAggregate>,
    pub runs: Vec<RunRecord>,
    pub saved_reports: Vec<SavedReportRecord>,
}

pub fn resolve_pilots(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(pilot_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let mut pilots = Vec::new();
            for token in raw.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                pilots.push(token.to_string());
            }
            if pilots.is_empty() {
                return Err(anyhow!("--pilots resolved to empty list"));
            }
            Ok(pilots)
        }
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.pilots.is_empty() {
        return Err(anyhow!("benchmark requires at least one pilot"));
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }

    let run_jobs: Vec<(String, u32)> = config
        .pilots
        .iter()
        .flat_map(|pilot| config.seeds.iter().map(move |seed| (pilot.clone(), *seed)))
        .collect();
    info!(
        runs = run_jobs.len(),
        pilots = config.pilots.len(),
        seeds = config.seeds.len(),
        "benchmark fan-out"
    );

    let options = RunOptions {
        episodes: config.episodes,
        max_tics: config.max_tics,
        tick_delay: None,
    };
    let run_one = |(pilot_id, seed): &(String, u32)| -> Result<RunReport> {
        run_pilot(pilot_id, *seed, options)
            .with_context(|| format!("benchmark run failed for pilot={pilot_id} seed={seed:#x}"))
    };

    let run_results: Vec<Result<RunReport>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let mut grouped: HashMap<String, Vec<&RunReport>> = HashMap::new();
    for run in &runs {
        grouped.entry(run.pilot_id.clone()).or_default().push(run);
    }

    let mut rankings = Vec::new();
    for (pilot_id, pilot_runs) in grouped {
        let runs_count = pilot_runs.len();
        let pilot_fingerprint = pilot_runs
            .first()
            .map(|r| r.pilot_fingerprint.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let episode_count: u64 = pilot_runs
            .iter()
            .map(|r| r.episodes.len() as u64)
            .sum::<u64>()
            .max(1);
        let sum_tics: u64 = pilot_runs.iter().map(|r| r.total_tics as u64).sum();
        let resolved: u64 = pilot_runs.iter().map(|r| r.resolved_episodes as u64).sum();
        let sum_fire: u64 = pilot_runs
            .iter()
            .flat_map(|r| r.episodes.iter())
            .map(|e| e.fire_tics as u64)
            .sum();
        let sum_steer: u64 = pilot_runs
            .iter()
            .flat_map(|r| r.episodes.iter())
            .map(|e| (e.left_tics + e.right_tics) as u64)
            .sum();
        let avg_reward =
            pilot_runs.iter().map(|r| r.avg_reward).sum::<f64>() / runs_count as f64;
        let best_reward = pilot_runs
            .iter()
            .map(|r| r.best_reward)
            .fold(f64::NEG_INFINITY, f64::max);

        rankings.push(PilotAggregate {
            pilot_id,
            pilot_fingerprint,
            runs: runs_count,
            avg_reward,
            best_reward,
            avg_tics: sum_tics as f64 / episode_count as f64,
            resolve_rate: resolved as f64 / episode_count as f64,
            avg_fire_tics: sum_fire as f64 / episode_count as f64,
            avg_steer_tics: sum_steer as f64 / episode_count as f64,
        });
    }

    rankings.sort_by(|a, b| {
        b.avg_reward
            .total_cmp(&a.avg_reward)
            .then_with(|| b.best_reward.total_cmp(&a.best_reward))
            .then_with(|| b.resolve_rate.total_cmp(&a.resolve_rate))
    });

    let mut run_records: Vec<RunRecord> = runs
        .iter()
        .map(|run| RunRecord {
            pilot_id: run.pilot_id.clone(),
            pilot_fingerprint: run.pilot_fingerprint.clone(),
            seed: run.seed,
            seed_hex: seed_to_hex(run.seed),
            episodes: run.episodes.len() as u32,
            total_tics: run.total_tics,
            avg_reward: run.avg_reward,
            best_reward: run.best_reward,
            resolved_episodes: run.resolved_episodes,
            left_tics: run.episodes.iter().map(|e| e.left_tics).sum(),
            right_tics: run.episodes.iter().map(|e| e.right_tics).sum(),
            fire_tics: run.episodes.iter().map(|e| e.fire_tics).sum(),
            idle_tics: run.episodes.iter().map(|e| e.idle_tics).sum(),
        })
        .collect();

    run_records.sort_by(|a, b| {
        b.avg_reward
            .total_cmp(&a.avg_reward)
            .then_with(|| b.best_reward.total_cmp(&a.best_reward))
            .then_with(|| a.total_tics.cmp(&b.total_tics))
    });

    let mut saved_reports = Vec::new();
    if config.save_top > 0 {
        save_top_reports(
            &config.out_dir,
            &runs,
            "reward",
            config.save_top,
            |run| run.avg_reward,
            &mut saved_reports,
        )?;
        save_top_reports(
            &config.out_dir,
            &runs,
            "speed",
            config.save_top,
            |run| {
                if run.resolved_episodes > 0 {
                    -(run.total_tics as f64)
                } else {
                    f64::NEG_INFINITY
                }
            },
            &mut saved_reports,
        )?;
    }

    write_runs_csv(&config.out_dir.join("runs.csv"), &run_records)?;
    write_rankings_csv(&config.out_dir.join("rankings.csv"), &rankings)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        episodes_per_run: config.episodes,
        max_tics: config.max_tics,
        jobs: config.jobs,
        pilots: config.pilots,
        seeds: config.seeds,
        run_count: run_records.len(),
        pilot_rankings: rankings,
        runs: run_records,
        saved_reports,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    Ok(report)
}

fn save_top_reports<F>(
    out_dir: &Path,
    runs: &[RunReport],
    metric_name: &str,
    count: usize,
    metric: F,
    saved_reports: &mut Vec<SavedReportRecord>,
) -> Result<()>
where
    F: Fn(&RunReport) -> f64,
{
    let mut order: Vec<&RunReport> = runs.iter().collect();
    order.sort_by(|a, b| {
        metric(b)
            .total_cmp(&metric(a))
            .then_with(|| b.best_reward.total_cmp(&a.best_reward))
            .then_with(|| a.total_tics.cmp(&b.total_tics))
    });

    let save_dir = out_dir.join(format!("top-{metric_name}"));
    fs::create_dir_all(&save_dir)
        .with_context(|| format!("failed creating {}", save_dir.display()))?;

    for (idx, run) in order.into_iter().take(count).enumerate() {
        let rank = idx + 1;
        let base = format!(
            "rank{rank:02}-{}-seed{:08x}-tics{}",
            run.pilot_id, run.seed, run.total_tics
        );
        let report_path = save_dir.join(format!("{base}.json"));
        write_report(&report_path, run)?;

        saved_reports.push(SavedReportRecord {
            rank,
            metric: metric_name.to_string(),
            pilot_id: run.pilot_id.clone(),
            pilot_fingerprint: run.pilot_fingerprint.clone(),
            seed: run.seed,
            seed_hex: seed_to_hex(run.seed),
            avg_reward: run.avg_reward,
            total_tics: run.total_tics,
            path: report_path.to_string_lossy().into_owned(),
        });
    }

    Ok(())
}

fn write_runs_csv(path: &Path, rows: &[RunRecord]) -> Result<()> {
    let mut csv = String::from(
        "pilot_id,pilot_fingerprint,seed_hex,seed,episodes,total_tics,avg_reward,best_reward,resolved_episodes,left_tics,right_tics,fire_tics,idle_tics\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{:.2},{:.2},{},{},{},{},{}\n",
            row.pilot_id,
            row.pilot_fingerprint,
            row.seed_hex,
            row.seed,
            row.episodes,
            row.total_tics,
            row.avg_reward,
            row.best_reward,
            row.resolved_episodes,
            row.left_tics,
            row.right_tics,
            row.fire_tics,
            row.idle_tics
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

fn write_rankings_csv(path: &Path, rows: &[PilotAggregate]) -> Result<()> {
    let mut csv = String::from(
        "rank,pilot_id,pilot_fingerprint,runs,avg_reward,best_reward,avg_tics,resolve_rate,avg_fire_tics,avg_steer_tics\n",
    );
    for (idx, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{},{:.2},{:.2},{:.2},{:.4},{:.2},{:.2}\n",
            idx + 1,
            row.pilot_id,
            row.pilot_fingerprint,
            row.runs,
            row.avg_reward,
            row.best_reward,
            row.avg_tics,
            row.resolve_rate,
            row.avg_fire_tics,
            row.avg_steer_tics
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
