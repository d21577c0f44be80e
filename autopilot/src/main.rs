use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use gunner_autopilot::benchmark::{resolve_pilots, run_benchmark, BenchmarkConfig};
use gunner_autopilot::pilots::{create_pilot, describe_pilots, pilot_ids, pilot_manifest_entries};
use gunner_autopilot::runner::{run_pilot, write_report, RunOptions};
use gunner_autopilot::util::{parse_seed, resolve_seeds, seed_to_hex, timestamp_suffix};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gunner-autopilot")]
#[command(about = "Vision autopilot lab: motion-tracking gunner pilots, episode runs, benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available pilots
    ListPilots,
    /// Export full pilot manifest (including config fingerprints)
    RosterManifest {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run one pilot for a batch of episodes and write the run report
    Run {
        #[arg(long)]
        pilot: String,
        #[arg(long)]
        seed: String,
        #[arg(long, default_value_t = 10)]
        episodes: u32,
        #[arg(long, default_value_t = 700)]
        max_tics: u32,
        /// Sleep between tics, for watching a live engine at human speed
        #[arg(long)]
        tick_delay_ms: Option<u64>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run multi-seed benchmark across one or more pilots
    Benchmark {
        #[arg(long)]
        pilots: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_file: Option<PathBuf>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 10)]
        episodes: u32,
        #[arg(long, default_value_t = 700)]
        max_tics: u32,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long, default_value_t = 4)]
        save_top: usize,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let Cli { command } = Cli::parse();

    match command {
        Commands::ListPilots => {
            for (id, description) in describe_pilots() {
                println!("{id:16} {description}");
            }
        }
        Commands::RosterManifest { output } => {
            let manifest = pilot_manifest_entries()?;
            let encoded = serde_json::to_vec_pretty(&manifest)?;
            if let Some(path) = output {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, encoded)?;
                println!("wrote={}", path.display());
                println!("pilots={}", manifest.len());
            } else {
                println!("{}", String::from_utf8_lossy(&encoded));
            }
        }
        Commands::Run {
            pilot,
            seed,
            episodes,
            max_tics,
            tick_delay_ms,
            output,
        } => {
            if create_pilot(&pilot).is_none() {
                let available = pilot_ids().join(", ");
                return Err(anyhow!("unknown pilot '{pilot}'. available: {available}"));
            }
            let seed = parse_seed(&seed)?;
            let report = run_pilot(
                &pilot,
                seed,
                RunOptions {
                    episodes,
                    max_tics,
                    tick_delay: tick_delay_ms.map(Duration::from_millis),
                },
            )?;
            let output_path = output.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "runs/{}-{}-tics{}.json",
                    pilot,
                    seed_to_hex(seed).replace("0x", "seed"),
                    report.total_tics
                ))
            });
            write_report(&output_path, &report)?;

            println!("pilot={}", report.pilot_id);
            println!("pilot_fingerprint={}", report.pilot_fingerprint);
            println!("seed={}", seed_to_hex(seed));
            println!("episodes={}", report.episodes.len());
            println!("resolved={}", report.resolved_episodes);
            println!("total_tics={}", report.total_tics);
            println!("avg_reward={:.2}", report.avg_reward);
            println!("best_reward={:.2}", report.best_reward);
            println!("output={}", output_path.display());
        }
        Commands::Benchmark {
            pilots,
            seeds,
            seed_file,
            seed_start,
            seed_count,
            episodes,
            max_tics,
            out_dir,
            save_top,
            jobs,
        } => {
            let pilots = resolve_pilots(pilots.as_deref())?;
            let seeds = resolve_seeds(
                seeds.as_deref(),
                seed_file.as_deref(),
                seed_start.as_deref(),
                seed_count,
            )?;

            let out_dir = out_dir
                .unwrap_or_else(|| PathBuf::from(format!("benchmarks/{}", timestamp_suffix())));

            let report = run_benchmark(BenchmarkConfig {
                pilots,
                seeds,
                episodes,
                max_tics,
                out_dir: out_dir.clone(),
                save_top,
                jobs,
            })?;

            println!("runs={}", report.run_count);
            println!("episodes_per_run={}", report.episodes_per_run);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("top pilots:");
            for (idx, pilot) in report.pilot_rankings.iter().take(5).enumerate() {
                println!(
                    "  {}. {}  avg_reward={:.2} best_reward={:.2} avg_tics={:.1} fire={:.1} steer={:.1} resolve={:.0}%",
                    idx + 1,
                    pilot.pilot_id,
                    pilot.avg_reward,
                    pilot.best_reward,
                    pilot.avg_tics,
                    pilot.avg_fire_tics,
                    pilot.avg_steer_tics,
                    pilot.resolve_rate * 100.0,
                );
            }

            println!("saved reports:");
            for saved in report.saved_reports.iter().take(10) {
                println!(
                    "  [{} #{:02}] {} {} avg_reward={:.2} tics={}",
                    saved.metric,
                    saved.rank,
                    saved.pilot_id,
                    saved.seed_hex,
                    saved.avg_reward,
                    saved.total_tics,
                );
            }
        }
    }

    Ok(())
}
