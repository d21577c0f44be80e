use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seed the benchmark walk starts from when no seed arguments are given.
pub const DEFAULT_SEED_START: u32 = 0x5EED_0001;

/// Accepts a `0x`-prefixed hex seed or a plain decimal one.
pub fn parse_seed(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => {
            u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {trimmed}"))
        }
        None => trimmed
            .parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {trimmed}")),
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let mut seeds = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        seeds.push(parse_seed(token)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

/// One seed per line; blank lines and `#` comments are skipped.
pub fn parse_seed_file(path: &Path) -> Result<Vec<u32>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading seed file {}", path.display()))?;
    let mut seeds = Vec::new();
    for line in data.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        seeds.push(parse_seed(trimmed)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("seed file {} had no seeds", path.display()));
    }
    Ok(seeds)
}

/// Deterministic seed walk for benchmark sweeps: a fixed LCG step from
/// `start`, so the same start always names the same seed set.
pub fn expand_seeds(start: u32, count: u32) -> Vec<u32> {
    let mut seeds = Vec::with_capacity(count as usize);
    let mut cur = start;
    for _ in 0..count {
        seeds.push(cur);
        cur = cur.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }
    seeds
}

/// Explicit `--seeds` wins, then `--seed-file`, then the deterministic walk.
pub fn resolve_seeds(
    seeds: Option<&str>,
    seed_file: Option<&Path>,
    seed_start: Option<&str>,
    seed_count: u32,
) -> Result<Vec<u32>> {
    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }
    if let Some(path) = seed_file {
        return parse_seed_file(path);
    }

    let start = match seed_start {
        Some(raw) => parse_seed(raw)?,
        None => DEFAULT_SEED_START,
    };
    if seed_count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }
    Ok(expand_seeds(start, seed_count))
}

pub fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
