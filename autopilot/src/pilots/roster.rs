use serde::Serialize;
use serde_json::Value;

use motion_tracker_core::digest::fnv1a;

use crate::pilots::{
    tracker_pilot_configs, MotionPilot, Pilot, RandomPilot, RANDOM_PILOT_ID,
};

pub fn pilot_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = tracker_pilot_configs()
        .iter()
        .map(|config| config.id)
        .collect();
    ids.push(RANDOM_PILOT_ID);
    ids
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    pilot_ids()
        .into_iter()
        .filter_map(|id| create_pilot(id).map(|pilot| (pilot.id(), pilot.description())))
        .collect()
}

pub fn create_pilot(id: &str) -> Option<Box<dyn Pilot>> {
    if id == RANDOM_PILOT_ID {
        return Some(Box::new(RandomPilot::new()));
    }
    tracker_pilot_configs()
        .iter()
        .find(|config| config.id == id)
        .map(|config| Box::new(MotionPilot::new(*config)) as Box<dyn Pilot>)
}

/// Stable identifier for a pilot's exact tuning, so reports stay
/// attributable after presets are retuned under the same id.
pub fn pilot_fingerprint(id: &str) -> Option<String> {
    if id == RANDOM_PILOT_ID {
        return Some(format_fingerprint(fnv1a(id.as_bytes())));
    }
    let config = tracker_pilot_configs()
        .iter()
        .find(|config| config.id == id)?;
    let bytes = serde_json::to_vec(config).unwrap_or_else(|_| config.id.as_bytes().to_vec());
    Some(format_fingerprint(fnv1a(&bytes)))
}

fn format_fingerprint(hash: u32) -> String {
    format!("0x{hash:08x}")
}

#[derive(Clone, Debug, Serialize)]
pub struct PilotManifestEntry {
    pub id: String,
    pub description: String,
    pub kind: String,
    pub fingerprint: String,
    pub config: Value,
}

pub fn pilot_manifest_entries() -> anyhow::Result<Vec<PilotManifestEntry>> {
    let mut entries = Vec::new();
    for id in pilot_ids() {
        let pilot = match create_pilot(id) {
            Some(pilot) => pilot,
            None => continue,
        };
        let fingerprint = pilot_fingerprint(id)
            .unwrap_or_else(|| format_fingerprint(fnv1a(id.as_bytes())));
        let (kind, config) = match tracker_pilot_configs().iter().find(|c| c.id == id) {
            Some(config) => ("tracker", serde_json::to_value(config)?),
            None => ("baseline", Value::Null),
        };
        entries.push(PilotManifestEntry {
            id: pilot.id().to_string(),
            description: pilot.description().to_string(),
            kind: kind.to_string(),
            fingerprint,
            config,
        });
    }
    Ok(entries)
}
