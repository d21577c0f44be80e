use gunner_autopilot::engine::{EngineTick, ScreenFormat};
use gunner_autopilot::pilots::{
    create_pilot, pilot_fingerprint, pilot_ids, pilot_manifest_entries, tracker_pilot_configs,
    MotionPilot, Pilot, RandomPilot, RANDOM_PILOT_ID,
};
use motion_tracker_core::frame::{ChannelOrder, Frame};
use motion_tracker_core::steer::{ActionLayout, Steering};
use motion_tracker_core::TrackError;

fn bright_square_buffer(width: u32, height: u32, x0: u32, y0: u32) -> Vec<u8> {
    let mut frame = Frame::zero(width, height);
    for dy in 0..4 {
        for dx in 0..4 {
            frame.put_rgb(x0 + dx, y0 + dy, [255, 255, 255]);
        }
    }
    frame.data().to_vec()
}

fn rgb_format(width: u32, height: u32) -> ScreenFormat {
    ScreenFormat {
        width,
        height,
        order: ChannelOrder::Rgb,
    }
}

fn tick_with(buffer: Vec<u8>) -> EngineTick {
    EngineTick {
        tic: 0,
        screen_buffer: buffer,
        game_variables: vec![50.0],
    }
}

fn static_pilot() -> MotionPilot {
    let config = tracker_pilot_configs()
        .iter()
        .find(|config| config.id == "bright-static")
        .copied()
        .unwrap();
    MotionPilot::new(config)
}

#[test]
fn preset_ids_are_unique() {
    let configs = tracker_pilot_configs();
    for (i, a) in configs.iter().enumerate() {
        for b in &configs[i + 1..] {
            assert_ne!(a.id, b.id);
        }
    }
}

#[test]
fn presets_convert_to_tracker_configs() {
    for config in tracker_pilot_configs() {
        let tracker = config.tracker_config();
        assert_eq!(tracker.mode, config.mode, "preset {}", config.id);
        assert_eq!(tracker.diff_threshold, config.diff_threshold);
        assert_eq!(tracker.link_distance, config.link_distance);
        assert_eq!(tracker.center_margin, config.center_margin);
        assert_eq!(tracker.truncate_centroids, config.truncate_centroids);
    }
}

#[test]
fn every_preset_keeps_the_hud_cutoff() {
    for config in tracker_pilot_configs() {
        assert_eq!(config.hud_cutoff, 0.56, "preset {}", config.id);
    }
}

#[test]
fn left_square_encodes_a_left_action() {
    let mut pilot = static_pilot();
    pilot.reset(1);
    let layout = ActionLayout::standard();
    let tick = tick_with(bright_square_buffer(320, 240, 40, 60));
    let action = pilot
        .next_action(&rgb_format(320, 240), &layout, &tick)
        .unwrap();
    assert_eq!(action, layout.encode(Steering::Left));
}

#[test]
fn empty_scene_falls_back_to_fire() {
    let mut pilot = static_pilot();
    pilot.reset(1);
    let layout = ActionLayout::standard();
    let tick = tick_with(vec![0; 64 * 48 * 3]);
    let action = pilot
        .next_action(&rgb_format(64, 48), &layout, &tick)
        .unwrap();
    assert_eq!(action, layout.encode(Steering::Fire));
}

#[test]
fn bad_buffer_length_is_reported() {
    let mut pilot = static_pilot();
    pilot.reset(1);
    let layout = ActionLayout::standard();
    let tick = tick_with(vec![0; 7]);
    let err = pilot
        .next_action(&rgb_format(320, 240), &layout, &tick)
        .unwrap_err();
    assert!(matches!(err, TrackError::BufferLength { actual: 7, .. }));
}

#[test]
fn random_pilot_replays_the_same_actions_for_a_seed() {
    let layout = ActionLayout::standard();
    let mut a = RandomPilot::new();
    let mut b = RandomPilot::new();
    a.reset(0xC0FF_EE11);
    b.reset(0xC0FF_EE11);
    let format = rgb_format(0, 0);
    let tick = tick_with(Vec::new());
    for _ in 0..32 {
        let left = a.next_action(&format, &layout, &tick).unwrap();
        let right = b.next_action(&format, &layout, &tick).unwrap();
        assert_eq!(left, right);
    }
}

#[test]
fn random_pilot_actions_are_always_one_hot() {
    let layout = ActionLayout::standard();
    let mut pilot = RandomPilot::new();
    pilot.reset(3);
    let format = rgb_format(0, 0);
    let tick = tick_with(Vec::new());
    for _ in 0..64 {
        let action = pilot.next_action(&format, &layout, &tick).unwrap();
        let hot: f64 = action.iter().sum();
        assert_eq!(hot, 1.0);
        assert!(layout.decode(&action).is_some());
    }
}

#[test]
fn roster_lists_every_tracker_and_the_baseline() {
    let ids = pilot_ids();
    assert_eq!(ids.len(), tracker_pilot_configs().len() + 1);
    assert!(ids.contains(&RANDOM_PILOT_ID));
    assert!(ids.contains(&"motion-wide"));
}

#[test]
fn roster_ids_are_unique() {
    let ids = pilot_ids();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn every_id_creates_a_pilot_with_a_matching_id() {
    for id in pilot_ids() {
        let pilot = create_pilot(id).expect("roster id must create");
        assert_eq!(pilot.id(), id);
        assert!(!pilot.description().is_empty(), "pilot {id}");
    }
}

#[test]
fn unknown_ids_create_nothing() {
    assert!(create_pilot("does-not-exist").is_none());
    assert!(pilot_fingerprint("does-not-exist").is_none());
}

#[test]
fn fingerprints_are_stable_and_distinct() {
    let ids = pilot_ids();
    let prints: Vec<String> = ids
        .iter()
        .map(|id| pilot_fingerprint(id).expect("fingerprint for roster id"))
        .collect();
    for (id, print) in ids.iter().zip(&prints) {
        assert!(print.starts_with("0x"), "pilot {id}");
        assert_eq!(print.len(), 10, "pilot {id}");
        assert_eq!(pilot_fingerprint(id).unwrap(), *print, "pilot {id}");
    }
    for (i, a) in prints.iter().enumerate() {
        for b in &prints[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn manifest_covers_the_whole_roster() {
    let entries = pilot_manifest_entries().unwrap();
    assert_eq!(entries.len(), pilot_ids().len());
    for entry in &entries {
        match entry.kind.as_str() {
            "tracker" => assert!(entry.config.is_object(), "pilot {}", entry.id),
            "baseline" => assert!(entry.config.is_null(), "pilot {}", entry.id),
            other => panic!("unexpected manifest kind {other}"),
        }
        assert!(!entry.fingerprint.is_empty());
    }
}
