use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::blobs::Blob;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steering {
    /// Slide the viewpoint left, drifting the target toward increasing x.
    Left,
    /// Slide the viewpoint right, drifting the target toward decreasing x.
    Right,
    /// Hold position and fire.
    Fire,
}

/// Maps the target centroid against the `center +/- margin` bands. Total
/// over any input: with no target there is nothing to chase, so the command
/// falls back to firing in place.
pub fn select_steering(target: Option<&Blob>, frame_width: u32, margin: f64) -> Steering {
    let blob = match target {
        Some(blob) => blob,
        None => return Steering::Fire,
    };
    let center = frame_width as f64 / 2.0;
    if blob.centroid_x < center - margin {
        Steering::Left
    } else if blob.centroid_x > center + margin {
        Steering::Right
    } else {
        Steering::Fire
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    MoveLeft,
    MoveRight,
    Attack,
}

/// Button ordering the engine was configured with. Steering commands are
/// encoded as one-hot 0/1 vectors aligned with this ordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLayout {
    buttons: Vec<Button>,
}

impl ActionLayout {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }

    pub fn standard() -> Self {
        Self {
            buttons: vec![Button::MoveLeft, Button::MoveRight, Button::Attack],
        }
    }

    #[inline]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn encode(&self, steering: Steering) -> Vec<f64> {
        let target = match steering {
            Steering::Left => Button::MoveLeft,
            Steering::Right => Button::MoveRight,
            Steering::Fire => Button::Attack,
        };
        self.buttons
            .iter()
            .map(|&button| if button == target { 1.0 } else { 0.0 })
            .collect()
    }

    /// Inverse of `encode` for metrics: the first hot entry names the
    /// steering. All-zero (idle) vectors decode to `None`.
    pub fn decode(&self, action: &[f64]) -> Option<Steering> {
        let hot = action.iter().position(|&value| value != 0.0)?;
        match self.buttons.get(hot)? {
            Button::MoveLeft => Some(Steering::Left),
            Button::MoveRight => Some(Steering::Right),
            Button::Attack => Some(Steering::Fire),
        }
    }

    pub fn idle(&self) -> Vec<f64> {
        vec![0.0; self.buttons.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_x(x: f64) -> Blob {
        Blob {
            label: 0,
            centroid_x: x,
            centroid_y: 60.0,
            pixel_count: 4,
        }
    }

    #[test]
    fn left_of_band_steers_left() {
        // center 160, margin 25
        let steering = select_steering(Some(&blob_x(100.0)), 320, 25.0);
        assert_eq!(steering, Steering::Left);
    }

    #[test]
    fn right_of_band_steers_right() {
        let steering = select_steering(Some(&blob_x(200.0)), 320, 25.0);
        assert_eq!(steering, Steering::Right);
    }

    #[test]
    fn inside_band_fires() {
        let steering = select_steering(Some(&blob_x(160.0)), 320, 25.0);
        assert_eq!(steering, Steering::Fire);
    }

    #[test]
    fn band_edges_belong_to_the_fire_band() {
        assert_eq!(select_steering(Some(&blob_x(135.0)), 320, 25.0), Steering::Fire);
        assert_eq!(select_steering(Some(&blob_x(185.0)), 320, 25.0), Steering::Fire);
        assert_eq!(select_steering(Some(&blob_x(134.0)), 320, 25.0), Steering::Left);
        assert_eq!(select_steering(Some(&blob_x(186.0)), 320, 25.0), Steering::Right);
    }

    #[test]
    fn missing_target_falls_back_to_fire() {
        assert_eq!(select_steering(None, 320, 25.0), Steering::Fire);
    }

    #[test]
    fn encode_is_one_hot_in_layout_order() {
        let layout = ActionLayout::standard();
        assert_eq!(layout.encode(Steering::Left), vec![1.0, 0.0, 0.0]);
        assert_eq!(layout.encode(Steering::Right), vec![0.0, 1.0, 0.0]);
        assert_eq!(layout.encode(Steering::Fire), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn encode_respects_custom_button_order() {
        let layout = ActionLayout::new(vec![
            Button::Attack,
            Button::MoveLeft,
            Button::MoveRight,
        ]);
        assert_eq!(layout.encode(Steering::Fire), vec![1.0, 0.0, 0.0]);
        assert_eq!(layout.encode(Steering::Left), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn decode_round_trips_every_steering() {
        let layout = ActionLayout::standard();
        for steering in [Steering::Left, Steering::Right, Steering::Fire] {
            assert_eq!(layout.decode(&layout.encode(steering)), Some(steering));
        }
    }

    #[test]
    fn idle_vector_decodes_to_none() {
        let layout = ActionLayout::standard();
        assert_eq!(layout.decode(&layout.idle()), None);
        assert_eq!(layout.idle(), vec![0.0, 0.0, 0.0]);
    }
}
