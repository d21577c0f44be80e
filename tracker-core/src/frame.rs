use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::TrackError;

pub const CHANNELS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// Packed row-major frame, held in canonical RGB order no matter which
/// order the engine delivered the bytes in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn from_raw(
        width: u32,
        height: u32,
        order: ChannelOrder,
        bytes: &[u8],
    ) -> Result<Self, TrackError> {
        let expected = width as usize * height as usize * CHANNELS;
        if bytes.len() != expected {
            return Err(TrackError::BufferLength {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let data = match order {
            ChannelOrder::Rgb => bytes.to_vec(),
            ChannelOrder::Bgr => {
                let mut out = Vec::with_capacity(bytes.len());
                for px in bytes.chunks_exact(CHANNELS) {
                    out.push(px[2]);
                    out.push(px[1]);
                    out.push(px[0]);
                }
                out
            }
        };
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn zero(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub fn put_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data[idx..idx + CHANNELS].copy_from_slice(&rgb);
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn same_shape(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_short_buffer() {
        let err = Frame::from_raw(4, 2, ChannelOrder::Rgb, &[0u8; 20]).unwrap_err();
        assert!(matches!(
            err,
            TrackError::BufferLength {
                expected: 24,
                actual: 20,
                ..
            }
        ));
    }

    #[test]
    fn from_raw_rejects_long_buffer() {
        let err = Frame::from_raw(2, 2, ChannelOrder::Bgr, &[0u8; 13]).unwrap_err();
        assert!(matches!(err, TrackError::BufferLength { expected: 12, .. }));
    }

    #[test]
    fn bgr_input_is_swizzled_to_rgb() {
        let bytes = [10u8, 20, 30, 40, 50, 60];
        let frame = Frame::from_raw(2, 1, ChannelOrder::Bgr, &bytes).unwrap();
        assert_eq!(frame.rgb_at(0, 0), [30, 20, 10]);
        assert_eq!(frame.rgb_at(1, 0), [60, 50, 40]);
    }

    #[test]
    fn rgb_input_is_kept_as_is() {
        let bytes = [1u8, 2, 3, 4, 5, 6];
        let frame = Frame::from_raw(2, 1, ChannelOrder::Rgb, &bytes).unwrap();
        assert_eq!(frame.rgb_at(0, 0), [1, 2, 3]);
        assert_eq!(frame.rgb_at(1, 0), [4, 5, 6]);
    }

    #[test]
    fn zero_area_frames_are_allowed() {
        let frame = Frame::from_raw(0, 240, ChannelOrder::Rgb, &[]).unwrap();
        assert_eq!(frame.pixel_count(), 0);
        let frame = Frame::zero(320, 0);
        assert_eq!(frame.data().len(), 0);
    }

    #[test]
    fn put_rgb_round_trips_through_rgb_at() {
        let mut frame = Frame::zero(3, 3);
        frame.put_rgb(2, 1, [9, 8, 7]);
        assert_eq!(frame.rgb_at(2, 1), [9, 8, 7]);
        assert_eq!(frame.rgb_at(1, 2), [0, 0, 0]);
    }

    #[test]
    fn solid_fills_every_pixel() {
        let frame = Frame::solid(2, 2, [5, 6, 7]);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(frame.rgb_at(x, y), [5, 6, 7]);
            }
        }
    }
}
