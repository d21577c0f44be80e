use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackError {
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    ShapeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferLength {
                width,
                height,
                expected,
                actual,
            } => write!(
                f,
                "pixel buffer length mismatch: got {actual} bytes, need {expected} for {width}x{height} rgb"
            ),
            Self::ShapeMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => write!(
                f,
                "frame shape mismatch: got {width}x{height}, reference is {expected_width}x{expected_height}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TrackError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_length_display_names_both_sizes() {
        let err = TrackError::BufferLength {
            width: 4,
            height: 2,
            expected: 24,
            actual: 20,
        };
        let text = alloc::format!("{err}");
        assert!(text.contains("20 bytes"));
        assert!(text.contains("need 24"));
        assert!(text.contains("4x2"));
    }

    #[test]
    fn shape_mismatch_display_names_both_shapes() {
        let err = TrackError::ShapeMismatch {
            expected_width: 320,
            expected_height: 240,
            width: 160,
            height: 120,
        };
        let text = alloc::format!("{err}");
        assert!(text.contains("160x120"));
        assert!(text.contains("320x240"));
    }
}
