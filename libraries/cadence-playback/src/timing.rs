//! Position/duration readings and `m:ss` labels
//!
//! Audio services report time as raw floating point seconds that may be NaN
//! or infinite while a resource is still opening. [`Timing`] turns those
//! readings into an explicit tri-state so nothing downstream has to check
//! for sentinels.

use serde::{Deserialize, Serialize};

/// A time reading from the audio service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Timing {
    /// Finite, non-negative seconds
    Known(f64),

    /// The service answered with NaN or an infinite value
    Unknown,

    /// Nothing is loaded in the service
    NotLoaded,
}

impl Timing {
    /// Classify a raw reading (`None` means nothing loaded)
    ///
    /// Negative finite readings are clamped to zero.
    pub fn from_reading(reading: Option<f64>) -> Self {
        match reading {
            None => Self::NotLoaded,
            Some(seconds) if !seconds.is_finite() => Self::Unknown,
            Some(seconds) => Self::Known(seconds.max(0.0)),
        }
    }

    /// Seconds, when known
    pub fn seconds(self) -> Option<f64> {
        match self {
            Self::Known(seconds) => Some(seconds),
            Self::Unknown | Self::NotLoaded => None,
        }
    }

    /// Whether this reading can be displayed
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// `m:ss` label, when known
    pub fn label(self) -> Option<String> {
        self.seconds().and_then(format_time)
    }
}

/// Format seconds as `m:ss`
///
/// Returns `None` for NaN or infinite input so callers keep their previous
/// label. Fractions are truncated and negative input renders as `0:00`.
pub fn format_time(seconds: f64) -> Option<String> {
    if !seconds.is_finite() {
        return None;
    }
    Some(format_whole_seconds(seconds.max(0.0).floor() as u64))
}

/// Format whole seconds as `m:ss`
pub fn format_whole_seconds(total: u64) -> String {
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_labels() {
        assert_eq!(format_time(65.0).as_deref(), Some("1:05"));
        assert_eq!(format_time(9.0).as_deref(), Some("0:09"));
        assert_eq!(format_time(600.0).as_deref(), Some("10:00"));
        assert_eq!(format_time(59.99).as_deref(), Some("0:59"));
        assert_eq!(format_time(0.0).as_deref(), Some("0:00"));
        assert_eq!(format_time(3725.0).as_deref(), Some("62:05"));
    }

    #[test]
    fn test_format_time_rejects_non_finite() {
        assert_eq!(format_time(f64::NAN), None);
        assert_eq!(format_time(f64::INFINITY), None);
        assert_eq!(format_time(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_timing_from_reading() {
        assert_eq!(Timing::from_reading(None), Timing::NotLoaded);
        assert_eq!(Timing::from_reading(Some(f64::NAN)), Timing::Unknown);
        assert_eq!(Timing::from_reading(Some(f64::INFINITY)), Timing::Unknown);
        assert_eq!(Timing::from_reading(Some(-2.0)), Timing::Known(0.0));
        assert_eq!(Timing::from_reading(Some(12.5)), Timing::Known(12.5));
    }

    #[test]
    fn test_timing_label() {
        assert_eq!(Timing::Known(125.7).label().as_deref(), Some("2:05"));
        assert_eq!(Timing::Unknown.label(), None);
        assert_eq!(Timing::NotLoaded.label(), None);
    }
}
