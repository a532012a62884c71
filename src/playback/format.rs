/// Format a playback position as `m:ss`.
///
/// Fractional seconds are truncated, not rounded. Anything that is not a
/// finite number renders as `0:00`, and negative positions clamp to zero.
pub fn format_elapsed(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let total = seconds.max(0.0);
    let minutes = (total / 60.0).floor() as u64;
    let secs = (total % 60.0).floor() as u64;
    format!("{minutes}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_values() {
        assert_eq!(format_elapsed(f64::NAN), "0:00");
        assert_eq!(format_elapsed(0.0), "0:00");
        assert_eq!(format_elapsed(65.0), "1:05");
        assert_eq!(format_elapsed(599.0), "9:59");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_elapsed(59.999), "0:59");
        assert_eq!(format_elapsed(119.5), "1:59");
    }

    #[test]
    fn long_tracks_keep_counting_minutes() {
        assert_eq!(format_elapsed(3600.0), "60:00");
        assert_eq!(format_elapsed(3725.2), "62:05");
    }

    #[test]
    fn non_finite_and_negative_inputs() {
        assert_eq!(format_elapsed(f64::INFINITY), "0:00");
        assert_eq!(format_elapsed(f64::NEG_INFINITY), "0:00");
        assert_eq!(format_elapsed(-4.0), "0:00");
    }
}
