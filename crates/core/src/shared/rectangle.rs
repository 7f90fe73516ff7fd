use serde::{Deserialize, Serialize};

/// Axis-aligned box in image-pixel coordinates as reported by a detector.
///
/// Coordinates may be fractional, negative, or extend past the image;
/// they are only made pixel-aligned by the region clipper.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(alias = "_x")]
    pub x: f64,
    #[serde(alias = "_y")]
    pub y: f64,
    #[serde(alias = "_width")]
    pub width: f64,
    #[serde(alias = "_height")]
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rounds every component half-up (ties toward positive infinity), so `2.5 -> 3` and
    /// `-2.5 -> -2`. Returns `None` if any component is NaN or infinite.
    pub fn rounded(&self) -> Option<(i64, i64, i64, i64)> {
        Some((
            round_half_up(self.x)?,
            round_half_up(self.y)?,
            round_half_up(self.width)?,
            round_half_up(self.height)?,
        ))
    }
}

fn round_half_up(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    // `round` breaks ties away from zero; negative ties go back up one.
    // `floor(v + 0.5)` misrounds 0.49999999999999994, whose sum is 1.0.
    let mut rounded = value.round();
    if rounded - value == -0.5 {
        rounded += 1.0;
    }
    // Saturating cast; anything beyond i64 is far outside any image anyway.
    Some(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::integral(3.0, 3)]
    #[case::below_half(3.49, 3)]
    #[case::half(2.5, 3)]
    #[case::negative_half(-2.5, -2)]
    #[case::negative(-2.6, -3)]
    #[case::zero(0.0, 0)]
    #[case::just_below_half(0.49999999999999994, 0)]
    #[case::negative_just_below_half(-0.49999999999999994, 0)]
    #[case::negative_tie_at_one_and_a_half(-1.5, -1)]
    #[case::large_tie(4503599627370495.5, 4503599627370496)]
    fn test_round_half_up(#[case] input: f64, #[case] expected: i64) {
        assert_eq!(round_half_up(input), Some(expected));
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinity(f64::INFINITY)]
    #[case::negative_infinity(f64::NEG_INFINITY)]
    fn test_round_non_finite(#[case] input: f64) {
        assert_eq!(round_half_up(input), None);
    }

    #[test]
    fn test_rounded_components() {
        let rect = Rectangle::new(10.4, 10.5, 39.6, 40.49);
        assert_eq!(rect.rounded(), Some((10, 11, 40, 40)));
    }

    #[test]
    fn test_rounded_rejects_nan_width() {
        let rect = Rectangle::new(0.0, 0.0, f64::NAN, 10.0);
        assert_eq!(rect.rounded(), None);
    }

    #[test]
    fn test_deserialize_accepts_underscored_fields() {
        let rect: Rectangle =
            serde_json::from_str(r#"{"_x": 1.5, "_y": 2, "_width": 3, "_height": 4}"#).unwrap();
        assert_eq!(rect, Rectangle::new(1.5, 2.0, 3.0, 4.0));
    }
}
