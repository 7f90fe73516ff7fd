use crate::shared::rectangle::Rectangle;
use crate::shared::region::Region;

/// Normalizes a detector rectangle into a pixel-aligned region inside a
/// `buffer_width x buffer_height` buffer.
///
/// Components are rounded half-up (ties toward positive infinity). The origin
/// is clamped to zero and the extent is capped at the buffer's far edge:
///
/// ```text
/// x      = max(0, round(rect.x))
/// y      = max(0, round(rect.y))
/// width  = min(round(rect.width),  buffer_width  - x)
/// height = min(round(rect.height), buffer_height - y)
/// ```
///
/// Clamping a negative origin does not shrink the extent. Returns `None`
/// when the result is empty, including rectangles wholly outside the buffer
/// and rectangles with non-finite components.
pub fn clip(rect: &Rectangle, buffer_width: u32, buffer_height: u32) -> Option<Region> {
    let (rx, ry, rw, rh) = rect.rounded()?;
    let x = rx.max(0);
    let y = ry.max(0);
    let width = rw.min(i64::from(buffer_width) - x);
    let height = rh.min(i64::from(buffer_height) - y);
    if width <= 0 || height <= 0 {
        return None;
    }
    // width > 0 implies x < buffer_width, so every value fits in u32.
    Some(Region::new(x as u32, y as u32, width as u32, height as u32))
}

/// Clips each rectangle independently, preserving input order and
/// silently dropping those that produce no region.
pub fn clip_all<'a, I>(rects: I, buffer_width: u32, buffer_height: u32) -> Vec<Region>
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    rects
        .into_iter()
        .enumerate()
        .filter_map(|(i, rect)| {
            let region = clip(rect, buffer_width, buffer_height);
            if region.is_none() {
                log::debug!(
                    "Skipping rectangle {} ({rect:?}): empty after clipping to {buffer_width}x{buffer_height}",
                    i + 1
                );
            }
            region
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(x, y, w, h)
    }

    #[test]
    fn test_overhanging_rectangle_clamps_to_buffer() {
        let region = clip(&rect(-5.0, -5.0, 20.0, 20.0), 10, 10);
        assert_eq!(region, Some(Region::new(0, 0, 10, 10)));
    }

    #[test]
    fn test_rectangle_fully_outside_is_rejected() {
        assert_eq!(clip(&rect(100.0, 100.0, 10.0, 10.0), 10, 10), None);
    }

    #[test]
    fn test_inside_rectangle_unchanged() {
        let region = clip(&rect(10.0, 10.0, 40.0, 40.0), 100, 100);
        assert_eq!(region, Some(Region::new(10, 10, 40, 40)));
    }

    #[test]
    fn test_fractional_components_round_half_up() {
        let region = clip(&rect(10.5, 9.49, 20.5, 19.5), 100, 100);
        assert_eq!(region, Some(Region::new(11, 9, 21, 20)));
    }

    #[test]
    fn test_negative_origin_keeps_extent() {
        // Origin clamps to 0 but the width is not reduced by the overhang.
        let region = clip(&rect(-5.0, 2.0, 8.0, 3.0), 10, 10);
        assert_eq!(region, Some(Region::new(0, 2, 8, 3)));
    }

    #[test]
    fn test_extent_capped_at_far_edge() {
        let region = clip(&rect(7.0, 8.0, 10.0, 10.0), 10, 10);
        assert_eq!(region, Some(Region::new(7, 8, 3, 2)));
    }

    #[rstest]
    #[case::zero_width(rect(1.0, 1.0, 0.0, 5.0))]
    #[case::zero_height(rect(1.0, 1.0, 5.0, 0.0))]
    #[case::negative_width(rect(1.0, 1.0, -4.0, 5.0))]
    #[case::rounds_to_zero(rect(1.0, 1.0, 0.49, 5.0))]
    #[case::largest_below_half(rect(1.0, 1.0, 0.49999999999999994, 5.0))]
    #[case::origin_on_right_edge(rect(10.0, 0.0, 5.0, 5.0))]
    #[case::origin_rounds_past_edge(rect(9.5, 0.0, 5.0, 5.0))]
    #[case::origin_below(rect(0.0, 12.0, 5.0, 5.0))]
    #[case::nan_origin(rect(f64::NAN, 0.0, 5.0, 5.0))]
    #[case::infinite_extent(rect(0.0, 0.0, f64::INFINITY, 5.0))]
    fn test_rejected(#[case] r: Rectangle) {
        assert_eq!(clip(&r, 10, 10), None);
    }

    #[test]
    fn test_empty_buffer_rejects_everything() {
        assert_eq!(clip(&rect(0.0, 0.0, 5.0, 5.0), 0, 0), None);
    }

    #[test]
    fn test_result_always_fits_buffer() {
        let cases = [
            rect(-3.2, 4.7, 100.0, 2.0),
            rect(6.6, -8.1, 3.3, 50.0),
            rect(0.0, 0.0, 1.0, 1.0),
            rect(9.4, 9.4, 1.0, 1.0),
        ];
        for r in &cases {
            let region = clip(r, 10, 10).unwrap();
            assert!(region.fits_within(10, 10), "{region:?} from {r:?}");
        }
    }

    #[test]
    fn test_clip_all_preserves_order_and_overlaps() {
        let rects = [
            rect(0.0, 0.0, 5.0, 5.0),
            rect(100.0, 100.0, 5.0, 5.0),
            rect(2.0, 2.0, 5.0, 5.0),
        ];
        let regions = clip_all(&rects, 10, 10);
        assert_eq!(
            regions,
            vec![Region::new(0, 0, 5, 5), Region::new(2, 2, 5, 5)]
        );
    }
}
