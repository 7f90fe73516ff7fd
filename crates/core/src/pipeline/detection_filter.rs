use crate::detection::domain::detection::Detection;

/// Drops detections scored below `min_confidence`.
///
/// Detections without a score are always kept: a face the detector did not
/// score is still a face. `None` keeps everything.
pub fn filter_detections(detections: &[Detection], min_confidence: Option<f64>) -> Vec<Detection> {
    match min_confidence {
        Some(threshold) => detections
            .iter()
            .filter(|d| d.confidence.map_or(true, |c| c >= threshold))
            .copied()
            .collect(),
        None => detections.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::rectangle::Rectangle;

    fn scored(confidence: Option<f64>) -> Detection {
        Detection::new(Rectangle::new(0.0, 0.0, 10.0, 10.0), confidence)
    }

    #[test]
    fn test_no_threshold_returns_all() {
        let detections = vec![scored(Some(0.1)), scored(None)];
        assert_eq!(filter_detections(&detections, None).len(), 2);
    }

    #[test]
    fn test_threshold_drops_low_scores() {
        let detections = vec![scored(Some(0.2)), scored(Some(0.5)), scored(Some(0.9))];
        let result = filter_detections(&detections, Some(0.5));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].confidence, Some(0.5));
        assert_eq!(result[1].confidence, Some(0.9));
    }

    #[test]
    fn test_unscored_detections_are_kept() {
        let detections = vec![scored(None), scored(Some(0.1))];
        let result = filter_detections(&detections, Some(0.5));
        assert_eq!(result.len(), 1);
        assert!(result[0].confidence.is_none());
    }

    #[test]
    fn test_empty_detections() {
        assert!(filter_detections(&[], Some(0.5)).is_empty());
    }
}
