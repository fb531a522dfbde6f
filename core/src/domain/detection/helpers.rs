use crate::domain::detection::entities::DetectionItem;

/// Normalize a detected item for persistence: lowercase the name and round
/// the confidence to 2 decimal places. The response keeps the raw values.
pub fn normalize_item(item: &DetectionItem) -> (String, f64) {
    (item.name.to_lowercase(), round_confidence(item.confidence))
}

pub fn round_confidence(confidence: f64) -> f64 {
    (confidence * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_name() {
        let item = DetectionItem {
            name: "Cheddar Cheese".to_string(),
            confidence: 0.9,
        };
        let (name, _) = normalize_item(&item);
        assert_eq!(name, "cheddar cheese");
    }

    #[test]
    fn test_round_confidence_to_two_decimals() {
        assert_eq!(round_confidence(0.937), 0.94);
        assert_eq!(round_confidence(0.931), 0.93);
        assert_eq!(round_confidence(0.9), 0.9);
        assert_eq!(round_confidence(0.0), 0.0);
    }

    #[test]
    fn test_out_of_range_confidence_passes_through() {
        // Garbage in, garbage out: range is not enforced.
        assert_eq!(round_confidence(1.337), 1.34);
        assert_eq!(round_confidence(-0.125), -0.13);
    }
}
