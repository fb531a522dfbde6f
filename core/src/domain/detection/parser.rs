use serde_json::Value;

use crate::domain::detection::entities::{DetectionItem, DetectionResult};

/// Extracts a DetectionResult from a raw model reply.
///
/// The model is asked for strict JSON but is not trusted to deliver it: the
/// reply may wrap the object in prose or markdown fences. This takes the
/// substring from the first `{` to the last `}` and decodes that. A reply
/// with no such block, or with invalid JSON inside it, degrades to an empty
/// result rather than an error; the degradation is logged so it stays
/// distinguishable from a genuine empty detection.
pub fn parse_detection(text: &str) -> DetectionResult {
    let Some(block) = brace_block(text) else {
        tracing::warn!(
            reply_len = text.len(),
            "model reply contained no JSON object, degrading to empty result"
        );
        return DetectionResult::default();
    };

    let value: Value = match serde_json::from_str(block) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                reply_len = text.len(),
                "failed to decode JSON block in model reply, degrading to empty result: {}",
                err
            );
            return DetectionResult::default();
        }
    };

    // Shape is tolerated, not validated: a missing or ill-typed `ingredients`
    // yields the empty list, and items missing keys default to ""/0.0.
    let ingredients = value
        .get("ingredients")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(detection_item_from_value).collect())
        .unwrap_or_default();

    DetectionResult { ingredients }
}

fn detection_item_from_value(item: &Value) -> DetectionItem {
    DetectionItem {
        name: item
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        confidence: item
            .get("confidence")
            .and_then(Value::as_f64)
            .unwrap_or_default(),
    }
}

fn brace_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
