use serde_json::json;

/// Returns the JSON schema for ingredient detection LLM responses
pub fn get_detection_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "confidence": { "type": "number" }
                    },
                    "required": ["name", "confidence"]
                }
            }
        },
        "required": ["ingredients"]
    })
}
