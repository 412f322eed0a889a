use serde_json::{json, Value};

use crate::activity::{ActivityType, ToolType};

const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "subject",
    "semester",
    "objective",
    "interactiveActivities",
    "competitiveGame",
    "conclusion",
];

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// Response schema in the Gemini OpenAPI subset, mirroring `ActivityContent`.
pub fn activity_schema() -> Value {
    let activity_types: Vec<&str> = ActivityType::ALL.iter().map(|t| t.as_str()).collect();
    let tool_types: Vec<&str> = ToolType::ALL.iter().map(|t| t.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "subject": { "type": "STRING" },
            "semester": { "type": "STRING" },
            "objective": { "type": "STRING" },
            "toolsNeeded": string_list(),
            "steps": string_list(),
            "interactiveActivities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "enum": activity_types },
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "instructions": string_list()
                    },
                    "required": ["type", "title", "description", "instructions"]
                }
            },
            "competitiveGame": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "rules": string_list(),
                    "suggestedFormat": { "type": "STRING" }
                },
                "required": ["name", "rules", "suggestedFormat"]
            },
            "electronicLinks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "platform": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "toolType": { "type": "STRING", "enum": tool_types },
                        "linkToObjective": { "type": "STRING" }
                    },
                    "required": ["platform", "description", "toolType", "linkToObjective"]
                }
            },
            "conclusion": { "type": "STRING" }
        },
        "required": REQUIRED_FIELDS
    })
}
