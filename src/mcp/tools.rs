//! MCP tool definitions.

use serde_json::json;

use super::protocol::Tool;
use crate::constants::{PERMALINK_ARGUMENT, TOOL_PROJECT_DEPENDENCIES, TOOL_PROJECT_DETAILS};

/// All tools this server exposes.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: TOOL_PROJECT_DETAILS.into(),
            description: "Get details about a project".into(),
            input_schema: permalink_schema("The project permalink to retrieve details for"),
        },
        Tool {
            name: TOOL_PROJECT_DEPENDENCIES.into(),
            description: "Get dependency information for a project".into(),
            input_schema: permalink_schema("The project permalink to retrieve dependencies for"),
        },
    ]
}

fn permalink_schema(description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            PERMALINK_ARGUMENT: {
                "type": "string",
                "description": description
            }
        },
        "required": [PERMALINK_ARGUMENT]
    })
}
