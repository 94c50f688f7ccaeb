use crate::prelude::eprintln;
use serde::{Deserialize, Serialize};
use serde_json::json;
use toolbelt_core::encoders::Mode;
use toolbelt_core::{dispatch, Action, Event, Session, ToolKey};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Union of every tool's arguments. Which fields apply depends on the tool.
#[derive(Debug, Default, Deserialize)]
struct ToolArguments {
    input: Option<String>,
    mode: Option<Mode>,
    length: Option<usize>,
    paragraphs: Option<usize>,
    pattern: Option<String>,
    text: Option<String>,
    message: Option<String>,
    key: Option<String>,
}

fn internal_error(e: serde_json::Error) -> JsonRpcError {
    JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, format!("Internal error: {e}"))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "toolbelt".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = ToolKey::ALL
        .into_iter()
        .map(|key| Tool {
            name: key.as_str().to_string(),
            description: format!("{}. {}", key.title(), key.description()),
            input_schema: input_schema(key),
        })
        .collect();

    serde_json::to_value(ToolsList { tools }).map_err(internal_error)
}

fn input_schema(tool: ToolKey) -> serde_json::Value {
    let input = |description: &str| json!({"type": "string", "description": description});

    match tool {
        ToolKey::Base64 | ToolKey::Url | ToolKey::Html => json!({
            "type": "object",
            "properties": {
                "input": input("Text to encode or decode"),
                "mode": {
                    "type": "string",
                    "description": "Direction. Remembered for the session once set (default: encode)",
                    "enum": ["encode", "decode"]
                }
            },
            "required": ["input"]
        }),
        ToolKey::Jwt => json!({
            "type": "object",
            "properties": {"input": input("JWT to decode")},
            "required": ["input"]
        }),
        ToolKey::Uuid => json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
        ToolKey::Password => json!({
            "type": "object",
            "properties": {
                "length": {
                    "type": "number",
                    "description": "Password length, clamped to 8-64 (default: 16)"
                }
            },
            "required": []
        }),
        ToolKey::Lorem => json!({
            "type": "object",
            "properties": {
                "paragraphs": {
                    "type": "number",
                    "description": "Number of paragraphs, clamped to 1-5 (default: 3)"
                }
            },
            "required": []
        }),
        ToolKey::JsonYaml => json!({
            "type": "object",
            "properties": {"input": input("JSON document")},
            "required": ["input"]
        }),
        ToolKey::Case | ToolKey::Stats | ToolKey::Hash => json!({
            "type": "object",
            "properties": {"input": input("Input text")},
            "required": ["input"]
        }),
        ToolKey::Number => json!({
            "type": "object",
            "properties": {"input": input("Decimal integer, optionally signed")},
            "required": ["input"]
        }),
        ToolKey::Regex => json!({
            "type": "object",
            "properties": {
                "pattern": input("Regular expression. Kept for the session when omitted"),
                "text": input("Text to search. Kept for the session when omitted")
            },
            "required": []
        }),
        ToolKey::Hmac => json!({
            "type": "object",
            "properties": {
                "message": input("Message. Kept for the session when omitted"),
                "key": input("Secret key. Kept for the session when omitted")
            },
            "required": []
        }),
    }
}

fn missing(field: &str) -> JsonRpcError {
    JsonRpcError::new(
        JsonRpcError::INVALID_PARAMS,
        format!("Invalid arguments: missing field `{field}`"),
    )
}

/// Map call arguments onto the events that reproduce them.
fn actions_for(tool: ToolKey, args: ToolArguments) -> Result<Vec<Action>, JsonRpcError> {
    let mut actions = Vec::new();

    match tool {
        ToolKey::Base64 | ToolKey::Url | ToolKey::Html => {
            if let Some(mode) = args.mode {
                actions.push(Action::SetMode(mode));
            }
            actions.push(Action::Input(args.input.ok_or_else(|| missing("input"))?));
        }
        ToolKey::Uuid => actions.push(Action::Generate),
        ToolKey::Password => {
            if let Some(length) = args.length {
                actions.push(Action::SetLength(length));
            }
            actions.push(Action::Generate);
        }
        ToolKey::Lorem => {
            if let Some(paragraphs) = args.paragraphs {
                actions.push(Action::SetParagraphs(paragraphs));
            }
            actions.push(Action::Generate);
        }
        ToolKey::Regex => {
            if let Some(pattern) = args.pattern {
                actions.push(Action::SetPattern(pattern));
            }
            if let Some(text) = args.text {
                actions.push(Action::SetText(text));
            }
            if actions.is_empty() {
                return Err(missing("pattern` or `text"));
            }
        }
        ToolKey::Hmac => {
            if let Some(message) = args.message {
                actions.push(Action::SetMessage(message));
            }
            if let Some(key) = args.key {
                actions.push(Action::SetKey(key));
            }
            if actions.is_empty() {
                return Err(missing("message` or `key"));
            }
        }
        ToolKey::Jwt
        | ToolKey::JsonYaml
        | ToolKey::Case
        | ToolKey::Number
        | ToolKey::Stats
        | ToolKey::Hash => {
            actions.push(Action::Input(args.input.ok_or_else(|| missing("input"))?));
        }
    }

    Ok(actions)
}

pub fn handle_tools_call(
    params: Option<serde_json::Value>,
    session: &mut Session,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| {
            JsonRpcError::new(JsonRpcError::INVALID_PARAMS, format!("Invalid params: {e}"))
        })?;

    let tool: ToolKey = params.name.parse().map_err(|e: toolbelt_core::UnknownTool| {
        JsonRpcError::new(JsonRpcError::INVALID_PARAMS, e.to_string())
    })?;

    let args: ToolArguments = match params.arguments {
        None | Some(serde_json::Value::Null) => ToolArguments::default(),
        Some(arguments) => serde_json::from_value(arguments).map_err(|e| {
            JsonRpcError::new(
                JsonRpcError::INVALID_PARAMS,
                format!("Invalid arguments: {e}"),
            )
        })?,
    };

    if global.verbose {
        eprintln!("Calling {tool}: {args:?}");
    }

    let mut outputs = session.outputs(tool);
    for action in actions_for(tool, args)? {
        log::debug!("dispatching {tool} {}", action.name());
        outputs = dispatch(session, Event::new(tool, action)).map_err(|e| {
            JsonRpcError::new(
                JsonRpcError::INTERNAL_ERROR,
                format!("Tool execution error: {e}"),
            )
        })?;
    }

    let is_error = outputs.iter().any(|(_, text)| text.starts_with("Error: "));

    let result = CallToolResult {
        content: outputs
            .into_iter()
            .map(|(_, text)| Content::Text { text })
            .collect(),
        is_error: is_error.then_some(true),
    };

    serde_json::to_value(result).map_err(internal_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_an_object_schema() {
        for key in ToolKey::ALL {
            assert_eq!(input_schema(key)["type"], "object", "{key}");
        }
    }

    #[test]
    fn test_actions_for_codec_sets_mode_first() {
        let args = ToolArguments {
            input: Some("x".to_string()),
            mode: Some(Mode::Decode),
            ..Default::default()
        };
        assert_eq!(
            actions_for(ToolKey::Url, args).unwrap(),
            vec![Action::SetMode(Mode::Decode), Action::Input("x".to_string())]
        );
    }

    #[test]
    fn test_actions_for_generators_default_to_generate() {
        assert_eq!(
            actions_for(ToolKey::Lorem, ToolArguments::default()).unwrap(),
            vec![Action::Generate]
        );
    }

    #[test]
    fn test_actions_for_two_field_tools_need_one_field() {
        assert!(actions_for(ToolKey::Regex, ToolArguments::default()).is_err());
        assert!(actions_for(ToolKey::Hmac, ToolArguments::default()).is_err());
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let mut session = Session::new();
        let global = crate::Global { verbose: false };
        let params = json!({"name": "base64", "arguments": {"input": "x", "mode": "sideways"}});
        let err = handle_tools_call(Some(params), &mut session, &global).unwrap_err();
        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);
    }
}
