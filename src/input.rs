//! Input parsing for Claude Code hook JSON format
//!
//! Parses the JSON input from stdin that Claude Code sends to PreToolUse hooks.
//! Only the fields the guard needs are kept, and all of them are read leniently:
//! a field of an unexpected type is treated as absent.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Tool name this guard validates
pub const READ_TOOL: &str = "Read";

/// Main input structure from Claude Code hooks
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Read", "Bash")
    #[serde(default, deserialize_with = "lenient_string")]
    pub tool_name: Option<String>,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: ToolInput,

    /// Optional session identifier
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
}

/// The parts of a Read tool input that matter for line-range checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolInput {
    pub file_path: Option<String>,

    /// Requested line count, rounded up. `None` for absent, zero or
    /// non-numeric values, all of which mean "read the whole file".
    pub limit: Option<i64>,

    /// Starting line. `None` when absent or zero.
    pub offset: Option<i64>,
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Deserialize as raw JSON value first so odd shapes never fail the parse
        let value = Value::deserialize(deserializer)?;

        let Some(obj) = value.as_object() else {
            return Ok(ToolInput::default());
        };

        Ok(ToolInput {
            file_path: obj.get("file_path").and_then(Value::as_str).map(String::from),
            limit: obj.get("limit").and_then(|v| numeric(v).map(f64::ceil)).and_then(nonzero),
            offset: obj.get("offset").and_then(|v| numeric(v).map(f64::trunc)).and_then(nonzero),
        })
    }
}

/// Numeric value of a JSON number or numeric string
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Whole line count or line number, treating zero as absent.
///
/// Limits are rounded up before this so a fractional limit lands in the
/// same band it would under a strict comparison of the raw value.
fn nonzero(n: f64) -> Option<i64> {
    let n = n as i64;
    (n != 0).then_some(n)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(String::from))
}

/// A validated Read request with its resolved line range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub limit: i64,
    pub offset: i64,
    pub file_path: Option<String>,
    pub session_id: Option<String>,
}

impl ReadRequest {
    /// Last line covered by the request
    pub fn end_line(&self) -> i64 {
        self.offset.saturating_add(self.limit).saturating_sub(1)
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Parse input from raw stdin bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Build from an already-parsed payload, which must be a JSON object
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde_json::Error::custom(
                "expected hook input to be a JSON object",
            ));
        }
        HookInput::deserialize(value)
    }

    /// Whether this invocation targets the Read tool
    pub fn is_read(&self) -> bool {
        self.tool_name.as_deref() == Some(READ_TOOL)
    }

    /// The bounded read this input asks for, if any.
    ///
    /// Returns `None` for other tools and for whole-file reads.
    pub fn read_request(&self) -> Option<ReadRequest> {
        if !self.is_read() {
            return None;
        }

        let limit = self.tool_input.limit?;
        Some(ReadRequest {
            limit,
            offset: self.tool_input.offset.unwrap_or(1),
            file_path: self.tool_input.file_path.clone(),
            session_id: self.session_id.clone(),
        })
    }
}
