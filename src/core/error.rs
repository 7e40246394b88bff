use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    LookupNotFound,
    LookupAmbiguous,

    ValidationInvalidArgument,

    CommandFailed,

    InternalIoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::LookupNotFound => "lookup.not_found",
            ErrorCode::LookupAmbiguous => "lookup.ambiguous",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::CommandFailed => "command.failed",

            ErrorCode::InternalIoError => "internal.io_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupNotFoundDetails {
    pub query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupAmbiguousDetails {
    pub query: String,
    pub matches: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn lookup_not_found(query: impl Into<String>, message: impl Into<String>) -> Self {
        let details = serde_json::to_value(LookupNotFoundDetails {
            query: query.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::LookupNotFound, message, details)
    }

    pub fn lookup_ambiguous(
        query: impl Into<String>,
        matches: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        let hint = format!("Matches: {}", matches.join(", "));
        let details = serde_json::to_value(LookupAmbiguousDetails {
            query: query.into(),
            matches,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::LookupAmbiguous, message, details).with_hint(hint)
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            tried,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn command_failed(message: impl Into<String>, details: CommandFailedDetails) -> Self {
        let details =
            serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::CommandFailed, message, details)
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// True for both lookup failure kinds, so callers can catch the whole
    /// lookup category uniformly.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::LookupNotFound | ErrorCode::LookupAmbiguous
        )
    }

    /// Process exit status a CLI layer should terminate with for this error.
    ///
    /// Command failures propagate the child's own exit code when it is
    /// positive; everything else follows the usage-error conventions.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ErrorCode::ValidationInvalidArgument => 2,

            ErrorCode::LookupNotFound | ErrorCode::LookupAmbiguous => 3,

            ErrorCode::CommandFailed => self
                .details
                .get("exitCode")
                .and_then(Value::as_i64)
                .map(|code| code as i32)
                .filter(|code| *code > 0)
                .unwrap_or(1),

            ErrorCode::InternalIoError => 1,
        }
    }
}
