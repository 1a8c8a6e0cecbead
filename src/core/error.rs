use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationInvalidArgument,

    CatalogInvalidEntry,
    CatalogMissingSource,
    CatalogUtilityNotFound,

    PromptInterrupted,

    GitCloneFailed,
    CopyFailed,
    InstallCommandFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::CatalogInvalidEntry => "catalog.invalid_entry",
            ErrorCode::CatalogMissingSource => "catalog.missing_source",
            ErrorCode::CatalogUtilityNotFound => "catalog.utility_not_found",

            ErrorCode::PromptInterrupted => "prompt.interrupted",

            ErrorCode::GitCloneFailed => "git.clone_failed",
            ErrorCode::CopyFailed => "copy.failed",
            ErrorCode::InstallCommandFailed => "install.command_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
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
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundDetails {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSourceDetails {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptInterruptedDetails {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneFailedDetails {
    pub url: String,
    pub branch: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFailedDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallCommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
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
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            value,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn catalog_invalid_entry(id: impl Into<String>, problem: impl Into<String>) -> Self {
        let id = id.into();
        let problem = problem.into();
        let details = serde_json::json!({ "id": id, "problem": problem });

        Self::new(
            ErrorCode::CatalogInvalidEntry,
            format!("Invalid catalog entry '{}': {}", id, problem),
            details,
        )
    }

    pub fn catalog_missing_source(id: impl Into<String>, name: impl Into<String>) -> Self {
        let details = serde_json::to_value(MissingSourceDetails {
            id: id.into(),
            name: name.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::CatalogMissingSource,
            "Repository URL is missing for the selected utility",
            details,
        )
        .with_hint("This utility is not yet available; pick another one")
    }

    pub fn utility_not_found(id: impl Into<String>) -> Self {
        let details = serde_json::to_value(NotFoundDetails { id: id.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::CatalogUtilityNotFound, "Utility not found", details)
            .with_hint("Run 'kitbag catalog' to see available utilities")
    }

    pub fn prompt_interrupted(prompt: impl Into<String>) -> Self {
        let details = serde_json::to_value(PromptInterruptedDetails {
            prompt: prompt.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::PromptInterrupted, "Prompt interrupted", details)
    }

    pub fn git_clone_failed(
        url: impl Into<String>,
        branch: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(CloneFailedDetails {
            url: url.into(),
            branch: branch.into(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::GitCloneFailed, "git clone failed", details)
    }

    pub fn copy_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        let details = serde_json::to_value(CopyFailedDetails {
            path: path.into(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::CopyFailed, "Failed to copy utility files", details)
    }

    pub fn install_command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(InstallCommandFailedDetails {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::InstallCommandFailed,
            "Dependency installation failed",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": error.into(),
            "context": context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dotted_families() {
        assert_eq!(
            ErrorCode::CatalogMissingSource.as_str(),
            "catalog.missing_source"
        );
        assert_eq!(ErrorCode::GitCloneFailed.as_str(), "git.clone_failed");
        assert_eq!(ErrorCode::PromptInterrupted.as_str(), "prompt.interrupted");
    }

    #[test]
    fn missing_source_carries_identity() {
        let err = Error::catalog_missing_source("strip", "Strip Utility");
        assert_eq!(err.code, ErrorCode::CatalogMissingSource);
        assert_eq!(err.details["id"], "strip");
        assert_eq!(err.details["name"], "Strip Utility");
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn clone_failed_serializes_camel_case() {
        let err = Error::git_clone_failed("git@example.com:x.git", "feature/x", "denied");
        assert_eq!(err.details["url"], "git@example.com:x.git");
        assert_eq!(err.details["branch"], "feature/x");
    }

    #[test]
    fn install_failed_exit_code_in_details() {
        let err = Error::install_command_failed("npm install uuid@8.3.2", 127, "not found");
        assert_eq!(err.details["exitCode"], 127);
    }
}
