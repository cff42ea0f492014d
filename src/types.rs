//! API types matching the Brain backend

use serde::{Deserialize, Serialize};

// ============= Auth Types =============

/// Login request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Signup request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupCredentials {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Authentication response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

// ============= Document Types =============

/// Response to a multipart upload
#[derive(Debug, Clone, Deserialize)]
pub struct FileUploadResponse {
    pub filename: String,
    pub data: UploadMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadMessage {
    pub message: String,
}

/// Response of `GET /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResponse {
    pub file: bool,
    /// Absent or null while no document is uploaded
    #[serde(default)]
    pub data: Option<DocumentData>,
}

impl DocumentResponse {
    pub fn file_name(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.extra_info.file_name.as_str())
    }
}

/// Only `extra_info.file_name` is read; the rest is informational and
/// may be missing or null.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub doc_id: Option<String>,
    pub extra_info: DocumentInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInfo {
    pub file_name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    /// Bytes; some backends report a float
    #[serde(default)]
    pub file_size: Option<f64>,
    #[serde(default)]
    pub creation_date: Option<String>,
}

/// Whether a document is active for question answering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStatus {
    pub present: bool,
    pub display_name: Option<String>,
}

// ============= Chat Types =============

/// Ask request
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub question: String,
}

/// Ask response
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Either a plain string or a list of validation errors
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
}

/// Message in the transcript
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ChatMessage {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Bot, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

// ============= Error Types =============

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ClientError::Decode(e.to_string()),
            other => ClientError::Network(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
