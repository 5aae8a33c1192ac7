use std::fmt;

use super::StatusCode;

pub const MISSING_CITY_MESSAGE: &str = "City parameter is required";
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found";
pub const INVALID_API_KEY_MESSAGE: &str = "Invalid API key";
pub const GENERIC_UPSTREAM_MESSAGE: &str = "Error from weather service";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    MissingCity,
    CityNotFound,
    InvalidApiKey,
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    Transport(String),
}

impl GatewayError {
    /// Translate a non-2xx provider answer into a gateway error.
    ///
    /// Only the status and the provider's `message` field are looked at; the
    /// rest of the body is ignored.
    pub fn from_upstream(status: StatusCode, body: &[u8]) -> Self {
        match status {
            StatusCode::NOT_FOUND => GatewayError::CityNotFound,
            StatusCode::UNAUTHORIZED => GatewayError::InvalidApiKey,
            status => GatewayError::Upstream {
                status,
                message: provider_message(body),
            },
        }
    }

    /// Status sent back to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingCity => StatusCode::BAD_REQUEST,
            GatewayError::CityNotFound => StatusCode::NOT_FOUND,
            GatewayError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent back to the caller. Transport details stay in the logs.
    pub fn client_message(&self) -> &str {
        match self {
            GatewayError::MissingCity => MISSING_CITY_MESSAGE,
            GatewayError::CityNotFound => CITY_NOT_FOUND_MESSAGE,
            GatewayError::InvalidApiKey => INVALID_API_KEY_MESSAGE,
            GatewayError::Upstream {
                message: Some(message), ..
            } => message.as_str(),
            GatewayError::Upstream { message: None, .. } => GENERIC_UPSTREAM_MESSAGE,
            GatewayError::Transport(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

fn provider_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::MissingCity => write!(f, "{}", MISSING_CITY_MESSAGE),
            GatewayError::CityNotFound => write!(f, "Upstream returned {}", StatusCode::NOT_FOUND),
            GatewayError::InvalidApiKey => write!(f, "Upstream returned {}", StatusCode::UNAUTHORIZED),
            GatewayError::Upstream { status, message } => match message {
                Some(message) => write!(f, "Upstream returned {}: {}", status, message),
                None => write!(f, "Upstream returned {}", status),
            },
            GatewayError::Transport(msg) => write!(f, "Upstream unreachable: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

pub type Result<T> = std::result::Result<T, GatewayError>;
