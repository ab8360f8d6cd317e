/// Errors raised by [`ReqResClient`](crate::ReqResClient).
///
/// A 4xx answer is *not* an error: it comes back as a normal
/// [`ApiResponse`](crate::ApiResponse). Everything here means no usable
/// response was obtained, or the body could not be read as the requested shape.
#[derive(Debug)]
pub enum ClientError {
    /// The client configuration is unusable (bad base URL, bad header value).
    InvalidConfig(String),

    /// The underlying HTTP client could not be built.
    Build(String),

    /// The request did not complete in time.
    Timeout(String),

    /// No connection could be established.
    Connect(String),

    /// Any other transport-level failure (protocol error, reset, body read).
    Transport(String),

    /// The remote answered with a status above the configured policy limit.
    ServerFault { status: u16, body: String },

    /// The body could not be decoded into the requested shape.
    Decode(String),
}

/// Coarse grouping of [`ClientError`] variants for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCategory {
    Configuration,
    Transport,
    Server,
    Decode,
}

impl std::fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FaultCategory::Configuration => "configuration",
            FaultCategory::Transport => "transport",
            FaultCategory::Server => "server",
            FaultCategory::Decode => "decode",
        };
        f.write_str(name)
    }
}

impl ClientError {
    pub fn category(&self) -> FaultCategory {
        match self {
            ClientError::InvalidConfig(_) | ClientError::Build(_) => FaultCategory::Configuration,
            ClientError::Timeout(_) | ClientError::Connect(_) | ClientError::Transport(_) => {
                FaultCategory::Transport
            }
            ClientError::ServerFault { .. } => FaultCategory::Server,
            ClientError::Decode(_) => FaultCategory::Decode,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_connect() {
            ClientError::Connect(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidConfig(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::InvalidConfig(msg) => write!(f, "Invalid client configuration: {msg}"),
            ClientError::Build(msg) => write!(f, "Failed to build HTTP client: {msg}"),
            ClientError::Timeout(msg) => write!(f, "Request timed out: {msg}"),
            ClientError::Connect(msg) => write!(f, "Connection failed: {msg}"),
            ClientError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ClientError::ServerFault { status, body } if body.is_empty() => {
                write!(f, "Server fault: status {status}")
            }
            ClientError::ServerFault { status, body } => {
                write!(f, "Server fault: status {status}: {body}")
            }
            ClientError::Decode(msg) => write!(f, "Invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Collapse a body to a single-line preview for error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
