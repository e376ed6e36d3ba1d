/// Everything that can go wrong during one interaction.
///
/// None of these are fatal; the session reports the message and prompts again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// Input is neither an IPv4 nor an IPv6 literal
    #[error("invalid IP address. Please try again.")]
    InvalidAddress,
    /// Upstream answered with HTTP 429
    #[error("API error: too many requests. Please try again later.")]
    RateLimited,
    /// Upstream answered with any other non-200 status
    #[error("API error: HTTP {0}")]
    Http(u16),
    /// Upstream answered 200 but reported `status: fail`
    #[error("API error: {0}")]
    Api(String),
    /// Request did not complete within its timeout
    #[error("Network problem: request timed out. Check your internet connection.")]
    NetworkTimeout,
    /// Could not reach the upstream at all
    #[error("Network problem: could not connect to the API. Check your internet connection.")]
    NetworkConnection,
    /// Any other transport failure
    #[error("Network problem: {0}")]
    NetworkOther(String),
    /// Every echo service failed
    #[error("could not determine your IP. Please enter it manually.")]
    ExternalIpUnavailable,
}

/// Coarse grouping of [`GeoError`], used for counters and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InvalidInput,
    RateLimited,
    Http,
    Api,
    Network,
    ExternalIp,
}

impl GeoError {
    /// Message used when a failed API response carries no `message` field.
    pub const GENERIC_API_MESSAGE: &'static str = "Unknown error";

    pub fn category(&self) -> ErrorCategory {
        match self {
            GeoError::InvalidAddress => ErrorCategory::InvalidInput,
            GeoError::RateLimited => ErrorCategory::RateLimited,
            GeoError::Http(_) => ErrorCategory::Http,
            GeoError::Api(_) => ErrorCategory::Api,
            GeoError::NetworkTimeout | GeoError::NetworkConnection | GeoError::NetworkOther(_) => {
                ErrorCategory::Network
            }
            GeoError::ExternalIpUnavailable => ErrorCategory::ExternalIp,
        }
    }

    /// Classify a reqwest failure into one of the three network buckets.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeoError::NetworkTimeout
        } else if err.is_connect() {
            GeoError::NetworkConnection
        } else {
            GeoError::NetworkOther(err.to_string())
        }
    }
}

impl From<reqwest::Error> for GeoError {
    fn from(err: reqwest::Error) -> Self {
        GeoError::from_transport(err)
    }
}
