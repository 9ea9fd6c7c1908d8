//! Error types for the lessonly client.

/// Errors returned by the content-store and payment-service client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a structured error response.
    #[error("API error: {code} - {message} (status {status})")]
    Api {
        /// Machine-readable error code.
        code: String,
        /// Human-readable message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The requested course does not exist.
    #[error("course not found: {course_id}")]
    CourseNotFound {
        /// The course id that was not found.
        course_id: String,
    },

    /// The referral code was rejected by the validation service.
    #[error("invalid referral code: {reason}")]
    InvalidReferralCode {
        /// The service's rejection reason.
        reason: String,
    },
}
