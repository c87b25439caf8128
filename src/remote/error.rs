//! Error type for collaborator calls.

/// Failure reported by, or on the way to, an external collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The service answered with a non-success status; the body is
    /// preserved verbatim for display.
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Connection, DNS, or mid-transfer failure.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The response arrived but could not be decoded.
    #[error("failed to decode {what}: {message}")]
    Decode {
        what: &'static str,
        message: String,
    },

    /// The referenced entity does not exist on the collaborator.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The collaborator refused the operation.
    #[error("{message}")]
    Rejected { message: String },
}

impl RemoteError {
    pub fn status(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            service,
            status,
            body: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(what: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            what,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}
