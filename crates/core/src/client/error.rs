use thiserror::Error;

/// Why one fetch of the recommendation feed did not produce records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success HTTP status. Carries the
    /// reason phrase (`Internal Server Error`), or the numeric code when the
    /// status has none.
    #[error("server responded with {0}")]
    BadStatus(String),

    /// The request never completed (connect, DNS, timeout, body read).
    #[error("request failed: {0}")]
    NetworkFailure(String),

    /// The body was not JSON or not the expected array of recommendations.
    #[error("response could not be decoded: {0}")]
    DecodeFailure(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadStatus(_) => "bad_status",
            Self::NetworkFailure(_) => "network_failure",
            Self::DecodeFailure(_) => "decode_failure",
        }
    }
}

/// Flattens an error and its `source()` chain into one line.
pub(crate) fn describe_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if !out.contains(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_cause() {
        let err = FetchError::BadStatus("Internal Server Error".into());
        assert_eq!(err.to_string(), "server responded with Internal Server Error");
        assert_eq!(err.kind(), "bad_status");
    }

    #[test]
    fn describe_chain_walks_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = anyhow::Error::new(io).context("connect failed");
        let dyn_err: &(dyn std::error::Error + 'static) = err.as_ref();
        assert_eq!(describe_chain(dyn_err), "connect failed: refused");
    }
}
