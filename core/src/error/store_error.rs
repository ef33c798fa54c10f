use derive_more::{Display, Error};

/// Errors raised by the session store write path.
///
/// Read paths never error: an absent or undecodable value degrades to
/// "nothing stored" so that rendering code stays total.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    /// The write would exceed the store's configured capacity. The
    /// login flow must surface this to the user; it is not recoverable
    /// here.
    #[display("session storage quota exceeded")]
    QuotaExceeded,
    /// The value could not be serialized for storage.
    #[display("failed to serialize session value: {source}")]
    Serialize { source: serde_json::Error },
    /// The backing file could not be written.
    #[display("session storage i/o failed: {source}")]
    Io { source: std::io::Error },
}
