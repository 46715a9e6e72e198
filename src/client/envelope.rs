//! Response envelope decoding.
//!
//! Some endpoints wrap their payload as `{"data": ...}` (often with paging
//! metadata alongside), others return it bare. Both shapes decode through
//! [`Envelope`] once, at the client boundary.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// A response body that is either `{"data": T, ...}` or a bare `T`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{"data": T}`; sibling keys are ignored.
    Wrapped {
        /// The payload.
        data: T,
    },
    /// The payload itself.
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwraps the payload regardless of shape.
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

/// Decodes a response body through [`Envelope`].
///
/// # Example
///
/// ```
/// use hrms_engine::client::decode_envelope;
///
/// let wrapped: Vec<u32> = decode_envelope(br#"{"data":[1,2],"total":2}"#).unwrap();
/// let bare: Vec<u32> = decode_envelope(b"[1,2]").unwrap();
/// assert_eq!(wrapped, bare);
/// ```
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice::<Envelope<T>>(body).map(Envelope::into_inner)
}
