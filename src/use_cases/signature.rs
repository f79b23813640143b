use crate::domain::AuthError;
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Authenticates mutating requests signed with a pre-shared key.
///
/// The signed input is the `X-Timestamp` header value immediately followed by
/// the raw request body, byte for byte. The signature is the hex-encoded
/// HMAC-SHA256 of that input. Requests whose timestamp is more than the
/// freshness window away from server time, in either direction, are rejected
/// even when the signature itself is correct.
#[derive(Clone)]
pub struct RequestVerifier {
    // Keyed once at startup, cloned per request.
    mac: HmacSha256,
    freshness_window_seconds: u64,
}

impl RequestVerifier {
    pub fn new(secret: &[u8], freshness_window_seconds: u64) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: HmacSha256::new_from_slice(secret)?,
            freshness_window_seconds,
        })
    }

    /// Checks headers, freshness and signature. Has no side effects.
    pub fn verify(
        &self,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
        now: u64,
    ) -> Result<(), AuthError> {
        let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
            return Err(AuthError::MissingHeaders);
        };

        let claimed: i64 = timestamp
            .parse()
            .map_err(|_| AuthError::InvalidTimestamp)?;

        let skew = (i128::from(now) - i128::from(claimed)).unsigned_abs();
        if skew > u128::from(self.freshness_window_seconds) {
            return Err(AuthError::StaleTimestamp);
        }

        // Undecodable hex falls into the same rejection as a wrong digest.
        let provided = hex::decode(signature).map_err(|_| AuthError::BadSignature)?;

        // `verify_slice` compares in constant time.
        self.keyed(timestamp, body)
            .verify_slice(&provided)
            .map_err(|_| AuthError::BadSignature)
    }

    /// Hex signature a client must send for this timestamp and body.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> String {
        hex::encode(self.keyed(timestamp, body).finalize().into_bytes())
    }

    fn keyed(&self, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(timestamp.as_bytes());
        mac.update(body);
        mac
    }
}
