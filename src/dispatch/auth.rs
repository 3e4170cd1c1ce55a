//! Request signing.
//!
//! Every request carries the tenant id, a unix timestamp, a short nonce and
//! a SHA-256 signature over `token ‖ body ‖ tenant_id ‖ ts ‖ nonce`, where
//! `body` is the exact (compressed) bytes sent on the wire.

use sha2::{Digest, Sha256};

pub const TENANT_ID_HEADER: &str = "Tenant-Id";
pub const TENANT_TS_HEADER: &str = "Tenant-Ts";
pub const TENANT_NONCE_HEADER: &str = "Tenant-Nonce";
pub const TENANT_SIGNATURE_HEADER: &str = "Tenant-Signature";

const NONCE_LEN: usize = 8;

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub tenant_id: String,
    pub ts: String,
    pub nonce: String,
    pub signature: String,
}

impl AuthHeaders {
    /// Sign `body` with a fresh timestamp and nonce.
    pub fn sign(tenant_id: &str, token: &str, body: &[u8]) -> Self {
        let ts = chrono::Utc::now().timestamp().to_string();
        let nonce = new_nonce();
        let signature = calc_signature(token, body, tenant_id, &ts, &nonce);
        Self {
            tenant_id: tenant_id.to_string(),
            ts,
            nonce,
            signature,
        }
    }

    /// Header name/value pairs in send order.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (TENANT_ID_HEADER, &self.tenant_id),
            (TENANT_TS_HEADER, &self.ts),
            (TENANT_NONCE_HEADER, &self.nonce),
            (TENANT_SIGNATURE_HEADER, &self.signature),
        ]
    }
}

/// Lowercase hex SHA-256 over the concatenated signing inputs.
pub fn calc_signature(token: &str, body: &[u8], tenant_id: &str, ts: &str, nonce: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.update(body);
    hasher.update(tenant_id.as_bytes());
    hasher.update(ts.as_bytes());
    hasher.update(nonce.as_bytes());
    hex::encode(hasher.finalize())
}

fn new_nonce() -> String {
    let mut nonce = uuid::Uuid::new_v4().simple().to_string();
    nonce.truncate(NONCE_LEN);
    nonce
}
