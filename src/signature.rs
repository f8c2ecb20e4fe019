//! Request signature for the query endpoint.

use md5::{Digest, Md5};

/// Compute the `sign` form field: MD5 over the UTF-8 bytes of
/// `param_json || key || customer_id`, hex-encoded and uppercased.
///
/// `param_json` must be the exact compact string transmitted as the `param`
/// field — the provider recomputes the digest over those bytes, so serialize
/// once and reuse the string for both signing and transmission.
pub fn sign(param_json: &str, key: &str, customer_id: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(param_json.as_bytes());
    hasher.update(key.as_bytes());
    hasher.update(customer_id.as_bytes());
    hex::encode(hasher.finalize()).to_uppercase()
}
