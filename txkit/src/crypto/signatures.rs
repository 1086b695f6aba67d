//! # Signing and Verification
//!
//! Free-function front door over the key types, so call sites read
//! `sign(&key, msg)` / `verify(&pk, msg, &sig)` regardless of algorithm.
//! Both are pure functions over byte buffers.

use super::keys::{PrivateKey, PublicKey, Signature};

/// Sign `message` with `private_key`.
///
/// The signature carries the key's algorithm tag. Ed25519 signing is
/// deterministic (RFC 8032).
///
/// # Example
///
/// ```
/// use txkit::crypto::{sign, verify, PrivateKey};
///
/// let key = PrivateKey::generate();
/// let sig = sign(&key, b"stake 100");
/// assert!(verify(&key.public_key(), b"stake 100", &sig));
/// ```
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    private_key.sign(message)
}

/// Verify `signature` over `message` against `public_key`.
///
/// Never errors: an algorithm mismatch, a malformed key, or a bad signature
/// all come back as `false`.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}
