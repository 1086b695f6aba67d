//! # Cryptographic Primitives
//!
//! Keys, signatures, and digests. Everything here is a thin, type-safe
//! wrapper around audited implementations (`ed25519-dalek`, `sha2`):
//!
//! - **keys** — algorithm-tagged public/private keys and signatures with
//!   their text (`ed25519:<base58>`) and Borsh forms.
//! - **signatures** — `sign` / `verify` entry points.
//! - **hash** — SHA-256 and the [`CryptoHash`] digest type.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha256, CryptoHash, HashError};
pub use keys::{KeyAlgorithm, KeyError, PrivateKey, PublicKey, Signature};
pub use signatures::{sign, verify};
