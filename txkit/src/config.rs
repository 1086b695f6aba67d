//! # Protocol Configuration & Constants
//!
//! Every magic number txkit depends on lives here. The wire-level values
//! (tags, lengths, method names) are fixed by the network's reference node
//! and must not drift; the retry values are client policy and can be
//! overridden through [`RetryPolicy`](crate::rpc::broadcast::RetryPolicy).

use std::time::Duration;

// ---------------------------------------------------------------------------
// Key Algorithms
// ---------------------------------------------------------------------------

/// Text prefix of Ed25519 keys and signatures (`ed25519:<base58>`).
pub const ED25519_NAME: &str = "ed25519";

/// Text prefix reserved for secp256k1. Recognized, never accepted.
pub const SECP256K1_NAME: &str = "secp256k1";

/// One-byte wire discriminant for Ed25519.
pub const ED25519_TAG: u8 = 0;

/// One-byte wire discriminant reserved for secp256k1.
pub const SECP256K1_TAG: u8 = 1;

/// Ed25519 public key length in bytes.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 private key length in the text format: 32-byte seed followed by
/// the 32-byte public key.
pub const ED25519_KEYPAIR_LENGTH: usize = 64;

/// Ed25519 signature length. Always 64 bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// SHA-256 digest length, used for block hashes and transaction ids.
pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Amounts & Gas
// ---------------------------------------------------------------------------

/// Number of fractional digits in one whole native token.
pub const TOKEN_DECIMALS: u32 = 24;

/// Smallest units per whole native token (10^24).
pub const YOCTO_PER_TOKEN: u128 = 1_000_000_000_000_000_000_000_000;

/// Gas attached to a function call when the caller does not pick a value.
/// 30 TGas covers a typical contract call with room to spare.
pub const DEFAULT_FUNCTION_CALL_GAS: u64 = 30_000_000_000_000;

// ---------------------------------------------------------------------------
// RPC
// ---------------------------------------------------------------------------

/// Commit-style broadcast: the node holds the request open until the
/// transaction has executed, then answers with the final outcome.
pub const BROADCAST_TX_COMMIT: &str = "broadcast_tx_commit";

/// Generic state query method (`view_access_key` and friends).
pub const QUERY_METHOD: &str = "query";

/// Block lookup method.
pub const BLOCK_METHOD: &str = "block";

/// Finality for reading the access key nonce: the freshest view, so a
/// nonce used by an in-flight transaction is already visible.
pub const NONCE_QUERY_FINALITY: &str = "optimistic";

/// Finality for the reference block hash: a block every node agrees on.
pub const BLOCK_HASH_FINALITY: &str = "final";

/// Marker the node puts in the error payload when a transaction's nonce is
/// not greater than the access key's current nonce.
pub const INVALID_NONCE_MARKER: &str = "InvalidNonce";

// ---------------------------------------------------------------------------
// Broadcast Retry
// ---------------------------------------------------------------------------

/// Maximum number of submission attempts for one logical transaction.
pub const NONCE_RETRY_ATTEMPTS: u32 = 12;

/// Wait after the first nonce conflict.
pub const NONCE_RETRY_INITIAL_WAIT: Duration = Duration::from_millis(500);

/// Growth factor applied to the wait from the second conflict onward.
pub const NONCE_RETRY_BACKOFF: f64 = 1.5;

/// Upper bound on any single wait between attempts.
pub const NONCE_RETRY_MAX_WAIT: Duration = Duration::from_secs(60);
