//! # Key Model
//!
//! Algorithm-tagged public keys, private keys, and signatures.
//!
//! Every key and signature carries its algorithm, both in text form
//! (`"ed25519:<base58>"`) and on the wire (a one-byte tag in front of the
//! fixed-size payload). Each algorithm gets its own fixed-length array type,
//! so a 32-byte Ed25519 key can never be confused with a 33-byte secp256k1
//! one and the compiler checks every length.
//!
//! ## Supported algorithms
//!
//! - **Ed25519** (tag `0`) — fully supported. Deterministic RFC 8032
//!   signatures via `ed25519-dalek`.
//! - **secp256k1** (tag `1`) — the identifier is reserved by the network but
//!   not implemented here. Anything carrying it is rejected with
//!   [`KeyError::UnsupportedAlgorithm`] instead of being mis-decoded.
//!
//! ## Security considerations
//!
//! - Private keys never appear in `Debug` or `Display` output. Exporting one
//!   is an explicit [`PrivateKey::to_text`] call.
//! - Key generation uses `OsRng`.

use std::fmt;
use std::io;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::{
    ED25519_KEYPAIR_LENGTH, ED25519_NAME, ED25519_PUBLIC_KEY_LENGTH, ED25519_SIGNATURE_LENGTH,
    ED25519_TAG, SECP256K1_NAME, SECP256K1_TAG,
};

/// Errors produced while parsing or decoding keys and signatures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The algorithm prefix or tag is unknown, or known but not implemented.
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Bad base58, a missing `algorithm:` prefix, or a payload whose length
    /// does not match the declared algorithm.
    #[error("malformed key data: {0}")]
    Malformed(String),

    /// The public half embedded in a private key does not belong to its seed.
    #[error("keypair validation failed: public key does not match secret key")]
    KeypairMismatch,
}

impl KeyError {
    /// Wraps the error so it can cross a Borsh reader boundary and be
    /// recovered later by downcasting.
    pub(crate) fn into_io(self) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, self)
    }
}

// ---------------------------------------------------------------------------
// KeyAlgorithm
// ---------------------------------------------------------------------------

/// Signature scheme identifier shared by keys and signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// Ed25519 (RFC 8032).
    Ed25519,
    /// secp256k1. Reserved; every operation on it fails explicitly.
    Secp256k1,
}

impl KeyAlgorithm {
    /// Text prefix used in the `"<algorithm>:<base58>"` format.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ed25519 => ED25519_NAME,
            Self::Secp256k1 => SECP256K1_NAME,
        }
    }

    /// One-byte wire discriminant.
    pub fn tag(self) -> u8 {
        match self {
            Self::Ed25519 => ED25519_TAG,
            Self::Secp256k1 => SECP256K1_TAG,
        }
    }

    /// Looks up an algorithm by its text prefix.
    pub fn from_name(name: &str) -> Result<Self, KeyError> {
        match name {
            ED25519_NAME => Ok(Self::Ed25519),
            SECP256K1_NAME => Ok(Self::Secp256k1),
            other => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
        }
    }

    /// Looks up an algorithm by its wire tag.
    pub fn from_tag(tag: u8) -> Result<Self, KeyError> {
        match tag {
            ED25519_TAG => Ok(Self::Ed25519),
            SECP256K1_TAG => Ok(Self::Secp256k1),
            other => Err(KeyError::UnsupportedAlgorithm(format!("tag {}", other))),
        }
    }

    /// Fails unless the algorithm is actually implemented.
    fn require_supported(self) -> Result<Self, KeyError> {
        match self {
            Self::Ed25519 => Ok(self),
            Self::Secp256k1 => Err(KeyError::UnsupportedAlgorithm(self.name().to_string())),
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Splits `"<algorithm>:<base58>"` and decodes the payload.
fn parse_key_text(text: &str) -> Result<(KeyAlgorithm, Vec<u8>), KeyError> {
    let (name, encoded) = text
        .split_once(':')
        .ok_or_else(|| KeyError::Malformed("missing '<algorithm>:' prefix".to_string()))?;
    let algorithm = KeyAlgorithm::from_name(name)?.require_supported()?;
    let payload = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| KeyError::Malformed(format!("invalid base58: {}", e)))?;
    Ok((algorithm, payload))
}

/// Converts a decoded payload into a fixed-size array, rejecting any other
/// length. No truncation, no padding.
fn fixed<const N: usize>(payload: &[u8], what: &str) -> Result<[u8; N], KeyError> {
    payload.try_into().map_err(|_| {
        KeyError::Malformed(format!(
            "{} must be {} bytes, got {}",
            what,
            N,
            payload.len()
        ))
    })
}

/// Reads the one-byte algorithm tag in front of a binary key or signature and
/// rejects anything that is not implemented.
fn read_supported_tag<R: io::Read>(reader: &mut R) -> io::Result<KeyAlgorithm> {
    let tag = u8::deserialize_reader(reader)?;
    KeyAlgorithm::from_tag(tag)
        .and_then(KeyAlgorithm::require_supported)
        .map_err(KeyError::into_io)
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// Raw Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ed25519PublicKey(pub [u8; ED25519_PUBLIC_KEY_LENGTH]);

impl Ed25519PublicKey {
    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_LENGTH] {
        &self.0
    }
}

/// A public key tagged with its algorithm.
///
/// Binary layout: `tag: u8` followed by the algorithm's fixed-size payload
/// (32 bytes for Ed25519). Text layout: `ed25519:<base58 of 32 bytes>`.
///
/// # Examples
///
/// ```
/// use txkit::crypto::keys::PublicKey;
///
/// let text = "ed25519:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847";
/// let key: PublicKey = text.parse().unwrap();
/// assert_eq!(key.to_string(), text);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PublicKey {
    Ed25519(Ed25519PublicKey),
}

impl PublicKey {
    /// Wraps raw Ed25519 key bytes.
    pub fn ed25519(bytes: [u8; ED25519_PUBLIC_KEY_LENGTH]) -> Self {
        Self::Ed25519(Ed25519PublicKey(bytes))
    }

    /// The algorithm this key belongs to.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// The key payload without its tag.
    pub fn key_data(&self) -> &[u8] {
        match self {
            Self::Ed25519(key) => key.as_bytes(),
        }
    }

    /// Verifies `signature` over `message`.
    ///
    /// Returns `false` for any failure, including a signature produced by a
    /// different algorithm than this key's. "Wrong key for this signature"
    /// is an ordinary negative answer, not an error.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if self.algorithm() != signature.algorithm() {
            return false;
        }
        match (self, signature) {
            (Self::Ed25519(key), Signature::Ed25519(sig)) => {
                let Ok(verifying_key) = VerifyingKey::from_bytes(key.as_bytes()) else {
                    return false;
                };
                let dalek_sig = DalekSignature::from_bytes(sig.as_bytes());
                verifying_key.verify(message, &dalek_sig).is_ok()
            }
        }
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (algorithm, payload) = parse_key_text(text)?;
        match algorithm {
            KeyAlgorithm::Ed25519 => Ok(Self::ed25519(fixed(&payload, "ed25519 public key")?)),
            KeyAlgorithm::Secp256k1 => Err(KeyError::UnsupportedAlgorithm(
                algorithm.name().to_string(),
            )),
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.algorithm(),
            bs58::encode(self.key_data()).into_string()
        )
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl BorshSerialize for PublicKey {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[self.algorithm().tag()])?;
        writer.write_all(self.key_data())
    }
}

impl BorshDeserialize for PublicKey {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        match read_supported_tag(reader)? {
            KeyAlgorithm::Ed25519 => {
                let bytes = <[u8; ED25519_PUBLIC_KEY_LENGTH]>::deserialize_reader(reader)?;
                Ok(Self::ed25519(bytes))
            }
            other => Err(KeyError::UnsupportedAlgorithm(other.name().to_string()).into_io()),
        }
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Raw Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; ED25519_SIGNATURE_LENGTH]);

impl Ed25519Signature {
    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ED25519_SIGNATURE_LENGTH] {
        &self.0
    }
}

/// A signature tagged with the algorithm that produced it.
///
/// Binary layout: `tag: u8` followed by 64 bytes for Ed25519. Text layout:
/// `ed25519:<base58 of 64 bytes>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    Ed25519(Ed25519Signature),
}

impl Signature {
    /// Wraps raw Ed25519 signature bytes.
    pub fn ed25519(bytes: [u8; ED25519_SIGNATURE_LENGTH]) -> Self {
        Self::Ed25519(Ed25519Signature(bytes))
    }

    /// The algorithm that produced this signature.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// The signature payload without its tag.
    pub fn signature_data(&self) -> &[u8] {
        match self {
            Self::Ed25519(sig) => sig.as_bytes(),
        }
    }
}

impl FromStr for Signature {
    type Err = KeyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (algorithm, payload) = parse_key_text(text)?;
        match algorithm {
            KeyAlgorithm::Ed25519 => Ok(Self::ed25519(fixed(&payload, "ed25519 signature")?)),
            KeyAlgorithm::Secp256k1 => Err(KeyError::UnsupportedAlgorithm(
                algorithm.name().to_string(),
            )),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.algorithm(),
            bs58::encode(self.signature_data()).into_string()
        )
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl BorshSerialize for Signature {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[self.algorithm().tag()])?;
        writer.write_all(self.signature_data())
    }
}

impl BorshDeserialize for Signature {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        match read_supported_tag(reader)? {
            KeyAlgorithm::Ed25519 => {
                let bytes = <[u8; ED25519_SIGNATURE_LENGTH]>::deserialize_reader(reader)?;
                Ok(Self::ed25519(bytes))
            }
            other => Err(KeyError::UnsupportedAlgorithm(other.name().to_string()).into_io()),
        }
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A private signing key tagged with its algorithm.
///
/// Text layout for Ed25519 is `ed25519:<base58 of seed || public key>`
/// (64 bytes), the format the network's wallets and key files use.
///
/// `PrivateKey` has no `Display` and no serde support. Use
/// [`to_text`](Self::to_text) when an export is really intended.
///
/// # Examples
///
/// ```
/// use txkit::crypto::keys::PrivateKey;
///
/// let key = PrivateKey::generate();
/// let sig = key.sign(b"transfer 10 to bob");
/// assert!(key.public_key().verify(b"transfer 10 to bob", &sig));
/// ```
#[derive(Clone)]
pub enum PrivateKey {
    Ed25519(SigningKey),
}

impl PrivateKey {
    /// Generates a fresh Ed25519 key from the OS RNG.
    pub fn generate() -> Self {
        Self::Ed25519(SigningKey::generate(&mut OsRng))
    }

    /// Generates a key for `algorithm`, failing for reserved algorithms.
    pub fn generate_for(algorithm: KeyAlgorithm) -> Result<Self, KeyError> {
        match algorithm.require_supported()? {
            KeyAlgorithm::Ed25519 => Ok(Self::generate()),
            other => Err(KeyError::UnsupportedAlgorithm(other.name().to_string())),
        }
    }

    /// Builds an Ed25519 key deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::Ed25519(SigningKey::from_bytes(seed))
    }

    /// The algorithm of this key.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Ed25519(signing_key) => {
                PublicKey::ed25519(signing_key.verifying_key().to_bytes())
            }
        }
    }

    /// Signs `message`. The result carries this key's algorithm tag.
    ///
    /// Ed25519 signing is deterministic: the same key and message always
    /// give the same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        match self {
            Self::Ed25519(signing_key) => {
                Signature::ed25519(signing_key.sign(message).to_bytes())
            }
        }
    }

    /// Exports the key in its text form. Handle the result like the key
    /// itself.
    pub fn to_text(&self) -> String {
        match self {
            Self::Ed25519(signing_key) => format!(
                "{}:{}",
                KeyAlgorithm::Ed25519,
                bs58::encode(signing_key.to_keypair_bytes()).into_string()
            ),
        }
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (algorithm, payload) = parse_key_text(text)?;
        match algorithm {
            KeyAlgorithm::Ed25519 => {
                let bytes: [u8; ED25519_KEYPAIR_LENGTH] = fixed(&payload, "ed25519 private key")?;
                SigningKey::from_keypair_bytes(&bytes)
                    .map(Self::Ed25519)
                    .map_err(|_| KeyError::KeypairMismatch)
            }
            KeyAlgorithm::Secp256k1 => Err(KeyError::UnsupportedAlgorithm(
                algorithm.name().to_string(),
            )),
        }
    }
}

impl PartialEq for PrivateKey {
    /// Compares public halves; secret material is not compared directly.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(pub={})", self.public_key())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_PUBLIC: &str = "ed25519:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847";

    #[test]
    fn public_key_text_roundtrip() {
        let key: PublicKey = KNOWN_PUBLIC.parse().unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);
        assert_eq!(key.key_data().len(), 32);
        assert_eq!(key.to_string(), KNOWN_PUBLIC);
    }

    #[test]
    fn second_known_key_roundtrips() {
        let text = "ed25519:3xCFas58RKvD5UpF9GqvEb6q9rvgfbEJPhLf85zc4HpC";
        let key: PublicKey = text.parse().unwrap();
        assert_eq!(key.to_string(), text);
    }

    #[test]
    fn unknown_prefix_is_unsupported() {
        let err = "rsa:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847"
            .parse::<PublicKey>()
            .unwrap_err();
        assert_eq!(err, KeyError::UnsupportedAlgorithm("rsa".into()));
    }

    #[test]
    fn reserved_secp256k1_is_unsupported() {
        let err = "secp256k1:DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847"
            .parse::<PublicKey>()
            .unwrap_err();
        assert_eq!(err, KeyError::UnsupportedAlgorithm("secp256k1".into()));
        assert!(PrivateKey::generate_for(KeyAlgorithm::Secp256k1).is_err());
    }

    #[test]
    fn missing_prefix_is_malformed() {
        let err = "DcA2MzgpJbrUATQLLceocVckhhAqrkingax4oJ9kZ847"
            .parse::<PublicKey>()
            .unwrap_err();
        assert!(matches!(err, KeyError::Malformed(_)));
    }

    #[test]
    fn bad_base58_is_malformed() {
        // '0' and 'l' are not in the base58 alphabet.
        let err = "ed25519:0l0l0l".parse::<PublicKey>().unwrap_err();
        assert!(matches!(err, KeyError::Malformed(_)));
    }

    #[test]
    fn wrong_length_is_malformed_not_truncated() {
        let short = format!("ed25519:{}", bs58::encode([7u8; 31]).into_string());
        assert!(matches!(
            short.parse::<PublicKey>(),
            Err(KeyError::Malformed(_))
        ));

        let long = format!("ed25519:{}", bs58::encode([7u8; 33]).into_string());
        assert!(matches!(
            long.parse::<PublicKey>(),
            Err(KeyError::Malformed(_))
        ));

        // A public-key-sized payload is not a signature.
        let sig_text = format!("ed25519:{}", bs58::encode([7u8; 32]).into_string());
        assert!(matches!(
            sig_text.parse::<Signature>(),
            Err(KeyError::Malformed(_))
        ));
    }

    #[test]
    fn sign_embeds_algorithm_and_verifies() {
        let key = PrivateKey::generate();
        let sig = key.sign(b"hello");
        assert_eq!(sig.algorithm(), key.algorithm());
        assert!(key.public_key().verify(b"hello", &sig));
        assert!(!key.public_key().verify(b"hellO", &sig));
    }

    #[test]
    fn signing_is_deterministic() {
        let key = PrivateKey::from_seed(&[42u8; 32]);
        assert_eq!(key.sign(b"same"), key.sign(b"same"));
    }

    #[test]
    fn other_keypair_does_not_verify() {
        let alice = PrivateKey::from_seed(&[1u8; 32]);
        let bob = PrivateKey::from_seed(&[2u8; 32]);
        let sig = alice.sign(b"msg");
        assert!(!bob.public_key().verify(b"msg", &sig));
    }

    #[test]
    fn private_key_text_roundtrip() {
        let key = PrivateKey::generate();
        let text = key.to_text();
        assert!(text.starts_with("ed25519:"));
        let parsed: PrivateKey = text.parse().unwrap();
        assert_eq!(parsed, key);
        assert_eq!(parsed.sign(b"x"), key.sign(b"x"));
    }

    #[test]
    fn private_key_with_foreign_public_half_is_rejected() {
        let a = PrivateKey::Ed25519(SigningKey::from_bytes(&[3u8; 32]));
        let b = PrivateKey::from_seed(&[4u8; 32]);
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&[3u8; 32]);
        bytes[32..].copy_from_slice(b.public_key().key_data());
        let text = format!("ed25519:{}", bs58::encode(bytes).into_string());
        assert_eq!(text.parse::<PrivateKey>().unwrap_err(), KeyError::KeypairMismatch);
        assert_ne!(a, b);
    }

    #[test]
    fn private_key_debug_does_not_leak_secret() {
        let key = PrivateKey::from_seed(&[9u8; 32]);
        let debug = format!("{:?}", key);
        let secret = bs58::encode([9u8; 32]).into_string();
        assert!(!debug.contains(&secret));
        assert!(debug.contains(&key.public_key().to_string()));
    }

    #[test]
    fn public_key_binary_layout() {
        let key = PublicKey::ed25519([0xAB; 32]);
        let bytes = borsh::to_vec(&key).unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], ED25519_TAG);
        assert!(bytes[1..].iter().all(|b| *b == 0xAB));
        assert_eq!(borsh::from_slice::<PublicKey>(&bytes).unwrap(), key);
    }

    #[test]
    fn binary_reserved_tag_is_rejected() {
        let mut bytes = vec![SECP256K1_TAG];
        bytes.extend_from_slice(&[0u8; 33]);
        let err = borsh::from_slice::<PublicKey>(&bytes).unwrap_err();
        let inner = err
            .get_ref()
            .and_then(|e| e.downcast_ref::<KeyError>())
            .cloned();
        assert_eq!(inner, Some(KeyError::UnsupportedAlgorithm("secp256k1".into())));
    }

    #[test]
    fn binary_unknown_tag_is_rejected() {
        let mut bytes = vec![9u8];
        bytes.extend_from_slice(&[0u8; 64]);
        assert!(borsh::from_slice::<Signature>(&bytes).is_err());
    }

    #[test]
    fn serde_uses_text_form() {
        let key: PublicKey = KNOWN_PUBLIC.parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", KNOWN_PUBLIC));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
