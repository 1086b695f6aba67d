//! # CLI Interface
//!
//! Command-line structure for the `txkit` binary, via `clap` derive. All
//! subcommands work offline: nothing here opens a network connection.

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// Offline key and transaction tooling.
///
/// Generates keys, signs transfers for later broadcast, decodes and verifies
/// signed transactions, and classifies execution status JSON.
#[derive(Parser, Debug)]
#[command(name = "txkit", version, propagate_version = true)]
pub struct TxkitCli {
    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, env = "TXKIT_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "TXKIT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an Ed25519 key pair and print both text forms as JSON.
    Keygen,
    /// Build and sign a transfer; print its hash and base64 payload.
    SignTransfer(SignTransferArgs),
    /// Decode a base64 signed transaction and verify its signature.
    Decode(DecodeArgs),
    /// Classify a raw execution status JSON value.
    Classify(ClassifyArgs),
}

/// Arguments for `sign-transfer`.
#[derive(Args, Debug)]
pub struct SignTransferArgs {
    /// Signing account id.
    #[arg(long)]
    pub signer: String,

    /// Receiving account id.
    #[arg(long)]
    pub receiver: String,

    /// Nonce to use; one more than the access key's current nonce.
    #[arg(long)]
    pub nonce: u64,

    /// Recent block hash in base58.
    #[arg(long)]
    pub block_hash: String,

    /// Amount in whole tokens, decimals allowed (e.g. `1.5`).
    #[arg(long)]
    pub deposit: String,

    /// Private key as `ed25519:<base58>`.
    ///
    /// Prefer the environment variable; flags end up in shell history.
    #[arg(long, env = "TXKIT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Arguments for `decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Base64 of a Borsh-encoded signed transaction.
    #[arg(long = "base64")]
    pub payload: String,
}

/// Arguments for `classify`. Exactly one of `--final` or `--receipt`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("level").required(true).args(["final_status", "receipt"])))]
pub struct ClassifyArgs {
    /// Transaction-level status JSON.
    #[arg(long = "final", value_name = "JSON")]
    pub final_status: Option<String>,

    /// Receipt-level status JSON.
    #[arg(long, value_name = "JSON")]
    pub receipt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        TxkitCli::command().debug_assert();
    }

    #[test]
    fn parses_sign_transfer() {
        let cli = TxkitCli::try_parse_from([
            "txkit",
            "sign-transfer",
            "--signer",
            "alice.testnet",
            "--receiver",
            "bob.testnet",
            "--nonce",
            "7",
            "--block-hash",
            "11111111111111111111111111111111",
            "--deposit",
            "1.5",
            "--private-key",
            "ed25519:abc",
        ])
        .unwrap();
        match cli.command {
            Commands::SignTransfer(args) => {
                assert_eq!(args.nonce, 7);
                assert_eq!(args.deposit, "1.5");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn classify_requires_exactly_one_level() {
        assert!(TxkitCli::try_parse_from(["txkit", "classify"]).is_err());
        assert!(TxkitCli::try_parse_from([
            "txkit", "classify", "--final", "\"Started\"", "--receipt", "\"Pending\""
        ])
        .is_err());
        assert!(TxkitCli::try_parse_from(["txkit", "classify", "--receipt", "\"Pending\""]).is_ok());
    }

    #[test]
    fn global_log_flags() {
        let cli =
            TxkitCli::try_parse_from(["txkit", "keygen", "--log-format", "json", "--log-level", "debug"])
                .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_level, "debug");
    }
}
