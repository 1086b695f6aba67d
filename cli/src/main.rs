// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txkit CLI
//!
//! Entry point for the `txkit` binary. Parses arguments, sets up logging,
//! and runs one offline subcommand:
//!
//! - `keygen`        — generate an Ed25519 key pair
//! - `sign-transfer` — build and sign a transfer for later broadcast
//! - `decode`        — decode and verify a base64 signed transaction
//! - `classify`      — classify an execution status JSON value
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::{json, Value};

use txkit::crypto::{CryptoHash, PrivateKey};
use txkit::rpc::outcome::{
    classify_str, BasicStatus, ExecutionStatus, ExecutionStatusBasic, FinalExecutionStatus,
    FinalExecutionStatusBasic, Status,
};
use txkit::transaction::{sign_transaction, Action, Balance, SignedTransaction, Transaction};

use cli::{ClassifyArgs, Commands, DecodeArgs, SignTransferArgs, TxkitCli};

fn main() -> Result<()> {
    let cli = TxkitCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let output = match cli.command {
        Commands::Keygen => keygen(),
        Commands::SignTransfer(args) => sign_transfer(args)?,
        Commands::Decode(args) => decode(args)?,
        Commands::Classify(args) => classify(args)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn keygen() -> Value {
    let key = PrivateKey::generate();
    tracing::info!(public_key = %key.public_key(), "generated key pair");
    json!({
        "public_key": key.public_key().to_string(),
        "private_key": key.to_text(),
    })
}

fn sign_transfer(args: SignTransferArgs) -> Result<Value> {
    let key: PrivateKey = args
        .private_key
        .parse()
        .context("invalid private key")?;
    let block_hash: CryptoHash = args
        .block_hash
        .parse()
        .with_context(|| format!("invalid block hash: {}", args.block_hash))?;
    let deposit = Balance::from_token_str(&args.deposit)
        .with_context(|| format!("invalid deposit: {}", args.deposit))?;

    let tx = Transaction::new(
        args.signer,
        key.public_key(),
        args.nonce,
        args.receiver,
        block_hash,
        vec![Action::transfer(deposit)],
    );
    let (hash, signed) = sign_transaction(tx, &key).context("signing transaction")?;
    tracing::info!(
        tx_hash = %hash,
        nonce = args.nonce,
        deposit = %deposit.to_token_string(),
        "signed transfer"
    );

    Ok(json!({
        "hash": hash.to_string(),
        "signed_transaction_base64": signed.to_base64().context("encoding transaction")?,
    }))
}

fn decode(args: DecodeArgs) -> Result<Value> {
    let signed = SignedTransaction::from_base64(&args.payload)
        .context("decoding signed transaction")?;
    let hash = signed.hash().context("hashing transaction")?;
    let valid = signed.verify();
    if !valid {
        tracing::warn!(tx_hash = %hash, "signature does not verify");
    }

    Ok(json!({
        "hash": hash.to_string(),
        "signature_valid": valid,
        "signed_transaction": serde_json::to_value(&signed)?,
    }))
}

fn classify(args: ClassifyArgs) -> Result<Value> {
    match (args.final_status, args.receipt) {
        (Some(raw), _) => {
            let status =
                classify_str::<FinalExecutionStatusBasic, FinalExecutionStatus>(&raw)
                    .context("classifying final status")?;
            describe("final", status)
        }
        (None, Some(raw)) => {
            let status = classify_str::<ExecutionStatusBasic, ExecutionStatus>(&raw)
                .context("classifying receipt status")?;
            describe("receipt", status)
        }
        (None, None) => anyhow::bail!("one of --final or --receipt is required"),
    }
}

fn describe<B, S>(level: &str, status: Status<B, S>) -> Result<Value>
where
    B: BasicStatus + Serialize,
    S: Serialize,
{
    let (kind, detail) = match status {
        Status::Basic(tag) => ("basic", serde_json::to_value(tag)?),
        Status::Unrecognized(tag) => ("unrecognized", Value::String(tag)),
        Status::Structured(value) => ("structured", serde_json::to_value(value)?),
    };
    Ok(json!({ "level": level, "kind": kind, "detail": detail }))
}
