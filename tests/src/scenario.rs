//! The "Is initialized!" scenario.

use anyhow::Result;
use sc_03_client::Program;
use shared_types::TxSignature;
use std::io::Write;

/// Name the scenario resolves the program by.
pub const PROGRAM: &str = "Supercollab";

/// Calls `initialize` once and writes `Your transaction signature <sig>` to
/// `out`.
///
/// Errors from the call are returned unchanged, wrapped only by `anyhow`, so
/// callers can downcast to [`sc_03_client::ClientError`].
pub async fn is_initialized(program: &Program, out: &mut impl Write) -> Result<TxSignature> {
    let signature = program.method("initialize")?.rpc().await?;
    writeln!(out, "Your transaction signature {signature}")?;
    Ok(signature)
}
