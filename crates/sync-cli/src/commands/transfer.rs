//! Encoding and decoding clipboard transfer files

use colored::Colorize;
use std::path::Path;
use sync_model::RepositoryRef;
use sync_transfer::{RepositoryRefCodec, ResourceTransfer, TRANSFER_TYPE_NAME, TransferOperation};

use crate::cli::OperationArg;
use crate::error::{CliError, Result};

impl From<OperationArg> for TransferOperation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Copy => TransferOperation::Copy,
            OperationArg::Cut => TransferOperation::Cut,
            OperationArg::None => TransferOperation::None,
        }
    }
}

/// Split `url@revision`. A trailing `@` part that is not a number belongs
/// to the URL (`svn+ssh://user@host/repo`).
pub fn parse_reference(raw: &str) -> Result<RepositoryRef> {
    if raw.is_empty() {
        return Err(CliError::user("Empty repository URL"));
    }
    match raw.rsplit_once('@') {
        Some((url, revision)) if !url.is_empty() => match revision.parse::<u64>() {
            Ok(revision) => Ok(RepositoryRef::new(url).at_revision(revision)),
            Err(_) => Ok(RepositoryRef::new(raw)),
        },
        _ => Ok(RepositoryRef::new(raw)),
    }
}

/// Run the transfer encode command
pub fn run_encode(urls: &[String], operation: OperationArg, output: &Path) -> Result<()> {
    let references = urls.iter().map(|url| parse_reference(url)).collect::<Result<Vec<_>>>()?;
    let transfer = ResourceTransfer::new(RepositoryRefCodec);
    let bytes = transfer.encode(operation.into(), &references)?;
    std::fs::write(output, &bytes)?;

    println!(
        "{} {} reference(s) as {} ({} bytes) to {}",
        "Encoded".green().bold(),
        references.len(),
        TRANSFER_TYPE_NAME.cyan(),
        bytes.len(),
        output.display()
    );
    println!("  {}", hex::encode(&bytes).dimmed());
    Ok(())
}

/// Run the transfer decode command
pub fn run_decode(input: &Path, json: bool) -> Result<()> {
    let bytes = std::fs::read(input)?;
    let transfer = ResourceTransfer::new(RepositoryRefCodec);

    let Some(payload) = transfer.decode(&bytes) else {
        if json {
            println!("null");
        } else {
            println!("{} No transfer data in {}", "note:".dimmed(), input.display());
        }
        return Ok(());
    };

    let operation = match payload.operation {
        TransferOperation::Copy => "copy",
        TransferOperation::Cut => "cut",
        TransferOperation::None => "none",
    };

    if json {
        let value = serde_json::json!({
            "operation": operation,
            "resources": payload.resources,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{} {} reference(s), operation {}",
        "Decoded".bold(),
        payload.resources.len(),
        operation.cyan()
    );
    for reference in &payload.resources {
        println!("  {} {}", "+".green(), reference.key());
    }
    Ok(())
}
