//! Read command implementation.

use anyhow::{Result, bail};
use memview_core::{ValueKind, ValueReport, read_value};
use serde_json::json;

const DEFAULT_BYTES_SIZE: usize = 16;

/// Resolve the number of bytes to read for `kind`.
///
/// Scalar kinds have a fixed width; `--size` is only accepted for them when
/// it matches that width.
fn read_size(kind: ValueKind, size: Option<usize>) -> Result<usize> {
    match (kind.width(), size) {
        (Some(width), None) => Ok(width),
        (Some(width), Some(size)) if size == width => Ok(width),
        (Some(width), Some(size)) => {
            bail!("--size {} does not match the {}-byte width of {}", size, width, kind)
        }
        (None, None) => Ok(DEFAULT_BYTES_SIZE),
        (None, Some(0)) => bail!("--size must be at least 1 for the bytes type"),
        (None, Some(size)) => Ok(size),
    }
}

/// Run the read command
pub fn run(
    pid: u32,
    address: u64,
    kind: ValueKind,
    size: Option<usize>,
    json: bool,
) -> Result<()> {
    let size = read_size(kind, size)?;

    let value = super::with_view(pid, |view| Ok(read_value(view, kind, address, size)?))?;

    if json {
        let output = json!({
            "pid": pid,
            "address": format!("0x{:x}", address),
            "type": kind.to_string(),
            "value": value,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", ValueReport { value, address });
    }

    Ok(())
}
