//! Hexdump command implementation.

use anyhow::Result;
use memview_core::MemoryDump;

/// Run the hexdump command
pub fn run(pid: u32, address: u64, size: usize) -> Result<()> {
    let dump = super::with_view(pid, |view| Ok(MemoryDump::read(view, address, size)?))?;

    println!("Process {}: {} bytes at 0x{:X}", pid, dump.size, dump.address);
    for line in &dump.hex_dump {
        println!("{}", line);
    }

    Ok(())
}
