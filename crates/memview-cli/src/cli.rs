//! CLI argument definitions for memview.

use clap::{Parser, Subcommand};
use memview_core::{ValueKind, parse_address};

#[derive(Parser)]
#[command(name = "memview")]
#[command(about = "Read-only access to another process's memory", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read one typed value
    Read {
        /// Target process ID
        #[arg(long, env = "MEMVIEW_PID")]
        pid: u32,
        /// Address to read (hex, e.g., 0x7ffd1234)
        #[arg(long, value_parser = parse_address)]
        address: u64,
        /// Value type (char, short, "unsigned short", int, "unsigned int", float, double, bytes)
        #[arg(long = "type", value_name = "TYPE", default_value = "int")]
        kind: ValueKind,
        /// Number of bytes for the bytes type (default: 16)
        #[arg(long)]
        size: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dump raw bytes from memory (hexdump)
    Hexdump {
        /// Target process ID
        #[arg(long, env = "MEMVIEW_PID")]
        pid: u32,
        /// Start address (hex, e.g., 0x7ffd1234)
        #[arg(long, value_parser = parse_address)]
        address: u64,
        /// Number of bytes to dump
        #[arg(long, default_value = "256")]
        size: usize,
    },
}
