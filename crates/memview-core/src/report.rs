//! Value kinds and report lines.
//!
//! Target processes used for verification print one line per known value in
//! the form `"{type}: {value} at {address}"`, for example
//! `int: -42 at 0x7ffd1234` or `bytes: 1 2 3 4 at 0x100`. This module parses
//! and formats those lines and reads the reported values back through any
//! [`ReadMemory`] source.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};
use crate::process::ReadMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ValueKind {
    #[strum(to_string = "char", serialize = "u8")]
    Char,
    #[strum(to_string = "short", serialize = "i16")]
    Short,
    #[strum(to_string = "unsigned short", serialize = "ushort", serialize = "u16")]
    UnsignedShort,
    #[strum(to_string = "int", serialize = "i32")]
    Int,
    #[strum(to_string = "unsigned int", serialize = "uint", serialize = "u32")]
    UnsignedInt,
    #[strum(to_string = "float", serialize = "f32")]
    Float,
    #[strum(to_string = "double", serialize = "f64")]
    Double,
    #[strum(to_string = "bytes")]
    Bytes,
}

impl ValueKind {
    /// Encoded width in bytes; `None` for byte sequences.
    pub fn width(self) -> Option<usize> {
        match self {
            ValueKind::Char => Some(1),
            ValueKind::Short | ValueKind::UnsignedShort => Some(2),
            ValueKind::Int | ValueKind::UnsignedInt | ValueKind::Float => Some(4),
            ValueKind::Double => Some(8),
            ValueKind::Bytes => None,
        }
    }
}

/// A decoded value of one [`ValueKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Char(u8),
    Short(i16),
    UnsignedShort(u16),
    Int(i32),
    UnsignedInt(u32),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Char(_) => ValueKind::Char,
            Value::Short(_) => ValueKind::Short,
            Value::UnsignedShort(_) => ValueKind::UnsignedShort,
            Value::Int(_) => ValueKind::Int,
            Value::UnsignedInt(_) => ValueKind::UnsignedInt,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Bytes(_) => ValueKind::Bytes,
        }
    }

    /// Parse the textual form of a value of the given kind.
    ///
    /// Characters are accepted as signed or unsigned numbers (`-1` and `255`
    /// are the same byte); byte sequences are whitespace separated.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self> {
        let text = text.trim();
        let invalid = || Error::InvalidReport(format!("bad {kind} value '{text}'"));

        let value = match kind {
            ValueKind::Char => text
                .parse::<i16>()
                .ok()
                .filter(|v| (-128..=255).contains(v))
                .map(|v| Value::Char(v as u8)),
            ValueKind::Short => text.parse().ok().map(Value::Short),
            ValueKind::UnsignedShort => text.parse().ok().map(Value::UnsignedShort),
            ValueKind::Int => text.parse().ok().map(Value::Int),
            ValueKind::UnsignedInt => text.parse().ok().map(Value::UnsignedInt),
            ValueKind::Float => text.parse().ok().map(Value::Float),
            ValueKind::Double => text.parse().ok().map(Value::Double),
            ValueKind::Bytes => text
                .split_whitespace()
                .map(str::parse::<u8>)
                .collect::<std::result::Result<Vec<_>, _>>()
                .ok()
                .map(Value::Bytes),
        };

        value.ok_or_else(invalid)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Char(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::UnsignedShort(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UnsignedInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:.6}"),
            Value::Double(v) => write!(f, "{v:.6}"),
            Value::Bytes(bytes) => {
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{b}")?;
                }
                Ok(())
            }
        }
    }
}

/// Read a value of `kind` at `address`. `len` is only used for byte sequences.
pub fn read_value<R: ReadMemory>(
    reader: &R,
    kind: ValueKind,
    address: u64,
    len: usize,
) -> Result<Value> {
    Ok(match kind {
        ValueKind::Char => Value::Char(reader.read_u8(address)?),
        ValueKind::Short => Value::Short(reader.read_i16(address)?),
        ValueKind::UnsignedShort => Value::UnsignedShort(reader.read_u16(address)?),
        ValueKind::Int => Value::Int(reader.read_i32(address)?),
        ValueKind::UnsignedInt => Value::UnsignedInt(reader.read_u32(address)?),
        ValueKind::Float => Value::Float(reader.read_f32(address)?),
        ValueKind::Double => Value::Double(reader.read_f64(address)?),
        ValueKind::Bytes => Value::Bytes(reader.read_bytes(address, len)?),
    })
}

/// Parse a hexadecimal address, with or without a `0x` prefix.
pub fn parse_address(text: &str) -> Result<u64> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    u64::from_str_radix(digits, 16).map_err(|_| Error::InvalidAddress(text.to_string()))
}

/// One `"{type}: {value} at {address}"` line.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueReport {
    pub value: Value,
    pub address: u64,
}

impl ValueReport {
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Read the reported location back with the reported kind and length.
    pub fn read_back<R: ReadMemory>(&self, reader: &R) -> Result<Value> {
        let len = match &self.value {
            Value::Bytes(bytes) => bytes.len(),
            _ => 0,
        };
        read_value(reader, self.kind(), self.address, len)
    }
}

impl fmt::Display for ValueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at 0x{:x}", self.kind(), self.value, self.address)
    }
}

impl FromStr for ValueReport {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_end();
        let (head, address) = line
            .rsplit_once(" at ")
            .ok_or_else(|| Error::InvalidReport(format!("missing address in '{line}'")))?;
        let (label, value) = head
            .split_once(':')
            .ok_or_else(|| Error::InvalidReport(format!("missing type in '{line}'")))?;

        let kind: ValueKind = label
            .trim()
            .parse()
            .map_err(|_| Error::InvalidReport(format!("unknown type '{}'", label.trim())))?;

        Ok(Self {
            value: Value::parse(kind, value)?,
            address: parse_address(address)?,
        })
    }
}

/// Collect every parseable report, skipping prompts and unknown lines.
pub fn parse_reports<'a, I>(lines: I) -> Vec<ValueReport>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(|line| line.parse().ok())
        .collect()
}
