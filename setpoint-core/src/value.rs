//! Value codec
//!
//! Converts typed configuration values to and from the printable text form
//! used by stores, consoles and management clients. Everything here is pure;
//! output always goes into a caller-supplied buffer.

use core::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use heapless::String;

use crate::error::Error;

/// Longest decimal rendering of an `i64` ("-9223372036854775808")
const MAX_INT_TEXT_LEN: usize = 20;

/// Type tag for a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueType {
    Int8,
    Int16,
    Int32,
    Int64,
    Bool,
    /// Printable string
    String,
    /// Opaque bytes, base64 in text form
    Bytes,
}

/// A decoded configuration value
///
/// String and byte variants borrow the destination buffer they were decoded
/// into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value<'a> {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    String(&'a str),
    Bytes(&'a [u8]),
}

impl Value<'_> {
    /// Type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int8(_) => ValueType::Int8,
            Value::Int16(_) => ValueType::Int16,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
        }
    }
}

/// Decode `text` as a value of type `ty`
///
/// Scalars ignore `dest`. Strings are copied into `dest` with a trailing NUL,
/// so `dest` must be at least one byte longer than the text. Bytes are
/// base64-decoded into `dest`.
pub fn value_from_str<'d>(text: &str, ty: ValueType, dest: &'d mut [u8]) -> Result<Value<'d>, Error> {
    match ty {
        ValueType::Int8 => parse_int(text).map(Value::Int8),
        ValueType::Int16 => parse_int(text).map(Value::Int16),
        ValueType::Int32 => parse_int(text).map(Value::Int32),
        ValueType::Int64 => parse_int(text).map(Value::Int64),
        ValueType::Bool => parse_bool(text).map(Value::Bool),
        ValueType::String => string_from_str(text, dest).map(Value::String),
        ValueType::Bytes => bytes_from_str(text, dest).map(Value::Bytes),
    }
}

/// Parse an integer literal into `T`
///
/// Accepts `0x`/`0X` hex, leading-zero octal and decimal, with an optional
/// sign. Trailing characters or a value outside `T`'s range are rejected.
pub fn parse_int<T: TryFrom<i128>>(text: &str) -> Result<T, Error> {
    T::try_from(parse_literal(text)?).map_err(|_| Error::MalformedValue)
}

/// Parse a boolean; only the integers 0 and 1 are accepted
pub fn parse_bool(text: &str) -> Result<bool, Error> {
    match parse_literal(text)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(Error::MalformedValue),
    }
}

fn parse_literal(text: &str) -> Result<i128, Error> {
    // strtol-style: ASCII whitespace only
    let text = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    // from_str_radix takes its own sign; only bare digits may follow the prefix
    if !digits.bytes().next().is_some_and(|b| b.is_ascii_hexdigit()) {
        return Err(Error::MalformedValue);
    }
    let magnitude = i128::from_str_radix(digits, radix).map_err(|_| Error::MalformedValue)?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Copy `text` into `dest` followed by a NUL terminator
pub fn string_from_str<'d>(text: &str, dest: &'d mut [u8]) -> Result<&'d str, Error> {
    let len = text.len();
    if len + 1 > dest.len() {
        return Err(Error::BufferTooSmall);
    }
    dest[..len].copy_from_slice(text.as_bytes());
    dest[len] = 0;
    core::str::from_utf8(&dest[..len]).map_err(|_| Error::MalformedValue)
}

/// Decode padded standard base64 into `dest`
///
/// Returns the decoded prefix of `dest`.
pub fn bytes_from_str<'d>(text: &str, dest: &'d mut [u8]) -> Result<&'d [u8], Error> {
    let encoded = text.as_bytes();
    if !encoded.len().is_multiple_of(4) {
        return Err(Error::MalformedValue);
    }
    let padding = encoded.iter().rev().take_while(|&&b| b == b'=').count();
    if padding > 2 || encoded[..encoded.len() - padding].contains(&b'=') {
        return Err(Error::MalformedValue);
    }

    let decoded_len = encoded.len() / 4 * 3 - padding;
    if decoded_len > dest.len() {
        return Err(Error::BufferTooSmall);
    }

    // Decode one quad at a time so an exactly-sized dest is accepted
    let mut written = 0;
    for quad in encoded.chunks(4) {
        let mut block = [0u8; 3];
        let n = STANDARD
            .decode_slice(quad, &mut block)
            .map_err(|_| Error::MalformedValue)?;
        dest.get_mut(written..written + n)
            .ok_or(Error::BufferTooSmall)?
            .copy_from_slice(&block[..n]);
        written += n;
    }
    Ok(&dest[..written])
}

/// Render `value` as text into `buf`
///
/// Integers use minimal decimal form, booleans `"0"`/`"1"`, bytes base64.
/// Nothing is written if `buf` is too small.
pub fn str_from_value<'b>(value: &Value<'_>, buf: &'b mut [u8]) -> Result<&'b str, Error> {
    match *value {
        Value::Int8(v) => str_from_int(i64::from(v), buf),
        Value::Int16(v) => str_from_int(i64::from(v), buf),
        Value::Int32(v) => str_from_int(i64::from(v), buf),
        Value::Int64(v) => str_from_int(v, buf),
        Value::Bool(v) => str_from_int(i64::from(v), buf),
        Value::String(s) => copy_str(s, buf),
        Value::Bytes(b) => str_from_bytes(b, buf),
    }
}

/// Base64-encode `bytes` into `buf`
pub fn str_from_bytes<'b>(bytes: &[u8], buf: &'b mut [u8]) -> Result<&'b str, Error> {
    let len = base64::encoded_len(bytes.len(), true).ok_or(Error::BufferTooSmall)?;
    if len > buf.len() {
        return Err(Error::BufferTooSmall);
    }
    let written = STANDARD
        .encode_slice(bytes, buf)
        .map_err(|_| Error::BufferTooSmall)?;
    core::str::from_utf8(&buf[..written]).map_err(|_| Error::MalformedValue)
}

fn str_from_int(v: i64, buf: &mut [u8]) -> Result<&str, Error> {
    let mut text: String<MAX_INT_TEXT_LEN> = String::new();
    write!(text, "{}", v).map_err(|_| Error::BufferTooSmall)?;
    copy_str(&text, buf)
}

fn copy_str<'b>(s: &str, buf: &'b mut [u8]) -> Result<&'b str, Error> {
    let dst = buf.get_mut(..s.len()).ok_or(Error::BufferTooSmall)?;
    dst.copy_from_slice(s.as_bytes());
    core::str::from_utf8(dst).map_err(|_| Error::MalformedValue)
}
