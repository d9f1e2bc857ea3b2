//! Deterministic binary encoding for values crossing the core boundary.
//!
//! Layout (bincode, fixed-width little-endian):
//! - integers and floats: their natural width, little-endian
//! - enums: `u32` discriminant followed by the variant payload
//! - strings, byte vectors, sequences: `u64` length followed by the elements
//! - `Option`: one tag byte (`0` none, `1` some) followed by the value
//!
//! Decoding is capped at [`MAX_MESSAGE_BYTES`] and rejects trailing bytes. A
//! string or byte length above the cap is [`DecodeError::LengthOverflow`]; one
//! within the cap that runs past the end of the input is
//! [`DecodeError::Truncated`]. Sequence element counts are not byte lengths, so
//! an oversized count surfaces as `Truncated` once the elements run out.

use bincode::{BincodeRead, Options};
use serde::de::{DeserializeOwned, Visitor};
use serde::Serialize;
use std::io;

use crate::{DecodeError, EncodeError};

/// Largest message either side of the boundary will produce or accept.
pub const MAX_MESSAGE_BYTES: u64 = 16 * 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_MESSAGE_BYTES)
        .reject_trailing_bytes()
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(options().serialize(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    // `Options::deserialize` drops the size limit for slices; a custom reader keeps it.
    let mut input = Input { rest: bytes };
    let value = options().deserialize_from_custom(Reader(&mut input))?;
    if !input.rest.is_empty() {
        return Err(DecodeError::Malformed(format!(
            "{} trailing bytes",
            input.rest.len()
        )));
    }
    Ok(value)
}

struct Input<'a> {
    rest: &'a [u8],
}

impl<'a> Input<'a> {
    fn take(&mut self, length: usize) -> io::Result<&'a [u8]> {
        if length > self.rest.len() {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        let (taken, rest) = self.rest.split_at(length);
        self.rest = rest;
        Ok(taken)
    }
}

/// Zero-copy reader over the input; the limit is checked by bincode before
/// any declared length is read.
struct Reader<'i, 'a>(&'i mut Input<'a>);

impl io::Read for Reader<'_, '_> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = out.len().min(self.0.rest.len());
        out[..n].copy_from_slice(self.0.take(n)?);
        Ok(n)
    }

    fn read_exact(&mut self, out: &mut [u8]) -> io::Result<()> {
        out.copy_from_slice(self.0.take(out.len())?);
        Ok(())
    }
}

impl<'a> BincodeRead<'a> for Reader<'_, 'a> {
    fn forward_read_str<V>(&mut self, length: usize, visitor: V) -> bincode::Result<V::Value>
    where
        V: Visitor<'a>,
    {
        let text = std::str::from_utf8(self.0.take(length)?)
            .map_err(bincode::ErrorKind::InvalidUtf8Encoding)?;
        visitor.visit_borrowed_str(text)
    }

    fn get_byte_buffer(&mut self, length: usize) -> bincode::Result<Vec<u8>> {
        Ok(self.0.take(length)?.to_vec())
    }

    fn forward_read_bytes<V>(&mut self, length: usize, visitor: V) -> bincode::Result<V::Value>
    where
        V: Visitor<'a>,
    {
        visitor.visit_borrowed_bytes(self.0.take(length)?)
    }
}
