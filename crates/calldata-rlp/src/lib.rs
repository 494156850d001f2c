//! # calldata-rlp
//!
//! Length-prefix (RLP) encoding of nested byte strings and lists.
//!
//! Framing is delegated to the `rlp` crate; this crate adds a dynamic
//! [`Item`] tree, offset-based decoding and length calculation without
//! encoding.
//!
//! ## Encoding Rules
//!
//! - Single byte `[0x00, 0x7f]`: itself
//! - Short string (0-55 bytes): `0x80 + len` + data
//! - Long string (>55 bytes): `0xb7 + len_of_len` + len + data
//! - Short list (0-55 bytes payload): `0xc0 + len` + items
//! - Long list (>55 bytes payload): `0xf7 + len_of_len` + len + items
//!
//! ```
//! use calldata_rlp::{decode, encode, Item};
//!
//! let item = Item::List(vec![Item::from("cat"), Item::from("dog")]);
//! let encoded = encode(&item);
//! assert_eq!(encoded[0], 0xc8);
//! assert_eq!(decode(&encoded).unwrap(), item);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;

pub use error::{Result, RlpError};

// Re-export rlp crate for direct use
pub use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use tracing::debug;

/// Deepest list nesting the decoder follows
pub const MAX_DEPTH: usize = 1024;

/// Largest payload that fits a single-byte header
const SHORT_LIMIT: usize = 55;

/// A byte string or a list of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Raw byte string
    Bytes(Vec<u8>),
    /// Ordered list of nested items
    List(Vec<Item>),
}

impl Item {
    /// Byte content, if this is a byte string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Item::Bytes(b) => Some(b),
            Item::List(_) => None,
        }
    }

    /// Entries, if this is a list
    pub fn as_list(&self) -> Option<&[Item]> {
        match self {
            Item::Bytes(_) => None,
            Item::List(items) => Some(items),
        }
    }

    /// True for lists
    pub fn is_list(&self) -> bool {
        matches!(self, Item::List(_))
    }
}

impl From<Vec<u8>> for Item {
    fn from(b: Vec<u8>) -> Self {
        Item::Bytes(b)
    }
}

impl From<&[u8]> for Item {
    fn from(b: &[u8]) -> Self {
        Item::Bytes(b.to_vec())
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Bytes(s.as_bytes().to_vec())
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

/// Integers become minimal big-endian byte strings; zero is empty
impl From<u64> for Item {
    fn from(value: u64) -> Self {
        let bytes = value.to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Item::Bytes(bytes[start..].to_vec())
    }
}

impl Encodable for Item {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            Item::Bytes(bytes) => {
                s.append(bytes);
            }
            Item::List(items) => {
                s.begin_list(items.len());
                for item in items {
                    s.append(item);
                }
            }
        }
    }
}

impl Decodable for Item {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        decode_item(rlp.as_raw(), 0)
            .map(|(item, _)| item)
            .map_err(Into::into)
    }
}

/// Encode an item
pub fn encode(item: &Item) -> Vec<u8> {
    let out = rlp::encode(item).to_vec();
    debug!(len = out.len(), "rlp encoded item");
    out
}

/// Encode an item into `buf` at `offset`, returning the bytes written
///
/// `buf` is left untouched when it is too small.
pub fn encode_into(item: &Item, buf: &mut [u8], offset: usize) -> Result<usize> {
    let required = offset.saturating_add(encoding_length(item));
    if buf.len() < required {
        return Err(RlpError::BufferTooSmall {
            required,
            available: buf.len(),
        });
    }
    let encoded = encode(item);
    buf[offset..offset + encoded.len()].copy_from_slice(&encoded);
    Ok(encoded.len())
}

/// Decode exactly one item spanning all of `data`
pub fn decode(data: &[u8]) -> Result<Item> {
    let (item, used) = decode_item(data, 0)?;
    if used != data.len() {
        return Err(RlpError::TrailingBytes(data.len() - used));
    }
    debug!(len = used, "rlp decoded item");
    Ok(item)
}

/// Decode the item starting at `offset`, returning it with the bytes consumed
///
/// Bytes after the item are ignored.
pub fn decode_at(data: &[u8], offset: usize) -> Result<(Item, usize)> {
    let rest = data.get(offset..).ok_or(RlpError::OffsetOutOfBounds {
        offset,
        len: data.len(),
    })?;
    decode_item(rest, 0)
}

/// Encoded size of `item`, computed without encoding
pub fn encoding_length(item: &Item) -> usize {
    match item {
        Item::Bytes(b) if b.len() == 1 && b[0] < 0x80 => 1,
        Item::Bytes(b) => header_length(b.len()) + b.len(),
        Item::List(items) => {
            let payload: usize = items.iter().map(encoding_length).sum();
            header_length(payload) + payload
        }
    }
}

fn header_length(payload: usize) -> usize {
    if payload <= SHORT_LIMIT {
        1
    } else {
        1 + byte_size(payload)
    }
}

/// Bytes needed for `n` in big-endian without leading zeros
fn byte_size(n: usize) -> usize {
    ((usize::BITS - n.leading_zeros()) as usize).div_ceil(8)
}

fn decode_item(data: &[u8], depth: usize) -> Result<(Item, usize)> {
    if depth > MAX_DEPTH {
        return Err(RlpError::TooDeep(MAX_DEPTH));
    }
    let rlp = Rlp::new(data);
    // Bounds-checked against `data` by the rlp crate
    let info = rlp.payload_info()?;
    let total = info.total();

    // Long form must not carry a short length
    if info.header_len > 1 && info.value_len <= SHORT_LIMIT {
        return Err(DecoderError::RlpInvalidIndirection.into());
    }

    let payload = &data[info.header_len..total];
    if !rlp.is_list() {
        // A lone byte below 0x80 must be encoded as itself
        if info.header_len == 1 && payload.len() == 1 && payload[0] < 0x80 {
            return Err(DecoderError::RlpInvalidIndirection.into());
        }
        return Ok((Item::Bytes(payload.to_vec()), total));
    }

    let mut items = Vec::new();
    let mut pos = 0;
    while pos < payload.len() {
        let (item, used) = decode_item(&payload[pos..], depth + 1)?;
        items.push(item);
        pos += used;
    }
    Ok((Item::List(items), total))
}
