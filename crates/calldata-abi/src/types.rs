//! ABI type descriptors and values

use std::fmt;

use calldata_primitives::{Address, U256, WORD_SIZE};

use crate::error::Result;

/// Options for the scaled fixed-point codecs.
///
/// `value * 10^exponent` is stored as an integer of `bit_width` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericOpts {
    /// Declared bit width of the unscaled value
    pub bit_width: u16,
    /// Decimal exponent applied before storing
    pub exponent: u16,
}

impl NumericOpts {
    /// Default width for `fixed`/`ufixed`
    pub const DEFAULT_BIT_WIDTH: u16 = 128;
    /// Default decimal exponent for `fixed`/`ufixed`
    pub const DEFAULT_EXPONENT: u16 = 18;

    /// Create with explicit width and exponent
    pub const fn new(bit_width: u16, exponent: u16) -> Self {
        Self { bit_width, exponent }
    }
}

impl Default for NumericOpts {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BIT_WIDTH, Self::DEFAULT_EXPONENT)
    }
}

/// Length of an array type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLength {
    /// `T[n]`
    Fixed(usize),
    /// `T[]`, length-prefixed at encode time
    Dynamic,
}

/// Parsed type descriptor for one signature entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Signed integer with bit width (8, 16, ..., 256)
    Int(usize),
    /// Unsigned integer with bit width
    Uint(usize),
    /// Boolean
    Bool,
    /// 20-byte address
    Address,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Signed scaled fixed-point (codec only, rejected by the parser)
    Fixed(NumericOpts),
    /// Unsigned scaled fixed-point (codec only, rejected by the parser)
    Ufixed(NumericOpts),
    /// Length-prefixed array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Tuple
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Whether the encoded size is independent of the value.
    ///
    /// Computed bottom-up: a composite is static iff every descendant is,
    /// and a length-prefixed array never is.
    pub fn is_static(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => false,
            ParamType::FixedArray(inner, _) => inner.is_static(),
            ParamType::Tuple(types) => types.iter().all(ParamType::is_static),
            _ => true,
        }
    }

    /// Opposite of [`ParamType::is_static`]
    pub fn is_dynamic(&self) -> bool {
        !self.is_static()
    }

    /// Check if this is an array type
    pub fn is_array(&self) -> bool {
        matches!(self, ParamType::Array(_) | ParamType::FixedArray(..))
    }

    /// Array length, `None` for non-array types
    pub fn array_length(&self) -> Option<ArrayLength> {
        match self {
            ParamType::Array(_) => Some(ArrayLength::Dynamic),
            ParamType::FixedArray(_, len) => Some(ArrayLength::Fixed(*len)),
            _ => None,
        }
    }

    /// Element type of an array
    pub fn element(&self) -> Option<&ParamType> {
        match self {
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => Some(inner),
            _ => None,
        }
    }

    /// Bytes this type occupies in a tuple head: its full encoding when
    /// static, otherwise one offset word.
    pub fn head_length(&self) -> usize {
        if self.is_dynamic() {
            return WORD_SIZE;
        }
        match self {
            ParamType::FixedArray(inner, len) => inner.head_length().saturating_mul(*len),
            ParamType::Tuple(types) => types
                .iter()
                .map(ParamType::head_length)
                .fold(0, usize::saturating_add),
            _ => WORD_SIZE,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Int(bits) => write!(f, "int{bits}"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Address => f.write_str("address"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::FixedBytes(len) => write!(f, "bytes{len}"),
            ParamType::String => f.write_str("string"),
            ParamType::Fixed(opts) => write!(f, "fixed{}x{}", opts.bit_width, opts.exponent),
            ParamType::Ufixed(opts) => write!(f, "ufixed{}x{}", opts.bit_width, opts.exponent),
            ParamType::Array(inner) => write!(f, "{inner}[]"),
            ParamType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            ParamType::Tuple(types) => {
                f.write_str("(")?;
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Signed 256-bit integer as sign and magnitude.
///
/// Zero is never negative, so derived equality is numeric equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    abs: U256,
    negative: bool,
}

impl I256 {
    /// Zero
    pub const ZERO: I256 = I256 {
        abs: U256::zero(),
        negative: false,
    };

    /// Create from magnitude and sign
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Absolute value
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// Sign
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Interpret a 256-bit word as two's complement
    pub fn from_twos_complement(word: U256) -> Self {
        if word.bit(255) {
            Self::new((!word).overflowing_add(U256::one()).0, true)
        } else {
            Self::new(word, false)
        }
    }

    /// Full 256-bit two's complement, i.e. `2^256 + value` for negatives
    pub fn to_twos_complement(&self) -> U256 {
        if self.negative {
            (!self.abs).overflowing_add(U256::one()).0
        } else {
            self.abs
        }
    }

    /// Whether the value lies in `[-2^(bits-1), 2^(bits-1))`.
    ///
    /// `bits` must be in `1..=256`.
    pub fn fits_bits(&self, bits: usize) -> bool {
        let bound = U256::one() << (bits - 1);
        if self.negative {
            self.abs <= bound
        } else {
            self.abs < bound
        }
    }

    /// `2^(bits-1) - 1`
    pub fn max_for_bits(bits: usize) -> Self {
        Self::new((U256::one() << (bits - 1)) - U256::one(), false)
    }

    /// `-2^(bits-1)`
    pub fn min_for_bits(bits: usize) -> Self {
        Self::new(U256::one() << (bits - 1), true)
    }
}

impl From<i32> for I256 {
    fn from(value: i32) -> Self {
        Self::from_i128(value as i128)
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        Self::from_i128(value as i128)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

/// ABI value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed integer
    Int(I256),
    /// Unsigned integer
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// Address
    Address(Address),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Array, fixed or dynamic; the declared type decides
    Array(Vec<Value>),
    /// Tuple
    Tuple(Vec<Value>),
}

impl Value {
    /// Unsigned integer value
    pub fn uint(value: impl Into<U256>) -> Self {
        Value::Uint(value.into())
    }

    /// Signed integer value
    pub fn int(value: impl Into<I256>) -> Self {
        Value::Int(value.into())
    }

    /// Address from a `0x` hex string of at most 20 bytes
    pub fn address(hex: &str) -> Result<Self> {
        Ok(Value::Address(Address::from_hex(hex)?))
    }

    /// String value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Short description used in type mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Bool(_) => "bool",
            Value::Address(_) => "address",
            Value::Bytes(_) => "bytes",
            Value::FixedBytes(_) => "fixed bytes",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Tuple(_) => "tuple",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<U256> for Value {
    fn from(v: U256) -> Self {
        Value::Uint(v)
    }
}

impl From<I256> for Value {
    fn from(v: I256) -> Self {
        Value::Int(v)
    }
}

impl From<Address> for Value {
    fn from(a: Address) -> Self {
        Value::Address(a)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
