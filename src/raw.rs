//! Bounds-checked reading of raw binary records.
//!
//! [`Raw`] wraps an immutable byte slice and hands it out piece by piece
//! while keeping track of how much has been consumed. Decoders for
//! certificates, keys and headers are expected to use it instead of doing
//! index arithmetic on slices themselves.

use std::fmt;

use crate::{Result, ScionError};

/// How an expected length is compared against the actual data length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LenMode {
    /// Data length must be equal to the expected length.
    #[default]
    Exact,
    /// Data length must be at least the expected length.
    Minimum,
}

impl LenMode {
    fn accepts(self, actual: usize, expected: usize) -> bool {
        match self {
            LenMode::Exact => actual == expected,
            LenMode::Minimum => actual >= expected,
        }
    }
}

impl fmt::Display for LenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LenMode::Exact => f.write_str("=="),
            LenMode::Minimum => f.write_str(">="),
        }
    }
}

/// Whether a read verifies that enough data is left before performing it.
///
/// [`Bounds::Unchecked`] gives no bounds guarantee: a read that asks for
/// more than what is left silently returns the available bytes only.
/// Do not use it on untrusted input unless the length was validated
/// beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    #[default]
    Checked,
    Unchecked,
}

/// Result of a generic [`Raw::get`] / [`Raw::pop`] read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// A request for exactly one byte.
    Byte(u8),
    /// Any other request, including "everything that is left".
    Bytes(&'a [u8]),
}

impl<'a> Field<'a> {
    pub fn byte(&self) -> Option<u8> {
        match *self {
            Field::Byte(b) => Some(b),
            Field::Bytes(_) => None,
        }
    }

    pub fn bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Field::Byte(_) => None,
            Field::Bytes(b) => Some(b),
        }
    }
}

/// Values that may be handed to [`Raw`].
///
/// Byte containers expose their contents; text types are accepted by the
/// constructors only to be rejected with [`ScionError::Type`], which keeps
/// file contents read as text from being decoded as binary.
pub trait RawData {
    fn raw_bytes(&self) -> Option<&[u8]>;

    fn type_name(&self) -> &'static str;
}

impl RawData for [u8] {
    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "bytes"
    }
}

impl<const N: usize> RawData for [u8; N] {
    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "bytes"
    }
}

impl RawData for Vec<u8> {
    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "bytes"
    }
}

impl RawData for str {
    fn raw_bytes(&self) -> Option<&[u8]> {
        None
    }

    fn type_name(&self) -> &'static str {
        "str"
    }
}

impl RawData for String {
    fn raw_bytes(&self) -> Option<&[u8]> {
        None
    }

    fn type_name(&self) -> &'static str {
        "String"
    }
}

impl<T: RawData + ?Sized> RawData for &T {
    fn raw_bytes(&self) -> Option<&[u8]> {
        (**self).raw_bytes()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

/// Cursor over raw bytes with an optional length constraint.
///
/// The length constraint is only checked once, in the constructor.
/// The offset only ever moves forward and never goes past the end of
/// the data.
#[derive(Debug, Clone)]
pub struct Raw<'a> {
    data: &'a [u8],
    desc: String,
    expected_len: Option<usize>,
    len_mode: LenMode,
    offset: usize,
}

impl<'a> Raw<'a> {
    /// Wrap `data` without any length constraint.
    pub fn new<D: RawData + ?Sized>(
        data: &'a D,
        desc: impl Into<String>,
    ) -> Result<Self> {
        Self::build(data, desc.into(), None, LenMode::Exact)
    }

    /// Wrap `data`, requiring its length to match `len` according to `mode`.
    pub fn with_len<D: RawData + ?Sized>(
        data: &'a D,
        desc: impl Into<String>,
        len: usize,
        mode: LenMode,
    ) -> Result<Self> {
        Self::build(data, desc.into(), Some(len), mode)
    }

    fn build<D: RawData + ?Sized>(
        data: &'a D,
        desc: String,
        expected_len: Option<usize>,
        len_mode: LenMode,
    ) -> Result<Self> {
        let data = match data.raw_bytes() {
            Some(bytes) => bytes,
            None => {
                return Err(ScionError::Type {
                    desc,
                    got: data.type_name(),
                })
            }
        };
        let raw = Self {
            data,
            desc,
            expected_len,
            len_mode,
            offset: 0,
        };
        raw.check_len()?;
        Ok(raw)
    }

    fn check_len(&self) -> Result<()> {
        let Some(expected) = self.expected_len else {
            return Ok(());
        };
        if self.len_mode.accepts(self.data.len(), expected) {
            return Ok(());
        }
        Err(ScionError::Parse {
            desc: self.desc.clone(),
            mode: self.len_mode,
            expected,
            actual: self.data.len(),
        })
    }

    fn check_bounds(&self, n: usize) -> Result<()> {
        match self.offset.checked_add(n) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(ScionError::Index {
                desc: self.desc.clone(),
                len: self.data.len(),
                offset: self.offset,
                request: n,
            }),
        }
    }

    /// Up to `n` bytes from the offset, truncated at the end of the data.
    fn slice(&self, n: usize) -> &'a [u8] {
        let data = self.data;
        let end = self.offset.saturating_add(n).min(data.len());
        &data[self.offset..end]
    }

    fn advance(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.data.len());
    }

    /// Read without moving the offset.
    ///
    /// `None` returns everything that is left and never fails. `Some(1)`
    /// returns a single [`Field::Byte`]; any other count returns
    /// [`Field::Bytes`]. With [`Bounds::Checked`] a request past the end
    /// fails with [`ScionError::Index`]. With [`Bounds::Unchecked`] the
    /// result is truncated to the available bytes, and a single-byte
    /// request at the end yields an empty [`Field::Bytes`].
    pub fn get(&self, n: Option<usize>, bounds: Bounds) -> Result<Field<'a>> {
        if let (Some(n), Bounds::Checked) = (n, bounds) {
            self.check_bounds(n)?;
        }
        let field = match n {
            None => Field::Bytes(self.peek_rest()),
            Some(1) => match self.data.get(self.offset) {
                Some(&b) => Field::Byte(b),
                None => Field::Bytes(&[]),
            },
            Some(n) => Field::Bytes(self.slice(n)),
        };
        Ok(field)
    }

    /// Same as [`Raw::get`], then move the offset past what was requested.
    /// `None` moves the offset to the end of the data.
    pub fn pop(&mut self, n: Option<usize>, bounds: Bounds) -> Result<Field<'a>> {
        let field = self.get(n, bounds)?;
        match n {
            None => self.offset = self.data.len(),
            Some(n) => self.advance(n),
        }
        Ok(field)
    }

    pub fn peek_u8(&self) -> Result<u8> {
        self.check_bounds(1)?;
        Ok(self.data[self.offset])
    }

    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8]> {
        self.check_bounds(n)?;
        Ok(self.slice(n))
    }

    pub fn peek_rest(&self) -> &'a [u8] {
        let data = self.data;
        &data[self.offset..]
    }

    /// Up to `n` bytes without bounds checking, see [`Bounds::Unchecked`].
    pub fn peek_unchecked(&self, n: usize) -> &'a [u8] {
        self.slice(n)
    }

    pub fn pop_u8(&mut self) -> Result<u8> {
        let b = self.peek_u8()?;
        self.advance(1);
        Ok(b)
    }

    pub fn pop_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(n)?;
        self.advance(n);
        Ok(bytes)
    }

    pub fn pop_rest(&mut self) -> &'a [u8] {
        let bytes = self.peek_rest();
        self.offset = self.data.len();
        bytes
    }

    /// Up to `n` bytes without bounds checking, see [`Bounds::Unchecked`].
    pub fn pop_unchecked(&mut self, n: usize) -> &'a [u8] {
        let bytes = self.slice(n);
        self.advance(n);
        bytes
    }

    pub fn pop_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.pop_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Big-endian `u16`.
    pub fn pop_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.pop_array()?))
    }

    /// Big-endian `u32`.
    pub fn pop_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.pop_array()?))
    }

    /// Big-endian `u64`.
    pub fn pop_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.pop_array()?))
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left to read.
    pub fn len(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }
}
