use serde::{Deserialize, Serialize};

use crate::{NumBytes, Read, ReadError, Write, WriteError, ensure_space};

/// Unsigned LEB128 integer limited to 32 bits (at most 5 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarUint32(pub u32);

/// Unsigned LEB128 integer limited to 64 bits (at most 10 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarUint64(pub u64);

#[inline(always)]
fn leb128_len(v: u64) -> usize {
    if v == 0 {
        return 1;
    }
    let bits = 64 - v.leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decode at most `max_bytes` groups; the last group may only carry `last_bits` payload bits.
#[inline(always)]
fn read_leb128(
    bytes: &[u8],
    pos: &mut usize,
    max_bytes: usize,
    last_bits: u32,
) -> Result<u64, ReadError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;

    for i in 0..max_bytes {
        if *pos >= bytes.len() {
            return Err(ReadError::TruncatedInput { pos: *pos, needed: 1 });
        }
        let byte = bytes[*pos];
        *pos += 1;

        let low7 = (byte & 0x7F) as u64;
        if i == max_bytes - 1 && (low7 >> last_bits) != 0 {
            return Err(ReadError::MalformedVarint);
        }

        result |= low7 << shift;

        if (byte & 0x80) == 0 {
            return Ok(result);
        }
        shift += 7;
    }

    // continuation bit still set on the final permitted byte
    Err(ReadError::MalformedVarint)
}

#[inline(always)]
fn write_leb128(mut v: u64, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
    // preflight so we either write everything or nothing
    ensure_space(bytes, *pos, leb128_len(v))?;
    loop {
        let mut b = (v & 0x7F) as u8;
        v >>= 7;
        if v != 0 {
            b |= 0x80;
        }
        bytes[*pos] = b;
        *pos += 1;
        if v == 0 {
            return Ok(());
        }
    }
}

impl NumBytes for VarUint32 {
    #[inline(always)]
    fn num_bytes(&self) -> usize {
        leb128_len(self.0 as u64)
    }
}

impl Read for VarUint32 {
    #[inline(always)]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        read_leb128(bytes, pos, 5, 4).map(|v| VarUint32(v as u32))
    }
}

impl Write for VarUint32 {
    #[inline(always)]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        write_leb128(self.0 as u64, bytes, pos)
    }
}

impl NumBytes for VarUint64 {
    #[inline(always)]
    fn num_bytes(&self) -> usize {
        leb128_len(self.0)
    }
}

impl Read for VarUint64 {
    #[inline(always)]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        read_leb128(bytes, pos, 10, 1).map(VarUint64)
    }
}

impl Write for VarUint64 {
    #[inline(always)]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        write_leb128(self.0, bytes, pos)
    }
}

impl TryFrom<usize> for VarUint32 {
    type Error = WriteError;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        u32::try_from(v)
            .map(VarUint32)
            .map_err(|_| WriteError::ValueOutOfRange(format!("length {v} exceeds u32")))
    }
}

impl From<u32> for VarUint32 {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<u16> for VarUint32 {
    fn from(v: u16) -> Self {
        Self(v.into())
    }
}

impl From<u8> for VarUint32 {
    fn from(v: u8) -> Self {
        Self(v.into())
    }
}

impl From<u64> for VarUint64 {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<VarUint32> for VarUint64 {
    fn from(v: VarUint32) -> Self {
        Self(v.0 as u64)
    }
}
