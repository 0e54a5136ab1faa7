use crate::{NumBytes, Read, ReadError, VarUint32, Write, WriteError, ensure_remaining, ensure_space};

macro_rules! fixed_width_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NumBytes for $ty {
                #[inline(always)]
                fn num_bytes(&self) -> usize {
                    core::mem::size_of::<$ty>()
                }
            }

            impl Read for $ty {
                #[inline(always)]
                fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
                    const SIZE: usize = core::mem::size_of::<$ty>();
                    ensure_remaining(bytes, *pos, SIZE)?;
                    let mut raw = [0u8; SIZE];
                    raw.copy_from_slice(&bytes[*pos..*pos + SIZE]);
                    *pos += SIZE;
                    Ok(<$ty>::from_le_bytes(raw))
                }
            }

            impl Write for $ty {
                #[inline(always)]
                fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
                    const SIZE: usize = core::mem::size_of::<$ty>();
                    ensure_space(bytes, *pos, SIZE)?;
                    bytes[*pos..*pos + SIZE].copy_from_slice(&self.to_le_bytes());
                    *pos += SIZE;
                    Ok(())
                }
            }
        )*
    };
}

fixed_width_le!(u8, i8, u16, i16, u32, i32, u64, i64);

impl NumBytes for bool {
    #[inline(always)]
    fn num_bytes(&self) -> usize {
        core::mem::size_of::<u8>()
    }
}

impl Read for bool {
    #[inline(always)]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        match u8::read(bytes, pos)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ReadError::ParseError(format!(
                "invalid bool byte {other:#04x}"
            ))),
        }
    }
}

impl Write for bool {
    #[inline(always)]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        u8::from(*self).write(bytes, pos)
    }
}

/// Read a varint length prefix.
#[inline(always)]
pub(crate) fn read_len(bytes: &[u8], pos: &mut usize) -> Result<usize, ReadError> {
    VarUint32::read(bytes, pos).map(|len| len.0 as usize)
}

/// Write a varint length prefix, failing if it does not fit in 32 bits.
#[inline(always)]
pub(crate) fn write_len(len: usize, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
    VarUint32::try_from(len)?.write(bytes, pos)
}

#[inline(always)]
pub(crate) fn len_num_bytes(len: usize) -> usize {
    VarUint32(len as u32).num_bytes()
}

impl NumBytes for String {
    #[inline(always)]
    fn num_bytes(&self) -> usize {
        len_num_bytes(self.len()) + self.len()
    }
}

impl Read for String {
    #[inline(always)]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        let len = read_len(bytes, pos)?;
        ensure_remaining(bytes, *pos, len)?;

        let str_bytes = &bytes[*pos..*pos + len];
        *pos += len;

        match core::str::from_utf8(str_bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(ReadError::InvalidUtf8),
        }
    }
}

impl Write for String {
    #[inline(always)]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        write_len(self.len(), bytes, pos)?;
        ensure_space(bytes, *pos, self.len())?;
        bytes[*pos..*pos + self.len()].copy_from_slice(self.as_bytes());
        *pos += self.len();
        Ok(())
    }
}

impl<T: NumBytes> NumBytes for Option<T> {
    #[inline(always)]
    fn num_bytes(&self) -> usize {
        match self {
            Some(value) => 1 + value.num_bytes(),
            None => 1,
        }
    }
}

impl<T: Read> Read for Option<T> {
    #[inline(always)]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        let is_some = bool::read(bytes, pos)?;
        if is_some {
            let value = T::read(bytes, pos)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }
}

impl<T: Write> Write for Option<T> {
    #[inline(always)]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        self.is_some().write(bytes, pos)?;
        if let Some(value) = self {
            value.write(bytes, pos)?;
        }
        Ok(())
    }
}

impl<T: NumBytes> NumBytes for Vec<T> {
    #[inline(always)]
    fn num_bytes(&self) -> usize {
        let mut count = len_num_bytes(self.len());
        for item in self {
            count += item.num_bytes();
        }
        count
    }
}

impl<T: Read> Read for Vec<T> {
    #[inline(always)]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        let len = read_len(bytes, pos)?;

        // every element occupies at least one byte
        ensure_remaining(bytes, *pos, len)?;

        let mut vec = Vec::with_capacity(len);
        for _ in 0..len {
            vec.push(T::read(bytes, pos)?);
        }
        Ok(vec)
    }
}

impl<T: Write> Write for Vec<T> {
    #[inline(always)]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        write_len(self.len(), bytes, pos)?;
        for item in self.iter() {
            item.write(bytes, pos)?;
        }
        Ok(())
    }
}

impl<T1: NumBytes, T2: NumBytes> NumBytes for (T1, T2) {
    #[inline(always)]
    fn num_bytes(&self) -> usize {
        self.0.num_bytes() + self.1.num_bytes()
    }
}

impl<T1: Read, T2: Read> Read for (T1, T2) {
    #[inline(always)]
    fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, ReadError> {
        let first = T1::read(bytes, pos)?;
        let second = T2::read(bytes, pos)?;
        Ok((first, second))
    }
}

impl<T1: Write, T2: Write> Write for (T1, T2) {
    #[inline(always)]
    fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), WriteError> {
        self.0.write(bytes, pos)?;
        self.1.write(bytes, pos)?;
        Ok(())
    }
}
