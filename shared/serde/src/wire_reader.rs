use crate::{error::WireErr, serde::Serde};

/// Reads little-endian values from a byte slice, in the order they were
/// written.
pub struct WireReader<'b> {
    buffer: &'b [u8],
    position: usize,
}

impl<'b> WireReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.buffer.len()
    }

    pub fn read_bytes(&mut self, needed: usize) -> Result<&'b [u8], WireErr> {
        if needed > self.remaining() {
            return Err(WireErr::Underflow {
                needed,
                position: self.position,
                length: self.buffer.len(),
            });
        }
        let start = self.position;
        self.position += needed;
        Ok(&self.buffer[start..self.position])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireErr> {
        let mut output = [0u8; N];
        output.copy_from_slice(self.read_bytes(N)?);
        Ok(output)
    }

    pub fn read_u8(&mut self) -> Result<u8, WireErr> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Only an exact `1` reads as `true`
    pub fn read_bool(&mut self) -> Result<bool, WireErr> {
        Ok(self.read_u8()? == 1)
    }

    pub fn read_u16(&mut self) -> Result<u16, WireErr> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, WireErr> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, WireErr> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read<T: Serde>(&mut self) -> Result<T, WireErr> {
        T::de(self)
    }
}
