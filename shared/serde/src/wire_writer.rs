use crate::{error::WireErr, serde::Serde};

/// Writes little-endian values into a fixed-capacity buffer.
///
/// A write that does not fit fails with [`WireErr::Overflow`] and leaves the
/// position where it was.
pub struct WireWriter<'b> {
    buffer: &'b mut [u8],
    position: usize,
}

impl<'b> WireWriter<'b> {
    pub fn new(buffer: &'b mut [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Bytes written so far
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.position]
    }

    /// Fails unless `needed` more bytes fit in the buffer
    pub fn reserve(&self, needed: usize) -> Result<(), WireErr> {
        if needed > self.remaining() {
            return Err(WireErr::Overflow {
                needed,
                position: self.position,
                capacity: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), WireErr> {
        self.reserve(bytes.len())?;
        let end = self.position + bytes.len();
        self.buffer[self.position..end].copy_from_slice(bytes);
        self.position = end;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), WireErr> {
        self.write_bytes(&[value])
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), WireErr> {
        self.write_u8(u8::from(value))
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), WireErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), WireErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), WireErr> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write<T: Serde>(&mut self, value: &T) -> Result<(), WireErr> {
        value.ser(self)
    }
}
