use crate::{error::WireErr, wire_reader::WireReader, wire_writer::WireWriter};

/// The owned buffer a host hands to the runtime each tick.
///
/// Capacity is fixed when the buffer is created. The host loads its inbound
/// sections, the runtime reads them, and then the runtime rewrites the buffer
/// with its outbound section.
pub struct FrameBuffer {
    bytes: Box<[u8]>,
    len: usize,
}

impl FrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid bytes: whatever was last loaded or rewritten
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Copies `input` into the buffer, replacing its contents. Input larger
    /// than the capacity is refused and the previous contents are kept.
    pub fn load(&mut self, input: &[u8]) -> Result<(), WireErr> {
        if input.len() > self.bytes.len() {
            return Err(WireErr::Overflow {
                needed: input.len(),
                position: 0,
                capacity: self.bytes.len(),
            });
        }
        self.bytes[..input.len()].copy_from_slice(input);
        self.len = input.len();
        Ok(())
    }

    pub fn reader(&self) -> WireReader<'_> {
        WireReader::new(self.as_bytes())
    }

    /// Resets the buffer and writes new contents with `write`. The written
    /// length is only committed when `write` succeeds; on failure the buffer
    /// is left empty.
    pub fn rewrite<E, F>(&mut self, write: F) -> Result<usize, E>
    where
        E: From<WireErr>,
        F: FnOnce(&mut WireWriter<'_>) -> Result<(), E>,
    {
        self.len = 0;
        let written = {
            let mut writer = WireWriter::new(&mut self.bytes);
            write(&mut writer)?;
            writer.position()
        };
        self.len = written;
        Ok(written)
    }
}
