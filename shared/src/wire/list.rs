use brainstem_serde::{ConstByteLength, Serde, WireErr, WireReader, WireWriter};

use crate::wire::error::ProtocolError;

/// Writes `u16 count` followed by each item
pub fn write_short_list<T: Serde>(writer: &mut WireWriter, items: &[T]) -> Result<(), WireErr> {
    let count = u16::try_from(items.len()).map_err(|_| WireErr::LengthTooLarge {
        length: items.len(),
        max: u16::MAX as usize,
    })?;
    writer.write_u16(count)?;
    for item in items {
        item.ser(writer)?;
    }
    Ok(())
}

pub fn read_short_list<T: Serde>(reader: &mut WireReader) -> Result<Vec<T>, WireErr> {
    let count = reader.read_u16()?;
    let mut items = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        items.push(T::de(reader)?);
    }
    Ok(items)
}

/// Writes `i32 count`, each item, then the section's sanity marker
pub fn write_marked_list<T: Serde>(
    writer: &mut WireWriter,
    items: &[T],
    marker: i32,
) -> Result<(), WireErr> {
    let count = i32::try_from(items.len()).map_err(|_| WireErr::LengthTooLarge {
        length: items.len(),
        max: i32::MAX as usize,
    })?;
    writer.write_i32(count)?;
    for item in items {
        item.ser(writer)?;
    }
    writer.write_i32(marker)
}

pub fn read_marked_list<T: Serde + ConstByteLength>(
    reader: &mut WireReader,
    section: &'static str,
    marker: i32,
) -> Result<Vec<T>, ProtocolError> {
    let count = reader.read_i32()?;
    if count < 0 {
        return Err(ProtocolError::NegativeCount { section, count });
    }
    // a corrupt count must not turn into a huge allocation
    let plausible = reader.remaining() / T::const_byte_length().max(1);
    let mut items = Vec::with_capacity((count as usize).min(plausible));
    for _ in 0..count {
        items.push(T::de(reader)?);
    }
    let found = reader.read_i32()?;
    if found != marker {
        return Err(ProtocolError::SanityMismatch {
            section,
            expected: marker,
            found,
        });
    }
    Ok(items)
}
