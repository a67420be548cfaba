use crate::{error::WireErr, serde::Serde, wire_reader::WireReader, wire_writer::WireWriter};

// Strings travel as an i32 count of UTF-16 code units followed by the units.

impl Serde for String {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_utf16(writer, self)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        read_utf16(reader)
    }

    fn byte_length(&self) -> usize {
        4 + 2 * self.encode_utf16().count()
    }
}

pub(crate) fn write_utf16(writer: &mut WireWriter, value: &str) -> Result<(), WireErr> {
    let units = value.encode_utf16().count();
    let prefix = i32::try_from(units).map_err(|_| WireErr::LengthTooLarge {
        length: units,
        max: i32::MAX as usize,
    })?;
    writer.reserve(4 + 2 * units)?;
    writer.write_i32(prefix)?;
    for unit in value.encode_utf16() {
        writer.write_u16(unit)?;
    }
    Ok(())
}

pub(crate) fn read_utf16(reader: &mut WireReader) -> Result<String, WireErr> {
    let position = reader.position();
    let length = reader.read_i32()?;
    if length < 0 {
        return Err(WireErr::NegativeLength { length, position });
    }
    let bytes = reader.read_bytes(2 * length as usize)?;
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| WireErr::InvalidUtf16 {
            position: reader.position(),
        })
}
