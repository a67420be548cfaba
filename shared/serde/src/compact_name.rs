use crate::{
    error::WireErr,
    serde::Serde,
    string::{read_utf16, write_utf16},
    wire_reader::WireReader,
    wire_writer::WireWriter,
};

const TAG_EMPTY: u8 = 0;
const TAG_GUID: u8 = 1;
const TAG_STRING: u8 = 2;

const GUID_HEX_LENGTH: usize = 32;
const GUID_BYTE_LENGTH: usize = 16;

/// An actor name in its wire form.
///
/// Most actor names are 32-digit lowercase hex GUIDs, which pack into 16 raw
/// bytes behind a one-byte tag. Anything else is written as a regular UTF-16
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CompactName(String);

impl CompactName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Writes a borrowed name without building a `CompactName` first
    pub fn ser_str(name: &str, writer: &mut WireWriter) -> Result<(), WireErr> {
        if name.is_empty() {
            return writer.write_u8(TAG_EMPTY);
        }
        if let Some(packed) = pack_guid(name) {
            writer.reserve(1 + GUID_BYTE_LENGTH)?;
            writer.write_u8(TAG_GUID)?;
            return writer.write_bytes(&packed);
        }
        let units = name.encode_utf16().count();
        writer.reserve(1 + 4 + 2 * units)?;
        writer.write_u8(TAG_STRING)?;
        write_utf16(writer, name)
    }

    pub fn byte_length_of(name: &str) -> usize {
        if name.is_empty() {
            1
        } else if pack_guid(name).is_some() {
            1 + GUID_BYTE_LENGTH
        } else {
            1 + 4 + 2 * name.encode_utf16().count()
        }
    }
}

impl Serde for CompactName {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        Self::ser_str(&self.0, writer)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        let position = reader.position();
        match reader.read_u8()? {
            TAG_EMPTY => Ok(Self(String::new())),
            TAG_GUID => {
                let bytes = reader.read_bytes(GUID_BYTE_LENGTH)?;
                Ok(Self(unpack_guid(bytes)))
            }
            TAG_STRING => Ok(Self(read_utf16(reader)?)),
            tag => Err(WireErr::InvalidNameTag { tag, position }),
        }
    }

    fn byte_length(&self) -> usize {
        Self::byte_length_of(&self.0)
    }
}

impl From<&str> for CompactName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CompactName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

fn pack_guid(name: &str) -> Option<[u8; GUID_BYTE_LENGTH]> {
    let digits = name.as_bytes();
    if digits.len() != GUID_HEX_LENGTH {
        return None;
    }
    let mut packed = [0u8; GUID_BYTE_LENGTH];
    for (byte, pair) in packed.iter_mut().zip(digits.chunks_exact(2)) {
        *byte = (hex_value(pair[0])? << 4) | hex_value(pair[1])?;
    }
    Some(packed)
}

fn unpack_guid(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut output = String::with_capacity(GUID_HEX_LENGTH);
    for byte in bytes {
        output.push(DIGITS[(byte >> 4) as usize] as char);
        output.push(DIGITS[(byte & 0x0F) as usize] as char);
    }
    output
}
