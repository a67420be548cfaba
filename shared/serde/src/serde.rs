use crate::{error::WireErr, wire_reader::WireReader, wire_writer::WireWriter};

/// A type which can be written to and read back from a wire frame
pub trait Serde: Sized {
    /// Append the value to the writer
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr>;

    /// Consume a value from the reader
    fn de(reader: &mut WireReader) -> Result<Self, WireErr>;

    /// Number of bytes `ser` will append for this value
    fn byte_length(&self) -> usize;
}

/// A type whose encoding always has the same size
pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}
