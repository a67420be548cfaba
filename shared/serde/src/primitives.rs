use crate::{
    error::WireErr,
    serde::{ConstByteLength, Serde},
    wire_reader::WireReader,
    wire_writer::WireWriter,
};

macro_rules! impl_serde_for_fixed {
    ($type:ty, $size:expr, $write:ident, $read:ident) => {
        impl Serde for $type {
            fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
                writer.$write(*self)
            }

            fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
                reader.$read()
            }

            fn byte_length(&self) -> usize {
                $size
            }
        }

        impl ConstByteLength for $type {
            fn const_byte_length() -> usize {
                $size
            }
        }
    };
}

impl_serde_for_fixed!(u8, 1, write_u8, read_u8);
impl_serde_for_fixed!(bool, 1, write_bool, read_bool);
impl_serde_for_fixed!(u16, 2, write_u16, read_u16);
impl_serde_for_fixed!(i32, 4, write_i32, read_i32);
impl_serde_for_fixed!(f32, 4, write_f32, read_f32);
