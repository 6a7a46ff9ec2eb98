//! XDR is a standard for the description and encoding of data.
//! It is useful for transferring data between different computer
//! architectures, and it has been used to communicate data between such
//! diverse machines as the SUN WORKSTATION*, VAX*, IBM-PC*, and Cray*
//!
//! <https://datatracker.ietf.org/doc/html/rfc4506>
//!
//! Its Rust-specific implementation is presented below.
//! Where appropriate, the standard types of the XDR language have
//! been replaced by similar types of the Rust language. For example,
//! the 32-bit `Integer` type was replaced by the `i32` type, and the
//! `opaque<>` type was replaced by `[u8]`.
//!
//! Every value that can be written also knows its exact encoded size
//! ([`XdrSize`]). Replies and calls are encoded into a buffer allocated once
//! from that size, and [`Encodable::encode`] refuses to hand out a buffer whose
//! length disagrees with the prediction.

use std::io::{Read, Write};

use byteorder::BigEndian;
use byteorder::{ReadBytesExt, WriteBytesExt};
use num_traits::{FromPrimitive, ToPrimitive};

pub mod mount;
pub mod nfs3;
pub mod portmap;
pub mod rpc;
mod utils;

pub use utils::{byte_length, padding_len, ALIGNMENT};

/// XDR assumes big endian encoding.
pub type XDREndian = BigEndian;

pub trait Serialize {
    /// Serializes the implementing type to the provided writer.
    ///
    /// ## Parameters
    /// * `dest` - Where will the value be serialized to.
    ///
    /// ## Returns
    /// * `std::io::Result<()>` - Ok(()) on success, or an error if serialization fails.
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()>;
}

pub trait Deserialize {
    /// Deserializes data from the provided reader into the implementing type.
    ///
    /// ## Parameters
    /// * `src` - From where the value will be deserialized.
    ///
    /// ## Returns
    /// * `std::io::Result<()>` - Ok(()) on success, or an error if deserialization fails.
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()>;
}

/// Exact number of bytes [`Serialize::serialize`] writes for a value,
/// padding included.
pub trait XdrSize {
    fn packed_size(&self) -> usize;
}

/// Deserialization based on the [Default] trait of the type T.
///
/// # Parameters
/// * src - From where the value will be deserialized
///
/// # Returns
/// * `std::io::Result<()>` - Ok(()) on success, or an error if deserialization fails.
pub fn deserialize<T>(src: &mut impl Read) -> std::io::Result<T>
where
    T: Deserialize + Default,
{
    let mut val = T::default();
    val.deserialize(src)?;

    Ok(val)
}

/// Appends `value` to `dest`, checking that exactly `packed_size()` bytes were written.
///
/// # Panics
///
/// Panics when the written length disagrees with [`XdrSize::packed_size`].
/// Such a value would produce a malformed frame on the wire.
pub fn write_sized<T>(value: &T, dest: &mut Vec<u8>) -> std::io::Result<()>
where
    T: Serialize + XdrSize + ?Sized,
{
    let start = dest.len();
    let expected = value.packed_size();
    value.serialize(dest)?;
    let written = dest.len() - start;
    assert_eq!(
        written, expected,
        "XDR length mismatch: packed_size() predicted {expected} bytes, serialize() wrote {written}"
    );
    Ok(())
}

/// Values that can be turned into a standalone XDR byte buffer.
pub trait Encodable: Serialize + XdrSize {
    /// Encodes the value into a buffer sized up front from `packed_size()`.
    fn encode(&self) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.packed_size());
        write_sized(self, &mut buf)?;
        Ok(buf)
    }
}

impl<T: Serialize + XdrSize + ?Sized> Encodable for T {}

/// Values that can be parsed back from a fully buffered XDR byte slice.
pub trait Decodable: Deserialize + Default {
    fn decode(bytes: &[u8]) -> std::io::Result<Self> {
        let mut src = bytes;
        deserialize::<Self>(&mut src)
    }
}

impl<T: Deserialize + Default> Decodable for T {}

/// Marker trait for XDR `enum` type serialization.
pub trait SerializeEnum: ToPrimitive {}

/// Enumerations have the same representation as signed integers.
impl<T: SerializeEnum> Serialize for T {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        if let Some(val) = self.to_i32() {
            return dest.write_i32::<XDREndian>(val);
        }
        Err(utils::invalid_data("Invalid enum value"))
    }
}

impl<T: SerializeEnum> XdrSize for T {
    fn packed_size(&self) -> usize {
        4
    }
}

/// Marker trait for XDR `enum` type deserialization.
pub trait DeserializeEnum: FromPrimitive {}

/// Enumerations have the same representation as signed integers.
impl<T: DeserializeEnum> Deserialize for T {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let val = src.read_i32::<XDREndian>()?;
        if let Some(val) = FromPrimitive::from_i32(val) {
            *self = val;
            return Ok(());
        }

        Err(utils::invalid_data(&format!("Invalid enum value {val}")))
    }
}

/// XDR `bool` type serialization implementation.
///
/// `bool` is an `enum { FALSE = 0, TRUE = 1 }`, i.e. it travels as an `i32`.
impl Serialize for bool {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_i32::<XDREndian>(i32::from(*self))
    }
}

/// XDR `bool` type deserialization implementation.
///
/// Any nonzero discriminant reads as `true`.
impl Deserialize for bool {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_i32::<XDREndian>()? != 0;
        Ok(())
    }
}

impl XdrSize for bool {
    fn packed_size(&self) -> usize {
        4
    }
}

/// XDR `int` type serialization implementation.
impl Serialize for i32 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_i32::<XDREndian>(*self)
    }
}

/// XDR `int` type deserialization implementation.
impl Deserialize for i32 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_i32::<XDREndian>()?;
        Ok(())
    }
}

impl XdrSize for i32 {
    fn packed_size(&self) -> usize {
        4
    }
}

/// XDR `hyper` type serialization implementation.
impl Serialize for i64 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_i64::<XDREndian>(*self)
    }
}

/// XDR `hyper` type deserialization implementation.
impl Deserialize for i64 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_i64::<XDREndian>()?;
        Ok(())
    }
}

impl XdrSize for i64 {
    fn packed_size(&self) -> usize {
        8
    }
}

/// XDR `unsigned int` type serialization implementation.
impl Serialize for u32 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_u32::<XDREndian>(*self)
    }
}

/// XDR `unsigned int` type deserialization implementation.
impl Deserialize for u32 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_u32::<XDREndian>()?;
        Ok(())
    }
}

impl XdrSize for u32 {
    fn packed_size(&self) -> usize {
        4
    }
}

/// XDR `unsigned hyper` type serialization implementation.
impl Serialize for u64 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_u64::<XDREndian>(*self)
    }
}

/// XDR `unsigned hyper` type deserialization implementation.
impl Deserialize for u64 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = src.read_u64::<XDREndian>()?;
        Ok(())
    }
}

impl XdrSize for u64 {
    fn packed_size(&self) -> usize {
        8
    }
}

/// XDR `void`.
impl Serialize for () {
    fn serialize<W: Write>(&self, _dest: &mut W) -> std::io::Result<()> {
        Ok(())
    }
}

impl Deserialize for () {
    fn deserialize<R: Read>(&mut self, _src: &mut R) -> std::io::Result<()> {
        Ok(())
    }
}

impl XdrSize for () {
    fn packed_size(&self) -> usize {
        0
    }
}

/// XDR Fixed-Length Opaque Data serialization implementation.
///
/// ```text
/// opaque identifier[n];
/// ```
impl<const N: usize> Serialize for [u8; N] {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        dest.write_all(self)?;
        utils::write_padding(N, dest)?;

        Ok(())
    }
}

/// XDR Fixed-Length Opaque Data deserialization implementation.
impl<const N: usize> Deserialize for [u8; N] {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        src.read_exact(self)?;
        utils::read_padding(N, src)?;

        Ok(())
    }
}

impl<const N: usize> XdrSize for [u8; N] {
    fn packed_size(&self) -> usize {
        N + padding_len(N)
    }
}

/// Object lengths in XDR are always serialized as [u32]. This wrapper
/// type provides a way to serialize the [usize] type common to Rust as [u32].
#[derive(Default)]
struct UsizeAsU32(usize);

/// Try to convert [usize] to [u32] and serialize.
impl Serialize for UsizeAsU32 {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        let Some(val) = self.0.to_u32() else {
            return Err(utils::invalid_data("cannot cast `usize` to `u32`"));
        };

        val.serialize(dest)
    }
}

/// Try to deserialize [u32] and convert to [usize].
impl Deserialize for UsizeAsU32 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let Some(val) = deserialize::<u32>(src)?.to_usize() else {
            return Err(utils::invalid_data("cannot cast `u32` to `usize`"));
        };

        self.0 = val;
        Ok(())
    }
}

/// XDR Variable-Length Opaque Data serialization implementation.
impl Serialize for [u8] {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        UsizeAsU32(self.len()).serialize(dest)?;
        dest.write_all(self)?;
        utils::write_padding(self.len(), dest)?;

        Ok(())
    }
}

impl XdrSize for [u8] {
    fn packed_size(&self) -> usize {
        byte_length(self.len())
    }
}

impl Serialize for Vec<u8> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.as_slice().serialize(dest)
    }
}

impl XdrSize for Vec<u8> {
    fn packed_size(&self) -> usize {
        byte_length(self.len())
    }
}

/// XDR Variable-Length Opaque Data deserialization implementation.
impl Deserialize for Vec<u8> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let length = deserialize::<UsizeAsU32>(src)?.0;
        self.clear();
        // grow with the data actually read so a forged length cannot force a huge allocation
        let read = src.take(length as u64).read_to_end(self)?;
        if read != length {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("opaque data truncated: expected {length} bytes, got {read}"),
            ));
        }
        utils::read_padding(length, src)?;

        Ok(())
    }
}

/// XDR String serialization implementation.
impl Serialize for str {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.as_bytes().serialize(dest)
    }
}

impl XdrSize for str {
    fn packed_size(&self) -> usize {
        byte_length(self.len())
    }
}

impl Serialize for String {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.as_bytes().serialize(dest)
    }
}

impl XdrSize for String {
    fn packed_size(&self) -> usize {
        byte_length(self.len())
    }
}

/// XDR String deserialization implementation.
impl Deserialize for String {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let bytes = deserialize::<Vec<u8>>(src)?;
        *self = String::from_utf8(bytes).map_err(|_| utils::invalid_data("Not UTF-8 string"))?;
        Ok(())
    }
}

/// XDR counted array serialization implementation.
///
/// Serialized as a 4-byte length prefix followed by that many elements.
impl<T: Serialize> Serialize for [T] {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        UsizeAsU32(self.len()).serialize(dest)?;
        for i in self {
            i.serialize(dest)?;
        }

        Ok(())
    }
}

impl<T: Serialize> Serialize for Vec<T> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.as_slice().serialize(dest)
    }
}

impl<T: XdrSize> XdrSize for Vec<T> {
    fn packed_size(&self) -> usize {
        4 + self.iter().map(XdrSize::packed_size).sum::<usize>()
    }
}

impl<T: Deserialize + Default> Deserialize for Vec<T> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        let length = deserialize::<UsizeAsU32>(src)?.0;
        self.clear();
        for _ in 0..length {
            self.push(deserialize::<T>(src)?);
        }
        Ok(())
    }
}

// XDR Optional-Data serialization implementation.
impl<T: Serialize> Serialize for Option<T> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            Some(data) => {
                true.serialize(dest)?;
                data.serialize(dest)?;

                Ok(())
            }
            None => false.serialize(dest),
        }
    }
}

// XDR Optional-Data deserialization implementation.
impl<T: Deserialize + Default> Deserialize for Option<T> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        if deserialize::<bool>(src)? {
            *self = Some(deserialize::<T>(src)?);
        } else {
            *self = None;
        }

        Ok(())
    }
}

impl<T: XdrSize> XdrSize for Option<T> {
    fn packed_size(&self) -> usize {
        4 + self.as_ref().map_or(0, XdrSize::packed_size)
    }
}

/// XDR optional-data linked list, e.g. `entry3 *entries` in READDIR.
///
/// ```text
/// struct entry { T item; entry *next; };
/// ```
///
/// Every element is preceded by a `TRUE` discriminant and the list ends
/// with a single `FALSE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List<T>(pub Vec<T>);

impl<T> Default for List<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        for item in &self.0 {
            true.serialize(dest)?;
            item.serialize(dest)?;
        }
        false.serialize(dest)
    }
}

impl<T: Deserialize + Default> Deserialize for List<T> {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.0.clear();
        while deserialize::<bool>(src)? {
            self.0.push(deserialize::<T>(src)?);
        }
        Ok(())
    }
}

impl<T: XdrSize> XdrSize for List<T> {
    fn packed_size(&self) -> usize {
        self.0.iter().map(|item| 4 + item.packed_size()).sum::<usize>() + 4
    }
}

/// Macro for implementing XDR serialization for structs.
///
/// Serializes each listed field in sequence.
#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! SerializeStruct {
    (
        $t:ident,
        $($element:ident),*
    ) => {
        impl $crate::xdr::Serialize for $t {
            fn serialize<W: std::io::Write>(&self, dest: &mut W) -> std::io::Result<()> {
                $($crate::xdr::Serialize::serialize(&self.$element, dest)?;)*
                Ok(())
            }
        }
    };
}

#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! DeserializeStruct {
    (
        $t:ident,
        $($element:ident),*
    ) => {
        impl $crate::xdr::Deserialize for $t {
            fn deserialize<R: std::io::Read>(&mut self, src: &mut R) -> std::io::Result<()> {
                $($crate::xdr::Deserialize::deserialize(&mut self.$element, src)?;)*
                Ok(())
            }
        }
    };
}

/// Sums the encoded sizes of the listed fields.
#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! XdrSizeStruct {
    (
        $t:ident,
        $($element:ident),*
    ) => {
        impl $crate::xdr::XdrSize for $t {
            fn packed_size(&self) -> usize {
                0 $(+ $crate::xdr::XdrSize::packed_size(&self.$element))*
            }
        }
    };
}

/// Implements all three codec traits for a struct in field order.
#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! XdrStruct {
    (
        $t:ident,
        $($element:ident),*
    ) => {
        $crate::SerializeStruct!($t, $($element),*);
        $crate::DeserializeStruct!($t, $($element),*);
        $crate::XdrSizeStruct!($t, $($element),*);
    };
}

/// Marks a `num-derive` enum as an XDR `enum` for serialization.
#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! SerializeEnum {
    ($t:ident) => {
        impl $crate::xdr::SerializeEnum for $t {}
    };
}

/// Marks a `num-derive` enum as an XDR `enum` for deserialization.
#[allow(non_camel_case_types)]
#[macro_export]
macro_rules! DeserializeEnum {
    ($t:ident) => {
        impl $crate::xdr::DeserializeEnum for $t {}
    };
}

// Re-export public types for use in other modules
pub use crate::DeserializeStruct;
pub use crate::SerializeStruct;
pub use crate::XdrSizeStruct;
pub use crate::XdrStruct;
