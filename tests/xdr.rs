use std::fmt::Debug;

use nfs_wire::xdr::{
    byte_length, deserialize, Decodable, Deserialize, Encodable, List, Serialize, XdrSize,
};

trait TestValue: Deserialize + Serialize + XdrSize + Eq + Default + Debug {}
impl<T: Deserialize + Serialize + XdrSize + Eq + Default + Debug> TestValue for T {}

/// Encodes `value`, checks the predicted size and the alignment, and decodes it back.
fn check<T: TestValue>(value: &T) -> Vec<u8> {
    let buf = value.encode().expect("cannot serialize");
    assert_eq!(buf.len(), value.packed_size());
    assert_eq!(buf.len() % 4, 0);
    assert_eq!(&T::decode(&buf).expect("cannot deserialize"), value);
    buf
}

#[test]
fn integers_are_big_endian() {
    assert_eq!(check(&0x0102_0304_u32), [1, 2, 3, 4]);
    assert_eq!(check(&-2_i32), [0xff, 0xff, 0xff, 0xfe]);
}

#[test]
fn hyper_keeps_all_64_bits() {
    let value = 0x0000_0001_0000_0002_u64;
    assert_eq!(check(&value), [0, 0, 0, 1, 0, 0, 0, 2]);
    check(&u64::MAX);
    check(&i64::MIN);
    assert_eq!(u64::decode(&[0x80, 0, 0, 0, 0, 0, 0, 1]).expect("decode"), (1 << 63) + 1);
}

#[test]
fn bool_decodes_any_nonzero_as_true() {
    assert_eq!(check(&true), [0, 0, 0, 1]);
    assert_eq!(check(&false), [0, 0, 0, 0]);
    assert!(bool::decode(&[0, 0, 0, 2]).expect("decode"));
    assert!(bool::decode(&[0xff, 0, 0, 0]).expect("decode"));
}

#[test]
fn opaque_is_padded_to_four_bytes() {
    for n in 0..=9 {
        let data = vec![0xab_u8; n];
        let buf = check(&data);
        assert_eq!(buf.len(), 4 + n + (4 - n % 4) % 4);
        assert_eq!(buf.len(), byte_length(n));
        assert_eq!(&buf[..4], (n as u32).to_be_bytes());
        assert!(buf[4 + n..].iter().all(|&b| b == 0), "padding must be zeros");
    }
}

#[test]
fn padding_value_is_ignored_on_read() {
    let buf = [0, 0, 0, 3, b'f', b'o', b'o', 0x7f];
    assert_eq!(String::decode(&buf).expect("decode"), "foo");
}

#[test]
fn string_is_length_prefixed() {
    let buf = check(&"foo".to_string());
    assert_eq!(buf, [0, 0, 0, 3, b'f', b'o', b'o', 0]);
    assert_eq!("foo".packed_size(), 8);
}

#[test]
fn invalid_utf8_string_is_rejected() {
    let buf = [0, 0, 0, 2, 0xc3, 0x28, 0, 0];
    let err = String::decode(&buf).expect_err("invalid UTF-8");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn truncated_opaque_is_an_error() {
    let buf = [0, 0, 0, 8, 1, 2, 3, 4];
    let err = Vec::<u8>::decode(&buf).expect_err("short opaque");
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

#[test]
fn fixed_opaque_has_no_length_prefix() {
    let verf = [1_u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(check(&verf), verf);
    let odd = [9_u8; 3];
    assert_eq!(check(&odd), [9, 9, 9, 0]);
}

#[test]
fn optional_value_has_a_bool_discriminant() {
    assert_eq!(check(&None::<u32>), [0, 0, 0, 0]);
    assert_eq!(check(&Some(7_u32)), [0, 0, 0, 1, 0, 0, 0, 7]);
}

#[test]
fn counted_array() {
    let values = vec![1_u32, 2, 3];
    let buf = check(&values);
    assert_eq!(&buf[..4], [0, 0, 0, 3]);
    assert_eq!(buf.len(), 16);
    check(&Vec::<u64>::new());
}

#[test]
fn linked_list_ends_with_false() {
    let list = List(vec![10_u32, 20]);
    let buf = check(&list);
    assert_eq!(buf, [0, 0, 0, 1, 0, 0, 0, 10, 0, 0, 0, 1, 0, 0, 0, 20, 0, 0, 0, 0]);
    assert_eq!(check(&List::<u32>::default()), [0, 0, 0, 0]);
}

#[test]
fn deserialize_consumes_exactly_one_value() {
    let mut buf = Vec::new();
    "ab".serialize(&mut buf).expect("serialize");
    5_u32.serialize(&mut buf).expect("serialize");
    let mut src = buf.as_slice();
    assert_eq!(deserialize::<String>(&mut src).expect("string"), "ab");
    assert_eq!(deserialize::<u32>(&mut src).expect("u32"), 5);
    assert!(src.is_empty());
}
