use std::io::{Read, Write};

/// Every XDR item occupies a multiple of four bytes.
pub const ALIGNMENT: usize = 4;

/// Number of zero bytes that follow `src_len` bytes of opaque data.
pub fn padding_len(src_len: usize) -> usize {
    (ALIGNMENT - (src_len % ALIGNMENT)) % ALIGNMENT
}

/// Encoded size of a variable-length opaque or string of `len` bytes:
/// the 4-byte length prefix plus the data rounded up to the alignment.
pub fn byte_length(len: usize) -> usize {
    4 + len + padding_len(len)
}

pub fn read_padding(src_len: usize, src: &mut impl Read) -> std::io::Result<()> {
    let pad_len = padding_len(src_len);
    if pad_len > 0 {
        let mut padding_buffer: [u8; ALIGNMENT] = Default::default();
        src.read_exact(&mut padding_buffer[..pad_len])?;
    }
    Ok(())
}

pub fn write_padding(src_len: usize, dest: &mut impl Write) -> std::io::Result<()> {
    let pad_len = padding_len(src_len);
    if pad_len > 0 {
        let padding_buffer: [u8; ALIGNMENT] = Default::default();
        dest.write_all(&padding_buffer[..pad_len])?;
    }
    Ok(())
}

pub fn invalid_data(m: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding() {
        assert_eq!(padding_len(0), 0);
        assert_eq!(padding_len(1), 3);
        assert_eq!(padding_len(2), 2);
        assert_eq!(padding_len(3), 1);
        assert_eq!(padding_len(4), 0);
        assert_eq!(padding_len(5), 3);
    }

    #[test]
    fn opaque_byte_length() {
        assert_eq!(byte_length(0), 4);
        assert_eq!(byte_length(1), 8);
        assert_eq!(byte_length(4), 8);
        assert_eq!(byte_length(5), 12);
        assert_eq!(byte_length(64), 68);
    }

    #[test]
    fn write_then_read_padding() {
        let mut buf = Vec::new();
        write_padding(5, &mut buf).expect("write padding");
        assert_eq!(buf, vec![0, 0, 0]);

        let mut src = buf.as_slice();
        read_padding(5, &mut src).expect("read padding");
        assert!(src.is_empty());
    }

    #[test]
    fn short_padding_is_an_error() {
        let mut src: &[u8] = &[0];
        assert!(read_padding(1, &mut src).is_err());
    }
}
