//! Decoding of the NUL-terminated byte strings UDisks2 uses for device paths.

pub(crate) fn decode_c_string_bytes(bytes: &[u8]) -> String {
    let raw = match bytes.split(|b| *b == 0).next() {
        Some(v) => v,
        None => bytes,
    };

    String::from_utf8_lossy(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_c_string_bytes_truncates_nul() {
        let bytes = b"/dev/sda\0garbage";
        assert_eq!(decode_c_string_bytes(bytes), "/dev/sda");
    }

    #[test]
    fn decode_c_string_bytes_handles_missing_terminator() {
        assert_eq!(decode_c_string_bytes(b"/dev/nvme0n1"), "/dev/nvme0n1");
        assert_eq!(decode_c_string_bytes(b""), "");
    }
}
