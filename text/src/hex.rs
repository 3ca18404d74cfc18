use crate::BoundedText;

/// Bytes encoded per pass through the stack buffer.
const CHUNK: usize = 32;

/// Append `bytes` as uppercase hex. Returns false if the output was cut.
pub fn write_hex<const N: usize>(bytes: &[u8], out: &mut BoundedText<N>) -> bool {
    let mut buf = [0u8; CHUNK * 2];
    for chunk in bytes.chunks(CHUNK) {
        let encoded = &mut buf[..chunk.len() * 2];
        if ::hex::encode_to_slice(chunk, encoded).is_err() {
            return false;
        }
        encoded.make_ascii_uppercase();
        let Ok(text) = std::str::from_utf8(encoded) else {
            return false;
        };
        if !out.push_str(text) {
            return false;
        }
    }
    true
}
