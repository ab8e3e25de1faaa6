//! SHA-256 hex digests (spec.md §4.1).
//!
//! Stateless: inputs are concatenated by the caller before being passed
//! here. No field separator is introduced by the hasher itself.

use sha2::{Digest, Sha256};

/// `sha256_hex(bytes) -> 64-hex`.
pub fn sha256_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(bytes.as_ref()))
}

/// `sha256_hex` over the concatenation of several byte slices, without
/// allocating an intermediate combined buffer.
pub fn sha256_hex_concat(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

/// Raw 32-byte digest, for callers that need the bytes rather than the hex
/// form — chiefly the ECDSA signing/recovery prehash.
pub fn sha256_bytes(bytes: impl AsRef<[u8]>) -> [u8; 32] {
    Sha256::digest(bytes.as_ref()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_matches_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(sha256_hex(b"hello"), sha256_hex(b"hello"));
    }

    #[test]
    fn concat_matches_manual_concatenation() {
        let manual = sha256_hex([b"foo".as_slice(), b"bar".as_slice()].concat());
        let concat = sha256_hex_concat(&[b"foo", b"bar"]);
        assert_eq!(manual, concat);
    }

    #[test]
    fn output_is_64_hex_chars() {
        let digest = sha256_hex(b"anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn bytes_and_hex_forms_agree() {
        assert_eq!(hex::encode(sha256_bytes(b"agreement")), sha256_hex(b"agreement"));
    }
}
