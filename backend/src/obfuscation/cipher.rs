//! Toy ciphers: repeating-key XOR and alphabetic rotation.

use super::encoding::{base64_decode_bytes, base64_encode};
use super::ObfuscationError;

/// Byte-wise XOR against `key` repeated to the length of `data`.
///
/// Self-inverse for a fixed key. An empty key leaves `data` unchanged.
pub fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .zip(key.iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect()
}

/// `base64(xor(data, key))`.
pub fn obfuscate(data: &str, key: &str) -> String {
    base64_encode(xor(data.as_bytes(), key.as_bytes()))
}

pub fn deobfuscate(encoded: &str, key: &str) -> Result<String, ObfuscationError> {
    let bytes = base64_decode_bytes(encoded)?;
    String::from_utf8(xor(&bytes, key.as_bytes())).map_err(|_| ObfuscationError::InvalidUtf8)
}

/// Rotates ASCII letters by `shift`, preserving case. Everything else,
/// including non-ASCII letters, passes through.
pub fn caesar_encrypt(text: &str, shift: i32) -> String {
    let shift = shift.rem_euclid(26) as u8;
    text.chars().map(|c| rotate(c, shift)).collect()
}

pub fn caesar_decrypt(text: &str, shift: i32) -> String {
    caesar_encrypt(text, 26 - shift.rem_euclid(26))
}

pub fn rot13(text: &str) -> String {
    caesar_encrypt(text, 13)
}

fn rotate(c: char, shift: u8) -> char {
    let base = match c {
        'a'..='z' => b'a',
        'A'..='Z' => b'A',
        _ => return c,
    };
    (((c as u8 - base + shift) % 26) + base) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn xor_known_vector() {
        assert_eq!(xor(b"abc", b"\x01"), b"`cb".to_vec());
        assert_eq!(xor(b"data", b""), b"data".to_vec());
    }

    #[test]
    fn caesar_known_vectors() {
        assert_eq!(caesar_encrypt("Hello, World!", 3), "Khoor, Zruog!");
        assert_eq!(caesar_decrypt("Khoor, Zruog!", 3), "Hello, World!");
        assert_eq!(caesar_encrypt("xyz", 29), "abc");
        assert_eq!(caesar_encrypt("abc", -1), "zab");
        assert_eq!(caesar_encrypt("Nagari 2024 ü", 26), "Nagari 2024 ü");
    }

    #[test]
    fn rot13_known_vector() {
        assert_eq!(rot13("Nagari"), "Antnev");
    }

    #[test]
    fn deobfuscate_rejects_bad_base64() {
        assert_eq!(deobfuscate("not base64!", "k"), Err(ObfuscationError::InvalidBase64));
    }

    #[test]
    fn obfuscated_text_differs_from_input() {
        let hidden = obfuscate("warga@nagari.id", "kunci");
        assert_ne!(hidden, "warga@nagari.id");
        assert_eq!(deobfuscate(&hidden, "kunci").unwrap(), "warga@nagari.id");
    }

    proptest! {
        #[test]
        fn obfuscation_round_trips(data in ".*", key in ".+") {
            prop_assert_eq!(deobfuscate(&obfuscate(&data, &key), &key).unwrap(), data);
        }

        #[test]
        fn xor_is_self_inverse(data in proptest::collection::vec(any::<u8>(), 0..64), key in proptest::collection::vec(any::<u8>(), 1..8)) {
            prop_assert_eq!(xor(&xor(&data, &key), &key), data);
        }

        #[test]
        fn caesar_round_trips(text in ".*", shift in any::<i32>()) {
            prop_assert_eq!(caesar_decrypt(&caesar_encrypt(&text, shift), shift), text);
        }

        #[test]
        fn rot13_is_self_inverse(text in ".*") {
            prop_assert_eq!(rot13(&rot13(&text)), text);
        }
    }
}
