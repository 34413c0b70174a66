//! Shift (Caesar) cipher over the ASCII alphabet. Case is preserved and
//! non-letter characters pass through untouched.

const ALPHABET_LEN: u8 = 26;

fn rotate(c: char, offset: u8) -> char {
    if c.is_ascii_uppercase() {
        (((c as u8 - b'A' + offset) % ALPHABET_LEN) + b'A') as char
    } else if c.is_ascii_lowercase() {
        (((c as u8 - b'a' + offset) % ALPHABET_LEN) + b'a') as char
    } else {
        c
    }
}

/// Encipher `text` by rotating each letter forward by `key` positions.
pub fn encipher(text: &str, key: u8) -> String {
    let offset = key % ALPHABET_LEN;
    text.chars().map(|c| rotate(c, offset)).collect()
}

/// Decipher `ciphertext` by rotating each letter back by `key` positions.
pub fn decipher(ciphertext: &str, key: u8) -> String {
    let offset = ALPHABET_LEN - (key % ALPHABET_LEN);
    ciphertext.chars().map(|c| rotate(c, offset % ALPHABET_LEN)).collect()
}
