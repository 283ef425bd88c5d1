//! Wire format of the TP-Link local control protocol: JSON bodies under an
//! XOR autokey cipher (initial key 171), framed over TCP with a 4-byte
//! big-endian length prefix.

const INITIAL_KEY: u8 = 171;

/// Encrypt a plaintext payload. Each ciphertext byte becomes the key for
/// the next one.
pub fn encrypt(plain: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    plain
        .iter()
        .map(|&b| {
            let c = key ^ b;
            key = c;
            c
        })
        .collect()
}

/// Decrypt a ciphertext payload. Inverse of [`encrypt`]: the previous
/// ciphertext byte is the key for the current one.
pub fn decrypt(cipher: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    cipher
        .iter()
        .map(|&b| {
            let p = key ^ b;
            key = b;
            p
        })
        .collect()
}

/// Frame an encrypted body for TCP transport.
pub fn frame(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + body.len());
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(body);
    out
}
