//! RC4 Cipher Module
//!
//! Keyed permutation state with the standard key schedule and generator.
//! The keystream position advances across calls, so splitting one buffer
//! into several `crypt` calls produces the same output as a single call.

/// RC4 cipher state.
///
/// Create with [`Rc4::new`], transform buffers with [`Rc4::crypt`] or
/// [`Rc4::crypt_in_place`], and rekey with [`Rc4::reset`].
pub struct Rc4 {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    /// Create a cipher state from a key.
    ///
    /// # Panics
    ///
    /// Panics if `key` is empty; the key schedule is undefined for an empty
    /// key, and supplying one is caller misuse.
    pub fn new(key: &[u8]) -> Self {
        let mut cipher = Rc4 {
            s: [0; 256],
            i: 0,
            j: 0,
        };
        cipher.reset(key);
        cipher
    }

    /// Reinitialize this state in place with a new key.
    ///
    /// # Panics
    ///
    /// Panics if `key` is empty.
    pub fn reset(&mut self, key: &[u8]) {
        assert!(!key.is_empty(), "cipher key must not be empty");

        for (idx, slot) in self.s.iter_mut().enumerate() {
            *slot = idx as u8;
        }
        let mut j: u8 = 0;
        for idx in 0..256 {
            j = j
                .wrapping_add(self.s[idx])
                .wrapping_add(key[idx % key.len()]);
            self.s.swap(idx, j as usize);
        }
        self.i = 0;
        self.j = 0;
    }

    /// Transform a buffer in place.
    ///
    /// Symmetric: applying the transform twice from the same keystream
    /// position restores the original bytes.
    pub fn crypt_in_place(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.s[self.i as usize]);
            self.s.swap(self.i as usize, self.j as usize);
            let k = self.s[(self.s[self.i as usize].wrapping_add(self.s[self.j as usize])) as usize];
            *byte ^= k;
        }
    }

    /// Transform a buffer, returning the result.
    ///
    /// Output length always equals input length.
    pub fn crypt(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        self.crypt_in_place(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_known_vector_key() {
        let mut cipher = Rc4::new(b"Key");
        assert_eq!(hex(&cipher.crypt(b"Plaintext")), "bbf316e8d940af0ad3");
    }

    #[test]
    fn test_known_vector_wiki() {
        let mut cipher = Rc4::new(b"Wiki");
        assert_eq!(hex(&cipher.crypt(b"pedia")), "1021bf0420");
    }

    #[test]
    fn test_known_vector_secret() {
        let mut cipher = Rc4::new(b"Secret");
        assert_eq!(
            hex(&cipher.crypt(b"Attack at dawn")),
            "45a01f645fc35b383552544b9bf5"
        );
    }

    #[test]
    fn test_symmetric_roundtrip() {
        let mut enc = Rc4::new(b"shared key");
        let mut dec = Rc4::new(b"shared key");
        let ciphertext = enc.crypt(b"round trip payload");
        assert_eq!(dec.crypt(&ciphertext), b"round trip payload");
    }

    #[test]
    fn test_chunked_equals_whole() {
        let mut whole = Rc4::new(b"k");
        let mut chunked = Rc4::new(b"k");

        let data = [0xabu8; 100];
        let expected = whole.crypt(&data);

        let mut out = Vec::new();
        for chunk in data.chunks(7) {
            out.extend_from_slice(&chunked.crypt(chunk));
        }
        assert_eq!(out, expected);
    }

    #[test]
    fn test_in_place_matches_allocating() {
        let mut a = Rc4::new(b"dual");
        let mut b = Rc4::new(b"dual");

        let mut buf = *b"some payload";
        a.crypt_in_place(&mut buf);
        assert_eq!(buf.to_vec(), b.crypt(b"some payload"));
    }

    #[test]
    fn test_reset_restarts_keystream() {
        let mut cipher = Rc4::new(b"first");
        let initial = cipher.crypt(b"Plaintext");

        cipher.reset(b"first");
        assert_eq!(cipher.crypt(b"Plaintext"), initial);

        cipher.reset(b"second");
        assert_ne!(cipher.crypt(b"Plaintext"), initial);
    }

    #[test]
    fn test_output_length_preserved() {
        let mut cipher = Rc4::new(b"len");
        assert_eq!(cipher.crypt(&[]).len(), 0);
        assert_eq!(cipher.crypt(&[0u8; 4079]).len(), 4079);
    }

    #[test]
    #[should_panic(expected = "cipher key must not be empty")]
    fn test_empty_key_panics() {
        let _ = Rc4::new(b"");
    }
}
