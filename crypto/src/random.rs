//! Salts and identifiers drawn from the operating system RNG.

use rand::rngs::OsRng;
use rand::RngCore;

/// Salt length in bytes (rendered as twice as many hex characters).
pub const SALT_LEN: usize = 16;

/// A fresh random salt as 32 lowercase hex characters.
pub fn random_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// A fresh random v4 UUID in hyphenated form.
pub fn random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn salt_is_32_hex_chars() {
        let salt = random_salt();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn salt_decodes_to_salt_len_bytes() {
        let bytes = hex::decode(random_salt()).unwrap();
        assert_eq!(bytes.len(), SALT_LEN);
    }

    #[test]
    fn salts_do_not_repeat() {
        let salts: HashSet<String> = (0..256).map(|_| random_salt()).collect();
        assert_eq!(salts.len(), 256);
    }

    #[test]
    fn ids_are_uuids() {
        let id = random_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
        assert_ne!(id, random_id());
    }
}
