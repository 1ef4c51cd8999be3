//! Record identifier generation and validation.
//!
//! Ids are 24-character lowercase hex tokens: an 8-hex-digit unix
//! timestamp prefix followed by 16 hex digits of random material. The
//! timestamp prefix keeps freshly created records roughly sortable by
//! creation time, the random suffix keeps concurrent creates from
//! colliding.

use chrono::Utc;
use rand::RngCore;

/// Length of every record id, in characters.
pub const RECORD_ID_LEN: usize = 24;

/// Generate a new record id.
pub fn generate_record_id() -> String {
    let secs = Utc::now().timestamp() as u32;
    let mut random = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut random);

    let mut id = format!("{:08x}", secs);
    for byte in random {
        id.push_str(&format!("{:02x}", byte));
    }
    id
}

/// Whether `candidate` is syntactically a record id.
///
/// Accepts upper- and lowercase hex, matching ids minted elsewhere.
pub fn is_record_id(candidate: &str) -> bool {
    candidate.len() == RECORD_ID_LEN && candidate.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid() {
        let id = generate_record_id();
        assert_eq!(id.len(), RECORD_ID_LEN);
        assert!(is_record_id(&id));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_record_id();
        let b = generate_record_id();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!is_record_id(""));
        assert!(!is_record_id("not-a-hex-id"));
        assert!(!is_record_id("abc123"));
        // Right length, non-hex character.
        assert!(!is_record_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
        // Valid hex but wrong length.
        assert!(!is_record_id("abcdef0123456789abcdef012"));
        // Mixed case is still hex.
        assert!(is_record_id("ABCDEF0123456789abcdef01"));
    }
}
