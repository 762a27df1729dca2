//! Identifier generation for records, participants, and tasks.
//!
//! Identifiers are opaque strings unique with overwhelming probability
//! within a process: a millisecond timestamp component followed by a random
//! suffix (ULID). No uniqueness is enforced across processes or devices.

use ulid::Ulid;

/// Generate a new opaque identifier.
#[must_use]
pub fn generate() -> String {
    Ulid::new().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_not_empty() {
        assert!(!generate().is_empty());
    }

    #[test]
    fn test_generate_unique_within_process() {
        let mut ids: Vec<String> = (0..1000).map(|_| generate()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generate_fixed_width() {
        // ULID text form is always 26 Crockford base32 characters.
        assert_eq!(generate().len(), 26);
    }

    #[test]
    fn test_generate_time_ordered_across_ticks() {
        let first = generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = generate();
        assert!(second > first);
    }
}
