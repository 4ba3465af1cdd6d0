/// All record identifiers are UUIDv4 strings (36 characters).
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh record identifier.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_36_chars_and_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_eq!(a.len(), 36);
        assert_eq!(b.len(), 36);
        assert_ne!(a, b);
    }
}
