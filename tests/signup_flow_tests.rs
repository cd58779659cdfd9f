/// Tests for signup and session plumbing
///
/// Note: These are unit tests that verify the logic is correct.
/// Integration tests would require a running server.

#[cfg(test)]
mod tests {
    // Session identifiers are 32 random bytes rendered as lowercase hex
    #[test]
    fn test_session_id_format() {
        use rand::Rng;

        let bytes: [u8; 32] = rand::thread_rng().gen();
        let id = hex::encode(bytes);

        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(id.chars().all(|c| !c.is_uppercase()));
    }

    #[test]
    fn test_session_ids_are_unique() {
        use rand::Rng;
        use std::collections::HashSet;

        let mut ids = HashSet::new();
        for _ in 0..100 {
            let bytes: [u8; 32] = rand::thread_rng().gen();
            ids.insert(hex::encode(bytes));
        }

        // 256 bits of entropy; collisions in 100 draws would mean a broken RNG
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_bearer_header_parsing() {
        let auth_header = "Bearer abc123token";
        let token = auth_header.strip_prefix("Bearer ");
        assert_eq!(token, Some("abc123token"));

        let invalid_header = "abc123token";
        let token = invalid_header.strip_prefix("Bearer ");
        assert_eq!(token, None);
    }

    #[test]
    fn test_email_syntax_validation() {
        use validator::ValidateEmail;

        assert!("hermit@example.com".validate_email());
        assert!(!"not-an-email".validate_email());
        assert!(!"missing@tld@double.com".validate_email());
        assert!(!"".validate_email());
    }

    // Bio bounds count characters, not bytes
    #[test]
    fn test_bio_length_counts_chars_not_bytes() {
        let bio = "ä".repeat(50);
        assert_eq!(bio.chars().count(), 50);
        assert!(bio.len() > 50);
    }

    #[test]
    fn test_session_expiry_arithmetic() {
        use chrono::{Duration, Utc};

        let created = Utc::now();
        let expires = created + Duration::hours(24);

        assert!(expires > created);
        assert_eq!((expires - created).num_hours(), 24);
    }

    #[test]
    fn test_lockout_window_arithmetic() {
        use chrono::{Duration, Utc};

        let locked_until = Utc::now() + Duration::minutes(30);
        assert!(locked_until > Utc::now());
        assert!((locked_until - Utc::now()).num_minutes() <= 30);
    }

    // The signup endpoint dispatches on a form_type tag in the JSON body
    #[test]
    fn test_form_type_dispatch_shape() {
        let basic: serde_json::Value = serde_json::from_str(
            r#"{"form_type": "basic", "name": "A", "email": "a@example.com"}"#,
        )
        .unwrap();
        assert_eq!(basic["form_type"], "basic");

        let enhanced: serde_json::Value = serde_json::from_str(
            r#"{"form_type": "enhanced", "firstName": "A", "lastName": "B",
                "email": "a@example.com", "bio": "x", "interests": ["a","b","c"]}"#,
        )
        .unwrap();
        assert_eq!(enhanced["form_type"], "enhanced");
        assert_eq!(enhanced["interests"].as_array().unwrap().len(), 3);
    }
}
