use uuid::Uuid;

/// Issues an opaque one-time token backed by a random (v4) UUID.
pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_uuids() {
        let token = new_token();
        let parsed = Uuid::parse_str(&token).expect("token should parse as uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..1000).map(|_| new_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
