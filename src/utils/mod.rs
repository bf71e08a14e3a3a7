pub fn remove_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Names of the `(name, value)` pairs whose value is empty after trimming.
pub fn blank_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| *name)
        .collect()
}

/// Pulls the human-readable message out of an API response body.
///
/// The cart and order routes answer `{"message": ...}`, the auth routes
/// `{"error": ...}`. Anything else falls back to `fallback`.
pub fn body_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(String::from))
        })
        .filter(|m| !is_blank(m))
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(remove_trailing_slash("http://localhost:4000/"), "http://localhost:4000");
        assert_eq!(remove_trailing_slash("http://localhost:4000"), "http://localhost:4000");
        assert_eq!(remove_trailing_slash("http://api//"), "http://api");
    }

    #[test]
    fn test_blank_fields() {
        let missing = blank_fields(&[("fullName", "Asha"), ("city", "  "), ("pincode", "")]);
        assert_eq!(missing, vec!["city", "pincode"]);
    }

    #[test]
    fn test_body_message_prefers_server_text() {
        assert_eq!(
            body_message(r#"{"message": "Item not found"}"#, "Failed to update item"),
            "Item not found"
        );
        assert_eq!(
            body_message(r#"{"error": "Invalid credentials"}"#, "Something went wrong"),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_body_message_fallback() {
        assert_eq!(
            body_message("<html>502</html>", "Failed to fetch cart items"),
            "Failed to fetch cart items"
        );
        assert_eq!(body_message(r#"{"message": ""}"#, "Failed"), "Failed");
        assert_eq!(body_message(r#"{"status": 500}"#, "Failed"), "Failed");
    }
}
