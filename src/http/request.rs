//! Request parsing for the orders route.
//!
//! # Responsibilities
//! - Extract the `email` query parameter
//! - Validate it as an RFC 5322 mailbox
//! - Read the request ID assigned by the request-id layer

use axum::http::HeaderMap;
use validator::ValidateEmail;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Decoded query pairs of `GET /orders/`, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// First `email` value in the query. A missing parameter is an empty
/// string; later repeats are ignored.
pub fn first_email(pairs: &[(String, String)]) -> &str {
    pairs
        .iter()
        .find(|(key, _)| key == "email")
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

/// Request ID of the current request, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Parse `input` as a mailbox and return its address part.
///
/// Accepts a bare `addr-spec` (`a@b.com`) or a `name-addr`
/// (`Alice <a@b.com>`). Surrounding whitespace is not trimmed.
pub fn parse_mailbox(input: &str) -> Option<&str> {
    let address = match (input.rfind('<'), input.strip_suffix('>')) {
        (Some(open), Some(inner)) => {
            let display_name = &input[..open];
            if display_name.contains(['<', '>']) {
                return None;
            }
            &inner[open + 1..]
        }
        (None, None) => input,
        _ => return None,
    };

    (address.validate_email() && has_dot_atom_local_part(address)).then_some(address)
}

/// An unquoted local part is a dot-atom: no leading, trailing or doubled dot.
fn has_dot_atom_local_part(address: &str) -> bool {
    let Some((local, _)) = address.rsplit_once('@') else {
        return false;
    };
    if local.starts_with('"') {
        return true;
    }
    !(local.starts_with('.') || local.ends_with('.') || local.contains(".."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_address() {
        assert_eq!(parse_mailbox("a@b.com"), Some("a@b.com"));
        assert_eq!(parse_mailbox("first.last+tag@example.co.uk"), Some("first.last+tag@example.co.uk"));
    }

    #[test]
    fn test_name_addr() {
        assert_eq!(parse_mailbox("Alice <alice@example.com>"), Some("alice@example.com"));
        assert_eq!(parse_mailbox("<alice@example.com>"), Some("alice@example.com"));
        assert_eq!(parse_mailbox("Alice<alice@example.com>"), Some("alice@example.com"));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "",
            "not-an-email",
            "@b.com",
            "a@",
            "a b@c.com",
            " a@b.com",
            "Alice <alice@example.com",
            "Alice alice@example.com>",
            "<<a@b.com>",
            "a..b@c.com",
            ".a@b.com",
            "a.@b.com",
            "Alice <a..b@c.com>",
        ] {
            assert_eq!(parse_mailbox(input), None, "accepted {input:?}");
        }
    }

    #[test]
    fn test_first_email_wins() {
        let pairs: QueryPairs = vec![
            ("page".into(), "2".into()),
            ("email".into(), "a@b.com".into()),
            ("email".into(), "x@y.com".into()),
        ];
        assert_eq!(first_email(&pairs), "a@b.com");
        assert_eq!(first_email(&[]), "");
    }

    #[test]
    fn test_request_id_fallback() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, "req-1".parse().unwrap());
        assert_eq!(request_id(&headers), "req-1");
    }
}
