//! Shared public-URL key encoding for storage backends.
//!
//! Keys may contain `/` separators; each path segment is percent-encoded
//! individually so separators stay readable in the resulting URL.

/// Percent-encode an object key for use in a public URL.
pub(crate) fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces() {
        assert_eq!(encode_key("a b.js"), "a%20b.js");
    }

    #[test]
    fn preserves_path_separators() {
        assert_eq!(encode_key("ios/a b.js"), "ios/a%20b.js");
        assert_eq!(encode_key("a/b/c.js"), "a/b/c.js");
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_key("name@1.0.0+x"), "name%401.0.0%2Bx");
    }

    #[test]
    fn passes_through_unreserved_keys() {
        assert_eq!(encode_key("bundle-abc123.js"), "bundle-abc123.js");
    }
}
