//! Pattern extraction helpers used by the page scrapers

use regex::Regex;
use tracing::debug;

/// Returns the first capture group of `pattern` in `text`.
///
/// An invalid pattern is treated like a miss.
pub fn regex_single_match(text: &str, pattern: &str) -> Option<String> {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            debug!("Invalid pattern {}: {}", pattern, e);
            return None;
        }
    };
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Like [`regex_single_match`] but yields `default` on a miss
pub fn regex_single_match_or(text: &str, pattern: &str, default: impl Into<String>) -> String {
    regex_single_match(text, pattern).unwrap_or_else(|| default.into())
}

/// Deterministic hex digest, used as a last-resort title
pub fn hash(input: impl AsRef<[u8]>) -> String {
    let hash_val = seahash::hash(input.as_ref());
    format!("{:x}", hash_val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_match_returns_first_group() {
        let html = r#"<h1 title="first" class="x"></h1><h1 title="second">"#;
        assert_eq!(
            regex_single_match(html, r#"<h1 title="(.+?)""#),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_single_match_miss() {
        assert_eq!(regex_single_match("nothing here", r"(BV[a-zA-Z0-9]+)"), None);
    }

    #[test]
    fn test_invalid_pattern_is_a_miss() {
        assert_eq!(regex_single_match("abc", r"(unclosed"), None);
    }

    #[test]
    fn test_match_or_default() {
        assert_eq!(regex_single_match_or("abc", r"(\d+)", "{}"), "{}");
        assert_eq!(regex_single_match_or("abc123", r"(\d+)", "{}"), "123");
    }

    #[test]
    fn test_hash_is_stable() {
        let a = hash("https://www.bilibili.com/video/BV1xx411c7mD");
        let b = hash("https://www.bilibili.com/video/BV1xx411c7mD");
        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert_ne!(a, hash("https://www.bilibili.com/video/BV1yy411c7mD"));
    }
}
