//! Text sanitization
//!
//! Strips links, e-mail addresses and `@mentions` from free text before it
//! leaves the exporter.

use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("valid url pattern"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email pattern")
});

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[^\s]+").expect("valid mention pattern"));

/// Remove URLs, then e-mail addresses, then mentions.
///
/// Only the matched tokens are removed; the whitespace around them stays.
pub fn sanitize(text: &str) -> String {
    let text = URL_RE.replace_all(text, "");
    let text = EMAIL_RE.replace_all(&text, "");
    MENTION_RE.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_all_token_classes() {
        let cleaned = sanitize("see https://x.io/a b@c.com @bob thanks");
        assert_eq!(cleaned, "see    thanks");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(sanitize("nothing to see here"), "nothing to see here");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_url_runs_to_whitespace() {
        assert_eq!(
            sanitize("docs at http://example.com/a?b=c#d.\nnext line"),
            "docs at \nnext line"
        );
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        assert_eq!(sanitize("HTTPS://EXAMPLE.COM"), "HTTPS://EXAMPLE.COM");
    }

    #[test]
    fn test_email_removed_before_mention() {
        // An e-mail must vanish entirely, not leave its local part behind.
        assert_eq!(sanitize("mail jane.doe+x@corp.example.org now"), "mail  now");
    }

    #[test]
    fn test_mention_without_domain() {
        assert_eq!(sanitize("ping @alice.smith please"), "ping  please");
    }
}
