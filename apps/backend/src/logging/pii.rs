//! Masking of emails and bearer tokens before they reach the logs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"[A-Za-z0-9._%+-]*@[A-Za-z0-9.-]+\.[A-Za-z]+").unwrap()
    });
    &EMAIL_REGEX
}

// JWTs and other long opaque runs; dots are allowed so a whole compact
// token is replaced at once.
fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"[A-Za-z0-9_\-+/]{20,}={0,2}(\.[A-Za-z0-9_\-+/]+={0,2}){0,2}").unwrap()
    });
    &TOKEN_REGEX
}

/// Keep the first character of an email's local part and its whole domain.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("@{domain}"),
        },
        None => email.to_string(),
    }
}

/// Mask emails, then replace anything that looks like a token.
pub fn redact(input: &str) -> String {
    let emails_masked =
        email_regex().replace_all(input, |caps: &regex::Captures| mask_email(&caps[0]));

    token_regex()
        .replace_all(&emails_masked, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that redacts on formatting, for log fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
