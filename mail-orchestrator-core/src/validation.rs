//! Syntax checks for the single-domain and single-mailbox modes

use std::sync::LazyLock;

use regex::Regex;

static DOMAIN_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,6}$").ok()
});

static MAILBOX_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Whether `domain` looks like a registrable host name (`example.com`, `mail.example.co.uk`).
pub fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.trim();
    !domain.is_empty()
        && DOMAIN_RE
            .as_ref()
            .is_some_and(|re| re.is_match(domain))
}

/// Whether `mailbox` looks like `local@domain.tld`.
pub fn is_valid_mailbox(mailbox: &str) -> bool {
    let mailbox = mailbox.trim();
    !mailbox.is_empty()
        && MAILBOX_RE
            .as_ref()
            .is_some_and(|re| re.is_match(mailbox))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_domains() {
        for domain in ["example.com", "Mail.Example.CO.UK", "a-b.io", "x1.info"] {
            assert!(is_valid_domain(domain), "{domain} should be valid");
        }
    }

    #[test]
    fn invalid_domains() {
        for domain in ["", "   ", "localhost", "-bad.com", "bad-.com", "a..com", "exa mple.com", "example.c"] {
            assert!(!is_valid_domain(domain), "{domain} should be invalid");
        }
    }

    #[test]
    fn valid_mailboxes() {
        for mailbox in ["alice@example.com", "first.last+tag@sub.example.org"] {
            assert!(is_valid_mailbox(mailbox), "{mailbox} should be valid");
        }
    }

    #[test]
    fn invalid_mailboxes() {
        for mailbox in ["", "alice", "alice@", "@example.com", "alice@example", "a b@example.com", "a@b@c.com"] {
            assert!(!is_valid_mailbox(mailbox), "{mailbox} should be invalid");
        }
    }
}
