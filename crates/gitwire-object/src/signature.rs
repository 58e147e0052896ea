//! Author and committer signatures.

use crate::scan::lossy;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// An author or committer attribution: `Name <email> seconds tz`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Display name, possibly empty.
    pub name: String,
    /// Email address without the angle brackets, possibly empty.
    pub email: String,
    /// Timestamp as UTC. The timezone offset in the source is not applied.
    pub when: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy)]
enum State {
    Name,
    Email,
    Timestamp,
}

impl Signature {
    /// Parses signature text. Never fails.
    ///
    /// Malformed input yields a partially filled signature: whatever was
    /// recognised before the scan ran out of input is kept and the
    /// remaining fields stay at their defaults.
    #[must_use]
    pub fn parse(input: &[u8]) -> Self {
        let mut sig = Self::default();
        if input.is_empty() {
            return sig;
        }

        let mut state = State::Name;
        let mut from = 0;
        let mut i = 0;
        loop {
            let byte = input.get(i).copied();
            match state {
                State::Name => match byte {
                    Some(b'<') => {
                        sig.name = lossy(input[..i].trim_ascii_end());
                        from = i + 1;
                        state = State::Email;
                    }
                    Some(_) => {}
                    None => {
                        sig.name = lossy(input.trim_ascii_end());
                        break;
                    }
                },
                State::Email => match byte {
                    Some(b'>') => {
                        sig.email = lossy(&input[from..i]);
                        // Skip the separator after '>'.
                        i += 1;
                        from = i + 1;
                        state = State::Timestamp;
                    }
                    Some(_) => {}
                    None => {
                        sig.email = lossy(&input[from..]);
                        break;
                    }
                },
                State::Timestamp => {
                    if matches!(byte, Some(b' ') | None) {
                        let digits = input.get(from..i).unwrap_or_default();
                        sig.when = parse_timestamp(digits);
                        break;
                    }
                }
            }
            i += 1;
        }

        sig
    }
}

fn parse_timestamp(digits: &[u8]) -> Option<DateTime<Utc>> {
    let secs: i64 = std::str::from_utf8(digits).ok()?.parse().ok()?;
    DateTime::from_timestamp(secs, 0)
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} <{}>", self.name, self.email)?;
        match self.when {
            Some(when) => write!(f, " @ {}", when.to_rfc3339()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_signature() {
        let sig = Signature::parse(b"A U Thor <author@x.com> 1243040974 +0000");
        assert_eq!(sig.name, "A U Thor");
        assert_eq!(sig.email, "author@x.com");
        assert_eq!(sig.when.unwrap().timestamp(), 1_243_040_974);
    }

    #[test]
    fn test_parse_empty_is_zero_value() {
        assert_eq!(Signature::parse(b""), Signature::default());
    }

    #[test]
    fn test_timezone_is_not_applied() {
        let utc = Signature::parse(b"A <a@x> 1243040974 +0000");
        let offset = Signature::parse(b"A <a@x> 1243040974 -0700");
        assert_eq!(utc.when, offset.when);
    }

    #[test]
    fn test_parse_without_name() {
        let sig = Signature::parse(b"<a@x.com> 10 +0000");
        assert_eq!(sig.name, "");
        assert_eq!(sig.email, "a@x.com");
        assert_eq!(sig.when.unwrap().timestamp(), 10);
    }

    #[test]
    fn test_parse_empty_name_and_email() {
        let sig = Signature::parse(b" <> 0 +0000");
        assert_eq!(sig.name, "");
        assert_eq!(sig.email, "");
        assert_eq!(sig.when, DateTime::from_timestamp(0, 0));
    }

    #[test]
    fn test_parse_without_timezone() {
        let sig = Signature::parse(b"A <a@x> 1234");
        assert_eq!(sig.when.unwrap().timestamp(), 1234);
    }

    #[test]
    fn test_parse_negative_timestamp() {
        let sig = Signature::parse(b"A <a@x> -60 +0000");
        assert_eq!(sig.when.unwrap().timestamp(), -60);
    }

    #[test]
    fn test_parse_bad_timestamp_leaves_when_unset() {
        let sig = Signature::parse(b"A U Thor <author@x.com> yesterday +0000");
        assert_eq!(sig.name, "A U Thor");
        assert_eq!(sig.email, "author@x.com");
        assert_eq!(sig.when, None);
    }

    #[test]
    fn test_parse_stops_after_email() {
        let sig = Signature::parse(b"A <a@x>");
        assert_eq!(sig.email, "a@x");
        assert_eq!(sig.when, None);
    }

    #[test]
    fn test_parse_unterminated_email() {
        let sig = Signature::parse(b"A <a@x");
        assert_eq!(sig.name, "A");
        assert_eq!(sig.email, "a@x");
        assert_eq!(sig.when, None);
    }

    #[test]
    fn test_parse_name_only() {
        let sig = Signature::parse(b"just a name ");
        assert_eq!(
            sig,
            Signature {
                name: "just a name".to_string(),
                ..Signature::default()
            }
        );
    }

    #[test]
    fn test_display() {
        let sig = Signature::parse(b"A U Thor <author@x.com> 1243040974 +0000");
        assert_eq!(
            sig.to_string(),
            "\"A U Thor\" <author@x.com> @ 2009-05-23T01:09:34+00:00"
        );
        assert_eq!(Signature::default().to_string(), "\"\" <>");
    }
}
