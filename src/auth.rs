// Credential derivation for the catalog endpoint
//
// Every request carries an `X-Auth` header whose value is the MD5 of
// "<password>_<YYYYMMDD>" with the date taken in UTC. The token is stable for
// a whole UTC day and is recomputed on every request, never stored.

use chrono::{NaiveDate, Utc};
use md5::{Digest, Md5};
use std::fmt;

/// Name of the header the service reads the token from
pub const AUTH_HEADER: &str = "X-Auth";

/// A derived per-day credential
///
/// `Debug` is redacted so tokens don't leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(****{})", &self.0[self.0.len().saturating_sub(4)..])
    }
}

/// Derive the token for a given password and UTC calendar date
pub fn derive_token(password: &str, date: NaiveDate) -> AuthToken {
    let stamp = date.format("%Y%m%d");
    let digest = Md5::digest(format!("{}_{}", password, stamp).as_bytes());
    AuthToken(format!("{:x}", digest))
}

/// Derive the token for today (UTC)
pub fn current_token(password: &str) -> AuthToken {
    derive_token(password, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_token_is_md5_of_password_and_date() {
        // md5("Valantis_20240101")
        let expected = format!("{:x}", Md5::digest(b"Valantis_20240101"));
        let token = derive_token("Valantis", date(2024, 1, 1));
        assert_eq!(token.as_str(), expected);
        assert_eq!(token.as_str().len(), 32);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_vector() {
        // md5("") is the classic empty-input vector; guards the hex formatting
        assert_eq!(
            format!("{:x}", Md5::digest(b"")),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_same_day_same_token() {
        let a = derive_token("secret", date(2024, 3, 9));
        let b = derive_token("secret", date(2024, 3, 9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_day_rollover_changes_token() {
        let before = derive_token("secret", date(2023, 12, 31));
        let after = derive_token("secret", date(2024, 1, 1));
        assert_ne!(before, after);
    }

    #[test]
    fn test_password_changes_token() {
        let d = date(2024, 3, 9);
        assert_ne!(derive_token("a", d), derive_token("b", d));
    }

    #[test]
    fn test_date_is_zero_padded() {
        // 2024-03-09 must format as 20240309, not 202439
        let expected = format!("{:x}", Md5::digest(b"pw_20240309"));
        assert_eq!(derive_token("pw", date(2024, 3, 9)).as_str(), expected);
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = derive_token("secret", date(2024, 1, 1));
        let shown = format!("{:?}", token);
        assert!(!shown.contains(token.as_str()));
        assert!(shown.starts_with("AuthToken(****"));
    }
}
