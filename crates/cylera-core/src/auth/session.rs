use chrono::{DateTime, Duration, Utc};

/// Token lifetime in hours.
/// Cylera partner tokens last 24 hours; the login response carries no
/// expiry field, so the client hardcodes 23 hours to leave a margin.
const TOKEN_LIFETIME_HOURS: i64 = 23;

/// One bearer token and the moment it was obtained.
/// Held in memory only; nothing is persisted across invocations.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub obtained_at: DateTime<Utc>,
}

impl SessionData {
    /// Record a token obtained just now.
    pub fn new(token: String) -> Self {
        Self {
            token,
            obtained_at: Utc::now(),
        }
    }

    /// A token is expired once it is 23 hours old or more. The boundary
    /// is inclusive: exactly 23 hours counts as expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() - self.obtained_at >= Duration::hours(TOKEN_LIFETIME_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_aged(age: Duration) -> SessionData {
        SessionData {
            token: "T1".to_string(),
            obtained_at: Utc::now() - age,
        }
    }

    #[test]
    fn fresh_token_is_not_expired() {
        assert!(!session_aged(Duration::minutes(5)).is_expired());
    }

    #[test]
    fn token_at_exactly_23_hours_is_expired() {
        assert!(session_aged(Duration::hours(23)).is_expired());
    }

    #[test]
    fn token_at_22h59m_is_not_expired() {
        assert!(!session_aged(Duration::hours(22) + Duration::minutes(59)).is_expired());
    }

    #[test]
    fn token_past_the_lifetime_is_expired() {
        assert!(session_aged(Duration::hours(24)).is_expired());
    }
}
