use chrono::NaiveDate;

use crate::error::ModelError;
use crate::ids::SubscriberID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubscriptionStatus {
    Active,
    Unsubscribed,
}

/// Newsletter subscriber captured by the viewer email form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Subscriber {
    pub id: SubscriberID,
    pub email: String,
    pub subscribed_at: NaiveDate,
    pub status: SubscriptionStatus,
}

impl Subscriber {
    /// Build an active subscriber. The address is trimmed and lowercased.
    pub fn new(email: &str, subscribed_at: NaiveDate) -> crate::ModelResult<Self> {
        let email = normalize_email(email)?;
        Ok(Self {
            id: SubscriberID::new(),
            email,
            subscribed_at,
            status: SubscriptionStatus::Active,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// Minimal shape check: one `@` with something on both sides and a dot in
/// the domain.
pub fn normalize_email(raw: &str) -> crate::ModelResult<String> {
    let email = raw.trim().to_ascii_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(ModelError::InvalidEmail(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(
            normalize_email("  Demo@StreamPulse.com ").unwrap(),
            "demo@streampulse.com"
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "demo", "@streampulse.com", "demo@", "a@b", "a@@b.com", "a@b."] {
            assert!(normalize_email(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn new_subscriber_is_active() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let sub = Subscriber::new("demo@streampulse.com", date).unwrap();
        assert!(sub.is_active());
        assert_eq!(sub.subscribed_at, date);
    }
}
