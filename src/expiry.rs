use crate::models::ShortLink;
use chrono::{DateTime, Utc};

/// Whether `link` is past its due date at `now`. Strict comparison, no grace
/// period: a link is expired from the first instant after its due date.
///
/// Applied on every resolve (so an expired link stops answering before the
/// sweeper gets to it) and, as the same predicate in SQL, by the sweeper's
/// bulk update.
pub fn is_expired(link: &ShortLink, now: DateTime<Utc>) -> bool {
    link.due_date < now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn link_due_at(due_date: DateTime<Utc>) -> ShortLink {
        ShortLink {
            id: 1,
            token: "abcDEF123".into(),
            original_url: "https://example.com".into(),
            is_active: true,
            due_date,
        }
    }

    #[test]
    fn past_due_date_is_expired() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert!(is_expired(&link_due_at(now - Duration::seconds(1)), now));
    }

    #[test]
    fn future_due_date_is_not_expired() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert!(!is_expired(&link_due_at(now + Duration::minutes(1)), now));
    }

    #[test]
    fn due_exactly_now_is_not_expired() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert!(!is_expired(&link_due_at(now), now));
    }
}
