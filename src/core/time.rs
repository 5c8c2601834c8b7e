use time::{format_description::well_known::Rfc3339, OffsetDateTime, UtcOffset};

pub(crate) fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub(crate) fn format_timestamp(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}

/// Whole calendar days between two instants, compared as UTC dates with the
/// time of day discarded.
pub(crate) fn calendar_days_between(earlier: OffsetDateTime, later: OffsetDateTime) -> i64 {
    let earlier = earlier.to_offset(UtcOffset::UTC).date();
    let later = later.to_offset(UtcOffset::UTC).date();
    (later - earlier).whole_days()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn format_timestamp_outputs_utc_z() {
        let value = datetime!(2025-01-02 10:20:30 UTC);
        assert_eq!(format_timestamp(value), "2025-01-02T10:20:30Z");
    }

    #[test]
    fn calendar_days_ignore_time_of_day() {
        let late_evening = datetime!(2026-03-09 23:59 UTC);
        let early_morning = datetime!(2026-03-10 00:01 UTC);
        assert_eq!(calendar_days_between(late_evening, early_morning), 1);
        assert_eq!(calendar_days_between(early_morning, early_morning), 0);
    }

    #[test]
    fn calendar_days_compare_in_utc_regardless_of_offset() {
        // 2026-03-10 01:00 +03:00 is still 2026-03-09 22:00 in UTC.
        let offset_login = datetime!(2026-03-10 01:00 +3);
        let utc_login = datetime!(2026-03-10 12:00 UTC);
        assert_eq!(calendar_days_between(offset_login, utc_login), 1);
    }
}
