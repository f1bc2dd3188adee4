use time::macros::format_description;

use super::*;

/// `HH:MM:SS` in UTC.
pub(super) fn fmt_clock(ts: OffsetDateTime) -> String {
    ts.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "--:--:--".to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(fmt_clock(datetime!(2026-03-01 07:05:09 UTC)), "07:05:09");
    }
}
