use chrono::{Local, NaiveDateTime};

/// Layout of the `last_seen` field in the stats file.
pub const LAST_SEEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_last_seen(dt: &NaiveDateTime) -> String {
    dt.format(LAST_SEEN_FORMAT).to_string()
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_last_seen() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(7, 5, 0))
            .unwrap();
        assert_eq!(format_last_seen(&dt), "2024-03-09 07:05:00");
    }
}
