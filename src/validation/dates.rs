use chrono::{Datelike, NaiveDate};

/// Century resolution and calendar checks for MRZ `YYMMDD` dates.
pub struct DateValidator;

impl DateValidator {
    /// Birth dates are never in the future: a year past `today` falls back a
    /// century.
    pub fn birth_date(yymmdd: &str, today: NaiveDate) -> Option<NaiveDate> {
        let (yy, month, day) = Self::split(yymmdd)?;
        let mut year = 2000 + yy;
        if year > today.year() {
            year -= 100;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Expiry dates may lie at most `horizon_years` ahead of `today`.
    pub fn expiry_date(yymmdd: &str, today: NaiveDate, horizon_years: i32) -> Option<NaiveDate> {
        let (yy, month, day) = Self::split(yymmdd)?;
        let mut year = 2000 + yy;
        if year - today.year() > horizon_years {
            year -= 100;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }

    // Parse a date string in the format "YYMMDD"
    fn split(yymmdd: &str) -> Option<(i32, u32, u32)> {
        if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year = yymmdd[0..2].parse::<i32>().ok()?;
        let month = yymmdd[2..4].parse::<u32>().ok()?;
        let day = yymmdd[4..6].parse::<u32>().ok()?;

        Some((year, month, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_birth_date_century() {
        assert_eq!(
            DateValidator::birth_date("690806", today()),
            NaiveDate::from_ymd_opt(1969, 8, 6)
        );
        assert_eq!(
            DateValidator::birth_date("240101", today()),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(
            DateValidator::birth_date("250101", today()),
            NaiveDate::from_ymd_opt(1925, 1, 1)
        );
    }

    #[test]
    fn test_expiry_date_century() {
        assert_eq!(
            DateValidator::expiry_date("340101", today(), 10),
            NaiveDate::from_ymd_opt(2034, 1, 1)
        );
        assert_eq!(
            DateValidator::expiry_date("350101", today(), 10),
            NaiveDate::from_ymd_opt(1935, 1, 1)
        );
        assert_eq!(
            DateValidator::expiry_date("940623", today(), 10),
            NaiveDate::from_ymd_opt(1994, 6, 23)
        );
    }

    #[test]
    fn test_calendar_invalid_dates() {
        assert_eq!(DateValidator::birth_date("691306", today()), None);
        assert_eq!(DateValidator::birth_date("690231", today()), None);
        assert_eq!(DateValidator::expiry_date("230229", today(), 10), None);
        assert_eq!(
            DateValidator::expiry_date("240229", today(), 10),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_malformed_spans() {
        assert_eq!(DateValidator::birth_date("69O806", today()), None);
        assert_eq!(DateValidator::birth_date("6908", today()), None);
        assert_eq!(DateValidator::birth_date("<<<<<<", today()), None);
    }
}
