//! Display formatting for the appointment list.

use chrono::NaiveDateTime;
use frontdesk_types::Naira;

use crate::constants::APPOINTMENT_DATE_TIME_FORMAT;

/// `YYYY-MM-DDTHH:MM`, the stored appointment date-time form.
pub fn format_appointment_date_time(date_time: NaiveDateTime) -> String {
    date_time.format(APPOINTMENT_DATE_TIME_FORMAT).to_string()
}

/// Two-digit 12-hour clock time, e.g. `08:00 AM`.
pub fn format_time(date_time: NaiveDateTime) -> String {
    date_time.format("%I:%M %p").to_string()
}

/// Day, short month and year, e.g. `22 Sep 2025`.
pub fn format_date(date_time: NaiveDateTime) -> String {
    date_time.format("%-d %b %Y").to_string()
}

/// Wallet balance with currency symbol and thousands separators, e.g. `₦120,000`.
pub fn format_wallet(balance: Naira) -> String {
    balance.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_format_appointment_date_time() {
        assert_eq!(format_appointment_date_time(at(11, 30)), "2025-09-02T11:30");
    }

    #[test]
    fn test_format_time_and_date() {
        assert_eq!(format_time(at(8, 0)), "08:00 AM");
        assert_eq!(format_time(at(17, 30)), "05:30 PM");
        assert_eq!(format_date(at(8, 0)), "2 Sep 2025");
    }

    #[test]
    fn test_format_wallet() {
        assert_eq!(format_wallet(Naira::new(210_000)), "₦210,000");
    }
}
