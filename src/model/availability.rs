use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{normalize_clock, parse_clock};

/// `doctor_availability` table row
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AvailabilityRow {
    pub id: String,
    pub doctor_id: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

/// A weekly working window for one doctor
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: String,
    pub doctor_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl Availability {
    /// Whether this window applies to the given calendar date
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        date.weekday().num_days_from_sunday() as u8 == self.day_of_week
    }

    /// Parsed `(start, end)`; `None` when either bound is malformed
    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((parse_clock(&self.start_time)?, parse_clock(&self.end_time)?))
    }
}

impl From<AvailabilityRow> for Availability {
    fn from(row: AvailabilityRow) -> Self {
        Self {
            id: row.id,
            doctor_id: row.doctor_id,
            day_of_week: row.day_of_week,
            start_time: normalize_clock(&row.start_time),
            end_time: normalize_clock(&row.end_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(day: u8) -> Availability {
        Availability {
            id: "w1".into(),
            doctor_id: "d1".into(),
            day_of_week: day,
            start_time: "08:00".into(),
            end_time: "12:00".into(),
        }
    }

    #[test]
    fn test_applies_on_uses_sunday_zero() {
        // 2025-04-06 is a Sunday, 2025-04-07 a Monday
        let sunday = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();

        assert!(window(0).applies_on(sunday));
        assert!(window(1).applies_on(monday));
        assert!(!window(1).applies_on(sunday));
    }

    #[test]
    fn test_row_times_normalized() {
        let row = AvailabilityRow {
            id: "w1".into(),
            doctor_id: "d1".into(),
            day_of_week: 2,
            start_time: "08:00:00".into(),
            end_time: "12:30:00".into(),
        };
        let availability = Availability::from(row);
        assert_eq!(availability.start_time, "08:00");
        assert_eq!(availability.end_time, "12:30");
        assert!(availability.bounds().is_some());
    }
}
