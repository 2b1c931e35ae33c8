//! Attendance model. One record per employee per day; the status column is
//! derived from the check-in time against the configured workday start.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "absent" => AttendanceStatus::Absent,
            "late" => AttendanceStatus::Late,
            _ => AttendanceStatus::Present,
        }
    }

    /// Derives the status from a check-in time: no check-in is `absent`,
    /// checking in after workday start plus the grace period is `late`.
    pub fn derive(
        check_in: Option<NaiveTime>,
        workday_start: NaiveTime,
        grace_minutes: u32,
    ) -> Self {
        match check_in {
            None => AttendanceStatus::Absent,
            Some(time) => {
                let cutoff = workday_start
                    .overflowing_add_signed(Duration::minutes(i64::from(grace_minutes)))
                    .0;
                if time > cutoff {
                    AttendanceStatus::Late
                } else {
                    AttendanceStatus::Present
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub day: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: String,
    pub created_utc: DateTime<Utc>,
}

/// Input for recording a day's attendance.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttendance {
    pub employee_id: i64,
    pub day: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

/// Replaces both time fields; the status is re-derived from the new check-in.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAttendance {
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

/// Filter parameters for listing attendance records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceFilter {
    pub employee_id: Option<i64>,
    /// `YYYY-MM`; expands to the first and last day of that month.
    pub month: Option<String>,
    pub day: Option<NaiveDate>,
}

/// Parses a `YYYY-MM` string into the inclusive first/last day of the month.
pub fn month_bounds(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = month.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month.pred_opt()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn missing_check_in_is_absent() {
        assert_eq!(
            AttendanceStatus::derive(None, at(8, 0), 0),
            AttendanceStatus::Absent
        );
    }

    #[test]
    fn check_in_on_the_dot_is_present() {
        assert_eq!(
            AttendanceStatus::derive(Some(at(8, 0)), at(8, 0), 0),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn one_minute_past_start_is_late_without_grace() {
        assert_eq!(
            AttendanceStatus::derive(Some(at(8, 1)), at(8, 0), 0),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn grace_period_extends_the_cutoff() {
        assert_eq!(
            AttendanceStatus::derive(Some(at(8, 30)), at(8, 0), 45),
            AttendanceStatus::Present
        );
        assert_eq!(
            AttendanceStatus::derive(Some(at(8, 46)), at(8, 0), 45),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn month_bounds_handles_december() {
        assert_eq!(
            month_bounds("2025-12"),
            Some((
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
            ))
        );
    }

    #[test]
    fn month_bounds_handles_february() {
        assert_eq!(
            month_bounds("2024-02"),
            Some((
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            ))
        );
    }

    #[test]
    fn month_bounds_rejects_garbage() {
        assert_eq!(month_bounds("2025-13"), None);
        assert_eq!(month_bounds("not-a-month"), None);
        assert_eq!(month_bounds("2025"), None);
    }
}
