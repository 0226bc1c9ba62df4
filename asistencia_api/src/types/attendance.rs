//! Attendance upsert payloads.
//!
//! Both endpoints are idempotent upserts keyed by `(politicianId, period)`
//! on the API side, so resubmitting a period overwrites the prior figures.

use serde::{Deserialize, Serialize};

use super::PoliticianID;

/// Payload for `POST /api/attendance/monthly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAttendance {
    pub politician_id: PoliticianID,
    pub year: i32,
    pub month: u32,

    /// Sessions attended in the period.
    pub attendance_count: u32,

    /// Total absences in the period, as reported by the chamber.
    pub absent_count: u32,

    pub justified_absent_count: u32,
    pub unjustified_absent_count: u32,

    /// Attendance rate for the period, 0-100.
    pub attendance_average: f64,
}

/// Payload for `POST /api/attendance/yearly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyAttendance {
    pub politician_id: PoliticianID,
    pub year: i32,
    pub attendance_count: u32,
    pub absent_count: u32,
    pub justified_absent_count: u32,
    pub unjustified_absent_count: u32,
    pub attendance_average: f64,
}
