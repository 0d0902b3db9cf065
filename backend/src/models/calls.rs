use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::CompanyId;

/// One aggregated row from the call warehouse: calls for a company, region,
/// year and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub company_id: CompanyId,
    pub company_name: String,
    /// Region (US state) the calls were routed to.
    pub state: String,
    pub year: i32,
    /// Calendar month, 1 = January.
    pub month: u32,
    pub calls: u64,
    /// Distinct campaigns that generated calls.
    pub campaigns: u64,
    /// Distinct customers that placed calls.
    pub customers: u64,
}

impl CallRecord {
    /// Month as a series index (0 = January), or `None` when out of range.
    pub fn month_index(&self) -> Option<usize> {
        match self.month {
            1..=12 => Some(self.month as usize - 1),
            _ => None,
        }
    }

    /// First day of the record's month.
    pub fn period_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// Time window of records accepted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataWindow {
    /// Earliest year kept.
    pub min_year: i32,
    /// Records whose month starts on or after this date are dropped.
    pub cutoff_date: NaiveDate,
}

impl DataWindow {
    pub fn contains(&self, record: &CallRecord) -> bool {
        if record.year < self.min_year {
            return false;
        }
        match record.period_start() {
            Some(start) => start < self.cutoff_date,
            None => false,
        }
    }

    /// Split records into those inside the window and the count dropped.
    pub fn apply(&self, records: Vec<CallRecord>) -> (Vec<CallRecord>, usize) {
        let before = records.len();
        let kept: Vec<CallRecord> = records.into_iter().filter(|r| self.contains(r)).collect();
        let dropped = before - kept.len();
        (kept, dropped)
    }
}

impl Default for DataWindow {
    fn default() -> Self {
        Self {
            min_year: 2015,
            cutoff_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or_default(),
        }
    }
}
