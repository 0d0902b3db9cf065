use serde::Serialize;

use crate::algorithms::{AnnualBreakdown, AnnualRow, AnnualStatistics};
use crate::api::CompanyId;
use crate::models::AnalysisMode;

/// Year totals and the year-by-month table for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualData {
    pub company_id: CompanyId,
    pub mode: AnalysisMode,
    pub rows: Vec<AnnualRow>,
    pub breakdown: AnnualBreakdown,
    pub statistics: AnnualStatistics,
}

pub const GET_ANNUAL_DATA: &str = "get_annual_data";
