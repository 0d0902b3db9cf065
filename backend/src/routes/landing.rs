use crate::api::CompanyId;
use serde::{Deserialize, Serialize};

/// Company listing entry with call volume summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company_id: CompanyId,
    pub company_name: String,
    pub total_calls: u64,
    pub first_year: i32,
    pub last_year: i32,
    /// Distinct regions, sorted.
    pub regions: Vec<String>,
    pub total_campaigns: u64,
    pub total_customers: u64,
    pub record_count: usize,
}

/// Outcome of storing a batch of call records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub received: usize,
    pub stored: usize,
    /// Rows outside the configured year/cutoff window.
    pub dropped: usize,
    /// The same batch was already stored; nothing was added.
    pub duplicate: bool,
    pub checksum: String,
}

pub const LIST_COMPANIES: &str = "list_companies";
pub const GET_COMPANY: &str = "get_company";
pub const POST_CALLS: &str = "store_calls";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_info_serializes_id_as_number() {
        let info = CompanyInfo {
            company_id: CompanyId::new(123),
            company_name: "Acme".to_string(),
            total_calls: 10,
            first_year: 2019,
            last_year: 2020,
            regions: vec!["CA".to_string()],
            total_campaigns: 1,
            total_customers: 4,
            record_count: 2,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["company_id"], 123);
        assert_eq!(json["regions"][0], "CA");
    }

    #[test]
    fn test_const_values() {
        assert_eq!(LIST_COMPANIES, "list_companies");
        assert_eq!(POST_CALLS, "store_calls");
    }
}
