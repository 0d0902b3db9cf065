//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository and the HTTP layer: they fetch a
//! company's rows, run the analysis pipeline and assemble the response types
//! from [`crate::api`].

pub mod annual;
pub mod companies;
pub mod error;
pub mod inflection;

pub use annual::{compute_annual_data, get_annual_data};
pub use companies::{compute_company_info, get_company, list_companies};
pub use error::{ServiceError, ServiceResult};
pub use inflection::{analyze_series, compute_inflection_analysis, get_inflection_analysis};
