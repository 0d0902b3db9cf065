//! Repository trait definitions for the call store.
//!
//! - [`error`]: Error types for repository operations
//! - [`calls`]: Storing and fetching monthly call rows
//! - [`catalog`]: Company listing
//!
//! A complete store implements both traits; [`FullRepository`] is the
//! convenience bound used by the service layer.

pub mod calls;
pub mod catalog;
pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use calls::CallsRepository;
pub use catalog::CatalogRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: CallsRepository + CatalogRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: CallsRepository + CatalogRepository + ?Sized {}
