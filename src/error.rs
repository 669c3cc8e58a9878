//! Error types surfaced by the catalog

use thiserror::Error;

/// Failures a caller of the category provider can observe.
///
/// Source-level problems (a broken partner definition, a missing package) never
/// show up here; they are logged and the affected step contributes nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Indexed access before a fetch has completed.
    #[error("categories are not available")]
    CategoriesUnavailable,

    #[error("category index {index} out of range (size {size})")]
    IndexOutOfRange { index: usize, size: usize },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
