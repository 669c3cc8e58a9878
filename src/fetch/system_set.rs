//! Process-wide memoized system categories

use tokio::sync::OnceCell;

use crate::model::CategoryRef;
use crate::platform::{PackageEnumerator, PartnerProvider};
use crate::sources::read_system_categories;

/// Categories parsed from the partner definition, computed at most once.
///
/// One instance is meant to be shared (through `Arc`) by every provider in the
/// process. Provider invalidation never touches it: the definition only changes
/// with the partner package, which outlives the process.
#[derive(Debug, Default)]
pub struct SystemCategorySet {
    categories: OnceCell<Vec<CategoryRef>>,
}

impl SystemCategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_computed(&self) -> bool {
        self.categories.initialized()
    }

    pub fn get(&self) -> Option<&[CategoryRef]> {
        self.categories.get().map(Vec::as_slice)
    }

    /// Publishes the system categories, parsing the definition on first use.
    ///
    /// The caller that performs the parse publishes categories as they are read;
    /// callers arriving while the parse is running wait for it and then replay the
    /// memoized set like every later caller.
    pub async fn publish(
        &self,
        partner: &dyn PartnerProvider,
        packages: &dyn PackageEnumerator,
        publish: &mut (dyn FnMut(CategoryRef) + Send),
    ) -> &[CategoryRef] {
        let mut computed_here = false;
        let computed = &mut computed_here;
        let sink = &mut *publish;
        let categories = self
            .categories
            .get_or_init(|| async move {
                *computed = true;
                tracing::debug!("Computing system categories");
                read_system_categories(partner.wallpaper_definition(), packages, sink)
            })
            .await;

        if !computed_here {
            tracing::debug!(count = categories.len(), "Replaying memoized system categories");
            for category in categories {
                publish(category.clone());
            }
        }
        categories
    }
}
