//! SourceCatalog port: does a book, movie or show with this title exist?

use std::future::Future;

use charchat_types::error::CatalogError;

/// A searchable catalog of works (movie database, book index, ...).
pub trait SourceCatalog: Send + Sync {
    /// Catalog name for logs (e.g., "omdb").
    fn name(&self) -> &str;

    /// Whether the catalog knows a work with this title.
    fn contains(&self, title: &str) -> impl Future<Output = Result<bool, CatalogError>> + Send;
}

/// Ask every catalog in turn; the source is known when any of them finds it.
///
/// Catalog errors are logged and count as "not found" for that catalog.
/// An empty catalog list accepts every title.
pub async fn source_is_known<C: SourceCatalog>(catalogs: &[C], title: &str) -> bool {
    if catalogs.is_empty() {
        return true;
    }

    for catalog in catalogs {
        match catalog.contains(title).await {
            Ok(true) => {
                tracing::debug!(catalog = catalog.name(), title, "source found");
                return true;
            }
            Ok(false) => {
                tracing::debug!(catalog = catalog.name(), title, "source not found");
            }
            Err(e) => {
                tracing::warn!(catalog = catalog.name(), title, error = %e, "catalog lookup failed");
            }
        }
    }
    false
}
