//! The item contract the scorer matches against.

/// A catalogue item as seen by the search engine.
///
/// Items are supplied and owned by the caller; the engine only reads the
/// three textual attributes it matches on. Identity (for de-duplication
/// when remote results are merged) stays with the caller.
///
/// An item missing both `name` and `specification` is unmatched: it scores
/// 0 and never appears among suggestions.
pub trait CatalogItem {
    /// Display name of the item.
    fn name(&self) -> Option<&str>;

    /// Free-form specification text (dimensions, variant, material).
    fn specification(&self) -> Option<&str>;

    /// Category label.
    fn category(&self) -> Option<&str>;
}

impl<T: CatalogItem + ?Sized> CatalogItem for &T {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn specification(&self) -> Option<&str> {
        (**self).specification()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }
}
