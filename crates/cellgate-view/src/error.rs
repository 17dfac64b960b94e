//! Error types for the view layer.

/// Errors that can occur while projecting server state locally.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A map payload whose cell count is not an exact multiple of the row
    /// width. The previous grid is kept when this happens.
    #[error("malformed map: {len} cells do not divide into rows of {cx}")]
    MalformedMap { cx: usize, len: usize },

    /// A map with zero columns can't derive a row count.
    #[error("malformed map: row width is zero")]
    ZeroWidthMap,
}
