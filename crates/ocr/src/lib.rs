//! Text recognition engines.
//!
//! [`Tesseract`] shells out to the `tesseract` CLI. [`ColumnSplit`] wraps any
//! engine and recognizes the left and right halves of a page separately,
//! which keeps two-column layouts (patent specifications, journals) from
//! being read across the gutter.

pub mod columns;
pub mod tesseract;

pub use columns::ColumnSplit;
pub use tesseract::Tesseract;
