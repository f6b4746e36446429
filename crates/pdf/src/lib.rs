//! PDF backend: document loading via `lopdf` and page rendering via
//! poppler's `pdftoppm`.

pub mod loader;
pub mod pdftoppm;

pub use loader::PdfLoader;
pub use pdftoppm::Pdftoppm;
