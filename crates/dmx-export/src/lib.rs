mod error;
mod writer;

pub use error::ExportError;
pub use writer::{write_catalog, write_catalog_file, COLUMNS};
