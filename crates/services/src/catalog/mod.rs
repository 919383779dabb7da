mod loader;
mod parse;

pub use loader::{CatalogLoader, CatalogSource, CsvCatalogLoader, StaticCatalogLoader};
pub use parse::parse_csv;
