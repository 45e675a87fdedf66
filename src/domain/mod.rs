pub mod catalog;

pub use catalog::{CatalogError, ServiceCatalog, ServiceSummary};
