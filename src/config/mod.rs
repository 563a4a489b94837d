//! Configuration module

mod data;
mod relations;
mod site;

pub use data::{load_data_or_default, read_data_file, DataError};
pub use relations::RelationConfig;
pub use site::DataFilesConfig;
pub use site::RecommendationConfig;
pub use site::SiteConfig;
