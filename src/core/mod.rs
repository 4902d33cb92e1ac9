pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{Catalog, Product, RawProduct, Region, RegionExtract};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
