//! Market data aggregate: symbols, suggestions, intraday samples and the
//! repository they come from.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::StockDataRepository;
pub use value_objects::*;
