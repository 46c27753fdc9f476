mod common;
pub use self::common::Query;

mod series;
pub use self::series::{Function, OutputSize, SeriesQuery};
