pub mod repository;
pub mod roll;

pub use crate::domain::model::{Address, Course, Roll, Student};
pub use crate::domain::ports::{ConfigProvider, Terminal};
pub use crate::utils::error::Result;
