//! Utilities: logging, money arithmetic and date ranges

pub mod logger;
pub mod money;
pub mod time;
