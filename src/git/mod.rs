mod log;

pub use log::{LogQuery, LOG_FORMAT};
