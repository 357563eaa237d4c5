pub mod exec;
pub mod histogram;
pub mod parse;

pub use exec::{build, exec};
pub use histogram::Histogram;
pub use parse::{parse_line, parse_log};
