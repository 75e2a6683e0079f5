pub mod clean;
mod command_result;
pub mod convert;
pub mod extract;
pub mod helper;
pub mod init;
pub mod merge;
pub mod report;
pub mod stats;
pub mod validate;

pub use command_result::*;
