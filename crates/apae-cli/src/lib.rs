//! Library side of the `apae-sql` command: logging setup and the conversion
//! workflow.

pub mod convert;
pub mod logging;
