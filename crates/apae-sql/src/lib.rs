//! SQL script assembly for converted assistido rows.
//!
//! The script is built fully in memory by [`render_script`] and written in
//! one atomic step by [`write_script`].

mod comment;
pub mod diagnostics;
pub mod error;
pub mod footer;
pub mod script;
pub mod writer;

pub use diagnostics::render_diagnostics;
pub use error::{Result, SqlError};
pub use footer::render_verification;
pub use script::{
    NO_RECORDS_MARKER, ScriptInput, ScriptOptions, render_insert, render_script, render_tuple,
};
pub use writer::write_script;
