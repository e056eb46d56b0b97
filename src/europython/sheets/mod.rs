pub mod collect;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod reconcile;
pub mod source;
pub mod sync;
pub mod text;

pub use error::{Result, ToolError};
