//! Fill a filesystem with one large temporary file, then release it again.
//!
//! The library holds the fill/clear core and the [`session::Session`] that
//! sequences them; the binary wraps it in a terminal UI and one-shot CLI
//! actions.

pub mod collectors;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ops;
pub mod session;
pub mod util;

pub use error::{DiskFillError, Result};
pub use models::mode::Mode;
pub use models::status::StatusRecord;
pub use session::Session;
