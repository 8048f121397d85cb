//! Command-logging bridge.
//!
//! Animations report progress and recording commands to whatever process
//! supervises them as line-delimited JSON on a byte stream (stdout by
//! default):
//!
//! ```text
//! {"type":"message","message":"orbit 3 complete"}
//! {"type":"command","action":"start","message":"Start recording"}
//! ```
//!
//! The render loop never talks to the bridge; applications do.

mod reader;
mod record;
mod writer;

pub use reader::{read_records, Records};
pub use record::{Action, Record};
pub use writer::CommandBridge;
