//! Process wiring and the line-based interactive surface shared by the binaries.

pub mod bootstrap;
pub mod command;
pub mod logging;
pub mod repl;

pub use bootstrap::AppContext;
pub use command::Command;
pub use logging::init_tracing;
pub use repl::{run_chat, run_qa};
