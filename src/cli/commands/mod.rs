//! Each subcommand lives in its own file so the match in `main` stays thin and each
//! handler owns its error reporting.

mod log;
mod pipe;
mod rotate;

pub use log::cmd_log;
pub use pipe::cmd_pipe;
pub use rotate::cmd_rotate;
