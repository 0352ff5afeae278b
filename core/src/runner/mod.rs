mod io_pump;
mod mux;
mod run;
mod traits;
pub mod types;

pub use io_pump::{pump_stderr, pump_stdout, LineStream};
pub use mux::{CapturedOutput, Multiplexer};
pub use run::{run_tee, RunTeeArgs};
pub use traits::{RunnerPlugin, RunnerSession};
pub use types::{ChildExit, OutputMode, RunOutcome, RunnerStartArgs};
