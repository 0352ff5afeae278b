use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "gelf-tee",
    version,
    about = "Run a command, echo its output and relay it to a GELF collector",
    override_usage = "gelf-tee [OPTIONS] <COMMAND> [ARG]..."
)]
pub struct Args {
    /// Send one record per output line instead of one record per stream.
    #[arg(long)]
    pub split: bool,

    /// GELF collector host [default: localhost].
    #[arg(long)]
    pub logserver: Option<String>,

    /// GELF collector UDP port [default: 12201].
    #[arg(long)]
    pub port: Option<u16>,

    /// Config file to use instead of the default search path.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Command to run, followed by its arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
