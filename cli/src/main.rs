use clap::Parser;
use gelf_tee::app;
use gelf_tee::commands::cli;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    std::process::exit(app::run(args).await);
}
