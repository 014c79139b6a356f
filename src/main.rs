use clap::Parser;
use sinkddl::cli::args::Cli;
use sinkddl::cli::dispatch::handle;

fn main() {
    let cli = Cli::parse();
    handle(cli);
}
