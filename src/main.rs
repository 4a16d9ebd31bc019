// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use sign_inference::cli::args::{Cli, Commands};
use sign_inference::cli::detect::{run_detection, run_voice};
use sign_inference::cli::logging::set_verbose;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Detect(args) => {
            set_verbose(args.verbose);
            run_detection(args);
        }
        Commands::Voice(args) => run_voice(args),
    }
}
