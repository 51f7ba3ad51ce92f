use std::env;

use brainfk::cli_util::program_name;
use brainfk::commands::run::{self, RunArgs};
use brainfk::logging::init_logging;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "brainfk",
    version,
    about = "Run a Brainfuck program on a 64K circular byte tape",
    after_help = "Settings also come from BRAINFK_TAPE_LEN, BRAINFK_EOF, BRAINFK_MEMO and the \
                  [interpreter] section of ~/.config/brainfk.toml (or $BRAINFK_CONFIG).\n\
                  Set BRAINFK_LOG=debug for diagnostics."
)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() {
    init_logging();

    let argv0 = env::args().next().unwrap_or_else(|| String::from("brainfk"));
    let program = program_name(&argv0).to_string();

    let cli = Cli::parse();
    let code = run::run(&program, cli.run);

    std::process::exit(code);
}
