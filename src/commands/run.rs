use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::{debug, warn};

use crate::cli_util::print_error;
use crate::config::{self, parse_tape_len, Overrides};
use crate::interpreter::{EofPolicy, Interpreter};
use crate::source::load_program;

/// Exit status after Ctrl+C, following the shell's 128 + SIGINT convention.
const INTERRUPTED: i32 = 130;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Brainfuck source file; `//` starts a comment that runs to the end of the line
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Number of tape cells (fallback BRAINFK_TAPE_LEN, then the config file; default 65536)
    #[arg(short = 't', long = "tape-len", value_name = "CELLS", value_parser = parse_tape_len)]
    pub tape_len: Option<usize>,

    /// What `,` stores at end of input (fallback BRAINFK_EOF, then the config file; default zero)
    #[arg(short = 'e', long = "eof", value_name = "POLICY", value_enum)]
    pub eof: Option<EofPolicy>,

    /// Resolve loop spans on every loop entry instead of caching them
    #[arg(long = "no-memo")]
    pub no_memo: bool,
}

impl RunArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            tape_len: self.tape_len,
            eof: self.eof,
            memoize_spans: self.no_memo.then_some(false),
        }
    }
}

/// Load, sanitize and execute the program at `args.path`.
///
/// Returns the process exit status: 0 on success, 1 on any fatal error.
pub fn run(program: &str, args: RunArgs) -> i32 {
    // Flush whatever the program printed before exiting on SIGINT.
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(INTERRUPTED);
    }) {
        warn!("failed to set ctrl+c handler: {e}");
    }

    let settings = config::resolve(args.overrides());
    debug!(
        tape_len = settings.tape_len,
        eof = %settings.eof,
        memoize_spans = settings.memoize_spans,
        "resolved settings"
    );

    let code = match load_program(&args.path) {
        Ok(code) => code,
        Err(err) => {
            print_error(program, None, &err);
            return 1;
        }
    };

    let result = Interpreter::from_settings(&settings, io::stdin(), io::stdout())
        .and_then(|mut bf| bf.run(&code));

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(program, Some(&code), &err);
            1
        }
    }
}
