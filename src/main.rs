//! hashmyfiles - Media Library Checksums
//!
//! Entry point for the hashmyfiles CLI application.

use clap::Parser;
use hashmyfiles::{
    cli::Cli,
    error::{ExitCode, StructuredError},
    integrity::IntegrityError,
    logging::init_logging,
};

fn main() {
    // Usage errors exit with 1, not clap's default of 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::GeneralError
            } else {
                ExitCode::Success
            };
            std::process::exit(code.as_i32());
        }
    };

    init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    } else {
        yansi::whenever(yansi::Condition::TTY_AND_COLOR);
    }

    let json_errors = cli.json_errors;

    match hashmyfiles::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = if err
                .downcast_ref::<IntegrityError>()
                .is_some_and(|e| matches!(e, IntegrityError::Interrupted))
            {
                ExitCode::Interrupted
            } else {
                ExitCode::GeneralError
            };

            if exit_code == ExitCode::Interrupted {
                eprintln!("\nOperation interrupted. Exiting...");
            }

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
