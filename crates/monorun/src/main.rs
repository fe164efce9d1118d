mod cli;
mod tracing;

use std::{io, process};

use clap::Parser;

fn main() {
    let args = cli::Args::parse();
    crate::tracing::init(args.verbosity.into());

    let exit_code = match cli::run(&args, &mut io::stdout().lock()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            1
        }
    };

    process::exit(exit_code);
}
