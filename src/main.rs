mod cli;

use std::fs;
use std::process::ExitCode;

use miette::NamedSource;

use self::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    let contents = match fs::read_to_string(&args.input) {
        Ok(contents) => contents,

        Err(e) => {
            eprintln!(
                "Could not read the input file `{}`: {e}",
                args.input.display()
            );

            return ExitCode::from(2);
        }
    };

    // Platform line endings are normalized before recognition; the core
    // treats `\n` as the sole newline marker.
    let contents = contents.replace("\r\n", "\n");

    match tplcheck::validate(&contents) {
        Ok(()) => {
            println!("{}: syntax OK", args.input.display());

            ExitCode::SUCCESS
        }

        Err(e) => {
            let report = miette::Report::new(e).with_source_code(NamedSource::new(
                args.input.display().to_string(),
                contents,
            ));
            eprintln!("{report:?}");

            ExitCode::FAILURE
        }
    }
}
