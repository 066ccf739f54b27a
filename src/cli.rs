use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(about = "Checks the syntax of a template source file.")]
pub struct Args {
    /// Path to the template source file.
    pub input: PathBuf,
}

impl Args {
    pub fn parse() -> Self {
        clap::Parser::parse()
    }
}
