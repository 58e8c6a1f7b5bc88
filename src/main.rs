//! opengithub CLI application entry point
//!
//! Resolves a file reference (argument or clipboard) to its GitHub URL,
//! prints it and opens it in the default browser.
//!
//! # Usage
//!
//! ```bash
//! # Copy "internal/server/handler.go:88" in your editor, then
//! opengithub
//!
//! # Or pass it explicitly
//! opengithub internal/server/handler.go:88 --root ~/src/acme
//!
//! # Print only, for scripting
//! opengithub -q --no-open README.md
//! ```
//!
//! # Configuration
//!
//! Defaults can be set in `~/.config/opengithub/config.toml` (`root`,
//! `branch`, `open`, `quiet`) or with `OPENGITHUB_*` environment variables.

use std::process::ExitCode;

use opengithub::{
    OpenGithubError,
    app::App,
    cli::Cli,
    config::Settings,
    logging,
    output::{OutputWriter, StdoutWriter},
    platform::{ArboardClipboard, SystemOpener},
};

type Result<T> = std::result::Result<T, OpenGithubError>;

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load()?.with_overrides(cli.overrides());
    let output = StdoutWriter::new(settings.quiet);

    let clipboard = ArboardClipboard;
    let opener = SystemOpener;
    App::new(&clipboard, &opener, &output).run(cli.input(), &settings)?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            StdoutWriter::new(false).error(&format!("Fatal error: {e}"));
            ExitCode::FAILURE
        }
    }
}
