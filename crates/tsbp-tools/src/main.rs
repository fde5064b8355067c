//! tsbp CLI - Interactive setup wizard for the TypeScript boilerplate

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use setup_core::SetupArgs;

#[derive(Parser, Debug)]
#[command(name = "tsbp-tools")]
#[command(about = "Turns a freshly cloned TypeScript boilerplate into a configured project")]
#[command(version)]
pub struct Args {
    /// The boilerplate checkout to configure
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Skip npm dependency installation (for development/CI use)
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<Args> for SetupArgs {
    fn from(args: Args) -> Self {
        SetupArgs {
            directory: args.directory,
            skip_install: args.skip_install,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = setup_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
