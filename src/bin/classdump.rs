use clap::Parser;
use std::{io, path::PathBuf};
use tracing_subscriber::EnvFilter;

use classdump_rs::{
    command::Registry,
    diag::Result,
    repl::Runner,
    session::{Execution, State},
    snapshot::Snapshot,
};

#[derive(Parser)]
#[command(version, about = "Print Objective-C methods and properties from a class dump")]
struct Args {
    /// JSON snapshot of the classes and objects to inspect
    snapshot: PathBuf,

    /// Run a command and exit instead of starting the REPL (repeatable)
    #[arg(short = 'e', long = "execute", value_name = "COMMAND")]
    execute: Vec<String>,

    /// File used to load and save the REPL history
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let snapshot = Snapshot::load(&args.snapshot)?;

    let mut out = io::stdout();
    let mut err = io::stderr();
    let mut state = State::new(&snapshot, &mut out, &mut err);

    if !args.execute.is_empty() {
        let registry = Registry::default();
        for command in &args.execute {
            registry.execute(command, &mut state)?;
            if *state.execution() == Execution::Exit {
                break;
            }
        }
        return Ok(());
    }

    let mut runner = Runner::new(args.history)?;
    while *state.execution() != Execution::Exit {
        runner.run(&mut state)?;
    }
    runner.save_history()
}
