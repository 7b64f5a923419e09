use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::FileHistory,
    validate::Validator,
    Context, Editor, Helper,
};
use std::path::PathBuf;
use tracing::debug;

use crate::{command::Registry, diag::Result, session::State};

const PROMPT: &str = "(objc) ";

struct CmdHelper {
    options: Vec<String>,
}

impl CmdHelper {
    // Only the command word is completed; arguments are free-form handles.
    fn candidates(&self, line: &str) -> Vec<Pair> {
        if line.contains(char::is_whitespace) {
            return vec![];
        }

        self.options
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect()
    }
}

impl Completer for CmdHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(&line[..pos])))
    }
}

impl Hinter for CmdHelper {
    type Hint = String;
}
impl Highlighter for CmdHelper {}
impl Validator for CmdHelper {}
impl Helper for CmdHelper {}

/// REPL runner that manages the line-editor and command registry.
///
/// Construct a `Runner` with `Runner::new()` and call `run(state)` to read
/// a single line of input and dispatch the corresponding command.
pub struct Runner {
    readline: Editor<CmdHelper, FileHistory>,
    registry: Registry,
    history: Option<PathBuf>,
}

impl Runner {
    /// Construct a new REPL `Runner` with the default command registry.
    ///
    /// When `history` is given, previous entries are loaded from it and
    /// `save_history` writes the session back.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `rustyline::Editor` cannot be
    /// created.
    pub fn new(history: Option<PathBuf>) -> Result<Self> {
        let registry = Registry::default();
        let mut readline = Editor::new()?;
        readline.set_helper(Some(CmdHelper {
            options: registry.completions(),
        }));

        if let Some(path) = &history {
            if let Err(e) = readline.load_history(path) {
                debug!("no history loaded from {}: {e}", path.display());
            }
        }

        Ok(Self {
            readline,
            registry,
            history,
        })
    }

    /// Read a single line from the user and execute it.
    ///
    /// An empty line repeats the previous command. End of input and
    /// interrupts quit the session.
    ///
    /// # Errors
    ///
    /// Returns an error when readline operations fail or when the session
    /// streams cannot be written.
    pub fn run(&mut self, state: &mut State) -> Result<()> {
        match self.readline.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                let input = if trimmed.is_empty() {
                    self.readline
                        .history()
                        .into_iter()
                        .last()
                        .map_or("", |s| s.trim())
                } else {
                    self.readline.add_history_entry(trimmed)?;
                    trimmed
                };

                self.registry.execute(input, state)
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                self.registry.execute("quit", state)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the history file, if one was configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be written.
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(path) = &self.history {
            self.readline.save_history(path)?;
        }
        Ok(())
    }
}
