use std::io::Write;

use crate::host::Host;

#[derive(Debug, PartialEq)]
/// Whether the session keeps reading commands.
pub enum Execution {
    /// The session should stop and exit.
    Exit,
    /// The session should read the next command.
    Run,
}

/// Runtime state shared with command handlers.
///
/// The state borrows the host answering runtime queries and the two
/// console streams, so handlers never print directly.
pub struct State<'a> {
    host: &'a dyn Host,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    execution: Execution,
}

impl<'a> State<'a> {
    #[must_use]
    /// Create a session over `host`, printing to `out` and `err`.
    pub fn new(host: &'a dyn Host, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self {
            host,
            out,
            err,
            execution: Execution::Run,
        }
    }

    #[must_use]
    /// The host answering runtime queries.
    pub fn host(&self) -> &'a dyn Host {
        self.host
    }

    /// Stream for command output.
    pub fn out(&mut self) -> &mut (dyn Write + 'a) {
        self.out
    }

    /// Stream for diagnostics.
    pub fn err(&mut self) -> &mut (dyn Write + 'a) {
        self.err
    }

    #[must_use]
    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    pub fn set_execution(&mut self, execution: Execution) {
        self.execution = execution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::snapshot::Snapshot;

    #[test]
    fn test_state_streams_and_execution() {
        let host = Snapshot::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut state = State::new(&host, &mut out, &mut err);
            assert_eq!(*state.execution(), Execution::Run);
            writeln!(state.out(), "hello").expect("write");
            writeln!(state.err(), "oops").expect("write");
            state.set_execution(Execution::Exit);
            assert_eq!(*state.execution(), Execution::Exit);
        }
        assert_eq!(out, b"hello\n");
        assert_eq!(err, b"oops\n");
    }
}
