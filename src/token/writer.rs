use log::trace;

use super::command::Command;

/// Builds a token stream. The output grows as needed; a highly fragmented input can need a
/// little more than its own length plus one byte.
#[derive(Debug, Default)]
pub struct TokenWriter {
    output: Vec<u8>,
    commands: usize,
}

impl TokenWriter {
    /// Create a writer with room for `capacity` bytes before reallocating.
    pub fn new(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            commands: 0,
        }
    }

    /// Append one command.
    pub fn push(&mut self, cmd: &Command<'_>) {
        trace!("{} {:?}", self.loc(), cmd);
        cmd.encode(&mut self.output);
        self.commands += 1;
    }

    /// Append pending raw bytes as a literal command. Does nothing for an empty slice.
    pub fn literal(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.push(&Command::Literal(bytes));
        }
    }

    /// Number of commands written so far, not counting the terminator.
    pub fn commands(&self) -> usize {
        self.commands
    }

    /// Terminate the stream and hand back the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        Command::Terminator.encode(&mut self.output);
        self.output
    }

    /// Debugging function to return the number of bytes output so far
    pub fn loc(&self) -> String {
        format!("[{:#06x}]", self.output.len())
    }
}
