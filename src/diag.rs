use std::fmt;

use crate::syntax::Pos;

/// A non-fatal notice emitted while parsing, currently only the implicit
/// string deprecation warning. Never aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub pos: Pos,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.pos.line, self.pos.offset, self.message)
    }
}

/// Where the parser sends diagnostics. Hosts install their own sink to
/// capture, redirect, or suppress them; without one the parser falls back
/// to `log::warn!`.
pub trait DiagnosticSink {
    fn emit(&mut self, diag: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diag: Diagnostic) {
        self.push(diag);
    }
}
