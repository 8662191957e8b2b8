//! Expression parser for the stylescript sublanguage. The host compiler
//! hands each embedded expression to [`syntax::Parser`] and receives an
//! AST; evaluation and printing live elsewhere.

pub mod diag;
pub mod error;
pub mod syntax;

pub use diag::{Diagnostic, DiagnosticSink};
pub use error::{PResult, SyntaxError};
pub use syntax::{Expr, Lexer, Parser};
