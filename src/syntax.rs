mod expr;
mod lexer;
mod parser;
mod token;

pub use expr::{BinaryOp, Expr, UnaryOp, Value};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Operator, Pos, Token, TokenKind};
