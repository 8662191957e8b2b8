/// 1-based source position, tracked per token for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: u32,
    pub offset: u32,
}

/// Binary operator tokens. `not` is not listed here since it only ever
/// appears in unary position; it gets its own token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Or,
    And,

    Eq,
    Neq,

    Gt,
    Gte,
    Lt,
    Lte,

    Plus,
    Minus,
    Times,
    Div,
    Mod,
}

impl Operator {
    pub fn name(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Div => "div",
            Self::Mod => "mod",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind<'src> {
    Ident(&'src str),
    Var(&'src str),
    Str(&'src str),
    Number(f64),
    Color(&'src str),
    Bool(bool),

    Op(Operator),
    Not,

    LParen,
    RParen,
    Comma,

    Unknown(char),
}

impl<'src> TokenKind<'src> {
    /// Stable lowercase name used in syntax error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ident(_) => "ident",
            Self::Var(_) => "variable",
            Self::Str(_) => "string",
            Self::Number(_) => "number",
            Self::Color(_) => "color",
            Self::Bool(_) => "bool",
            Self::Op(op) => op.name(),
            Self::Not => "not",
            Self::LParen => "lparen",
            Self::RParen => "rparen",
            Self::Comma => "comma",
            Self::Unknown(_) => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub pos: Pos,
}
