use super::token::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Explicit `,` between list terms.
    Comma,
    /// Juxtaposition with no operator token, e.g. `"a" "b"`.
    Concat,

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

impl From<Operator> for BinaryOp {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Or => Self::Or,
            Operator::And => Self::And,
            Operator::Eq => Self::Eq,
            Operator::Neq => Self::Neq,
            Operator::Gt => Self::Gt,
            Operator::Gte => Self::Gte,
            Operator::Lt => Self::Lt,
            Operator::Lte => Self::Lte,
            Operator::Plus => Self::Plus,
            Operator::Minus => Self::Minus,
            Operator::Times => Self::Times,
            Operator::Div => Self::Div,
            Operator::Mod => Self::Mod,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    /// Grammar placement for slash-separated literal syntax; carries no
    /// arithmetic meaning of its own.
    Div,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'src> {
    Str(&'src str),
    Number(f64),
    Color(&'src str),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'src> {
    Binary {
        lhs: Box<Expr<'src>>,
        op: BinaryOp,
        rhs: Box<Expr<'src>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr<'src>>,
    },
    Funcall {
        name: &'src str,
        args: Vec<Expr<'src>>,
    },
    Variable {
        name: &'src str,
    },
    Literal(Value<'src>),
}
