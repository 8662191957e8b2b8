use crate::{
    diag::{Diagnostic, DiagnosticSink},
    error::{PResult, SyntaxError},
    syntax::{
        expr::{BinaryOp, Expr, UnaryOp, Value},
        lexer::Lexer,
        token::{Operator, Pos, Token, TokenKind},
    },
};

/// Binary precedence tiers, loosest first. The tier below the last
/// delegates to the unary chain. The comma and concat levels sit above
/// this table: comma matches a structural token rather than an operator,
/// and concat has no token at all.
const BINARY_TIERS: [&[Operator]; 6] = [
    &[Operator::Or],
    &[Operator::And],
    &[Operator::Eq, Operator::Neq],
    &[Operator::Gt, Operator::Gte, Operator::Lt, Operator::Lte],
    &[Operator::Plus, Operator::Minus],
    &[Operator::Times, Operator::Div, Operator::Mod],
];

/// Recursive-descent parser for one embedded expression.
///
/// Every production returns `Ok(None)` when it declines to match (the
/// token stream is left untouched) and `Err` only for a hard syntax
/// error. The cursor is never rewound, so the descent never backtracks.
pub struct Parser<'s, 'd> {
    lexer: Lexer<'s>,
    sink: Option<&'d mut dyn DiagnosticSink>,
}

impl<'s, 'd> Parser<'s, 'd> {
    pub fn new(src: &'s str) -> Self {
        Self::with_position(src, 1, 1)
    }

    pub fn with_position(src: &'s str, line: u32, offset: u32) -> Self {
        Self {
            lexer: Lexer::with_position(src, line, offset),
            sink: None,
        }
    }

    /// Routes diagnostics to `sink` instead of the `log` fallback. The
    /// sink borrow is independent of the source, so one sink can serve
    /// many parses and outlive none of their trees.
    pub fn with_sink(mut self, sink: &'d mut dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Parses one expression. Trailing tokens are left in the stream for
    /// the host grammar; use [`Parser::into_lexer`] to pick them up.
    pub fn parse(&mut self) -> PResult<Box<Expr<'s>>> {
        self.assert_expr(Self::expr)
    }

    /// Hands the cursor back so the host can continue after the
    /// expression.
    pub fn into_lexer(self) -> Lexer<'s> {
        self.lexer
    }

    fn expr(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        let mut e = match self.concat()? {
            None => return Ok(None),
            Some(e) => e,
        };

        while self.try_tok(|k| matches!(k, TokenKind::Comma)).is_some() {
            let rhs = self.assert_expr(Self::concat)?;
            e = Box::new(Expr::Binary {
                lhs: e,
                op: BinaryOp::Comma,
                rhs,
            });
        }

        Ok(Some(e))
    }

    fn concat(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        let mut e = match self.binary_level(0)? {
            None => return Ok(None),
            Some(e) => e,
        };

        // No separator: any directly adjacent operand concatenates.
        while let Some(rhs) = self.binary_level(0)? {
            e = Box::new(Expr::Binary {
                lhs: e,
                op: BinaryOp::Concat,
                rhs,
            });
        }

        Ok(Some(e))
    }

    fn binary_level(&mut self, tier: usize) -> PResult<Option<Box<Expr<'s>>>> {
        let mut e = match self.binary_operand(tier)? {
            None => return Ok(None),
            Some(e) => e,
        };

        while let Some(op) = self.try_op(BINARY_TIERS[tier]) {
            let rhs = self.assert_expr(|p| p.binary_operand(tier))?;
            e = Box::new(Expr::Binary {
                lhs: e,
                op: op.into(),
                rhs,
            });
        }

        Ok(Some(e))
    }

    fn binary_operand(&mut self, tier: usize) -> PResult<Option<Box<Expr<'s>>>> {
        if tier + 1 < BINARY_TIERS.len() {
            self.binary_level(tier + 1)
        } else {
            self.unary_minus()
        }
    }

    fn unary_minus(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        if self.try_op(&[Operator::Minus]).is_none() {
            return self.unary_div();
        }
        let operand = self.assert_expr(Self::unary_minus)?;
        Ok(Some(Box::new(Expr::Unary {
            op: UnaryOp::Minus,
            operand,
        })))
    }

    // Placed here so slash-separated literal syntax like `/foo/bar`
    // parses at this precedence.
    fn unary_div(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        if self.try_op(&[Operator::Div]).is_none() {
            return self.unary_not();
        }
        let operand = self.assert_expr(Self::unary_div)?;
        Ok(Some(Box::new(Expr::Unary {
            op: UnaryOp::Div,
            operand,
        })))
    }

    fn unary_not(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        if self.try_tok(|k| matches!(k, TokenKind::Not)).is_none() {
            return self.funcall();
        }
        let operand = self.assert_expr(Self::unary_not)?;
        Ok(Some(Box::new(Expr::Unary {
            op: UnaryOp::Not,
            operand,
        })))
    }

    fn funcall(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        let (name, pos) = match self.lexer.peek() {
            Some(&Token {
                kind: TokenKind::Ident(name),
                pos,
            }) => {
                self.lexer.bump();
                (name, pos)
            }
            _ => return self.paren(),
        };

        if self.try_tok(|k| matches!(k, TokenKind::LParen)).is_none() {
            // Backward-compatibility fallback, not an error.
            self.warn(
                format!(
                    "Implicit strings are deprecated. '{name}' was not quoted. \
                     Please add double quotes, e.g. \"{name}\"."
                ),
                pos,
            );
            return Ok(Some(Box::new(Expr::Literal(Value::Str(name)))));
        }

        let args = self.arglist()?;
        self.assert_tok(|k| matches!(k, TokenKind::RParen), &["rparen"])?;
        Ok(Some(Box::new(Expr::Funcall { name, args })))
    }

    // Arguments parse at the concat level so a comma always separates
    // them instead of building a comma-level list.
    fn arglist(&mut self) -> PResult<Vec<Expr<'s>>> {
        let mut args = Vec::new();

        let first = match self.concat()? {
            None => return Ok(args),
            Some(e) => e,
        };
        args.push(*first);

        while self.try_tok(|k| matches!(k, TokenKind::Comma)).is_some() {
            let arg = self.assert_expr(Self::concat)?;
            args.push(*arg);
        }

        Ok(args)
    }

    fn paren(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        if self.try_tok(|k| matches!(k, TokenKind::LParen)).is_none() {
            return self.variable();
        }
        // Transparent grouping: the inner node is returned as-is.
        let e = self.assert_expr(Self::expr)?;
        self.assert_tok(|k| matches!(k, TokenKind::RParen), &["rparen"])?;
        Ok(Some(e))
    }

    fn variable(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        match self.lexer.peek() {
            Some(&Token {
                kind: TokenKind::Var(name),
                ..
            }) => {
                self.lexer.bump();
                Ok(Some(Box::new(Expr::Variable { name })))
            }
            _ => self.literal(),
        }
    }

    fn literal(&mut self) -> PResult<Option<Box<Expr<'s>>>> {
        let value = match self.lexer.peek() {
            Some(&Token {
                kind: TokenKind::Str(s),
                ..
            }) => Value::Str(s),
            Some(&Token {
                kind: TokenKind::Number(n),
                ..
            }) => Value::Number(n),
            Some(&Token {
                kind: TokenKind::Color(c),
                ..
            }) => Value::Color(c),
            Some(&Token {
                kind: TokenKind::Bool(b),
                ..
            }) => Value::Bool(b),
            _ => return Ok(None),
        };
        self.lexer.bump();
        Ok(Some(Box::new(Expr::Literal(value))))
    }

    fn try_tok<P>(&mut self, predicate: P) -> Option<Token<'s>>
    where
        P: Fn(&TokenKind<'s>) -> bool,
    {
        match self.lexer.peek() {
            Some(tok) if predicate(&tok.kind) => self.lexer.next_token(),
            _ => None,
        }
    }

    fn try_op(&mut self, ops: &[Operator]) -> Option<Operator> {
        match self.lexer.peek() {
            Some(&Token {
                kind: TokenKind::Op(op),
                ..
            }) if ops.contains(&op) => {
                self.lexer.bump();
                Some(op)
            }
            _ => None,
        }
    }

    fn assert_expr<F>(&mut self, production: F) -> PResult<Box<Expr<'s>>>
    where
        F: FnOnce(&mut Self) -> PResult<Option<Box<Expr<'s>>>>,
    {
        if let Some(e) = production(self)? {
            return Ok(e);
        }
        let found = self.unexpected();
        Err(self.syntax_error(format!("Expected expression, was {found}.")))
    }

    fn assert_tok<P>(&mut self, predicate: P, wanted: &[&str]) -> PResult<Token<'s>>
    where
        P: Fn(&TokenKind<'s>) -> bool,
    {
        if let Some(tok) = self.try_tok(predicate) {
            return Ok(tok);
        }
        let found = self.unexpected();
        let wanted = wanted.join(" or ");
        Err(self.syntax_error(format!("Expected {wanted} token, was {found}.")))
    }

    fn unexpected(&mut self) -> String {
        match self.lexer.peek() {
            None => "end of text".to_string(),
            Some(tok) => format!("{} token", tok.kind.name()),
        }
    }

    fn syntax_error(&mut self, message: String) -> SyntaxError {
        let pos = match self.lexer.peek() {
            Some(tok) => tok.pos,
            None => self.lexer.pos(),
        };
        SyntaxError {
            message,
            line: pos.line,
            offset: pos.offset,
        }
    }

    fn warn(&mut self, message: String, pos: Pos) {
        let diag = Diagnostic { message, pos };
        match &mut self.sink {
            Some(sink) => sink.emit(diag),
            None => log::warn!("{diag}"),
        }
    }
}
