//! Expression parsing: Pratt (precedence-climbing) for binary/assignment/call/member chains,
//! recursive descent for everything else. Shape follows the classic prefix/infix-dispatch
//! Pratt parser (curToken/peekToken, `parseExpression(precedence)` loop) that the keyword
//! surface and test naming in `original_source/` are written against.

use crate::ast::*;
use crate::token::TokenKind;

use super::precedence::{infix_precedence, recurse_precedence, Precedence};
use super::Parser;

impl<'a> Parser<'a> {
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.peek.kind != TokenKind::Semicolon && precedence < infix_precedence(self.peek.kind) {
            if !Self::has_infix(self.peek.kind) {
                break;
            }
            self.bump();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn has_infix(kind: TokenKind) -> bool {
        use TokenKind::*;
        matches!(
            kind,
            Assign
                | PlusAssign
                | MinusAssign
                | AsteriskAssign
                | SlashAssign
                | Or
                | And
                | Eq
                | NotEq
                | Lt
                | Gt
                | Lte
                | Gte
                | Plus
                | Minus
                | Asterisk
                | Slash
                | Percent
                | LParen
                | Dot
                | LBracket
        )
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::Number => self.parse_number_literal(),
            TokenKind::String => self.parse_string_literal(),
            TokenKind::True | TokenKind::False => self.parse_boolean_literal(),
            TokenKind::Null => self.parse_null_literal(),
            TokenKind::Ident => self.parse_ident_expr(),
            TokenKind::Bang | TokenKind::Minus | TokenKind::Not => self.parse_unary_expr(),
            TokenKind::Await => self.parse_await_expr(),
            TokenKind::New => self.parse_new_expr(),
            TokenKind::LParen => self.parse_grouped_expr(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_map_literal(),
            TokenKind::Function => self.parse_function_literal_expr(false),
            TokenKind::Async => self.parse_async_function_literal(),
            other => {
                let position = self.cur.position;
                self.error(format!("unexpected token {other} in expression position"), position);
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        use TokenKind::*;
        match self.cur.kind {
            Assign | PlusAssign | MinusAssign | AsteriskAssign | SlashAssign => {
                self.parse_assignment_expr(left)
            }
            Plus | Minus | Asterisk | Slash | Percent | Eq | NotEq | Lt | Gt | Lte | Gte | And
            | Or => self.parse_binary_expr(left),
            LParen => self.parse_call_expr(left),
            Dot => self.parse_member_expr(left, false),
            LBracket => self.parse_member_expr(left, true),
            _ => unreachable!("has_infix out of sync with parse_infix"),
        }
    }

    fn parse_number_literal(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        let value: f64 = self.cur.literal.parse().ok().or_else(|| {
            self.error(format!("invalid number literal '{}'", self.cur.literal), position);
            None
        })?;
        Some(Expression::Number(NumberLiteral { value, position }))
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        Some(Expression::Str(StringLiteral {
            value: self.cur.literal.clone(),
            position,
        }))
    }

    fn parse_boolean_literal(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        Some(Expression::Boolean(BooleanLiteral {
            value: self.cur.kind == TokenKind::True,
            position,
        }))
    }

    fn parse_null_literal(&mut self) -> Option<Expression> {
        Some(Expression::Null(NullLiteral {
            position: self.cur.position,
        }))
    }

    fn parse_ident_expr(&mut self) -> Option<Expression> {
        Some(Expression::Ident(Ident::new(self.cur.literal.clone(), self.cur.position)))
    }

    fn parse_unary_expr(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        let op = match self.cur.kind {
            TokenKind::Minus => UnaryOp::Negate,
            _ => UnaryOp::Not,
        };
        self.bump();
        let operand = Box::new(self.parse_expression(Precedence::Prefix)?);
        Some(Expression::Unary(UnaryExpr { op, operand, position }))
    }

    fn parse_await_expr(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        self.bump();
        let inner = Box::new(self.parse_expression(Precedence::Prefix)?);
        Some(Expression::Await(AwaitExpr { inner, position }))
    }

    fn parse_new_expr(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        self.bump();
        let class_expr = Box::new(self.parse_expression(Precedence::Call)?);
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let arguments = self.parse_call_arguments()?;
        Some(Expression::New(NewExpr {
            class_expr,
            arguments,
            position,
        }))
    }

    fn parse_grouped_expr(&mut self) -> Option<Expression> {
        self.bump();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        let elements = self.parse_expr_list(TokenKind::RBracket)?;
        Some(Expression::Array(ArrayLiteral { elements, position }))
    }

    fn parse_map_literal(&mut self) -> Option<Expression> {
        let position = self.cur.position;
        let mut entries = vec![];

        if self.peek.kind == TokenKind::RBrace {
            self.bump();
            return Some(Expression::Map(MapLiteral { entries, position }));
        }

        loop {
            self.bump();
            let key = match self.cur.kind {
                TokenKind::Ident | TokenKind::String => self.cur.literal.clone(),
                other => {
                    let position = self.cur.position;
                    self.error(format!("expected map key, found {other}"), position);
                    return None;
                }
            };
            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.bump();
            let value = self.parse_expression(Precedence::Lowest)?;
            entries.push((key, value));

            if self.peek.kind == TokenKind::Comma {
                self.bump();
                if self.peek.kind == TokenKind::RBrace {
                    self.bump();
                    break;
                }
                continue;
            }
            if !self.expect_peek(TokenKind::RBrace) {
                return None;
            }
            break;
        }

        Some(Expression::Map(MapLiteral { entries, position }))
    }

    fn parse_function_literal_expr(&mut self, is_async: bool) -> Option<Expression> {
        self.parse_function_literal(is_async).map(Expression::Function)
    }

    fn parse_async_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::Function) {
            return None;
        }
        self.parse_function_literal_expr(true)
    }

    /// Shared by function-literal expressions and function-declaration statements.
    pub(super) fn parse_function_literal(&mut self, is_async: bool) -> Option<FunctionLiteral> {
        let position = self.cur.position;

        let name = if self.peek.kind == TokenKind::Ident {
            self.bump();
            Some(self.cur.literal.clone())
        } else {
            None
        };

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let (params, rest_param) = self.parse_function_params()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block()?;

        Some(FunctionLiteral {
            name,
            params,
            rest_param,
            body,
            is_async,
            position,
        })
    }

    pub(super) fn parse_function_params(&mut self) -> Option<(Vec<String>, Option<String>)> {
        let mut params = vec![];
        let mut rest_param = None;

        if self.peek.kind == TokenKind::RParen {
            self.bump();
            return Some((params, rest_param));
        }

        self.bump();
        loop {
            if self.cur.kind == TokenKind::Dot {
                for _ in 0..2 {
                    if !self.expect_peek(TokenKind::Dot) {
                        return None;
                    }
                }
                if !self.expect_peek(TokenKind::Ident) {
                    return None;
                }
                rest_param = Some(self.cur.literal.clone());
            } else if self.cur.kind == TokenKind::Ident {
                params.push(self.cur.literal.clone());
            } else {
                let position = self.cur.position;
                self.error(format!("expected parameter name, found {}", self.cur.kind), position);
                return None;
            }

            if self.peek.kind == TokenKind::Comma {
                self.bump();
                self.bump();
                continue;
            }
            break;
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some((params, rest_param))
    }

    fn parse_binary_expr(&mut self, left: Expression) -> Option<Expression> {
        let position = self.cur.position;
        let op = match self.cur.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Asterisk => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Lte => BinaryOp::Lte,
            TokenKind::Gte => BinaryOp::Gte,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            other => unreachable!("not a binary operator token: {other}"),
        };
        let recurse_at = recurse_precedence(self.cur.kind);
        self.bump();
        let rhs = Box::new(self.parse_expression(recurse_at)?);
        Some(Expression::Binary(BinaryExpr {
            op,
            lhs: Box::new(left),
            rhs,
            position,
        }))
    }

    fn parse_assignment_expr(&mut self, left: Expression) -> Option<Expression> {
        let position = self.cur.position;
        let op = match self.cur.kind {
            TokenKind::Assign => AssignOp::Assign,
            TokenKind::PlusAssign => AssignOp::AddAssign,
            TokenKind::MinusAssign => AssignOp::SubAssign,
            TokenKind::AsteriskAssign => AssignOp::MulAssign,
            TokenKind::SlashAssign => AssignOp::DivAssign,
            other => unreachable!("not an assignment operator token: {other}"),
        };
        let target = match left {
            Expression::Ident(ident) => AssignTarget::Ident(ident),
            Expression::Member(member) => AssignTarget::Member(member),
            other => {
                self.error("left-hand side of assignment must be a variable or member access", position);
                let _ = other;
                return None;
            }
        };
        let recurse_at = recurse_precedence(self.cur.kind);
        self.bump();
        let value = Box::new(self.parse_expression(recurse_at)?);
        Some(Expression::Assignment(AssignmentExpr {
            target: Box::new(target),
            op,
            value,
            position,
        }))
    }

    fn parse_call_expr(&mut self, callee: Expression) -> Option<Expression> {
        let position = self.cur.position;
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call(CallExpr {
            callee: Box::new(callee),
            arguments,
            position,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        self.parse_expr_list(TokenKind::RParen)
    }

    fn parse_expr_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.peek.kind == end {
            self.bump();
            return Some(list);
        }

        self.bump();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.kind == TokenKind::Comma {
            self.bump();
            self.bump();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_member_expr(&mut self, object: Expression, computed: bool) -> Option<Expression> {
        let position = self.cur.position;
        let property = if computed {
            self.bump();
            let index = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenKind::RBracket) {
                return None;
            }
            index
        } else {
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            Expression::Ident(Ident::new(self.cur.literal.clone(), self.cur.position))
        };
        Some(Expression::Member(MemberExpr {
            object: Box::new(object),
            property: Box::new(property),
            computed,
            position,
        }))
    }
}
