//! Recursive-descent statement parser with a Pratt expression core (see [`expr`]).
//!
//! The parser never aborts on the first malformed statement (spec.md §4.4): each failure is
//! recorded in `errors` and the parser synchronizes to the next statement boundary before
//! continuing, so a single source file can report every syntax error it contains in one pass.

mod error;
mod expr;
mod precedence;

pub use error::ParseError;

use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

use precedence::Precedence;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            errors: vec![],
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];
        while self.cur.kind != TokenKind::Eof {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => self.synchronize(),
            }
            self.bump();
        }
        Program::new(statements)
    }

    fn bump(&mut self) {
        std::mem::swap(&mut self.cur, &mut self.peek);
        self.peek = self.lexer.next_token();
    }

    fn error(&mut self, message: impl Into<String>, position: crate::token::Position) {
        self.errors.push(ParseError::new(message, position));
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.bump();
            true
        } else {
            let position = self.peek.position;
            self.error(
                format!("expected {kind}, found {} ('{}')", self.peek.kind, self.peek.literal),
                position,
            );
            false
        }
    }

    /// Skip to the start of the next statement after a parse failure: consumes tokens until a
    /// `;`/`}` is consumed or a statement-leading keyword is next, so sibling statements still
    /// get parsed.
    fn synchronize(&mut self) {
        loop {
            match self.cur.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon | TokenKind::RBrace => return,
                _ => {}
            }
            if Self::starts_statement(self.peek.kind) {
                return;
            }
            self.bump();
        }
    }

    fn starts_statement(kind: TokenKind) -> bool {
        use TokenKind::*;
        matches!(
            kind,
            Let | If | While | For | Function | Async | Return | Class | Break | Continue | Throw
                | Try | Import | Export | LBrace | Eof
        )
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::Let => self.parse_var_decl(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Break => {
                let position = self.cur.position;
                self.consume_optional_semicolon();
                Some(Statement::Break(position))
            }
            TokenKind::Continue => {
                let position = self.cur.position;
                self.consume_optional_semicolon();
                Some(Statement::Continue(position))
            }
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Class => self.parse_class_decl(),
            TokenKind::Function => {
                let literal = self.parse_function_literal(false)?;
                self.consume_optional_semicolon();
                Some(Statement::FunctionDecl(literal))
            }
            TokenKind::Async => {
                if !self.expect_peek(TokenKind::Function) {
                    return None;
                }
                let literal = self.parse_function_literal(true)?;
                self.consume_optional_semicolon();
                Some(Statement::FunctionDecl(literal))
            }
            TokenKind::LBrace => self.parse_block().map(Statement::Block),
            TokenKind::Import => self.parse_import(),
            TokenKind::Export => self.parse_export(),
            _ => self.parse_expression_statement(),
        }
    }

    fn consume_optional_semicolon(&mut self) {
        if self.peek.kind == TokenKind::Semicolon {
            self.bump();
        }
    }

    fn parse_var_decl(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur.literal.clone();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.bump();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.consume_optional_semicolon();
        Some(Statement::VarDecl(VarDeclStmt { name, value, position }))
    }

    fn parse_return(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if self.peek.kind == TokenKind::Semicolon {
            self.bump();
            return Some(Statement::Return { value: None, position });
        }
        self.bump();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.consume_optional_semicolon();
        Some(Statement::Return {
            value: Some(value),
            position,
        })
    }

    fn parse_if(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.bump();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let then_block = self.parse_block()?;

        let else_block = if self.peek.kind == TokenKind::Else {
            self.bump();
            if self.peek.kind == TokenKind::If {
                self.bump();
                let nested = self.parse_if()?;
                Some(Block {
                    statements: vec![nested],
                    position: self.cur.position,
                })
            } else {
                if !self.expect_peek(TokenKind::LBrace) {
                    return None;
                }
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Some(Statement::If(IfStmt {
            condition,
            then_block,
            else_block,
            position,
        }))
    }

    fn parse_while(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.bump();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block()?;
        Some(Statement::While(WhileStmt { condition, body, position }))
    }

    fn parse_for(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        self.bump();
        let init = if self.cur.kind == TokenKind::Semicolon {
            None
        } else {
            Some(Box::new(self.parse_statement()?))
        };
        if self.cur.kind != TokenKind::Semicolon {
            if !self.expect_peek(TokenKind::Semicolon) {
                return None;
            }
        }

        self.bump();
        let condition = if self.cur.kind == TokenKind::Semicolon {
            None
        } else {
            Some(self.parse_expression(Precedence::Lowest)?)
        };
        if self.cur.kind != TokenKind::Semicolon {
            if !self.expect_peek(TokenKind::Semicolon) {
                return None;
            }
        }

        self.bump();
        let post = if self.cur.kind == TokenKind::RParen {
            None
        } else {
            Some(self.parse_expression(Precedence::Lowest)?)
        };
        if self.cur.kind != TokenKind::RParen {
            if !self.expect_peek(TokenKind::RParen) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block()?;

        Some(Statement::For(ForStmt {
            init,
            condition,
            post,
            body,
            position,
        }))
    }

    fn parse_throw(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        self.bump();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.consume_optional_semicolon();
        Some(Statement::Throw(ThrowStmt { value, position }))
    }

    fn parse_try(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let try_block = self.parse_block()?;

        let (catch_param, catch_block) = if self.peek.kind == TokenKind::Catch {
            self.bump();
            let param = if self.peek.kind == TokenKind::LParen {
                self.bump();
                if !self.expect_peek(TokenKind::Ident) {
                    return None;
                }
                let name = self.cur.literal.clone();
                if !self.expect_peek(TokenKind::RParen) {
                    return None;
                }
                Some(name)
            } else {
                None
            };
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            (param, Some(self.parse_block()?))
        } else {
            (None, None)
        };

        let finally_block = if self.peek.kind == TokenKind::Finally {
            self.bump();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block()?)
        } else {
            None
        };

        if catch_block.is_none() && finally_block.is_none() {
            self.error("try block must be followed by a catch or finally block", position);
            return None;
        }

        Some(Statement::Try(TryStmt {
            try_block,
            catch_param,
            catch_block,
            finally_block,
            position,
        }))
    }

    fn parse_class_decl(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur.literal.clone();
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let mut methods = vec![];
        while self.peek.kind != TokenKind::RBrace && self.peek.kind != TokenKind::Eof {
            self.bump();
            let is_async = if self.cur.kind == TokenKind::Async {
                self.bump();
                true
            } else {
                false
            };

            let method_name = match self.cur.kind {
                TokenKind::Constructor => "shuru".to_string(),
                TokenKind::Ident => self.cur.literal.clone(),
                other => {
                    let position = self.cur.position;
                    self.error(format!("expected method name, found {other}"), position);
                    return None;
                }
            };
            let method_position = self.cur.position;

            if !self.expect_peek(TokenKind::LParen) {
                return None;
            }
            let (params, rest_param) = self.parse_function_params()?;
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            let body = self.parse_block()?;

            methods.push(FunctionLiteral {
                name: Some(method_name),
                params,
                rest_param,
                body,
                is_async,
                position: method_position,
            });
        }
        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Statement::ClassDecl(ClassDecl { name, methods, position }))
    }

    fn parse_import(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        if !self.expect_peek(TokenKind::String) {
            return None;
        }
        let path = self.cur.literal.clone();
        if !self.expect_peek(TokenKind::As) {
            return None;
        }
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let alias = self.cur.literal.clone();
        self.consume_optional_semicolon();
        Some(Statement::Import(ImportStmt { path, alias, position }))
    }

    fn parse_export(&mut self) -> Option<Statement> {
        let position = self.cur.position;
        self.bump();
        let inner = Box::new(self.parse_statement()?);
        Some(Statement::Export(ExportStmt { inner, position }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.consume_optional_semicolon();
        Some(Statement::Expression(expr))
    }

    fn parse_block(&mut self) -> Option<Block> {
        let position = self.cur.position;
        let mut statements = vec![];
        self.bump();
        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::Eof {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => self.synchronize(),
            }
            self.bump();
        }
        if self.cur.kind != TokenKind::RBrace {
            self.error("unterminated block, expected '}'", position);
        }
        Some(Block { statements, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> Program {
        let mut parser = Parser::new(input);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "unexpected parse errors: {:?}", parser.errors());
        program
    }

    #[test]
    fn test_var_decl() {
        let program = parse_ok("dhoro x = 1;");
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(program.statements[0], Statement::VarDecl(_)));
    }

    #[test]
    fn test_operator_precedence() {
        let program = parse_ok("1 + 2 * 3;");
        let Statement::Expression(Expression::Binary(add)) = &program.statements[0] else {
            panic!("expected a binary expression statement");
        };
        assert_eq!(add.op, BinaryOp::Add);
        assert!(matches!(*add.rhs, Expression::Binary(ref mul) if mul.op == BinaryOp::Mul));
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let program = parse_ok("a = b = 1;");
        let Statement::Expression(Expression::Assignment(outer)) = &program.statements[0] else {
            panic!("expected an assignment expression statement");
        };
        assert!(matches!(*outer.value, Expression::Assignment(_)));
    }

    #[test]
    fn test_if_else_if_chain() {
        let program = parse_ok("jodi (sotti) { 1; } nahole jodi (mittha) { 2; } nahole { 3; }");
        let Statement::If(if_stmt) = &program.statements[0] else {
            panic!("expected an if statement");
        };
        assert!(if_stmt.else_block.is_some());
    }

    #[test]
    fn test_while_loop() {
        let program = parse_ok("jotokkhon (sotti) { thamo; }");
        assert!(matches!(program.statements[0], Statement::While(_)));
    }

    #[test]
    fn test_for_loop_all_clauses_optional() {
        let program = parse_ok("ghuriye (;;) { chharo; }");
        let Statement::For(for_stmt) = &program.statements[0] else {
            panic!("expected a for statement");
        };
        assert!(for_stmt.init.is_none());
        assert!(for_stmt.condition.is_none());
        assert!(for_stmt.post.is_none());
    }

    #[test]
    fn test_function_literal_with_rest_param() {
        let program = parse_ok("kaj sum(first, ...rest) { ferao first; }");
        let Statement::FunctionDecl(func) = &program.statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(func.params, vec!["first".to_string()]);
        assert_eq!(func.rest_param, Some("rest".to_string()));
    }

    #[test]
    fn test_class_decl_with_constructor() {
        let program = parse_ok("sreni Point { shuru(x, y) { ei.x = x; } }");
        let Statement::ClassDecl(class) = &program.statements[0] else {
            panic!("expected a class declaration");
        };
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, Some("shuru".to_string()));
    }

    #[test]
    fn test_try_without_catch_or_finally_is_an_error() {
        let mut parser = Parser::new("chesta { 1; }");
        parser.parse_program();
        assert!(!parser.errors().is_empty());
    }

    #[test]
    fn test_array_and_map_literals() {
        let program = parse_ok(r#"[1, 2, 3]; {a: 1, b: 2};"#);
        assert!(matches!(program.statements[0], Statement::Expression(Expression::Array(_))));
        assert!(matches!(program.statements[1], Statement::Expression(Expression::Map(_))));
    }

    #[test]
    fn test_member_and_call_chain() {
        let program = parse_ok("foo.bar()[0];");
        assert!(matches!(program.statements[0], Statement::Expression(Expression::Member(_))));
    }

    #[test]
    fn test_new_expression() {
        let program = parse_ok("notun Foo(1, 2);");
        assert!(matches!(program.statements[0], Statement::Expression(Expression::New(_))));
    }

    #[test]
    fn test_parser_collects_multiple_errors_and_recovers() {
        let mut parser = Parser::new("dhoro = 1; dhoro y = 2; dhoro = 3;");
        let program = parser.parse_program();
        assert_eq!(parser.errors().len(), 2);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_await_and_async_function_expression() {
        let program = parse_ok("dhoro f = osinkrono kaj() { ferao 1; }; opekha f();");
        assert!(matches!(program.statements[0], Statement::VarDecl(_)));
    }
}
