/// Statement parsing.
///
/// Statements dispatch on their leading keyword. Every rule takes the current [`StatementContext`] by value so
/// that `return` / `break` / `continue` legality follows the nesting without an explicit stack.
///
/// ## Notes
/// - Rules ending in a nested statement (`if`, `while`, `for`, `with`, labels) do not call `semicolon()`: the
///   nested statement already consumed its own terminator.
impl<'a> Parser<'a> {
    // ========================================================================
    // Dispatch
    // ========================================================================

    fn statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::Keyword(id) => match id {
                KeywordId::Var | KeywordId::Let | KeywordId::Const => {
                    let start = self.start();
                    let mut declaration = self.variable_declaration(true)?;
                    self.semicolon()?;
                    *declaration.span_mut() = self.finish(start);
                    Ok(declaration)
                }
                KeywordId::If => self.if_statement(ctx),
                KeywordId::Switch => self.switch_statement(ctx),
                KeywordId::While => self.while_statement(ctx),
                KeywordId::For => self.for_statement(ctx),
                KeywordId::Do => self.do_while_statement(ctx),
                KeywordId::Break => self.break_statement(ctx),
                KeywordId::Continue => self.continue_statement(ctx),
                KeywordId::Function => self.function_declaration(false),
                KeywordId::Return => self.return_statement(ctx),
                KeywordId::Throw => self.throw_statement(),
                KeywordId::Try => self.try_statement(ctx),
                KeywordId::With => self.with_statement(ctx),
                KeywordId::Debugger => self.debugger_statement(),
                _ => self.expression_statement(),
            },
            TokenKind::Operator(OperatorId::LBrace) => self.block_statement(ctx),
            TokenKind::Operator(OperatorId::Semicolon) => {
                let span = self.advance().span;
                Ok(Node::EmptyStatement(EmptyStatement { span }))
            }
            TokenKind::Identifier => {
                if self.peek().value == "async" && self.peek_next().kind.is_keyword(KeywordId::Function) {
                    return self.function_declaration(true);
                }
                if let Some(labeled) = self.try_labeled_statement(ctx)? {
                    return Ok(labeled);
                }
                self.expression_statement()
            }
            _ => self.expression_statement(),
        }
    }

    fn expression_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let expression = self.parse_expression(true, true)?;
        self.semicolon()?;
        Ok(Node::ExpressionStatement(ExpressionStatement {
            span: self.finish(start),
            expression: Box::new(expression),
        }))
    }

    fn block_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_op(OperatorId::LBrace)?;
        let mut body = Vec::new();
        while !self.check_op(OperatorId::RBrace) {
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            body.push(self.statement(ctx)?);
        }
        self.advance();
        Ok(Node::BlockStatement(BlockStatement {
            span: self.finish(start),
            body,
        }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Parse `var|let|const declarator (, declarator)*` without the terminator.
    ///
    /// ## Parameters
    /// - `parse_in`: `false` inside a `for (...)` head, where `in` ends an initializer.
    fn variable_declaration(&mut self, parse_in: bool) -> Result<Node, ParseError> {
        let start = self.start();
        let kind = self
            .peek()
            .keyword_id()
            .and_then(VariableKind::from_keyword)
            .ok_or_else(|| self.unexpected())?;
        self.advance();

        let mut declarations = Vec::new();
        loop {
            let id = self.binding_identifier()?;
            let init = if self.match_op(OperatorId::Eq) {
                Some(Box::new(self.parse_expression(false, parse_in)?))
            } else {
                None
            };
            if kind == VariableKind::Const && init.is_none() {
                let name = id.identifier_name().unwrap_or_default();
                return Err(ParseError::missing_initializer("const declaration", self.peek())
                    .with_hint(format!("a `const` binding needs a value: `const {name} = ...;`")));
            }
            let span = Span::new(id.start(), self.prev_end);
            declarations.push(Node::VariableDeclarator(VariableDeclarator {
                span,
                id: Box::new(id),
                init,
            }));
            if !self.match_op(OperatorId::Comma) {
                break;
            }
        }

        Ok(Node::VariableDeclaration(VariableDeclaration {
            span: self.finish(start),
            declarations,
            kind,
        }))
    }

    /// Parse `[async] function [*] name (params) { body }` as a declaration.
    fn function_declaration(&mut self, is_async: bool) -> Result<Node, ParseError> {
        let function = self.function(is_async, true)?;
        Ok(Node::FunctionDeclaration(function))
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn if_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::If)?;
        let test = self.parenthesized()?;
        let consequent = self.statement(ctx)?;
        // `else` binds to the nearest `if`: an inner `if` parsed above has already taken it.
        let alternate = if self.match_keyword(KeywordId::Else) {
            Some(Box::new(self.statement(ctx)?))
        } else {
            None
        };
        Ok(Node::IfStatement(IfStatement {
            span: self.finish(start),
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate,
        }))
    }

    fn while_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::While)?;
        let test = self.parenthesized()?;
        let body = self.statement(ctx.in_loop())?;
        Ok(Node::WhileStatement(WhileStatement {
            span: self.finish(start),
            test: Box::new(test),
            body: Box::new(body),
        }))
    }

    fn do_while_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::Do)?;
        let body = self.statement(ctx.in_loop())?;
        self.expect_keyword(KeywordId::While)?;
        let test = self.parenthesized()?;
        self.semicolon()?;
        Ok(Node::DoWhileStatement(DoWhileStatement {
            span: self.finish(start),
            body: Box::new(body),
            test: Box::new(test),
        }))
    }

    /// Parse `for (init; test; update) body` or `for (left in right) body`.
    ///
    /// ## Notes
    /// - A declaration head is first probed as `var|let|const <id> in`. If that fails the cursor is restored and the
    ///   head is reparsed as an ordinary declaration list.
    fn for_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::For)?;
        self.expect_op(OperatorId::LParen)?;

        let init = if self.check_op(OperatorId::Semicolon) {
            None
        } else if matches!(
            self.peek().keyword_id(),
            Some(KeywordId::Var | KeywordId::Let | KeywordId::Const)
        ) {
            if let Some(left) = self.try_for_in_declaration()? {
                return self.for_in_rest(start, left, ctx);
            }
            Some(self.variable_declaration(false)?)
        } else {
            let expression = self.parse_expression(true, false)?;
            if self.match_keyword(KeywordId::In) {
                if !expression.is_assignable() {
                    return Err(ParseError::invalid_lhs("for-in loop", self.peek()));
                }
                return self.for_in_rest(start, expression, ctx);
            }
            Some(expression)
        };
        self.expect_op(OperatorId::Semicolon)?;

        let test = if self.check_op(OperatorId::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression(true, true)?))
        };
        self.expect_op(OperatorId::Semicolon)?;

        let update = if self.check_op(OperatorId::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expression(true, true)?))
        };
        self.expect_op(OperatorId::RParen)?;

        let body = self.statement(ctx.in_loop())?;
        Ok(Node::ForStatement(ForStatement {
            span: self.finish(start),
            init: init.map(Box::new),
            test,
            update,
            body: Box::new(body),
        }))
    }

    /// Probe `var|let|const <id> in`; on success the cursor sits after `in`.
    fn try_for_in_declaration(&mut self) -> Result<Option<Node>, ParseError> {
        let checkpoint = self.checkpoint();
        let start = self.start();
        let kind = self.peek().keyword_id().and_then(VariableKind::from_keyword);
        self.advance();

        let (Some(kind), true) = (kind, self.check_identifier()) else {
            self.restore(checkpoint);
            return Ok(None);
        };
        let id = self.binding_identifier()?;
        if !self.match_keyword(KeywordId::In) {
            self.restore(checkpoint);
            return Ok(None);
        }

        let end = id.end();
        let declarator = Node::VariableDeclarator(VariableDeclarator {
            span: id.span(),
            id: Box::new(id),
            init: None,
        });
        Ok(Some(Node::VariableDeclaration(VariableDeclaration {
            span: Span::new(start, end),
            declarations: vec![declarator],
            kind,
        })))
    }

    /// Parse `right) body` after `for (left in`.
    fn for_in_rest(&mut self, start: usize, left: Node, ctx: StatementContext) -> Result<Node, ParseError> {
        let right = self.parse_expression(true, true)?;
        self.expect_op(OperatorId::RParen)?;
        let body = self.statement(ctx.in_loop())?;
        Ok(Node::ForInStatement(ForInStatement {
            span: self.finish(start),
            left: Box::new(left),
            right: Box::new(right),
            body: Box::new(body),
        }))
    }

    fn switch_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::Switch)?;
        let discriminant = self.parenthesized()?;
        self.expect_op(OperatorId::LBrace)?;

        let case_ctx = ctx.in_switch();
        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.match_op(OperatorId::RBrace) {
            let case_start = self.start();
            let test = if self.match_keyword(KeywordId::Case) {
                Some(Box::new(self.parse_expression(true, true)?))
            } else if self.check_keyword(KeywordId::Default) {
                if seen_default {
                    return Err(self.unexpected());
                }
                seen_default = true;
                self.advance();
                None
            } else {
                return Err(self.unexpected());
            };
            self.expect_op(OperatorId::Colon)?;

            let mut consequent = Vec::new();
            while !(self.check_keyword(KeywordId::Case)
                || self.check_keyword(KeywordId::Default)
                || self.check_op(OperatorId::RBrace))
            {
                if self.is_at_end() {
                    return Err(self.unexpected());
                }
                consequent.push(self.statement(case_ctx)?);
            }
            cases.push(Node::SwitchCase(SwitchCase {
                span: self.finish(case_start),
                test,
                consequent,
            }));
        }

        Ok(Node::SwitchStatement(SwitchStatement {
            span: self.finish(start),
            discriminant: Box::new(discriminant),
            cases,
        }))
    }

    // ========================================================================
    // Jumps
    // ========================================================================

    fn break_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        if !ctx.allow_break {
            return Err(ParseError::illegal_statement("break", self.peek()));
        }
        let start = self.start();
        self.advance();
        let label = self.jump_label()?;
        self.semicolon()?;
        Ok(Node::BreakStatement(BreakStatement {
            span: self.finish(start),
            label,
        }))
    }

    fn continue_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        if !ctx.allow_continue {
            return Err(ParseError::illegal_statement("continue", self.peek()));
        }
        let start = self.start();
        self.advance();
        let label = self.jump_label()?;
        self.semicolon()?;
        Ok(Node::ContinueStatement(ContinueStatement {
            span: self.finish(start),
            label,
        }))
    }

    /// Optional label after `break` / `continue`, which must sit on the same line.
    fn jump_label(&mut self) -> Result<Option<Box<Node>>, ParseError> {
        if self.check_identifier() && !self.newline_before() {
            Ok(Some(Box::new(self.binding_identifier()?)))
        } else {
            Ok(None)
        }
    }

    fn return_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        if !ctx.allow_return {
            return Err(ParseError::illegal_statement("return", self.peek()));
        }
        let start = self.start();
        self.advance();
        let argument = if self.is_at_end()
            || self.check_op(OperatorId::Semicolon)
            || self.check_op(OperatorId::RBrace)
            || self.newline_before()
        {
            None
        } else {
            Some(Box::new(self.parse_expression(true, true)?))
        };
        self.semicolon()?;
        Ok(Node::ReturnStatement(ReturnStatement {
            span: self.finish(start),
            argument,
        }))
    }

    fn throw_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::Throw)?;
        let argument = self.parse_expression(true, true)?;
        self.semicolon()?;
        Ok(Node::ThrowStatement(ThrowStatement {
            span: self.finish(start),
            argument: Box::new(argument),
        }))
    }

    // ========================================================================
    // Other statements
    // ========================================================================

    /// Parse `try block [catch (param) block] [finally block]`; at least one handler is required.
    fn try_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::Try)?;
        let block = self.block_statement(ctx)?;

        let handler = if self.check_keyword(KeywordId::Catch) {
            let catch_start = self.start();
            self.advance();
            self.expect_op(OperatorId::LParen)?;
            let param = self.binding_identifier()?;
            self.expect_op(OperatorId::RParen)?;
            let body = self.block_statement(ctx)?;
            Some(Box::new(Node::CatchClause(CatchClause {
                span: self.finish(catch_start),
                param: Box::new(param),
                body: Box::new(body),
            })))
        } else {
            None
        };

        let finalizer = if self.match_keyword(KeywordId::Finally) {
            Some(Box::new(self.block_statement(ctx)?))
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected());
        }

        Ok(Node::TryStatement(TryStatement {
            span: self.finish(start),
            block: Box::new(block),
            handler,
            finalizer,
        }))
    }

    fn with_statement(&mut self, ctx: StatementContext) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::With)?;
        let object = self.parenthesized()?;
        let body = self.statement(ctx)?;
        Ok(Node::WithStatement(WithStatement {
            span: self.finish(start),
            object: Box::new(object),
            body: Box::new(body),
        }))
    }

    fn debugger_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::Debugger)?;
        self.semicolon()?;
        Ok(Node::DebuggerStatement(DebuggerStatement {
            span: self.finish(start),
        }))
    }

    /// Probe `<identifier> :`. Restores the cursor and returns `None` if the colon is missing.
    fn try_labeled_statement(&mut self, ctx: StatementContext) -> Result<Option<Node>, ParseError> {
        let checkpoint = self.checkpoint();
        let start = self.start();
        let label = self.binding_identifier()?;
        if !self.match_op(OperatorId::Colon) {
            self.restore(checkpoint);
            return Ok(None);
        }
        let body = self.statement(ctx)?;
        Ok(Some(Node::LabeledStatement(LabeledStatement {
            span: self.finish(start),
            label: Box::new(label),
            body: Box::new(body),
        })))
    }
}
