/// Expression parsing.
///
/// `parse_expression` parses one operand with `factor` and then runs the binary-operator loop. `factor` handles
/// every prefix form and primary expression, followed by a postfix loop (member access, calls, postfix update,
/// assignment, comma sequences, `?:`) that repeats until nothing more applies.
///
/// ## Notes
/// - Binary and unary operands are parsed without sequences, conditionals or assignment; those apply to the whole
///   folded expression.
/// - Assignment is a postfix form: its target has already been parsed when the operator is seen, so the target
///   check happens there. `a + b = c` reaches it with `a + b` as the target and is rejected.
impl<'a> Parser<'a> {
    // ========================================================================
    // Binary expressions
    // ========================================================================

    /// Parse an expression.
    ///
    /// ## Parameters
    /// - `parse_sequence`: allow a top-level `a, b` sequence (off for arguments, elements and initializers).
    /// - `parse_in`: treat `in` as a binary operator (off in a `for (...)` head).
    fn parse_expression(&mut self, parse_sequence: bool, parse_in: bool) -> Result<Node, ParseError> {
        let first = self.factor(parse_sequence, true)?;
        if self.binary_operator(parse_in).is_none() {
            return Ok(first);
        }

        // Precedence climbing over an operand stack: a new operator first folds every pending operator that binds
        // at least as tightly (left associativity), so a tighter operator ends up as the right child of a looser one.
        let mut operands = vec![first];
        let mut pending: Vec<OperatorId> = Vec::new();
        while let Some((operator, level)) = self.binary_operator(parse_in) {
            self.advance();
            let right = self.operand()?;
            while pending
                .last()
                .and_then(|op| operators::precedence(*op))
                .is_some_and(|top| top >= level)
            {
                fold_binary(&mut operands, &mut pending);
            }
            pending.push(operator);
            operands.push(right);
        }
        while !pending.is_empty() {
            fold_binary(&mut operands, &mut pending);
        }

        let Some(expression) = operands.pop() else {
            return Err(self.unexpected());
        };
        self.postfix(expression, parse_sequence, true, true)
    }

    /// Return the current token as a binary operator with its level, if it is one the loop may fold.
    fn binary_operator(&self, parse_in: bool) -> Option<(OperatorId, u8)> {
        let token = self.peek();
        let id = match token.kind {
            TokenKind::Operator(id) => id,
            TokenKind::Keyword(KeywordId::In) if parse_in => OperatorId::In,
            TokenKind::Keyword(KeywordId::Instanceof) => OperatorId::Instanceof,
            _ => return None,
        };
        if !token.flags.is_binary
            || matches!(
                id,
                OperatorId::Question | OperatorId::Colon | OperatorId::Comma | OperatorId::Dot | OperatorId::Bang | OperatorId::Tilde
            )
        {
            return None;
        }
        token.flags.precedence.map(|level| (id, level))
    }

    // ========================================================================
    // Factor
    // ========================================================================

    fn factor(&mut self, allow_sequence: bool, allow_conditional: bool) -> Result<Node, ParseError> {
        let node = self.prefix_expression()?;
        self.postfix(node, allow_sequence, allow_conditional, true)
    }

    /// Parse an operand of a binary, unary or prefix-update operator: a prefix form or primary with its accessor,
    /// call and postfix-update chain.
    fn operand(&mut self) -> Result<Node, ParseError> {
        let node = self.prefix_expression()?;
        self.postfix(node, false, false, false)
    }

    /// Parse a prefix form or a primary expression (no postfix chain).
    fn prefix_expression(&mut self) -> Result<Node, ParseError> {
        let token = self.peek();
        let start = token.span.start;
        match token.kind {
            TokenKind::Operator(OperatorId::PlusPlus | OperatorId::MinusMinus) => {
                let op_token = self.advance().clone();
                let operator = op_token
                    .operator_id()
                    .and_then(UpdateOperator::from_operator)
                    .ok_or_else(|| ParseError::unexpected(&op_token))?;
                let argument = self.operand()?;
                if !argument.is_assignable() {
                    return Err(ParseError::invalid_lhs("prefix operation", &op_token));
                }
                Ok(Node::UpdateExpression(UpdateExpression {
                    span: self.finish(start),
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                }))
            }
            TokenKind::Identifier => {
                if token.value == "async" && self.peek_next().kind.is_keyword(KeywordId::Function) {
                    return Ok(Node::FunctionExpression(self.function(true, false)?));
                }
                let token = self.advance();
                Ok(identifier_from(token))
            }
            TokenKind::Keyword(KeywordId::This) => {
                let span = self.advance().span;
                Ok(Node::ThisExpression(ThisExpression { span }))
            }
            TokenKind::Keyword(KeywordId::Function) => Ok(Node::FunctionExpression(self.function(false, false)?)),
            TokenKind::Keyword(KeywordId::New) => self.new_expression(),
            TokenKind::Operator(OperatorId::LParen) => self.parenthesized(),
            TokenKind::Operator(OperatorId::LBracket) => self.array_expression(),
            TokenKind::Operator(OperatorId::LBrace) => self.object_expression(),
            TokenKind::Operator(
                OperatorId::Plus | OperatorId::Minus | OperatorId::Tilde | OperatorId::Bang,
            )
            | TokenKind::Keyword(KeywordId::Void | KeywordId::Typeof | KeywordId::Delete) => self.unary_expression(),
            TokenKind::String | TokenKind::Number | TokenKind::Regex | TokenKind::Special(_) => self.literal(),
            _ => Err(self.unexpected()),
        }
    }

    /// Apply postfix forms until none matches.
    fn postfix(
        &mut self,
        mut node: Node,
        allow_sequence: bool,
        allow_conditional: bool,
        allow_assignment: bool,
    ) -> Result<Node, ParseError> {
        loop {
            if self.check_op(OperatorId::Dot) || self.check_op(OperatorId::LBracket) {
                node = self.member_tail(node)?;
                continue;
            }

            if self.check_op(OperatorId::LParen) {
                let arguments = self.arguments()?;
                node = Node::CallExpression(CallExpression {
                    span: self.finish(node.start()),
                    callee: Box::new(node),
                    arguments,
                    optional: false,
                });
                continue;
            }

            // A line break before `++` / `--` ends the expression; the operator then starts the next statement.
            if self.peek().flags.is_update && !self.newline_before() {
                let op_token = self.advance().clone();
                if !node.is_assignable() {
                    return Err(ParseError::invalid_lhs("postfix operation", &op_token));
                }
                let operator = op_token
                    .operator_id()
                    .and_then(UpdateOperator::from_operator)
                    .ok_or_else(|| ParseError::unexpected(&op_token))?;
                node = Node::UpdateExpression(UpdateExpression {
                    span: self.finish(node.start()),
                    operator,
                    prefix: false,
                    argument: Box::new(node),
                });
                continue;
            }

            if allow_assignment && self.peek().flags.is_assignment {
                let op_token = self.advance().clone();
                if !node.is_assignable() {
                    let error = ParseError::invalid_lhs("assignment", &op_token);
                    return Err(match node {
                        Node::BinaryExpression(_) => {
                            error.with_hint("an operand cannot be assigned; parenthesize the assignment: `a + (b = c)`")
                        }
                        _ => error,
                    });
                }
                let operator = op_token.operator_id().ok_or_else(|| ParseError::unexpected(&op_token))?;
                let right = self.parse_expression(false, true)?;
                node = Node::AssignmentExpression(AssignmentExpression {
                    span: self.finish(node.start()),
                    operator,
                    left: Box::new(node),
                    right: Box::new(right),
                });
                continue;
            }

            if allow_sequence && self.check_op(OperatorId::Comma) {
                let start = node.start();
                let mut expressions = vec![node];
                while self.match_op(OperatorId::Comma) {
                    expressions.push(self.parse_expression(false, true)?);
                }
                node = Node::SequenceExpression(SequenceExpression {
                    span: self.finish(start),
                    expressions,
                });
                continue;
            }

            if allow_conditional && self.match_op(OperatorId::Question) {
                let consequent = self.parse_expression(false, true)?;
                self.expect_op(OperatorId::Colon)?;
                let alternate = self.parse_expression(false, true)?;
                node = Node::ConditionalExpression(ConditionalExpression {
                    span: self.finish(node.start()),
                    test: Box::new(node),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                });
                continue;
            }

            return Ok(node);
        }
    }

    /// Parse a run of `.name` / `[expr]` accessors.
    fn member_tail(&mut self, mut node: Node) -> Result<Node, ParseError> {
        loop {
            let (property, computed) = if self.match_op(OperatorId::Dot) {
                if !self.peek().is_word() {
                    return Err(self.unexpected());
                }
                (identifier_from(self.advance()), false)
            } else if self.match_op(OperatorId::LBracket) {
                let property = self.parse_expression(true, true)?;
                self.expect_op(OperatorId::RBracket)?;
                (property, true)
            } else {
                return Ok(node);
            };
            node = Node::MemberExpression(MemberExpression {
                span: self.finish(node.start()),
                object: Box::new(node),
                property: Box::new(property),
                computed,
                optional: false,
            });
        }
    }

    /// Parse `( arg, ... )`.
    fn arguments(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect_op(OperatorId::LParen)?;
        let mut arguments = Vec::new();
        while !self.match_op(OperatorId::RParen) {
            arguments.push(self.parse_expression(false, true)?);
            if self.match_op(OperatorId::RParen) {
                break;
            }
            self.expect_op(OperatorId::Comma)?;
        }
        Ok(arguments)
    }

    // ========================================================================
    // Prefix and primary forms
    // ========================================================================

    fn unary_expression(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        let operator = match self.peek().kind {
            TokenKind::Operator(OperatorId::Plus) => UnaryOperator::Plus,
            TokenKind::Operator(OperatorId::Minus) => UnaryOperator::Minus,
            TokenKind::Operator(OperatorId::Tilde) => UnaryOperator::Tilde,
            TokenKind::Operator(OperatorId::Bang) => UnaryOperator::Bang,
            TokenKind::Keyword(KeywordId::Void) => UnaryOperator::Void,
            TokenKind::Keyword(KeywordId::Typeof) => UnaryOperator::Typeof,
            TokenKind::Keyword(KeywordId::Delete) => UnaryOperator::Delete,
            _ => return Err(self.unexpected()),
        };
        self.advance();
        let argument = self.operand()?;
        Ok(Node::UnaryExpression(UnaryExpression {
            span: self.finish(start),
            operator,
            prefix: true,
            argument: Box::new(argument),
        }))
    }

    /// Parse `new callee[(args)]`.
    ///
    /// The callee is a primary expression with its member accessors; the first argument list belongs to the `new`.
    /// Further calls and accessors apply to the resulting `NewExpression`.
    fn new_expression(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_keyword(KeywordId::New)?;
        let callee = self.prefix_expression()?;
        let callee = self.member_tail(callee)?;
        let arguments = if self.check_op(OperatorId::LParen) {
            self.arguments()?
        } else {
            Vec::new()
        };
        Ok(Node::NewExpression(NewExpression {
            span: self.finish(start),
            callee: Box::new(callee),
            arguments,
        }))
    }

    /// Parse `[a, , b]`; an empty slot is a hole, a single trailing comma is not.
    fn array_expression(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_op(OperatorId::LBracket)?;
        let mut elements = Vec::new();
        loop {
            if self.match_op(OperatorId::RBracket) {
                break;
            }
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            if self.match_op(OperatorId::Comma) {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_expression(false, true)?));
            if self.match_op(OperatorId::RBracket) {
                break;
            }
            self.expect_op(OperatorId::Comma)?;
        }
        Ok(Node::ArrayExpression(ArrayExpression {
            span: self.finish(start),
            elements,
        }))
    }

    /// Parse `{ key: value, ... }`. A trailing comma is accepted, an empty slot is not.
    fn object_expression(&mut self) -> Result<Node, ParseError> {
        let start = self.start();
        self.expect_op(OperatorId::LBrace)?;
        let mut properties = Vec::new();
        while !self.match_op(OperatorId::RBrace) {
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            let key = self.property_key()?;
            self.expect_op(OperatorId::Colon)?;
            let value = self.parse_expression(false, true)?;
            properties.push(Node::Property(Property {
                span: self.finish(key.start()),
                key: Box::new(key),
                value: Box::new(value),
                computed: false,
                shorthand: false,
                method: false,
            }));
            if self.match_op(OperatorId::RBrace) {
                break;
            }
            self.expect_op(OperatorId::Comma)?;
            if self.check_op(OperatorId::Comma) {
                return Err(self.unexpected());
            }
        }
        Ok(Node::ObjectExpression(ObjectExpression {
            span: self.finish(start),
            properties,
        }))
    }

    /// Object keys: words become `Identifier`, strings and numbers become `Literal`.
    fn property_key(&mut self) -> Result<Node, ParseError> {
        match self.peek().kind {
            TokenKind::String | TokenKind::Number => self.literal(),
            _ if self.peek().is_word() => Ok(identifier_from(self.advance())),
            _ => Err(self.unexpected()),
        }
    }

    /// Parse `[async] function [*] [name] (params) { body }`.
    ///
    /// ## Parameters
    /// - `is_async`: the current token is the `async` identifier.
    /// - `require_id`: declarations must be named.
    fn function(&mut self, is_async: bool, require_id: bool) -> Result<Function, ParseError> {
        let start = self.start();
        if is_async {
            self.advance();
        }
        self.expect_keyword(KeywordId::Function)?;
        let generator = self.match_op(OperatorId::Star);

        let id = if self.check_identifier() {
            Some(Box::new(self.binding_identifier()?))
        } else if require_id {
            return Err(self.unexpected());
        } else {
            None
        };

        self.expect_op(OperatorId::LParen)?;
        let mut params = Vec::new();
        while !self.match_op(OperatorId::RParen) {
            params.push(self.binding_identifier()?);
            if self.match_op(OperatorId::RParen) {
                break;
            }
            self.expect_op(OperatorId::Comma)?;
        }

        let body = self.block_statement(StatementContext::function_body())?;
        Ok(Function {
            span: self.finish(start),
            id,
            params,
            body: Box::new(body),
            is_async,
            generator,
            expression: false,
        })
    }

    fn literal(&mut self) -> Result<Node, ParseError> {
        let token = self.peek();
        let kind = match token.kind {
            TokenKind::String if token.flags.is_template => LiteralKind::Template,
            TokenKind::String => LiteralKind::String,
            TokenKind::Number => LiteralKind::Number,
            TokenKind::Regex => LiteralKind::Regex,
            TokenKind::Special(SpecialId::Null) => LiteralKind::Null,
            TokenKind::Special(_) => LiteralKind::Boolean,
            _ => return Err(self.unexpected()),
        };
        let token = self.advance();
        Ok(Node::Literal(Literal {
            span: token.span,
            kind,
            raw: token.value.clone(),
        }))
    }
}
