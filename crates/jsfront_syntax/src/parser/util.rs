/// Miscellaneous parser utilities.
///
/// Small shared helpers that don't cleanly fit into "stmts" or "expr": identifier parsing, parenthesized
/// expressions and node construction.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    /// Parse an `Identifier` token into an `Identifier` node.
    fn binding_identifier(&mut self) -> Result<Node, ParseError> {
        if !self.check_identifier() {
            return Err(self.unexpected());
        }
        Ok(identifier_from(self.advance()))
    }

    /// Parse `( expression )`.
    fn parenthesized(&mut self) -> Result<Node, ParseError> {
        self.expect_op(OperatorId::LParen)?;
        let expression = self.parse_expression(true, true)?;
        self.expect_op(OperatorId::RParen)?;
        Ok(expression)
    }
}

fn identifier_from(token: &Token) -> Node {
    Node::Identifier(Identifier {
        span: token.span,
        name: token.value.clone(),
    })
}

/// Pop two operands and one operator and push the combined `BinaryExpression`.
fn fold_binary(operands: &mut Vec<Node>, pending: &mut Vec<OperatorId>) {
    let (Some(operator), Some(right), Some(left)) = (pending.pop(), operands.pop(), operands.pop()) else {
        return;
    };
    operands.push(Node::BinaryExpression(BinaryExpression {
        span: left.span().merge(right.span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }));
}
