/// Parse a token stream into a `Program` node.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by [`crate::lexer::tokenize`].
///
/// ## Errors
/// Returns the first [`ParseError`] encountered.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Node, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Parse a token stream with explicit [`ParseOptions`].
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_with(tokens: &[Token], options: ParseOptions) -> Result<Node, ParseError> {
    Parser::with_options(tokens, options).parse_program()
}

/// Tokenize and parse a source string.
///
/// ## Errors
/// Returns the first [`ParseError`] encountered.
pub fn parse_source(source: &str) -> Result<Node, ParseError> {
    parse(&crate::lexer::tokenize(source))
}
