use crate::{
    ast::{BinaryOperator, Expr, Number, Stmt, TypeName, BINARY_OPERATORS},
    token::{Token, TokenKind},
};

/// Parses the full token sequence into an ordered list of statements,
/// consuming tokens until none remain.
///
/// The first grammar violation aborts the whole parse; there is no
/// synchronization to the next statement boundary and no partial result.
pub fn parse(tokens: &[Token]) -> Result<Vec<Stmt>, SyntaxError> {
    let mut parser = Parser::new(tokens);
    let mut program = Vec::new();
    while parser.peek().is_some() {
        program.push(parser.parse_statement()?);
    }
    Ok(program)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("line {line}: expected {expected}, found {found:?}")]
    Unexpected {
        expected: &'static str,
        found: String,
        line: u32,
    },

    #[error("expected {expected}, but no more tokens remain")]
    UnexpectedEnd { expected: &'static str },

    #[error("line {line}: numeric literal {literal:?} is out of range")]
    NumberOutOfRange { literal: String, line: u32 },
}

fn unexpected(token: &Token, expected: &'static str) -> SyntaxError {
    SyntaxError::Unexpected {
        expected,
        found: token.lexeme.clone(),
        line: token.line,
    }
}

struct Parser<'tok> {
    tokens: &'tok [Token],
    cursor: usize,
}

impl<'tok> Parser<'tok> {
    fn new(tokens: &'tok [Token]) -> Parser<'tok> {
        Parser { tokens, cursor: 0 }
    }

    /// Dispatches on the next unconsumed token. Reserved words are plain
    /// identifier tokens, so dispatch compares lexemes: a reserved type name
    /// starts a declaration, `if` an if-statement, and any other identifier
    /// an assignment.
    fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let token = self.peek().ok_or(SyntaxError::UnexpectedEnd {
            expected: "a statement",
        })?;
        if token.kind == TokenKind::Identifier {
            if TypeName::from_lexeme(&token.lexeme).is_some() {
                return self.parse_declaration();
            }
            if token.lexeme == "if" {
                return self.parse_if_statement();
            }
            return self.parse_assignment();
        }
        Err(unexpected(token, "a statement"))
    }

    /// declaration ::= ('int' | 'float') ID ['=' expr] ';'
    fn parse_declaration(&mut self) -> Result<Stmt, SyntaxError> {
        let ty = self.parse_type_name()?;
        let name = self.parse_identifier()?;
        let initializer = if self.take(TokenKind::Operator, "=") {
            Some(self.parse_expression(0)?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, ";", "`;`")?;
        Ok(Stmt::Declaration {
            ty,
            name,
            initializer,
        })
    }

    /// assignment ::= ID '=' expr ';'
    fn parse_assignment(&mut self) -> Result<Stmt, SyntaxError> {
        let target = self.parse_identifier()?;
        self.consume(TokenKind::Operator, "=", "`=`")?;
        let value = self.parse_expression(0)?;
        self.consume(TokenKind::Semicolon, ";", "`;`")?;
        Ok(Stmt::Assignment { target, value })
    }

    /// if ::= 'if' '(' expr ')' '{' statement* '}'
    fn parse_if_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.consume(TokenKind::Identifier, "if", "`if`")?;
        self.consume(TokenKind::Paren, "(", "`(` after `if`")?;
        let condition = self.parse_expression(0)?;
        self.consume(TokenKind::Paren, ")", "`)` after the condition")?;
        self.consume(TokenKind::Brace, "{", "`{` to open the `if` body")?;

        let mut body = Vec::new();
        while self.peek().is_some() && !self.is(TokenKind::Brace, "}") {
            body.push(self.parse_statement()?);
        }
        self.consume(TokenKind::Brace, "}", "`}` to close the `if` body")?;

        Ok(Stmt::If { condition, body })
    }

    fn parse_type_name(&mut self) -> Result<TypeName, SyntaxError> {
        let token = self.expect("a type name")?;
        if token.kind == TokenKind::Identifier {
            if let Some(ty) = TypeName::from_lexeme(&token.lexeme) {
                return Ok(ty);
            }
        }
        Err(unexpected(token, "a type name"))
    }

    fn parse_identifier(&mut self) -> Result<String, SyntaxError> {
        let token = self.expect("an identifier")?;
        if token.kind == TokenKind::Identifier {
            Ok(token.lexeme.clone())
        } else {
            Err(unexpected(token, "an identifier"))
        }
    }

    /// Precedence climbing: folds binary operators whose precedence clears
    /// the current threshold. Each right-hand operand is parsed with the
    /// threshold raised past the operator's own precedence, so operators of
    /// equal precedence associate to the left.
    fn parse_expression(&mut self, min_precedence: u8) -> Result<Expr, SyntaxError> {
        let mut node = self.parse_operand()?;
        while let Some(op) = self.peek_binary_operator() {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance();
            let rhs = self.parse_expression(op.precedence() + 1)?;
            node = Expr::Binary {
                op,
                lhs: Box::new(node),
                rhs: Box::new(rhs),
            };
        }
        Ok(node)
    }

    /// The binary operator at the cursor, if any. The assignment `=` shares
    /// the operator token kind but is not a binary operator, so it stops the
    /// expression instead.
    fn peek_binary_operator(&self) -> Option<BinaryOperator> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Operator | TokenKind::Equals => {
                BINARY_OPERATORS.get(token.lexeme.as_str()).copied()
            }
            _ => None,
        }
    }

    /// operand ::= number | ID | '(' expr ')'
    fn parse_operand(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.expect("an expression")?;
        match token.kind {
            TokenKind::Number => parse_number(token),
            TokenKind::Identifier => Ok(Expr::Identifier(token.lexeme.clone())),
            TokenKind::Paren if token.lexeme == "(" => {
                let inner = self.parse_expression(0)?;
                self.consume(TokenKind::Paren, ")", "`)` to close the expression")?;
                Ok(inner)
            }
            _ => Err(unexpected(token, "an expression")),
        }
    }
}

impl<'tok> Parser<'tok> {
    /// Returns the current token without advancing.
    fn peek(&self) -> Option<&'tok Token> {
        self.tokens.get(self.cursor)
    }

    /// Returns the current token and advances past it.
    fn advance(&mut self) -> Option<&'tok Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    /// Like [`Parser::advance`], but running out of tokens mid-construct is
    /// an error.
    fn expect(&mut self, expected: &'static str) -> Result<&'tok Token, SyntaxError> {
        self.advance()
            .ok_or(SyntaxError::UnexpectedEnd { expected })
    }

    /// Checks whether the current token has the given kind and lexeme.
    fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == kind && t.lexeme == lexeme)
    }

    /// Advances past the current token if it has the given kind and lexeme,
    /// returning whether it did.
    fn take(&mut self, kind: TokenKind, lexeme: &str) -> bool {
        if self.is(kind, lexeme) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Advances past the current token if it matches, and reports what was
    /// expected otherwise.
    fn consume(
        &mut self,
        kind: TokenKind,
        lexeme: &str,
        expected: &'static str,
    ) -> Result<&'tok Token, SyntaxError> {
        let token = self.expect(expected)?;
        if token.kind == kind && token.lexeme == lexeme {
            Ok(token)
        } else {
            Err(unexpected(token, expected))
        }
    }
}

/// A lexeme with a decimal point is a float constant, any other is an int.
/// The distinction is kept in the AST.
fn parse_number(token: &Token) -> Result<Expr, SyntaxError> {
    let out_of_range = || SyntaxError::NumberOutOfRange {
        literal: token.lexeme.clone(),
        line: token.line,
    };
    let number = if token.lexeme.contains('.') {
        Number::Float(token.lexeme.parse().map_err(|_| out_of_range())?)
    } else {
        Number::Int(token.lexeme.parse().map_err(|_| out_of_range())?)
    };
    Ok(Expr::Number(number))
}

#[cfg(test)]
mod tests {
    use crate::util::test_utils::tree_tests;

    tree_tests!(
        fn test_declaration_with_initializer() {
            let program = "int a = 10;";
            let tree_ok = "
                declaration int a (initialized)
                  int 10
            ";
        }

        fn test_declaration_without_initializer() {
            let program = "int x;";
            let tree_ok = "declaration int x";
        }

        fn test_float_literal_keeps_fraction() {
            let program = "float pi = 3.14;";
            let tree_ok = "
                declaration float pi (initialized)
                  float 3.14
            ";
        }

        fn test_simple_assignment() {
            let program = "c = a + 1;";
            let tree_ok = "
                assignment c
                  binary Add
                    ident a
                    int 1
            ";
        }

        fn test_multiplication_binds_tighter_than_addition() {
            let program = "x = a + b * c;";
            let tree_ok = "
                assignment x
                  binary Add
                    ident a
                    binary Mul
                      ident b
                      ident c
            ";
        }

        fn test_equal_precedence_associates_left() {
            let program = "x = a + b + c;";
            let tree_ok = "
                assignment x
                  binary Add
                    binary Add
                      ident a
                      ident b
                    ident c
            ";
        }

        fn test_parentheses_override_precedence() {
            let program = "result = (a + b) * 2;";
            let tree_ok = "
                assignment result
                  binary Mul
                    binary Add
                      ident a
                      ident b
                    int 2
            ";
        }

        fn test_mixed_precedence_expression() {
            let program = "result = a + b * c - 2 / 4;";
            let tree_ok = "
                assignment result
                  binary Sub
                    binary Add
                      ident a
                      binary Mul
                        ident b
                        ident c
                    binary Div
                      int 2
                      int 4
            ";
        }

        fn test_equality_is_loosest() {
            let program = "if (a == b) { c = 10; }";
            let tree_ok = "
                if
                  binary Eq
                    ident a
                    ident b
                  body
                    assignment c
                      int 10
            ";
        }

        fn test_equality_chain_associates_left() {
            let program = "x = a == b + 1 == c;";
            let tree_ok = "
                assignment x
                  binary Eq
                    binary Eq
                      ident a
                      binary Add
                        ident b
                        int 1
                    ident c
            ";
        }

        fn test_empty_if_body() {
            let program = "if (a == b) {}";
            let tree_ok = "
                if
                  binary Eq
                    ident a
                    ident b
            ";
        }

        fn test_nested_if() {
            let program = "if (a == 1) {\n    if (b == 2) {\n        c = 3;\n    }\n}";
            let tree_ok = "
                if
                  binary Eq
                    ident a
                    int 1
                  body
                    if
                      binary Eq
                        ident b
                        int 2
                      body
                        assignment c
                          int 3
            ";
        }

        fn test_statement_sequence() {
            let program = "float x = 1.5;\nfloat y = 2.5;\nfloat z = x / y;";
            let tree_ok = "
                declaration float x (initialized)
                  float 1.5
                declaration float y (initialized)
                  float 2.5
                declaration float z (initialized)
                  binary Div
                    ident x
                    ident y
            ";
        }

        fn test_reserved_words_are_plain_identifiers() {
            let program = "int if = 2;";
            let tree_ok = "
                declaration int if (initialized)
                  int 2
            ";
        }

        fn test_missing_initializer_value() {
            let program = "int x = ;";
            let error = "line 1: expected an expression, found \";\"";
        }

        fn test_missing_semicolon() {
            let program = "int a = 10";
            let error = "expected `;`, but no more tokens remain";
        }

        fn test_statement_cannot_start_with_number() {
            let program = "42;";
            let error = "line 1: expected a statement, found \"42\"";
        }

        fn test_declaration_needs_a_name() {
            let program = "int = 5;";
            let error = "line 1: expected an identifier, found \"=\"";
        }

        fn test_unclosed_parenthesis() {
            let program = "x = (a + 1;";
            let error = "line 1: expected `)` to close the expression, found \";\"";
        }

        fn test_unclosed_if_body() {
            let program = "if (a == b) { c = 10;";
            let error = "expected `}` to close the `if` body, but no more tokens remain";
        }

        fn test_if_condition_needs_parentheses() {
            let program = "if a == b {}";
            let error = "line 1: expected `(` after `if`, found \"a\"";
        }

        fn test_assignment_is_not_a_binary_operator() {
            let program = "x = a = b;";
            let error = "line 1: expected `;`, found \"=\"";
        }

        fn test_no_unary_minus() {
            let program = "x = -1;";
            let error = "line 1: expected an expression, found \"-\"";
        }

        fn test_integer_literal_out_of_range() {
            let program = "x = 99999999999999999999;";
            let error = "line 1: numeric literal \"99999999999999999999\" is out of range";
        }

        fn test_error_reports_offending_line() {
            let program = "a = 1;\nb = ;";
            let error = "line 2: expected an expression, found \";\"";
        }

        fn test_lexical_failure_aborts_pipeline() {
            let program = "a = $;";
            let error = "unrecognized character '$' at byte 4";
        }
    );
}
