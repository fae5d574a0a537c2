// ABOUTME: Pratt operator-precedence parser: token stream to AST, accumulating syntax errors

use crate::ast::{Expression, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // fn(x) or arr[x]
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::Lparen | TokenKind::Lbracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Produces a `Program` from a lexer, accumulating a list of error
/// messages rather than failing fast. A malformed statement is skipped
/// and parsing resumes at the next statement boundary.
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Parser {
            lexer,
            cur_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.errors.push(format!(
            "expected next token to be {}, got {} instead",
            expected, self.peek_token.kind
        ));
    }

    fn expect_peek(&mut self, expected: TokenKind) -> bool {
        if self.peek_token.kind == expected {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while self.cur_token.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.cur_token.literal.clone();

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.kind == TokenKind::Semicolon {
            self.next_token();
        }

        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.kind == TokenKind::Semicolon {
            self.next_token();
        }

        Some(Statement::Return { value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.kind == TokenKind::Semicolon {
            self.next_token();
        }

        Some(Statement::Expression { expr })
    }

    fn parse_block_statement(&mut self) -> Statement {
        let mut statements = Vec::new();
        self.next_token();

        while self.cur_token.kind != TokenKind::Rbrace && self.cur_token.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        Statement::Block { statements }
    }

    fn no_prefix_parse_fn_error(&mut self, kind: TokenKind) {
        self.errors
            .push(format!("no prefix parse function for {} found", kind));
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.peek_token.kind != TokenKind::Semicolon
            && precedence < precedence_of(self.peek_token.kind)
        {
            if !has_infix(self.peek_token.kind) {
                return Some(left);
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur_token.kind {
            TokenKind::Ident => Some(Expression::Identifier(self.cur_token.literal.clone())),
            TokenKind::Int => match self.cur_token.literal.parse::<i64>() {
                Ok(value) => Some(Expression::IntegerLiteral(value)),
                Err(_) => {
                    self.errors.push(format!(
                        "could not parse {} as integer",
                        self.cur_token.literal
                    ));
                    None
                }
            },
            TokenKind::Str => Some(Expression::StringLiteral(self.cur_token.literal.clone())),
            TokenKind::True => Some(Expression::BooleanLiteral(true)),
            TokenKind::False => Some(Expression::BooleanLiteral(false)),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::Lparen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::Lbracket => self.parse_array_literal(),
            kind => {
                self.no_prefix_parse_fn_error(kind);
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.cur_token.kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt => self.parse_infix_expression(left),
            TokenKind::Lparen => self.parse_call_expression(left),
            TokenKind::Lbracket => self.parse_index_expression(left),
            _ => Some(left),
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();
        let precedence = precedence_of(self.cur_token.kind);
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::Lparen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }
        if !self.expect_peek(TokenKind::Lbrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token.kind == TokenKind::Else {
            self.next_token();
            if !self.expect_peek(TokenKind::Lbrace) {
                return None;
            }
            Some(Box::new(self.parse_block_statement()))
        } else {
            None
        };

        Some(Expression::If {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::Lparen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::Lbrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function {
            parameters,
            body: Box::new(body),
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();

        if self.peek_token.kind == TokenKind::Rparen {
            self.next_token();
            return Some(params);
        }

        self.next_token();
        params.push(self.cur_token.literal.clone());

        while self.peek_token.kind == TokenKind::Comma {
            self.next_token();
            self.next_token();
            params.push(self.cur_token.literal.clone());
        }

        if !self.expect_peek(TokenKind::Rparen) {
            return None;
        }

        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenKind::Rparen)?;
        Some(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenKind::Rbracket)?;
        Some(Expression::ArrayLiteral(elements))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::Rbracket) {
            return None;
        }
        Some(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token.kind == end {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.kind == TokenKind::Comma {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }
}

fn has_infix(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Lparen
            | TokenKind::Lbracket
    )
}

/// Convenience entry point: lex and parse a full source string.
pub fn parse(input: &str) -> (Program, Vec<String>) {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    (program, parser.errors().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_no_errors(input: &str) -> Program {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "parser errors: {:?}", errors);
        program
    }

    #[test]
    fn let_statements() {
        let program = parse_no_errors("let x = 5;\nlet y = true;\nlet foobar = y;");
        assert_eq!(program.statements.len(), 3);
        match &program.statements[0] {
            Statement::Let { name, value } => {
                assert_eq!(name, "x");
                assert_eq!(*value, Expression::IntegerLiteral(5));
            }
            other => panic!("expected Let, got {:?}", other),
        }
    }

    #[test]
    fn return_statements() {
        let program = parse_no_errors("return 5;\nreturn true;\nreturn foobar;");
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(program.statements[0], Statement::Return { .. }));
    }

    #[test]
    fn let_without_semicolon_is_accepted() {
        let program = parse_no_errors("let x = 5");
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn peek_error_message_format() {
        let (_program, errors) = parse("let x 5;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "expected next token to be =, got INT instead");
    }

    #[test]
    fn no_prefix_parse_fn_error_message() {
        let (_program, errors) = parse("*5;");
        assert!(errors
            .iter()
            .any(|e| e == "no prefix parse function for * found"));
    }

    #[test]
    fn operator_precedence_rendering() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("false", "false"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("3 < 5 == true", "((3 < 5) == true)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];

        for (input, expected) in cases {
            let program = parse_no_errors(input);
            assert_eq!(program.to_string(), expected, "input: {}", input);
        }
    }

    #[test]
    fn if_expression_parses_consequence_and_alternative() {
        let program = parse_no_errors("if (x < y) { x } else { y }");
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Statement::Expression {
                expr: Expression::If { alternative, .. },
            } => assert!(alternative.is_some()),
            other => panic!("expected if expression, got {:?}", other),
        }
    }

    #[test]
    fn function_literal_parameters() {
        let program = parse_no_errors("fn(x, y) { x + y; }");
        match &program.statements[0] {
            Statement::Expression {
                expr: Expression::Function { parameters, .. },
            } => assert_eq!(parameters, &vec!["x".to_string(), "y".to_string()]),
            other => panic!("expected function literal, got {:?}", other),
        }
    }

    #[test]
    fn function_parameter_lists_of_varying_arity() {
        let cases = [
            ("fn() {};", 0),
            ("fn(x) {};", 1),
            ("fn(x, y, z) {};", 3),
        ];
        for (input, count) in cases {
            let program = parse_no_errors(input);
            match &program.statements[0] {
                Statement::Expression {
                    expr: Expression::Function { parameters, .. },
                } => assert_eq!(parameters.len(), count),
                other => panic!("expected function literal, got {:?}", other),
            }
        }
    }

    #[test]
    fn call_expression_arguments() {
        let program = parse_no_errors("add(1, 2 * 3, 4 + 5);");
        match &program.statements[0] {
            Statement::Expression {
                expr: Expression::Call { arguments, .. },
            } => assert_eq!(arguments.len(), 3),
            other => panic!("expected call expression, got {:?}", other),
        }
    }

    #[test]
    fn array_literal_parses_elements() {
        let program = parse_no_errors("[1, 2 * 2, 3 + 3]");
        match &program.statements[0] {
            Statement::Expression {
                expr: Expression::ArrayLiteral(elements),
            } => assert_eq!(elements.len(), 3),
            other => panic!("expected array literal, got {:?}", other),
        }
    }

    #[test]
    fn index_expression_parses() {
        let program = parse_no_errors("myArray[1 + 1]");
        match &program.statements[0] {
            Statement::Expression {
                expr: Expression::Index { .. },
            } => {}
            other => panic!("expected index expression, got {:?}", other),
        }
    }

    #[test]
    fn string_literal_parses() {
        let program = parse_no_errors(r#""hello world""#);
        match &program.statements[0] {
            Statement::Expression {
                expr: Expression::StringLiteral(s),
            } => assert_eq!(s, "hello world"),
            other => panic!("expected string literal, got {:?}", other),
        }
    }

    #[test]
    fn rendering_is_idempotent_for_flat_expressions() {
        // Blocks (if/fn bodies) drop braces when rendered, so only flat
        // expression statements round-trip through String() -> parse() ->
        // String() unchanged.
        let input = "a + b * c - (d / e) == !f";
        let program = parse_no_errors(input);
        let rendered_once = program.to_string();
        let program_again = parse_no_errors(&rendered_once);
        let rendered_twice = program_again.to_string();
        assert_eq!(rendered_once, rendered_twice);
    }
}
