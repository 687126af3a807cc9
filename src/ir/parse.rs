// Copyright (c) 2016-2021 Fabian Schuiki

//! A reader for the textual form of expression trees.
//!
//! The grammar mirrors what the printer produces:
//!
//! ```text
//! expr := NAME            a bit
//!       | '$' NAME        a symbol
//!       | '(' 'module' expr* ')'
//!       | '(' 'let' NAME expr ')'
//!       | '(' '&' expr expr ')'
//!       | '(' '|' expr expr ')'
//!       | '(' '!' expr ')'
//! ```
//!
//! A `;` starts a comment that runs to the end of the line. Every node is
//! created through the builders, so trees read from text obey the same arity
//! rules as trees built in code. Lists may nest at most [`MAX_NESTING`] levels
//! deep; deeper input is rejected with a diagnostic.

use crate::builder::{build, build_bit, build_symbol};
use crate::error::BuildError;
use crate::expr::Expr;
use crate::kind::ExprKind;
use crate::print::SYMBOL_SIGIL;
use boolnet_common::errors::{DiagBuilder2, DiagResult2};
use boolnet_common::source::{get_source_manager, Source, Span, Spanned};
use log::debug;
use std::rc::Rc;
use std::str::FromStr;

/// The deepest nesting of parenthesized lists the reader accepts.
pub const MAX_NESTING: usize = 256;

#[derive(Clone, PartialEq, Eq, Debug)]
enum Token {
    OpenParen,
    CloseParen,
    Atom(String),
    Symbol(String),
    Eof,
}

impl Token {
    fn desc(&self) -> String {
        match self {
            Token::OpenParen => "`(`".to_string(),
            Token::CloseParen => "`)`".to_string(),
            Token::Atom(name) => format!("`{}`", name),
            Token::Symbol(name) => format!("`{}{}`", SYMBOL_SIGIL, name),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Splits the content of a source file into tokens.
struct Lexer {
    source: Source,
    content: Rc<str>,
    pos: usize,
}

impl Lexer {
    fn new(source: Source) -> Lexer {
        Lexer {
            source,
            content: source.get_content(),
            pos: 0,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.content[self.pos..].chars().next()
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else if c == ';' {
                let rest = &self.content[self.pos..];
                self.pos += rest.find('\n').unwrap_or_else(|| rest.len());
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> DiagResult2<Spanned<Token>> {
        self.skip_trivia();
        let begin = self.pos;
        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Spanned::new(Token::Eof, self.span(begin))),
        };
        let token = match c {
            '(' => {
                self.pos += 1;
                Token::OpenParen
            }
            ')' => {
                self.pos += 1;
                Token::CloseParen
            }
            _ => {
                let rest = &self.content[self.pos..];
                let len = rest
                    .find(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ';')
                    .unwrap_or_else(|| rest.len());
                let word = rest[..len].to_string();
                self.pos += len;
                if word.starts_with(SYMBOL_SIGIL) {
                    let name = &word[SYMBOL_SIGIL.len_utf8()..];
                    if name.is_empty() {
                        return Err(DiagBuilder2::error(format!(
                            "expected a symbol name after `{}`",
                            SYMBOL_SIGIL
                        ))
                        .span(self.span(begin)));
                    }
                    Token::Symbol(name.to_string())
                } else {
                    Token::Atom(word)
                }
            }
        };
        Ok(Spanned::new(token, self.span(begin)))
    }

    fn span(&self, begin: usize) -> Span {
        Span::new(self.source, begin, self.pos)
    }
}

/// A recursive descent parser over the tokens of one source file.
struct Parser {
    lexer: Lexer,
    peeked: Option<Spanned<Token>>,
    depth: usize,
}

impl Parser {
    fn new(source: Source) -> Parser {
        Parser {
            lexer: Lexer::new(source),
            peeked: None,
            depth: 0,
        }
    }

    fn peek(&mut self) -> DiagResult2<&Spanned<Token>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        match self.peeked {
            Some(ref t) => Ok(t),
            None => unreachable!(),
        }
    }

    fn bump(&mut self) -> DiagResult2<Spanned<Token>> {
        match self.peeked.take() {
            Some(t) => Ok(t),
            None => self.lexer.next_token(),
        }
    }

    fn at_eof(&mut self) -> DiagResult2<bool> {
        Ok(self.peek()?.value == Token::Eof)
    }

    fn parse_expr(&mut self) -> DiagResult2<Expr> {
        let Spanned { value, span } = self.bump()?;
        match value {
            Token::Atom(name) => Ok(build_bit(name)),
            Token::Symbol(name) => Ok(build_symbol(name)),
            Token::OpenParen => self.parse_list(span),
            t @ Token::CloseParen | t @ Token::Eof => Err(DiagBuilder2::error(format!(
                "expected an expression, found {}",
                t.desc()
            ))
            .span(span)),
        }
    }

    /// Parse the remainder of a list after its opening parenthesis.
    fn parse_list(&mut self, open: Span) -> DiagResult2<Expr> {
        if self.depth >= MAX_NESTING {
            return Err(DiagBuilder2::error("expression nested too deeply")
                .span(open)
                .add_note(format!("lists nest at most {} levels deep", MAX_NESTING)));
        }
        self.depth += 1;
        let result = self.parse_list_body(open);
        self.depth -= 1;
        result
    }

    fn parse_list_body(&mut self, open: Span) -> DiagResult2<Expr> {
        let Spanned { value, span } = self.bump()?;
        let head = match value {
            Token::Atom(head) => head,
            t => {
                return Err(DiagBuilder2::error(format!(
                    "expected an operator after `(`, found {}",
                    t.desc()
                ))
                .span(span))
            }
        };
        let (kind, label) = if head == "let" {
            let Spanned { value, span } = self.bump()?;
            match value {
                Token::Atom(name) => (ExprKind::Let, name),
                t => {
                    return Err(DiagBuilder2::error(format!(
                        "expected a binding name after `let`, found {}",
                        t.desc()
                    ))
                    .span(span))
                }
            }
        } else {
            match ExprKind::from_glyph(&head) {
                Some(kind) => (kind, head),
                None => {
                    return Err(DiagBuilder2::from(BuildError::UnknownOperator(head))
                        .span(span)
                        .add_note("operators are `module`, `let`, `&`, `|`, and `!`"))
                }
            }
        };

        let mut children = Vec::new();
        loop {
            let t = self.peek()?.clone();
            match t.value {
                Token::CloseParen => break,
                Token::Eof => {
                    let eof = t.span;
                    return Err(DiagBuilder2::error("unclosed `(`")
                        .span(open)
                        .add_note(format!("input ends at offset {}", eof.begin)));
                }
                _ => children.push(self.parse_expr()?),
            }
        }
        let close = self.bump()?.span;
        build(kind, label, children).map_err(|e| DiagBuilder2::from(e).span(Span::union(open, close)))
    }
}

/// Parse all expressions in a source file.
pub fn parse(source: Source) -> DiagResult2<Vec<Expr>> {
    let mut parser = Parser::new(source);
    let mut exprs = Vec::new();
    while !parser.at_eof()? {
        exprs.push(parser.parse_expr()?);
    }
    debug!("parsed {} expressions from {}", exprs.len(), source);
    Ok(exprs)
}

/// Parse a sequence of expressions from a string.
pub fn parse_exprs(text: &str) -> DiagResult2<Vec<Expr>> {
    parse(get_source_manager().add_anonymous(text))
}

/// Parse exactly one expression from a string.
pub fn parse_expr(text: &str) -> DiagResult2<Expr> {
    let mut parser = Parser::new(get_source_manager().add_anonymous(text));
    let expr = parser.parse_expr()?;
    let t = parser.peek()?.clone();
    if t.value != Token::Eof {
        return Err(DiagBuilder2::error(format!(
            "expected end of input after expression, found {}",
            t.value.desc()
        ))
        .span(t.span));
    }
    Ok(expr)
}

impl FromStr for Expr {
    type Err = DiagBuilder2;

    fn from_str(s: &str) -> DiagResult2<Expr> {
        parse_expr(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;

    fn parse_ok(text: &str) -> Expr {
        match parse_expr(text) {
            Ok(e) => e,
            Err(d) => panic!("parsing `{}` failed: {}", text, d.get_message()),
        }
    }

    fn parse_err(text: &str) -> String {
        match parse_expr(text) {
            Ok(e) => panic!("parsing `{}` should fail, got {}", text, e),
            Err(d) => d.get_message().clone(),
        }
    }

    #[test]
    fn leaves() {
        assert_eq!(parse_ok("a"), build_bit("a"));
        assert_eq!(parse_ok("$a"), build_symbol("a"));
        assert_eq!(parse_ok("  data[7]  "), build_bit("data[7]"));
    }

    #[test]
    fn operators() {
        assert_eq!(
            parse_ok("(& a (! $b))"),
            build_and(build_bit("a"), build_not(build_symbol("b")))
        );
        assert_eq!(
            parse_ok("(| $x y)"),
            build_or(build_symbol("x"), build_bit("y"))
        );
    }

    #[test]
    fn module_and_let() {
        let text = "
            ; a half adder carry
            (module
                (let c (& a b)) ; carry
                (! $c))
        ";
        assert_eq!(
            parse_ok(text),
            build_module(vec![
                build_let("c", build_and(build_bit("a"), build_bit("b"))),
                build_not(build_symbol("c")),
            ])
        );
        assert_eq!(parse_ok("(module)"), build_module(vec![]));
    }

    #[test]
    fn sequence() {
        let exprs = parse_exprs("a $b (! c)").unwrap();
        assert_eq!(
            exprs,
            vec![build_bit("a"), build_symbol("b"), build_not(build_bit("c"))]
        );
        assert!(parse_exprs("  ; nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn arity_errors() {
        assert_eq!(parse_err("(& a)"), "and expects 2 operands, found 1");
        assert_eq!(parse_err("(! a b)"), "not expects 1 operand, found 2");
        assert_eq!(parse_err("(let x)"), "let binding expects 1 operand, found 0");
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(parse_err("(^ a b)"), "unknown operator `^`");
        assert_eq!(parse_err("(& a b"), "unclosed `(`");
        assert_eq!(parse_err(")"), "expected an expression, found `)`");
        assert_eq!(parse_err(""), "expected an expression, found end of input");
        assert_eq!(parse_err("a b"), "expected end of input after expression, found `b`");
        assert_eq!(parse_err("(let $x a)"), "expected a binding name after `let`, found `$x`");
        assert_eq!(parse_err("(a)"), "unknown operator `a`");
        assert_eq!(parse_err("$"), "expected a symbol name after `$`");
    }

    fn not_chain(levels: usize) -> String {
        format!("{}a{}", "(! ".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn nesting_limit() {
        let e = parse_ok(&not_chain(MAX_NESTING));
        assert_eq!(crate::visit::depth(&e), MAX_NESTING + 1);

        let d = parse_expr(&not_chain(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(d.get_message(), "expression nested too deeply");
        let span = d.get_span().unwrap();
        assert_eq!((span.begin, span.end), (3 * MAX_NESTING, 3 * MAX_NESTING + 1));
    }

    #[test]
    fn deep_input_does_not_overflow() {
        let text = not_chain(100_000);
        assert_eq!(parse_err(&text), "expression nested too deeply");
        let exprs = parse_exprs(&format!("a {}", text));
        assert!(exprs.is_err());
    }

    #[test]
    fn error_spans() {
        let d = parse_expr("(module\n  (& a))").unwrap_err();
        let span = d.get_span().unwrap();
        assert_eq!((span.begin, span.end), (10, 15));
        assert_eq!(span.begin().human_line(), 2);
    }
}
