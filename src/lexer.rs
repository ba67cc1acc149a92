use crate::token::{Token, TokenKind};

/// An anchored matcher: reports the byte length of the match at the very
/// start of the remaining input, or `None`.
type Matcher = fn(&str) -> Option<usize>;

/// The lexical categories in priority order. The first rule that matches
/// wins, so the order is significant where categories overlap: `==` must be
/// tried before the single-character operator rule, and a comment before
/// the division operator.
const RULES: &[(TokenKind, Matcher)] = &[
    (TokenKind::Equals, match_equality),
    (TokenKind::Comment, match_comment),
    (TokenKind::Number, match_number),
    (TokenKind::Identifier, match_identifier),
    (TokenKind::Operator, match_operator),
    (TokenKind::Paren, match_paren),
    (TokenKind::Brace, match_brace),
    (TokenKind::Semicolon, match_semicolon),
    (TokenKind::Whitespace, match_whitespace),
];

/// Tokenizes the provided source text.
///
/// Whitespace and comments are consumed but never emitted. On failure no
/// partial token sequence is returned and no resynchronization is attempted.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexicalError> {
    Tokenizer::new(src).run()
}

/// No rule matched at `position` (a byte offset into the source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized character {found:?} at byte {position}")]
pub struct LexicalError {
    pub found: char,
    pub position: usize,
}

struct Tokenizer<'src> {
    src: &'src str,
    position: usize,
    line: u32,
}

impl<'src> Tokenizer<'src> {
    fn new(src: &'src str) -> Tokenizer<'src> {
        Tokenizer {
            src,
            position: 0,
            line: 1,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        while self.position < self.src.len() {
            if let Some(token) = self.scan()? {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }

    /// Scans one match at the current position, emitting a token unless the
    /// matched category is trivia.
    fn scan(&mut self) -> Result<Option<Token>, LexicalError> {
        let rest = &self.src[self.position..];
        for &(kind, matcher) in RULES {
            let Some(len) = matcher(rest) else { continue };
            let lexeme = &rest[..len];
            // The token records the line the match began on; only trailing
            // whitespace can contain the newlines that move the counter.
            let line = self.line;
            self.position += len;
            if kind.is_trivia() {
                let newlines = lexeme.bytes().filter(|&b| b == b'\n').count();
                self.line += u32::try_from(newlines).unwrap();
                return Ok(None);
            }
            return Ok(Some(Token::new(kind, lexeme, line)));
        }
        let found = rest.chars().next().unwrap_or('\0');
        Err(LexicalError {
            found,
            position: self.position,
        })
    }
}

fn match_equality(s: &str) -> Option<usize> {
    s.starts_with("==").then_some(2)
}

fn match_comment(s: &str) -> Option<usize> {
    // `//` through the end of the line, newline excluded.
    s.starts_with("//")
        .then(|| s.find('\n').unwrap_or(s.len()))
}

fn match_number(s: &str) -> Option<usize> {
    fn digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let bytes = s.as_bytes();
    let int_len = digits(bytes);
    if int_len == 0 {
        return None;
    }
    // A dot belongs to the number only when at least one digit follows it.
    if bytes.get(int_len) == Some(&b'.') {
        let frac_len = digits(&bytes[int_len + 1..]);
        if frac_len > 0 {
            return Some(int_len + 1 + frac_len);
        }
    }
    Some(int_len)
}

fn match_identifier(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return None,
    }
    let tail = bytes[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    Some(1 + tail)
}

fn match_operator(s: &str) -> Option<usize> {
    matches!(
        s.as_bytes().first(),
        Some(b'+' | b'-' | b'*' | b'/' | b'=')
    )
    .then_some(1)
}

fn match_paren(s: &str) -> Option<usize> {
    matches!(s.as_bytes().first(), Some(b'(' | b')')).then_some(1)
}

fn match_brace(s: &str) -> Option<usize> {
    matches!(s.as_bytes().first(), Some(b'{' | b'}')).then_some(1)
}

fn match_semicolon(s: &str) -> Option<usize> {
    (s.as_bytes().first() == Some(&b';')).then_some(1)
}

fn match_whitespace(s: &str) -> Option<usize> {
    let len = s.bytes().take_while(u8::is_ascii_whitespace).count();
    (len > 0).then_some(len)
}
