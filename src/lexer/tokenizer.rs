use super::token::Token;
use std::io::Read;

const OPEN_CHAR: char = '(';
const CLOSE_CHAR: char = ')';
const COMMENT_CHAR: char = ';';
const QUOTE_CHAR: char = '"';

/// One-pass tokenizer for plotlisp source text
///
/// `tokenize` consumes the tokenizer, so a source can only be scanned once.
pub struct Tokenizer {
    /// Source text as a character vector
    source: Vec<char>,
    /// Tokens produced so far
    tokens: Vec<Token>,
    /// Bare token being accumulated
    pending: String,
    /// Current position in source
    current: usize,
}

impl Tokenizer {
    /// Creates a tokenizer over the given source text
    pub fn new(source: &str) -> Self {
        Tokenizer {
            source: source.chars().collect(),
            tokens: Vec::new(),
            pending: String::new(),
            current: 0,
        }
    }

    /// Creates a tokenizer by reading a whole stream into memory
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Tokenizer::new(&source))
    }

    /// Scans the whole source and returns the token sequence
    ///
    /// An unterminated string literal discards every token and yields an
    /// empty sequence, which the parser treats as a failure.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            let c = self.advance();
            match c {
                OPEN_CHAR => {
                    self.flush();
                    self.tokens.push(Token::Open);
                }
                CLOSE_CHAR => {
                    self.flush();
                    self.tokens.push(Token::Close);
                }
                COMMENT_CHAR => {
                    self.flush();
                    self.skip_line_comment();
                }
                QUOTE_CHAR => {
                    self.flush();
                    if !self.scan_string() {
                        return Vec::new();
                    }
                }
                c if c.is_whitespace() => self.flush(),
                c => self.pending.push(c),
            }
        }
        self.flush();

        self.tokens
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.advance() != '\n' {}
    }

    /// Captures a string literal including both quotes; false if unterminated
    fn scan_string(&mut self) -> bool {
        let mut literal = String::from(QUOTE_CHAR);
        while !self.is_at_end() {
            let c = self.advance();
            literal.push(c);
            if c == QUOTE_CHAR {
                self.tokens.push(Token::String(literal));
                return true;
            }
        }
        false
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.tokens.push(Token::String(text));
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }
}

/// Tokenizes a complete source string
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).tokenize()
}
