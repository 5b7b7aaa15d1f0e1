use crate::lexer::{tokenize, Token};
use crate::runtime::{Atom, Expression};

/// Stack-machine parser for plotlisp token sequences
///
/// A program must be exactly one balanced form. Any failure yields the empty
/// sentinel expression (see [`Expression::is_none`]); the parser never
/// returns an error.
pub struct StackParser {
    tokens: Vec<Token>,
}

impl StackParser {
    /// Creates a parser over a token sequence
    pub fn new(tokens: Vec<Token>) -> Self {
        StackParser { tokens }
    }

    /// Creates a parser by tokenizing source text
    pub fn from_source(source: &str) -> Self {
        StackParser::new(tokenize(source))
    }

    /// Parses the tokens into one expression, or the sentinel on failure
    pub fn parse(&self) -> Expression {
        self.try_parse().unwrap_or_default()
    }

    fn try_parse(&self) -> Option<Expression> {
        if self.tokens.is_empty() {
            return None;
        }

        let mut ast = Expression::default();
        // Each entry is the child-index path from the root to an open node
        let mut stack: Vec<Vec<usize>> = Vec::new();
        let mut at_head = false;
        let mut seen = 0;

        for token in &self.tokens {
            match token {
                Token::Open => at_head = true,
                Token::Close => {
                    stack.pop()?;
                    if stack.is_empty() {
                        seen += 1;
                        break;
                    }
                }
                Token::String(_) => {
                    let atom = Atom::from_token(token);
                    if atom.is_none() {
                        return None;
                    }

                    if at_head {
                        match stack.last().cloned() {
                            None => {
                                *ast.head_mut() = atom;
                                stack.push(Vec::new());
                            }
                            Some(mut path) => {
                                let parent = node_at(&mut ast, &path)?;
                                parent.append(atom);
                                path.push(parent.tail().len() - 1);
                                stack.push(path);
                            }
                        }
                        at_head = false;
                    } else {
                        let path = stack.last()?;
                        node_at(&mut ast, path)?.append(atom);
                    }
                }
            }
            seen += 1;
        }

        if stack.is_empty() && seen == self.tokens.len() {
            Some(ast)
        } else {
            None
        }
    }
}

fn node_at<'a>(root: &'a mut Expression, path: &[usize]) -> Option<&'a mut Expression> {
    path.iter()
        .try_fold(root, |node, &index| node.child_mut(index))
}

/// Parses a token sequence into one expression, or the sentinel on failure
pub fn parse(tokens: &[Token]) -> Expression {
    StackParser::new(tokens.to_vec()).parse()
}

/// Tokenizes and parses source text in one step
pub fn parse_str(source: &str) -> Expression {
    StackParser::from_source(source).parse()
}
