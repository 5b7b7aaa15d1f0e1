use num_complex::Complex64;
use std::fmt;

use crate::lexer::Token;

/// The complex unit, spelled `I` in source text
pub const IMAGINARY_UNIT: Complex64 = Complex64 { re: 0.0, im: 1.0 };

/// Leaf value of every expression
///
/// Strings keep their delimiting quotes, so `"m"` in source is stored as the
/// four characters `"m"` including both quote marks.
#[derive(Debug, Clone, Default)]
pub enum Atom {
    /// No value (also the parser's failure marker)
    #[default]
    None,
    /// Double-precision real number
    Number(f64),
    /// Symbol name
    Symbol(String),
    /// Double-precision complex number
    Complex(Complex64),
    /// String literal, quotes included
    String(String),
}

impl Atom {
    /// Creates a symbol atom
    pub fn symbol(name: impl Into<String>) -> Self {
        Atom::Symbol(name.into())
    }

    /// Creates a string atom, adding the delimiting quotes if they are missing
    pub fn string(text: &str) -> Self {
        if is_quoted(text) {
            Atom::String(text.to_string())
        } else {
            Atom::String(format!("\"{}\"", text))
        }
    }

    /// Classifies a token into an atom
    ///
    /// Returns [`Atom::None`] for a malformed literal (a token that starts
    /// with a digit but is not a complete number) and for parentheses.
    pub fn from_token(token: &Token) -> Self {
        let text = match token {
            Token::String(text) => text.as_str(),
            Token::Open | Token::Close => return Atom::None,
        };

        if let Some(value) = parse_number(text) {
            Atom::Number(value)
        } else if text.starts_with(|c: char| c.is_ascii_digit()) {
            Atom::None
        } else if text == "I" {
            Atom::Complex(IMAGINARY_UNIT)
        } else if is_quoted(text) {
            Atom::String(text.to_string())
        } else {
            Atom::Symbol(text.to_string())
        }
    }

    /// True for the None atom
    pub fn is_none(&self) -> bool {
        matches!(self, Atom::None)
    }

    /// True for a Number atom
    pub fn is_number(&self) -> bool {
        matches!(self, Atom::Number(_))
    }

    /// True for a Symbol atom
    pub fn is_symbol(&self) -> bool {
        matches!(self, Atom::Symbol(_))
    }

    /// True for a Complex atom
    pub fn is_complex(&self) -> bool {
        matches!(self, Atom::Complex(_))
    }

    /// True for a String atom
    pub fn is_string(&self) -> bool {
        matches!(self, Atom::String(_))
    }

    /// Numeric value, or 0 if this is not a Number
    pub fn as_number(&self) -> f64 {
        match self {
            Atom::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Symbol name, or the empty string if this is not a Symbol
    pub fn as_symbol(&self) -> &str {
        match self {
            Atom::Symbol(s) => s,
            _ => "",
        }
    }

    /// Complex value; a Number is promoted to `n + 0i`, anything else is 0
    pub fn as_complex(&self) -> Complex64 {
        match self {
            Atom::Complex(c) => *c,
            Atom::Number(n) => Complex64::new(*n, 0.0),
            _ => Complex64::new(0.0, 0.0),
        }
    }

    /// String literal text with its quotes, or the empty string
    pub fn as_string(&self) -> &str {
        match self {
            Atom::String(s) => s,
            _ => "",
        }
    }

    /// String literal text without its delimiting quotes
    pub fn unquoted(&self) -> &str {
        let s = self.as_string();
        if is_quoted(s) {
            &s[1..s.len() - 1]
        } else {
            s
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Atom::None => "none",
            Atom::Number(_) => "number",
            Atom::Symbol(_) => "symbol",
            Atom::Complex(_) => "complex",
            Atom::String(_) => "string",
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Atom::None, Atom::None) => true,
            (Atom::Number(a), Atom::Number(b)) => {
                let diff = (a - b).abs();
                !diff.is_nan() && diff <= f64::EPSILON
            }
            (Atom::Symbol(a), Atom::Symbol(b)) => a == b,
            (Atom::Complex(a), Atom::Complex(b)) => a == b,
            (Atom::String(a), Atom::String(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Atom {
    fn from(value: f64) -> Self {
        Atom::Number(value)
    }
}

impl From<Complex64> for Atom {
    fn from(value: Complex64) -> Self {
        Atom::Complex(value)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::None => Ok(()),
            Atom::Number(n) => f.write_str(&format_number(*n)),
            Atom::Symbol(s) | Atom::String(s) => f.write_str(s),
            Atom::Complex(c) => write!(f, "{},{}", format_number(c.re), format_number(c.im)),
        }
    }
}

fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

/// Parses a complete signed floating literal, rejecting `inf`/`nan` spellings
fn parse_number(text: &str) -> Option<f64> {
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.')) {
        return None;
    }
    if text
        .chars()
        .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Formats a number the way C's `%g` does: six significant digits, trailing
/// zeros removed, scientific notation outside `1e-4 ..= 1e6`
pub fn format_number(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round to the target precision first; the exponent can shift (9.999996 -> 10)
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
