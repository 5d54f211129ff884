//! Line-aware lexer for the `[test]` command language.
//!
//! Tokens are separated by whitespace, `(`, `)` and `,`. A `#` comments out the rest of
//! the line, and a lone `\` at the end of a line joins it with the next one. A token that
//! starts like a number but has trailing text is split: `2%` lexes as `2` then `%`.

use crate::foundation::error::{RecipeError, RecipeResult};

/// One lexical token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Bare word or quoted string, quotes and escapes removed.
    String(String),
    /// Integer literal. Negative values are stored as their two's complement bits.
    Integer {
        /// Value bits.
        value: u64,
        /// Written with a leading `-`.
        negative: bool,
        /// Source text of the literal.
        text: String,
    },
    /// Floating point literal.
    Double {
        /// Parsed value.
        value: f64,
        /// Written with a leading `-`.
        negative: bool,
        /// Source text of the literal.
        text: String,
    },
    /// `(`
    OpenBracket,
    /// `)`
    CloseBracket,
    /// `,`
    Comma,
    /// End of line.
    Eol,
    /// End of input.
    Eos,
}

impl Token {
    /// True for words and quoted strings.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// True for integer literals.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer { .. })
    }

    /// True for floating point literals.
    pub fn is_double(&self) -> bool {
        matches!(self, Self::Double { .. })
    }

    /// True for `(`.
    pub fn is_open_bracket(&self) -> bool {
        matches!(self, Self::OpenBracket)
    }

    /// True for `)`.
    pub fn is_close_bracket(&self) -> bool {
        matches!(self, Self::CloseBracket)
    }

    /// True for `,`.
    pub fn is_comma(&self) -> bool {
        matches!(self, Self::Comma)
    }

    /// True at the end of a line.
    pub fn is_eol(&self) -> bool {
        matches!(self, Self::Eol)
    }

    /// True at the end of input.
    pub fn is_eos(&self) -> bool {
        matches!(self, Self::Eos)
    }

    /// True for a leading `-` on a number.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer { negative, .. } | Self::Double { negative, .. } => *negative,
            _ => false,
        }
    }

    /// Word text, or empty for anything else.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) => s,
            _ => "",
        }
    }

    /// Text as written, for diagnostics.
    pub fn to_original_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer { text, .. } | Self::Double { text, .. } => text.clone(),
            Self::OpenBracket => "(".to_owned(),
            Self::CloseBracket => ")".to_owned(),
            Self::Comma => ",".to_owned(),
            Self::Eol => "\n".to_owned(),
            Self::Eos => String::new(),
        }
    }

    fn bits(&self) -> u64 {
        match self {
            Self::Integer { value, .. } => *value,
            Self::Double { value, .. } => *value as i64 as u64,
            _ => 0,
        }
    }

    /// Value truncated to 32 bits.
    pub fn as_u32(&self) -> u32 {
        self.bits() as u32
    }

    /// Value bits.
    pub fn as_u64(&self) -> u64 {
        self.bits()
    }

    /// Value reinterpreted as a signed 32-bit number.
    pub fn as_i32(&self) -> i32 {
        self.bits() as i32
    }

    /// Value reinterpreted as a signed 64-bit number.
    pub fn as_i64(&self) -> i64 {
        self.bits() as i64
    }

    /// Double value; only meaningful after [`Token::convert_to_double`].
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Double { value, .. } => *value,
            _ => 0.0,
        }
    }

    /// Double value narrowed to `f32`.
    pub fn as_f32(&self) -> f32 {
        self.as_f64() as f32
    }

    /// Turn an integer token into a double token in place.
    pub fn convert_to_double(&mut self) -> RecipeResult<()> {
        match self {
            Self::Double { .. } => Ok(()),
            Self::Integer {
                value,
                negative,
                text,
            } => {
                if !*negative && *value > i64::MAX as u64 {
                    return Err(RecipeError::codec("uint64_t value too big to fit in double"));
                }
                *self = Self::Double {
                    value: *value as i64 as f64,
                    negative: *negative,
                    text: std::mem::take(text),
                };
                Ok(())
            }
            _ => Err(RecipeError::codec("Invalid conversion to double")),
        }
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b'\0' | b'\t' | b'\r' | 0x0c | b' ')
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\r' | b'\n' | b'(' | b')' | b',')
}

// Length of the longest number at the start of `s`, and whether it is a double.
fn numeric_prefix(s: &[u8]) -> (usize, bool) {
    let digits = |from: usize| s[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(s.first(), Some(b'-' | b'+')));
    let int_digits = digits(end);
    end += int_digits;

    let mut is_double = false;
    let mut frac_digits = 0;
    if s.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits + frac_digits > 0 {
            is_double = true;
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return (0, false);
    }

    if matches!(s.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(s.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            is_double = true;
            end = exp + exp_digits;
        }
    }
    (end, is_double)
}

/// Lexer over one block of script text.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    data: String,
    pos: usize,
    line: usize,
}

impl Tokenizer {
    /// Lexer starting on line 1.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            line: 1,
        }
    }

    /// Line of the next token.
    pub fn current_line(&self) -> usize {
        self.line
    }

    /// Renumber the current line, for text cut out of a larger file.
    pub fn set_current_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Next token without consuming it.
    pub fn peek_next_token(&mut self) -> Token {
        let (pos, line) = (self.pos, self.line);
        let token = self.next_token();
        self.pos = pos;
        self.line = line;
        token
    }

    /// Raw text up to the next occurrence of `marker`, or to the end of input.
    pub fn extract_to_next(&mut self, marker: &str) -> String {
        let rest = &self.data[self.pos..];
        let len = rest.find(marker).unwrap_or(rest.len());
        let out = rest[..len].to_owned();
        self.pos += len;
        self.line += out.matches('\n').count();
        out
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.data.as_bytes();
        while self.pos < bytes.len() && is_whitespace(bytes[self.pos]) {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) {
        let bytes = self.data.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let bytes = self.data.as_bytes();
            let Some(&first) = bytes.get(self.pos) else {
                return Token::Eos;
            };

            match first {
                b'#' => {
                    self.skip_comment();
                    continue;
                }
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                    return Token::Eol;
                }
                b'"' => return self.quoted_string(),
                b'(' => {
                    self.pos += 1;
                    return Token::OpenBracket;
                }
                b')' => {
                    self.pos += 1;
                    return Token::CloseBracket;
                }
                b',' => {
                    self.pos += 1;
                    return Token::Comma;
                }
                _ => {}
            }

            let start = self.pos;
            let end = bytes[start..]
                .iter()
                .position(|b| is_delimiter(*b))
                .map_or(bytes.len(), |n| start + n);
            let word = &bytes[start..end];

            // Line continuation.
            if word == b"\\" {
                if bytes.get(end) == Some(&b'\n') {
                    self.line += 1;
                    self.pos = end + 1;
                    continue;
                }
                if bytes.get(end) == Some(&b'\r') && bytes.get(end + 1) == Some(&b'\n') {
                    self.line += 1;
                    self.pos = end + 2;
                    continue;
                }
            }

            return self.word(start, end);
        }
    }

    fn word(&mut self, start: usize, end: usize) -> Token {
        let text = &self.data[start..end];
        let bytes = text.as_bytes();

        if text.eq_ignore_ascii_case("nan") {
            self.pos = end;
            return Token::Double {
                value: f64::NAN,
                negative: false,
                text: text.to_owned(),
            };
        }

        if bytes.len() > 2 && bytes[0] == b'0' && bytes[1] == b'x' {
            let digits = bytes[2..]
                .iter()
                .take_while(|b| b.is_ascii_hexdigit())
                .count();
            if digits > 0 {
                let lit = &text[..2 + digits];
                self.pos = start + lit.len();
                return Token::Integer {
                    value: u64::from_str_radix(&lit[2..], 16).unwrap_or(u64::MAX),
                    negative: false,
                    text: lit.to_owned(),
                };
            }
        }

        let starts_numeric = bytes[0].is_ascii_digit()
            || (matches!(bytes[0], b'-' | b'.') && bytes.get(1).is_some_and(u8::is_ascii_digit));
        let (len, is_double) = if starts_numeric {
            numeric_prefix(bytes)
        } else {
            (0, false)
        };
        if len == 0 {
            self.pos = end;
            return Token::String(text.to_owned());
        }

        let lit = &text[..len];
        self.pos = start + len;
        let negative = lit.starts_with('-');
        if is_double {
            return Token::Double {
                value: lit.parse().unwrap_or(0.0),
                negative,
                text: lit.to_owned(),
            };
        }

        let magnitude: u64 = lit
            .trim_start_matches(['-', '+'])
            .parse()
            .unwrap_or(u64::MAX);
        Token::Integer {
            value: if negative {
                magnitude.wrapping_neg()
            } else {
                magnitude
            },
            negative,
            text: lit.to_owned(),
        }
    }

    fn quoted_string(&mut self) -> Token {
        // Skip the opening quote.
        self.pos += 1;
        let mut out = String::new();
        let mut escape = false;
        let rest = &self.data[self.pos..];
        for (i, c) in rest.char_indices() {
            if escape {
                escape = false;
                out.push(match c {
                    'a' => '\u{7}',
                    'b' => '\u{8}',
                    't' => '\t',
                    'n' => '\n',
                    'v' => '\u{b}',
                    'f' => '\u{c}',
                    'r' => '\r',
                    other => other,
                });
                continue;
            }
            match c {
                '\\' => escape = true,
                '"' => {
                    self.line += rest[..i].matches('\n').count();
                    self.pos += i + 1;
                    return Token::String(out);
                }
                other => out.push(other),
            }
        }
        // Unterminated strings run to the end of input.
        self.line += rest.matches('\n').count();
        self.pos = self.data.len();
        Token::String(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vkscript/tokenizer.rs"]
mod tests;
