//! Content stream tokenizer.
//!
//! Splits raw content stream bytes into [`Operator`]s, each carrying the
//! [`Operand`]s that preceded it. Only the lexical layer is handled here;
//! what an operator means is decided by the caller.

use crate::error::BackendError;

/// A content stream operand value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Integer number (e.g., `42`, `-7`).
    Integer(i64),
    /// Real number (e.g., `3.14`, `.5`).
    Real(f64),
    /// Name object without the leading `/`.
    Name(String),
    /// Literal string `(...)`, escapes resolved.
    LiteralString(Vec<u8>),
    /// Hex string `<...>`, decoded.
    HexString(Vec<u8>),
    Array(Vec<Operand>),
    Boolean(bool),
    Null,
    /// Dictionary `<< /Key value ... >>` in source order.
    Dictionary(Vec<(String, Operand)>),
    /// A token that starts like a number but is not one (e.g., `1.2.3`, `-`).
    Unparsed(String),
}

impl Operand {
    /// Numeric value of an integer or real operand.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Operand::Integer(i) => Some(i as f64),
            Operand::Real(r) => Some(r),
            _ => None,
        }
    }
}

/// A content stream operator with its preceding operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    /// Operator name (e.g., `"m"`, `"l"`, `"re"`, `"S"`).
    pub name: String,
    pub operands: Vec<Operand>,
}

impl Operator {
    pub fn new(name: impl Into<String>, operands: Vec<Operand>) -> Self {
        Self {
            name: name.into(),
            operands,
        }
    }
}

/// Parse content stream bytes into a sequence of operators.
///
/// Comments are stripped and inline images (`BI` ... `ID` ... `EI`) are
/// skipped entirely. Operands left over at the end of the stream are dropped.
///
/// # Errors
///
/// Returns [`BackendError::Interpreter`] for unterminated strings, arrays,
/// dictionaries or inline images, and for stray closing delimiters.
pub fn tokenize(input: &[u8]) -> Result<Vec<Operator>, BackendError> {
    let mut lexer = Lexer::new(input);
    let mut ops = Vec::new();
    let mut operands = Vec::new();

    while let Some(token) = lexer.next_token()? {
        match token {
            Token::Keyword(word) => match word.as_str() {
                "true" => operands.push(Operand::Boolean(true)),
                "false" => operands.push(Operand::Boolean(false)),
                "null" => operands.push(Operand::Null),
                "BI" => {
                    lexer.skip_inline_image()?;
                    operands.clear();
                }
                _ => ops.push(Operator::new(word, std::mem::take(&mut operands))),
            },
            Token::ArrayEnd => {
                return Err(BackendError::Interpreter(format!(
                    "unexpected ']' at byte {}",
                    lexer.pos
                )));
            }
            Token::DictEnd => {
                return Err(BackendError::Interpreter(format!(
                    "unexpected '>>' at byte {}",
                    lexer.pos
                )));
            }
            other => operands.push(lexer.finish_object(other)?),
        }
    }

    Ok(ops)
}

#[derive(Debug)]
enum Token {
    Value(Operand),
    Keyword(String),
    ArrayStart,
    ArrayEnd,
    DictStart,
    DictEnd,
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_regular(b: u8) -> bool {
    !is_whitespace(b) && !is_delimiter(b)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl<'a> Lexer<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn unterminated(&self, what: &str) -> BackendError {
        BackendError::Interpreter(format!("unterminated {what} at end of stream"))
    }

    fn skip_trivia(&mut self) {
        while let Some(b) = self.peek() {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'%' {
                while let Some(c) = self.peek() {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn regular_run(&mut self) -> &'a [u8] {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(is_regular) {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn next_token(&mut self) -> Result<Option<Token>, BackendError> {
        loop {
            self.skip_trivia();
            let Some(b) = self.peek() else {
                return Ok(None);
            };
            let token = match b {
                b'(' => Token::Value(Operand::LiteralString(self.literal_string()?)),
                b'<' if self.peek_at(1) == Some(b'<') => {
                    self.pos += 2;
                    Token::DictStart
                }
                b'>' if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    Token::DictEnd
                }
                b'<' => Token::Value(Operand::HexString(self.hex_string()?)),
                b'[' => {
                    self.pos += 1;
                    Token::ArrayStart
                }
                b']' => {
                    self.pos += 1;
                    Token::ArrayEnd
                }
                b'/' => {
                    self.pos += 1;
                    Token::Value(Operand::Name(self.name()))
                }
                b'0'..=b'9' | b'+' | b'-' | b'.' => Token::Value(self.number()),
                _ if is_regular(b) => {
                    let word = self.regular_run();
                    Token::Keyword(String::from_utf8_lossy(word).into_owned())
                }
                _ => {
                    // Stray ')', '>', '{' or '}' carry no meaning here.
                    self.pos += 1;
                    continue;
                }
            };
            return Ok(Some(token));
        }
    }

    /// Turn a token into a complete operand, reading nested arrays and
    /// dictionaries as needed.
    fn finish_object(&mut self, token: Token) -> Result<Operand, BackendError> {
        match token {
            Token::Value(operand) => Ok(operand),
            Token::Keyword(word) => Ok(match word.as_str() {
                "true" => Operand::Boolean(true),
                "false" => Operand::Boolean(false),
                "null" => Operand::Null,
                _ => Operand::Name(word),
            }),
            Token::ArrayStart => {
                let mut items = Vec::new();
                loop {
                    match self.next_token()? {
                        None => return Err(self.unterminated("array")),
                        Some(Token::ArrayEnd) => return Ok(Operand::Array(items)),
                        Some(Token::DictEnd) => {
                            return Err(BackendError::Interpreter(
                                "unexpected '>>' inside array".to_string(),
                            ));
                        }
                        Some(token) => items.push(self.finish_object(token)?),
                    }
                }
            }
            Token::DictStart => {
                let mut entries = Vec::new();
                loop {
                    let key = match self.next_token()? {
                        None => return Err(self.unterminated("dictionary")),
                        Some(Token::DictEnd) => return Ok(Operand::Dictionary(entries)),
                        Some(Token::Value(Operand::Name(key))) => key,
                        Some(other) => {
                            return Err(BackendError::Interpreter(format!(
                                "expected name key in dictionary, found {other:?}"
                            )));
                        }
                    };
                    let value = match self.next_token()? {
                        None => return Err(self.unterminated("dictionary")),
                        Some(token @ (Token::DictEnd | Token::ArrayEnd)) => {
                            return Err(BackendError::Interpreter(format!(
                                "missing value for /{key}, found {token:?}"
                            )));
                        }
                        Some(token) => self.finish_object(token)?,
                    };
                    entries.push((key, value));
                }
            }
            Token::ArrayEnd | Token::DictEnd => Err(BackendError::Interpreter(format!(
                "unexpected {token:?}"
            ))),
        }
    }

    fn literal_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1;
        let mut out = Vec::new();
        let mut depth = 1u32;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'(' => {
                    depth += 1;
                    out.push(b);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                    out.push(b);
                }
                b'\\' => self.escape(&mut out)?,
                _ => out.push(b),
            }
        }
        Err(self.unterminated("literal string"))
    }

    fn escape(&mut self, out: &mut Vec<u8>) -> Result<(), BackendError> {
        let Some(b) = self.peek() else {
            return Err(self.unterminated("escape in literal string"));
        };
        self.pos += 1;
        match b {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'\r' => {
                // Line continuation, CR or CR LF.
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            b'\n' => {}
            b'0'..=b'7' => {
                let mut value = u32::from(b - b'0');
                for _ in 0..2 {
                    match self.peek() {
                        Some(d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                out.push((value & 0xFF) as u8);
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn hex_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1;
        let mut nibbles = Vec::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(self.unterminated("hex string"));
            };
            self.pos += 1;
            if b == b'>' {
                break;
            }
            if is_whitespace(b) {
                continue;
            }
            let nibble = hex_value(b).ok_or_else(|| {
                BackendError::Interpreter(format!("invalid hex digit {:?}", b as char))
            })?;
            nibbles.push(nibble);
        }
        // An odd final digit is padded with 0.
        if nibbles.len() % 2 == 1 {
            nibbles.push(0);
        }
        Ok(nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
    }

    fn name(&mut self) -> String {
        let raw = self.regular_run();
        let mut out = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'#' && i + 2 < raw.len() {
                if let (Some(hi), Some(lo)) = (hex_value(raw[i + 1]), hex_value(raw[i + 2])) {
                    out.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
            }
            out.push(raw[i]);
            i += 1;
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    fn number(&mut self) -> Operand {
        let text = String::from_utf8_lossy(self.regular_run()).into_owned();
        let body = text.strip_prefix(['+', '-']).unwrap_or(&text);
        let dots = body.bytes().filter(|&b| b == b'.').count();
        let well_formed = dots <= 1
            && body.bytes().any(|b| b.is_ascii_digit())
            && body.bytes().all(|b| b.is_ascii_digit() || b == b'.');
        if !well_formed {
            return Operand::Unparsed(text);
        }
        if dots == 0 {
            if let Ok(i) = text.parse::<i64>() {
                return Operand::Integer(i);
            }
        }
        match text.parse::<f64>() {
            Ok(r) => Operand::Real(r),
            Err(_) => Operand::Unparsed(text),
        }
    }

    /// Skip an inline image after its `BI` keyword, through the closing `EI`.
    fn skip_inline_image(&mut self) -> Result<(), BackendError> {
        loop {
            match self.next_token()? {
                None => return Err(self.unterminated("inline image dictionary")),
                Some(Token::Keyword(word)) if word == "ID" => break,
                Some(_) => {}
            }
        }
        // Exactly one whitespace byte separates ID from the data.
        self.pos += 1;
        while self.pos < self.input.len() {
            let at_ei = self.input[self.pos..].starts_with(b"EI")
                && self.pos > 0
                && is_whitespace(self.input[self.pos - 1])
                && self.peek_at(2).is_none_or(|b| !is_regular(b));
            if at_ei {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(self.unterminated("inline image data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ops: &[Operator]) -> Vec<&str> {
        ops.iter().map(|op| op.name.as_str()).collect()
    }

    #[test]
    fn test_path_operators() {
        let ops = tokenize(b"10 20 m 110.5 20 l S").unwrap();
        assert_eq!(names(&ops), vec!["m", "l", "S"]);
        assert_eq!(ops[0].operands, vec![Operand::Integer(10), Operand::Integer(20)]);
        assert_eq!(ops[1].operands, vec![Operand::Real(110.5), Operand::Integer(20)]);
        assert!(ops[2].operands.is_empty());
    }

    #[test]
    fn test_numbers() {
        let ops = tokenize(b"-7 +3 .5 -.25 4. x").unwrap();
        assert_eq!(
            ops[0].operands,
            vec![
                Operand::Integer(-7),
                Operand::Integer(3),
                Operand::Real(0.5),
                Operand::Real(-0.25),
                Operand::Real(4.0),
            ]
        );
    }

    #[test]
    fn test_malformed_numbers_are_kept_as_unparsed() {
        let ops = tokenize(b"1.2.3 - 5 m").unwrap();
        assert_eq!(
            ops[0].operands,
            vec![
                Operand::Unparsed("1.2.3".to_string()),
                Operand::Unparsed("-".to_string()),
                Operand::Integer(5),
            ]
        );
    }

    #[test]
    fn test_comments_stripped() {
        let ops = tokenize(b"% header\n0 0 m % trailing\n100 0 l").unwrap();
        assert_eq!(names(&ops), vec!["m", "l"]);
    }

    #[test]
    fn test_operators_with_digits() {
        let ops = tokenize(b"500 0 d0").unwrap();
        assert_eq!(names(&ops), vec!["d0"]);
        assert_eq!(ops[0].operands.len(), 2);
    }

    #[test]
    fn test_strings() {
        let ops = tokenize(b"(a\\(b\\) \\101\\n) <48 65 6C6C 6F> Tj").unwrap();
        assert_eq!(
            ops[0].operands,
            vec![
                Operand::LiteralString(b"a(b) A\n".to_vec()),
                Operand::HexString(b"Hello".to_vec()),
            ]
        );
    }

    #[test]
    fn test_nested_parentheses() {
        let ops = tokenize(b"(outer (inner) done) Tj").unwrap();
        assert_eq!(
            ops[0].operands,
            vec![Operand::LiteralString(b"outer (inner) done".to_vec())]
        );
    }

    #[test]
    fn test_odd_hex_padded() {
        let ops = tokenize(b"<7> Tj").unwrap();
        assert_eq!(ops[0].operands, vec![Operand::HexString(vec![0x70])]);
    }

    #[test]
    fn test_array_and_dictionary() {
        let ops = tokenize(b"[3 1] 0 d /OC << /MCID 4 /Tag /P#20Q /On true >> BDC").unwrap();
        assert_eq!(names(&ops), vec!["d", "BDC"]);
        assert_eq!(
            ops[0].operands,
            vec![
                Operand::Array(vec![Operand::Integer(3), Operand::Integer(1)]),
                Operand::Integer(0),
            ]
        );
        assert_eq!(
            ops[1].operands[1],
            Operand::Dictionary(vec![
                ("MCID".to_string(), Operand::Integer(4)),
                ("Tag".to_string(), Operand::Name("P Q".to_string())),
                ("On".to_string(), Operand::Boolean(true)),
            ])
        );
    }

    #[test]
    fn test_inline_image_skipped() {
        let ops = tokenize(b"q BI /W 2 /H 1 /BPC 8 ID \x00\xFFEI\x01 EI Q 0 0 m").unwrap();
        assert_eq!(names(&ops), vec!["q", "Q", "m"]);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = tokenize(b"0 0 m (never closed").unwrap_err();
        assert!(matches!(err, BackendError::Interpreter(_)));
        assert!(err.to_string().contains("literal string"));
    }

    #[test]
    fn test_unterminated_array_is_error() {
        assert!(tokenize(b"[1 2 3").is_err());
    }

    #[test]
    fn test_stray_array_end_is_error() {
        assert!(tokenize(b"1 2 ] m").is_err());
    }

    #[test]
    fn test_invalid_hex_is_error() {
        assert!(tokenize(b"<4G> Tj").is_err());
    }

    #[test]
    fn test_empty_stream() {
        assert!(tokenize(b"").unwrap().is_empty());
        assert!(tokenize(b"  \n% only a comment").unwrap().is_empty());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Operand::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Operand::Real(2.5).as_f64(), Some(2.5));
        assert_eq!(Operand::Name("x".to_string()).as_f64(), None);
        assert_eq!(Operand::Unparsed("1.2.3".to_string()).as_f64(), None);
    }
}
