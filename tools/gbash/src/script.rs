//! Line-oriented call scripts.
//!
//! ```text
//! # comments run to the end of the line
//! red = Video.rgb5 31 0 0
//! Video::Palette.bg_set 0 $red
//! Video.set_mode Video::MODE_4 | Video::BG2_ENABLE
//! SRAM.write_string 0x10 "save\x00"
//! ```
//!
//! Each line is one call: `[name =] Module::Path.method arg...`. Arguments
//! are separated by whitespace or commas and may be decimal or `0x` integers,
//! constants (`Module::NAME`), variables (`$name`), or quoted strings. Integer
//! arguments can be OR'd together with `|`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Int(i64),
    Const { module: String, name: String },
    Var(String),
    Str(Vec<u8>),
}

/// One argument: a single term, or several integer terms OR'd together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg(pub Vec<Term>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub line: usize,
    pub bind: Option<String>,
    pub module: String,
    pub method: String,
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Str(Vec<u8>),
    Pipe,
    Assign,
}

pub fn parse(source: &str) -> Result<Vec<Stmt>, ParseError> {
    let mut stmts = Vec::new();
    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        let tokens = tokenize(text).map_err(|message| ParseError { line, message })?;
        if tokens.is_empty() {
            continue;
        }
        stmts.push(parse_stmt(line, tokens).map_err(|message| ParseError { line, message })?);
    }
    Ok(stmts)
}

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '#' => break,
            c if c.is_whitespace() || c == ',' => {
                chars.next();
            }
            '|' => {
                chars.next();
                tokens.push(Token::Pipe);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Assign);
            }
            '"' => {
                chars.next();
                tokens.push(Token::Str(string_literal(&mut chars)?));
            }
            _ => {
                let mut end = text.len();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, ',' | '|' | '=' | '"' | '#') {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                tokens.push(Token::Word(text[start..end].to_string()));
            }
        }
    }
    Ok(tokens)
}

fn string_literal(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    loop {
        let Some((_, c)) = chars.next() else {
            return Err("unterminated string".to_string());
        };
        match c {
            '"' => return Ok(bytes),
            '\\' => {
                let Some((_, esc)) = chars.next() else {
                    return Err("unterminated string".to_string());
                };
                match esc {
                    'n' => bytes.push(b'\n'),
                    't' => bytes.push(b'\t'),
                    '0' => bytes.push(0),
                    '\\' => bytes.push(b'\\'),
                    '"' => bytes.push(b'"'),
                    'x' => {
                        let hex: String = (0..2).filter_map(|_| chars.next().map(|(_, c)| c)).collect();
                        let byte = u8::from_str_radix(&hex, 16)
                            .map_err(|_| format!("bad escape \\x{}", hex))?;
                        bytes.push(byte);
                    }
                    other => return Err(format!("unknown escape \\{}", other)),
                }
            }
            c => {
                let mut buf = [0; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
}

fn parse_stmt(line: usize, tokens: Vec<Token>) -> Result<Stmt, String> {
    let mut rest = tokens.as_slice();

    let bind = match rest {
        [Token::Word(name), Token::Assign, tail @ ..] => {
            if !is_ident(name) {
                return Err(format!("'{}' is not a valid variable name", name));
            }
            rest = tail;
            Some(name.clone())
        }
        _ => None,
    };

    let (module, method) = match rest.first() {
        Some(Token::Word(head)) => split_call(head)?,
        _ => return Err("expected Module.method".to_string()),
    };
    rest = &rest[1..];

    let mut args = Vec::new();
    let mut current: Vec<Term> = Vec::new();
    let mut want_term = true;
    for token in rest {
        match token {
            Token::Pipe if !want_term => want_term = true,
            Token::Pipe => return Err("'|' needs a value on each side".to_string()),
            Token::Assign => return Err("unexpected '='".to_string()),
            Token::Word(w) => {
                if !want_term {
                    args.push(Arg(std::mem::take(&mut current)));
                }
                current.push(term(w)?);
                want_term = false;
            }
            Token::Str(s) => {
                if !want_term {
                    args.push(Arg(std::mem::take(&mut current)));
                }
                current.push(Term::Str(s.clone()));
                want_term = false;
            }
        }
    }
    if want_term && !current.is_empty() {
        return Err("'|' needs a value on each side".to_string());
    }
    if !current.is_empty() {
        args.push(Arg(current));
    }

    Ok(Stmt { line, bind, module, method, args })
}

fn split_call(head: &str) -> Result<(String, String), String> {
    match head.rsplit_once('.') {
        Some((module, method)) if !module.is_empty() && is_ident(method) => {
            Ok((module.to_string(), method.to_string()))
        }
        _ => Err(format!("expected Module.method, found '{}'", head)),
    }
}

fn term(word: &str) -> Result<Term, String> {
    if let Some(var) = word.strip_prefix('$') {
        return if is_ident(var) {
            Ok(Term::Var(var.to_string()))
        } else {
            Err(format!("bad variable '{}'", word))
        };
    }
    if let Some((module, name)) = word.rsplit_once("::") {
        return Ok(Term::Const { module: module.to_string(), name: name.to_string() });
    }
    int(word).map(Term::Int).ok_or_else(|| format!("cannot read '{}' as a value", word))
}

fn int(word: &str) -> Option<i64> {
    let (neg, digits) = match word.strip_prefix('-') {
        Some(d) => (true, d),
        None => (false, word),
    };
    let digits = digits.replace('_', "");
    let value = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => match digits.strip_prefix("0b") {
            Some(bin) => i64::from_str_radix(bin, 2).ok()?,
            None => digits.parse().ok()?,
        },
    };
    Some(if neg { -value } else { value })
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(src: &str) -> Stmt {
        let mut stmts = parse(src).unwrap();
        assert_eq!(stmts.len(), 1);
        stmts.remove(0)
    }

    fn ints(values: &[i64]) -> Vec<Arg> {
        values.iter().map(|v| Arg(vec![Term::Int(*v)])).collect()
    }

    #[test]
    fn plain_call() {
        let stmt = one("Video.rgb5 31, 0 0x1F");
        assert_eq!(stmt.module, "Video");
        assert_eq!(stmt.method, "rgb5");
        assert_eq!(stmt.bind, None);
        assert_eq!(stmt.args, ints(&[31, 0, 0x1F]));
    }

    #[test]
    fn binding_nested_module_and_vars() {
        let stmt = one("  red = Video::Palette.bg_set -1 $red # trailing");
        assert_eq!(stmt.bind.as_deref(), Some("red"));
        assert_eq!(stmt.module, "Video::Palette");
        assert_eq!(stmt.method, "bg_set");
        assert_eq!(stmt.args, vec![Arg(vec![Term::Int(-1)]), Arg(vec![Term::Var("red".into())])]);
    }

    #[test]
    fn or_of_constants() {
        let stmt = one("Video.set_mode Video::MODE_4 | Video::BG2_ENABLE|0b1");
        assert_eq!(
            stmt.args,
            vec![Arg(vec![
                Term::Const { module: "Video".into(), name: "MODE_4".into() },
                Term::Const { module: "Video".into(), name: "BG2_ENABLE".into() },
                Term::Int(1),
            ])]
        );
    }

    #[test]
    fn strings_with_escapes() {
        let stmt = one(r#"SRAM.write_string 0 "a, b # c\x00\n\"""#);
        assert_eq!(stmt.args[1], Arg(vec![Term::Str(b"a, b # c\0\n\"".to_vec())]));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let stmts = parse("\n# setup\n\nInput.update\n  # done\nVideo::Mode4.flip\n").unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].line, 4);
        assert_eq!(stmts[1].line, 6);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse("Input.update\nVideo.rgb5 1 |").unwrap_err();
        assert_eq!(err.line, 2);

        assert_eq!(parse("rgb5 1 2 3").unwrap_err().line, 1);
        assert!(parse("Video.rgb5 zz").is_err());
        assert!(parse(r#"SRAM.write_string 0 "open"#).is_err());
        assert!(parse(r#"SRAM.write_string 0 "\q""#).is_err());
        assert!(parse("1x = Video.rgb5 1 2 3").is_err());
    }
}
