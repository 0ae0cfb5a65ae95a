use std::fmt;

use super::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Num(f64),
    Str(String),
    True,
    False,
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{}", n),
            Token::Str(s) => write!(f, "'{}'", s),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Lt => write!(f, "<"),
            Token::Le => write!(f, "<="),
            Token::Gt => write!(f, ">"),
            Token::Ge => write!(f, ">="),
            Token::EqEq => write!(f, "=="),
            Token::Ne => write!(f, "!="),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let mut end = pos;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let text = &source[pos..end];
            let value = text
                .parse::<f64>()
                .map_err(|_| ExprError::InvalidNumber(text.to_string()))?;
            tokens.push(Token::Num(value));
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let mut end = pos;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(keyword(&source[pos..end])?);
            continue;
        }

        if ch == '\'' || ch == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == ch {
                    closed = true;
                    break;
                }
                text.push(c);
            }
            if !closed {
                return Err(ExprError::UnterminatedString(pos));
            }
            tokens.push(Token::Str(text));
            continue;
        }

        chars.next();
        let next = chars.peek().map(|&(_, c)| c);
        let token = match (ch, next) {
            ('<', Some('=')) => Token::Le,
            ('>', Some('=')) => Token::Ge,
            ('=', Some('=')) => Token::EqEq,
            ('!', Some('=')) => Token::Ne,
            ('&', Some('&')) => Token::And,
            ('|', Some('|')) => Token::Or,
            ('<', _) => Token::Lt,
            ('>', _) => Token::Gt,
            ('!', _) => Token::Not,
            ('+', _) => Token::Plus,
            ('-', _) => Token::Minus,
            ('*', _) => Token::Star,
            ('/', _) => Token::Slash,
            ('%', _) => Token::Percent,
            ('(', _) => Token::LParen,
            (')', _) => Token::RParen,
            _ => return Err(ExprError::UnexpectedChar { ch, pos }),
        };
        if matches!(
            token,
            Token::Le | Token::Ge | Token::EqEq | Token::Ne | Token::And | Token::Or
        ) {
            chars.next();
        }
        tokens.push(token);
    }

    Ok(tokens)
}

fn keyword(word: &str) -> Result<Token, ExprError> {
    match word {
        "true" | "True" => Ok(Token::True),
        "false" | "False" => Ok(Token::False),
        "and" => Ok(Token::And),
        "or" => Ok(Token::Or),
        "not" => Ok(Token::Not),
        _ => Err(ExprError::UnknownName(word.to_string())),
    }
}
