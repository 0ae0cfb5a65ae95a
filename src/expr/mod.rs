//! Restricted evaluator for `:if` conditions.
//!
//! Only number, boolean and string literals, arithmetic, comparisons and
//! boolean connectives exist. There are no names, calls or attribute access,
//! so user input can never reach anything but these operators.

mod lexer;

use std::fmt;

use lexer::{tokenize, Token};

const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    UnexpectedChar { ch: char, pos: usize },
    UnterminatedString(usize),
    InvalidNumber(String),
    UnknownName(String),
    UnexpectedToken(String),
    UnexpectedEnd,
    TooDeep,
    DivisionByZero,
    TypeMismatch(String),
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::UnexpectedChar { ch, pos } => {
                write!(f, "unexpected character '{}' at position {}", ch, pos)
            }
            ExprError::UnterminatedString(pos) => {
                write!(f, "unterminated string starting at position {}", pos)
            }
            ExprError::InvalidNumber(text) => write!(f, "invalid number: {}", text),
            ExprError::UnknownName(name) => write!(f, "name '{}' is not allowed", name),
            ExprError::UnexpectedToken(token) => write!(f, "unexpected '{}'", token),
            ExprError::UnexpectedEnd => write!(f, "unexpected end of expression"),
            ExprError::TooDeep => write!(f, "expression nested too deeply"),
            ExprError::DivisionByZero => write!(f, "division by zero"),
            ExprError::TypeMismatch(msg) => write!(f, "type mismatch: {}", msg),
        }
    }
}

impl std::error::Error for ExprError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Num(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(_) => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "number",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cmp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Value),
    Neg(Box<Expr>),
    Not(Box<Expr>),
    /// Operator chains stay flat so evaluation depth tracks nesting only.
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Arith(Box<Expr>, Vec<(Arith, Expr)>),
    Compare(Box<Expr>, Vec<(Cmp, Expr)>),
}

/// Evaluates `source` and reports its truthiness.
pub fn evaluate(source: &str) -> Result<bool, ExprError> {
    eval_value(source).map(|v| v.is_truthy())
}

pub fn eval_value(source: &str) -> Result<Value, ExprError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_or()?;
    if let Some(extra) = parser.peek() {
        return Err(ExprError::UnexpectedToken(extra.to_string()));
    }
    eval(&expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        Ok(())
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        self.enter()?;
        let mut operands = vec![self.parse_and()?];
        while self.eat(&Token::Or) {
            operands.push(self.parse_and()?);
        }
        self.depth -= 1;
        Ok(flatten(operands, Expr::Or))
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let mut operands = vec![self.parse_not()?];
        while self.eat(&Token::And) {
            operands.push(self.parse_not()?);
        }
        Ok(flatten(operands, Expr::And))
    }

    fn parse_not(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&Token::Not) {
            self.enter()?;
            let inner = self.parse_not()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_compare()
    }

    fn parse_compare(&mut self) -> Result<Expr, ExprError> {
        let first = self.parse_sum()?;
        let mut chain = Vec::new();

        loop {
            let op = match self.peek() {
                Some(Token::Lt) => Cmp::Lt,
                Some(Token::Le) => Cmp::Le,
                Some(Token::Gt) => Cmp::Gt,
                Some(Token::Ge) => Cmp::Ge,
                Some(Token::EqEq) => Cmp::Eq,
                Some(Token::Ne) => Cmp::Ne,
                _ => break,
            };
            self.pos += 1;
            chain.push((op, self.parse_sum()?));
        }

        if chain.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare(Box::new(first), chain))
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ExprError> {
        let first = self.parse_term()?;
        let mut chain = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => Arith::Add,
                Some(Token::Minus) => Arith::Sub,
                _ => break,
            };
            self.pos += 1;
            chain.push((op, self.parse_term()?));
        }
        Ok(arith_chain(first, chain))
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let first = self.parse_unary()?;
        let mut chain = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Star) => Arith::Mul,
                Some(Token::Slash) => Arith::Div,
                Some(Token::Percent) => Arith::Rem,
                _ => break,
            };
            self.pos += 1;
            chain.push((op, self.parse_unary()?));
        }
        Ok(arith_chain(first, chain))
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        let negate = match self.peek() {
            Some(Token::Minus) => true,
            Some(Token::Plus) => false,
            _ => return self.parse_atom(),
        };
        self.pos += 1;
        self.enter()?;
        let inner = self.parse_unary()?;
        self.depth -= 1;
        Ok(if negate { Expr::Neg(Box::new(inner)) } else { inner })
    }

    fn parse_atom(&mut self) -> Result<Expr, ExprError> {
        match self.advance() {
            Some(Token::Num(n)) => Ok(Expr::Literal(Value::Num(n))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::Str(s))),
            Some(Token::True) => Ok(Expr::Literal(Value::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Value::Bool(false))),
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(ExprError::UnexpectedToken(other.to_string())),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(other) => Err(ExprError::UnexpectedToken(other.to_string())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

fn flatten(mut operands: Vec<Expr>, chain: fn(Vec<Expr>) -> Expr) -> Expr {
    if operands.len() == 1 {
        if let Some(only) = operands.pop() {
            return only;
        }
    }
    chain(operands)
}

fn arith_chain(first: Expr, chain: Vec<(Arith, Expr)>) -> Expr {
    if chain.is_empty() {
        first
    } else {
        Expr::Arith(Box::new(first), chain)
    }
}

fn eval(expr: &Expr) -> Result<Value, ExprError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Neg(inner) => {
            let value = eval(inner)?;
            let n = value.as_number().ok_or_else(|| {
                ExprError::TypeMismatch(format!("cannot negate a {}", value.type_name()))
            })?;
            Ok(Value::Num(-n))
        }
        Expr::Not(inner) => Ok(Value::Bool(!eval(inner)?.is_truthy())),
        // `and` yields the first falsy operand, `or` the first truthy one,
        // otherwise the last operand
        Expr::And(operands) => {
            let mut value = Value::Bool(true);
            for operand in operands {
                value = eval(operand)?;
                if !value.is_truthy() {
                    break;
                }
            }
            Ok(value)
        }
        Expr::Or(operands) => {
            let mut value = Value::Bool(false);
            for operand in operands {
                value = eval(operand)?;
                if value.is_truthy() {
                    break;
                }
            }
            Ok(value)
        }
        Expr::Arith(first, chain) => {
            let mut acc = eval(first)?;
            for (op, next) in chain {
                acc = arith(*op, acc, eval(next)?)?;
            }
            Ok(acc)
        }
        Expr::Compare(first, chain) => {
            let mut left = eval(first)?;
            for (op, next) in chain {
                let right = eval(next)?;
                if !compare(*op, &left, &right)? {
                    return Ok(Value::Bool(false));
                }
                left = right;
            }
            Ok(Value::Bool(true))
        }
    }
}

fn arith(op: Arith, left: Value, right: Value) -> Result<Value, ExprError> {
    if let (Arith::Add, Value::Str(a), Value::Str(b)) = (op, &left, &right) {
        return Ok(Value::Str(format!("{}{}", a, b)));
    }

    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(ExprError::TypeMismatch(format!(
            "unsupported operands {} and {}",
            left.type_name(),
            right.type_name()
        )));
    };

    let result = match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div | Arith::Rem if b == 0.0 => return Err(ExprError::DivisionByZero),
        Arith::Div => a / b,
        Arith::Rem => a - b * (a / b).floor(),
    };
    Ok(Value::Num(result))
}

fn compare(op: Cmp, left: &Value, right: &Value) -> Result<bool, ExprError> {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => {
                return match op {
                    Cmp::Eq => Ok(false),
                    Cmp::Ne => Ok(true),
                    _ => Err(ExprError::TypeMismatch(format!(
                        "cannot order {} and {}",
                        left.type_name(),
                        right.type_name()
                    ))),
                };
            }
        },
    };

    // NaN compares unequal to everything
    let Some(ordering) = ordering else {
        return Ok(op == Cmp::Ne);
    };

    Ok(match op {
        Cmp::Lt => ordering.is_lt(),
        Cmp::Le => ordering.is_le(),
        Cmp::Gt => ordering.is_gt(),
        Cmp::Ge => ordering.is_ge(),
        Cmp::Eq => ordering.is_eq(),
        Cmp::Ne => ordering.is_ne(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_comparisons() {
        assert!(evaluate("5 > 3").unwrap());
        assert!(!evaluate("5 < 3").unwrap());
        assert!(evaluate("2 + 2 == 4").unwrap());
        assert!(!evaluate("2 * 3 != 6").unwrap());
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval_value("1 + 2 * 3").unwrap(), Value::Num(7.0));
        assert_eq!(eval_value("(1 + 2) * 3").unwrap(), Value::Num(9.0));
        assert_eq!(eval_value("-2 * -3").unwrap(), Value::Num(6.0));
        assert!(evaluate("not 1 > 2 and 3 >= 3").unwrap());
        assert!(evaluate("false or 1 < 2 and 2 < 3").unwrap());
    }

    #[test]
    fn test_chained_comparison() {
        assert!(evaluate("1 < 2 < 3").unwrap());
        assert!(!evaluate("1 < 3 < 2").unwrap());
        assert!(evaluate("3 >= 3 == 3").unwrap());
    }

    #[test]
    fn test_modulo_follows_divisor() {
        assert_eq!(eval_value("7 % 3").unwrap(), Value::Num(1.0));
        assert_eq!(eval_value("-7 % 3").unwrap(), Value::Num(2.0));
    }

    #[test]
    fn test_truthiness_of_non_bool_results() {
        assert!(evaluate("1 + 1").unwrap());
        assert!(!evaluate("0").unwrap());
        assert!(!evaluate("''").unwrap());
        assert!(evaluate("0 or 5").unwrap());
        assert_eq!(eval_value("0 or 5").unwrap(), Value::Num(5.0));
    }

    #[test]
    fn test_strings_and_bools() {
        assert!(evaluate("'abc' == 'abc'").unwrap());
        assert!(evaluate("'a' < 'b'").unwrap());
        assert!(evaluate("'a' + 'b' == 'ab'").unwrap());
        assert!(!evaluate("1 == '1'").unwrap());
        assert!(evaluate("True == 1").unwrap());
    }

    #[test]
    fn test_short_circuit_skips_errors() {
        assert!(!evaluate("false and 1 / 0").unwrap());
        assert!(evaluate("true or 1 / 0").unwrap());
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("1 / 0").unwrap_err(), ExprError::DivisionByZero);
        assert_eq!(evaluate("").unwrap_err(), ExprError::UnexpectedEnd);
        assert_eq!(evaluate("(1 > 2").unwrap_err(), ExprError::UnexpectedEnd);
        assert_eq!(
            evaluate("1 2").unwrap_err(),
            ExprError::UnexpectedToken("2".to_string())
        );
        assert!(matches!(evaluate("'a' < 1"), Err(ExprError::TypeMismatch(_))));
        assert!(matches!(evaluate("'a' - 'b'"), Err(ExprError::TypeMismatch(_))));
    }

    #[test]
    fn test_code_is_rejected() {
        assert_eq!(
            evaluate("__import__('os').system('id')").unwrap_err(),
            ExprError::UnknownName("__import__".to_string())
        );
        assert!(evaluate("open('/etc/passwd')").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep).unwrap_err(), ExprError::TooDeep);
        assert!(evaluate("((((1))))").unwrap());
    }

    #[test]
    fn test_long_flat_chains() {
        let sum = format!("{}1 == 100000", "1 + ".repeat(99_999));
        assert!(evaluate(&sum).unwrap());

        let product = format!("{}1 == 1", "1 * ".repeat(100_000));
        assert!(evaluate(&product).unwrap());

        let all = format!("{}true", "true and ".repeat(100_000));
        assert!(evaluate(&all).unwrap());

        let any = format!("{}1", "0 or ".repeat(100_000));
        assert_eq!(eval_value(&any).unwrap(), Value::Num(1.0));
    }

    #[test]
    fn test_chain_evaluates_left_to_right() {
        assert_eq!(eval_value("10 - 4 - 3").unwrap(), Value::Num(3.0));
        assert_eq!(eval_value("24 / 4 / 2").unwrap(), Value::Num(3.0));
        assert_eq!(eval_value("1 and 0 and 1 / 0").unwrap(), Value::Num(0.0));
    }
}
