use crate::error::Error;
use std::fmt::{self, Display, Formatter};

/// Elements of an expression, in infix order after lexing or in postfix
/// order after the shunting-yard pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    /// A numeric literal, or an intermediate result during evaluation
    Operand(f64),
    /// An operator or a parenthesis
    Operator(Op),
}

/// Allowed operators in the algorithm. Parentheses only exist until the
/// conversion to RPN is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Op {
    /// Get the operator for `c`, if `c` is an operator symbol
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::LParen),
            ')' => Some(Self::RParen),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// The character this operator is written with
    pub fn symbol(self) -> char {
        match self {
            Self::LParen => '(',
            Self::RParen => ')',
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first. All operators are left associative.
    pub fn precedence(self) -> u8 {
        match self {
            Self::LParen => 0,
            Self::RParen => 1,
            Self::Plus | Self::Minus => 2,
            Self::Mul | Self::Div => 3,
        }
    }

    /// Check if the operator is one of the four arithmetic operators
    pub fn is_binary(self) -> bool {
        match self {
            Self::Plus | Self::Minus | Self::Mul | Self::Div => true,
            Self::LParen | Self::RParen => false,
        }
    }

    /// Apply the operator to `left` and `right`.
    ///
    /// Division by a value smaller in magnitude than the smallest positive
    /// representable `f64` (that is, by zero) is an error. Subnormal divisors
    /// are accepted. Parentheses can not be applied.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, Error> {
        match self {
            Self::Plus => Ok(left + right),
            Self::Minus => Ok(left - right),
            Self::Mul => Ok(left * right),
            Self::Div => {
                if right.abs() < f64::from_bits(1) {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            Self::LParen | Self::RParen => Err(Error::MalformedExpression(format!(
                "parenthesis '{}' left in RPN sequence",
                self.symbol()
            ))),
        }
    }
}

impl Display for Op {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.symbol())
    }
}

impl Display for Element {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Operand(value) => write!(fmt, "{}", value),
            Self::Operator(op) => write!(fmt, "{}", op),
        }
    }
}
