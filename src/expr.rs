use crate::error::Error;
use crate::lexer::Lexer;
use crate::normalize::normalize;
use crate::rpn::{join, to_rpn};
use crate::token::Element;
use log::debug;
use std::fmt::{self, Display, Formatter};

/// Evaluate a single expression from `input`, using `separator` as the
/// decimal separator.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use tally::{eval, Error};
/// assert_eq!(eval("45 - 2 * 3", '.'), Ok(39.0));
/// assert_eq!(eval("2,5 + 1,5", ','), Ok(4.0));
/// assert_eq!(eval("5 / (2 - 2)", '.'), Err(Error::DivisionByZero));
/// ```
pub fn eval(input: &str, separator: char) -> Result<f64, Error> {
    Expr::parse(input, separator).and_then(|expr| expr.eval())
}

/// A parsed mathematical expression, stored in reverse polish notation.
///
/// # Examples
/// ```
/// # use tally::Expr;
/// let expr = Expr::parse("3 + 5 * 2", '.').unwrap();
/// assert_eq!(expr.to_string(), "3 5 2 * +");
/// assert_eq!(expr.eval(), Ok(13.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    rpn: Vec<Element>,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use tally::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2", '.').is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff + 5 * 2", '.').is_err());
    /// ```
    pub fn parse(expression: &str, separator: char) -> Result<Self, Error> {
        let normalized = normalize(expression, separator)?;
        let elements = Lexer::new(&normalized, separator).tokenize()?;
        Self::from_elements(elements)
    }

    /// Build an `Expr` from elements in infix order, as produced by the
    /// [`Lexer`](struct.Lexer.html).
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, Error> {
        Ok(Self {
            rpn: to_rpn(elements)?,
        })
    }

    /// The expression in reverse polish notation
    pub fn rpn(&self) -> &[Element] {
        &self.rpn
    }

    /// Evaluate the expression on an operand stack.
    ///
    /// An operator with a single operand available uses `0` as its left
    /// operand.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tally::Expr;
    /// let expr = Expr::parse("(-5 + 2) * 2", '.').unwrap();
    /// assert_eq!(expr.eval(), Ok(-6.0));
    /// assert_eq!(expr.eval(), Ok(-6.0));
    /// ```
    pub fn eval(&self) -> Result<f64, Error> {
        let mut stack: Vec<f64> = Vec::with_capacity(self.rpn.len());

        for element in &self.rpn {
            match *element {
                Element::Operand(value) => stack.push(value),
                Element::Operator(op) => {
                    let right = stack.pop().ok_or_else(|| {
                        Error::MalformedExpression(format!("missing operand for '{}'", op))
                    })?;
                    let left = stack.pop().unwrap_or(0.0);
                    stack.push(op.apply(left, right)?);
                }
            }
        }

        match stack.as_slice() {
            [result] => {
                debug!("{} = {}", self, result);
                Ok(*result)
            }
            [] => Err(Error::MalformedExpression("nothing to evaluate".into())),
            values => Err(Error::MalformedExpression(format!(
                "{} values left without an operator",
                values.len()
            ))),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", join(&self.rpn))
    }
}
