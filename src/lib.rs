#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

//! Tally, a crate for evaluation of arithmetic expressions.
//!
//! This crate evaluates expressions made of numbers, the four arithmetic
//! operators and parentheses, embedded in strings. The easiest way to use
//! this crate is with the [`eval`](fn.eval.html) function, which takes the
//! decimal separator used in the input:
//!
//! ```
//! assert_eq!(tally::eval("3 + 5 * 2", '.'), Ok(13.0));
//! assert_eq!(tally::eval("2(1,5 + 1)", ','), Ok(5.0));
//! ```
//!
//! It is also possible to separate the parsing from the evaluation of an
//! expression with the [`Expr`](struct.Expr.html) type, which keeps the
//! expression in reverse polish notation:
//!
//! ```
//! use tally::Expr;
//!
//! let expr = Expr::parse("(1 + 2) * 3", '.').unwrap();
//! assert_eq!(expr.to_string(), "1 2 + 3 *");
//! assert_eq!(expr.eval(), Ok(9.0));
//! ```
//!
//! The separator can be resolved from the environment with
//! [`Config`](struct.Config.html):
//!
//! ```
//! let config = tally::Config::with_separator(',').unwrap();
//! assert_eq!(config.eval("7 / 2"), Ok(3.5));
//! assert_eq!(config.format(3.5), "3,5");
//! ```
//!
//! # Language definition
//!
//! The language implemented by tally can contain the following elements:
//!
//! - unsigned decimal literals: `12`, `0.5`, `.5`, `3,25`. Both `.` and `,`
//!   are read as the decimal separator, and a literal can contain only one;
//! - left and right parenthesis. A number or a group directly followed by a
//!   group, or a group directly followed by a number, are multiplied:
//!   `2(3 + 4)` is `2 * (3 + 4)`;
//! - mathematical operators: `+` for addition, `-` for subtraction, `*` for
//!   multiplication and `/` for division;
//! - a sign: `+` or `-` at the start of the expression, or `-` right after an
//!   opening parenthesis: `-5 + 3`, `2 * (-1.5)`.
//!
//! Whitespace is ignored. Any other symbol is forbidden in the input, as are
//! two operators in a row (`5 * -2`) and empty groups.
//!
//! The operators obey the usual precedence, and are all left associative.
//! Division by zero is an error.
//!
//! # Technical details
//!
//! The input goes through four stages: normalization (validation and
//! insertion of implicit symbols), lexing into [`Element`](enum.Element.html)s,
//! conversion to reverse polish notation with the Shunting-Yard algorithm,
//! and evaluation on an operand stack. Every stage is also exposed on its
//! own. All state is local to a single call.

#[macro_use]
extern crate lazy_static;

mod config;
mod error;
mod expr;
mod lexer;
mod normalize;
mod rpn;
mod token;

pub use config::{locale_separator, Config, SEPARATOR_VAR};
pub use error::Error;
pub use expr::{eval, Expr};
pub use lexer::Lexer;
pub use normalize::{check_separator, normalize};
pub use rpn::to_rpn;
pub use token::{Element, Op};
