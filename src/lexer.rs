use crate::error::Error;
use crate::token::{Element, Op};
use log::trace;
use std::str::Chars;

/// Kind of the last significant element seen in the input
#[derive(Debug, Clone, Copy, PartialEq)]
enum Last {
    Nothing,
    Operand,
    Operator(Op),
}

/// An helper struct for lexing a normalized expression.
///
/// The lexer holds the whole scanning state: the literal being accumulated,
/// the kind of the last element, the parenthesis depth and the elements
/// produced so far.
///
/// # Examples
///
/// ```
/// # use tally::{Element, Lexer, Op};
/// let elements = Lexer::new("(1)2", '.').tokenize().unwrap();
/// assert_eq!(elements, vec![
///     Element::Operator(Op::LParen),
///     Element::Operand(1.0),
///     Element::Operator(Op::RParen),
///     Element::Operator(Op::Mul),
///     Element::Operand(2.0),
/// ]);
/// ```
pub struct Lexer<'a> {
    input: Chars<'a>,
    separator: char,
    buffer: String,
    last: Last,
    depth: usize,
    /// The literal in `buffer` started right after a `)`
    after_group: bool,
    elements: Vec<Element>,
}

impl<'a> Lexer<'a> {
    /// Lexer over an already normalized `input`
    pub fn new(input: &'a str, separator: char) -> Lexer<'a> {
        Lexer {
            input: input.chars(),
            separator,
            buffer: String::new(),
            last: Last::Nothing,
            depth: 0,
            after_group: false,
            elements: Vec::new(),
        }
    }

    /// Split the input into elements, in infix order
    pub fn tokenize(mut self) -> Result<Vec<Element>, Error> {
        while let Some(c) = self.input.next() {
            if c.is_ascii_digit() {
                self.digit(c);
            } else if c == self.separator {
                self.separator()?;
            } else if let Some(op) = Op::from_char(c) {
                self.operator(op)?;
            } else {
                return Err(Error::UnrecognizedSymbol(c));
            }
        }
        self.finish()
    }

    fn digit(&mut self, c: char) {
        if self.buffer.is_empty() && self.last == Last::Operator(Op::RParen) {
            self.after_group = true;
        }
        self.buffer.push(c);
    }

    fn separator(&mut self) -> Result<(), Error> {
        let has_digit = self.buffer.chars().any(|c| c.is_ascii_digit());
        if !has_digit || self.buffer.contains(self.separator) {
            return Err(Error::MalformedNumber(format!(
                "{}{}",
                self.buffer, self.separator
            )));
        }
        self.buffer.push(self.separator);
        Ok(())
    }

    fn operator(&mut self, op: Op) -> Result<(), Error> {
        let symbol = op.symbol();
        self.flush()?;

        match self.last {
            Last::Nothing => match op {
                Op::LParen => {}
                // Sign of the first literal
                Op::Plus | Op::Minus => {
                    self.buffer.push(symbol);
                    return Ok(());
                }
                _ => return Err(Error::InvalidStart(symbol)),
            },
            Last::Operand | Last::Operator(Op::RParen) => {
                if op == Op::LParen {
                    self.emit(Element::Operator(Op::Mul));
                }
            }
            Last::Operator(Op::LParen) => match op {
                Op::LParen => {}
                // Sign of the first literal in the group
                Op::Minus => {
                    self.buffer.push(symbol);
                    return Ok(());
                }
                _ => return Err(Error::InvalidOperatorSequence('(', symbol)),
            },
            Last::Operator(previous) => {
                if op != Op::LParen {
                    return Err(Error::InvalidOperatorSequence(previous.symbol(), symbol));
                }
            }
        }

        match op {
            Op::LParen => self.depth += 1,
            Op::RParen => {
                self.depth = self
                    .depth
                    .checked_sub(1)
                    .ok_or(Error::UnbalancedParentheses)?;
            }
            _ => {}
        }
        self.emit(Element::Operator(op));
        self.last = Last::Operator(op);
        Ok(())
    }

    /// Turn the accumulated literal into an operand
    fn flush(&mut self) -> Result<(), Error> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        if self.after_group {
            self.emit(Element::Operator(Op::Mul));
            self.after_group = false;
        }

        let literal = self.buffer.replace(self.separator, ".");
        let value = literal
            .parse::<f64>()
            .map_err(|_| Error::MalformedNumber(self.buffer.clone()))?;
        self.emit(Element::Operand(value));
        self.buffer.clear();
        self.last = Last::Operand;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Element>, Error> {
        self.flush()?;
        match self.last {
            Last::Nothing => return Err(Error::EmptyInput),
            Last::Operator(op) if op != Op::RParen => {
                return Err(Error::InvalidEnd(op.symbol()));
            }
            _ => {}
        }
        if self.depth != 0 {
            return Err(Error::UnbalancedParentheses);
        }
        Ok(self.elements)
    }

    fn emit(&mut self, element: Element) {
        trace!("lexed {}", element);
        self.elements.push(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Element::{Operand, Operator};
    use crate::token::Op::{Div, LParen, Minus, Mul, Plus, RParen};
    use test_case::test_case;

    #[test_case("2+2" => vec![Operand(2.0), Operator(Plus), Operand(2.0)] ; "addition")]
    #[test_case("12*345" => vec![Operand(12.0), Operator(Mul), Operand(345.0)] ; "multi digit literals")]
    #[test_case("0-5+3" => vec![Operand(0.0), Operator(Minus), Operand(5.0), Operator(Plus), Operand(3.0)] ; "normalized leading minus")]
    #[test_case("-5" => vec![Operand(-5.0)] ; "unnormalized leading minus is a sign")]
    #[test_case("(-5+2)" => vec![Operator(LParen), Operand(-5.0), Operator(Plus), Operand(2.0), Operator(RParen)] ; "minus after a parenthesis is a sign")]
    #[test_case("2*(-1.5)" => vec![Operand(2.0), Operator(Mul), Operator(LParen), Operand(-1.5), Operator(RParen)] ; "negative literal in a group")]
    #[test_case("(1)2" => vec![Operator(LParen), Operand(1.0), Operator(RParen), Operator(Mul), Operand(2.0)] ; "literal after a group")]
    #[test_case("(1)(2)" => vec![Operator(LParen), Operand(1.0), Operator(RParen), Operator(Mul), Operator(LParen), Operand(2.0), Operator(RParen)] ; "group after a group")]
    #[test_case("2(3)" => vec![Operand(2.0), Operator(Mul), Operator(LParen), Operand(3.0), Operator(RParen)] ; "group after a literal")]
    #[test_case("8/2." => vec![Operand(8.0), Operator(Div), Operand(2.0)] ; "trailing separator")]
    #[test_case("((1))" => vec![Operator(LParen), Operator(LParen), Operand(1.0), Operator(RParen), Operator(RParen)] ; "nested groups")]
    fn tokenize(input: &str) -> Vec<Element> {
        Lexer::new(input, '.').tokenize().unwrap()
    }

    #[test]
    fn comma_separator() {
        let elements = Lexer::new("2,5*4", ',').tokenize().unwrap();
        assert_eq!(elements, vec![Operand(2.5), Operator(Mul), Operand(4.0)]);

        let result = Lexer::new("2.5*4", ',').tokenize();
        assert_eq!(result, Err(Error::UnrecognizedSymbol('.')));
    }

    #[test_case("" => Error::EmptyInput ; "empty input")]
    #[test_case("5**2" => Error::InvalidOperatorSequence('*', '*') ; "two multiplications")]
    #[test_case("5+-2" => Error::InvalidOperatorSequence('+', '-') ; "sign after an operator")]
    #[test_case("()" => Error::InvalidOperatorSequence('(', ')') ; "empty group")]
    #[test_case("(*2)" => Error::InvalidOperatorSequence('(', '*') ; "operator after a parenthesis")]
    #[test_case("(+2)" => Error::InvalidOperatorSequence('(', '+') ; "plus after a parenthesis")]
    #[test_case("(2+)" => Error::InvalidOperatorSequence('+', ')') ; "operator before a closing parenthesis")]
    #[test_case("1.2.3" => Error::MalformedNumber("1.2.".into()) ; "two separators")]
    #[test_case(".5" => Error::MalformedNumber(".".into()) ; "separator without digits")]
    #[test_case("(-)" => Error::MalformedNumber("-".into()) ; "lone sign")]
    #[test_case("--5" => Error::MalformedNumber("-".into()) ; "double sign")]
    #[test_case("2+a" => Error::UnrecognizedSymbol('a') ; "letters")]
    #[test_case("*2" => Error::InvalidStart('*') ; "leading multiplication")]
    #[test_case(")" => Error::InvalidStart(')') ; "leading closing parenthesis")]
    #[test_case("2+" => Error::InvalidEnd('+') ; "trailing operator")]
    #[test_case("2*(" => Error::InvalidEnd('(') ; "trailing open parenthesis")]
    #[test_case("(2" => Error::UnbalancedParentheses ; "unclosed group")]
    #[test_case("2)" => Error::UnbalancedParentheses ; "unopened group")]
    fn invalid(input: &str) -> Error {
        Lexer::new(input, '.').tokenize().unwrap_err()
    }
}
