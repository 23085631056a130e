use crate::error::Error;
use crate::token::{Element, Op};
use log::debug;

/// Convert `elements` from infix to reverse polish notation, with the
/// Shunting-Yard algorithm. Parentheses are consumed and never appear in the
/// output.
///
/// # Examples
///
/// ```
/// # use tally::{to_rpn, Element, Lexer, Op};
/// let elements = Lexer::new("2*(3+4)", '.').tokenize().unwrap();
/// assert_eq!(to_rpn(elements), Ok(vec![
///     Element::Operand(2.0),
///     Element::Operand(3.0),
///     Element::Operand(4.0),
///     Element::Operator(Op::Plus),
///     Element::Operator(Op::Mul),
/// ]));
/// ```
pub fn to_rpn(elements: Vec<Element>) -> Result<Vec<Element>, Error> {
    let mut output = Vec::with_capacity(elements.len());
    let mut operators: Vec<Op> = Vec::new();

    'elements: for element in elements {
        match element {
            Element::Operand(_) => output.push(element),
            Element::Operator(Op::LParen) => operators.push(Op::LParen),
            Element::Operator(Op::RParen) => {
                while let Some(op) = operators.pop() {
                    if op == Op::LParen {
                        continue 'elements;
                    }
                    output.push(Element::Operator(op));
                }
                return Err(Error::UnbalancedParentheses);
            }
            Element::Operator(o1) => {
                'operators: while let Some(&o2) = operators.last() {
                    // Equal precedence pops too: every operator is left associative
                    if o2.is_binary() && o2.precedence() >= o1.precedence() {
                        operators.pop();
                        output.push(Element::Operator(o2));
                    } else {
                        break 'operators;
                    }
                }
                operators.push(o1);
            }
        }
    }

    while let Some(op) = operators.pop() {
        if op == Op::LParen {
            return Err(Error::UnbalancedParentheses);
        }
        output.push(Element::Operator(op));
    }

    debug!("rpn: {}", join(&output));
    Ok(output)
}

/// Space separated rendering of an element sequence
pub(crate) fn join(elements: &[Element]) -> String {
    elements
        .iter()
        .map(Element::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
