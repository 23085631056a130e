use crate::error::Error;
use crate::token::Op;
use log::debug;

/// Check that `separator` is one of the two supported decimal separators
pub fn check_separator(separator: char) -> Result<(), Error> {
    match separator {
        '.' | ',' => Ok(()),
        other => Err(Error::UnsupportedSeparator(other)),
    }
}

/// Validate a raw `expression` and rewrite it into the form the lexer
/// expects.
///
/// Whitespace is removed, every `.` and `,` becomes `separator`, a `0` is
/// inserted before a leading sign and before a bare separator, and a `*` is
/// inserted between an operand or `)` and a following `(`. A separator right
/// after `)` has no digits to attach to and is rejected.
///
/// # Examples
///
/// ```
/// # use tally::normalize;
/// assert_eq!(normalize("-2 (3 + .5)", '.'), Ok("0-2*(3+0.5)".to_string()));
/// assert_eq!(normalize("1.5 * 2", ','), Ok("1,5*2".to_string()));
/// assert!(normalize("(1 + 2", '.').is_err());
/// ```
pub fn normalize(expression: &str, separator: char) -> Result<String, Error> {
    check_separator(separator)?;

    let chars: Vec<char> = expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '.' || c == ',' { separator } else { c })
        .collect();

    let (first, last) = match (chars.first(), chars.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(Error::EmptyInput),
    };

    if let Some(&c) = chars.iter().find(|&&c| !is_accepted(c, separator)) {
        return Err(Error::InvalidCharacter(c));
    }
    // A lone operator always lands in one of these two checks
    if Op::from_char(last).map_or(false, |op| op != Op::RParen) {
        return Err(Error::InvalidEnd(last));
    }
    if !is_start(first, separator) {
        return Err(Error::InvalidStart(first));
    }
    check_balance(&chars)?;

    let mut output = String::with_capacity(chars.len() + 4);
    if first == '+' || first == '-' {
        output.push('0');
    }
    for (i, &c) in chars.iter().enumerate() {
        let previous = if i > 0 { Some(chars[i - 1]) } else { None };
        if c == '(' {
            match previous {
                Some(p) if p == separator => {
                    return Err(Error::InvalidOperatorSequence(p, c));
                }
                Some(p) if p.is_ascii_digit() || p == ')' => output.push('*'),
                _ => {}
            }
        } else if c == separator {
            if previous == Some(')') {
                return Err(Error::MalformedNumber(c.to_string()));
            }
            let after_digit = previous.map_or(false, |p| p.is_ascii_digit());
            let before_digit = chars.get(i + 1).map_or(false, char::is_ascii_digit);
            if !after_digit && before_digit {
                output.push('0');
            }
        }
        output.push(c);
    }

    debug!("normalized '{}' into '{}'", expression, output);
    Ok(output)
}

/// Check if `c` can appear anywhere in an expression
fn is_accepted(c: char, separator: char) -> bool {
    c.is_ascii_digit() || c == separator || Op::from_char(c).is_some()
}

/// Check if `c` can appear at the first character of an expression
fn is_start(c: char, separator: char) -> bool {
    matches!(c, '+' | '-' | '(') || c.is_ascii_digit() || c == separator
}

/// Running parenthesis count, which must never go below zero and must end
/// at zero
fn check_balance(chars: &[char]) -> Result<(), Error> {
    let mut depth = 0_usize;
    for &c in chars {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(Error::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(Error::UnbalancedParentheses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2 + 2", '.' => Ok("2+2".to_string()) ; "spaces are removed")]
    #[test_case(" 1\t*\n3 ", '.' => Ok("1*3".to_string()) ; "all whitespace is removed")]
    #[test_case("2,5+1.5", '.' => Ok("2.5+1.5".to_string()) ; "commas become dots")]
    #[test_case("2.5+1,5", ',' => Ok("2,5+1,5".to_string()) ; "dots become commas")]
    #[test_case("-5+3", '.' => Ok("0-5+3".to_string()) ; "leading minus gets a zero")]
    #[test_case("+5", '.' => Ok("0+5".to_string()) ; "leading plus gets a zero")]
    #[test_case("2(3+4)", '.' => Ok("2*(3+4)".to_string()) ; "multiplication before a group")]
    #[test_case("(1)(2)", '.' => Ok("(1)*(2)".to_string()) ; "multiplication between groups")]
    #[test_case("(1)2", '.' => Ok("(1)2".to_string()) ; "operand after a group is left to the lexer")]
    #[test_case(".5+1", '.' => Ok("0.5+1".to_string()) ; "bare leading separator")]
    #[test_case("(-.5)", '.' => Ok("(-0.5)".to_string()) ; "bare separator after a sign")]
    #[test_case("5.", '.' => Ok("5.".to_string()) ; "trailing separator is kept")]
    fn valid(expression: &str, separator: char) -> Result<String, Error> {
        normalize(expression, separator)
    }

    #[test_case("" => Error::EmptyInput ; "empty input")]
    #[test_case(" \t " => Error::EmptyInput ; "whitespace only")]
    #[test_case("2+x" => Error::InvalidCharacter('x') ; "letters")]
    #[test_case("2^3" => Error::InvalidCharacter('^') ; "exponent")]
    #[test_case("٣+1" => Error::InvalidCharacter('٣') ; "non ascii digits")]
    #[test_case("2+" => Error::InvalidEnd('+') ; "trailing operator")]
    #[test_case("(2+3)*(" => Error::InvalidEnd('(') ; "trailing open parenthesis")]
    #[test_case("+" => Error::InvalidEnd('+') ; "single plus")]
    #[test_case("/" => Error::InvalidEnd('/') ; "single slash")]
    #[test_case(")" => Error::InvalidStart(')') ; "single closing parenthesis")]
    #[test_case("*2" => Error::InvalidStart('*') ; "leading multiplication")]
    #[test_case("(2+3" => Error::UnbalancedParentheses ; "unclosed group")]
    #[test_case("2+3)" => Error::UnbalancedParentheses ; "unopened group")]
    #[test_case("2)+(3" => Error::UnbalancedParentheses ; "closed before opened")]
    #[test_case("2.(3)" => Error::InvalidOperatorSequence('.', '(') ; "separator before a group")]
    #[test_case("(1).5" => Error::MalformedNumber(".".into()) ; "separator after a group")]
    fn invalid(expression: &str) -> Error {
        normalize(expression, '.').unwrap_err()
    }

    #[test]
    fn separators() {
        assert_eq!(check_separator('.'), Ok(()));
        assert_eq!(check_separator(','), Ok(()));
        assert_eq!(check_separator(';'), Err(Error::UnsupportedSeparator(';')));
        assert_eq!(normalize("1", ' '), Err(Error::UnsupportedSeparator(' ')));
    }
}
