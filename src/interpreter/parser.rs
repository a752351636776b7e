use num_bigint::BigInt;

use crate::{
    error::ParseError,
    interpreter::{
        functions, ops,
        tokenizer::{Token, TokenKind, Tokenizer},
        vars::Variables,
    },
};

/// The result of converting an expression to RPN.
///
/// Undeclared identifiers are not written into the variable store while
/// scanning; they come back in `new_vars` so the caller can declare them
/// (bound to zero) atomically before validation.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The expression in RPN order.
    pub rpn:      Vec<Token>,
    /// Identifiers referenced for the first time, in order of appearance.
    pub new_vars: Vec<String>,
}

/// Tests whether an identifier is a radix-prefixed integer literal.
///
/// `x…` is hexadecimal, `o…` octal and `b…` binary; `b` needs a binary
/// digit right after the prefix so identifiers like `beta` stay
/// identifiers. The word operators `xor` and `or` are excluded before this
/// is ever consulted because the tokenizer already classified them.
fn radix_prefix(text: &str) -> Option<u32> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let second = chars.next();
    match first {
        'x' if second.is_some() => Some(16),
        'o' if second.is_some() => Some(8),
        'b' if matches!(second, Some('0' | '1')) => Some(2),
        _ => None,
    }
}

fn decode_radix(token: &Token, radix: u32) -> Result<Token, ParseError> {
    let digits = &token.text[1..];
    let Some(value) = BigInt::parse_bytes(digits.as_bytes(), radix) else {
        return Err(ParseError::InvalidNumber { text: token.text.clone(),
                                               pos:  token.pos, });
    };
    Ok(Token { text: value.to_str_radix(10),
               kind: TokenKind::Number,
               pos:  token.pos, })
}

/// Converts an infix expression to RPN with the shunting-yard algorithm.
///
/// Operators are reordered by precedence with the associativity tie-break;
/// function names are pushed and re-emitted after their parameter lists; a
/// `(` directly after a function name is also emitted to the output so the
/// evaluator can find the start of the parameter list.
///
/// # Errors
/// Reports tokenizer failures, missing operands, missing operators and
/// mismatched parentheses, with character positions where available.
pub fn shunting_yard(input: &str, vars: &Variables) -> Result<ParseOutcome, ParseError> {
    let mut output: Vec<Token> = Vec::new();
    let mut stack: Vec<Token> = Vec::new();
    let mut new_vars: Vec<String> = Vec::new();

    let mut tokenizer = Tokenizer::new(input);
    let mut last_function: Option<String> = None;
    let mut previous: Option<Token> = None;

    while tokenizer.has_next() {
        let mut token = tokenizer.next()?;
        match token.kind {
            TokenKind::Number => output.push(token.clone()),
            TokenKind::Identifier => {
                if let Some(radix) = radix_prefix(&token.text) {
                    token = decode_radix(&token, radix)?;
                    output.push(token.clone());
                } else if functions::is_function(&token.text) {
                    token.kind = TokenKind::Function;
                    last_function = Some(token.text.clone());
                    stack.push(token.clone());
                } else {
                    if !vars.contains_key(&token.text)
                       && !new_vars.iter().any(|n| n.eq_ignore_ascii_case(&token.text))
                    {
                        new_vars.push(token.text.clone());
                    }
                    output.push(token.clone());
                }
            },
            TokenKind::Comma => {
                if let Some(prev) = &previous {
                    if prev.kind == TokenKind::Operator {
                        return Err(missing_operands(prev, tokenizer.pos() - 1));
                    }
                }
                pop_until_paren(&mut stack, &mut output).map_err(|()| {
                    ParseError::UnterminatedFunction { name: last_function.clone() }
                })?;
            },
            TokenKind::Operator => {
                if let Some(prev) = &previous {
                    if matches!(prev.kind, TokenKind::Comma | TokenKind::LParen) {
                        return Err(missing_operands(&token, tokenizer.pos()));
                    }
                }
                push_operator(&token, &mut stack, &mut output);
            },
            TokenKind::LParen => {
                if let Some(prev) = &previous {
                    if prev.kind == TokenKind::Number {
                        return Err(ParseError::MissingOperator { pos: tokenizer.pos() });
                    }
                    // A parenthesis after a function name marks the start
                    // of that function's parameter list in the output.
                    if prev.kind == TokenKind::Function {
                        output.push(token.clone());
                    }
                }
                stack.push(token.clone());
            },
            TokenKind::RParen => {
                if let Some(prev) = &previous {
                    if prev.kind == TokenKind::Operator {
                        return Err(missing_operands(prev, tokenizer.pos() - 1));
                    }
                }
                pop_until_paren(&mut stack, &mut output).map_err(|()| {
                    ParseError::MismatchedParentheses
                })?;
                stack.pop();
                if stack.last().is_some_and(|top| top.kind == TokenKind::Function) {
                    if let Some(func) = stack.pop() {
                        output.push(func);
                    }
                }
            },
            TokenKind::Function => {},
        }
        previous = Some(token);
    }

    while let Some(element) = stack.pop() {
        match element.kind {
            TokenKind::Operator => output.push(element),
            TokenKind::Function => {
                return Err(ParseError::UnterminatedFunction { name: Some(element.text) })
            },
            _ => return Err(ParseError::MismatchedParentheses),
        }
    }

    Ok(ParseOutcome { rpn: output,
                      new_vars })
}

fn missing_operands(token: &Token, end: usize) -> ParseError {
    ParseError::MissingOperands { op:  token.text.clone(),
                                  pos: end.saturating_sub(token.text.len()), }
}

/// Pops operators to the output until a `(` is on top of the stack.
/// `Err(())` means the stack emptied without one.
fn pop_until_paren(stack: &mut Vec<Token>, output: &mut Vec<Token>) -> Result<(), ()> {
    while let Some(top) = stack.last() {
        if top.kind == TokenKind::LParen {
            return Ok(());
        }
        if let Some(popped) = stack.pop() {
            output.push(popped);
        }
    }
    Err(())
}

/// Pushes an operator after popping everything that binds at least as
/// tightly, honoring associativity.
fn push_operator(token: &Token, stack: &mut Vec<Token>, output: &mut Vec<Token>) {
    let Some(incoming) = ops::lookup(&token.text) else {
        return;
    };
    while let Some(top) = stack.last() {
        let Some(resident) = ops::lookup(&top.text) else {
            break;
        };
        if top.kind != TokenKind::Operator {
            break;
        }
        let pops = (incoming.left_assoc && incoming.precedence <= resident.precedence)
                   || incoming.precedence < resident.precedence;
        if !pops {
            break;
        }
        if let Some(popped) = stack.pop() {
            output.push(popped);
        }
    }
    stack.push(token.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpn(input: &str) -> Vec<String> {
        let vars = Variables::new();
        shunting_yard(input, &vars).unwrap()
                                   .rpn
                                   .into_iter()
                                   .map(|t| t.text)
                                   .collect()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(rpn("2+3*4"), ["2", "3", "4", "*", "+"]);
    }

    #[test]
    fn exponentiation_groups_right_to_left() {
        assert_eq!(rpn("2^3^2"), ["2", "3", "2", "^", "^"]);
    }

    #[test]
    fn subtraction_groups_left_to_right() {
        assert_eq!(rpn("10-3-2"), ["10", "3", "-", "2", "-"]);
    }

    #[test]
    fn function_calls_carry_their_list_start_marker() {
        assert_eq!(rpn("MAX(1,2)"), ["(", "1", "2", "MAX"]);
    }

    #[test]
    fn radix_literals_decode_to_decimal() {
        assert_eq!(rpn("x1F+o17+b101"), ["31", "15", "+", "5", "+"]);
        let vars = Variables::new();
        assert!(shunting_yard("xQQ", &vars).is_err());
    }

    #[test]
    fn undeclared_identifiers_come_back_as_new_variables() {
        let vars = Variables::new();
        let outcome = shunting_yard("alpha+beta", &vars).unwrap();
        assert_eq!(outcome.new_vars, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn unbalanced_parentheses_are_rejected() {
        let vars = Variables::new();
        assert_eq!(shunting_yard("(1+2", &vars).unwrap_err(),
                   ParseError::MismatchedParentheses);
        assert_eq!(shunting_yard("1+2)", &vars).unwrap_err(),
                   ParseError::MismatchedParentheses);
    }
}
