use crate::{
    error::ParseError,
    interpreter::{
        functions::{self, Arity},
        tokenizer::{Token, TokenKind},
    },
};

/// Checks that an RPN sequence can be evaluated without stack underflow.
///
/// A single pass keeps one argument count per open function scope. Binary
/// operators need two values in the current scope; function tokens close
/// their own scope and check the declared arity; `(` opens a scope. The
/// final state must be exactly one scope holding exactly one value.
///
/// # Errors
/// Reports wrong function argument counts, leftover values (a missing
/// operator), unclosed parameter lists and empty expressions.
pub fn validate(rpn: &[Token]) -> Result<(), ParseError> {
    let mut scopes: Vec<usize> = vec![0];

    for token in rpn {
        match token.kind {
            TokenKind::Operator => {
                let Some(count) = scopes.last_mut() else {
                    return Err(ParseError::ScopeExceeded);
                };
                if *count < 2 {
                    return Err(ParseError::MissingOperands { op:  token.text.clone(),
                                                             pos: token.pos, });
                }
                // Two operands consumed, one result produced.
                *count -= 1;
            },
            TokenKind::Function => {
                let Some(found) = scopes.pop() else {
                    return Err(ParseError::ScopeExceeded);
                };
                if let Some(def) = functions::lookup(&token.text) {
                    if let Arity::Fixed(expected) = def.arity {
                        if found != expected {
                            return Err(ParseError::FunctionArgumentCount {
                                name: token.text.clone(),
                                expected,
                                found,
                            });
                        }
                    }
                }
                let Some(count) = scopes.last_mut() else {
                    return Err(ParseError::ScopeExceeded);
                };
                *count += 1;
            },
            TokenKind::LParen => scopes.push(0),
            TokenKind::Number | TokenKind::Identifier => {
                if let Some(count) = scopes.last_mut() {
                    *count += 1;
                }
            },
            // The parser never leaves these in RPN.
            TokenKind::RParen | TokenKind::Comma => {
                return Err(ParseError::MismatchedParentheses)
            },
        }
    }

    if scopes.len() > 1 {
        return Err(ParseError::UnclosedScopes);
    }
    match scopes.first() {
        Some(0) | None => Err(ParseError::EmptyExpression),
        Some(1) => Ok(()),
        Some(_) => Err(ParseError::TooManyValues),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{parser::shunting_yard, vars::Variables};

    fn check(input: &str) -> Result<(), ParseError> {
        let vars = Variables::new();
        let outcome = shunting_yard(input, &vars)?;
        validate(&outcome.rpn)
    }

    #[test]
    fn well_formed_expressions_pass() {
        assert_eq!(check("2+3*4"), Ok(()));
        assert_eq!(check("MAX(1,2,3)"), Ok(()));
        assert_eq!(check("SEQ(1,1,5)"), Ok(()));
    }

    #[test]
    fn a_lone_operator_is_missing_its_operands() {
        assert!(matches!(check("+"), Err(ParseError::MissingOperands { .. })));
    }

    #[test]
    fn a_comma_outside_any_function_leaves_too_many_values() {
        assert!(check("1,2").is_err());
    }

    #[test]
    fn fixed_arity_is_enforced() {
        assert_eq!(check("SEQ(1,2)"),
                   Err(ParseError::FunctionArgumentCount { name:     "SEQ".into(),
                                                           expected: 3,
                                                           found:    2, }));
    }

    #[test]
    fn adjacent_values_imply_a_missing_operator() {
        assert_eq!(check("1 2"), Err(ParseError::TooManyValues));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(check(""), Err(ParseError::EmptyExpression));
    }
}
