use std::{
    cell::{OnceCell, RefCell},
    rc::Rc,
};

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::{Error, EvalError, ParseError},
    interpreter::{
        functions, history::History, ops::{self, Operand}, parser, tokenizer::{Token, TokenKind},
        validator, value::core::Value, vars::Variables,
    },
    util::num::EvalResult,
};

/// Maximum nesting depth for `H(i)` re-evaluation.
///
/// History entries can reference each other (or themselves) cyclically;
/// exceeding this depth aborts with [`EvalError::RecursionLimit`] instead
/// of overflowing the call stack.
pub const MAX_EVAL_DEPTH: usize = 64;

/// Selects how the factorial is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Exact big-integer product, converted to a real at the end.
    Exact,
    /// Gamma-function approximation.
    Fast,
}

/// Numeric policy fixed at construction time.
///
/// Unifies what used to be separate evaluation pipelines: one precision
/// switch for the factorial path and one capability flag for complex
/// literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalPolicy {
    /// Factorial precision.
    pub precision: Precision,
    /// Whether imaginary literals are accepted.
    pub complex:   bool,
}

impl Default for EvalPolicy {
    fn default() -> Self {
        Self { precision: Precision::Exact,
               complex:   true, }
    }
}

/// Shared state threaded through every operator and function call.
///
/// Holds the session's variable store and history handles, the numeric
/// policy, the random generator for `RND`/`MRS` and the current `H`
/// recursion depth.
pub struct EvalContext {
    /// The session's variable store.
    pub vars:    Rc<RefCell<Variables>>,
    /// The session's expression history.
    pub history: Rc<RefCell<History>>,
    /// The numeric policy.
    pub policy:  EvalPolicy,
    /// Random source for the nondeterministic functions.
    pub rng:     StdRng,
    depth:       usize,
}

impl EvalContext {
    fn new(vars: Rc<RefCell<Variables>>,
           history: Rc<RefCell<History>>,
           policy: EvalPolicy,
           depth: usize)
           -> Self {
        Self { vars,
               history,
               policy,
               rng: StdRng::from_entropy(),
               depth }
    }

    /// Re-evaluates history entry `index` as a fresh expression sharing
    /// this context's store and history.
    ///
    /// # Errors
    /// Returns [`EvalError::HistoryIndex`] for an absent entry,
    /// [`EvalError::RecursionLimit`] when entries reference each other too
    /// deeply, and [`EvalError::HistoryEval`] wrapping any nested failure.
    pub fn eval_history(&mut self, index: usize) -> EvalResult<Value> {
        if self.depth + 1 >= MAX_EVAL_DEPTH {
            return Err(EvalError::RecursionLimit);
        }
        let source = {
            let history = self.history.borrow();
            let Some(entry) = history.get(index) else {
                return Err(EvalError::HistoryIndex { index,
                                                     len: history.len() });
            };
            entry.to_string()
        };
        let nested = Expression::new(&source,
                                     Rc::clone(&self.history),
                                     Rc::clone(&self.vars),
                                     self.policy);
        match nested.eval_at_depth(self.depth + 1) {
            Ok(value) => Ok(value),
            Err(Error::Eval(EvalError::RecursionLimit)) => Err(EvalError::RecursionLimit),
            Err(e) => Err(EvalError::HistoryEval { index,
                                                   detail: e.to_string() }),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new(Rc::new(RefCell::new(Variables::new())),
                  Rc::new(RefCell::new(History::new())),
                  EvalPolicy::default(),
                  0)
    }
}

/// An expression string with its memoized RPN form.
///
/// The RPN is computed on the first evaluation and reused afterwards;
/// constructing a new `Expression` is the only way to invalidate it.
/// Store and history are shared handles so nested `H(i)` evaluation sees
/// the same session state.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use concalc::{
///     interpreter::{evaluator::EvalPolicy, history::History, vars::Variables},
///     Expression,
/// };
///
/// let history = Rc::new(RefCell::new(History::new()));
/// let vars = Rc::new(RefCell::new(Variables::new()));
/// let expr = Expression::new("2+3*4", history, vars, EvalPolicy::default());
/// assert_eq!(expr.eval().unwrap().to_string(), "14");
/// ```
pub struct Expression {
    source:  String,
    history: Rc<RefCell<History>>,
    vars:    Rc<RefCell<Variables>>,
    policy:  EvalPolicy,
    rpn:     OnceCell<Vec<Token>>,
}

impl Expression {
    /// Creates an expression over shared session state.
    ///
    /// The source is expected to have gone through the caller
    /// preprocessing contract (see [`crate::session::prepare`]).
    #[must_use]
    pub fn new(source: &str,
               history: Rc<RefCell<History>>,
               vars: Rc<RefCell<Variables>>,
               policy: EvalPolicy)
               -> Self {
        Self { source: source.to_string(),
               history,
               vars,
               policy,
               rpn: OnceCell::new() }
    }

    /// Returns the expression source string.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parses (once), validates and evaluates the expression.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the source never becomes valid RPN and
    /// [`Error::Eval`] for domain and evaluation failures.
    pub fn eval(&self) -> Result<Value, Error> {
        self.eval_at_depth(0)
    }

    fn eval_at_depth(&self, depth: usize) -> Result<Value, Error> {
        let rpn = self.rpn()?;
        let mut ctx = EvalContext::new(Rc::clone(&self.vars),
                                       Rc::clone(&self.history),
                                       self.policy,
                                       depth);
        let value = eval_rpn(rpn, &mut ctx)?;
        Ok(value.normalize())
    }

    /// Returns the memoized RPN, computing and validating it on first use.
    ///
    /// Newly referenced variable names come back from the parser as a side
    /// channel and are declared (bound to zero) before validation runs.
    fn rpn(&self) -> Result<&[Token], Error> {
        if let Some(rpn) = self.rpn.get() {
            return Ok(rpn);
        }
        let outcome = parser::shunting_yard(&self.source, &self.vars.borrow())?;
        {
            let mut vars = self.vars.borrow_mut();
            for name in &outcome.new_vars {
                vars.put(name, Value::Real(0.0))?;
            }
        }
        validator::validate(&outcome.rpn)?;
        Ok(self.rpn.get_or_init(|| outcome.rpn))
    }
}

/// One slot on the evaluation stack: either an operand or the marker a
/// `(` token pushes to delimit a function's parameter list.
enum StackEntry {
    ParamsStart,
    Operand(Operand),
}

fn pop_operand(stack: &mut Vec<StackEntry>) -> Result<Operand, Error> {
    match stack.pop() {
        Some(StackEntry::Operand(operand)) => Ok(operand),
        _ => Err(Error::Parse(ParseError::EmptyExpression)),
    }
}

/// Executes validated RPN left to right with an eager operand stack.
fn eval_rpn(rpn: &[Token], ctx: &mut EvalContext) -> Result<Value, Error> {
    let mut stack: Vec<StackEntry> = Vec::new();

    for token in rpn {
        match token.kind {
            TokenKind::Operator => {
                let Some(op) = ops::lookup(&token.text) else {
                    return Err(Error::Parse(ParseError::UnknownOperator {
                        text: token.text.clone(),
                        pos:  token.pos,
                    }));
                };
                // The right operand was pushed last.
                let right = pop_operand(&mut stack)?;
                let left = pop_operand(&mut stack)?;
                let value = op.apply(ctx, left, right)?;
                stack.push(StackEntry::Operand(Operand::value(value)));
            },
            TokenKind::Function => {
                let Some(def) = functions::lookup(&token.text) else {
                    return Err(Error::Eval(EvalError::UnknownVariable {
                        name: token.text.clone(),
                    }));
                };
                let mut params = Vec::new();
                while let Some(entry) = stack.pop() {
                    match entry {
                        StackEntry::ParamsStart => break,
                        StackEntry::Operand(operand) => params.push(operand.value),
                    }
                }
                params.reverse();
                let value = def.call(ctx, params)?;
                stack.push(StackEntry::Operand(Operand::value(value)));
            },
            TokenKind::LParen => stack.push(StackEntry::ParamsStart),
            TokenKind::Number => {
                let value = parse_literal(token, ctx.policy)?;
                stack.push(StackEntry::Operand(Operand::value(value)));
            },
            TokenKind::Identifier => {
                let Some(value) = ctx.vars.borrow().get(&token.text) else {
                    return Err(Error::Eval(EvalError::UnknownVariable {
                        name: token.text.clone(),
                    }));
                };
                // Arrays are never assignment targets, so they need no name.
                let entry = if value.is_array() {
                    Operand::value(value)
                } else {
                    Operand::named(value, token.text.clone())
                };
                stack.push(StackEntry::Operand(entry));
            },
            TokenKind::RParen | TokenKind::Comma => {
                return Err(Error::Parse(ParseError::MismatchedParentheses));
            },
        }
    }

    let result = pop_operand(&mut stack)?;
    if !stack.is_empty() {
        return Err(Error::Parse(ParseError::TooManyValues));
    }
    Ok(result.value)
}

/// Parses a numeric literal token into a value.
///
/// An `i` suffix makes a pure imaginary number; the bare `i` is the
/// imaginary unit itself. Everything else is a real.
fn parse_literal(token: &Token, policy: EvalPolicy) -> Result<Value, Error> {
    let text = &token.text;
    let invalid = || {
        Error::Parse(ParseError::InvalidNumber { text: text.clone(),
                                                 pos:  token.pos, })
    };

    if text.ends_with(['i', 'I']) {
        if !policy.complex {
            return Err(Error::Eval(EvalError::ComplexDisabled));
        }
        let head = &text[..text.len() - 1];
        let im = match head {
            "" => 1.0,
            "-" => -1.0,
            digits => digits.parse::<f64>().map_err(|_| invalid())?,
        };
        return Ok(Value::Complex(num_complex::Complex64::new(0.0, im)));
    }
    let real = text.parse::<f64>().map_err(|_| invalid())?;
    Ok(Value::Real(real))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(source: &str) -> Expression {
        Expression::new(source,
                        Rc::new(RefCell::new(History::new())),
                        Rc::new(RefCell::new(Variables::new())),
                        EvalPolicy::default())
    }

    fn eval(source: &str) -> Value {
        expr(source).eval().unwrap()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(eval("2+3*4"), Value::Real(14.0));
        assert_eq!(eval("2^3^2"), Value::Real(512.0));
        assert_eq!(eval("10-3-2"), Value::Real(5.0));
    }

    #[test]
    fn the_second_popped_value_is_the_left_operand() {
        assert_eq!(eval("10/4"), Value::Real(2.5));
        assert_eq!(eval("1-10"), Value::Real(-9.0));
    }

    #[test]
    fn imaginary_literals() {
        assert_eq!(eval("ABS(3+4i)"), Value::Real(5.0));
        assert_eq!(eval("i*i"), Value::Complex(num_complex::Complex64::new(-1.0, 0.0)));
    }

    #[test]
    fn complex_literals_respect_the_policy() {
        let e = Expression::new("3i",
                                Rc::new(RefCell::new(History::new())),
                                Rc::new(RefCell::new(Variables::new())),
                                EvalPolicy { precision: Precision::Exact,
                                             complex:   false, });
        assert_eq!(e.eval(), Err(Error::Eval(EvalError::ComplexDisabled)));
    }

    #[test]
    fn rpn_is_computed_once_and_reused() {
        let e = expr("2+3");
        assert_eq!(e.eval().unwrap(), Value::Real(5.0));
        let first = e.rpn.get().map(std::ptr::from_ref);
        assert_eq!(e.eval().unwrap(), Value::Real(5.0));
        assert_eq!(e.rpn.get().map(std::ptr::from_ref), first);
    }

    #[test]
    fn assignment_requires_a_variable_target() {
        assert_eq!(expr("3->5").eval(),
                   Err(Error::Eval(EvalError::AssignmentTarget)));
    }
}
