use std::{cell::RefCell, rc::Rc};

use crate::{
    error::Error,
    interpreter::{
        evaluator::{EvalPolicy, Expression},
        history::History,
        value::core::Value,
        vars::Variables,
    },
};

/// Applies the caller preprocessing contract to one expression term.
///
/// The engine's tokenizer expects a normalized string:
/// - whitespace is stripped;
/// - unary `!` and `~` are rewritten into binary-compatible forms (`5!`
///   becomes `5!0`, `~x` becomes `0~x`); a `!` directly before `=` is left
///   alone so `!=` survives;
/// - a parenthesized unary sign gets an explicit zero operand (`(-(`
///   becomes `(0-(`, repeated until stable);
/// - a leading bare sign is prefixed with `0`;
/// - the word operators `or`, `and`, `xor`, `shl` and `shr` are padded
///   with spaces so they cannot merge into adjacent identifiers (`floor`
///   is masked while padding so its `or` is untouched).
///
/// # Example
/// ```
/// use concalc::session::prepare;
///
/// assert_eq!(prepare("5!"), "5!0");
/// assert_eq!(prepare("-3 + 4"), "0-3+4");
/// assert_eq!(prepare("1or2"), "1 or 2");
/// assert_eq!(prepare("1!=2"), "1!=2");
/// ```
#[must_use]
pub fn prepare(line: &str) -> String {
    let mut s: String = line.chars().filter(|c| !c.is_whitespace()).collect();

    s = pad_factorial(&s);
    s = s.replace('~', "0~");
    s = replace_until_stable(&s, "(+(", "(0+(");
    s = replace_until_stable(&s, "(-(", "(0-(");
    if s.starts_with('-') || s.starts_with('+') {
        s.insert(0, '0');
    }

    // Mask words containing operator words, pad, then restore.
    s = s.replace("floor", "\u{1}1");
    s = s.replace("xor", "\u{1}2");
    s = s.replace("or", " or ");
    s = s.replace("and", " and ");
    s = s.replace("shl", " shl ");
    s = s.replace("shr", " shr ");
    s = s.replace("\u{1}1", "floor");
    s = s.replace("\u{1}2", " xor ");
    s
}

/// Rewrites `!` to `!0` except when it forms `!=`.
fn pad_factorial(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if ch == '!' && chars.peek() != Some(&'=') {
            out.push('0');
        }
    }
    out
}

fn replace_until_stable(s: &str, from: &str, to: &str) -> String {
    let mut current = s.to_string();
    loop {
        let next = current.replace(from, to);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// A calculator session: shared variable store, expression history and
/// numeric policy.
///
/// This is the minimal host around the engine. It seeds the constants
/// `e`, `PI`, `TRUE` and `FALSE`, applies [`prepare`] to each input line,
/// splits `:`-separated terms, and records each term in the history at
/// most once.
///
/// # Example
/// ```
/// use concalc::{Session, Value};
///
/// let mut session = Session::new();
/// assert_eq!(session.eval("x -> 5").unwrap(), vec![Value::Real(5.0)]);
/// assert_eq!(session.eval("x * 2").unwrap(), vec![Value::Real(10.0)]);
/// ```
pub struct Session {
    vars:    Rc<RefCell<Variables>>,
    history: Rc<RefCell<History>>,
    policy:  EvalPolicy,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(EvalPolicy::default())
    }

    /// Creates a session with an explicit numeric policy.
    #[must_use]
    pub fn with_policy(policy: EvalPolicy) -> Self {
        let mut vars = Variables::new();
        // Seeding cannot fail: none of the names start with a reserved
        // letter.
        let _ = vars.put("e", Value::Real(std::f64::consts::E));
        let _ = vars.put("PI", Value::Real(std::f64::consts::PI));
        let _ = vars.put("TRUE", Value::Real(1.0));
        let _ = vars.put("FALSE", Value::Real(0.0));
        Self { vars:    Rc::new(RefCell::new(vars)),
               history: Rc::new(RefCell::new(History::new())),
               policy }
    }

    /// Evaluates one input line and returns one value per `:`-separated
    /// term.
    ///
    /// Each prepared term is appended to the history unless an identical
    /// entry already exists.
    ///
    /// # Errors
    /// Returns the first term's parse or evaluation failure; later terms
    /// are not evaluated after a failure.
    pub fn eval(&mut self, line: &str) -> Result<Vec<Value>, Error> {
        let mut results = Vec::new();
        for term in line.split(':') {
            let prepared = prepare(term);
            let expression = Expression::new(&prepared,
                                             Rc::clone(&self.history),
                                             Rc::clone(&self.vars),
                                             self.policy);
            results.push(expression.eval()?);
            let mut history = self.history.borrow_mut();
            if !history.contains(&prepared) {
                history.append(prepared);
            }
        }
        Ok(results)
    }

    /// Returns the current value of a variable, ignoring case.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.vars.borrow().get(name)
    }

    /// Returns a handle to the shared variable store.
    #[must_use]
    pub fn vars(&self) -> Rc<RefCell<Variables>> {
        Rc::clone(&self.vars)
    }

    /// Returns a handle to the shared history.
    #[must_use]
    pub fn history(&self) -> Rc<RefCell<History>> {
        Rc::clone(&self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_padding_leaves_inequality_alone() {
        assert_eq!(prepare("5!"), "5!0");
        assert_eq!(prepare("1 != 2"), "1!=2");
    }

    #[test]
    fn parenthesized_signs_get_a_zero_operand() {
        assert_eq!(prepare("(-(2+3))"), "(0-(2+3))");
        assert_eq!(prepare("+1"), "0+1");
    }

    #[test]
    fn word_operators_are_padded_but_floor_survives() {
        assert_eq!(prepare("3or5"), "3 or 5");
        assert_eq!(prepare("floor(2.5)"), "floor(2.5)");
        assert_eq!(prepare("1xor2"), "1 xor 2");
    }

    #[test]
    fn terms_enter_the_history_once() {
        let mut session = Session::new();
        session.eval("1+1").unwrap();
        session.eval("1+1").unwrap();
        session.eval("2+2 : 3+3").unwrap();
        let history = session.history();
        let entries: Vec<String> = history.borrow().iter().map(str::to_string).collect();
        assert_eq!(entries, vec!["1+1", "2+2", "3+3"]);
    }
}
