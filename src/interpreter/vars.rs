use std::collections::HashMap;

use crate::{
    error::EvalError,
    interpreter::value::core::Value,
    util::num::EvalResult,
};

/// Case-insensitive variable store.
///
/// Names are matched without regard to case but displayed with the casing
/// of their first definition. Multi-character names starting with one of
/// the reserved literal-prefix letters (`x`, `o`, `b`, `h` — hexadecimal,
/// octal, binary and history syntax) are rejected; a single-letter name
/// can never be mistaken for a literal, so `x` alone is a valid variable.
///
/// # Example
/// ```
/// use concalc::interpreter::{value::core::Value, vars::Variables};
///
/// let mut vars = Variables::new();
/// vars.put("Answer", Value::Real(42.0)).unwrap();
/// assert_eq!(vars.get("ANSWER"), Some(Value::Real(42.0)));
/// assert!(vars.put("xray", Value::Real(1.0)).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Variables {
    entries: HashMap<String, (String, Value)>,
}

impl Variables {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries
            .get(&name.to_uppercase())
            .map(|(_, value)| value.clone())
    }

    /// Binds `name` to `value`, keeping the display casing of the first
    /// definition.
    ///
    /// # Errors
    /// Returns [`EvalError::ReservedName`] if the name is longer than one
    /// character and starts with `x`, `o`, `b` or `h` in either case.
    pub fn put(&mut self, name: &str, value: Value) -> EvalResult<()> {
        if let Some(first) = name.chars().next() {
            if name.chars().count() > 1
               && matches!(first.to_ascii_lowercase(), 'x' | 'o' | 'b' | 'h')
            {
                return Err(EvalError::ReservedName { ch: first });
            }
        }
        self.entries
            .entry(name.to_uppercase())
            .and_modify(|slot| slot.1 = value.clone())
            .or_insert_with(|| (name.to_string(), value));
        Ok(())
    }

    /// Tests whether `name` is bound, ignoring case.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Returns the display names of all bound variables, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.values().map(|(name, _)| name.clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redefinition_keeps_the_original_display_casing() {
        let mut vars = Variables::new();
        vars.put("Rate", Value::Real(1.0)).unwrap();
        vars.put("RATE", Value::Real(2.0)).unwrap();
        assert_eq!(vars.get("rate"), Some(Value::Real(2.0)));
        assert_eq!(vars.names(), vec!["Rate".to_string()]);
    }

    #[test]
    fn reserved_prefixes_are_rejected_in_both_cases() {
        let mut vars = Variables::new();
        assert!(vars.put("offset", Value::Real(0.0)).is_err());
        assert!(vars.put("Bits", Value::Real(0.0)).is_err());
        assert!(vars.put("width", Value::Real(0.0)).is_ok());
    }
}
