use concalc::{get_result, EvalPolicy, Precision, Session, Value};

/// Evaluates one line in a fresh session and returns the last term's value.
fn eval(src: &str) -> Value {
    match get_result(src, false) {
        Ok(values) => values.into_iter().last().expect("no value produced"),
        Err(e) => panic!("'{src}' failed: {e}"),
    }
}

fn assert_real(src: &str, expected: f64) {
    match eval(src) {
        Value::Real(r) => {
            assert!((r - expected).abs() < 1e-9,
                    "'{src}' evaluated to {r}, expected {expected}")
        },
        other => panic!("'{src}' evaluated to non-real {other}"),
    }
}

fn assert_display(src: &str, expected: &str) {
    assert_eq!(eval(src).to_string(), expected, "'{src}'");
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("'{src}' succeeded but was expected to fail")
    }
}

#[test]
fn precedence_and_associativity() {
    assert_real("2+3*4", 14.0);
    assert_real("2^3^2", 512.0);
    assert_real("10-3-2", 5.0);
    assert_real("(2+3)*4", 20.0);
}

#[test]
fn unary_signs_are_normalized_before_parsing() {
    assert_real("-3+4", 1.0);
    assert_real("+5*2", 10.0);
    assert_real("(-(2+3))", -5.0);
    assert_real("2*-3", -6.0);
}

#[test]
fn whitespace_is_stripped_before_tokenizing() {
    // Digits separated only by spaces merge into one literal.
    assert_real("1 2", 12.0);
    assert_real("1 + 2 * 3", 7.0);
}

#[test]
fn factorials() {
    assert_real("5!", 120.0);
    assert_real("0!", 1.0);
    assert_real("3!+1", 7.0);
    assert_failure("(0-3)!");
}

#[test]
fn fast_and_exact_factorials_agree_on_small_input() {
    let mut fast = Session::with_policy(EvalPolicy { precision: Precision::Fast,
                                                     complex:   true, });
    let values = fast.eval("10!").unwrap();
    let Value::Real(r) = values[0] else {
        panic!("10! was not real")
    };
    assert!((r - 3_628_800.0).abs() < 1e-3);
}

#[test]
fn complex_arithmetic_and_magnitudes() {
    assert_real("ABS(3+4i)", 5.0);
    assert_display("2i*3i", "-6");
    assert_real("RE(3+4i)", 3.0);
    assert_real("IM(3+4i)", 4.0);
    assert_real("ABS(POL(PI/2, 5))", 5.0);
    // Mixed comparisons go by magnitude.
    assert_real("3+4i >= 5", 1.0);
}

#[test]
fn real_results_stay_real() {
    // Both operands real, so the tag must stay real even though the
    // computation runs through complex math.
    assert_display("2+3", "5");
    assert_display("SQRT(16)", "4");
}

#[test]
fn aggregates_and_auto_splat() {
    assert_real("SUM(1,2,3,4,5)", 15.0);
    assert_real("SUM(SEQ(1,1,5))", 15.0);
    assert_real("PROD(1,2,3,4)", 24.0);
    assert_real("MAX(3,1,2)", 3.0);
    assert_real("MIN(3,1,2)", 1.0);
    assert_real("MIN(0-3,1)", -3.0);
    assert_real("AMEAN(1,2,3)", 2.0);
    assert_real("GMEAN(2,8)", 4.0);
    assert_real("VAR(1,2,3)", 1.0);
}

#[test]
fn empty_aggregates_are_rejected() {
    assert_failure("MAX()");
    assert_failure("SUM()");
    assert_failure("AMEAN()");
}

#[test]
fn arrays_append_and_remove() {
    assert_display("ARR(1,2)", "[1, 2]");
    assert_display("ARR(1,2)+3", "[1, 2, 3]");
    assert_display("ARR(1,2,3)-2", "[1, 3]");
    assert_display("SEQ(5,0-1,3)", "[5, 4, 3]");
    assert_display("SEQ(1,1,0)", "[]");
}

#[test]
fn polynomials() {
    assert_display("POLY(1,2,3)", "1 + 2 x + 3 x^2");
    assert_display("DERIVE(POLY(1,2,3))", "2 + 6 x");
    assert_display("INTEGRATE(POLY(2,6))", "2 x + 3 x^2");
    assert_real("PVAL(POLY(1,2,3), 2)", 17.0);
    assert_real("PVAL(DERIVE(POLY(1,2,3)), 2)", 14.0);
    // Arrays coerce to coefficient lists.
    assert_real("PVAL(DERIVE(ARR(1,2,3)), 2)", 14.0);
    assert_failure("PVAL(1, 2)");
}

#[test]
fn radix_literals() {
    assert_real("x1F", 31.0);
    assert_real("o17", 15.0);
    assert_real("b101", 5.0);
    assert_real("xFF+1", 256.0);
    assert_failure("xQQ");
}

#[test]
fn bitwise_and_shift_operators() {
    assert_real("12 or 3", 15.0);
    assert_real("12 and 10", 8.0);
    assert_real("5 xor 1", 4.0);
    assert_real("1 shl 4", 16.0);
    assert_real("16 shr 2", 4.0);
    assert_real("~10", 5.0);
    assert_failure("(1+2i) or 3");
}

#[test]
fn logic_comparison_and_equality() {
    assert_real("2>1", 1.0);
    assert_real("1>=1", 1.0);
    assert_real("1<1", 0.0);
    assert_real("2=2", 1.0);
    assert_real("1!=2", 1.0);
    assert_real("5!=5", 0.0);
    assert_real("1&&0", 0.0);
    assert_real("1||0", 1.0);
    assert_real("NOT(0)", 1.0);
    assert_real("IF(1,2,3)", 2.0);
    assert_real("IF(0,2,3)", 3.0);
}

#[test]
fn integer_functions() {
    assert_real("GCD(12,18)", 6.0);
    assert_real("LCM(4,6)", 12.0);
    assert_real("FIB(10)", 55.0);
    assert_real("BIN(5,2)", 10.0);
    assert_real("STIR(4,2)", 7.0);
    assert_real("MERS(7)", 127.0);
    assert_real("NPR(10)", 11.0);
    assert_real("BYT(1,0)", 256.0);
    assert_failure("BYT(300)");
    assert_failure("FIB(0-1)");
}

#[test]
fn percentages_and_pythagoras() {
    assert_real("PERC(10,50)", 5.0);
    assert_real("PER(10,50)", 20.0);
    assert_real("PYT(3,4)", 5.0);
}

#[test]
fn trigonometry_round_trips() {
    assert_real("SIN(0)", 0.0);
    assert_real("COS(0)", 1.0);
    assert_real("DEG(RAD(90))", 90.0);
    assert_real("ASIN(SIN(0.5))", 0.5);
    assert_real("ROU(2.4)", 2.0);
    assert_real("FLOOR(2.9)", 2.0);
    assert_real("CEIL(2.1)", 3.0);
}

#[test]
fn structural_errors_are_rejected() {
    assert_failure("+");
    assert_failure("1,2");
    assert_failure("(1+2");
    assert_failure("1+2)");
    assert_failure("SEQ(1,2)");
    assert_failure("");
    assert_failure("1/0");
}

#[test]
fn variables_assign_and_persist() {
    let mut session = Session::new();
    assert_eq!(session.eval("x -> 5").unwrap(), vec![Value::Real(5.0)]);
    assert_eq!(session.eval("x * 2").unwrap(), vec![Value::Real(10.0)]);
    // Names are case-insensitive.
    assert_eq!(session.eval("X + 1").unwrap(), vec![Value::Real(6.0)]);
}

#[test]
fn assignment_chains_across_terms() {
    let mut session = Session::new();
    let values = session.eval("a -> 2 : a + 1").unwrap();
    assert_eq!(values, vec![Value::Real(2.0), Value::Real(3.0)]);
}

#[test]
fn undeclared_identifiers_default_to_zero() {
    assert_real("unseen + 1", 1.0);
}

#[test]
fn reserved_variable_prefixes_are_rejected() {
    // Variable names may not start with a literal-prefix letter.
    assert_failure("hello + 1");
    assert_failure("3 -> 4");
}

#[test]
fn seeded_constants_are_available() {
    assert_real("PI > 3", 1.0);
    assert_real("TRUE + FALSE", 1.0);
    assert_real("LN(e)", 1.0);
}

#[test]
fn history_replay_reproduces_values() {
    let mut session = Session::new();
    session.eval("2+3*4").unwrap();
    assert_eq!(session.eval("H(0)").unwrap(), vec![Value::Real(14.0)]);
    assert_eq!(session.eval("H(0)+1").unwrap(), vec![Value::Real(15.0)]);
}

#[test]
fn history_replay_sees_current_variable_values() {
    let mut session = Session::new();
    session.eval("n -> 2").unwrap();
    session.eval("n * 10").unwrap();
    session.eval("n -> 7").unwrap();
    assert_eq!(session.eval("H(1)").unwrap(), vec![Value::Real(70.0)]);
}

#[test]
fn missing_history_entries_are_an_error() {
    let mut session = Session::new();
    assert!(session.eval("H(0)").is_err());
}

#[test]
fn cyclic_history_hits_the_recursion_guard() {
    let mut session = Session::new();
    session.history().borrow_mut().append("H(0)");
    assert!(session.eval("H(0)").is_err());
}

#[test]
fn word_operators_do_not_need_surrounding_spaces() {
    let mut session = Session::new();
    session.eval("p2 -> 6").unwrap();
    assert_eq!(session.eval("p2or1").unwrap(), vec![Value::Real(7.0)]);
}

#[test]
fn case_insensitive_function_names() {
    assert_real("sum(1,2)", 3.0);
    assert_real("Max(1,9)", 9.0);
}
