//! Property-based tests for the expression builder and evaluator.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::calculator::{EMPTY_EXPRESSION, Symbol, apply, build, evaluate, evaluate_expression};
    use crate::error::EvalError;
    use crate::expr::{Grammar, compile};

    // Strategy for keypad labels, weighted towards digits
    fn label() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            4 => prop::sample::select(vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]),
            2 => prop::sample::select(vec!["+", "-", "*", "/", "%", "^"]),
            1 => prop::sample::select(vec![
                ".", "π", "(", ")", "sin(", "cos(", "tan(", "log(", "ln(", "sqrt(",
            ]),
        ]
    }

    fn symbols() -> impl Strategy<Value = Vec<Symbol>> {
        prop::collection::vec(label(), 0..24).prop_map(|labels| {
            labels
                .into_iter()
                .filter_map(|l| l.parse::<Symbol>().ok())
                .collect()
        })
    }

    // Arbitrary text over the calculator alphabet, including nonsense
    fn keypad_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                "0", "1", "7", ".", "+", "-", "*", "/", "%", "^", "(", ")", "π", "sin(",
                "sqrt(", "ln(", "x", " ",
            ]),
            0..32,
        )
        .prop_map(|parts| parts.concat())
    }

    // Long runs of binary operators between single digits
    fn operator_chain() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["1", "2", "7"]),
            prop::collection::vec(
                (
                    prop::sample::select(vec!["+", "-", "*", "/", ""]),
                    prop::sample::select(vec!["1", "2", "7", "(1)", "π"]),
                ),
                1_000..4_000,
            ),
        )
            .prop_map(|(first, rest)| {
                rest.into_iter().fold(first.to_string(), |mut text, (op, operand)| {
                    text.push_str(op);
                    text.push_str(operand);
                    text
                })
            })
    }

    proptest! {
        #[test]
        fn built_expressions_never_have_extra_closes(symbols in symbols()) {
            let expr = build(symbols);
            let opens = expr.chars().filter(|&c| c == '(').count();
            let closes = expr.chars().filter(|&c| c == ')').count();
            prop_assert!(closes <= opens);
            prop_assert!(!expr.is_empty());
        }

        #[test]
        fn delete_then_retype_restores(symbols in symbols(), last in label()) {
            let before = build(symbols);
            let symbol: Symbol = last.parse().unwrap();
            let after = apply(&before, symbol);

            // Only symbols that appended exactly their own text are reversible
            if after != before
                && after.starts_with(&before)
                && after[before.len()..] == symbol.to_string()
                && before != EMPTY_EXPRESSION
            {
                let deleted = (0..symbol.to_string().chars().count())
                    .fold(after.clone(), |e, _| apply(&e, Symbol::Delete));
                prop_assert_eq!(&deleted, &before);
                prop_assert_eq!(apply(&deleted, symbol), after);
            }
        }

        #[test]
        fn evaluation_never_panics(text in keypad_text()) {
            let result = evaluate_expression(&text);
            if let Some(error) = result.error() {
                prop_assert!(matches!(error, EvalError::InvalidExpression | EvalError::DivisionByZero));
            }
        }

        #[test]
        fn long_operator_chains_return_number_or_error(text in operator_chain()) {
            let result = evaluate_expression(&text);
            if let Some(error) = result.error() {
                prop_assert!(matches!(error, EvalError::InvalidExpression | EvalError::DivisionByZero));
            }
        }

        #[test]
        fn results_are_idempotent(symbols in symbols()) {
            let expr = build(symbols);
            if let Ok(first) = evaluate(&expr) {
                prop_assert_eq!(evaluate(&first), Ok(first.clone()));
            }
        }

        #[test]
        fn integer_arithmetic_matches(a in -1000i64..1000, b in -1000i64..1000) {
            prop_assert_eq!(evaluate(&format!("{a}+{b}")), Ok((a + b).to_string()));
            prop_assert_eq!(evaluate(&format!("{a}*{b}")), Ok((a * b).to_string()));
            prop_assert_eq!(evaluate(&format!("{a}-({b})")), Ok((a - b).to_string()));
        }

        #[test]
        fn function_grammar_polynomial(x in -50.0f64..50.0) {
            let tree = compile("3*x^2 - 2*x + 1", Grammar::Function).unwrap();
            let expected = 3.0 * x.powf(2.0) - 2.0 * x + 1.0;
            prop_assert!((tree.eval(x) - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }
}
