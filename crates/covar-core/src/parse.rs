//! Free-form numeric text to a validated [`Dataset`].
//!
//! Tokens are separated by any mix of whitespace and commas. Validation runs
//! in a fixed order and the first failing check wins:
//! 1. both inputs must contain at least one token
//! 2. every token must be a finite decimal literal (X is scanned first)
//! 3. both inputs must have the same number of tokens

use crate::error::{InputError, InputResult};
use crate::observation::{Dataset, Variable};

/// Parse the raw X and Y fields into paired observations.
pub fn parse_input_data(raw_x: &str, raw_y: &str) -> InputResult<Dataset> {
    let tokens_x = tokenize(raw_x);
    let tokens_y = tokenize(raw_y);

    if tokens_x.is_empty() || tokens_y.is_empty() {
        return Err(InputError::Empty);
    }

    let xs = parse_values(Variable::X, &tokens_x)?;
    let ys = parse_values(Variable::Y, &tokens_y)?;

    if xs.len() != ys.len() {
        return Err(InputError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
        });
    }

    Ok(Dataset::from_pairs(&xs, &ys))
}

/// Split on runs of whitespace and/or commas, dropping empty tokens.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_values(variable: Variable, tokens: &[&str]) -> InputResult<Vec<f64>> {
    tokens
        .iter()
        .map(|t| {
            parse_number(t).ok_or_else(|| InputError::NonNumeric {
                variable,
                token: (*t).to_string(),
            })
        })
        .collect()
}

/// Decimal literal with optional sign, fraction and exponent. `NaN` and the
/// infinity spellings that `f64::from_str` accepts are rejected.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_separators() {
        assert_eq!(tokenize(" 1, 2,,3\t4\n5 "), vec!["1", "2", "3", "4", "5"]);
        assert!(tokenize(" , ,\n").is_empty());
    }

    #[test]
    fn test_parse_pairs_by_position() {
        let ds = parse_input_data("1,2,3", "2 4 6").unwrap();
        assert_eq!(ds.len(), 3);
        let obs = ds.observations();
        assert_eq!((obs[0].x, obs[0].y, obs[0].id), (1.0, 2.0, 0));
        assert_eq!((obs[2].x, obs[2].y, obs[2].id), (3.0, 6.0, 2));
    }

    #[test]
    fn test_parse_literal_forms() {
        let ds = parse_input_data("-1.5 +.5 3. 1e3 2E-2", "1 2 3 4 5").unwrap();
        let xs: Vec<f64> = ds.xs().collect();
        assert_eq!(xs, vec![-1.5, 0.5, 3.0, 1000.0, 0.02]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_input_data("", "1,2"), Err(InputError::Empty));
        assert_eq!(parse_input_data("1,2", "  ,  "), Err(InputError::Empty));
    }

    #[test]
    fn test_empty_wins_over_non_numeric() {
        assert_eq!(parse_input_data("a b", ""), Err(InputError::Empty));
    }

    #[test]
    fn test_non_numeric_token() {
        let err = parse_input_data("1,a,3", "1,2,3").unwrap_err();
        assert_eq!(
            err,
            InputError::NonNumeric {
                variable: Variable::X,
                token: "a".into()
            }
        );
        assert!(err
            .to_string()
            .starts_with("Inputs must contain only numbers separated by spaces or commas"));
    }

    #[test]
    fn test_non_numeric_in_y() {
        let err = parse_input_data("1,2", "1;2").unwrap_err();
        assert!(matches!(
            err,
            InputError::NonNumeric {
                variable: Variable::Y,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_wins_over_length_mismatch() {
        let err = parse_input_data("1,2,x", "1,2").unwrap_err();
        assert!(matches!(err, InputError::NonNumeric { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        for bad in ["NaN", "inf", "-infinity"] {
            let err = parse_input_data(bad, "1").unwrap_err();
            assert!(matches!(err, InputError::NonNumeric { .. }), "{bad}");
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = parse_input_data("1,2,3", "1,2").unwrap_err();
        assert_eq!(err, InputError::LengthMismatch { x: 3, y: 2 });
        assert_eq!(
            err.to_string(),
            "Data length mismatch: X has 3 points, Y has 2 points."
        );
    }
}
