//! Plain-text rendering of results for the non-interactive commands.

use covar_core::{scatter_rows, Dataset, PlotBounds, StatisticsResult};

pub const LABEL_X: &str = "Variable X";
pub const LABEL_Y: &str = "Variable Y";

/// Fixed-point with at most `precision` fractional digits, trailing zeros
/// trimmed (`1.3333`, `2`, `-0.5`).
pub fn format_number(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".into()
    } else {
        s
    }
}

pub fn render_statistics(stats: &StatisticsResult, precision: usize) -> String {
    let f = |v: f64| format_number(v, precision);
    let sign = stats.covariance_sign();
    let rows = [
        ("Sample Size (N)", stats.n.to_string()),
        ("Mean X", f(stats.mean_x)),
        ("Mean Y", f(stats.mean_y)),
        ("Sample Covariance", f(stats.sample_covariance)),
        ("Population Covariance", f(stats.population_covariance)),
        ("Direction", format!("{sign} ({})", sign.describe())),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{:<24}{value}\n", format!("{label}:")));
    }
    out
}

/// ASCII scatter plot framed by its axis domains. Empty for an empty dataset.
pub fn render_scatter(data: &Dataset, width: usize, height: usize, precision: usize) -> String {
    let Some(bounds) = PlotBounds::from_dataset(data) else {
        return String::new();
    };
    let rows = scatter_rows(data, width, height);
    if rows.is_empty() {
        return String::new();
    }

    let f = |v: f64| format_number(v, precision);
    let y_top = f(bounds.y.max);
    let y_bottom = f(bounds.y.min);
    let gutter = y_top.len().max(y_bottom.len());

    let mut out = format!("{:>gutter$}  {LABEL_Y}\n", "");
    let last = rows.len() - 1;
    for (i, row) in rows.iter().enumerate() {
        let tick = match i {
            0 => y_top.as_str(),
            i if i == last => y_bottom.as_str(),
            _ => "",
        };
        out.push_str(&format!("{tick:>gutter$} |{row}\n"));
    }
    out.push_str(&format!("{:>gutter$} +{}\n", "", "-".repeat(width)));

    let x_left = f(bounds.x.min);
    let x_right = f(bounds.x.max);
    let span = width.saturating_sub(x_left.len());
    out.push_str(&format!("{:>gutter$}  {x_left}{x_right:>span$}\n", ""));
    out.push_str(&format!("{:>gutter$}  {LABEL_X:^width$}\n", ""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use covar_core::{calculate_statistics, parse_input_data};

    #[test]
    fn test_format_number_trims() {
        assert_eq!(format_number(4.0 / 3.0, 4), "1.3333");
        assert_eq!(format_number(2.0, 4), "2");
        assert_eq!(format_number(-0.5, 4), "-0.5");
        assert_eq!(format_number(-0.00001, 4), "0");
        assert_eq!(format_number(1200.0, 0), "1200");
        assert_eq!(format_number(0.123456, 2), "0.12");
    }

    #[test]
    fn test_render_statistics() {
        let stats = calculate_statistics(parse_input_data("1,2,3", "2,4,6").unwrap());
        let out = render_statistics(&stats, 4);
        assert!(out.contains("Sample Size (N):        3\n"));
        assert!(out.contains("Mean Y:                 4\n"));
        assert!(out.contains("Sample Covariance:      2\n"));
        assert!(out.contains("Population Covariance:  1.3333\n"));
        assert!(out.contains("positive (variables move in the same direction)"));
    }

    #[test]
    fn test_render_statistics_overflowed_direction() {
        let stats = calculate_statistics(parse_input_data("1e308 1.5e308", "1 2").unwrap());
        let out = render_statistics(&stats, 4);
        let expected = format!("{:<24}undefined (covariance is not a finite number)\n", "Direction:");
        assert!(out.contains(&expected));
        assert!(!out.contains("zero"));
    }

    #[test]
    fn test_render_scatter_frame() {
        let data = parse_input_data("0 10", "0 10").unwrap();
        let out = render_scatter(&data, 10, 5, 2);
        let lines: Vec<&str> = out.lines().collect();
        // label, 5 rows, axis, x ticks, x label
        assert_eq!(lines.len(), 9);
        assert!(lines[0].ends_with(LABEL_Y));
        assert!(lines[1].starts_with("11 |"));
        assert!(lines[5].starts_with("-1 |"));
        assert!(lines[6].ends_with(&"-".repeat(10)));
        assert!(lines[7].contains("-1"));
        assert!(lines[7].ends_with("11"));
        assert!(lines[8].contains(LABEL_X));
        assert_eq!(out.matches('●').count(), 2);
    }

    #[test]
    fn test_render_scatter_empty() {
        assert!(render_scatter(&Dataset::new(), 10, 5, 2).is_empty());
    }
}
