//! Output Formatting
//!
//! Human-readable terminal rendering of an analysis [`Report`]:
//! - Dataset and per-group descriptive statistics
//! - Observed vs expected face counts drawn as a bar chart
//! - Test statistics, p-values and a verdict line per question
//! - Bootstrap interval with a text histogram of the resampled differences

use rollcheck_report::{DecisionLabel, HistogramBin, Report, TestOutcome};

/// Widest bar drawn in a chart
const BAR_WIDTH: usize = 40;

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("rollcheck Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    if let Some(source) = &report.meta.source {
        output.push_str(&format!("Roll log: {}\n", source));
    }
    output.push_str(&format!(
        "Rolls: {}  (charged: {}, uncharged: {})\n\n",
        report.dataset.total_rolls, report.dataset.charged_rolls, report.dataset.uncharged_rolls
    ));

    section(&mut output, "Descriptive statistics");
    output.push_str(&format!(
        "  {:<10} {:>6} {:>7} {:>7} {:>7} {:>5} {:>5} {:>6} {:>6}\n",
        "group", "n", "mean", "median", "std", "min", "max", "q1", "q3"
    ));
    for d in &report.descriptives {
        output.push_str(&format!(
            "  {:<10} {:>6} {:>7.3} {:>7.2} {:>7.3} {:>5} {:>5} {:>6.2} {:>6.2}\n",
            d.group, d.count, d.mean, d.median, d.std_dev, d.min, d.max, d.q1, d.q3
        ));
    }
    output.push('\n');

    section(&mut output, "Is the die fair? (chi-squared goodness of fit)");
    let max_observed = report
        .uniformity
        .frequencies
        .iter()
        .map(|f| f.observed as usize)
        .max()
        .unwrap_or(0);
    output.push_str(&format!("  {:>5} {:>9} {:>9}\n", "face", "observed", "expected"));
    for f in &report.uniformity.frequencies {
        output.push_str(&format!(
            "  {:>5} {:>9} {:>9.1}  {}\n",
            f.face,
            f.observed,
            f.expected,
            bar(f.observed as usize, max_observed)
        ));
    }
    output.push_str(&format!(
        "  {}\n",
        test_line("chi2", &report.uniformity.test)
    ));
    output.push_str(&verdict(
        report.uniformity.test.decision,
        "faces are not equally likely",
        "no evidence the die is unfair",
    ));
    output.push('\n');

    let comparison = &report.distribution_comparison;
    section(
        &mut output,
        &format!(
            "Does charging change the distribution? ({} vs {}, Kolmogorov-Smirnov)",
            comparison.group_a, comparison.group_b
        ),
    );
    output.push_str(&format!("  {}\n", test_line("D", &comparison.test)));
    output.push_str(&verdict(
        comparison.test.decision,
        "the two groups have different distributions",
        "no evidence the distributions differ",
    ));
    output.push('\n');

    let b = &report.bootstrap;
    section(
        &mut output,
        &format!("Does charging shift the mean? (bootstrap of {})", b.statistic),
    );
    output.push_str(&format!("  observed difference: {:.4}\n", b.observed));
    let seed = b
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    output.push_str(&format!(
        "  iterations: {}  seed: {}  standard error: {:.4}\n",
        b.iterations, seed, b.standard_error
    ));
    output.push_str(&format!(
        "  {:.0}% CI: [{:.4}, {:.4}]\n",
        b.ci_level * 100.0,
        b.ci_lower,
        b.ci_upper
    ));
    output.push_str(&format!(
        "  resamples below zero: {:.1}%\n",
        b.proportion_below_zero * 100.0
    ));
    output.push_str(&format_histogram(&b.histogram));
    let icon = if b.contains_zero { "✓" } else { "✗" };
    let message = if b.contains_zero {
        "interval contains zero: no evidence charging shifts the mean"
    } else if b.ci_lower > 0.0 {
        "interval excludes zero: charged rolls are higher on average"
    } else {
        "interval excludes zero: charged rolls are lower on average"
    };
    output.push_str(&format!("  {} {}\n", icon, message));

    output.push('\n');
    output.push_str(&"=".repeat(60));
    output.push('\n');

    output
}

/// Render histogram bins as one bar per line
pub fn format_histogram(bins: &[HistogramBin]) -> String {
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
    let mut output = String::new();
    for b in bins {
        output.push_str(&format!(
            "  {:>9.3} .. {:>9.3} {:>6}  {}\n",
            b.lower,
            b.upper,
            b.count,
            bar(b.count, max)
        ));
    }
    output
}

fn section(output: &mut String, title: &str) {
    output.push_str(title);
    output.push('\n');
    output.push_str(&"-".repeat(60));
    output.push('\n');
}

fn test_line(name: &str, test: &TestOutcome) -> String {
    let df = test
        .degrees_of_freedom
        .map(|df| format!("  df = {}", df))
        .unwrap_or_default();
    format!(
        "{} = {:.4}{}  p = {:.4}  alpha = {}",
        name, test.statistic, df, test.p_value, test.alpha
    )
}

fn verdict(decision: DecisionLabel, reject: &str, keep: &str) -> String {
    match decision {
        DecisionLabel::Reject => format!("  ✗ {}: {}\n", decision, reject),
        DecisionLabel::FailToReject => format!("  ✓ {}: {}\n", decision, keep),
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "#".repeat(len)
}
