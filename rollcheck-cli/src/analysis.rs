//! Analysis Pipeline
//!
//! Runs the three procedures over a loaded roll log and assembles the
//! serializable [`Report`]:
//!
//! 1. Chi-squared goodness of fit of all rolls against a fair die
//! 2. Kolmogorov-Smirnov comparison of charged vs uncharged rolls
//! 3. Bootstrap of `mean(charged) - mean(uncharged)` with a percentile interval

use crate::config::RollcheckConfig;
use crate::dataset::RollLog;
use anyhow::Context;
use chrono::Utc;
use rollcheck_report::{
    BootstrapReport, ComparisonReport, DatasetSummary, Findings, GroupDescriptives, Report,
    ReportConfig, ReportMeta, SCHEMA_VERSION, UniformityReport,
};
use rollcheck_stats::{
    BootstrapConfig, Categories, FrequencyTable, bootstrap_difference_of_means,
    compare_two_samples, compute_summary, difference_of_means, percentile_interval,
    test_frequency_table,
};

/// Bins used for the bootstrap histogram in the report
pub const BOOTSTRAP_HISTOGRAM_BINS: usize = 20;

/// Label of the bootstrapped statistic
pub const BOOTSTRAP_STATISTIC: &str = "mean(charged) - mean(uncharged)";

/// Run every test on `log` and build the report
///
/// `source` is recorded in the report metadata (usually the CSV path).
pub fn analyze(
    log: &RollLog,
    config: &RollcheckConfig,
    source: Option<&str>,
) -> anyhow::Result<Report> {
    let alpha = config.analysis.alpha;
    let faces = Categories::new(config.analysis.lowest_face, config.analysis.faces)?;

    let all = log.all()?;
    let charged = log.charged()?;
    let uncharged = log.uncharged()?;
    tracing::info!(
        rolls = all.len(),
        charged = charged.len(),
        uncharged = uncharged.len(),
        "analyzing roll log"
    );

    // Uniformity of the die as a whole
    let table = FrequencyTable::from_sample(&all, &faces)
        .context("Roll log contains values outside the die's faces")?;
    let chi2 = test_frequency_table(&table, alpha)?;
    tracing::info!(
        statistic = chi2.statistic,
        p_value = chi2.p_value,
        decision = %chi2.decision,
        "uniformity test done"
    );

    // Does charging change the distribution?
    let ks = compare_two_samples(&charged, &uncharged, alpha)?;
    tracing::info!(
        statistic = ks.statistic,
        p_value = ks.p_value,
        decision = %ks.decision,
        "two-sample comparison done"
    );

    // Does charging shift the mean?
    let bootstrap_config = BootstrapConfig {
        iterations: config.bootstrap.iterations,
        seed: config.bootstrap.seed,
        parallel: config.bootstrap.parallel,
    };
    let distribution = bootstrap_difference_of_means(&charged, &uncharged, &bootstrap_config)?;
    let interval = percentile_interval(&distribution, config.bootstrap.confidence_level)?;
    tracing::info!(
        iterations = distribution.len(),
        seed = ?distribution.seed(),
        lower = interval.lower,
        upper = interval.upper,
        "bootstrap done"
    );

    let uniformity = UniformityReport::new(&table, &chi2);
    let distribution_comparison = ComparisonReport {
        group_a: "charged".to_string(),
        group_b: "uncharged".to_string(),
        test: (&ks).into(),
    };
    let bootstrap = BootstrapReport::new(
        BOOTSTRAP_STATISTIC,
        difference_of_means(charged.values(), uncharged.values()),
        &distribution,
        &interval,
        BOOTSTRAP_HISTOGRAM_BINS,
    );
    let findings = Findings::from_sections(&uniformity, &distribution_comparison, &bootstrap);

    Ok(Report {
        meta: build_report_meta(config, source, distribution.seed()),
        dataset: DatasetSummary {
            total_rolls: all.len(),
            charged_rolls: charged.len(),
            uncharged_rolls: uncharged.len(),
        },
        descriptives: vec![
            GroupDescriptives::new("all", &compute_summary(&all)),
            GroupDescriptives::new("charged", &compute_summary(&charged)),
            GroupDescriptives::new("uncharged", &compute_summary(&uncharged)),
        ],
        uniformity,
        distribution_comparison,
        bootstrap,
        findings,
    })
}

/// Build report metadata; `seed` is the one the bootstrap actually used
pub fn build_report_meta(
    config: &RollcheckConfig,
    source: Option<&str>,
    seed: Option<u64>,
) -> ReportMeta {
    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        source: source.map(str::to_string),
        config: ReportConfig {
            alpha: config.analysis.alpha,
            faces: config.analysis.faces,
            lowest_face: config.analysis.lowest_face,
            bootstrap_iterations: config.bootstrap.iterations,
            confidence_level: config.bootstrap.confidence_level,
            seed,
            parallel: config.bootstrap.parallel,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Roll;
    use rollcheck_report::DecisionLabel;

    fn seeded_config(seed: u64) -> RollcheckConfig {
        let mut config = RollcheckConfig::default();
        config.bootstrap.iterations = 2_000;
        config.bootstrap.seed = Some(seed);
        config
    }

    /// Fair-looking log: every face ten times, half of them charged
    fn balanced_log() -> RollLog {
        (0..100)
            .map(|i| Roll {
                value: (i % 10) + 1,
                charged: (i / 10) % 2 == 0,
            })
            .collect()
    }

    /// Charged rolls land high, uncharged rolls land low
    fn skewed_log() -> RollLog {
        (0..200)
            .map(|i| {
                let charged = i % 2 == 0;
                let value = if charged { 6 + (i % 5) } else { 1 + (i % 5) };
                Roll { value, charged }
            })
            .collect()
    }

    #[test]
    fn test_balanced_log() {
        let report = analyze(&balanced_log(), &seeded_config(1), Some("balanced.csv")).unwrap();

        assert_eq!(report.dataset.total_rolls, 100);
        assert_eq!(report.dataset.charged_rolls, 50);
        assert_eq!(report.uniformity.test.statistic, 0.0);
        assert_eq!(report.uniformity.test.decision, DecisionLabel::FailToReject);
        // Both halves hold faces 1..=10 five times each
        assert_eq!(report.distribution_comparison.test.statistic, 0.0);
        assert!(report.findings.die_is_fair);
        assert!(!report.findings.charging_changes_distribution);
        assert!(report.bootstrap.contains_zero);
        assert!(!report.findings.charging_shifts_mean);
        assert_eq!(report.meta.source.as_deref(), Some("balanced.csv"));
    }

    #[test]
    fn test_skewed_log() {
        let report = analyze(&skewed_log(), &seeded_config(2), None).unwrap();

        // Disjoint supports
        assert_eq!(report.distribution_comparison.test.statistic, 1.0);
        assert!(report.findings.charging_changes_distribution);
        assert_eq!(report.bootstrap.observed, 5.0);
        assert!(report.bootstrap.ci_lower > 0.0);
        assert!(report.findings.charging_shifts_mean);
        assert_eq!(report.bootstrap.proportion_below_zero, 0.0);
    }

    #[test]
    fn test_seed_recorded_and_reproducible() {
        let config = seeded_config(99);
        let first = analyze(&skewed_log(), &config, None).unwrap();
        let second = analyze(&skewed_log(), &config, None).unwrap();

        assert_eq!(first.meta.config.seed, Some(99));
        assert_eq!(first.bootstrap.ci_lower, second.bootstrap.ci_lower);
        assert_eq!(first.bootstrap.ci_upper, second.bootstrap.ci_upper);
    }

    #[test]
    fn test_unseeded_run_records_drawn_seed() {
        let mut config = seeded_config(0);
        config.bootstrap.seed = None;
        config.bootstrap.iterations = 200;

        let report = analyze(&balanced_log(), &config, None).unwrap();
        assert!(report.meta.config.seed.is_some());
        assert_eq!(report.meta.config.seed, report.bootstrap.seed);
    }

    #[test]
    fn test_out_of_range_face() {
        let log: RollLog = [
            Roll {
                value: 11,
                charged: true,
            },
            Roll {
                value: 3,
                charged: false,
            },
        ]
        .into_iter()
        .collect();

        assert!(analyze(&log, &seeded_config(1), None).is_err());
    }

    #[test]
    fn test_missing_group() {
        let log: RollLog = (1..=10)
            .map(|value| Roll {
                value,
                charged: true,
            })
            .collect();

        let err = analyze(&log, &seeded_config(1), None).unwrap_err();
        assert!(err.to_string().contains("uncharged"));
    }
}
