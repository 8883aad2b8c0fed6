//! Descriptive statistics over samples of valuation multiples.
//!
//! Every function rejects an empty sample with `CalculatorError::NotEnoughData`
//! naming the metric; callers are expected to have removed zero sentinels first.

use crate::error::CalculatorError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

fn sorted_sample(values: &[Decimal], metric: &str) -> Result<Vec<Decimal>, CalculatorError> {
    if values.is_empty() {
        return Err(CalculatorError::NotEnoughData(metric.to_string()));
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    Ok(sorted)
}

pub fn min(values: &[Decimal], metric: &str) -> Result<Decimal, CalculatorError> {
    values
        .iter()
        .copied()
        .min()
        .ok_or_else(|| CalculatorError::NotEnoughData(metric.to_string()))
}

pub fn max(values: &[Decimal], metric: &str) -> Result<Decimal, CalculatorError> {
    values
        .iter()
        .copied()
        .max()
        .ok_or_else(|| CalculatorError::NotEnoughData(metric.to_string()))
}

pub fn mean(values: &[Decimal], metric: &str) -> Result<Decimal, CalculatorError> {
    if values.is_empty() {
        return Err(CalculatorError::NotEnoughData(metric.to_string()));
    }
    Ok(values.iter().sum::<Decimal>() / Decimal::from(values.len()))
}

/// Middle value, or the average of the two middle values for an even count.
pub fn median(values: &[Decimal], metric: &str) -> Result<Decimal, CalculatorError> {
    let sorted = sorted_sample(values, metric)?;
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / dec!(2))
    } else {
        Ok(sorted[mid])
    }
}

/// Percentile with linear interpolation between closest ranks, `pct` in `[0, 100]`.
pub fn percentile(values: &[Decimal], pct: Decimal, metric: &str) -> Result<Decimal, CalculatorError> {
    let sorted = sorted_sample(values, metric)?;
    let last = sorted.len() - 1;

    let rank = Decimal::from(last) * pct / dec!(100);
    let lower = rank.floor();
    let lower_idx = lower.to_usize().unwrap_or(0).min(last);
    let upper_idx = (lower_idx + 1).min(last);

    Ok(sorted[lower_idx] + (sorted[upper_idx] - sorted[lower_idx]) * (rank - lower))
}

/// Full distribution summary reported for trading multiples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub min: Decimal,
    #[serde(rename = "25th_percentile")]
    pub percentile_25: Decimal,
    pub median: Decimal,
    #[serde(rename = "75th_percentile")]
    pub percentile_75: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
}

impl DistributionSummary {
    pub fn from_sample(values: &[Decimal], metric: &str) -> Result<Self, CalculatorError> {
        Ok(Self {
            min: min(values, metric)?,
            percentile_25: percentile(values, dec!(25), metric)?,
            median: median(values, metric)?,
            percentile_75: percentile(values, dec!(75), metric)?,
            max: max(values, metric)?,
            mean: mean(values, metric)?,
        })
    }
}

/// Reduced summary reported for transaction multiples and premiums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub min: Decimal,
    pub median: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
}

impl RangeSummary {
    pub fn from_sample(values: &[Decimal], metric: &str) -> Result<Self, CalculatorError> {
        Ok(Self {
            min: min(values, metric)?,
            median: median(values, metric)?,
            max: max(values, metric)?,
            mean: mean(values, metric)?,
        })
    }

    /// Multiplies every statistic, e.g. by 100 to report fractions as percentages.
    pub fn scaled(self, factor: Decimal) -> Self {
        Self {
            min: self.min * factor,
            median: self.median * factor,
            max: self.max * factor,
            mean: self.mean * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[dec!(1), dec!(2), dec!(3), dec!(4)], dec!(25), dec!(1.75))]
    #[case(&[dec!(1), dec!(2), dec!(3), dec!(4)], dec!(75), dec!(3.25))]
    #[case(&[dec!(1), dec!(2), dec!(3), dec!(4)], dec!(0), dec!(1))]
    #[case(&[dec!(1), dec!(2), dec!(3), dec!(4)], dec!(100), dec!(4))]
    #[case(&[dec!(7)], dec!(25), dec!(7))]
    #[case(&[dec!(5), dec!(1), dec!(3)], dec!(50), dec!(3))]
    fn percentile_interpolates_linearly(
        #[case] values: &[Decimal],
        #[case] pct: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(percentile(values, pct, "x").unwrap(), expected);
    }

    #[test]
    fn median_averages_even_samples() {
        assert_eq!(median(&[dec!(9.78), dec!(15.00), dec!(3.86), dec!(24.19)], "x").unwrap(), dec!(12.39));
        assert_eq!(median(&[dec!(3), dec!(1), dec!(2)], "x").unwrap(), dec!(2));
    }

    #[test]
    fn empty_samples_are_rejected() {
        let err = CalculatorError::NotEnoughData("ev_ebitda".to_string());
        assert_eq!(min(&[], "ev_ebitda").unwrap_err(), err);
        assert_eq!(max(&[], "ev_ebitda").unwrap_err(), err);
        assert_eq!(mean(&[], "ev_ebitda").unwrap_err(), err);
        assert_eq!(median(&[], "ev_ebitda").unwrap_err(), err);
        assert_eq!(percentile(&[], dec!(25), "ev_ebitda").unwrap_err(), err);
        assert!(DistributionSummary::from_sample(&[], "ev_ebitda").is_err());
    }

    #[test]
    fn distribution_summary_of_peer_revenue_multiples() {
        let sample = [
            dec!(6.35), dec!(12.70), dec!(8.87), dec!(12.47), dec!(13.60),
            dec!(7.27), dec!(16.06), dec!(3.97), dec!(16.55),
        ];
        let summary = DistributionSummary::from_sample(&sample, "ev_revenue").unwrap();
        assert_eq!(summary.min, dec!(3.97));
        assert_eq!(summary.percentile_25, dec!(7.27));
        assert_eq!(summary.median, dec!(12.47));
        assert_eq!(summary.percentile_75, dec!(13.60));
        assert_eq!(summary.max, dec!(16.55));
        assert!((summary.mean - dec!(10.8711)).abs() < dec!(0.0001));
    }

    #[test]
    fn range_summary_scales_to_percent() {
        let premiums = [dec!(0.315), dec!(0.188), dec!(0.287), dec!(0.502), dec!(0.293), dec!(0.548)];
        let summary = RangeSummary::from_sample(&premiums, "premium").unwrap().scaled(dec!(100));
        assert_eq!(summary.min, dec!(18.8));
        assert_eq!(summary.median, dec!(30.4));
        assert_eq!(summary.max, dec!(54.8));
    }
}
