//! Data series behind the dashboard charts
//!
//! Only the numbers are produced here; drawing them is left to whatever
//! front end consumes the serialized view.

use crate::aggregate::LobSummaryRow;
use crate::config::MAX_PREMIUM_BINS;
use crate::policy::PolicyRecord;
use serde::{Deserialize, Serialize};

/// One labelled value of a categorical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub category: String,
    pub value: f64,
}

/// Equal-width histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// All chart series for one dashboard render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub lob_distribution: Vec<CategoryPoint>,
    pub premium_distribution: Vec<HistogramBin>,
    pub renewal_rate_by_lob: Vec<CategoryPoint>,
    pub loss_ratio_by_lob: Vec<CategoryPoint>,
}

impl ChartSeries {
    pub fn build(records: &[&PolicyRecord], lob_rows: &[LobSummaryRow], premium_bins: usize) -> Self {
        Self {
            lob_distribution: lob_distribution(records.iter().copied()),
            premium_distribution: premium_histogram(records.iter().copied(), premium_bins),
            renewal_rate_by_lob: renewal_rate_by_lob(lob_rows),
            loss_ratio_by_lob: loss_ratio_by_lob(lob_rows),
        }
    }
}

/// Policy count per line of business, in first-seen order
pub fn lob_distribution<'a, I>(records: I) -> Vec<CategoryPoint>
where
    I: IntoIterator<Item = &'a PolicyRecord>,
{
    let mut points: Vec<CategoryPoint> = Vec::new();
    for record in records {
        match points.iter_mut().find(|p| p.category == record.lob) {
            Some(point) => point.value += 1.0,
            None => points.push(CategoryPoint {
                category: record.lob.clone(),
                value: 1.0,
            }),
        }
    }
    points
}

/// Lower edge of bin `i`; bin `bins` is the upper edge of the last bin
fn bin_edge(min: f64, max: f64, width: f64, bins: usize, i: usize) -> f64 {
    if i >= bins {
        max
    } else {
        min + width * i as f64
    }
}

/// Bin holding `premium`, checked against the same edges the bins report
fn bin_index(premium: f64, min: f64, max: f64, width: f64, bins: usize) -> usize {
    let mut idx = (((premium - min) / width) as usize).min(bins - 1);
    while idx > 0 && premium < bin_edge(min, max, width, bins, idx) {
        idx -= 1;
    }
    while idx + 1 < bins && premium >= bin_edge(min, max, width, bins, idx + 1) {
        idx += 1;
    }
    idx
}

/// Equal-width premium histogram over [min premium, max premium]
///
/// At most [`MAX_PREMIUM_BINS`] bins are produced whatever `bins` requests.
pub fn premium_histogram<'a, I>(records: I, bins: usize) -> Vec<HistogramBin>
where
    I: IntoIterator<Item = &'a PolicyRecord>,
{
    let premiums: Vec<f64> = records.into_iter().map(|r| r.premium).collect();
    let bins = bins.min(MAX_PREMIUM_BINS);
    if premiums.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = premiums.iter().copied().fold(f64::INFINITY, f64::min);
    let max = premiums.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: premiums.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: bin_edge(min, max, width, bins, i),
            upper: bin_edge(min, max, width, bins, i + 1),
            count: 0,
        })
        .collect();

    for premium in premiums {
        // Max premium falls in the last (closed) bin
        histogram[bin_index(premium, min, max, width, bins)].count += 1;
    }

    histogram
}

pub fn renewal_rate_by_lob(rows: &[LobSummaryRow]) -> Vec<CategoryPoint> {
    rows.iter()
        .map(|row| CategoryPoint {
            category: row.lob.clone(),
            value: row.renewal_rate,
        })
        .collect()
}

pub fn loss_ratio_by_lob(rows: &[LobSummaryRow]) -> Vec<CategoryPoint> {
    rows.iter()
        .map(|row| CategoryPoint {
            category: row.lob.clone(),
            value: row.loss_ratio,
        })
        .collect()
}
