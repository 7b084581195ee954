//! Metric cards and plain-text rendering of a dashboard view

use crate::dashboard::DashboardView;
use crate::kpi::KpiSummary;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Rupees per crore
pub const CRORE: f64 = 10_000_000.0;

/// How a front end should colour a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaColor {
    /// Positive delta is good
    Normal,
    /// Positive delta is bad (e.g. loss ratio above target)
    Inverse,
}

/// Difference between a metric and its business target, in percentage points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub points: f64,
    pub text: String,
    pub color: DeltaColor,
}

impl MetricDelta {
    fn vs_target(rate: f64, target: f64, color: DeltaColor) -> Self {
        let points = (rate - target) * 100.0;
        Self {
            points,
            text: format!("{:.1}% vs target", points),
            color,
        }
    }
}

/// A labelled metric ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<MetricDelta>,
}

impl MetricCard {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            delta: None,
        }
    }

    fn with_delta(mut self, delta: MetricDelta) -> Self {
        self.delta = Some(delta);
        self
    }
}

/// Group the integer part of `value` in thousands: 1234567.8 -> "1,234,568" at 0 decimals
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Rupee amount with thousands separators and no decimals
pub fn format_inr(amount: f64) -> String {
    format!("₹{}", format_thousands(amount, 0))
}

/// Rupee amount in crores to two decimals
pub fn format_crore(amount: f64) -> String {
    format!("₹{:.2} Cr", amount / CRORE)
}

/// Fraction as a percentage
pub fn format_pct(rate: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, rate * 100.0)
}

/// The four headline cards: policies, GWP, loss ratio and renewal rate
pub fn headline_cards(kpis: &KpiSummary, loss_ratio_target: f64, renewal_rate_target: f64) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Total Policies", format_thousands(kpis.total_policies as f64, 0)),
        MetricCard::new("GWP (Gross Written Premium)", format_crore(kpis.gwp)),
        MetricCard::new("Loss Ratio", format_pct(kpis.loss_ratio, 1)).with_delta(
            MetricDelta::vs_target(kpis.loss_ratio, loss_ratio_target, DeltaColor::Inverse),
        ),
        MetricCard::new("Renewal Rate", format_pct(kpis.renewal_rate, 1)).with_delta(
            MetricDelta::vs_target(kpis.renewal_rate, renewal_rate_target, DeltaColor::Normal),
        ),
    ]
}

pub fn additional_cards(kpis: &KpiSummary) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Total Claims", format_crore(kpis.total_claims)),
        MetricCard::new("Avg Premium", format_inr(kpis.avg_premium)),
        MetricCard::new("Fraud Rate", format_pct(kpis.fraud_rate, 2)),
        MetricCard::new("Churn Rate", format_pct(kpis.churn_rate, 1)),
        MetricCard::new("Claims Frequency", format!("{:.3}", kpis.claims_frequency)),
        MetricCard::new("Avg Claims Amount", format_inr(kpis.avg_claims_amount)),
    ]
}

fn write_cards<W: Write>(out: &mut W, cards: &[MetricCard]) -> fmt::Result {
    for card in cards {
        match &card.delta {
            Some(delta) => writeln!(out, "  {:<30} {:>14}  ({})", card.label, card.value, delta.text)?,
            None => writeln!(out, "  {:<30} {:>14}", card.label, card.value)?,
        }
    }
    Ok(())
}

/// Render a view as a console report
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    write_report(&mut out, view).expect("writing to a String cannot fail");
    out
}

fn write_report<W: Write>(out: &mut W, view: &DashboardView) -> fmt::Result {
    writeln!(out, "Motor Insurance Analytics Dashboard")?;
    writeln!(out, "===================================")?;
    writeln!(
        out,
        "Policies in view: {} of {}  (generated {})",
        view.filtered_records,
        view.total_records,
        view.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "LOB filter:      {}", selection_label(&view.filter.lobs))?;
    writeln!(out, "Location filter: {}", selection_label(&view.filter.location_types))?;

    writeln!(out, "\nKey Metrics:")?;
    write_cards(out, &view.headline_metrics)?;

    writeln!(out, "\nAdditional Metrics:")?;
    write_cards(out, &view.additional_metrics)?;

    writeln!(out, "\nLOB-wise Performance:")?;
    writeln!(
        out,
        "  {:<20} {:>9} {:>16} {:>13} {:>16} {:>9} {:>9} {:>10}",
        "LOB", "Policies", "Total Premium", "Avg Premium", "Total Claims", "Renew %", "Fraud %", "Loss Ratio"
    )?;
    writeln!(out, "  {}", "-".repeat(109))?;
    for row in &view.lob_table {
        writeln!(
            out,
            "  {:<20} {:>9} {:>16.2} {:>13.2} {:>16.2} {:>9.1} {:>9.2} {:>10.4}",
            row.lob,
            row.policies,
            row.total_premium,
            row.avg_premium,
            row.total_claims,
            row.renewal_rate_pct,
            row.fraud_rate_pct,
            row.loss_ratio,
        )?;
    }
    if view.lob_table.is_empty() {
        writeln!(out, "  (no policies match the current filters)")?;
    }

    writeln!(out, "\nPolicy Distribution by LOB:")?;
    for point in &view.charts.lob_distribution {
        writeln!(out, "  {:<20} {:>9}", point.category, point.value)?;
    }

    writeln!(out, "\nPremium Distribution:")?;
    for bin in &view.charts.premium_distribution {
        writeln!(
            out,
            "  {:>14} - {:<14} {:>6}",
            format_inr(bin.lower),
            format_inr(bin.upper),
            bin.count
        )?;
    }

    writeln!(out, "\nRenewal Rate by LOB:")?;
    for point in &view.charts.renewal_rate_by_lob {
        writeln!(out, "  {:<20} {:>8}", point.category, format_pct(point.value, 1))?;
    }

    writeln!(out, "\nLoss Ratio by LOB:")?;
    for point in &view.charts.loss_ratio_by_lob {
        writeln!(out, "  {:<20} {:>8}", point.category, format_pct(point.value, 1))?;
    }

    Ok(())
}

fn selection_label(selection: &[String]) -> String {
    if selection.is_empty() {
        "all".to_string()
    } else {
        selection.join(", ")
    }
}
