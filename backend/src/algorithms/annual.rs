//! Per-year aggregation: yearly totals with max/min markers and the
//! year-by-month breakdown table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AnalysisMode, CallRecord, MonthlySeries, MONTHS_PER_YEAR};

/// Yearly total of calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualRow {
    /// `None` for the historical aggregate row.
    pub year: Option<i32>,
    pub total_calls: u64,
    pub is_max: bool,
    pub is_min: bool,
    pub is_historical: bool,
}

impl AnnualRow {
    fn for_year(year: i32, total_calls: u64) -> Self {
        Self {
            year: Some(year),
            total_calls,
            is_max: false,
            is_min: false,
            is_historical: false,
        }
    }
}

/// Sum call records into year -> total calls.
pub fn yearly_totals<'a, I>(records: I) -> BTreeMap<i32, u64>
where
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.year).or_insert(0) += record.calls;
    }
    totals
}

/// Build annual rows ascending by year, with the historical row last.
///
/// Years missing between the first and last year appear with a zero total.
/// Every row holding the maximum total is flagged `is_max`, likewise for
/// `is_min`. Zero totals are not candidates for either flag unless every year
/// is zero, in which case all rows carry both. The historical row is never
/// flagged.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use calls_inflection::algorithms::aggregate_annual;
///
/// let totals = BTreeMap::from([(2019, 120), (2020, 300), (2021, 300)]);
/// let rows = aggregate_annual(&totals, Some(720));
/// assert_eq!(rows.len(), 4);
/// assert!(rows[0].is_min);
/// assert!(rows[1].is_max && rows[2].is_max);
/// assert!(rows[3].is_historical);
/// ```
pub fn aggregate_annual(totals: &BTreeMap<i32, u64>, historical_total: Option<u64>) -> Vec<AnnualRow> {
    let mut rows: Vec<AnnualRow> = match (totals.keys().next(), totals.keys().next_back()) {
        (Some(&first), Some(&last)) => (first..=last)
            .map(|year| AnnualRow::for_year(year, totals.get(&year).copied().unwrap_or(0)))
            .collect(),
        _ => Vec::new(),
    };

    let non_zero = rows.iter().map(|r| r.total_calls).filter(|&t| t > 0);
    let max = non_zero.clone().max();
    let min = non_zero.min();

    match (max, min) {
        (Some(max), Some(min)) => {
            for row in rows.iter_mut() {
                row.is_max = row.total_calls == max;
                row.is_min = row.total_calls == min;
            }
        }
        _ => {
            for row in rows.iter_mut() {
                row.is_max = true;
                row.is_min = true;
            }
        }
    }

    if let Some(total_calls) = historical_total {
        rows.push(AnnualRow {
            year: None,
            total_calls,
            is_max: false,
            is_min: false,
            is_historical: true,
        });
    }
    rows
}

/// One row of the year-by-month table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// `None` for the historical row.
    pub year: Option<i32>,
    pub values: [f64; MONTHS_PER_YEAR],
    /// Months holding the highest non-zero value.
    pub max_months: Vec<usize>,
    /// Months holding the lowest non-zero value.
    pub min_months: Vec<usize>,
    pub is_historical: bool,
}

impl BreakdownRow {
    fn new(year: Option<i32>, values: [f64; MONTHS_PER_YEAR]) -> Self {
        let (max_months, min_months) = match non_zero_range(&values) {
            Some((min, max)) => (months_equal_to(&values, max), months_equal_to(&values, min)),
            None => (Vec::new(), Vec::new()),
        };
        Self {
            year,
            values,
            max_months,
            min_months,
            is_historical: year.is_none(),
        }
    }

    /// Spread between the highest and lowest non-zero value.
    pub fn variation(&self) -> Option<f64> {
        non_zero_range(&self.values).map(|(min, max)| max - min)
    }
}

fn non_zero_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|&v| v > 0.0)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

fn months_equal_to(values: &[f64], target: f64) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == target)
        .map(|(i, _)| i)
        .collect()
}

/// Summary figures over the year rows of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualStatistics {
    pub years_analyzed: usize,
    /// Mean over years of (max - min) of the non-zero monthly values.
    pub average_annual_variation: f64,
    /// Month with the highest mean across years.
    pub most_active_month: Option<usize>,
}

/// Year-by-month table for one company plus its historical row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualBreakdown {
    pub mode: AnalysisMode,
    pub rows: Vec<BreakdownRow>,
}

impl AnnualBreakdown {
    /// Tabulate records by year and month.
    ///
    /// Percentages are relative to each year's own total. Only years present
    /// in `records` get a row. The historical row holds the whole-history
    /// series in the same mode.
    pub fn from_records(records: &[CallRecord], mode: AnalysisMode) -> Self {
        let mut by_year: BTreeMap<i32, [u64; MONTHS_PER_YEAR]> = BTreeMap::new();
        for record in records {
            if let Some(idx) = record.month_index() {
                by_year.entry(record.year).or_insert([0; MONTHS_PER_YEAR])[idx] += record.calls;
            }
        }

        let mut rows: Vec<BreakdownRow> = by_year
            .into_iter()
            .map(|(year, counts)| {
                BreakdownRow::new(Some(year), MonthlySeries::from_counts(counts).values(mode))
            })
            .collect();

        if !rows.is_empty() {
            let overall = MonthlySeries::from_records(records);
            rows.push(BreakdownRow::new(None, overall.values(mode)));
        }

        Self { mode, rows }
    }

    pub fn year_rows(&self) -> impl Iterator<Item = &BreakdownRow> {
        self.rows.iter().filter(|r| !r.is_historical)
    }

    pub fn statistics(&self) -> AnnualStatistics {
        let years: Vec<&BreakdownRow> = self.year_rows().collect();

        let variations: Vec<f64> = years.iter().filter_map(|r| r.variation()).collect();
        let average_annual_variation = if variations.is_empty() {
            0.0
        } else {
            variations.iter().sum::<f64>() / variations.len() as f64
        };

        let most_active_month = if years.is_empty() {
            None
        } else {
            let mut best: Option<(usize, f64)> = None;
            for month in 0..MONTHS_PER_YEAR {
                let mean = years.iter().map(|r| r.values[month]).sum::<f64>() / years.len() as f64;
                if best.map_or(true, |(_, b)| mean > b) {
                    best = Some((month, mean));
                }
            }
            best.map(|(month, _)| month)
        };

        AnnualStatistics {
            years_analyzed: years.len(),
            average_annual_variation,
            most_active_month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CompanyId;

    fn record(year: i32, month: u32, calls: u64) -> CallRecord {
        CallRecord {
            company_id: CompanyId::new(3),
            company_name: "Initech".to_string(),
            state: "NY".to_string(),
            year,
            month,
            calls,
            campaigns: 2,
            customers: calls / 2,
        }
    }

    #[test]
    fn test_ties_are_all_flagged() {
        let totals = BTreeMap::from([(2018, 50), (2019, 80), (2020, 80), (2021, 50)]);
        let rows = aggregate_annual(&totals, None);
        let max: Vec<_> = rows.iter().filter(|r| r.is_max).filter_map(|r| r.year).collect();
        let min: Vec<_> = rows.iter().filter(|r| r.is_min).filter_map(|r| r.year).collect();
        assert_eq!(max, vec![2019, 2020]);
        assert_eq!(min, vec![2018, 2021]);
    }

    #[test]
    fn test_gap_year_is_zero_and_unflagged() {
        let totals = BTreeMap::from([(2017, 40), (2019, 90)]);
        let rows = aggregate_annual(&totals, Some(130));
        assert_eq!(rows.len(), 4);
        let gap = &rows[1];
        assert_eq!(gap.year, Some(2018));
        assert_eq!(gap.total_calls, 0);
        assert!(!gap.is_max && !gap.is_min);
        assert!(rows[0].is_min);
        assert!(rows[2].is_max);

        let historical = rows.last().unwrap();
        assert!(historical.is_historical);
        assert_eq!(historical.year, None);
        assert!(!historical.is_max && !historical.is_min);
    }

    #[test]
    fn test_all_zero_years_carry_both_flags() {
        let totals = BTreeMap::from([(2020, 0), (2021, 0)]);
        let rows = aggregate_annual(&totals, None);
        assert!(rows.iter().all(|r| r.is_max && r.is_min));
    }

    #[test]
    fn test_single_year_is_max_and_min() {
        let rows = aggregate_annual(&BTreeMap::from([(2022, 10)]), None);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_max && rows[0].is_min);
    }

    #[test]
    fn test_empty_totals_keep_only_historical_row() {
        assert!(aggregate_annual(&BTreeMap::new(), None).is_empty());
        let rows = aggregate_annual(&BTreeMap::new(), Some(0));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_historical);
    }

    #[test]
    fn test_yearly_totals_sum_months() {
        let records = vec![record(2020, 1, 5), record(2020, 2, 7), record(2021, 1, 1)];
        let totals = yearly_totals(&records);
        assert_eq!(totals.get(&2020), Some(&12));
        assert_eq!(totals.get(&2021), Some(&1));
    }

    #[test]
    fn test_breakdown_percentages_per_year() {
        let records = vec![
            record(2020, 1, 25),
            record(2020, 2, 75),
            record(2021, 1, 10),
            record(2021, 3, 30),
        ];
        let breakdown = AnnualBreakdown::from_records(&records, AnalysisMode::Percentage);
        assert_eq!(breakdown.rows.len(), 3);

        let first = &breakdown.rows[0];
        assert_eq!(first.year, Some(2020));
        assert_eq!(first.values[0], 25.0);
        assert_eq!(first.values[1], 75.0);
        assert_eq!(first.max_months, vec![1]);
        assert_eq!(first.min_months, vec![0]);

        let historical = breakdown.rows.last().unwrap();
        assert!(historical.is_historical);
        assert_eq!(historical.values[0], 25.0);
    }

    #[test]
    fn test_breakdown_statistics_skip_zero_months() {
        let records = vec![
            record(2020, 1, 10),
            record(2020, 6, 40),
            record(2021, 1, 20),
            record(2021, 6, 30),
        ];
        let breakdown = AnnualBreakdown::from_records(&records, AnalysisMode::Absolute);
        let stats = breakdown.statistics();
        assert_eq!(stats.years_analyzed, 2);
        // (40 - 10 + 30 - 20) / 2
        assert_eq!(stats.average_annual_variation, 20.0);
        assert_eq!(stats.most_active_month, Some(5));
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown = AnnualBreakdown::from_records(&[], AnalysisMode::Absolute);
        assert!(breakdown.rows.is_empty());
        let stats = breakdown.statistics();
        assert_eq!(stats.years_analyzed, 0);
        assert_eq!(stats.most_active_month, None);
    }
}
