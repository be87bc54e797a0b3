//! Height/weight build charts
//!
//! A build chart lists, for each height in inches, the heaviest weight in
//! pounds each tier accepts. Charts are finer-grained than BMI brackets and
//! take precedence over them when the applicant's height and weight are known.

use super::guideline::TierCeilings;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// One chart row: weight ceilings for a single height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildChartRow {
    pub height_inches: u32,
    pub ceilings: TierCeilings,
}

/// Build chart with rows sorted by ascending height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildChart {
    rows: Vec<BuildChartRow>,
}

impl BuildChart {
    /// Build a chart from rows in any order, validating each row
    pub fn new(carrier_id: u32, mut rows: Vec<BuildChartRow>) -> Result<Self, CatalogError> {
        rows.sort_by_key(|row| row.height_inches);

        for pair in rows.windows(2) {
            if pair[0].height_inches == pair[1].height_inches {
                return Err(CatalogError::DuplicateBuildHeight {
                    carrier_id,
                    height_inches: pair[0].height_inches,
                });
            }
        }

        for row in &rows {
            if row.ceilings.is_empty() {
                return Err(CatalogError::EmptyBuildRow {
                    carrier_id,
                    height_inches: row.height_inches,
                });
            }
            let context = format!("build chart at {} in", row.height_inches);
            row.ceilings.validate(carrier_id, &context)?;
        }

        Ok(Self { rows })
    }

    /// Row whose height is nearest the applicant's
    ///
    /// Equidistant rows resolve to the shorter one, whose ceilings are lower
    /// and therefore stricter.
    pub fn nearest_row(&self, height_inches: f64) -> Option<&BuildChartRow> {
        self.rows.iter().min_by(|a, b| {
            let da = (a.height_inches as f64 - height_inches).abs();
            let db = (b.height_inches as f64 - height_inches).abs();
            da.total_cmp(&db)
        })
    }

    pub fn rows(&self) -> &[BuildChartRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(height_inches: u32, standard: f64, table2: f64) -> BuildChartRow {
        BuildChartRow {
            height_inches,
            ceilings: TierCeilings {
                standard: Some(standard),
                table2: Some(table2),
                ..TierCeilings::default()
            },
        }
    }

    #[test]
    fn test_rows_sorted_by_height() {
        let chart = BuildChart::new(1, vec![row(72, 199.0, 220.0), row(70, 188.0, 208.0)]).unwrap();
        let heights: Vec<u32> = chart.rows().iter().map(|r| r.height_inches).collect();
        assert_eq!(heights, vec![70, 72]);
    }

    #[test]
    fn test_nearest_row_exact_and_closest() {
        let chart = BuildChart::new(1, vec![row(68, 177.0, 196.0), row(70, 188.0, 208.0)]).unwrap();
        assert_eq!(chart.nearest_row(70.0).unwrap().height_inches, 70);
        assert_eq!(chart.nearest_row(69.6).unwrap().height_inches, 70);
        assert_eq!(chart.nearest_row(60.0).unwrap().height_inches, 68);
        assert_eq!(chart.nearest_row(90.0).unwrap().height_inches, 70);
    }

    #[test]
    fn test_nearest_row_tie_prefers_shorter_row() {
        let chart = BuildChart::new(1, vec![row(71, 194.0, 214.0), row(69, 183.0, 202.0)]).unwrap();
        assert_eq!(chart.nearest_row(70.0).unwrap().height_inches, 69);
    }

    #[test]
    fn test_duplicate_height_rejected() {
        let result = BuildChart::new(9, vec![row(70, 188.0, 208.0), row(70, 190.0, 210.0)]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateBuildHeight { carrier_id: 9, height_inches: 70 })
        ));
    }

    #[test]
    fn test_non_monotonic_row_rejected() {
        let result = BuildChart::new(3, vec![row(70, 210.0, 200.0)]);
        assert!(matches!(result, Err(CatalogError::NonMonotonicCeilings { carrier_id: 3, .. })));
    }

    #[test]
    fn test_empty_row_rejected() {
        let empty = BuildChartRow {
            height_inches: 70,
            ceilings: TierCeilings::default(),
        };
        assert!(matches!(
            BuildChart::new(5, vec![empty]),
            Err(CatalogError::EmptyBuildRow { carrier_id: 5, height_inches: 70 })
        ));
    }
}
