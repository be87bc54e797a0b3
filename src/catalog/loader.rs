//! CSV-based catalog loader
//!
//! Loads the condition taxonomy and carrier guidelines from CSV files in data/catalog/

use super::build_chart::{BuildChart, BuildChartRow};
use super::conditions::{Condition, ConditionAction, ConditionActionMap, ConditionCategory, ConditionCode, ConditionTaxonomy};
use super::guideline::{CarrierGuideline, MedicalPolicy, ProductLine, TierCeilings, TierLabels, TobaccoPolicy};
use super::Catalog;
use crate::error::CatalogError;
use log::info;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to catalog directory
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog";

pub const CONDITIONS_FILE: &str = "conditions.csv";
pub const CARRIERS_FILE: &str = "carriers.csv";
pub const BUILD_CHARTS_FILE: &str = "build_charts.csv";
pub const CARRIER_CONDITIONS_FILE: &str = "carrier_conditions.csv";

#[derive(Debug, serde::Deserialize)]
struct ConditionRow {
    code: String,
    name: String,
    category: ConditionCategory,
}

#[derive(Debug, serde::Deserialize)]
struct CarrierRow {
    id: u32,
    name: String,
    product_line: ProductLine,
    min_age: u32,
    max_age: u32,
    bmi_min: Option<f64>,
    bmi_standard: Option<f64>,
    bmi_table2: Option<f64>,
    bmi_table4: Option<f64>,
    bmi_table6: Option<f64>,
    bmi_table8: Option<f64>,
    tobacco_policy: TobaccoPolicy,
    diabetes_policy: MedicalPolicy,
    hypertension_policy: MedicalPolicy,
    cancer_lookback_years: u32,
    dui_lookback_years_standard: u32,
    dui_lookback_years_table: u32,
    guaranteed_issue: bool,
    #[serde(default)]
    tier_labels: String,
    #[serde(default)]
    notes: String,
}

impl CarrierRow {
    fn into_guideline(self) -> Result<CarrierGuideline, CatalogError> {
        let tier_labels = TierLabels::parse(self.id, &self.tier_labels)?;

        Ok(CarrierGuideline {
            id: self.id,
            name: self.name.trim().to_string(),
            product_line: self.product_line,
            min_age: self.min_age,
            max_age: self.max_age,
            bmi_min: self.bmi_min,
            bmi_ceilings: TierCeilings {
                standard: self.bmi_standard,
                table2: self.bmi_table2,
                table4: self.bmi_table4,
                table6: self.bmi_table6,
                table8: self.bmi_table8,
                extended: None,
            },
            tobacco_policy: self.tobacco_policy,
            diabetes_policy: self.diabetes_policy,
            hypertension_policy: self.hypertension_policy,
            cancer_lookback_years: self.cancer_lookback_years,
            dui_lookback_years_standard: self.dui_lookback_years_standard,
            dui_lookback_years_table: self.dui_lookback_years_table,
            guaranteed_issue: self.guaranteed_issue,
            build_chart: None,
            condition_actions: ConditionActionMap::new(),
            tier_labels,
            notes: self.notes,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct BuildChartCsvRow {
    carrier_id: u32,
    height_inches: u32,
    standard: Option<f64>,
    table2: Option<f64>,
    table4: Option<f64>,
    table6: Option<f64>,
    table8: Option<f64>,
    extended: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct ConditionActionRow {
    carrier_id: u32,
    condition_code: String,
    action: ConditionAction,
}

fn read_rows<T, R>(file: &'static str, reader: R) -> Result<Vec<T>, CatalogError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::Reader::from_reader(reader);
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| CatalogError::Csv { file, source })
}

/// Load the condition taxonomy
pub fn read_conditions<R: Read>(reader: R) -> Result<Vec<Condition>, CatalogError> {
    let rows: Vec<ConditionRow> = read_rows(CONDITIONS_FILE, reader)?;
    Ok(rows
        .into_iter()
        .map(|row| Condition {
            code: ConditionCode::new(row.code),
            name: row.name,
            category: row.category,
        })
        .collect())
}

/// Load carrier guidelines without build charts or condition actions
pub fn read_carriers<R: Read>(reader: R) -> Result<Vec<CarrierGuideline>, CatalogError> {
    let rows: Vec<CarrierRow> = read_rows(CARRIERS_FILE, reader)?;
    rows.into_iter().map(CarrierRow::into_guideline).collect()
}

/// Load build chart rows keyed by carrier id
pub fn read_build_charts<R: Read>(reader: R) -> Result<Vec<(u32, BuildChartRow)>, CatalogError> {
    let rows: Vec<BuildChartCsvRow> = read_rows(BUILD_CHARTS_FILE, reader)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.carrier_id,
                BuildChartRow {
                    height_inches: row.height_inches,
                    ceilings: TierCeilings {
                        standard: row.standard,
                        table2: row.table2,
                        table4: row.table4,
                        table6: row.table6,
                        table8: row.table8,
                        extended: row.extended,
                    },
                },
            )
        })
        .collect())
}

/// Load per-carrier condition actions
pub fn read_condition_actions<R: Read>(
    reader: R,
) -> Result<Vec<(u32, ConditionCode, ConditionAction)>, CatalogError> {
    let rows: Vec<ConditionActionRow> = read_rows(CARRIER_CONDITIONS_FILE, reader)?;
    Ok(rows
        .into_iter()
        .map(|row| (row.carrier_id, ConditionCode::new(row.condition_code), row.action))
        .collect())
}

/// Attach build charts and condition actions to their carriers and validate the result
pub fn assemble_catalog(
    conditions: Vec<Condition>,
    mut carriers: Vec<CarrierGuideline>,
    build_rows: Vec<(u32, BuildChartRow)>,
    actions: Vec<(u32, ConditionCode, ConditionAction)>,
) -> Result<Catalog, CatalogError> {
    let taxonomy = ConditionTaxonomy::new(conditions)?;

    let mut rows_by_carrier: BTreeMap<u32, Vec<BuildChartRow>> = BTreeMap::new();
    for (carrier_id, row) in build_rows {
        rows_by_carrier.entry(carrier_id).or_default().push(row);
    }

    for (carrier_id, rows) in rows_by_carrier {
        let carrier = carriers
            .iter_mut()
            .find(|c| c.id == carrier_id)
            .ok_or(CatalogError::UnknownCarrier {
                file: BUILD_CHARTS_FILE,
                carrier_id,
            })?;
        carrier.build_chart = Some(BuildChart::new(carrier_id, rows)?);
    }

    for (carrier_id, code, action) in actions {
        let carrier = carriers
            .iter_mut()
            .find(|c| c.id == carrier_id)
            .ok_or(CatalogError::UnknownCarrier {
                file: CARRIER_CONDITIONS_FILE,
                carrier_id,
            })?;
        if carrier.condition_actions.insert(code.clone(), action).is_some() {
            return Err(CatalogError::DuplicateConditionAction {
                carrier_id,
                code: code.to_string(),
            });
        }
    }

    Catalog::new(taxonomy, carriers)
}

/// Load a catalog from four in-memory sources
pub fn load_catalog_from_readers<A, B, C, D>(
    conditions: A,
    carriers: B,
    build_charts: C,
    carrier_conditions: D,
) -> Result<Catalog, CatalogError>
where
    A: Read,
    B: Read,
    C: Read,
    D: Read,
{
    assemble_catalog(
        read_conditions(conditions)?,
        read_carriers(carriers)?,
        read_build_charts(build_charts)?,
        read_condition_actions(carrier_conditions)?,
    )
}

fn open(dir: &Path, file: &str) -> Result<File, CatalogError> {
    let path = dir.join(file);
    File::open(&path).map_err(|source| CatalogError::Io { path, source })
}

/// Load a catalog from a directory holding the four catalog files
pub fn load_catalog(dir: &Path) -> Result<Catalog, CatalogError> {
    let catalog = load_catalog_from_readers(
        open(dir, CONDITIONS_FILE)?,
        open(dir, CARRIERS_FILE)?,
        open(dir, BUILD_CHARTS_FILE)?,
        open(dir, CARRIER_CONDITIONS_FILE)?,
    )?;

    info!(
        "Loaded catalog from {}: {} carriers, {} conditions",
        dir.display(),
        catalog.carriers().len(),
        catalog.conditions().len()
    );
    Ok(catalog)
}
