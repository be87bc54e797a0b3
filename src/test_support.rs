//! Synthetic catalogs shared by unit tests

use crate::catalog::{
    BuildChart, BuildChartRow, CarrierGuideline, Catalog, Condition, ConditionActionMap,
    ConditionCategory, ConditionCode, ConditionTaxonomy, MedicalPolicy, ProductLine,
    TierCeilings, TierLabels, TobaccoPolicy,
};

/// Permissive IUL guideline: ages 18-85, standard up to BMI 60, every modifier ok
pub(crate) fn guideline(id: u32, name: &str) -> CarrierGuideline {
    CarrierGuideline {
        id,
        name: name.to_string(),
        product_line: ProductLine::Iul,
        min_age: 18,
        max_age: 85,
        bmi_min: None,
        bmi_ceilings: TierCeilings {
            standard: Some(60.0),
            ..TierCeilings::default()
        },
        tobacco_policy: TobaccoPolicy::StandardOk,
        diabetes_policy: MedicalPolicy::Ok,
        hypertension_policy: MedicalPolicy::Ok,
        cancer_lookback_years: 10,
        dui_lookback_years_standard: 10,
        dui_lookback_years_table: 5,
        guaranteed_issue: false,
        build_chart: None,
        condition_actions: ConditionActionMap::new(),
        tier_labels: TierLabels::default(),
        notes: String::new(),
    }
}

/// Five-column row: 188/208/227/261/296 at 70 inches
pub(crate) fn chart_row(height_inches: u32, standard: f64) -> BuildChartRow {
    BuildChartRow {
        height_inches,
        ceilings: TierCeilings {
            standard: Some(standard),
            table2: Some(standard + 20.0),
            table4: Some(standard + 39.0),
            table6: Some(standard + 73.0),
            table8: Some(standard + 108.0),
            extended: None,
        },
    }
}

/// Chart with rows at 68, 70 and 72 inches
pub(crate) fn sample_chart() -> BuildChart {
    let rows = vec![chart_row(68, 177.0), chart_row(70, 188.0), chart_row(72, 199.0)];
    BuildChart::new(0, rows).expect("sample chart is invalid")
}

pub(crate) fn taxonomy() -> ConditionTaxonomy {
    let conditions = [
        ("hiv", "HIV/AIDS", ConditionCategory::Knockout),
        ("dialysis", "Current dialysis", ConditionCategory::Knockout),
        ("copd", "COPD", ConditionCategory::Declinable),
        ("sleep_apnea", "Sleep apnea", ConditionCategory::Declinable),
        ("afib", "Atrial fibrillation", ConditionCategory::Declinable),
    ]
    .into_iter()
    .map(|(code, name, category)| Condition {
        code: ConditionCode::new(code),
        name: name.to_string(),
        category,
    })
    .collect();

    ConditionTaxonomy::new(conditions).expect("sample taxonomy is invalid")
}

pub(crate) fn catalog(carriers: Vec<CarrierGuideline>) -> Catalog {
    Catalog::new(taxonomy(), carriers).expect("sample catalog is invalid")
}
