//! Built-in demo dataset. All patients are fictional.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};

use super::Dataset;
use crate::models::{
    Demographics, EvidenceItem, EvidenceKind, LabResult, PatientRecord, VitalSigns,
};

const PERCENT: &str = "%";
const EGFR_UNIT: &str = "mL/min/1.73m2";

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| anyhow!("invalid seed timestamp {year}-{month}-{day} {hour}:{minute}"))
}

fn lab(name: &str, value: f64, unit: &str, collected_at: NaiveDateTime) -> LabResult {
    LabResult {
        name: name.to_string(),
        value,
        unit: unit.to_string(),
        collected_at,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn dataset() -> Result<Dataset> {
    let patients = vec![
        PatientRecord {
            patient_id: "12345".into(),
            demographics: Demographics {
                name: "Jordan Matthews".into(),
                age: 62,
                gender: "female".into(),
                mrn: "12345".into(),
            },
            problems: strings(&["Type 2 diabetes mellitus", "CKD stage 3", "Hypertension"]),
            medications: strings(&["Metformin 1000 mg BID", "Lisinopril 20 mg daily"]),
            vitals: vec![
                VitalSigns {
                    systolic: 134,
                    diastolic: 84,
                    heart_rate: 76,
                    weight_kg: 83.9,
                    updated_at: at(2024, 6, 5, 8, 50)?,
                },
                VitalSigns {
                    systolic: 128,
                    diastolic: 78,
                    heart_rate: 72,
                    weight_kg: 82.5,
                    updated_at: at(2024, 9, 12, 9, 45)?,
                },
            ],
        },
        PatientRecord {
            patient_id: "12873".into(),
            demographics: Demographics {
                name: "Avery Patel".into(),
                age: 58,
                gender: "female".into(),
                mrn: "12873".into(),
            },
            problems: strings(&[
                "Type 2 diabetes mellitus",
                "Chronic kidney disease stage 3",
                "Hypertension",
            ]),
            medications: strings(&["Metformin 1000 mg BID", "Losartan 50 mg daily"]),
            vitals: vec![VitalSigns {
                systolic: 132,
                diastolic: 82,
                heart_rate: 76,
                weight_kg: 79.8,
                updated_at: at(2025, 9, 12, 9, 15)?,
            }],
        },
        PatientRecord {
            patient_id: "13002".into(),
            demographics: Demographics {
                name: "Riley Chen".into(),
                age: 45,
                gender: "male".into(),
                mrn: "13002".into(),
            },
            problems: strings(&["Mild persistent asthma"]),
            medications: strings(&["Albuterol inhaler PRN", "Fluticasone 110 mcg BID"]),
            vitals: vec![VitalSigns {
                systolic: 118,
                diastolic: 74,
                heart_rate: 68,
                weight_kg: 77.1,
                updated_at: at(2025, 8, 20, 14, 5)?,
            }],
        },
    ];

    let mut labs = HashMap::new();
    labs.insert(
        "12345".to_string(),
        vec![
            lab("HbA1c", 7.4, PERCENT, at(2024, 9, 10, 8, 30)?),
            lab("HbA1c", 7.8, PERCENT, at(2024, 6, 5, 8, 30)?),
            lab("eGFR", 54.0, EGFR_UNIT, at(2024, 9, 10, 8, 35)?),
            lab("eGFR", 58.0, EGFR_UNIT, at(2024, 3, 15, 8, 35)?),
            lab("LDL", 82.0, "mg/dL", at(2024, 9, 1, 8, 0)?),
        ],
    );
    labs.insert(
        "12873".to_string(),
        vec![
            lab("HbA1c", 8.2, PERCENT, at(2025, 9, 5, 8, 0)?),
            lab("HbA1c", 8.6, PERCENT, at(2025, 6, 2, 8, 10)?),
            lab("HbA1c", 8.9, PERCENT, at(2025, 3, 3, 8, 5)?),
            lab("eGFR", 44.0, EGFR_UNIT, at(2025, 9, 12, 7, 55)?),
            lab("eGFR", 46.0, EGFR_UNIT, at(2025, 6, 9, 7, 50)?),
            lab("eGFR", 48.0, EGFR_UNIT, at(2025, 3, 10, 7, 45)?),
        ],
    );

    Ok(Dataset {
        patients,
        labs,
        evidence: evidence_catalogue(),
    })
}

fn item(
    id: &str,
    kind: EvidenceKind,
    title: &str,
    summary: &str,
    keywords: &[&str],
    distance_km: Option<f64>,
) -> EvidenceItem {
    EvidenceItem {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        summary: summary.to_string(),
        keywords: strings(keywords),
        distance_km,
    }
}

fn evidence_catalogue() -> Vec<EvidenceItem> {
    vec![
        item(
            "ADA-2024-DM2",
            EvidenceKind::Guideline,
            "ADA Standards of Care in Diabetes 2024",
            "Glycemic targets, pharmacologic therapy and comorbidity management in type 2 diabetes",
            &["diabetes", "a1c", "metformin", "glycemic"],
            None,
        ),
        item(
            "KDIGO-2022-DKD",
            EvidenceKind::Guideline,
            "KDIGO Guideline for Diabetes Management in Chronic Kidney Disease",
            "Renal protection and glucose lowering for patients with diabetes and CKD",
            &["ckd", "kidney", "diabetes", "egfr"],
            None,
        ),
        item(
            "NCT01234567",
            EvidenceKind::Rct,
            "SGLT2 inhibition and renal outcomes in type 2 diabetes",
            "Randomized trial of SGLT2 inhibitors on eGFR decline in diabetic kidney disease",
            &["diabetes", "ckd", "kidney", "sglt2"],
            None,
        ),
        item(
            "NCT07654321",
            EvidenceKind::Rct,
            "Intensive blood pressure control in diabetic kidney disease",
            "Randomized comparison of blood pressure targets in hypertension with diabetes",
            &["hypertension", "ckd", "diabetes"],
            None,
        ),
        item(
            "NCT05566789",
            EvidenceKind::Trial,
            "Renal Outcomes in Diabetes",
            "Adults 40-75 with type 2 diabetes and eGFR 45-60",
            &["diabetes", "ckd", "kidney", "egfr"],
            Some(12.4),
        ),
        item(
            "NCT08899881",
            EvidenceKind::Trial,
            "Cardiometabolic Risk Reduction Study",
            "Type 2 diabetes with uncontrolled A1c > 7 despite therapy",
            &["diabetes", "a1c", "cardiovascular"],
            Some(48.0),
        ),
    ]
}
