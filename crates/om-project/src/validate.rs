//! Case file validation logic.

use crate::schema::{CURRENT_VERSION, CaseDef, CaseFile};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id}")]
    DuplicateId { id: String },

    #[error("Empty ID for case '{name}'")]
    EmptyId { name: String },

    #[error("Case {case}: no samples in {field}")]
    EmptySamples { case: String, field: &'static str },

    #[error("Case {case}: sample counts {lengths:?} cannot be broadcast together")]
    ShapeMismatch { case: String, lengths: Vec<usize> },

    #[error("Case {case}: invalid value {field} = {value} ({reason})")]
    InvalidValue {
        case: String,
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_case_file(file: &CaseFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > CURRENT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    let mut ids = HashSet::new();
    for case in &file.cases {
        if case.id.trim().is_empty() {
            return Err(ValidationError::EmptyId {
                name: case.name.clone(),
            });
        }
        if !ids.insert(&case.id) {
            return Err(ValidationError::DuplicateId {
                id: case.id.clone(),
            });
        }
        validate_case(case)?;
    }

    Ok(())
}

fn validate_case(case: &CaseDef) -> Result<(), ValidationError> {
    let m = &case.measurement;
    let fields = [
        ("dp_pa", m.dp_pa.len()),
        ("p1_pa", m.p1_pa.len()),
        ("temperature", m.temperature.len()),
    ];
    for (field, len) in fields {
        if len == 0 {
            return Err(ValidationError::EmptySamples {
                case: case.id.clone(),
                field,
            });
        }
    }

    let lengths: Vec<usize> = fields.iter().map(|(_, len)| *len).collect();
    let longest = lengths.iter().copied().max().unwrap_or(1);
    if lengths.iter().any(|len| *len != 1 && *len != longest) {
        return Err(ValidationError::ShapeMismatch {
            case: case.id.clone(),
            lengths,
        });
    }

    let invalid = |field, value, reason| ValidationError::InvalidValue {
        case: case.id.clone(),
        field,
        value,
        reason,
    };

    for (field, value) in [
        ("geometry.d_orifice", case.geometry.d_orifice),
        ("geometry.d_pipe", case.geometry.d_pipe),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(field, value, "must be positive"));
        }
    }
    if !(0.0..=1.0).contains(&case.humidity) {
        return Err(invalid("humidity", case.humidity, "must be in [0, 1]"));
    }
    if !case.kappa.is_finite() || case.kappa <= 0.0 {
        return Err(invalid("kappa", case.kappa, "must be positive"));
    }

    Ok(())
}
