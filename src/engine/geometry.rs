//! Displacement and bore/stroke geometry.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use crate::error::{CoreError, Result};

/// Lower bound (inclusive) of the medium-stroke band.
pub const MEDIUM_STROKE_MIN: f64 = 0.5;
/// Lower bound (inclusive) of the oversquare band.
pub const OVERSQUARE_MIN: f64 = 0.8;

/// Engine geometry bands derived from the radius/stroke ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineClass {
    /// ratio < 0.5
    LongStroke,
    /// 0.5 <= ratio < 0.8
    MediumStroke,
    /// ratio >= 0.8
    ShortStroke,
}

impl EngineClass {
    pub fn label(&self) -> &'static str {
        match self {
            EngineClass::LongStroke => "undersquare/long-stroke",
            EngineClass::MediumStroke => "medium-stroke",
            EngineClass::ShortStroke => "oversquare/short-stroke",
        }
    }

    /// Label as shown on the Portuguese calculator page.
    pub fn label_pt(&self) -> &'static str {
        match self {
            EngineClass::LongStroke => "Motor Supercurso (Stroke)",
            EngineClass::MediumStroke => "Motor Curso Médio",
            EngineClass::ShortStroke => "Motor Curto (Oversquare)",
        }
    }
}

impl std::fmt::Display for EngineClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::invalid(name, value))
    }
}

/// Total swept volume in cubic centimetres, rounded to 2 decimals.
///
/// `bore` and `stroke` are in millimetres. No upper bound is enforced here.
pub fn compute_displacement(bore: f64, stroke: f64, cylinders: u32) -> Result<f64> {
    let bore = require_positive("bore", bore)?;
    let stroke = require_positive("stroke", stroke)?;
    if cylinders == 0 {
        return Err(CoreError::invalid("cylinders", 0.0));
    }

    let radius = bore / 2.0;
    let cylinder_volume = PI * radius.powi(2) * stroke;
    let total_cc = cylinder_volume * f64::from(cylinders) / 1000.0;
    if !total_cc.is_finite() {
        return Err(CoreError::invalid("displacement", total_cc));
    }
    let rounded = round_to(total_cc, 2);

    debug!(bore, stroke, cylinders, displacement_cc = rounded, "computed displacement");
    Ok(rounded)
}

/// Half-bore divided by stroke, rounded to 3 decimals.
pub fn compute_ratio(bore: f64, stroke: f64) -> Result<f64> {
    let bore = require_positive("bore", bore)?;
    let stroke = require_positive("stroke", stroke)?;
    let ratio = (bore / 2.0) / stroke;
    if !ratio.is_finite() {
        return Err(CoreError::invalid("ratio", ratio));
    }
    Ok(round_to(ratio, 3))
}

/// Maps a ratio onto its geometry band. Bands are half-open on the right.
pub fn classify(ratio: f64) -> Result<EngineClass> {
    if !ratio.is_finite() {
        return Err(CoreError::invalid("ratio", ratio));
    }

    let class = if ratio < MEDIUM_STROKE_MIN {
        EngineClass::LongStroke
    } else if ratio < OVERSQUARE_MIN {
        EngineClass::MediumStroke
    } else {
        EngineClass::ShortStroke
    };
    Ok(class)
}
