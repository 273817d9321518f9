//! Engine Parameter Engine
//!
//! Pure arithmetic over piston geometry: displacement, radius/stroke ratio
//! and the resulting geometry class. No I/O, no state.

mod geometry;

pub use geometry::{
    classify, compute_displacement, compute_ratio, EngineClass, MEDIUM_STROKE_MIN, OVERSQUARE_MIN,
};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Input tuple for one calculation. Dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub bore: f64,
    pub stroke: f64,
    pub cylinders: u32,
}

/// Derived values for an [`EngineSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    /// Total displacement in cc, 2 decimals
    pub displacement_cc: f64,
    /// Half-bore over stroke, 3 decimals
    pub ratio: f64,
    pub class: EngineClass,
}

impl EngineSpec {
    /// Build the input tuple, rejecting non-positive dimensions up front.
    pub fn new(bore: f64, stroke: f64, cylinders: u32) -> Result<Self> {
        if !(bore.is_finite() && bore > 0.0) {
            return Err(CoreError::invalid("bore", bore));
        }
        if !(stroke.is_finite() && stroke > 0.0) {
            return Err(CoreError::invalid("stroke", stroke));
        }
        if cylinders == 0 {
            return Err(CoreError::invalid("cylinders", 0.0));
        }
        Ok(Self { bore, stroke, cylinders })
    }

    /// Run displacement, ratio and classification in sequence.
    pub fn evaluate(&self) -> Result<EngineResult> {
        let displacement_cc = compute_displacement(self.bore, self.stroke, self.cylinders)?;
        let ratio = compute_ratio(self.bore, self.stroke)?;
        let class = classify(ratio)?;
        Ok(EngineResult { displacement_cc, ratio, class })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_reference_engine() {
        let result = EngineSpec::new(80.0, 70.0, 4).unwrap().evaluate().unwrap();
        assert_eq!(result.displacement_cc, 1407.43);
        assert_eq!(result.ratio, 0.571);
        assert_eq!(result.class, EngineClass::MediumStroke);
    }

    #[test]
    fn test_new_rejects_zero_cylinders() {
        assert!(EngineSpec::new(80.0, 70.0, 0).is_err());
    }
}
