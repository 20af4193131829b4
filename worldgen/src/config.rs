//! Generation parameters.

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;
use crate::geometry::limits::MIN_BUILDING_LENGTH;

/// Knobs read by every generation pass. Field names follow the persisted
/// camelCase form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldParams {
    pub road_width: f64,
    /// Angular steps per end cap of road envelopes.
    pub road_roundness: u32,
    pub building_width: f64,
    pub building_min_length: f64,
    pub spacing: f64,
    pub tree_size: f64,
}

impl Default for WorldParams {
    fn default() -> Self {
        WorldParams {
            road_width: 100.0,
            road_roundness: 10,
            building_width: 150.0,
            building_min_length: 150.0,
            spacing: 50.0,
            tree_size: 160.0,
        }
    }
}

impl WorldParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("roadWidth", self.road_width),
            ("buildingWidth", self.building_width),
            ("buildingMinLength", self.building_min_length),
            ("treeSize", self.tree_size),
        ];
        for (name, v) in positive {
            if !v.is_finite() {
                return Err(ParamsError::NonFinite(name));
            }
            if v <= 0.0 {
                return Err(ParamsError::NotPositive { name, got: v });
            }
        }
        if self.building_min_length < MIN_BUILDING_LENGTH {
            return Err(ParamsError::TooSmall {
                name: "buildingMinLength",
                got: self.building_min_length,
                min: MIN_BUILDING_LENGTH,
            });
        }
        if !self.spacing.is_finite() {
            return Err(ParamsError::NonFinite("spacing"));
        }
        if self.spacing < 0.0 {
            return Err(ParamsError::Negative { name: "spacing", got: self.spacing });
        }
        Ok(())
    }

    /// Width of the corridor whose boundary hosts building supports.
    pub fn building_guide_width(&self) -> f64 {
        self.road_width + self.building_width + self.spacing * 2.0
    }
}
