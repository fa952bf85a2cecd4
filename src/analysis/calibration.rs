//! User calibration of the nearest-reference colors.
//!
//! A calibration is a partial override: the user picks a pixel per category
//! on a displayed capture, and any category without a pick keeps its
//! default. An empty calibration means "no calibration".

use crate::analysis::classifier::{default_references, References};
use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partial Category → RGB mapping, at most one entry per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Calibration {
    #[serde(default)]
    pub entries: BTreeMap<Category, [u8; 3]>,
}

impl Calibration {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set or replace one category's reference color.
    pub fn set(&mut self, category: Category, rgb: [u8; 3]) {
        self.entries.insert(category, rgb);
    }

    /// Merge another partial calibration over this one; entries of `other`
    /// win per category, untouched categories keep their current state.
    pub fn merge(&mut self, other: &Calibration) {
        for (&cat, &rgb) in &other.entries {
            self.entries.insert(cat, rgb);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Complete reference set: calibrated entries override the defaults,
    /// absent entries fall back.
    pub fn effective_references(&self) -> References {
        let mut refs = default_references();
        for (&cat, &rgb) in &self.entries {
            refs[cat.index()] = rgb;
        }
        refs
    }
}
