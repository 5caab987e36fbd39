//! Planner configuration, loaded from an optional TOML file.
//!
//! ```toml
//! capacity = 40
//! sub_cap = 20
//!
//! [sheet]
//! institution = "College of Engineering"
//! subtitle = "(Autonomous)"
//! title = "Attendance Sheet"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_CAPACITY;
use crate::render::SheetTemplate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatPlanConfig {
    pub capacity: usize,
    /// Per-branch limit for primary fill; half the capacity when unset.
    pub sub_cap: Option<usize>,
    pub sheet: SheetTemplate,
}

impl Default for SeatPlanConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sub_cap: None,
            sheet: SheetTemplate::default(),
        }
    }
}

impl SeatPlanConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse seatplan config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("load {:?}", path))
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn effective_sub_cap(&self) -> usize {
        self.sub_cap.unwrap_or(self.capacity / 2)
    }
}
