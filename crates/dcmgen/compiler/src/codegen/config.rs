// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Configuration for script generation

use serde::{Deserialize, Serialize};

/// Default folder, inside each subject folder, holding `SPM.mat` and the VOI files
pub const DEFAULT_DCM_FOLDER: &str = "DCM";

/// First microtime bin kept from the SPM input time series
///
/// SPM input regressors carry 32 extra microtime samples ahead of the first
/// scan, which DCM does not expect.
pub const DEFAULT_MICROTIME_ONSET: usize = 33;

/// DCM estimation flags written to `DCM.options`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcmOptions {
    /// Two-state model
    pub two_state: bool,
    /// Stochastic DCM
    pub stochastic: bool,
    /// Mean-centre the inputs
    pub centre: bool,
    /// Suppress SPM figures during estimation
    pub nograph: bool,
}

impl Default for DcmOptions {
    fn default() -> Self {
        Self {
            two_state: false,
            stochastic: false,
            centre: false,
            nograph: true,
        }
    }
}

/// Configuration for script generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Directory containing the subject folders
    pub base_dir: String,

    /// Folder inside each subject folder with `SPM.mat`, the VOI files and the generated DCM
    pub dcm_folder: String,

    /// First microtime bin of the input time series (1-based)
    pub microtime_onset: usize,

    /// Estimation flags
    pub options: DcmOptions,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            dcm_folder: DEFAULT_DCM_FOLDER.to_string(),
            microtime_onset: DEFAULT_MICROTIME_ONSET,
            options: DcmOptions::default(),
        }
    }
}

impl GenerationConfig {
    /// Create a configuration for the given base and DCM folders
    pub fn new(base_dir: impl Into<String>, dcm_folder: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            dcm_folder: dcm_folder.into(),
            ..Default::default()
        }
    }

    /// Set the first kept microtime bin
    pub fn with_microtime_onset(mut self, onset: usize) -> Self {
        self.microtime_onset = onset;
        self
    }

    /// Set the estimation flags
    pub fn with_options(mut self, options: DcmOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.microtime_onset == 0 {
            return Err("Microtime onset is 1-based and must be at least 1".to_string());
        }

        if self.dcm_folder.trim().is_empty() {
            return Err("DCM folder must not be empty".to_string());
        }

        Ok(())
    }
}
