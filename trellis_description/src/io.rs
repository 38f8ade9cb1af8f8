// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::path::Path;

use crate::data::LayoutDescription;
use crate::error::{DescriptionError, Result};

/// Parse a description and check its version.
pub fn from_json(json: &str) -> Result<LayoutDescription> {
    let description: LayoutDescription = serde_json::from_str(json)?;
    check_version(&description.version)?;
    Ok(description)
}

/// Pretty-printed JSON for a description.
pub fn to_json(description: &LayoutDescription) -> Result<String> {
    Ok(serde_json::to_string_pretty(description)?)
}

/// Read and parse a description file.
pub fn load(path: impl AsRef<Path>) -> Result<LayoutDescription> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let description = from_json(&json)?;
    log::debug!(
        "loaded layout {:?} from {}",
        description.name,
        path.display()
    );
    Ok(description)
}

/// Write a description file, replacing any existing one.
pub fn save(path: impl AsRef<Path>, description: &LayoutDescription) -> Result<()> {
    fs::write(path, to_json(description)?)?;
    Ok(())
}

/// Accept any `1.x` version.
pub(crate) fn check_version(version: &str) -> Result<()> {
    let major = version.split('.').next().unwrap_or_default().trim();
    if major == "1" {
        Ok(())
    } else {
        Err(DescriptionError::UnsupportedVersion(version.to_owned()))
    }
}
