use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::Resolution,
    error::{YearGridError, YearGridResult},
};

/// Model used when a request names none.
pub const DEFAULT_MODEL: &str = "iphone15promax";

/// A named device and its screen resolution.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DeviceProfile {
    pub model: String,
    pub resolution: Resolution,
}

/// Immutable model -> resolution table.
///
/// JSON form: `{ "default": "pixel8", "models": { "pixel8": [1080, 2400] } }`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceTable {
    default: String,
    models: BTreeMap<String, (u32, u32)>,
}

#[derive(serde::Deserialize)]
struct DeviceTableJson {
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    models: Option<BTreeMap<String, (u32, u32)>>,
}

impl Default for DeviceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DeviceTable {
    pub fn builtin() -> Self {
        let models = [
            ("iphone15promax", (1290, 2796)),
            ("iphone15pro", (1179, 2556)),
            ("iphone15", (1179, 2556)),
            ("iphone14", (1170, 2532)),
            ("iphone13mini", (1080, 2340)),
            ("iphonese", (750, 1334)),
            ("pixel8", (1080, 2400)),
            ("galaxys24", (1080, 2340)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            default: DEFAULT_MODEL.to_string(),
            models,
        }
    }

    /// Build and validate a table. Model names are stored lowercase.
    pub fn new(
        default: impl Into<String>,
        models: impl IntoIterator<Item = (String, (u32, u32))>,
    ) -> YearGridResult<Self> {
        let table = Self {
            default: default.into().to_ascii_lowercase(),
            models: models
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Parse a JSON table. A missing `models` keeps the built-in models; a missing `default`
    /// picks [`DEFAULT_MODEL`] when the table has it, else the first model by name.
    pub fn from_json_str(s: &str) -> YearGridResult<Self> {
        let raw: DeviceTableJson = serde_json::from_str(s)
            .map_err(|e| YearGridError::serde(format!("device table: {e}")))?;
        let models = raw.models.unwrap_or_else(|| Self::builtin().models);
        let default = match raw.default {
            Some(d) => d,
            None if models.keys().any(|k| k.eq_ignore_ascii_case(DEFAULT_MODEL)) => {
                DEFAULT_MODEL.to_string()
            }
            None => models
                .keys()
                .map(|k| k.to_ascii_lowercase())
                .min()
                .ok_or_else(|| YearGridError::serde("device table has no models"))?,
        };
        Self::new(default, models)
    }

    pub fn from_json_path(path: &Path) -> YearGridResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read device table '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    fn validate(&self) -> YearGridResult<()> {
        for (name, &(w, h)) in &self.models {
            Resolution::new(w, h)
                .map_err(|_| YearGridError::serde(format!("model '{name}' has zero size")))?;
        }
        if !self.models.contains_key(&self.default) {
            return Err(YearGridError::serde(format!(
                "default model '{}' is not in the table",
                self.default
            )));
        }
        Ok(())
    }

    pub fn default_model(&self) -> &str {
        &self.default
    }

    /// Resolve `model`, or the default profile when `None`/blank.
    ///
    /// An unknown name is a client error.
    pub fn resolve(&self, model: Option<&str>) -> YearGridResult<DeviceProfile> {
        let name = model
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| self.default.clone());
        let &(width, height) = self
            .models
            .get(&name)
            .ok_or_else(|| YearGridError::validation(format!("unknown device model '{name}'")))?;
        Ok(DeviceProfile {
            model: name,
            resolution: Resolution { width, height },
        })
    }

    pub fn profiles(&self) -> impl Iterator<Item = DeviceProfile> + '_ {
        self.models.iter().map(|(k, &(width, height))| DeviceProfile {
            model: k.clone(),
            resolution: Resolution { width, height },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/profiles.rs"]
mod tests;
