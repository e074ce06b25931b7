use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::constraint::Constraint;
use crate::error::{CompatError, Result};
use crate::version::Version;

const API_FILE_SUFFIX: &str = ".api.json";

/// Module-keyed table of advertised API versions.
#[derive(Debug, Clone)]
pub struct ApiRegistry {
    modules: BTreeMap<String, Version>,
    config: RegistryConfig,
}

#[derive(Deserialize)]
struct ApiFile {
    options: ApiOptions,
}

#[derive(Deserialize)]
struct ApiOptions {
    version: String,
}

impl ApiRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            modules: BTreeMap::new(),
            config,
        }
    }

    /// Record the version of a module, replacing any previous entry.
    pub fn register(&mut self, module: impl Into<String>, version: Version) {
        self.modules.insert(module.into(), version);
    }

    /// Build from `(module, version)` pairs as reported by the engine.
    pub fn from_versions<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = (S, Version)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (module, version) in versions {
            registry.register(module, version);
        }
        registry
    }

    /// Build from embedded `(module, "major.minor.patch")` pairs.
    pub fn from_embedded(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (module, version) in pairs {
            registry.register(*module, Version::parse(version)?);
        }
        Ok(registry)
    }

    /// Load `options.version` of every `<module>.api.json` in a directory.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load from a directory with explicit config.
    pub fn from_directory_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let mut loaded = 0usize;

        let entries = std::fs::read_dir(path)
            .map_err(|err| CompatError::LoadFailed(format!("{}: {err}", path.display())))?;

        for entry in entries {
            let entry = entry.map_err(|err| CompatError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some(module) = file_name.strip_suffix(API_FILE_SUFFIX) else {
                continue;
            };
            if module.is_empty() {
                return Err(CompatError::LoadFailed(format!(
                    "missing module name: {file_name}"
                )));
            }

            let entry_path = entry.path();
            let metadata = std::fs::symlink_metadata(&entry_path)
                .map_err(|err| CompatError::LoadFailed(err.to_string()))?;
            if metadata.file_type().is_symlink() {
                return Err(CompatError::LoadFailed(format!(
                    "refusing to load API definition symlink: {file_name}"
                )));
            }
            if !metadata.is_file() {
                continue;
            }

            loaded = loaded.saturating_add(1);
            if loaded > registry.config.max_files_from_directory {
                return Err(CompatError::LoadFailed(format!(
                    "API definition count exceeds configured max ({})",
                    registry.config.max_files_from_directory
                )));
            }

            let content = read_limited(&entry_path, registry.config.max_file_size)?;
            let parsed: ApiFile = serde_json::from_str(&content)?;
            let version = Version::parse(&parsed.options.version)?;
            debug!(module, %version, "loaded API definition");
            registry.register(module, version);
        }

        Ok(registry)
    }

    /// Advertised version of `module`, if known.
    pub fn version(&self, module: &str) -> Option<Version> {
        self.modules.get(module).copied()
    }

    /// Known modules in name order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, Version)> {
        self.modules.iter().map(|(name, v)| (name.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// True when `module` is known and its version satisfies `constraint`.
    pub fn requirement_satisfied(&self, module: &str, constraint: &Constraint) -> bool {
        self.version(module)
            .is_some_and(|found| constraint.matches(&found))
    }

    /// True when every `(module, constraint)` pair is satisfied.
    pub fn requirements_satisfied(&self, requirements: &[(&str, &Constraint)]) -> bool {
        requirements
            .iter()
            .all(|(module, constraint)| self.requirement_satisfied(module, constraint))
    }

    /// Parse `constraint` and check `module` against it.
    pub fn check(&self, module: &str, constraint: &str) -> Result<Version> {
        let parsed = Constraint::parse(constraint)?;
        match self.version(module) {
            Some(found) if parsed.matches(&found) => Ok(found),
            Some(found) => Err(CompatError::Unsatisfied {
                module: module.to_string(),
                constraint: parsed.to_string(),
                found: Some(found),
            }),
            None if self.config.fail_on_missing_module => {
                Err(CompatError::UnknownModule(module.to_string()))
            }
            None => {
                warn!(module, "module not advertised by engine");
                Err(CompatError::Unsatisfied {
                    module: module.to_string(),
                    constraint: parsed.to_string(),
                    found: None,
                })
            }
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for ApiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn read_limited(path: &Path, max_bytes: usize) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|err| {
        CompatError::LoadFailed(format!("failed opening {}: {err}", path.display()))
    })?;
    let metadata = file
        .metadata()
        .map_err(|err| CompatError::LoadFailed(err.to_string()))?;
    if metadata.len() > max_bytes as u64 {
        return Err(CompatError::LoadFailed(format!(
            "API definition too large ({} bytes): {}",
            metadata.len(),
            path.display()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            CompatError::LoadFailed(format!("failed reading {}: {err}", path.display()))
        })?;
    if content.len() > max_bytes {
        return Err(CompatError::LoadFailed(format!(
            "API definition too large while reading: {}",
            path.display()
        )));
    }
    Ok(content)
}
