//! Engine liveness, identification and API compatibility.

use std::time::{Duration, Instant};

use tracing::{debug, info};
use vpplink_api::binapi::memclnt::{ApiVersions, ControlPing};
use vpplink_api::binapi::vpe::ShowVersion;
use vpplink_api::Channel;
use vpplink_compat::{ApiRegistry, Version};

use crate::error::{Result, VppError};
use crate::link::VppLink;

/// Build identification reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVersion {
    pub program: String,
    pub version: String,
    pub build_date: String,
    pub build_directory: String,
}

impl<C: Channel> VppLink<C> {
    /// Round-trip a keepalive and report how long it took.
    pub fn ping(&self) -> Result<Duration> {
        let started = Instant::now();
        let reply = self.call("ping", &ControlPing::default(), String::new)?;
        let elapsed = started.elapsed();
        debug!(vpe_pid = reply.vpe_pid, ?elapsed, "engine answered ping");
        Ok(elapsed)
    }

    pub fn show_version(&self) -> Result<EngineVersion> {
        let reply = self.call("show_version", &ShowVersion::default(), String::new)?;
        Ok(EngineVersion {
            program: reply.program.as_str().to_string(),
            version: reply.version.as_str().to_string(),
            build_date: reply.build_date.as_str().to_string(),
            build_directory: reply.build_directory.as_str().to_string(),
        })
    }

    /// Module versions advertised by the engine.
    pub fn api_versions(&self) -> Result<ApiRegistry> {
        let reply = self.call("api_versions", &ApiVersions::default(), String::new)?;
        let registry = ApiRegistry::from_versions(reply.api_versions.iter().map(|module| {
            (
                module.name.as_str().to_string(),
                Version::new(module.major, module.minor, module.patch),
            )
        }));
        debug!(modules = registry.len(), "engine api versions received");
        Ok(registry)
    }

    /// Fail unless the engine's `module` satisfies `constraint`.
    pub fn require(&self, module: &str, constraint: &str) -> Result<Version> {
        let found = self
            .api_versions()?
            .check(module, constraint)
            .map_err(|source| VppError::Compat {
                operation: "require",
                source,
            })?;
        info!(module, %found, constraint, "engine api requirement met");
        Ok(found)
    }
}
