//! Compatibility gate for the engine binary API.
//!
//! Every API module (`interface`, `ip`, `nat`, ...) advertises a
//! `major.minor.patch` version. Client code built against a given module
//! version can ask, before issuing calls, whether the connected engine
//! satisfies a constraint such as `>=3.1.0, <4.0.0`.
//!
//! Version and constraint evaluation is pure; [`ApiRegistry`] can be filled
//! from an engine `api_versions` reply, from embedded pairs, or from a
//! directory of `*.api.json` files.

pub mod config;
pub mod constraint;
pub mod error;
pub mod registry;
pub mod version;

pub use config::RegistryConfig;
pub use constraint::{Clause, Constraint, Op};
pub use error::{CompatError, Result};
pub use registry::ApiRegistry;
pub use version::Version;
