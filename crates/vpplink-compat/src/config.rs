/// Controls how an [`ApiRegistry`](crate::ApiRegistry) loads and answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// When true, [`check`](crate::ApiRegistry::check) on a module the
    /// registry does not know returns `CompatError::UnknownModule`.
    pub fail_on_missing_module: bool,
    /// Maximum number of `*.api.json` files loaded from a directory.
    pub max_files_from_directory: usize,
    /// Maximum bytes allowed per `*.api.json` file.
    pub max_file_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fail_on_missing_module: false,
            max_files_from_directory: 1024,
            max_file_size: 4 * 1024 * 1024,
        }
    }
}
