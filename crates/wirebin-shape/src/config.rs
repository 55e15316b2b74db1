/// Limits applied while parsing and registering shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Deepest nesting of sequences, maps and structs in one shape.
    pub max_depth: usize,
    /// Maximum number of named shapes in one registry.
    pub max_definitions: usize,
    /// Maximum bytes read from one definitions file.
    pub max_file_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_definitions: 256,
            max_file_size: 256 * 1024,
        }
    }
}
