use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{Result, ShapeError};
use crate::parser::Parser;
use crate::shape::Shape;

/// Name-keyed table of shapes.
///
/// A named shape is an alias: it encodes exactly like the shape it names.
/// Later definitions may refer to earlier ones.
pub struct ShapeRegistry {
    shapes: HashMap<String, Shape>,
    config: RegistryConfig,
}

impl ShapeRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            shapes: HashMap::new(),
            config,
        }
    }

    /// Parse `text` and register it under `name`.
    pub fn define(&mut self, name: &str, text: &str) -> Result<()> {
        let shape = self.resolve(text)?;
        self.define_shape(name, shape)
    }

    /// Register an already-built shape under `name`.
    pub fn define_shape(&mut self, name: &str, shape: Shape) -> Result<()> {
        if !is_ident(name) || Shape::is_reserved(name) || name == "_" {
            return Err(ShapeError::Parse {
                offset: 0,
                message: format!("invalid shape name {name:?}"),
            });
        }
        if self.shapes.contains_key(name) {
            return Err(ShapeError::Redefined(name.to_string()));
        }
        if self.shapes.len() >= self.config.max_definitions {
            return Err(ShapeError::TooManyDefinitions {
                max: self.config.max_definitions,
            });
        }
        debug!(name, shape = %shape, "registered shape");
        self.shapes.insert(name.to_string(), shape);
        Ok(())
    }

    /// Register every `type Name = shape;` definition in `text`, in order.
    ///
    /// `#` starts a comment that runs to the end of the line.
    pub fn load_definitions(&mut self, text: &str) -> Result<usize> {
        let mut pos = 0;
        let mut loaded = 0usize;
        loop {
            let mut parser = Parser::new(text, Some(&*self), self.config.max_depth).at(pos);
            let Some((name, shape)) = parser.parse_definition()? else {
                break;
            };
            pos = parser.pos();
            self.define_shape(&name, shape)?;
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Load definitions from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_config(path, RegistryConfig::default())
    }

    /// Load definitions from a file with explicit config.
    pub fn from_file_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| ShapeError::LoadFailed(format!("{}: {err}", path.display())))?;

        let max_bytes = config.max_file_size;
        let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
        let mut content = String::new();
        file.take(read_limit)
            .read_to_string(&mut content)
            .map_err(|err| ShapeError::LoadFailed(format!("{}: {err}", path.display())))?;
        if content.len() > max_bytes {
            return Err(ShapeError::LoadFailed(format!(
                "definitions file too large: {}",
                path.display()
            )));
        }

        let mut registry = Self::with_config(config);
        let loaded = registry.load_definitions(&content)?;
        debug!(path = %path.display(), loaded, "loaded shape definitions");
        Ok(registry)
    }

    /// Parse shape text, resolving names against this registry.
    pub fn resolve(&self, text: &str) -> Result<Shape> {
        let mut parser = Parser::new(text, Some(self), self.config.max_depth);
        let shape = parser.parse_shape()?;
        parser.finish()?;
        Ok(shape)
    }

    /// Look up a named shape.
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shapes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
