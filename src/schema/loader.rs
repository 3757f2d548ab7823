//! Schema loader for named schemas kept on disk
//!
//! Layout:
//! - One JSON file per schema, `<schema_dir>/<name>.json`
//! - The file stem is the schema name
//! - Names are unique; registering a name twice is an error

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::errors::{LoadError, LoadResult};
use super::types::Schema;

/// Reads schema files from a directory and keeps them by name.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by name
    schemas: BTreeMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates a loader for `schema_dir`. Nothing is read until `load_all`.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// A missing directory is created and yields no schemas. Unreadable or
    /// malformed files abort the load.
    pub fn load_all(&mut self) -> LoadResult<()> {
        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                LoadError::io(
                    self.schema_dir.display().to_string(),
                    format!("Failed to create schema directory: {}", e),
                )
            })?;
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            LoadError::io(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        // Sorted so that duplicate detection is deterministic
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                LoadError::io(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    /// Loads a single schema file, named after its file stem.
    pub fn load_schema_file(&mut self, path: &Path) -> LoadResult<()> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoadError::malformed(path.display().to_string(), "Invalid file name"))?
            .to_string();

        let content = fs::read_to_string(path).map_err(|e| {
            LoadError::io(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let json: JsonValue = serde_json::from_str(&content).map_err(|e| {
            LoadError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        if !json.is_object() {
            return Err(LoadError::malformed(
                path.display().to_string(),
                "Schema document must be a JSON object",
            ));
        }

        self.register(name, Schema::from(json))
    }

    /// Registers a schema directly (for tests or programmatic creation).
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> LoadResult<()> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(LoadError::Duplicate(name));
        }
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Gets a schema by name, failing when it is unknown.
    pub fn require(&self, name: &str) -> LoadResult<&Schema> {
        self.get(name)
            .ok_or_else(|| LoadError::UnknownSchema(name.to_string()))
    }

    /// Checks if a schema exists.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the loaded schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Saves a schema to `<schema_dir>/<name>.json`.
    ///
    /// Existing files are never overwritten. Inline custom functions have no
    /// JSON form and are dropped from the written file. The name must be a
    /// plain file stem, so the file always lands inside the schema directory.
    pub fn save_schema(&self, name: &str, schema: &Schema) -> LoadResult<PathBuf> {
        if !is_plain_name(name) {
            return Err(LoadError::InvalidName(name.to_string()));
        }

        let path = self.schema_dir.join(format!("{}.json", name));

        if path.exists() {
            return Err(LoadError::Duplicate(name.to_string()));
        }

        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                LoadError::io(
                    self.schema_dir.display().to_string(),
                    format!("Failed to create schema directory: {}", e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            LoadError::malformed(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            LoadError::io(path.display().to_string(), format!("Failed to write file: {}", e))
        })?;

        Ok(path)
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| c == '/' || c == '\\' || c == '\0')
}
