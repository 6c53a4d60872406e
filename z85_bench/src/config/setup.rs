use std::path::{Path, PathBuf};
use std::{env, fs, io};

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use toml::map::Entry;
use toml::{Table, Value};

/// Provides a layered builder for deserializing configuration files.
#[must_use]
pub struct Builder {
    table: Result<Table>,
}

impl Builder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            table: Ok(Table::new()),
        }
    }

    /// Adds a layer of configuration.
    ///
    /// Layers added later take precedence over earlier ones.
    pub fn add_layer<L: Layer>(mut self, source: L) -> Self {
        self.table = self.table.and_then(|mut t| {
            source.extend_table(&mut t)?;
            Ok(t)
        });
        self
    }

    /// Deserializes the configuration from the provided layers.
    pub fn build<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.table.and_then(deserialize_table)
    }
}

/// A configuration layer.
pub trait Layer {
    /// Extends a TOML table by this layer.
    fn extend_table(&self, table: &mut Table) -> Result<()>;
}

impl<L: Layer> Layer for Option<L> {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        match self {
            Some(layer) => layer.extend_table(table),
            None => Ok(()),
        }
    }
}

/// A TOML file configuration layer.
#[must_use]
pub struct File {
    path: PathBuf,
    required: bool,
}

impl File {
    /// Creates a new layer, loading TOML from the file at the given path.
    ///
    /// The file is required by default.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: PathBuf::from(path.as_ref()),
            required: true,
        }
    }

    /// Sets whether the file is required.
    ///
    /// If it is not required and does not exist, this layer is treated as
    /// empty. If it is required and does not exist, an error is raised.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A TOML text configuration layer.
#[must_use]
pub struct TomlText<'a> {
    text: &'a str,
}

impl<'a> TomlText<'a> {
    /// Creates a new layer, parsing the text as TOML.
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

/// An environment variable configuration layer.
///
/// This loads every environment variable whose name starts with the prefix,
/// followed by `__`. The rest of the name is lowercased. Nested values can be
/// specified by using `__` (two underscores) as a separator (i.e. with the
/// prefix `APP`, `APP__BENCH__RUNS` will refer to `bench.runs`).
///
/// Integer and boolean literals are loaded as such, every other value is
/// treated as a string.
#[must_use]
pub struct Env {
    prefix: &'static str,
}

impl Env {
    /// Creates a new layer with the given variable name prefix.
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

/// A layer of individual values, addressed by their dotted path.
///
/// Used for command line arguments.
#[must_use]
#[derive(Default)]
pub struct Overrides {
    values: Vec<(&'static str, Value)>,
}

impl Overrides {
    /// Creates a new empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value at `path` if `value` is [`Some`].
    pub fn set<V: Into<Value>>(mut self, path: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.values.push((path, value.into()));
        }
        self
    }
}

impl Layer for File {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        let file = match fs::read_to_string(&self.path) {
            Ok(content) => deserialize_str_to_table(&content)
                .with_context(|| format!("failed to load config {:?}", self.path))?,
            Err(why) => {
                // on error, we definitely return and don't merge tables
                if !self.required && why.kind() == io::ErrorKind::NotFound {
                    return Ok(());
                }

                return Err(why).context(format!("cannot read required config {:?}", self.path));
            },
        };

        merge_tables(table, file);
        Ok(())
    }
}

impl Layer for TomlText<'_> {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        let toml = deserialize_str_to_table(self.text).context("toml str literal invalid")?;
        merge_tables(table, toml);
        Ok(())
    }
}

impl Layer for Env {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        for (key, value) in env::vars_os() {
            // non-utf8 keys cannot possibly refer to anything that serde or toml allows as
            // keys so they can just be excluded
            let Ok(key) = key.into_string() else {
                continue;
            };

            let Some(key) = key
                .strip_prefix(self.prefix)
                .and_then(|k| k.strip_prefix("__"))
            else {
                continue;
            };

            // lossy conversion so the bad value at least shows up in the error later
            let value = value
                .into_string()
                .unwrap_or_else(|o| o.to_string_lossy().into_owned());

            let key = key.to_ascii_lowercase();
            let segments = key.split("__").collect::<SmallVec<[&str; 8]>>();
            insert_at(table, &segments, parse_env_value(value));
        }

        Ok(())
    }
}

impl Layer for Overrides {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        for (path, value) in &self.values {
            let segments = path.split('.').collect::<SmallVec<[&str; 8]>>();
            insert_at(table, &segments, value.clone());
        }

        Ok(())
    }
}

fn parse_env_value(value: String) -> Value {
    if let Ok(int) = value.parse::<i64>() {
        return Value::Integer(int);
    }

    match value.as_str() {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => Value::String(value),
    }
}

fn deserialize_str_to_table(text: &str) -> Result<Table> {
    toml::from_str(text).context("config toml is invalid")
}

fn deserialize_table<T>(table: Table) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(table).context("cannot deserialize config")
}

fn merge_tables(target: &mut Table, consume: Table) {
    for (key, value) in consume {
        match target.entry(key) {
            Entry::Vacant(entry) => _ = entry.insert(value),
            Entry::Occupied(mut entry) => match (entry.get_mut(), value) {
                (Value::Table(a), Value::Table(b)) => merge_tables(a, b),
                (a, b) => *a = b,
            },
        }
    }
}

fn insert_at(table: &mut Table, path: &[&str], value: Value) {
    let [first, path @ ..] = path else {
        // `split` always yields at least one segment
        return;
    };

    match table.entry(*first) {
        Entry::Vacant(entry) => _ = entry.insert(nested_value(path, value)),
        Entry::Occupied(mut entry) => match entry.get_mut() {
            Value::Table(table) if !path.is_empty() => insert_at(table, path, value),
            entry => *entry = nested_value(path, value),
        },
    }
}

fn nested_value(path: &[&str], value: Value) -> Value {
    match path {
        [] => value,
        [first, path @ ..] => {
            let mut table = Table::new();
            table.insert((*first).to_owned(), nested_value(path, value));
            Value::Table(table)
        },
    }
}
