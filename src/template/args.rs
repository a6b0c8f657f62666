use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};

/// One args file: a flat mapping from argument name to a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgsFile {
    pub path: PathBuf,
    pub values: IndexMap<String, String>,
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Null => Some(String::new()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) | YamlValue::Tagged(_) => None,
    }
}

impl ArgsFile {
    /// Parses an args file. YAML and JSON are both accepted.
    ///
    /// An empty file contributes nothing. Values must be scalars; they are
    /// stringified (`true`, `42`, ...) and a null becomes the empty string.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let parse_error =
            |e: String| Error::ArgsParseError { path: path.display().to_string(), e };

        let document: YamlValue =
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;

        let mapping = match document {
            YamlValue::Null => return Ok(Self { path: path.to_path_buf(), values: IndexMap::new() }),
            YamlValue::Mapping(mapping) => mapping,
            _ => return Err(parse_error("expected a mapping of argument names to values".into())),
        };

        let mut values = IndexMap::with_capacity(mapping.len());
        for (key, value) in &mapping {
            let key = scalar_to_string(key)
                .ok_or_else(|| parse_error("argument names must be scalars".into()))?;
            let value = scalar_to_string(value)
                .ok_or_else(|| parse_error(format!("value of '{key}' must be a scalar")))?;
            values.insert(key, value);
        }

        Ok(Self { path: path.to_path_buf(), values })
    }
}

/// Arguments handed to one template: each name maps to the values contributed
/// by every args file, in the order the files were loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedArgs(IndexMap<String, Vec<String>>);

impl CombinedArgs {
    /// Combines args files. Names keep the order in which they were first seen.
    pub fn combine<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a ArgsFile>,
    {
        let mut combined: IndexMap<String, Vec<String>> = IndexMap::new();
        for file in files {
            for (key, value) in &file.values {
                combined.entry(key.clone()).or_default().push(value.clone());
            }
        }
        Self(combined)
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Rendering context: every name is bound at the top level and under `args`.
    pub fn to_context(&self) -> Value {
        let args: Map<String, Value> =
            self.0.iter().map(|(key, values)| (key.clone(), json!(values))).collect();
        let mut context = args.clone();
        context.insert("args".to_string(), Value::Object(args));
        Value::Object(context)
    }
}
