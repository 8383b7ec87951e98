//! Environment entries as a figment provider
//!
//! Entries are split into elements, each element is reduced to its canonical
//! form, and the values are inserted into a nested dictionary. Dictionaries
//! whose keys are all indices become sequences when the data is handed to
//! figment.

use figment::value::{Dict, Map, Tag, Value};
use figment::{Error, Metadata, Profile, Provider};
use tracing::trace;

use super::name::{canonical, split_key};
use crate::environment::{Environment, EnvironmentResult};

/// Snapshot of an environment in the shape figment extracts from
///
/// The first entry enumerated for a canonical key wins; an entry that would
/// turn an existing value into a table (or the reverse) is skipped. Empty
/// values count as unset.
///
/// # Example
///
/// ```
/// use figment::Figment;
/// use propbind_core::binding::EnvironmentProvider;
/// use propbind_core::environment::MemoryEnvironment;
///
/// let env = MemoryEnvironment::with_entries([("db.maxSize", "10")]);
/// let provider = EnvironmentProvider::new(&env).unwrap();
/// let size: u32 = Figment::from(provider).extract_inner_lossy("db.max_size").unwrap();
/// assert_eq!(size, 10);
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentProvider {
    name: String,
    tree: Dict,
    /// Canonical path of the value this provider was narrowed to
    scope: Vec<String>,
}

impl EnvironmentProvider {
    /// Read every entry of `env`
    ///
    /// Fails only if the environment cannot enumerate its entries. Keys that
    /// are not valid property names are skipped.
    pub fn new(env: &dyn Environment) -> EnvironmentResult<Self> {
        let mut tree = Dict::new();
        for (key, value) in env.entries()? {
            if value.is_empty() {
                continue;
            }
            let Some(elements) = split_key(&key).filter(|e| !e.is_empty()) else {
                trace!(environment = env.name(), %key, "skipping malformed property key");
                continue;
            };
            let path: Vec<String> = elements.iter().map(|e| canonical(e)).collect();
            if path.iter().any(String::is_empty) {
                trace!(environment = env.name(), %key, "skipping key without a usable element");
                continue;
            }
            if !insert(&mut tree, &path, value) {
                trace!(environment = env.name(), %key, "skipping shadowed property key");
            }
        }
        Ok(Self {
            name: env.name().to_string(),
            tree,
            scope: Vec::new(),
        })
    }

    /// Number of values in the snapshot
    pub fn len(&self) -> usize {
        count(&self.tree)
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Value at a canonical path, if present
    pub fn find(&self, path: &[String]) -> Option<&Value> {
        find(&self.tree, path)
    }

    /// Provider holding only the value at `path`, still nested under `path`
    ///
    /// Returns `None` when nothing is configured there.
    pub fn scoped(&self, path: &[String]) -> Option<Self> {
        let Some((head, rest)) = path.split_first() else {
            return (!self.tree.is_empty()).then(|| self.clone());
        };
        let mut nested = self.find(path)?.clone();
        for element in rest.iter().rev() {
            nested = Value::Dict(Tag::Default, Dict::from([(element.clone(), nested)]));
        }
        Some(Self {
            name: self.name.clone(),
            tree: Dict::from([(head.clone(), nested)]),
            scope: path.to_vec(),
        })
    }
}

impl Provider for EnvironmentProvider {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("{} environment", self.name))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut path = Vec::new();
        let tree = sequences_along(self.tree.clone(), &self.scope, &mut path)?;
        Ok(Map::from([(Profile::default(), tree)]))
    }
}

fn insert(dict: &mut Dict, path: &[String], value: String) -> bool {
    let Some((head, rest)) = path.split_first() else {
        return false;
    };
    if rest.is_empty() {
        if dict.contains_key(head) {
            return false;
        }
        dict.insert(head.clone(), Value::String(Tag::Default, value));
        return true;
    }
    match dict
        .entry(head.clone())
        .or_insert_with(|| Value::Dict(Tag::Default, Dict::new()))
    {
        Value::Dict(_, inner) => insert(inner, rest, value),
        _ => false,
    }
}

fn find<'a>(dict: &'a Dict, path: &[String]) -> Option<&'a Value> {
    let (head, rest) = path.split_first()?;
    let value = dict.get(head)?;
    if rest.is_empty() {
        return Some(value);
    }
    match value {
        Value::Dict(_, inner) => find(inner, rest),
        _ => None,
    }
}

fn count(dict: &Dict) -> usize {
    dict.values()
        .map(|value| match value {
            Value::Dict(_, inner) => count(inner),
            _ => 1,
        })
        .sum()
}

/// Convert index tables into sequences below the scope, leaving the tables
/// that lead to it untouched so figment can still look the scope up by key
fn sequences_along(dict: Dict, scope: &[String], path: &mut Vec<String>) -> Result<Dict, Error> {
    let mut out = Dict::new();
    for (key, value) in dict {
        path.push(key.clone());
        let value = match scope.split_first() {
            None => sequences(value, path)?,
            Some((head, rest)) if *head == key => match value {
                Value::Dict(tag, inner) if !rest.is_empty() => {
                    Value::Dict(tag, sequences_along(inner, rest, path)?)
                }
                value => sequences(value, path)?,
            },
            Some(_) => value,
        };
        path.pop();
        out.insert(key, value);
    }
    Ok(out)
}

/// Recursively turn tables keyed `0..n` into sequences
///
/// Indices must be contiguous from zero; a gap is an error naming the first
/// missing index.
fn sequences(value: Value, path: &mut Vec<String>) -> Result<Value, Error> {
    let (tag, dict) = match value {
        Value::Dict(tag, dict) => (tag, dict),
        other => return Ok(other),
    };
    let mut converted = Dict::new();
    for (key, child) in dict {
        path.push(key.clone());
        let child = sequences(child, path)?;
        path.pop();
        converted.insert(key, child);
    }
    if converted.is_empty() || !converted.keys().all(|k| k.parse::<usize>().is_ok()) {
        return Ok(Value::Dict(tag, converted));
    }

    let mut indexed: Vec<(usize, Value)> = converted
        .into_iter()
        .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, v)))
        .collect();
    indexed.sort_by_key(|(i, _)| *i);

    let mut items = Vec::with_capacity(indexed.len());
    for (expected, (index, item)) in indexed.into_iter().enumerate() {
        if index != expected {
            let mut error = Error::from(format!(
                "index {expected} is missing; indices must be contiguous from 0"
            ));
            error.path = path.clone();
            error.path.push(expected.to_string());
            return Err(error);
        }
        items.push(item);
    }
    Ok(Value::Array(tag, items))
}
