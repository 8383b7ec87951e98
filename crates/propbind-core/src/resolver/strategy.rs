//! Strategy contract shared by both binding generations

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use super::error::ResolveResult;
use super::prefix::Prefix;
use crate::capability::Generation;
use crate::environment::Environment;

/// A resolved configuration namespace
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    /// Raw entries keyed by their key relative to the prefix
    SubProperties(BTreeMap<String, String>),
    /// A value bound from the entries
    Bound(T),
}

impl<T> Resolved<T> {
    pub fn is_bound(&self) -> bool {
        matches!(self, Resolved::Bound(_))
    }

    pub fn into_bound(self) -> Option<T> {
        match self {
            Resolved::Bound(value) => Some(value),
            Resolved::SubProperties(_) => None,
        }
    }

    pub fn into_sub_properties(self) -> Option<BTreeMap<String, String>> {
        match self {
            Resolved::SubProperties(props) => Some(props),
            Resolved::Bound(_) => None,
        }
    }

    pub fn as_sub_properties(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Resolved::SubProperties(props) => Some(props),
            Resolved::Bound(_) => None,
        }
    }
}

/// Resolution strategy for one binding generation
pub trait ResolveStrategy: Send + Sync {
    /// The generation this strategy implements
    fn generation(&self) -> Generation;

    /// Resolve everything under `prefix`
    ///
    /// Strategies that cannot bind typed values ignore `T` and return
    /// [`Resolved::SubProperties`].
    fn resolve<T: DeserializeOwned>(
        &self,
        env: &dyn Environment,
        prefix: &Prefix<'_>,
    ) -> ResolveResult<Resolved<T>>;
}
