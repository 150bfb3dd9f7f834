use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic outcome an outgoing edge is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Pass,
    Fail,
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Pass => write!(f, "pass"),
            Handle::Fail => write!(f, "fail"),
        }
    }
}

/// Maps the handle names used on edges to their semantic outcome.
///
/// The editor names its ports `continue` and `terminal`, while hand-written graphs tend to
/// use `pass` and `fail`. Both are understood out of the box; more can be registered through
/// [`crate::compiler::CompilerBuilder::with_handle_alias`].
#[derive(Debug, Clone)]
pub struct HandleVocabulary {
    names: AHashMap<String, Handle>,
}

impl HandleVocabulary {
    pub fn new() -> Self {
        let mut names = AHashMap::new();
        names.insert("pass".to_string(), Handle::Pass);
        names.insert("continue".to_string(), Handle::Pass);
        names.insert("fail".to_string(), Handle::Fail);
        names.insert("terminal".to_string(), Handle::Fail);
        Self { names }
    }

    pub fn insert(&mut self, name: &str, handle: Handle) {
        self.names.insert(name.to_string(), handle);
    }

    pub fn resolve(&self, name: &str) -> Option<Handle> {
        self.names.get(name).copied()
    }
}

impl Default for HandleVocabulary {
    fn default() -> Self {
        Self::new()
    }
}
