use serde_json::Value;
use std::fmt::{Display, Formatter};

/// A variable reference such as `customer.address.city`, one object level per segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedPath {
    segments: Vec<String>,
}

/// Outcome of walking a path. A present JSON `null` is `Found(Value::Null)`,
/// distinct from `Missing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    Missing,
}

impl DottedPath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn lookup<'a>(&self, document: &'a Value) -> Lookup<'a> {
        let mut current = document;
        for segment in &self.segments {
            match current.as_object().and_then(|object| object.get(segment)) {
                Some(next) => current = next,
                None => return Lookup::Missing,
            }
        }
        Lookup::Found(current)
    }
}

impl Display for DottedPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl<'a> Lookup<'a> {
    /// Collapses a missing path and an explicit null into `None`.
    pub fn present(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(Value::Null) | Lookup::Missing => None,
            Lookup::Found(value) => Some(value),
        }
    }
}

#[cfg(test)]
#[path = "path_test.rs"]
mod tests;
