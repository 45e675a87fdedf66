//! Addresses of editors inside a form tree.

use std::fmt;

/// Segment of an editor path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Materialized object property: .fieldName
    Property(String),
    /// Array element position: [0], [1], etc.
    Index(usize),
}

/// Path from the root object editor to a nested editor
/// (e.g., "actor.name" or "attachments[0].links").
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EditorPath {
    segments: Vec<PathSegment>,
}

impl EditorPath {
    /// The root object editor
    pub fn root() -> Self {
        Self { segments: vec![] }
    }

    pub fn push_property(&self, name: &str) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Property(name.to_string()));
        new
    }

    pub fn push_index(&self, idx: usize) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Index(idx));
        new
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl fmt::Display for EditorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Property(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Property(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_building() {
        let path = EditorPath::root()
            .push_property("object")
            .push_property("attachments")
            .push_index(2)
            .push_property("url");

        assert_eq!(path.to_string(), "object.attachments[2].url");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec![
                &PathSegment::Property("object".to_string()),
                &PathSegment::Property("attachments".to_string()),
                &PathSegment::Index(2),
                &PathSegment::Property("url".to_string()),
            ]
        );
    }

    #[test]
    fn test_root_is_empty() {
        assert_eq!(EditorPath::root().to_string(), "");
        assert_eq!(EditorPath::root().segments().count(), 0);
        assert_eq!(EditorPath::root().push_index(0).to_string(), "[0]");
    }
}
