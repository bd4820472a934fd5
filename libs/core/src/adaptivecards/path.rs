use std::fmt;

/// One step from a node to a child slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(&'static str),
    Index(usize),
}

/// Location of a node inside a card, rendered as `$.actions[0].card.body[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &'static str) -> Self {
        self.with(Segment::Field(name))
    }

    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fields_and_indices() {
        let path = NodePath::root()
            .field("actions")
            .index(0)
            .field("card")
            .field("body")
            .index(3);
        assert_eq!(path.to_string(), "$.actions[0].card.body[3]");
        assert_eq!(path.segments().len(), 5);
    }

    #[test]
    fn root_renders_as_dollar() {
        assert!(NodePath::root().is_root());
        assert_eq!(NodePath::root().to_string(), "$");
    }
}
