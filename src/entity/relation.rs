#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// A single nested entity, possibly absent.
    OneToOne,
    /// An ordered set of nested entities.
    OneToMany,
}

/// A field of a record that holds other entities rather than a plain value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    field: String,
    kind: RelationKind,
    target: String,
}

impl Relation {
    pub fn one(field: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: RelationKind::OneToOne,
            target: target.into(),
        }
    }

    pub fn many(field: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: RelationKind::OneToMany,
            target: target.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Type name of the related entities.
    pub fn target(&self) -> &str {
        &self.target
    }
}
