//! Schema vocabulary: field types, cardinality, and relationship direction.

use crate::EntityKind;
use serde::{Deserialize, Serialize};

/// The semantic type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Timestamp,
    Enum,
    Relation,
}

/// How many targets a relationship field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Exactly one target; the field is mandatory.
    One,
    /// Zero or one target.
    OptionalOne,
    /// Any number of targets, possibly none.
    Many,
}

/// Which side of a logical edge set this field is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The side callers write; authoritative for the edge.
    Owning,
    /// Engine-maintained mirror of the owning side; read-only.
    Inverse,
}

/// Relationship metadata attached to a [`FieldType::Relation`] field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDef {
    /// The declared target kind. May be abstract; subkinds are accepted.
    pub target: EntityKind,
    pub cardinality: Cardinality,
    pub direction: Direction,
}

/// One field of an entity schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Allowed values. Only meaningful when `field_type` is `Enum`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_options: Option<Vec<String>>,
    /// Target and cardinality. Only meaningful when `field_type` is `Relation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<RelationDef>,
}

impl FieldDef {
    fn scalar(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            enum_options: None,
            relation: None,
        }
    }

    /// Shorthand for a required text field.
    #[must_use]
    pub fn text(name: &str) -> Self {
        Self::scalar(name, FieldType::Text)
    }

    /// Shorthand for a required numeric field.
    #[must_use]
    pub fn number(name: &str) -> Self {
        Self::scalar(name, FieldType::Number)
    }

    /// Shorthand for a required timestamp field.
    #[must_use]
    pub fn timestamp(name: &str) -> Self {
        Self::scalar(name, FieldType::Timestamp)
    }

    /// Shorthand for a required enum field with a closed value set.
    #[must_use]
    pub fn enumeration(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Enum,
            required: true,
            enum_options: Some(options.iter().map(|s| (*s).to_string()).collect()),
            relation: None,
        }
    }

    fn relation(name: &str, target: EntityKind, cardinality: Cardinality, direction: Direction) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Relation,
            required: matches!(cardinality, Cardinality::One),
            enum_options: None,
            relation: Some(RelationDef {
                target,
                cardinality,
                direction,
            }),
        }
    }

    /// Shorthand for a mandatory N:1 reference.
    #[must_use]
    pub fn reference(name: &str, target: EntityKind) -> Self {
        Self::relation(name, target, Cardinality::One, Direction::Owning)
    }

    /// Shorthand for an optional N:1 reference.
    #[must_use]
    pub fn optional_reference(name: &str, target: EntityKind) -> Self {
        Self::relation(name, target, Cardinality::OptionalOne, Direction::Owning)
    }

    /// Shorthand for the owning side of an N:M edge set.
    #[must_use]
    pub fn edge_set(name: &str, target: EntityKind) -> Self {
        Self::relation(name, target, Cardinality::Many, Direction::Owning)
    }

    /// Shorthand for an engine-maintained inverse list.
    #[must_use]
    pub fn inverse(name: &str, target: EntityKind) -> Self {
        Self::relation(name, target, Cardinality::Many, Direction::Inverse)
    }

    /// True for relation fields callers may write.
    #[must_use]
    pub fn is_owning_relation(&self) -> bool {
        self.relation
            .as_ref()
            .is_some_and(|r| r.direction == Direction::Owning)
    }

    /// True for engine-maintained relation fields.
    #[must_use]
    pub fn is_inverse_relation(&self) -> bool {
        self.relation
            .as_ref()
            .is_some_and(|r| r.direction == Direction::Inverse)
    }
}

/// The full field set of one entity kind.
///
/// Equality is field-order-insensitive: field order carries no semantics,
/// so two declarations listing the same fields in a different order
/// describe the same schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub kind: EntityKind,
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Creates a schema from a field list.
    #[must_use]
    pub fn new(kind: EntityKind, fields: Vec<FieldDef>) -> Self {
        Self { kind, fields }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterates the relation fields together with their relation metadata.
    pub fn relations(&self) -> impl Iterator<Item = (&FieldDef, &RelationDef)> {
        self.fields
            .iter()
            .filter_map(|f| f.relation.as_ref().map(|r| (f, r)))
    }

    /// Iterates the owning-side relation fields.
    pub fn owning_relations(&self) -> impl Iterator<Item = (&FieldDef, &RelationDef)> {
        self.relations().filter(|(_, r)| r.direction == Direction::Owning)
    }

    /// Iterates the inverse-side relation fields.
    pub fn inverse_relations(&self) -> impl Iterator<Item = (&FieldDef, &RelationDef)> {
        self.relations().filter(|(_, r)| r.direction == Direction::Inverse)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.fields.len() != other.fields.len() {
            return false;
        }
        let mut lhs: Vec<&FieldDef> = self.fields.iter().collect();
        let mut rhs: Vec<&FieldDef> = other.fields.iter().collect();
        lhs.sort_by(|a, b| a.name.cmp(&b.name));
        rhs.sort_by(|a, b| a.name.cmp(&b.name));
        lhs == rhs
    }
}
