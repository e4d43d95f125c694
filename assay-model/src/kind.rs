//! The closed set of entity kinds and their hierarchy.
//!
//! The original data model is a class hierarchy; here it is a closed enum.
//! Abstract kinds (`AssessmentElement`, `Element`, `Metric`) exist only for
//! schema description, subkind queries, and polymorphic listing — they are
//! never instantiated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every entity kind the core knows about, abstract bases included.
///
/// The serialized form of a concrete kind doubles as the stored type
/// discriminator (`type_spec`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    // Abstract bases.
    AssessmentElement,
    Element,
    Metric,

    // Concrete kinds.
    Project,
    Evaluation,
    Observation,
    ConfParam,
    Configuration,
    Tool,
    Datashape,
    Measure,
    LegalRequirement,
    Comment,
    Dataset,
    Model,
    Feature,
    Direct,
    Derived,
    MetricCategory,
}

impl EntityKind {
    /// All kinds, in registry order.
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::AssessmentElement,
        EntityKind::Element,
        EntityKind::Metric,
        EntityKind::Project,
        EntityKind::Evaluation,
        EntityKind::Observation,
        EntityKind::ConfParam,
        EntityKind::Configuration,
        EntityKind::Tool,
        EntityKind::Datashape,
        EntityKind::Measure,
        EntityKind::LegalRequirement,
        EntityKind::Comment,
        EntityKind::Dataset,
        EntityKind::Model,
        EntityKind::Feature,
        EntityKind::Direct,
        EntityKind::Derived,
        EntityKind::MetricCategory,
    ];

    /// True for the abstract bases, which cannot be created or stored.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        matches!(
            self,
            EntityKind::AssessmentElement | EntityKind::Element | EntityKind::Metric
        )
    }

    /// True for kinds that can actually be instantiated.
    #[must_use]
    pub const fn is_concrete(&self) -> bool {
        !self.is_abstract()
    }

    /// The direct parent in the hierarchy, if any.
    ///
    /// Standalone kinds (Project, Tool, Measure, …) have no parent even
    /// though they share the id/name/description convention.
    #[must_use]
    pub const fn parent(&self) -> Option<EntityKind> {
        match self {
            EntityKind::Element | EntityKind::Metric => Some(EntityKind::AssessmentElement),
            EntityKind::Observation
            | EntityKind::ConfParam
            | EntityKind::Configuration
            | EntityKind::MetricCategory => Some(EntityKind::AssessmentElement),
            EntityKind::Dataset | EntityKind::Model | EntityKind::Feature => {
                Some(EntityKind::Element)
            }
            EntityKind::Direct | EntityKind::Derived => Some(EntityKind::Metric),
            _ => None,
        }
    }

    /// Reports hierarchy membership: `a.is_subkind_of(b)` is reflexive and
    /// follows parent links transitively.
    #[must_use]
    pub fn is_subkind_of(&self, base: EntityKind) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == base {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// The concrete kinds reachable from this kind: itself when concrete,
    /// otherwise every concrete descendant.
    #[must_use]
    pub fn concrete_subkinds(&self) -> Vec<EntityKind> {
        if self.is_concrete() {
            return vec![*self];
        }
        EntityKind::ALL
            .iter()
            .copied()
            .filter(|k| k.is_concrete() && k.is_subkind_of(*self))
            .collect()
    }

    /// The stored discriminator string for this kind.
    #[must_use]
    pub const fn discriminator(&self) -> &'static str {
        match self {
            EntityKind::AssessmentElement => "assessment_element",
            EntityKind::Element => "element",
            EntityKind::Metric => "metric",
            EntityKind::Project => "project",
            EntityKind::Evaluation => "evaluation",
            EntityKind::Observation => "observation",
            EntityKind::ConfParam => "conf_param",
            EntityKind::Configuration => "configuration",
            EntityKind::Tool => "tool",
            EntityKind::Datashape => "datashape",
            EntityKind::Measure => "measure",
            EntityKind::LegalRequirement => "legal_requirement",
            EntityKind::Comment => "comment",
            EntityKind::Dataset => "dataset",
            EntityKind::Model => "model",
            EntityKind::Feature => "feature",
            EntityKind::Direct => "direct",
            EntityKind::Derived => "derived",
            EntityKind::MetricCategory => "metric_category",
        }
    }

    /// Looks up a kind by its discriminator string.
    #[must_use]
    pub fn from_discriminator(s: &str) -> Option<EntityKind> {
        EntityKind::ALL.iter().copied().find(|k| k.discriminator() == s)
    }

    /// The storage partition this kind's records live in.
    ///
    /// Polymorphic siblings share their base's partition: Dataset, Model and
    /// Feature are stored under `element`, Direct and Derived under `metric`.
    /// Every other kind is its own partition.
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self {
            EntityKind::Element
            | EntityKind::Dataset
            | EntityKind::Model
            | EntityKind::Feature => "element",
            EntityKind::Metric | EntityKind::Direct | EntityKind::Derived => "metric",
            other => other.discriminator(),
        }
    }

    /// The kind that names this kind's storage partition: the abstract base
    /// for kinds in a shared family, the kind itself otherwise.
    #[must_use]
    pub const fn family_base(&self) -> EntityKind {
        match self {
            EntityKind::Element
            | EntityKind::Dataset
            | EntityKind::Model
            | EntityKind::Feature => EntityKind::Element,
            EntityKind::Metric | EntityKind::Direct | EntityKind::Derived => EntityKind::Metric,
            other => *other,
        }
    }

    /// The distinct storage partitions holding records of this kind
    /// (more than one only for `AssessmentElement`).
    #[must_use]
    pub fn families(&self) -> Vec<&'static str> {
        let mut families = Vec::new();
        for kind in self.concrete_subkinds() {
            let family = kind.family();
            if !families.contains(&family) {
                families.push(family);
            }
        }
        families
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::from_discriminator(s).ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Error returned when parsing an unrecognized kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}
