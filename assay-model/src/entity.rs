//! Typed entities and the closed polymorphic union.
//!
//! One struct per concrete kind, tied together by [`Entity`], a tagged
//! union whose serde tag is the stored `type_spec` discriminator. Rows
//! whose discriminator cannot be mapped surface as [`Entity::Unresolved`]
//! (`type_spec = "NA"`) carrying only the base fields.
//!
//! Relationship fields come in two flavors:
//! - owning sides (mandatory/optional N:1 references and owning N:M lists)
//!   are accepted in write payloads;
//! - inverse sides (marked `#[serde(default)]` below) are maintained by the
//!   integrity engine and are read-only to callers.

use crate::{DatasetType, EntityKind, EvaluationStatus, Licensing, ProjectStatus};
use assay_types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A research project grouping elements, evaluations, and legal requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Elements involved in this project (inverse of `Element.project`).
    #[serde(default)]
    pub involves: Vec<EntityId>,
    /// Inverse of `LegalRequirement.project`.
    #[serde(default)]
    pub legal_requirements: Vec<EntityId>,
    /// Inverse of `Evaluation.project`.
    #[serde(default)]
    pub evaluations: Vec<EntityId>,
}

/// A single evaluation run of some elements under a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub status: EvaluationStatus,
    pub configuration: EntityId,
    pub project: EntityId,
    /// Elements this evaluation references.
    #[serde(default)]
    pub refs: Vec<EntityId>,
    /// Elements this evaluation evaluates.
    #[serde(default)]
    pub evaluates: Vec<EntityId>,
    /// Inverse of `Observation.evaluation`.
    #[serde(default)]
    pub observations: Vec<EntityId>,
}

/// A recorded observation taken with a tool over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub observer: String,
    pub when_observed: Timestamp,
    pub evaluation: EntityId,
    pub tool: EntityId,
    pub dataset: EntityId,
    /// Inverse of `Measure.observation`.
    #[serde(default)]
    pub measures: Vec<EntityId>,
}

/// One parameter of a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfParam {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub param_type: String,
    pub value: String,
    pub configuration: EntityId,
}

/// A named set of parameters an evaluation runs under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Inverse of `Evaluation.configuration`.
    #[serde(default)]
    pub evaluations: Vec<EntityId>,
    /// Inverse of `ConfParam.configuration`.
    #[serde(default)]
    pub params: Vec<EntityId>,
}

/// A measurement tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub licensing: Licensing,
    pub source: String,
    pub version: String,
    /// Inverse of `Observation.tool`.
    #[serde(default)]
    pub observations: Vec<EntityId>,
}

/// The shape shared by datasets and features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datashape {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub accepted_target_values: String,
    /// Inverse of `Dataset.datashape`.
    #[serde(default)]
    pub datasets: Vec<EntityId>,
    /// Inverse of `Feature.date_shape`.
    #[serde(default)]
    pub feature_dates: Vec<EntityId>,
    /// Inverse of `Feature.value_shape`.
    #[serde(default)]
    pub features: Vec<EntityId>,
}

/// A single measured value of a metric on a measurand element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub value: f64,
    pub uncertainty: f64,
    pub error: String,
    pub unit: String,
    pub observation: EntityId,
    /// The Element this value was measured on.
    pub measurand: EntityId,
    pub metric: EntityId,
}

/// A legal requirement a project must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalRequirement {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub principle: String,
    pub standard: String,
    pub legal_ref: String,
    pub project: EntityId,
}

/// A freeform annotation; the body lives in `description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub author: String,
    pub posted_at: Timestamp,
}

/// A dataset under assessment (concrete Element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<EntityId>,
    pub source: String,
    pub dataset_type: DatasetType,
    pub version: String,
    pub licensing: Licensing,
    pub datashape: EntityId,
    /// Inverse of `Evaluation.refs`.
    #[serde(default)]
    pub referenced_by: Vec<EntityId>,
    /// Inverse of `Evaluation.evaluates`.
    #[serde(default)]
    pub evaluated_by: Vec<EntityId>,
    /// Inverse of `Measure.measurand`.
    #[serde(default)]
    pub measures: Vec<EntityId>,
    /// Inverse of `Observation.dataset`.
    #[serde(default)]
    pub observations: Vec<EntityId>,
    /// Inverse of `Model.dataset`.
    #[serde(default)]
    pub models: Vec<EntityId>,
}

/// A trained model under assessment (concrete Element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<EntityId>,
    pub pid: String,
    pub licensing: Licensing,
    pub source: String,
    pub data: String,
    /// The dataset this model was trained on.
    pub dataset: EntityId,
    /// Inverse of `Evaluation.refs`.
    #[serde(default)]
    pub referenced_by: Vec<EntityId>,
    /// Inverse of `Evaluation.evaluates`.
    #[serde(default)]
    pub evaluated_by: Vec<EntityId>,
    /// Inverse of `Measure.measurand`.
    #[serde(default)]
    pub measures: Vec<EntityId>,
}

/// A feature of a dataset under assessment (concrete Element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<EntityId>,
    pub min_value: f64,
    pub max_value: f64,
    pub feature_type: String,
    /// Datashape constraining this feature's dates.
    pub date_shape: EntityId,
    /// Datashape constraining this feature's values.
    pub value_shape: EntityId,
    /// Inverse of `Evaluation.refs`.
    #[serde(default)]
    pub referenced_by: Vec<EntityId>,
    /// Inverse of `Evaluation.evaluates`.
    #[serde(default)]
    pub evaluated_by: Vec<EntityId>,
    /// Inverse of `Measure.measurand`.
    #[serde(default)]
    pub measures: Vec<EntityId>,
}

/// A directly measured metric (concrete Metric, no extra fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMetric {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Derived metrics computed from this one (inverse of `Derived.base_metric`).
    #[serde(default)]
    pub derived_by: Vec<EntityId>,
    /// Inverse of `MetricCategory.metrics`.
    #[serde(default)]
    pub category: Vec<EntityId>,
    /// Inverse of `Measure.metric`.
    #[serde(default)]
    pub measures: Vec<EntityId>,
}

/// A metric computed from other metrics (concrete Metric).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub expression: String,
    /// Metrics this one is computed from. Must stay acyclic.
    #[serde(default)]
    pub base_metric: Vec<EntityId>,
    /// Derived metrics computed from this one (inverse of `Derived.base_metric`).
    #[serde(default)]
    pub derived_by: Vec<EntityId>,
    /// Inverse of `MetricCategory.metrics`.
    #[serde(default)]
    pub category: Vec<EntityId>,
    /// Inverse of `Measure.metric`.
    #[serde(default)]
    pub measures: Vec<EntityId>,
}

/// A named grouping of metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCategory {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Metrics in this category.
    #[serde(default)]
    pub metrics: Vec<EntityId>,
}

/// A record whose discriminator could not be mapped to a known concrete
/// kind. Only the base fields survive; everything else in the stored row
/// is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedEntity {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The closed union of every resolvable entity, tagged by `type_spec`.
///
/// Decoding is exhaustive-with-a-default-arm: the resolver maps anything it
/// cannot place to [`Entity::Unresolved`] rather than failing, so one bad
/// row never poisons a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type_spec", rename_all = "snake_case")]
pub enum Entity {
    Project(Project),
    Evaluation(Evaluation),
    Observation(Observation),
    ConfParam(ConfParam),
    Configuration(Configuration),
    Tool(Tool),
    Datashape(Datashape),
    Measure(Measure),
    LegalRequirement(LegalRequirement),
    Comment(Comment),
    Dataset(Dataset),
    Model(Model),
    Feature(Feature),
    Direct(DirectMetric),
    Derived(DerivedMetric),
    MetricCategory(MetricCategory),
    #[serde(rename = "NA")]
    Unresolved(UnresolvedEntity),
}

impl Entity {
    /// The entity's id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Project(e) => e.id,
            Entity::Evaluation(e) => e.id,
            Entity::Observation(e) => e.id,
            Entity::ConfParam(e) => e.id,
            Entity::Configuration(e) => e.id,
            Entity::Tool(e) => e.id,
            Entity::Datashape(e) => e.id,
            Entity::Measure(e) => e.id,
            Entity::LegalRequirement(e) => e.id,
            Entity::Comment(e) => e.id,
            Entity::Dataset(e) => e.id,
            Entity::Model(e) => e.id,
            Entity::Feature(e) => e.id,
            Entity::Direct(e) => e.id,
            Entity::Derived(e) => e.id,
            Entity::MetricCategory(e) => e.id,
            Entity::Unresolved(e) => e.id,
        }
    }

    /// The entity's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Entity::Project(e) => &e.name,
            Entity::Evaluation(e) => &e.name,
            Entity::Observation(e) => &e.name,
            Entity::ConfParam(e) => &e.name,
            Entity::Configuration(e) => &e.name,
            Entity::Tool(e) => &e.name,
            Entity::Datashape(e) => &e.name,
            Entity::Measure(e) => &e.name,
            Entity::LegalRequirement(e) => &e.name,
            Entity::Comment(e) => &e.name,
            Entity::Dataset(e) => &e.name,
            Entity::Model(e) => &e.name,
            Entity::Feature(e) => &e.name,
            Entity::Direct(e) => &e.name,
            Entity::Derived(e) => &e.name,
            Entity::MetricCategory(e) => &e.name,
            Entity::Unresolved(e) => &e.name,
        }
    }

    /// The concrete kind, or `None` for an unresolved record.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Entity::Project(_) => Some(EntityKind::Project),
            Entity::Evaluation(_) => Some(EntityKind::Evaluation),
            Entity::Observation(_) => Some(EntityKind::Observation),
            Entity::ConfParam(_) => Some(EntityKind::ConfParam),
            Entity::Configuration(_) => Some(EntityKind::Configuration),
            Entity::Tool(_) => Some(EntityKind::Tool),
            Entity::Datashape(_) => Some(EntityKind::Datashape),
            Entity::Measure(_) => Some(EntityKind::Measure),
            Entity::LegalRequirement(_) => Some(EntityKind::LegalRequirement),
            Entity::Comment(_) => Some(EntityKind::Comment),
            Entity::Dataset(_) => Some(EntityKind::Dataset),
            Entity::Model(_) => Some(EntityKind::Model),
            Entity::Feature(_) => Some(EntityKind::Feature),
            Entity::Direct(_) => Some(EntityKind::Direct),
            Entity::Derived(_) => Some(EntityKind::Derived),
            Entity::MetricCategory(_) => Some(EntityKind::MetricCategory),
            Entity::Unresolved(_) => None,
        }
    }

    /// The serialized discriminator: the kind's name, or `"NA"` when
    /// unresolved.
    #[must_use]
    pub fn type_spec(&self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.discriminator(),
            None => "NA",
        }
    }

    /// True when this is the unresolved sentinel.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Entity::Unresolved(_))
    }
}
