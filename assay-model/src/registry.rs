//! The static schema registry.
//!
//! One canonical declaration per entity kind, abstract bases included.
//! Built once at startup and never mutated afterwards — immutable
//! configuration, not shared mutable state.

use crate::schema::{FieldDef, Schema};
use crate::status::{DatasetType, EvaluationStatus, Licensing, ProjectStatus};
use crate::EntityKind;
use std::collections::BTreeMap;

/// Holds the schema of every entity kind.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<EntityKind, Schema>,
}

impl SchemaRegistry {
    /// Builds the registry with every kind's canonical schema.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = BTreeMap::new();
        for kind in EntityKind::ALL.iter().copied() {
            schemas.insert(kind, Schema::new(kind, fields_for(kind)));
        }
        Self { schemas }
    }

    /// The schema of the requested kind.
    #[must_use]
    pub fn describe(&self, kind: EntityKind) -> &Schema {
        self.schemas
            .get(&kind)
            .expect("registry covers every kind")
    }

    /// Iterates all registered schemas in kind order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields shared by every kind: the `AssessmentElement` base.
fn base_fields() -> Vec<FieldDef> {
    vec![FieldDef::text("name"), FieldDef::text("description")]
}

/// Fields shared by the concrete Element kinds.
fn element_fields() -> Vec<FieldDef> {
    let mut fields = base_fields();
    fields.push(FieldDef::optional_reference("project", EntityKind::Project));
    fields.push(FieldDef::inverse("referenced_by", EntityKind::Evaluation));
    fields.push(FieldDef::inverse("evaluated_by", EntityKind::Evaluation));
    fields.push(FieldDef::inverse("measures", EntityKind::Measure));
    fields
}

/// Fields shared by the concrete Metric kinds.
fn metric_fields() -> Vec<FieldDef> {
    let mut fields = base_fields();
    fields.push(FieldDef::inverse("derived_by", EntityKind::Derived));
    fields.push(FieldDef::inverse("category", EntityKind::MetricCategory));
    fields.push(FieldDef::inverse("measures", EntityKind::Measure));
    fields
}

fn fields_for(kind: EntityKind) -> Vec<FieldDef> {
    match kind {
        EntityKind::AssessmentElement => base_fields(),
        EntityKind::Element => element_fields(),
        EntityKind::Metric => metric_fields(),

        EntityKind::Project => {
            let mut f = base_fields();
            f.push(FieldDef::enumeration("status", ProjectStatus::VALUES));
            f.push(FieldDef::inverse("involves", EntityKind::Element));
            f.push(FieldDef::inverse(
                "legal_requirements",
                EntityKind::LegalRequirement,
            ));
            f.push(FieldDef::inverse("evaluations", EntityKind::Evaluation));
            f
        }
        EntityKind::Evaluation => {
            let mut f = base_fields();
            f.push(FieldDef::enumeration("status", EvaluationStatus::VALUES));
            f.push(FieldDef::reference("configuration", EntityKind::Configuration));
            f.push(FieldDef::reference("project", EntityKind::Project));
            f.push(FieldDef::edge_set("refs", EntityKind::Element));
            f.push(FieldDef::edge_set("evaluates", EntityKind::Element));
            f.push(FieldDef::inverse("observations", EntityKind::Observation));
            f
        }
        EntityKind::Observation => {
            let mut f = base_fields();
            f.push(FieldDef::text("observer"));
            f.push(FieldDef::timestamp("when_observed"));
            f.push(FieldDef::reference("evaluation", EntityKind::Evaluation));
            f.push(FieldDef::reference("tool", EntityKind::Tool));
            f.push(FieldDef::reference("dataset", EntityKind::Dataset));
            f.push(FieldDef::inverse("measures", EntityKind::Measure));
            f
        }
        EntityKind::ConfParam => {
            let mut f = base_fields();
            f.push(FieldDef::text("param_type"));
            f.push(FieldDef::text("value"));
            f.push(FieldDef::reference("configuration", EntityKind::Configuration));
            f
        }
        EntityKind::Configuration => {
            let mut f = base_fields();
            f.push(FieldDef::inverse("evaluations", EntityKind::Evaluation));
            f.push(FieldDef::inverse("params", EntityKind::ConfParam));
            f
        }
        EntityKind::Tool => {
            let mut f = base_fields();
            f.push(FieldDef::enumeration("licensing", Licensing::VALUES));
            f.push(FieldDef::text("source"));
            f.push(FieldDef::text("version"));
            f.push(FieldDef::inverse("observations", EntityKind::Observation));
            f
        }
        EntityKind::Datashape => {
            let mut f = base_fields();
            f.push(FieldDef::text("accepted_target_values"));
            f.push(FieldDef::inverse("datasets", EntityKind::Dataset));
            f.push(FieldDef::inverse("feature_dates", EntityKind::Feature));
            f.push(FieldDef::inverse("features", EntityKind::Feature));
            f
        }
        EntityKind::Measure => {
            let mut f = base_fields();
            f.push(FieldDef::number("value"));
            f.push(FieldDef::number("uncertainty"));
            f.push(FieldDef::text("error"));
            f.push(FieldDef::text("unit"));
            f.push(FieldDef::reference("observation", EntityKind::Observation));
            f.push(FieldDef::reference("measurand", EntityKind::Element));
            f.push(FieldDef::reference("metric", EntityKind::Metric));
            f
        }
        EntityKind::LegalRequirement => {
            let mut f = base_fields();
            f.push(FieldDef::text("principle"));
            f.push(FieldDef::text("standard"));
            f.push(FieldDef::text("legal_ref"));
            f.push(FieldDef::reference("project", EntityKind::Project));
            f
        }
        EntityKind::Comment => {
            let mut f = base_fields();
            f.push(FieldDef::text("author"));
            f.push(FieldDef::timestamp("posted_at"));
            f
        }
        EntityKind::Dataset => {
            let mut f = element_fields();
            f.push(FieldDef::text("source"));
            f.push(FieldDef::enumeration("dataset_type", DatasetType::VALUES));
            f.push(FieldDef::text("version"));
            f.push(FieldDef::enumeration("licensing", Licensing::VALUES));
            f.push(FieldDef::reference("datashape", EntityKind::Datashape));
            f.push(FieldDef::inverse("observations", EntityKind::Observation));
            f.push(FieldDef::inverse("models", EntityKind::Model));
            f
        }
        EntityKind::Model => {
            let mut f = element_fields();
            f.push(FieldDef::text("pid"));
            f.push(FieldDef::enumeration("licensing", Licensing::VALUES));
            f.push(FieldDef::text("source"));
            f.push(FieldDef::text("data"));
            f.push(FieldDef::reference("dataset", EntityKind::Dataset));
            f
        }
        EntityKind::Feature => {
            let mut f = element_fields();
            f.push(FieldDef::number("min_value"));
            f.push(FieldDef::number("max_value"));
            f.push(FieldDef::text("feature_type"));
            f.push(FieldDef::reference("date_shape", EntityKind::Datashape));
            f.push(FieldDef::reference("value_shape", EntityKind::Datashape));
            f
        }
        EntityKind::Direct => metric_fields(),
        EntityKind::Derived => {
            let mut f = metric_fields();
            f.push(FieldDef::text("expression"));
            f.push(FieldDef::edge_set("base_metric", EntityKind::Metric));
            f
        }
        EntityKind::MetricCategory => {
            let mut f = base_fields();
            f.push(FieldDef::edge_set("metrics", EntityKind::Metric));
            f
        }
    }
}
