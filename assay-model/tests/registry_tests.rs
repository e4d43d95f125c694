use assay_model::{
    Cardinality, Direction, EntityKind, FieldDef, FieldType, Schema, SchemaRegistry,
};
use pretty_assertions::assert_eq;

// ── Registry coverage ─────────────────────────────────────────────

#[test]
fn registry_describes_every_kind() {
    let registry = SchemaRegistry::new();
    for kind in EntityKind::ALL.iter().copied() {
        let schema = registry.describe(kind);
        assert_eq!(schema.kind, kind);
        assert!(schema.field("name").is_some(), "{kind} missing name");
        assert!(
            schema.field("description").is_some(),
            "{kind} missing description"
        );
    }
}

#[test]
fn abstract_bases_are_describable() {
    let registry = SchemaRegistry::new();
    let element = registry.describe(EntityKind::Element);
    assert!(element.field("project").is_some());
    let metric = registry.describe(EntityKind::Metric);
    assert!(metric.field("derived_by").is_some());
}

// ── Relationship declarations ─────────────────────────────────────

#[test]
fn observation_references_are_mandatory() {
    let registry = SchemaRegistry::new();
    let schema = registry.describe(EntityKind::Observation);
    for field in ["evaluation", "tool", "dataset"] {
        let def = schema.field(field).unwrap();
        assert!(def.required, "{field} should be required");
        let rel = def.relation.as_ref().unwrap();
        assert_eq!(rel.cardinality, Cardinality::One);
        assert_eq!(rel.direction, Direction::Owning);
    }
}

#[test]
fn measurand_targets_the_abstract_element() {
    let registry = SchemaRegistry::new();
    let schema = registry.describe(EntityKind::Measure);
    let rel = schema.field("measurand").unwrap().relation.as_ref().unwrap();
    assert_eq!(rel.target, EntityKind::Element);
    assert_eq!(rel.cardinality, Cardinality::One);
}

#[test]
fn element_project_is_optional() {
    let registry = SchemaRegistry::new();
    let schema = registry.describe(EntityKind::Dataset);
    let def = schema.field("project").unwrap();
    assert!(!def.required);
    assert_eq!(
        def.relation.as_ref().unwrap().cardinality,
        Cardinality::OptionalOne
    );
}

#[test]
fn derived_base_metric_is_owning_many() {
    let registry = SchemaRegistry::new();
    let schema = registry.describe(EntityKind::Derived);
    let rel = schema
        .field("base_metric")
        .unwrap()
        .relation
        .as_ref()
        .unwrap();
    assert_eq!(rel.target, EntityKind::Metric);
    assert_eq!(rel.cardinality, Cardinality::Many);
    assert_eq!(rel.direction, Direction::Owning);
}

#[test]
fn inverse_lists_are_marked_inverse() {
    let registry = SchemaRegistry::new();
    let project = registry.describe(EntityKind::Project);
    for field in ["involves", "legal_requirements", "evaluations"] {
        assert!(
            project.field(field).unwrap().is_inverse_relation(),
            "{field} should be inverse"
        );
    }
    let config = registry.describe(EntityKind::Configuration);
    assert!(config.field("evaluations").unwrap().is_inverse_relation());
    assert!(config.field("params").unwrap().is_inverse_relation());
}

#[test]
fn dataset_inherits_element_fields() {
    let registry = SchemaRegistry::new();
    let schema = registry.describe(EntityKind::Dataset);
    // Element base fields.
    assert!(schema.field("project").is_some());
    assert!(schema.field("referenced_by").is_some());
    assert!(schema.field("evaluated_by").is_some());
    assert!(schema.field("measures").is_some());
    // Dataset's own.
    assert!(schema.field("dataset_type").is_some());
    assert!(schema.field("datashape").unwrap().required);
}

#[test]
fn feature_has_two_datashape_references() {
    let registry = SchemaRegistry::new();
    let schema = registry.describe(EntityKind::Feature);
    for field in ["date_shape", "value_shape"] {
        let rel = schema.field(field).unwrap().relation.as_ref().unwrap();
        assert_eq!(rel.target, EntityKind::Datashape);
        assert_eq!(rel.cardinality, Cardinality::One);
    }
}

#[test]
fn enum_fields_carry_their_options() {
    let registry = SchemaRegistry::new();
    let schema = registry.describe(EntityKind::Project);
    let status = schema.field("status").unwrap();
    assert_eq!(status.field_type, FieldType::Enum);
    assert_eq!(
        status.enum_options.as_deref().unwrap(),
        ["Created", "Pending", "Ready", "Closed", "Archived"]
    );

    let tool = registry.describe(EntityKind::Tool);
    assert_eq!(
        tool.field("licensing").unwrap().enum_options.as_deref().unwrap(),
        ["Proprietary", "Open_Source"]
    );
}

#[test]
fn direct_metric_has_no_extra_fields_over_metric() {
    let registry = SchemaRegistry::new();
    let direct = registry.describe(EntityKind::Direct);
    let metric = registry.describe(EntityKind::Metric);
    assert_eq!(direct.fields.len(), metric.fields.len());
}

// ── Schema equality ───────────────────────────────────────────────

#[test]
fn schema_equality_ignores_field_order() {
    let a = Schema::new(
        EntityKind::Comment,
        vec![
            FieldDef::text("name"),
            FieldDef::text("description"),
            FieldDef::text("author"),
            FieldDef::timestamp("posted_at"),
        ],
    );
    let b = Schema::new(
        EntityKind::Comment,
        vec![
            FieldDef::timestamp("posted_at"),
            FieldDef::text("author"),
            FieldDef::text("name"),
            FieldDef::text("description"),
        ],
    );
    assert_eq!(a, b);
}

#[test]
fn schema_equality_is_sensitive_to_content() {
    let a = Schema::new(EntityKind::Comment, vec![FieldDef::text("author")]);
    let b = Schema::new(EntityKind::Comment, vec![FieldDef::number("author")]);
    assert_ne!(a, b);

    let c = Schema::new(EntityKind::Comment, vec![FieldDef::text("writer")]);
    assert_ne!(a, c);
}

#[test]
fn schemas_of_different_kinds_differ() {
    let registry = SchemaRegistry::new();
    assert_ne!(
        registry.describe(EntityKind::Direct),
        registry.describe(EntityKind::Metric)
    );
}
