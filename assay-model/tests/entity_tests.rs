use assay_model::{
    DerivedMetric, DirectMetric, Entity, EntityKind, EvaluationStatus, Licensing, Project,
    ProjectStatus, Tool, UnresolvedEntity,
};
use assay_types::EntityId;
use pretty_assertions::assert_eq;
use serde_json::json;

fn direct_metric(name: &str) -> DirectMetric {
    DirectMetric {
        id: EntityId::new(),
        name: name.to_string(),
        description: "a metric".to_string(),
        derived_by: vec![],
        category: vec![],
        measures: vec![],
    }
}

// ── type_spec tagging ─────────────────────────────────────────────

#[test]
fn serialized_entity_carries_type_spec() {
    let entity = Entity::Direct(direct_metric("accuracy"));
    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value["type_spec"], "direct");
    assert_eq!(value["name"], "accuracy");
}

#[test]
fn derived_metric_tag_and_fields() {
    let base = EntityId::new();
    let entity = Entity::Derived(DerivedMetric {
        id: EntityId::new(),
        name: "f1".to_string(),
        description: String::new(),
        expression: "2*p*r/(p+r)".to_string(),
        base_metric: vec![base],
        derived_by: vec![],
        category: vec![],
        measures: vec![],
    });
    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value["type_spec"], "derived");
    assert_eq!(value["expression"], "2*p*r/(p+r)");
    assert_eq!(value["base_metric"][0], json!(base.to_string()));
}

#[test]
fn unresolved_serializes_as_na() {
    let entity = Entity::Unresolved(UnresolvedEntity {
        id: EntityId::new(),
        name: "mystery".to_string(),
        description: String::new(),
    });
    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value["type_spec"], "NA");
    assert_eq!(entity.type_spec(), "NA");
    assert!(entity.is_unresolved());
}

#[test]
fn multiword_kind_tags_are_snake_case() {
    let entity = Entity::MetricCategory(assay_model::MetricCategory {
        id: EntityId::new(),
        name: "fairness".to_string(),
        description: String::new(),
        metrics: vec![],
    });
    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value["type_spec"], "metric_category");
}

#[test]
fn entity_deserializes_from_tagged_json() {
    let id = EntityId::new();
    let value = json!({
        "type_spec": "tool",
        "id": id.to_string(),
        "name": "profiler",
        "description": "cpu profiler",
        "licensing": "Open_Source",
        "source": "github",
        "version": "1.2.0",
    });
    let entity: Entity = serde_json::from_value(value).unwrap();
    match entity {
        Entity::Tool(tool) => {
            assert_eq!(tool.id, id);
            assert_eq!(tool.licensing, Licensing::OpenSource);
            // Inverse list absent in the JSON defaults to empty.
            assert!(tool.observations.is_empty());
        }
        other => panic!("expected tool, got {}", other.type_spec()),
    }
}

#[test]
fn entity_serde_roundtrip() {
    let entity = Entity::Project(Project {
        id: EntityId::new(),
        name: "aurora".to_string(),
        description: "pilot study".to_string(),
        status: ProjectStatus::Ready,
        involves: vec![EntityId::new()],
        legal_requirements: vec![],
        evaluations: vec![EntityId::new(), EntityId::new()],
    });
    let json = serde_json::to_string(&entity).unwrap();
    let parsed: Entity = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, entity);
}

// ── Accessors ─────────────────────────────────────────────────────

#[test]
fn id_name_kind_accessors() {
    let metric = direct_metric("precision");
    let id = metric.id;
    let entity = Entity::Direct(metric);
    assert_eq!(entity.id(), id);
    assert_eq!(entity.name(), "precision");
    assert_eq!(entity.kind(), Some(EntityKind::Direct));
    assert_eq!(entity.type_spec(), "direct");
    assert!(!entity.is_unresolved());
}

#[test]
fn unresolved_kind_is_none() {
    let entity = Entity::Unresolved(UnresolvedEntity {
        id: EntityId::new(),
        name: String::new(),
        description: String::new(),
    });
    assert_eq!(entity.kind(), None);
}

// ── Enum wire strings ─────────────────────────────────────────────

#[test]
fn status_enums_use_original_wire_strings() {
    assert_eq!(
        serde_json::to_string(&ProjectStatus::Created).unwrap(),
        "\"Created\""
    );
    assert_eq!(
        serde_json::to_string(&EvaluationStatus::Processing).unwrap(),
        "\"Processing\""
    );
    assert_eq!(
        serde_json::to_string(&Licensing::OpenSource).unwrap(),
        "\"Open_Source\""
    );
}

#[test]
fn out_of_set_enum_value_fails_to_parse() {
    let result: Result<ProjectStatus, _> = serde_json::from_str("\"Launched\"");
    assert!(result.is_err());
}

#[test]
fn tool_serde_roundtrip_with_licensing() {
    let tool = Tool {
        id: EntityId::new(),
        name: "bench".to_string(),
        description: String::new(),
        licensing: Licensing::Proprietary,
        source: "vendor".to_string(),
        version: "3.1".to_string(),
        observations: vec![],
    };
    let json = serde_json::to_string(&tool).unwrap();
    let parsed: Tool = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, tool);
}
