//! Shared test helpers: an in-memory entity store and payload builders
//! for the reference graph most tests need.

#![allow(dead_code)]

use assay_engine::EntityStore;
use assay_model::{Entity, EntityKind};
use assay_store::SqliteStore;
use assay_types::EntityId;
use serde_json::json;

pub fn store() -> EntityStore<SqliteStore> {
    EntityStore::new(SqliteStore::open_in_memory().unwrap())
}

pub fn create_project(store: &EntityStore<SqliteStore>, name: &str) -> Entity {
    store
        .create(
            EntityKind::Project,
            &json!({"name": name, "description": "", "status": "Created"}),
        )
        .unwrap()
}

pub fn create_configuration(store: &EntityStore<SqliteStore>, name: &str) -> Entity {
    store
        .create(
            EntityKind::Configuration,
            &json!({"name": name, "description": ""}),
        )
        .unwrap()
}

pub fn create_datashape(store: &EntityStore<SqliteStore>, name: &str) -> Entity {
    store
        .create(
            EntityKind::Datashape,
            &json!({"name": name, "description": "", "accepted_target_values": "any"}),
        )
        .unwrap()
}

pub fn create_dataset(
    store: &EntityStore<SqliteStore>,
    name: &str,
    datashape: EntityId,
) -> Entity {
    store
        .create(
            EntityKind::Dataset,
            &json!({
                "name": name,
                "description": "",
                "source": "local",
                "dataset_type": "Training",
                "version": "1.0",
                "licensing": "Open_Source",
                "datashape": datashape.to_string(),
            }),
        )
        .unwrap()
}

pub fn create_tool(store: &EntityStore<SqliteStore>, name: &str) -> Entity {
    store
        .create(
            EntityKind::Tool,
            &json!({
                "name": name,
                "description": "",
                "licensing": "Open_Source",
                "source": "github",
                "version": "0.1",
            }),
        )
        .unwrap()
}

pub fn create_evaluation(
    store: &EntityStore<SqliteStore>,
    name: &str,
    project: EntityId,
    configuration: EntityId,
) -> Entity {
    store
        .create(
            EntityKind::Evaluation,
            &json!({
                "name": name,
                "description": "",
                "status": "Pending",
                "project": project.to_string(),
                "configuration": configuration.to_string(),
            }),
        )
        .unwrap()
}

pub fn create_observation(
    store: &EntityStore<SqliteStore>,
    name: &str,
    evaluation: EntityId,
    tool: EntityId,
    dataset: EntityId,
) -> Entity {
    store
        .create(
            EntityKind::Observation,
            &json!({
                "name": name,
                "description": "",
                "observer": "alice",
                "when_observed": 1_700_000_000_000_i64,
                "evaluation": evaluation.to_string(),
                "tool": tool.to_string(),
                "dataset": dataset.to_string(),
            }),
        )
        .unwrap()
}

pub fn create_direct(store: &EntityStore<SqliteStore>, name: &str) -> Entity {
    store
        .create(
            EntityKind::Direct,
            &json!({"name": name, "description": ""}),
        )
        .unwrap()
}

pub fn create_derived(
    store: &EntityStore<SqliteStore>,
    name: &str,
    base: &[EntityId],
) -> Entity {
    let base: Vec<String> = base.iter().map(|id| id.to_string()).collect();
    store
        .create(
            EntityKind::Derived,
            &json!({
                "name": name,
                "description": "",
                "expression": "mean(base)",
                "base_metric": base,
            }),
        )
        .unwrap()
}

/// A full minimal graph: project, configuration, evaluation, datashape,
/// dataset, tool, observation.
pub struct Graph {
    pub project: EntityId,
    pub configuration: EntityId,
    pub evaluation: EntityId,
    pub datashape: EntityId,
    pub dataset: EntityId,
    pub tool: EntityId,
    pub observation: EntityId,
}

pub fn seed_graph(store: &EntityStore<SqliteStore>) -> Graph {
    let project = create_project(store, "aurora").id();
    let configuration = create_configuration(store, "defaults").id();
    let evaluation = create_evaluation(store, "run-1", project, configuration).id();
    let datashape = create_datashape(store, "tabular").id();
    let dataset = create_dataset(store, "census", datashape).id();
    let tool = create_tool(store, "profiler").id();
    let observation = create_observation(store, "obs-1", evaluation, tool, dataset).id();
    Graph {
        project,
        configuration,
        evaluation,
        datashape,
        dataset,
        tool,
        observation,
    }
}
