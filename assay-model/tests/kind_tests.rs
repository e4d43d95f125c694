use assay_model::EntityKind;
use std::str::FromStr;

// ── Hierarchy ─────────────────────────────────────────────────────

#[test]
fn derived_is_a_metric_is_an_assessment_element() {
    assert!(EntityKind::Derived.is_subkind_of(EntityKind::Metric));
    assert!(EntityKind::Derived.is_subkind_of(EntityKind::AssessmentElement));
    assert!(EntityKind::Metric.is_subkind_of(EntityKind::AssessmentElement));
}

#[test]
fn subkind_is_reflexive() {
    for kind in EntityKind::ALL.iter().copied() {
        assert!(kind.is_subkind_of(kind));
    }
}

#[test]
fn element_subkinds() {
    assert!(EntityKind::Dataset.is_subkind_of(EntityKind::Element));
    assert!(EntityKind::Model.is_subkind_of(EntityKind::Element));
    assert!(EntityKind::Feature.is_subkind_of(EntityKind::Element));
    assert!(!EntityKind::Direct.is_subkind_of(EntityKind::Element));
}

#[test]
fn metric_category_is_not_a_metric() {
    // Sibling of Metric under AssessmentElement, not a subkind of it.
    assert!(!EntityKind::MetricCategory.is_subkind_of(EntityKind::Metric));
    assert!(EntityKind::MetricCategory.is_subkind_of(EntityKind::AssessmentElement));
}

#[test]
fn standalone_kinds_have_no_parent() {
    assert_eq!(EntityKind::Project.parent(), None);
    assert_eq!(EntityKind::Tool.parent(), None);
    assert_eq!(EntityKind::Measure.parent(), None);
    assert_eq!(EntityKind::Comment.parent(), None);
}

#[test]
fn project_is_not_under_assessment_element() {
    assert!(!EntityKind::Project.is_subkind_of(EntityKind::AssessmentElement));
}

// ── Concrete subkinds ─────────────────────────────────────────────

#[test]
fn concrete_subkinds_of_metric() {
    let kinds = EntityKind::Metric.concrete_subkinds();
    assert_eq!(kinds, vec![EntityKind::Direct, EntityKind::Derived]);
}

#[test]
fn concrete_subkinds_of_element() {
    let kinds = EntityKind::Element.concrete_subkinds();
    assert_eq!(
        kinds,
        vec![EntityKind::Dataset, EntityKind::Model, EntityKind::Feature]
    );
}

#[test]
fn concrete_subkinds_of_concrete_kind_is_itself() {
    assert_eq!(
        EntityKind::Project.concrete_subkinds(),
        vec![EntityKind::Project]
    );
}

#[test]
fn abstract_kinds_are_not_concrete() {
    assert!(EntityKind::AssessmentElement.is_abstract());
    assert!(EntityKind::Element.is_abstract());
    assert!(EntityKind::Metric.is_abstract());
    assert!(EntityKind::Dataset.is_concrete());
}

// ── Discriminators ────────────────────────────────────────────────

#[test]
fn discriminator_roundtrip() {
    for kind in EntityKind::ALL.iter().copied() {
        let s = kind.discriminator();
        assert_eq!(EntityKind::from_discriminator(s), Some(kind));
    }
}

#[test]
fn from_discriminator_rejects_unknown() {
    assert_eq!(EntityKind::from_discriminator("bogus"), None);
    assert_eq!(EntityKind::from_discriminator(""), None);
    assert_eq!(EntityKind::from_discriminator("NA"), None);
}

#[test]
fn from_str_matches_discriminator() {
    let kind = EntityKind::from_str("metric_category").unwrap();
    assert_eq!(kind, EntityKind::MetricCategory);
    assert!(EntityKind::from_str("nope").is_err());
}

#[test]
fn display_is_discriminator() {
    assert_eq!(EntityKind::ConfParam.to_string(), "conf_param");
    assert_eq!(EntityKind::Derived.to_string(), "derived");
}

#[test]
fn serde_uses_discriminator_strings() {
    let json = serde_json::to_string(&EntityKind::MetricCategory).unwrap();
    assert_eq!(json, "\"metric_category\"");
    let parsed: EntityKind = serde_json::from_str("\"conf_param\"").unwrap();
    assert_eq!(parsed, EntityKind::ConfParam);
}

// ── Storage families ──────────────────────────────────────────────

#[test]
fn element_kinds_share_a_family() {
    assert_eq!(EntityKind::Dataset.family(), "element");
    assert_eq!(EntityKind::Model.family(), "element");
    assert_eq!(EntityKind::Feature.family(), "element");
}

#[test]
fn metric_kinds_share_a_family() {
    assert_eq!(EntityKind::Direct.family(), "metric");
    assert_eq!(EntityKind::Derived.family(), "metric");
    assert_eq!(EntityKind::Metric.family(), "metric");
}

#[test]
fn metric_category_has_its_own_family() {
    assert_eq!(EntityKind::MetricCategory.family(), "metric_category");
}

#[test]
fn standalone_kind_family_is_its_discriminator() {
    assert_eq!(EntityKind::Project.family(), "project");
    assert_eq!(EntityKind::Tool.family(), "tool");
}

#[test]
fn families_of_metric_base() {
    assert_eq!(EntityKind::Metric.families(), vec!["metric"]);
}

#[test]
fn families_of_assessment_element_cover_all_partitions() {
    let families = EntityKind::AssessmentElement.families();
    assert!(families.contains(&"element"));
    assert!(families.contains(&"metric"));
    assert!(families.contains(&"observation"));
    assert!(families.contains(&"conf_param"));
    assert!(families.contains(&"configuration"));
    assert!(families.contains(&"metric_category"));
    // No duplicates even though three element kinds map to one family.
    assert_eq!(families.len(), 6);
}
