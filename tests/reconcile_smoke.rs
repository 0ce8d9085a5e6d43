//! Reconciliation contract through the public API: duplicates collapse,
//! reordering keeps identity, dismiss indices follow the latest list.

use tagdrop_engine::{FieldCore, TagFieldConfig};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn field() -> FieldCore {
    FieldCore::new(375.0, 300.0, TagFieldConfig::default()).unwrap()
}

#[test]
fn duplicate_labels_collapse_and_dismiss_maps_to_input_index() {
    let mut core = field();
    core.set_tags(&labels(&["go", "rust", "go"])).unwrap();

    // Exactly two tracked bodies: "go", "rust"
    assert_eq!(core.tag_count(), 2);
    let tracked: Vec<&str> = core.tracked_tags().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(tracked, vec!["go", "rust"]);

    // Dismissing "go" reports index 0 from the original sequence
    let go_id = core.tracked_tags()[0].id;
    assert_eq!(core.dismiss(go_id), Some(0));

    // "rust" survives with its identity unchanged
    assert_eq!(core.tag_count(), 1);
    assert_eq!(core.tracked_tags()[0].label, "rust");
}

#[test]
fn identity_survives_reorders_and_unrelated_churn() {
    let mut core = field();
    core.set_tags(&labels(&["a", "b", "c"])).unwrap();
    let b_id = core.tracked_tags().iter().find(|t| t.label == "b").unwrap().id;
    let b_body = core.tracked_tags().iter().find(|t| t.label == "b").unwrap().body_id;

    core.set_tags(&labels(&["c", "b", "a"])).unwrap();
    core.set_tags(&labels(&["c", "b", "a", "d"])).unwrap();
    core.set_tags(&labels(&["b", "d"])).unwrap();

    let b = core.tracked_tags().iter().find(|t| t.label == "b").unwrap();
    assert_eq!(b.id, b_id);
    assert_eq!(b.body_id, b_body);

    // Index reported against the latest list
    assert_eq!(core.dismiss(b_id), Some(0));
}

#[test]
fn viewport_rebuild_respawns_every_tag() {
    let mut core = field();
    core.set_tags(&labels(&["go", "rust"])).unwrap();

    core.rebuild(375.0, 400.0).unwrap();

    assert_eq!(core.height(), 400.0);
    assert_eq!(core.frame(), 0);
    assert_eq!(core.tag_count(), 2);
    for tag in core.snapshot().tags {
        assert!(tag.y < 0.0, "respawned tag should drop in from above");
    }
}

#[test]
fn destroyed_core_ignores_everything() {
    let mut core = field();
    core.set_tags(&labels(&["go"])).unwrap();
    core.destroy();
    core.destroy();

    assert!(core.is_destroyed());
    core.set_tags(&labels(&["rust"])).unwrap();
    core.pump(1000.0);
    assert_eq!(core.sample(), 0);
    assert_eq!(core.tag_count(), 0);
}
