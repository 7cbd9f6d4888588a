//! Tests for record classification, identity and serialization

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use sync_model::{
    ChangeKind, ChangeMask, Direction, LocalResource, LocalState, RepositoryRef, Resource,
    ResourceChange, ResourcePath, SyncRecord,
};

fn change(path: &str, state: LocalState) -> ResourceChange {
    ResourceChange::new(
        Resource::file(path),
        state,
        RepositoryRef::new(format!("https://svn.example.org/repo/{}", path)),
        100,
    )
}

#[rstest]
#[case(LocalState::Added, None, Direction::Outgoing, ChangeKind::Addition)]
#[case(LocalState::Deleted, None, Direction::Outgoing, ChangeKind::Deletion)]
#[case(LocalState::Missing, None, Direction::Outgoing, ChangeKind::Deletion)]
#[case(LocalState::Normal, None, Direction::InSync, ChangeKind::None)]
#[case(LocalState::Normal, Some(LocalState::Added), Direction::Incoming, ChangeKind::Addition)]
#[case(LocalState::Normal, Some(LocalState::Modified), Direction::Incoming, ChangeKind::Change)]
#[case(LocalState::Modified, Some(LocalState::Deleted), Direction::Conflicting, ChangeKind::Change)]
#[case(LocalState::Conflicting, None, Direction::Conflicting, ChangeKind::Change)]
#[case(LocalState::Obstructed, None, Direction::Outgoing, ChangeKind::Change)]
fn classifies_direction_and_kind(
    #[case] local: LocalState,
    #[case] remote: Option<LocalState>,
    #[case] direction: Direction,
    #[case] kind: ChangeKind,
) {
    let record = SyncRecord::calculate(
        LocalResource::new(Resource::file("root/a.txt"), local),
        remote.map(|state| change("root/a.txt", state)),
    );
    assert_eq!(record.direction(), direction);
    assert_eq!(record.kind(), kind);
}

#[test]
fn property_only_modification_is_outgoing() {
    let local = LocalResource::new(Resource::folder("root"), LocalState::Normal)
        .with_prop_state(LocalState::Modified);
    let record = SyncRecord::calculate(local, None);
    assert_eq!(record.direction(), Direction::Outgoing);
    assert_eq!(record.kind(), ChangeKind::Change);
}

#[test]
fn remote_variant_falls_back_to_local() {
    let local = LocalResource::new(Resource::file("root/a.txt"), LocalState::Modified);
    let record = SyncRecord::calculate(local.clone(), None);
    assert_eq!(record.remote().view().state, LocalState::Modified);
    assert!(!record.remote().is_on_repository());
}

#[test]
fn record_survives_json_round_trip() {
    let local = LocalResource::new(Resource::file("root/a.txt"), LocalState::Modified)
        .with_mask(ChangeMask::LOCKED | ChangeMask::TEXT_MODIFIED);
    let record = SyncRecord::calculate(local, Some(change("root/a.txt", LocalState::Modified)));

    let json = serde_json::to_string(&record).unwrap();
    let back: SyncRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn local_resource_reads_from_toml() {
    let text = r#"
        state = "missing"
        mask = "LOCKED | SWITCHED"

        [resource]
        path = "root/lib/mod.rs"
        kind = "file"
    "#;
    let local: LocalResource = toml::from_str(text).unwrap();
    assert_eq!(local.state, LocalState::Missing);
    assert!(local.mask.contains(ChangeMask::LOCKED));
    assert!(local.mask.contains(ChangeMask::SWITCHED));
    assert_eq!(local.resource.path.as_str(), "root/lib/mod.rs");
}

proptest! {
    #[test]
    fn normalized_paths_have_no_empty_segments(s in "[a-z/\\\\]{0,24}") {
        let path = ResourcePath::from(s.as_str());
        prop_assert!(!path.as_str().contains('\\'));
        prop_assert!(!path.as_str().contains("//"));
        prop_assert!(path.as_str() == "/" || !path.as_str().ends_with('/'));
    }

    #[test]
    fn every_ancestor_contains_the_path(segments in proptest::collection::vec("[a-z]{1,6}", 1..6)) {
        let path = ResourcePath::from(segments.join("/"));
        for ancestor in path.ancestors() {
            prop_assert!(ancestor.contains(&path));
            prop_assert!(ancestor.depth() < path.depth());
        }
    }
}
