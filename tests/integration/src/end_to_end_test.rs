//! End-to-end: snapshot document -> viewer models -> command plans -> transfer
//!
//! Exercises the crates together the way a synchronization view does when a
//! user picks a command from the context menu.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;
use sync_model::RepositoryRef;
use sync_select::{CommandKind, CommandPlan, GapPolicy, SnapshotDocument};
use sync_test_utils::workspace::TestWorkspace;
use sync_transfer::{RepositoryRefCodec, ResourceTransfer, TransferOperation};

const SNAPSHOT: &str = r#"
selection:
  - trunk
records:
  - path: trunk
    kind: folder
    state: modified
  - path: trunk/src/lib.rs
    state: modified
  - path: trunk/src/new.rs
    state: new
  - path: trunk/README
    state: normal
    remote:
      state: modified
      url: svn://h/repo/trunk/README
      revision: 7
  - path: trunk/old.txt
    state: normal
    remote:
      state: deleted
      url: svn://h/repo/trunk/old.txt
      revision: 8
  - path: trunk/clash.txt
    state: modified
    remote:
      state: modified
      url: svn://h/repo/trunk/clash.txt
      revision: 9
"#;

fn load(workspace: &TestWorkspace, name: &str, text: &str) -> SnapshotDocument {
    SnapshotDocument::load(&workspace.write(name, text)).unwrap()
}

fn paths<'a>(resources: impl IntoIterator<Item = &'a sync_model::Resource>) -> Vec<String> {
    resources.into_iter().map(|r| r.path.to_string()).collect()
}

#[test]
fn test_both_models_plan_every_command_alike() {
    let workspace = TestWorkspace::new();
    let document = load(&workspace, "snapshot.yaml", SNAPSHOT);
    let ctx = document.context();
    let flat = document.diff_model().unwrap();
    let tree = document.node_model().unwrap();

    for command in CommandKind::ALL {
        let from_flat = CommandPlan::build(&ctx, &flat, command);
        let from_tree = CommandPlan::build(&ctx, &tree, command);
        assert_eq!(paths(&from_flat.resources), paths(&from_tree.resources), "{command}");
        assert_eq!(paths(&from_flat.deleted), paths(&from_tree.deleted), "{command}");
    }
}

#[test]
fn test_update_plan_transfers_its_originators() {
    let workspace = TestWorkspace::new();
    let document = load(&workspace, "snapshot.yaml", SNAPSHOT);
    let ctx = document.context();
    let model = document.node_model().unwrap();

    let plan = CommandPlan::build(&ctx, &model, CommandKind::Update);
    let originators: Vec<RepositoryRef> = plan
        .records
        .iter()
        .filter_map(|record| record.remote_change())
        .map(|change| change.originator.clone())
        .collect();
    assert_eq!(originators.len(), 3);

    let transfer = ResourceTransfer::new(RepositoryRefCodec);
    let bytes = transfer.encode(TransferOperation::Copy, &originators).unwrap();
    let decoded = transfer.decode(&bytes).unwrap();

    let sent: BTreeSet<String> = originators.iter().map(RepositoryRef::key).collect();
    let received: BTreeSet<String> = decoded.resources.iter().map(RepositoryRef::key).collect();
    assert_eq!(received, sent);
    assert!(received.contains("svn://h/repo/trunk/old.txt@8"));
}

#[test]
fn test_commit_leaves_incoming_only_changes_behind() {
    let workspace = TestWorkspace::new();
    let document = load(&workspace, "snapshot.yaml", SNAPSHOT);
    let ctx = document.context();
    let model = document.diff_model().unwrap();

    let plan = CommandPlan::build(&ctx, &model, CommandKind::Commit);
    let selected = paths(&plan.resources);
    assert!(selected.contains(&"trunk/src/lib.rs".to_string()));
    assert!(selected.contains(&"trunk/src/new.rs".to_string()));
    assert!(!selected.contains(&"trunk/README".to_string()));
    assert!(!selected.contains(&"trunk/clash.txt".to_string()));
}

#[rstest]
#[case(GapPolicy::Tunnel, vec!["trunk", "trunk/a/b/x.txt"])]
#[case(GapPolicy::Terminate, vec!["trunk/a/b/x.txt"])]
fn test_gap_policy_is_read_from_the_document(#[case] policy: GapPolicy, #[case] expected: Vec<&str>) {
    let name = match policy {
        GapPolicy::Tunnel => "tunnel",
        GapPolicy::Terminate => "terminate",
    };
    let text = format!(
        r#"
selection = ["trunk"]

[selector]
gap_policy = "{name}"

[[records]]
path = "trunk"
kind = "folder"
state = "normal"

[[records]]
path = "trunk/a/b/x.txt"
state = "added"
"#
    );
    let workspace = TestWorkspace::new();
    let document = load(&workspace, "gap.toml", &text);
    assert_eq!(document.selector.gap_policy, policy);

    let ctx = document.context();
    for plan in [
        CommandPlan::build(&ctx, &document.diff_model().unwrap(), CommandKind::Commit),
        CommandPlan::build(&ctx, &document.node_model().unwrap(), CommandKind::Commit),
    ] {
        assert_eq!(paths(&plan.resources), expected);
    }
}
