//! Selection scenarios, run against both model shapes

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use sync_filter::{DirectionFilter, StandardFilter, StateFilterWrapper, SyncStateFilter, canonical};
use sync_model::{LocalState, Resource, SyncRecord};
use sync_select::{
    DiffTreeModel, Error, ErrorReporter, GapPolicy, NodeTreeModel, ResourceSelector, SelectionModel,
    SelectorConfig, SyncContext, SyncInfoProvider, SyncSnapshot,
};
use sync_test_utils::scenarios::{self, Scenario};

#[derive(Debug, Clone, Copy)]
enum Shape {
    Flat,
    Tree,
}

fn model(shape: Shape, scenario: &Scenario) -> Box<dyn SelectionModel> {
    let snapshot = SyncSnapshot::new(scenario.records.clone());
    match shape {
        Shape::Flat => Box::new(DiffTreeModel::new(snapshot.resources(), scenario.selection.clone())),
        Shape::Tree => {
            let mut tree = NodeTreeModel::from_snapshot(&snapshot);
            for resource in &scenario.selection {
                let nodes = tree.find_all(&resource.path).to_vec();
                assert!(!nodes.is_empty(), "selected resource is in the tree");
                for node in nodes {
                    tree.select(node);
                }
            }
            Box::new(tree)
        }
    }
}

fn select(
    shape: Shape,
    scenario: &Scenario,
    config: SelectorConfig,
    direction: &DirectionFilter,
    filter: &dyn SyncStateFilter,
) -> Vec<String> {
    let ctx = SyncContext::new(Arc::new(SyncSnapshot::new(scenario.records.clone()))).with_config(config);
    let model = model(shape, scenario);
    ResourceSelector::new(&ctx, model.as_ref())
        .select_resources(direction, filter)
        .into_iter()
        .map(|resource| resource.path.to_string())
        .collect()
}

#[rstest]
fn group_walk_stops_at_first_selected_ancestor(#[values(Shape::Flat, Shape::Tree)] shape: Shape) {
    let filter = StateFilterWrapper::new(StandardFilter::Added, true);
    let result = select(
        shape,
        &scenarios::group_stop(),
        SelectorConfig::default(),
        &DirectionFilter::all(),
        &filter,
    );
    assert_eq!(result, vec!["root/a", "root/a/b/File.txt"]);
}

#[rstest]
fn terminate_policy_abandons_branch_at_gap(#[values(Shape::Flat, Shape::Tree)] shape: Shape) {
    let filter = StateFilterWrapper::new(StandardFilter::Added, true);
    let config = SelectorConfig {
        gap_policy: GapPolicy::Terminate,
        ..SelectorConfig::default()
    };
    let result = select(shape, &scenarios::group_stop(), config, &DirectionFilter::all(), &filter);
    assert_eq!(result, vec!["root/a/b/File.txt"]);
}

#[rstest]
fn without_group_nodes_only_direct_matches(#[values(Shape::Flat, Shape::Tree)] shape: Shape) {
    let filter = StateFilterWrapper::new(StandardFilter::Added, false);
    let result = select(
        shape,
        &scenarios::group_stop(),
        SelectorConfig::default(),
        &DirectionFilter::all(),
        &filter,
    );
    assert_eq!(result, vec!["root/a/b/File.txt"]);
}

#[rstest]
fn remote_deletion_selects_child_only(#[values(Shape::Flat, Shape::Tree)] shape: Shape) {
    let result = select(
        shape,
        &scenarios::deleted_child(),
        SelectorConfig::default(),
        &DirectionFilter::all(),
        &canonical::remote_deleted(true),
    );
    assert_eq!(result, vec!["trunk/docs/old.txt"]);
}

#[rstest]
fn unversioned_external_parent_is_skipped(#[values(Shape::Flat, Shape::Tree)] shape: Shape) {
    let filter = StateFilterWrapper::new(StandardFilter::Added, true);
    let result = select(
        shape,
        &scenarios::external_parent(),
        SelectorConfig::default(),
        &DirectionFilter::all(),
        &filter,
    );
    assert_eq!(result, vec!["trunk", "trunk/ext/lib.c"]);
}

#[rstest]
fn commit_pair_excludes_obstructed(#[values(Shape::Flat, Shape::Tree)] shape: Shape) {
    let direction = DirectionFilter::outgoing().reject_local(StandardFilter::Obstructed);
    let filter = StateFilterWrapper::new(StandardFilter::All, false);
    let result = select(
        shape,
        &scenarios::obstructed_commit(),
        SelectorConfig::default(),
        &direction,
        &filter,
    );
    assert_eq!(result, vec!["trunk/edited.txt"]);
}

#[rstest]
#[case(DirectionFilter::incoming(), vec!["trunk/removed.txt", "trunk/theirs.txt"])]
#[case(DirectionFilter::conflicting(), vec!["trunk/clash.txt"])]
#[case(
    DirectionFilter::outgoing(),
    vec!["trunk", "trunk/added.txt", "trunk/gone.txt", "trunk/new.txt"]
)]
fn direction_filter_runs_before_state_filter(#[case] direction: DirectionFilter, #[case] expected: Vec<&str>) {
    let result = select(
        Shape::Flat,
        &scenarios::mixed(),
        SelectorConfig::default(),
        &direction,
        &canonical::all(false),
    );
    assert_eq!(result, expected);
}

#[test]
fn remote_match_qualifies_regardless_of_local_state() {
    let scenario = scenarios::mixed();
    let filter = StateFilterWrapper::with_remote(StandardFilter::New, StandardFilter::Deleted, false);
    let result = select(
        Shape::Tree,
        &scenario,
        SelectorConfig::default(),
        &DirectionFilter::all(),
        &filter,
    );
    assert_eq!(result, vec!["trunk/new.txt", "trunk/removed.txt"]);
}

#[test]
fn select_records_includes_group_node_records() {
    let scenario = scenarios::group_stop();
    let snapshot = SyncSnapshot::new(scenario.records.clone());
    let ctx = SyncContext::new(Arc::new(snapshot.clone()));
    let model = DiffTreeModel::new(snapshot.resources(), scenario.selection.clone());

    let records = ResourceSelector::new(&ctx, &model).select_records(
        &DirectionFilter::all(),
        &StateFilterWrapper::new(StandardFilter::Added, true),
    );
    let states: Vec<LocalState> = records.iter().map(|record| record.local().state).collect();
    assert_eq!(states, vec![LocalState::Modified, LocalState::Added]);
}

/// Provider failing for one path and delegating otherwise.
struct FlakyProvider {
    inner: SyncSnapshot,
    failing: &'static str,
}

impl SyncInfoProvider for FlakyProvider {
    fn sync_info(&self, resource: &Resource) -> sync_select::Result<Option<Arc<SyncRecord>>> {
        if resource.path.as_str() == self.failing {
            return Err(Error::lookup(&resource.path, "repository unreachable"));
        }
        self.inner.sync_info(resource)
    }
}

#[derive(Default)]
struct RecordingReporter {
    seen: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: &str, _error: &Error) {
        self.seen.lock().unwrap().push(context.to_string());
    }
}

#[rstest]
fn lookup_failures_are_reported_and_excluded(#[values(Shape::Flat, Shape::Tree)] shape: Shape) {
    let scenario = scenarios::group_stop();
    let snapshot = SyncSnapshot::new(scenario.records.clone());
    let model = model(shape, &scenario);
    let reporter = Arc::new(RecordingReporter::default());
    let ctx = SyncContext::new(Arc::new(FlakyProvider {
        inner: snapshot,
        failing: "root/a",
    }))
    .with_reporter(reporter.clone());

    let result: BTreeSet<String> = ResourceSelector::new(&ctx, model.as_ref())
        .select_resources(&DirectionFilter::all(), &canonical::all(true))
        .into_iter()
        .map(|resource| resource.path.to_string())
        .collect();

    // root/a fails both as a direct candidate and as a group node
    assert_eq!(
        result,
        BTreeSet::from(["root".to_string(), "root/a/b/File.txt".to_string()])
    );
    assert!(!reporter.seen.lock().unwrap().is_empty());
    assert!(reporter.seen.lock().unwrap().iter().all(|path| path == "root/a"));
}
