//! Record builders.

use sync_model::{
    ChangeMask, LocalResource, LocalState, RepositoryRef, Resource, ResourceChange, SyncRecord,
};

pub const REPOSITORY_URL: &str = "https://svn.example.org/repo";

/// Repository change for `resource` at revision 100.
pub fn change(resource: &Resource, state: LocalState) -> ResourceChange {
    ResourceChange::new(
        resource.clone(),
        state,
        RepositoryRef::new(format!("{}/{}", REPOSITORY_URL, resource.path)).at_revision(100),
        100,
    )
}

/// Record with a local state only; direction is derived.
pub fn local(resource: Resource, state: LocalState) -> SyncRecord {
    SyncRecord::calculate(LocalResource::new(resource, state), None)
}

/// Record with a local state and a local change mask.
pub fn local_masked(resource: Resource, state: LocalState, mask: ChangeMask) -> SyncRecord {
    SyncRecord::calculate(LocalResource::new(resource, state).with_mask(mask), None)
}

/// Record for an unchanged local item with an incoming change.
pub fn incoming(resource: Resource, remote: LocalState) -> SyncRecord {
    let remote = change(&resource, remote);
    SyncRecord::calculate(LocalResource::new(resource, LocalState::Normal), Some(remote))
}

/// Record with changes on both sides.
pub fn both(resource: Resource, local: LocalState, remote: LocalState) -> SyncRecord {
    let remote = change(&resource, remote);
    SyncRecord::calculate(LocalResource::new(resource, local), Some(remote))
}

pub fn file(path: &str) -> Resource {
    Resource::file(path)
}

pub fn folder(path: &str) -> Resource {
    Resource::folder(path)
}
