//! Canned scenarios: a record set plus the resources selected in the viewer.

use crate::records::{file, folder, incoming, local, local_masked};
use sync_model::{ChangeMask, LocalState, Resource, SyncRecord};

/// Records and a selection over them.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub records: Vec<SyncRecord>,
    pub selection: Vec<Resource>,
}

/// `root`, `root/a` and `root/a/b/File.txt`, with `root` and `root/a`
/// selected. The file is added, the two folders are modified and
/// `root/a/b` has no record at all.
pub fn group_stop() -> Scenario {
    Scenario {
        records: vec![
            local(folder("root"), LocalState::Modified),
            local(folder("root/a"), LocalState::Modified),
            local(file("root/a/b/File.txt"), LocalState::Added),
        ],
        selection: vec![folder("root"), folder("root/a")],
    }
}

/// A folder without a record whose only change is the incoming deletion of
/// its child. The folder is selected.
pub fn deleted_child() -> Scenario {
    Scenario {
        records: vec![incoming(file("trunk/docs/old.txt"), LocalState::Deleted)],
        selection: vec![folder("trunk/docs")],
    }
}

/// An added file below an unversioned external folder, below a selected
/// versioned folder.
pub fn external_parent() -> Scenario {
    Scenario {
        records: vec![
            local(folder("trunk"), LocalState::Modified),
            local_masked(
                folder("trunk/ext"),
                LocalState::Ignored,
                ChangeMask::SVN_EXTERNALS,
            ),
            local(file("trunk/ext/lib.c"), LocalState::Added),
        ],
        selection: vec![folder("trunk")],
    }
}

/// An outgoing, obstructed file next to a plain outgoing modification.
pub fn obstructed_commit() -> Scenario {
    Scenario {
        records: vec![
            local(file("trunk/blocked.txt"), LocalState::Obstructed),
            local(file("trunk/edited.txt"), LocalState::Modified),
        ],
        selection: vec![folder("trunk")],
    }
}

/// A mix of every direction below one selected folder.
pub fn mixed() -> Scenario {
    Scenario {
        records: vec![
            local(folder("trunk"), LocalState::Modified),
            local(file("trunk/added.txt"), LocalState::Added),
            local(file("trunk/gone.txt"), LocalState::Deleted),
            incoming(file("trunk/theirs.txt"), LocalState::Modified),
            incoming(file("trunk/removed.txt"), LocalState::Deleted),
            crate::records::both(file("trunk/clash.txt"), LocalState::Modified, LocalState::Modified),
            local(file("trunk/new.txt"), LocalState::New),
            local_masked(file("trunk/locked.txt"), LocalState::Normal, ChangeMask::LOCKED),
        ],
        selection: vec![folder("trunk")],
    }
}
