//! Test helpers for writing sample networks and request files.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Six locations; parking at Old Town (2), Museum (4) and Bridge (6).
pub(super) const LOCATIONS_CSV: &str = "\
Location,Id,Code,Parking
Harbour,1,HB,0
Old Town,2,OT,1
Station,3,ST,0
Museum,4,MU,1
Park,5,PK,0
Bridge,6,BR,1
";

/// Links between the sample locations; `X` closes a link to one mode.
pub(super) const DISTANCES_CSV: &str = "\
Location1,Location2,Driving,Walking
HB,OT,4,20
HB,ST,3,15
OT,MU,5,9
ST,MU,8,X
MU,PK,X,6
ST,BR,2,10
BR,PK,X,12
OT,PK,X,14
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}

/// A temporary data directory holding the sample network and one request.
pub(super) struct NetworkFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl NetworkFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("Locations.csv"), LOCATIONS_CSV.as_bytes());
        write_utf8(&root.join("Distances.csv"), DISTANCES_CSV.as_bytes());
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `text` as `request.txt` and return its path.
    pub(super) fn request(&self, text: &str) -> Utf8PathBuf {
        let path = self.root.join("request.txt");
        write_utf8(&path, text.as_bytes());
        path
    }
}

impl std::fmt::Debug for NetworkFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkFiles")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
