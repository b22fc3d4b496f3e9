use std::path::PathBuf;

/// One photo in the host application's collection.
///
/// The core never opens `path`; it exists for detector implementations,
/// which may resolve it however they like (decode, sidecar lookup, cache).
#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub id: String,
    pub path: PathBuf,
}

impl Photo {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}
