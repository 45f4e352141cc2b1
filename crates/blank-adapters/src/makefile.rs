//! Makefile lookup on the search path.

use std::path::PathBuf;

use blank_core::{application::ports::FileReader, domain::SearchPath};
use tracing::debug;

/// Extension of makefiles found on the search path.
pub const MAKEFILE_EXTENSION: &str = "mk";

/// The first `<dir>/<target>.mk` that exists, in search order.
pub fn find_makefile(reader: &dyn FileReader, search: &SearchPath, target: &str) -> Option<PathBuf> {
    let name = format!("{target}.{MAKEFILE_EXTENSION}");

    let found = search
        .iter()
        .map(|dir| dir.join(&name))
        .find(|candidate| reader.exists(candidate));

    debug!(makefile = %name, found = ?found, "Makefile lookup");
    found
}
