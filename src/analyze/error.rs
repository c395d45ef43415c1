use thiserror::Error;

/// Fatal analysis failures.
///
/// Everything local to one catalog entry, one molecule variant, or one
/// pattern probe is recovered inside the pipeline (and logged) instead of
/// surfacing here.
#[derive(Debug, Error)]
pub enum Error {
    /// The primary input could not become a molecule.
    #[error("failed to parse input molecule: {0}")]
    Parse(String),

    /// No catalog entry survived pattern compilation.
    #[error("catalog contains no usable entries ({failed} pattern(s) failed to compile)")]
    EmptyCatalog {
        /// How many definitions failed compilation at load.
        failed: usize,
    },
}
