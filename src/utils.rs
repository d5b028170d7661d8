//! Filename helpers for persisted records

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9A-Za-z_]").expect("fixed character class"));

/// Derive a filesystem-safe filename stem from a record title.
///
/// Every character outside `[0-9A-Za-z_]` becomes `_`. The mapping is a pure
/// function of the title, so re-running a fetch targets the same file. Two
/// distinct titles can collide if they only differ in replaced characters;
/// collisions resolve as last-write-wins.
///
/// # Examples
///
/// ```
/// use diseasedx_dl::utils::sanitize_title;
///
/// assert_eq!(sanitize_title("Type 2 Diabetes"), "Type_2_Diabetes");
/// assert_eq!(sanitize_title("BRCA1/BRCA2"), "BRCA1_BRCA2");
/// ```
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    NON_WORD.replace_all(title, "_").into_owned()
}

/// The output path for a record: `{output_dir}/{sanitized_title}.json`
///
/// # Examples
///
/// ```
/// use diseasedx_dl::utils::record_path;
/// use std::path::Path;
///
/// let path = record_path(Path::new("data/disease"), "Type 2 Diabetes");
/// assert_eq!(path, Path::new("data/disease/Type_2_Diabetes.json"));
/// ```
#[must_use]
pub fn record_path(output_dir: &Path, title: &str) -> PathBuf {
    output_dir.join(format!("{}.json", sanitize_title(title)))
}
