#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the registered kind vocabulary.

use quicklinks::kinds;

/// Snapshot of every kind with its mandatory and optional parameters.
///
/// Any addition, removal, or schema change fails this test, prompting a
/// deliberate snapshot update.
#[test]
fn kind_schemas() {
    let lines: Vec<String> = kinds::all_kinds()
        .iter()
        .map(|k| {
            format!(
                "{}: mandatory [{}] optional [{}]",
                k.name(),
                k.mandatory().join(", "),
                k.optional().join(", ")
            )
        })
        .collect();
    insta::assert_snapshot!("kind_schemas", lines.join("\n"));
}
