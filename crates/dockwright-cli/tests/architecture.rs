use std::path::{Path, PathBuf};

use arch_lint::rules::{NoErrorSwallowing, NoSilentResultDrop};
use arch_lint::{Analyzer, Severity};

/// Every crate in the workspace; engine and filesystem failures must reach
/// the caller from each of them.
const CRATES: &[&str] = &[
    "dockwright-core",
    "dockwright-build",
    "dockwright-engine",
    "dockwright",
    "dockwright-cli",
];

fn crate_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates directory")
        .join(name)
}

/// Violation report for one crate's sources, `None` when clean.
fn lint(name: &str) -> Option<String> {
    let analyzer = Analyzer::builder()
        .root(crate_dir(name))
        .exclude("**/target/**")
        .exclude("**/tests/**")
        .rule(NoErrorSwallowing::new())
        .rule(NoSilentResultDrop::new())
        .build()
        .expect("build analyzer");

    let result = analyzer.analyze().expect("analyze");
    result
        .has_violations_at(Severity::Warning)
        .then(|| format!("{name}:\n{}", result.format_test_report(Severity::Warning)))
}

#[test]
fn every_crate_exists() {
    for name in CRATES {
        assert!(crate_dir(name).join("Cargo.toml").exists(), "{name} missing");
    }
}

#[test]
fn no_swallowed_errors_or_dropped_results() {
    let reports: Vec<String> = CRATES.iter().filter_map(|name| lint(name)).collect();

    assert!(reports.is_empty(), "{}", reports.join("\n"));
}
