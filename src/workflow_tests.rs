use super::{
    resolve_config, resolve_project_root, summarize, validate_assets, Outcome, ValidationRequest,
};
use crate::config::{ConfigOverrides, ScanConfig};
use crate::report::{
    no_declaration_report, SummaryStatus, ALL_CLEAR_LINE, MISSING_HEADING, UNUSED_HEADING,
};
use crate::sink::fakes::{RecordingOutput, RecordingProgress};
use std::path::Path;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(path, contents.as_bytes()).expect("write file");
}

fn flutter_project(assets: &[&str]) -> tempfile::TempDir {
    let root = tempfile::tempdir().expect("create temp dir");
    let mut manifest = String::from("name: demo\nflutter:\n  assets:\n");
    for asset in assets {
        manifest.push_str(&format!("    - {asset}\n"));
    }
    write_file(&root.path().join("pubspec.yaml"), &manifest);
    root
}

fn request_for(root: &Path) -> ValidationRequest {
    ValidationRequest {
        project_root: Some(root.to_path_buf()),
        config: ScanConfig::default(),
    }
}

fn run(request: &ValidationRequest) -> (Outcome, RecordingProgress, RecordingOutput) {
    let mut progress = RecordingProgress::default();
    let mut output = RecordingOutput::default();
    let outcome = validate_assets(request, &mut progress, &mut output).expect("validate");
    (outcome, progress, output)
}

fn has_line(output: &RecordingOutput, wanted: &str) -> bool {
    output.lines.iter().any(|line| line == wanted)
}

#[test]
fn present_and_referenced_asset_is_all_clear() {
    let root = flutter_project(&["assets/logo.png"]);
    write_file(&root.path().join("assets/logo.png"), "png");
    write_file(
        &root.path().join("lib/main.dart"),
        "Image.asset('assets/logo.png')",
    );

    let (outcome, progress, output) = run(&request_for(root.path()));

    assert!(!outcome.has_findings());
    assert!(has_line(&output, ALL_CLEAR_LINE));
    assert_eq!(output.clears, 1);
    assert_eq!(output.shows, 1);
    let total: f64 = progress.increments().iter().sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn absent_asset_is_listed_as_missing() {
    let root = flutter_project(&["assets/ghost.png"]);
    write_file(&root.path().join("lib/main.dart"), "'assets/ghost.png'");

    let (outcome, _, output) = run(&request_for(root.path()));

    assert_eq!(
        outcome,
        Outcome::Completed {
            declared: vec!["assets/ghost.png".to_string()],
            missing: vec!["assets/ghost.png".to_string()],
            unused: Vec::new(),
        }
    );
    assert!(has_line(&output, MISSING_HEADING));
    assert!(has_line(&output, "  - 🚫 assets/ghost.png"));
    assert!(!has_line(&output, UNUSED_HEADING));
}

#[test]
fn unreferenced_asset_is_listed_as_unused_only() {
    let root = flutter_project(&["assets/unused.png"]);
    write_file(&root.path().join("assets/unused.png"), "png");
    write_file(&root.path().join("lib/main.dart"), "void main() {}");

    let (outcome, _, output) = run(&request_for(root.path()));

    assert_eq!(
        outcome,
        Outcome::Completed {
            declared: vec!["assets/unused.png".to_string()],
            missing: Vec::new(),
            unused: vec!["assets/unused.png".to_string()],
        }
    );
    assert!(has_line(&output, UNUSED_HEADING));
    assert!(has_line(&output, "  - ⚠️ assets/unused.png"));
    assert!(!has_line(&output, MISSING_HEADING));
}

#[test]
fn missing_manifest_reports_only_the_warning_and_skips_checks() {
    let root = tempfile::tempdir().expect("create temp dir");
    write_file(&root.path().join("lib/main.dart"), "void main() {}");

    let (outcome, progress, output) = run(&request_for(root.path()));

    assert_eq!(outcome, Outcome::NoDeclaration);
    assert_eq!(output.lines, no_declaration_report("pubspec.yaml").lines());
    assert!(progress.events.is_empty());
    assert_eq!(output.shows, 1);
}

#[test]
fn empty_asset_list_is_treated_as_no_declaration() {
    let root = tempfile::tempdir().expect("create temp dir");
    write_file(&root.path().join("pubspec.yaml"), "flutter:\n  assets: []\n");

    let (outcome, progress, _) = run(&request_for(root.path()));

    assert_eq!(outcome, Outcome::NoDeclaration);
    assert!(progress.events.is_empty());
}

#[test]
fn no_root_touches_no_sink() {
    let request = ValidationRequest {
        project_root: None,
        config: ScanConfig::default(),
    };
    let (outcome, progress, output) = run(&request);

    assert_eq!(outcome, Outcome::NoRoot);
    assert!(progress.events.is_empty());
    assert_eq!(output.clears, 0);
    assert_eq!(output.shows, 0);
    assert!(summarize(&request, &outcome).is_none());
}

#[test]
fn malformed_manifest_aborts_the_run() {
    let root = tempfile::tempdir().expect("create temp dir");
    write_file(&root.path().join("pubspec.yaml"), "flutter:\n  assets: [\n");

    let mut progress = RecordingProgress::default();
    let mut output = RecordingOutput::default();
    let result = validate_assets(&request_for(root.path()), &mut progress, &mut output);

    assert!(result.is_err());
    assert_eq!(output.shows, 0);
}

#[test]
fn repeated_runs_produce_identical_reports() {
    let root = flutter_project(&["assets/a.png", "assets/b.png", "assets/a.png"]);
    write_file(&root.path().join("assets/a.png"), "png");
    write_file(&root.path().join("lib/a.dart"), "'assets/a.png'");
    let request = request_for(root.path());

    let (first_outcome, _, first) = run(&request);
    let (second_outcome, _, second) = run(&request);

    assert_eq!(first_outcome, second_outcome);
    assert_eq!(first.lines, second.lines);
}

#[test]
fn results_are_subsets_of_the_declared_list() {
    let root = flutter_project(&["assets/a.png", "assets/b.png", "assets/c/"]);
    write_file(&root.path().join("assets/b.png"), "png");
    write_file(&root.path().join("lib/x.dart"), "'assets/c/'");

    let (outcome, progress, _) = run(&request_for(root.path()));
    let Outcome::Completed {
        declared,
        missing,
        unused,
    } = outcome
    else {
        panic!("expected completed run");
    };

    assert!(missing.iter().all(|asset| declared.contains(asset)));
    assert!(unused.iter().all(|asset| declared.contains(asset)));
    assert_eq!(missing, vec!["assets/a.png", "assets/c/"]);
    assert_eq!(unused, vec!["assets/a.png", "assets/b.png"]);
    assert_eq!(progress.increments().len(), 3);
}

#[test]
fn config_file_redirects_manifest_and_sources() {
    let root = tempfile::tempdir().expect("create temp dir");
    write_file(
        &root.path().join(".assetval.json"),
        r#"{ "manifest": "app/pubspec.yaml", "extensions": ["kt"] }"#,
    );
    write_file(
        &root.path().join("app/pubspec.yaml"),
        "flutter:\n  assets:\n    - assets/logo.png\n",
    );
    write_file(&root.path().join("assets/logo.png"), "png");
    write_file(&root.path().join("src/Main.kt"), "\"assets/logo.png\"");

    let config = resolve_config(Some(root.path()), &ConfigOverrides::default()).expect("config");
    let request = ValidationRequest {
        project_root: Some(root.path().to_path_buf()),
        config,
    };
    let (outcome, _, _) = run(&request);

    assert!(!outcome.has_findings());
    let summary = summarize(&request, &outcome).expect("summary");
    assert_eq!(summary.status, SummaryStatus::Clean);
    assert_eq!(summary.manifest, "app/pubspec.yaml");
}

#[test]
fn project_root_is_first_candidate_when_it_is_a_directory() {
    let first = tempfile::tempdir().expect("create temp dir");
    let second = tempfile::tempdir().expect("create temp dir");

    let root = resolve_project_root(&[first.path().to_path_buf(), second.path().to_path_buf()])
        .expect("resolve")
        .expect("root");
    assert_eq!(root, first.path().canonicalize().expect("canonicalize"));

    let gone = first.path().join("does-not-exist");
    assert_eq!(resolve_project_root(&[gone]).expect("resolve"), None);
}

#[test]
fn phase_labels_precede_per_asset_progress_in_declared_order() {
    let root = flutter_project(&["assets/b.png", "assets/a.png"]);

    let (_, progress, _) = run(&request_for(root.path()));
    let labels: Vec<&str> = progress
        .events
        .iter()
        .map(|(label, _)| label.as_str())
        .collect();

    assert_eq!(
        labels,
        vec![
            "Starting asset validation...",
            "Checking asset placements...",
            "Checking asset usage...",
            "Checking asset usage: assets/b.png",
            "Checking asset usage: assets/a.png",
        ]
    );
    let increments: Vec<Option<f64>> = progress.events.iter().map(|(_, inc)| *inc).collect();
    assert_eq!(increments[..3], [None, None, None]);
    assert!(increments[3..].iter().all(|inc| *inc == Some(50.0)));
}
