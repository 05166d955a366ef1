use std::{fs, path::PathBuf};

use tempfile::tempdir;

use solpack_cli::{Args, SceneKind, run};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .csv files from a directory
fn collect_csv_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("csv")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: PathBuf, output: PathBuf, scene: SceneKind) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        scene,
        container: None,
        seed: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_every_scene() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for scene in [SceneKind::Packing, SceneKind::Orbit] {
        let output = temp_dir.path().join(format!("{scene:?}.svg"));
        let args = args(fixtures().join("sol_data.csv"), output.clone(), scene);

        if let Err(err) = run(&args) {
            panic!("{scene:?} scene failed: {err}");
        }

        let svg = fs::read_to_string(&output).expect("SVG should be written");
        assert!(svg.starts_with("<svg"), "{scene:?} output should be SVG");
        assert!(svg.contains("data-name=\"Jupiter\""));
    }
}

#[test]
fn e2e_smoke_test_container_and_seed() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("jupiter.svg");

    let mut args = args(fixtures().join("sol_data.csv"), output.clone(), SceneKind::Packing);
    args.container = Some("Jupiter".to_string());
    args.seed = Some(7);
    run(&args).expect("Packing into Jupiter should succeed");

    let svg = fs::read_to_string(&output).expect("SVG should be written");
    assert!(svg.contains("relative to Jupiter"));
    assert!(!svg.contains("data-name=\"Jupiter\""));
}

#[test]
fn e2e_smoke_test_unknown_container() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("vulcan.svg");

    let mut args = args(fixtures().join("sol_data.csv"), output.clone(), SceneKind::Packing);
    args.container = Some("Vulcan".to_string());

    assert!(run(&args).is_err());
    assert!(!output.exists());
}

#[test]
fn e2e_smoke_test_explicit_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(
        &config,
        "[layout]\nmax_steps = 20\n\n[orbit]\nlabels = \"all\"\n",
    )
    .expect("Failed to write config");
    let output = temp_dir.path().join("orbit.svg");

    let mut args = args(fixtures().join("sol_data.csv"), output.clone(), SceneKind::Orbit);
    args.config = Some(config.to_string_lossy().to_string());
    run(&args).expect("Orbit scene should succeed");

    let svg = fs::read_to_string(&output).expect("SVG should be written");
    // the root plus 22 dataset bodies, every one labeled
    assert!(svg.matches("<text").count() >= 23);
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_fixtures = collect_csv_files(fixtures().join("errors"));

    assert!(
        !error_fixtures.is_empty(),
        "No error fixtures found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture in &error_fixtures {
        let output = temp_dir.path().join(format!(
            "error_{}.svg",
            fixture.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(fixture.clone(), output, SceneKind::Packing)).is_ok() {
            unexpectedly_succeeded.push(fixture.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError fixtures that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error fixture(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}
