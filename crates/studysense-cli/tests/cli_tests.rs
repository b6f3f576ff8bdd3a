//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studysense() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("studysense").unwrap();
    cmd.env_remove("STUDYSENSE_LIMIT")
        .env_remove("STUDYSENSE_CATALOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Run from an empty directory with an empty HOME so no config file is found.
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = studysense();
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    cmd
}

const VISUAL_PROFILE: &str = r#"{
    "name": "Ana",
    "style": {"visual": 0.5, "auditory": 0.2, "reading_writing": 0.2, "kinesthetic": 0.1},
    "created_at": "2025-01-01T00:00:00Z"
}"#;

const HISTORY_PROFILE: &str = r#"{
    "name": "Ben",
    "style": {"visual": 0.2, "auditory": 0.2, "reading_writing": 0.4, "kinesthetic": 0.2},
    "created_at": "2025-01-01T00:00:00Z",
    "quiz_results": [
        {"score": 64, "topic": "algebra", "time_spent": 30, "completed_at": "2025-01-02T10:00:00Z"},
        {"score": 72, "topic": "algebra", "time_spent": 28, "completed_at": "2025-01-03T10:00:00Z"},
        {"score": 86, "topic": "geometry", "time_spent": 25, "completed_at": "2025-01-04T10:00:00Z"}
    ],
    "sessions": [
        {"technique_id": "4", "duration": 1200, "rating": 5, "completed_at": "2025-01-02T09:00:00Z"},
        {"technique_id": "8", "duration": 1500, "rating": 4, "completed_at": "2025-01-03T09:00:00Z"},
        {"technique_id": "10", "duration": 3600, "rating": 4, "completed_at": "2025-01-04T09:00:00Z"}
    ]
}"#;

const BAD_PROFILE: &str = r#"{
    "name": "Cal",
    "style": {"visual": 0.25, "auditory": 0.25, "reading_writing": 0.25, "kinesthetic": 0.25},
    "created_at": "2025-01-01T00:00:00Z",
    "quiz_results": [
        {"score": 140, "time_spent": 12, "completed_at": "2025-01-02T10:00:00Z"}
    ],
    "sessions": [
        {"technique_id": "99", "duration": 600, "rating": 3, "completed_at": "2025-01-02T09:00:00Z"}
    ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn help_output() {
    studysense()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Study technique recommendations from learning style and history",
        ));
}

#[test]
fn version_output() {
    studysense()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("studysense"));
}

#[test]
fn questions_lists_instrument() {
    studysense()
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("[timeOnVisuals]"))
        .stdout(predicate::str::contains("12. [usesGestures]"))
        .stdout(predicate::str::contains("Reading/Writing"));
}

#[test]
fn assess_classifies_and_writes_profile() {
    let dir = TempDir::new().unwrap();
    let responses = write(
        dir.path(),
        "answers.json",
        r#"{"timeOnVisuals": 5, "prefersDiagrams": 5, "colorCoding": 4, "likesMusic": 2,
            "prefersDiscussion": 2, "readAloud": 1, "takesNotes": 3, "readsInstructions": 2,
            "writesToLearn": 2, "needsMovement": 1, "learnsByDoing": 2, "usesGestures": 1}"#,
    );
    let output = dir.path().join("profiles/ana.json");

    isolated(&dir)
        .arg("assess")
        .arg("--responses")
        .arg(&responses)
        .arg("--name")
        .arg("Ana")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dominant style: Visual"))
        .stdout(predicate::str::contains(
            "Strong preferences: timeOnVisuals, prefersDiagrams, colorCoding",
        ))
        .stdout(predicate::str::contains("Profile saved to"));

    let profile: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(profile["name"], "Ana");
    let style = &profile["style"];
    let total: f64 = ["visual", "auditory", "reading_writing", "kinesthetic"]
        .iter()
        .map(|k| style[k].as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn assess_warns_about_unknown_questions() {
    let dir = TempDir::new().unwrap();
    let responses = write(dir.path(), "answers.json", r#"{"shoeSize": 3, "readAloud": 5}"#);

    isolated(&dir)
        .arg("assess")
        .arg("--responses")
        .arg(&responses)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dominant style: Auditory"))
        .stderr(predicate::str::contains("[shoeSize] unknown question id"));
}

#[test]
fn assess_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("assess")
        .arg("--responses")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn recommend_table_for_visual_learner() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ana.json", VISUAL_PROFILE);

    isolated(&dir)
        .arg("recommend")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana: Visual learner, inconsistent"))
        .stdout(predicate::str::contains("Interactive Flashcards"))
        .stdout(predicate::str::contains("47%"))
        .stdout(predicate::str::contains("Tips:"))
        .stdout(predicate::str::contains("Use color coding and diagrams"));
}

#[test]
fn recommend_json_respects_limit_and_order() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ben.json", HISTORY_PROFILE);

    let json = stdout_json(
        isolated(&dir)
            .arg("recommend")
            .arg("--profile")
            .arg(&profile)
            .arg("--format")
            .arg("json")
            .arg("--limit")
            .arg("3"),
    );

    assert_eq!(json["learner"], "Ben");
    assert_eq!(json["context"]["dominant"], "reading_writing");
    let recs = json["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    let confidences: Vec<f64> = recs
        .iter()
        .map(|r| r["confidence"].as_f64().unwrap())
        .collect();
    for c in &confidences {
        assert!((0.1..=0.95).contains(c));
    }
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    for r in recs {
        assert!(!r["reasoning"].as_str().unwrap().is_empty());
        assert!(r["technique"]["type"].is_string());
    }
}

#[test]
fn recommend_strict_rejects_bad_records() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "cal.json", BAD_PROFILE);

    isolated(&dir)
        .arg("recommend")
        .arg("--profile")
        .arg(&profile)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 invalid record(s)"))
        .stderr(predicate::str::contains("score 140 is outside 0-100"));
}

#[test]
fn recommend_lenient_warns_and_continues() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "cal.json", BAD_PROFILE);

    isolated(&dir)
        .arg("recommend")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown technique id '99'"))
        .stdout(predicate::str::contains("Cal:"));
}

#[test]
fn recommend_with_external_catalog() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ana.json", VISUAL_PROFILE);
    let catalog = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../catalogs/extended.toml");

    let json = stdout_json(
        isolated(&dir)
            .arg("recommend")
            .arg("--profile")
            .arg(&profile)
            .arg("--catalog")
            .arg(&catalog)
            .arg("--format")
            .arg("json")
            .arg("--limit")
            .arg("10"),
    );
    let recs = json["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 5);
    assert_eq!(recs[0]["technique"]["id"], "pomodoro");
}

#[test]
fn recommend_with_phrasebook() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ana.json", VISUAL_PROFILE);
    let phrases = write(
        dir.path(),
        "phrases.toml",
        "style_match = \"Suits {style} minds\"\n\n[archetype_reasons]\ninconsistent = \"Fits a busy week\"\n",
    );

    let json = stdout_json(
        isolated(&dir)
            .arg("recommend")
            .arg("--profile")
            .arg(&profile)
            .arg("--phrasebook")
            .arg(&phrases)
            .arg("--format")
            .arg("json")
            .arg("--limit")
            .arg("1"),
    );
    assert_eq!(
        json["recommendations"][0]["reasoning"],
        "Suits visual minds • Fits a busy week"
    );
}

#[test]
fn recommend_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ana.json", VISUAL_PROFILE);
    write(dir.path(), "studysense.toml", "limit = 2\nformat = \"json\"\n");

    let json = stdout_json(isolated(&dir).arg("recommend").arg("--profile").arg(&profile));
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 2);

    // flags win over the file, env wins over the file
    let json = stdout_json(
        isolated(&dir)
            .env("STUDYSENSE_LIMIT", "4")
            .arg("recommend")
            .arg("--profile")
            .arg(&profile),
    );
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 4);

    isolated(&dir)
        .arg("recommend")
        .arg("--profile")
        .arg(&profile)
        .arg("--format")
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tips:"));
}

#[test]
fn recommend_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ana.json", VISUAL_PROFILE);
    isolated(&dir)
        .arg("recommend")
        .arg("--profile")
        .arg(&profile)
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format: xml"));
}

#[test]
fn summary_shows_dashboard_stats() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ben.json", HISTORY_PROFILE);

    isolated(&dir)
        .arg("summary")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ben (reading learner)"))
        .stdout(predicate::str::contains("Average score:   74%"))
        .stdout(predicate::str::contains("Recent scores:   64, 72, 86"))
        .stdout(predicate::str::contains("Study time:      1h 45m"))
        .stdout(predicate::str::contains("Average rating:  4.3 (Very Good)"));
}

#[test]
fn validate_clean_profile() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "ben.json", HISTORY_PROFILE);
    isolated(&dir)
        .arg("validate")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: Ben (3 quizzes, 3 sessions)"))
        .stdout(predicate::str::contains("All inputs valid."));
}

#[test]
fn validate_reports_profile_warnings() {
    let dir = TempDir::new().unwrap();
    let profile = write(dir.path(), "cal.json", BAD_PROFILE);
    isolated(&dir)
        .arg("validate")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("[quiz[0]] WARNING: score 140"))
        .stdout(predicate::str::contains("[session[0]] WARNING: unknown technique id"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_catalog_directory() {
    studysense()
        .arg("validate")
        .arg("--catalog")
        .arg("../../catalogs")
        .assert()
        .success()
        .stdout(predicate::str::contains("(5 techniques)"))
        .stdout(predicate::str::contains("All inputs valid."));
}

#[test]
fn validate_rejects_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let catalog = write(
        dir.path(),
        "dupes.toml",
        r#"
[[techniques]]
id = "a"
name = "One"
type = "visual"
effectiveness = 0.5
difficulty = "beginner"
estimated_time = 10

[[techniques]]
id = "a"
name = "Two"
type = "visual"
effectiveness = 0.5
difficulty = "beginner"
estimated_time = 10
"#,
    );
    isolated(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate technique id: a"));
}

#[test]
fn validate_requires_an_input() {
    studysense().arg("validate").assert().failure();
}

#[test]
fn catalog_lists_builtin_techniques() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive Flashcards"))
        .stdout(predicate::str::contains("Research Papers"))
        .stdout(predicate::str::contains("10 technique(s)"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created studysense.toml"))
        .stdout(predicate::str::contains("Created profiles/example.json"));

    assert!(dir.path().join("studysense.toml").exists());
    assert!(dir.path().join("profiles/example.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    isolated(&dir).arg("init").assert().success();

    isolated(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
