//! End-to-end training sessions driven through stdin.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ANIMALS: &str = "\"cat,N\",,gato\n\"dog,N\",,perro\n";
const RUN: &str = "run,trecho,treis,trei,trecem,treați,treau\n";

fn flashdrill(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("flashdrill").unwrap();
    cmd.current_dir(dir)
        .env_remove("FLASHDRILL_DATA_DIR")
        .env_remove("FLASHDRILL_RESULTS_DIR")
        .args(["train", "--style", "plain", "--shuffle", "false"]);
    cmd
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn mistake_logs(dir: &Path, folder: &str) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir.join(folder)) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn extreme_vocabulary_prompt_and_answer() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv", "--extreme"])
        .write_stdin("s\nc\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 vocabulary questions from animals.csv"))
        .stdout(predicate::str::contains("1/2 — Q: cat\n"))
        .stdout(predicate::str::contains("A: gato"))
        .stdout(predicate::str::contains("2/2 — Q: dog\n"))
        .stdout(predicate::str::contains("A: perro").not())
        .stdout(predicate::str::contains("Training session completed!"));
}

#[test]
fn non_extreme_prompt_keeps_commas() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv", "--extreme", "false"])
        .write_stdin("c\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 — Q: cat,N"));
}

#[test]
fn verb_reveal_emphasizes_form() {
    let dir = workspace(&[("run.csv", RUN)]);

    flashdrill(dir.path())
        .args(["--file", "run.csv", "--mode", "verb", "--limit", "3"])
        .write_stdin("c\nc\ns\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 verb questions"))
        .stdout(predicate::str::contains("3/3 — Form: trei"))
        .stdout(predicate::str::contains(
            "run trecho treis *trei* trecem treați treau",
        ))
        .stdout(predicate::str::contains("Training session completed!"));
}

#[test]
fn builtin_verbs_from_init() {
    let dir = TempDir::new().unwrap();
    #[allow(deprecated)]
    Command::cargo_bin("flashdrill")
        .unwrap()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    flashdrill(dir.path())
        .args(["--source", "verb"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("13 verb questions from built-in verbs"))
        .stdout(predicate::str::contains("1/13 — Form: γράφω"))
        .stdout(predicate::str::contains("Session ended early."));
}

#[test]
fn wrong_answers_are_reviewed_and_logged() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv", "--record-mistakes"])
        .write_stdin("w\nc\nw\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reviewing mistakes... (1 to go)"))
        .stdout(predicate::str::contains("Mistakes saved to:"))
        .stdout(predicate::str::contains("Training session completed!"));

    let logs = mistake_logs(dir.path(), "training_results");
    assert_eq!(logs.len(), 1);
    let content = std::fs::read_to_string(&logs[0]).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("\"cat,N\",,gato"));
    assert!(logs[0].to_string_lossy().ends_with("_mistakes.csv"));
}

#[test]
fn failed_mistake_write_keeps_the_session_going() {
    let dir = workspace(&[
        ("animals.csv", ANIMALS),
        ("training_results", "not a folder"),
    ]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv", "--record-mistakes"])
        .write_stdin("w\nc\nc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not record mistake"))
        .stdout(predicate::str::contains("1/2 — Q: cat").count(2))
        .stdout(predicate::str::contains("2/2 — Q: dog"))
        .stdout(predicate::str::contains("Training session completed!"))
        .stdout(predicate::str::contains("No mistakes recorded."))
        .stdout(predicate::str::contains("Total: 2 correct, 0 wrong"));
}

#[test]
fn verb_mistakes_log_the_form_column() {
    let dir = workspace(&[("run.csv", RUN)]);

    flashdrill(dir.path())
        .args(["--file", "run.csv", "--mode", "verb", "--limit", "2"])
        .args(["--record-mistakes", "--auto-review", "false"])
        .write_stdin("c\nw\n")
        .assert()
        .success();

    let logs = mistake_logs(dir.path(), "training_results_verb");
    assert_eq!(logs.len(), 1);
    let content = std::fs::read_to_string(&logs[0]).unwrap();
    let content = content.trim_start_matches('\u{feff}');
    assert_eq!(content, "2,run,trecho,treis,trei,trecem,treați,treau\n");
}

#[test]
fn without_auto_review_session_ends_after_one_pass() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv", "--auto-review", "false"])
        .write_stdin("w\nw\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reviewing mistakes").not())
        .stdout(predicate::str::contains("(first pass 0.0%)"))
        .stdout(predicate::str::contains("Training session completed!"));

    assert!(mistake_logs(dir.path(), "training_results").is_empty());
}

#[test]
fn unknown_input_shows_help() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv"])
        .write_stdin("maybe\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter s (show answer)"));
}

#[test]
fn report_is_written_as_json() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv", "--report", "out/report.json"])
        .write_stdin("w\nc\nc\n")
        .assert()
        .success();

    let json = std::fs::read_to_string(dir.path().join("out/report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["mode"], "vocabulary");
    assert_eq!(report["total_wrong"], 1);
    assert_eq!(report["total_correct"], 2);
    assert_eq!(report["passes"].as_array().unwrap().len(), 2);
    assert_eq!(report["passes"][0]["wrong"], 1);
    assert!(report["finished_at"].is_string());
}

#[test]
fn missing_upload_is_a_config_error() {
    let dir = TempDir::new().unwrap();

    flashdrill(dir.path())
        .args(["--source", "file"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot start training"))
        .stderr(predicate::str::contains("no CSV data supplied"));
}

#[test]
fn missing_builtin_is_a_config_error() {
    let dir = TempDir::new().unwrap();

    flashdrill(dir.path())
        .args(["--source", "vocabulary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("built-in CSV not found"));
}

#[test]
fn malformed_upload_names_the_row() {
    let dir = workspace(&[("bad.csv", "cat,,gato\ndog\n")]);

    flashdrill(dir.path())
        .args(["--file", "bad.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 2"));
}

#[test]
fn font_size_out_of_range() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    flashdrill(dir.path())
        .args(["--file", "animals.csv", "--font-size", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("font size must be between 30 and 100"));
}

#[test]
fn html_style_carries_font_size() {
    let dir = workspace(&[("animals.csv", ANIMALS)]);

    #[allow(deprecated)]
    Command::cargo_bin("flashdrill")
        .unwrap()
        .current_dir(dir.path())
        .args(["train", "--file", "animals.csv", "--shuffle", "false"])
        .args(["--style", "html", "--font-size", "80"])
        .write_stdin("s\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("font-size:80px"))
        .stdout(predicate::str::contains("A: gato"));
}
