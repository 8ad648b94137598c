use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// A notewise command isolated in `dir`, with no credentials so the local
/// fallback summary is used.
fn notewise(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notewise").unwrap();
    cmd.arg("--data-dir")
        .arg(dir)
        .arg("--no-color")
        .env_remove("API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn stored_ids(dir: &Path) -> Vec<String> {
    let notes = dir.join("notes");
    let mut ids: Vec<String> = fs::read_dir(notes)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter_map(|e| {
                    let name = e.file_name().to_string_lossy().into_owned();
                    name.strip_prefix("note_")
                        .and_then(|rest| rest.strip_suffix(".json"))
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default();
    ids.sort();
    ids
}

#[test]
fn summarize_without_key_falls_back_to_first_sentences() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args([
            "summarize",
            "First point. Second point. Third point. Fourth point.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "First point. Second point. Third point.",
        ))
        .stdout(predicate::str::contains("Fourth point").not())
        .stdout(predicate::str::contains("Concise"));

    assert_eq!(stored_ids(temp.path()).len(), 1);
}

#[test]
fn summarize_reads_stdin() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args(["summarize", "--style", "teacher"])
        .write_stdin("Cells divide. Then they grow. Then they rest. Then repeat.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cells divide. Then they grow. Then they rest."))
        .stdout(predicate::str::contains("Explain like Teacher"));
}

#[test]
fn summarize_reads_file() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("lecture.md");
    fs::write(&file, "Atoms bond. Molecules form.").unwrap();

    notewise(temp.path())
        .arg("summarize")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Atoms bond. Molecules form."));
}

#[test]
fn empty_input_is_rejected() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .arg("summarize")
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please provide some notes to summarize.",
        ));

    assert!(stored_ids(temp.path()).is_empty());
}

#[test]
fn strict_policy_without_key_fails() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args(["config", "failure-policy", "strict"])
        .assert()
        .success();

    notewise(temp.path())
        .args(["summarize", "Some notes."])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to generate summary. Please check your internet connection and try again.",
        ));

    assert!(stored_ids(temp.path()).is_empty());
}

#[test]
fn history_show_and_delete() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args(["summarize", "Photosynthesis happens in chloroplasts."])
        .assert()
        .success();
    let id = stored_ids(temp.path()).remove(0);

    notewise(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("Photosynthesis happens in chlo..."));

    notewise(temp.path())
        .args(["show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Photosynthesis happens in chloroplasts.",
        ));

    notewise(temp.path())
        .args(["delete", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted note"));

    notewise(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."));
    assert!(stored_ids(temp.path()).is_empty());
}

#[test]
fn show_unknown_note_fails() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args(["show", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note not found: 12345"));
}

#[test]
fn delete_unknown_note_is_a_no_op() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args(["delete", "12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No note with id 12345"));
}

#[test]
fn config_set_and_get() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args(["config", "default-style", "bullets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-style set to bullets"));

    notewise(temp.path())
        .args(["config", "default-style"])
        .assert()
        .success()
        .stdout(predicate::str::diff("bullets\n"));

    notewise(temp.path())
        .args(["config", "default-style", "haiku"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown style 'haiku'"));

    notewise(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("model = gemini-3-flash-preview"));
}

#[test]
fn download_and_image_exports() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("out");

    notewise(temp.path())
        .args(["summarize", "One. Two. Three. Four."])
        .assert()
        .success();
    let id = stored_ids(temp.path()).remove(0);

    notewise(temp.path())
        .args(["download", id.as_str(), "--out"])
        .arg(&out)
        .assert()
        .success();
    let text = fs::read_to_string(out.join(format!("summary_{}.txt", id))).unwrap();
    assert_eq!(text, "One. Two. Three.");

    notewise(temp.path())
        .args(["image", id.as_str(), "--out"])
        .arg(&out)
        .assert()
        .success();
    assert!(out.join(format!("summary_{}.svg", id)).exists());

    notewise(temp.path())
        .args(["archive", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("notewise-"));
}

#[test]
fn doctor_reports_orphans() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .args(["summarize", "Some notes."])
        .assert()
        .success();
    fs::remove_file(temp.path().join("notes").join("smart_summarize_history.json")).unwrap();

    notewise(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("missing from history"));
}

#[test]
fn shell_session() {
    let temp = tempfile::tempdir().unwrap();

    notewise(temp.path())
        .arg("shell")
        .write_stdin(
            "Alpha beta. Gamma delta.\nEpsilon. Zeta.\n:input\n:summarize bullets\n:history\n:bogus\n:new\n:show\n:quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("6 words"))
        .stdout(predicate::str::contains("Bullet Points"))
        .stdout(predicate::str::contains("Alpha beta. Gamma delta.\nEpsilon."))
        .stdout(predicate::str::contains("▸ "))
        .stdout(predicate::str::contains("Unknown command :bogus"))
        .stdout(predicate::str::contains("No summary yet."));

    assert_eq!(stored_ids(temp.path()).len(), 1);
}
