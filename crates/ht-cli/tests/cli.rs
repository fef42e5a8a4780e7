//! CLI command integration tests.
//! Each test works in its own temp directory and never reaches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const STORY: &str = "She was very afraid of the dark. \
                     The house was quiet. \
                     Her mother held her firm around her shoulders.";

const FIXTURE: &str = r#"{
    "She was very afraid of the dark.": [{"label": "fear", "score": 0.9}, {"label": "neutral", "score": 0.1}],
    "The house was quiet.": [{"label": "neutral", "score": 1.0}]
}"#;

fn ht_cmd(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ht").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("HT_CONFIG")
        .env_remove("HT_CLASSIFIER_URL")
        .env_remove("HT_CLASSIFIER_TOKEN")
        .env_remove("HT_ALPHA");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn compile_rules_only_writes_four_addresses_per_sentence() {
    let dir = TempDir::new().unwrap();
    write(&dir, "story.txt", STORY);

    ht_cmd(&dir)
        .args(["compile", "--rules-only", "story.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compiled story.txt"))
        .stdout(predicate::str::contains("(3 sentences)"))
        .stdout(predicate::str::contains("done. 1 documents"));

    let out = read_json(&dir.path().join("haptics/story_haptic_output.json"));
    let records = out.as_array().unwrap();
    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["sentence_number"], i + 1);
        let addresses: Vec<u64> = record["haptic_commands"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["address"].as_u64().unwrap())
            .collect();
        assert_eq!(addresses, vec![1, 2, 3, 4]);
    }
    assert_eq!(records[0]["normalized_emotion_scores"]["Fear"], 1.0);
    assert_eq!(records[1]["normalized_emotion_scores"], serde_json::json!({}));
}

#[test]
fn compile_with_fixture_and_custom_out_dir() {
    let dir = TempDir::new().unwrap();
    write(&dir, "story.txt", STORY);
    write(&dir, "labels.json", FIXTURE);

    ht_cmd(&dir)
        .args(["compile", "--fixture", "labels.json", "--out", "build", "story.txt"])
        .assert()
        .success()
        // the third sentence has no recorded output
        .stdout(predicate::str::contains("1 sentences scored by rules only"));

    let out = read_json(&dir.path().join("build/story_haptic_output.json"));
    let fear_wrist = &out[0]["haptic_commands"][0]["commands"][0];
    assert_eq!(fear_wrist["emotion"], "Fear");
    assert_eq!(fear_wrist["vibration"]["intensity"], 0.94);
}

#[test]
fn unreadable_siblings_do_not_stop_other_documents() {
    let dir = TempDir::new().unwrap();
    write(&dir, "good.txt", STORY);
    std::fs::write(dir.path().join("latin1.txt"), b"She was afraid \xff of the dark.").unwrap();

    ht_cmd(&dir)
        .args(["compile", "--rules-only", "missing.txt", "latin1.txt", "good.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed missing.txt"))
        .stderr(predicate::str::contains("failed latin1.txt"))
        .stderr(predicate::str::contains("valid UTF-8"))
        .stderr(predicate::str::contains("2 of 3 documents failed"));

    assert!(dir.path().join("haptics/good_haptic_output.json").exists());
    assert!(!dir.path().join("haptics/missing_haptic_output.json").exists());
    assert!(!dir.path().join("haptics/latin1_haptic_output.json").exists());
}

#[test]
fn same_stem_in_two_dirs_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("a")).unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    write(&dir, "a/story.txt", "She was very afraid of the dark.");
    write(&dir, "b/story.txt", "Calm returned.");

    ht_cmd(&dir)
        .args(["compile", "--rules-only", "--out", "out", "a/story.txt", "b/story.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed b/story.txt"))
        .stderr(predicate::str::contains("would overwrite"))
        .stderr(predicate::str::contains("1 of 2 documents failed"));

    let out = read_json(&dir.path().join("out/story_haptic_output.json"));
    assert_eq!(out[0]["sentence"], "She was very afraid of the dark.");
}

#[test]
fn file_named_twice_is_compiled_once() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("chapters")).unwrap();
    write(&dir, "chapters/one.txt", "She was afraid.");

    ht_cmd(&dir)
        .args(["compile", "--rules-only", "--dir", "chapters", "chapters/one.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done. 1 documents"));
}

#[test]
fn compile_dir_picks_up_text_files() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("chapters")).unwrap();
    write(&dir, "chapters/one.txt", "She was afraid.");
    write(&dir, "chapters/two.txt", "Tears fell.");
    write(&dir, "chapters/notes.md", "Not a chapter.");

    ht_cmd(&dir)
        .args(["compile", "--rules-only", "--dir", "chapters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done. 2 documents"));

    assert!(dir.path().join("haptics/one_haptic_output.json").exists());
    assert!(dir.path().join("haptics/two_haptic_output.json").exists());
    assert!(!dir.path().join("haptics/notes_haptic_output.json").exists());
}

#[test]
fn raw_writes_dense_scores() {
    let dir = TempDir::new().unwrap();
    write(&dir, "story.txt", STORY);

    ht_cmd(&dir)
        .args(["raw", "--rules-only", "story.txt"])
        .assert()
        .success();

    let out = read_json(&dir.path().join("scores/story_raw_scores.json"));
    let first = &out[0];
    assert_eq!(first["sentence_number"], 1);
    assert_eq!(first["raw_scores"].as_object().unwrap().len(), 12);
    assert_eq!(first["raw_scores"]["Fear"], 2.0);
}

#[test]
fn score_prints_record() {
    let dir = TempDir::new().unwrap();
    let output = ht_cmd(&dir)
        .args(["score", "--rules-only", "She was very afraid of the dark."])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["sentence_number"], 1);
    assert_eq!(record["normalized_emotion_scores"]["Fear"], 1.0);
    assert_eq!(record["haptic_commands"].as_array().unwrap().len(), 4);
}

#[test]
fn settings_file_sets_alpha() {
    let dir = TempDir::new().unwrap();
    write(&dir, "labels.json", r#"{"Calm.": [{"label": "surprise", "score": 1.0}]}"#);
    write(
        &dir,
        "ht.toml",
        "[pipeline]\nalpha = 0.1\n\n[classifier]\nbackend = \"fixture\"\nfixture = \"labels.json\"\n",
    );

    let output = ht_cmd(&dir)
        .args(["score", "--config", "ht.toml", "Calm."])
        .output()
        .unwrap();
    assert!(output.status.success());
    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["normalized_emotion_scores"]["Awe"], 1.0);
}

#[test]
fn invalid_alpha_is_rejected() {
    let dir = TempDir::new().unwrap();
    ht_cmd(&dir)
        .env("HT_ALPHA", "2.0")
        .args(["score", "--rules-only", "Calm."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha"));
}

#[test]
fn unreachable_classifier_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(&dir, "story.txt", STORY);
    ht_cmd(&dir)
        .env("HT_CLASSIFIER_URL", "http://127.0.0.1:9/classify")
        .args(["compile", "story.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rules-only"));
    assert!(!dir.path().join("haptics").exists());
}

#[test]
fn tables_lists_every_category() {
    let dir = TempDir::new().unwrap();
    let output = ht_cmd(&dir).arg("tables").output().unwrap();
    assert!(output.status.success());

    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    let categories = doc["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 12);
    assert_eq!(categories[0]["category"], "Fear");
    assert!(
        categories[0]["keywords"]
            .as_array()
            .unwrap()
            .contains(&Value::from("afraid"))
    );
    assert_eq!(doc["classifier_fanout"]["surprise"]["Awe"], 1.0);
    let labels = doc["classifier_fanout"].as_object().unwrap();
    assert_eq!(labels.len(), 7);
    assert_eq!(labels["neutral"], serde_json::json!({}));
}
