//! End-to-end tests for the docsearch binary

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const CORPUS: &str = r#"
stop_words: "and with"
documents:
  - id: 1
    text: funny pet and nasty rat
    ratings: [7, 2, 7]
  - id: 2
    text: funny pet with curly hair
    ratings: [1, 2, 3]
  - id: 3
    text: big cat nasty hair
    ratings: [1, 2, 8]
  - id: 4
    text: big dog cat Vladislav
    ratings: [1, 3, 2]
  - id: 5
    text: big dog hamster Borya
    ratings: [1, 1, 1]
  - id: 6
    text: curly banned dog
    status: BANNED
"#;

fn docsearch() -> Command {
    let mut cmd = Command::cargo_bin("docsearch").unwrap();
    cmd.env_remove("DOCSEARCH_CORPUS");
    cmd
}

fn corpus_file(dir: &assert_fs::TempDir) -> assert_fs::fixture::ChildPath {
    let file = dir.child("pets.yaml");
    file.write_str(CORPUS).unwrap();
    file
}

#[test]
fn test_search_prints_pages() {
    let dir = assert_fs::TempDir::new().unwrap();
    let corpus = corpus_file(&dir);

    docsearch()
        .args(["search", "curly dog", "--corpus"])
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("document_id = 2"))
        .stdout(predicate::str::contains("document_id = 4"))
        .stdout(predicate::str::contains("document_id = 5"))
        .stdout(predicate::str::contains("Page break"))
        .stdout(predicate::str::contains("document_id = 6").not());
}

#[test]
fn test_search_json_output() {
    let dir = assert_fs::TempDir::new().unwrap();
    let corpus = corpus_file(&dir);

    let output = docsearch()
        .args(["search", "curly", "--status", "banned", "--format", "json", "--corpus"])
        .arg(corpus.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 6);
}

#[test]
fn test_search_minus_word_only_query() {
    let dir = assert_fs::TempDir::new().unwrap();
    let corpus = corpus_file(&dir);

    docsearch()
        .args(["search", "-rat", "--corpus"])
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

#[test]
fn test_search_malformed_query_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    let corpus = corpus_file(&dir);

    docsearch()
        .args(["search", "cat --dog", "--corpus"])
        .arg(corpus.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query word \"--dog\" is invalid"));
}

#[test]
fn test_search_reads_corpus_from_env() {
    let dir = assert_fs::TempDir::new().unwrap();
    let corpus = corpus_file(&dir);

    docsearch()
        .env("DOCSEARCH_CORPUS", corpus.path())
        .args(["search", "hamster"])
        .assert()
        .success()
        .stdout(predicate::str::contains("document_id = 5"));
}

#[test]
fn test_match_command() {
    let dir = assert_fs::TempDir::new().unwrap();
    let corpus = corpus_file(&dir);

    docsearch()
        .args(["match", "funny curly dog", "--id", "2", "--corpus"])
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("words = curly funny"))
        .stdout(predicate::str::contains("status = ACTUAL"));

    docsearch()
        .args(["match", "funny -hair", "--id", "2", "--format", "json", "--corpus"])
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"words\": []"));

    docsearch()
        .args(["match", "funny", "--id", "42", "--corpus"])
        .arg(corpus.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found: 42"));
}

#[test]
fn test_stats_command() {
    let dir = assert_fs::TempDir::new().unwrap();
    let corpus = corpus_file(&dir);

    docsearch()
        .args(["stats", "--corpus"])
        .arg(corpus.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents: 6"))
        .stdout(predicate::str::contains("Insertion order: 1, 2, 3, 4, 5, 6"));
}

#[test]
fn test_stdin_session() {
    let input = "and with\n\
                 2\n\
                 funny pet and nasty rat\n\
                 3 7 2 7\n\
                 funny pet with curly hair\n\
                 3 1 2 3\n\
                 curly dog\n";

    docsearch()
        .arg("stdin")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "{ document_id = 1, relevance = 0.173287, rating = 2 }\n",
        ));
}

#[test]
fn test_unsupported_corpus_extension() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("pets.txt");
    file.write_str("whatever").unwrap();

    docsearch()
        .args(["stats", "--corpus"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported corpus format"));
}
