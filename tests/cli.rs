mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::*;

fn reco_sync_cmd(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("reco-sync").expect("binary builds");
    // Keep the test hermetic: no ambient credentials, no stray .env pickup.
    cmd.current_dir(workspace.path())
        .env_remove("RECO_DB_ID")
        .env_remove("RECO_PRIVATE_TOKEN")
        .env_remove("RECO_API_URL");
    cmd
}

#[test]
fn dry_run_previews_items_without_credentials() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "books.csv",
        "bookID,title,authors,average_rating\n1,Dune,Frank Herbert,4.27\n",
    );

    reco_sync_cmd(&workspace)
        .args(["items", "-i"])
        .arg(&input)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("publication_year"));
}

#[test]
fn missing_identifier_column_fails_before_upload() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("books.csv", "title,authors\nDune,Frank Herbert\n");

    reco_sync_cmd(&workspace)
        .args(["items", "-i"])
        .arg(&input)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bookID"));
}

#[test]
fn missing_credentials_fail_before_any_network_call() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", "user_id,name\nu-1,Ada\n");

    reco_sync_cmd(&workspace)
        .args(["users", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("RECO_DB_ID"));
}

#[test]
fn missing_input_file_is_a_descriptive_error() {
    let workspace = TestWorkspace::new();

    reco_sync_cmd(&workspace)
        .args(["items", "-i", "no-such-file.csv", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-file.csv"));
}

#[test]
fn user_dry_run_reports_skipped_blank_ids() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "people.csv",
        "SP ID,Sales Person\nu-1,Ada\n,Ghost\nu-2,Grace\n",
    );

    reco_sync_cmd(&workspace)
        .args(["users", "-i"])
        .arg(&input)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("u-1"))
        .stdout(predicate::str::contains("u-2"))
        .stdout(predicate::str::contains("Ghost").not());
}
