//! End-to-end runs of the `permsync` binary against mock Zendesk and Quay APIs.

use std::io::Write;

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 4] = [
    "ZENDESK_EMAIL",
    "ZENDESK_TOKEN",
    "ZENDESK_SUBDOMAIN",
    "QUAY_IO_TOKEN",
];

fn target_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write targets");
    file
}

/// `permsync` with credentials set and both APIs pointed at `server`.
fn permsync(server: &Server) -> Command {
    let mut cmd = Command::cargo_bin("permsync").expect("binary");
    cmd.env("ZENDESK_EMAIL", "ops@example.com")
        .env("ZENDESK_TOKEN", "zd-token")
        .env("ZENDESK_SUBDOMAIN", "example")
        .env("QUAY_IO_TOKEN", "quay-token")
        .env("ZENDESK_URL", server.url())
        .env("QUAY_API_URL", server.url())
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "info")
        .env_remove("QUAY_ORG");
    cmd
}

// ---------------------------------------------------------------------------
// 1. Fatal startup errors
// ---------------------------------------------------------------------------

#[test]
fn missing_credentials_fail_before_any_request() {
    let targets = target_file("engine\n");
    let mut cmd = Command::cargo_bin("permsync").expect("binary");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("ZENDESK_EMAIL", "ops@example.com")
        .arg("--input")
        .arg(targets.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUAY_IO_TOKEN"))
        .stderr(predicate::str::contains("ZENDESK_TOKEN"));
}

#[test]
fn unreadable_input_is_fatal() {
    let server = Server::new();
    let dir = tempfile::tempdir().expect("tempdir");
    permsync(&server)
        .arg("--input")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn input_is_required() {
    let server = Server::new();
    permsync(&server)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}

// ---------------------------------------------------------------------------
// 2. Single-team mode
// ---------------------------------------------------------------------------

#[test]
fn single_team_grants_missing_repositories() {
    let mut server = Server::new();
    let lookup = server
        .mock("GET", "/organization/dremio/team/abcde12345/permissions")
        .match_header("authorization", "Bearer quay-token")
        .with_status(200)
        .with_body(
            json!({ "permissions": [ { "repository": { "name": "engine" }, "role": "read" } ] })
                .to_string(),
        )
        .expect(1)
        .create();
    let grant = server
        .mock("PUT", "/repository/dremio/catalog/permissions/team/abcde12345")
        .match_body(Matcher::Json(json!({ "role": "read" })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();
    let no_engine_grant = server
        .mock("PUT", "/repository/dremio/engine/permissions/team/abcde12345")
        .expect(0)
        .create();

    let targets = target_file("engine\ncatalog\n\n  engine  \n");
    permsync(&server)
        .arg("--input")
        .arg(targets.path())
        .arg("--org-code")
        .arg("abcde12345")
        .assert()
        .success()
        .stdout(predicate::str::contains("engine (in target list)"))
        .stdout(predicate::str::contains(
            "Successfully added dremio/catalog to team abcde12345",
        ));

    lookup.assert();
    grant.assert();
    no_engine_grant.assert();
}

#[test]
fn single_team_not_found_exits_non_zero() {
    let mut server = Server::new();
    let _lookup = server
        .mock("GET", "/organization/dremio/team/ghost00000/permissions")
        .with_status(404)
        .create();
    let no_grants = server
        .mock("PUT", Matcher::Regex("^/repository/".to_string()))
        .expect(0)
        .create();

    let targets = target_file("engine\n");
    permsync(&server)
        .arg("--input")
        .arg(targets.path())
        .arg("--org-code")
        .arg("ghost00000")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Failed to fetch team permissions for team ghost00000",
        ))
        .stderr(predicate::str::contains("sync failed for team 'ghost00000'"));

    no_grants.assert();
}

#[test]
fn single_team_dry_run_grants_nothing() {
    let mut server = Server::new();
    let _lookup = server
        .mock("GET", "/organization/dremio/team/abcde12345/permissions")
        .with_status(200)
        .with_body(r#"{"permissions": []}"#)
        .create();
    let no_grants = server
        .mock("PUT", Matcher::Regex("^/repository/".to_string()))
        .expect(0)
        .create();

    let targets = target_file("engine\ncatalog\n");
    permsync(&server)
        .arg("--input")
        .arg(targets.path())
        .arg("--team")
        .arg("abcde12345")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("would add dremio/catalog"))
        .stdout(predicate::str::contains("would add dremio/engine"));

    no_grants.assert();
}

// ---------------------------------------------------------------------------
// 3. All-organizations mode
// ---------------------------------------------------------------------------

#[test]
fn all_orgs_continues_after_team_failure_and_exits_zero() {
    let mut server = Server::new();
    let _orgs = server
        .mock("GET", "/api/v2/organizations.json")
        .with_status(200)
        .with_body(
            json!({
                "organizations": [
                    {
                        "id": 1,
                        "name": "Ghost Corp",
                        "tags": ["current_customer"],
                        "organization_fields": { "quay_io_team_id": "ghost00000" }
                    },
                    {
                        "id": 2,
                        "name": "Teamless Inc",
                        "tags": ["current_customer"],
                        "organization_fields": {}
                    },
                    {
                        "id": 3,
                        "name": "Churned Ltd",
                        "tags": ["former_customer"],
                        "organization_fields": { "quay_io_team_id": "churned000" }
                    },
                    {
                        "id": 4,
                        "name": "Acme",
                        "tags": ["current_customer"],
                        "organization_fields": { "quay_io_team_id": "acme000001" }
                    }
                ],
                "next_page": null
            })
            .to_string(),
        )
        .create();
    let _ghost = server
        .mock("GET", "/organization/dremio/team/ghost00000/permissions")
        .with_status(404)
        .create();
    let churned = server
        .mock("GET", "/organization/dremio/team/churned000/permissions")
        .expect(0)
        .create();
    let _acme = server
        .mock("GET", "/organization/dremio/team/acme000001/permissions")
        .with_status(200)
        .with_body(
            json!({ "permissions": [ { "repository": { "name": "engine" } } ] }).to_string(),
        )
        .create();
    let acme_grant = server
        .mock("PUT", "/repository/dremio/catalog/permissions/team/acme000001")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let targets = target_file("engine\ncatalog\n");
    permsync(&server)
        .arg("--input")
        .arg(targets.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Teamless Inc (no team configured)"))
        .stdout(predicate::str::contains("Failed to fetch team permissions for team ghost00000"))
        .stdout(predicate::str::contains("Successfully added dremio/catalog to team acme000001"))
        .stdout(predicate::str::contains("Churned Ltd").not());

    churned.assert();
    acme_grant.assert();
}

#[test]
fn all_orgs_directory_failure_exits_non_zero() {
    let mut server = Server::new();
    let _orgs = server
        .mock("GET", "/api/v2/organizations.json")
        .with_status(401)
        .with_body(r#"{"error": "Couldn't authenticate you"}"#)
        .create();

    let targets = target_file("engine\n");
    permsync(&server)
        .arg("--input")
        .arg(targets.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync of customer organizations failed"))
        .stderr(predicate::str::contains("401"));
}
