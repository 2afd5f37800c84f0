use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn project_writes_projection_png_without_calling_a_service() {
    let dir = assert_fs::TempDir::new().unwrap();
    let session = dir.child("portfolio.yaml");
    let session_arg = session.path().to_str().unwrap();
    let output = dir.child("projection.png");
    let output_arg = output.path().to_str().unwrap();

    let mut init = assert_cmd::cargo_bin_cmd!("realty");
    init.args(["init", "-s", session_arg]);
    init.assert().success();

    let mut cmd = assert_cmd::cargo_bin_cmd!("realty");
    cmd.env("REALTY_SERVICE_URL", "http://127.0.0.1:1");
    cmd.args(["project", "-s", session_arg, "-o", output_arg]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Projection chart written to"));

    let metadata = fs::metadata(output.path()).unwrap();
    assert!(metadata.len() > 0);
}
