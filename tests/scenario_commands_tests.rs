use assert_fs::prelude::*;
use predicates::prelude::*;

fn realty(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::cargo_bin_cmd!("realty");
    cmd.args(args);
    cmd.assert()
}

#[test]
fn init_add_set_and_show_round_trip_through_the_session_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let session = dir.child("portfolio.yaml");
    let session_arg = session.path().to_str().unwrap();

    realty(&["init", "-s", session_arg])
        .success()
        .stdout(predicate::str::contains("New session written to"));
    session.assert(predicate::path::exists());

    realty(&["add", "-s", session_arg])
        .success()
        .stdout(predicate::str::contains("Added property 2"));

    realty(&[
        "set",
        "-s",
        session_arg,
        "-p",
        "2",
        "-f",
        "purchase-price",
        "-v",
        "250,000",
    ])
    .success()
    .stdout(predicate::str::contains("Property 2: Purchase price set to 250,000"));

    realty(&[
        "set",
        "-s",
        session_arg,
        "-p",
        "2",
        "-f",
        "vacancy-rate",
        "-v",
        "7.5",
    ])
    .success();

    let contents = std::fs::read_to_string(session.path()).unwrap();
    assert!(contents.contains("purchase_price: 250000"));
    assert!(contents.contains("vacancy_rate: 0.075"));

    realty(&["show", "-s", session_arg])
        .success()
        .stdout(predicate::str::contains("Property 2"))
        .stdout(predicate::str::contains("Purchase price: $250,000"))
        .stdout(predicate::str::contains("Vacancy rate (%): 7.50%"))
        .stdout(predicate::str::contains("Results not available"))
        .stdout(predicate::str::contains("Portfolio Summary").not());
}

#[test]
fn set_with_unparsable_value_keeps_previous_value() {
    let dir = assert_fs::TempDir::new().unwrap();
    let session = dir.child("portfolio.yaml");
    let session_arg = session.path().to_str().unwrap();
    realty(&["init", "-s", session_arg]).success();

    realty(&[
        "set",
        "-s",
        session_arg,
        "-p",
        "1",
        "-f",
        "monthly-rent",
        "-v",
        "a lot",
    ])
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("keeping the previous value"));

    realty(&["show", "-s", session_arg])
        .success()
        .stdout(predicate::str::contains("Monthly rent: $500"));
}

#[test]
fn set_rejects_zero_term_years() {
    let dir = assert_fs::TempDir::new().unwrap();
    let session = dir.child("portfolio.yaml");
    let session_arg = session.path().to_str().unwrap();
    realty(&["init", "-s", session_arg]).success();

    realty(&[
        "set",
        "-s",
        session_arg,
        "-p",
        "1",
        "-f",
        "term-years",
        "-v",
        "0",
    ])
    .success()
    .stderr(predicate::str::contains("keeping the previous value"));

    let contents = std::fs::read_to_string(session.path()).unwrap();
    assert!(contents.contains("term_years: 25"));
}

#[test]
fn remove_refuses_to_drop_the_only_property() {
    let dir = assert_fs::TempDir::new().unwrap();
    let session = dir.child("portfolio.yaml");
    let session_arg = session.path().to_str().unwrap();
    realty(&["init", "-s", session_arg]).success();

    realty(&["remove", "-s", session_arg, "-p", "1"])
        .success()
        .stderr(predicate::str::contains("Cannot remove the only property"));
}

#[test]
fn remove_shifts_later_properties_up() {
    let dir = assert_fs::TempDir::new().unwrap();
    let session = dir.child("portfolio.yaml");
    let session_arg = session.path().to_str().unwrap();
    realty(&["init", "-s", session_arg]).success();
    realty(&["add", "-s", session_arg]).success();
    realty(&[
        "set",
        "-s",
        session_arg,
        "-p",
        "2",
        "-f",
        "purchase-price",
        "-v",
        "175000",
    ])
    .success();

    realty(&["remove", "-s", session_arg, "-p", "1"])
        .success()
        .stdout(predicate::str::contains("Removed property 1"));

    realty(&["show", "-s", session_arg])
        .success()
        .stdout(predicate::str::contains("Property 1\n  Purchase price: $175,000"))
        .stdout(predicate::str::contains("Property 2").not());
}

#[test]
fn set_reports_unknown_position() {
    let dir = assert_fs::TempDir::new().unwrap();
    let session = dir.child("portfolio.yaml");
    let session_arg = session.path().to_str().unwrap();
    realty(&["init", "-s", session_arg]).success();

    realty(&[
        "set",
        "-s",
        session_arg,
        "-p",
        "4",
        "-f",
        "monthly-rent",
        "-v",
        "600",
    ])
    .success()
    .stderr(predicate::str::contains("Failed to edit property"));
}
