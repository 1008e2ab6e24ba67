use assert_cmd::Command;

fn lectern() -> Command {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.env("LECTERN_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"))
        .env_remove("LECTERN_ENV")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_every_command() {
    let output = lectern().arg("--help").output().unwrap();
    assert!(output.status.success());

    let help = String::from_utf8(output.stdout).unwrap();
    for command in [
        "serve",
        "books",
        "reservations",
        "users",
        "make",
        "update",
        "remove",
        "view",
        "purge",
    ] {
        assert!(help.contains(command), "help is missing {command}");
    }
}

#[test]
fn unreachable_backend_fails_the_table_command() {
    let output = lectern()
        .args(["books", "--backend-url", "http://127.0.0.1:1"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("error: "));
}

#[test]
fn update_needs_a_complete_pair() {
    lectern()
        .args(["update", "--reservation-id", "7"])
        .assert()
        .failure()
        .code(2);

    lectern()
        .args([
            "update",
            "--book-id",
            "1",
            "--user-id",
            "2",
            "--reservation-id",
            "7",
            "--new-user-id",
            "3",
        ])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn bad_backend_url_is_reported() {
    let output = lectern()
        .args([
            "make",
            "--book-id",
            "1",
            "--user-id",
            "2",
            "--backend-url",
            "ftp://shelf",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid backend url"));
}
