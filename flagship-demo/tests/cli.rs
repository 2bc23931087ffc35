use assert_cmd::Command;

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flagship-demo"))
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn help_exits_cleanly() {
    let assert = demo().arg("--help").assert().success();
    let stdout = stdout_of(&assert);

    assert!(stdout.starts_with("Record the details of a student."), "{stdout}");
    assert!(stdout.contains("Usage:"), "{stdout}");
    assert!(stdout.contains("-n, --name <String>"), "{stdout}");
    assert!(stdout.contains("--bvs [Bool...]"), "{stdout}");
    assert!(stdout.contains("-v, --version"), "{stdout}");
}

#[test]
fn version_exits_cleanly() {
    let assert = demo().arg("-v").assert().success();
    let stdout = stdout_of(&assert);

    assert!(stdout.trim_end().ends_with(env!("CARGO_PKG_VERSION")), "{stdout}");
}

#[test]
fn missing_required_option_fails() {
    let assert = demo()
        .args(["--sex", "on", "--bvs", "1", "0"])
        .assert()
        .failure()
        .code(1);
    let stderr = stderr_of(&assert);

    assert!(stderr.contains("option '--name' is required"), "{stderr}");
    assert!(stderr.contains("--help"), "{stderr}");
}

#[test]
fn validator_rejects_input() {
    let assert = demo()
        .args(["--name", "Ada", "--sex", "off", "--bvs", "on", "--odds", "2"])
        .assert()
        .code(1);
    let stderr = stderr_of(&assert);

    assert!(stderr.contains("not all numbers entered are odd"), "{stderr}");
}

#[test]
fn full_parse() {
    let assert = demo()
        .args([
            "a note", "--name", "Ada", "-a", "36", "--sex", "off", "--bvs", "on", "off",
            "--likes", "math", "--likes", "engines",
        ])
        .assert()
        .success();
    let stdout = stdout_of(&assert);

    assert!(stdout.contains("Ada (female), age 36"), "{stdout}");
    assert!(stdout.contains("likes: [math, engines]"), "{stdout}");
    assert!(stdout.contains("bvs: [true, false]"), "{stdout}");
    assert!(stdout.contains("note: a note"), "{stdout}");
}
