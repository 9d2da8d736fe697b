use crate::common::{
    fake_install, sc2_command, stderr_of, stdout_of, temp_home, write_execute_info,
};
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
fn test_no_metadata_no_flags_fails_with_guidance(temp_home: TempDir) {
    let output = sc2_command(temp_home.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("Please run StarCraft II at least once"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("Usage: sc2-runner"), "stderr: {stderr}");
}

#[rstest]
fn test_metadata_path_without_versions_on_disk(temp_home: TempDir) {
    write_execute_info(
        temp_home.path(),
        "executable=/opt/game/Versions/Base12345/SC2.exe\nmap=AcidPlantLE\nport=5000\n",
    );

    let output = sc2_command(temp_home.path()).output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("executable: /opt/game/Versions/Base12345/SC2.exe\n"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("map:        AcidPlantLE\n"), "stdout: {stdout}");
    assert!(stdout.contains("port:       5000\n"), "stdout: {stdout}");
    assert!(!stdout.contains("notes:"), "stdout: {stdout}");
}

#[rstest]
fn test_command_line_overrides_metadata(temp_home: TempDir) {
    write_execute_info(temp_home.path(), "executable=/a/x.exe\ntimeout=100\n");

    let output = sc2_command(temp_home.path())
        .args(["--executable", "/b/y.exe", "--timeout", "2500", "--realtime"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("executable: /b/y.exe\n"), "stdout: {stdout}");
    assert!(stdout.contains("timeout:    2500ms\n"), "stdout: {stdout}");
    assert!(stdout.contains("realtime:   true\n"), "stdout: {stdout}");
}

#[rstest]
fn test_picks_newest_installed_build(temp_home: TempDir) {
    let install = TempDir::new().unwrap();
    let versions = fake_install(
        install.path(),
        &["Base69232", "Base75689", "Base81009"],
        &["Base69232", "Base75689"],
        "SC2_x64",
    );
    write_execute_info(
        temp_home.path(),
        &format!(
            "executable={}\n",
            versions.join("Base69232").join("SC2_x64").display()
        ),
    );

    let output = sc2_command(temp_home.path())
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["process_path"],
        versions.join("Base75689").join("SC2_x64").display().to_string()
    );
    assert_eq!(json["realtime"], false);
    assert!(json["port_start"].is_null());
}

#[rstest]
fn test_port_is_not_accepted_as_flag(temp_home: TempDir) {
    write_execute_info(temp_home.path(), "executable=/a/x.exe\n");

    let output = sc2_command(temp_home.path())
        .args(["--port", "5000"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr_of(&output).contains("unexpected argument '--port'"),
        "stderr: {}",
        stderr_of(&output)
    );
}

#[rstest]
fn test_random_map_when_none_configured(temp_home: TempDir) {
    write_execute_info(temp_home.path(), "executable=/a/x.exe\n");

    let output = sc2_command(temp_home.path()).output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    let map_line = stdout
        .lines()
        .find(|line| line.starts_with("map:"))
        .unwrap();
    assert!(map_line.ends_with(".SC2Map (random)"), "{map_line}");
}

#[rstest]
fn test_notes_explain_missing_metadata(temp_home: TempDir) {
    let output = sc2_command(temp_home.path())
        .args(["--executable", "/b/y.exe"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("notes:\n"), "stdout: {stdout}");
    assert!(
        stdout.contains("[metadata] Cannot open ~/Starcraft II/ExecuteInfo.txt"),
        "stdout: {stdout}"
    );
}

#[rstest]
fn test_help_lists_flags_with_discovered_defaults(temp_home: TempDir) {
    write_execute_info(temp_home.path(), "executable=/a/x.exe\nmap=FractureLE\n");

    let output = sc2_command(temp_home.path())
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for flag in ["--executable", "--realtime", "--map", "--timeout", "--format"] {
        assert!(stdout.contains(flag), "missing {flag} in: {stdout}");
    }
    assert!(stdout.contains("[default: /a/x.exe]"), "stdout: {stdout}");
    assert!(stdout.contains("[default: FractureLE]"), "stdout: {stdout}");
    assert!(!stdout.contains("--port"), "stdout: {stdout}");
}
