mod common;

use common::TestEnv;

#[test]
fn default_command_generates_make_and_cmake_files() {
    let env = TestEnv::new();

    let result = env.run(&[]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(env.project_path("target/make/Makefile").is_file());
    assert!(env.project_path("target/cmake/CMakeLists.txt").is_file());
    assert!(env.project_path("target/manifest.toml").is_file());
    assert!(result.stdout.contains("+ make/Makefile"));
    assert!(result.stdout.contains("+ cmake/CMakeLists.txt"));
}

#[test]
fn second_run_reports_unchanged() {
    let env = TestEnv::new();
    assert!(env.run(&["generate"]).success);

    let result = env.run(&["generate"]);

    assert!(result.success);
    assert!(result.stdout.contains("Unchanged: 2 files"), "{}", result.stdout);
    assert!(!result.stdout.contains("+ make/Makefile"));
}

#[test]
fn dry_run_writes_nothing() {
    let env = TestEnv::new();

    let result = env.run(&["generate", "--dry-run"]);

    assert!(result.success);
    assert!(result.stdout.contains("Would write: 2 files"), "{}", result.stdout);
    assert!(!env.project_path("target").exists());
}

#[test]
fn json_output_reports_created_files() {
    let env = TestEnv::new();

    let result = env.run(&["--json"]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    let json = result.json();
    assert_eq!(json["event"], "generate");
    assert_eq!(json["package"], "xvmem");
    assert_eq!(json["status"], "success");
    assert_eq!(json["created"].as_array().unwrap().len(), 2);
}

#[test]
fn target_flag_limits_toolchains() {
    let env = TestEnv::new();

    let result = env.run(&["generate", "--target", "make"]);

    assert!(result.success);
    assert!(env.project_path("target/make/Makefile").is_file());
    assert!(!env.project_path("target/cmake").exists());
}

#[test]
fn unknown_target_fails() {
    let env = TestEnv::new();

    let result = env.run(&["generate", "--target", "ninja"]);

    assert!(!result.success);
    assert!(result.stderr.contains("unknown toolchain 'ninja'"), "{}", result.stderr);
}

#[test]
fn project_config_selects_output_dir_and_targets() {
    let env = TestEnv::new();
    env.write_project_file(
        "xgen.toml",
        "[generator]\ntargets = [\"cmake\"]\noutput_dir = \"build-files\"\n",
    );

    let result = env.run(&[]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(env.project_path("build-files/cmake/CMakeLists.txt").is_file());
    assert!(!env.project_path("build-files/make").exists());
    assert!(!env.project_path("target").exists());
}

#[test]
fn unknown_config_key_is_a_warning() {
    let env = TestEnv::new();
    env.write_project_file("xgen.toml", "[generator]\nflavour = \"spicy\"\n");

    let result = env.run(&[]);

    assert!(result.success);
    assert!(
        result.stderr.contains("Unknown config key 'flavour' in"),
        "{}",
        result.stderr
    );
}

#[test]
fn workspace_env_var_reaches_makefile() {
    let env = TestEnv::new();

    let result = env.run_with_env(&["generate", "--target", "make"], &[("XVMEM_WORKSPACE", "/ws")]);

    assert!(result.success);
    let makefile = env.read_project_file("target/make/Makefile");
    assert!(makefile.contains("WORKSPACE ?= /ws\n"));
}

#[test]
fn workspace_flag_overrides_env_var() {
    let env = TestEnv::new();

    let result = env.run_with_env(
        &["generate", "--target", "make", "--workspace", "/flag"],
        &[("XVMEM_WORKSPACE", "/env")],
    );

    assert!(result.success);
    let makefile = env.read_project_file("target/make/Makefile");
    assert!(makefile.contains("WORKSPACE ?= /flag\n"));
}

#[test]
fn modified_file_is_skipped_until_forced() {
    let env = TestEnv::new();
    assert!(env.run(&[]).success);
    env.write_project_file("target/make/Makefile", "# edited by hand\n");

    let skipped = env.run(&[]);
    assert!(skipped.success);
    assert!(skipped.stdout.contains("Skipped: 1 files"), "{}", skipped.stdout);
    assert_eq!(env.read_project_file("target/make/Makefile"), "# edited by hand\n");

    let forced = env.run(&["generate", "--force"]);
    assert!(forced.success);
    assert!(env
        .read_project_file("target/make/Makefile")
        .contains("xvmem_test_BIN"));
}
