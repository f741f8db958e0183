mod common;

use common::TestEnv;

#[test]
fn diff_shows_new_files_without_writing() {
    let env = TestEnv::new();

    let result = env.run(&["diff"]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert!(result.stdout.contains("+++ b/make/Makefile"));
    assert!(result.stdout.contains("+++ b/cmake/CMakeLists.txt"));
    assert!(!env.project_path("target").exists());
}

#[test]
fn diff_after_generate_has_no_changes() {
    let env = TestEnv::new();
    assert!(env.run(&[]).success);

    let result = env.run(&["diff"]);

    assert!(result.success);
    assert!(result.stdout.contains("No changes"), "{}", result.stdout);
}

#[test]
fn diff_json_lists_actions() {
    let env = TestEnv::new();

    let result = env.run(&["diff", "--json", "--target", "cmake"]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    let json = result.json();
    assert_eq!(json["event"], "diff");
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["path"], "cmake/CMakeLists.txt");
    assert_eq!(files[0]["action"], "create");
}

#[test]
fn generate_flags_before_a_subcommand_are_rejected() {
    let env = TestEnv::new();

    let diff = env.run(&["--force", "diff"]);
    let graph = env.run(&["--dry-run", "graph"]);

    assert!(!diff.success);
    assert!(!graph.success);
    assert!(!env.project_path("target").exists());
}
