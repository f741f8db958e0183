//! Builds the generated Makefile against a stub workspace.
//!
//! Needs `make` and a C++ compiler on PATH:
//! `cargo test --test make_build -- --ignored`

use std::path::Path;
use std::process::Command;

use xvmem::config::Config;
use xvmem::generator::{self, GeneratorOptions, Toolchain};
use xvmem::packages::build_package_descriptor;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn stub_workspace(root: &Path) {
    for lib in ["xbase", "xentry", "xunittest", "xvmem"] {
        let repo = root.join("github.com/jurgen-kluft").join(lib);
        write(
            &repo.join(format!("source/main/cpp/{lib}.cpp")),
            &format!("int {lib}_value() {{ return 1; }}\n"),
        );
    }
    let xvmem = root.join("github.com/jurgen-kluft/xvmem");
    write(
        &xvmem.join("source/main/cpp/sub/nested.cpp"),
        "int nested_value() { return 2; }\n",
    );
    write(
        &xvmem.join("source/test/cpp/main.cpp"),
        "int main() { return 0; }\n",
    );
}

#[test]
#[ignore = "requires make and a C++ compiler"]
fn generated_makefile_builds_and_runs_tests() {
    let workspace = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    stub_workspace(workspace.path());

    let mut config = Config::default();
    config.generator.targets = vec![Toolchain::Make];
    config.generator.workspace = workspace.path().to_path_buf();
    let ctx = generator::init(GeneratorOptions::new(project.path(), config)).unwrap();
    generator::generate(&ctx, &build_package_descriptor().unwrap()).unwrap();

    let output = Command::new("make")
        .arg("-f")
        .arg(project.path().join("target/make/Makefile"))
        .arg("test")
        .current_dir(project.path())
        .output()
        .expect("failed to run make");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stdout:\n{stdout}\nstderr:\n{stderr}");
    assert!(stdout.contains("sub/nested.cpp"), "{stdout}");
    assert!(project.path().join("build/debug/bin/xvmem_test").is_file());
    assert!(project
        .path()
        .join("build/debug/obj/xvmem/source/main/cpp/sub/nested.o")
        .is_file());
}
