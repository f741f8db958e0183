//! CMake backend
//!
//! Generates `cmake/CMakeLists.txt` with one target per project. Libraries
//! export their include directories so dependents pick them up through
//! `target_link_libraries`.

use std::fmt::Write as _;

use super::{banner, slash_path, unique_dependency_names, BuildBackend};
use crate::denv::{DependencyGraph, Package, Project, ProjectKind};
use crate::error::GenResult;
use crate::generator::context::GeneratorContext;
use crate::generator::output::OutputFile;
use crate::generator::toolchain::Toolchain;

/// Cache variable pointing at the workspace
const WORKSPACE_VAR: &str = "XGEN_WORKSPACE";

/// CMakeLists.txt backend
#[derive(Debug, Clone, Copy, Default)]
pub struct CMakeBackend;

impl CMakeBackend {
    pub fn new() -> Self {
        Self
    }

    fn header(&self, package: &Package, ctx: &GeneratorContext) -> String {
        let mut out = banner("#", package);
        let compiler = ctx.compiler();

        out.push('\n');
        out.push_str("cmake_minimum_required(VERSION 3.16)\n");
        let _ = writeln!(out, "project({} LANGUAGES CXX)", package.name());
        out.push('\n');

        match cxx_standard(&compiler.std) {
            Some(standard) => {
                let _ = writeln!(out, "set(CMAKE_CXX_STANDARD {standard})");
                out.push_str("set(CMAKE_CXX_STANDARD_REQUIRED ON)\n");
            }
            None => {
                let _ = writeln!(out, "add_compile_options(-std={})", compiler.std);
            }
        }
        if !compiler.flags.is_empty() {
            let _ = writeln!(out, "add_compile_options({})", compiler.flags.join(" "));
        }

        let names: Vec<&str> = ctx.configurations().iter().map(|c| c.cmake_name()).collect();
        let _ = writeln!(
            out,
            "set(CMAKE_CONFIGURATION_TYPES \"{}\" CACHE STRING \"\" FORCE)",
            names.join(";")
        );
        if let Some(first) = ctx.configurations().first() {
            out.push_str("if(NOT CMAKE_BUILD_TYPE)\n");
            let _ = writeln!(out, "  set(CMAKE_BUILD_TYPE {})", first.cmake_name());
            out.push_str("endif()\n");
        }

        let defines: Vec<String> = ctx
            .configurations()
            .iter()
            .map(|c| format!("$<$<CONFIG:{}>:{}>", c.cmake_name(), c.define()))
            .collect();
        let _ = writeln!(out, "add_compile_definitions({})", defines.join(" "));
        out.push('\n');

        let _ = writeln!(
            out,
            "set({WORKSPACE_VAR} \"{}\" CACHE PATH \"Directory holding the checked-out repositories\")",
            slash_path(&ctx.workspace_dir())
        );
        out.push('\n');
        out.push_str("enable_testing()\n\n");
        out
    }

    fn project_section(&self, project: &Project) -> String {
        let name = project.name();
        let root = format!("${{{WORKSPACE_VAR}}}/{}", project.repo_dir());
        let mut out = String::new();

        let _ = writeln!(out, "# {} ({})", name, project.kind().as_str());

        let globs: Vec<String> = project
            .source_dirs()
            .iter()
            .map(|dir| format!("\"{root}/{dir}/*.cpp\""))
            .collect();
        let _ = writeln!(
            out,
            "file(GLOB_RECURSE {name}_SOURCES CONFIGURE_DEPENDS {})",
            globs.join(" ")
        );

        let (visibility, link_visibility) = match project.kind() {
            ProjectKind::Library => {
                let _ = writeln!(out, "add_library({name} STATIC ${{{name}_SOURCES}})");
                ("PUBLIC", "PUBLIC")
            }
            ProjectKind::UnitTest | ProjectKind::Executable => {
                let _ = writeln!(out, "add_executable({name} ${{{name}_SOURCES}})");
                ("PRIVATE", "PRIVATE")
            }
        };

        if !project.include_dirs().is_empty() {
            let includes: Vec<String> = project
                .include_dirs()
                .iter()
                .map(|dir| format!("\"{root}/{dir}\""))
                .collect();
            let _ = writeln!(
                out,
                "target_include_directories({name} {visibility} {})",
                includes.join(" ")
            );
        }

        if !project.defines().is_empty() {
            let _ = writeln!(
                out,
                "target_compile_definitions({name} PRIVATE {})",
                project.defines().join(" ")
            );
        }

        let dependencies = unique_dependency_names(project);
        if !dependencies.is_empty() {
            let _ = writeln!(
                out,
                "target_link_libraries({name} {link_visibility} {})",
                dependencies.join(" ")
            );
        }

        if project.kind() == ProjectKind::UnitTest {
            let _ = writeln!(out, "add_test(NAME {name} COMMAND {name})");
        }

        out.push('\n');
        out
    }
}

/// `c++17` / `gnu++20` → `17` / `20`
fn cxx_standard(std: &str) -> Option<&str> {
    let digits = std
        .strip_prefix("c++")
        .or_else(|| std.strip_prefix("gnu++"))?;
    (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())).then_some(digits)
}

impl BuildBackend for CMakeBackend {
    fn toolchain(&self) -> Toolchain {
        Toolchain::CMake
    }

    fn emit(
        &self,
        package: &Package,
        graph: &DependencyGraph,
        ctx: &GeneratorContext,
    ) -> GenResult<Vec<OutputFile>> {
        let mut content = self.header(package, ctx);
        for project in graph.build_order() {
            content.push_str(&self.project_section(project));
        }

        Ok(vec![OutputFile::new(
            "cmake/CMakeLists.txt",
            content,
            Toolchain::CMake,
        )])
    }
}
