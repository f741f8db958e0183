//! GNU Make backend
//!
//! Generates `make/Makefile`:
//! - one static archive per library, one binary per test/application
//! - sources are collected recursively below every source directory
//! - `CONFIG=debug|release` selects the build configuration
//! - `make test` builds and runs every unit-test binary

use std::fmt::Write as _;

use super::{banner, include_dirs, slash_path, BuildBackend};
use crate::denv::{DependencyGraph, Package, Project, ProjectKind};
use crate::error::GenResult;
use crate::generator::context::GeneratorContext;
use crate::generator::output::OutputFile;
use crate::generator::toolchain::Toolchain;

/// Recursive counterpart of `$(wildcard)`, matching CMake's `GLOB_RECURSE`
const RWILDCARD: &str =
    "rwildcard = $(foreach d,$(wildcard $(1:=/*)),$(call rwildcard,$d,$2) $(filter $(subst *,%,$2),$d))";

/// Makefile backend
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeBackend;

impl MakeBackend {
    pub fn new() -> Self {
        Self
    }

    fn header(&self, package: &Package, graph: &DependencyGraph, ctx: &GeneratorContext) -> String {
        let mut out = banner("#", package);
        let compiler = ctx.compiler();
        let configurations = ctx.configurations();
        let default_config = configurations
            .first()
            .map(|c| c.as_str())
            .unwrap_or("debug");

        out.push('\n');
        let _ = writeln!(out, "WORKSPACE ?= {}", slash_path(&ctx.workspace_dir()));
        let _ = writeln!(out, "CONFIG ?= {default_config}");
        let _ = writeln!(out, "CXX := {}", compiler.cxx);
        let _ = writeln!(out, "AR ?= ar");
        let _ = writeln!(out, "BUILD_DIR := build/$(CONFIG)");
        out.push('\n');
        out.push_str("# $(call rwildcard,<dir>,<pattern>): recursive wildcard\n");
        let _ = writeln!(out, "{RWILDCARD}");
        out.push('\n');

        for config in configurations {
            let _ = writeln!(out, "ifeq ($(CONFIG),{})", config.as_str());
            let _ = writeln!(
                out,
                "CONFIG_FLAGS := {} -D{}",
                config.cxx_flags(),
                config.define()
            );
            out.push_str("endif\n");
        }
        out.push('\n');

        let mut flags = format!("-std={} $(CONFIG_FLAGS)", compiler.std);
        for flag in &compiler.flags {
            flags.push(' ');
            flags.push_str(flag);
        }
        let _ = writeln!(out, "CXXFLAGS := {flags}");
        out.push('\n');

        let names: Vec<&str> = graph.build_order().iter().map(|p| p.name()).collect();
        let _ = writeln!(out, ".PHONY: all test clean {}", names.join(" "));
        out.push('\n');
        let _ = writeln!(out, "all: {}", names.join(" "));
        out.push('\n');
        out
    }

    fn project_section(&self, project: &Project, graph: &DependencyGraph) -> String {
        let name = project.name();
        let mut out = String::new();

        let _ = writeln!(out, "# {} ({})", name, project.kind().as_str());
        let _ = writeln!(out, "{name}_DIR := $(WORKSPACE)/{}", project.repo_dir());

        let sources: Vec<String> = project
            .source_dirs()
            .iter()
            .map(|dir| format!("$(call rwildcard,$({name}_DIR)/{dir},*.cpp)"))
            .collect();
        let _ = writeln!(out, "{name}_SRCS := {}", sources.join(" "));
        let _ = writeln!(
            out,
            "{name}_OBJS := $(patsubst $({name}_DIR)/%.cpp,$(BUILD_DIR)/obj/{name}/%.o,$({name}_SRCS))"
        );

        let includes: Vec<String> = include_dirs(project, graph)
            .iter()
            .map(|dir| format!("-I$(WORKSPACE)/{dir}"))
            .collect();
        let _ = writeln!(out, "{name}_INCLUDES := {}", includes.join(" "));

        let defines: Vec<String> = project.defines().iter().map(|d| format!("-D{d}")).collect();
        let _ = writeln!(out, "{name}_DEFINES := {}", defines.join(" "));
        out.push('\n');

        let _ = writeln!(out, "$(BUILD_DIR)/obj/{name}/%.o: $({name}_DIR)/%.cpp");
        out.push_str("\t@mkdir -p $(dir $@)\n");
        let _ = writeln!(
            out,
            "\t$(CXX) $(CXXFLAGS) $({name}_DEFINES) $({name}_INCLUDES) -c $< -o $@"
        );
        out.push('\n');

        match project.kind() {
            ProjectKind::Library => {
                let _ = writeln!(out, "{name}_LIB := $(BUILD_DIR)/lib{name}.a");
                let _ = writeln!(out, "$({name}_LIB): $({name}_OBJS)");
                out.push_str("\t@mkdir -p $(dir $@)\n");
                out.push_str("\t$(AR) rcs $@ $^\n");
                out.push('\n');
                let _ = writeln!(out, "{name}: $({name}_LIB)");
            }
            ProjectKind::UnitTest | ProjectKind::Executable => {
                let libs: Vec<String> = graph
                    .link_order(name)
                    .iter()
                    .filter(|p| p.kind() == ProjectKind::Library)
                    .map(|p| format!("$({}_LIB)", p.name()))
                    .collect();
                let _ = writeln!(out, "{name}_LIBS := {}", libs.join(" "));
                let _ = writeln!(out, "{name}_BIN := $(BUILD_DIR)/bin/{name}");
                let _ = writeln!(out, "$({name}_BIN): $({name}_OBJS) $({name}_LIBS)");
                out.push_str("\t@mkdir -p $(dir $@)\n");
                let _ = writeln!(
                    out,
                    "\t$(CXX) $(CXXFLAGS) -o $@ $({name}_OBJS) $({name}_LIBS) $(LDFLAGS)"
                );
                out.push('\n');
                let _ = writeln!(out, "{name}: $({name}_BIN)");
            }
        }
        out.push('\n');
        out
    }

    fn footer(&self, graph: &DependencyGraph) -> String {
        let tests: Vec<&str> = graph
            .build_order()
            .iter()
            .filter(|p| p.kind() == ProjectKind::UnitTest)
            .map(|p| p.name())
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "test: {}", tests.join(" "));
        for test in &tests {
            let _ = writeln!(out, "\t$({test}_BIN)");
        }
        out.push('\n');
        out.push_str("clean:\n\trm -rf build\n");
        out
    }
}

impl BuildBackend for MakeBackend {
    fn toolchain(&self) -> Toolchain {
        Toolchain::Make
    }

    fn emit(
        &self,
        package: &Package,
        graph: &DependencyGraph,
        ctx: &GeneratorContext,
    ) -> GenResult<Vec<OutputFile>> {
        let mut content = self.header(package, graph, ctx);
        for project in graph.build_order() {
            content.push_str(&self.project_section(project, graph));
        }
        content.push_str(&self.footer(graph));

        Ok(vec![OutputFile::new("make/Makefile", content, Toolchain::Make)])
    }
}
