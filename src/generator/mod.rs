//! Build-file generator
//!
//! `init` creates a [`GeneratorContext`]; `generate` turns a package into
//! native build files under the context's output directory.
//!
//! ```text
//! Package ──► DependencyGraph ──► BuildBackend (per toolchain) ──► OutputFile
//!                                                                     │
//!                         Manifest + disk state ──► GeneratePlan ◄───┘
//!                                                        │
//!                                                        ▼
//!                                               write / remove files
//! ```

pub mod backends;
pub mod context;
pub mod manifest;
pub mod output;
pub mod plan;
pub mod toolchain;

pub use backends::{backend_for, BuildBackend};
pub use context::{init, GeneratorContext, GeneratorOptions};
pub use manifest::{Manifest, MANIFEST_FILE};
pub use output::OutputFile;
pub use plan::{execute_plan, plan_outputs, FileAction, GeneratePlan, GenerateReport, PlannedFile};
pub use toolchain::{BuildConfiguration, Toolchain};

use tracing::{debug, info, warn};

use crate::denv::{DependencyGraph, Package};
use crate::error::GenResult;
use crate::fs::LocalFs;

/// Produce the build files for every configured toolchain, in memory
pub fn emit(ctx: &GeneratorContext, package: &Package) -> GenResult<Vec<OutputFile>> {
    package.validate()?;
    let graph = DependencyGraph::build(package)?;

    let mut outputs = Vec::new();
    for toolchain in ctx.toolchains() {
        let files = backend_for(*toolchain).emit(package, &graph, ctx)?;
        for file in &files {
            debug!(
                path = %file.path().display(),
                toolchain = %file.toolchain(),
                bytes = file.content().len(),
                "emitted"
            );
        }
        info!(toolchain = %toolchain, files = files.len(), "emitted build files");
        outputs.extend(files);
    }
    Ok(outputs)
}

fn prepare(ctx: &GeneratorContext, package: &Package) -> GenResult<(GeneratePlan, Manifest)> {
    let outputs = emit(ctx, package)?;
    let manifest = Manifest::load(&ctx.manifest_path())?;

    if let Some(previous) = manifest.package() {
        if previous != package.name() {
            warn!(
                previous,
                current = package.name(),
                "output directory was last generated for another package"
            );
        }
    }

    let plan = plan_outputs(&outputs, &manifest, &LocalFs::new(), &ctx.output_root(), ctx.force())?;
    Ok((plan, manifest))
}

/// Plan generation without touching the file system
pub fn plan(ctx: &GeneratorContext, package: &Package) -> GenResult<GeneratePlan> {
    prepare(ctx, package).map(|(plan, _)| plan)
}

/// Generate build files for `package` and record them in the manifest
pub fn generate(ctx: &GeneratorContext, package: &Package) -> GenResult<GenerateReport> {
    let (plan, previous) = prepare(ctx, package)?;
    let fs = LocalFs::new();
    let (report, mut manifest) =
        execute_plan(&plan, &previous, &fs, &ctx.output_root(), ctx.dry_run())?;

    if !ctx.dry_run() {
        manifest.set_package(package.name());
        manifest.touch(ctx.started_at());
        manifest.save(&ctx.manifest_path())?;
    }

    info!(
        package = package.name(),
        created = report.created.len(),
        updated = report.updated.len(),
        unchanged = report.unchanged.len(),
        skipped = report.skipped.len(),
        removed = report.removed.len(),
        dry_run = report.dry_run,
        "generation finished"
    );
    Ok(report)
}
