//! `xentry` - program entry point package used by test binaries

use std::sync::Arc;

use super::{repo_path, PackageSource};
use crate::denv::{setup_default_cpp_lib_project, Package};
use crate::error::GenResult;

/// Descriptor source for `xentry`
#[derive(Debug, Clone, Copy, Default)]
pub struct XEntry;

impl XEntry {
    pub fn new() -> Self {
        Self
    }
}

impl PackageSource for XEntry {
    fn name(&self) -> &str {
        "xentry"
    }

    fn get_package(&self) -> GenResult<Package> {
        let path = repo_path("xentry");
        let mut package = Package::new("xentry", path.as_str());
        package.add_main_lib(Arc::new(setup_default_cpp_lib_project("xentry", &path)));
        Ok(package)
    }
}
