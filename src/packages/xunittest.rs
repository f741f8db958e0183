//! `xunittest` - unit-test framework package

use std::sync::Arc;

use super::{repo_path, PackageSource};
use crate::denv::{setup_default_cpp_lib_project, Package};
use crate::error::GenResult;

/// Descriptor source for `xunittest`
#[derive(Debug, Clone, Copy, Default)]
pub struct XUnitTest;

impl XUnitTest {
    pub fn new() -> Self {
        Self
    }
}

impl PackageSource for XUnitTest {
    fn name(&self) -> &str {
        "xunittest"
    }

    fn get_package(&self) -> GenResult<Package> {
        let path = repo_path("xunittest");
        let mut package = Package::new("xunittest", path.as_str());
        package.add_main_lib(Arc::new(setup_default_cpp_lib_project("xunittest", &path)));
        Ok(package)
    }
}
