//! `xbase` - base utility package

use std::sync::Arc;

use super::{repo_path, PackageSource};
use crate::denv::{setup_default_cpp_lib_project, setup_default_cpp_test_project, Package};
use crate::error::GenResult;

/// Descriptor source for `xbase`
#[derive(Debug, Clone, Copy, Default)]
pub struct XBase;

impl XBase {
    pub fn new() -> Self {
        Self
    }
}

impl PackageSource for XBase {
    fn name(&self) -> &str {
        "xbase"
    }

    fn get_package(&self) -> GenResult<Package> {
        let path = repo_path("xbase");
        let mut package = Package::new("xbase", path.as_str());

        let main_lib = Arc::new(setup_default_cpp_lib_project("xbase", &path));

        let mut test = setup_default_cpp_test_project("xbase_test", &path);
        test.add_dependency(main_lib.clone());

        package.add_main_lib(main_lib);
        package.add_unittest(Arc::new(test));
        Ok(package)
    }
}
