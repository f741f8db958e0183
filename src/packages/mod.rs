//! Package descriptor builders
//!
//! Every package this repository knows about implements [`PackageSource`].
//! `xbase`, `xentry` and `xunittest` are the external collaborators;
//! `xvmem` is the package this repository describes.

pub mod xbase;
pub mod xentry;
pub mod xunittest;
pub mod xvmem;

pub use xbase::XBase;
pub use xentry::XEntry;
pub use xunittest::XUnitTest;
pub use xvmem::{build_package_descriptor, build_package_descriptor_from, get_package, XVMem};

use crate::denv::Package;
use crate::error::{GenError, GenResult};

/// A named provider of a package descriptor
pub trait PackageSource {
    /// Package name
    fn name(&self) -> &str;

    /// Build a fresh descriptor. Every call returns a new instance.
    fn get_package(&self) -> GenResult<Package>;
}

/// Get all built-in package sources
pub fn all_packages() -> Vec<Box<dyn PackageSource>> {
    vec![
        Box::new(XBase::new()),
        Box::new(XEntry::new()),
        Box::new(XUnitTest::new()),
        Box::new(XVMem::new()),
    ]
}

/// Get a built-in package source by name
pub fn find_package(name: &str) -> GenResult<Box<dyn PackageSource>> {
    all_packages()
        .into_iter()
        .find(|source| source.name() == name)
        .ok_or_else(|| GenError::UnknownPackage {
            name: name.to_string(),
        })
}

/// Repository path for a package hosted under the common account
pub(crate) fn repo_path(name: &str) -> String {
    format!("github.com\\jurgen-kluft\\{name}")
}
