//! `xvmem` - the package this repository describes
//!
//! One static library plus a unit-test binary linking the unit-test
//! framework, the entry point, the base package and the library itself.

use std::sync::Arc;

use tracing::debug;

use super::{repo_path, PackageSource, XBase, XEntry, XUnitTest};
use crate::denv::{setup_default_cpp_lib_project, setup_default_cpp_test_project, Package};
use crate::error::GenResult;

/// Package and main library name
pub const PACKAGE_NAME: &str = "xvmem";

/// Unit-test project name
pub const TEST_NAME: &str = "xvmem_test";

/// Descriptor source for `xvmem`
#[derive(Debug, Clone, Copy, Default)]
pub struct XVMem;

impl XVMem {
    pub fn new() -> Self {
        Self
    }
}

impl PackageSource for XVMem {
    fn name(&self) -> &str {
        PACKAGE_NAME
    }

    fn get_package(&self) -> GenResult<Package> {
        build_package_descriptor()
    }
}

/// Build the `xvmem` package from the built-in collaborators
pub fn build_package_descriptor() -> GenResult<Package> {
    build_package_descriptor_from(&XUnitTest::new(), &XEntry::new(), &XBase::new())
}

/// Alias matching the naming used by the other package sources
pub fn get_package() -> GenResult<Package> {
    build_package_descriptor()
}

/// Build the `xvmem` package from explicit collaborators
///
/// Fails only when a collaborator fails or has no main library.
pub fn build_package_descriptor_from(
    unittest: &dyn PackageSource,
    entry: &dyn PackageSource,
    base: &dyn PackageSource,
) -> GenResult<Package> {
    let unittest_pkg = Arc::new(unittest.get_package()?);
    let entry_pkg = Arc::new(entry.get_package()?);
    let base_pkg = Arc::new(base.get_package()?);

    let path = repo_path(PACKAGE_NAME);
    let mut package = Package::new(PACKAGE_NAME, path.as_str());
    package.add_package(unittest_pkg.clone());
    package.add_package(entry_pkg.clone());
    package.add_package(base_pkg.clone());

    let mut main_lib = setup_default_cpp_lib_project(PACKAGE_NAME, &path);
    main_lib.add_dependency(base_pkg.require_main_lib()?.clone());
    let main_lib = Arc::new(main_lib);

    let mut test = setup_default_cpp_test_project(TEST_NAME, &path);
    test.add_dependency(unittest_pkg.require_main_lib()?.clone());
    test.add_dependency(entry_pkg.require_main_lib()?.clone());
    test.add_dependency(base_pkg.require_main_lib()?.clone());
    test.add_dependency(main_lib.clone());

    package.add_main_lib(main_lib);
    package.add_unittest(Arc::new(test));

    debug!(package = PACKAGE_NAME, "built package descriptor");
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;

    /// Collaborator whose package and main library share one name
    struct Stub(&'static str);

    impl PackageSource for Stub {
        fn name(&self) -> &str {
            self.0
        }

        fn get_package(&self) -> GenResult<Package> {
            let mut package = Package::new(self.0, self.0);
            package.add_main_lib(Arc::new(setup_default_cpp_lib_project(self.0, self.0)));
            Ok(package)
        }
    }

    /// Collaborator that never attaches a main library
    struct Hollow;

    impl PackageSource for Hollow {
        fn name(&self) -> &str {
            "hollow"
        }

        fn get_package(&self) -> GenResult<Package> {
            Ok(Package::new("hollow", "hollow"))
        }
    }

    #[test]
    fn package_is_named_xvmem() {
        let package = build_package_descriptor().unwrap();
        assert_eq!(package.name(), "xvmem");
        assert_eq!(package.path(), "github.com\\jurgen-kluft\\xvmem");
    }

    #[test]
    fn main_lib_depends_only_on_base() {
        let package = build_package_descriptor().unwrap();
        let main_lib = package.main_lib().unwrap();

        assert_eq!(main_lib.name(), "xvmem");
        assert_eq!(main_lib.dependency_names(), vec!["xbase"]);
    }

    #[test]
    fn test_depends_on_four_libraries_in_order() {
        let package = build_package_descriptor().unwrap();

        assert_eq!(package.unittests().len(), 1);
        let test = &package.unittests()[0];
        assert_eq!(test.name(), "xvmem_test");
        assert_eq!(
            test.dependency_names(),
            vec!["xunittest", "xentry", "xbase", "xvmem"]
        );
        assert!(Arc::ptr_eq(&test.dependencies()[3], package.main_lib().unwrap()));
    }

    #[test]
    fn subpackages_are_unittest_entry_base() {
        let package = build_package_descriptor().unwrap();
        let names: Vec<_> = package.packages().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["xunittest", "xentry", "xbase"]);
    }

    #[test]
    fn base_lib_is_shared_with_subpackage() {
        let package = build_package_descriptor().unwrap();
        let base_pkg = &package.packages()[2];
        let main_lib = package.main_lib().unwrap();

        assert!(Arc::ptr_eq(&main_lib.dependencies()[0], base_pkg.main_lib().unwrap()));
    }

    #[test]
    fn repeated_builds_are_equal_but_distinct() {
        let first = build_package_descriptor().unwrap();
        let second = build_package_descriptor().unwrap();

        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(first.main_lib().unwrap(), second.main_lib().unwrap()));
        assert!(!Arc::ptr_eq(&first.packages()[0], &second.packages()[0]));
    }

    #[test]
    fn descriptor_passes_validation() {
        build_package_descriptor().unwrap().validate().unwrap();
    }

    #[test]
    fn stub_collaborators_produce_expected_shape() {
        let package =
            build_package_descriptor_from(&Stub("xunittest"), &Stub("xentry"), &Stub("xbase"))
                .unwrap();

        let summary = package.summary();
        let subpackages: Vec<_> = summary.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(summary.name, "xvmem");
        assert_eq!(subpackages, vec!["xunittest", "xentry", "xbase"]);
        assert_eq!(summary.main_lib.unwrap().dependencies, vec!["xbase"]);
        assert_eq!(
            summary.unittests[0].dependencies,
            vec!["xunittest", "xentry", "xbase", "xvmem"]
        );
    }

    #[test]
    fn collaborator_without_main_lib_is_an_error() {
        let err = build_package_descriptor_from(&Stub("xunittest"), &Hollow, &Stub("xbase"))
            .unwrap_err();
        assert!(matches!(err, GenError::MissingMainLib { ref package } if package == "hollow"));
    }

    #[test]
    fn get_package_matches_builder() {
        assert_eq!(get_package().unwrap(), XVMem::new().get_package().unwrap());
    }
}
