//! Property tests for the xvmem descriptor built from arbitrary collaborators.

use std::sync::Arc;

use proptest::prelude::*;

use xvmem::denv::{setup_default_cpp_lib_project, Package};
use xvmem::packages::{build_package_descriptor_from, PackageSource};
use xvmem::GenResult;

struct Stub {
    name: String,
}

impl PackageSource for Stub {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_package(&self) -> GenResult<Package> {
        let path = format!("stub/{}", self.name);
        let mut package = Package::new(self.name.as_str(), path.as_str());
        package.add_main_lib(Arc::new(setup_default_cpp_lib_project(&self.name, &path)));
        Ok(package)
    }
}

fn stub_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,11}").unwrap()
}

fn stub_names() -> impl Strategy<Value = (String, String, String)> {
    (stub_name(), stub_name(), stub_name()).prop_filter("distinct, not xvmem", |(u, e, b)| {
        u != e && e != b && u != b && [u, e, b].iter().all(|n| !n.starts_with("xvmem"))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: sub-packages keep the unittest, entry, base order.
    #[test]
    fn property_subpackages_follow_collaborator_order((u, e, b) in stub_names()) {
        let package = build_package_descriptor_from(
            &Stub { name: u.clone() },
            &Stub { name: e.clone() },
            &Stub { name: b.clone() },
        ).unwrap();

        let names: Vec<&str> = package.packages().iter().map(|p| p.name()).collect();
        prop_assert_eq!(names, vec![u.as_str(), e.as_str(), b.as_str()]);
    }

    /// PROPERTY: the library depends only on base; the test on all four, in order.
    #[test]
    fn property_dependency_lists_are_exact((u, e, b) in stub_names()) {
        let package = build_package_descriptor_from(
            &Stub { name: u.clone() },
            &Stub { name: e.clone() },
            &Stub { name: b.clone() },
        ).unwrap();

        let lib = package.main_lib().unwrap();
        prop_assert_eq!(lib.dependency_names(), vec![b.as_str()]);

        prop_assert_eq!(package.unittests().len(), 1);
        let test = &package.unittests()[0];
        prop_assert_eq!(test.name(), "xvmem_test");
        prop_assert_eq!(
            test.dependency_names(),
            vec![u.as_str(), e.as_str(), b.as_str(), "xvmem"]
        );
        prop_assert!(package.validate().is_ok());
    }

    /// PROPERTY: the base library seen by the lib and the test is the same instance.
    #[test]
    fn property_base_library_is_shared((u, e, b) in stub_names()) {
        let package = build_package_descriptor_from(
            &Stub { name: u },
            &Stub { name: e },
            &Stub { name: b },
        ).unwrap();

        let from_lib = &package.main_lib().unwrap().dependencies()[0];
        let from_test = &package.unittests()[0].dependencies()[2];
        prop_assert!(Arc::ptr_eq(from_lib, from_test));
        prop_assert!(Arc::ptr_eq(from_lib, package.packages()[2].main_lib().unwrap()));
    }
}
