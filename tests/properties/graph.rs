//! Property tests for dependency ordering.

use std::sync::Arc;

use proptest::prelude::*;

use xvmem::denv::{
    setup_default_cpp_lib_project, setup_default_cpp_test_project, DependencyGraph, Package,
    Project,
};

/// Random DAG: project `i` may depend on any project `j < i`.
fn dag() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..8).prop_flat_map(|n| {
        (0..n)
            .map(|i| proptest::collection::vec(0..i.max(1), 0..=i.min(3)))
            .collect::<Vec<_>>()
    })
}

fn package_from(edges: &[Vec<usize>]) -> Package {
    let mut projects: Vec<Arc<Project>> = Vec::new();
    for (i, deps) in edges.iter().enumerate() {
        let name = format!("lib{i}");
        let mut project = setup_default_cpp_lib_project(&name, &name);
        let mut seen = Vec::new();
        for &d in deps {
            if !seen.contains(&d) {
                seen.push(d);
                project.add_dependency(projects[d].clone());
            }
        }
        projects.push(Arc::new(project));
    }

    let main_lib = projects[projects.len() - 1].clone();
    let mut package = Package::new("prop", "prop");
    let mut test = setup_default_cpp_test_project("prop_test", "prop");
    test.add_dependency(main_lib.clone());
    package.add_main_lib(main_lib);
    package.add_unittest(Arc::new(test));
    package
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every project appears after all of its dependencies.
    #[test]
    fn property_build_order_is_dependencies_first(edges in dag()) {
        let package = package_from(&edges);
        let graph = DependencyGraph::build(&package).unwrap();
        let order: Vec<&str> = graph.build_order().iter().map(|p| p.name()).collect();

        for (position, project) in graph.build_order().iter().enumerate() {
            for dependency in project.dependencies() {
                let dep_position = order.iter().position(|n| *n == dependency.name()).unwrap();
                prop_assert!(dep_position < position, "{} before {}", dependency.name(), project.name());
            }
        }
    }

    /// PROPERTY: each project name appears exactly once.
    #[test]
    fn property_build_order_has_no_duplicates(edges in dag()) {
        let graph = DependencyGraph::build(&package_from(&edges)).unwrap();
        let mut names: Vec<&str> = graph.build_order().iter().map(|p| p.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), total);
        prop_assert_eq!(graph.build_order().last().unwrap().name(), "prop_test");
    }

    /// PROPERTY: link order lists every library after the libraries using it.
    #[test]
    fn property_link_order_is_dependents_first(edges in dag()) {
        let graph = DependencyGraph::build(&package_from(&edges)).unwrap();
        let link: Vec<&str> = graph.link_order("prop_test").iter().map(|p| p.name()).collect();

        for (position, name) in link.iter().enumerate() {
            let project = graph.get(name).unwrap();
            for dependency in project.dependencies() {
                let dep_position = link.iter().position(|n| *n == dependency.name()).unwrap();
                prop_assert!(position < dep_position);
            }
        }
    }
}
