/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::thread;

use depcheck_core::logging::init_tracing_for_writer;
use depcheck_node::attrs::attr::Attribute;
use depcheck_node::nodes::prerequisite::Prerequisite;
use depcheck_node::nodes::unconfigured::testing::TargetNodeBuilder;
use depcheck_node::nodes::unconfigured::TargetNode;
use depcheck_validation::diagnostics::CollectedDiagnostics;
use depcheck_validation::edge::DependencyEdge;
use depcheck_validation_tests::native_rule;
use depcheck_validation_tests::Setup;

fn consumers() -> Vec<TargetNode> {
    (0..32)
        .map(|i| {
            let pkg = if i % 2 == 0 { "app" } else { "other" };
            TargetNodeBuilder::rule(&format!("//{}/t{}:bin", pkg, i), native_rule("cc_binary"))
                .build()
        })
        .collect()
}

fn prerequisites() -> Vec<Prerequisite> {
    vec![
        Prerequisite::new(
            TargetNodeBuilder::rule("//common:lib", native_rule("cc_library"))
                .visible_to(&["//app/..."])
                .build(),
        ),
        Prerequisite::new(
            TargetNodeBuilder::rule("//common:old", native_rule("cc_library"))
                .deprecated("use //common:lib")
                .build(),
        ),
    ]
}

fn validate_target(
    setup: &Setup,
    consumer: &TargetNode,
    attribute: &Attribute,
    prerequisites: &[Prerequisite],
) -> CollectedDiagnostics {
    let edges: Vec<DependencyEdge<'_>> = prerequisites
        .iter()
        .map(|p| DependencyEdge::new(consumer, attribute, p).unwrap())
        .collect();
    let mut sink = CollectedDiagnostics::new();
    setup
        .validator()
        .validate_all(&edges, &setup.config, &mut sink);
    sink
}

#[test]
fn test_shared_validator_across_threads() {
    // Exercise the logging paths; another test binary may not have installed a subscriber.
    let _ignored = init_tracing_for_writer(std::io::sink);

    let setup = Setup::new();
    let attribute = Attribute::testing_new("deps");
    let consumers = consumers();
    let prerequisites = prerequisites();

    let sequential: Vec<_> = consumers
        .iter()
        .map(|c| validate_target(&setup, c, &attribute, &prerequisites))
        .collect();

    let (setup, attribute, prerequisites) = (&setup, &attribute, &prerequisites[..]);
    let parallel: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = consumers
            .iter()
            .map(|c| s.spawn(move || validate_target(setup, c, attribute, prerequisites)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
    for (consumer, diagnostics) in consumers.iter().zip(&parallel) {
        let in_app = consumer.pkg().to_string().starts_with("root//app/");
        assert_eq!(!in_app, diagnostics.has_errors(), "{}", consumer.label());
        assert_eq!(1, diagnostics.warnings().count());
    }
}
