//! Property-based tests for tab registry operations.
//!
//! Arbitrary sequences of create, close and activate calls must keep tab ids
//! unique, keep exactly one active tab whenever any tab is open, and never
//! leave a surface alive for a closed tab.

use std::collections::HashSet;

use proptest::prelude::*;
use shynav::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use shynav::surface::headless::HeadlessSurfaceProvider;
use shynav::types::tab::TabId;

#[derive(Debug, Clone)]
enum TabOp {
    Create,
    /// Closes the tab at this index of the current order, modulo its length.
    Close(usize),
    Activate(usize),
    /// Addresses an id that may never have existed.
    CloseRaw(u64),
}

fn arb_op() -> impl Strategy<Value = TabOp> {
    prop_oneof![
        3 => Just(TabOp::Create),
        2 => (0usize..8).prop_map(TabOp::Close),
        2 => (0usize..8).prop_map(TabOp::Activate),
        1 => (0u64..40).prop_map(TabOp::CloseRaw),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn registry_invariants_hold(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let provider = HeadlessSurfaceProvider::new();
        let probe = provider.probe();
        let mut registry = TabRegistry::new(Box::new(provider));
        let mut issued: HashSet<TabId> = HashSet::new();

        for op in ops {
            match op {
                TabOp::Create => {
                    let id = registry.create_tab(None).unwrap();
                    prop_assert!(issued.insert(id), "id {} handed out twice", id);
                }
                TabOp::Close(i) => {
                    if !registry.is_empty() {
                        let id = registry.tab_order()[i % registry.tab_count()];
                        prop_assert!(registry.close_tab(id));
                        prop_assert!(probe.is_destroyed(id));
                    }
                }
                TabOp::Activate(i) => {
                    if !registry.is_empty() {
                        let id = registry.tab_order()[i % registry.tab_count()];
                        prop_assert!(registry.set_active_tab(id));
                        prop_assert_eq!(registry.active_id(), Some(id));
                    }
                }
                TabOp::CloseRaw(raw) => {
                    let id = TabId(raw);
                    let known = registry.contains(id);
                    prop_assert_eq!(registry.close_tab(id), known);
                }
            }

            let tabs = registry.get_all_tabs();
            let active_count = tabs.iter().filter(|t| t.is_active).count();
            if tabs.is_empty() {
                prop_assert_eq!(registry.active_id(), None);
            } else {
                prop_assert_eq!(active_count, 1);
                let active = registry.active_id().unwrap();
                prop_assert!(registry.contains(active));
                prop_assert!(probe.is_visible(active));
            }
            let unique: HashSet<TabId> = tabs.iter().map(|t| t.id).collect();
            prop_assert_eq!(unique.len(), tabs.len());
            prop_assert_eq!(probe.live_count(), tabs.len());
        }
    }

    #[test]
    fn ids_increase_monotonically(creates in 1usize..20, closes in proptest::collection::vec(any::<bool>(), 20)) {
        let mut registry = TabRegistry::new(Box::new(HeadlessSurfaceProvider::new()));
        let mut last = 0u64;
        for i in 0..creates {
            let id = registry.create_tab(None).unwrap();
            prop_assert!(id.get() > last);
            last = id.get();
            if closes[i] {
                registry.close_tab(id);
            }
        }
    }
}
