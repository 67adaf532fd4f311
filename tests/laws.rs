//! Property-based laws of the set algebra, checked against a model of
//! plain ordered sets.

use std::collections::BTreeSet;

use proptest::prelude::*;

use zedd::{Engine, Zdd};

type Family = Vec<BTreeSet<u8>>;
type Model = BTreeSet<BTreeSet<u8>>;

fn family() -> impl Strategy<Value = Family> {
    prop::collection::vec(prop::collection::btree_set(0u8..10, 0..5), 0..8)
}

fn build(engine: &mut Engine<u8>, family: &Family) -> Zdd<u8> {
    engine.from_family(family.iter().map(|set| set.iter().copied().collect::<Vec<_>>()))
}

fn model(family: &Family) -> Model {
    family.iter().cloned().collect()
}

fn enumerate(dd: &Zdd<u8>) -> Model {
    dd.iter().map(|member| member.into_iter().collect()).collect()
}

proptest! {
    #[test]
    fn pt_canonicity(fa in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);

        // Another enumeration order of the same family, with
        // duplicates, interns to the very same node.
        let mut shuffled = fa.clone();
        shuffled.reverse();
        shuffled.extend(fa.iter().cloned());
        let b = build(&mut engine, &shuffled);

        prop_assert!(a == b);
        prop_assert_eq!(a.id(), b.id());
    }

    #[test]
    fn pt_round_trip(fa in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let rebuilt = engine.from_family(a.iter().collect::<Vec<_>>());
        prop_assert!(rebuilt == a);
        prop_assert_eq!(enumerate(&a), model(&fa));
    }

    #[test]
    fn pt_commutativity(fa in family(), fb in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let b = build(&mut engine, &fb);

        let aub = engine.union(&a, &b);
        let bua = engine.union(&b, &a);
        prop_assert!(aub == bua);

        let aib = engine.intersection(&a, &b);
        let bia = engine.intersection(&b, &a);
        prop_assert!(aib == bia);

        let axb = engine.symmetric_difference(&a, &b);
        let bxa = engine.symmetric_difference(&b, &a);
        prop_assert!(axb == bxa);
    }

    #[test]
    fn pt_associativity(fa in family(), fb in family(), fc in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let b = build(&mut engine, &fb);
        let c = build(&mut engine, &fc);

        let ab = engine.union(&a, &b);
        let ab_c = engine.union(&ab, &c);
        let bc = engine.union(&b, &c);
        let a_bc = engine.union(&a, &bc);
        prop_assert!(ab_c == a_bc);

        let ab = engine.intersection(&a, &b);
        let ab_c = engine.intersection(&ab, &c);
        let bc = engine.intersection(&b, &c);
        let a_bc = engine.intersection(&a, &bc);
        prop_assert!(ab_c == a_bc);

        let ab = engine.symmetric_difference(&a, &b);
        let ab_c = engine.symmetric_difference(&ab, &c);
        let bc = engine.symmetric_difference(&b, &c);
        let a_bc = engine.symmetric_difference(&a, &bc);
        prop_assert!(ab_c == a_bc);
    }

    #[test]
    fn pt_identities(fa in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let zero = engine.zero();

        let rv = engine.union(&a, &zero);
        prop_assert!(rv == a);
        let rv = engine.intersection(&a, &zero);
        prop_assert!(rv.is_zero());
        let rv = engine.difference(&a, &zero);
        prop_assert!(rv == a);
        let rv = engine.difference(&zero, &a);
        prop_assert!(rv.is_zero());
        let rv = engine.symmetric_difference(&a, &a);
        prop_assert!(rv.is_zero());
    }

    #[test]
    fn pt_operations_match_model(fa in family(), fb in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let b = build(&mut engine, &fb);
        let ma = model(&fa);
        let mb = model(&fb);

        let rv = engine.union(&a, &b);
        prop_assert_eq!(enumerate(&rv), ma.union(&mb).cloned().collect::<Model>());

        let rv = engine.intersection(&a, &b);
        prop_assert_eq!(enumerate(&rv), ma.intersection(&mb).cloned().collect::<Model>());

        let rv = engine.difference(&a, &b);
        prop_assert_eq!(enumerate(&rv), ma.difference(&mb).cloned().collect::<Model>());

        let rv = engine.symmetric_difference(&a, &b);
        prop_assert_eq!(
            enumerate(&rv),
            ma.symmetric_difference(&mb).cloned().collect::<Model>()
        );
    }

    #[test]
    fn pt_membership(fa in family(), fb in family(), probe in prop::collection::btree_set(0u8..10, 0..5)) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let b = build(&mut engine, &fb);
        let ma = model(&fa);
        let mb = model(&fb);

        // Probe with every member of both families plus a random set.
        let mut probes: Vec<BTreeSet<u8>> = fa.iter().cloned().collect();
        probes.extend(fb.iter().cloned());
        probes.push(probe);

        let aub = engine.union(&a, &b);
        let aib = engine.intersection(&a, &b);
        let amb = engine.difference(&a, &b);
        let axb = engine.symmetric_difference(&a, &b);

        for set in &probes {
            let in_a = ma.contains(set);
            let in_b = mb.contains(set);
            prop_assert_eq!(a.contains(set.iter().copied()), in_a);
            prop_assert_eq!(aub.contains(set.iter().copied()), in_a || in_b);
            prop_assert_eq!(aib.contains(set.iter().copied()), in_a && in_b);
            prop_assert_eq!(amb.contains(set.iter().copied()), in_a && !in_b);
            prop_assert_eq!(axb.contains(set.iter().copied()), in_a ^ in_b);
        }
    }

    #[test]
    fn pt_cardinality(fa in family(), fb in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let b = build(&mut engine, &fb);

        let aub = engine.union(&a, &b);
        let aib = engine.intersection(&a, &b);
        prop_assert_eq!(
            engine.cardinality(&aub) + engine.cardinality(&aib),
            engine.cardinality(&a) + engine.cardinality(&b)
        );
        prop_assert_eq!(engine.cardinality(&a) as usize, a.iter().count());
    }

    #[test]
    fn pt_subset(fa in family(), fb in family(), fc in family()) {
        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let b = build(&mut engine, &fb);
        let c = build(&mut engine, &fc);

        prop_assert!(a.subset(&a));

        let ab = engine.union(&a, &b);
        let abc = engine.union(&ab, &c);
        prop_assert!(a.subset(&ab));
        prop_assert!(ab.subset(&abc));
        prop_assert!(a.subset(&abc));

        // Against the model.
        prop_assert_eq!(a.subset(&b), model(&fa).is_subset(&model(&fb)));
    }

    #[test]
    fn pt_reduction_invariant(fa in family(), fb in family()) {
        fn check(node: &Zdd<u8>, seen: &mut BTreeSet<usize>) -> bool {
            if !seen.insert(node.id()) {
                return true;
            }
            match node.as_node() {
                None => true,
                Some((_, then_, else_)) => {
                    !then_.is_zero() && check(then_, seen) && check(else_, seen)
                }
            }
        }

        let mut engine = Engine::new();
        let a = build(&mut engine, &fa);
        let b = build(&mut engine, &fb);
        let mut seen = BTreeSet::new();

        for dd in [
            engine.union(&a, &b),
            engine.intersection(&a, &b),
            engine.difference(&a, &b),
            engine.symmetric_difference(&a, &b),
        ] {
            prop_assert!(check(&dd, &mut seen));
        }
    }
}
