use std::collections::BTreeSet;

use zedd::{Engine, Error, Hom, Pattern, Symbol, Zdd};

fn members(dd: &Zdd<i32>) -> BTreeSet<Vec<i32>> {
    dd.iter().collect()
}

#[test]
fn ut_identity_accept_reject() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![3]]);

    assert!(Hom::Identity.apply(&mut engine, &dd) == dd);
    assert!(Hom::Accept.apply(&mut engine, &dd).is_one());
    assert!(Hom::Reject.apply(&mut engine, &dd).is_zero());
}

#[test]
fn ut_compositions() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![3]]);

    // id ∪ id = id, id ∩ reject = reject.
    let both = Hom::union(Hom::Identity, Hom::Identity);
    assert!(both.apply(&mut engine, &dd) == dd);

    let none = Hom::intersection(Hom::Identity, Hom::Reject);
    assert!(none.apply(&mut engine, &dd).is_zero());

    let minus = Hom::difference(Hom::Identity, Hom::Identity);
    assert!(minus.apply(&mut engine, &dd).is_zero());

    let toggle = Hom::symmetric_difference(Hom::Identity, Hom::Accept);
    let toggled = toggle.apply(&mut engine, &dd);
    assert_eq!(
        members(&toggled),
        BTreeSet::from([vec![], vec![1, 2], vec![3]])
    );
}

#[test]
fn ut_update_sets_key() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3], vec![]]);

    let update = Hom::update(&Pattern::of([Symbol::positive(2)])).unwrap();
    let rv = update.apply(&mut engine, &dd);
    assert_eq!(
        members(&rv),
        BTreeSet::from([vec![1, 2], vec![2, 3], vec![2]])
    );
}

#[test]
fn ut_update_unsets_key() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3], vec![3]]);

    let update = Hom::update(&Pattern::of([Symbol::negative(2)])).unwrap();
    let rv = update.apply(&mut engine, &dd);
    assert_eq!(members(&rv), BTreeSet::from([vec![1], vec![3]]));
}

#[test]
fn ut_update_mixed_minterm() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3]]);

    let pattern = Pattern::of([Symbol::positive(4), Symbol::negative(2)]);
    let update = Hom::update(&pattern).unwrap();
    let rv = update.apply(&mut engine, &dd);
    assert_eq!(members(&rv), BTreeSet::from([vec![1, 4], vec![3, 4]]));
}

#[test]
fn ut_update_on_zero() {
    let mut engine = Engine::new();
    let zero = engine.zero();

    let update = Hom::update(&Pattern::of([Symbol::positive(1)])).unwrap();
    assert!(update.apply(&mut engine, &zero).is_zero());
}

#[test]
fn ut_update_rejects_disjunctive_patterns() {
    let disjunction = Pattern::of([Symbol::positive(1)]) | Pattern::of([Symbol::positive(2)]);
    assert!(matches!(
        Hom::<i32>::update(&disjunction),
        Err(Error::IllDefinedPattern)
    ));
    assert!(matches!(
        Hom::<i32>::update(&Pattern::empty()),
        Err(Error::IllDefinedPattern)
    ));
}

#[test]
fn ut_filter_positive() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3], vec![3]]);

    let filter = Hom::filter(Pattern::of([Symbol::positive(2)]), Hom::Identity);
    let rv = filter.apply(&mut engine, &dd);
    assert_eq!(members(&rv), BTreeSet::from([vec![1, 2], vec![2, 3]]));
}

#[test]
fn ut_filter_negative() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3], vec![3]]);

    let filter = Hom::filter(Pattern::of([Symbol::negative(2)]), Hom::Identity);
    let rv = filter.apply(&mut engine, &dd);
    assert_eq!(members(&rv), BTreeSet::from([vec![3]]));
}

#[test]
fn ut_filter_minterm_conjunction() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3], vec![2]]);

    let pattern = Pattern::of([Symbol::positive(2), Symbol::negative(3)]);
    let filter = Hom::filter(pattern, Hom::Identity);
    let rv = filter.apply(&mut engine, &dd);
    assert_eq!(members(&rv), BTreeSet::from([vec![1, 2], vec![2]]));
}

#[test]
fn ut_filter_disjunction() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3], vec![3], vec![4]]);

    let pattern = Pattern::of([Symbol::positive(1)]) | Pattern::of([Symbol::positive(3)]);
    let filter = Hom::filter(pattern, Hom::Identity);
    let rv = filter.apply(&mut engine, &dd);
    assert_eq!(
        members(&rv),
        BTreeSet::from([vec![1, 2], vec![2, 3], vec![3]])
    );
}

#[test]
fn ut_filter_then_update() {
    let mut engine = Engine::new();
    let dd = engine.from_family([vec![1, 2], vec![2, 3], vec![3]]);

    // Select the members holding 2, then force 9 into them.
    let update = Hom::update(&Pattern::of([Symbol::positive(9)])).unwrap();
    let filter = Hom::filter(Pattern::of([Symbol::positive(2)]), update);
    let rv = filter.apply(&mut engine, &dd);
    assert_eq!(
        members(&rv),
        BTreeSet::from([vec![1, 2, 9], vec![2, 3, 9]])
    );
}
