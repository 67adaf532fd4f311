use std::collections::BTreeSet;

use zedd::petri::{MarkedPetriNet, Place, SafePetriNet};
use zedd::{Engine, Error};

const TWO_PLACE_NET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pnml xmlns="http://www.pnml.org/version-2009/grammar/pnml">
  <net id="relay">
    <place id="p0">
      <name><text>source</text></name>
      <initialMarking><text>1</text></initialMarking>
    </place>
    <place id="p1">
      <name><text>sink</text></name>
    </place>
    <transition id="t0">
      <name><text>move</text></name>
    </transition>
    <arc id="a0" source="p0" target="t0"/>
    <arc id="a1" source="t0" target="p1"/>
  </net>
</pnml>
"#;

#[test]
fn ut_pnml_relay_state_space() {
    let mut engine = Engine::new();
    let mut nets = SafePetriNet::from_pnml_str(&mut engine, TWO_PLACE_NET).unwrap();
    assert_eq!(nets.len(), 1);

    let net = &mut nets[0];
    assert_eq!(net.name(), "relay");
    assert!(net.initial_marking().contains([0]));

    let state_space = net.state_space(&mut engine).unwrap();
    assert_eq!(engine.cardinality(&state_space), 2);
    assert!(state_space.contains([0]));
    assert!(state_space.contains([1]));
}

#[test]
fn ut_pnml_rejects_unsafe_markings() {
    let xml = r#"<pnml><net id="n">
        <place id="p0"><initialMarking><text>2</text></initialMarking></place>
    </net></pnml>"#;

    let mut engine = Engine::new();
    let err = SafePetriNet::from_pnml_str(&mut engine, xml).unwrap_err();
    assert!(matches!(err, Error::NotOneSafe));
    assert_eq!(
        err.to_string(),
        "pnml file contains net that is not 1-safe"
    );
}

#[test]
fn ut_pnml_rejects_dangling_arcs() {
    let xml = r#"<pnml><net id="n">
        <place id="p0"/>
        <arc id="a0" source="p0" target="nowhere"/>
    </net></pnml>"#;

    let mut engine = Engine::new();
    let err = SafePetriNet::from_pnml_str(&mut engine, xml).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn ut_pnml_arc_weights_and_defaults() {
    let xml = r#"<pnml><net id="n">
        <place id="p0"><initialMarking><text>1</text></initialMarking></place>
        <place id="p1"/>
        <transition id="t0"/>
        <arc id="a0" source="p0" target="t0">
          <inscription><text>1</text></inscription>
        </arc>
        <arc id="a1" source="t0" target="p1"/>
    </net></pnml>"#;

    let mut engine = Engine::new();
    let mut nets = SafePetriNet::from_pnml_str(&mut engine, xml).unwrap();
    let state_space = nets[0].state_space(&mut engine).unwrap();
    assert_eq!(engine.cardinality(&state_space), 2);
}

#[test]
fn ut_pnml_multiple_nets() {
    let xml = r#"<pnml>
      <net id="a"><place id="p0"/></net>
      <net id="b"><place id="q0"><initialMarking><text>1</text></initialMarking></place></net>
    </pnml>"#;

    let mut engine = Engine::new();
    let nets = SafePetriNet::from_pnml_str(&mut engine, xml).unwrap();
    assert_eq!(nets.len(), 2);
    assert_eq!(nets[0].name(), "a");
    assert_eq!(nets[1].name(), "b");
    assert!(nets[0].initial_marking().contains([] as [usize; 0]));
    assert!(nets[1].initial_marking().contains([0]));
}

#[test]
fn ut_philosophers_three() {
    let mut engine = Engine::new();
    let mut net = MarkedPetriNet::philosophers(&mut engine, 3);

    let state_space = net.state_space(&mut engine).unwrap();

    // The initial marking plus one eating state per philosopher: with
    // three forks on the table no two philosophers can eat at once.
    assert_eq!(engine.cardinality(&state_space), 4);

    // Every reachable marking accounts for all nine places.
    for marking in state_space.iter() {
        assert_eq!(marking.len(), 9);
        let names: BTreeSet<usize> = marking.iter().map(|place| place.name).collect();
        assert_eq!(names.len(), 9);
    }

    assert!(state_space.contains((0..9).map(|name| Place {
        name,
        tokens: if name % 3 != 2 { 1 } else { 0 },
    })));
}

#[test]
fn ut_philosophers_two() {
    let mut engine = Engine::new();
    let mut net = MarkedPetriNet::philosophers(&mut engine, 2);

    let state_space = net.state_space(&mut engine).unwrap();
    assert_eq!(engine.cardinality(&state_space), 3);
}

#[test]
fn ut_philosophers_deterministic() {
    let run = || {
        let mut engine = Engine::new();
        let mut net = MarkedPetriNet::philosophers(&mut engine, 3);
        let state_space = net.state_space(&mut engine).unwrap();
        let members: BTreeSet<Vec<Place>> = state_space.iter().collect();
        (engine.cardinality(&state_space), members)
    };

    let (count_a, members_a) = run();
    let (count_b, members_b) = run();
    assert_eq!(count_a, count_b);
    assert_eq!(members_a, members_b);
}

#[test]
fn ut_philosophers_fixpoint_is_closed() {
    let mut engine = Engine::new();
    let mut net = MarkedPetriNet::philosophers(&mut engine, 3);

    let state_space = net.state_space(&mut engine).unwrap();
    let successors = net.step(&mut engine, &state_space).unwrap();
    let merged = engine.union(&state_space, &successors);
    assert!(merged == state_space);
}
