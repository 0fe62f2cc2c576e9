
use std::collections::BTreeSet;

use flow_host::{Callable, DatasetBinding, Node};
use flow_inspect::node::{NodeDoc, NodeSnapshot};
use flow_inspect::{BindingError, InspectError, ParamToInputs};
use serde_json::json;
use test_support::fixtures;

fn p2i(pairs: &[(&str, &[&str])]) -> ParamToInputs {
    pairs.iter()
         .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
         .collect()
}

#[test]
fn inspected_node() {
    let fx = fixtures();
    let orig = Node::new(Callable::Function(fx.identity.clone()), Some(vec!["a"].into()), Some(vec!["b"].into()));
    let snapshot = NodeSnapshot::capture(&orig).unwrap();

    assert_eq!(snapshot.name(), None);
    assert!(snapshot.tags().is_empty());
    assert!(snapshot.confirms().is_empty());
    assert_eq!(snapshot.namespace(), None);
    assert_eq!(snapshot.inputs(), Some(&DatasetBinding::from(vec!["a"])));
    assert_eq!(snapshot.outputs(), Some(&DatasetBinding::from(vec!["b"])));
    assert_eq!(snapshot.param_to_inputs(), &p2i(&[("x", &["a"])]));

    assert_eq!(snapshot.to_node(), orig);

    let doc = snapshot.to_value().unwrap();
    assert_eq!(doc,
               json!({
                   "name": null,
                   "tags": [],
                   "confirms": [],
                   "namespace": null,
                   "inputs": ["a"],
                   "outputs": ["b"],
                   "function": serde_json::to_value(snapshot.signature().to_data()).unwrap(),
                   "param_to_input": {"x": ["a"]},
               }));

    let back = NodeSnapshot::from_value(doc.clone(), &fx.registry).unwrap();
    assert_eq!(back.to_value().unwrap(), doc);
    assert_eq!(back, snapshot);
}

#[test]
fn mapping_inputs_bind_by_name() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.pair.clone()), Some([("b", "ds2"), ("a", "ds1")].into()), Some("out".into()));
    let snapshot = NodeSnapshot::capture(&node).unwrap();
    assert_eq!(snapshot.param_to_inputs(), &p2i(&[("a", &["ds1"]), ("b", &["ds2"])]));
    // el binding declarado se conserva tal cual, con su orden
    let doc = snapshot.to_value().unwrap();
    assert_eq!(doc["inputs"], json!({"b": "ds2", "a": "ds1"}));
    assert_eq!(doc["outputs"], json!("out"));
}

#[test]
fn var_positional_groups_the_surplus() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.gather.clone()), Some(vec!["x", "y", "z"].into()), None);
    let snapshot = NodeSnapshot::capture(&node).unwrap();
    assert_eq!(snapshot.param_to_inputs(), &p2i(&[("a", &["x"]), ("args", &["y", "z"])]));
    assert_eq!(snapshot.to_value().unwrap()["outputs"], json!(null));
}

#[test]
fn every_kind_binds_from_a_mapping() {
    let fx = fixtures();
    // pos_only no se puede pasar por nombre y no tiene default
    let inputs = DatasetBinding::from([("a", "da"), ("b", "db"), ("kw_only", "dk")]);
    let node = Node::new(Callable::Function(fx.all_kinds.clone()), Some(inputs), None);
    let err = NodeSnapshot::capture(&node).unwrap_err();
    assert!(matches!(err, InspectError::Binding(BindingError::MissingArgument(ref p)) if p == "pos_only"));
}

#[test]
fn every_kind_binds_positionally_up_to_keyword_only() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.all_kinds.clone()), Some(vec!["p", "a", "b", "r1", "r2"].into()), None);
    let err = NodeSnapshot::capture(&node).unwrap_err();
    // kw_only queda sin ligar
    assert!(matches!(err, InspectError::Binding(BindingError::MissingArgument(ref p)) if p == "kw_only"));
}

#[test]
fn binding_errors_propagate() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.identity.clone()), Some(vec!["a", "b"].into()), None);
    assert!(matches!(NodeSnapshot::capture(&node),
                     Err(InspectError::Binding(BindingError::TooManyPositional { given: 2, accepted: 1 }))));

    let node = Node::new(Callable::Function(fx.pair.clone()), Some([("a", "d1"), ("c", "d3")].into()), None);
    assert!(matches!(NodeSnapshot::capture(&node), Err(InspectError::Binding(BindingError::MissingArgument(_)))));
}

#[test]
fn defaulted_parameters_stay_out_of_the_map() {
    let fx = fixtures();
    let node = Node::new(fx.scale.clone(), Some("raw".into()), Some("scaled".into()));
    let snapshot = NodeSnapshot::capture(&node).unwrap();
    assert_eq!(snapshot.param_to_inputs(), &p2i(&[("x", &["raw"])]));
    assert!(snapshot.to_node().func.same_as(&fx.scale));
}

#[test]
fn tags_are_serialized_sorted_and_compared_as_a_set() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.identity.clone()), Some("a".into()), None).with_tags(["zeta", "alpha", "mid"]);
    let snapshot = NodeSnapshot::capture(&node).unwrap();
    let mut doc = snapshot.to_value().unwrap();
    assert_eq!(doc["tags"], json!(["alpha", "mid", "zeta"]));

    doc["tags"] = json!(["mid", "zeta", "alpha", "mid"]);
    let back = NodeSnapshot::from_value(doc, &fx.registry).unwrap();
    assert_eq!(back, snapshot);
    assert_eq!(back.tags(), &BTreeSet::from(["alpha".to_string(), "mid".to_string(), "zeta".to_string()]));
}

#[test]
fn identity_fields_survive_materialization() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.identity.clone()), Some("a".into()), Some("b".into())).with_name("copy")
                                                                                                   .with_tags(["t"])
                                                                                                   .with_confirms(["c1", "c2"])
                                                                                                   .with_namespace("prep");
    let snapshot = NodeSnapshot::capture(&node).unwrap();
    let doc = snapshot.to_data();
    assert_eq!(doc.name.as_deref(), Some("copy"));
    assert_eq!(doc.confirms, vec!["c1".to_string(), "c2".to_string()]);
    assert_eq!(doc.namespace.as_deref(), Some("prep"));

    let rebuilt = NodeSnapshot::from_data(&doc, &fx.registry).unwrap().to_node();
    assert_eq!(rebuilt, node);
}

#[test]
fn capture_copies_the_bindings() {
    let fx = fixtures();
    let mut node = Node::new(Callable::Function(fx.identity.clone()), Some(vec!["a"].into()), None);
    let snapshot = NodeSnapshot::capture(&node).unwrap();
    node.inputs = Some(vec!["changed"].into());
    assert_eq!(snapshot.inputs(), Some(&DatasetBinding::from(vec!["a"])));
    assert_eq!(snapshot.param_to_inputs(), &p2i(&[("x", &["a"])]));
}

#[test]
fn tampered_param_to_input_is_rejected() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.identity.clone()), Some(vec!["a"].into()), None);
    let mut doc = NodeSnapshot::capture(&node).unwrap().to_value().unwrap();
    doc["param_to_input"] = json!({"x": ["other"]});
    assert!(matches!(NodeSnapshot::from_value(doc, &fx.registry), Err(InspectError::MalformedDocument(_))));
}

#[test]
fn missing_keys_are_malformed() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.identity.clone()), Some(vec!["a"].into()), None);
    let full = NodeSnapshot::capture(&node).unwrap().to_value().unwrap();
    for key in ["name", "namespace", "inputs", "tags", "function", "param_to_input"] {
        let mut doc = full.clone();
        doc.as_object_mut().unwrap().remove(key);
        assert!(matches!(NodeSnapshot::from_value(doc, &fx.registry), Err(InspectError::MalformedDocument(_))),
                "missing '{key}' should be rejected");
    }
    let mut doc = full;
    doc["inputs"] = json!(42);
    assert!(serde_json::from_value::<NodeDoc>(doc).is_err());
}

#[test]
fn duplicate_parameter_in_node_document_is_malformed() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.pair.clone()), Some(vec!["d1", "d2"].into()), None);
    let mut doc = NodeSnapshot::capture(&node).unwrap().to_value().unwrap();
    doc["function"]["parameters"][1]["name"] = json!("a");
    doc["param_to_input"] = json!({"a": ["d2"]});
    assert!(matches!(NodeSnapshot::from_value(doc, &fx.registry), Err(InspectError::MalformedDocument(_))));
}

#[test]
fn misordered_kinds_in_node_document_are_malformed_not_binding_errors() {
    let fx = fixtures();
    let node = Node::new(Callable::Function(fx.pair.clone()), Some(vec!["d1", "d2"].into()), None);
    let mut doc = NodeSnapshot::capture(&node).unwrap().to_value().unwrap();
    doc["function"]["parameters"][0]["kind"] = json!("VAR_KEYWORD");
    doc["function"]["parameters"][1]["kind"] = json!("POSITIONAL_ONLY");
    assert!(matches!(NodeSnapshot::from_value(doc, &fx.registry), Err(InspectError::MalformedDocument(_))));
}

/// El documento guarda sólo el fqn del método ligado: al decodificar se
/// obtiene el método de la clase (con `self`) y el receptor se pierde.
#[test]
fn bound_method_decodes_to_the_class_level_method() {
    let fx = fixtures();
    let receiver = flow_host::Instance::new(fx.dummy_class.clone(), "dummy");
    let orig = Node::new(Callable::bind(fx.instance_method.clone(), receiver), Some(vec!["d1", "d2"].into()), None);
    let snapshot = NodeSnapshot::capture(&orig).unwrap();
    assert_eq!(snapshot.param_to_inputs(), &p2i(&[("a", &["d1"]), ("b", &["d2"])]));

    let doc = snapshot.to_value().unwrap();
    assert_eq!(doc["function"]["func"], json!("test_node_func.DummyClass.instance_method"));

    let back = NodeSnapshot::from_value(doc.clone(), &fx.registry).unwrap();
    assert_eq!(back.to_value().unwrap(), doc);
    assert!(back.signature().target.same_as(&Callable::Function(fx.instance_method.clone())));

    let rebuilt = back.to_node();
    assert_ne!(rebuilt, orig);
    // sin receptor, `self` consume el primer dataset y `b` queda sin ligar
    assert!(matches!(NodeSnapshot::capture(&rebuilt),
                     Err(InspectError::Binding(BindingError::MissingArgument(ref name))) if name == "b"));
}
