use std::collections::BTreeMap;

use mathtree::signature::{
    INDEPENDENT_VARIABLE, INDEPENDENT_VARIABLE_1, INDEPENDENT_VARIABLE_2,
};
use mathtree::{EquationSet, MathError};

#[test]
fn signature_round_trips_normalized() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("  f( x , y )  ", "x+y").unwrap();
    eqs.add_symbol("a", "1").unwrap();

    assert_eq!(eqs.signature("f").as_deref(), Some("f(x,y)"));
    assert_eq!(eqs.signature("a").as_deref(), Some("a"));
    assert_eq!(eqs.signature("missing"), None);
}

#[test]
fn arguments_and_definitions_are_stored() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("f(x,y)", "x+y").unwrap();
    eqs.add_symbol("a", "1").unwrap();

    assert_eq!(
        eqs.arguments("f").unwrap(),
        ["x".to_string(), "y".to_string()]
    );
    assert!(eqs.arguments("a").unwrap().is_empty());
    assert_eq!(eqs.definition("f"), Some("x+y"));
    assert_eq!(eqs.definition("missing"), None);
    assert!(eqs.is_defined("f"));
    assert!(!eqs.is_defined("g"));
}

#[test]
fn argument_shadowing_a_symbol_is_rejected() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("a", "1").unwrap();

    let err = eqs.add_symbol("f(a)", "a+1").unwrap_err();
    assert_eq!(
        err,
        MathError::ArgumentShadowsSymbol {
            symbol: "f".to_string(),
            argument: "a".to_string(),
        }
    );
    assert_eq!(eqs.len(), 1);
}

#[test]
fn multiple_shadowing_arguments_are_all_reported() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("a", "1").unwrap();
    eqs.add_symbol("b", "2").unwrap();

    let err = eqs.add_symbol("f(a,b)", "a+b").unwrap_err();
    match err {
        MathError::ArgumentsShadowSymbols { symbol, arguments } => {
            assert_eq!(symbol, "f");
            assert_eq!(arguments, vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn symbol_colliding_with_domain_variable_leaves_set_unchanged() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("f(x,y)", "x+y").unwrap();
    let before = eqs.clone();

    let err = eqs.add_symbol("x", "3").unwrap_err();
    assert_eq!(
        err,
        MathError::SymbolIsDomainVariable {
            symbol: "x".to_string(),
        }
    );
    assert_eq!(eqs, before);
}

#[test]
fn re_registration_validates_but_keeps_first_definition() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("f(x)", "x+1").unwrap();
    eqs.add_symbol("g", "2").unwrap();

    // Second registration is a no-op for the stored entry...
    eqs.add_symbol("f(t)", "t*t").unwrap();
    assert_eq!(eqs.arguments("f").unwrap(), ["x".to_string()]);
    assert_eq!(eqs.definition("f"), Some("x+1"));
    assert_eq!(eqs.len(), 2);

    // ...but validation still runs against the current contents.
    let err = eqs.add_symbol("f(g)", "g").unwrap_err();
    assert!(matches!(err, MathError::ArgumentShadowsSymbol { .. }));
}

#[test]
fn domain_variables_are_sorted_and_deduplicated() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("f(x,y)", "x+y").unwrap();
    eqs.add_symbol("g(y,z)", "y*z").unwrap();

    assert_eq!(
        eqs.all_domain_variables(),
        vec!["x".to_string(), "y".to_string(), "z".to_string()]
    );
}

#[test]
fn symbols_and_signatures_keep_registration_order() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("g(y)", "y").unwrap();
    eqs.add_symbol("a", "1").unwrap();
    eqs.add_symbol("f(x,y)", "x+y").unwrap();

    assert_eq!(eqs.all_symbols(), vec!["g", "a", "f"]);
    assert_eq!(
        eqs.all_signatures(),
        vec!["g(y)".to_string(), "a".to_string(), "f(x,y)".to_string()]
    );
}

#[test]
fn metadata_defaults_to_empty_never_absent() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("f(x)", "x+1").unwrap();

    assert!(eqs.metadata("f").is_empty());
    assert!(eqs.metadata("missing").is_empty());
    assert_eq!(eqs.metadata_value("f", "anything"), None);
}

#[test]
fn caller_metadata_is_stored_for_new_symbols() {
    let mut eqs = EquationSet::new();
    let mut meta = BTreeMap::new();
    meta.insert("units".to_string(), "meters".to_string());
    eqs.add_symbol_with_metadata("f(x)", "x+1", meta).unwrap();

    assert_eq!(eqs.metadata_value("f", "units"), Some("meters"));
}

#[test]
fn matrix_definition_derives_independent_variable_metadata() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol_with_metadata("f(x)", "[1 2; 3 4]", BTreeMap::new())
        .unwrap();
    eqs.add_symbol_with_metadata("g(u,v)", "[0 1]", BTreeMap::new())
        .unwrap();
    eqs.add_symbol_with_metadata("h(a,b,c)", "[9]", BTreeMap::new())
        .unwrap();

    assert_eq!(eqs.metadata_value("f", INDEPENDENT_VARIABLE), Some("x"));
    assert_eq!(eqs.metadata_value("g", INDEPENDENT_VARIABLE_1), Some("u"));
    assert_eq!(eqs.metadata_value("g", INDEPENDENT_VARIABLE_2), Some("v"));
    // Three or more arguments derive nothing.
    assert!(eqs.metadata("h").is_empty());
}

#[test]
fn metadata_entry_point_is_a_full_noop_when_already_registered() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("f(x)", "x+1").unwrap();

    let mut meta = BTreeMap::new();
    meta.insert("units".to_string(), "meters".to_string());
    eqs.add_symbol_with_metadata("f(x)", "[1 2]", meta).unwrap();

    assert_eq!(eqs.definition("f"), Some("x+1"));
    assert!(eqs.metadata("f").is_empty());
}

#[test]
fn plain_entry_point_supplements_matrix_metadata_on_re_registration() {
    let mut eqs = EquationSet::new();
    eqs.add_symbol("f(x)", "x+1").unwrap();
    assert!(eqs.metadata("f").is_empty());

    // Same name, matrix-valued definition: the stored definition stays, the
    // derived metadata lands anyway.
    eqs.add_symbol("f(x)", "[1 2]").unwrap();
    assert_eq!(eqs.definition("f"), Some("x+1"));
    assert_eq!(eqs.metadata_value("f", INDEPENDENT_VARIABLE), Some("x"));
}

#[test]
fn from_definitions_registers_in_order() {
    let eqs = EquationSet::from_definitions([("f(x)", "x*x"), ("a", "1")]).unwrap();
    assert_eq!(eqs.all_symbols(), vec!["f", "a"]);

    let err = EquationSet::from_definitions([("a", "1"), ("f(a)", "a")]).unwrap_err();
    assert!(matches!(err, MathError::ArgumentShadowsSymbol { .. }));
}

#[test]
fn malformed_signatures_are_rejected() {
    let mut eqs = EquationSet::new();
    assert!(matches!(
        eqs.add_symbol("(x)", "x"),
        Err(MathError::MalformedSignature { .. })
    ));
    assert!(matches!(
        eqs.add_symbol("f(x", "x"),
        Err(MathError::MalformedSignature { .. })
    ));
    assert!(eqs.is_empty());
}
