//! Property-based tests for member filters and argument matching.
//!
//! Each case defines a fresh class on a new runtime from generated method
//! names and signatures, then checks:
//! 1. An empty filter accepts every member
//! 2. Setting a name twice keeps only the second
//! 3. Changing a copy never changes what the original accepts
//! 4. Parameter signatures are order sensitive
//! 5. Well-typed arguments are always invokable, swapped ones never

use mirror::{Filter, Mirror, Named, Parameterized};
use mirror_runtime::{core_class_ids::*, ClassBuilder, MethodDef, Param, Runtime};
use mirror_sdk::{ClassId, Modifiers, Value};
use proptest::prelude::*;

// -- Strategies --

fn method_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alpha", "beta", "gamma", "delta", "epsilon"]).prop_map(String::from)
}

fn primitive_type_strategy() -> impl Strategy<Value = ClassId> {
    prop::sample::select(vec![INT, LONG, BOOLEAN, STRING])
}

fn signature_strategy() -> impl Strategy<Value = Vec<ClassId>> {
    prop::collection::vec(primitive_type_strategy(), 0..4)
}

fn methods_strategy() -> impl Strategy<Value = Vec<(String, Vec<ClassId>)>> {
    prop::collection::vec((method_name_strategy(), signature_strategy()), 1..8)
}

// -- Helpers --

fn define(runtime: &Runtime, methods: &[(String, Vec<ClassId>)]) -> ClassId {
    let mut builder = ClassBuilder::class("generated.Subject");
    for (name, params) in methods {
        let mut method = MethodDef::new(name, VOID, Modifiers::PUBLIC);
        for (index, &ty) in params.iter().enumerate() {
            method = method.param(Param::new(&format!("p{}", index), ty));
        }
        builder = builder.method(method);
    }
    runtime.define(builder).unwrap()
}

fn accepted(runtime: &Runtime, class: ClassId, filter: &Filter<mirror::Methods>) -> Vec<u32> {
    Mirror::new(runtime)
        .class(class)
        .unwrap()
        .methods()
        .filter(|m| filter.test(m))
        .map(|m| m.id().index)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_empty_filter_accepts_all(methods in methods_strategy()) {
        let runtime = Runtime::new();
        let class = define(&runtime, &methods);
        let filter = Filter::for_methods();
        prop_assert_eq!(accepted(&runtime, class, &filter).len(), methods.len());
    }

    #[test]
    fn prop_last_name_wins(
        methods in methods_strategy(),
        first in method_name_strategy(),
        second in method_name_strategy()
    ) {
        let runtime = Runtime::new();
        let class = define(&runtime, &methods);
        let mut filter = Filter::for_methods();
        filter.with_name(first).with_name(second.clone());

        let expected = methods.iter().filter(|(name, _)| *name == second).count();
        prop_assert_eq!(accepted(&runtime, class, &filter).len(), expected);

        let mirror = Mirror::new(&runtime);
        let subject = mirror.class(class).unwrap();
        for method in subject.methods().filter(|m| filter.test(m)) {
            prop_assert_eq!(method.name(), second.as_str());
        }
    }

    #[test]
    fn prop_copy_is_independent(
        methods in methods_strategy(),
        name in method_name_strategy(),
        other in method_name_strategy(),
        signature in signature_strategy()
    ) {
        let runtime = Runtime::new();
        let class = define(&runtime, &methods);
        let mut original = Filter::for_methods();
        original.with_name(name);
        let before = accepted(&runtime, class, &original);

        let mut copy = original.copy();
        copy.with_name(other).with_parameters(&signature).with_no_annotations();
        copy.clear_name();

        prop_assert_eq!(accepted(&runtime, class, &original), before);
    }

    #[test]
    fn prop_signature_order_matters(signature in prop::collection::vec(primitive_type_strategy(), 2..4)) {
        let mut reversed = signature.clone();
        reversed.reverse();
        prop_assume!(reversed != signature);

        let runtime = Runtime::new();
        let class = define(&runtime, &[("target".to_string(), reversed)]);
        let mut filter = Filter::for_methods();
        filter.with_parameters(&signature);
        prop_assert!(accepted(&runtime, class, &filter).is_empty());
    }

    #[test]
    fn prop_well_typed_arguments_are_invokable(text in ".{0,16}", number in any::<i32>()) {
        let runtime = Runtime::new();
        let class = define(&runtime, &[("pair".to_string(), vec![STRING, INT])]);
        let mirror = Mirror::new(&runtime);
        let pair = mirror.class(class).unwrap().methods().next().unwrap();

        prop_assert!(pair.invokable_with(&[Value::from(text.as_str()), Value::from(number)]));
        prop_assert!(!pair.invokable_with(&[Value::from(number), Value::from(text.as_str())]));
        prop_assert!(!pair.invokable_with(&[Value::from(text.as_str()), Value::from(i64::from(number))]));
    }
}
