use crate::core::binding::{BindError, BindingDescriptor, BindingFactory};
use crate::core::runtime::{InvokeError, ObjectRef, RuntimeType};
use crate::core::types::ValueType;
use crate::core::values::TypedValue;
use std::sync::Arc;

fn gain(target: Option<&ObjectRef>) -> Result<f64, InvokeError> {
    let target = target.ok_or_else(|| InvokeError::MissingReceiver { member: "Gain".into() })?;
    target.read::<f64>("Gain")
}

/// A small external type touching every member kind
fn probe_type() -> Arc<RuntimeType> {
    let f64_type = ValueType::of::<f64>;
    RuntimeType::builder("Probe.Instruments", "Probe")
        .field("Gain", 2.0f64)
        .field("TrimValue", 0.0f64)
        .static_field("Counter", 0i32)
        .constructor(vec![f64_type(), f64_type()], |instance, args| {
            let sum = args[0].get::<f64>()? + args[1].get::<f64>()?;
            instance.write("Gain", sum)
        })
        .property("Doubled", f64_type(), |target, _| Ok(TypedValue::new(gain(target)? * 2.0)))
        .property_with_setter(
            "Trim",
            f64_type(),
            |target, _| {
                let target = target.ok_or_else(|| InvokeError::MissingReceiver { member: "Trim".into() })?;
                Ok(TypedValue::new(target.read::<f64>("TrimValue")?))
            },
            |target, args| {
                let target = target.ok_or_else(|| InvokeError::MissingReceiver { member: "Trim".into() })?;
                target.write("TrimValue", *args[0].get::<f64>()?)?;
                Ok(TypedValue::unit())
            },
        )
        .indexer(vec![ValueType::of::<i32>()], f64_type(), |target, args| {
            let index = *args[0].get::<i32>()?;
            Ok(TypedValue::new(gain(target)? * index as f64))
        })
        .method("Scale", vec![f64_type()], f64_type(), |target, args| {
            Ok(TypedValue::new(gain(target)? * args[0].get::<f64>()?))
        })
        .method("Scale", vec![ValueType::of::<f32>()], f64_type(), |target, args| {
            Ok(TypedValue::new(1000.0 + gain(target)? * *args[0].get::<f32>()? as f64))
        })
        .static_method("Sum6", vec![f64_type(); 6], f64_type(), |_, args| {
            let mut total = 0.0;
            for arg in args {
                total += arg.get::<f64>()?;
            }
            Ok(TypedValue::new(total))
        })
        .build()
}

fn probe(t: &Arc<RuntimeType>) -> ObjectRef {
    BindingFactory::new()
        .bind_constructor::<(f64, f64)>(t)
        .unwrap()
        .construct((1.0, 1.0))
        .unwrap()
}

#[test]
fn test_missing_member_is_not_found() {
    let t = probe_type();
    let factory = BindingFactory::new();

    let field = factory.bind_field::<f64>(&t, "Missing").err().unwrap();
    assert!(field.is_member_not_found());
    assert_eq!(field.member(), "Missing");
    assert!(factory.bind_method::<(), f64>(&t, "Nope").err().unwrap().is_member_not_found());
    assert!(factory.bind_property::<f64>(&t, "Nope").err().unwrap().is_member_not_found());
}

#[test]
fn test_constructor_requires_matching_arity() {
    let t = probe_type();
    let factory = BindingFactory::new();

    let err = factory.bind_constructor::<()>(&t).err().unwrap();
    assert!(matches!(err, BindError::MemberNotFound { .. }));

    let exact = factory.bind_constructor::<(f64, f64)>(&t).unwrap();
    let obj = exact.construct((1.0, 2.5)).unwrap();
    assert_eq!(obj.read::<f64>("Gain").unwrap(), 3.5);
    assert!(Arc::ptr_eq(obj.runtime_type(), &t));

    let converted = factory.bind_constructor::<(f32, i32)>(&t).unwrap();
    let obj = converted.construct((0.5, 2)).unwrap();
    assert_eq!(obj.read::<f64>("Gain").unwrap(), 2.5);
}

#[test]
fn test_numeric_field_conversion() {
    let t = probe_type();
    let factory = BindingFactory::new();
    let obj = probe(&t);

    let as_f32 = factory.bind_field::<f32>(&t, "Gain").unwrap();
    assert_eq!(as_f32.get(&obj).unwrap(), 2.0f32);
    as_f32.set(&obj, 1.5).unwrap();
    // the slot keeps its declared type
    assert_eq!(obj.read::<f64>("Gain").unwrap(), 1.5);

    let err = factory.bind_field::<String>(&t, "Gain").err().unwrap();
    assert!(err.is_signature_mismatch());
}

#[test]
fn test_field_rejects_foreign_receiver() {
    let t = probe_type();
    let other = RuntimeType::builder("Probe.Instruments", "Other").field("Gain", 1.0f64).build();
    let accessor = BindingFactory::new().bind_field::<f64>(&t, "Gain").unwrap();

    let result = accessor.get(&other.instantiate());
    assert!(matches!(result, Err(InvokeError::WrongReceiver { .. })));
}

#[test]
fn test_properties() {
    let t = probe_type();
    let factory = BindingFactory::new();
    let obj = probe(&t);

    let doubled = factory.bind_property::<f64>(&t, "Doubled").unwrap();
    assert!(!doubled.can_write());
    assert_eq!(doubled.get(Some(&obj)).unwrap(), 4.0);
    assert!(matches!(doubled.set(Some(&obj), 1.0), Err(InvokeError::ReadOnly { .. })));
    assert!(matches!(doubled.get(None), Err(InvokeError::MissingReceiver { .. })));

    let trim = factory.bind_property::<f64>(&t, "Trim").unwrap();
    assert!(trim.can_write());
    trim.set(Some(&obj), -0.25).unwrap();
    assert_eq!(trim.get(Some(&obj)).unwrap(), -0.25);

    let static_err = factory.bind_static_property::<f64>(&t, "Trim").err().unwrap();
    assert!(static_err.is_signature_mismatch());
}

#[test]
fn test_static_field() {
    let t = probe_type();
    let factory = BindingFactory::new();

    let counter = factory.bind_static_field::<i32>(&t, "Counter").unwrap();
    assert_eq!(counter.get().unwrap(), 0);
    counter.set(5).unwrap();
    assert_eq!(counter.get().unwrap(), 5);
    assert_eq!(t.read_static_field::<i32>("Counter").unwrap(), 5);

    // a static field is not an instance field
    let err = factory.bind_field::<i32>(&t, "Counter").err().unwrap();
    assert!(err.is_signature_mismatch());
}

#[test]
fn test_indexer() {
    let t = probe_type();
    let factory = BindingFactory::new();
    let obj = probe(&t);

    let indexer = factory.bind_indexer::<(i32,), f64>(&t).unwrap();
    assert_eq!(indexer.get(&obj, (3,)).unwrap(), 6.0);
    assert!(matches!(indexer.set(&obj, (3,), 1.0), Err(InvokeError::ReadOnly { .. })));

    let err = factory.bind_indexer::<(String,), f64>(&t).err().unwrap();
    assert!(err.is_signature_mismatch());
}

#[test]
fn test_overload_resolution() {
    let t = probe_type();
    let factory = BindingFactory::new();
    let obj = probe(&t);

    let exact_f64 = factory.bind_method::<(f64,), f64>(&t, "Scale").unwrap();
    assert_eq!(exact_f64.call(&obj, (3.0,)).unwrap(), 6.0);

    let exact_f32 = factory.bind_method::<(f32,), f64>(&t, "Scale").unwrap();
    assert_eq!(exact_f32.call(&obj, (3.0,)).unwrap(), 1006.0);

    // no exact overload: the first convertible one wins
    let converted = factory.bind_method::<(i32,), f64>(&t, "Scale").unwrap();
    assert_eq!(converted.call(&obj, (3,)).unwrap(), 6.0);

    let err = factory.bind_method::<(String,), f64>(&t, "Scale").err().unwrap();
    assert!(err.is_signature_mismatch());
    assert!(factory.bind_static_method::<(f64,), f64>(&t, "Scale").is_err());
}

#[test]
fn test_boxed_method_with_six_arguments() {
    let t = probe_type();
    let factory = BindingFactory::new();

    let bound = factory.bind(&BindingDescriptor::static_method(&t, "Sum6")).unwrap();
    let invoker = bound.invoker().unwrap();
    assert_eq!(invoker.params().len(), 6);

    let args: Vec<TypedValue> = (1..=6).map(|i| TypedValue::new(i as f64)).collect();
    let total = bound.call(None, &args).unwrap();
    assert_eq!(total.get::<f64>().unwrap(), &21.0);

    match bound.call(None, &args[..5]) {
        Err(InvokeError::ArgumentCount { expected, found, .. }) => {
            assert_eq!(expected, 6);
            assert_eq!(found, 5);
        }
        other => panic!("expected an argument count error, got {:?}", other.map(|v| v.type_name())),
    }

    let mut wrong = args.clone();
    wrong[2] = TypedValue::new(3i32);
    assert!(matches!(
        bound.call(None, &wrong),
        Err(InvokeError::ArgumentType { index: 2, .. })
    ));
}

#[test]
fn test_boxed_overloaded_method_needs_params() {
    let t = probe_type();
    let factory = BindingFactory::new();
    let obj = probe(&t);

    let ambiguous = factory.bind(&BindingDescriptor::method(&t, "Scale"));
    assert!(matches!(ambiguous, Err(BindError::SignatureMismatch { .. })));

    let bound = factory
        .bind(&BindingDescriptor::method(&t, "Scale").with_params(vec![ValueType::of::<f32>()]))
        .unwrap();
    let result = bound.call(Some(&obj), &[TypedValue::new(1.0f32)]).unwrap();
    assert_eq!(result.get::<f64>().unwrap(), &1002.0);
    assert!(bound.call(None, &[TypedValue::new(1.0f32)]).is_err());
}

#[test]
fn test_boxed_accessors() {
    let t = probe_type();
    let factory = BindingFactory::new();
    let obj = probe(&t);

    let field = factory.bind(&BindingDescriptor::field(&t, "Gain")).unwrap();
    field.assign(Some(&obj), &[TypedValue::new(4.0f64)]).unwrap();
    assert_eq!(field.call(Some(&obj), &[]).unwrap().get::<f64>().unwrap(), &4.0);

    let doubled = factory.bind(&BindingDescriptor::property(&t, "Doubled")).unwrap();
    assert!(doubled.setter().is_none());
    assert!(matches!(
        doubled.assign(Some(&obj), &[TypedValue::new(1.0f64)]),
        Err(InvokeError::ReadOnly { .. })
    ));

    let typed = factory.bind(&BindingDescriptor::field(&t, "Gain").returning(ValueType::of::<i32>()));
    assert!(matches!(typed, Err(BindError::SignatureMismatch { .. })));

    let ctor = factory
        .bind(&BindingDescriptor::constructor(&t, vec![ValueType::of::<f64>(); 2]))
        .unwrap();
    let created = ctor.call(None, &[TypedValue::new(2.0f64), TypedValue::new(0.5f64)]).unwrap();
    assert_eq!(created.as_object().unwrap().read::<f64>("Gain").unwrap(), 2.5);
    assert!(factory.bind(&BindingDescriptor::constructor(&t, vec![])).is_err());
}

#[test]
fn test_repeated_binding_is_deterministic() {
    let t = probe_type();
    let factory = BindingFactory::new();
    let obj = probe(&t);

    let first = factory.bind_method::<(i32,), f64>(&t, "Scale").unwrap();
    let second = factory.bind_method::<(i32,), f64>(&t, "Scale").unwrap();
    for x in 0..5 {
        assert_eq!(first.call(&obj, (x,)).unwrap(), second.call(&obj, (x,)).unwrap());
        assert_eq!(first.call(&obj, (x,)).unwrap(), first.call(&obj, (x,)).unwrap());
    }
}
