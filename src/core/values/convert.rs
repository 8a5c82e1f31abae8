use super::typed_value::TypedValue;
use crate::core::runtime::ObjectRef;
use crate::core::types::ValueType;
use nalgebra::Vector3;
use std::any::TypeId;

/// Reads a declared value into the caller's type. Chosen once, at bind time.
pub type Decoder<T> = fn(&TypedValue) -> Option<T>;

/// Writes the caller's value as the declared type. Chosen once, at bind time.
pub type Encoder<T> = fn(T) -> TypedValue;

/// Types that can appear on the Rust side of a generic binding.
///
/// `decoder_for`/`encoder_for` return `None` when no conversion between the
/// declared member type and `Self` exists, which the binding factory reports as
/// a signature mismatch.
pub trait BindValue: Send + Sync + Clone + 'static {
    /// The declared type this Rust type corresponds to without conversion
    fn value_type() -> ValueType {
        ValueType::of::<Self>()
    }

    /// Whether `declared` matches `Self` with no conversion
    fn matches_exactly(declared: &ValueType) -> bool {
        *declared == Self::value_type()
    }

    /// Conversion from the declared type into `Self`
    fn decoder_for(declared: &ValueType) -> Option<Decoder<Self>> {
        if Self::matches_exactly(declared) {
            Some(decode_exact::<Self>)
        } else {
            None
        }
    }

    /// Conversion from `Self` into the declared type
    fn encoder_for(declared: &ValueType) -> Option<Encoder<Self>> {
        if Self::matches_exactly(declared) {
            Some(encode_exact::<Self>)
        } else {
            None
        }
    }
}

fn decode_exact<T: Clone + 'static>(value: &TypedValue) -> Option<T> {
    value.get::<T>().ok().cloned()
}

fn encode_exact<T: Send + Sync + Clone + 'static>(value: T) -> TypedValue {
    TypedValue::new(value)
}

impl BindValue for () {
    fn decoder_for(declared: &ValueType) -> Option<Decoder<Self>> {
        // whatever a void member hands back is discarded
        if declared.is_void() {
            Some(|_| Some(()))
        } else {
            None
        }
    }
}

macro_rules! numeric_decoder {
    ($id:expr, $target:ty; $($src:ty),*) => {{
        $(
            if $id == TypeId::of::<$src>() {
                let decode: Decoder<$target> = |value| value.get::<$src>().ok().map(|x| *x as $target);
                return Some(decode);
            }
        )*
        None
    }};
}

macro_rules! numeric_encoder {
    ($id:expr, $target:ty; $($dst:ty),*) => {{
        $(
            if $id == TypeId::of::<$dst>() {
                let encode: Encoder<$target> = |x| TypedValue::new(x as $dst);
                return Some(encode);
            }
        )*
        None
    }};
}

macro_rules! numeric_bind_value {
    ($($t:ty),*) => {
        $(
            impl BindValue for $t {
                fn decoder_for(declared: &ValueType) -> Option<Decoder<Self>> {
                    let id = declared.native_id()?;
                    numeric_decoder!(id, $t; f64, f32, i64, i32, u64, u32, usize)
                }

                fn encoder_for(declared: &ValueType) -> Option<Encoder<Self>> {
                    let id = declared.native_id()?;
                    numeric_encoder!(id, $t; f64, f32, i64, i32, u64, u32, usize)
                }
            }
        )*
    };
}

numeric_bind_value!(f64, f32, i64, i32, u64, u32, usize);

impl BindValue for bool {}
impl BindValue for String {}
impl BindValue for Vector3<f64> {}
impl BindValue for Vec<f64> {}
impl BindValue for Vec<ObjectRef> {}

impl BindValue for ObjectRef {
    fn matches_exactly(declared: &ValueType) -> bool {
        // reference cast: any declared object type is carried as an ObjectRef
        declared.is_object() || *declared == ValueType::of::<ObjectRef>()
    }
}

/// Nullable object reference; a null slot holds the unit value
impl BindValue for Option<ObjectRef> {
    fn matches_exactly(declared: &ValueType) -> bool {
        ObjectRef::matches_exactly(declared)
    }

    fn decoder_for(declared: &ValueType) -> Option<Decoder<Self>> {
        if Self::matches_exactly(declared) {
            Some(|value| match value.as_object() {
                Some(object) => Some(Some(object.clone())),
                None if value.is_type::<()>() => Some(None),
                None => None,
            })
        } else {
            None
        }
    }

    fn encoder_for(declared: &ValueType) -> Option<Encoder<Self>> {
        if Self::matches_exactly(declared) {
            Some(|value| value.map(TypedValue::object).unwrap_or_else(TypedValue::unit))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_decoder() {
        let decode = f64::decoder_for(&ValueType::of::<f64>()).unwrap();
        assert_eq!(decode(&TypedValue::new(2.5f64)), Some(2.5));
    }

    #[test]
    fn test_narrowing_decoder() {
        let decode = f32::decoder_for(&ValueType::of::<f64>()).unwrap();
        assert_eq!(decode(&TypedValue::new(0.25f64)), Some(0.25f32));

        let decode = i32::decoder_for(&ValueType::of::<f64>()).unwrap();
        assert_eq!(decode(&TypedValue::new(7.9f64)), Some(7));
    }

    #[test]
    fn test_widening_encoder_writes_declared_type() {
        let encode = f32::encoder_for(&ValueType::of::<f64>()).unwrap();
        let stored = encode(1.5f32);
        assert!(stored.is_type::<f64>());
        assert_eq!(stored.get::<f64>().unwrap(), &1.5);
    }

    #[test]
    fn test_no_conversion_between_unrelated_types() {
        assert!(String::decoder_for(&ValueType::of::<f64>()).is_none());
        assert!(f64::decoder_for(&ValueType::of::<String>()).is_none());
        assert!(bool::encoder_for(&ValueType::of::<i32>()).is_none());
        assert!(f64::decoder_for(&ValueType::object("Wing")).is_none());
    }

    #[test]
    fn test_void_decoder_discards_value() {
        let decode = <()>::decoder_for(&ValueType::Void).unwrap();
        assert_eq!(decode(&TypedValue::new(3i32)), Some(()));
        assert!(<()>::decoder_for(&ValueType::of::<f64>()).is_none());
    }

    #[test]
    fn test_object_reference_cast() {
        assert!(ObjectRef::matches_exactly(&ValueType::object("WingInteraction")));
        assert!(ObjectRef::decoder_for(&ValueType::object("WingInteraction")).is_some());
        assert!(!ObjectRef::matches_exactly(&ValueType::of::<f64>()));
    }

    #[test]
    fn test_nullable_object_decodes_unit_as_none() {
        let decode = <Option<ObjectRef>>::decoder_for(&ValueType::object("WingInteraction")).unwrap();
        assert_eq!(decode(&TypedValue::unit()), Some(None));
        assert_eq!(decode(&TypedValue::new(1.0f64)), None);

        let encode = <Option<ObjectRef>>::encoder_for(&ValueType::object("WingInteraction")).unwrap();
        assert!(encode(None).is_type::<()>());
    }
}
