use crate::core::types::ValueType;
use crate::core::values::{BindValue, Encoder, TypedValue};

/// Argument tuples accepted by generic bindings.
///
/// Implemented for tuples of up to four `BindValue`s. Wider shapes go through
/// the boxed calling convention.
pub trait ArgList: Send + Sync + 'static {
    /// Per-argument encoders chosen at bind time
    type Encoders: Send + Sync + Clone;

    /// Declared types matching these arguments without conversion
    fn types() -> Vec<ValueType>;

    /// Whether `declared` matches every argument without conversion
    fn matches_exactly(declared: &[ValueType]) -> bool;

    /// Encoders into `declared`, or `None` if any argument cannot be converted
    fn encoders(declared: &[ValueType]) -> Option<Self::Encoders>;

    /// Convert the arguments into declared values
    fn encode(self, encoders: &Self::Encoders) -> Vec<TypedValue>;
}

impl ArgList for () {
    type Encoders = ();

    fn types() -> Vec<ValueType> {
        Vec::new()
    }

    fn matches_exactly(declared: &[ValueType]) -> bool {
        declared.is_empty()
    }

    fn encoders(declared: &[ValueType]) -> Option<Self::Encoders> {
        if declared.is_empty() {
            Some(())
        } else {
            None
        }
    }

    fn encode(self, _encoders: &Self::Encoders) -> Vec<TypedValue> {
        Vec::new()
    }
}

macro_rules! impl_arg_list {
    ($len:expr; $($T:ident $idx:tt),+) => {
        impl<$($T: BindValue),+> ArgList for ($($T,)+) {
            type Encoders = ($(Encoder<$T>,)+);

            fn types() -> Vec<ValueType> {
                vec![$($T::value_type()),+]
            }

            fn matches_exactly(declared: &[ValueType]) -> bool {
                declared.len() == $len $(&& $T::matches_exactly(&declared[$idx]))+
            }

            fn encoders(declared: &[ValueType]) -> Option<Self::Encoders> {
                if declared.len() != $len {
                    return None;
                }
                Some(($($T::encoder_for(&declared[$idx])?,)+))
            }

            fn encode(self, encoders: &Self::Encoders) -> Vec<TypedValue> {
                vec![$((encoders.$idx)(self.$idx)),+]
            }
        }
    };
}

impl_arg_list!(1; A 0);
impl_arg_list!(2; A 0, B 1);
impl_arg_list!(3; A 0, B 1, C 2);
impl_arg_list!(4; A 0, B 1, C 2, D 3);
