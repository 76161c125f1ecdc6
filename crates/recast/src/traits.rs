//! Capability contract implemented by every record type the engine copies
//! between. Implementations are normally generated by `#[derive(Record)]`;
//! hand-written impls are only needed for unusual field layouts.

use crate::value::Value;
use std::any::TypeId;

///
/// FieldSpec
///
/// One entry per declared field, in declaration order.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Field name as declared on the record.
    pub name: &'static str,

    /// Declared-type tag. Exact tag equality is the eligibility rule:
    /// `i32` never matches `i64`, `String` never matches `Option<String>`.
    pub ty: fn() -> TypeId,

    /// False for read-only fields; the engine skips them entirely.
    pub settable: bool,
}

impl FieldSpec {
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        (self.ty)()
    }
}

/// Type-tag constructor stored in [`FieldSpec::ty`] by the derive.
#[must_use]
pub fn type_tag<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}

///
/// Record
///
/// Ordered field metadata plus name-addressed access to field values.
/// Target record types additionally require `Default`; the engine expresses
/// that as a trait bound so a non-default-constructible target is a compile
/// error rather than a runtime failure.
///

pub trait Record {
    const FIELDS: &'static [FieldSpec];

    /// Current value of the named field, or `None` for an unknown name.
    fn get_value(&self, field: &str) -> Option<Value>;

    /// Write the named field from `value`. Returns whether a write occurred;
    /// unknown names, read-only fields, and unconvertible values all refuse
    /// the write and return false.
    fn set_value(&mut self, field: &str, value: &Value) -> bool;
}

///
/// FieldValue
///
/// Conversion boundary between a concrete field type and [`Value`].
///
/// Implementations are expected to round-trip: `from_value(&to_value(x))`
/// should yield `Some`. `&'static str` is the one to-only exception; a
/// record field of that type can be read but never written.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for &'static str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }

    fn from_value(_value: &Value) -> Option<Self> {
        None
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for i128 {
    fn to_value(&self) -> Value {
        Value::Int128(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int128(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for u128 {
    fn to_value(&self) -> Value {
        Value::Uint128(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Uint128(v) => Some(*v),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        let mut out = Self::with_capacity(items.len());
        for item in items {
            out.push(T::from_value(item)?);
        }

        Some(out)
    }
}

// impl_field_value
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
);
