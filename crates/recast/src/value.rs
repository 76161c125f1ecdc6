use crate::{
    traits::FieldValue,
    types::{Float32, Float64},
};
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Runtime representation of one field at the copy boundary.
///
/// Null → the field's value is Option::None.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Float32(Float32),
    Float64(Float64),
    Int(i64),
    Int128(i128),
    /// Ordered list of values; order is preserved.
    List(Vec<Self>),
    Null,
    Text(String),
    Uint(u64),
    Uint128(u128),
}

impl Value {
    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns true if the value is the absent/null state.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Self {
        self.clone()
    }

    fn from_value(value: &Self) -> Option<Self> {
        Some(value.clone())
    }
}

// impl_from_for
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    Float32 => Float32,
    Float64 => Float64,
    bool    => Bool,
    i8      => Int,
    i16     => Int,
    i32     => Int,
    i64     => Int,
    i128    => Int128,
    &str    => Text,
    String  => Text,
    u8      => Uint,
    u16     => Uint,
    u32     => Uint,
    u64     => Uint,
    u128    => Uint128,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}
