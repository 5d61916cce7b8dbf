//! Shared key/value scratch space for one tree instance.
//!
//! Values are tagged ([`Value`]); typed access goes through
//! [`BlackboardKey<T>`], which fixes the value type at compile time so a
//! key can only ever be written with the type it is read with.

use std::collections::HashMap;
use std::marker::PhantomData;

use glam::DVec2;

use crate::error::BlackboardError;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Vec2,
    Handle,
    Text,
}

/// A tagged blackboard value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Vec2(DVec2),
    /// Opaque reference to a host object (entity bits, actor id, ...).
    Handle(u64),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Handle(_) => ValueKind::Handle,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

/// Rust types that can live on a blackboard.
pub trait BlackboardValue: Sized {
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! blackboard_value {
    ($ty:ty, $variant:ident) => {
        impl BlackboardValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

blackboard_value!(bool, Bool);
blackboard_value!(i64, Int);
blackboard_value!(f64, Float);
blackboard_value!(DVec2, Vec2);
blackboard_value!(u64, Handle);
blackboard_value!(String, Text);

/// Typed key. Declare keys as constants next to the nodes that use them:
///
/// ```rust,ignore
/// const TARGET: BlackboardKey<u64> = BlackboardKey::new("target");
/// ```
pub struct BlackboardKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BlackboardKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for BlackboardKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BlackboardKey<T> {}

impl<T> std::fmt::Debug for BlackboardKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BlackboardKey").field(&self.name).finish()
    }
}

/// Key/value store shared by every node of one tree.
#[derive(Debug, Clone, Default)]
pub struct Blackboard {
    values: HashMap<&'static str, Value>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: BlackboardValue>(&mut self, key: BlackboardKey<T>, value: T) {
        self.values.insert(key.name, value.into_value());
    }

    /// Strict read: missing keys and type mismatches are errors.
    pub fn get<T: BlackboardValue>(&self, key: BlackboardKey<T>) -> Result<T, BlackboardError> {
        let value = self
            .values
            .get(key.name)
            .ok_or(BlackboardError::Missing(key.name))?;
        T::from_value(value).ok_or(BlackboardError::TypeMismatch {
            key: key.name,
            expected: T::KIND,
            found: value.kind(),
        })
    }

    /// Missing keys read as `None`; a type mismatch is still an error.
    pub fn try_get<T: BlackboardValue>(
        &self,
        key: BlackboardKey<T>,
    ) -> Result<Option<T>, BlackboardError> {
        match self.get(key) {
            Ok(v) => Ok(Some(v)),
            Err(BlackboardError::Missing(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Permissive read: anything unreadable yields `T::default()`.
    pub fn get_or_default<T: BlackboardValue + Default>(&self, key: BlackboardKey<T>) -> T {
        self.get(key).unwrap_or_default()
    }

    pub fn contains<T>(&self, key: BlackboardKey<T>) -> bool {
        self.values.contains_key(key.name)
    }

    pub fn remove<T>(&mut self, key: BlackboardKey<T>) -> Option<Value> {
        self.values.remove(key.name)
    }

    /// Untyped write, for hosts that bridge external data.
    pub fn set_raw(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    /// Untyped read.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: BlackboardKey<f64> = BlackboardKey::new("speed");
    const SPEED_AS_INT: BlackboardKey<i64> = BlackboardKey::new("speed");
    const TARGET: BlackboardKey<u64> = BlackboardKey::new("target");
    const HEADING: BlackboardKey<DVec2> = BlackboardKey::new("heading");

    #[test]
    fn test_roundtrip_typed() {
        let mut bb = Blackboard::new();
        bb.set(SPEED, 3.5);
        bb.set(HEADING, DVec2::Y);
        assert_eq!(bb.get(SPEED), Ok(3.5));
        assert_eq!(bb.get(HEADING), Ok(DVec2::Y));
        assert_eq!(bb.len(), 2);
    }

    #[test]
    fn test_missing_key() {
        let bb = Blackboard::new();
        assert_eq!(bb.get(TARGET), Err(BlackboardError::Missing("target")));
        assert_eq!(bb.try_get(TARGET), Ok(None));
        assert_eq!(bb.get_or_default(TARGET), 0);
    }

    #[test]
    fn test_type_mismatch_is_explicit() {
        let mut bb = Blackboard::new();
        bb.set(SPEED, 2.0);
        assert_eq!(
            bb.get(SPEED_AS_INT),
            Err(BlackboardError::TypeMismatch {
                key: "speed",
                expected: ValueKind::Int,
                found: ValueKind::Float,
            })
        );
        assert!(bb.try_get(SPEED_AS_INT).is_err());
        assert_eq!(bb.get_or_default(SPEED_AS_INT), 0);
    }

    #[test]
    fn test_overwrite_changes_kind() {
        let mut bb = Blackboard::new();
        bb.set(SPEED, 2.0);
        bb.set(SPEED_AS_INT, 7);
        assert_eq!(bb.get(SPEED_AS_INT), Ok(7));
        assert_eq!(bb.raw("speed").map(Value::kind), Some(ValueKind::Int));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut bb = Blackboard::new();
        bb.set(TARGET, 9);
        assert_eq!(bb.remove(TARGET), Some(Value::Handle(9)));
        assert!(!bb.contains(TARGET));
        bb.set_raw("note", Value::Text("hi".into()));
        bb.clear();
        assert!(bb.is_empty());
    }
}
