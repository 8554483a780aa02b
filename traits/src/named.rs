use core::{
  marker::PhantomData,
  ops::{Deref, DerefMut},
};

/// The name a field is serialized under.
///
/// Implementors are zero-sized markers, usually declared with [`field_names!`](crate::field_names).
/// The name is a property of the type, so it is known before any instance exists.
pub trait FieldName {
  /// The key for this field within a JSON object.
  const NAME: &'static str;
  /// If deserializing an object which lacks this key should fail.
  ///
  /// When `false`, a missing key leaves the field at its `Default` value.
  const REQUIRED: bool = false;
}

/// Declare zero-sized field name markers.
///
/// ```
/// named_json::field_names! {
///   /// The identifier of a record.
///   pub Id = "id", required;
///   pub Label = "label";
/// }
/// use named_json::FieldName;
/// assert_eq!(Id::NAME, "id");
/// assert!(Id::REQUIRED);
/// assert!(!Label::REQUIRED);
/// ```
#[macro_export]
macro_rules! field_names {
  (@required) => { false };
  (@required required) => { true };
  ($($(#[$meta:meta])* $vis:vis $marker:ident = $key:literal $(, $flag:ident)?;)*) => {
    $(
      $(#[$meta])*
      #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
      $vis struct $marker;
      impl $crate::FieldName for $marker {
        const NAME: &'static str = $key;
        const REQUIRED: bool = $crate::field_names!(@required $($flag)?);
      }
    )*
  };
}

/// A value tagged with the name it's serialized under.
///
/// This is `repr(transparent)` over `T`: the name occupies no space within the instance. `Named`
/// dereferences to `T` and forwards comparisons, hashing, formatting, and arithmetic with a `T`
/// operand, so it may be used where the bare value was.
#[repr(transparent)]
pub struct Named<N: FieldName, T> {
  value: T,
  name: PhantomData<fn() -> N>,
}

impl<N: FieldName, T> Named<N, T> {
  /// Wrap a value.
  pub const fn new(value: T) -> Self {
    Self { value, name: PhantomData }
  }

  /// The name this field is serialized under.
  pub const fn name(&self) -> &'static str {
    N::NAME
  }

  /// Unwrap the value.
  pub fn into_inner(self) -> T {
    self.value
  }

  /// Replace the value, returning the prior one.
  pub fn replace(&mut self, value: T) -> T {
    core::mem::replace(&mut self.value, value)
  }
}

/// A field of a structure, as seen by the structure's field enumeration.
///
/// This is implemented by [`Named`], exposing its name at build time.
pub trait NamedField {
  /// The key for this field within a JSON object.
  const NAME: &'static str;
  /// If this field must be present when deserializing.
  const REQUIRED: bool;
}

impl<N: FieldName, T> NamedField for Named<N, T> {
  const NAME: &'static str = N::NAME;
  const REQUIRED: bool = N::REQUIRED;
}

impl<N: FieldName, T> From<T> for Named<N, T> {
  fn from(value: T) -> Self {
    Self::new(value)
  }
}

impl<N: FieldName, T> Deref for Named<N, T> {
  type Target = T;
  #[inline(always)]
  fn deref(&self) -> &T {
    &self.value
  }
}
impl<N: FieldName, T> DerefMut for Named<N, T> {
  #[inline(always)]
  fn deref_mut(&mut self) -> &mut T {
    &mut self.value
  }
}
impl<N: FieldName, T> AsRef<T> for Named<N, T> {
  fn as_ref(&self) -> &T {
    &self.value
  }
}
impl<N: FieldName, T> AsMut<T> for Named<N, T> {
  fn as_mut(&mut self) -> &mut T {
    &mut self.value
  }
}

// Derives would bound `N`, which is solely a marker, so these are written out
impl<N: FieldName, T: Default> Default for Named<N, T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}
impl<N: FieldName, T: Clone> Clone for Named<N, T> {
  fn clone(&self) -> Self {
    Self::new(self.value.clone())
  }
}
impl<N: FieldName, T: Copy> Copy for Named<N, T> {}
impl<N: FieldName, T: PartialEq> PartialEq for Named<N, T> {
  fn eq(&self, other: &Self) -> bool {
    self.value == other.value
  }
}
impl<N: FieldName, T: Eq> Eq for Named<N, T> {}
impl<N: FieldName, T: PartialOrd> PartialOrd for Named<N, T> {
  fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
    self.value.partial_cmp(&other.value)
  }
}
impl<N: FieldName, T: Ord> Ord for Named<N, T> {
  fn cmp(&self, other: &Self) -> core::cmp::Ordering {
    self.value.cmp(&other.value)
  }
}
impl<N: FieldName, T: core::hash::Hash> core::hash::Hash for Named<N, T> {
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.value.hash(state);
  }
}
impl<N: FieldName, T: core::fmt::Debug> core::fmt::Debug for Named<N, T> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    self.value.fmt(f)
  }
}
impl<N: FieldName, T: core::fmt::Display> core::fmt::Display for Named<N, T> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    self.value.fmt(f)
  }
}

macro_rules! forward_arithmetic {
  ($($op: ident, $method: ident, $assign_op: ident, $assign_method: ident;)*) => {
    $(
      impl<N: FieldName, T: core::ops::$op<Output = T>> core::ops::$op<T> for Named<N, T> {
        type Output = T;
        fn $method(self, rhs: T) -> T {
          core::ops::$op::$method(self.value, rhs)
        }
      }
      impl<N: FieldName, T: core::ops::$assign_op> core::ops::$assign_op<T> for Named<N, T> {
        fn $assign_method(&mut self, rhs: T) {
          core::ops::$assign_op::$assign_method(&mut self.value, rhs);
        }
      }
    )*
  };
}
forward_arithmetic! {
  Add, add, AddAssign, add_assign;
  Sub, sub, SubAssign, sub_assign;
  Mul, mul, MulAssign, mul_assign;
  Div, div, DivAssign, div_assign;
  Rem, rem, RemAssign, rem_assign;
}

#[cfg(test)]
mod tests {
  use super::*;

  crate::field_names! {
    Count = "count";
    Id = "id", required;
  }

  #[test]
  fn transparent() {
    assert_eq!(core::mem::size_of::<Named<Count, u8>>(), 1);
    assert_eq!(core::mem::size_of::<Named<Count, u64>>(), 8);
    assert_eq!(core::mem::align_of::<Named<Count, u64>>(), core::mem::align_of::<u64>());
    assert_eq!(core::mem::size_of::<Count>(), 0);
  }

  #[test]
  fn behaves_as_value() {
    let mut count = Named::<Count, i32>::from(5);
    count += 2;
    *count *= 3;
    assert_eq!(*count, 21);
    assert_eq!(count + 1, 22);
    assert_eq!(count.to_string(), "21");
    assert_eq!(format!("{count:?}"), "21");
    assert_eq!(count.name(), "count");
    assert_eq!(count.replace(1), 21);
    assert_eq!(count.into_inner(), 1);
  }

  #[test]
  fn names() {
    assert_eq!(<Named<Id, u8> as NamedField>::NAME, "id");
    assert!(<Named<Id, u8> as NamedField>::REQUIRED);
    assert!(!<Named<Count, u8> as NamedField>::REQUIRED);
  }
}
