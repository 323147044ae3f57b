use core::any::{Any, TypeId};
use core::fmt;

use crate::{AccessError, Value};

// -----------------------------------------------------------------------------
// MemberKind

/// Whether a member is a plain field or a method-backed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

/// Reads a member out of an instance.
///
/// The instance is expected to be of the owning type;
/// a mismatch is reported as [`AccessError::InvalidCast`].
pub type GetterFn = fn(&dyn Any) -> Result<Value, AccessError>;

/// Writes a member of an instance.
///
/// Fails with [`AccessError::InvalidCast`] when the instance or the value
/// does not have the expected type.
pub type SetterFn = fn(&mut dyn Any, Value) -> Result<(), AccessError>;

// -----------------------------------------------------------------------------
// MemberDescriptor

/// Describes one member of a type.
///
/// # Examples
///
/// ```
/// use core::any::Any;
/// use vc_member::model::{MemberDescriptor, MemberKind};
/// use vc_member::{AccessError, Value};
///
/// struct Point { x: i32 }
///
/// let x = MemberDescriptor::field::<i32>(
///     "x",
///     |obj: &dyn Any| match obj.downcast_ref::<Point>() {
///         Some(p) => Ok(Value::new(p.x)),
///         None => Err(AccessError::InvalidCast { expected: "Point", found: "?" }),
///     },
///     |_: &mut dyn Any, _: Value| Ok(()),
/// );
///
/// assert_eq!(x.name(), "x");
/// assert_eq!(x.kind(), MemberKind::Field);
/// assert!(x.readable() && x.writable());
/// assert!(x.value_type_is::<i32>());
/// ```
#[derive(Clone)]
pub struct MemberDescriptor {
    name: &'static str,
    kind: MemberKind,
    value_type: TypeId,
    value_type_name: &'static str,
    nullable: bool,
    getter: Option<GetterFn>,
    setter: Option<SetterFn>,
}

impl MemberDescriptor {
    /// A field with value type `V`, always readable and writable.
    pub fn field<V: Any>(name: &'static str, getter: GetterFn, setter: SetterFn) -> Self {
        Self::new::<V>(name, MemberKind::Field, Some(getter), Some(setter))
    }

    /// A property with value type `V`.
    ///
    /// A missing getter makes it write-only, a missing setter read-only.
    pub fn property<V: Any>(
        name: &'static str,
        getter: Option<GetterFn>,
        setter: Option<SetterFn>,
    ) -> Self {
        Self::new::<V>(name, MemberKind::Property, getter, setter)
    }

    fn new<V: Any>(
        name: &'static str,
        kind: MemberKind,
        getter: Option<GetterFn>,
        setter: Option<SetterFn>,
    ) -> Self {
        Self {
            name,
            kind,
            value_type: TypeId::of::<V>(),
            value_type_name: core::any::type_name::<V>(),
            nullable: false,
            getter,
            setter,
        }
    }

    /// Marks the member as nullable: it stores an `Option<V>`,
    /// reads `None` as null and accepts null on write.
    #[inline]
    pub fn with_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The declared value type. For nullable members this is the inner `V` of `Option<V>`.
    #[inline]
    pub const fn value_type(&self) -> TypeId {
        self.value_type
    }

    #[inline]
    pub const fn value_type_name(&self) -> &'static str {
        self.value_type_name
    }

    #[inline]
    pub fn value_type_is<V: Any>(&self) -> bool {
        self.value_type == TypeId::of::<V>()
    }

    #[inline]
    pub const fn nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub const fn readable(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub const fn writable(&self) -> bool {
        self.setter.is_some()
    }

    #[inline]
    pub const fn getter(&self) -> Option<GetterFn> {
        self.getter
    }

    #[inline]
    pub const fn setter(&self) -> Option<SetterFn> {
        self.setter
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type_name)
            .field("nullable", &self.nullable)
            .field("readable", &self.readable())
            .field("writable", &self.writable())
            .finish()
    }
}
