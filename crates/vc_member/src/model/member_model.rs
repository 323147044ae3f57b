use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use super::{Accessible, MemberDescriptor};

/// Builds a fresh default instance of a type.
pub type Constructor = fn() -> Box<dyn Accessible>;

fn construct<T: Accessible + Default>() -> Box<dyn Accessible> {
    Box::new(T::default())
}

// -----------------------------------------------------------------------------
// MemberModel

/// The ordered set of members exposed by one type.
///
/// Members are kept in declaration order, with properties first and fields second
/// when built by [`#[derive(Members)]`](crate::derive::Members).
/// The readable and writable sequences keep that order.
///
/// # Examples
///
/// ```
/// use vc_member::derive::Members;
/// use vc_member::model::Members as _;
///
/// #[derive(Members, Default)]
/// #[member(default)]
/// pub struct Config {
///     pub name: String,
///     pub retries: Option<u32>,
///     secret: u64,
/// }
///
/// let model = Config::member_model();
/// assert_eq!(model.type_name(), core::any::type_name::<Config>());
/// assert!(model.is_public());
/// assert!(model.has_parameterless_constructor());
///
/// let names: Vec<_> = model.readable().map(|m| m.name()).collect();
/// assert_eq!(names, ["name", "retries"]);
/// assert!(model.member("retries").unwrap().nullable());
/// assert!(model.member("secret").is_none());
/// # let _ = Config::default().secret;
/// ```
pub struct MemberModel {
    owner: TypeId,
    type_name: &'static str,
    public: bool,
    members: Box<[MemberDescriptor]>,
    readable: Box<[usize]>,
    writable: Box<[usize]>,
    constructor: Option<Constructor>,
}

impl MemberModel {
    /// Creates a public model for `T` without a constructor.
    pub fn new<T: Accessible>(members: impl Into<Box<[MemberDescriptor]>>) -> Self {
        let members: Box<[MemberDescriptor]> = members.into();

        let readable: Vec<usize> = (0..members.len())
            .filter(|&idx| members[idx].readable())
            .collect();
        let writable: Vec<usize> = (0..members.len())
            .filter(|&idx| members[idx].writable())
            .collect();

        Self {
            owner: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            public: true,
            members,
            readable: readable.into_boxed_slice(),
            writable: writable.into_boxed_slice(),
            constructor: None,
        }
    }

    /// Sets whether the type is visible outside its defining crate.
    ///
    /// Accessors are never compiled for non-public types.
    #[inline]
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Uses `T::default()` as the parameterless constructor.
    #[inline]
    pub fn with_default_constructor<T: Accessible + Default>(self) -> Self {
        self.with_constructor(construct::<T>)
    }

    #[inline]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// The [`TypeId`] of the type this model describes.
    #[inline]
    pub const fn owner(&self) -> TypeId {
        self.owner
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        self.public
    }

    #[inline]
    pub const fn has_parameterless_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    #[inline]
    pub const fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    /// Every member, readable or writable.
    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Members with a getter, in order.
    pub fn readable(&self) -> impl ExactSizeIterator<Item = &MemberDescriptor> + '_ {
        self.readable.iter().map(|&idx| &self.members[idx])
    }

    /// Members with a setter, in order.
    pub fn writable(&self) -> impl ExactSizeIterator<Item = &MemberDescriptor> + '_ {
        self.writable.iter().map(|&idx| &self.members[idx])
    }

    /// Looks up a member by exact, case-sensitive name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name() == name)
    }
}

impl fmt::Debug for MemberModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberModel")
            .field("type_name", &self.type_name)
            .field("public", &self.public)
            .field("members", &self.members)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}
