use alloc::collections::BTreeMap;
use alloc::string::String;
use core::any::TypeId;

use vc_utils::hash::{HashMap, HashSet};

use crate::Value;
use crate::late_bound::{DynamicObject, Expando};
use crate::model::{Accessible, MemberModel, Members};

// -----------------------------------------------------------------------------
// Registration

/// How a registered type is accessed.
#[derive(Debug, Clone, Copy)]
pub enum Registration {
    /// Described by a [`MemberModel`]; served by a compiled accessor.
    Static(&'static MemberModel),
    /// A [`DynamicObject`]; served by the late-bound accessor.
    Dynamic { type_name: &'static str },
}

impl Registration {
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Static(model) => model.type_name(),
            Self::Dynamic { type_name } => type_name,
        }
    }

    #[inline]
    pub fn model(&self) -> Option<&'static MemberModel> {
        match self {
            Self::Static(model) => Some(model),
            Self::Dynamic { .. } => None,
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }
}

// -----------------------------------------------------------------------------
// MemberRegistry

/// The set of types an [`AccessorCache`](super::AccessorCache) can serve.
///
/// Types can be looked up by [`TypeId`], by full type path
/// (as reported by [`core::any::type_name`]) or by short name when unambiguous.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_member::cache::MemberRegistry;
/// use vc_member::derive::Members;
///
/// #[derive(Members)]
/// pub struct Foo { pub a: i32 }
///
/// let mut registry = MemberRegistry::new();
/// assert!(registry.register::<Foo>());
/// assert!(!registry.register::<Foo>());
///
/// assert!(registry.contains(TypeId::of::<Foo>()));
/// assert!(registry.get_with_type_name("Foo").is_some());
/// assert!(registry.get_with_type_name("Expando").unwrap().is_dynamic());
/// ```
#[derive(Clone)]
pub struct MemberRegistry {
    registrations: HashMap<TypeId, Registration>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_paths: HashSet<&'static str>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for MemberRegistry {
    /// See [`MemberRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// `a::b::Foo<c::Bar>` -> `Foo`
fn short_name(type_path: &str) -> &str {
    let base = match type_path.find('<') {
        Some(idx) => &type_path[..idx],
        None => type_path,
    };
    match base.rfind("::") {
        Some(idx) => &base[idx + 2..],
        None => base,
    }
}

/// Maps `key` to `type_id` unless another type already claimed it,
/// in which case the key becomes ambiguous and maps to nothing.
fn insert_unique(
    map: &mut HashMap<&'static str, TypeId>,
    ambiguous: &mut HashSet<&'static str>,
    key: &'static str,
    type_id: TypeId,
) {
    if ambiguous.contains(key) {
        return;
    }
    if map.remove(key).is_some() {
        ambiguous.insert(key);
    } else {
        map.insert(key, type_id);
    }
}

impl MemberRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            registrations: HashMap::default(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_paths: HashSet::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Creates a registry with the built-in dynamic objects:
    ///
    /// - [`Expando`]
    /// - `BTreeMap<String, Value>`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_dynamic::<Expando>();
        registry.register_dynamic::<BTreeMap<String, Value>>();
        registry
    }

    fn insert(&mut self, type_id: TypeId, registration: Registration) -> bool {
        if self.registrations.contains_key(&type_id) {
            return false;
        }

        let type_path = registration.type_name();
        insert_unique(
            &mut self.type_path_to_id,
            &mut self.ambiguous_paths,
            type_path,
            type_id,
        );
        insert_unique(
            &mut self.type_name_to_id,
            &mut self.ambiguous_names,
            short_name(type_path),
            type_id,
        );
        self.registrations.insert(type_id, registration);

        log::debug!("Registered `{type_path}` for member access");
        true
    }

    /// Registers a type with a derived or hand-written [`MemberModel`].
    ///
    /// Returns `false` if the type was already registered; the first registration wins.
    #[inline]
    pub fn register<T: Members>(&mut self) -> bool {
        self.register_model(T::member_model())
    }

    /// Registers the type described by `model`.
    #[inline]
    pub fn register_model(&mut self, model: &'static MemberModel) -> bool {
        self.insert(model.owner(), Registration::Static(model))
    }

    /// Registers a [`DynamicObject`] type.
    #[inline]
    pub fn register_dynamic<T: DynamicObject + Accessible>(&mut self) -> bool {
        self.insert(
            TypeId::of::<T>(),
            Registration::Dynamic {
                type_name: core::any::type_name::<T>(),
            },
        )
    }

    /// Registers every type deriving `Members` with `#[member(auto_register)]`.
    ///
    /// Returns `true` if automatic registration is available on the current platform.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled, it does
    /// nothing and returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core::any::TypeId;
    /// use vc_member::cache::MemberRegistry;
    /// use vc_member::derive::Members;
    ///
    /// #[derive(Members)]
    /// #[member(auto_register)]
    /// pub struct Foo { pub a: i32 }
    ///
    /// let mut registry = MemberRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register::{AutoRegisterMembers, inventory};

            for entry in inventory::iter::<AutoRegisterMembers> {
                self.register_model((entry.0)());
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.registrations.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Registration> {
        self.registrations.get(&type_id).copied()
    }

    /// Looks up a type by its full path, e.g. `alloc::string::String`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<(TypeId, Registration)> {
        let type_id = *self.type_path_to_id.get(type_path)?;
        Some((type_id, self.get(type_id)?))
    }

    /// Looks up a type by its full path or, failing that, its short name.
    ///
    /// Paths and short names shared by several registered types are ambiguous and never match.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<Registration> {
        let type_id = self
            .type_path_to_id
            .get(type_name)
            .or_else(|| self.type_name_to_id.get(type_name))?;
        self.get(*type_id)
    }

    /// Returns the [`TypeId`] registered under a full path or an unambiguous short name.
    pub fn type_id_of(&self, type_name: &str) -> Option<TypeId> {
        self.type_path_to_id
            .get(type_name)
            .or_else(|| self.type_name_to_id.get(type_name))
            .copied()
    }

    /// Whether more than one registered type has this full path or short name.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_paths.contains(type_name) || self.ambiguous_names.contains(type_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (TypeId, Registration)> + '_ {
        self.registrations.iter().map(|(id, reg)| (*id, *reg))
    }
}

impl core::fmt::Debug for MemberRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.registrations.values().map(Registration::type_name))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
