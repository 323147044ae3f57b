use alloc::boxed::Box;
use alloc::format;
use core::any::{Any, TypeId};
use core::fmt;

use vc_utils::hash::HashSet;

use crate::accessor::TypeAccessor;
use crate::model::{Accessible, GetterFn, MemberModel, SetterFn};
use crate::{AccessError, AccessOptions, Value};

use super::{NameDispatch, Named};

// -----------------------------------------------------------------------------
// Entries

struct ReadEntry {
    name: &'static str,
    get: GetterFn,
}

struct WriteEntry {
    name: &'static str,
    set: SetterFn,
    value_type: TypeId,
    value_type_name: &'static str,
}

impl Named for ReadEntry {
    #[inline]
    fn name(&self) -> &str {
        self.name
    }
}

impl Named for WriteEntry {
    #[inline]
    fn name(&self) -> &str {
        self.name
    }
}

// -----------------------------------------------------------------------------
// CompiledAccessor

/// A [`TypeAccessor`] compiled from a [`MemberModel`] for one set of [`AccessOptions`].
///
/// Built by [`compile`]; usually obtained through
/// [`AccessorCache::static_accessor`](crate::cache::AccessorCache::static_accessor).
pub struct CompiledAccessor {
    model: &'static MemberModel,
    getters: NameDispatch<ReadEntry>,
    setters: NameDispatch<WriteEntry>,
    readable_names: HashSet<&'static str>,
    writable_names: HashSet<&'static str>,
    validation: bool,
}

/// Compiles the getter and setter dispatch tables of `model`.
///
/// # Examples
///
/// ```
/// use vc_member::compile::compile;
/// use vc_member::derive::Members;
/// use vc_member::model::Members as _;
/// use vc_member::{AccessOptions, TypeAccessor, Value};
///
/// #[derive(Members)]
/// pub struct Point { pub x: i32, pub y: i32 }
///
/// let accessor = compile(Point::member_model(), AccessOptions::empty());
/// let mut p = Point { x: 1, y: 2 };
///
/// accessor.set_value(&mut p, "y", Value::new(5_i32)).unwrap();
/// let x = accessor.get_value(&p, "x").unwrap();
///
/// assert_eq!(x.downcast_ref::<i32>(), Some(&1));
/// assert_eq!(p.y, 5);
/// ```
pub fn compile(model: &'static MemberModel, options: AccessOptions) -> CompiledAccessor {
    let getters = NameDispatch::build(model.readable().filter_map(|m| {
        Some(ReadEntry {
            name: m.name(),
            get: m.getter()?,
        })
    }));
    let setters = NameDispatch::build(model.writable().filter_map(|m| {
        Some(WriteEntry {
            name: m.name(),
            set: m.setter()?,
            value_type: m.value_type(),
            value_type_name: m.value_type_name(),
        })
    }));

    CompiledAccessor {
        model,
        readable_names: model.readable().map(|m| m.name()).collect(),
        writable_names: model.writable().map(|m| m.name()).collect(),
        getters,
        setters,
        validation: options.validation_enabled(),
    }
}

impl CompiledAccessor {
    #[inline]
    pub const fn model(&self) -> &'static MemberModel {
        self.model
    }

    #[inline]
    pub fn options(&self) -> AccessOptions {
        if self.validation {
            AccessOptions::empty()
        } else {
            AccessOptions::DISABLE_ARGUMENT_VALIDATION
        }
    }

    fn check_instance(&self, obj: &dyn Any) -> Result<(), AccessError> {
        if self.validation && obj.type_id() != self.model.owner() {
            return Err(AccessError::invalid_argument(
                "obj",
                format!("expected an instance of `{}`", self.model.type_name()),
            ));
        }
        Ok(())
    }

    fn try_get(&self, obj: &dyn Accessible, name: &str) -> Result<Option<Value>, AccessError> {
        let obj: &dyn Any = obj;
        self.check_instance(obj)?;
        match self.getters.find(name) {
            Some(entry) => (entry.get)(obj).map(Some),
            None => Ok(None),
        }
    }

    fn try_set(
        &self,
        obj: &mut dyn Accessible,
        name: &str,
        value: Value,
    ) -> Result<bool, AccessError> {
        let obj: &mut dyn Any = obj;
        self.check_instance(obj)?;
        let Some(entry) = self.setters.find(name) else {
            return Ok(false);
        };
        if self.validation
            && let Some(found) = value.value_type_id()
            && found != entry.value_type
        {
            return Err(AccessError::TypeMismatch {
                member: entry.name.into(),
                expected: entry.value_type_name,
                found: value.type_name(),
            });
        }
        (entry.set)(obj, value)?;
        Ok(true)
    }
}

impl TypeAccessor for CompiledAccessor {
    fn get_value(&self, obj: &dyn Accessible, name: &str) -> Result<Value, AccessError> {
        self.try_get(obj, name)?.ok_or_else(|| AccessError::member_not_found(name))
    }

    fn try_get_value(
        &self,
        obj: &dyn Accessible,
        name: &str,
    ) -> Result<Option<Value>, AccessError> {
        self.try_get(obj, name)
    }

    fn set_value(
        &self,
        obj: &mut dyn Accessible,
        name: &str,
        value: Value,
    ) -> Result<(), AccessError> {
        if self.try_set(obj, name, value)? {
            Ok(())
        } else {
            Err(AccessError::member_not_found(name))
        }
    }

    fn try_set_value(
        &self,
        obj: &mut dyn Accessible,
        name: &str,
        value: Value,
    ) -> Result<bool, AccessError> {
        self.try_set(obj, name, value)
    }

    fn create_instance(&self) -> Result<Box<dyn Accessible>, AccessError> {
        match self.model.constructor() {
            Some(construct) => Ok(construct()),
            None => Err(AccessError::UnsupportedOperation(
                "type has no parameterless constructor",
            )),
        }
    }

    #[inline]
    fn readable_member_names(&self) -> Result<&HashSet<&'static str>, AccessError> {
        Ok(&self.readable_names)
    }

    #[inline]
    fn writable_member_names(&self) -> Result<&HashSet<&'static str>, AccessError> {
        Ok(&self.writable_names)
    }

    #[inline]
    fn validation_enabled(&self) -> bool {
        self.validation
    }
}

impl fmt::Debug for CompiledAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledAccessor")
            .field("type_name", &self.model.type_name())
            .field("getters", &self.getters)
            .field("setters", &self.setters)
            .field("validation", &self.validation)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::compile;
    use crate::derive::Members;
    use crate::model::{Accessible, Members as _};
    use crate::{AccessError, AccessOptions, TypeAccessor, Value};

    #[derive(Members, Default)]
    #[member(default)]
    #[member(property(name = "A", ty = i32, get = a, set = set_a))]
    #[member(property(name = "B", ty = String, get = b, set = set_b))]
    pub struct Sample {
        #[member(rename = "E")]
        pub e: i32,
        a: i32,
        b: String,
    }

    impl Sample {
        fn a(&self) -> i32 {
            self.a
        }
        fn set_a(&mut self, value: i32) {
            self.a = value;
        }
        fn b(&self) -> String {
            self.b.clone()
        }
        fn set_b(&mut self, value: String) {
            self.b = value;
        }
    }

    #[derive(Members)]
    #[member(property(name = "Total", ty = u64, get = total))]
    #[member(property(name = "Reset", ty = bool, set = reset))]
    pub struct Partial {
        count: u64,
    }

    impl Partial {
        fn total(&self) -> u64 {
            self.count
        }
        fn reset(&mut self, yes: bool) {
            if yes {
                self.count = 0;
            }
        }
    }

    #[derive(Members, Default)]
    pub struct Noted {
        pub note: Option<String>,
    }

    #[derive(Members)]
    pub struct Other {
        pub e: i32,
    }

    fn checked() -> super::CompiledAccessor {
        compile(Sample::member_model(), AccessOptions::empty())
    }

    fn unchecked() -> super::CompiledAccessor {
        compile(
            Sample::member_model(),
            AccessOptions::DISABLE_ARGUMENT_VALIDATION,
        )
    }

    #[test]
    fn properties_then_fields() {
        let names: Vec<_> = Sample::member_model()
            .readable()
            .map(|m| m.name())
            .collect();
        assert_eq!(names, ["A", "B", "E"]);
    }

    #[test]
    fn create_then_set_and_get() {
        let accessor = checked();
        let mut obj = accessor.create_instance().unwrap();

        accessor.set_value(&mut *obj, "A", Value::new(123_i32)).unwrap();
        accessor
            .set_value(&mut *obj, "B", Value::new(String::from("abc")))
            .unwrap();
        accessor.set_value(&mut *obj, "E", Value::new(7_i32)).unwrap();

        let a = accessor.get_value(&*obj, "A").unwrap();
        let b = accessor.get_value(&*obj, "B").unwrap();
        assert_eq!(a.downcast_ref::<i32>(), Some(&123));
        assert_eq!(b.downcast_ref::<String>().map(String::as_str), Some("abc"));

        let sample = obj.downcast_ref::<Sample>().unwrap();
        assert_eq!(sample.e, 7);
    }

    #[test]
    fn create_returns_distinct_instances() {
        let accessor = checked();
        let mut first = accessor.create_instance().unwrap();
        let second = accessor.create_instance().unwrap();

        accessor.set_value(&mut *first, "E", Value::new(1_i32)).unwrap();
        let e = accessor.get_value(&*second, "E").unwrap();
        assert_eq!(e.downcast_ref::<i32>(), Some(&0));
    }

    #[test]
    fn create_without_constructor() {
        let accessor = compile(Partial::member_model(), AccessOptions::empty());
        assert!(matches!(
            accessor.create_instance(),
            Err(AccessError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn unknown_member() {
        let accessor = checked();
        let mut obj = Sample::default();

        assert!(matches!(
            accessor.get_value(&obj, "Z"),
            Err(AccessError::MemberNotFound { .. })
        ));
        assert!(matches!(
            accessor.set_value(&mut obj, "Z", Value::new(1_i32)),
            Err(AccessError::MemberNotFound { .. })
        ));
        assert!(accessor.try_get_value(&obj, "Z").unwrap().is_none());
        assert!(!accessor.try_set_value(&mut obj, "Z", Value::new(1_i32)).unwrap());

        // Exact and case-sensitive.
        assert!(accessor.try_get_value(&obj, "a").unwrap().is_none());
        assert!(accessor.try_get_value(&obj, "e").unwrap().is_none());
    }

    #[test]
    fn read_only_and_write_only_properties() {
        let accessor = compile(Partial::member_model(), AccessOptions::empty());
        let mut obj = Partial { count: 5 };

        assert!(!accessor.try_set_value(&mut obj, "Total", Value::new(1_u64)).unwrap());
        assert!(accessor.try_get_value(&obj, "Reset").unwrap().is_none());

        accessor.set_value(&mut obj, "Reset", Value::new(true)).unwrap();
        let total = accessor.get_value(&obj, "Total").unwrap();
        assert_eq!(total.downcast_ref::<u64>(), Some(&0));

        assert!(accessor.readable_member_names().unwrap().contains("Total"));
        assert!(!accessor.writable_member_names().unwrap().contains("Total"));
        assert!(accessor.writable_member_names().unwrap().contains("Reset"));
    }

    #[test]
    fn nullable_members() {
        let accessor = compile(Noted::member_model(), AccessOptions::empty());
        let mut obj = Noted::default();

        assert!(accessor.get_value(&obj, "note").unwrap().is_null());
        accessor
            .set_value(&mut obj, "note", Value::new(String::from("n")))
            .unwrap();
        assert_eq!(obj.note.as_deref(), Some("n"));
        accessor.set_value(&mut obj, "note", Value::null()).unwrap();
        assert_eq!(obj.note, None);
    }

    #[test]
    fn null_into_non_nullable_member() {
        let mut obj = Sample::default();
        for accessor in [checked(), unchecked()] {
            assert!(matches!(
                accessor.set_value(&mut obj, "E", Value::null()),
                Err(AccessError::InvalidCast { found: "null", .. })
            ));
        }
    }

    #[test]
    fn validation_checks_instance_type() {
        let accessor = checked();
        let mut other = Other { e: 1 };

        assert!(matches!(
            accessor.get_value(&other, "E"),
            Err(AccessError::InvalidArgument { param: "obj", .. })
        ));
        assert!(matches!(
            accessor.set_value(&mut other, "E", Value::new(2_i32)),
            Err(AccessError::InvalidArgument { param: "obj", .. })
        ));
        assert!(matches!(
            accessor.try_get_value(&other, "E"),
            Err(AccessError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn validation_checks_value_type() {
        let accessor = checked();
        let mut obj = Sample::default();

        assert!(matches!(
            accessor.set_value(&mut obj, "A", Value::new(String::from("x"))),
            Err(AccessError::TypeMismatch { ref member, .. }) if member == "A"
        ));
        assert!(matches!(
            accessor.try_set_value(&mut obj, "A", Value::new(1_u8)),
            Err(AccessError::TypeMismatch { .. })
        ));
        assert_eq!(obj.a, 0);
    }

    #[test]
    fn disabled_validation_still_fails_on_bad_input() {
        let accessor = unchecked();
        assert!(!accessor.validation_enabled());

        let mut obj = Sample::default();
        assert!(matches!(
            accessor.set_value(&mut obj, "A", Value::new(String::from("x"))),
            Err(AccessError::InvalidCast { .. })
        ));

        let other = Other { e: 1 };
        assert!(matches!(
            accessor.get_value(&other, "E"),
            Err(AccessError::InvalidCast { .. })
        ));

        accessor.set_value(&mut obj, "A", Value::new(5_i32)).unwrap();
        assert_eq!(obj.a, 5);
    }

    #[test]
    fn name_sets() {
        let accessor = checked();
        let readable = accessor.readable_member_names().unwrap();
        let writable = accessor.writable_member_names().unwrap();

        let mut names: Vec<_> = readable.iter().copied().collect();
        names.sort_unstable();
        assert_eq!(names, ["A", "B", "E"]);
        assert_eq!(readable, writable);
        assert!(!readable.contains("e"));
    }

    #[test]
    fn bucketed_dispatch() {
        #[derive(Members, Default)]
        #[member(default)]
        pub struct Crowded {
            #[member(rename = "A")]
            pub a: u8,
            #[member(rename = "AA")]
            pub aa: u8,
            #[member(rename = "B")]
            pub b: u8,
            #[member(rename = "C")]
            pub c: u8,
        }

        let accessor = compile(Crowded::member_model(), AccessOptions::empty());
        let mut obj = Crowded::default();
        for (i, name) in ["A", "AA", "B", "C"].into_iter().enumerate() {
            accessor.set_value(&mut obj, name, Value::new(i as u8)).unwrap();
        }

        assert_eq!((obj.a, obj.aa, obj.b, obj.c), (0, 1, 2, 3));
        let aa = accessor.get_value(&obj, "AA").unwrap();
        assert_eq!(aa.downcast_ref::<u8>(), Some(&1));
        assert!(accessor.try_get_value(&obj, "AAA").unwrap().is_none());
        assert!((&obj as &dyn Accessible).static_members().is_some());
    }

    #[derive(Members, Default)]
    #[member(default)]
    #[member(property(name = "A", ty = i32, get = a, set = set_a))]
    #[member(property(name = "B", ty = String, get = b, set = set_b))]
    #[member(property(name = "C", ty = Option<u64>, get = c, set = set_c))]
    #[member(property(name = "D", ty = Option<f64>, get = d, set = set_d))]
    pub struct Mixed {
        #[member(rename = "AA")]
        pub aa: i32,
        #[member(rename = "E")]
        pub e: i32,
        #[member(rename = "EE")]
        pub ee: String,
        #[member(rename = "F")]
        pub f: u8,
        #[member(rename = "G")]
        pub g: Option<i32>,
        #[member(rename = "H")]
        pub h: Option<String>,
        a: i32,
        b: String,
        c: Option<u64>,
        d: Option<f64>,
    }

    impl Mixed {
        fn a(&self) -> i32 {
            self.a
        }
        fn set_a(&mut self, value: i32) {
            self.a = value;
        }
        fn b(&self) -> String {
            self.b.clone()
        }
        fn set_b(&mut self, value: String) {
            self.b = value;
        }
        fn c(&self) -> Option<u64> {
            self.c
        }
        fn set_c(&mut self, value: Option<u64>) {
            self.c = value;
        }
        fn d(&self) -> Option<f64> {
            self.d
        }
        fn set_d(&mut self, value: Option<f64>) {
            self.d = value;
        }
    }

    #[test]
    fn nullable_properties() {
        let model = Mixed::member_model();
        let c = model.member("C").unwrap();
        assert!(c.nullable());
        assert_eq!(c.value_type(), core::any::TypeId::of::<u64>());

        let accessor = compile(model, AccessOptions::empty());
        let mut obj = Mixed::default();

        assert!(accessor.get_value(&obj, "C").unwrap().is_null());
        accessor.set_value(&mut obj, "C", Value::new(9_u64)).unwrap();
        assert_eq!(obj.c, Some(9));
        let c = accessor.get_value(&obj, "C").unwrap();
        assert_eq!(c.downcast_ref::<u64>(), Some(&9));

        accessor.set_value(&mut obj, "C", Value::null()).unwrap();
        assert_eq!(obj.c, None);
        assert!(accessor.get_value(&obj, "C").unwrap().is_null());

        assert!(matches!(
            accessor.set_value(&mut obj, "C", Value::new(1_i32)),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn round_trip_every_member() {
        fn sample(name: &str) -> Value {
            match name {
                "A" | "AA" | "E" | "G" => Value::new(42_i32),
                "B" | "EE" | "H" => Value::new(String::from("value")),
                "C" => Value::new(7_u64),
                "D" => Value::new(1.5_f64),
                "F" => Value::new(3_u8),
                _ => unreachable!("unexpected member `{name}`"),
            }
        }

        fn eq<T: PartialEq + 'static>(a: &Value, b: &Value) -> bool {
            matches!((a.downcast_ref::<T>(), b.downcast_ref::<T>()), (Some(x), Some(y)) if x == y)
        }

        fn same(a: &Value, b: &Value) -> bool {
            if a.is_null() || b.is_null() {
                return a.is_null() && b.is_null();
            }
            eq::<i32>(a, b)
                || eq::<String>(a, b)
                || eq::<u64>(a, b)
                || eq::<f64>(a, b)
                || eq::<u8>(a, b)
        }

        let model = Mixed::member_model();
        let mut names: Vec<_> = model.readable().map(|m| m.name()).collect();
        names.sort_unstable();
        assert_eq!(names, ["A", "AA", "B", "C", "D", "E", "EE", "F", "G", "H"]);

        for options in [AccessOptions::empty(), AccessOptions::DISABLE_ARGUMENT_VALIDATION] {
            let accessor = compile(model, options);
            let mut obj = accessor.create_instance().unwrap();

            for member in model.readable().filter(|m| m.writable()) {
                let name = member.name();
                let mut values = alloc::vec![sample(name)];
                if member.nullable() {
                    values.push(Value::null());
                }
                for value in values {
                    accessor.set_value(&mut *obj, name, value.clone()).unwrap();
                    let read = accessor.get_value(&*obj, name).unwrap();
                    assert!(same(&value, &read), "`{name}` did not round-trip");
                }
            }
        }
    }

    #[test]
    fn raw_identifier_names() {
        #[derive(Members, Default)]
        pub struct Keywords {
            pub r#type: u8,
            pub r#match: Option<u8>,
        }

        let mut names: Vec<_> = Keywords::member_model()
            .readable()
            .map(|m| m.name())
            .collect();
        names.sort_unstable();
        assert_eq!(names, ["match", "type"]);

        let accessor = compile(Keywords::member_model(), AccessOptions::empty());
        let mut obj = Keywords::default();
        accessor.set_value(&mut obj, "type", Value::new(4_u8)).unwrap();
        assert_eq!(obj.r#type, 4);
        assert!(accessor.try_get_value(&obj, "r#type").unwrap().is_none());
    }
}
