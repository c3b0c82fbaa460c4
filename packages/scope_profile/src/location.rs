//! Source location keys.

use std::fmt;

/// Identifies one instrumented call site.
///
/// The key is the serialized form `<file>:<line>:<function>` and is the sole aggregation key of
/// an [`AggregationStore`](crate::AggregationStore). Two keys built from different lines are
/// always distinct, even when they name the same function.
///
/// # Examples
///
/// ```
/// use scope_profile::LocationKey;
///
/// let key = LocationKey::new("src/main.rs", 10, "main");
/// assert_eq!(key.as_str(), "src/main.rs:10:main");
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LocationKey(String);

impl LocationKey {
    /// Builds the key for a call site.
    ///
    /// Components are taken verbatim. Empty components are allowed and simply yield an
    /// empty field in the serialized key.
    #[must_use]
    pub fn new(file: &str, line: u32, function: &str) -> Self {
        Self(format!("{file}:{line}:{function}"))
    }

    /// Returns the serialized `<file>:<line>:<function>` form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces the type name of a function item nested in the caller to the caller's own name.
///
/// `type_name_of_val` on a nested `fn f() {}` yields a path such as
/// `my_crate::module::Type::method::f`, with `{{closure}}` segments when called from inside
/// closures. We want just `method`.
#[doc(hidden)]
#[must_use]
pub fn function_name_from_type_name(type_name: &'static str) -> &'static str {
    let mut path = type_name.strip_suffix("::f").unwrap_or(type_name);

    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }

    path.rsplit("::").next().unwrap_or(path)
}

/// Expands to the unqualified name of the enclosing function as a `&'static str`.
///
/// # Examples
///
/// ```
/// fn load_config() -> &'static str {
///     scope_profile::function_name!()
/// }
///
/// assert_eq!(load_config(), "load_config");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        $crate::__private::function_name_from_type_name(::std::any::type_name_of_val(&f))
    }};
}
