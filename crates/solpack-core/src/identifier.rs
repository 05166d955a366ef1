//! Body identifiers backed by a global string interner.
//!
//! Every body in a catalog, scene or layout is keyed by an [`Id`]. Interning
//! keeps ids `Copy` and makes comparisons cheap while still allowing the
//! original name to be recovered for labels and hover text.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for body names.
///
/// # Thread Safety
///
/// Access goes through a `Mutex`; ids can be created from any thread.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier of a body.
///
/// # Examples
///
/// ```
/// use solpack_core::identifier::Id;
///
/// let earth = Id::new("Earth");
/// assert_eq!(earth, "Earth");
/// assert_eq!(earth, Id::new("Earth"));
/// assert_ne!(earth, Id::new("Moon"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a body name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Looks up the `Id` of a name that has already been interned, without
    /// interning it.
    pub fn lookup(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }

    /// Returns the interned name as an owned string.
    ///
    /// The interner lock is held only while the string is copied out.
    pub fn name(self) -> String {
        interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "Sun"`
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_interns_equal_names() {
        let a = Id::new("Jupiter");
        let b = Id::new("Jupiter");
        let c = Id::new("Saturn");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_round_trips_name() {
        let id = Id::new("136199-Eris");
        assert_eq!(id.to_string(), "136199-Eris");
        assert_eq!(id.name(), "136199-Eris");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        assert_eq!(Id::lookup("lookup-never-interned"), None);
        assert_eq!(Id::lookup("lookup-never-interned"), None);

        let id = Id::new("lookup-ganymede");
        assert_eq!(Id::lookup("lookup-ganymede"), Some(id));
    }

    #[test]
    fn test_str_comparison() {
        let id: Id = "Titan".into();
        assert!(id == "Titan");
        assert!(id != "Rhea");
    }
}
