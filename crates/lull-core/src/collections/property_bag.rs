// ── Property bag ──
//
// Named values over a backing map that may be missing. A `None` write
// either deletes the name or stores an explicit null, per `keep_nulls`.

use std::collections::HashMap;
use std::collections::hash_map;

use crate::error::CoreError;

/// Dynamic string-keyed properties with a null-retention policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBag<T> {
    values: Option<HashMap<String, Option<T>>>,
    keep_nulls: bool,
}

impl<T> PropertyBag<T> {
    /// Empty bag with its own backing map.
    pub fn new(keep_nulls: bool) -> Self {
        Self::from_map(HashMap::new(), keep_nulls)
    }

    /// Bag without a backing map: reads see nothing, writes fail.
    pub fn detached(keep_nulls: bool) -> Self {
        Self {
            values: None,
            keep_nulls,
        }
    }

    pub fn from_map(values: HashMap<String, Option<T>>, keep_nulls: bool) -> Self {
        Self {
            values: Some(values),
            keep_nulls,
        }
    }

    /// Give a detached bag a backing map, returning the previous one.
    pub fn attach(&mut self, values: HashMap<String, Option<T>>) -> Option<HashMap<String, Option<T>>> {
        self.values.replace(values)
    }

    pub fn into_map(self) -> Option<HashMap<String, Option<T>>> {
        self.values
    }

    pub fn keeps_nulls(&self) -> bool {
        self.keep_nulls
    }

    pub fn is_detached(&self) -> bool {
        self.values.is_none()
    }

    /// Value stored under `name`. Absent names and stored nulls both read
    /// as `None`; use [`contains`](Self::contains) to tell them apart.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.values.as_ref()?.get(name)?.as_ref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.as_ref().is_some_and(|values| values.contains_key(name))
    }

    /// Store `value` under `name`.
    ///
    /// `None` removes the name, unless the bag keeps nulls.
    pub fn set(&mut self, name: impl Into<String>, value: Option<T>) -> Result<(), CoreError> {
        let name = name.into();
        let Some(values) = self.values.as_mut() else {
            return Err(CoreError::DetachedPropertyBag { name });
        };

        match value {
            None if !self.keep_nulls => {
                values.remove(&name);
            }
            value => {
                values.insert(name, value);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every property. A detached bag stays detached.
    pub fn clear(&mut self) {
        if let Some(values) = self.values.as_mut() {
            values.clear();
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.values.as_ref().map(HashMap::iter),
        }
    }
}

/// Iterator over `(name, value)` pairs. Stored nulls appear as `None`.
pub struct Iter<'a, T> {
    inner: Option<hash_map::Iter<'a, String, Option<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, Option<&'a T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (name, value) = self.inner.as_mut()?.next()?;
        Some((name.as_str(), value.as_ref()))
    }
}

impl<'a, T> IntoIterator for &'a PropertyBag<T> {
    type Item = (&'a str, Option<&'a T>);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
