// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Type-erased cache values and the typed read accessor.

use std::any::Any;
use std::sync::Arc;

use crate::{BackendCache, Error, Result};

/// A type-erased, cheaply clonable cache value.
///
/// Caches that need to hold values of more than one concrete type use
/// `Object` as their value type and read them back through
/// [`ObjectCacheExt::get_as`].
///
/// # Examples
///
/// ```
/// use parfait_backend::Object;
///
/// let object = Object::new(42_i32);
/// assert!(object.is::<i32>());
/// assert_eq!(object.downcast_ref::<i32>(), Some(&42));
/// assert!(object.downcast_ref::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct Object(Arc<dyn Any + Send + Sync>);

impl Object {
    /// Wraps a value, erasing its concrete type.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns `true` if the wrapped value is of type `T`.
    #[must_use]
    pub fn is<T: Send + Sync + 'static>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Returns a reference to the wrapped value if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Converts into a shared handle to the wrapped value if it is of type `T`.
    ///
    /// # Errors
    ///
    /// Returns the object unchanged when the wrapped value is not a `T`.
    pub fn downcast<T: Send + Sync + 'static>(self) -> std::result::Result<Arc<T>, Self> {
        self.0.downcast().map_err(Self)
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object").finish_non_exhaustive()
    }
}

/// Typed read access for caches of [`Object`] values.
///
/// This trait is automatically implemented for every `BackendCache<K, Object>`,
/// including the tiered facade itself, so the typed accessor inherits whatever
/// cascade and promotion semantics the underlying `get` has.
pub trait ObjectCacheExt<K>: BackendCache<K, Object>
where
    K: Sync,
{
    /// Retrieves a value and narrows it to type `T`.
    ///
    /// Absent keys return `Ok(None)`. A present value of the wrong type is an
    /// error, never silently treated as absent.
    fn get_as<T>(&self, key: &K) -> impl Future<Output = Result<Option<Arc<T>>>> + Send
    where
        T: Send + Sync + 'static,
    {
        async move {
            match self.get(key).await? {
                Some(entry) => match entry.into_value().downcast::<T>() {
                    Ok(value) => Ok(Some(value)),
                    Err(_) => Err(Error::from_message(format!(
                        "cached value is not of type {}",
                        std::any::type_name::<T>()
                    ))),
                },
                None => Ok(None),
            }
        }
    }
}

impl<K, C> ObjectCacheExt<K> for C
where
    K: Sync,
    C: BackendCache<K, Object>,
{
}
