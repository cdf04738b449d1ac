//! Device registry.
//!
//! A fixed number of slots, each either empty or holding one device id with
//! its callback and context. Lookups take a read lock and clone the slot's
//! shared handles, so the lock is never held while a callback runs and a
//! callback may register or unregister devices itself.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::RegistryConfig;
use crate::device::DeviceId;
use crate::error::{Error, Result};
use crate::info::CryptoInfo;

/// Offload callback.
///
/// Called with the device id, the operation descriptor and the context given
/// at registration. `Err(Error::NotHandled)` declines the operation and sends
/// the caller to its software path; any other error is returned to the caller
/// unchanged.
pub type DeviceCallback =
    dyn Fn(DeviceId, &mut CryptoInfo<'_>, Option<&(dyn Any + Send + Sync)>) -> Result<()>
        + Send
        + Sync;

/// Context handle owned by the registrant and replayed to every callback.
pub type DeviceContext = Arc<dyn Any + Send + Sync>;

/// One slot of the device table.
#[derive(Clone)]
pub struct DeviceEntry {
    device_id: DeviceId,
    callback: Option<Arc<DeviceCallback>>,
    context: Option<DeviceContext>,
}

impl DeviceEntry {
    const EMPTY: DeviceEntry = DeviceEntry {
        device_id: DeviceId::INVALID,
        callback: None,
        context: None,
    };

    /// Device id of this entry.
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Registered callback.
    pub fn callback(&self) -> Option<&Arc<DeviceCallback>> {
        self.callback.as_ref()
    }

    /// Registered context.
    pub fn context(&self) -> Option<&DeviceContext> {
        self.context.as_ref()
    }

    fn is_free(&self) -> bool {
        self.device_id.is_invalid()
    }

    fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}

impl fmt::Debug for DeviceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceEntry")
            .field("device_id", &self.device_id)
            .field("callback", &self.callback.is_some())
            .field("context", &self.context.is_some())
            .finish()
    }
}

/// Registry mapping device ids to offload callbacks.
///
/// # Example
///
/// ```rust
/// use cryptocb::{DeviceId, Error, Registry};
///
/// let registry = Registry::new();
/// registry.register_device(DeviceId::new(1), |_, _, _| Err(Error::NotHandled), None)?;
/// assert!(registry.is_registered(DeviceId::new(1)));
///
/// registry.unregister_device(DeviceId::new(1));
/// assert!(registry.is_empty());
/// # Ok::<(), cryptocb::Error>(())
/// ```
pub struct Registry {
    slots: RwLock<Box<[DeviceEntry]>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("capacity", &self.capacity())
            .field("registered", &self.len())
            .finish()
    }
}

impl Registry {
    /// Create an empty registry with the default number of slots.
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    /// Create an empty registry from a configuration.
    pub fn with_config(config: &RegistryConfig) -> Self {
        let slots = vec![DeviceEntry::EMPTY; config.max_devices()].into_boxed_slice();
        Self {
            slots: RwLock::new(slots),
        }
    }

    /// Reset every slot to empty.
    pub fn initialize(&self) {
        let mut slots = self.write();
        slots.iter_mut().for_each(DeviceEntry::clear);
        tracing::debug!("Device registry initialized with {} slots", slots.len());
    }

    /// Register `callback` and `context` under `device_id`.
    ///
    /// Re-registering an id replaces its callback and context in place. When
    /// the id is new and every slot is taken this fails with
    /// [`Error::CapacityExceeded`] and the table is unchanged. The sentinel
    /// [`DeviceId::INVALID`] cannot be registered.
    pub fn register_device<F>(
        &self,
        device_id: DeviceId,
        callback: F,
        context: Option<DeviceContext>,
    ) -> Result<()>
    where
        F: Fn(DeviceId, &mut CryptoInfo<'_>, Option<&(dyn Any + Send + Sync)>) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.register_callback(device_id, Arc::new(callback), context)
    }

    /// Register an already shared callback under `device_id`.
    ///
    /// Same semantics as [`Registry::register_device`].
    pub fn register_callback(
        &self,
        device_id: DeviceId,
        callback: Arc<DeviceCallback>,
        context: Option<DeviceContext>,
    ) -> Result<()> {
        if device_id.is_invalid() {
            tracing::warn!("Refusing to register reserved device id {}", device_id);
            return Err(Error::InvalidDeviceId(device_id));
        }

        let mut slots = self.write();
        let capacity = slots.len();

        let index = match slots.iter().position(|e| e.device_id == device_id) {
            Some(index) => {
                tracing::debug!("Replacing callback for device {}", device_id);
                index
            },
            None => slots.iter().position(DeviceEntry::is_free).ok_or_else(|| {
                tracing::warn!(
                    "Cannot register device {}: all {} slots in use",
                    device_id,
                    capacity
                );
                Error::CapacityExceeded { capacity }
            })?,
        };

        slots[index] = DeviceEntry {
            device_id,
            callback: Some(callback),
            context,
        };
        tracing::debug!("Registered device {} in slot {}", device_id, index);

        Ok(())
    }

    /// Remove the registration for `device_id`, if any.
    pub fn unregister_device(&self, device_id: DeviceId) {
        if device_id.is_invalid() {
            return;
        }

        let mut slots = self.write();
        if let Some(entry) = slots.iter_mut().find(|e| e.device_id == device_id) {
            entry.clear();
            tracing::debug!("Unregistered device {}", device_id);
        }
    }

    /// Look up the entry for `device_id`.
    ///
    /// Returns a snapshot; the table lock is released before this returns.
    pub fn find_device(&self, device_id: DeviceId) -> Option<DeviceEntry> {
        if device_id.is_invalid() {
            return None;
        }

        self.read()
            .iter()
            .find(|e| e.device_id == device_id)
            .cloned()
    }

    /// Check whether `device_id` has a registration.
    pub fn is_registered(&self, device_id: DeviceId) -> bool {
        self.find_device(device_id).is_some()
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.read().iter().filter(|e| !e.is_free()).count()
    }

    /// Check if no device is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.read().len()
    }

    /// Run `build`'s descriptor through the device registered for `device_id`.
    ///
    /// The descriptor is only built once a callback has been found. Returns
    /// [`Error::NotHandled`] when there is none, otherwise the callback's result.
    pub(crate) fn dispatch<'a, B>(&self, device_id: DeviceId, build: B) -> Result<()>
    where
        B: FnOnce() -> CryptoInfo<'a>,
    {
        let entry = match self.find_device(device_id) {
            Some(entry) => entry,
            None => return Err(Error::NotHandled),
        };
        let callback = match entry.callback {
            Some(callback) => callback,
            None => return Err(Error::NotHandled),
        };

        let mut info = build();
        tracing::trace!("Dispatching {} to device {}", info, device_id);

        let result = callback(device_id, &mut info, entry.context.as_deref());
        if let Err(e) = &result {
            tracing::trace!("Device {} returned: {}", device_id, e);
        }
        result
    }

    // A panic can only happen between whole-slot writes, so the table stays
    // consistent and poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Box<[DeviceEntry]>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Box<[DeviceEntry]>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn decline(
        _: DeviceId,
        _: &mut CryptoInfo<'_>,
        _: Option<&(dyn Any + Send + Sync)>,
    ) -> Result<()> {
        Err(Error::NotHandled)
    }

    fn small_registry(slots: usize) -> Registry {
        let config = RegistryConfig::builder()
            .with_max_devices(slots)
            .build()
            .unwrap();
        Registry::with_config(&config)
    }

    #[test]
    fn test_fresh_registry_is_empty() {
        let registry = Registry::new();
        assert_eq!(registry.capacity(), 8);
        assert!(registry.is_empty());
        for id in 0..8 {
            assert!(registry.find_device(DeviceId::new(id)).is_none());
        }
    }

    #[test]
    fn test_register_and_find() {
        let registry = Registry::new();
        let ctx: DeviceContext = Arc::new(17u32);
        registry
            .register_device(DeviceId::new(5), decline, Some(ctx.clone()))
            .unwrap();

        let entry = registry.find_device(DeviceId::new(5)).unwrap();
        assert_eq!(entry.device_id(), DeviceId::new(5));
        assert!(entry.callback().is_some());
        assert!(Arc::ptr_eq(entry.context().unwrap(), &ctx));
        assert_eq!(entry.context().unwrap().downcast_ref::<u32>(), Some(&17));
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let registry = Registry::new();
        let first: Arc<DeviceCallback> = Arc::new(decline);
        let second: Arc<DeviceCallback> = Arc::new(decline);
        let ctx_x: DeviceContext = Arc::new("x");
        let ctx_y: DeviceContext = Arc::new("y");

        registry
            .register_callback(DeviceId::new(5), first.clone(), Some(ctx_x))
            .unwrap();
        registry
            .register_callback(DeviceId::new(5), second.clone(), Some(ctx_y.clone()))
            .unwrap();

        assert_eq!(registry.len(), 1);
        let entry = registry.find_device(DeviceId::new(5)).unwrap();
        assert!(Arc::ptr_eq(entry.callback().unwrap(), &second));
        assert!(!Arc::ptr_eq(entry.callback().unwrap(), &first));
        assert!(Arc::ptr_eq(entry.context().unwrap(), &ctx_y));
    }

    #[test]
    fn test_capacity_exceeded_leaves_table_unchanged() {
        let registry = small_registry(2);
        registry.register_device(DeviceId::new(1), decline, None).unwrap();
        registry.register_device(DeviceId::new(2), decline, None).unwrap();

        let result = registry.register_device(DeviceId::new(3), decline, None);
        assert_eq!(result, Err(Error::CapacityExceeded { capacity: 2 }));
        assert_eq!(registry.len(), 2);
        assert!(registry.is_registered(DeviceId::new(1)));
        assert!(registry.is_registered(DeviceId::new(2)));
        assert!(!registry.is_registered(DeviceId::new(3)));

        // A full table still accepts re-registration of a present id.
        registry.register_device(DeviceId::new(2), decline, None).unwrap();
    }

    #[test]
    fn test_unregister_frees_slot() {
        let registry = small_registry(1);
        registry.register_device(DeviceId::new(1), decline, None).unwrap();
        registry.unregister_device(DeviceId::new(1));
        assert!(registry.is_empty());

        registry.register_device(DeviceId::new(9), decline, None).unwrap();
        assert!(registry.is_registered(DeviceId::new(9)));
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let registry = Registry::new();
        registry.register_device(DeviceId::new(1), decline, None).unwrap();
        registry.unregister_device(DeviceId::new(2));
        registry.unregister_device(DeviceId::INVALID);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sentinel_rejected() {
        let registry = Registry::new();
        let result = registry.register_device(DeviceId::INVALID, decline, None);
        assert_eq!(result, Err(Error::InvalidDeviceId(DeviceId::INVALID)));
        assert!(registry.is_empty());
        assert!(registry.find_device(DeviceId::INVALID).is_none());
    }

    #[test]
    fn test_initialize_resets() {
        let registry = Registry::new();
        for id in 0..4 {
            registry.register_device(DeviceId::new(id), decline, None).unwrap();
        }
        registry.initialize();
        assert!(registry.is_empty());
        registry.initialize();
        assert_eq!(registry.capacity(), 8);
    }

    #[test]
    fn test_dispatch_builds_descriptor_only_when_registered() {
        let registry = Registry::new();
        let built = AtomicUsize::new(0);

        #[derive(Debug)]
        struct Rng;
        impl crate::device::CryptoObject for Rng {
            fn device_id(&self) -> DeviceId {
                DeviceId::new(4)
            }
        }
        impl crate::device::RngState for Rng {}

        let counter = &built;
        let mut rng = Rng;
        let mut out = [0u8; 8];
        let rng_ref: &mut dyn crate::device::RngState = &mut rng;
        let out_ref: &mut [u8] = &mut out;
        let result = registry.dispatch(DeviceId::new(4), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            CryptoInfo::Rng(crate::info::RngInfo {
                rng: rng_ref,
                output: out_ref,
            })
        });

        assert_eq!(result, Err(Error::NotHandled));
        assert_eq!(built.load(Ordering::SeqCst), 0);
    }
}
