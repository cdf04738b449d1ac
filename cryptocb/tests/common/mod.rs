//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cryptocb::{
    AesCipher, CryptoInfo, CryptoObject, DeviceId, EccKey, Result, RngState, RsaKey,
    Sha256State, ShaState,
};

/// One object type standing in for every primitive state.
#[derive(Debug, Default)]
pub struct TestObject {
    pub dev: DeviceId,
    pub label: &'static str,
}

impl TestObject {
    pub fn new(id: i32, label: &'static str) -> Self {
        Self {
            dev: DeviceId::new(id),
            label,
        }
    }
}

impl CryptoObject for TestObject {
    fn device_id(&self) -> DeviceId {
        self.dev
    }
}

impl RsaKey for TestObject {}
impl EccKey for TestObject {}
impl AesCipher for TestObject {}
impl ShaState for TestObject {}
impl Sha256State for TestObject {}
impl RngState for TestObject {}

/// Label of the object behind a descriptor reference.
pub fn label_of(obj: &dyn Any) -> &'static str {
    obj.downcast_ref::<TestObject>()
        .map(|o| o.label)
        .unwrap_or("<foreign>")
}

/// Invocation log shared between a test and its callback.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: AtomicUsize,
    seen: Mutex<Vec<(DeviceId, String)>>,
}

impl CallLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, device_id: DeviceId, info: &CryptoInfo<'_>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((device_id, info.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<(DeviceId, String)> {
        self.seen.lock().unwrap().last().cloned()
    }
}

/// Callback that logs every call and answers with `result`.
pub fn logging_callback(
    log: Arc<CallLog>,
    result: Result<()>,
) -> impl Fn(DeviceId, &mut CryptoInfo<'_>, Option<&(dyn Any + Send + Sync)>) -> Result<()>
       + Send
       + Sync
       + 'static {
    move |device_id, info, _| {
        log.record(device_id, info);
        result.clone()
    }
}
