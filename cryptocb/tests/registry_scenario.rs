//! Registry lifecycle tests.
//!
//! Covers registration up to capacity, in-place re-registration,
//! unregistration and fallback for unknown ids.

mod common;

use std::sync::Arc;

use common::{logging_callback, CallLog, TestObject};
use cryptocb::{DeviceContext, DeviceId, Error, Registry, RegistryConfig, RsaOperation};

fn rsa_public_encrypt(registry: &Registry, key: &TestObject) -> cryptocb::Result<()> {
    let mut out = [0u8; 256];
    let mut out_len = 0;
    registry.rsa(
        b"message",
        &mut out,
        &mut out_len,
        RsaOperation::PublicEncrypt,
        key,
        None,
    )
}

/// Capacity-8 walk-through: fill, overwrite, overflow, unregister.
#[test]
fn test_capacity_scenario() {
    let registry = Registry::with_config(&RegistryConfig::default());
    registry.initialize();

    for id in 0..8 {
        assert!(registry.find_device(DeviceId::new(id)).is_none());
        assert_eq!(
            rsa_public_encrypt(&registry, &TestObject::new(id, "key")),
            Err(Error::NotHandled)
        );
    }

    let log_a = CallLog::new();
    let log_b = CallLog::new();
    let ctx_x: DeviceContext = Arc::new("context X");
    let ctx_y: DeviceContext = Arc::new("context Y");

    registry
        .register_device(
            DeviceId::new(5),
            logging_callback(log_a.clone(), Ok(())),
            Some(ctx_x.clone()),
        )
        .unwrap();
    let entry = registry.find_device(DeviceId::new(5)).unwrap();
    assert!(Arc::ptr_eq(entry.context().unwrap(), &ctx_x));

    registry
        .register_device(
            DeviceId::new(5),
            logging_callback(log_b.clone(), Ok(())),
            Some(ctx_y.clone()),
        )
        .unwrap();
    let entry = registry.find_device(DeviceId::new(5)).unwrap();
    assert!(Arc::ptr_eq(entry.context().unwrap(), &ctx_y));
    assert_eq!(registry.len(), 1);

    let key5 = TestObject::new(5, "key5");
    assert_eq!(rsa_public_encrypt(&registry, &key5), Ok(()));
    assert_eq!(log_a.calls(), 0);
    assert_eq!(log_b.calls(), 1);

    // 5 already holds one slot; the other ids of 1..=8 fill the rest.
    for id in (1..=8).filter(|&id| id != 5) {
        registry
            .register_device(DeviceId::new(id), logging_callback(CallLog::new(), Ok(())), None)
            .unwrap();
    }
    assert_eq!(registry.len(), 8);

    let overflow = registry.register_device(
        DeviceId::new(9),
        logging_callback(CallLog::new(), Ok(())),
        None,
    );
    assert_eq!(overflow, Err(Error::CapacityExceeded { capacity: 8 }));
    assert_eq!(registry.len(), 8);
    assert!(!registry.is_registered(DeviceId::new(9)));
    let entry = registry.find_device(DeviceId::new(5)).unwrap();
    assert!(Arc::ptr_eq(entry.context().unwrap(), &ctx_y));

    registry.unregister_device(DeviceId::new(5));
    assert!(registry.find_device(DeviceId::new(5)).is_none());
    assert_eq!(rsa_public_encrypt(&registry, &key5), Err(Error::NotHandled));
    assert_eq!(log_b.calls(), 1);

    assert_eq!(registry.len(), 7);

    // The freed slot is reusable.
    registry
        .register_device(DeviceId::new(9), logging_callback(CallLog::new(), Ok(())), None)
        .unwrap();
    assert!(registry.is_registered(DeviceId::new(9)));
    assert_eq!(registry.len(), 8);
}

/// Every registered id stays findable with its latest registration.
#[test]
fn test_distinct_ids_up_to_capacity() {
    let config = RegistryConfig::builder().with_max_devices(4).build().unwrap();
    let registry = Registry::with_config(&config);

    let contexts: Vec<DeviceContext> = (0..4).map(|i| Arc::new(i) as DeviceContext).collect();
    for (i, ctx) in contexts.iter().enumerate() {
        registry
            .register_device(
                DeviceId::new(10 + i as i32),
                logging_callback(CallLog::new(), Ok(())),
                Some(ctx.clone()),
            )
            .unwrap();
    }

    for (i, ctx) in contexts.iter().enumerate() {
        let entry = registry.find_device(DeviceId::new(10 + i as i32)).unwrap();
        assert!(Arc::ptr_eq(entry.context().unwrap(), ctx));
        assert_eq!(entry.context().unwrap().downcast_ref::<i32>(), Some(&(i as i32)));
    }

    assert_eq!(
        registry.register_device(DeviceId::new(99), logging_callback(CallLog::new(), Ok(())), None),
        Err(Error::CapacityExceeded { capacity: 4 })
    );
    for i in 0..4 {
        assert!(registry.is_registered(DeviceId::new(10 + i)));
    }
}

/// Dispatch for an id that was never registered has no side effects.
#[test]
fn test_unknown_id_has_no_side_effects() {
    let registry = Registry::new();
    let log = CallLog::new();
    registry
        .register_device(DeviceId::new(1), logging_callback(log.clone(), Ok(())), None)
        .unwrap();

    let mut out = [7u8; 16];
    let mut out_len = 99;
    let key = TestObject::new(2, "other");
    let result = registry.rsa(
        b"x",
        &mut out,
        &mut out_len,
        RsaOperation::PrivateDecrypt,
        &key,
        None,
    );

    assert_eq!(result, Err(Error::NotHandled));
    assert_eq!(out, [7u8; 16]);
    assert_eq!(out_len, 99);
    assert_eq!(log.calls(), 0);
    assert_eq!(registry.len(), 1);
}

/// The callback's own decline comes back as-is.
#[test]
fn test_device_decline_and_failure_pass_through() {
    let registry = Registry::new();
    let key = TestObject::new(3, "key");

    registry
        .register_device(
            DeviceId::new(3),
            logging_callback(CallLog::new(), Err(Error::NotHandled)),
            None,
        )
        .unwrap();
    assert_eq!(rsa_public_encrypt(&registry, &key), Err(Error::NotHandled));

    registry
        .register_device(
            DeviceId::new(3),
            logging_callback(CallLog::new(), Err(Error::DeviceFailure(-235))),
            None,
        )
        .unwrap();
    let err = rsa_public_encrypt(&registry, &key).unwrap_err();
    assert_eq!(err, Error::DeviceFailure(-235));
    assert_eq!(err.code(), -235);
}
