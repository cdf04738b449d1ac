//! Fixtures shared by the dispatch benchmarks.

use cryptocb::{
    AesCipher, CryptoInfo, CryptoObject, DeviceId, Error, Registry, Result, RngState, Sha256State,
};

/// Minimal object usable as any benchmarked primitive state.
#[derive(Debug, Clone, Copy)]
pub struct BenchObject(pub DeviceId);

impl CryptoObject for BenchObject {
    fn device_id(&self) -> DeviceId {
        self.0
    }
}

impl AesCipher for BenchObject {}
impl Sha256State for BenchObject {}
impl RngState for BenchObject {}

/// Registry with `devices` registered ids `0..devices`, each running a
/// callback that handles RNG and SHA-256 and declines everything else.
pub fn populated_registry(devices: usize) -> Result<Registry> {
    let registry = Registry::new();
    for id in 0..devices {
        registry.register_device(DeviceId::new(id as i32), offload, None)?;
    }
    Ok(registry)
}

fn offload(
    _: DeviceId,
    info: &mut CryptoInfo<'_>,
    _: Option<&(dyn std::any::Any + Send + Sync)>,
) -> Result<()> {
    match info {
        CryptoInfo::Rng(rng) => {
            rng.output.fill(0x5A);
            Ok(())
        },
        CryptoInfo::Hash(_) => Ok(()),
        _ => Err(Error::NotHandled),
    }
}
