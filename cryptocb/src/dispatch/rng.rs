//! Random block dispatcher.

use crate::device::RngState;
use crate::error::Result;
use crate::info::{CryptoInfo, RngInfo};
use crate::registry::Registry;

impl Registry {
    /// Offload filling `output` with random bytes from `rng`.
    pub fn random_block<'a>(&self, rng: &'a mut dyn RngState, output: &'a mut [u8]) -> Result<()> {
        let device_id = rng.device_id();
        self.dispatch(device_id, move || CryptoInfo::Rng(RngInfo { rng, output }))
    }
}
