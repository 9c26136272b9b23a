// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub mod bp;

#[cfg(test)]
mod tests;

use rand::{CryptoRng, RngCore};

use crate::{
    errors::Error, keys::pair::KeyPair, schemes::algorithms::Scheme, utils::message::ByteArray,
};

/// One-way commitment to a set of byte-sequence elements with compact
/// per-element membership witnesses.
///
/// A session moves through Uninitialized -> WitnessMode | VerifyMode; every
/// `init_*` call resets it. The auxiliary start value and the private key
/// material are only ever reachable from witness mode.
pub trait Accumulator {
    type Scheme: Scheme;
    type Value;
    type Witness;
    type State;

    fn init_witness(&mut self, keypair: &KeyPair<Self::Scheme>) -> Result<(), Error>;

    /// Commits to `elements`, drawing a fresh random start value. Calling it
    /// again replaces the previous commitment.
    fn digest<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
        elements: &[ByteArray],
    ) -> Result<(), Error>;

    /// Re-enters witness mode from an exported snapshot without redoing the
    /// digest step.
    fn restore_witness(
        &mut self,
        keypair: &KeyPair<Self::Scheme>,
        state: Self::State,
    ) -> Result<(), Error>;

    fn init_verify(&mut self, public_key: &<Self::Scheme as Scheme>::PubKey)
        -> Result<(), Error>;

    /// Binds the verify-mode session to a target commitment value.
    fn restore_verify(&mut self, accumulator: Self::Value) -> Result<(), Error>;

    fn create_witness(&self, element: &ByteArray) -> Result<Self::Witness, Error>;

    fn verify(&self, witness: &Self::Witness, element: &ByteArray) -> Result<bool, Error>;

    fn accumulator_value(&self) -> Result<&Self::Value, Error>;

    fn auxiliary_value(&self) -> Result<&Self::Value, Error>;

    fn export_state(&self) -> Result<Self::State, Error>;
}
