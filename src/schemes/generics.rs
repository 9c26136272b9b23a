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

use rand::{CryptoRng, RngCore};

use crate::{
    errors::Error,
    keys::pair::KeyPair,
    schemes::algorithms::Scheme,
    utils::message::PartIdentifier,
};

/// Common session contract of the redactable signature constructions.
///
/// A session moves through Uninitialized -> Sign | Verify | Redact; every
/// `init_*` call resets it. Sessions hold mutable state and are meant for
/// one logical operation from one logical thread of control at a time.
pub trait RedactableSignature {
    type Scheme: Scheme;
    type Output;

    fn init_sign(&mut self, keypair: &KeyPair<Self::Scheme>) -> Result<(), Error>;

    /// Adds a message part to the working set of a signing session and
    /// returns the identifier naming it for later operations.
    fn add_part(&mut self, part: &[u8], redactable: bool) -> Result<PartIdentifier, Error>;

    fn sign<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<Self::Output, Error>;

    fn init_verify(&mut self, public_key: &<Self::Scheme as Scheme>::PubKey)
        -> Result<(), Error>;

    /// `false` on any mismatch; errors are reserved for malformed calls.
    fn verify(&mut self, signature: &Self::Output) -> Result<bool, Error>;

    fn init_redact(&mut self, public_key: &<Self::Scheme as Scheme>::PubKey)
        -> Result<(), Error>;

    /// Selects a part for removal in a redacting session.
    fn add_identifier(&mut self, identifier: PartIdentifier) -> Result<(), Error>;

    fn redact(&mut self, signature: &Self::Output) -> Result<Self::Output, Error>;

    /// Optional capability: extend an existing signature with further parts.
    fn update<R: RngCore + CryptoRng>(
        &mut self,
        _rng: &mut R,
        _signature: &Self::Output,
        _parts: &[(&[u8], bool)],
    ) -> Result<Self::Output, Error> {
        Err(Error::UnsupportedOperation("update".into()))
    }
}
