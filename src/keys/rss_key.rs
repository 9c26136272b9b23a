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

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    keys::{
        bp_key::{BPPublicKey, BPSecretKey},
        pair::KeyPair,
        traits::{PrivateKey, PublicKey},
    },
    schemes::algorithms::{RssCiphersuite, BPA, GLRSS, GSRSS},
};

/// Composite public key of the redactable signature constructions: one
/// sub-key for the conventional signature primitive, one for the
/// accumulator, bound under a single algorithm identity.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RSSPublicKey {
    pub(crate) sig: VerifyingKey,
    pub(crate) acc: BPPublicKey,
}

impl RSSPublicKey {
    pub fn new(sig: VerifyingKey, acc: BPPublicKey) -> Self {
        Self { sig, acc }
    }

    pub fn signature_key(&self) -> &VerifyingKey {
        &self.sig
    }

    pub fn accumulator_key(&self) -> &BPPublicKey {
        &self.acc
    }
}

impl PublicKey for RSSPublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.sig.to_bytes().to_vec();
        bytes.extend_from_slice(&self.acc.to_bytes());
        bytes
    }

    fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RSSSecretKey {
    pub(crate) sig: SigningKey,
    pub(crate) acc: BPSecretKey,
}

impl RSSSecretKey {
    pub fn new(sig: SigningKey, acc: BPSecretKey) -> Self {
        Self { sig, acc }
    }

    pub fn signature_key(&self) -> &SigningKey {
        &self.sig
    }

    pub fn accumulator_key(&self) -> &BPSecretKey {
        &self.acc
    }
}

impl PrivateKey for RSSSecretKey {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.sig.to_bytes().to_vec();
        bytes.extend_from_slice(&self.acc.to_bytes());
        bytes
    }

    fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl<CS: RssCiphersuite> KeyPair<GSRSS<CS>> {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let signing = SigningKey::generate(rng);
        let (acc_sk, acc_pk) = KeyPair::<BPA<CS>>::generate(rng).into_parts();

        Self {
            public: RSSPublicKey::new(signing.verifying_key(), acc_pk),
            private: RSSSecretKey::new(signing, acc_sk),
        }
    }
}

impl<CS: RssCiphersuite> KeyPair<GLRSS<CS>> {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let (private, public) = KeyPair::<GSRSS<CS>>::generate(rng).into_parts();
        Self { public, private }
    }
}
