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
use rug::{integer::Order, Integer};
use serde::{Deserialize, Serialize};

use crate::{
    keys::{
        pair::KeyPair,
        traits::{PrivateKey, PublicKey},
    },
    schemes::algorithms::{RssCiphersuite, BPA},
    utils::prime::random_safe_prime,
};

/// Public accumulator parameter: a special RSA modulus, the product of two
/// safe primes.
#[derive(Clone, PartialEq, PartialOrd, Eq, Hash, Debug, Ord, Serialize, Deserialize)]
pub struct BPPublicKey {
    pub N: Integer,
}

impl BPPublicKey {
    pub fn new(N: Integer) -> Self {
        Self { N }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BPSecretKey {
    pub p: Integer,
    pub q: Integer,
}

impl BPSecretKey {
    pub fn new(p: Integer, q: Integer) -> Self {
        Self { p, q }
    }

    pub(crate) fn phi(&self) -> Integer {
        (&self.p - Integer::from(1)) * (&self.q - Integer::from(1))
    }
}

impl PublicKey for BPPublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.N.to_digits::<u8>(Order::MsfBe)
    }

    fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl PrivateKey for BPSecretKey {
    fn to_bytes(&self) -> Vec<u8> {
        let p = self.p.to_digits::<u8>(Order::MsfBe);
        let q = self.q.to_digits::<u8>(Order::MsfBe);
        let mut bytes = Vec::with_capacity(4 + p.len() + q.len());
        bytes.extend_from_slice(&(p.len() as u16).to_be_bytes());
        bytes.extend_from_slice(&p);
        bytes.extend_from_slice(&(q.len() as u16).to_be_bytes());
        bytes.extend_from_slice(&q);
        bytes
    }

    fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl<CS: RssCiphersuite> KeyPair<BPA<CS>> {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let reps = CS::QSEC + 24; // "is_probably_prime" subtracts 24 from reps.
        let p = random_safe_prime(rng, CS::SECPARAM, reps);
        let mut q = random_safe_prime(rng, CS::SECPARAM, reps);
        // the factors must differ and their product must fill ln bits
        while q == p || Integer::from(&p * &q).significant_bits() != CS::ln {
            q = random_safe_prime(rng, CS::SECPARAM, reps);
        }
        let N = Integer::from(&p * &q);
        log::debug!("generated {}-bit accumulator modulus", N.significant_bits());

        Self {
            public: BPPublicKey::new(N),
            private: BPSecretKey::new(p, q),
        }
    }
}
