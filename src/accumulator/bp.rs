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

use core::marker::PhantomData;
use std::collections::BTreeSet;

use rand::{CryptoRng, RngCore};
use rug::Integer;
use serde::{Deserialize, Serialize};

use crate::{
    accumulator::Accumulator,
    errors::Error,
    keys::{
        bp_key::{BPPublicKey, BPSecretKey},
        pair::KeyPair,
    },
    schemes::algorithms::{Ciphersuite, RssCiphersuite, BPA},
    utils::{hash::full_domain_hash, message::ByteArray, random::random_coprime},
};

/// Exported, transferable snapshot of a witness-mode commitment, sufficient
/// to reconstruct the session without redoing the digest step.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AccumulatorState {
    pub accumulator: Integer,
    pub auxiliary: Integer,
    pub elements: BTreeSet<ByteArray>,
}

/// Accumulator over a special RSA modulus, a Benaloh–de Mare construction
/// with a random start value (Barić–Pfitzmann).
///
/// `accumulator = start^(prod fdh(N, e_i)) mod N`; the witness for `e` skips
/// `e`'s factor in the exponent product.
pub struct BPAccumulator<CS: RssCiphersuite> {
    mode: Mode,
    _cs: PhantomData<CS>,
}

// The Verify variant never carries the private factors or the start value.
enum Mode {
    Uninitialized,
    Witness {
        public: BPPublicKey,
        private: BPSecretKey,
        digest: Option<AccumulatorState>,
    },
    Verify {
        public: BPPublicKey,
        target: Option<Integer>,
    },
}

impl<CS: RssCiphersuite> BPAccumulator<CS> {
    pub fn new() -> Self {
        Self {
            mode: Mode::Uninitialized,
            _cs: PhantomData,
        }
    }

    fn check_modulus(N: &Integer) -> Result<(), Error> {
        if N.is_even() || N.significant_bits() != CS::ln {
            return Err(Error::InvalidKey(format!(
                "accumulator modulus must be an odd {}-bit integer",
                CS::ln
            )));
        }
        Ok(())
    }

    fn fdh(N: &Integer, element: &ByteArray) -> Integer {
        full_domain_hash::<<CS as Ciphersuite>::HashAlg>(N, element.as_bytes())
    }

    fn pow_mod(base: &Integer, exponent: &Integer, N: &Integer) -> Result<Integer, Error> {
        base.pow_mod_ref(exponent, N)
            .map(Integer::from)
            .ok_or_else(|| Error::AccumulatorError("modular exponentiation failed".into()))
    }
}

impl<CS: RssCiphersuite> Default for BPAccumulator<CS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CS: RssCiphersuite> Accumulator for BPAccumulator<CS> {
    type Scheme = BPA<CS>;
    type Value = Integer;
    type Witness = Integer;
    type State = AccumulatorState;

    fn init_witness(&mut self, keypair: &KeyPair<BPA<CS>>) -> Result<(), Error> {
        Self::check_modulus(&keypair.public_key().N)?;
        self.mode = Mode::Witness {
            public: keypair.public_key().clone(),
            private: keypair.private_key().clone(),
            digest: None,
        };
        Ok(())
    }

    fn digest<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
        elements: &[ByteArray],
    ) -> Result<(), Error> {
        let (public, private, digest) = match &mut self.mode {
            Mode::Witness {
                public,
                private,
                digest,
            } => (public, private, digest),
            Mode::Uninitialized => return Err(Error::NotInitialized),
            Mode::Verify { .. } => {
                return Err(Error::WrongState("digest requires witness mode".into()))
            }
        };

        let elements: BTreeSet<ByteArray> = elements.iter().cloned().collect();
        let start = random_coprime(rng, &public.N);

        // exponents act modulo phi(N) since the start value is coprime to N
        let phi = private.phi();
        let mut exponent = Integer::from(1);
        for element in &elements {
            exponent = exponent * Self::fdh(&public.N, element) % &phi;
        }
        let accumulator = Self::pow_mod(&start, &exponent, &public.N)?;

        *digest = Some(AccumulatorState {
            accumulator,
            auxiliary: start,
            elements,
        });
        Ok(())
    }

    fn restore_witness(
        &mut self,
        keypair: &KeyPair<BPA<CS>>,
        state: AccumulatorState,
    ) -> Result<(), Error> {
        Self::check_modulus(&keypair.public_key().N)?;
        self.mode = Mode::Witness {
            public: keypair.public_key().clone(),
            private: keypair.private_key().clone(),
            digest: Some(state),
        };
        Ok(())
    }

    fn init_verify(&mut self, public_key: &BPPublicKey) -> Result<(), Error> {
        Self::check_modulus(&public_key.N)?;
        self.mode = Mode::Verify {
            public: public_key.clone(),
            target: None,
        };
        Ok(())
    }

    fn restore_verify(&mut self, accumulator: Integer) -> Result<(), Error> {
        match &mut self.mode {
            Mode::Verify { target, .. } => {
                *target = Some(accumulator);
                Ok(())
            }
            Mode::Uninitialized => Err(Error::NotInitialized),
            Mode::Witness { .. } => Err(Error::WrongState(
                "restore_verify requires verify mode".into(),
            )),
        }
    }

    fn create_witness(&self, element: &ByteArray) -> Result<Integer, Error> {
        let (public, private, state) = match &self.mode {
            Mode::Witness {
                public,
                private,
                digest: Some(state),
            } => (public, private, state),
            Mode::Witness { digest: None, .. } => {
                return Err(Error::WrongState("no digested element set".into()))
            }
            Mode::Uninitialized => return Err(Error::NotInitialized),
            Mode::Verify { .. } => {
                return Err(Error::WrongState(
                    "create_witness requires witness mode".into(),
                ))
            }
        };

        let phi = private.phi();
        let mut exponent = Integer::from(1);
        for other in state.elements.iter().filter(|e| *e != element) {
            exponent = exponent * Self::fdh(&public.N, other) % &phi;
        }
        Self::pow_mod(&state.auxiliary, &exponent, &public.N)
    }

    fn verify(&self, witness: &Integer, element: &ByteArray) -> Result<bool, Error> {
        let (public, target) = match &self.mode {
            Mode::Verify {
                public,
                target: Some(target),
            } => (public, target),
            Mode::Verify { target: None, .. } => {
                return Err(Error::WrongState("no accumulator value restored".into()))
            }
            Mode::Uninitialized => return Err(Error::NotInitialized),
            Mode::Witness { .. } => {
                return Err(Error::WrongState("verify requires verify mode".into()))
            }
        };

        let hash = Self::fdh(&public.N, element);
        let lhs = Self::pow_mod(witness, &hash, &public.N)?;
        Ok(lhs == *target)
    }

    fn accumulator_value(&self) -> Result<&Integer, Error> {
        match &self.mode {
            Mode::Witness {
                digest: Some(state),
                ..
            } => Ok(&state.accumulator),
            Mode::Verify {
                target: Some(target),
                ..
            } => Ok(target),
            Mode::Uninitialized => Err(Error::NotInitialized),
            _ => Err(Error::WrongState("no accumulator value available".into())),
        }
    }

    fn auxiliary_value(&self) -> Result<&Integer, Error> {
        match &self.mode {
            Mode::Witness {
                digest: Some(state),
                ..
            } => Ok(&state.auxiliary),
            Mode::Uninitialized => Err(Error::NotInitialized),
            _ => Err(Error::WrongState(
                "auxiliary value only available in witness mode".into(),
            )),
        }
    }

    fn export_state(&self) -> Result<AccumulatorState, Error> {
        match &self.mode {
            Mode::Witness {
                digest: Some(state),
                ..
            } => Ok(state.clone()),
            Mode::Uninitialized => Err(Error::NotInitialized),
            _ => Err(Error::WrongState(
                "state export requires a digested witness session".into(),
            )),
        }
    }
}
