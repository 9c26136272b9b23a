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

use std::collections::{BTreeMap, BTreeSet};

use ed25519_dalek::{Signature, Signer, Verifier};
use rand::{CryptoRng, RngCore};
use rug::{integer::Order, Integer};
use serde::{Deserialize, Serialize};

use crate::{
    accumulator::{bp::BPAccumulator, Accumulator},
    errors::Error,
    keys::{
        pair::KeyPair,
        rss_key::RSSPublicKey,
    },
    schemes::{
        algorithms::{RssCiphersuite, BPA, GSRSS},
        generics::RedactableSignature,
    },
    utils::message::{ByteArray, PartIdentifier},
};

/// Immutable output of a set-based signing session: the conventional
/// signature over the accumulator value and the non-redactable parts, the
/// accumulator value itself, one witness per redactable part, and the
/// non-redactable part set.
///
/// Redaction derives a new output with a smaller witness map; the
/// conventional signature value and the accumulator value are carried over
/// byte-identical.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GSRSSSignature {
    pub(crate) signature: Signature,
    pub(crate) accumulator: Integer,
    pub(crate) witnesses: BTreeMap<ByteArray, Integer>,
    pub(crate) fixed: BTreeSet<ByteArray>,
}

impl GSRSSSignature {
    pub fn signature_value(&self) -> &Signature {
        &self.signature
    }

    pub fn accumulator_value(&self) -> &Integer {
        &self.accumulator
    }

    pub fn redactable_parts(&self) -> impl Iterator<Item = &ByteArray> {
        self.witnesses.keys()
    }

    pub fn fixed_parts(&self) -> &BTreeSet<ByteArray> {
        &self.fixed
    }

    pub fn witness(&self, part: &[u8]) -> Option<&Integer> {
        self.witnesses.get(part)
    }

    pub fn contains(&self, part: &[u8]) -> bool {
        self.witnesses.contains_key(part) || self.fixed.contains(part)
    }

    pub fn contains_identifier(&self, identifier: &PartIdentifier) -> bool {
        self.contains(identifier.value().as_bytes())
    }

    pub fn size(&self) -> usize {
        self.witnesses.len() + self.fixed.len()
    }
}

// Byte framing fed to the conventional signature primitive: the accumulator
// value first, then every non-redactable part in the byte-sequence order,
// each segment length-prefixed.
fn binding_payload(accumulator: &Integer, fixed: &BTreeSet<ByteArray>) -> Vec<u8> {
    let acc = accumulator.to_digits::<u8>(Order::MsfBe);
    let mut payload = Vec::with_capacity(8 + acc.len());
    payload.extend_from_slice(&(acc.len() as u64).to_be_bytes());
    payload.extend_from_slice(&acc);
    for part in fixed {
        payload.extend_from_slice(&(part.len() as u64).to_be_bytes());
        payload.extend_from_slice(part.as_bytes());
    }
    payload
}

/// Sign/verify/redact session of the set-based construction.
pub struct GSRSSSession<CS: RssCiphersuite> {
    state: State<CS>,
}

enum State<CS: RssCiphersuite> {
    Uninitialized,
    Sign {
        keypair: KeyPair<GSRSS<CS>>,
        redactable: BTreeSet<ByteArray>,
        fixed: BTreeSet<ByteArray>,
    },
    Verify {
        public_key: RSSPublicKey,
    },
    Redact {
        public_key: RSSPublicKey,
        targets: BTreeSet<ByteArray>,
    },
}

impl<CS: RssCiphersuite> GSRSSSession<CS> {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    /// Public key the session is bound to (verify and redact modes).
    pub fn public_key(&self) -> Option<&RSSPublicKey> {
        match &self.state {
            State::Verify { public_key } | State::Redact { public_key, .. } => Some(public_key),
            _ => None,
        }
    }
}

impl<CS: RssCiphersuite> Default for GSRSSSession<CS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CS: RssCiphersuite> RedactableSignature for GSRSSSession<CS> {
    type Scheme = GSRSS<CS>;
    type Output = GSRSSSignature;

    fn init_sign(&mut self, keypair: &KeyPair<GSRSS<CS>>) -> Result<(), Error> {
        self.state = State::Sign {
            keypair: keypair.clone(),
            redactable: BTreeSet::new(),
            fixed: BTreeSet::new(),
        };
        Ok(())
    }

    fn add_part(&mut self, part: &[u8], redactable: bool) -> Result<PartIdentifier, Error> {
        let (redactable_set, fixed_set) = match &mut self.state {
            State::Sign {
                redactable, fixed, ..
            } => (redactable, fixed),
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => {
                return Err(Error::WrongState(
                    "add_part requires a signing session".into(),
                ))
            }
        };

        let value = ByteArray::from(part);
        if redactable {
            // the set cannot hold two byte-identical redactable parts
            if redactable_set.contains(&value) {
                return Err(Error::DuplicateElement);
            }
            redactable_set.insert(value.clone());
        } else {
            fixed_set.insert(value.clone());
        }
        Ok(PartIdentifier::new(value))
    }

    fn sign<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<GSRSSSignature, Error> {
        let (keypair, redactable, fixed) = match &self.state {
            State::Sign {
                keypair,
                redactable,
                fixed,
            } => (keypair, redactable, fixed),
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => return Err(Error::WrongState("sign requires a signing session".into())),
        };

        // content present in both partitions stays non-redactable, so the
        // emitted partition is disjoint
        let redactable: Vec<ByteArray> = redactable
            .iter()
            .filter(|part| !fixed.contains(*part))
            .cloned()
            .collect();

        let acc_keypair = KeyPair::<BPA<CS>>::new(
            keypair.public_key().accumulator_key().clone(),
            keypair.private_key().accumulator_key().clone(),
        );
        let mut accumulator = BPAccumulator::<CS>::new();
        accumulator.init_witness(&acc_keypair)?;
        accumulator.digest(rng, &redactable)?;
        let accumulator_value = accumulator.accumulator_value()?.clone();

        let mut witnesses = BTreeMap::new();
        for part in &redactable {
            let witness = accumulator.create_witness(part)?;
            witnesses.insert(part.clone(), witness);
        }

        let payload = binding_payload(&accumulator_value, fixed);
        let signature = keypair.private_key().signature_key().sign(&payload);

        Ok(GSRSSSignature {
            signature,
            accumulator: accumulator_value,
            witnesses,
            fixed: fixed.clone(),
        })
    }

    fn init_verify(&mut self, public_key: &RSSPublicKey) -> Result<(), Error> {
        self.state = State::Verify {
            public_key: public_key.clone(),
        };
        Ok(())
    }

    fn verify(&mut self, signature: &GSRSSSignature) -> Result<bool, Error> {
        let public_key = match &self.state {
            State::Verify { public_key } => public_key,
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => {
                return Err(Error::WrongState(
                    "verify requires a verifying session".into(),
                ))
            }
        };

        // a well-formed output keeps the partitions disjoint
        if signature
            .witnesses
            .keys()
            .any(|part| signature.fixed.contains(part))
        {
            return Ok(false);
        }

        let payload = binding_payload(&signature.accumulator, &signature.fixed);
        if public_key
            .signature_key()
            .verify(&payload, &signature.signature)
            .is_err()
        {
            return Ok(false);
        }

        let mut accumulator = BPAccumulator::<CS>::new();
        accumulator.init_verify(public_key.accumulator_key())?;
        accumulator.restore_verify(signature.accumulator.clone())?;
        for (part, witness) in &signature.witnesses {
            if !accumulator.verify(witness, part)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn init_redact(&mut self, public_key: &RSSPublicKey) -> Result<(), Error> {
        self.state = State::Redact {
            public_key: public_key.clone(),
            targets: BTreeSet::new(),
        };
        Ok(())
    }

    fn add_identifier(&mut self, identifier: PartIdentifier) -> Result<(), Error> {
        match &mut self.state {
            State::Redact { targets, .. } => {
                // set semantics: the identifier's position is irrelevant
                targets.insert(identifier.value().clone());
                Ok(())
            }
            State::Uninitialized => Err(Error::NotInitialized),
            _ => Err(Error::WrongState(
                "add_identifier requires a redacting session".into(),
            )),
        }
    }

    fn redact(&mut self, signature: &GSRSSSignature) -> Result<GSRSSSignature, Error> {
        let targets = match &self.state {
            State::Redact { targets, .. } => targets,
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => {
                return Err(Error::WrongState(
                    "redact requires a redacting session".into(),
                ))
            }
        };

        for target in targets {
            if !signature.witnesses.contains_key(target) {
                if signature.fixed.contains(target) {
                    return Err(Error::PartNotRedactable);
                }
                return Err(Error::UnknownPart);
            }
        }

        // no cryptographic recomputation: removal filters the witness map,
        // everything else is carried over unchanged
        let witnesses = signature
            .witnesses
            .iter()
            .filter(|(part, _)| !targets.contains(*part))
            .map(|(part, witness)| (part.clone(), witness.clone()))
            .collect();

        Ok(GSRSSSignature {
            signature: signature.signature.clone(),
            accumulator: signature.accumulator.clone(),
            witnesses,
            fixed: signature.fixed.clone(),
        })
    }
}
