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

use std::collections::BTreeSet;

use rand::{CryptoRng, RngCore};
use rug::{integer::Order, Integer};
use serde::{Deserialize, Serialize};

use crate::{
    accumulator::{bp::BPAccumulator, Accumulator},
    errors::Error,
    gsrss::signature::{GSRSSSession, GSRSSSignature},
    keys::{pair::KeyPair, rss_key::RSSPublicKey},
    schemes::{
        algorithms::{RssCiphersuite, BPA, GLRSS, GSRSS},
        generics::RedactableSignature,
    },
    utils::message::{ByteArray, PartIdentifier},
};

/// Per-position data of a signed list: the message part, its positional
/// randomizer, the accumulator over the randomizer prefix, and one witness
/// per surviving predecessor (self included), indexed by current positions.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GLRSSSignedPart {
    pub(crate) part: ByteArray,
    pub(crate) random: ByteArray,
    pub(crate) accumulator: Integer,
    pub(crate) witnesses: Vec<Integer>,
}

impl GLRSSSignedPart {
    pub fn part(&self) -> &ByteArray {
        &self.part
    }

    pub fn random(&self) -> &ByteArray {
        &self.random
    }

    pub fn accumulator_value(&self) -> &Integer {
        &self.accumulator
    }

    pub fn witnesses(&self) -> &[Integer] {
        &self.witnesses
    }
}

/// Immutable output of an ordered-list signing session: the per-position
/// data plus the set-based signature over the encoded positions.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GLRSSSignature {
    pub(crate) parts: Vec<GLRSSSignedPart>,
    pub(crate) set_signature: GSRSSSignature,
}

impl GLRSSSignature {
    pub fn parts(&self) -> &[GLRSSSignedPart] {
        &self.parts
    }

    pub fn set_signature(&self) -> &GSRSSSignature {
        &self.set_signature
    }

    pub fn size(&self) -> usize {
        self.parts.len()
    }

    pub fn contains(&self, part: &[u8]) -> bool {
        self.parts.iter().any(|p| p.part.as_bytes() == part)
    }

    pub fn contains_identifier(&self, identifier: &PartIdentifier) -> bool {
        match identifier.position() {
            Some(position) => self
                .parts
                .get(position)
                .map_or(false, |p| p.part == *identifier.value()),
            None => self.contains(identifier.value().as_bytes()),
        }
    }
}

// The set layer signs `part || accumulator || randomizer` per position,
// each segment length-prefixed.
fn encode_signed_part(part: &ByteArray, accumulator: &Integer, random: &ByteArray) -> ByteArray {
    let acc = accumulator.to_digits::<u8>(Order::MsfBe);
    let mut buf = Vec::with_capacity(24 + part.len() + acc.len() + random.len());
    for segment in [part.as_bytes(), acc.as_slice(), random.as_bytes()] {
        buf.extend_from_slice(&(segment.len() as u64).to_be_bytes());
        buf.extend_from_slice(segment);
    }
    ByteArray::new(buf)
}

/// Sign/verify/redact session of the ordered-list construction.
pub struct GLRSSSession<CS: RssCiphersuite> {
    state: State<CS>,
}

enum State<CS: RssCiphersuite> {
    Uninitialized,
    Sign {
        keypair: KeyPair<GLRSS<CS>>,
        parts: Vec<(ByteArray, bool)>,
    },
    Verify {
        public_key: RSSPublicKey,
    },
    Redact {
        public_key: RSSPublicKey,
        targets: Vec<PartIdentifier>,
    },
}

impl<CS: RssCiphersuite> GLRSSSession<CS> {
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

    fn draw_randomizer<R: RngCore + CryptoRng>(rng: &mut R) -> ByteArray {
        let mut buf = vec![0u8; (CS::lr / 8) as usize];
        rng.fill_bytes(&mut buf);
        ByteArray::new(buf)
    }
}

impl<CS: RssCiphersuite> Default for GLRSSSession<CS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CS: RssCiphersuite> RedactableSignature for GLRSSSession<CS> {
    type Scheme = GLRSS<CS>;
    type Output = GLRSSSignature;

    fn init_sign(&mut self, keypair: &KeyPair<GLRSS<CS>>) -> Result<(), Error> {
        self.state = State::Sign {
            keypair: keypair.clone(),
            parts: Vec::new(),
        };
        Ok(())
    }

    fn add_part(&mut self, part: &[u8], redactable: bool) -> Result<PartIdentifier, Error> {
        let parts = match &mut self.state {
            State::Sign { parts, .. } => parts,
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => {
                return Err(Error::WrongState(
                    "add_part requires a signing session".into(),
                ))
            }
        };

        // lists may repeat content, positions keep the copies apart
        let value = ByteArray::from(part);
        let position = parts.len();
        parts.push((value.clone(), redactable));
        Ok(PartIdentifier::at_position(value, position))
    }

    fn sign<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<GLRSSSignature, Error> {
        let (keypair, parts) = match &self.state {
            State::Sign { keypair, parts } => (keypair, parts),
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => return Err(Error::WrongState("sign requires a signing session".into())),
        };

        let acc_keypair = KeyPair::<BPA<CS>>::new(
            keypair.public_key().accumulator_key().clone(),
            keypair.private_key().accumulator_key().clone(),
        );
        let mut accumulator = BPAccumulator::<CS>::new();
        accumulator.init_witness(&acc_keypair)?;

        // incremental accumulation over the randomizer prefix: position i
        // records the accumulator over {r_0..r_i} and a witness for every
        // prefix member against that value
        let mut prefix: Vec<ByteArray> = Vec::with_capacity(parts.len());
        let mut signed_parts: Vec<GLRSSSignedPart> = Vec::with_capacity(parts.len());
        for (part, _) in parts {
            let random = Self::draw_randomizer(rng);
            prefix.push(random.clone());
            accumulator.digest(rng, &prefix)?;
            let value = accumulator.accumulator_value()?.clone();
            let mut witnesses = Vec::with_capacity(prefix.len());
            for member in &prefix {
                witnesses.push(accumulator.create_witness(member)?);
            }
            signed_parts.push(GLRSSSignedPart {
                part: part.clone(),
                random,
                accumulator: value,
                witnesses,
            });
        }

        let gsrss_keypair =
            KeyPair::<GSRSS<CS>>::new(keypair.public_key().clone(), keypair.private_key().clone());
        let mut session = GSRSSSession::<CS>::new();
        session.init_sign(&gsrss_keypair)?;
        for (signed, (_, redactable)) in signed_parts.iter().zip(parts) {
            let encoded = encode_signed_part(&signed.part, &signed.accumulator, &signed.random);
            session.add_part(encoded.as_bytes(), *redactable)?;
        }
        let set_signature = session.sign(rng)?;

        Ok(GLRSSSignature {
            parts: signed_parts,
            set_signature,
        })
    }

    fn init_verify(&mut self, public_key: &RSSPublicKey) -> Result<(), Error> {
        self.state = State::Verify {
            public_key: public_key.clone(),
        };
        Ok(())
    }

    fn verify(&mut self, signature: &GLRSSSignature) -> Result<bool, Error> {
        let public_key = match &self.state {
            State::Verify { public_key } => public_key,
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => {
                return Err(Error::WrongState(
                    "verify requires a verifying session".into(),
                ))
            }
        };

        let mut session = GSRSSSession::<CS>::new();
        session.init_verify(public_key)?;
        if !session.verify(&signature.set_signature)? {
            return Ok(false);
        }

        // the set layer must cover exactly the surviving positions
        if signature.set_signature.size() != signature.parts.len() {
            return Ok(false);
        }
        for signed in &signature.parts {
            let encoded = encode_signed_part(&signed.part, &signed.accumulator, &signed.random);
            if !signature.set_signature.contains(encoded.as_bytes()) {
                return Ok(false);
            }
        }

        // order soundness: every surviving predecessor's randomizer must be
        // a member of this position's prefix accumulator
        let mut accumulator = BPAccumulator::<CS>::new();
        accumulator.init_verify(public_key.accumulator_key())?;
        for (position, signed) in signature.parts.iter().enumerate() {
            if signed.witnesses.len() != position + 1 {
                return Ok(false);
            }
            accumulator.restore_verify(signed.accumulator.clone())?;
            for (index, predecessor) in signature.parts[..=position].iter().enumerate() {
                if !accumulator.verify(&signed.witnesses[index], &predecessor.random)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn init_redact(&mut self, public_key: &RSSPublicKey) -> Result<(), Error> {
        self.state = State::Redact {
            public_key: public_key.clone(),
            targets: Vec::new(),
        };
        Ok(())
    }

    fn add_identifier(&mut self, identifier: PartIdentifier) -> Result<(), Error> {
        match &mut self.state {
            State::Redact { targets, .. } => {
                if identifier.position().is_none() {
                    return Err(Error::IdentifierMismatch(
                        "list identifiers carry a position".into(),
                    ));
                }
                targets.push(identifier);
                Ok(())
            }
            State::Uninitialized => Err(Error::NotInitialized),
            _ => Err(Error::WrongState(
                "add_identifier requires a redacting session".into(),
            )),
        }
    }

    fn redact(&mut self, signature: &GLRSSSignature) -> Result<GLRSSSignature, Error> {
        let (public_key, targets) = match &self.state {
            State::Redact {
                public_key,
                targets,
            } => (public_key, targets),
            State::Uninitialized => return Err(Error::NotInitialized),
            _ => {
                return Err(Error::WrongState(
                    "redact requires a redacting session".into(),
                ))
            }
        };

        // identifiers pin down the content expected at each position
        let mut remove: BTreeSet<usize> = BTreeSet::new();
        for identifier in targets {
            let position = identifier.position().ok_or_else(|| {
                Error::IdentifierMismatch("list identifiers carry a position".into())
            })?;
            let signed = signature.parts.get(position).ok_or_else(|| {
                Error::IdentifierMismatch(format!("no part at position {position}"))
            })?;
            if signed.part != *identifier.value() {
                return Err(Error::IdentifierMismatch(format!(
                    "content mismatch at position {position}"
                )));
            }
            remove.insert(position);
        }

        let mut session = GSRSSSession::<CS>::new();
        session.init_redact(public_key)?;
        for position in &remove {
            let signed = &signature.parts[*position];
            let encoded = encode_signed_part(&signed.part, &signed.accumulator, &signed.random);
            session.add_identifier(PartIdentifier::new(encoded))?;
        }
        let set_signature = session.redact(&signature.set_signature)?;

        // survivors keep their prefix accumulators; witness lists shrink to
        // the surviving predecessors and re-index to the new positions
        let survivors: Vec<usize> = (0..signature.parts.len())
            .filter(|position| !remove.contains(position))
            .collect();
        let mut parts = Vec::with_capacity(survivors.len());
        for &position in &survivors {
            let signed = &signature.parts[position];
            let witnesses = survivors
                .iter()
                .take_while(|&&predecessor| predecessor <= position)
                .map(|&predecessor| signed.witnesses[predecessor].clone())
                .collect();
            parts.push(GLRSSSignedPart {
                part: signed.part.clone(),
                random: signed.random.clone(),
                accumulator: signed.accumulator.clone(),
                witnesses,
            });
        }

        Ok(GLRSSSignature {
            parts,
            set_signature,
        })
    }
}
