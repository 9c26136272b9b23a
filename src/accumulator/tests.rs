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

use rand::thread_rng;
use rug::Integer;

use crate::{
    accumulator::{
        bp::{AccumulatorState, BPAccumulator},
        Accumulator,
    },
    errors::Error,
    keys::{
        bp_key::{BPPublicKey, BPSecretKey},
        pair::KeyPair,
    },
    schemes::algorithms::{Rss1024Sha512, Rss512Sha512, RssCiphersuite, BPA},
    utils::message::ByteArray,
};

fn elements(values: &[&str]) -> Vec<ByteArray> {
    values
        .iter()
        .map(|v| ByteArray::from(v.as_bytes()))
        .collect()
}

pub(crate) fn digest_and_verify<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<BPA<CS>>::generate(&mut rng);
    let members = elements(&["alpha", "beta", "gamma"]);

    let mut accumulator = BPAccumulator::<CS>::new();
    accumulator.init_witness(&keypair).unwrap();
    accumulator.digest(&mut rng, &members).unwrap();
    let value = accumulator.accumulator_value().unwrap().clone();

    let witnesses: Vec<Integer> = members
        .iter()
        .map(|m| accumulator.create_witness(m).unwrap())
        .collect();
    let outsider = ByteArray::from(&b"delta"[..]);
    let bogus = accumulator.create_witness(&outsider).unwrap();

    let mut verifier = BPAccumulator::<CS>::new();
    verifier.init_verify(keypair.public_key()).unwrap();
    verifier.restore_verify(value).unwrap();
    for (member, witness) in members.iter().zip(&witnesses) {
        assert!(verifier.verify(witness, member).unwrap());
    }
    assert!(!verifier.verify(&bogus, &outsider).unwrap());
    // a witness only opens its own element
    assert!(!verifier.verify(&witnesses[0], &members[1]).unwrap());
}

pub(crate) fn restore_witness_roundtrip<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<BPA<CS>>::generate(&mut rng);
    let members = elements(&["one", "two"]);

    let mut accumulator = BPAccumulator::<CS>::new();
    accumulator.init_witness(&keypair).unwrap();
    accumulator.digest(&mut rng, &members).unwrap();
    let value = accumulator.accumulator_value().unwrap().clone();
    let state: AccumulatorState = accumulator.export_state().unwrap();

    let mut restored = BPAccumulator::<CS>::new();
    restored.restore_witness(&keypair, state).unwrap();
    let witness = restored.create_witness(&members[0]).unwrap();

    let mut verifier = BPAccumulator::<CS>::new();
    verifier.init_verify(keypair.public_key()).unwrap();
    verifier.restore_verify(value).unwrap();
    assert!(verifier.verify(&witness, &members[0]).unwrap());
}

pub(crate) fn mode_guards<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<BPA<CS>>::generate(&mut rng);
    let member = ByteArray::from(&b"solo"[..]);

    let mut accumulator = BPAccumulator::<CS>::new();
    assert!(matches!(
        accumulator.create_witness(&member),
        Err(Error::NotInitialized)
    ));
    assert!(matches!(
        accumulator.digest(&mut rng, &[member.clone()]),
        Err(Error::NotInitialized)
    ));

    accumulator.init_witness(&keypair).unwrap();
    assert!(matches!(
        accumulator.create_witness(&member),
        Err(Error::WrongState(_))
    ));
    accumulator.digest(&mut rng, &[member.clone()]).unwrap();
    let value = accumulator.accumulator_value().unwrap().clone();
    let witness = accumulator.create_witness(&member).unwrap();
    assert!(matches!(
        accumulator.verify(&witness, &member),
        Err(Error::WrongState(_))
    ));

    accumulator.init_verify(keypair.public_key()).unwrap();
    assert!(matches!(
        accumulator.verify(&witness, &member),
        Err(Error::WrongState(_))
    ));
    accumulator.restore_verify(value).unwrap();
    assert!(accumulator.verify(&witness, &member).unwrap());
    // the start value never leaves witness mode
    assert!(matches!(
        accumulator.auxiliary_value(),
        Err(Error::WrongState(_))
    ));
    assert!(matches!(
        accumulator.export_state(),
        Err(Error::WrongState(_))
    ));
}

pub(crate) fn rejects_malformed_modulus<CS: RssCiphersuite>() {
    let keypair = KeyPair::<BPA<CS>>::new(
        BPPublicKey::new(Integer::from(4)),
        BPSecretKey::new(Integer::from(2), Integer::from(2)),
    );
    let mut accumulator = BPAccumulator::<CS>::new();
    assert!(matches!(
        accumulator.init_witness(&keypair),
        Err(Error::InvalidKey(_))
    ));
    assert!(matches!(
        accumulator.init_verify(keypair.public_key()),
        Err(Error::InvalidKey(_))
    ));
}

pub(crate) fn empty_digest_supported<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<BPA<CS>>::generate(&mut rng);

    let mut accumulator = BPAccumulator::<CS>::new();
    accumulator.init_witness(&keypair).unwrap();
    accumulator.digest(&mut rng, &[]).unwrap();
    let value = accumulator.accumulator_value().unwrap().clone();
    // with nothing digested the commitment is the bare start value
    assert_eq!(&value, accumulator.auxiliary_value().unwrap());
}

#[test]
fn digest_and_verify_512() {
    digest_and_verify::<Rss512Sha512>();
}

#[test]
fn restore_witness_roundtrip_512() {
    restore_witness_roundtrip::<Rss512Sha512>();
}

#[test]
fn mode_guards_512() {
    mode_guards::<Rss512Sha512>();
}

#[test]
fn rejects_malformed_modulus_512() {
    rejects_malformed_modulus::<Rss512Sha512>();
}

#[test]
fn empty_digest_supported_512() {
    empty_digest_supported::<Rss512Sha512>();
}

#[test]
#[ignore = "slow: generates two 512-bit safe primes"]
fn digest_and_verify_1024() {
    digest_and_verify::<Rss1024Sha512>();
}
