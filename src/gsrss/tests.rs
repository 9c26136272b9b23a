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
    errors::Error,
    gsrss::signature::GSRSSSession,
    keys::pair::KeyPair,
    schemes::{
        algorithms::{Rss1024Sha512, Rss512Sha512, RssCiphersuite, GSRSS},
        generics::RedactableSignature,
    },
    utils::message::{ByteArray, PartIdentifier},
};

pub(crate) fn sign_verify_redact<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<GSRSS<CS>>::generate(&mut rng);

    let mut session = GSRSSSession::<CS>::new();
    session.init_sign(&keypair).unwrap();
    let id_a = session.add_part(b"a", true).unwrap();
    session.add_part(b"b", true).unwrap();
    session.add_part(b"c", false).unwrap();
    session.add_part(b"d", false).unwrap();
    let signature = session.sign(&mut rng).unwrap();
    assert_eq!(signature.size(), 4);

    session.init_verify(keypair.public_key()).unwrap();
    assert!(session.verify(&signature).unwrap());

    session.init_redact(keypair.public_key()).unwrap();
    session.add_identifier(id_a).unwrap();
    let redacted = session.redact(&signature).unwrap();

    assert!(!redacted.contains(b"a"));
    assert!(redacted.contains(b"b"));
    assert!(redacted.contains(b"c"));
    assert!(redacted.contains(b"d"));
    assert_eq!(redacted.size(), 3);
    assert_eq!(redacted.accumulator_value(), signature.accumulator_value());
    assert_eq!(redacted.signature_value(), signature.signature_value());

    session.init_verify(keypair.public_key()).unwrap();
    assert!(session.verify(&redacted).unwrap());

    // the original output is untouched
    assert!(signature.contains(b"a"));
    assert_eq!(signature.size(), 4);
    session.init_verify(keypair.public_key()).unwrap();
    assert!(session.verify(&signature).unwrap());
}

pub(crate) fn duplicate_handling<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<GSRSS<CS>>::generate(&mut rng);

    let mut session = GSRSSSession::<CS>::new();
    session.init_sign(&keypair).unwrap();
    session.add_part(b"x", true).unwrap();
    assert!(matches!(
        session.add_part(b"x", true),
        Err(Error::DuplicateElement)
    ));
    // the same content in the other partition is a different matter
    session.add_part(b"x", false).unwrap();
    session.add_part(b"y", true).unwrap();

    let signature = session.sign(&mut rng).unwrap();
    // "x" survives only as non-redactable
    assert_eq!(signature.size(), 2);
    assert!(signature.contains(b"x"));
    assert!(signature.witness(b"x").is_none());
    assert!(signature.witness(b"y").is_some());

    session.init_verify(keypair.public_key()).unwrap();
    assert!(session.verify(&signature).unwrap());

    session.init_redact(keypair.public_key()).unwrap();
    session
        .add_identifier(PartIdentifier::new(ByteArray::from(&b"x"[..])))
        .unwrap();
    assert!(matches!(
        session.redact(&signature),
        Err(Error::PartNotRedactable)
    ));
}

pub(crate) fn disjoint_redactions_are_independent<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<GSRSS<CS>>::generate(&mut rng);

    let mut session = GSRSSSession::<CS>::new();
    session.init_sign(&keypair).unwrap();
    let id_a = session.add_part(b"a", true).unwrap();
    let id_b = session.add_part(b"b", true).unwrap();
    session.add_part(b"keep", false).unwrap();
    let signature = session.sign(&mut rng).unwrap();

    session.init_redact(keypair.public_key()).unwrap();
    session.add_identifier(id_a).unwrap();
    let without_a = session.redact(&signature).unwrap();

    session.init_redact(keypair.public_key()).unwrap();
    session.add_identifier(id_b).unwrap();
    let without_b = session.redact(&signature).unwrap();

    assert!(!without_a.contains(b"a") && without_a.contains(b"b"));
    assert!(!without_b.contains(b"b") && without_b.contains(b"a"));
    session.init_verify(keypair.public_key()).unwrap();
    assert!(session.verify(&without_a).unwrap());
    assert!(session.verify(&without_b).unwrap());
    assert!(session.verify(&signature).unwrap());
}

pub(crate) fn tampering_fails_verification<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<GSRSS<CS>>::generate(&mut rng);
    let other_keypair = KeyPair::<GSRSS<CS>>::generate(&mut rng);

    let mut session = GSRSSSession::<CS>::new();
    session.init_sign(&keypair).unwrap();
    session.add_part(b"first", true).unwrap();
    session.add_part(b"second", true).unwrap();
    session.add_part(b"third", false).unwrap();
    let signature = session.sign(&mut rng).unwrap();

    session.init_verify(keypair.public_key()).unwrap();

    // doctored accumulator value
    let mut doctored = signature.clone();
    doctored.accumulator += Integer::from(1);
    assert!(!session.verify(&doctored).unwrap());

    // witnesses swapped between parts
    let mut doctored = signature.clone();
    let first = ByteArray::from(&b"first"[..]);
    let second = ByteArray::from(&b"second"[..]);
    let w1 = doctored.witnesses[&first].clone();
    let w2 = doctored.witnesses[&second].clone();
    doctored.witnesses.insert(first, w2);
    doctored.witnesses.insert(second, w1);
    assert!(!session.verify(&doctored).unwrap());

    // extended non-redactable set
    let mut doctored = signature.clone();
    doctored.fixed.insert(ByteArray::from(&b"smuggled"[..]));
    assert!(!session.verify(&doctored).unwrap());

    // wrong public key
    session.init_verify(other_keypair.public_key()).unwrap();
    assert!(!session.verify(&signature).unwrap());
}

pub(crate) fn state_machine_guards<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<GSRSS<CS>>::generate(&mut rng);

    let mut session = GSRSSSession::<CS>::new();
    assert!(matches!(session.sign(&mut rng), Err(Error::NotInitialized)));
    assert!(matches!(
        session.add_part(b"p", true),
        Err(Error::NotInitialized)
    ));

    session.init_verify(keypair.public_key()).unwrap();
    assert!(matches!(
        session.add_part(b"p", true),
        Err(Error::WrongState(_))
    ));
    assert!(matches!(session.sign(&mut rng), Err(Error::WrongState(_))));

    session.init_sign(&keypair).unwrap();
    session.add_part(b"p", true).unwrap();
    let signature = session.sign(&mut rng).unwrap();
    assert!(matches!(
        session.verify(&signature),
        Err(Error::WrongState(_))
    ));
    assert!(matches!(
        session.add_identifier(PartIdentifier::new(ByteArray::from(&b"p"[..]))),
        Err(Error::WrongState(_))
    ));

    // the optional update capability fails fast
    session.init_sign(&keypair).unwrap();
    assert!(matches!(
        session.update(&mut rng, &signature, &[(&b"more"[..], true)]),
        Err(Error::UnsupportedOperation(_))
    ));
}

pub(crate) fn redacting_unknown_part_fails<CS: RssCiphersuite>() {
    let mut rng = thread_rng();
    let keypair = KeyPair::<GSRSS<CS>>::generate(&mut rng);

    let mut session = GSRSSSession::<CS>::new();
    session.init_sign(&keypair).unwrap();
    session.add_part(b"present", true).unwrap();
    let signature = session.sign(&mut rng).unwrap();

    session.init_redact(keypair.public_key()).unwrap();
    session
        .add_identifier(PartIdentifier::new(ByteArray::from(&b"absent"[..])))
        .unwrap();
    assert!(matches!(
        session.redact(&signature),
        Err(Error::UnknownPart)
    ));
}

#[test]
fn sign_verify_redact_512() {
    sign_verify_redact::<Rss512Sha512>();
}

#[test]
fn duplicate_handling_512() {
    duplicate_handling::<Rss512Sha512>();
}

#[test]
fn disjoint_redactions_are_independent_512() {
    disjoint_redactions_are_independent::<Rss512Sha512>();
}

#[test]
fn tampering_fails_verification_512() {
    tampering_fails_verification::<Rss512Sha512>();
}

#[test]
fn state_machine_guards_512() {
    state_machine_guards::<Rss512Sha512>();
}

#[test]
fn redacting_unknown_part_fails_512() {
    redacting_unknown_part_fails::<Rss512Sha512>();
}

#[test]
#[ignore = "slow: generates two 512-bit safe primes"]
fn sign_verify_redact_1024() {
    sign_verify_redact::<Rss1024Sha512>();
}
