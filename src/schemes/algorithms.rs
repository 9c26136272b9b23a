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

use digest::Digest;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha512;

use crate::keys::{
    bp_key::{BPPublicKey, BPSecretKey},
    rss_key::{RSSPublicKey, RSSSecretKey},
    traits::{PrivateKey, PublicKey},
};

pub trait Ciphersuite: Clone + Eq + 'static + Serialize + DeserializeOwned {
    type HashAlg: Digest;
}

pub trait RssCiphersuite: Eq + 'static + Ciphersuite {
    /// Unique ciphersuite identifier, `<modulus bits>-<digest>`.
    const ID: &'static str;
    const SECPARAM: u32; // NOTE: bit length of each safe-prime factor of the modulus
    const QSEC: u32; // NOTE: Miller-Rabin repetitions for primality testing. (Check NIST-FIPS 186-4, Table C.1, Column 2; Integer.is_probably_prime runs a Lucas test internally and "reps - 24" repetitions of the MR primality test)
    const ln: u32; // NOTE: length of n (i.e. special RSA modulus); all accumulator values and witnesses live below it
    const lr: u32; // NOTE: length of the per-position randomizers used by the ordered-list construction
}

/// Small parameters, affordable for test runs. Not for production keys.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Rss512Sha512 {}

impl RssCiphersuite for Rss512Sha512 {
    const ID: &'static str = "512-SHA512";
    const SECPARAM: u32 = 256;
    const QSEC: u32 = 19;
    const ln: u32 = 2 * Self::SECPARAM;
    const lr: u32 = 256;
}

impl Ciphersuite for Rss512Sha512 {
    type HashAlg = Sha512;
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Rss1024Sha512 {}

impl RssCiphersuite for Rss1024Sha512 {
    const ID: &'static str = "1024-SHA512";
    const SECPARAM: u32 = 512;
    const QSEC: u32 = 19;
    const ln: u32 = 2 * Self::SECPARAM;
    const lr: u32 = 256;
}

impl Ciphersuite for Rss1024Sha512 {
    type HashAlg = Sha512;
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Rss2048Sha512 {}

impl RssCiphersuite for Rss2048Sha512 {
    const ID: &'static str = "2048-SHA512";
    const SECPARAM: u32 = 1024;
    const QSEC: u32 = 27;
    const ln: u32 = 2 * Self::SECPARAM;
    const lr: u32 = 256;
}

impl Ciphersuite for Rss2048Sha512 {
    type HashAlg = Sha512;
}

pub trait Scheme: Clone + Eq + 'static + Sized + Serialize + DeserializeOwned {
    type Ciphersuite: RssCiphersuite;
    type PrivKey: PrivateKey;
    type PubKey: PublicKey;

    /// Unique algorithm name, the handle an external registry resolves.
    fn algorithm_id() -> String;
}

/// Barić–Pfitzmann accumulator over a special RSA modulus.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BPA<CS: RssCiphersuite>(PhantomData<CS>);

/// Set-based redactable signature construction.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GSRSS<CS: RssCiphersuite>(PhantomData<CS>);

/// Ordered-list redactable signature construction.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GLRSS<CS: RssCiphersuite>(PhantomData<CS>);

impl<CS: RssCiphersuite> Scheme for BPA<CS> {
    type Ciphersuite = CS;
    type PrivKey = BPSecretKey;
    type PubKey = BPPublicKey;

    fn algorithm_id() -> String {
        format!("BPA-{}", CS::ID)
    }
}

impl<CS: RssCiphersuite> Scheme for GSRSS<CS> {
    type Ciphersuite = CS;
    type PrivKey = RSSSecretKey;
    type PubKey = RSSPublicKey;

    fn algorithm_id() -> String {
        format!("GSRSS-{}", CS::ID)
    }
}

impl<CS: RssCiphersuite> Scheme for GLRSS<CS> {
    type Ciphersuite = CS;
    type PrivKey = RSSSecretKey;
    type PubKey = RSSPublicKey;

    fn algorithm_id() -> String {
        format!("GLRSS-{}", CS::ID)
    }
}
