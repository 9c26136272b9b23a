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

/// Uniform integer in `[0, 2^bits)` drawn from the caller's rng.
pub fn random_bits<R: RngCore + CryptoRng>(rng: &mut R, bits: u32) -> Integer {
    let mut buf = vec![0u8; ((bits + 7) / 8) as usize];
    rng.fill_bytes(&mut buf);
    let mut value = Integer::from_digits(&buf, Order::MsfBe);
    let excess = buf.len() as u32 * 8 - bits;
    if excess > 0 {
        value >>= excess;
    }
    value
}

/// Random integer of exactly `bits` bits (top bit forced).
pub fn random_exact_bits<R: RngCore + CryptoRng>(rng: &mut R, bits: u32) -> Integer {
    let mut value = random_bits(rng, bits);
    value.set_bit(bits - 1, true);
    value
}

/// Uniform integer in `[0, bound)` via rejection sampling.
pub fn random_below<R: RngCore + CryptoRng>(rng: &mut R, bound: &Integer) -> Integer {
    let bits = bound.significant_bits();
    loop {
        let value = random_bits(rng, bits);
        if &value < bound {
            return value;
        }
    }
}

/// Random integer in `[2, modulus)` coprime to `modulus`.
pub fn random_coprime<R: RngCore + CryptoRng>(rng: &mut R, modulus: &Integer) -> Integer {
    loop {
        let value = random_below(rng, modulus);
        if value > 1u32 && Integer::from(value.gcd_ref(modulus)) == 1u32 {
            return value;
        }
    }
}
