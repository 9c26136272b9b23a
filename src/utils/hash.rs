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

use digest::Digest;
use rug::{integer::Order, Integer};

/// Maps `message` onto an odd integer no larger than `max`, with the output
/// bit length matched to the bit length of `max` (full domain).
///
/// Digest blocks over `(message ‖ counter)` are concatenated until the bit
/// length of `max` is covered; the top bit of the concatenation is forced to
/// 1, the value is right-shifted down to the target bit length and the low
/// bit is forced to 1. While the value still exceeds `max`, only the newest
/// block is replaced with a freshly hashed one at an incremented counter.
/// Deterministic: identical `(message, max)` always yields the same output.
pub fn full_domain_hash<D: Digest>(max: &Integer, message: &[u8]) -> Integer {
    let target_bits = max.significant_bits();
    assert!(target_bits > 1, "hash bound must exceed 1");

    let block_bits = (<D as Digest>::output_size() * 8) as u32;
    let mut counter: u32 = 0;
    let mut blocks: Vec<Vec<u8>> = Vec::new();
    while (blocks.len() as u32) * block_bits < target_bits {
        blocks.push(hash_block::<D>(message, counter));
        counter += 1;
    }

    loop {
        let mut concat = Vec::with_capacity(blocks.len() * <D as Digest>::output_size());
        for block in &blocks {
            concat.extend_from_slice(block);
        }
        let total_bits = concat.len() as u32 * 8;

        let mut value = Integer::from_digits(&concat, Order::MsfBe);
        value.set_bit(total_bits - 1, true);
        value >>= total_bits - target_bits;
        value.set_bit(0, true);

        if &value <= max {
            return value;
        }

        // sliding-window refresh of the newest block only
        let last = blocks.len() - 1;
        blocks[last] = hash_block::<D>(message, counter);
        counter += 1;
    }
}

fn hash_block<D: Digest>(message: &[u8], counter: u32) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(message);
    hasher.update(counter.to_be_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;
    use sha2::Sha512;

    use crate::utils::random::random_exact_bits;

    #[test]
    fn deterministic_output() {
        let max = random_exact_bits(&mut thread_rng(), 1024);
        let first = full_domain_hash::<Sha512>(&max, b"redactable part");
        let second = full_domain_hash::<Sha512>(&max, b"redactable part");
        assert_eq!(first, second);
    }

    #[test]
    fn output_is_odd_full_length_and_bounded() {
        let mut rng = thread_rng();
        for message in [&b"a"[..], &b"b"[..], &b"some longer message body"[..]] {
            let max = random_exact_bits(&mut rng, 1024);
            let value = full_domain_hash::<Sha512>(&max, message);
            assert!(value.is_odd());
            assert_eq!(value.significant_bits(), max.significant_bits());
            assert!(value < max);
        }
    }

    #[test]
    fn distinct_messages_yield_distinct_values() {
        let max = random_exact_bits(&mut thread_rng(), 512);
        let first = full_domain_hash::<Sha512>(&max, b"first");
        let second = full_domain_hash::<Sha512>(&max, b"second");
        assert_ne!(first, second);
    }

    #[test]
    fn small_bound_is_respected() {
        let max = Integer::from(101);
        let value = full_domain_hash::<Sha512>(&max, b"tiny domain");
        assert!(value.is_odd());
        assert!(value <= max);
    }
}
