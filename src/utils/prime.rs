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
use rug::{integer::IsPrime, Integer};

use super::random::random_exact_bits;

/// Generates a safe prime `p = 2q + 1` (`q` prime) of exactly `bit_length`
/// bits. `reps` is passed to `is_probably_prime` ("reps - 24" rounds of
/// Miller-Rabin testing are executed internally).
pub fn random_safe_prime<R: RngCore + CryptoRng>(
    rng: &mut R,
    bit_length: u32,
    reps: u32,
) -> Integer {
    assert!(bit_length >= 3, "safe primes need at least 3 bits");
    loop {
        let mut q = random_exact_bits(rng, bit_length - 1);
        q.set_bit(0, true);
        if q.is_probably_prime(reps) == IsPrime::No {
            q = q.next_prime();
        }
        loop {
            let p = Integer::from(2) * q.clone() + Integer::from(1);
            if p.significant_bits() != bit_length {
                // the search drifted off the target length, redraw q
                break;
            }
            if q.mod_u(4) == 3 && q.mod_u(10) != 7 && p.is_probably_prime(reps) != IsPrime::No {
                return p;
            }
            q = next_candidate(q);
        }
    }
}

// Candidates with q != 3 (mod 4) or q = 7 (mod 10) cannot yield a safe
// prime (2q + 1 would be even resp. divisible by 5), skip them.
fn next_candidate(q: Integer) -> Integer {
    let mut q = q.next_prime();
    while q.mod_u(4) != 3 || q.mod_u(10) == 7 {
        q = q.next_prime();
    }
    q
}

/// Checks that `p` is prime and `(p - 1) / 2` is prime as well.
pub fn is_safe_prime(p: &Integer, reps: u32) -> bool {
    if p.is_probably_prime(reps) == IsPrime::No {
        return false;
    }
    let q = Integer::from(p - 1u32) / Integer::from(2);
    q.is_probably_prime(reps) != IsPrime::No
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn generates_safe_prime_of_requested_length() {
        let mut rng = thread_rng();
        let p = random_safe_prime(&mut rng, 128, 30);
        assert_eq!(p.significant_bits(), 128);
        assert!(is_safe_prime(&p, 30));
    }

    #[test]
    fn consecutive_draws_differ() {
        let mut rng = thread_rng();
        let first = random_safe_prime(&mut rng, 96, 30);
        let second = random_safe_prime(&mut rng, 96, 30);
        assert_ne!(first, second);
    }
}
