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

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Immutable byte-sequence value with structural equality, hashing and a
/// total ordering (byte-wise, then by length), usable directly as a
/// `BTreeMap`/`BTreeSet` key.
///
/// Serializes as a hex string, so it also works as a map key in formats
/// that require string keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteArray(Vec<u8>);

impl ByteArray {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for ByteArray {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteArray {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for ByteArray {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for ByteArray {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl Ord for ByteArray {
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.0.len().min(other.0.len());
        self.0[..common]
            .cmp(&other.0[..common])
            .then(self.0.len().cmp(&other.0.len()))
    }
}

impl PartialOrd for ByteArray {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ByteArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteArray({})", hex::encode(&self.0))
    }
}

impl Serialize for ByteArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for ByteArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map(ByteArray).map_err(de::Error::custom)
    }
}

/// Names a message part: by content alone for the set-based construction,
/// by content plus expected position for the ordered-list construction.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PartIdentifier {
    value: ByteArray,
    position: Option<usize>,
}

impl PartIdentifier {
    pub fn new(value: ByteArray) -> Self {
        Self {
            value,
            position: None,
        }
    }

    pub fn at_position(value: ByteArray, position: usize) -> Self {
        Self {
            value,
            position: Some(position),
        }
    }

    pub fn value(&self) -> &ByteArray {
        &self.value
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }
}
