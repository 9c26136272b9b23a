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

use thiserror::Error;

#[derive(Error, Clone, Debug)]
pub enum Error {
    #[error("Error during keypair generation")]
    KeyGenError(String),
    #[error("Invalid key for this scheme")]
    InvalidKey(String),
    #[error("Session not initialized")]
    NotInitialized,
    #[error("Operation invalid in the current session state")]
    WrongState(String),
    #[error("Duplicate redactable element")]
    DuplicateElement,
    #[error("Accumulator computation failed")]
    AccumulatorError(String),
    #[error("Part is not redactable")]
    PartNotRedactable,
    #[error("Unknown message part")]
    UnknownPart,
    #[error("Identifier does not match any signed part")]
    IdentifierMismatch(String),
    #[error("Error during computation of a Signature")]
    SignatureGenerationError(String),
    #[error("Operation not supported by this scheme")]
    UnsupportedOperation(String),
}
