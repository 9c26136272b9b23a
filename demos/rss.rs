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

use redactium::glrss::signature::GLRSSSession;
use redactium::gsrss::signature::GSRSSSession;
use redactium::keys::pair::KeyPair;
use redactium::schemes::algorithms::{Rss1024Sha512, Scheme, GLRSS, GSRSS};
use redactium::schemes::generics::RedactableSignature;

fn gsrss_walkthrough() {
    let mut rng = thread_rng();

    log::info!("Keypair Generation ({})", GSRSS::<Rss1024Sha512>::algorithm_id());
    let keypair = KeyPair::<GSRSS<Rss1024Sha512>>::generate(&mut rng);

    log::info!("Signing four parts, two of them redactable");
    let mut session = GSRSSSession::<Rss1024Sha512>::new();
    session.init_sign(&keypair).unwrap();
    let id_price = session.add_part(b"price: 100", true).unwrap();
    session.add_part(b"discount: 20%", true).unwrap();
    session.add_part(b"vendor: ACME", false).unwrap();
    session.add_part(b"order: 4711", false).unwrap();
    let signature = session.sign(&mut rng).unwrap();
    log::info!("Signature covers {} parts", signature.size());

    session.init_verify(keypair.public_key()).unwrap();
    log::info!("Verification: {}", session.verify(&signature).unwrap());

    log::info!("Redacting the price");
    session.init_redact(keypair.public_key()).unwrap();
    session.add_identifier(id_price).unwrap();
    let redacted = session.redact(&signature).unwrap();

    session.init_verify(keypair.public_key()).unwrap();
    log::info!(
        "Redacted signature covers {} parts, verification: {}",
        redacted.size(),
        session.verify(&redacted).unwrap()
    );
}

fn glrss_walkthrough() {
    let mut rng = thread_rng();

    log::info!("Keypair Generation ({})", GLRSS::<Rss1024Sha512>::algorithm_id());
    let keypair = KeyPair::<GLRSS<Rss1024Sha512>>::generate(&mut rng);

    log::info!("Signing an ordered document");
    let mut session = GLRSSSession::<Rss1024Sha512>::new();
    session.init_sign(&keypair).unwrap();
    session.add_part(b"title", false).unwrap();
    let id_middle = session.add_part(b"middle section", true).unwrap();
    session.add_part(b"conclusion", true).unwrap();
    let signature = session.sign(&mut rng).unwrap();

    session.init_verify(keypair.public_key()).unwrap();
    log::info!("Verification: {}", session.verify(&signature).unwrap());

    log::info!("Redacting the middle section");
    session.init_redact(keypair.public_key()).unwrap();
    session.add_identifier(id_middle).unwrap();
    let redacted = session.redact(&signature).unwrap();

    session.init_verify(keypair.public_key()).unwrap();
    log::info!(
        "Survivors in order: {:?}, verification: {}",
        redacted
            .parts()
            .iter()
            .map(|p| String::from_utf8_lossy(p.part().as_bytes()).into_owned())
            .collect::<Vec<_>>(),
        session.verify(&redacted).unwrap()
    );
}

fn main() {
    env_logger::init();

    gsrss_walkthrough();
    glrss_walkthrough();
}
