//! Tests for the token engine

mod codec_tests;

use std::sync::Arc;

use super::{
    InMemorySignatureCache, ManualClock, MediaTokenService, SignatureCache, Signer, TokenService,
    TokenServiceConfig,
};

pub(super) const TEST_SECRET: &[u8] = b"test-secret-for-token-engine";
pub(super) const START_MINUTE: i64 = 1_000_000;

pub(super) struct Fixture {
    pub service: TokenService,
    pub media: MediaTokenService,
    pub clock: Arc<ManualClock>,
    pub cache: Arc<InMemorySignatureCache>,
}

pub(super) fn fixture() -> Fixture {
    let signer = Arc::new(Signer::new(TEST_SECRET).unwrap());
    let clock = Arc::new(ManualClock::at_minute(START_MINUTE));
    let cache = Arc::new(InMemorySignatureCache::new(
        100,
        std::time::Duration::from_secs(600),
    ));
    let config = TokenServiceConfig::default();

    let service = TokenService::new(
        signer.clone(),
        cache.clone() as Arc<dyn SignatureCache>,
        clock.clone(),
        config.clone(),
    );
    let media = MediaTokenService::new(signer, clock.clone(), config.media_skew_minutes);

    Fixture {
        service,
        media,
        clock,
        cache,
    }
}

/// Replaces the character at `index` with a different one
pub(super) fn flip_char(s: &str, index: usize) -> String {
    s.char_indices()
        .map(|(i, c)| {
            if i == index {
                if c == 'A' { 'B' } else { 'A' }
            } else {
                c
            }
        })
        .collect()
}
