use crate::error::GeneratorError;
use crate::Generator;
use rand::rngs::OsRng;
use rand::RngCore;
use shortlink_core::link_id::DEFAULT_LENGTH;
use shortlink_core::LinkId;

/// The 62 characters ids are drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Largest multiple of 62 that fits in a byte. Bytes at or above it are
// rejected so every character stays equally likely.
const ACCEPT_BELOW: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

// Give up after this many consecutive refills that produced nothing usable.
const MAX_EMPTY_REFILLS: usize = 32;

/// A source of random bytes.
pub trait EntropySource: Send + Sync + 'static {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

impl EntropySource for OsRng {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

/// Generates fixed-length alphanumeric ids from a cryptographically secure
/// source.
///
/// Each position is an independent, uniform draw over [`ALPHABET`].
#[derive(Debug, Clone)]
pub struct RandomGenerator<S = OsRng> {
    length: usize,
    source: S,
}

impl RandomGenerator<OsRng> {
    /// Creates a generator backed by the operating system's CSPRNG.
    pub fn new(length: usize) -> Result<Self, GeneratorError> {
        Self::with_source(length, OsRng)
    }
}

impl Default for RandomGenerator<OsRng> {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            source: OsRng,
        }
    }
}

impl<S: EntropySource> RandomGenerator<S> {
    pub fn with_source(length: usize, source: S) -> Result<Self, GeneratorError> {
        if length == 0 {
            return Err(GeneratorError::InvalidLength(length));
        }
        Ok(Self { length, source })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl<S: EntropySource> Generator for RandomGenerator<S> {
    fn generate(&self) -> Result<LinkId, GeneratorError> {
        let mut id = String::with_capacity(self.length);
        let mut buf = vec![0u8; self.length * 2];
        let mut empty_refills = 0;

        while id.len() < self.length {
            self.source
                .fill(&mut buf)
                .map_err(|e| GeneratorError::Entropy(e.to_string()))?;

            let before = id.len();
            for &byte in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
                if id.len() == self.length {
                    break;
                }
                id.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
            }

            if id.len() == before {
                empty_refills += 1;
                if empty_refills >= MAX_EMPTY_REFILLS {
                    return Err(GeneratorError::Entropy(
                        "random source produced no usable bytes".to_string(),
                    ));
                }
            } else {
                empty_refills = 0;
            }
        }

        Ok(LinkId::new_unchecked(id))
    }
}
