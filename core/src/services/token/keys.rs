//! Signing key material for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::TokenError;

/// Where the key material came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Shared HMAC secret
    Secret,
    /// PEM strings supplied in memory
    Pem,
    /// PEM files on disk
    Files {
        private_key_path: PathBuf,
        public_key_path: PathBuf,
    },
}

/// Algorithm together with the matching signing and verification keys.
///
/// Immutable once built; the codec never mixes an algorithm with a key of a
/// different family.
#[derive(Clone)]
pub struct SigningKeys {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    source: KeySource,
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("algorithm", &self.algorithm)
            .field("source", &self.source)
            .finish()
    }
}

impl SigningKeys {
    /// Creates HMAC keys from a shared secret
    ///
    /// # Arguments
    ///
    /// * `algorithm` - One of `HS256`, `HS384`, `HS512`
    /// * `secret` - Shared secret, must not be empty
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKeys)` - Keys ready for signing and verification
    /// * `Err(TokenError)` - Non-HMAC algorithm or empty secret
    pub fn hmac(algorithm: Algorithm, secret: &[u8]) -> Result<Self, TokenError> {
        if !is_hmac(algorithm) {
            return Err(unsupported(algorithm));
        }
        if secret.is_empty() {
            return Err(TokenError::KeyLoadError {
                message: "HMAC secret must not be empty".to_string(),
            });
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            source: KeySource::Secret,
        })
    }

    /// Creates RSA keys from PEM-encoded strings
    ///
    /// # Arguments
    ///
    /// * `algorithm` - One of `RS256/384/512` or `PS256/384/512`
    /// * `private_key_pem` - PKCS#1 or PKCS#8 private key
    /// * `public_key_pem` - SubjectPublicKeyInfo or PKCS#1 public key
    pub fn rsa_from_pem(
        algorithm: Algorithm,
        private_key_pem: &[u8],
        public_key_pem: &[u8],
    ) -> Result<Self, TokenError> {
        if !is_rsa(algorithm) {
            return Err(unsupported(algorithm));
        }

        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| {
            TokenError::KeyLoadError {
                message: format!("Invalid private key format: {}", e),
            }
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            TokenError::KeyLoadError {
                message: format!("Invalid public key format: {}", e),
            }
        })?;

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            source: KeySource::Pem,
        })
    }

    /// Creates RSA keys from PEM files
    pub fn rsa_from_files<P: AsRef<Path>>(
        algorithm: Algorithm,
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, TokenError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = fs::read(&private_key_path).map_err(|e| TokenError::KeyLoadError {
            message: format!("Failed to read private key {}: {}", private_key_path.display(), e),
        })?;

        let public_key_pem = fs::read(&public_key_path).map_err(|e| TokenError::KeyLoadError {
            message: format!("Failed to read public key {}: {}", public_key_path.display(), e),
        })?;

        let mut keys = Self::rsa_from_pem(algorithm, &private_key_pem, &public_key_pem)?;
        keys.source = KeySource::Files {
            private_key_path,
            public_key_path,
        };
        Ok(keys)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn source(&self) -> &KeySource {
        &self.source
    }
}

/// Parses an algorithm name such as `"HS256"` (case-insensitive)
pub fn parse_algorithm(name: &str) -> Result<Algorithm, TokenError> {
    let algorithm = name
        .trim()
        .to_ascii_uppercase()
        .parse::<Algorithm>()
        .map_err(|_| TokenError::UnsupportedAlgorithm {
            algorithm: name.to_string(),
        })?;

    if is_hmac(algorithm) || is_rsa(algorithm) {
        Ok(algorithm)
    } else {
        Err(unsupported(algorithm))
    }
}

pub fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

pub fn is_rsa(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512
    )
}

fn unsupported(algorithm: Algorithm) -> TokenError {
    TokenError::UnsupportedAlgorithm {
        algorithm: format!("{:?}", algorithm),
    }
}
