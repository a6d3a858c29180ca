use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt;
use std::sync::LazyLock;
use subtle::ConstantTimeEq;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];
const ARGON2_PREFIXES: [&str; 3] = ["$argon2id$", "$argon2i$", "$argon2d$"];

/// Hash algorithm of a stored credential, identified by its PHC prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Bcrypt,
    Argon2,
}

/// A stored password, classified once when the user record is read.
///
/// Older rows hold the password verbatim. They keep working until they are
/// re-hashed, but are never compared against a hash routine (and a hash is
/// never compared as a plain string).
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Plaintext(String),
    Hashed { scheme: HashScheme, hash: String },
}

impl Credential {
    /// Classify a stored value by its prefix.
    pub fn parse(stored: &str) -> Self {
        let scheme = if BCRYPT_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            Some(HashScheme::Bcrypt)
        } else if ARGON2_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            Some(HashScheme::Argon2)
        } else {
            None
        };

        match scheme {
            Some(scheme) => Credential::Hashed {
                scheme,
                hash: stored.to_string(),
            },
            None => Credential::Plaintext(stored.to_string()),
        }
    }

    /// Check a submitted password. A malformed hash never matches.
    pub fn verify(&self, submitted: &str) -> bool {
        match self {
            Credential::Plaintext(expected) => {
                expected.as_bytes().ct_eq(submitted.as_bytes()).into()
            }
            Credential::Hashed {
                scheme: HashScheme::Bcrypt,
                hash,
            } => bcrypt::verify(submitted, hash).unwrap_or_else(|e| {
                tracing::warn!("Stored bcrypt hash is unreadable: {}", e);
                false
            }),
            Credential::Hashed {
                scheme: HashScheme::Argon2,
                hash,
            } => match PasswordHash::new(hash) {
                Ok(parsed) => Argon2::default()
                    .verify_password(submitted.as_bytes(), &parsed)
                    .is_ok(),
                Err(e) => {
                    tracing::warn!("Stored argon2 hash is unreadable: {}", e);
                    false
                }
            },
        }
    }

    pub fn is_plaintext(&self) -> bool {
        matches!(self, Credential::Plaintext(_))
    }
}

// Never print the stored secret, even in debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Plaintext(_) => f.write_str("Credential::Plaintext(..)"),
            Credential::Hashed { scheme, .. } => write!(f, "Credential::Hashed({:?})", scheme),
        }
    }
}

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

static DUMMY_CREDENTIAL: LazyLock<Option<Credential>> = LazyLock::new(|| {
    hash_password("portfolio-dummy-credential")
        .map(|hash| Credential::parse(&hash))
        .map_err(|e| tracing::warn!("Failed to prepare dummy credential: {}", e))
        .ok()
});

/// Build the dummy credential ahead of the first login.
///
/// Returns false when the hash could not be produced, in which case unknown
/// emails are rejected without the matching verification cost.
pub fn prepare_dummy_credential() -> bool {
    LazyLock::force(&DUMMY_CREDENTIAL).is_some()
}

/// Spend the same work as a real argon2 verification and discard the result.
///
/// Used when the login email is unknown so that the response time does not
/// reveal which emails are registered.
pub fn verify_dummy_password(submitted: &str) {
    if let Some(credential) = DUMMY_CREDENTIAL.as_ref() {
        let _ = credential.verify(submitted);
    }
}
