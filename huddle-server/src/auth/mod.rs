mod verifier;

pub use verifier::{AuthError, Claims, IdentityVerifier, JwtVerifier, VerifiedIdentity};
