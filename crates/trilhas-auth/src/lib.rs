pub mod claims;
pub mod context;
pub mod credential;
pub mod error;
pub mod jwt;
pub mod principal;
pub mod resolver;
pub mod session;
pub mod token;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use claims::SessionClaims;
pub use context::SecurityContext;
pub use credential::{Credential, CredentialExtractor, CredentialSource};
pub use error::AuthError;
pub use jwt::{create_session_token, verify_token};
pub use principal::Principal;
pub use resolver::SessionResolver;
pub use session::{Session, SessionStore, SessionStoreError};
pub use token::{JwtTokenValidator, TokenValidator};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemorySessionStore;
