//! Request-scoped security context.
//!
//! A [`SecurityContext`] is created per request (or per background job) and
//! passed along explicitly. Clones share the same slot, so the principal
//! bound by the authentication middleware is visible to every handler and
//! audited operation of that request, and to nothing else.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;
use trilhas_models::UserId;

use crate::principal::Principal;

#[derive(Clone, Default)]
pub struct SecurityContext {
    principal: Arc<OnceLock<Principal>>,
}

impl SecurityContext {
    /// An empty context with no principal bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context already carrying `principal`, for work that runs outside
    /// the HTTP pipeline on behalf of a known user.
    pub fn with_principal(principal: Principal) -> Self {
        let ctx = Self::new();
        ctx.bind(principal);
        ctx
    }

    /// Binds `principal` unless one is already bound.
    ///
    /// Returns `true` if this call performed the binding. The first binding
    /// wins for the lifetime of the context.
    pub fn bind(&self, principal: Principal) -> bool {
        match self.principal.set(principal) {
            Ok(()) => true,
            Err(rejected) => {
                debug!(
                    rejected_user_id = %rejected.user_id,
                    "Security context already bound; keeping existing principal"
                );
                false
            }
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.get().is_some()
    }

    /// The bound principal's user id, if any.
    pub fn actor_id(&self) -> Option<UserId> {
        self.principal.get().map(|p| p.user_id)
    }
}

impl fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityContext")
            .field("actor_id", &self.actor_id())
            .finish()
    }
}
