//! Reference authorizers.

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::task::ports::access::{AccessDenied, Action, Authorizer, Resource};

/// Authorizer that permits every action. The default for tests and for
/// deployments that enforce access upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllAuthorizer;

#[async_trait]
impl Authorizer for AllowAllAuthorizer {
    async fn authorize(
        &self,
        _ctx: &RequestContext,
        _resource: Resource,
        _action: Action,
    ) -> Result<(), AccessDenied> {
        Ok(())
    }
}

/// Authorizer that denies every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllAuthorizer;

#[async_trait]
impl Authorizer for DenyAllAuthorizer {
    async fn authorize(
        &self,
        _ctx: &RequestContext,
        resource: Resource,
        action: Action,
    ) -> Result<(), AccessDenied> {
        Err(AccessDenied { resource, action })
    }
}
