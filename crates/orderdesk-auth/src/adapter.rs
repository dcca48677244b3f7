//! Single entry point for request authentication.

use axum::http::HeaderMap;
use tracing::debug;

use orderdesk_config::JwtConfig;

use crate::principal::RequestContext;
use crate::token::extract_credential;
use crate::validator::{PrincipalDirectory, ValidationOutcome, validate_token};

/// Establishes who is making the request.
///
/// Missing credentials give an anonymous context. Invalid credentials give
/// an anonymous context with the rejection reason attached. This function
/// never fails, so a bad token can only ever shrink what a request sees.
pub async fn authenticate<D: PrincipalDirectory>(
    headers: &HeaderMap,
    jwt_config: &JwtConfig,
    directory: &D,
) -> RequestContext {
    let Some(credential) = extract_credential(headers) else {
        return RequestContext::anonymous();
    };

    let source = credential.source;
    match validate_token(credential, jwt_config, directory).await {
        ValidationOutcome::Valid { user, credential } => {
            RequestContext::authenticated(user, credential)
        }
        ValidationOutcome::Invalid(reason) => {
            debug!(
                reason = reason.as_str(),
                source = source.as_str(),
                "Credential rejected, continuing as anonymous"
            );
            RequestContext::rejected(reason)
        }
    }
}
