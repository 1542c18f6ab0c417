//! Auth Token Value Object
//!
//! Base64 of a JSON object `{"email", "address", "sid"}`. The token is
//! unsigned: it only names an identity, and every use re-checks the
//! registry and the session store. `sid` pins the token to the session it
//! was issued with; tokens without it are accepted for any active session
//! of the address.

use serde::{Deserialize, Serialize};

use kernel::id::ZkSessionId;
use platform::crypto::{from_base64, to_base64};

use super::{email::Email, sui_address::SuiAddress};
use crate::error::{AuthFailure, ZkLoginResult};

#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    email: Option<String>,
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sid: Option<uuid::Uuid>,
}

/// Decoded token contents, not yet checked against storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub email: Option<String>,
    pub address: SuiAddress,
    pub session_id: Option<ZkSessionId>,
}

/// Encode a token for an identity and its session
pub fn issue_token(
    email: Option<&Email>,
    address: &SuiAddress,
    session_id: Option<ZkSessionId>,
) -> ZkLoginResult<String> {
    let payload = TokenPayload {
        email: email.map(|e| e.as_str().to_string()),
        address: address.as_str().to_string(),
        sid: session_id.map(ZkSessionId::into_uuid),
    };
    let json = serde_json::to_vec(&payload)
        .map_err(|e| crate::error::ZkLoginError::Internal(e.to_string()))?;
    Ok(to_base64(&json))
}

/// Decode a token; any structural problem is `MalformedToken`
pub fn decode_token(token: &str) -> Result<TokenClaims, AuthFailure> {
    let bytes = from_base64(token.trim()).map_err(|_| AuthFailure::MalformedToken)?;
    let payload: TokenPayload =
        serde_json::from_slice(&bytes).map_err(|_| AuthFailure::MalformedToken)?;
    let address = SuiAddress::parse(&payload.address).ok_or(AuthFailure::MalformedToken)?;

    Ok(TokenClaims {
        email: payload.email,
        address,
        session_id: payload.sid.map(ZkSessionId::from_uuid),
    })
}
