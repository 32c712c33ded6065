//! Session claim decoding.
//!
//! Mutations that change team membership hand back a reissued auth token.
//! The client only reads the claim set (`sub`, `tms`) out of it; signature
//! verification stays on the server, which is the sole verifier. Navigation
//! decisions that depend on team membership must decode first and decide
//! second, never the other way around.

use crate::{EntityIdType, SessionError, TeamId, UserId};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claim set decoded from a reissued session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated user.
    pub sub: UserId,
    /// Ids of every team the viewer now belongs to.
    #[serde(default)]
    pub tms: Vec<TeamId>,
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub exp: i64,
}

impl SessionClaims {
    /// Whether this is the viewer's first (or only) team. Drives the
    /// welcome flow: first-team joiners land on settings, not the team room.
    pub fn is_first_team(&self) -> bool {
        self.tms.len() <= 1
    }
}

/// Decode the claim set from a reissued session token without verifying the
/// signature. Expiry is not checked either: a token the server just issued
/// is trusted as data, and clock-skewed clients must not drop it.
pub fn decode_session_claims(token: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(b""), &validation)
        .map_err(|e| SessionError::MalformedToken {
            reason: e.to_string(),
        })?;

    if data.claims.sub.as_str().is_empty() {
        return Err(SessionError::MissingClaim {
            claim: "sub".to_string(),
        });
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use proptest::prelude::*;

    fn mint(claims: &SessionClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn decodes_claims_without_knowing_the_secret() {
        let claims = SessionClaims {
            sub: UserId::new("user1"),
            tms: vec![TeamId::new("t1"), TeamId::new("t2")],
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let token = mint(&claims);

        let decoded = decode_session_claims(&token).unwrap();
        assert_eq!(decoded, claims);
        assert!(!decoded.is_first_team());
    }

    #[test]
    fn single_team_claims_mean_first_team() {
        let claims = SessionClaims {
            sub: UserId::new("user1"),
            tms: vec![TeamId::new("t1")],
            iat: 0,
            exp: 0,
        };
        let decoded = decode_session_claims(&mint(&claims)).unwrap();
        assert!(decoded.is_first_team());
    }

    #[test]
    fn garbage_token_is_malformed() {
        let err = decode_session_claims("not-a-jwt").unwrap_err();
        assert!(matches!(err, SessionError::MalformedToken { .. }));
    }

    #[test]
    fn expired_token_still_decodes() {
        // The server just issued it; we read it as data, not as proof.
        let claims = SessionClaims {
            sub: UserId::new("user1"),
            tms: vec![],
            iat: 1000,
            exp: 2000,
        };
        let decoded = decode_session_claims(&mint(&claims)).unwrap();
        assert_eq!(decoded.exp, 2000);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Any claim set survives the mint-then-decode round trip intact.
        #[test]
        fn prop_claims_round_trip(
            sub in "[a-z0-9]{1,12}",
            team_ids in prop::collection::vec("[a-z0-9]{1,8}", 0..6),
            iat in 0i64..2_000_000_000,
            exp in 0i64..2_000_000_000,
        ) {
            let claims = SessionClaims {
                sub: UserId::new(sub),
                tms: team_ids.into_iter().map(TeamId::new).collect(),
                iat,
                exp,
            };
            let decoded = decode_session_claims(&mint(&claims)).unwrap();
            prop_assert_eq!(decoded, claims);
        }
    }
}
