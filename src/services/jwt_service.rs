use std::fs;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::user::Claims;

pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Failed to read service account key {path}: {message}")]
    Credentials { path: String, message: String },
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// The fields of a Google service account key file that the token exchange needs.
#[derive(Deserialize, Debug, Clone)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &str) -> Result<Self, JwtError> {
        let credentials_error = |message: String| JwtError::Credentials {
            path: path.to_string(),
            message,
        };

        let contents = fs::read_to_string(path).map_err(|e| credentials_error(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| credentials_error(e.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ServiceAccountClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

// Signs the RS256 assertion exchanged at the token URI for an OAuth access token.
pub fn create_service_assertion(
    key: &ServiceAccountKey,
    issued_at: DateTime<Utc>,
) -> Result<String, JwtError> {
    let claims = ServiceAccountClaims {
        iss: key.client_email.clone(),
        scope: FCM_SCOPE.to_string(),
        aud: key.token_uri.clone(),
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    let token = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?;
    Ok(token)
}

// Validates a trigger token signed with the shared secret and returns its subject.
pub fn validate_token(token: &str, secret: &str) -> Option<String> {
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation) {
        Ok(data) => Some(data.claims.sub),
        Err(_) => None,
    }
}
