use crate::error::StsError;
use crate::jwt::claims::Claims;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

pub struct JwtSerializer {
    algorithm: Algorithm,
}

impl JwtSerializer {
    pub fn new(algorithm: Algorithm) -> Self {
        JwtSerializer { algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn serialize(
        &self,
        claims: &Claims,
        key: &EncodingKey,
        key_id: Option<&str>,
    ) -> Result<String, StsError> {
        let mut header = Header::new(self.algorithm);
        if let Some(kid) = key_id {
            header.kid = Some(kid.to_string());
        }

        let token = encode(&header, claims, key).map_err(|e| StsError::signing(e.to_string()))?;
        if token.split('.').count() != 3 {
            return Err(StsError::signing("encoder produced a malformed token"));
        }
        Ok(token)
    }

    /// Verify signature, expiry and issuer, then return the claims.
    pub fn deserialize(
        &self,
        token: &str,
        key: &DecodingKey,
        issuer: &str,
    ) -> Result<Claims, StsError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<Claims>(token, key, &validation)
            .map_err(|e| StsError::JwtDecodingError(e.to_string()))?;

        Ok(token_data.claims)
    }
}
