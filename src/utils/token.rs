// ============================================================================
// TOKEN - Validación estructural y decodificación del payload (sin verificar firma)
// ============================================================================
// La firma la valida el backend; aquí solo se lee el claim de usuario.
// ============================================================================

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::TokenError;
use crate::utils::constants::USER_ID_CLAIM;

/// Claims decodificados del payload del token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    claims: Map<String, Value>,
}

impl TokenClaims {
    /// Identificador de usuario (`id_user`), número o string
    pub fn user_id(&self) -> Option<String> {
        claim_as_string(self.claims.get(USER_ID_CLAIM)?)
    }

    pub fn subject(&self) -> Option<String> {
        claim_as_string(self.claims.get("sub")?)
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.get("email")?.as_str()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        timestamp_claim(self.claims.get("exp")?)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        timestamp_claim(self.claims.get("iat")?)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}

/// Comprueba que el token tenga exactamente tres segmentos no vacíos
pub fn validate_structure(token: &str) -> Result<(), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed {
            segments: segments.len(),
        });
    }
    if let Some(index) = segments.iter().position(|s| s.trim().is_empty()) {
        return Err(TokenError::EmptySegment { index });
    }
    Ok(())
}

/// Valida y decodifica el payload del token
pub fn decode_token(token: &str) -> Result<TokenClaims, TokenError> {
    validate_structure(token)?;

    // validate_structure garantiza el segundo segmento
    let payload = token.split('.').nth(1).unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(TokenClaims { claims }),
        Ok(other) => Err(TokenError::Payload(format!(
            "se esperaba un objeto, llegó {}",
            json_kind(&other)
        ))),
        Err(e) => Err(TokenError::Payload(e.to_string())),
    }
}

fn claim_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn timestamp_claim(value: &Value) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.as_i64()?, 0)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    /// Construye un token de tres segmentos con el payload dado
    pub fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload),
            "c2lnbmF0dXJl"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::token_with_payload;
    use super::*;

    #[test]
    fn rejects_wrong_segment_counts() {
        for token in ["", "abc", "a.b", "a.b.c.d", "fake-auth-token"] {
            assert!(
                matches!(validate_structure(token), Err(TokenError::Malformed { .. })),
                "{token:?} debería rechazarse"
            );
        }
    }

    #[test]
    fn rejects_empty_segments() {
        assert_eq!(
            validate_structure("a..c"),
            Err(TokenError::EmptySegment { index: 1 })
        );
    }

    #[test]
    fn numeric_user_claim_becomes_string() {
        let token = token_with_payload(r#"{"id_user":42,"exp":1700000000}"#);
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.user_id().as_deref(), Some("42"));
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn missing_user_claim_is_none() {
        let token = token_with_payload(r#"{"sub":"alice@example.com"}"#);
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.user_id(), None);
        assert_eq!(claims.subject().as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn padded_payload_is_tolerated() {
        let token = token_with_payload(r#"{"id_user":"7"}"#);
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        let claims = decode_token(&parts.join(".")).unwrap();
        assert_eq!(claims.user_id().as_deref(), Some("7"));
    }

    #[test]
    fn undecodable_payloads_are_rejected() {
        assert!(matches!(
            decode_token("aGVhZGVy.!!!.c2ln"),
            Err(TokenError::Encoding(_))
        ));

        let not_json = format!("aGVhZGVy.{}.c2ln", URL_SAFE_NO_PAD.encode("hola"));
        assert!(matches!(decode_token(&not_json), Err(TokenError::Payload(_))));

        let array = token_with_payload("[1,2]");
        assert!(matches!(decode_token(&array), Err(TokenError::Payload(_))));
    }
}
