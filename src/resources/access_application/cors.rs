//! The `cors_headers` block.

use serde_json::{Value, json};

use crate::client::models::CorsHeaders;
use crate::error::{Result, SchemaError};
use crate::state::ResourceData;

/// Reject CORS settings the service would accept but browsers cannot honour,
/// or that leave the application in a state it cannot be updated out of.
pub fn validate_cors_headers(cors: &CorsHeaders) -> Result<()> {
    let any_origin = cors.allow_all_origins || cors.allowed_origins.iter().any(|o| o == "*");
    if cors.allow_credentials && any_origin {
        return Err(SchemaError::Invalid(
            "CORS credentials are not permitted when all origins are allowed".to_string(),
        )
        .into());
    }

    if (cors.allow_all_origins || cors.allowed_origins.len() > 1)
        && !cors.allow_all_methods
        && cors.allowed_methods.is_empty()
    {
        return Err(
            SchemaError::Invalid("must set allowed_methods or allow_all_methods".to_string())
                .into(),
        );
    }

    if (cors.allow_all_methods || cors.allowed_methods.len() > 1)
        && !cors.allow_all_origins
        && cors.allowed_origins.is_empty()
    {
        return Err(
            SchemaError::Invalid("must set allowed_origins or allow_all_origins".to_string())
                .into(),
        );
    }

    Ok(())
}

/// CORS settings from configuration; `None` when the block is absent.
pub fn expand_cors_headers(d: &ResourceData) -> Result<Option<CorsHeaders>> {
    let Some(cors) = d.block::<CorsHeaders>("cors_headers")? else {
        return Ok(None);
    };
    validate_cors_headers(&cors)?;
    Ok(Some(cors))
}

/// Empty unless the configuration declares the block and the service returned one.
pub fn flatten_cors_headers(d: &ResourceData, cors: Option<&CorsHeaders>) -> Value {
    match (d.get_ok("cors_headers"), cors) {
        (Some(_), Some(cors)) => json!([{
            "allowed_methods": cors.allowed_methods,
            "allowed_origins": cors.allowed_origins,
            "allowed_headers": cors.allowed_headers,
            "allow_all_methods": cors.allow_all_methods,
            "allow_all_origins": cors.allow_all_origins,
            "allow_all_headers": cors.allow_all_headers,
            "allow_credentials": cors.allow_credentials,
            "max_age": cors.max_age,
        }]),
        _ => json!([]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn cors(value: Value) -> CorsHeaders {
        serde_json::from_value(value).unwrap()
    }

    fn data(value: Value) -> ResourceData {
        match value {
            Value::Object(map) => ResourceData::new(map),
            _ => ResourceData::new(Map::new()),
        }
    }

    #[test]
    fn test_credentials_with_any_origin_are_rejected() {
        for value in [
            json!({ "allow_credentials": true, "allow_all_origins": true, "allow_all_methods": true }),
            json!({ "allow_credentials": true, "allowed_origins": ["*"], "allowed_methods": ["GET"] }),
        ] {
            let err = validate_cors_headers(&cors(value)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "CORS credentials are not permitted when all origins are allowed"
            );
        }
    }

    #[test]
    fn test_credentials_with_explicit_origins_are_accepted() {
        let value = json!({
            "allow_credentials": true,
            "allowed_origins": ["https://a.example.com", "https://b.example.com"],
            "allowed_methods": ["GET"],
        });
        assert!(validate_cors_headers(&cors(value)).is_ok());
    }

    #[test]
    fn test_several_origins_require_methods() {
        let value = json!({
            "allowed_origins": ["https://a.example.com", "https://b.example.com"],
        });
        let err = validate_cors_headers(&cors(value)).unwrap_err();
        assert_eq!(err.to_string(), "must set allowed_methods or allow_all_methods");

        let err = validate_cors_headers(&cors(json!({ "allow_all_origins": true }))).unwrap_err();
        assert_eq!(err.to_string(), "must set allowed_methods or allow_all_methods");
    }

    #[test]
    fn test_several_methods_require_origins() {
        let value = json!({ "allowed_methods": ["GET", "POST"] });
        let err = validate_cors_headers(&cors(value)).unwrap_err();
        assert_eq!(err.to_string(), "must set allowed_origins or allow_all_origins");

        let err = validate_cors_headers(&cors(json!({ "allow_all_methods": true }))).unwrap_err();
        assert_eq!(err.to_string(), "must set allowed_origins or allow_all_origins");
    }

    #[test]
    fn test_single_origin_without_methods_is_accepted() {
        let value = json!({ "allowed_origins": ["https://a.example.com"] });
        assert!(validate_cors_headers(&cors(value)).is_ok());
    }

    #[test]
    fn test_expand_absent_and_present() {
        assert!(expand_cors_headers(&data(json!({}))).unwrap().is_none());

        let d = data(json!({
            "cors_headers": [{
                "allowed_methods": ["GET"],
                "allowed_origins": ["https://a.example.com"],
                "allow_all_headers": true,
                "max_age": null,
            }],
        }));
        let cors = expand_cors_headers(&d).unwrap().unwrap();
        assert_eq!(cors.allowed_methods, vec!["GET"]);
        assert!(cors.allow_all_headers);
        assert_eq!(cors.max_age, 0);
    }

    #[test]
    fn test_flatten_is_empty_when_not_configured() {
        let returned = cors(json!({ "allow_all_headers": true }));
        let d = data(json!({}));
        assert_eq!(flatten_cors_headers(&d, Some(&returned)), json!([]));

        let d = data(json!({ "cors_headers": [{ "allow_all_headers": true }] }));
        assert_eq!(flatten_cors_headers(&d, None), json!([]));
        let tree = flatten_cors_headers(&d, Some(&returned));
        assert_eq!(tree[0]["allow_all_headers"], json!(true));
        assert_eq!(tree[0]["allowed_origins"], json!([]));
    }
}
