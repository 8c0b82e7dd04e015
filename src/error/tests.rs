//! Unit tests for error handling

use super::*;

#[cfg(test)]
mod api_error_tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_not_found() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "http://x/a");
        assert_eq!(
            err,
            ApiError::NotFound {
                url: "http://x/a".to_string()
            }
        );
        assert!(err.to_string().contains("Resource not found"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_status_rate_limited() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "http://x/a");
        assert!(matches!(err, ApiError::RateLimited { .. }));
        assert!(err.to_string().contains("Rate limit exceeded"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_status_server_error_is_retryable() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "http://x/a");
        assert_eq!(
            err,
            ApiError::Server {
                status: 502,
                url: "http://x/a".to_string()
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_from_status_other_client_error() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, "http://x/a");
        match &err {
            ApiError::Status { status, reason, .. } => {
                assert_eq!(*status, 403);
                assert_eq!(reason, "Forbidden");
            }
            _ => panic!("Expected Status error variant"),
        }
        assert_eq!(err.to_string(), "HTTP 403: Forbidden (http://x/a)");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_classification() {
        let url = "http://x".to_string();
        assert!(ApiError::Timeout { url: url.clone() }.is_retryable());
        assert!(ApiError::Network {
            url: url.clone(),
            message: "reset".to_string()
        }
        .is_retryable());
        assert!(!ApiError::Decode {
            url: url.clone(),
            message: "bad".to_string()
        }
        .is_retryable());
        assert!(!ApiError::Cancelled { url }.is_retryable());
    }

    #[test]
    fn test_url_accessor() {
        let err = ApiError::Server {
            status: 500,
            url: "http://x/team-batting".to_string(),
        };
        assert_eq!(err.url(), "http://x/team-batting");
    }

    #[tokio::test]
    async fn test_from_reqwest_connection_failure() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let client = reqwest::Client::new();
        let err = client
            .get("http://127.0.0.1:9/nothing")
            .send()
            .await
            .unwrap_err();

        let api_err = ApiError::from_reqwest(&err, "http://127.0.0.1:9/nothing");
        assert!(matches!(api_err, ApiError::Network { .. }));
        assert!(api_err.is_retryable());
    }
}

#[cfg(test)]
mod hanks_tank_error_tests {
    use super::*;

    #[test]
    fn test_api_error_conversion_is_transparent() {
        let api = ApiError::NotFound {
            url: "http://x/a".to_string(),
        };
        let err = HanksTankError::from(api.clone());

        assert_eq!(err.to_string(), api.to_string());
        assert_eq!(err.as_api(), Some(&api));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = HanksTankError::from(json_error);

        match err {
            HanksTankError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_as_api_only_for_request_errors() {
        assert!(HanksTankError::NoData.as_api().is_none());
        let err = HanksTankError::from(ApiError::RateLimited {
            url: "http://x/standings".to_string(),
        });
        assert!(matches!(err.as_api(), Some(ApiError::RateLimited { .. })));
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "twenty".parse::<u16>().unwrap_err();
        let err = HanksTankError::from(parse_error);

        match err {
            HanksTankError::InvalidNumber(_) => (),
            _ => panic!("Expected InvalidNumber error variant"),
        }
    }

    #[test]
    fn test_invalid_season_message() {
        let err = HanksTankError::InvalidSeason {
            season: 1999,
            min: 2015,
            max: 2026,
        };
        assert_eq!(
            err.to_string(),
            "Season 1999 is outside the supported range 2015-2026"
        );
    }

    #[test]
    fn test_not_found_messages() {
        let team = HanksTankError::TeamNotFound {
            name: "Expos".to_string(),
        };
        assert!(team.to_string().contains("Team not found"));
        assert!(team.to_string().contains("Expos"));

        let player = HanksTankError::PlayerNotFound {
            name: "Nobody".to_string(),
        };
        assert!(player.to_string().contains("Player not found"));
    }

    #[test]
    fn test_error_source_chain() {
        let parse_error = "twenty".parse::<u16>().unwrap_err();
        let err = HanksTankError::from(parse_error);

        let error_trait: &dyn std::error::Error = &err;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(HanksTankError::NoData)
        }

        match test_function().unwrap_err() {
            HanksTankError::NoData => (),
            _ => panic!("Expected NoData error"),
        }
    }
}
