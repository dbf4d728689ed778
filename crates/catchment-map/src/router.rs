//! Dispatches classified search input to the outlet API.

use catchment_client::{ClientError, OutletClient};
use catchment_core::{classify, Outlet, QueryIntent};
use serde::Serialize;

/// A titled result list ready for the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub intent: &'static str,
    pub title: String,
    pub outlets: Vec<Outlet>,
}

/// Classify `input` and run the matching request.
///
/// `Ok(None)` means no request was issued: blank input, or a location query
/// the location could not be extracted from.
///
/// # Errors
///
/// Propagates the [`ClientError`] of the one request that was made.
pub async fn route(
    client: &OutletClient,
    input: &str,
) -> Result<Option<SearchResults>, ClientError> {
    let Some(intent) = classify(input) else {
        tracing::debug!(query = input, "search input produced no request");
        return Ok(None);
    };
    dispatch(client, intent).await.map(Some)
}

/// Run the request for an already-classified intent.
///
/// # Errors
///
/// Propagates the [`ClientError`] from the outlet API.
pub async fn dispatch(
    client: &OutletClient,
    intent: QueryIntent,
) -> Result<SearchResults, ClientError> {
    match intent {
        QueryIntent::LatestClosing => Ok(SearchResults {
            intent: "latest_closing",
            title: "Outlets that close the latest".to_string(),
            outlets: client.latest_closing().await?,
        }),
        QueryIntent::CountByLocation { location } => {
            let summary = client.location(&location).await?;
            Ok(SearchResults {
                intent: "count_by_location",
                title: format!("Found {} outlets in {location}", summary.count),
                outlets: summary.outlets,
            })
        }
        QueryIntent::FreeText { query } => {
            let outlets = client.search(&query).await?;
            Ok(SearchResults {
                intent: "free_text",
                title: format!("Search results for \"{query}\""),
                outlets,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn servers() -> (MockServer, MockServer, OutletClient) {
        let api = MockServer::start().await;
        let site = MockServer::start().await;
        let client = OutletClient::via_site(&api.uri(), &site.uri(), 5, "catchment-test/0.1")
            .expect("client construction should not fail");
        (api, site, client)
    }

    #[tokio::test]
    async fn location_query_hits_location_endpoint_only() {
        let (_api, site, client) = servers().await;

        Mock::given(method("GET"))
            .and(path("/api/location/Cheras"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "location": "Cheras",
                "count": 1,
                "outlets": [{"id": 4, "name": "Subway Cheras Sentral"}]
            })))
            .expect(1)
            .mount(&site)
            .await;
        Mock::given(method("GET"))
            .and(path_regex("^/api/search/.*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&site)
            .await;

        let results = route(&client, "how many outlets in Cheras")
            .await
            .expect("request succeeds")
            .expect("request issued");
        assert_eq!(results.intent, "count_by_location");
        assert_eq!(results.title, "Found 1 outlets in Cheras");
        assert_eq!(results.outlets.len(), 1);
    }

    #[tokio::test]
    async fn unrecognised_query_is_searched_verbatim() {
        let (_api, site, client) = servers().await;

        Mock::given(method("GET"))
            .and(path("/api/search/Find%20me%20a%20Subway"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&site)
            .await;

        let results = route(&client, "Find me a Subway")
            .await
            .expect("request succeeds")
            .expect("request issued");
        assert_eq!(results.title, "Search results for \"Find me a Subway\"");
        assert!(results.outlets.is_empty());
    }

    #[tokio::test]
    async fn latest_closing_query_goes_to_backend() {
        let (api, site, client) = servers().await;

        Mock::given(method("GET"))
            .and(path("/outlets/latest-closing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 8, "name": "Subway KLIA2", "operating_hours": "24 hours"}
            ])))
            .expect(1)
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&site)
            .await;

        let results = route(&client, "which outlets close late?")
            .await
            .expect("request succeeds")
            .expect("request issued");
        assert_eq!(results.title, "Outlets that close the latest");
        assert_eq!(results.outlets[0].id, 8);
    }

    #[tokio::test]
    async fn failed_location_extraction_issues_no_request() {
        let (api, site, client) = servers().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&api)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&site)
            .await;

        let outcome = route(&client, "how many outlets").await.expect("no error");
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn upstream_failure_is_returned() {
        let (_api, site, client) = servers().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&site)
            .await;

        let err = route(&client, "Bangsar").await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedStatus { status: 503, .. }));
    }
}
