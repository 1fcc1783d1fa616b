//! HTTP client for the DataLab search-trends endpoint
//!
//! One fetch is one POST carrying a date range, the keyword groups, and a
//! single filter combination. The fetcher handles the wire contract only:
//! credential headers, JSON body, explicit timeout, and the error taxonomy.
//! It never retries and never paces; request scheduling belongs to the
//! caller (see [`TrendCollector`]).
//!
//! [`TrendCollector`]: crate::collector::TrendCollector

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::collector::normalize::{normalize, Normalized};
use crate::error::FetchError;
use crate::models::{DateRange, FilterCombination, KeywordGroup};

/// Production API origin
pub const DATALAB_ENDPOINT: &str = "https://openapi.naver.com";

const SEARCH_PATH: &str = "/v1/datalab/search";
const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// API key pair issued by the Naver developer console
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// DataLab search API fetcher
pub struct DataLabFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Credential headers attached to every request
    credentials: Credentials,

    /// Origin to send requests to; overridable for mock servers in tests
    base_url: String,
}

impl DataLabFetcher {
    /// Create a new fetcher with the default 30 second timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(credentials: Credentials) -> Result<Self, FetchError> {
        Self::with_config(credentials, Duration::from_secs(30))
    }

    /// Create a new fetcher with a custom request timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_config(credentials: Credentials, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        Ok(Self {
            client,
            credentials,
            base_url: DATALAB_ENDPOINT.to_string(),
        })
    }

    /// Override the request origin, e.g. for a mock server
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Issue one request and normalize its response into trend rows
    ///
    /// Returns `Ok(None)` when the service answered but no keyword group
    /// carried any data points under this combination.
    ///
    /// # Errors
    ///
    /// * `FetchError::Timeout` - the request exceeded the configured timeout
    /// * `FetchError::Http` - any other transport failure
    /// * `FetchError::Status` - the service returned a non-2xx status
    /// * `FetchError::Payload` - the response body was not the expected JSON
    pub async fn fetch(
        &self,
        range: &DateRange,
        groups: &[KeywordGroup],
        combination: &FilterCombination,
    ) -> Result<Option<Normalized>, FetchError> {
        let request = SearchRequest {
            start_date: range.start.format("%Y-%m-%d").to_string(),
            end_date: range.end.format("%Y-%m-%d").to_string(),
            time_unit: "date",
            keyword_groups: groups
                .iter()
                .map(|g| WireGroup {
                    group_name: &g.name,
                    keywords: &g.keywords,
                })
                .collect(),
            device: combination.device.as_param(),
            ages: combination.age.codes(),
            gender: combination.gender.as_param(),
        };

        let url = format!("{}{}", self.base_url, SEARCH_PATH);

        let response = self
            .client
            .post(&url)
            .header(CLIENT_ID_HEADER, &self.credentials.client_id)
            .header(CLIENT_SECRET_HEADER, &self.credentials.client_secret)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Payload(e.to_string()))?;

        Ok(normalize(&parsed.results, combination))
    }
}

fn map_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(err)
    }
}

/// Request body for the search endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    start_date: String,
    end_date: String,
    time_unit: &'static str,
    keyword_groups: Vec<WireGroup<'a>>,
    device: &'a str,
    ages: &'a [String],
    gender: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGroup<'a> {
    group_name: &'a str,
    keywords: &'a [String],
}

/// Response body: one series per keyword group
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<GroupSeries>,
}

/// One keyword group's sparse time series
///
/// A group absent from the response and a group with an empty `data` list
/// both mean "no data for that filter"; `data` defaults to empty so the
/// two cases collapse.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSeries {
    pub title: String,

    #[serde(default)]
    pub data: Vec<SeriesPoint>,
}

/// One (date, value) observation
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesPoint {
    pub period: NaiveDate,
    pub ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        }
    }

    #[test]
    fn test_fetcher_creation() {
        assert!(DataLabFetcher::new(credentials()).is_ok());
        assert!(DataLabFetcher::with_config(credentials(), Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let fetcher = DataLabFetcher::new(credentials())
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(fetcher.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_request_body_wire_format() {
        let groups = vec![KeywordGroup::new("museum", vec!["국립중앙박물관".to_string()])];
        let combination = FilterCombination::for_gender(crate::models::Gender::Male);

        let request = SearchRequest {
            start_date: "2021-01-01".to_string(),
            end_date: "2021-01-31".to_string(),
            time_unit: "date",
            keyword_groups: groups
                .iter()
                .map(|g| WireGroup {
                    group_name: &g.name,
                    keywords: &g.keywords,
                })
                .collect(),
            device: combination.device.as_param(),
            ages: combination.age.codes(),
            gender: combination.gender.as_param(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["startDate"], "2021-01-01");
        assert_eq!(json["timeUnit"], "date");
        assert_eq!(json["keywordGroups"][0]["groupName"], "museum");
        assert_eq!(json["device"], "");
        assert_eq!(json["gender"], "m");
        assert_eq!(json["ages"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_response_parse_with_sparse_data() {
        let body = r#"{
            "startDate": "2021-01-01",
            "endDate": "2021-01-03",
            "timeUnit": "date",
            "results": [
                {
                    "title": "museum",
                    "keywords": ["국립중앙박물관"],
                    "data": [
                        {"period": "2021-01-01", "ratio": 41.2},
                        {"period": "2021-01-03", "ratio": 100.0}
                    ]
                },
                {"title": "goods", "keywords": ["뮷즈"], "data": []}
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "museum");
        assert_eq!(parsed.results[0].data.len(), 2);
        assert_eq!(
            parsed.results[0].data[0].period,
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
        );
        assert!(parsed.results[1].data.is_empty());
    }

    #[test]
    fn test_response_parse_missing_data_field() {
        let body = r#"{"results": [{"title": "museum"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.results[0].data.is_empty());
    }
}
