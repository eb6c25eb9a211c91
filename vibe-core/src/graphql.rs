use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ureq::Agent;

use crate::error::Error;

/// Sends one JSON body to `url` and returns the raw response text.
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &str, body: &Value) -> Result<String, Error>;
}

pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration, proxy_url: Option<&str>) -> Self {
        let mut agent = Agent::config_builder().timeout_global(Some(timeout));
        if let Some(proxy_url) = proxy_url {
            match ureq::Proxy::new(proxy_url) {
                Ok(proxy) => agent = agent.proxy(Some(proxy)),
                Err(err) => log::warn!("ignoring proxy {:?}: {}", proxy_url, err),
            }
        }
        Self {
            agent: agent.build().into(),
        }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<String, Error> {
        let mut response = self
            .agent
            .post(url)
            .header("Accept", "application/json")
            .send_json(body)?;
        Ok(response.body_mut().read_to_string()?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

/// Data that made it back, plus the messages of any errors the server
/// reported next to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub warnings: Vec<String>,
}

impl<T> Fetched<T> {
    pub fn clean(data: T) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            warnings: self.warnings,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Fetched<U>, E> {
        Ok(Fetched {
            data: f(self.data)?,
            warnings: self.warnings,
        })
    }
}

pub struct GraphqlClient {
    endpoint: String,
    transport: Box<dyn Transport>,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs `operation`.  A response with data is a success even when the
    /// server also reported errors, those come back as warnings.  Without
    /// data, the errors become the failure.
    pub fn execute(&self, operation: &Operation) -> Result<Fetched<Value>, Error> {
        log::info!(
            "requesting {} {}",
            operation.operation_name,
            operation.variables
        );
        let body = serde_json::to_value(operation)?;
        let text = self.transport.post_json(&self.endpoint, &body)?;
        let envelope: Envelope =
            serde_json::from_str(&text).map_err(|_| Error::UnexpectedResponse)?;

        for err in &envelope.errors {
            log::warn!(
                "GraphQL error in {}: {} (path: {:?})",
                operation.operation_name,
                err.message,
                err.path
            );
        }
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();

        match envelope.data {
            Some(data) if !data.is_null() => Ok(Fetched {
                data,
                warnings: messages,
            }),
            _ if !messages.is_empty() => Err(Error::Graphql(messages)),
            _ => Err(Error::UnexpectedResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Canned(&'static str);

    impl Transport for Canned {
        fn post_json(&self, _url: &str, body: &Value) -> Result<String, Error> {
            assert_eq!(body["operationName"], "Probe");
            Ok(self.0.to_string())
        }
    }

    fn probe() -> Operation {
        Operation {
            operation_name: "Probe",
            query: "query Probe { probe }",
            variables: json!({}),
        }
    }

    fn run(body: &'static str) -> Result<Fetched<Value>, Error> {
        GraphqlClient::new("http://localhost/graphql", Box::new(Canned(body))).execute(&probe())
    }

    #[test]
    fn data_without_errors_is_clean() {
        let fetched = run(r#"{"data":{"probe":1}}"#).unwrap();
        assert!(fetched.is_clean());
        assert_eq!(fetched.data, json!({"probe": 1}));
    }

    #[test]
    fn data_with_errors_keeps_the_data() {
        let fetched =
            run(r#"{"data":{"probe":1},"errors":[{"message":"partial","path":["probe"]}]}"#)
                .unwrap();
        assert_eq!(fetched.warnings, vec!["partial".to_string()]);
        assert_eq!(fetched.data["probe"], 1);
    }

    #[test]
    fn errors_without_data_fail() {
        assert_eq!(
            run(r#"{"data":null,"errors":[{"message":"boom"},{"message":"bang"}]}"#),
            Err(Error::Graphql(vec!["boom".into(), "bang".into()]))
        );
    }

    #[test]
    fn garbage_is_an_unexpected_response() {
        assert_eq!(run("<html>"), Err(Error::UnexpectedResponse));
        assert_eq!(run(r#"{"data":null}"#), Err(Error::UnexpectedResponse));
    }

    #[test]
    fn operations_serialize_with_camel_case_name() {
        let body = serde_json::to_value(probe()).unwrap();
        assert_eq!(body["operationName"], "Probe");
        assert_eq!(body["variables"], json!({}));
    }
}
