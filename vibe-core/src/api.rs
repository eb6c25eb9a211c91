use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    cache::QueryCache,
    config::Config,
    error::Error,
    graphql::{Fetched, GraphqlClient, HttpTransport, Operation, Transport},
    model::{Brand, Model},
};

const GET_GUITAR_BRANDS: &str = "\
query GetGuitarBrands {
  findAllBrands {
    id
    name
    image
  }
}";

const GET_BRAND_MODELS: &str = "\
query GetBrandModels($brandId: String!, $name: String!) {
  searchModels(brandId: $brandId, name: $name) {
    id
    name
    type
    price
    image
    description
  }
}";

const GET_MODEL_DETAILS: &str = "\
query GetModelDetails($brandId: ID!, $modelId: ID!) {
  findUniqueModel(brandId: $brandId, modelId: $modelId) {
    id
    name
    description
    type
    price
    image
    specs {
      bodyWood
      neckWood
      pickups
      scaleLength
    }
    musicians {
      name
    }
  }
}";

/// One catalog query, with its variables.  Also the cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Request {
    Brands,
    /// An empty `name` matches every model of the brand.
    Models {
        brand_id: String,
        name: String,
    },
    Model {
        brand_id: String,
        model_id: String,
    },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Brands => Operation {
                operation_name: "GetGuitarBrands",
                query: GET_GUITAR_BRANDS,
                variables: json!({}),
            },
            Self::Models { brand_id, name } => Operation {
                operation_name: "GetBrandModels",
                query: GET_BRAND_MODELS,
                variables: json!({ "brandId": brand_id, "name": name }),
            },
            Self::Model { brand_id, model_id } => Operation {
                operation_name: "GetModelDetails",
                query: GET_MODEL_DETAILS,
                variables: json!({ "brandId": brand_id, "modelId": model_id }),
            },
        }
    }

    /// The top-level field of `data` holding the result.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Brands => "findAllBrands",
            Self::Models { .. } => "searchModels",
            Self::Model { .. } => "findUniqueModel",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FetchPolicy {
    CacheFirst,
    NetworkOnly,
}

pub struct Api {
    client: GraphqlClient,
    cache: QueryCache<Request, Value>,
}

impl Api {
    pub fn new(config: &Config) -> Self {
        let proxy = config.proxy();
        let transport = HttpTransport::new(config.request_timeout(), proxy.as_deref());
        Self::with_transport(&config.endpoint, Box::new(transport), config.cache_ttl())
    }

    pub fn with_transport(
        endpoint: &str,
        transport: Box<dyn Transport>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            client: GraphqlClient::new(endpoint, transport),
            cache: QueryCache::new(QueryCache::<Request, Value>::DEFAULT_CAPACITY, cache_ttl),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Raw `data` of `request`.  Only responses without errors are cached, so
    /// a partial result is always fetched again.
    pub fn fetch(&self, request: &Request, policy: FetchPolicy) -> Result<Fetched<Value>, Error> {
        if policy == FetchPolicy::CacheFirst {
            if let Some(data) = self.cache.get(request) {
                log::debug!("cache hit for {:?}", request);
                return Ok(Fetched::clean(data));
            }
        }
        let fetched = self.client.execute(&request.operation())?;
        if fetched.is_clean() {
            self.cache.insert(request.clone(), fetched.data.clone());
        }
        Ok(fetched)
    }

    /// Fetches `request` and decodes its result field.  A null or missing
    /// field decodes to `T::default()`, an empty list or `None`.
    pub fn load<T: DeserializeOwned + Default>(
        &self,
        request: &Request,
        policy: FetchPolicy,
    ) -> Result<Fetched<T>, Error> {
        self.fetch(request, policy)?.try_map(|data| {
            match data.get(request.field()) {
                None | Some(Value::Null) => Ok(T::default()),
                Some(value) => T::deserialize(value).map_err(|err| {
                    log::error!("failed to decode {}: {}", request.field(), err);
                    Error::UnexpectedResponse
                }),
            }
        })
    }

    pub fn find_all_brands(&self, policy: FetchPolicy) -> Result<Fetched<Vec<Brand>>, Error> {
        self.load(&Request::Brands, policy)
    }

    pub fn search_models(
        &self,
        brand_id: &str,
        name: &str,
        policy: FetchPolicy,
    ) -> Result<Fetched<Vec<Model>>, Error> {
        let request = Request::Models {
            brand_id: brand_id.to_string(),
            name: name.to_string(),
        };
        self.load(&request, policy)
    }

    pub fn find_unique_model(
        &self,
        brand_id: &str,
        model_id: &str,
        policy: FetchPolicy,
    ) -> Result<Fetched<Option<Model>>, Error> {
        let request = Request::Model {
            brand_id: brand_id.to_string(),
            model_id: model_id.to_string(),
        };
        self.load(&request, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct Counting {
        calls: Arc<AtomicUsize>,
        body: &'static str,
    }

    impl Transport for Counting {
        fn post_json(&self, _url: &str, _body: &Value) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.to_string())
        }
    }

    fn api(body: &'static str) -> (Api, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let transport = Counting {
            calls: calls.clone(),
            body,
        };
        let api = Api::with_transport(
            "http://localhost/graphql",
            Box::new(transport),
            Duration::from_secs(300),
        );
        (api, calls)
    }

    #[test]
    fn variables_follow_the_operation() {
        let op = Request::Models {
            brand_id: "3".into(),
            name: "strat".into(),
        }
        .operation();
        assert_eq!(op.operation_name, "GetBrandModels");
        assert_eq!(op.variables, json!({"brandId": "3", "name": "strat"}));
        assert!(op.query.contains("searchModels(brandId: $brandId, name: $name)"));
    }

    #[test]
    fn cache_first_reuses_clean_responses() {
        let (api, calls) = api(r#"{"data":{"findAllBrands":[{"id":"1","name":"Fender","image":null}]}}"#);
        let first = api.find_all_brands(FetchPolicy::CacheFirst).unwrap();
        let second = api.find_all_brands(FetchPolicy::CacheFirst).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.data[0].name, "Fender");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        api.find_all_brands(FetchPolicy::NetworkOnly).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn partial_responses_are_not_cached() {
        let (api, calls) = api(
            r#"{"data":{"findAllBrands":[]},"errors":[{"message":"image resolver failed"}]}"#,
        );
        let fetched = api.find_all_brands(FetchPolicy::CacheFirst).unwrap();
        assert_eq!(fetched.warnings, vec!["image resolver failed".to_string()]);
        api.find_all_brands(FetchPolicy::CacheFirst).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn null_model_decodes_to_none() {
        let (api, _) = api(r#"{"data":{"findUniqueModel":null}}"#);
        let fetched = api
            .find_unique_model("1", "404", FetchPolicy::CacheFirst)
            .unwrap();
        assert_eq!(fetched.data, None);
    }

    #[test]
    fn mistyped_field_is_an_unexpected_response() {
        let (api, _) = api(r#"{"data":{"searchModels":"nope"}}"#);
        assert_eq!(
            api.search_models("1", "", FetchPolicy::CacheFirst),
            Err(Error::UnexpectedResponse)
        );
    }
}
