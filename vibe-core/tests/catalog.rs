// End-to-end flows: controller -> ticket -> Api over a fake transport -> controller.
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use serde_json::{json, Value};
use vibe_core::{
    api::{Api, FetchPolicy, Request},
    config::Config,
    error::Error,
    graphql::Transport,
    model::Model,
    route::Param,
    view::{DetailController, DetailTab, ListController, Status, StatusKind},
};

#[derive(Clone, Default)]
struct FakeServer {
    requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeServer {
    fn api(&self) -> Api {
        Api::with_transport(
            "http://catalog.test/graphql",
            Box::new(self.clone()),
            Duration::from_secs(300),
        )
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn model_json(id: usize, kind: &str) -> Value {
    json!({
        "id": id.to_string(),
        "name": format!("Model {id}"),
        "type": kind,
        "price": 1000 + id,
        "image": null,
        "description": "A guitar."
    })
}

impl Transport for FakeServer {
    fn post_json(&self, _url: &str, body: &Value) -> Result<String, Error> {
        self.requests.lock().unwrap().push(body.clone());
        let vars = &body["variables"];
        let response = match body["operationName"].as_str() {
            Some("GetGuitarBrands") => json!({"data": {"findAllBrands": [
                {"id": "1", "name": "Fender", "image": null},
                {"id": "2", "name": "Gibson", "image": null},
            ]}}),
            Some("GetBrandModels") if vars["brandId"] == "13" => {
                let models: Vec<Value> = (1..=13)
                    .map(|i| model_json(i, if i % 2 == 0 { "Acoustic" } else { "Electric" }))
                    .collect();
                json!({"data": {"searchModels": models}})
            }
            Some("GetBrandModels") if vars["brandId"] == "partial" => json!({
                "data": {"searchModels": [model_json(1, "Bass")]},
                "errors": [{"message": "price unavailable", "path": ["searchModels", 0, "price"]}]
            }),
            Some("GetBrandModels") if vars["brandId"] == "broken" => json!({
                "data": null,
                "errors": [{"message": "brand lookup failed"}]
            }),
            Some("GetBrandModels") => {
                let name = vars["name"].as_str().unwrap_or_default().to_lowercase();
                let models: Vec<Value> = ["Les Paul", "SG", "Flying V"]
                    .iter()
                    .enumerate()
                    .filter(|(_, n)| n.to_lowercase().contains(&name))
                    .map(|(i, n)| json!({"id": i.to_string(), "name": n, "type": "Electric", "price": 0}))
                    .collect();
                json!({"data": {"searchModels": models}})
            }
            Some("GetModelDetails") if vars["modelId"] == "crashing" => json!({
                "data": {"findUniqueModel": null},
                "errors": [{"message": "model resolver crashed", "path": ["findUniqueModel"]}]
            }),
            Some("GetModelDetails") if vars["modelId"] == "missing" => {
                json!({"data": {"findUniqueModel": null}})
            }
            Some("GetModelDetails") => json!({"data": {"findUniqueModel": {
                "id": vars["modelId"],
                "name": "Stratocaster",
                "type": "Electric",
                "price": 1499.5,
                "description": "Classic.",
                "specs": {"bodyWood": "Alder", "neckWood": "Maple", "pickups": "SSS", "scaleLength": null},
                "musicians": [
                    {"name": "Jimi Hendrix"}, {"name": "Eric Clapton"},
                    {"name": "David Gilmour"}, {"name": "Stevie Ray Vaughan"},
                    {"name": "Buddy Guy"}
                ]
            }}}),
            _ => return Err(Error::Status(400)),
        };
        Ok(response.to_string())
    }
}

fn open_models(server: &FakeServer, api: &Api, brand: &str) -> ListController<Model> {
    let config = Config::default();
    let mut list = ListController::models(Some(brand.to_string()), &config);
    let ticket = list.open().expect("brand id is present");
    assert!(list.complete(&ticket, ticket.run(api)));
    assert!(server.request_count() > 0);
    list
}

#[test]
fn thirteen_models_paginate_by_six() {
    let server = FakeServer::default();
    let api = server.api();
    let mut list = open_models(&server, &api, "13");

    let page = list.status().ready().expect("ready");
    assert_eq!(page.info.total_pages, 3);
    assert_eq!(page.items.len(), 6);
    assert!(page.info.shows_controls());

    assert!(list.go_to_page(2));
    let page = list.status().ready().expect("ready");
    let names: Vec<&str> = page.items.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Model 13"]);
    assert!(!page.info.has_next);
    assert_eq!(page.items[0].price_label(), "$1,013");

    assert!(!list.go_to_page(3));
    assert_eq!(list.page(), 2);
}

#[test]
fn type_filter_change_resets_page_without_fetching() {
    let server = FakeServer::default();
    let api = server.api();
    let mut list = open_models(&server, &api, "13");
    let before = server.request_count();

    assert!(list.go_to_page(1));
    assert!(list.set_type_filter("electric"));
    assert_eq!(list.page(), 0);
    assert_eq!(server.request_count(), before);

    let page = list.status().ready().expect("ready");
    assert_eq!(page.info.total_items, 7);
    assert!(page.items.iter().all(|m| m.kind == "Electric"));
}

#[test]
fn narrowing_filter_leaves_last_page_for_first() {
    let server = FakeServer::default();
    let api = server.api();
    let mut list = open_models(&server, &api, "13");
    let before = server.request_count();

    assert!(list.go_to_page(2));
    assert_eq!(list.page(), 2);
    assert!(list.set_type_filter("acoustic"));
    assert_eq!(list.page(), 0);
    assert_eq!(server.request_count(), before);

    let page = list.status().ready().expect("ready");
    assert_eq!(page.info.total_items, 6);
    assert_eq!(page.info.total_pages, 1);
    assert_eq!(page.items.len(), 6);
    assert!(page.window.is_none());
    assert!(!list.next_page());
}

#[test]
fn missing_brand_never_requests() {
    let server = FakeServer::default();
    let config = Config::default();
    let mut list = ListController::models(None, &config);
    assert!(list.open().is_none());
    assert!(list.retry().is_none());
    assert!(matches!(list.status(), Status::MissingParam(Param::BrandId)));
    assert_eq!(server.request_count(), 0);
}

#[test]
fn null_model_is_not_found() {
    let server = FakeServer::default();
    let api = server.api();
    let config = Config::default();
    let mut detail = DetailController::new(Some("1".into()), Some("missing".into()), &config);
    let ticket = detail.open().expect("ids are present");
    detail.complete(&ticket, ticket.run(&api));
    assert_eq!(detail.status().kind(), StatusKind::NotFound);
}

#[test]
fn null_model_with_errors_is_a_failure() {
    let server = FakeServer::default();
    let api = server.api();
    let config = Config::default();
    let mut detail = DetailController::new(Some("1".into()), Some("crashing".into()), &config);
    let ticket = detail.open().expect("ids are present");
    assert!(detail.complete(&ticket, ticket.run(&api)));
    assert_eq!(detail.status().kind(), StatusKind::Failed);

    let retry = detail.retry().expect("failed lookups can be retried");
    assert_eq!(retry.policy, FetchPolicy::NetworkOnly);
    detail.complete(&retry, retry.run(&api));
    assert_eq!(server.request_count(), 2);
    assert_eq!(detail.status().kind(), StatusKind::Failed);
}

#[test]
fn musicians_paginate_by_two() {
    let server = FakeServer::default();
    let api = server.api();
    let config = Config::default();
    let mut detail = DetailController::new(Some("1".into()), Some("7".into()), &config);
    let ticket = detail.open().expect("ids are present");
    detail.complete(&ticket, ticket.run(&api));
    detail.set_tab(DetailTab::Musicians);

    assert!(detail.go_to_musicians_page(2));
    let view = detail.status().ready().expect("ready");
    assert_eq!(view.tab, DetailTab::Musicians);
    assert_eq!(view.info.total_pages, 3);
    assert_eq!(view.musicians.len(), 1);
    assert_eq!(view.musicians[0].name, "Buddy Guy");
    assert_eq!(view.model.price_label(), "$1,499.5");
    let specs = view.model.specs.as_ref().expect("specs");
    assert_eq!(specs.rows()[3], ("Scale Length", "-"));
}

#[test]
fn debounced_search_fires_one_request() {
    let server = FakeServer::default();
    let api = server.api();
    let mut list = open_models(&server, &api, "2");
    let before = server.request_count();

    let t0 = Instant::now();
    list.update_search("l", t0);
    list.update_search("le", t0 + Duration::from_millis(50));
    list.update_search("les", t0 + Duration::from_millis(100));
    assert!(list.poll_search(t0 + Duration::from_millis(399)).is_none());
    let ticket = list
        .poll_search(t0 + Duration::from_millis(400))
        .expect("term settled");
    assert!(list.complete(&ticket, ticket.run(&api)));

    assert_eq!(server.request_count(), before + 1);
    let page = list.status().ready().expect("ready");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Les Paul");
    assert_eq!(page.items[0].price_label(), "Price not available");
}

#[test]
fn last_request_wins() {
    let server = FakeServer::default();
    let api = server.api();
    let config = Config::default();
    let mut list = ListController::models(Some("2".into()), &config);

    let stale = list.open().expect("brand id is present");
    let t0 = Instant::now();
    list.update_search("sg", t0);
    let fresh = list.poll_search(t0 + config.search_debounce()).expect("settled");

    // Responses arrive out of order.
    let fresh_result = fresh.run(&api);
    let stale_result = stale.run(&api);
    assert!(list.complete(&fresh, fresh_result));
    assert!(!list.complete(&stale, stale_result));

    let page = list.status().ready().expect("ready");
    let names: Vec<&str> = page.items.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["SG"]);
}

#[test]
fn retry_bypasses_the_cache() {
    let server = FakeServer::default();
    let api = server.api();
    let config = Config::default();
    let mut list = ListController::models(Some("broken".into()), &config);
    let ticket = list.open().expect("brand id is present");
    list.complete(&ticket, ticket.run(&api));
    match list.status() {
        Status::Failed(err) => assert_eq!(err.to_string(), "brand lookup failed"),
        other => panic!("expected failure, got {:?}", other.kind()),
    }

    let retry = list.retry().expect("failed requests can be retried");
    assert_eq!(retry.policy, FetchPolicy::NetworkOnly);
    assert_eq!(
        retry.request,
        Request::Models {
            brand_id: "broken".into(),
            name: String::new()
        }
    );
    let before = server.request_count();
    list.complete(&retry, retry.run(&api));
    assert_eq!(server.request_count(), before + 1);
}

#[test]
fn partial_errors_render_with_a_warning() {
    let server = FakeServer::default();
    let api = server.api();
    let list = open_models(&server, &api, "partial");
    let page = list.status().ready().expect("data is present");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.warnings, ["price unavailable".to_string()]);
}

#[test]
fn brands_come_from_the_cache_the_second_time() {
    let server = FakeServer::default();
    let api = server.api();
    let config = Config::default();
    for _ in 0..2 {
        let mut brands = ListController::brands(&config);
        let ticket = brands.open().expect("brands need no params");
        brands.complete(&ticket, ticket.run(&api));
        assert_eq!(brands.status().ready().expect("ready").items.len(), 2);
    }
    assert_eq!(server.request_count(), 1);
}
