use std::sync::Arc;

use druid::{Data, Lens};
use vibe_core::route::Route;

#[derive(Clone, Debug, Data, PartialEq, Eq, Hash)]
pub enum Nav {
    Home,
    BrandModels(BrandLink),
    ModelDetail(ModelLink),
}

/// A brand as far as navigation knows it.  The id can be missing when the
/// location came from a malformed path, the name when it came from any path.
#[derive(Clone, Debug, Default, Data, Lens, PartialEq, Eq, Hash)]
pub struct BrandLink {
    pub id: Option<Arc<str>>,
    pub name: Option<Arc<str>>,
}

impl BrandLink {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }
}

#[derive(Clone, Debug, Data, Lens, PartialEq, Eq, Hash)]
pub struct ModelLink {
    pub brand: BrandLink,
    pub id: Option<Arc<str>>,
    pub name: Option<Arc<str>>,
}

impl ModelLink {
    pub fn new(brand: BrandLink, id: &str, name: &str) -> Self {
        Self {
            brand,
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }
}

pub fn owned_id(id: &Option<Arc<str>>) -> Option<String> {
    id.as_deref().map(str::to_string)
}

impl Nav {
    pub fn from_route(route: Route) -> Self {
        match route {
            Route::Home => Nav::Home,
            Route::BrandModels { brand_id } => Nav::BrandModels(BrandLink {
                id: brand_id.map(Into::into),
                name: None,
            }),
            Route::ModelDetail { brand_id, model_id } => Nav::ModelDetail(ModelLink {
                brand: BrandLink {
                    id: brand_id.map(Into::into),
                    name: None,
                },
                id: model_id.map(Into::into),
                name: None,
            }),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Nav::Home => Route::Home,
            Nav::BrandModels(link) => Route::BrandModels {
                brand_id: owned_id(&link.id),
            },
            Nav::ModelDetail(link) => Route::ModelDetail {
                brand_id: owned_id(&link.brand.id),
                model_id: owned_id(&link.id),
            },
        }
    }

    pub fn parent(&self) -> Option<Nav> {
        match self {
            Nav::Home => None,
            Nav::BrandModels(_) => Some(Nav::Home),
            Nav::ModelDetail(link) => Some(Nav::BrandModels(link.brand.clone())),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Nav::Home => "VibeStrings".to_string(),
            Nav::BrandModels(link) => link
                .name
                .as_deref()
                .map_or_else(|| "Guitar Models".to_string(), str::to_string),
            Nav::ModelDetail(link) => link
                .name
                .as_deref()
                .map_or_else(|| "Model Details".to_string(), str::to_string),
        }
    }

    pub fn back_label(&self) -> Option<&'static str> {
        match self {
            Nav::Home => None,
            Nav::BrandModels(_) => Some("Back To Home"),
            Nav::ModelDetail(_) => Some("Back To List"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_survive_the_trip_through_nav() {
        for path in ["/", "/brands/3/models", "/brands/3/models/12", "/brands//models"] {
            let route = Route::parse(path).unwrap();
            assert_eq!(Nav::from_route(route.clone()).route(), route);
        }
    }

    #[test]
    fn parent_keeps_the_brand_name() {
        let brand = BrandLink::new("3", "Gibson");
        let detail = Nav::ModelDetail(ModelLink::new(brand.clone(), "12", "Les Paul"));
        assert_eq!(detail.title(), "Les Paul");
        assert_eq!(detail.back_label(), Some("Back To List"));
        let parent = detail.parent().unwrap();
        assert_eq!(parent, Nav::BrandModels(brand));
        assert_eq!(parent.title(), "Gibson");
        assert_eq!(parent.parent(), Some(Nav::Home));
    }
}
