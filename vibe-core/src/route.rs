use std::fmt;

pub const HOME: &str = "/";
pub const BRAND_MODELS: &str = "/brands/:brandId/models";
pub const MODEL_DETAIL: &str = "/brands/:brandId/models/:modelId";

/// Route parameters a view may require.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    BrandId,
    ModelId,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrandId => f.write_str("Brand ID"),
            Self::ModelId => f.write_str("Model ID"),
        }
    }
}

/// A parsed location.  Ids are optional so that `/brands//models` still
/// resolves to the model list, which then reports the missing brand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    BrandModels {
        brand_id: Option<String>,
    },
    ModelDetail {
        brand_id: Option<String>,
        model_id: Option<String>,
    },
}

impl Route {
    pub fn brand_models(brand_id: impl Into<String>) -> Self {
        Self::BrandModels {
            brand_id: Some(brand_id.into()),
        }
    }

    pub fn model_detail(brand_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self::ModelDetail {
            brand_id: Some(brand_id.into()),
            model_id: Some(model_id.into()),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);
        if path.is_empty() {
            return Some(Self::Home);
        }
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["brands", brand, "models"] => Some(Self::BrandModels {
                brand_id: non_empty(brand),
            }),
            ["brands", brand, "models", model] => Some(Self::ModelDetail {
                brand_id: non_empty(brand),
                model_id: non_empty(model),
            }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => HOME.to_string(),
            Self::BrandModels { brand_id } => {
                format!("/brands/{}/models", brand_id.as_deref().unwrap_or_default())
            }
            Self::ModelDetail { brand_id, model_id } => format!(
                "/brands/{}/models/{}",
                brand_id.as_deref().unwrap_or_default(),
                model_id.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Where the back button leads.
    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::Home => None,
            Self::BrandModels { .. } => Some(Self::Home),
            Self::ModelDetail { brand_id, .. } => Some(Self::BrandModels {
                brand_id: brand_id.clone(),
            }),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn non_empty(segment: &str) -> Option<String> {
    let segment = segment.trim();
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}
