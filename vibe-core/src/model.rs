use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    /// Free-text category such as "Electric" or "Acoustic-Electric".
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specs: Option<Specs>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub musicians: Vec<Musician>,
}

impl Model {
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) if price > 0.0 => format_price(price),
            _ => "Price not available".to_string(),
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specs {
    #[serde(default)]
    pub body_wood: Option<String>,
    #[serde(default)]
    pub neck_wood: Option<String>,
    #[serde(default)]
    pub pickups: Option<String>,
    #[serde(default)]
    pub scale_length: Option<String>,
}

impl Specs {
    /// Label/value rows in display order, absent values rendered as a dash.
    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Body Wood", or_dash(&self.body_wood)),
            ("Neck Wood", or_dash(&self.neck_wood)),
            ("Pickups", or_dash(&self.pickups)),
            ("Scale Length", or_dash(&self.scale_length)),
        ]
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Musician {
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `$1,299` or `$1,299.5`: thousands separators, at most two decimals.
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);
    let mut label = String::from("$");
    label.push_str(&group_thousands(whole));
    if frac != 0 {
        label.push('.');
        label.push_str(format!("{frac:02}").trim_end_matches('0'));
    }
    label
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_tolerates_null_type_and_musicians() {
        let model: Model = serde_json::from_str(
            r#"{"id":"7","name":"Jazzmaster","type":null,"price":1299,"musicians":null}"#,
        )
        .unwrap();
        assert_eq!(model.kind, "");
        assert!(model.musicians.is_empty());
        assert_eq!(model.price, Some(1299.0));
    }

    #[test]
    fn model_reads_nested_specs() {
        let model: Model = serde_json::from_str(
            r#"{
                "id": "1", "name": "Les Paul", "type": "Electric", "price": 2499.99,
                "specs": {"bodyWood": "Mahogany", "neckWood": "Maple", "pickups": "HH", "scaleLength": "24.75\""},
                "musicians": [{"name": "Slash"}, {"name": "Jimmy Page"}]
            }"#,
        )
        .unwrap();
        let specs = model.specs.unwrap();
        assert_eq!(specs.body_wood.as_deref(), Some("Mahogany"));
        assert_eq!(specs.rows()[3], ("Scale Length", "24.75\""));
        assert_eq!(model.musicians[1].name, "Jimmy Page");
    }

    #[test]
    fn price_labels() {
        assert_eq!(format_price(1299.0), "$1,299");
        assert_eq!(format_price(1299.5), "$1,299.5");
        assert_eq!(format_price(999.99), "$999.99");
        assert_eq!(format_price(1_000_000.0), "$1,000,000");
        assert_eq!(format_price(12.0), "$12");
    }

    #[test]
    fn zero_or_absent_price_is_not_available() {
        let mut model: Model =
            serde_json::from_str(r#"{"id":"1","name":"Tele","type":"Electric"}"#).unwrap();
        assert_eq!(model.price_label(), "Price not available");
        model.price = Some(0.0);
        assert_eq!(model.price_label(), "Price not available");
        model.price = Some(849.0);
        assert_eq!(model.price_label(), "$849");
    }
}
