//! Places, their photos, and map coordinates

use loctur_gateway::{Body, FormPart, Gateway, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::Result;

/// A point on the map. The backend only accepts six decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Map centre when a place has no position yet (Moscow)
    pub const DEFAULT: Coordinates = Coordinates {
        latitude: 55.7558,
        longitude: 37.6176,
    };

    /// Validated and rounded to six decimals
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(ApiError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude: round6(latitude),
            longitude: round6(longitude),
        })
    }

    /// Coordinates of a place record, `DEFAULT` when it has none
    pub fn of_place(place: &Value) -> Self {
        let field = |name: &str| match &place[name] {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };

        match (field("latitude"), field("longitude")) {
            (Some(latitude), Some(longitude)) => {
                Self::new(latitude, longitude).unwrap_or(Self::DEFAULT)
            }
            _ => Self::DEFAULT,
        }
    }

    /// Merge into a place body as `latitude`/`longitude`
    pub fn apply_to(&self, place: &mut Value) {
        if let Value::Object(fields) = place {
            fields.insert("latitude".into(), self.latitude.into());
            fields.insert("longitude".into(), self.longitude.into());
        }
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Photo for `place-photos/`
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub place: Uuid,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
    pub caption: Option<String>,
}

impl PhotoUpload {
    fn into_form(self) -> Vec<FormPart> {
        let mut form = vec![
            FormPart::text("place", self.place.to_string()),
            FormPart::file("image", self.file_name, self.mime_type, self.bytes),
        ];
        if let Some(caption) = self.caption {
            form.push(FormPart::text("caption", caption));
        }
        form
    }
}

pub struct Places<'a> {
    gateway: &'a Gateway,
}

impl<'a> Places<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Value> {
        Ok(self.gateway.value(Method::GET, "places/", query, Body::Empty).await?)
    }

    pub async fn create(&self, place: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::POST, "places/", &[], Body::Json(place))
            .await?)
    }

    pub async fn update(&self, id: Uuid, changes: Value) -> Result<Value> {
        Ok(self
            .gateway
            .value(Method::PATCH, &format!("places/{id}/"), &[], Body::Json(changes))
            .await?)
    }

    /// Upload as `multipart/form-data`
    pub async fn upload_photo(&self, photo: PhotoUpload) -> Result<Value> {
        tracing::info!(
            place = %photo.place,
            file = %photo.file_name,
            size = photo.bytes.len(),
            "Uploading place photo"
        );
        Ok(self
            .gateway
            .value(Method::POST, "place-photos/", &[], Body::Multipart(photo.into_form()))
            .await?)
    }
}
