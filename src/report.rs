//! The per-request location payload.
//!
//! A [`LocationReport`] is deserialized from the `/track` request body, used
//! to build one outbound notification, and dropped when the request finishes.
//! There is no identity, no storage, and no lifecycle beyond that.

use std::fmt;

use serde::Deserialize;

/// A payload field that may arrive as either a JSON string or a JSON number.
///
/// The upstream IP-API emits latitude/longitude (and some postal codes) as
/// numbers while everything else is a string. Clients are not validated, so
/// both forms are accepted for every field and rendered back to text when the
/// notification is built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// String form, passed through verbatim.
    Text(String),
    /// Numeric form, rendered with `f64`'s `Display`.
    Number(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A visitor's approximate geolocation, as reported by the client script.
///
/// Every field is optional and unknown fields are ignored; the client is a
/// browser talking to a third-party IP-API, so the shape is best-effort.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationReport {
    pub ip: Option<Scalar>,
    pub country_name: Option<Scalar>,
    pub region: Option<Scalar>,
    pub city: Option<Scalar>,
    pub latitude: Option<Scalar>,
    pub longitude: Option<Scalar>,
    pub postal: Option<Scalar>,
    pub timezone: Option<Scalar>,
    pub org: Option<Scalar>,
}

impl LocationReport {
    /// True when no known field is present.
    ///
    /// An empty report is treated the same as an absent body: nothing useful
    /// can be said about the visitor, so no notification is sent.
    pub fn is_empty(&self) -> bool {
        let Self {
            ip,
            country_name,
            region,
            city,
            latitude,
            longitude,
            postal,
            timezone,
            org,
        } = self;
        ip.is_none()
            && country_name.is_none()
            && region.is_none()
            && city.is_none()
            && latitude.is_none()
            && longitude.is_none()
            && postal.is_none()
            && timezone.is_none()
            && org.is_none()
    }
}
