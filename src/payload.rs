//! Text payloads for structured QR content: contact cards, WiFi
//! credentials, mail/SMS links and geo locations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// What kind of content the symbol carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Url,
    #[default]
    Text,
    Vcard,
    Wifi,
    Email,
    Sms,
    Geo,
}

impl DataType {
    pub fn name(self) -> &'static str {
        match self {
            DataType::Url => "url",
            DataType::Text => "text",
            DataType::Vcard => "vcard",
            DataType::Wifi => "wifi",
            DataType::Email => "email",
            DataType::Sms => "sms",
            DataType::Geo => "geo",
        }
    }

    /// Whether this type is built from structured `data` rather than `url`.
    pub fn is_structured(self) -> bool {
        !matches!(self, DataType::Url | DataType::Text)
    }
}

impl std::str::FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_value(Value::String(s.to_string()))
            .map_err(|_| Error::config(format!("Unknown QR data type '{s}'")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VCardData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiEncryption {
    fn as_str(self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
            WifiEncryption::NoPass => "nopass",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiData {
    pub ssid: Option<String>,
    pub password: Option<String>,
    pub encryption: WifiEncryption,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailData {
    pub email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsData {
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoData {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A validated structured payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    VCard(VCardData),
    Wifi(WifiData),
    Email(EmailData),
    Sms(SmsData),
    Geo(GeoData),
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

impl Payload {
    /// Decodes `data` for a structured `kind`, enforcing the fields each
    /// kind requires.
    pub fn from_json(kind: DataType, data: &Value) -> Result<Payload> {
        fn decode<T: serde::de::DeserializeOwned>(kind: DataType, data: &Value) -> Result<T> {
            serde_json::from_value(data.clone())
                .map_err(|e| Error::config(format!("Invalid data for type '{}': {e}", kind.name())))
        }

        let payload = match kind {
            DataType::Vcard => Payload::VCard(decode(kind, data)?),
            DataType::Wifi => Payload::Wifi(decode(kind, data)?),
            DataType::Email => Payload::Email(decode(kind, data)?),
            DataType::Sms => Payload::Sms(decode(kind, data)?),
            DataType::Geo => Payload::Geo(decode(kind, data)?),
            DataType::Url | DataType::Text => {
                return Err(Error::config(format!(
                    "Type '{}' takes its content from url, not data",
                    kind.name()
                )))
            }
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Payload::VCard(v) if !present(&v.first_name) && !present(&v.last_name) => Err(
                Error::config("vCard requires at least a first name or last name"),
            ),
            Payload::Wifi(w) if !present(&w.ssid) => Err(Error::config("WiFi QR code requires SSID")),
            Payload::Email(e) if !present(&e.email) => {
                Err(Error::config("Email QR code requires email address"))
            }
            Payload::Sms(s) if !present(&s.phone) => Err(Error::config("SMS QR code requires phone number")),
            Payload::Geo(g) if g.latitude.is_none() || g.longitude.is_none() => Err(
                Error::config("Geo QR code requires latitude and longitude"),
            ),
            _ => Ok(()),
        }
    }

    /// The text to encode.
    pub fn format(&self) -> String {
        match self {
            Payload::VCard(v) => format_vcard(v),
            Payload::Wifi(w) => format_wifi(w),
            Payload::Email(e) => format_email(e),
            Payload::Sms(s) => format_sms(s),
            Payload::Geo(g) => format_geo(g),
        }
    }
}

/// vCard 3.0, newline separated.
pub fn format_vcard(data: &VCardData) -> String {
    let field = |f: &Option<String>| f.clone().unwrap_or_default();
    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

    if present(&data.first_name) || present(&data.last_name) {
        lines.push(format!("N:{};{};;;", field(&data.last_name), field(&data.first_name)));
        let full: Vec<String> = [&data.first_name, &data.last_name]
            .into_iter()
            .filter(|f| present(f))
            .map(field)
            .collect();
        lines.push(format!("FN:{}", full.join(" ")));
    }
    for (tag, value) in [
        ("ORG", &data.organization),
        ("TITLE", &data.title),
        ("TEL", &data.phone),
        ("EMAIL", &data.email),
        ("URL", &data.url),
    ] {
        if present(value) {
            lines.push(format!("{tag}:{}", field(value)));
        }
    }
    let address = [&data.address, &data.city, &data.state, &data.zip, &data.country];
    if address.iter().any(|f| present(f)) {
        let parts: Vec<String> = address.into_iter().map(field).collect();
        lines.push(format!("ADR:;;{}", parts.join(";")));
    }
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

fn escape_wifi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `WIFI:T:<enc>;S:<ssid>;P:<password>;H:true;;`
pub fn format_wifi(data: &WifiData) -> String {
    let mut result = format!("WIFI:T:{};", data.encryption.as_str());
    result += &format!("S:{};", escape_wifi(data.ssid.as_deref().unwrap_or_default()));
    if let Some(password) = data.password.as_deref().filter(|p| !p.is_empty()) {
        result += &format!("P:{};", escape_wifi(password));
    }
    if data.hidden {
        result += "H:true;";
    }
    result.push(';');
    result
}

/// Percent-encodes everything except unreserved URI characters and
/// `!'()*`, matching what browsers do for URI components.
pub fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&b) {
            out.push(b as char);
        } else {
            out += &format!("%{b:02X}");
        }
    }
    out
}

pub fn format_email(data: &EmailData) -> String {
    let mut result = format!("mailto:{}", data.email.as_deref().unwrap_or_default());
    let mut params = Vec::new();
    if let Some(subject) = data.subject.as_deref().filter(|s| !s.is_empty()) {
        params.push(format!("subject={}", encode_uri_component(subject)));
    }
    if let Some(body) = data.body.as_deref().filter(|s| !s.is_empty()) {
        params.push(format!("body={}", encode_uri_component(body)));
    }
    if !params.is_empty() {
        result.push('?');
        result += &params.join("&");
    }
    result
}

pub fn format_sms(data: &SmsData) -> String {
    let mut result = format!("sms:{}", data.phone.as_deref().unwrap_or_default());
    if let Some(message) = data.message.as_deref().filter(|s| !s.is_empty()) {
        result += &format!("?body={}", encode_uri_component(message));
    }
    result
}

pub fn format_geo(data: &GeoData) -> String {
    format!(
        "geo:{},{}",
        data.latitude.unwrap_or_default(),
        data.longitude.unwrap_or_default()
    )
}
