use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A registered member as returned by `/Members`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    /// Assigned by the API. `0` means "not yet created".
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(deserialize_with = "null_as_default")]
    pub apellido: String,
    /// Canonical 11-digit cédula, no dashes.
    #[serde(deserialize_with = "null_as_default")]
    pub cedula: String,
    #[serde(deserialize_with = "null_as_default")]
    pub telefono: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direccion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sector: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comite_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rol_id: i64,
    #[serde(with = "flexible_datetime")]
    pub fecha_ingreso: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub activo: bool,
}

/// A committee (comité de base) as returned by `/Comites`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Committee {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zona: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direccion: String,
    /// Member id of the committee secretary. `0` when none is assigned.
    #[serde(deserialize_with = "null_as_default")]
    pub secretario: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub telefono: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(with = "flexible_datetime")]
    pub fecha_creacion: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub activo: bool,
}

/// A role as returned by `/Roles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre: String,
}

/// Backends serialize empty columns as `null`; read those as the type's
/// default, the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Dates arrive as RFC 3339 (`2024-03-01T10:00:00Z`), as naive timestamps
/// (`2024-03-01T10:00:00`) or as plain dates (`2024-03-01`), depending on
/// which endpoint wrote them. Naive values are read as UTC.
pub mod flexible_datetime {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(DateTime::<Utc>::default()),
            Some(raw) => parse(&raw).ok_or_else(|| {
                de::Error::custom(format!("unrecognized date format: {}", raw))
            }),
        }
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
