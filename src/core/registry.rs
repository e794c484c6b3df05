//! PP-001: Type registry: classification label to canonical semantic type.
//!
//! The execution engine only understands canonical semantic-type URIs. Several
//! labels collapse onto one URI (ordinal and the place-name kinds are all
//! categorical data), so "did the type change" is decided on resolved ids.

/// Classification labels.
pub mod labels {
    pub const ADDRESS: &str = "address";
    pub const INDEX: &str = "index";
    pub const INTEGER: &str = "integer";
    pub const REAL: &str = "real";
    pub const REAL_VECTOR: &str = "realVector";
    pub const BOOL: &str = "boolean";
    pub const DATE_TIME: &str = "dateTime";
    pub const ORDINAL: &str = "ordinal";
    pub const CATEGORICAL: &str = "categorical";
    pub const NUMERICAL: &str = "numerical";
    pub const TEXT: &str = "text";
    pub const CITY: &str = "city";
    pub const COUNTRY: &str = "country";
    pub const EMAIL: &str = "email";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const PHONE: &str = "phone";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const STATE: &str = "state";
    pub const URI: &str = "uri";
    pub const IMAGE: &str = "image";
    pub const TIME_SERIES: &str = "timeseries";
    pub const GEO_COORDINATE: &str = "geocoordinate";
    pub const UNKNOWN: &str = "unknown";
}

/// Canonical semantic-type identifiers.
pub mod semantic {
    pub const INTEGER: &str = "http://schema.org/Integer";
    pub const FLOAT: &str = "http://schema.org/Float";
    pub const BOOLEAN: &str = "http://schema.org/Boolean";
    pub const DATE_TIME: &str = "http://schema.org/DateTime";
    pub const TEXT: &str = "http://schema.org/Text";
    pub const IMAGE: &str = "http://schema.org/ImageObject";
    pub const CATEGORICAL: &str = "https://metadata.datadrivendiscovery.org/types/CategoricalData";
    pub const FLOAT_VECTOR: &str = "https://metadata.datadrivendiscovery.org/types/FloatVector";
    pub const TIME_SERIES: &str = "https://metadata.datadrivendiscovery.org/types/Timeseries";
    pub const LOCATION: &str = "https://metadata.datadrivendiscovery.org/types/Location";
    pub const UNKNOWN: &str = "https://metadata.datadrivendiscovery.org/types/UnknownType";
    /// Marks the prediction target. Never a registry resolution result.
    pub const TRUE_TARGET: &str = "https://metadata.datadrivendiscovery.org/types/TrueTarget";
}

const STANDARD_ENTRIES: &[(&str, &str)] = &[
    (labels::ADDRESS, semantic::TEXT),
    (labels::INDEX, semantic::INTEGER),
    (labels::INTEGER, semantic::INTEGER),
    (labels::REAL, semantic::FLOAT),
    (labels::REAL_VECTOR, semantic::FLOAT_VECTOR),
    (labels::BOOL, semantic::BOOLEAN),
    (labels::DATE_TIME, semantic::DATE_TIME),
    (labels::ORDINAL, semantic::CATEGORICAL),
    (labels::CATEGORICAL, semantic::CATEGORICAL),
    (labels::NUMERICAL, semantic::FLOAT),
    (labels::TEXT, semantic::TEXT),
    (labels::CITY, semantic::CATEGORICAL),
    (labels::COUNTRY, semantic::CATEGORICAL),
    (labels::EMAIL, semantic::CATEGORICAL),
    (labels::LATITUDE, semantic::FLOAT),
    (labels::LONGITUDE, semantic::FLOAT),
    (labels::PHONE, semantic::CATEGORICAL),
    (labels::POSTAL_CODE, semantic::CATEGORICAL),
    (labels::STATE, semantic::CATEGORICAL),
    (labels::URI, semantic::CATEGORICAL),
    (labels::IMAGE, semantic::IMAGE),
    (labels::TIME_SERIES, semantic::TIME_SERIES),
    (labels::GEO_COORDINATE, semantic::LOCATION),
    (labels::UNKNOWN, semantic::UNKNOWN),
];

/// The registry every compile resolves against.
pub static STANDARD: TypeRegistry = TypeRegistry::new(STANDARD_ENTRIES);

/// Immutable label → canonical id table.
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistry {
    entries: &'static [(&'static str, &'static str)],
}

impl TypeRegistry {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve a classification label. `None` for unregistered labels.
    pub fn resolve(&self, classification: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(label, _)| *label == classification)
            .map(|(_, id)| *id)
    }

    /// All `(label, canonical id)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
