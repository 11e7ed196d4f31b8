use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Earliest statistics year accepted by the detail tools.
pub const MIN_YEAR: u16 = 2020;
/// Latest statistics year accepted by the detail tools.
pub const MAX_YEAR: u16 = 2030;

/// Program identifier (YÖP code) for one degree program offering
///
/// Travels as a single URL path segment, so dot segments are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YopCode(String);

impl YopCode {
    pub fn new(code: impl AsRef<str>) -> CoreResult<Self> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(CoreError::InvalidProgramId("code must not be empty".to_string()));
        }
        if code == "." || code == ".." {
            return Err(CoreError::InvalidProgramId(format!("'{}' is not a program code", code)));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for YopCode {
    type Error = CoreError;

    fn try_from(code: String) -> CoreResult<Self> {
        Self::new(code)
    }
}

impl From<YopCode> for String {
    fn from(code: YopCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for YopCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Statistics year, range-checked but not checked against real availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct Year(u16);

impl Year {
    pub fn new(year: i64) -> CoreResult<Self> {
        if year < MIN_YEAR as i64 || year > MAX_YEAR as i64 {
            return Err(CoreError::InvalidYear {
                year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }
        Ok(Self(year as u16))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for Year {
    type Error = CoreError;

    fn try_from(year: i64) -> CoreResult<Self> {
        Self::new(year)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Degree level a tool operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    /// Lisans (four-year) programs
    Bachelor,
    /// Önlisans (two-year) programs
    Associate,
}

impl DegreeLevel {
    /// Path segment used by the provider for this level
    pub fn path_segment(&self) -> &'static str {
        match self {
            DegreeLevel::Bachelor => "lisans",
            DegreeLevel::Associate => "onlisans",
        }
    }
}

impl std::fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegreeLevel::Bachelor => write!(f, "bachelor"),
            DegreeLevel::Associate => write!(f, "associate"),
        }
    }
}

/// Scalar value carried in a filter mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    /// Empty strings and zeros count as "not supplied"
    pub fn is_unset(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Integer(i) => *i == 0,
            FilterValue::Float(f) => *f == 0.0,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<Option<&str>> for FilterValue {
    fn from(value: Option<&str>) -> Self {
        FilterValue::Text(value.unwrap_or_default().to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Integer(value as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

/// Sparse mapping of filter field name to value, handed to the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterMapping(BTreeMap<String, FilterValue>);

impl FilterMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        self.0.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.0.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One program as returned by the provider. Fields are not owned here.
pub type ProgramRecord = serde_json::Value;

/// Full atlas detail payload for one program and year
pub type DetailRecord = serde_json::Map<String, serde_json::Value>;

macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $literal:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $literal)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $literal,)+
                }
            }

            /// Every accepted literal, in declaration order
            pub fn literals() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        crate::error::CoreError::invalid_parameter(format!(
                            "invalid {} '{}', expected one of: {}",
                            stringify!($name),
                            s,
                            Self::literals().join(", ")
                        ))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_enum! {
    /// Bachelor score type
    ScoreType {
        Say => "SAY",
        Ea => "EA",
        Soz => "SOZ",
        Dil => "DIL",
    }
}

literal_enum! {
    /// University ownership type
    UniversityType {
        Devlet => "Devlet",
        Vakif => "Vakıf",
        Kktc => "KKTC",
        YurtDisi => "Yurt Dışı",
    }
}

literal_enum! {
    /// Fee or scholarship status
    FeeType {
        Ucretsiz => "Ücretsiz",
        Ucretli => "Ücretli",
        IkinciOgretimUcretli => "İÖ-Ücretli",
        Burslu => "Burslu",
        YuzdeElliIndirimli => "%50 İndirimli",
        YuzdeYirmiBesIndirimli => "%25 İndirimli",
        AcikogretimUcretli => "AÖ-Ücretli",
        UzaktanUcretli => "UÖ-Ücretli",
    }
}

literal_enum! {
    /// Mode of instruction
    EducationType {
        Orgun => "Örgün",
        Ikinci => "İkinci",
        Acikogretim => "Açıköğretim",
        Uzaktan => "Uzaktan",
    }
}

literal_enum! {
    /// Placement fill status
    Availability {
        Doldu => "Doldu",
        DolduKosullu => "Doldu#",
        Dolmadi => "Dolmadı",
        Yeni => "Yeni",
    }
}

/// Deserialize an optional literal where `""` and `null` both mean "not set".
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
