use schema::{Region, RuleClass};
use std::fmt;

/// Main error type for the Pokedex evolution engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokedexError {
    /// Normalized entries violate the identity invariant
    MalformedEntity(MalformedEntityError),
    /// The evolution rule table could not be loaded
    RuleTable(RuleTableError),
    /// Upstream data is missing or could not be decoded
    UpstreamData(UpstreamDataError),
}

/// Errors raised while normalizing raw species records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedEntityError {
    /// Two entries share the same (species, region) identity
    DuplicateIdentity {
        species_id: u32,
        region: Option<Region>,
    },
}

/// Errors related to loading or validating the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    /// The RON source could not be parsed
    Parse(String),
    /// The compiled table could not be decoded
    Decode(String),
    /// A rule's regions do not fit the class it was listed under
    ClassMismatch {
        class: RuleClass,
        from: String,
        to: String,
    },
    /// A rule endpoint normalizes to an empty slug
    EmptySlug { class: RuleClass, name: String },
}

/// Errors related to upstream snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamDataError {
    /// The requested resource could not be read
    Unavailable(String),
    /// The resource was read but is not valid for its record type
    Decode { path: String, details: String },
    /// A species URL does not end in a numeric id
    MalformedSpeciesUrl(String),
}

impl fmt::Display for PokedexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokedexError::MalformedEntity(err) => write!(f, "Malformed entity: {}", err),
            PokedexError::RuleTable(err) => write!(f, "Rule table error: {}", err),
            PokedexError::UpstreamData(err) => write!(f, "Upstream data error: {}", err),
        }
    }
}

impl fmt::Display for MalformedEntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedEntityError::DuplicateIdentity { species_id, region } => match region {
                Some(region) => write!(f, "Duplicate entry for species #{} ({})", species_id, region),
                None => write!(f, "Duplicate entry for species #{} (standard)", species_id),
            },
        }
    }
}

impl fmt::Display for RuleTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTableError::Parse(details) => write!(f, "Invalid rule file: {}", details),
            RuleTableError::Decode(details) => write!(f, "Invalid compiled rule table: {}", details),
            RuleTableError::ClassMismatch { class, from, to } => {
                write!(f, "Rule {} -> {} does not belong in {}", from, to, class)
            }
            RuleTableError::EmptySlug { class, name } => {
                write!(f, "Rule endpoint {:?} in {} has an empty slug", name, class)
            }
        }
    }
}

impl fmt::Display for UpstreamDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamDataError::Unavailable(path) => write!(f, "Resource unavailable: {}", path),
            UpstreamDataError::Decode { path, details } => {
                write!(f, "Could not decode {}: {}", path, details)
            }
            UpstreamDataError::MalformedSpeciesUrl(url) => write!(f, "Malformed species URL: {}", url),
        }
    }
}

impl std::error::Error for PokedexError {}
impl std::error::Error for MalformedEntityError {}
impl std::error::Error for RuleTableError {}
impl std::error::Error for UpstreamDataError {}

impl From<MalformedEntityError> for PokedexError {
    fn from(err: MalformedEntityError) -> Self {
        PokedexError::MalformedEntity(err)
    }
}

impl From<RuleTableError> for PokedexError {
    fn from(err: RuleTableError) -> Self {
        PokedexError::RuleTable(err)
    }
}

impl From<UpstreamDataError> for PokedexError {
    fn from(err: UpstreamDataError) -> Self {
        PokedexError::UpstreamData(err)
    }
}

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;

/// Type alias for Results using MalformedEntityError
pub type EntityResult<T> = Result<T, MalformedEntityError>;

/// Type alias for Results using RuleTableError
pub type RuleTableResult<T> = Result<T, RuleTableError>;

/// Type alias for Results using UpstreamDataError
pub type UpstreamResult<T> = Result<T, UpstreamDataError>;
