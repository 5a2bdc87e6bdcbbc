//! String-coded options understood by Cloud Storage.
//!
//! Locations and storage classes are passed to the service verbatim. Codes
//! outside the well-known set are kept as `Custom` rather than rejected, so
//! the service stays the only place that validates them.

use crate::error::{Error, Result};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Bucket location. See <https://cloud.google.com/storage/docs/locations>.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    /// Data centers in Asia
    Asia,
    /// Data centers in the European Union
    Eu,
    /// Data centers in the United States
    #[default]
    Us,
    /// Any other location code, e.g. a single region such as `us-east1`
    Custom(String),
}

impl Location {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Asia => "ASIA",
            Self::Eu => "EU",
            Self::Us => "US",
            Self::Custom(code) => code,
        }
    }
}

impl FromStr for Location {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "ASIA" => Self::Asia,
            "EU" => Self::Eu,
            "US" => Self::Us,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default storage class of a bucket.
/// See <https://cloud.google.com/storage/docs/storage-classes>.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageClass {
    /// Frequently accessed data, or data stored only briefly.
    Standard,
    /// Infrequently accessed data, 30-day minimum storage duration.
    Nearline,
    /// Very infrequently accessed data, 90-day minimum storage duration.
    #[default]
    Coldline,
    /// Archival data, still available within milliseconds.
    Archive,
    Custom(String),
}

impl StorageClass {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard => "STANDARD",
            Self::Nearline => "NEARLINE",
            Self::Coldline => "COLDLINE",
            Self::Archive => "ARCHIVE",
            Self::Custom(code) => code,
        }
    }
}

impl FromStr for StorageClass {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "STANDARD" => Self::Standard,
            "NEARLINE" => Self::Nearline,
            "COLDLINE" => Self::Coldline,
            "ARCHIVE" => Self::Archive,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access control preset applied to a newly written object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedAcl {
    /// Owner gets `OWNER`, `allAuthenticatedUsers` get `READER`.
    AuthenticatedRead,
    /// Owner and project team owners get `OWNER`.
    BucketOwnerFullControl,
    /// Owner gets `OWNER`, project team owners get `READER`.
    BucketOwnerRead,
    /// Only the owner gets access.
    Private,
    /// Owner gets `OWNER`, project team members get access by role.
    ProjectPrivate,
    /// Owner gets `OWNER`, `allUsers` get `READER`.
    PublicRead,
}

impl PredefinedAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticatedRead => "authenticatedRead",
            Self::BucketOwnerFullControl => "bucketOwnerFullControl",
            Self::BucketOwnerRead => "bucketOwnerRead",
            Self::Private => "private",
            Self::ProjectPrivate => "projectPrivate",
            Self::PublicRead => "publicRead",
        }
    }
}

impl FromStr for PredefinedAcl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "authenticatedRead" => Ok(Self::AuthenticatedRead),
            "bucketOwnerFullControl" => Ok(Self::BucketOwnerFullControl),
            "bucketOwnerRead" => Ok(Self::BucketOwnerRead),
            "private" => Ok(Self::Private),
            "projectPrivate" => Ok(Self::ProjectPrivate),
            "publicRead" => Ok(Self::PublicRead),
            _ => Err(Error::UnknownAcl { acl: s.to_string() }),
        }
    }
}

impl fmt::Display for PredefinedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
