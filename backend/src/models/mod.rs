//! Domain models handed to the codec by the registry application.
//!
//! - [`Work`] - musical composition with its authors and publishers
//! - [`WorkTitleholder`] - author or publisher share of a work
//! - [`WorkParticipant`] - performer listed at work level
//! - [`Phonogram`] - sound recording of a work
//! - [`PhonogramTitleholder`] - producer or performer share of a phonogram
//! - [`MailingTitleholder`] - rights-holder address for the mailing export
//! - [`Catalog`] - ordered works and phonograms of one export
//!
//! The codec never validates these. Required fields, ISRC checksums and share
//! sums are checked upstream; whatever arrives here gets encoded.

use serde::{Deserialize, Serialize};

// =============================================================================
// Nationality
// =============================================================================

/// National (Brazilian) or international repertoire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Nationality {
    #[default]
    National,
    International,
}

impl Nationality {
    /// Parse the registry's free-text flag. Only an explicit
    /// "internacional"/"international" counts as international.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_uppercase().as_str() {
            "INTERNACIONAL" | "INTERNATIONAL" => Self::International,
            _ => Self::National,
        }
    }

    /// `S` for national, `N` for international.
    pub fn ecad_flag(self) -> &'static str {
        match self {
            Self::National => "S",
            Self::International => "N",
        }
    }
}

// =============================================================================
// Work
// =============================================================================

/// An author or publisher of a work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkTitleholder {
    pub name: String,
    /// CPF or CNPJ, formatted or not.
    #[serde(default)]
    pub document: String,
    /// Free-text role ("Compositor", "Arranjador", ...).
    #[serde(default)]
    pub role: String,
    /// Share percentage (0-100).
    #[serde(default)]
    pub share: f64,
    /// IPI/CAE code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipi: Option<String>,
    /// Titleholder code assigned by ECAD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecad_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudonym: Option<String>,
    /// `dd/mm/yyyy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

impl WorkTitleholder {
    pub fn new(name: impl Into<String>, document: impl Into<String>, role: impl Into<String>, share: f64) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            role: role.into(),
            share,
            ..Default::default()
        }
    }

    pub fn with_ipi(mut self, ipi: impl Into<String>) -> Self {
        self.ipi = Some(ipi.into());
        self
    }

    pub fn with_pseudonym(mut self, pseudonym: impl Into<String>) -> Self {
        self.pseudonym = Some(pseudonym.into());
        self
    }
}

/// A performer listed at work level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkParticipant {
    pub name: String,
    /// Free-text category ("Principal", "Coadjuvante", "Gravadora", ...).
    #[serde(default)]
    pub category: String,
}

impl WorkParticipant {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self { name: name.into(), category: category.into() }
    }
}

/// A musical work (composition).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    /// Registry code; only its digits are exported.
    pub internal_code: String,
    /// Code assigned by ECAD once the work is registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecad_code: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// `mm:ss` or `hh:mm:ss`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub nationality: Nationality,
    #[serde(default)]
    pub authors: Vec<WorkTitleholder>,
    #[serde(default)]
    pub publishers: Vec<WorkTitleholder>,
    #[serde(default)]
    pub performers: Vec<WorkParticipant>,
}

impl Work {
    pub fn new(internal_code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            internal_code: internal_code.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn add_author(&mut self, author: WorkTitleholder) {
        self.authors.push(author);
    }

    pub fn add_publisher(&mut self, publisher: WorkTitleholder) {
        self.publishers.push(publisher);
    }

    /// Number of OBM2 lines this work produces.
    pub fn titleholder_count(&self) -> usize {
        self.authors.len() + self.publishers.len()
    }
}

// =============================================================================
// Phonogram
// =============================================================================

/// A producer or performer of a phonogram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PhonogramTitleholder {
    pub name: String,
    #[serde(default)]
    pub document: String,
    /// Free-text category ("Principal", "Músico acompanhante", ...).
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub share: f64,
    /// Collecting society the titleholder is affiliated with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub society: Option<String>,
}

impl PhonogramTitleholder {
    pub fn new(name: impl Into<String>, document: impl Into<String>, category: impl Into<String>, share: f64) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            category: category.into(),
            share,
            society: None,
        }
    }

    pub fn with_society(mut self, society: impl Into<String>) -> Self {
        self.society = Some(society.into());
        self
    }
}

/// A sound recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Phonogram {
    /// Numeric registry id; links FON1, FON2 and FON3.
    pub id: u64,
    /// Registry code; falls back to `id` when empty or digit-free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_code: Option<String>,
    pub isrc: String,
    pub title: String,
    #[serde(default)]
    pub duration: String,
    /// Year or `dd/mm/yyyy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_date: Option<String>,
    /// `dd/mm/yyyy`; takes precedence over `release_year`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    #[serde(default)]
    pub nationality: Nationality,
    #[serde(default)]
    pub genre: String,
    /// ECAD code of the recorded work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<PhonogramTitleholder>,
    #[serde(default)]
    pub performers: Vec<PhonogramTitleholder>,
}

impl Phonogram {
    pub fn new(id: u64, isrc: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            isrc: isrc.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Digits of the internal code, or the numeric id when there are none.
    pub fn internal_code_digits(&self) -> String {
        let digits: String = self
            .internal_code
            .as_deref()
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            self.id.to_string()
        } else {
            digits
        }
    }

    /// Number of FON2 lines this phonogram produces.
    pub fn titleholder_count(&self) -> usize {
        usize::from(self.producer.is_some()) + self.performers.len()
    }
}

// =============================================================================
// Mailing
// =============================================================================

/// A rights-holder address, for the 0660 mailing export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MailingTitleholder {
    pub name: String,
    /// CPF; empty for foreign titleholders.
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub complement: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    /// ISO country code; empty means Brazil.
    #[serde(default)]
    pub country: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// Everything exported in one ECAD file, in output order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Catalog {
    #[serde(default)]
    pub works: Vec<Work>,
    #[serde(default)]
    pub phonograms: Vec<Phonogram>,
}

impl Catalog {
    pub fn group_count(&self) -> usize {
        self.works.len() + self.phonograms.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
