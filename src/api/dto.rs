/*
 * Responsibility
 * - Typed records, list pages, mutation acknowledgements and form drafts
 * - Schema validation happens here (serde), so downstream code never
 *   null-chains through half-decoded JSON
 */
use serde::{Deserialize, Serialize};

/// Habitat as embedded in a bird record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HabitatRef {
    pub id: u64,
    pub name: String,
}

/// Region as embedded in a bird record (derived by the backend from the
/// bird's habitats).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionRef {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bird {
    pub id: u64,
    pub common_name: String,
    pub species: String,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub habitats: Vec<HabitatRef>,
    #[serde(default)]
    pub regions: Vec<RegionRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Habitat {
    pub id: u64,
    pub name: String,
    pub region_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BirdsPage {
    pub birds: Vec<Bird>,
    #[serde(default)]
    pub total_birds: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct HabitatsPage {
    pub habitats: Vec<Habitat>,
    #[serde(default)]
    pub total_habitats: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RegionList {
    pub regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub struct BirdDoc {
    pub bird: Bird,
}

#[derive(Debug, Deserialize)]
pub struct HabitatDoc {
    pub habitat: Habitat,
}

/// `POST /birds` and `PATCH /birds/:id` acknowledge with the bird id.
#[derive(Debug, Deserialize)]
pub struct BirdMutationAck {
    pub bird: u64,
}

/// `POST /habitats` returns the created record in full.
#[derive(Debug, Deserialize)]
pub struct HabitatCreateAck {
    pub habitat: Habitat,
}

/// `PATCH /habitats/:id` acknowledges with the habitat id only.
#[derive(Debug, Deserialize)]
pub struct HabitatUpdateAck {
    pub habitat: u64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub deleted: Option<u64>,
}

/// Form-local draft of a bird. Owned by the form screen, destroyed with it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BirdDraft {
    pub common_name: String,
    pub species: String,
    pub image_link: String,
    /// Habitat ids (many-to-many by id list); the backend resolves them.
    pub habitats: Vec<u64>,
}

impl BirdDraft {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.common_name.trim().is_empty() {
            return Err("common_name is required");
        }
        if self.species.trim().is_empty() {
            return Err("species is required");
        }
        if self.habitats.is_empty() {
            return Err("at least one habitat is required");
        }
        Ok(())
    }
}

/// Form-local draft of a habitat. The optional `bird` back-link attaches
/// the new habitat to the bird being edited when the form is embedded in
/// the bird screen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HabitatDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bird: Option<u64>,
}

impl HabitatDraft {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.region_id.is_none() {
            return Err("region is required");
        }
        Ok(())
    }
}

/// `{value, label}` pair for searchable selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: u64,
    pub label: String,
}

impl From<&Habitat> for SelectOption {
    fn from(h: &Habitat) -> Self {
        Self {
            value: h.id,
            label: h.name.clone(),
        }
    }
}

impl From<&HabitatRef> for SelectOption {
    fn from(h: &HabitatRef) -> Self {
        Self {
            value: h.id,
            label: h.name.clone(),
        }
    }
}

impl From<&Region> for SelectOption {
    fn from(r: &Region) -> Self {
        Self {
            value: r.id,
            label: r.name.clone(),
        }
    }
}
