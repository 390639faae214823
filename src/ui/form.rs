/*
 * Responsibility
 * - Form screens: one draft, one error slot, one loading flag per screen
 * - Edit mode loads the record and pre-selects selector options
 * - Successful submits navigate shallowly to the canonical id route
 */
use crate::api::birds::BirdsApi;
use crate::api::dto::{BirdDraft, Habitat, HabitatDraft, SelectOption};
use crate::api::habitats::HabitatsApi;
use crate::api::regions::RegionsApi;
use crate::ui::nav::{Nav, Route};

pub struct BirdFormScreen {
    birds: BirdsApi,
    habitats: HabitatsApi,
    /// Present in edit mode, sourced from the `?bird=` query parameter.
    pub bird_id: Option<u64>,
    pub draft: BirdDraft,
    pub selected_habitats: Vec<SelectOption>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BirdFormScreen {
    pub fn new(birds: BirdsApi, habitats: HabitatsApi, bird_id: Option<u64>) -> Self {
        Self {
            birds,
            habitats,
            bird_id,
            draft: BirdDraft::default(),
            selected_habitats: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Edit mode: populate the draft from the existing record. Create mode
    /// is a no-op.
    pub async fn load(&mut self) {
        let Some(id) = self.bird_id else { return };

        self.loading = true;
        match self.birds.get(id).await {
            Ok(bird) => {
                self.draft = BirdDraft {
                    common_name: bird.common_name,
                    species: bird.species,
                    image_link: bird.image_link.unwrap_or_default(),
                    habitats: bird.habitats.iter().map(|h| h.id).collect(),
                };
                self.selected_habitats = bird.habitats.iter().map(SelectOption::from).collect();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
    }

    /// Typeahead over habitat names. A failed search sets the error slot
    /// and offers no options; it never takes the form down.
    pub async fn search_habitats(&mut self, query: &str) -> Vec<SelectOption> {
        match self.habitats.search(query).await {
            Ok(options) => options,
            Err(e) => {
                self.error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    /// Selector change: replace the selection and mirror the ids into the
    /// draft.
    pub fn select_habitats(&mut self, options: Vec<SelectOption>) {
        self.draft.habitats = options.iter().map(|o| o.value).collect();
        self.selected_habitats = options;
    }

    /// A habitat created through the embedded habitat form is selected
    /// immediately.
    pub fn attach_habitat(&mut self, habitat: &Habitat) {
        self.selected_habitats.push(SelectOption::from(habitat));
        self.draft.habitats.push(habitat.id);
    }

    /// POST (create) or PATCH (edit). On success navigates shallowly to
    /// `?bird=<id>` so a re-render picks up the canonical id; on failure
    /// the error slot is set and the form stays editable.
    pub async fn submit(&mut self, nav: &mut Nav) -> bool {
        self.error = None;

        if let Err(reason) = self.draft.validate() {
            self.error = Some(reason.to_string());
            return false;
        }

        self.loading = true;
        let result = match self.bird_id {
            Some(id) => self.birds.update(id, &self.draft).await,
            None => self.birds.create(&self.draft).await,
        };
        self.loading = false;

        match result {
            Ok(id) => {
                self.bird_id = Some(id);
                nav.push_shallow(Route::BirdForm { bird: Some(id) });
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "bird submit failed");
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

pub enum HabitatSubmit {
    Created(Habitat),
    Updated(u64),
}

pub struct HabitatFormScreen {
    habitats: HabitatsApi,
    regions: RegionsApi,
    pub habitat_id: Option<u64>,
    pub draft: HabitatDraft,
    pub region_options: Vec<SelectOption>,
    pub loading: bool,
    pub error: Option<String>,
    /// True when the form sits inside the bird form. An embedded form does
    /// not navigate on success; it clears its fields for the next entry.
    embedded: bool,
}

impl HabitatFormScreen {
    pub fn new(habitats: HabitatsApi, regions: RegionsApi, habitat_id: Option<u64>) -> Self {
        Self {
            habitats,
            regions,
            habitat_id,
            draft: HabitatDraft::default(),
            region_options: Vec::new(),
            loading: false,
            error: None,
            embedded: false,
        }
    }

    pub fn new_embedded(habitats: HabitatsApi, regions: RegionsApi) -> Self {
        let mut screen = Self::new(habitats, regions, None);
        screen.embedded = true;
        screen
    }

    /// Region options are loaded up front in both modes; edit mode also
    /// populates the draft from the record.
    pub async fn load(&mut self) {
        self.loading = true;

        match self.regions.options().await {
            Ok(options) => self.region_options = options,
            Err(e) => self.error = Some(e.to_string()),
        }

        if let Some(id) = self.habitat_id {
            match self.habitats.get(id).await {
                Ok(habitat) => {
                    self.draft = HabitatDraft {
                        name: habitat.name,
                        region_id: Some(habitat.region_id),
                        bird: None,
                    };
                }
                Err(e) => self.error = Some(e.to_string()),
            }
        }
        self.loading = false;
    }

    pub fn selected_region(&self) -> Option<&SelectOption> {
        let region_id = self.draft.region_id?;
        self.region_options.iter().find(|o| o.value == region_id)
    }

    pub fn select_region(&mut self, region_id: u64) {
        self.draft.region_id = Some(region_id);
    }

    /// Create or update. On success navigates shallowly to the canonical
    /// `?habitat=<id>` route and reports what happened so an embedding
    /// bird form can attach a created habitat.
    pub async fn submit(&mut self, nav: &mut Nav) -> Option<HabitatSubmit> {
        self.error = None;

        if let Err(reason) = self.draft.validate() {
            self.error = Some(reason.to_string());
            return None;
        }

        self.loading = true;
        let outcome = match self.habitat_id {
            Some(id) => self
                .habitats
                .update(id, &self.draft)
                .await
                .map(HabitatSubmit::Updated),
            None => self
                .habitats
                .create(&self.draft)
                .await
                .map(HabitatSubmit::Created),
        };
        self.loading = false;

        match outcome {
            Ok(submit) => {
                if self.embedded {
                    self.reset_fields();
                } else {
                    let id = match &submit {
                        HabitatSubmit::Created(habitat) => habitat.id,
                        HabitatSubmit::Updated(id) => *id,
                    };
                    self.habitat_id = Some(id);
                    nav.push_shallow(Route::HabitatForm { habitat: Some(id) });
                }
                Some(submit)
            }
            Err(e) => {
                tracing::error!(error = %e, "habitat submit failed");
                self.error = Some(e.to_string());
                None
            }
        }
    }

    // Keep the embedded screen, drop the entered fields so another habitat
    // can be added in a row.
    fn reset_fields(&mut self) {
        self.draft.name.clear();
        self.draft.region_id = None;
    }
}
