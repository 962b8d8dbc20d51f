//! Records flowing through the join pipeline.

use serde::{Deserialize, Serialize};

/// A geographic place as decoded from the entity stream.
///
/// - `id`: gazetteer identifier
/// - `name`: display name
/// - `wiki`: wiki page title, the join key (normalized before use)
/// - `aliases`: alternate names, in source order
///
/// The remaining fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEntity {
    pub id: i64,
    pub name: String,
    pub wiki: String,
    pub aliases: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    pub feature_code: String,
    pub population: i64,
}

/// A page-importance record from the ranking stream.
///
/// `order` is the importance position: lower sorts earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPage {
    pub title: String,
    pub rank: f64,
    pub order: i64,
    pub page_id: i64,
}

/// One entity joined with at most one ranking page.
///
/// The entity never changes. The page goes from absent to present at most
/// once and never back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGeo {
    entity: GeoEntity,
    page: Option<RankedPage>,
}

impl RankedGeo {
    pub fn new(entity: GeoEntity) -> Self { Self { entity, page: None } }

    pub fn entity(&self) -> &GeoEntity { &self.entity }

    pub fn page(&self) -> Option<&RankedPage> { self.page.as_ref() }

    pub fn is_ranked(&self) -> bool { self.page.is_some() }

    pub fn order(&self) -> Option<i64> { self.page.as_ref().map(|p| p.order) }

    /// Attach `page` if none is attached yet. An already-ranked slot keeps its
    /// page and hands the new one back.
    pub fn attach(&mut self, page: RankedPage) -> std::result::Result<(), RankedPage> {
        if self.page.is_some() {
            return Err(page);
        }
        self.page = Some(page);
        Ok(())
    }
}
