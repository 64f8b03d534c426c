use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Guideline,
    Rct,
    Trial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    pub kind: EvidenceKind,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Distance from the care site. Only site-bound items (recruiting trials) carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl EvidenceItem {
    /// Items without a location apply everywhere.
    pub fn within(&self, geo: &GeoFilter) -> bool {
        match self.distance_km {
            Some(distance) => distance <= geo.radius_km,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    pub radius_km: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub comorbidity: Option<String>,
    #[serde(default)]
    pub geo: Option<GeoFilter>,
}

impl EvidenceSearchRequest {
    /// All free-text criteria joined into one search string.
    pub fn search_text(&self) -> String {
        [&self.query, &self.condition, &self.comorbidity]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyTrial {
    pub id: String,
    pub name: String,
    pub distance_km: f64,
    pub eligibility_summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSearchResponse {
    pub items: Vec<EvidenceItem>,
    pub guideline_ids: Vec<String>,
    pub rct_ids: Vec<String>,
    pub nearby_trials: Vec<NearbyTrial>,
}
