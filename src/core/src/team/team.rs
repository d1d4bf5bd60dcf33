use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable team identity. Ascending id is the canonical team order used
/// wherever the core needs a deterministic tie-free ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for TeamId {
    fn from(value: u32) -> Self {
        TeamId(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub abbreviation: String,
    pub conference: String,
    pub division: String,
    /// Overall strength in 0..=100, only read by score simulators.
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    50
}

impl Team {
    pub fn new(id: TeamId, name: &str, abbreviation: &str, conference: &str, division: &str) -> Self {
        TeamBuilder::new()
            .id(id)
            .name(name)
            .abbreviation(abbreviation)
            .conference(conference)
            .division(division)
            .build()
    }

    pub fn shares_division(&self, other: &Team) -> bool {
        self.conference == other.conference && self.division == other.division
    }

    pub fn shares_conference(&self, other: &Team) -> bool {
        self.conference == other.conference
    }
}

#[derive(Default)]
pub struct TeamBuilder {
    id: Option<TeamId>,
    name: Option<String>,
    abbreviation: Option<String>,
    conference: Option<String>,
    division: Option<String>,
    rating: Option<u8>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        TeamBuilder::default()
    }

    pub fn id(mut self, id: TeamId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviation = Some(abbreviation.to_string());
        self
    }

    pub fn conference(mut self, conference: &str) -> Self {
        self.conference = Some(conference.to_string());
        self
    }

    pub fn division(mut self, division: &str) -> Self {
        self.division = Some(division.to_string());
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating.min(100));
        self
    }

    pub fn build(self) -> Team {
        let id = self.id.unwrap_or(TeamId(0));
        let name = self.name.unwrap_or_else(|| format!("Team {}", id.0));
        let abbreviation = self
            .abbreviation
            .unwrap_or_else(|| name.chars().filter(|c| c.is_alphanumeric()).take(3).collect::<String>().to_uppercase());

        Team {
            id,
            name,
            abbreviation,
            conference: self.conference.unwrap_or_default(),
            division: self.division.unwrap_or_default(),
            rating: self.rating.unwrap_or_else(default_rating),
        }
    }
}
