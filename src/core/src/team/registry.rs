use crate::{Diagnostic, SeasonError, SeasonResult, Team, TeamId};
use itertools::Itertools;
use log::warn;
use std::collections::BTreeMap;

const UNASSIGNED_DIVISION: &str = "Unassigned";

/// Owner of team identity for a season. The core reads from it; only the
/// host renames abbreviations.
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: BTreeMap<TeamId, Team>,
    diagnostics: Vec<Diagnostic>,
}

impl TeamRegistry {
    pub fn new(teams: Vec<Team>, default_conference: &str) -> SeasonResult<Self> {
        let mut registry = TeamRegistry {
            teams: BTreeMap::new(),
            diagnostics: Vec::new(),
        };

        for mut team in teams {
            if registry.teams.contains_key(&team.id) {
                return Err(SeasonError::DuplicateTeam(team.id));
            }

            if team.conference.trim().is_empty() {
                registry.default_team(&team, format!("missing conference, using {}", default_conference));
                team.conference = default_conference.to_string();
            }

            if team.division.trim().is_empty() {
                registry.default_team(&team, format!("missing division, using {}", UNASSIGNED_DIVISION));
                team.division = UNASSIGNED_DIVISION.to_string();
            }

            registry.teams.insert(team.id, team);
        }

        Ok(registry)
    }

    fn default_team(&mut self, team: &Team, message: String) {
        warn!("team {} ({}): {}", team.id, team.name, message);

        self.diagnostics.push(Diagnostic::DataQuality { team: team.id, message });
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, id: TeamId) -> bool {
        self.teams.contains_key(&id)
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn team(&self, id: TeamId) -> SeasonResult<&Team> {
        self.teams.get(&id).ok_or(SeasonError::UnknownTeam(id))
    }

    /// Teams in canonical (ascending id) order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn ids(&self) -> Vec<TeamId> {
        self.teams.keys().copied().collect()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn abbreviation(&self, id: TeamId) -> Option<&str> {
        self.teams.get(&id).map(|team| team.abbreviation.as_str())
    }

    /// Display label for output, falling back to the raw id.
    pub fn label(&self, id: TeamId) -> String {
        match self.abbreviation(id) {
            Some(abbreviation) => abbreviation.to_string(),
            None => id.to_string(),
        }
    }

    pub fn rename(&mut self, id: TeamId, abbreviation: &str) -> SeasonResult<()> {
        let team = self.teams.get_mut(&id).ok_or(SeasonError::UnknownTeam(id))?;
        team.abbreviation = abbreviation.to_string();
        Ok(())
    }

    pub fn conferences(&self) -> Vec<String> {
        self.teams
            .values()
            .map(|team| team.conference.clone())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn divisions(&self, conference: &str) -> Vec<String> {
        self.teams
            .values()
            .filter(|team| team.conference == conference)
            .map(|team| team.division.clone())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn conference_teams(&self, conference: &str) -> Vec<TeamId> {
        self.teams
            .values()
            .filter(|team| team.conference == conference)
            .map(|team| team.id)
            .collect()
    }

    pub fn division_teams(&self, conference: &str, division: &str) -> Vec<TeamId> {
        self.teams
            .values()
            .filter(|team| team.conference == conference && team.division == division)
            .map(|team| team.id)
            .collect()
    }

    pub fn conference_of(&self, id: TeamId) -> Option<&str> {
        self.teams.get(&id).map(|team| team.conference.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<Team> {
        vec![
            Team::new(TeamId(2), "Bravo", "BRV", "Atlas", "East"),
            Team::new(TeamId(1), "Alpha", "ALP", "Nova", "East"),
            Team::new(TeamId(3), "Charlie", "CHA", "Nova", "West"),
        ]
    }

    #[test]
    fn test_teams_are_kept_in_canonical_order() {
        let registry = TeamRegistry::new(teams(), "Nova").unwrap();

        assert_eq!(registry.ids(), vec![TeamId(1), TeamId(2), TeamId(3)]);
        assert_eq!(registry.conferences(), vec!["Atlas".to_string(), "Nova".to_string()]);
        assert_eq!(registry.conference_teams("Nova"), vec![TeamId(1), TeamId(3)]);
        assert_eq!(registry.division_teams("Nova", "West"), vec![TeamId(3)]);
    }

    #[test]
    fn test_duplicate_identity_is_rejected() {
        let mut teams = teams();
        teams.push(Team::new(TeamId(1), "Alpha Again", "AL2", "Nova", "East"));

        assert!(matches!(
            TeamRegistry::new(teams, "Nova"),
            Err(SeasonError::DuplicateTeam(TeamId(1)))
        ));
    }

    #[test]
    fn test_missing_conference_defaults_with_diagnostic() {
        let mut teams = teams();
        teams.push(Team::new(TeamId(9), "Drifter", "DRF", "", ""));

        let registry = TeamRegistry::new(teams, "Nova").unwrap();
        let team = registry.team(TeamId(9)).unwrap();

        assert_eq!(team.conference, "Nova");
        assert_eq!(team.division, "Unassigned");
        assert_eq!(registry.diagnostics().len(), 2);
    }

    #[test]
    fn test_rename_changes_label_only() {
        let mut registry = TeamRegistry::new(teams(), "Nova").unwrap();

        registry.rename(TeamId(1), "NEW").unwrap();

        assert_eq!(registry.label(TeamId(1)), "NEW");
        assert_eq!(registry.label(TeamId(42)), "#42");
        assert!(registry.rename(TeamId(42), "X").is_err());
    }
}
