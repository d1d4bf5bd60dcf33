use crate::{DatabaseEntity, SettingsEntity, TeamEntity};
use gridiron_core::{SeasonResult, SeasonSettings, Team, TeamBuilder, TeamId, TeamRegistry};

pub struct LeagueData {
    pub registry: TeamRegistry,
    pub settings: SeasonSettings,
}

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    pub fn generate(data: &DatabaseEntity) -> SeasonResult<LeagueData> {
        let settings = DatabaseGenerator::generate_settings(&data.settings);
        settings.validate()?;

        let teams = data.teams.iter().map(DatabaseGenerator::generate_team).collect();
        let registry = TeamRegistry::new(teams, &settings.default_conference)?;

        Ok(LeagueData { registry, settings })
    }

    fn generate_settings(entity: &SettingsEntity) -> SeasonSettings {
        let mut settings = SeasonSettings::default();

        if let Some(year) = entity.start_year {
            settings.start_year = year;
        }
        if let Some(seed) = entity.seed {
            settings.seed = seed;
        }
        if let Some(conference) = &entity.default_conference {
            settings.default_conference = conference.clone();
        }

        settings
    }

    fn generate_team(entity: &TeamEntity) -> Team {
        let mut builder = TeamBuilder::new()
            .id(TeamId(entity.id))
            .name(&entity.name)
            .conference(&entity.conference)
            .division(&entity.division);

        if let Some(abbreviation) = &entity.abbreviation {
            builder = builder.abbreviation(abbreviation);
        }
        if let Some(rating) = entity.rating {
            builder = builder.rating(rating);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseLoader, LeagueLoader};
    use gridiron_core::Diagnostic;

    #[test]
    fn test_embedded_league_builds_registry() {
        let data = DatabaseGenerator::generate(&DatabaseLoader::load().unwrap()).unwrap();

        assert_eq!(data.registry.len(), 32);
        assert_eq!(data.registry.conferences(), vec!["Atlas", "Nova"]);
        for conference in data.registry.conferences() {
            assert_eq!(data.registry.divisions(&conference).len(), 4);
        }
        assert!(data.registry.diagnostics().is_empty());
        assert_eq!(data.settings.start_year, 2025);
        assert_eq!(data.settings.seed, 20250904);
    }

    #[test]
    fn test_team_without_conference_joins_default() {
        let league = LeagueLoader::parse(
            r#"{
                "settings": { "default_conference": "Atlas" },
                "teams": [{ "id": 9, "name": "Drifters", "division": "East" }]
            }"#,
        )
        .unwrap();
        let entity = DatabaseEntity { settings: league.settings, teams: league.teams };

        let data = DatabaseGenerator::generate(&entity).unwrap();

        assert_eq!(data.registry.conference_of(TeamId(9)), Some("Atlas"));
        assert!(matches!(data.registry.diagnostics()[0], Diagnostic::DataQuality { .. }));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let league = LeagueLoader::parse(
            r#"{ "teams": [{ "id": 1, "name": "A" }, { "id": 1, "name": "B" }] }"#,
        )
        .unwrap();
        let entity = DatabaseEntity { settings: league.settings, teams: league.teams };

        assert!(DatabaseGenerator::generate(&entity).is_err());
    }
}
