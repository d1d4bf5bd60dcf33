use database::{DatabaseGenerator, DatabaseLoader};
use env_logger::Env;
use gridiron_core::utils::TimeEstimation;
use gridiron_core::{ScoreboardSimulator, Season};
use log::info;
use std::env;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);
    let database = database?;

    info!("database loaded: {} ms", estimated);

    let mut data = DatabaseGenerator::generate(&database)?;

    if let Some(year) = env_number("GRIDIRON_YEAR") {
        data.settings = data.settings.with_year(year);
    }
    if let Some(seed) = env_number("GRIDIRON_SEED") {
        data.settings = data.settings.with_seed(seed);
    }
    let seasons: usize = env_number("GRIDIRON_SEASONS").unwrap_or(1);

    let mut season = Season::new(data.registry, data.settings)?;
    let simulator = ScoreboardSimulator::new();

    for _ in 0..seasons {
        let year = season.calendar().year();
        let (summary, estimated) = TimeEstimation::estimate(|| season.simulate_year(&simulator));

        info!(
            "season {} simulated: {} days, {} games, {} diagnostics, {} ms",
            year,
            summary.days,
            summary.games,
            summary.diagnostics.len(),
            estimated
        );

        for archive in &summary.archives {
            for (conference, teams) in &archive.standings {
                let leaders: Vec<String> = teams.iter().take(4).map(|team| season.registry().label(*team)).collect();
                info!("{} {}: {}", archive.year, conference, leaders.join(", "));
            }
        }

        for record in &summary.champions {
            info!(
                "🏆 {} champion {}, runner-up {}",
                record.year,
                season.registry().label(record.champion),
                season.registry().label(record.runner_up)
            );
        }
    }

    Ok(())
}
