use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use scattered_lights::application::init::{default_name, init};
use scattered_lights::application::progress::parse_month;
use scattered_lights::application::{
    list_entries, manage_config::VALID_KEYS, AssessService, ConfigService, EmotionService,
    GuidanceService, ListFilter, ProgressService, ReportService, WriteEntryService, WriteRequest,
};
use scattered_lights::cli::{output, Cli, Commands};
use scattered_lights::domain::{resolve_day, Chakra, Period};
use scattered_lights::error::LightsError;
use scattered_lights::infrastructure::FileSystemRepository;
use std::str::FromStr;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("LIGHTS_LOG", "warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn parse_chakra(input: Option<String>) -> Result<Option<Chakra>, LightsError> {
    input
        .map(|key| {
            Chakra::parse(&key)
                .ok_or_else(|| LightsError::InvalidInput(format!("Unknown chakra: '{}'", key)))
        })
        .transpose()
}

fn parse_day(input: Option<String>, today: NaiveDate) -> Result<Option<NaiveDate>, LightsError> {
    input.map(|raw| resolve_day(&raw, today)).transpose()
}

fn run(cli: Cli) -> Result<(), LightsError> {
    let now = Local::now().fixed_offset();
    let today = now.date_naive();

    match cli.command {
        Some(Commands::Init { path, name }) => {
            let name = name.unwrap_or_else(default_name);
            let config = init(&path, &name)?;
            println!("Initialized journal for {} in {}", config.name, path.display());
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                let config = service.list()?;
                println!("name = {}", config.name);
                println!("editor = {}", config.editor);
                println!("consistency = {}", config.consistency);
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: lights config [--list | <key> [<value>]]");
                println!("Valid keys: {}", VALID_KEYS);
            }
            Ok(())
        }
        Some(Commands::Write { text, date, chakra }) => {
            let request = WriteRequest {
                text: if text.is_empty() {
                    None
                } else {
                    Some(text.join(" "))
                },
                date: parse_day(date, today)?,
                chakra: parse_chakra(chakra)?,
            };
            let stored = WriteEntryService::new(FileSystemRepository::discover()?).execute(request, now)?;
            println!("Saved {}", stored.entry.id);
            Ok(())
        }
        Some(Commands::List {
            from,
            to,
            limit,
            tag,
        }) => {
            let filter = ListFilter {
                from: parse_day(from, today)?,
                to: parse_day(to, today)?,
                limit,
                tag,
            };
            let entries = list_entries(&FileSystemRepository::discover()?, &filter)?;
            println!("{}", output::format_entry_list(&entries).trim_end());
            Ok(())
        }
        Some(Commands::Show { id }) => {
            let stored = FileSystemRepository::discover()?.find_entry(&id)?;
            print!("{}", output::format_entry(&stored));
            Ok(())
        }
        Some(Commands::Streak) => {
            let summary = ProgressService::new(FileSystemRepository::discover()?).streak(today)?;
            print!("{}", output::format_streak(&summary));
            Ok(())
        }
        Some(Commands::Calendar { month }) => {
            let month = match month {
                Some(raw) => parse_month(&raw)?,
                None => today,
            };
            let calendar = ProgressService::new(FileSystemRepository::discover()?).calendar(month, today)?;
            print!("{}", output::format_calendar(&calendar));
            Ok(())
        }
        Some(Commands::Assess { values, quiz }) => {
            let service = AssessService::new(FileSystemRepository::discover()?);
            let profile = if quiz {
                let stdin = std::io::stdin();
                let mut stdout = std::io::stdout();
                service.run_quiz(stdin.lock(), &mut stdout, Utc::now())?
            } else {
                service.set_values(&values, Utc::now())?
            };
            println!("Assessment saved");
            print!("{}", output::format_profile(&profile));
            Ok(())
        }
        Some(Commands::Chakras) => {
            let profile = AssessService::new(FileSystemRepository::discover()?).profile()?;
            println!("{}", output::format_profile(&profile).trim_end());
            Ok(())
        }
        Some(Commands::Feel { samples }) => {
            let logged = EmotionService::new(FileSystemRepository::discover()?).log(&samples, now)?;
            let summary: Vec<String> = logged
                .iter()
                .map(|s| format!("{} {}", s.emotion, s.intensity))
                .collect();
            println!("Logged {}", summary.join(", "));
            Ok(())
        }
        Some(Commands::Trends { period, limit }) => {
            let period = Period::from_str(&period).map_err(LightsError::InvalidInput)?;
            let points = EmotionService::new(FileSystemRepository::discover()?).trends(period, limit)?;
            println!("{}", output::format_trends(&points).trim_end());
            Ok(())
        }
        Some(Commands::Prompt { chakra }) => {
            let service = GuidanceService::new(FileSystemRepository::discover()?);
            let (chakra, prompt) = service.prompt(today, parse_chakra(chakra)?)?;
            println!("{} ({})", chakra, chakra.info().focus);
            println!("{}", prompt);
            Ok(())
        }
        Some(Commands::Recommend) => {
            let recommendations =
                GuidanceService::new(FileSystemRepository::discover()?).recommendations(today)?;
            println!("{}", output::format_recommendations(&recommendations).trim_end());
            Ok(())
        }
        Some(Commands::Report { output: target }) => {
            let service = ReportService::new(FileSystemRepository::discover()?);
            match target {
                Some(path) => {
                    let path = if path.is_absolute() {
                        path
                    } else {
                        std::env::current_dir()?.join(path)
                    };
                    service.write(today, &path)?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", service.build(today)?),
            }
            Ok(())
        }
        None => {
            println!("lights - wellness journal with chakra and emotion tracking");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
