use api_shared::{AnalyticsDto, CaseDto, HospitalDto};
use clap::{Parser, Subcommand};
use oncora_core::config::genomic_markers_from_env_value;
use oncora_core::seed::seed_store;
use oncora_core::{
    AnalyticsRequest, CallerIdentity, CaseFilter, CaseService, CoreConfig, HospitalDirectory,
    InMemoryCaseStore, NonEmptyText, PageRequest, RandomIdGenerator,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "oncora")]
#[command(about = "Oncora lymphoma case registry CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List participating hospitals
    Hospitals,
    /// Search the demo registry
    Cases {
        /// Cancer subtype (e.g. hodgkin-lymphoma)
        #[arg(long)]
        subtype: Option<String>,
        /// Region (e.g. us-west)
        #[arg(long)]
        region: Option<String>,
        /// Age range (e.g. 40-49)
        #[arg(long)]
        age_range: Option<String>,
        /// Genomic marker substring
        #[arg(long)]
        marker: Option<String>,
        /// Free-text search term
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        offset: Option<String>,
        #[arg(long)]
        limit: Option<String>,
    },
    /// Print registry analytics
    Analytics {
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        region: Option<String>,
    },
}

/// A service over a freshly seeded in-memory registry.
fn demo_service() -> Result<CaseService, Box<dyn std::error::Error>> {
    let vocabulary = genomic_markers_from_env_value(std::env::var("ONCORA_GENOMIC_MARKERS").ok())?;
    let defaults = CoreConfig::default();
    let cfg = CoreConfig::new(
        vocabulary,
        defaults.default_page_limit(),
        defaults.max_page_limit(),
        true,
        defaults.session_ttl(),
    )?;

    let store = Arc::new(InMemoryCaseStore::new());
    let ids = Arc::new(RandomIdGenerator);
    seed_store(store.as_ref(), ids.as_ref())?;
    Ok(CaseService::new(store, ids, Arc::new(cfg)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Hospitals) => {
            let directory = HospitalDirectory::default();
            for hospital in directory.list().iter().map(HospitalDto::from) {
                println!("{:<18} {:<32} {}", hospital.id, hospital.name, hospital.region);
            }
        }
        Some(Commands::Cases {
            subtype,
            region,
            age_range,
            marker,
            search,
            offset,
            limit,
        }) => {
            let service = demo_service()?;
            let filter = CaseFilter {
                cancer_subtype: subtype,
                region,
                age_range,
                genomic_marker: marker,
                search,
            };
            let page = PageRequest::parse(offset.as_deref(), limit.as_deref(), service.config())?;
            let caller = CallerIdentity {
                id: NonEmptyText::new("cli")?,
                region: None,
                verified: false,
            };

            let result = service.query_cases(&caller, &filter, page)?;
            let cases: Vec<CaseDto> = result.cases.iter().map(|c| CaseDto::from(c.as_ref())).collect();
            println!("{}", serde_json::to_string_pretty(&cases)?);
            println!(
                "{} of {} matching cases{}",
                cases.len(),
                result.total,
                if result.has_more { " (more available)" } else { "" }
            );
        }
        Some(Commands::Analytics { timeframe, region }) => {
            let service = demo_service()?;
            let summary = service.analytics(&AnalyticsRequest::new(timeframe, region))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&AnalyticsDto::from(&summary))?
            );
        }
        None => {
            println!("Use 'oncora --help' for commands");
        }
    }

    Ok(())
}
