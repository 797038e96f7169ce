use anyhow::Result;
use clap::{Parser, Subcommand};
use pharmacat_core::{
    submit_search, ApiError, CategoryId, DrugId, FilterSync, Gateway, GatewayConfig, Navigator,
    PrescriptionFilter, SortOrder,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod render;

#[derive(Parser)]
#[command(name = "pharmacat")]
#[command(about = "Browse the pharmaceutical reference catalog")]
struct Cli {
    /// API root, e.g. http://localhost:8000/api [default: $PHARMACAT_API_URL]
    #[arg(long)]
    api_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Featured drugs
    Top,
    /// All categories with their drug counts
    Categories,
    /// One category
    Category {
        id: CategoryId,
        /// Also list the drugs filed under it
        #[arg(long)]
        drugs: bool,
    },
    /// Filtered drug listing
    Drugs {
        /// Shared listing query string to start from, e.g. "search=ibuprofen"
        #[arg(long, default_value = "")]
        query: String,
        /// Free-text search over name and description
        #[arg(long)]
        search: Option<String>,
        /// Toggle a category id (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
        /// all, prescription or otc
        #[arg(long, value_parser = str::parse::<PrescriptionFilter>)]
        prescription: Option<PrescriptionFilter>,
        /// name_asc, name_desc or category
        #[arg(long, value_parser = str::parse::<SortOrder>)]
        sort: Option<SortOrder>,
    },
    /// One drug with its clinical details
    Drug { id: DrugId },
    /// Resolve a search box submission to a listing link
    Search { text: String },
}

/// Records where the page would be: the listing's query string and any
/// navigation away from it.
#[derive(Debug, Default)]
struct ShareLink {
    query: String,
    location: Option<String>,
}

impl ShareLink {
    fn listing_url(&self) -> String {
        if self.query.is_empty() {
            pharmacat_core::sync::DRUGS_PATH.to_string()
        } else {
            format!("{}?{}", pharmacat_core::sync::DRUGS_PATH, self.query)
        }
    }
}

impl Navigator for ShareLink {
    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    fn navigate(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("pharmacat_core=info".parse()?))        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.api_url {
        Some(url) => GatewayConfig::new(url)?,
        None => GatewayConfig::from_env()?,
    };
    tracing::debug!(base_url = config.base_url(), "using catalog API");
    let gateway = Gateway::connect(&config);
    let json = cli.json;

    match cli.command {
        Commands::Top => render::drugs(&gateway.list_top_drugs(), json)?,
        Commands::Categories => render::categories(&gateway.list_categories(), json)?,
        Commands::Category { id, drugs } => {
            let category = gateway
                .get_category(id)
                .map_err(|e| not_found(e, "category", id))?;
            render::category(&category, json)?;
            if drugs {
                render::drugs(&gateway.list_drugs_by_category(id), json)?;
            }
        }
        Commands::Drugs {
            query,
            search,
            categories,
            prescription,
            sort,
        } => {
            let (mut page, mut ticket) = FilterSync::new(&query, ShareLink::default());
            if let Some(search) = search {
                ticket = page.set_search(&search).unwrap_or(ticket);
            }
            for id in &categories {
                ticket = page.toggle_category(id).unwrap_or(ticket);
            }
            if let Some(filter) = prescription {
                ticket = page.set_prescription_filter(filter).unwrap_or(ticket);
            }
            if let Some(sort) = sort {
                ticket = page.set_sort_by(sort).unwrap_or(ticket);
            }
            page.fetch(ticket, &gateway);
            let drugs = page.results().unwrap_or_default();
            render::listing(drugs, &page.navigator().listing_url(), json)?;
        }
        Commands::Drug { id } => {
            let drug = gateway.get_drug(id).map_err(|e| not_found(e, "drug", id))?;
            render::drug(&drug, json)?;
        }
        Commands::Search { text } => {
            let mut link = ShareLink::default();
            if submit_search(&text, &mut link) {
                println!("{}", link.location.unwrap_or_default());
            } else {
                eprintln!("nothing to search for");
            }
        }
    }

    Ok(())
}

fn not_found(err: ApiError, kind: &str, id: u64) -> anyhow::Error {
    match err {
        ApiError::NotFound => anyhow::anyhow!("{kind} {id} not found"),
        other => anyhow::Error::new(other).context(format!("could not load {kind} {id}")),
    }
}
