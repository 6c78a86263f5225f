#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use shiftboard::{
    io,
    model::{ShiftId, ShiftType},
    request::{
        CheckOverlapRequest, CreateShiftRequest, DateFormat, FieldIssue, PriceFilter,
        ShiftDateInput, ShiftInput, TypeFilter, ValidationError,
    },
    service::{ServiceError, ServiceOptions, ShiftService},
    storage::JsonStorage,
};
use tracing::info;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de gestion de gardes (stockage JSON local)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du board
    #[arg(long, global = true, default_value = "shifts.json")]
    board: String,

    /// Format des dates : dmy (dd-mm-yyyy) ou iso (yyyy-mm-dd)
    #[arg(long, global = true, value_enum, default_value_t = DateFormat::DayMonthYear)]
    date_format: DateFormat,

    /// Vérifie aussi les dates d'une même soumission entre elles
    #[arg(long, global = true)]
    check_batch: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct ShiftArgs {
    /// Requête JSON complète `{"shift": {...}, "dates": [...]}`
    #[arg(long, conflicts_with_all = ["title", "description", "dates"])]
    json: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, default_value_t = 0.0)]
    price: f64,
    /// "DATE START END TYPE", répétable
    #[arg(long = "date", value_name = "DATE START END TYPE")]
    dates: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer une garde
    Create(ShiftArgs),

    /// Remplacer une garde et toutes ses dates
    Update {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        shift: ShiftArgs,
    },

    /// Supprimer une garde
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Afficher une garde
    Get {
        #[arg(long)]
        id: String,
    },

    /// Lister les gardes (plus récentes d'abord)
    List,

    /// Filtrer par prix (bornes incluses)
    FilterPrice {
        #[arg(long, default_value_t = 0.0)]
        min_price: f64,
        #[arg(long)]
        max_price: f64,
    },

    /// Filtrer par type
    FilterType {
        #[arg(long = "type")]
        shift_type: ShiftType,
    },

    /// Prix minimum et maximum
    PriceRange,

    /// Vérifier un créneau sans rien écrire
    CheckOverlap {
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long = "type")]
        shift_type: ShiftType,
        /// Garde dont les dates sont ignorées
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Importer des gardes depuis un CSV (tout ou rien)
    Import {
        #[arg(long)]
        csv: String,
    },

    /// Exporter le board
    Export {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

impl ShiftArgs {
    fn into_request(self) -> Result<CreateShiftRequest> {
        if let Some(path) = self.json {
            let data = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            let request = serde_json::from_slice(&data).map_err(|err| {
                ServiceError::from(ValidationError::single("body", err.to_string()))
            })?;
            return Ok(request);
        }
        let mut dates = Vec::with_capacity(self.dates.len());
        let mut issues = Vec::new();
        for (idx, spec) in self.dates.iter().enumerate() {
            match parse_date_spec(idx, spec) {
                Ok(date) => dates.push(date),
                Err(issue) => issues.push(issue),
            }
        }
        if !issues.is_empty() {
            return Err(ServiceError::from(ValidationError { issues }).into());
        }
        Ok(CreateShiftRequest {
            shift: ShiftInput {
                title: self.title.unwrap_or_default(),
                description: self.description,
                price: self.price,
            },
            dates,
        })
    }
}

fn parse_date_spec(idx: usize, spec: &str) -> std::result::Result<ShiftDateInput, FieldIssue> {
    let parts: Vec<&str> = spec.split_whitespace().collect();
    let [date, start, end, kind] = parts.as_slice() else {
        return Err(FieldIssue {
            field: format!("dates[{idx}]"),
            message: format!("invalid --date {spec:?}: expected \"DATE START END TYPE\""),
        });
    };
    let shift_type: ShiftType = kind.parse().map_err(|message| FieldIssue {
        field: format!("dates[{idx}].type"),
        message,
    })?;
    Ok(ShiftDateInput::new(date, start, end, shift_type))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let opts = ServiceOptions {
        date_format: cli.date_format,
        check_batch: cli.check_batch,
        ..ServiceOptions::default()
    };
    let storage = JsonStorage::open(&cli.board)?;
    let mut service = ShiftService::open(&storage, opts)?;

    match cli.cmd {
        Commands::Create(args) => {
            let created = service.create(args.into_request()?)?;
            service.save(&storage)?;
            info!(status = 201, shift_id = created.id.as_str(), "created");
            print_json(&created)?;
        }
        Commands::Update { id, shift } => {
            let updated = service.update(&ShiftId::new(id), shift.into_request()?)?;
            service.save(&storage)?;
            print_json(&updated)?;
        }
        Commands::Delete { id } => {
            let removed = service.delete(&ShiftId::new(id))?;
            service.save(&storage)?;
            print_json(&json!({
                "message": "Shift deleted successfully",
                "id": removed.id,
            }))?;
        }
        Commands::Get { id } => {
            print_json(service.get(&ShiftId::new(id))?)?;
        }
        Commands::List => {
            print_json(&service.list())?;
        }
        Commands::FilterPrice {
            min_price,
            max_price,
        } => {
            let filter = PriceFilter {
                min_price,
                max_price,
            };
            print_json(&service.filter_by_price(filter)?)?;
        }
        Commands::FilterType { shift_type } => {
            print_json(&service.filter_by_type(TypeFilter { shift_type }))?;
        }
        Commands::PriceRange => {
            print_json(&service.price_range())?;
        }
        Commands::CheckOverlap {
            date,
            start,
            end,
            shift_type,
            exclude,
        } => {
            let request = CheckOverlapRequest {
                date,
                start_time: start,
                end_time: end,
                shift_type,
                exclude_shift_id: exclude.map(ShiftId::new),
            };
            print_json(&service.check_overlap(&request)?)?;
        }
        Commands::Import { csv } => {
            let requests = io::import_shifts_csv(csv)?;
            let count = requests.len();
            for request in requests {
                service.create(request)?;
            }
            service.save(&storage)?;
            print_json(&json!({ "imported": count }))?;
        }
        Commands::Export { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_board_json(path, service.board())?;
            }
            if let Some(path) = out_csv {
                io::export_entries_csv(path, service.board())?;
            }
        }
    }
    Ok(())
}

/// Affiche l'erreur et retourne le code de sortie.
fn report(err: &anyhow::Error) -> i32 {
    let Some(service_err) = err.downcast_ref::<ServiceError>() else {
        eprintln!("error: {err:#}");
        return 1;
    };
    let message = match service_err {
        ServiceError::Storage(inner) => format!("{inner:#}"),
        other => other.to_string(),
    };
    let mut body = json!({
        "status": service_err.status(),
        "error": service_err.kind(),
        "message": message,
    });
    if let ServiceError::Validation(v) = service_err {
        body["issues"] = json!(v.issues.iter().map(ToString::to_string).collect::<Vec<_>>());
    }
    eprintln!("{body}");
    match service_err {
        ServiceError::Validation(_) => 3,
        ServiceError::NotFound(_) => 4,
        ServiceError::Overlap { .. } => 5,
        ServiceError::Storage(_) => 1,
    }
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match run(cli) {
        Ok(()) => 0,
        Err(err) => report(&err),
    };
    std::process::exit(code);
}
