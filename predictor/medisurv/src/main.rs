use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, FromArgMatches, Parser, Subcommand};
use log::LevelFilter;
use medisurv_form::{PredictError, PredictionHandler, RawInputs};

#[derive(Debug, Parser)]
#[command(
    name = "medisurv",
    version,
    about = "Breast cancer 10-year survival prediction form",
    long_about = "medisurv serves a single-page form that collects nine clinical features,\n\
        scales them with a pre-fitted scaler and classifies them with a pre-fitted\n\
        random forest.\n\n\
        EXAMPLES:\n\
        \n  medisurv                                   Serve the form on 127.0.0.1:8501\n\
        \n  medisurv serve --addr 0.0.0.0:8080         Serve on another address\n\
        \n  medisurv predict --age 55 --tumor-size 30  Predict once from the command line"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    artifacts: ArtifactArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args, Clone)]
struct ArtifactArgs {
    /// Classifier artifact (JSON export of the fitted random forest)
    #[arg(
        long = "model",
        env = "MEDISURV_MODEL",
        value_name = "FILE",
        default_value = "random_forest_model.json",
        global = true
    )]
    model: PathBuf,

    /// Scaler artifact (JSON export of the fitted standard scaler)
    #[arg(
        long = "scaler",
        env = "MEDISURV_SCALER",
        value_name = "FILE",
        default_value = "scaler.json",
        global = true
    )]
    scaler: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the prediction form over HTTP (default)
    Serve(ServeArgs),

    /// Run one prediction and print the outcome
    Predict(PredictArgs),
}

#[derive(Debug, Args, Clone)]
struct ServeArgs {
    /// Address the form is served on
    #[arg(
        long = "addr",
        env = "MEDISURV_ADDR",
        value_name = "ADDR",
        default_value = "127.0.0.1:8501"
    )]
    addr: SocketAddr,
}

impl ServeArgs {
    /// Serve options when no subcommand is given. `MEDISURV_ADDR` still applies.
    fn from_defaults() -> Result<Self, clap::Error> {
        let matches = Self::augment_args(clap::Command::new("serve")).try_get_matches_from(["serve"])?;
        Self::from_arg_matches(&matches)
    }
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    /// Age at diagnosis (20-100)
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    age: i64,

    /// Tumor size in mm (0.0-200.0)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    tumor_size: f64,

    /// Neoplasm histologic grade (1, 2, 3)
    #[arg(long, default_value_t = 1)]
    grade: i64,

    /// Tumor stage ("Stage I" to "Stage IV")
    #[arg(long, default_value = "Stage I")]
    tumor_stage: String,

    /// ER status (Positive, Negative)
    #[arg(long, default_value = "Positive")]
    er_status: String,

    /// PR status (Positive, Negative)
    #[arg(long, default_value = "Positive")]
    pr_status: String,

    /// HER2 status (Positive, Negative)
    #[arg(long, default_value = "Positive")]
    her2_status: String,

    /// Hormone therapy (Yes, No)
    #[arg(long, default_value = "Yes")]
    hormone_therapy: String,

    /// Radio therapy (Yes, No)
    #[arg(long, default_value = "Yes")]
    radio_therapy: String,

    /// Print the prediction as JSON
    #[arg(long)]
    json: bool,
}

impl PredictArgs {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            age: self.age,
            tumor_size: self.tumor_size,
            grade: self.grade,
            tumor_stage: self.tumor_stage.clone(),
            er_status: self.er_status.clone(),
            pr_status: self.pr_status.clone(),
            her2_status: self.her2_status.clone(),
            hormone_therapy: self.hormone_therapy.clone(),
            radio_therapy: self.radio_therapy.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_serve(addr: SocketAddr, handler: Arc<PredictionHandler>) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return 1;
        }
    };
    match runtime.block_on(medisurv::server::serve(addr, handler)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: server failed on {addr}: {e}");
            1
        }
    }
}

fn run_predict(args: &PredictArgs, handler: &PredictionHandler) -> i32 {
    match handler.submit(&args.raw_inputs()) {
        Ok(prediction) => {
            if args.json {
                match serde_json::to_string_pretty(&prediction) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("error: failed to serialize JSON: {e}");
                        return 1;
                    }
                }
            } else {
                println!("{}", prediction.outcome.message());
            }
            0
        }
        Err(err @ PredictError::Form(_)) => {
            eprintln!("error: {err}");
            2
        }
        Err(err) => {
            eprintln!("error: prediction failed: {err}");
            1
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Artifacts load before anything is served; failure here is fatal.
    let handler =
        match PredictionHandler::from_artifacts(&cli.artifacts.model, &cli.artifacts.scaler) {
            Ok(handler) => Arc::new(handler),
            Err(e) => {
                eprintln!("error: failed to load model artifacts: {e}");
                return 2;
            }
        };
    log::debug!("{handler:?}");

    match cli.command {
        Some(Command::Serve(args)) => run_serve(args.addr, handler),
        Some(Command::Predict(args)) => run_predict(&args, &handler),
        None => match ServeArgs::from_defaults() {
            Ok(args) => run_serve(args.addr, handler),
            Err(e) => {
                eprintln!("error: {e}");
                2
            }
        },
    }
}

fn main() {
    std::process::exit(run_cli());
}
