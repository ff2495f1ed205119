use clap::{Args as ClapArgs, Parser, Subcommand};
use plate_reader::config::{Config, EngineKind, EngineSettings, PipelineConfig};
use plate_reader::{engines, storage, BinarizationStrategy, BlurStrategy, PlateReader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "plate-reader")]
#[command(about = "Find and read the license plate in a photograph")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recognize the plate in an image and print the outcome as JSON
    Read(ReadArgs),
    /// List the source picture and the crops previously saved for it
    Crops {
        /// Source image path
        image: PathBuf,
    },
    /// List the OCR engines compiled into this build
    Engines,
}

#[derive(ClapArgs, Debug)]
pub struct ReadArgs {
    /// Source image path (PNG, JPEG or GIF)
    pub image: PathBuf,

    /// Resize width (requires --height)
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Resize height (requires --width)
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Blur applied before binarization
    #[arg(long, env = "LPR_BLUR", value_enum, default_value_t = BlurStrategy::Median)]
    pub blur: BlurStrategy,

    /// Binarization method
    #[arg(long, env = "LPR_BINARIZE", value_enum, default_value_t = BinarizationStrategy::AdaptiveGaussian)]
    pub binarize: BinarizationStrategy,

    /// Configuration string passed unchanged to the OCR engine
    #[arg(
        long,
        env = "LPR_OCR_CONFIG",
        default_value = plate_reader::config::DEFAULT_ENGINE_CONFIG,
        allow_hyphen_values = true
    )]
    pub ocr_config: String,

    /// OCR engine
    #[arg(long, env = "LPR_ENGINE", value_enum, default_value_t = EngineKind::Tesseract)]
    pub engine: EngineKind,

    /// Default language for OCR (e.g., "eng", "deu", "fra")
    #[arg(long, env = "LPR_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// Path to tessdata directory (uses TESSDATA_PREFIX env var if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<PathBuf>,

    /// Tesseract executable for the tesseract engine
    #[arg(long, env = "LPR_TESSERACT_BIN", default_value = "tesseract")]
    pub tesseract_bin: PathBuf,
}

impl From<ReadArgs> for Config {
    fn from(args: ReadArgs) -> Self {
        Self {
            pipeline: PipelineConfig {
                target_size: args.width.zip(args.height),
                blur: args.blur,
                binarization: args.binarize,
                engine_config: args.ocr_config,
            },
            engine: EngineSettings {
                kind: args.engine,
                language: args.language,
                tessdata_path: args.tessdata_path,
                tesseract_bin: args.tesseract_bin,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Read(read_args) => {
            let image = read_args.image.clone();
            let config = Config::from(read_args);

            tracing::info!(
                "plate-reader v{} reading {:?} (blur: {}, binarize: {}, engine: {})",
                env!("CARGO_PKG_VERSION"),
                image,
                config.pipeline.blur.as_str(),
                config.pipeline.binarization.as_str(),
                config.engine.kind.as_str()
            );

            let engine = engines::create(&config.engine)?;
            let reader = PlateReader::new(config.pipeline, engine);
            let outcome = reader.read(&image)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Crops { image } => {
            let pictures = storage::discover(&image)?;
            println!("{}", serde_json::to_string_pretty(&pictures)?);
        }
        Command::Engines => {
            for kind in engines::available() {
                println!("{}", kind.as_str());
            }
        }
    }

    Ok(())
}
