use clap::{Args, Parser, Subcommand};
use fairs::ledger::create_checkpoint_folder;
use fairs::windowing::split;
use fairs::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fairs", about = "Roulette extraction windows, betting simulation and training sessions")]
struct Cli {
    /// JSON configuration; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Window the extraction history into train/test sample matrices.
    Prepare(DatasetArgs),
    /// Play one episode over the test partition.
    Play {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Always place this action (0..=36 number, 37 red, 38 black) instead of random bets.
        #[arg(long)]
        action: Option<Discrete>,
    },
    /// Start or resume a training session in a checkpoint folder.
    Session {
        /// Existing checkpoint folder to resume.
        #[arg(long, conflicts_with = "root")]
        checkpoint: Option<PathBuf>,
        /// Create a new checkpoint folder under this directory.
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long, default_value = "FAIRS")]
        model_name: String,
    },
}

#[derive(Args)]
struct DatasetArgs {
    /// `;`-separated CSV with a `timeseries` column.
    #[arg(long)]
    dataset: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Configuration::load(path)?,
        None => Configuration::default(),
    };

    match cli.command {
        Command::Prepare(args) => prepare(&cfg, &args),
        Command::Play { dataset, action } => play(&cfg, &dataset, action),
        Command::Session {
            checkpoint,
            root,
            model_name,
        } => session(&cfg, checkpoint, root, &model_name),
    }
}

fn load_series(cfg: &Configuration, args: &DatasetArgs) -> Result<ExtractionSeries> {
    load_extractions(&args.dataset)?.tail_fraction(cfg.dataset.data_fraction)
}

fn prepare(cfg: &Configuration, args: &DatasetArgs) -> Result<()> {
    let series = load_series(cfg, args)?;
    let values: Vec<Discrete> = match cfg.dataset.encoding {
        Encoding::Numbers => series.numbers().iter().map(|&n| n.into()).collect(),
        Encoding::Colors => series.color_classes(&WheelTopology::european()),
    };

    let windower = cfg.windower()?;
    let (train, test) = split(&values, cfg.dataset.test_fraction, cfg.dataset.invert_test)?;
    for (name, part) in [("train", train), ("test", test)] {
        let samples = windower.window(part);
        let (x, y) = windower.to_arrays(&samples)?;
        println!(
            "{name}: {} extractions, {} samples, inputs {:?}, targets {:?}",
            part.len(),
            samples.len(),
            x.shape(),
            y.shape()
        );
    }

    Ok(())
}

fn play(cfg: &Configuration, args: &DatasetArgs, action: Option<Discrete>) -> Result<()> {
    let series = load_series(cfg, args)?;
    let (_, test) = split(
        series.numbers(),
        cfg.dataset.test_fraction,
        cfg.dataset.invert_test,
    )?;

    let simulator = BettingSimulator::new(cfg.simulator()?)?;
    let mut env = RouletteEnv::new(simulator, test.to_vec())?;
    let mut policy: Box<dyn Policy> = match action {
        Some(index) => Box::new(ConstantPolicy(Action::from_index(index)?)),
        None => Box::new(RandomPolicy::seeded(cfg.seed)),
    };

    let episode = play_episode(&mut env, policy.as_mut())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&episode.summary).map_err(std::io::Error::from)?
    );

    Ok(())
}

fn session(
    cfg: &Configuration,
    checkpoint: Option<PathBuf>,
    root: Option<PathBuf>,
    model_name: &str,
) -> Result<()> {
    let checkpoint = match (checkpoint, root) {
        (Some(path), _) => path,
        (None, Some(root)) => create_checkpoint_folder(root, model_name)?,
        (None, None) => {
            return Err(Error::InvalidParameter(
                "either --checkpoint or --root is required".to_string(),
            ))
        }
    };

    let ledger = SessionLedger::from_config(cfg)?;
    let resumption = ledger.begin_or_resume(&checkpoint, cfg.training.additional_epochs)?;
    println!(
        "{}: epochs {}..{}, {} recorded",
        checkpoint.display(),
        resumption.from_epoch,
        resumption.target_epoch,
        resumption.prior_history().len()
    );

    Ok(())
}
