use crate::*;
use clap::Parser;
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

/// `retrain` on its own trains, taking the `train` flags directly.
#[derive(Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    train: Train,
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Train(self.train))
    }
}

#[derive(clap::Args)]
pub struct Train {
    #[arg(long, num_args = 1.., default_value = DEFAULT_DATA_PATH, help = "Paths to the Core and NLU data files")]
    data: Vec<PathBuf>,
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, help = "The policy and NLU pipeline configuration of your bot")]
    config: PathBuf,
    #[arg(short, long, default_value = DEFAULT_DOMAIN_PATH, help = "Domain file")]
    domain: PathBuf,
    #[command(flatten)]
    output: Output,
    #[arg(
        long,
        help = "Only determine what needs retraining. The exit code is a bitmask: \
                1 = Core, 2 = NLU, 4 = responses, 8 = forced"
    )]
    dry_run: bool,
    #[arg(long, help = "Force a model training even if the data has not changed")]
    force: bool,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Train a model using your NLU data and stories")]
    Train(Train),
    #[command(about = "Train the dialogue policies using your stories", alias = "train-core")]
    Core {
        #[arg(short, long, default_value = DEFAULT_STORIES_PATH, help = "File or folder containing your stories and rules")]
        stories: PathBuf,
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, help = "The policy configuration of your bot")]
        config: PathBuf,
        #[arg(short, long, default_value = DEFAULT_DOMAIN_PATH, help = "Domain file")]
        domain: PathBuf,
        #[command(flatten)]
        output: Output,
    },
    #[command(about = "Train the NLU pipeline using your NLU data", alias = "train-nlu")]
    Nlu {
        #[arg(short = 'u', long, default_value = DEFAULT_NLU_DATA_PATH, help = "File or folder containing your NLU data")]
        nlu: PathBuf,
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, help = "The NLU pipeline configuration of your bot")]
        config: PathBuf,
        #[arg(short, long, help = "Domain file")]
        domain: Option<PathBuf>,
        #[command(flatten)]
        output: Output,
    },
}

#[derive(clap::Args)]
pub struct Output {
    #[arg(long, default_value = DEFAULT_MODELS_PATH, help = "Directory where your models should be stored")]
    out: PathBuf,
    #[arg(long, help = "If set, the name of the model directory will be set to the given name")]
    fixed_model_name: Option<String>,
}

impl Output {
    fn session(self) -> Session<Snapshot> {
        Session::new(Snapshot, self.out).fixed_model_name(self.fixed_model_name)
    }
}

impl Command {
    pub async fn run(self) -> anyhow::Result<Outcome> {
        let outcome = match self {
            Self::Train(Train {
                data,
                config,
                domain,
                output,
                dry_run,
                force,
            }) => {
                let data = TrainingData::load(&config, Some(domain.as_path()), &data)?;
                output.session().force(force).dry_run(dry_run).train(data).await?
            }
            Self::Core {
                stories,
                config,
                domain,
                output,
            } => {
                let data = TrainingData::load(&config, Some(domain.as_path()), &[stories])?;
                output.session().train_core(data).await?
            }
            Self::Nlu {
                nlu,
                config,
                domain,
                output,
            } => {
                let data = TrainingData::load(&config, domain.as_deref(), &[nlu])?;
                output.session().train_nlu(data).await?
            }
        };
        Self::report(&outcome);
        Ok(outcome)
    }

    fn report(outcome: &Outcome) {
        match outcome {
            Outcome::DryRun(run) if run.code == 0 => println!("{}", run.to_string().green()),
            Outcome::DryRun(run) => println!("{}", run.to_string().yellow()),
            Outcome::Trained(model) => println!(
                "{} {}",
                "Your model is trained and saved at".green(),
                model.path().display()
            ),
            Outcome::UpToDate(model) => println!(
                "{} {}",
                "Nothing changed. You can use the old model stored at".green(),
                model.path().display()
            ),
            Outcome::Skipped => println!("{}", "No model was trained.".yellow()),
        }
    }
}
