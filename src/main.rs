use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seqlist::{Config, OrderedList, OutputFormat, Person, SeqList};

#[derive(Parser)]
#[command(
    name = "seqlist",
    about = "Run scripts of list operations against an ordered list",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug events to stderr unless `RUST_LOG` is set
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the named scripts, or all discovered scripts if no name is given
    Run {
        /// Names of the scripts to run
        names: Vec<String>,

        #[command(flatten)]
        opts: ConfigOpts,
    },

    /// List the discovered scripts
    List {
        #[command(flatten)]
        opts: ConfigOpts,
    },

    /// Walk through the list operations on a list of names
    Demo,
}

#[derive(clap::Args)]
struct ConfigOpts {
    /// YAML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding the scripts, overrides the config file
    #[arg(short, long)]
    scripts_path: Option<String>,

    /// Output format, overrides the config file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl ConfigOpts {
    /// Builds the config from defaults, the config file and the command line, in that order.
    fn load(&self) -> Result<Config> {
        let mut c = Config::default();
        if let Some(f) = &self.config {
            c.load_from_file(f)?;
        }
        if let Some(p) = &self.scripts_path {
            c.scripts_path.clone_from(p);
        }
        if let Some(f) = self.format {
            c.format = f;
        }
        Ok(c)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn run_demo() -> Result<()> {
    let mut names: OrderedList<String> =
        vec!["zhangsan".into(), "lisi".into(), "wangwu".into()].into();

    println!("{}", names.get(0)?);
    println!("{}", names.index_of(&"lisi".into())?);

    names.set(1, "李四".into())?;
    names.append("王小二".into());
    names.insert(1, "xiaomeim".into());
    names.extend(vec!["孙悟空".into(), "沙和尚".into(), "猪八戒".into()].into());
    println!("{names}");

    names.remove(&"wangwu".into())?;
    names.pop_last()?;
    names.pop_at(3)?;
    println!("{names}");

    names.clear();
    println!("{names}");

    let p = Person::new("小芳");
    println!("{p:#}");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run { names, opts } => {
            let c = opts.load()?;
            let format = c.format;
            let r = SeqList::new_from_config(c)?;
            let report = r.run_scripts(&names)?;
            print!("{}", report.render(format)?);
        }
        Commands::List { opts } => {
            let r = SeqList::new_from_config(opts.load()?)?;
            for (name, path) in r.scripts() {
                println!("{name}\t{}", path.display());
            }
        }
        Commands::Demo => run_demo()?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
