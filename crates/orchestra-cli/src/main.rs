use clap::{Parser, Subcommand};
use orchestra_cli::cmd::{self, jobs::JobsSubcommand, mcp};
use orchestra_cli::{root, tools};
use orchestra_core::paths::Layout;
use orchestra_core::plan::Budgets;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "orchestra",
    about = "Route task titles and slash commands into role-tagged job files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .orchestra/ or .git/)
    #[arg(long, global = true, env = "ORCHESTRA_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure the .orchestra/ folders exist
    Scaffold,

    /// Create or overwrite .orchestra/plan.json
    Plan {
        goal: String,
        /// Largest Contentful Paint budget in milliseconds
        #[arg(long)]
        lcp_ms: Option<f64>,
        /// Cumulative Layout Shift budget
        #[arg(long)]
        cls: Option<f64>,
        /// Minimum Lighthouse score
        #[arg(long)]
        lighthouse_min: Option<f64>,
    },

    /// Create one job per title
    Split {
        #[arg(required = true)]
        titles: Vec<String>,
        /// Constraint shared by every job (repeatable)
        #[arg(long = "constraint")]
        constraints: Vec<String>,
        /// Copy for the job at the same position (repeatable)
        #[arg(long = "copy")]
        copies: Vec<String>,
    },

    /// Route a single title to a role and branch, and write its job file
    Route {
        title: String,
        /// Constraint for the job (repeatable)
        #[arg(long = "constraint")]
        constraints: Vec<String>,
        #[arg(long, default_value = "")]
        copy: String,
    },

    /// Expand a slash command such as "/db add users table" into a job
    Slash { input: String },

    /// Inspect written jobs
    Jobs {
        #[command(subcommand)]
        subcommand: JobsSubcommand,
    },

    /// Create a branch, commit everything and open a PR (best effort)
    Pr {
        branch: String,
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        /// Base branch (default: pr.base from config, else main)
        #[arg(long)]
        base: Option<String>,
    },

    /// Run as an MCP stdio server
    Mcp,
}

fn main() {
    let cli = Cli::parse();

    orchestra_cli::init_tracing(match &cli.command {
        Commands::Mcp => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    });

    let layout = Layout::new(root::resolve_root(cli.root.as_deref()));

    let result = match cli.command {
        Commands::Scaffold => cmd::scaffold::run(&layout, cli.json),
        Commands::Plan {
            goal,
            lcp_ms,
            cls,
            lighthouse_min,
        } => {
            let budgets = Budgets {
                lcp_ms,
                cls,
                lighthouse_min,
            };
            cmd::plan::run(&layout, &goal, budgets, cli.json)
        }
        Commands::Split {
            titles,
            constraints,
            copies,
        } => cmd::split::run(&layout, &titles, &constraints, &copies, cli.json),
        Commands::Route {
            title,
            constraints,
            copy,
        } => cmd::route::run(&layout, &title, constraints, &copy, cli.json),
        Commands::Slash { input } => cmd::slash::run(&layout, &input, cli.json),
        Commands::Jobs { subcommand } => cmd::jobs::run(&layout, subcommand, cli.json),
        Commands::Pr {
            branch,
            title,
            body,
            base,
        } => cmd::pr::run(&layout, branch, title, body, base, cli.json),
        Commands::Mcp => mcp::run(&layout, mcp::ORCHESTRA_SERVER, tools::orchestra_tools()),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
