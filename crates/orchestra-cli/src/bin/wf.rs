use clap::{Parser, Subcommand};
use orchestra_cli::cmd::{self, import::ImportArgs, mcp, report::ReportSubcommand};
use orchestra_cli::{root, tools};
use orchestra_core::paths::Layout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wf",
    about = "Import, activate and tag workflow definitions on an MCP workflow server",
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
    /// Import every *.json under a folder: wf import folder=<path> tags=<a,b>
    Import {
        /// folder=<path> and tags=<comma-list>
        #[arg(value_name = "KEY=VALUE")]
        assignments: Vec<String>,
        /// MCP server name from .mcp.json (default: n8n-mcp)
        #[arg(long)]
        server: Option<String>,
        /// Import tool name (default: workflows.import)
        #[arg(long)]
        import_tool: Option<String>,
        /// Activate tool name (default: workflows.activate)
        #[arg(long)]
        activate_tool: Option<String>,
        /// Tag tool name (default: workflows.tag)
        #[arg(long)]
        tag_tool: Option<String>,
    },

    /// Read or extend .workflows/_import-report.json
    Report {
        #[command(subcommand)]
        subcommand: ReportSubcommand,
    },

    /// Run as an MCP stdio server exposing import_workflows
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
        Commands::Import {
            assignments,
            server,
            import_tool,
            activate_tool,
            tag_tool,
        } => {
            let args = ImportArgs {
                assignments,
                server,
                import_tool,
                activate_tool,
                tag_tool,
            };
            cmd::import::run(&layout, args, cli.json)
        }
        Commands::Report { subcommand } => cmd::report::run(&layout, subcommand, cli.json),
        Commands::Mcp => mcp::run(&layout, mcp::WORKFLOW_SERVER, tools::workflow_tools()),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
