use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use textfx::{
    Controller, JsonFileStore, PreviewRequest, PreviewSink, Registry, extract, render,
};

#[derive(Parser, Debug)]
#[command(name = "textfx", version)]
struct Cli {
    /// Effect catalog JSON replacing the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Session file (defaults to the platform data directory).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog effects and their parameters.
    Effects,
    /// Render an effect's code with defaults, optionally overridden.
    Render(RenderArgs),
    /// Report what can be read back out of source text.
    Extract(InputArgs),
    /// Print the session as JSON.
    Show,
    /// Print the session's current source text.
    Code,
    /// Print the preview inputs as JSON.
    Preview,
    /// Select an effect, resetting its parameters.
    Select {
        /// Effect name.
        name: String,
    },
    /// Set parameters of the selected effect (`name=value`).
    Set {
        /// Assignments.
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Replace the preview text.
    Text {
        /// New text.
        text: String,
    },
    /// Replace the source text and reconcile it into parameters.
    EditCode(InputArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Effect name.
    #[arg(long)]
    effect: String,

    /// Parameter overrides (`name=value`).
    #[arg(long = "set")]
    assignments: Vec<String>,
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Source file; reads stdin when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

struct JsonPreview;

impl PreviewSink for JsonPreview {
    fn present(&mut self, request: &PreviewRequest<'_>) {
        match serde_json::to_string_pretty(request) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "failed to encode preview request"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = match &cli.catalog {
        Some(path) => Registry::from_path(path)?,
        None => Registry::builtin()?,
    };

    match cli.cmd {
        Command::Effects => cmd_effects(&registry),
        Command::Render(args) => cmd_render(&registry, args),
        Command::Extract(args) => cmd_extract(args),
        cmd => cmd_session(&registry, cli.store, cmd),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_effects(registry: &Registry) -> anyhow::Result<()> {
    for def in registry.list() {
        println!("{} ({})", def.name, def.code_name());
        for p in &def.params {
            match p.range {
                Some(r) => println!(
                    "  {} [{:?}] default={} range={}..{} step={}",
                    p.name, p.kind, p.default, r.min, r.max, r.step
                ),
                None => println!("  {} [{:?}] default={}", p.name, p.kind, p.default),
            }
        }
    }
    Ok(())
}

fn cmd_render(registry: &Registry, args: RenderArgs) -> anyhow::Result<()> {
    let def = registry.lookup(&args.effect)?;
    let mut values = def.schema_defaults();
    for assignment in &args.assignments {
        let (name, raw) = split_assignment(assignment)?;
        let spec = def
            .param(name)
            .ok_or_else(|| textfx::FxError::unknown_param(&def.name, name))?;
        values.insert(name.to_owned(), spec.parse_value(raw)?);
    }
    print!("{}", render(&def.template, &values));
    Ok(())
}

fn cmd_extract(args: InputArgs) -> anyhow::Result<()> {
    let source = read_input(args.in_path.as_deref())?;
    let extraction = extract(&source);
    println!("{}", serde_json::to_string_pretty(&extraction)?);
    Ok(())
}

fn cmd_session(registry: &Registry, store: Option<PathBuf>, cmd: Command) -> anyhow::Result<()> {
    let path = match store {
        Some(p) => p,
        None => JsonFileStore::default_path().context("no data directory; pass --store")?,
    };
    let mut ctl = Controller::open(registry, JsonFileStore::new(path));

    match cmd {
        Command::Show => println!("{}", serde_json::to_string_pretty(ctl.session())?),
        Command::Code => print!("{}", ctl.session().source_text),
        Command::Preview => ctl.present(&mut JsonPreview),
        Command::Select { name } => {
            ctl.select_effect(&name)?;
            eprintln!("selected {name}");
        }
        Command::Set { assignments } => {
            for assignment in &assignments {
                let (name, raw) = split_assignment(assignment)?;
                ctl.set_param_str(name, raw)?;
            }
            for (name, value) in &ctl.session().params {
                eprintln!("{name} = {}", value.render_literal());
            }
        }
        Command::Text { text } => ctl.set_text(text),
        Command::EditCode(args) => {
            let source = read_input(args.in_path.as_deref())?;
            ctl.edit_source(source);
            if let Some(report) = ctl.leave_text_view() {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::Effects | Command::Render(_) | Command::Extract(_) => {}
    }
    Ok(())
}

fn split_assignment(s: &str) -> anyhow::Result<(&str, &str)> {
    s.split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .filter(|(k, _)| !k.is_empty())
        .with_context(|| format!("expected name=value, got '{s}'"))
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read '{}'", p.display())),
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("read stdin")?;
            Ok(s)
        }
    }
}
