use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mancap_agent::{
    CapabilityReply, FunctionSpec, RemoteClient, RemoteConfig, decode_reply, run_invocation,
};
use mancap_core::{ArgumentMapping, CapabilitySchema, build_invocation};
use mancap_manual::output::{OutputFormat, format_schema};
use mancap_manual::{ManCommand, build_schema, build_schema_from_text};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mancap")]
#[command(about = "Manual-page capability schemas and safe invocation building")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build capability schemas from installed manual pages.
    Schema(SchemaArgs),
    /// Parse manual text from a file without running man.
    ParseFile(ParseFileArgs),
    /// Parse manual text from stdin without running man.
    ParseStdin(ParseStdinArgs),
    /// Ask the remote model to use a command and execute its choice.
    Ask(AskArgs),
    /// Validate a JSON argument mapping and execute the invocation.
    Exec(ExecArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Commands to build schemas for (e.g. ls tar git).
    #[arg(required = true)]
    commands: Vec<String>,
    /// Output directory for per-command schema files.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of parallel builds (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Command name for the manual text being parsed.
    #[arg(long)]
    command: String,
    /// Path to file containing rendered manual text.
    #[arg(long)]
    input: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    /// Command name for the manual text being parsed.
    #[arg(long)]
    command: String,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct AskArgs {
    /// Command whose capability schema is offered to the model.
    #[arg(long)]
    command: String,
    /// Natural-language request (e.g. "list files sorted by name").
    prompt: String,
    /// Model to request.
    #[arg(long)]
    model: Option<String>,
    /// API root for OpenAI-compatible servers.
    #[arg(long)]
    base_url: Option<String>,
    /// Print the built argv without executing it.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Args)]
struct ExecArgs {
    /// Command to invoke.
    #[arg(long)]
    command: String,
    /// Argument mapping as a JSON object (e.g. '{"-l": true}').
    #[arg(long)]
    args: String,
    /// Print the built argv without executing it.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Schema(args) => run_schema(args),
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::Ask(args) => run_ask(args),
        Command::Exec(args) => run_exec(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_schema(args: SchemaArgs) -> Result<(), String> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .map_err(|e| format!("Failed to create thread pool: {e}"))?;

    let source = ManCommand::new();
    let schemas: Vec<CapabilitySchema> = pool.install(|| {
        args.commands
            .par_iter()
            .map(|command| build_schema(command, &source))
            .collect()
    });

    let format: OutputFormat = args.format.into();
    match args.output {
        Some(dir) => {
            fs::create_dir_all(&dir).map_err(|err| {
                format!("Failed to create output directory '{}': {err}", dir.display())
            })?;
            let ext = format_extension(format);
            for schema in &schemas {
                let path = dir.join(format!("{}.{ext}", schema.command));
                let raw = format_schema(schema, format)?;
                fs::write(&path, raw)
                    .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            }
            println!("Wrote {} schema file(s).", schemas.len());
        }
        None => {
            for schema in &schemas {
                println!("{}", format_schema(schema, format)?);
            }
        }
    }

    Ok(())
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    print_parsed_schema(&args.command, &text, args.format.into())
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    print_parsed_schema(&args.command, &text, args.format.into())
}

fn print_parsed_schema(command: &str, text: &str, format: OutputFormat) -> Result<(), String> {
    let schema = build_schema_from_text(command, text);
    println!("{}", format_schema(&schema, format)?);
    Ok(())
}

fn run_ask(args: AskArgs) -> Result<(), String> {
    let schema = build_schema(&args.command, &ManCommand::new());
    let spec = FunctionSpec::from_schema(&schema);

    let mut config = RemoteConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(ref model) = args.model {
        config = config.with_model(model);
    }
    if let Some(ref base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }

    let client = RemoteClient::new(config).map_err(|e| e.to_string())?;
    let message = client
        .request_capability(&spec, &args.prompt)
        .map_err(|e| e.to_string())?;

    let reply = match decode_reply(&schema, &message) {
        Ok(reply) => reply,
        Err(err) => {
            // A malformed capability call is reported, but any plain text
            // in the same response is still surfaced.
            eprintln!("warning: {err}");
            return match message.content {
                Some(ref content) if !content.is_empty() => {
                    println!("{content}");
                    Ok(())
                }
                _ => Err(err.to_string()),
            };
        }
    };

    match reply {
        CapabilityReply::Text(text) => println!("{text}"),
        CapabilityReply::Call { command, mapping } => {
            let validated = schema.validate(mapping).map_err(|e| e.to_string())?;
            let argv = build_invocation(&command, &validated);
            println!("{argv:?}");
            if !args.dry_run {
                execute_and_print(&command, &argv)?;
            }
        }
    }

    Ok(())
}

fn run_exec(args: ExecArgs) -> Result<(), String> {
    let schema = build_schema(&args.command, &ManCommand::new());
    let mapping: ArgumentMapping = serde_json::from_str(&args.args)
        .map_err(|e| format!("--args must be a JSON object: {e}"))?;

    let validated = schema.validate(mapping).map_err(|e| e.to_string())?;
    let argv = build_invocation(&args.command, &validated);
    println!("{argv:?}");
    if !args.dry_run {
        execute_and_print(&args.command, &argv)?;
    }

    Ok(())
}

fn execute_and_print(command: &str, argv: &[String]) -> Result<(), String> {
    let output = run_invocation(argv).map_err(|e| e.to_string())?;

    println!("Output of '{command}':\n{}", output.stdout);
    if !output.stderr.is_empty() {
        eprintln!("{}", output.stderr);
    }
    if let Some(code) = output.exit_code
        && code != 0
    {
        eprintln!("'{command}' exited with status {code}");
    }

    Ok(())
}

/// Returns the file extension for the given output format.
fn format_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Yaml => "yaml",
        OutputFormat::Markdown => "md",
        OutputFormat::Table => "txt",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extension_covers_all_formats() {
        assert_eq!(format_extension(OutputFormat::Json), "json");
        assert_eq!(format_extension(OutputFormat::Yaml), "yaml");
        assert_eq!(format_extension(OutputFormat::Markdown), "md");
        assert_eq!(format_extension(OutputFormat::Table), "txt");
    }
}
