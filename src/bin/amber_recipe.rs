use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "amber-recipe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a test section body and print the commands and pipeline state as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// File holding the body of a `[test]` section.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parse against a compute pipeline instead of a graphics one.
    #[arg(long)]
    compute: bool,

    /// Framebuffer width of the graphics pipeline.
    #[arg(long, default_value_t = 250)]
    width: u32,

    /// Framebuffer height of the graphics pipeline.
    #[arg(long, default_value_t = 250)]
    height: u32,

    /// Print compact JSON on one line.
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Dump(args) => cmd_dump(args),
    }
}

fn build_script(args: &DumpArgs) -> anyhow::Result<(amber_recipe::Script, amber_recipe::PipelineId)> {
    let mut script = amber_recipe::Script::new();
    if args.compute {
        let id = script.add_pipeline(amber_recipe::Pipeline::new(
            "compute",
            amber_recipe::PipelineType::Compute,
        ))?;
        return Ok((script, id));
    }

    let mut pipeline =
        amber_recipe::Pipeline::new("graphics", amber_recipe::PipelineType::Graphics);
    pipeline.set_framebuffer_size(args.width, args.height);
    let id = script.add_pipeline(pipeline)?;

    let fb = script.add_buffer(amber_recipe::Pipeline::generate_default_color_attachment_buffer()?)?;
    let (pipeline, buffers, _) = script
        .pipeline_resources_mut(id)
        .context("graphics pipeline vanished after insertion")?;
    pipeline.add_color_attachment(buffers, fb, 0, 0)?;
    Ok((script, id))
}

fn read_section(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read test section '{}'", path.display()))
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let text = read_section(&args.in_path)?;
    let (mut script, id) = build_script(&args)?;

    let commands = {
        let mut parser = amber_recipe::CommandParser::new(&mut script, id, 1, text);
        parser
            .parse()
            .with_context(|| format!("parse '{}'", args.in_path.display()))?;
        parser.take_commands()
    };
    script.set_commands(commands);

    let pipeline = script
        .pipeline(id)
        .context("pipeline missing after parse")?;
    let buffers: Vec<_> = script
        .buffers()
        .iter()
        .map(|(buffer_id, buf)| {
            serde_json::json!({
                "id": buffer_id,
                "name": buf.name(),
                "format": buf.format().and_then(|f| f.generate_name()),
                "element_count": buf.element_count(),
                "max_size_in_bytes": buf.max_size_in_bytes(),
            })
        })
        .collect();

    let out = serde_json::json!({
        "pipeline": pipeline.name(),
        "pipeline_data": pipeline.pipeline_data(),
        "buffers": buffers,
        "commands": script.commands(),
    });

    let rendered = if args.compact {
        serde_json::to_string(&out)
    } else {
        serde_json::to_string_pretty(&out)
    }
    .context("serialize dump")?;
    println!("{rendered}");
    Ok(())
}
