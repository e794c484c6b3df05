//! PP-017: CLI subcommands: compile, validate, registry, template.

use crate::core::templates::Template;
use crate::core::types::{PipelineDescription, Plan};
use crate::core::{compiler, lowering, registry, store};
use crate::dataset::request::{self, CompileRequest};
use clap::Subcommand;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a request into a preprocessing pipeline
    Compile {
        /// Path to the compile request
        #[arg(short, long, default_value = "request.yaml")]
        file: PathBuf,

        /// Write the pipeline here instead of stdout (format by extension)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output format for stdout: yaml or json
        #[arg(long, default_value = "yaml")]
        format: String,
    },

    /// Validate a compile request without compiling it
    Validate {
        /// Path to the compile request
        #[arg(short, long, default_value = "request.yaml")]
        file: PathBuf,
    },

    /// List the classification label → semantic type table
    Registry,

    /// Instantiate a fixed-recipe template
    Template {
        /// Template name (e.g. pca-features, sloth, join)
        name: String,

        /// Template parameter as key=value (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Compile request supplying the dataset variables
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Pipeline name (default: template name)
        #[arg(long)]
        pipeline_name: Option<String>,

        /// Pipeline description
        #[arg(long, default_value = "")]
        description: String,

        /// Write the pipeline here instead of stdout (format by extension)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output format for stdout: yaml or json
        #[arg(long, default_value = "yaml")]
        format: String,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Compile { file, out, format } => cmd_compile(&file, out.as_deref(), &format),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Registry => {
            cmd_registry();
            Ok(())
        }
        Commands::Template {
            name,
            params,
            request,
            pipeline_name,
            description,
            out,
            format,
        } => cmd_template(&TemplateArgs {
            template: &name,
            params: &params,
            request: request.as_deref(),
            pipeline_name: pipeline_name.as_deref(),
            description: &description,
            out: out.as_deref(),
            format: &format,
        }),
    }
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let req = parse_and_validate(file)?;
    println!(
        "OK: {} ({} variables, {} features, target '{}')",
        req.name,
        req.variables().len(),
        req.features.len(),
        req.target
    );
    Ok(())
}

/// Parse and validate a request file, returning errors if invalid.
fn parse_and_validate(file: &Path) -> Result<CompileRequest, String> {
    let req = request::parse_request_file(file).map_err(|e| e.to_string())?;
    let errors = request::validate_request(&req);
    if errors.is_empty() {
        return Ok(req);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err(format!("{} validation error(s)", errors.len()))
}

fn cmd_compile(file: &Path, out: Option<&Path>, format: &str) -> Result<(), String> {
    let format = parse_format(format)?;
    let req = parse_and_validate(file)?;

    match compiler::compile_request(&req).map_err(|e| e.to_string())? {
        Some(plan) => emit(&plan, out, format),
        None => {
            println!("No transformation required: {}", req.name);
            Ok(())
        }
    }
}

fn cmd_registry() {
    let reg = &registry::STANDARD;
    println!("Registry: {} labels", reg.len());
    for (label, type_id) in reg.entries() {
        println!("  {:<16} {}", label, type_id);
    }
}

struct TemplateArgs<'a> {
    template: &'a str,
    params: &'a [String],
    request: Option<&'a Path>,
    pipeline_name: Option<&'a str>,
    description: &'a str,
    out: Option<&'a Path>,
    format: &'a str,
}

fn cmd_template(args: &TemplateArgs<'_>) -> Result<(), String> {
    let format = parse_format(args.format)?;
    let template = Template::parse(args.template).ok_or_else(|| {
        let names: Vec<&str> = Template::ALL.iter().map(Template::name).collect();
        format!(
            "unknown template '{}' (expected one of: {})",
            args.template,
            names.join(", ")
        )
    })?;
    let params = parse_params(args.params)?;

    let req = match args.request {
        Some(path) => Some(parse_and_validate(path)?),
        None => None,
    };
    let variables = req.as_ref().map(|r| r.variables()).unwrap_or_default();

    let name = args.pipeline_name.unwrap_or(template.name());
    let plan = template
        .build(name, args.description, &params, variables)
        .map_err(|e| e.to_string())?;
    emit(&plan, args.out, format)
}

/// Parse `key=value` pairs. Later keys override earlier ones.
fn parse_params(raw: &[String]) -> Result<HashMap<String, String>, String> {
    let mut params = HashMap::new();
    for p in raw {
        let (key, value) = p
            .split_once('=')
            .ok_or_else(|| format!("invalid param '{}': expected key=value", p))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("invalid param '{}': empty key", p));
        }
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}

fn parse_format(s: &str) -> Result<store::Format, String> {
    store::Format::parse(s).ok_or_else(|| format!("unknown format '{}' (expected yaml or json)", s))
}

/// Lower a plan and write it to `out`, or print it.
fn emit(plan: &Plan, out: Option<&Path>, format: store::Format) -> Result<(), String> {
    let desc = lowering::lower(plan);
    match out {
        Some(path) => {
            store::save_pipeline(path, &desc).map_err(|e| e.to_string())?;
            print_plan(plan);
            println!();
            println!("Wrote {} ({})", path.display(), desc.id);
            Ok(())
        }
        None => print_description(&desc, format),
    }
}

/// Display a plan summary to stdout.
fn print_plan(plan: &Plan) {
    println!("Pipeline: {} ({} steps)", plan.name, plan.steps.len());
    for (i, step) in plan.steps.iter().enumerate() {
        println!("  {}. {}", i, step);
    }
}

fn print_description(desc: &PipelineDescription, format: store::Format) -> Result<(), String> {
    let body = store::render(desc, format).map_err(|e| e.to_string())?;
    print!("{}", body);
    if !body.ends_with('\n') {
        println!();
    }
    Ok(())
}
