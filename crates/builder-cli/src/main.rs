use builder_content::size::size_for_width;
use builder_content::Document;
use builder_liquid::{runtime_tag, CompileOptions, CompiledOutput, RuntimeTag};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "builder-liquid")]
#[command(about = "Compile builder content to static markup for liquid and email templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a content .json file to markup
    Build {
        /// Input content .json file
        path: PathBuf,

        #[command(flatten)]
        flags: BuildFlags,
    },

    /// Check that a content .json file loads and compiles
    Check {
        /// Input content .json file
        path: PathBuf,
    },

    /// Print the breakpoint a viewport width falls into
    Size {
        #[arg(allow_negative_numbers = true)]
        width: i64,
    },
}

#[derive(Args)]
struct BuildFlags {
    /// Model name on the container (defaults to the document's modelName)
    #[arg(long, default_value = "")]
    model: String,

    /// Emit email-client styles
    #[arg(long)]
    email: bool,

    /// Write CSS to a separate .css file
    #[arg(long)]
    extract_css: bool,

    /// Wrap the markup in a runtime tag for the client renderer
    #[arg(long)]
    tag: bool,

    /// Runtime tag key (defaults to the model name)
    #[arg(long, requires = "tag")]
    key: Option<String>,

    /// Runtime tag revision
    #[arg(long, requires = "tag")]
    rev: Option<String>,

    /// Output directory (defaults to the input's directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

impl BuildFlags {
    fn options(&self) -> CompileOptions {
        CompileOptions {
            email_mode: self.email,
            extract_css: self.extract_css,
        }
    }

    fn runtime_tag(&self, doc: &Document) -> RuntimeTag {
        let model = if self.model.is_empty() {
            doc.model_name.clone()
        } else {
            Some(self.model.clone())
        };
        RuntimeTag {
            model,
            key: self.key.clone(),
            options: None,
            rev: self.rev.clone(),
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Build { path, flags } => cmd_build(&path, &flags),
        Command::Check { path } => cmd_check(&path),
        Command::Size { width } => println!("{}", size_for_width(width)),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load(path: &Path) -> Document {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        std::process::exit(1);
    }
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    match Document::from_json(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Output file paths for `input`: `<stem>.liquid` and `<stem>.css`.
fn output_paths<'a>(input: &'a Path, out: Option<&'a Path>) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("content");
    let dir = out.unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")));
    (
        dir.join(format!("{stem}.liquid")),
        dir.join(format!("{stem}.css")),
    )
}

fn write(path: &Path, contents: &str) {
    if let Err(e) = std::fs::write(path, contents) {
        eprintln!("Error writing {}: {e}", path.display());
        std::process::exit(1);
    }
    debug!(bytes = contents.len(), "wrote {}", path.display());
}

fn cmd_build(path: &Path, flags: &BuildFlags) {
    let doc = load(path);
    let output = builder_liquid::compile(&doc, &flags.model, &flags.options());
    let (html_path, css_path) = output_paths(path, flags.out.as_deref());

    if let Some(dir) = flags.out.as_deref() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error creating {}: {e}", dir.display());
            std::process::exit(1);
        }
    }

    if flags.tag {
        write(&html_path, &runtime_tag(&output, &flags.runtime_tag(&doc)));
    } else {
        write(&html_path, output.html());
        if let CompiledOutput::Split { css, .. } = &output {
            write(&css_path, css);
            info!("Built: {}", css_path.display());
        }
    }

    info!("Built: {}", html_path.display());
}

fn cmd_check(path: &Path) {
    let doc = load(path);
    let output = builder_liquid::compile(&doc, "", &CompileOptions::default());
    debug!(blocks = doc.blocks().len(), bytes = output.html().len(), "compiled");
    info!("OK: {}", path.display());
}
