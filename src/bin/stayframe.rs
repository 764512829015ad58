use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "stayframe", version)]
struct Cli {
    /// Log at debug level instead of warn.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame as a PNG.
    Render(RenderArgs),
    /// Render a project's frames as an animated GIF.
    Gif(GifArgs),
    /// Render one frame and put it on the clipboard.
    Copy(InputArgs),
    /// List the aspect ratio presets.
    Presets,
    /// Query a quote catalog JSON file.
    Quotes(QuotesArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Project JSON. Its first frame is used; other input flags override it.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Quote text. `\n` separates lines.
    #[arg(long)]
    quote: Option<String>,

    /// Background image: path, file:// URL, http(s) URL or data URL.
    #[arg(long)]
    image: Option<String>,

    /// Aspect ratio preset id (see `presets`).
    #[arg(long)]
    aspect: Option<String>,

    /// Extra font directory. May be repeated.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path, or a directory to receive `social-post.png`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct GifArgs {
    /// Project JSON listing the frames.
    #[arg(long)]
    project: PathBuf,

    /// Aspect ratio preset id, overriding the project's.
    #[arg(long)]
    aspect: Option<String>,

    /// Output GIF path, or a directory to receive `stayframe.gif`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct QuotesArgs {
    /// Catalog JSON (`{"themes":[{"name","quotes":[..]}]}`).
    #[arg(long)]
    file: PathBuf,

    /// Print theme names instead of quotes.
    #[arg(long)]
    themes: bool,

    /// Theme to filter by; empty lists every theme.
    #[arg(long, default_value = "")]
    theme: String,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = stayframe::DEFAULT_PAGE_LIMIT)]
    limit: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Copy(args) => cmd_copy(args),
        Command::Presets => cmd_presets(),
        Command::Quotes(args) => cmd_quotes(args),
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

fn read_project(path: &Path) -> anyhow::Result<stayframe::ProjectFile> {
    stayframe::ProjectFile::from_path(path)
        .with_context(|| format!("load project '{}'", path.display()))
}

fn compositor(
    fonts: &stayframe::FontConfig,
    base_dir: Option<&Path>,
) -> anyhow::Result<stayframe::Compositor> {
    let loader = stayframe::LoaderConfig {
        base_dir: Some(base_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)),
        ..stayframe::LoaderConfig::default()
    };
    Ok(stayframe::Compositor::from_config(fonts, loader)?)
}

fn known_aspect(aspect: &str) -> anyhow::Result<()> {
    if stayframe::find_preset(aspect).is_none() {
        anyhow::bail!("unknown aspect ratio '{aspect}' (see `stayframe presets`)");
    }
    Ok(())
}

fn build_editor(
    input: InputArgs,
    clipboard: stayframe::Clipboard,
) -> anyhow::Result<stayframe::Editor> {
    let project = input.project.as_deref().map(read_project).transpose()?;
    let mut fonts = project
        .as_ref()
        .map(stayframe::ProjectFile::font_config)
        .unwrap_or_default();
    fonts.font_dirs.extend(input.font_dirs);

    let base_dir = input.project.as_deref().and_then(Path::parent);
    let mut editor = stayframe::Editor::new(compositor(&fonts, base_dir)?, clipboard);

    if let Some(project) = &project {
        editor.set_aspect_ratio(&project.aspect_ratio);
        if !project.frames.is_empty() {
            *editor.text_layer_mut().frame_mut() = project.single_frame()?;
        }
    }
    if let Some(aspect) = &input.aspect {
        known_aspect(aspect)?;
        editor.set_aspect_ratio(aspect);
    }
    if let Some(image) = input.image {
        if editor.set_image(&Value::String(image)) == stayframe::PreviewState::Failed {
            eprintln!("warning: background image could not be loaded; rendering without it");
        }
    }
    if let Some(quote) = input.quote {
        editor.set_quote(&Value::String(quote.replace("\\n", "\n")));
    }
    Ok(editor)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut editor = build_editor(args.input, stayframe::Clipboard::new(Vec::new()))?;
    let path = editor.download(&args.out)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_copy(args: InputArgs) -> anyhow::Result<()> {
    let mut editor = build_editor(args, stayframe::Clipboard::system())?;
    editor.copy_to_clipboard()?;
    let dims = editor.dimensions();
    eprintln!("copied {}x{} image to clipboard", dims.width, dims.height);
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    if let Some(aspect) = &args.aspect {
        known_aspect(aspect)?;
    }
    let project = read_project(&args.project)?;
    let mut session =
        stayframe::GifSession::new(compositor(&project.font_config(), args.project.parent())?);
    session.set_aspect_ratio(args.aspect.as_deref().unwrap_or(&project.aspect_ratio));
    *session.frames_mut() = project.sequence();

    let total = session.frames().len();
    let url = session.generate_gif(|p| {
        tracing::info!(done = (p * total as f64).round() as usize, total, "frame rendered");
    })?;
    let path = session.download(&url, &args.out)?;
    session.revoke(&url);
    eprintln!("wrote {} ({total} frames)", path.display());
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for preset in &stayframe::ASPECT_PRESETS {
        println!("{:<20} {}x{}", preset.id, preset.dims.width, preset.dims.height);
    }
    Ok(())
}

fn cmd_quotes(args: QuotesArgs) -> anyhow::Result<()> {
    let catalog = stayframe::QuoteCatalog::from_path(&args.file)?;
    let out = if args.themes {
        serde_json::to_string_pretty(&catalog.themes())?
    } else {
        serde_json::to_string_pretty(&catalog.quotes(&args.theme, args.page, args.limit))?
    };
    println!("{out}");
    Ok(())
}
