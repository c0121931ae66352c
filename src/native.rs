//! Native terminal walkthrough of the gallery.
//!
//! Drives the same controller and event router as the browser build, with a
//! [`TerminalSurface`] that prints what the lightbox would show. Commands are
//! read line by line from stdin, which makes the binary handy for manual QA
//! of catalogs and keybindings.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::{AppConfig, ConfigError};
use crate::events::{EventRouter, UiEvent};
use crate::gallery::GalleryController;
use crate::keybindings::Key;
use crate::surface::{DecodeOutcome, DecodeRequest, DecodeSupport, DecodeTicket, RenderSurface};

const HELP: &str = "\
folio - portfolio gallery walkthrough

USAGE:
    folio [--catalog PATH] [--config PATH] [--assets DIR]

COMMANDS (stdin):
    open <id>     open a project gallery
    next | prev   navigate
    goto <i>      jump to image i (0-based)
    close         close the gallery
    key <name>    press a key (Escape, ArrowLeft, ArrowRight, ...)
    backdrop      click the backdrop
    list          list project ids
    quit          exit
";

/// Errors that end the walkthrough.
#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error("Invalid arguments: {0}")]
    Args(#[from] pico_args::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load catalog {path:?}: {source}")]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Command-line arguments.
#[derive(Debug, Default)]
pub struct Args {
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub help: bool,
}

impl Args {
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self, pico_args::Error> {
        let parsed = Self {
            help: args.contains(["-h", "--help"]),
            catalog: args.opt_value_from_os_str("--catalog", parse_path)?,
            config: args.opt_value_from_os_str("--config", parse_path)?,
            assets: args.opt_value_from_os_str("--assets", parse_path)?,
        };

        let remaining = args.finish();
        if !remaining.is_empty() {
            log::warn!("Ignoring unexpected arguments: {:?}", remaining);
        }
        Ok(parsed)
    }
}

fn parse_path(s: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(s.into())
}

/// A line of walkthrough input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the event router
    Event(UiEvent),
    List,
    Help,
    Quit,
}

/// Parse one input line. Blank lines give `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let command = match (verb, arg) {
        ("open", Some(id)) => Command::Event(UiEvent::OpenTrigger(id.to_string())),
        ("next", None) => Command::Event(UiEvent::NextButton),
        ("prev", None) => Command::Event(UiEvent::PrevButton),
        ("goto", Some(index)) => {
            let index = index
                .parse()
                .map_err(|_| format!("not an image index: '{}'", index))?;
            Command::Event(UiEvent::ThumbnailClick(index))
        }
        ("close", None) => Command::Event(UiEvent::CloseButton),
        ("backdrop", None) => Command::Event(UiEvent::BackdropClick),
        ("key", Some(name)) => {
            let key = Key::from_dom(name).ok_or_else(|| format!("unknown key: '{}'", name))?;
            Command::Event(UiEvent::KeyDown(key))
        }
        ("list", None) => Command::List,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        _ => return Err(format!("unrecognized command: '{}'", line.trim())),
    };
    Ok(Some(command))
}

/// Surface that prints the lightbox to a writer.
///
/// Local images are "decoded" by probing their header with the `image`
/// crate; completions are queued until [`TerminalSurface::take_completed`].
pub struct TerminalSurface<W: Write> {
    out: W,
    asset_root: PathBuf,
    thumbnail_count: usize,
    completed: Vec<(DecodeTicket, DecodeOutcome)>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, asset_root: PathBuf) -> Self {
        Self {
            out,
            asset_root,
            thumbnail_count: 0,
            completed: Vec::new(),
        }
    }

    /// Decode completions since the last call.
    pub fn take_completed(&mut self) -> Vec<(DecodeTicket, DecodeOutcome)> {
        std::mem::take(&mut self.completed)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }

    fn probe(&self, src: &str) -> DecodeOutcome {
        let path = self.asset_root.join(src);
        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                log::debug!("Probed {:?}: {}x{}", path, width, height);
                DecodeOutcome::Decoded
            }
            Err(e) => DecodeOutcome::Failed(e.to_string()),
        }
    }
}

fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("//")
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn show_lightbox(&mut self) {
        self.line(format_args!("[lightbox open]"));
    }

    fn hide_lightbox(&mut self) {
        self.line(format_args!("[lightbox closed]"));
    }

    fn set_title(&mut self, title: &str) {
        self.line(format_args!("== {} ==", title));
    }

    fn set_counter(&mut self, text: &str) {
        self.line(format_args!("{}", text));
    }

    fn render_thumbnails(&mut self, images: &[String]) {
        self.thumbnail_count = images.len();
        for (index, src) in images.iter().enumerate() {
            self.line(format_args!("  {:>2}: {}", index, src));
        }
    }

    fn set_active_thumbnail(&mut self, index: usize) {
        let strip: Vec<&str> = (0..self.thumbnail_count)
            .map(|i| if i == index { "[x]" } else { "[ ]" })
            .collect();
        self.line(format_args!("{}", strip.join(" ")));
    }

    fn lock_scroll(&mut self) {
        log::debug!("Page scroll locked");
    }

    fn unlock_scroll(&mut self) {
        log::debug!("Page scroll unlocked");
    }

    fn request_decode(&mut self, request: DecodeRequest) -> DecodeSupport {
        if is_remote(&request.src) {
            return DecodeSupport::Unavailable;
        }
        let outcome = self.probe(&request.src);
        self.completed.push((request.ticket, outcome));
        DecodeSupport::Deferred
    }

    fn swap_image(&mut self, src: &str) {
        self.line(format_args!("image: {}", src));
    }
}

fn load_config(args: &Args) -> Result<AppConfig, NativeError> {
    match &args.config {
        Some(path) => Ok(AppConfig::load_from_file(path)?),
        None => Ok(AppConfig::load_from_default_path().unwrap_or_default()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, NativeError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let json = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_json(&json).map_err(|source| NativeError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded {} projects from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Run the walkthrough on stdin/stdout.
pub fn run() -> Result<(), NativeError> {
    let args = Args::parse(pico_args::Arguments::from_env())?;
    if args.help {
        print!("{}", HELP);
        return Ok(());
    }

    let config = load_config(&args)?;
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let catalog = Rc::new(load_catalog(args.catalog.as_deref())?);
    let asset_root = args.assets.clone().unwrap_or_else(|| PathBuf::from("."));
    let surface = TerminalSurface::new(io::stdout(), asset_root);
    let mut controller =
        GalleryController::new(catalog, surface, config.preferences.decode_policy);
    let router = EventRouter::install(config.keybindings.clone());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => print!("{}", HELP),
            Ok(Some(Command::List)) => {
                for id in controller.catalog().ids() {
                    println!("{}", id);
                }
            }
            Ok(Some(Command::Event(event))) => {
                if !router.dispatch(&mut controller, &event) {
                    log::debug!("{:?} had no effect", event);
                }
                deliver_decodes(&mut controller);
            }
            Err(message) => eprintln!("{}", message),
        }
    }

    controller.teardown();
    Ok(())
}

/// Feed queued decode completions back into the controller.
pub fn deliver_decodes<W: Write>(controller: &mut GalleryController<TerminalSurface<W>>) {
    let completed = match controller.surface_mut() {
        Some(surface) => surface.take_completed(),
        None => return,
    };
    for (ticket, outcome) in completed {
        controller.complete_decode(ticket, outcome);
    }
}
