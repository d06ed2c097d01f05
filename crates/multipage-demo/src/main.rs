//! Multipage demo
//!
//! Renders the two-page example application for each requested location.
//!
//! ## Usage
//!
//! ```bash
//! multipage-demo /app2?dropdown=NYC
//! multipage-demo --set app1/input-1-state=Paris --click app1/submit-button /
//! RUST_LOG=debug multipage-demo --config multipage.toml --content-only /nowhere
//! ```
//!
//! Edits and clicks are applied after navigating; the page is then reloaded
//! from its shareable link, so the output shows what a visitor following that
//! link would see.

mod app1;
mod app2;
mod error_404;
mod footer;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use multipage::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::app1::App1;
use crate::app2::App2;
use crate::error_404::render_404;
use crate::footer::render_footer;

#[derive(Parser)]
#[command(name = "multipage-demo")]
#[command(about = "Render the example multipage application", long_about = None)]
#[command(version)]
struct Cli {
	/// Settings file (TOML or JSON)
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Field edit applied after navigating (can be repeated)
	#[arg(long = "set", value_name = "FIELD_ID=VALUE", value_parser = parse_edit)]
	edits: Vec<(String, String)>,

	/// Button clicked after the edits (can be repeated)
	#[arg(long = "click", value_name = "FIELD_ID")]
	clicks: Vec<String>,

	/// Print only the page content instead of a full document
	#[arg(long)]
	content_only: bool,

	/// Print the layout holding every page and exit
	#[arg(long)]
	validate: bool,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,

	/// Locations to render; with none, the loading state is printed
	#[arg(value_name = "HREF")]
	hrefs: Vec<String>,
}

fn parse_edit(raw: &str) -> Result<(String, String), String> {
	raw.split_once('=')
		.map(|(id, value)| (id.to_string(), value.to_string()))
		.ok_or_else(|| format!("expected FIELD_ID=VALUE, got {raw:?}"))
}

fn init_logging(verbosity: u8) {
	let level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(true)
		.with_level(true)
		.with_writer(std::io::stderr)
		.init();
}

fn load_settings(config: Option<&Path>) -> anyhow::Result<Settings> {
	let mut builder = SettingsBuilder::new();
	if let Some(path) = config {
		if !path.exists() {
			bail!("settings file not found: {}", path.display());
		}
		builder = builder
			.with_file(path)
			.with_context(|| format!("unsupported settings file: {}", path.display()))?;
	}
	builder
		.with_env()
		.build()
		.context("failed to load settings")
}

struct Demo {
	shell: MultiPageController,
	fields: HashMap<String, Field>,
}

impl Demo {
	fn new(settings: Settings) -> anyhow::Result<Self> {
		let app1 = App1::new(&settings)?;
		let app2 = App2::new(&settings)?;
		let fields = app1
			.fields()
			.into_iter()
			.chain(app2.fields())
			.map(|field| (field.id().to_string(), field))
			.collect();

		let shell = MultiPageController::new(
			settings,
			vec![Box::new(app1), Box::new(app2)],
			render_404(),
			render_footer(),
		)?;
		Ok(Self { shell, fields })
	}

	fn field(&self, id: &str) -> anyhow::Result<&Field> {
		self.fields
			.get(id)
			.with_context(|| format!("no field with id {id:?}"))
	}

	/// Returns the link box value of the current page.
	fn share_link(&self) -> Option<String> {
		let pathname = self.shell.pathname()?;
		let info = self
			.shell
			.link_infos()
			.into_iter()
			.find(|info| info.page_path == pathname)?;
		let link_box = self
			.fields
			.get(&format!("{}/quick-link-box", info.page_link_id))?;
		link_box.value().map(|v| v.to_string())
	}

	fn visit(&self, href: &str, edits: &[(String, String)], clicks: &[String]) -> anyhow::Result<()> {
		self.shell.navigate(Some(href));
		if edits.is_empty() && clicks.is_empty() {
			return Ok(());
		}

		for (id, value) in edits {
			self.field(id)?.set_value(value.as_str());
		}
		for id in clicks {
			self.field(id)?.click();
		}

		if let Some(link) = self.share_link() {
			tracing::info!(link = %link, "reloading from shareable link");
			self.shell.navigate(Some(&link));
		}
		Ok(())
	}

	fn render(&self, content_only: bool) -> String {
		if content_only {
			self.shell.content().render_to_string()
		} else {
			self.shell.render_document()
		}
	}
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbosity);

	let settings = load_settings(cli.config.as_deref())?;
	let demo = Demo::new(settings)?;

	if cli.validate {
		println!("{}", demo.shell.validation_layout().render_to_string());
		return Ok(());
	}

	if cli.hrefs.is_empty() {
		println!("{}", demo.render(cli.content_only));
		return Ok(());
	}

	for href in &cli.hrefs {
		demo.visit(href, &cli.edits, &cli.clicks)?;
		println!("{}", demo.render(cli.content_only));
	}
	Ok(())
}
