//! # CLI Layer
//!
//! The CLI layer is the **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Installs a `tracing` subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration and build the `RosterApi`
//! 3. **API Dispatch**: Call the appropriate `RosterApi` method
//! 4. **Output Formatting**: Styled tables via `render.rs`, or JSON with `--json`
//! 5. **Error Handling**: Errors bubble up as `anyhow::Error` to `main`
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call API and format output

use super::render::Renderer;
use super::setup::{AddArgs, Cli, Commands, ListArgs, ReportArgs, UpdateArgs};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rosterapp::api::RosterApi;
use rosterapp::commands::CmdMessage;
use rosterapp::config::RosterConfig;
use rosterapp::model::StudentForm;
use rosterapp::store::registry::Registry;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: RosterApi<Registry>,
    render: Renderer,
    json: bool,
}

impl AppContext {
    fn print_messages(&self, messages: &[CmdMessage]) {
        if !self.json {
            print!("{}", self.render.messages(messages));
        }
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    for path in &cli.load {
        let summary = ctx
            .api
            .import_csv(path)
            .with_context(|| format!("cannot load {}", path.display()))?;
        debug!(
            path = %path.display(),
            imported = summary.imported,
            skipped = summary.skipped,
            "preloaded"
        );
    }

    match cli.command {
        None => handle_list(&ctx, ListArgs::default()),
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Add(args)) => handle_add(&mut ctx, args),
        Some(Commands::Update { id, changes }) => handle_update(&mut ctx, &id, changes),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, &id, yes),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Report(args)) => handle_report(&ctx, args),
        Some(Commands::Import { path }) => handle_import(&mut ctx, &path),
        Some(Commands::Export { path }) => handle_export(&ctx, &path),
    }?;

    if let Some(path) = &cli.save {
        let message = ctx.api.export_csv(path)?;
        ctx.print_messages(&[message]);
    }
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise warnings only, or everything from the
/// library with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = RosterConfig::load(cli.config.as_deref())?;
    if cli.no_sample {
        config.load_sample_data = false;
    }
    debug!(?config, "configuration loaded");

    Ok(AppContext {
        api: RosterApi::in_memory(config),
        render: Renderer::for_stdout(),
        json: cli.json,
    })
}

fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let criteria = args.criteria(ctx.api.config())?;
    let result = ctx.api.list_students(&criteria);
    if ctx.json {
        return ctx.print_json(&result);
    }
    print!("{}", ctx.render.student_table(&result.listed_students));
    ctx.print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.get_student(id)?;
    if ctx.json {
        return ctx.print_json(&result.listed_students);
    }
    for student in &result.listed_students {
        print!("{}", ctx.render.student_detail(student));
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, args: AddArgs) -> Result<()> {
    let result = ctx.api.add_student(&args.form())?;
    if ctx.json {
        return ctx.print_json(&result);
    }
    ctx.print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, id: &str, changes: UpdateArgs) -> Result<()> {
    let current = ctx
        .api
        .get_student(id)?
        .listed_students
        .pop()
        .ok_or_else(|| anyhow!("Student not found: {}", id))?;

    let mut form = StudentForm::from(&current);
    changes.apply(&mut form);

    let result = ctx.api.update_student(id, &form)?;
    if ctx.json {
        return ctx.print_json(&result);
    }
    ctx.print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str, yes: bool) -> Result<()> {
    if !yes {
        let target = ctx.api.get_student(id)?;
        if let Some(student) = target.listed_students.first() {
            let question = format!(
                "Delete student {} ({})? [y/N] ",
                student.full_name, student.id
            );
            if !confirm(&question)? {
                ctx.print_messages(&[CmdMessage::info("Delete cancelled.")]);
                return Ok(());
            }
        }
    }

    let result = ctx.api.delete_student(id)?;
    if ctx.json {
        return ctx.print_json(&result);
    }
    ctx.print_messages(&result.messages);
    Ok(())
}

/// Reads one line from stdin. Only `y` or `yes` (any case) confirm.
fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let dashboard = ctx.api.dashboard();
    if ctx.json {
        return ctx.print_json(&dashboard);
    }
    print!("{}", ctx.render.dashboard(&dashboard));
    Ok(())
}

fn handle_report(ctx: &AppContext, args: ReportArgs) -> Result<()> {
    let params = args.params(ctx.api.config())?;
    let report = ctx.api.generate_report(args.kind, &params);

    let saved = match &args.out {
        Some(path) => Some(ctx.api.export_report(&report, path)?),
        None => None,
    };

    if ctx.json {
        return ctx.print_json(&report);
    }
    print!("{}", ctx.render.report(&report));
    if let Some(message) = saved {
        println!();
        ctx.print_messages(&[message]);
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let summary = ctx
        .api
        .import_csv(path)
        .with_context(|| format!("cannot import {}", path.display()))?;
    if ctx.json {
        return ctx.print_json(&summary);
    }
    ctx.print_messages(&summary.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, path: &Path) -> Result<()> {
    let message = ctx
        .api
        .export_csv(path)
        .with_context(|| format!("cannot export to {}", path.display()))?;
    if ctx.json {
        return ctx.print_json(&message);
    }
    ctx.print_messages(&[message]);
    Ok(())
}
