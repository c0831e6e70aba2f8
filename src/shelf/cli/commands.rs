use super::render::{print_messages, render_cards, render_config};
use super::setup::{BookFields, Cli, Commands};
use clap::Parser;
use shelf::api::ShelfApi;
use shelf::commands::config::{self as config_cmd, ConfigAction};
use shelf::commands::ShelfPaths;
use shelf::confirm::{Always, Confirm};
use shelf::covers::FileCovers;
use shelf::error::Result;
use shelf::init::{initialize, resolve_data_dir};
use shelf::model::BookId;
use shelf::store::fs::FileStore;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: ShelfApi<FileStore, FileCovers>,
    confirm_delete: bool,
}

/// Asks on stdout, reads the answer from stdin. Anything but y/yes is a no.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        print!("{} [y/N]: ", question);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config does not need the collection, and must work even when it is unreadable
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(cli.home.as_deref(), key.clone(), value.clone());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::Search { query }) => handle_list(&mut ctx, Some(query)),
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields),
        Some(Commands::Edit { id, fields }) => handle_edit(&mut ctx, id, fields),
        Some(Commands::View { ids }) => handle_view(&mut ctx, ids),
        Some(Commands::Toggle { id }) => handle_toggle(&mut ctx, id),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, id, yes),
        Some(Commands::Config { .. }) | None => handle_list(&mut ctx, None),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("shelf=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.home.as_deref())?;
    let ctx = initialize(&data_dir)?;

    Ok(AppContext {
        api: ctx.api,
        confirm_delete: ctx.config.confirm_delete,
    })
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    ctx.api.set_query(search.unwrap_or_default());
    let cards = ctx.api.cards();
    print!("{}", render_cards(&cards, ctx.api.query()));
    Ok(())
}

fn handle_view(ctx: &mut AppContext, ids: Vec<BookId>) -> Result<()> {
    let result = ctx.api.get_books(&ids)?;
    let cards: Vec<_> = result
        .listed_books
        .iter()
        .map(|book| ctx.api.card_for(book.clone()))
        .collect();
    print!("{}", render_cards(&cards, ""));
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: BookFields) -> Result<()> {
    ctx.api.begin_add();
    apply_fields(&mut ctx.api, fields)?;
    let result = ctx.api.submit()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: BookId, fields: BookFields) -> Result<()> {
    ctx.api.begin_edit(id)?;
    apply_fields(&mut ctx.api, fields)?;
    let result = ctx.api.submit()?;
    print_messages(&result.messages);
    Ok(())
}

/// Copy the flags that were given onto the open form; the rest keep whatever
/// the form was opened with.
fn apply_fields(api: &mut ShelfApi<FileStore, FileCovers>, fields: BookFields) -> Result<()> {
    if let Some(title) = fields.title {
        api.set_title(title)?;
    }
    if let Some(author) = fields.author {
        api.set_author(author)?;
    }
    if let Some(year) = fields.year {
        api.set_year(year)?;
    }
    if let Some(pages) = fields.pages {
        api.set_pages(pages)?;
    }
    if let Some(cover) = fields.cover {
        api.set_cover(cover)?;
    }
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, id: BookId) -> Result<()> {
    let result = ctx.api.toggle_read(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: BookId, yes: bool) -> Result<()> {
    let result = if yes || !ctx.confirm_delete {
        ctx.api.delete_book(id, &mut Always(true))?
    } else {
        ctx.api.delete_book(id, &mut StdinConfirm)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    home: Option<&Path>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let paths = ShelfPaths::new(resolve_data_dir(home)?);
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = config_cmd::run(&paths, action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print!("{}", render_config(config));
    }
    print_messages(&result.messages);
    Ok(())
}
