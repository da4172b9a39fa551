use std::io::{self, Write};

use models::Page;
use persistance::{
    find_by_url_title,
    fs::{config::ConfigError, LoadError},
    PageStore, Predicate, StoreError,
};
use search_engine::{find_by_tag, find_similar_scored};
use thiserror::Error;
use wikitext::tag_string_from_vec;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("could not find page: {0}")]
    NotFound(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Show(String),
    Tag(String),
    Similar {
        url_title: String,
        limit: Option<usize>,
    },
}

pub fn parse_command(args: &[String]) -> Result<Command, CliError> {
    let usage = |msg: &str| CliError::Usage(msg.to_owned());
    match args {
        [cmd] if cmd == "list" => Ok(Command::List),
        [cmd, url_title] if cmd == "show" => Ok(Command::Show(url_title.clone())),
        [cmd, tag] if cmd == "tag" => Ok(Command::Tag(tag.clone())),
        [cmd, url_title] if cmd == "similar" => Ok(Command::Similar {
            url_title: url_title.clone(),
            limit: None,
        }),
        [cmd, url_title, limit] if cmd == "similar" => {
            let limit = limit
                .parse::<usize>()
                .map_err(|_| usage("limit must be a positive number"))?;
            Ok(Command::Similar {
                url_title: url_title.clone(),
                limit: Some(limit),
            })
        }
        [] => Err(usage("missing command")),
        [cmd, ..] => Err(CliError::Usage(format!("bad arguments for {}", cmd))),
    }
}

fn write_row<W: Write>(out: &mut W, page: &Page) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}",
        page.route(),
        page.title(),
        tag_string_from_vec(page.tags())
    )
}

async fn require_page<S: PageStore + ?Sized>(store: &S, url_title: &str) -> Result<Page, CliError> {
    find_by_url_title(store, url_title)
        .await?
        .ok_or_else(|| CliError::NotFound(url_title.to_owned()))
}

/// `default_limit` caps `similar` when the command itself doesn't.
pub async fn run<S: PageStore + ?Sized, W: Write>(
    command: &Command,
    store: &S,
    out: &mut W,
    default_limit: Option<usize>,
) -> Result<(), CliError> {
    match command {
        Command::List => {
            for page in store.find_all(&Predicate::All).await? {
                write_row(out, &page)?;
            }
        }
        Command::Show(url_title) => {
            let page = require_page(store, url_title).await?;
            writeln!(out, "title: {}", page.title())?;
            writeln!(out, "status: {}", page.status())?;
            writeln!(out, "tags: {}", tag_string_from_vec(page.tags()))?;
            writeln!(out, "route: {}", page.route())?;
            writeln!(out)?;
            write!(out, "{}", page.rendered_content())?;
        }
        Command::Tag(tag) => {
            let pages = find_by_tag(store, tag).await?;
            if pages.is_empty() {
                writeln!(out, "no pages tagged {:?}", tag)?;
            }
            for page in pages {
                write_row(out, &page)?;
            }
        }
        Command::Similar { url_title, limit } => {
            let page = require_page(store, url_title).await?;
            let matches = find_similar_scored(store, &page, limit.or(default_limit)).await?;
            if matches.is_empty() {
                writeln!(out, "nothing shares a tag with {}", page.route())?;
            }
            for m in matches {
                write!(out, "{}\t", m.shared_tags)?;
                write_row(out, &m.page)?;
            }
        }
    }
    Ok(())
}
