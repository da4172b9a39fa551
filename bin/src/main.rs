mod commands;

use std::{io, process::exit};

use log::info;
use persistance::{
    fs::{config::read_config, load_wiki, utils::get_config_location},
    MemoryStore,
};

use crate::commands::{parse_command, run, CliError};

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    for arg in args.iter() {
        match arg.as_ref() {
            "-v" | "--version" => return print_version(),
            "-h" | "--help" => return print_help(),
            _ => {
                if arg.starts_with('-') {
                    eprintln!("unknown option: {}", arg);
                    exit(1);
                }
            }
        }
    }
    if let Err(e) = start(&args).await {
        eprintln!("{}", e);
        if let CliError::Usage(_) = e {
            print_help();
        }
        exit(1);
    }
}

async fn start(args: &[String]) -> Result<(), CliError> {
    let command = parse_command(args)?;
    let config = read_config()?;
    let location = config.wiki_location();
    let store = MemoryStore::new();
    let report = load_wiki(&location, &store).await?;
    info!(
        "loaded {} page(s) from {:?}, skipped {}",
        report.loaded.len(),
        location,
        report.skipped.len()
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&command, &store, &mut out, config.search.similar_limit).await
}

fn print_version() {
    println!("tagwiki v{}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    if let Some((_, config_file)) = get_config_location() {
        println!(
            "\nConfig file found at \x1b[38;5;47m{:#?}\x1b[0m\n",
            config_file
        );
    }
    print!(
        "Usage: tagwiki [options] <command>
        Commands:
        list                         List every page with its route and tags
        show <url_title>             Print a page and its rendered content
        tag <tag>                    List pages carrying <tag>
        similar <url_title> [limit]  List pages sharing tags with a page, best first
        Options:
        -v, --version                Print version.
        -h, --help                   Show this message.
        ",
    );
}
