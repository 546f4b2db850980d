//! CLI entry point for local checks against `sanctorum_core`.
//!
//! # Responsibility
//! - Verify core linkage and inspect the prompts sent to the model.
//! - Manage the local bookmark database without the Flutter host.

use sanctorum_core::bible::catalog::BIBLE_BOOKS;
use sanctorum_core::bible::chapter::parse_chapter_text;
use sanctorum_core::bookmarks::BookmarkStore;
use sanctorum_core::db::open_db;
use sanctorum_core::{AppConfig, BookmarkedVerse, Language, PromptBook, SqliteEntryStore};
use std::process::ExitCode;

const USAGE: &str = "usage: sanctorum_cli <command>

commands:
  ping
  books
  bookmarks list
  bookmarks toggle <book> <chapter> <verse> <text>
  bookmarks remove <reference>
  prompt <endpoint> [--es] <args...>
  parse-chapter <file>";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[&str]) -> Result<(), String> {
    match args {
        ["ping"] => {
            println!("sanctorum_core ping={}", sanctorum_core::ping());
            println!("sanctorum_core version={}", sanctorum_core::core_version());
            Ok(())
        }
        ["books"] => {
            for (name, chapters) in BIBLE_BOOKS {
                println!("{name}\t{chapters}");
            }
            Ok(())
        }
        ["bookmarks", rest @ ..] => bookmarks(rest),
        ["prompt", endpoint, rest @ ..] => prompt(endpoint, rest),
        ["parse-chapter", path] => {
            let text = std::fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?;
            for verse in parse_chapter_text(&text) {
                println!("{}\t{}", verse.verse, verse.text);
            }
            Ok(())
        }
        _ => Err(USAGE.to_string()),
    }
}

fn bookmarks(args: &[&str]) -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let conn = open_db(config.database_path()).map_err(|err| err.to_string())?;
    let mut store = BookmarkStore::open(SqliteEntryStore::new(&conn));

    let listed = match args {
        ["list"] => store.list(),
        ["toggle", book, chapter, verse, text @ ..] if !text.is_empty() => {
            let bookmark = BookmarkedVerse::new(*book, *chapter, verse, &text.join(" "));
            bookmark.validate().map_err(|err| err.to_string())?;
            store.toggle(bookmark).map_err(|err| err.to_string())?
        }
        ["remove", reference @ ..] if !reference.is_empty() => store
            .remove(&reference.join(" "))
            .map_err(|err| err.to_string())?,
        _ => return Err(USAGE.to_string()),
    };

    for bookmark in listed {
        println!("{}\t{}", bookmark.reference, bookmark.display_text());
    }
    Ok(())
}

fn prompt(endpoint: &str, args: &[&str]) -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let prompts = PromptBook::from_config(&config);
    let (lang, args) = match args {
        ["--es", rest @ ..] => (Language::Es, rest),
        rest => (config.language, rest),
    };
    let joined = args.join(" ");
    let limit = config.debounce.max_suggestions;

    let request = match (endpoint, args) {
        ("saint_validation", [_, ..]) => {
            serde_json::to_value(prompts.saint_validation(&joined, lang))
        }
        ("saint_detail", [_, ..]) => serde_json::to_value(prompts.saint_detail(&joined, lang)),
        ("saint_portrait", [_, ..]) => serde_json::to_value(prompts.saint_portrait(&joined, lang)),
        ("saint_suggestions", [_, ..]) => {
            serde_json::to_value(prompts.saint_suggestions(&joined, limit, lang))
        }
        ("saints_of_the_day", [_, ..]) => {
            serde_json::to_value(prompts.saints_of_the_day(&joined, lang))
        }
        ("bible_chapter", [book @ .., chapter]) if !book.is_empty() => {
            serde_json::to_value(prompts.chapter_text(&book.join(" "), chapter, lang))
        }
        ("bible_search", [_, ..]) => serde_json::to_value(prompts.bible_search(&joined, lang)),
        ("gospel_of_the_day", [_, ..]) => {
            serde_json::to_value(prompts.gospel_of_the_day(&joined, lang))
        }
        ("miracle_research", [_, ..]) => {
            serde_json::to_value(prompts.miracle_research(&joined, lang))
        }
        ("chant_list", []) => serde_json::to_value(prompts.chant_list(lang)),
        ("chant_lyrics", [_, ..]) => serde_json::to_value(prompts.chant_lyrics(&joined, lang)),
        _ => return Err(USAGE.to_string()),
    }
    .map_err(|err| err.to_string())?;

    let pretty = serde_json::to_string_pretty(&request).map_err(|err| err.to_string())?;
    println!("{pretty}");
    Ok(())
}
