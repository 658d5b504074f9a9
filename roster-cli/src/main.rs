//! `roster` — command-line front-end for the student collection store.
//!
//! Seeds a store with the demo roster, applies any requested mutations,
//! then prints the filtered and sorted view. State lives only for the
//! duration of the process.

mod table;

use clap::Parser;
use log::info;
use std::process::ExitCode;
use std::sync::Arc;

use roster_core::{
    DraftForm, Field, SequentialIdGenerator, SortKey, StudentDraft, ValidationErrors,
};
use roster_store::{CollectionStore, RosterSession, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Student records manager")]
struct Args {
    /// Case-insensitive search over first name, last name, email and major
    #[arg(long, default_value = "")]
    search: String,

    /// Sort field (camelCase). Repeat to toggle, like clicking a column header
    #[arg(long = "sort", value_name = "FIELD")]
    sort: Vec<SortKey>,

    /// Simulate backend latency (800ms load, 600ms per mutation)
    #[arg(long)]
    delay: bool,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    /// Create a student from a JSON draft (camelCase keys)
    #[arg(long, value_name = "JSON")]
    add_json: Option<String>,

    /// Edit the student with this id using the --set assignments
    #[arg(long, value_name = "ID", requires = "set")]
    edit: Option<String>,

    /// Field assignment for --edit, e.g. --set grade=A
    #[arg(long, value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(Field, String)>,

    /// Delete the student with this id (repeatable)
    #[arg(long, value_name = "ID")]
    delete: Vec<String>,
}

fn parse_assignment(s: &str) -> Result<(Field, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{s}`"))?;
    let field = field.trim().parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

/// One line of context followed by an indented line per invalid field.
fn invalid_draft(context: &str, errors: &ValidationErrors) -> Box<dyn std::error::Error> {
    let mut message = format!("{context}:");
    for (field, message_text) in errors.iter() {
        message.push_str(&format!("\n  {field}: {message_text}"));
    }
    message.into()
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = if args.delay {
        StoreConfig::default()
    } else {
        StoreConfig::for_testing()
    };
    let store = Arc::new(CollectionStore::with_id_generator(
        config,
        Arc::new(SequentialIdGenerator::default()),
    ));

    if args.delay {
        eprintln!("Loading students...");
    }
    let loaded = store.load().await;
    info!("Roster ready with {loaded} students");

    let mut session = RosterSession::new(store.clone());

    if let Some(json) = &args.add_json {
        let draft = StudentDraft::from_json(json)?;
        let mut form = DraftForm::from_draft(draft);
        match session.submit_new(&mut form).await {
            Ok(record) => info!("Added {} as {}", record.full_name(), record.id),
            Err(errors) => return Err(invalid_draft("Cannot add student", &errors)),
        }
    }

    if let Some(id) = &args.edit {
        match store.get(id) {
            Some(record) => {
                let mut form = DraftForm::edit(&record);
                for (field, value) in &args.set {
                    form.set(*field, value.as_str())?;
                }
                if let Err(errors) = session.submit_edit(id, &mut form).await {
                    return Err(invalid_draft(&format!("Cannot update student {id}"), &errors));
                }
            }
            None => log::warn!("No student with id {id}; nothing to edit"),
        }
    }

    for id in &args.delete {
        if !session.delete(id).await {
            log::warn!("No student with id {id}; nothing deleted");
        }
    }

    session.set_search_term(args.search.as_str());
    for key in &args.sort {
        session.toggle_sort(*key);
    }

    let view = session.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", table::render(&view, session.sort_spec()));
    }

    info!("Done: {:?}", store.stats());
    Ok(())
}
