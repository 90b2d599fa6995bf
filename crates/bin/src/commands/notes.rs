//! Note maintenance commands against a local store.
//!
//! These go through the same [`NoteService`] as the server, so a note locked
//! from the command line is indistinguishable from one locked in the browser.
//! Commands that change notes claim the data directory first and refuse to run
//! while a server or another command holds it.

use notelock::service::NoteService;

use crate::backend::{StoreClaim, create_store, persist, store_path};
use crate::cli::{NoteIdArgs, NotePasswordArgs, NotesListArgs};
use crate::output::{NOTE_HEADERS, OutputFormat, note_row, print_table};

/// Run the `notes list` command
pub async fn list(
    args: &NotesListArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = NoteService::new(create_store(&args.store).await?);
    let notes = match &args.problem_url {
        Some(url) => service.load_notes(url).await?,
        None => service.get_all_notes().await?,
    };

    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }
            let rows: Vec<_> = notes.iter().map(note_row).collect();
            print_table(&NOTE_HEADERS, &rows);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&notes)?),
    }
    Ok(())
}

/// Run the `notes lock` command
pub async fn lock(
    args: &NotePasswordArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let _claim = StoreClaim::acquire(&args.store)?;
    let store = create_store(&args.store).await?;
    let service = NoteService::new(store.clone());
    let note = service.lock_note(&args.id, &args.password).await?;
    persist(&store, &store_path(&args.store)).await?;

    match format {
        OutputFormat::Human => println!("Locked {}", note.id()),
        OutputFormat::Json => println!("{}", serde_json::to_string(&note)?),
    }
    Ok(())
}

/// Run the `notes unlock` command, printing the plaintext
pub async fn unlock(
    args: &NotePasswordArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let _claim = StoreClaim::acquire(&args.store)?;
    let store = create_store(&args.store).await?;
    let service = NoteService::new(store.clone());
    let content = service.unlock_note(&args.id, &args.password).await?;
    persist(&store, &store_path(&args.store)).await?;

    match format {
        OutputFormat::Human => println!("{content}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({"id": args.id, "content": content})
        ),
    }
    Ok(())
}

/// Run the `notes delete` command
pub async fn delete(
    args: &NoteIdArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let _claim = StoreClaim::acquire(&args.store)?;
    let store = create_store(&args.store).await?;
    let service = NoteService::new(store.clone());
    let removed = service.delete_note(&args.id).await?;
    persist(&store, &store_path(&args.store)).await?;

    match format {
        OutputFormat::Human if removed => println!("Deleted {}", args.id),
        OutputFormat::Human => println!("No note {}", args.id),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({"id": args.id, "deleted": removed})
        ),
    }
    Ok(())
}
