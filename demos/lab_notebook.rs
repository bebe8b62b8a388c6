//! Lab Notebook Example
//!
//! A scripted front end driving the record store the way the desktop tool
//! does: parse form input, add/update/delete by selected id, compute
//! statistics, save, reload, and catch a corrupted data file.
//!
//! Run with: RUST_LOG=lab_records=debug cargo run --example lab_notebook

use anyhow::{Context, Result};
use lab_records::config::PersistenceConfig;
use lab_records::experiment::RecordStore;
use lab_records::input::RecordDraft;
use lab_records::persistence::PersistenceCodec;
use lab_records::Error;

/// Selection lives in the front end, not the store.
struct Notebook {
    store: RecordStore,
    codec: PersistenceCodec,
    selected: Option<u64>,
}

impl Notebook {
    fn add(&mut self, name: &str, date: &str, researcher: &str, points: &str) {
        match RecordDraft::parse(name, date, researcher, points) {
            Ok(draft) => {
                let id = draft.add_to(&mut self.store);
                self.selected = Some(id);
                println!("   Added experiment {id}");
            }
            Err(e) => println!("   Error: {e}"),
        }
    }

    fn update_selected(&mut self, name: &str, date: &str, researcher: &str, points: &str) {
        let Some(id) = self.selected else {
            println!("   Error: No record selected.");
            return;
        };
        match RecordDraft::parse(name, date, researcher, points) {
            Ok(draft) => {
                draft.apply_to(&mut self.store, id);
            }
            Err(e) => println!("   Error: {e}"),
        }
    }

    fn calculate_selected(&self) {
        let Some(id) = self.selected else {
            println!("   Error: No record selected.");
            return;
        };
        match self.store.statistics(id) {
            Ok(stats) => println!("{stats}"),
            Err(e) => println!("   Error: {e}"),
        }
    }

    fn show(&self) {
        if self.store.is_empty() {
            println!("   No experiments found");
        }
        for record in self.store.list() {
            println!("   {record}");
        }
    }
}

fn main() -> Result<()> {
    lab_records::logging::init();
    println!("=== Lab Notebook ===\n");

    let dir = tempfile::tempdir().context("creating scratch directory")?;
    let config = PersistenceConfig::builder()
        .data_path(dir.path().join("experiment_data.avro"))
        .build()?;
    let mut notebook = Notebook {
        store: RecordStore::new(),
        codec: PersistenceCodec::new(config)?,
        selected: None,
    };

    // -------------------------------------------------------------------------
    // 1. Enter experiments
    // -------------------------------------------------------------------------
    println!("1. Entering experiments...");
    notebook.add("PCR Trial", "2024-01-10", "Dr. Lee", "10,12,11");
    notebook.add("Titration", "2024-01-12", "Dr. Okafor", "7, 9, 8, 8");
    notebook.add("Bad date", "2024-13-01", "Dr. Lee", "1");
    notebook.show();

    // -------------------------------------------------------------------------
    // 2. Statistics for the selected record
    // -------------------------------------------------------------------------
    println!("\n2. Statistics for experiment 1...");
    notebook.selected = Some(1);
    notebook.calculate_selected();

    // -------------------------------------------------------------------------
    // 3. Update the selection, delete a record that is already gone
    // -------------------------------------------------------------------------
    println!("\n3. Updating experiment 1...");
    notebook.update_selected("PCR Trial v2", "2024-01-10", "Dr. Lee", "20,22");
    notebook.store.delete(2);
    notebook.store.delete(2);
    notebook.show();

    // -------------------------------------------------------------------------
    // 4. Save and reload
    // -------------------------------------------------------------------------
    println!("\n4. Saving and reloading...");
    notebook.codec.save_default(&notebook.store)?;
    let mut reloaded = RecordStore::new();
    let count = notebook.codec.load_default(&mut reloaded)?;
    println!("   Reloaded {count} record(s), next id {}", reloaded.next_id());

    // -------------------------------------------------------------------------
    // 5. Corrupt the data file
    // -------------------------------------------------------------------------
    println!("\n5. Corrupting the data file...");
    let path = notebook.codec.config().data_path().to_path_buf();
    let mut bytes = std::fs::read(&path)?;
    if let Some(first) = bytes.first_mut() {
        *first ^= 0xff;
    }
    std::fs::write(&path, bytes)?;

    match notebook.codec.load_default(&mut reloaded) {
        Err(Error::Integrity { reason, .. }) => {
            println!("   Load refused: {reason}");
            println!("   In-memory records kept: {}", reloaded.len());
        }
        other => anyhow::bail!("corruption went unnoticed: {other:?}"),
    }

    println!("\n=== Done ===");
    Ok(())
}
