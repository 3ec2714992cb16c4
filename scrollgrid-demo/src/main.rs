mod people;
mod render;

use std::fs::File;
use std::time::Duration;

use scrollgrid_lib::TableMediator;
use scrollgrid_lib::config::TableConfig;
use scrollgrid_lib::layout::ScrollPosition;
use scrollgrid_lib::status::LoadStatus;
use simplelog::{Config, LevelFilter, WriteLogger};

use people::{PeopleApi, Person};

const VIEWPORT_HEIGHT: f64 = 175.0;
const TOTAL_PEOPLE: u32 = 150;

/// Scroll to the bottom repeatedly until every batch is loaded or a failure
/// cannot be retried, printing a frame after each batch lands.
async fn scroll_to_end(table: &TableMediator<Person>) {
    let layout = table.layout();

    loop {
        if table.last_error().is_some_and(|e| !e.is_retryable()) {
            log::warn!("stopping at {} rows", table.loaded_rows_len());
            break;
        }

        let content = layout.content_height(table.loaded_rows_len(), table.loading_state());
        let position = ScrollPosition::new(
            (content - VIEWPORT_HEIGHT).max(0.0),
            content,
            VIEWPORT_HEIGHT,
        );

        match table.handle_scroll(position) {
            Some(fetch) => {
                fetch.wait().await;
                println!("{}\n", render::frame(table));
            }
            None if table.loading_state() == LoadStatus::Disabled => break,
            None => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }
}

#[tokio::main]
async fn main() {
    let log_file = File::create("scrollgrid-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let api = PeopleApi::generate(TOTAL_PEOPLE, 42)
        .with_page_size(30)
        .with_latency(Duration::from_millis(100))
        .with_outage_every(4);

    let table = match TableMediator::builder(people::columns(), api)
        .config(TableConfig::default().with_fetch_timeout(Duration::from_secs(5)))
        .build()
    {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let _status = table.on_status_change(|status| log::info!("status -> {}", status));
    let failures = table.clone();
    let _errors = table.on_status_change(move |status| {
        if *status == LoadStatus::Error {
            if let Some(e) = failures.last_error() {
                if e.is_retryable() {
                    println!("! {} (scroll again to retry)\n", e);
                } else {
                    println!("! {} (giving up)\n", e);
                }
            }
        }
    });

    println!("== initial load ==\n");
    scroll_to_end(&table).await;

    println!("== sorted by age ==\n");
    if let Some(fetch) = table.toggle_sort("age") {
        fetch.wait().await;
    }
    table.set_viewport(ScrollPosition::new(0.0, 0.0, VIEWPORT_HEIGHT).range());
    println!("{}\n", render::frame(&table));

    println!("== age descending, then last name ==\n");
    // Superseded by the next sort; its result is discarded as stale.
    drop(table.toggle_sort("age"));
    if let Some(fetch) = table.toggle_sort("lastName") {
        fetch.wait().await;
    }
    println!("{}\n", render::frame(&table));

    scroll_to_end(&table).await;
    log::info!("done: {:?}", table);
}
