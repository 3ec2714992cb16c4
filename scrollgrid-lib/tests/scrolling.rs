//! Viewport windowing and scroll-driven loading through the mediator.

mod common;

use common::{people_columns, ManualLoader};
use scrollgrid_lib::layout::ScrollPosition;
use scrollgrid_lib::status::LoadStatus;
use scrollgrid_lib::window::{Range, Rect};
use scrollgrid_lib::TableMediator;

async fn loaded_table(rows: usize) -> (TableMediator<u32>, ManualLoader) {
    let loader = ManualLoader::new();
    let table = TableMediator::new(people_columns(), loader.clone()).unwrap();
    let fetch = table.load_next_batch().unwrap();
    loader.reply_rows(rows, false).await;
    fetch.wait().await;
    (table, loader)
}

#[tokio::test]
async fn test_rows_within_range_clamps_to_loaded() {
    let (table, _loader) = loaded_table(3).await;

    let visible = table.rows_within_range(0.0, 40.0, 0.0, 100.0);
    let indices: Vec<_> = visible.iter().map(|w| w.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    assert_eq!(table.content_width(), 250.0);
    assert_eq!(
        visible[1].rect,
        Rect { x: 0.0, y: 40.0, width: 250.0, height: 40.0 }
    );
    assert_eq!(visible[2].row.id, "2");
}

#[tokio::test]
async fn test_visible_rows_use_configured_geometry() {
    let (table, _loader) = loaded_table(50).await;

    table.set_viewport(Range::from_scroll(400.0, 200.0));
    let visible = table.visible_rows();
    let indices: Vec<_> = visible.iter().map(|w| w.index).collect();

    // (400 - 25) / 40 = 9.375 -> 9; (600 - 25) / 40 = 14.375 -> 15
    assert_eq!(indices, (9..=15).collect::<Vec<_>>());
    assert_eq!(visible[0].rect.y, 9.0 * 40.0 + 25.0);
}

#[tokio::test]
async fn test_empty_table_has_no_visible_rows() {
    let loader = ManualLoader::new();
    let table = TableMediator::new(people_columns(), loader).unwrap();
    table.set_viewport(Range::new(0.0, 500.0));
    assert!(table.visible_rows().is_empty());
}

#[tokio::test]
async fn test_scroll_to_bottom_loads_next_batch() {
    let (table, loader) = loaded_table(10).await;
    let layout = table.layout();
    let content = layout.content_height(table.loaded_rows_len(), table.loading_state());
    assert_eq!(content, 10.0 * 40.0 + 25.0 + 40.0);

    assert!(table.handle_scroll(ScrollPosition::new(100.0, content, 200.0)).is_none());
    assert_eq!(table.viewport(), Range::new(100.0, 300.0));
    assert_eq!(loader.call_count(), 1);

    let fetch = table
        .handle_scroll(ScrollPosition::new(content - 200.0, content, 200.0))
        .expect("bottom reached");
    assert_eq!(
        layout.loading_row_y(table.loaded_rows_len(), table.loading_state()),
        Some(425.0)
    );
    assert!(table
        .handle_scroll(ScrollPosition::new(content - 200.0, content, 200.0))
        .is_none());

    let context = loader.reply_rows(10, true).await;
    fetch.wait().await;
    assert_eq!(context.offset, 10);
    assert_eq!(table.loading_state(), LoadStatus::Disabled);

    let content = layout.content_height(table.loaded_rows_len(), table.loading_state());
    assert_eq!(content, 20.0 * 40.0 + 25.0);
    assert!(table
        .handle_scroll(ScrollPosition::new(content - 200.0, content, 200.0))
        .is_none());
}
