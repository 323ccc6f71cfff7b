//! Payor Grid Example
//!
//! Drives a controlled grid the way a page would: the caller owns the page
//! index and the selection, the grid reports user changes back through its
//! signals, and the caller feeds them into the next render.
//!
//! Run with: cargo run -p ledgergrid --example payor_grid

use std::sync::Arc;

use ledgergrid::prelude::*;
use parking_lot::Mutex;

#[derive(Clone)]
struct Payor {
    id: u32,
    name: String,
    status: &'static str,
    outstanding: f64,
}

impl Row for Payor {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> CellValue {
        match name {
            "name" => CellValue::from(&self.name),
            "status" => CellValue::from(self.status),
            "outstanding" => CellValue::from(self.outstanding),
            _ => CellValue::None,
        }
    }
}

fn main() -> Result<(), GridError> {
    tracing_subscriber::fmt()
        .with_env_filter("ledgergrid=debug")
        .init();

    let rows: Arc<Vec<Payor>> = Arc::new(
        (1..=23)
            .map(|id| Payor {
                id,
                name: format!("Payor {id:02}"),
                status: if id % 3 == 0 { "pending" } else { "approved" },
                outstanding: f64::from(id) * 1_250.0,
            })
            .collect(),
    );
    let columns = Arc::new(vec![
        Column::field("name", "Payor"),
        Column::field("status", "Partnership").with_lookup("partnership_status"),
        Column::field("outstanding", "Outstanding").with_alignment(HorizontalAlignment::Right),
    ]);
    let lookups = LookupCatalog::new().with_table(
        "partnership_status",
        LookupTable::from_pairs([("approved", "Approved"), ("pending", "Pending")]),
    );

    let config = GridConfig::new()
        .with_pager(true)
        .with_page_size(10)
        .with_select(true)
        .with_excel_export(true);
    let mut grid = Grid::with_lookups(config, lookups)?;

    // Caller-owned state, updated from the grid's signals.
    let selected: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(vec![2]));
    let page_index = Arc::new(Mutex::new(0usize));

    let sink = Arc::clone(&selected);
    grid.signals().selection_changed.connect(move |rows: &Vec<Payor>| {
        *sink.lock() = rows.iter().map(|payor| payor.id).collect();
    });
    let sink = Arc::clone(&page_index);
    grid.signals().page_index_changed.connect(move |index: &usize| {
        *sink.lock() = *index;
    });

    let mut widget = HeadlessGrid::new();
    let props = |rows: &Arc<Vec<Payor>>| {
        GridProps::new(Arc::clone(rows), Arc::clone(&columns))
            .with_page_index(*page_index.lock())
            .with_selected_row_keys(selected.lock().clone())
    };

    let frame = grid.render(&props(&rows), &mut widget)?;
    print_frame(&frame);

    grid.next_page();
    grid.toggle_row_selection(&12);
    let frame = grid.render(&props(&rows), &mut widget)?;
    print_frame(&frame);

    println!("{}", grid.export_csv_string(&CsvOptions::new())?);
    Ok(())
}

fn print_frame(frame: &GridFrame<Payor>) {
    println!(
        "page {}/{} ({} rows), selected {:?}",
        frame.page.index + 1,
        frame.page.count,
        frame.page.total_rows,
        frame.selection
    );
    for row in &frame.rows {
        let cells: Vec<String> = row.cells.iter().map(CellContent::to_text).collect();
        let mark = if row.selected { "[x]" } else { "[ ]" };
        println!("  {mark} {}", cells.join(" | "));
    }
}
