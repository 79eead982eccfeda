// Example: a 1000-row grid, one row of scrolling, and an inline edit.
use datagrid::{
    CellElement, CellValue, DataGrid, DataGridCellCoordinates, DataGridColumn, DataGridEditingUnit,
    DataGridError, DataGridEvents, DataGridLength, DataGridOptions, EditingTrigger, GridItem,
    MonospaceMeasurer, Size,
};

struct Contact {
    name: String,
    subscribed: Option<bool>,
}

impl GridItem for Contact {
    fn value(&self, path: &str) -> CellValue {
        match path {
            "name" => self.name.as_str().into(),
            "subscribed" => self.subscribed.into(),
            _ => CellValue::Empty,
        }
    }

    fn set_value(&mut self, path: &str, value: CellValue) -> datagrid::Result<()> {
        match (path, value) {
            ("name", CellValue::Text(text)) => self.name = text,
            ("subscribed", CellValue::Bool(b)) => self.subscribed = b,
            _ => return Err(DataGridError::ReadOnlyProperty(path.to_string())),
        }
        Ok(())
    }
}

fn main() -> datagrid::Result<()> {
    let options = DataGridOptions::new()
        .with_row_height(Some(22.0))
        .with_column_header_height(Some(24.0))
        .with_frozen_column_count(1);
    let mut grid = DataGrid::new(options)?;
    grid.set_events(
        DataGridEvents::new()
            .with_loading_row(|args| println!("loading row {}", args.row_index))
            .with_unloading_row(|args| println!("unloading row {}", args.row_index)),
    );
    grid.add_column(DataGridColumn::text("name").with_header("Name"));
    grid.add_column(
        DataGridColumn::check_box("subscribed")
            .with_header("Subscribed")
            .with_width(DataGridLength::pixel(90.0)?),
    );
    grid.set_items(
        (0..1000)
            .map(|i| Contact {
                name: format!("contact {i}"),
                subscribed: Some(i % 3 == 0),
            })
            .collect(),
    );

    let size = Size::new(300.0, 24.0 + 20.0 * 22.0);
    let mut measurer = MonospaceMeasurer::default();
    grid.measure(size, &mut measurer);
    grid.arrange(size);
    println!(
        "displayed rows {:?}..={:?}, name column width {}",
        grid.display_data().first_displayed_scrolling_row(),
        grid.display_data().last_displayed_scrolling_row(),
        grid.column(0).map_or(0.0, |c| c.actual_width()),
    );

    // Scroll down by one row: row 0 goes back to the pool and comes out again as row 20.
    grid.scroll_rows_by_height(22.0);
    grid.measure(size, &mut measurer);
    grid.arrange(size);
    println!(
        "after scrolling: {:?}..={:?}, pooled={}",
        grid.display_data().first_displayed_scrolling_row(),
        grid.display_data().last_displayed_scrolling_row(),
        grid.display_data().recyclable_row_count(),
    );

    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 5)))?;
    grid.begin_edit(EditingTrigger::Programmatic)?;
    if let Some(CellElement::TextBox { text, .. }) = grid.editing_element_mut() {
        text.push_str(" (edited)");
    }
    grid.commit_edit(DataGridEditingUnit::Row, true)?;
    println!("row 5 is now {:?}", grid.item(5).map(|c| c.name.as_str()));
    Ok(())
}
