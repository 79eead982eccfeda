use datagrid::{CellValue, DataGridColumn, DataGridOptions, GridItem, Size};
use datagrid_adapter::Controller;

struct Message {
    id: u64,
    text: String,
}

impl GridItem for Message {
    fn value(&self, path: &str) -> CellValue {
        match path {
            "text" => self.text.as_str().into(),
            _ => CellValue::Empty,
        }
    }
}

fn message(id: u64) -> Message {
    Message {
        id,
        text: format!("message #{id}"),
    }
}

fn main() -> datagrid::Result<()> {
    // Example: keep the visual position when older messages are loaded above (chat/timeline).
    //
    // The adapter flow is typically:
    // 1) capture an anchor (key + offset_in_viewport) before the items change
    // 2) replace the items
    // 3) apply the anchor so the same message stays in the same place
    let options = DataGridOptions::new()
        .with_row_height(Some(22.0))
        .with_column_header_height(Some(24.0));
    let mut c = Controller::new(options)?;
    c.grid_mut().add_column(DataGridColumn::text("text"));
    c.grid_mut().set_items((1000..1100).map(message).collect());
    c.on_viewport(Size::new(300.0, 24.0 + 220.0));
    c.scroll_to_offset(50.0 * 22.0 + 7.0, 0);

    let Some(anchor) = c.capture_first_displayed_anchor(|m| m.id) else {
        return Ok(());
    };
    println!(
        "before prepend: offset={} anchor={anchor:?}",
        c.grid().vertical_offset()
    );

    let items: Vec<Message> = (2000..2010).chain(1000..1100).map(message).collect();
    c.grid_mut().set_items(items);

    // The key -> row mapping belongs to the adapter's data layer.
    let ok = c.apply_anchor(&anchor, |key| match *key {
        1000..=1099 => Some((key - 1000) as usize + 10),
        2000..=2009 => Some((key - 2000) as usize),
        _ => None,
    });
    println!(
        "after prepend: ok={ok} offset={} first row={:?}",
        c.grid().vertical_offset(),
        c.grid().display_data().first_displayed_scrolling_row()
    );
    Ok(())
}
