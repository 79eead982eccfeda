use datagrid::{CellValue, DataGridColumn, DataGridOptions, GridItem, MonospaceMeasurer, Size};
use datagrid_adapter::{Align, Controller, Easing};

struct Line(usize);

impl GridItem for Line {
    fn value(&self, path: &str) -> CellValue {
        match path {
            "line" => format!("line {}", self.0).into(),
            _ => CellValue::Empty,
        }
    }
}

fn main() -> datagrid::Result<()> {
    // Example: a controller driving tween scrolling without holding any UI objects.
    //
    // An adapter would:
    // - start a tween (e.g. in response to a "go to row" command)
    // - call tick(now_ms) in a frame loop / timer
    // - push the returned offset into the real scroll container (if any)
    // - run measure/arrange and render the displayed rows
    let options = DataGridOptions::new()
        .with_row_height(Some(20.0))
        .with_column_header_height(Some(24.0));
    let mut c = Controller::new(options)?;
    c.grid_mut()
        .add_column(DataGridColumn::text("line").with_header("Line"));
    c.grid_mut().set_items((0..10_000).map(Line).collect());

    let size = Size::new(320.0, 24.0 + 20.0 * 20.0);
    let mut measurer = MonospaceMeasurer::default();
    c.on_viewport(size);

    let target = c.start_tween_to_row(2_000, Align::Center, 0, 240, Easing::SmoothStep)?;
    println!("target_offset={target}");

    let mut now_ms = 0u64;
    loop {
        now_ms += 16;
        if let Some(offset) = c.tick(now_ms) {
            c.grid_mut().measure(size, &mut measurer);
            c.grid_mut().arrange(size);
            if now_ms % 80 == 0 {
                println!(
                    "t={now_ms}ms offset={offset:.1} rows={:?}..={:?}",
                    c.grid().display_data().first_displayed_scrolling_row(),
                    c.grid().display_data().last_displayed_scrolling_row(),
                );
            }
        }
        if !c.is_animating() {
            break;
        }
    }

    println!(
        "done: offset={} is_scrolling={}",
        c.grid().vertical_offset(),
        c.is_scrolling()
    );
    Ok(())
}
