use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
struct TestRow {
    id: usize,
    recyclable: bool,
    detached: Option<bool>,
    visible: bool,
}

impl TestRow {
    fn new(id: usize) -> Self {
        Self {
            id,
            recyclable: true,
            detached: None,
            visible: true,
        }
    }

    fn pinned(id: usize) -> Self {
        Self {
            recyclable: false,
            ..Self::new(id)
        }
    }
}

impl DisplayRow for TestRow {
    fn is_recyclable(&self) -> bool {
        self.recyclable
    }

    fn detach(&mut self, recycle: bool) {
        self.detached = Some(recycle);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

fn window_ids(data: &DisplayData<TestRow>) -> Vec<usize> {
    data.scrolling_rows().map(|r| r.id).collect()
}

#[derive(Clone, Debug, PartialEq)]
struct Person {
    name: String,
    active: Option<bool>,
}

impl Person {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: Some(false),
        }
    }
}

impl GridItem for Person {
    fn value(&self, path: &str) -> CellValue {
        match path {
            "name" => CellValue::Text(self.name.clone()),
            "active" => CellValue::Bool(self.active),
            _ => CellValue::Empty,
        }
    }

    fn set_value(&mut self, path: &str, value: CellValue) -> Result<()> {
        match (path, value) {
            ("name", CellValue::Text(text)) if text.is_empty() => Err(DataGridError::InvalidValue {
                path: path.to_string(),
                reason: "name cannot be empty".to_string(),
            }),
            ("name", CellValue::Text(text)) => {
                self.name = text;
                Ok(())
            }
            ("active", CellValue::Bool(b)) => {
                self.active = b;
                Ok(())
            }
            _ => Err(DataGridError::ReadOnlyProperty(path.to_string())),
        }
    }
}

fn people(count: usize) -> Vec<Person> {
    (0..count)
        .map(|i| Person::new(&alloc::format!("person {i}")))
        .collect()
}

const ROW_HEIGHT: f64 = 22.0;
const HEADER_HEIGHT: f64 = 24.0;

fn grid_options() -> DataGridOptions {
    DataGridOptions::new()
        .with_row_height(Some(ROW_HEIGHT))
        .with_column_header_height(Some(HEADER_HEIGHT))
}

/// A grid over `count` people with a 100px name column and a 60px check box column, laid out
/// so that `visible_rows` rows fit exactly.
fn people_grid(count: usize, visible_rows: usize, options: DataGridOptions) -> DataGrid<Person> {
    let mut grid = DataGrid::new(options).unwrap();
    grid.add_column(
        DataGridColumn::text("name")
            .with_header("Name")
            .with_width(DataGridLength::pixel(100.0).unwrap()),
    );
    grid.add_column(
        DataGridColumn::check_box("active")
            .with_header("Active")
            .with_width(DataGridLength::pixel(60.0).unwrap()),
    );
    grid.set_items(people(count));
    layout(
        &mut grid,
        Size::new(300.0, HEADER_HEIGHT + ROW_HEIGHT * visible_rows as f64),
    );
    grid
}

fn layout(grid: &mut DataGrid<Person>, size: Size) {
    let mut measurer = MonospaceMeasurer::default();
    grid.measure(size, &mut measurer);
    grid.arrange(size);
}

fn relayout(grid: &mut DataGrid<Person>) {
    let size = grid.viewport();
    layout(grid, size);
}

fn displayed_bounds(grid: &DataGrid<Person>) -> (Option<usize>, Option<usize>) {
    (
        grid.display_data().first_displayed_scrolling_row(),
        grid.display_data().last_displayed_scrolling_row(),
    )
}

// DisplayData

#[test]
fn display_data_starts_empty() {
    let data = DisplayData::<TestRow>::new();
    assert_eq!(data.first_displayed_scrolling_row(), None);
    assert_eq!(data.last_displayed_scrolling_row(), None);
    assert_eq!(data.num_displayed_scrolling_rows(), 0);
    assert_eq!(data.scrolling_rows().count(), 0);
}

#[test]
fn window_invariants_hold_under_random_load_unload() {
    let mut rng = Lcg::new(0x5eed);
    let mut data = DisplayData::new();
    // Model: logical index of the first row plus the ids in window order.
    let mut model_first = 0usize;
    let mut model: Vec<usize> = Vec::new();
    let mut next_id = 0usize;

    for _ in 0..4000 {
        let op = rng.gen_range_usize(0, 5);
        match op {
            0 | 1 if model.is_empty() => {
                let at = rng.gen_range_usize(0, 1000);
                data.load_scrolling_row(at, TestRow::new(next_id));
                model_first = at;
                model.push(next_id);
                next_id += 1;
            }
            0 if model_first > 0 => {
                data.load_scrolling_row(model_first - 1, TestRow::new(next_id));
                model_first -= 1;
                model.insert(0, next_id);
                next_id += 1;
            }
            1 => {
                let at = model_first + model.len();
                data.load_scrolling_row(at, TestRow::new(next_id));
                model.push(next_id);
                next_id += 1;
            }
            2 | 3 if !model.is_empty() => {
                let position = if op == 2 { 0 } else { model.len() - 1 };
                let row = data.unload_scrolling_row(model_first + position);
                assert_eq!(row.id, model.remove(position));
                if position == 0 && !model.is_empty() {
                    model_first += 1;
                }
            }
            4 if !model.is_empty() => {
                // Splice inside the window.
                let position = rng.gen_range_usize(0, model.len());
                data.load_scrolling_row(model_first + position, TestRow::new(next_id));
                model.insert(position, next_id);
                next_id += 1;
            }
            _ => {}
        }

        match (
            data.first_displayed_scrolling_row(),
            data.last_displayed_scrolling_row(),
        ) {
            (Some(first), Some(last)) => {
                assert_eq!(first, model_first);
                assert_eq!(data.num_displayed_scrolling_rows(), last - first + 1);
                assert_eq!(window_ids(&data), model);
                for (k, id) in model.iter().enumerate() {
                    assert_eq!(data.displayed_row(first + k).id, *id);
                }
            }
            (None, None) => assert!(model.is_empty()),
            other => panic!("inconsistent bounds {other:?}"),
        }
    }
}

#[test]
fn scrolling_rows_iterate_in_logical_order() {
    let mut data = DisplayData::new();
    data.load_scrolling_row(10, TestRow::new(10));
    data.load_scrolling_row(11, TestRow::new(11));
    data.load_scrolling_row(9, TestRow::new(9));
    data.load_scrolling_row(8, TestRow::new(8));

    assert_eq!(window_ids(&data), vec![8, 9, 10, 11]);
    let indexed: Vec<(usize, usize)> = data
        .indexed_scrolling_rows()
        .map(|(i, r)| (i, r.id))
        .collect();
    assert_eq!(indexed, vec![(8, 8), (9, 9), (10, 10), (11, 11)]);
    // Restartable and double ended.
    assert_eq!(
        data.scrolling_rows().rev().map(|r| r.id).collect::<Vec<_>>(),
        vec![11, 10, 9, 8]
    );
    assert_eq!(data.scrolling_rows().len(), 4);
}

#[test]
#[should_panic(expected = "not adjacent")]
fn loading_a_non_adjacent_row_panics() {
    let mut data = DisplayData::new();
    data.load_scrolling_row(5, TestRow::new(5));
    data.load_scrolling_row(7, TestRow::new(7));
}

#[test]
#[should_panic(expected = "not displayed")]
fn unloading_a_row_outside_the_window_panics() {
    let mut data = DisplayData::new();
    data.load_scrolling_row(5, TestRow::new(5));
    data.unload_scrolling_row(6);
}

#[test]
#[should_panic]
fn displayed_row_outside_the_window_panics() {
    let mut data = DisplayData::new();
    data.load_scrolling_row(3, TestRow::new(3));
    let _ = data.displayed_row(4);
}

#[test]
fn unloading_the_last_row_resets_the_window() {
    let mut data = DisplayData::new();
    data.load_scrolling_row(3, TestRow::new(3));
    data.set_num_totally_displayed_scrolling_rows(1);
    data.unload_scrolling_row(3);
    assert_eq!(data.first_displayed_scrolling_row(), None);
    assert_eq!(data.num_totally_displayed_scrolling_rows(), 0);
    // A new window may start anywhere.
    data.load_scrolling_row(40, TestRow::new(40));
    assert_eq!(data.first_displayed_scrolling_row(), Some(40));
}

#[test]
fn clear_rows_with_recycling_round_trips_through_get_used_row() {
    let mut data = DisplayData::new();
    for i in 20..30 {
        data.load_scrolling_row(i, TestRow::new(i));
    }
    let before = window_ids(&data);

    let abandoned = data.clear_rows(true);
    assert!(abandoned.is_empty());
    assert_eq!(data.first_displayed_scrolling_row(), None);
    assert_eq!(data.recyclable_row_count(), 10);
    assert!(data.recyclable_rows().all(|r| r.detached == Some(true)));

    // The pool is a stack: reloading in reverse order hands each visual back to its index.
    for i in (20..30).rev() {
        let row = data.get_used_row().unwrap();
        assert_eq!(row.id, i);
        data.load_scrolling_row(i, row);
    }
    assert_eq!(data.get_used_row(), None);
    assert_eq!(data.first_displayed_scrolling_row(), Some(20));
    assert_eq!(data.last_displayed_scrolling_row(), Some(29));
    assert_eq!(window_ids(&data), before);
}

#[test]
fn clear_rows_returns_rows_that_cannot_be_recycled() {
    let mut data = DisplayData::new();
    data.load_scrolling_row(0, TestRow::new(0));
    data.load_scrolling_row(1, TestRow::pinned(1));
    data.load_scrolling_row(2, TestRow::new(2));

    let abandoned = data.clear_rows(true);
    assert_eq!(abandoned.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(data.recyclable_row_count(), 2);
}

#[test]
fn clear_rows_without_recycling_purges_the_pools() {
    let mut data = DisplayData::new();
    data.add_recyclable_row(TestRow::new(100));
    data.add_recyclable_row(TestRow::new(101));
    data.fully_recycle_rows();
    data.add_recyclable_row(TestRow::new(102));
    data.load_scrolling_row(0, TestRow::new(0));
    data.load_scrolling_row(1, TestRow::new(1));

    let abandoned = data.clear_rows(false);
    assert_eq!(abandoned.len(), 2);
    assert_eq!(data.recyclable_row_count(), 0);
    assert_eq!(data.fully_recycled_row_count(), 0);
    assert_eq!(data.get_used_row(), None);
}

#[test]
fn get_used_row_prefers_recyclable_and_shows_fully_recycled_rows() {
    let mut data = DisplayData::<TestRow>::new();
    data.add_recyclable_row(TestRow::new(1));
    data.fully_recycle_rows();
    assert_eq!(data.recyclable_row_count(), 0);
    assert_eq!(data.fully_recycled_row_count(), 1);
    assert!(data.fully_recycled_rows().all(|r| !r.visible));

    data.add_recyclable_row(TestRow::new(2));
    assert_eq!(data.get_used_row().map(|r| r.id), Some(2));
    let row = data.get_used_row().unwrap();
    assert_eq!(row.id, 1);
    assert!(row.visible);
    assert_eq!(data.get_used_row(), None);
}

#[test]
fn correct_rows_after_deletion_unloads_or_shifts() {
    let mut data = DisplayData::new();
    for i in 10..15 {
        data.load_scrolling_row(i, TestRow::new(i));
    }

    // Below the window: nothing changes.
    assert_eq!(data.correct_rows_after_deletion(20), None);
    assert_eq!(data.first_displayed_scrolling_row(), Some(10));

    // Above the window: bounds shift up.
    assert_eq!(data.correct_rows_after_deletion(3), None);
    assert_eq!(data.first_displayed_scrolling_row(), Some(9));
    assert_eq!(data.last_displayed_scrolling_row(), Some(13));

    // Inside: the row is returned and later rows move up.
    let removed = data.correct_rows_after_deletion(11).unwrap();
    assert_eq!(removed.id, 12);
    assert_eq!(window_ids(&data), vec![10, 11, 13, 14]);
    assert_eq!(data.last_displayed_scrolling_row(), Some(12));

    // The first displayed row: the window keeps its start.
    let removed = data.correct_rows_after_deletion(9).unwrap();
    assert_eq!(removed.id, 10);
    assert_eq!(data.first_displayed_scrolling_row(), Some(9));
    assert_eq!(window_ids(&data), vec![11, 13, 14]);
}

#[test]
fn correct_rows_after_insertion_loads_inside_and_directly_below() {
    let mut data = DisplayData::new();
    for i in 10..13 {
        data.load_scrolling_row(i, TestRow::new(i));
    }

    assert!(!data.correct_rows_after_insertion(2, || TestRow::new(99)));
    assert_eq!(data.first_displayed_scrolling_row(), Some(11));
    assert_eq!(data.last_displayed_scrolling_row(), Some(13));

    assert!(data.correct_rows_after_insertion(12, || TestRow::new(100)));
    assert_eq!(window_ids(&data), vec![10, 100, 11, 12]);

    assert!(data.correct_rows_after_insertion(15, || TestRow::new(101)));
    assert_eq!(window_ids(&data), vec![10, 100, 11, 12, 101]);

    assert!(!data.correct_rows_after_insertion(30, || TestRow::new(102)));
    assert_eq!(data.last_displayed_scrolling_row(), Some(15));

    let mut empty = DisplayData::new();
    assert!(empty.correct_rows_after_insertion(7, || TestRow::new(7)));
    assert_eq!(empty.first_displayed_scrolling_row(), Some(7));
}

#[test]
fn scrolling_down_one_row_recycles_the_top_row() {
    let mut data = DisplayData::new();
    for i in 0..20 {
        data.load_scrolling_row(i, TestRow::new(i));
    }

    let top = data.unload_scrolling_row(0);
    data.add_recyclable_row(top);
    data.load_scrolling_row(20, TestRow::new(20));

    assert_eq!(data.num_displayed_scrolling_rows(), 20);
    assert_eq!(data.first_displayed_scrolling_row(), Some(1));
    assert_eq!(data.last_displayed_scrolling_row(), Some(20));
    let pooled: Vec<usize> = data.recyclable_rows().map(|r| r.id).collect();
    assert_eq!(pooled, vec![0]);
}

// DataGridLength

#[test]
fn length_rejects_negative_nan_and_infinite_values() {
    assert!(matches!(
        DataGridLength::pixel(-1.0),
        Err(DataGridError::ValueMustBeGreaterThanOrEqualTo { .. })
    ));
    assert!(matches!(
        DataGridLength::pixel(f64::NAN),
        Err(DataGridError::ValueCannotBeNaN { .. })
    ));
    assert!(matches!(
        DataGridLength::pixel(f64::INFINITY),
        Err(DataGridError::ValueCannotBeInfinity { .. })
    ));
    let err = DataGridLength::pixel(-1.0).unwrap_err();
    assert!(err.is_argument_error());
}

#[test]
fn length_auto_normalizes_its_value() {
    let auto = DataGridLength::new(42.0, DataGridLengthUnit::Auto).unwrap();
    assert_eq!(auto, DataGridLength::AUTO);
    assert_eq!(auto.value(), 1.0);
    let cells = DataGridLength::new(3.0, DataGridLengthUnit::SizeToCells).unwrap();
    assert_eq!(cells.value(), 3.0);
    assert!(cells.is_size_to_cells());
    assert!(DataGridLength::pixel(5.0).unwrap().is_absolute());
    assert!(DataGridLength::SIZE_TO_HEADER.is_size_to_header());
}

#[test]
fn length_keywords_round_trip_case_insensitively() {
    let converter = DataGridLengthConverter::default();
    for (input, canonical) in [
        ("auto", "Auto"),
        ("  AUTO ", "Auto"),
        ("SizeToCells", "SizeToCells"),
        ("sizetocells", "SizeToCells"),
        ("SIZETOHEADER", "SizeToHeader"),
    ] {
        let length = converter.convert_from_str(input).unwrap();
        assert_eq!(converter.convert_to_string(&length), canonical);
    }
}

#[test]
fn length_numbers_round_trip_under_a_culture() {
    let invariant = DataGridLengthConverter::default();
    for s in ["0", "12", "12.5", "1000.25"] {
        let length = invariant.convert_from_str(s).unwrap();
        assert!(length.is_absolute());
        assert_eq!(invariant.convert_to_string(&length), s);
    }

    let german = DataGridLengthConverter::new(NumberCulture::new(',', Some('.')));
    let length = german.convert_from_str("1.234,5").unwrap();
    assert_eq!(length.value(), 1234.5);
    assert_eq!(german.convert_to_string(&length), "1234,5");
    let length = german.convert_from_str("12,5").unwrap();
    assert_eq!(german.convert_to_string(&length), "12,5");
}

#[test]
fn length_conversion_errors() {
    let converter = DataGridLengthConverter::default();
    assert!(matches!(
        converter.convert_from_str("wide"),
        Err(DataGridError::InvalidLength(_))
    ));
    assert!(converter.convert_from_str("-3").is_err());
    assert_eq!(
        converter.convert_from_f64(f64::NAN).unwrap(),
        DataGridLength::AUTO
    );
    assert_eq!(
        "sizetoheader".parse::<DataGridLength>().unwrap(),
        DataGridLength::SIZE_TO_HEADER
    );
    assert_eq!(DataGridLength::pixel(7.5).unwrap().to_string(), "7.5");
}

// IndexToValueTable

#[test]
fn index_table_merges_adjacent_equal_ranges() {
    let mut table = IndexToValueTable::new();
    table.add_value(3, true);
    table.add_value(5, true);
    assert_eq!(table.range_count(), 2);
    table.add_value(4, true);
    assert_eq!(table.range_count(), 1);
    assert_eq!(table.index_count(), 3);
    table.add_value(6, false);
    assert_eq!(table.range_count(), 2);
    assert!(table.contains_all(3, 6));
    assert!(!table.contains_all(3, 7));
    assert_eq!(table.value(6), Some(&false));

    table.remove_value(4);
    assert_eq!(table.range_count(), 3);
    assert_eq!(table.indexes().collect::<Vec<_>>(), vec![3, 5, 6]);
    assert_eq!(table.first_index(), Some(3));
    assert_eq!(table.last_index(), Some(6));
}

#[test]
fn index_table_counts_and_translates_positions() {
    let mut table = IndexToValueTable::new();
    table.add_values(2, 3, true); // 2..=4
    table.add_values(10, 2, true); // 10..=11
    assert_eq!(table.index_count_between(2, 11, &true), 3);
    assert_eq!(table.index_count_between(1, 12, &true), 5);
    assert_eq!(table.index_count_between(4, 5, &true), 0);
    assert_eq!(table.nth_index(0), Some(2));
    assert_eq!(table.nth_index(3), Some(10));
    assert_eq!(table.nth_index(5), None);
    assert_eq!(table.position_of(11), Some(4));
    assert_eq!(table.position_of(7), None);
}

#[test]
fn index_table_insert_and_remove_shift_every_other_index() {
    let mut rng = Lcg::new(42);
    let mut table = IndexToValueTable::new();
    let mut model: Vec<Option<u8>> = vec![None; 64];

    for _ in 0..2000 {
        let len = model.len();
        match rng.gen_range_usize(0, 4) {
            0 => {
                let i = rng.gen_range_usize(0, len);
                let v = rng.gen_range_usize(0, 3) as u8;
                table.add_value(i, v);
                model[i] = Some(v);
            }
            1 => {
                let i = rng.gen_range_usize(0, len);
                table.remove_value(i);
                model[i] = None;
            }
            2 => {
                let i = rng.gen_range_usize(0, len + 1);
                table.insert_index(i);
                model.insert(i, None);
            }
            _ if len > 1 => {
                let i = rng.gen_range_usize(0, len);
                table.remove_index(i);
                model.remove(i);
            }
            _ => {}
        }

        for (i, v) in model.iter().enumerate() {
            assert_eq!(table.value(i), v.as_ref(), "index {i}");
        }
        for pair in table.ranges().windows(2) {
            assert!(pair[0].upper < pair[1].lower);
            assert!(pair[0].upper + 1 < pair[1].lower || pair[0].value != pair[1].value);
        }
    }
}

// Tolerance and row heights

#[test]
fn tolerant_comparisons() {
    assert!(tolerance::are_close(1.0, 1.0 + 1e-9));
    assert!(!tolerance::are_close(1.0, 1.001));
    assert!(tolerance::greater_than(1.001, 1.0));
    assert!(!tolerance::greater_than(1.0 + 1e-9, 1.0));
    assert!(tolerance::less_than_or_close(1.0 + 1e-9, 1.0));
    assert!(tolerance::greater_than_or_close(1.0 - 1e-9, 1.0));
    assert!(tolerance::is_zero(1e-9));
}

#[test]
fn row_heights_map_offsets_to_rows() {
    let mut heights = crate::row_heights::RowHeights::new(5, 10.0);
    assert_eq!(heights.total(), 50.0);
    assert_eq!(heights.row_at_offset(0.0), Some((0, 0.0)));
    assert_eq!(heights.row_at_offset(25.0), Some((2, 5.0)));
    heights.set_height(1, 30.0);
    assert_eq!(heights.total(), 70.0);
    assert_eq!(heights.row_start(2), 40.0);
    assert_eq!(heights.row_at_offset(39.0), Some((1, 29.0)));
    assert_eq!(heights.row_at_offset(500.0).map(|(row, _)| row), Some(4));
    heights.insert(0);
    assert_eq!(heights.row_start(2), 20.0);
    assert_eq!(heights.height(2), Some(30.0));
    heights.remove(2);
    assert_eq!(heights.total(), 50.0);
}

// Columns

#[test]
fn column_width_validation() {
    let mut column = DataGridColumn::text("name");
    assert!(matches!(
        column.set_min_width(f64::NAN),
        Err(DataGridError::ValueCannotBeNaN { .. })
    ));
    assert!(column.set_min_width(-1.0).is_err());
    assert!(matches!(
        column.set_min_width(f64::INFINITY),
        Err(DataGridError::ValueCannotBeInfinity { .. })
    ));
    column.set_max_width(80.0).unwrap();
    assert!(matches!(
        column.set_min_width(90.0),
        Err(DataGridError::ValueMustBeLessThanOrEqualTo { .. })
    ));
    column.set_min_width(30.0).unwrap();
    assert!(column.set_max_width(10.0).is_err());

    column.set_width(DataGridLength::pixel(500.0).unwrap());
    assert_eq!(column.actual_width(), 80.0);
    column.set_width(DataGridLength::pixel(5.0).unwrap());
    assert_eq!(column.actual_width(), 30.0);
}

#[test]
fn column_setters_record_changes() {
    let mut column = DataGridColumn::text("name");
    assert!(!column.has_pending_changes());
    column.set_header(Some("Name".to_string()));
    column.set_visible(false);
    column.set_width(DataGridLength::pixel(50.0).unwrap());
    let changes = column.take_changes();
    assert_eq!(
        changes,
        vec![ColumnChange::Header, ColumnChange::Visibility, ColumnChange::Width]
    );
    assert!(!column.has_pending_changes());
}

#[test]
fn should_display_cell_hides_columns_covered_by_frozen_columns() {
    let column = DataGridColumn::text("a").with_width(DataGridLength::pixel(50.0).unwrap());
    // Right edge 90 is under the 100px frozen area.
    assert!(!should_display_cell(&column, 100.0, 40.0, 300.0));
    assert!(should_display_cell(&column, 100.0, 80.0, 300.0));
    // Scrolled off to the left, or past the right edge.
    assert!(!should_display_cell(&column, 0.0, -50.0, 300.0));
    assert!(!should_display_cell(&column, 0.0, 301.0, 300.0));
    let hidden = column.clone().with_visible(false);
    assert!(!should_display_cell(&hidden, 0.0, 0.0, 300.0));
}

#[test]
fn cell_clip_cuts_the_part_under_frozen_columns() {
    assert_eq!(
        ensure_cell_clip(false, 50.0, 22.0, 100.0, 80.0),
        Some(Rect::new(20.0, 0.0, 30.0, 22.0))
    );
    // Entirely covered: clipped to nothing.
    assert_eq!(
        ensure_cell_clip(false, 50.0, 22.0, 100.0, 20.0),
        Some(Rect::new(50.0, 0.0, 0.0, 22.0))
    );
    assert_eq!(ensure_cell_clip(false, 50.0, 22.0, 100.0, 100.0), None);
    assert_eq!(ensure_cell_clip(true, 50.0, 22.0, 100.0, 0.0), None);
}

#[test]
fn column_reordering_respects_the_frozen_prefix() {
    let reordered = Arc::new(AtomicUsize::new(0));
    let display_changes = Arc::new(AtomicUsize::new(0));
    let mut grid = DataGrid::<Person>::new(grid_options().with_frozen_column_count(1)).unwrap();
    let (r, d) = (reordered.clone(), display_changes.clone());
    grid.set_events(
        DataGridEvents::new()
            .with_column_reordered(move |_| {
                r.fetch_add(1, Ordering::SeqCst);
            })
            .with_column_display_index_changed(move |_| {
                d.fetch_add(1, Ordering::SeqCst);
            }),
    );
    for path in ["a", "b", "c"] {
        grid.add_column(DataGridColumn::text(path));
    }
    assert!(grid.column(0).unwrap().is_frozen());

    assert_eq!(
        grid.set_column_display_index(0, 2),
        Err(DataGridError::CannotMoveFrozenColumn)
    );
    assert_eq!(
        grid.set_column_display_index(2, 0),
        Err(DataGridError::CannotMoveNonFrozenColumn)
    );
    assert!(matches!(
        grid.set_column_display_index(1, 3),
        Err(DataGridError::ValueMustBeBetween { .. })
    ));
    assert_eq!(
        grid.set_column_display_index(7, 1),
        Err(DataGridError::ColumnNotInThisGrid(7))
    );

    assert_eq!(grid.set_column_display_index(1, 2), Ok(true));
    assert_eq!(grid.columns().display_order(), &[0, 2, 1]);
    assert_eq!(grid.column(1).unwrap().display_index(), Some(2));
    assert_eq!(reordered.load(Ordering::SeqCst), 1);
    assert_eq!(display_changes.load(Ordering::SeqCst), 2);
}

#[test]
fn column_reordering_can_be_cancelled() {
    let mut grid = DataGrid::<Person>::new(grid_options()).unwrap();
    grid.set_events(DataGridEvents::new().with_column_reordering(|args| args.cancel = true));
    grid.add_column(DataGridColumn::text("a"));
    grid.add_column(DataGridColumn::text("b"));
    assert_eq!(grid.set_column_display_index(0, 1), Ok(false));
    assert_eq!(grid.columns().display_order(), &[0, 1]);
}

#[test]
fn columns_inherit_grid_defaults() {
    let options = grid_options()
        .with_column_width(DataGridLength::pixel(70.0).unwrap())
        .with_column_width_limits(10.0, 65.0);
    let mut grid = DataGrid::<Person>::new(options).unwrap();
    grid.add_column(DataGridColumn::text("a"));
    let column = grid.column(0).unwrap();
    assert_eq!(column.width(), None);
    assert_eq!(column.actual_width(), 65.0);
    assert_eq!(column.actual_min_width(), 10.0);

    grid.with_column(0, |c| c.set_max_width(200.0))
        .unwrap()
        .unwrap();
    assert_eq!(grid.column(0).unwrap().actual_width(), 70.0);
}

#[test]
fn invalid_options_are_rejected() {
    let nan_height = DataGridOptions::new().with_row_height(Some(f64::NAN));
    assert!(DataGrid::<Person>::new(nan_height).is_err());
    let tiny_header = DataGridOptions::new().with_column_header_height(Some(1.0));
    assert!(DataGrid::<Person>::new(tiny_header).is_err());
    let inverted_limits = DataGridOptions::new().with_column_width_limits(50.0, 10.0);
    assert!(DataGrid::<Person>::new(inverted_limits).is_err());
}

// Layout

#[test]
fn grid_realizes_only_the_rows_in_the_viewport() {
    let grid = people_grid(1000, 20, grid_options());
    assert_eq!(displayed_bounds(&grid), (Some(0), Some(19)));
    assert_eq!(grid.display_data().num_displayed_scrolling_rows(), 20);
    assert_eq!(
        grid.display_data().num_totally_displayed_scrolling_rows(),
        20
    );
    assert_eq!(grid.total_rows_height(), 22000.0);

    let row = grid.displayed_row(3).unwrap();
    assert_eq!(row.index(), Some(3));
    assert_eq!(row.bounds(), Rect::new(0.0, 66.0, 300.0, 22.0));
    assert_eq!(
        row.cell(0).unwrap().content(),
        &CellElement::TextBlock {
            text: "person 3".to_string(),
            style: TextStyle::default(),
        }
    );
}

#[test]
fn scrolling_one_row_shifts_the_window_and_reuses_the_top_row() {
    let loaded = Arc::new(Mutex::new(Vec::new()));
    let unloaded = Arc::new(Mutex::new(Vec::new()));
    let mut grid = people_grid(1000, 20, grid_options());
    let (l, u) = (loaded.clone(), unloaded.clone());
    grid.set_events(
        DataGridEvents::new()
            .with_loading_row(move |args| l.lock().unwrap().push(args.row_index))
            .with_unloading_row(move |args| u.lock().unwrap().push(args.row_index)),
    );
    let bounds_before = grid.displayed_row(5).unwrap().bounds();

    grid.scroll_rows_by_height(ROW_HEIGHT);
    relayout(&mut grid);

    assert_eq!(displayed_bounds(&grid), (Some(1), Some(20)));
    assert_eq!(grid.display_data().num_displayed_scrolling_rows(), 20);
    assert_eq!(*unloaded.lock().unwrap(), vec![0]);
    assert_eq!(*loaded.lock().unwrap(), vec![20]);
    // The visual of row 0 went through the pool and came back as row 20.
    assert_eq!(grid.display_data().recyclable_row_count(), 0);
    assert_eq!(grid.displayed_row(20).unwrap().index(), Some(20));
    assert_eq!(
        grid.displayed_row(6).unwrap().bounds(),
        bounds_before,
        "rows move up by exactly one row"
    );
}

#[test]
fn partially_scrolled_rows_use_a_negative_offset() {
    let mut grid = people_grid(100, 10, grid_options());
    grid.set_vertical_offset(30.0);
    relayout(&mut grid);
    assert_eq!(grid.neg_vertical_offset(), 8.0);
    assert_eq!(displayed_bounds(&grid), (Some(1), Some(11)));
    assert_eq!(
        grid.display_data().num_totally_displayed_scrolling_rows(),
        9
    );
    assert_eq!(grid.displayed_row(1).unwrap().bounds().y, -8.0);
    assert_eq!(grid.displayed_row(2).unwrap().bounds().y, 14.0);
}

#[test]
fn vertical_offset_is_clamped_and_jumps_reuse_rows() {
    let mut grid = people_grid(100, 10, grid_options());
    grid.set_vertical_offset(1.0e9);
    assert_eq!(grid.vertical_offset(), grid.max_vertical_offset());
    assert_eq!(displayed_bounds(&grid), (Some(90), Some(99)));
    assert_eq!(grid.display_data().recyclable_row_count(), 0);

    grid.set_vertical_offset(-5.0);
    assert_eq!(grid.vertical_offset(), 0.0);
    assert_eq!(displayed_bounds(&grid), (Some(0), Some(9)));

    grid.set_viewport(Size::new(300.0, HEADER_HEIGHT + ROW_HEIGHT * 4.0));
    assert_eq!(displayed_bounds(&grid), (Some(0), Some(3)));
    assert_eq!(grid.display_data().recyclable_row_count(), 6);
    grid.remove_non_displayed_rows();
    assert_eq!(grid.display_data().recyclable_row_count(), 0);
    assert_eq!(grid.display_data().fully_recycled_row_count(), 6);
}

#[test]
fn queued_vertical_scroll_applies_on_measure() {
    let mut grid = people_grid(100, 10, grid_options());
    grid.queue_vertical_scroll(ROW_HEIGHT * 3.0);
    assert_eq!(displayed_bounds(&grid), (Some(0), Some(9)));
    relayout(&mut grid);
    assert_eq!(displayed_bounds(&grid), (Some(3), Some(12)));
    assert_eq!(grid.display_data().pending_vertical_scroll_height(), 0.0);
}

#[test]
fn scroll_into_view_moves_the_least_distance() {
    let mut grid = people_grid(100, 10, grid_options());
    grid.scroll_into_view(15).unwrap();
    assert_eq!(
        grid.vertical_offset(),
        16.0 * ROW_HEIGHT - 10.0 * ROW_HEIGHT
    );
    assert_eq!(displayed_bounds(&grid), (Some(6), Some(15)));
    grid.scroll_into_view(10).unwrap();
    assert_eq!(displayed_bounds(&grid), (Some(6), Some(15)));
    grid.scroll_into_view(2).unwrap();
    assert_eq!(grid.vertical_offset(), 2.0 * ROW_HEIGHT);
    assert!(grid.scroll_into_view(100).is_err());
}

#[test]
fn auto_rows_are_measured_and_the_window_follows() {
    // Rows are 24px tall with the default measurer, more than the 10px estimate.
    let options = DataGridOptions::new()
        .with_row_height_estimate(10.0)
        .with_column_header_height(Some(HEADER_HEIGHT));
    let grid = people_grid(100, 10, options);
    let first_height = grid.row_height(0).unwrap();
    assert_eq!(first_height, 24.0);
    let last = grid.display_data().last_displayed_scrolling_row().unwrap();
    // 220px of rows: the window shrank to what actually fits.
    assert_eq!(last, 9);
    assert!(grid.rows_presenter().desired_size().height >= 220.0);
}

#[test]
fn filler_column_takes_the_leftover_width() {
    let grid = people_grid(10, 5, grid_options());
    assert!(grid.columns().filler().is_active());
    assert_eq!(grid.columns().filler().width(), 300.0 - 160.0);
    assert!(grid.columns().filler().is_represented());
    let filler = grid.headers_presenter().filler_header().unwrap();
    assert_eq!(filler.bounds, Rect::new(160.0, 0.0, 140.0, HEADER_HEIGHT));

    let mut wide = people_grid(10, 5, grid_options());
    wide.with_column(0, |c| c.set_width(DataGridLength::pixel(400.0).unwrap()))
        .unwrap();
    relayout(&mut wide);
    assert!(!wide.columns().filler().is_active());
    assert!(!wide.displayed_row(0).unwrap().filler_cell().is_visible());
}

#[test]
fn horizontal_scrolling_clips_cells_under_frozen_columns() {
    let mut grid = DataGrid::new(grid_options().with_frozen_column_count(1)).unwrap();
    for path in ["name", "a", "b"] {
        let width = DataGridLength::pixel(100.0).unwrap();
        grid.add_column(DataGridColumn::text(path).with_width(width));
    }
    grid.set_items(people(5));
    layout(
        &mut grid,
        Size::new(250.0, HEADER_HEIGHT + 5.0 * ROW_HEIGHT),
    );
    assert_eq!(grid.max_horizontal_offset(), 50.0);

    grid.set_horizontal_offset(30.0);
    relayout(&mut grid);
    let row = grid.displayed_row(1).unwrap();
    let frozen = row.cell(0).unwrap();
    assert_eq!(frozen.bounds().x, 0.0);
    assert_eq!(frozen.clip(), None);
    let scrolled = row.cell(1).unwrap();
    assert_eq!(scrolled.bounds().x, 70.0);
    assert_eq!(
        scrolled.clip(),
        Some(Rect::new(30.0, 0.0, 70.0, ROW_HEIGHT))
    );
    assert_eq!(grid.display_data().first_displayed_scrolling_col(), Some(1));
    assert_eq!(
        grid.display_data().last_totally_displayed_scrolling_col(),
        None
    );

    grid.set_horizontal_offset(500.0);
    assert_eq!(grid.horizontal_offset(), 50.0);
    assert_eq!(
        grid.display_data().last_totally_displayed_scrolling_col(),
        Some(2)
    );
}

#[test]
fn auto_columns_grow_to_fit_cells_and_headers() {
    let mut grid = DataGrid::new(grid_options()).unwrap();
    grid.add_column(DataGridColumn::text("name").with_header("N"));
    grid.add_column(
        DataGridColumn::text("name")
            .with_header("A much longer header")
            .with_width(DataGridLength::SIZE_TO_HEADER),
    );
    grid.set_items(people(3));
    layout(&mut grid, Size::new(600.0, 200.0));

    let measurer = MonospaceMeasurer::default();
    // "person 0" is wider than "N".
    let cell_width = 8.0 * measurer.char_width + 2.0 * measurer.padding;
    assert_eq!(grid.column(0).unwrap().actual_width(), cell_width);
    let header_width = 20.0 * measurer.char_width + 2.0 * measurer.padding;
    assert_eq!(grid.column(1).unwrap().actual_width(), header_width);
}

// Items

#[test]
fn inserting_and_removing_items_keeps_the_window_consistent() {
    let mut grid = people_grid(50, 10, grid_options());
    grid.insert_item(3, Person::new("inserted")).unwrap();
    assert_eq!(grid.row_count(), 51);
    assert_eq!(displayed_bounds(&grid), (Some(0), Some(9)));
    for (i, row) in grid.display_data().indexed_scrolling_rows() {
        assert_eq!(row.index(), Some(i));
    }
    assert_eq!(
        grid.displayed_row(3).unwrap().cell(0).unwrap().content(),
        &CellElement::TextBlock {
            text: "inserted".to_string(),
            style: TextStyle::default(),
        }
    );

    let removed = grid.remove_item(0).unwrap();
    assert_eq!(removed.name, "person 0");
    assert_eq!(displayed_bounds(&grid), (Some(0), Some(9)));
    assert_eq!(grid.item(2).unwrap().name, "inserted");
    for (i, row) in grid.display_data().indexed_scrolling_rows() {
        assert_eq!(row.index(), Some(i));
    }

    assert!(matches!(
        grid.insert_item(100, Person::new("x")),
        Err(DataGridError::ValueMustBeBetween { .. })
    ));
    assert!(grid.remove_item(50).is_err());
}

#[test]
fn inserting_above_the_window_keeps_the_view_in_place() {
    let mut grid = people_grid(50, 10, grid_options());
    grid.set_vertical_offset(ROW_HEIGHT * 20.0);
    assert_eq!(displayed_bounds(&grid), (Some(20), Some(29)));
    grid.insert_item(5, Person::new("above")).unwrap();
    assert_eq!(displayed_bounds(&grid), (Some(21), Some(30)));
    assert_eq!(grid.displayed_row(21).unwrap().index(), Some(21));
    grid.remove_item(0).unwrap();
    assert_eq!(displayed_bounds(&grid), (Some(20), Some(29)));
    assert_eq!(grid.item(20).unwrap().name, "person 20");
}

#[test]
fn item_mutations_shift_selection_and_current_cell() {
    let mut grid = people_grid(20, 10, grid_options());
    grid.set_row_selection(2, true).unwrap();
    grid.set_row_selection(5, true).unwrap();
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 6)))
        .unwrap();

    grid.remove_item(3).unwrap();
    assert_eq!(grid.selected_row_indexes().collect::<Vec<_>>(), vec![2, 4]);
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(0, 5))
    );

    grid.insert_item(0, Person::new("first")).unwrap();
    assert_eq!(grid.selected_row_indexes().collect::<Vec<_>>(), vec![3, 5]);
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(0, 6))
    );
    assert_eq!(grid.selected_index(), Some(3));
    assert!(grid.displayed_row(3).unwrap().is_selected());

    grid.remove_item(6).unwrap();
    assert_eq!(grid.current_cell(), None);
}

// Selection

#[test]
fn selection_raises_changes_and_tracks_the_primary_row() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let mut grid = people_grid(20, 10, grid_options());
    let c = changes.clone();
    grid.set_events(
        DataGridEvents::new()
            .with_selection_changed(move |args| c.lock().unwrap().push(args.clone())),
    );

    grid.select_rows(3, 3).unwrap();
    assert_eq!(grid.selected_index(), Some(3));
    assert_eq!(grid.anchor_row(), Some(3));
    assert_eq!(grid.selected_item().unwrap().name, "person 3");
    assert!(grid.displayed_row(4).unwrap().is_selected());

    grid.set_row_selection(3, false).unwrap();
    assert_eq!(grid.selected_index(), Some(4));
    grid.set_row_selection(4, true).unwrap(); // already selected: no event
    grid.clear_row_selection();
    assert_eq!(grid.selected_row_count(), 0);
    assert_eq!(grid.selected_index(), None);
    assert!(!grid.displayed_row(4).unwrap().is_selected());

    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 3);
    assert_eq!(changes[0].added_rows, vec![3, 4, 5]);
    assert_eq!(changes[1].removed_rows, vec![3]);
    assert_eq!(changes[2].removed_rows, vec![4, 5]);
}

#[test]
fn single_selection_mode_keeps_one_row() {
    let options = grid_options().with_selection_mode(DataGridSelectionMode::Single);
    let mut grid = people_grid(20, 10, options);
    grid.set_row_selection(2, true).unwrap();
    grid.set_row_selection(7, true).unwrap();
    assert_eq!(grid.selected_row_indexes().collect::<Vec<_>>(), vec![7]);
    assert_eq!(
        grid.select_all(),
        Err(DataGridError::NotSupportedInSingleMode)
    );
    assert_eq!(
        grid.select_rows(0, 2),
        Err(DataGridError::NotSupportedInSingleMode)
    );
}

#[test]
fn switching_to_single_mode_coerces_the_selection() {
    let mut grid = people_grid(20, 10, grid_options());
    grid.select_rows(4, 3).unwrap();
    grid.set_options(grid_options().with_selection_mode(DataGridSelectionMode::Single))
        .unwrap();
    assert_eq!(grid.selected_row_indexes().collect::<Vec<_>>(), vec![4]);
    assert!(!grid.displayed_row(5).unwrap().is_selected());
}

#[test]
fn selected_items_index_of_unselected_item_is_none() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_row_selection(1, true).unwrap();
    let items = grid.selected_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items.index_of(&Person::new("person 4")), None);
    assert_eq!(items.index_of(&Person::new("person 1")), Some(0));
    assert!(!items.contains(&Person::new("nobody")));
}

#[test]
fn selected_items_add_then_remove_restores_the_count() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.select_rows(5, 2).unwrap();
    let mut items = grid.selected_items_mut();
    let before = items.len();

    assert_eq!(items.add(&Person::new("person 2")), Ok(0));
    assert_eq!(items.len(), before + 1);
    assert_eq!(items.get(0).unwrap().name, "person 2");
    assert_eq!(items.remove(&Person::new("person 2")), Ok(true));
    assert_eq!(items.len(), before);
    assert_eq!(items.remove(&Person::new("person 2")), Ok(false));

    assert_eq!(
        items.add(&Person::new("stranger")),
        Err(DataGridError::ItemNotInItemsSource)
    );
    assert!(matches!(
        items.remove_at(5),
        Err(DataGridError::ValueMustBeBetween { .. })
    ));
    assert!(matches!(
        items.insert(0, Person::new("person 1")),
        Err(DataGridError::NotSupported(_))
    ));
    assert!(matches!(
        items.set(0, Person::new("person 1")),
        Err(DataGridError::NotSupported(_))
    ));
    items.remove_at(0).unwrap();
    assert_eq!(
        items.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["person 6"]
    );
    items.clear().unwrap();
    assert!(items.is_empty());
}

#[test]
fn selected_items_add_fails_in_single_mode() {
    let options = grid_options().with_selection_mode(DataGridSelectionMode::Single);
    let mut grid = people_grid(10, 5, options);
    let mut items = grid.selected_items_mut();
    assert_eq!(
        items.add(&Person::new("person 1")),
        Err(DataGridError::NotSupportedInSingleMode)
    );
    assert_eq!(items.clear(), Err(DataGridError::NotSupportedInSingleMode));
}

#[test]
fn selected_items_commit_the_row_edit_first() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_row_selection(1, true).unwrap();
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    assert_eq!(grid.begin_edit(EditingTrigger::Programmatic), Ok(true));
    set_editor_text(&mut grid, "");

    // The empty name is rejected by the item, so the commit fails and nothing changes.
    let mut items = grid.selected_items_mut();
    assert_eq!(items.clear(), Err(DataGridError::CommitFailed));
    assert_eq!(items.len(), 1);

    set_editor_text(&mut grid, "renamed");
    grid.selected_items_mut().clear().unwrap();
    assert_eq!(grid.item(1).unwrap().name, "renamed");
    assert!(!grid.is_editing());
    assert_eq!(grid.selected_row_count(), 0);
}

// Row details

#[test]
fn row_details_follow_mode_and_overrides() {
    let details_events = Arc::new(AtomicUsize::new(0));
    let mut grid = people_grid(20, 10, grid_options());
    let d = details_events.clone();
    grid.set_events(DataGridEvents::new().with_row_details_visibility_changed(move |_| {
        d.fetch_add(1, Ordering::SeqCst);
    }));

    assert_eq!(
        grid.row_details_visibility_mode(),
        DataGridRowDetailsVisibilityMode::VisibleWhenSelected
    );
    grid.set_row_selection(1, true).unwrap();
    assert!(grid.are_row_details_visible(1));
    assert!(grid.displayed_row(1).unwrap().are_details_visible());
    grid.set_row_details_visible(2, true).unwrap();
    assert_eq!(grid.details_count_between(0, 5), 2);
    grid.set_row_details_visible(1, false).unwrap();
    assert_eq!(grid.details_count_between(0, 5), 1);
    grid.clear_row_details_visibility(1);
    assert_eq!(grid.details_count_between(0, 5), 2);
    assert_eq!(details_events.load(Ordering::SeqCst), 4);

    let visible = DataGridRowDetailsVisibilityMode::Visible;
    grid.set_options(grid_options().with_row_details_visibility_mode(visible))
        .unwrap();
    assert_eq!(grid.details_count_between(0, 19), 20);
    grid.set_row_details_visible(3, false).unwrap();
    assert_eq!(grid.details_count_between(0, 19), 19);
    assert_eq!(grid.details_count_between(4, 19), 16);

    let collapsed = DataGridRowDetailsVisibilityMode::Collapsed;
    grid.set_options(grid_options().with_row_details_visibility_mode(collapsed))
        .unwrap();
    assert_eq!(grid.details_count_between(0, 19), 0);
    grid.set_row_details_visible(3, true).unwrap();
    assert_eq!(grid.details_count_between(0, 19), 1);
    assert_eq!(grid.details_count_between(5, 2), 0);
}

#[test]
fn visible_details_add_to_the_row_height() {
    let options =
        grid_options().with_row_details_visibility_mode(DataGridRowDetailsVisibilityMode::Visible);
    let mut grid = DataGrid::new(options).unwrap();
    grid.add_column(DataGridColumn::text("name"));
    grid.set_items(people(10));
    let mut measurer = MonospaceMeasurer {
        details_height: 30.0,
        ..MonospaceMeasurer::default()
    };
    let size = Size::new(200.0, HEADER_HEIGHT + 200.0);
    grid.measure(size, &mut measurer);
    grid.arrange(size);

    let row = grid.displayed_row(0).unwrap();
    assert_eq!(row.desired_size().height, ROW_HEIGHT + 30.0);
    assert_eq!(
        row.details_presenter().bounds(),
        Rect::new(0.0, ROW_HEIGHT, 200.0, 30.0)
    );
    assert_eq!(grid.row_height(0), Some(52.0));
    assert_eq!(displayed_bounds(&grid), (Some(0), Some(3)));
}

// Editing

fn set_editor_text(grid: &mut DataGrid<Person>, value: &str) {
    match grid.editing_element_mut() {
        Some(CellElement::TextBox { text, .. }) => *text = value.to_string(),
        other => panic!("expected a text box editor, got {other:?}"),
    }
}

fn displayed_text(grid: &DataGrid<Person>, row: usize, column: usize) -> String {
    let cell = grid.displayed_row(row).unwrap().cell(column).unwrap();
    match cell.content() {
        CellElement::TextBlock { text, .. } | CellElement::TextBox { text, .. } => text.clone(),
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn begin_edit_requires_a_current_cell() {
    let mut grid = people_grid(10, 5, grid_options());
    assert_eq!(
        grid.begin_edit(EditingTrigger::Programmatic),
        Err(DataGridError::NoCurrentRow)
    );
    assert!(matches!(
        grid.set_current_cell(Some(DataGridCellCoordinates::new(9, 0))),
        Err(DataGridError::ColumnNotInThisGrid(9))
    ));
    assert!(matches!(
        grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 10))),
        Err(DataGridError::ValueMustBeBetween { .. })
    ));
}

#[test]
fn text_edit_commit_writes_back_to_the_item() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 2)))
        .unwrap();
    assert!(grid.displayed_row(2).unwrap().is_current());

    assert_eq!(
        grid.begin_edit(EditingTrigger::Key(EditingKey::F2)),
        Ok(true)
    );
    assert_eq!(
        grid.editing_cell(),
        Some(DataGridCellCoordinates::new(0, 2))
    );
    assert!(grid.displayed_row(2).unwrap().is_editing());
    match grid.editing_element() {
        Some(CellElement::TextBox { text, selection, .. }) => {
            assert_eq!(text, "person 2");
            let caret_at_end = TextSelection {
                start: 8,
                length: 0,
            };
            assert_eq!(*selection, caret_at_end);
        }
        other => panic!("unexpected editor {other:?}"),
    }

    set_editor_text(&mut grid, "edited");
    assert_eq!(grid.commit_edit(DataGridEditingUnit::Cell, true), Ok(true));
    assert_eq!(grid.item(2).unwrap().name, "edited");
    assert_eq!(grid.editing_cell(), None);
    assert_eq!(displayed_text(&grid, 2, 0), "edited");
    assert!(!grid.displayed_row(2).unwrap().cell(0).unwrap().is_editing());

    // The row edit stays open until the row is committed.
    assert_eq!(grid.editing_row(), Some(2));
    assert_eq!(grid.commit_edit(DataGridEditingUnit::Row, true), Ok(true));
    assert!(!grid.is_editing());
}

#[test]
fn programmatic_text_edit_selects_all() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 0)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    match grid.editing_element() {
        Some(CellElement::TextBox { selection, .. }) => {
            let everything = TextSelection {
                start: 0,
                length: 8,
            };
            assert_eq!(*selection, everything);
        }
        other => panic!("unexpected editor {other:?}"),
    }
}

#[test]
fn cancel_edit_restores_the_display_value() {
    let ending = Arc::new(Mutex::new(Vec::new()));
    let mut grid = people_grid(10, 5, grid_options());
    let e = ending.clone();
    grid.set_events(DataGridEvents::new().with_cell_edit_ending(move |args| {
        e.lock().unwrap().push(args.edit_action);
    }));
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "discarded");

    assert!(grid.cancel_edit(DataGridEditingUnit::Row));
    assert_eq!(grid.item(1).unwrap().name, "person 1");
    assert_eq!(displayed_text(&grid, 1, 0), "person 1");
    assert!(!grid.is_editing());
    assert_eq!(*ending.lock().unwrap(), vec![DataGridEditAction::Cancel]);
}

#[test]
fn edit_handlers_can_cancel_and_adjust_the_editor() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_events(DataGridEvents::new().with_beginning_edit(|args| {
        args.cancel = args.row_index == 0;
    }).with_preparing_cell_for_edit(|args| {
        if let CellElement::TextBox { text, .. } = &mut args.editing_element {
            text.push('!');
        }
    }));
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 0)))
        .unwrap();
    assert_eq!(grid.begin_edit(EditingTrigger::Programmatic), Ok(false));
    assert!(!grid.is_editing());

    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    assert_eq!(grid.begin_edit(EditingTrigger::Programmatic), Ok(true));
    assert_eq!(displayed_text(&grid, 1, 0), "person 1!");
}

#[test]
fn cell_edit_ending_can_veto_a_commit() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_events(DataGridEvents::new().with_cell_edit_ending(|args| {
        args.cancel = args.edit_action == DataGridEditAction::Commit;
    }));
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    assert_eq!(grid.commit_edit(DataGridEditingUnit::Cell, true), Ok(false));
    assert!(grid.editing_cell().is_some());
    // Moving the current cell needs the commit.
    assert_eq!(
        grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 3))),
        Err(DataGridError::CommitFailed)
    );
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(0, 1))
    );
}

#[test]
fn rejected_values_keep_the_edit_open() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "");
    assert!(matches!(
        grid.commit_edit(DataGridEditingUnit::Cell, true),
        Err(DataGridError::InvalidValue { .. })
    ));
    assert!(grid.editing_cell().is_some());
    assert_eq!(grid.item(1).unwrap().name, "person 1");
}

#[test]
fn read_only_cells_do_not_enter_edit_mode() {
    let mut grid = people_grid(10, 5, grid_options().with_read_only(true));
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    assert_eq!(grid.begin_edit(EditingTrigger::Programmatic), Ok(false));

    let mut grid = people_grid(10, 5, grid_options());
    grid.with_column(1, |c| c.set_read_only(Some(true)))
        .unwrap();
    grid.set_current_cell(Some(DataGridCellCoordinates::new(1, 1)))
        .unwrap();
    assert_eq!(
        grid.begin_edit(EditingTrigger::Key(EditingKey::Space)),
        Ok(false)
    );
}

#[test]
fn check_box_is_enabled_only_in_the_current_cell_and_toggles_on_space() {
    let mut grid = people_grid(10, 5, grid_options());
    let enabled = |grid: &DataGrid<Person>, row: usize| match grid
        .displayed_row(row)
        .unwrap()
        .cell(1)
        .unwrap()
        .content()
    {
        CellElement::CheckBox { is_enabled, .. } => *is_enabled,
        other => panic!("unexpected content {other:?}"),
    };
    assert!(!enabled(&grid, 2));
    grid.set_current_cell(Some(DataGridCellCoordinates::new(1, 2)))
        .unwrap();
    assert!(enabled(&grid, 2));

    assert_eq!(
        grid.begin_edit(EditingTrigger::Key(EditingKey::Space)),
        Ok(true)
    );
    assert!(matches!(
        grid.editing_element(),
        Some(CellElement::CheckBox {
            is_checked: Some(true),
            ..
        })
    ));
    grid.commit_edit(DataGridEditingUnit::Row, true).unwrap();
    assert_eq!(grid.item(2).unwrap().active, Some(true));

    grid.set_current_cell(Some(DataGridCellCoordinates::new(1, 3)))
        .unwrap();
    assert!(!enabled(&grid, 2));
    assert!(enabled(&grid, 3));
}

#[test]
fn three_state_check_box_cycles_through_indeterminate() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.with_column(1, |c| {
        c.update_kind(ContentProperty::IsThreeState, |kind| {
            if let ColumnKind::CheckBox(check_box) = kind {
                check_box.is_three_state = true;
            }
        })
    })
    .unwrap();
    grid.set_current_cell(Some(DataGridCellCoordinates::new(1, 0)))
        .unwrap();
    let mut states = Vec::new();
    for _ in 0..3 {
        grid.begin_edit(EditingTrigger::Pointer { on_element: true })
            .unwrap();
        grid.commit_edit(DataGridEditingUnit::Cell, true).unwrap();
        states.push(grid.item(0).unwrap().active);
    }
    assert_eq!(states, vec![Some(true), None, Some(false)]);

    // A click beside the glyph starts editing without toggling.
    grid.begin_edit(EditingTrigger::Pointer { on_element: false })
        .unwrap();
    grid.commit_edit(DataGridEditingUnit::Cell, true).unwrap();
    assert_eq!(grid.item(0).unwrap().active, Some(false));
}

#[test]
fn the_editor_survives_scrolling_out_of_view() {
    let mut grid = people_grid(100, 10, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 0)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "typed");

    grid.set_vertical_offset(ROW_HEIGHT * 50.0);
    relayout(&mut grid);
    assert!(!grid.display_data().is_row_displayed(0));
    assert!(matches!(
        grid.editing_element(),
        Some(CellElement::TextBox { text, .. }) if text == "typed"
    ));
    // The editing row is not recyclable, so it never entered the pool.
    assert!(
        grid.display_data()
            .recyclable_rows()
            .all(|r| r.index().is_none())
    );

    grid.set_vertical_offset(0.0);
    relayout(&mut grid);
    let cell = grid.displayed_row(0).unwrap().cell(0).unwrap();
    assert!(cell.is_editing());
    assert_eq!(displayed_text(&grid, 0, 0), "typed");
    assert!(grid.displayed_row(0).unwrap().is_current());

    grid.commit_edit(DataGridEditingUnit::Row, true).unwrap();
    assert_eq!(grid.item(0).unwrap().name, "typed");
}

#[test]
fn removing_the_editing_row_commits_or_fails() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 2)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "kept");
    let removed = grid.remove_item(2).unwrap();
    assert_eq!(removed.name, "kept");
    assert!(!grid.is_editing());

    grid.set_events(DataGridEvents::new().with_cell_edit_ending(|args| args.cancel = true));
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    assert_eq!(grid.remove_item(1), Err(DataGridError::CommitFailed));
    assert_eq!(grid.row_count(), 9);
}

#[test]
fn hiding_the_editing_column_abandons_the_edit() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "lost");
    grid.with_column(0, |c| c.set_visible(false)).unwrap();
    assert_eq!(grid.editing_cell(), None);
    assert_eq!(grid.item(1).unwrap().name, "person 1");
}

#[test]
fn column_insertion_and_removal_update_rows_and_current_cell() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(1, 1)))
        .unwrap();
    let index = grid.insert_column(0, DataGridColumn::template("avatar"));
    assert_eq!(index, 0);
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(2, 1))
    );
    assert_eq!(grid.displayed_row(0).unwrap().cells().len(), 3);
    assert_eq!(
        grid.displayed_row(0).unwrap().cell(0).unwrap().content(),
        &CellElement::Template {
            name: "avatar".to_string()
        }
    );

    // Removing the current column moves the current cell to the first displayed column.
    grid.remove_column(2).unwrap();
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(1, 1))
    );
    assert_eq!(grid.displayed_row(0).unwrap().cells().len(), 2);
    assert!(matches!(
        grid.remove_column(5),
        Err(DataGridError::ColumnNotInThisGrid(5))
    ));
}

#[test]
fn content_changes_refresh_generated_cells() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.with_column(0, |c| {
        c.update_kind(ContentProperty::FontSize, |kind| {
            if let ColumnKind::Text(text) = kind {
                text.style.font_size = Some(18.0);
            }
        })
    })
    .unwrap();
    match grid.displayed_row(0).unwrap().cell(0).unwrap().content() {
        CellElement::TextBlock { style, .. } => assert_eq!(style.font_size, Some(18.0)),
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn invalidation_callback_reports_layout_needs() {
    let invalidations = Arc::new(Mutex::new(Vec::new()));
    let i = invalidations.clone();
    let options = grid_options().with_on_invalidated(Some(move |inv| i.lock().unwrap().push(inv)));
    let mut grid = people_grid(10, 5, options);
    invalidations.lock().unwrap().clear();

    grid.set_vertical_offset(ROW_HEIGHT);
    grid.set_viewport(Size::new(300.0, HEADER_HEIGHT + ROW_HEIGHT * 2.0));
    grid.remove_non_displayed_rows();
    // Nothing left to hide.
    grid.remove_non_displayed_rows();
    let seen = invalidations.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![Invalidation::Measure, Invalidation::Measure, Invalidation::Arrange]
    );
}

#[test]
fn hidden_columns_collapse_their_cells_and_header() {
    let mut grid = people_grid(20, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(1, 2)))
        .unwrap();
    grid.with_column(1, |c| c.set_visible(false)).unwrap();
    relayout(&mut grid);

    let cell = grid.displayed_row(0).unwrap().cell(1).unwrap();
    assert!(!cell.is_visible());
    assert_eq!(cell.bounds(), Rect::EMPTY);
    let header = grid.headers_presenter().header(1).unwrap();
    assert!(!header.is_visible);
    assert_eq!(header.bounds, Rect::EMPTY);
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(0, 2))
    );

    // Rows realized after hiding come up collapsed as well.
    grid.set_vertical_offset(ROW_HEIGHT * 10.0);
    relayout(&mut grid);
    let row = grid.displayed_row(12).unwrap();
    assert!(!row.cell(1).unwrap().is_visible());
    assert!(row.cell(0).unwrap().is_visible());

    grid.with_column(1, |c| c.set_visible(true)).unwrap();
    relayout(&mut grid);
    let row = grid.displayed_row(12).unwrap();
    assert!(row.cell(1).unwrap().is_visible());
    assert!(grid.headers_presenter().header(1).unwrap().is_visible);
}

#[test]
fn header_slots_follow_column_insertion_and_removal() {
    let mut grid = people_grid(10, 5, grid_options());
    let name_header = *grid.headers_presenter().header(0).unwrap();
    let active_header = *grid.headers_presenter().header(1).unwrap();
    assert_eq!(
        name_header.bounds,
        Rect::new(0.0, 0.0, 100.0, HEADER_HEIGHT)
    );

    let width = DataGridLength::pixel(40.0).unwrap();
    grid.insert_column(0, DataGridColumn::template("avatar").with_width(width));
    assert_eq!(grid.headers_presenter().header(1), Some(&name_header));
    assert_eq!(grid.headers_presenter().header(2), Some(&active_header));
    relayout(&mut grid);
    assert_eq!(
        grid.headers_presenter().header(1).unwrap().bounds,
        Rect::new(40.0, 0.0, 100.0, HEADER_HEIGHT)
    );

    grid.remove_column(0).unwrap();
    assert_eq!(
        grid.headers_presenter().header(0).unwrap().bounds,
        Rect::new(40.0, 0.0, 100.0, HEADER_HEIGHT)
    );
    assert!(grid.headers_presenter().header(2).is_none());
    relayout(&mut grid);
    assert_eq!(grid.headers_presenter().header(0), Some(&name_header));
    assert_eq!(grid.headers_presenter().header(1), Some(&active_header));
}

#[test]
fn resize_column_clamps_to_the_width_limits() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.with_column(0, |c| c.set_max_width(150.0))
        .unwrap()
        .unwrap();

    assert_eq!(grid.resize_column(0, 400.0), Ok(true));
    assert_eq!(grid.column(0).unwrap().actual_width(), 150.0);
    assert_eq!(grid.resize_column(0, 1.0), Ok(true));
    let min_width = grid.column(0).unwrap().actual_min_width();
    assert_eq!(grid.column(0).unwrap().actual_width(), min_width);

    grid.with_column(0, |c| c.set_can_user_resize(Some(false)))
        .unwrap();
    assert_eq!(grid.resize_column(0, 120.0), Ok(false));
    assert_eq!(grid.column(0).unwrap().actual_width(), min_width);
    assert!(matches!(
        grid.resize_column(1, f64::NAN),
        Err(DataGridError::ValueCannotBeNaN { .. })
    ));
    assert!(matches!(
        grid.resize_column(7, 50.0),
        Err(DataGridError::ColumnNotInThisGrid(7))
    ));

    let options = grid_options().with_can_user_resize_columns(false);
    let mut locked = people_grid(10, 5, options);
    assert_eq!(locked.resize_column(1, 90.0), Ok(false));
    assert_eq!(locked.column(1).unwrap().actual_width(), 60.0);
}

#[test]
fn changing_the_row_height_remeasures_every_row() {
    let mut grid = people_grid(100, 10, grid_options());
    grid.set_vertical_offset(grid.max_vertical_offset());
    relayout(&mut grid);
    assert_eq!(grid.row_height(95), Some(ROW_HEIGHT));
    grid.set_vertical_offset(0.0);
    relayout(&mut grid);

    grid.set_options(grid_options().with_row_height(Some(30.0)))
        .unwrap();
    assert_eq!(grid.total_rows_height(), 3000.0);
    assert_eq!(grid.row_height(95), Some(30.0));
    relayout(&mut grid);
    assert_eq!(grid.row_height(0), Some(30.0));
    assert_eq!(grid.total_rows_height(), 3000.0);
}

fn layout_with_details(grid: &mut DataGrid<Person>, details_height: f64) {
    let mut measurer = MonospaceMeasurer {
        details_height,
        ..MonospaceMeasurer::default()
    };
    let size = grid.viewport();
    grid.measure(size, &mut measurer);
    grid.arrange(size);
}

#[test]
fn hiding_details_of_an_offscreen_row_restores_its_height() {
    let mut grid = people_grid(100, 10, grid_options());
    grid.set_selected_index(Some(0)).unwrap();
    layout_with_details(&mut grid, 30.0);
    assert_eq!(grid.row_height(0), Some(ROW_HEIGHT + 30.0));

    grid.set_vertical_offset(ROW_HEIGHT * 60.0);
    layout_with_details(&mut grid, 30.0);
    assert!(!grid.display_data().is_row_displayed(0));
    let offset = grid.vertical_offset();

    grid.clear_row_selection();
    assert_eq!(grid.row_height(0), Some(ROW_HEIGHT));
    assert_eq!(grid.total_rows_height(), ROW_HEIGHT * 100.0);
    // The rows in view stay in place.
    assert_eq!(grid.vertical_offset(), offset - 30.0);
}

#[test]
fn switching_the_details_mode_forgets_offscreen_heights() {
    let visible = DataGridRowDetailsVisibilityMode::Visible;
    let mut grid = people_grid(
        100,
        10,
        grid_options().with_row_details_visibility_mode(visible),
    );
    layout_with_details(&mut grid, 30.0);
    assert_eq!(grid.row_height(0), Some(ROW_HEIGHT + 30.0));
    grid.set_vertical_offset(grid.max_vertical_offset());
    layout_with_details(&mut grid, 30.0);

    let collapsed = DataGridRowDetailsVisibilityMode::Collapsed;
    grid.set_options(grid_options().with_row_details_visibility_mode(collapsed))
        .unwrap();
    assert_eq!(grid.row_height(0), Some(ROW_HEIGHT));
}

#[test]
fn cancelling_a_cell_edit_keeps_the_row_edit() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 3)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    assert!(grid.cancel_edit(DataGridEditingUnit::Cell));
    assert_eq!(grid.editing_cell(), None);
    assert_eq!(grid.editing_row(), Some(3));
    assert!(grid.cancel_edit(DataGridEditingUnit::Row));
    assert_eq!(grid.editing_row(), None);
}

// Events

#[test]
fn current_cell_changes_are_reported() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let mut grid = people_grid(10, 5, grid_options());
    let c = changes.clone();
    grid.set_events(DataGridEvents::new().with_current_cell_changed(move |args| {
        c.lock().unwrap().push((args.previous, args.current));
    }));

    let first = DataGridCellCoordinates::new(1, 1);
    grid.set_current_cell(Some(first)).unwrap();
    grid.set_current_cell(Some(first)).unwrap();
    grid.with_column(1, |c| c.set_visible(false)).unwrap();
    grid.set_current_cell(None).unwrap();

    let moved = DataGridCellCoordinates::new(0, 1);
    assert_eq!(
        *changes.lock().unwrap(),
        vec![
            (None, Some(first)),
            (Some(first), Some(moved)),
            (Some(moved), None),
        ]
    );
}

#[test]
fn row_details_load_and_unload_with_the_selection() {
    let loaded = Arc::new(Mutex::new(Vec::new()));
    let unloaded = Arc::new(Mutex::new(Vec::new()));
    let mut grid = people_grid(20, 5, grid_options());
    let (l, u) = (loaded.clone(), unloaded.clone());
    grid.set_events(
        DataGridEvents::new()
            .with_loading_row_details(move |args| l.lock().unwrap().push(args.row_index))
            .with_unloading_row_details(move |args| u.lock().unwrap().push(args.row_index)),
    );

    grid.set_selected_index(Some(1)).unwrap();
    grid.set_selected_index(Some(2)).unwrap();
    assert_eq!(*loaded.lock().unwrap(), vec![1, 2]);
    assert_eq!(*unloaded.lock().unwrap(), vec![1]);

    // Scrolling the row out unloads its details with it.
    grid.set_vertical_offset(ROW_HEIGHT * 10.0);
    assert_eq!(*unloaded.lock().unwrap(), vec![1, 2]);
    grid.set_vertical_offset(0.0);
    assert_eq!(*loaded.lock().unwrap(), vec![1, 2, 2]);

    grid.set_items(people(3));
    assert_eq!(*unloaded.lock().unwrap(), vec![1, 2, 2]);
}

// Keyboard

fn selected_rows(grid: &DataGrid<Person>) -> Vec<usize> {
    grid.selected_row_indexes().collect()
}

#[test]
fn arrow_keys_move_the_current_cell_and_extend_with_shift() {
    let mut grid = people_grid(20, 5, grid_options());
    let cell = |column, row| Some(DataGridCellCoordinates::new(column, row));

    assert_eq!(
        grid.process_key(DataGridKey::Down, KeyModifiers::NONE),
        Ok(true)
    );
    assert_eq!(grid.current_cell(), cell(0, 0));
    assert_eq!(selected_rows(&grid), vec![0]);
    grid.process_key(DataGridKey::Down, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(selected_rows(&grid), vec![1]);

    grid.process_key(DataGridKey::Down, KeyModifiers::SHIFT)
        .unwrap();
    grid.process_key(DataGridKey::Down, KeyModifiers::SHIFT)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 3));
    assert_eq!(selected_rows(&grid), vec![1, 2, 3]);
    grid.process_key(DataGridKey::Up, KeyModifiers::SHIFT)
        .unwrap();
    assert_eq!(selected_rows(&grid), vec![1, 2]);
    assert_eq!(grid.anchor_row(), Some(1));

    grid.process_key(DataGridKey::Up, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 1));
    assert_eq!(selected_rows(&grid), vec![1]);

    // Horizontal moves keep the selection.
    grid.process_key(DataGridKey::Right, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(1, 1));
    assert_eq!(
        grid.process_key(DataGridKey::Right, KeyModifiers::NONE),
        Ok(true)
    );
    assert_eq!(grid.current_cell(), cell(1, 1));
    grid.process_key(DataGridKey::Left, KeyModifiers::CTRL)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 1));
    grid.process_key(DataGridKey::End, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(1, 1));
    grid.process_key(DataGridKey::Home, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 1));
    assert_eq!(selected_rows(&grid), vec![1]);
}

#[test]
fn ctrl_and_page_keys_jump_and_scroll() {
    let mut grid = people_grid(20, 5, grid_options());
    let cell = |column, row| Some(DataGridCellCoordinates::new(column, row));

    grid.process_key(DataGridKey::End, KeyModifiers::CTRL)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(1, 19));
    assert_eq!(selected_rows(&grid), vec![19]);
    assert!(grid.display_data().is_row_displayed(19));
    assert_eq!(grid.vertical_offset(), grid.max_vertical_offset());

    grid.process_key(DataGridKey::Home, KeyModifiers::CTRL)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 0));
    assert_eq!(grid.vertical_offset(), 0.0);

    grid.process_key(DataGridKey::PageDown, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 5));
    assert!(grid.display_data().is_row_displayed(5));
    grid.process_key(DataGridKey::PageDown, KeyModifiers::SHIFT)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 10));
    assert_eq!(selected_rows(&grid), (5..=10).collect::<Vec<_>>());
    grid.process_key(DataGridKey::PageUp, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 5));
    assert_eq!(selected_rows(&grid), vec![5]);

    grid.process_key(DataGridKey::Down, KeyModifiers::CTRL)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 19));
    grid.process_key(DataGridKey::Up, KeyModifiers::CTRL)
        .unwrap();
    assert_eq!(grid.current_cell(), cell(0, 0));
}

#[test]
fn tab_moves_the_edit_to_the_next_writable_cell() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 2)))
        .unwrap();
    assert_eq!(
        grid.process_key(DataGridKey::Tab, KeyModifiers::NONE),
        Ok(false)
    );

    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "tabbed");
    assert_eq!(
        grid.process_key(DataGridKey::Tab, KeyModifiers::NONE),
        Ok(true)
    );
    assert_eq!(
        grid.editing_cell(),
        Some(DataGridCellCoordinates::new(1, 2))
    );
    assert_eq!(grid.item(2).unwrap().name, "tabbed");

    // Past the last column the edit wraps to the next row.
    grid.process_key(DataGridKey::Tab, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(
        grid.editing_cell(),
        Some(DataGridCellCoordinates::new(0, 3))
    );
    assert_eq!(grid.editing_row(), Some(3));
    assert_eq!(selected_rows(&grid), vec![3]);

    let back = KeyModifiers {
        shift: true,
        ..KeyModifiers::NONE
    };
    grid.process_key(DataGridKey::Tab, back).unwrap();
    assert_eq!(
        grid.editing_cell(),
        Some(DataGridCellCoordinates::new(1, 2))
    );

    grid.with_column(0, |c| c.set_read_only(Some(true)))
        .unwrap();
    grid.process_key(DataGridKey::Tab, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(
        grid.editing_cell(),
        Some(DataGridCellCoordinates::new(1, 3))
    );
}

#[test]
fn enter_commits_and_moves_down() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 2)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "entered");
    assert_eq!(
        grid.process_key(DataGridKey::Enter, KeyModifiers::NONE),
        Ok(true)
    );
    assert_eq!(grid.item(2).unwrap().name, "entered");
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(0, 3))
    );
    assert!(!grid.is_editing());

    // Ctrl+Enter commits in place.
    assert_eq!(
        grid.process_key(DataGridKey::F2, KeyModifiers::NONE),
        Ok(true)
    );
    set_editor_text(&mut grid, "kept here");
    grid.process_key(DataGridKey::Enter, KeyModifiers::CTRL)
        .unwrap();
    assert_eq!(grid.item(3).unwrap().name, "kept here");
    assert_eq!(
        grid.current_cell(),
        Some(DataGridCellCoordinates::new(0, 3))
    );
    assert_eq!(grid.editing_row(), None);

    // On the last row Enter only commits the cell.
    grid.scroll_into_view(9).unwrap();
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 9)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "last");
    grid.process_key(DataGridKey::Enter, KeyModifiers::NONE)
        .unwrap();
    assert_eq!(grid.item(9).unwrap().name, "last");
    assert_eq!(grid.editing_cell(), None);
    assert_eq!(grid.editing_row(), Some(9));
}

#[test]
fn escape_cancels_the_cell_then_the_row() {
    let mut grid = people_grid(10, 5, grid_options());
    grid.set_current_cell(Some(DataGridCellCoordinates::new(0, 1)))
        .unwrap();
    grid.begin_edit(EditingTrigger::Programmatic).unwrap();
    set_editor_text(&mut grid, "discarded");

    assert_eq!(
        grid.process_key(DataGridKey::Escape, KeyModifiers::NONE),
        Ok(true)
    );
    assert_eq!(grid.editing_cell(), None);
    assert_eq!(grid.editing_row(), Some(1));
    assert_eq!(displayed_text(&grid, 1, 0), "person 1");
    assert_eq!(
        grid.process_key(DataGridKey::Escape, KeyModifiers::NONE),
        Ok(true)
    );
    assert_eq!(grid.editing_row(), None);
    assert_eq!(
        grid.process_key(DataGridKey::Escape, KeyModifiers::NONE),
        Ok(false)
    );
}

#[test]
fn ctrl_a_selects_all_in_extended_mode_only() {
    let mut grid = people_grid(10, 5, grid_options());
    assert_eq!(
        grid.process_key(DataGridKey::A, KeyModifiers::NONE),
        Ok(false)
    );
    assert_eq!(
        grid.process_key(DataGridKey::A, KeyModifiers::CTRL),
        Ok(true)
    );
    assert_eq!(grid.selected_row_count(), 10);

    let single = grid_options().with_selection_mode(DataGridSelectionMode::Single);
    let mut grid = people_grid(10, 5, single);
    assert_eq!(
        grid.process_key(DataGridKey::A, KeyModifiers::CTRL),
        Ok(false)
    );
    assert_eq!(grid.selected_row_count(), 0);
}

// Sorting

fn names(grid: &DataGrid<Person>) -> Vec<&str> {
    grid.items().iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn header_clicks_sort_and_toggle_the_direction() {
    let mut grid = people_grid(4, 4, grid_options());
    grid.set_selected_index(Some(1)).unwrap();

    assert_eq!(grid.request_sort(0, false), Ok(true));
    assert_eq!(
        grid.column_sort_direction(0),
        Some(ListSortDirection::Ascending)
    );
    assert_eq!(
        names(&grid),
        ["person 0", "person 1", "person 2", "person 3"]
    );
    assert_eq!(grid.selected_row_count(), 0);
    assert_eq!(grid.current_cell(), None);

    grid.request_sort(0, false).unwrap();
    assert_eq!(
        grid.column_sort_direction(0),
        Some(ListSortDirection::Descending)
    );
    assert_eq!(
        names(&grid),
        ["person 3", "person 2", "person 1", "person 0"]
    );
    assert_eq!(displayed_text(&grid, 0, 0), "person 3");

    grid.clear_sort();
    assert!(grid.sort_descriptions().is_empty());
    assert_eq!(
        names(&grid),
        ["person 3", "person 2", "person 1", "person 0"]
    );
}

#[test]
fn shift_click_adds_a_secondary_sort_key() {
    let mut grid = people_grid(4, 4, grid_options());
    let mut items = people(4);
    items[0].active = Some(true);
    items[2].active = Some(true);
    grid.set_items(items);

    grid.request_sort(1, false).unwrap();
    grid.request_sort(0, true).unwrap();
    grid.request_sort(0, true).unwrap();
    assert_eq!(
        grid.sort_descriptions(),
        [
            SortDescription::new("active", ListSortDirection::Ascending),
            SortDescription::new("name", ListSortDirection::Descending),
        ]
    );
    assert_eq!(
        names(&grid),
        ["person 3", "person 1", "person 2", "person 0"]
    );

    // A plain click replaces the keys.
    grid.request_sort(0, false).unwrap();
    assert_eq!(grid.sort_descriptions().len(), 1);
}

#[test]
fn sorting_honours_can_user_sort_and_the_sort_member_path() {
    let mut grid = people_grid(4, 4, grid_options());
    grid.with_column(0, |c| c.set_can_user_sort(Some(false)))
        .unwrap();
    assert_eq!(grid.request_sort(0, false), Ok(false));
    assert!(grid.sort_descriptions().is_empty());

    grid.with_column(1, |c| c.set_sort_member_path(Some("name".to_string())))
        .unwrap();
    grid.request_sort(1, false).unwrap();
    grid.request_sort(1, false).unwrap();
    assert_eq!(
        grid.column_sort_direction(1),
        Some(ListSortDirection::Descending)
    );
    assert_eq!(names(&grid)[0], "person 3");

    let locked = grid_options().with_can_user_sort_columns(false);
    let mut grid = people_grid(4, 4, locked);
    assert_eq!(grid.request_sort(0, false), Ok(false));
}

#[test]
fn sorting_handlers_can_cancel() {
    let mut grid = people_grid(4, 4, grid_options());
    grid.set_events(DataGridEvents::new().with_sorting(|args| {
        args.cancel = args.direction == ListSortDirection::Descending;
    }));
    assert_eq!(grid.request_sort(0, false), Ok(true));
    assert_eq!(grid.request_sort(0, false), Ok(false));
    assert_eq!(
        grid.column_sort_direction(0),
        Some(ListSortDirection::Ascending)
    );
    assert_eq!(names(&grid)[0], "person 0");
}

// Auto-generated columns

#[derive(Clone, Debug)]
struct Setting {
    key: String,
    enabled: Option<bool>,
}

impl GridItem for Setting {
    fn value(&self, path: &str) -> CellValue {
        match path {
            "key" => CellValue::Text(self.key.clone()),
            "enabled" => CellValue::Bool(self.enabled),
            _ => CellValue::Empty,
        }
    }

    fn properties() -> Vec<ItemProperty> {
        vec![
            ItemProperty::new("key", PropertyKind::Text).read_only(),
            ItemProperty::new("enabled", PropertyKind::Bool),
        ]
    }
}

fn settings() -> Vec<Setting> {
    ["wrap", "tabs"]
        .into_iter()
        .map(|key| Setting {
            key: key.to_string(),
            enabled: Some(true),
        })
        .collect()
}

#[test]
fn columns_are_generated_from_item_properties() {
    let mut grid = DataGrid::<Setting>::new(grid_options()).unwrap();
    grid.add_column(DataGridColumn::template("icon"));
    grid.set_items(settings());

    assert_eq!(grid.columns().len(), 3);
    assert!(!grid.column(0).unwrap().is_auto_generated());
    let key = grid.column(1).unwrap();
    assert!(key.is_auto_generated());
    assert_eq!(key.header(), Some("key"));
    assert!(key.is_read_only());
    assert!(matches!(key.kind(), ColumnKind::Text(_)));
    assert!(matches!(grid.column(2).unwrap().kind(), ColumnKind::CheckBox(_)));

    // New items regenerate rather than duplicate.
    grid.set_items(settings());
    assert_eq!(grid.columns().len(), 3);

    grid.set_options(grid_options().with_auto_generate_columns(false))
        .unwrap();
    assert_eq!(grid.columns().len(), 1);
    grid.set_items(settings());
    assert_eq!(grid.columns().len(), 1);
}

#[test]
fn generating_a_column_can_be_cancelled() {
    let generated = Arc::new(AtomicUsize::new(0));
    let mut grid = DataGrid::<Setting>::new(grid_options()).unwrap();
    let g = generated.clone();
    grid.set_events(DataGridEvents::new().with_auto_generating_column(move |args| {
        g.fetch_add(1, Ordering::SeqCst);
        args.cancel = args.property_name == "key";
        args.column.set_width(DataGridLength::pixel(80.0).unwrap());
    }));
    grid.set_items(settings());

    assert_eq!(generated.load(Ordering::SeqCst), 2);
    assert_eq!(grid.columns().len(), 1);
    let enabled = grid.column(0).unwrap();
    assert_eq!(enabled.header(), Some("enabled"));
    assert_eq!(enabled.actual_width(), 80.0);
}
