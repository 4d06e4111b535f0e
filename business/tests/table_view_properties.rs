//! Behaviour of the table pipeline as a whole, through the public API.

use camps_business::{
    RecordsState,
    table::{
        CellValue, ColumnDescriptor, ColumnPredicate, DateRange, FilterCriteria, PaginationState,
        Record, RecordId, SortDescriptor, SortDirection, TableControls, TableView,
        TableViewCompute, TableViewStatus, apply, parse_datetime, sync_view, table_view_ctx,
    },
};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    id: i64,
    name: String,
    date: String,
}

impl Record for Entry {
    fn id(&self) -> RecordId {
        RecordId(self.id)
    }
}

fn entry(id: i64, name: &str, date: &str) -> Entry {
    Entry {
        id,
        name: name.to_owned(),
        date: date.to_owned(),
    }
}

fn columns() -> Vec<ColumnDescriptor<Entry>> {
    vec![
        ColumnDescriptor::new("id", "#", |e: &Entry| CellValue::number(e.id as f64)),
        ColumnDescriptor::new("name", "Name", |e: &Entry| CellValue::text(&e.name))
            .searchable()
            .sortable(),
        ColumnDescriptor::new("date", "Date", |e: &Entry| {
            CellValue::date(parse_datetime(&e.date))
        })
        .sortable(),
    ]
}

fn scenario_records() -> Vec<Entry> {
    vec![
        entry(1, "Ahmed", "2024-01-10"),
        entry(2, "Sara", "2024-02-01"),
        entry(3, "Ahmed", "2024-03-05"),
    ]
}

/// `n` records cycling through five names, dated one day apart.
fn many_records(n: i64) -> Vec<Entry> {
    const NAMES: [&str; 5] = ["Mona", "ahmed", "Sara", "Omar", "AHMED"];
    (1..=n)
        .map(|id| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(id as u64))
                .unwrap();
            entry(id, NAMES[(id as usize) % NAMES.len()], &date.to_string())
        })
        .collect()
}

fn ids(view: &TableView<Entry>) -> Vec<i64> {
    view.visible_rows.iter().map(|e| e.id).collect()
}

fn criteria_samples() -> Vec<FilterCriteria> {
    let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d);
    vec![
        FilterCriteria::new(),
        FilterCriteria::new().with_search("ahmed"),
        FilterCriteria::new().with_search("  "),
        FilterCriteria::new().with_search("nobody"),
        FilterCriteria::new()
            .with_predicate(ColumnPredicate::date_range("date", DateRange::new(day(1, 5), None))),
        FilterCriteria::new()
            .with_search("a")
            .with_predicate(ColumnPredicate::date_range("date", DateRange::new(None, day(1, 12)))),
        FilterCriteria::new().with_predicate(ColumnPredicate::equals("name", "sara")),
    ]
}

#[test]
fn applying_twice_gives_identical_rows() {
    let records = many_records(25);
    let sort = SortDescriptor::by("name", SortDirection::Descending);
    let pagination = PaginationState::new(10).unwrap().with_page_index(1);

    for criteria in criteria_samples() {
        let first = apply(&records, &columns(), &criteria, &sort, &pagination);
        let second = apply(&records, &columns(), &criteria, &sort, &pagination);
        assert_eq!(first, second);
    }
}

#[test]
fn filtered_count_never_exceeds_records() {
    let records = many_records(25);
    for criteria in criteria_samples() {
        let view = apply(
            &records,
            &columns(),
            &criteria,
            &SortDescriptor::none(),
            &PaginationState::default(),
        );
        assert!(view.total_filtered_count <= records.len());
    }
}

#[test]
fn pages_concatenate_to_the_full_sorted_set() {
    let records = many_records(25);
    let criteria = FilterCriteria::new().with_search("m");
    let sort = SortDescriptor::by("date", SortDirection::Descending);

    let everything = apply(
        &records,
        &columns(),
        &criteria,
        &sort,
        &PaginationState::new(records.len()).unwrap(),
    );

    let page_size = 4;
    let first = apply(
        &records,
        &columns(),
        &criteria,
        &sort,
        &PaginationState::new(page_size).unwrap(),
    );
    let mut concatenated = Vec::new();
    for page_index in 0..first.page_count {
        let pagination = PaginationState::new(page_size).unwrap().with_page_index(page_index);
        let view = apply(&records, &columns(), &criteria, &sort, &pagination);
        assert_eq!(view.page_index, page_index);
        concatenated.extend(ids(&view));
    }

    assert_eq!(concatenated, ids(&everything));
    let mut unique = concatenated.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), concatenated.len());
}

#[test]
fn equal_sort_keys_keep_original_order() {
    let records = many_records(25);
    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let view = apply(
            &records,
            &columns(),
            &FilterCriteria::new(),
            &SortDescriptor::by("name", direction),
            &PaginationState::new(25).unwrap(),
        );

        // "ahmed" and "AHMED" compare equal, so all ten must stay in id order.
        let ahmeds: Vec<i64> = view
            .visible_rows
            .iter()
            .filter(|e| e.name.eq_ignore_ascii_case("ahmed"))
            .map(|e| e.id)
            .collect();
        assert_eq!(ahmeds.len(), 10);
        assert!(ahmeds.windows(2).all(|pair| pair[0] < pair[1]), "{ahmeds:?}");
    }
}

#[test]
fn changing_the_search_returns_to_the_first_page() {
    let mut ctx = table_view_ctx::<Entry>(columns(), 10).unwrap();
    ctx.set_state(RecordsState::loaded(many_records(25), 0)).unwrap();
    sync_view::<Entry>(&mut ctx).unwrap();

    ctx.update::<TableControls>(|c| c.jump_to_page(2)).unwrap();
    sync_view::<Entry>(&mut ctx).unwrap();
    assert_eq!(
        ctx.state::<TableControls>().unwrap().pagination().page_index(),
        2
    );

    ctx.update::<TableControls>(|c| c.set_search("mona")).unwrap();
    sync_view::<Entry>(&mut ctx).unwrap();

    let view = ctx
        .compute::<TableViewCompute<Entry>>()
        .unwrap()
        .view()
        .unwrap();
    assert_eq!(view.page_count, 1);
    assert_eq!(view.page_index, 0);
    assert_eq!(
        ctx.state::<TableControls>().unwrap().pagination().page_index(),
        0
    );
}

#[test]
fn text_filter_scenario() {
    let criteria = FilterCriteria::new().with_search("ahmed");
    let view = apply(
        &scenario_records(),
        &columns(),
        &criteria,
        &SortDescriptor::none(),
        &PaginationState::new(10).unwrap(),
    );

    assert_eq!(ids(&view), vec![1, 3]);
    assert_eq!(view.total_filtered_count, 2);
    assert_eq!(view.page_count, 1);
}

#[test]
fn date_range_bounds_are_inclusive_days() {
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 15),
        NaiveDate::from_ymd_opt(2024, 3, 1),
    );
    let criteria = FilterCriteria::new().with_predicate(ColumnPredicate::date_range("date", range));

    let view = apply(
        &scenario_records(),
        &columns(),
        &criteria,
        &SortDescriptor::none(),
        &PaginationState::new(10).unwrap(),
    );
    // 2024-02-01 lies inside [2024-01-15, 2024-03-01].
    assert_eq!(ids(&view), vec![2]);

    let to_end_of_day = DateRange::new(None, NaiveDate::from_ymd_opt(2024, 1, 10));
    let criteria =
        FilterCriteria::new().with_predicate(ColumnPredicate::date_range("date", to_end_of_day));
    let view = apply(
        &scenario_records(),
        &columns(),
        &criteria,
        &SortDescriptor::none(),
        &PaginationState::new(10).unwrap(),
    );
    assert_eq!(ids(&view), vec![1]);
}

#[test]
fn empty_date_window_shows_no_results() {
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 11),
        NaiveDate::from_ymd_opt(2024, 1, 31),
    );

    let mut ctx = table_view_ctx::<Entry>(columns(), 10).unwrap();
    ctx.set_state(RecordsState::loaded(scenario_records(), 0))
        .unwrap();
    ctx.update::<TableControls>(|c| c.set_predicate(ColumnPredicate::date_range("date", range)))
        .unwrap();
    sync_view::<Entry>(&mut ctx).unwrap();

    let compute = ctx.compute::<TableViewCompute<Entry>>().unwrap();
    assert_eq!(compute.status(), &TableViewStatus::NoResults);
    let view = compute.view().unwrap();
    assert!(view.visible_rows.is_empty());
    assert_eq!(view.page_count, 0);

    ctx.update::<TableControls>(TableControls::clear_filters)
        .unwrap();
    sync_view::<Entry>(&mut ctx).unwrap();
    assert_eq!(
        ctx.compute::<TableViewCompute<Entry>>().unwrap().status(),
        &TableViewStatus::Rows
    );
}

#[test]
fn last_page_holds_the_remainder() {
    let records = many_records(25);
    let pagination = PaginationState::new(10).unwrap().with_page_index(2);
    let view = apply(
        &records,
        &columns(),
        &FilterCriteria::new(),
        &SortDescriptor::none(),
        &pagination,
    );

    assert_eq!(view.page_count, 3);
    assert_eq!(view.visible_rows.len(), 5);
    assert_eq!(ids(&view), vec![21, 22, 23, 24, 25]);
}
