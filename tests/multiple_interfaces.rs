//! A small spreadsheet keyed by two kinds of cell id and holding three kinds
//! of cell content, all stored behind erased containers.
//!
//! - Legacy ids (`[key]`) and coordinate ids (`x,y`) share one ordered map.
//!   They compare with each other through the row-major index.
//! - String, value and formula cells compare equal across types when their
//!   rendered or calculated contents agree.

use std::{
    collections::BTreeMap,
    fmt::{self, Write},
};

use anyface::{
    AnyFace,
    handlers::{EqualityHandler, ForeignValue, OrderingHandler},
    implements, interfaces,
    markers::{EqualityOnly, OrderingOnly},
};

trait Cell {
    fn display_cell_location(&self, out: &mut dyn Write) -> fmt::Result;
}

trait Calculation {
    fn calculate(&self) -> i32;
}

trait Content {
    fn update(&mut self, s: &str);
    fn show(&self, out: &mut dyn Write) -> fmt::Result;
}

interfaces! {
    trait CellContent: Calculation + Content;
}

const CELLS_PER_ROW: i32 = 16;

#[derive(Clone, PartialEq, PartialOrd)]
struct CoordinateCellId {
    index: i32,
}

impl CoordinateCellId {
    fn new(x: i32, y: i32) -> Self {
        Self {
            index: y * CELLS_PER_ROW + x,
        }
    }
}

impl Cell for CoordinateCellId {
    fn display_cell_location(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{},{}", self.index % CELLS_PER_ROW, self.index / CELLS_PER_ROW)
    }
}

// No ordering of its own
#[derive(Clone)]
struct LegacyCellId {
    key: i32,
}

impl Cell for LegacyCellId {
    fn display_cell_location(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "[{}]", self.key)
    }
}

implements!(dyn Cell => CoordinateCellId, LegacyCellId);

struct CellIdOrdering;

impl OrderingHandler<CoordinateCellId> for CellIdOrdering {
    fn less(value: &CoordinateCellId, other: &CoordinateCellId) -> bool {
        value < other
    }

    fn less_foreign(value: &CoordinateCellId, other: ForeignValue<'_>) -> Option<bool> {
        other
            .downcast_ref::<LegacyCellId>()
            .map(|other| value.index < other.key)
    }
}

impl OrderingHandler<LegacyCellId> for CellIdOrdering {
    fn less(value: &LegacyCellId, other: &LegacyCellId) -> bool {
        value.key < other.key
    }

    fn less_foreign(value: &LegacyCellId, other: ForeignValue<'_>) -> Option<bool> {
        other
            .downcast_ref::<CoordinateCellId>()
            .map(|other| value.key < other.index)
    }
}

type CellId = AnyFace<dyn Cell, OrderingOnly>;

impl Cell for CellId {
    fn display_cell_location(&self, out: &mut dyn Write) -> fmt::Result {
        self.call(|cell| cell.display_cell_location(out))
    }
}

fn coordinate(x: i32, y: i32) -> CellId {
    CellId::new_custom::<CellIdOrdering, _>(CoordinateCellId::new(x, y))
}

fn legacy(key: i32) -> CellId {
    CellId::new_custom::<CellIdOrdering, _>(LegacyCellId { key })
}

#[derive(Clone)]
struct StringCell {
    content: String,
}

impl Calculation for StringCell {
    fn calculate(&self) -> i32 {
        0
    }
}

impl Content for StringCell {
    fn update(&mut self, s: &str) {
        self.content = s.to_owned();
    }

    fn show(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str(&self.content)
    }
}

#[derive(Clone)]
struct ValueCell {
    value: i32,
}

impl ValueCell {
    fn parse(s: &str) -> Self {
        let mut cell = Self { value: 0 };
        cell.update(s);
        cell
    }
}

impl Calculation for ValueCell {
    fn calculate(&self) -> i32 {
        self.value
    }
}

impl Content for ValueCell {
    fn update(&mut self, s: &str) {
        self.value = s.trim().parse().unwrap_or(0);
    }

    fn show(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "{}", self.value)
    }
}

#[derive(Clone)]
struct FormulaCell {
    formula: String,
}

impl Calculation for FormulaCell {
    fn calculate(&self) -> i32 {
        match self.formula.as_str() {
            "50-8" => 42,
            "3*9" => 27,
            _ => 0,
        }
    }
}

impl Content for FormulaCell {
    fn update(&mut self, s: &str) {
        self.formula = s.to_owned();
    }

    fn show(&self, out: &mut dyn Write) -> fmt::Result {
        write!(out, "f():{}", self.calculate())
    }
}

implements!(dyn CellContent => StringCell, ValueCell, FormulaCell);

struct CellContentEquality;

impl EqualityHandler<StringCell> for CellContentEquality {
    fn equals(value: &StringCell, other: &StringCell) -> bool {
        value.content == other.content
    }

    fn equals_foreign(value: &StringCell, other: ForeignValue<'_>) -> Option<bool> {
        let calculated = other
            .downcast_ref::<FormulaCell>()
            .map(Calculation::calculate)
            .or_else(|| other.downcast_ref::<ValueCell>().map(Calculation::calculate))?;
        Some(value.content == calculated.to_string())
    }
}

impl EqualityHandler<ValueCell> for CellContentEquality {
    fn equals(value: &ValueCell, other: &ValueCell) -> bool {
        value.value == other.value
    }

    fn equals_foreign(value: &ValueCell, other: ForeignValue<'_>) -> Option<bool> {
        if let Some(formula) = other.downcast_ref::<FormulaCell>() {
            Some(value.value == formula.calculate())
        } else {
            other
                .downcast_ref::<StringCell>()
                .map(|string| value.calculate().to_string() == string.content)
        }
    }
}

impl EqualityHandler<FormulaCell> for CellContentEquality {
    fn equals(value: &FormulaCell, other: &FormulaCell) -> bool {
        value.calculate() == other.calculate()
    }

    fn equals_foreign(value: &FormulaCell, other: ForeignValue<'_>) -> Option<bool> {
        if let Some(string) = other.downcast_ref::<StringCell>() {
            Some(value.calculate().to_string() == string.content)
        } else {
            other
                .downcast_ref::<ValueCell>()
                .map(|cell| value.calculate() == cell.value)
        }
    }
}

type Cells = AnyFace<dyn CellContent, EqualityOnly>;

impl Calculation for Cells {
    fn calculate(&self) -> i32 {
        self.call(|cell| cell.calculate())
    }
}

impl Content for Cells {
    fn update(&mut self, s: &str) {
        self.call_mut(|cell| cell.update(s));
    }

    fn show(&self, out: &mut dyn Write) -> fmt::Result {
        self.call(|cell| cell.show(out))
    }
}

fn string_cell(s: &str) -> Cells {
    Cells::new_custom::<CellContentEquality, _>(StringCell {
        content: s.to_owned(),
    })
}

fn value_cell(s: &str) -> Cells {
    Cells::new_custom::<CellContentEquality, _>(ValueCell::parse(s))
}

fn formula_cell(s: &str) -> Cells {
    Cells::new_custom::<CellContentEquality, _>(FormulaCell {
        formula: s.to_owned(),
    })
}

fn shown(cell: &Cells) -> String {
    let mut out = String::new();
    cell.show(&mut out).unwrap();
    out
}

fn sheet() -> BTreeMap<CellId, Cells> {
    let mut data = BTreeMap::new();
    data.insert(legacy(1), string_cell("first cell"));
    data.insert(legacy(2), formula_cell("50-8"));
    data.insert(legacy(3), value_cell("80"));
    data.insert(coordinate(10, 2), formula_cell(""));
    data
}

#[test]
fn test_mixed_keys_are_ordered_by_index() {
    let data = sheet();
    assert_eq!(data.len(), 4);

    let mut out = String::new();
    for id in data.keys() {
        id.display_cell_location(&mut out).unwrap();
        out.push('#');
    }
    assert_eq!(out, "[1]#[2]#[3]#10,2#");
}

#[test]
fn test_lookup_across_id_types() {
    let mut data = sheet();

    let found = data.get(&coordinate(2, 0)).unwrap();
    assert_eq!(found.calculate(), 42);

    let found = data.get_mut(&coordinate(1, 0)).unwrap();
    found.update("3412");
    assert_eq!(found.calculate(), 0);

    let found = data.get_mut(&legacy(42)).unwrap();
    found.update("3*9");
    assert_eq!(found.calculate(), 27);

    let mut out = String::new();
    for cell in data.values() {
        cell.show(&mut out).unwrap();
        out.push('#');
    }
    assert_eq!(out, "3412#f():42#80#f():27#");

    let total: i32 = data.values().map(Calculation::calculate).sum();
    assert_eq!(total, 149);

    let find = |needle: &Cells| data.values().find(|cell| needle == *cell).map(shown);

    assert_eq!(find(&string_cell("27")).as_deref(), Some("f():27"));
    assert_eq!(find(&value_cell("42")).as_deref(), Some("f():42"));
    assert_eq!(find(&value_cell("3412")).as_deref(), Some("3412"));
    assert_eq!(find(&string_cell("0")), None);
}

#[test]
fn test_missing_key() {
    let data = sheet();
    assert!(data.get(&coordinate(5, 0)).is_none());
    assert!(data.get(&legacy(100)).is_none());
}

#[test]
fn test_cross_type_ordering_is_antisymmetric() {
    assert!(legacy(2) < coordinate(3, 0));
    assert!(!(coordinate(3, 0) < legacy(2)));
    assert!(coordinate(3, 0) > legacy(2));
    assert_eq!(legacy(2).cmp(&coordinate(3, 0)), std::cmp::Ordering::Less);
    assert_eq!(coordinate(3, 0).cmp(&legacy(2)), std::cmp::Ordering::Greater);

    // same index under both id kinds is one key
    assert!(legacy(3) == coordinate(3, 0));
    assert_eq!(coordinate(3, 0).cmp(&legacy(3)), std::cmp::Ordering::Equal);
}
