//! A tiny spreadsheet where old and new cell ids live in the same map.
//!
//! Run with `cargo run --example spreadsheet`. Type tag assignments and
//! cross-type fallbacks are logged at `TRACE`.

use std::{collections::BTreeMap, fmt};

use anyface::{
    AnyFace,
    handlers::{EqualityHandler, ForeignValue, OrderingHandler},
    implements, interfaces,
    markers::{EqualityOnly, OrderingOnly},
};

const CELLS_PER_ROW: i32 = 16;

pub trait Location {
    fn location(&self) -> String;
}

pub trait Calculation {
    fn calculate(&self) -> i32;
}

pub trait Render {
    fn render(&self) -> String;
}

interfaces! {
    /// What every cell content offers.
    pub trait CellContent: Calculation + Render;
}

#[derive(Clone)]
struct Coordinate {
    index: i32,
}

#[derive(Clone)]
struct LegacyId(i32);

impl Location for Coordinate {
    fn location(&self) -> String {
        format!("{},{}", self.index % CELLS_PER_ROW, self.index / CELLS_PER_ROW)
    }
}

impl Location for LegacyId {
    fn location(&self) -> String {
        format!("[{}]", self.0)
    }
}

implements!(dyn Location => Coordinate, LegacyId);

/// Orders both id kinds by their row-major index.
struct ByIndex;

impl ByIndex {
    fn index_of(other: ForeignValue<'_>) -> Option<i32> {
        other
            .downcast_ref::<Coordinate>()
            .map(|c| c.index)
            .or_else(|| other.downcast_ref::<LegacyId>().map(|l| l.0))
    }
}

impl OrderingHandler<Coordinate> for ByIndex {
    fn less(value: &Coordinate, other: &Coordinate) -> bool {
        value.index < other.index
    }

    fn less_foreign(value: &Coordinate, other: ForeignValue<'_>) -> Option<bool> {
        Self::index_of(other).map(|other| value.index < other)
    }
}

impl OrderingHandler<LegacyId> for ByIndex {
    fn less(value: &LegacyId, other: &LegacyId) -> bool {
        value.0 < other.0
    }

    fn less_foreign(value: &LegacyId, other: ForeignValue<'_>) -> Option<bool> {
        Self::index_of(other).map(|other| value.0 < other)
    }
}

type CellId = AnyFace<dyn Location, OrderingOnly>;

#[derive(Clone)]
struct Text(String);

#[derive(Clone)]
struct Formula(&'static str);

impl Calculation for Text {
    fn calculate(&self) -> i32 {
        self.0.parse().unwrap_or(0)
    }
}

impl Render for Text {
    fn render(&self) -> String {
        self.0.clone()
    }
}

impl Calculation for Formula {
    fn calculate(&self) -> i32 {
        match self.0 {
            "50-8" => 42,
            "3*9" => 27,
            _ => 0,
        }
    }
}

impl Render for Formula {
    fn render(&self) -> String {
        format!("f():{}", self.calculate())
    }
}

implements!(dyn CellContent => Text, Formula);

/// Cells are equal when they calculate to the same number.
struct SameResult;

impl<T: Calculation + 'static> EqualityHandler<T> for SameResult {
    fn equals(value: &T, other: &T) -> bool {
        value.calculate() == other.calculate()
    }

    fn equals_foreign(value: &T, other: ForeignValue<'_>) -> Option<bool> {
        let other = other
            .downcast_ref::<Text>()
            .map(Calculation::calculate)
            .or_else(|| other.downcast_ref::<Formula>().map(Calculation::calculate))?;
        Some(value.calculate() == other)
    }
}

type Cell = AnyFace<dyn CellContent, EqualityOnly>;

struct Sheet(BTreeMap<CellId, Cell>);

impl Sheet {
    fn set(&mut self, id: CellId, content: Cell) {
        self.0.insert(id, content);
    }

    fn total(&self) -> i32 {
        self.0.values().map(|cell| cell.call(|c| c.calculate())).sum()
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, cell) in &self.0 {
            writeln!(
                f,
                "{:>6} | {}",
                id.call(|id| id.location()),
                cell.call(|cell| cell.render())
            )?;
        }
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let legacy = |key| CellId::new_custom::<ByIndex, _>(LegacyId(key));
    let coordinate = |x: i32, y: i32| {
        CellId::new_custom::<ByIndex, _>(Coordinate {
            index: y * CELLS_PER_ROW + x,
        })
    };
    let text = |s: &str| Cell::new_custom::<SameResult, _>(Text(s.to_owned()));
    let formula = |s| Cell::new_custom::<SameResult, _>(Formula(s));

    let mut sheet = Sheet(BTreeMap::new());
    sheet.set(legacy(1), text("first cell"));
    sheet.set(legacy(2), formula("50-8"));
    sheet.set(legacy(3), text("80"));
    sheet.set(coordinate(10, 2), formula("3*9"));

    // (1, 0) is the same cell as legacy id 1
    sheet.set(coordinate(1, 0), text("3412"));

    print!("{sheet}");
    println!("total: {}", sheet.total());

    let needle = text("42");
    if let Some((id, _)) = sheet.0.iter().find(|(_, cell)| needle == **cell) {
        println!("42 found at {}", id.call(|id| id.location()));
    }
}
