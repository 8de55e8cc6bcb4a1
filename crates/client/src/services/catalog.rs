//! Catalog filtering.
//!
//! A [`FilterSpec`] holds the user's current constraints; [`filter`] keeps the
//! catalog records that satisfy all of them, in catalog order.

use crate::models::ProjectRecord;

pub const DEFAULT_PRICE_RANGE: (u64, u64) = (7_000_000, 17_000_000);
pub const DEFAULT_AREA_RANGE: (f64, f64) = (60.0, 900.0);

pub const PRICE_STEP: u64 = 100_000;
pub const AREA_STEP: f64 = 10.0;

pub const MATERIAL_OPTIONS: [&str; 3] = ["Кирпич", "Клееный брус", "Монолит"];
pub const FLOOR_OPTIONS: std::ops::RangeInclusive<u32> = 1..=3;
pub const ROOM_OPTIONS: std::ops::RangeInclusive<u32> = 1..=13;
pub const BEDROOM_OPTIONS: std::ops::RangeInclusive<u32> = 1..=9;
pub const BATHROOM_OPTIONS: std::ops::RangeInclusive<u32> = 1..=4;

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    min: T,
    max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Builds a range from two ends given in either order.
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Multi-select values in the order they were picked. Empty admits anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    values: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T: PartialEq> Selection<T> {
    /// Adds `value` if absent, removes it if present.
    pub fn toggle(&mut self, value: T) {
        match self.values.iter().position(|v| *v == value) {
            Some(index) => {
                self.values.remove(index);
            }
            None => self.values.push(value),
        }
    }

    pub fn admits<Q>(&self, value: &Q) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        self.values.is_empty() || self.values.iter().any(|v| v == value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        self.values.iter().any(|v| v == value)
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Numeric multi-select dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Floors,
    Rooms,
    Bedrooms,
    Bathrooms,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Floors,
        Dimension::Rooms,
        Dimension::Bedrooms,
        Dimension::Bathrooms,
    ];

    fn value_of(self, record: &ProjectRecord) -> u32 {
        match self {
            Dimension::Floors => record.floors,
            Dimension::Rooms => record.rooms,
            Dimension::Bedrooms => record.bedrooms,
            Dimension::Bathrooms => record.bathrooms,
        }
    }

    pub fn options(self) -> std::ops::RangeInclusive<u32> {
        match self {
            Dimension::Floors => FLOOR_OPTIONS,
            Dimension::Rooms => ROOM_OPTIONS,
            Dimension::Bedrooms => BEDROOM_OPTIONS,
            Dimension::Bathrooms => BATHROOM_OPTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub price_range: Bounds<u64>,
    pub area_range: Bounds<f64>,
    pub materials: Selection<String>,
    pub floors: Selection<u32>,
    pub rooms: Selection<u32>,
    pub bedrooms: Selection<u32>,
    pub bathrooms: Selection<u32>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            price_range: Bounds::new(DEFAULT_PRICE_RANGE.0, DEFAULT_PRICE_RANGE.1),
            area_range: Bounds::new(DEFAULT_AREA_RANGE.0, DEFAULT_AREA_RANGE.1),
            materials: Selection::default(),
            floors: Selection::default(),
            rooms: Selection::default(),
            bedrooms: Selection::default(),
            bathrooms: Selection::default(),
        }
    }
}

impl FilterSpec {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn set_price_range(&mut self, a: u64, b: u64) {
        self.price_range = Bounds::new(a, b);
    }

    pub fn set_area_range(&mut self, a: f64, b: f64) {
        self.area_range = Bounds::new(a, b);
    }

    pub fn toggle_material(&mut self, material: impl Into<String>) {
        self.materials.toggle(material.into());
    }

    pub fn toggle(&mut self, dimension: Dimension, value: u32) {
        self.selection_mut(dimension).toggle(value);
    }

    pub fn selection(&self, dimension: Dimension) -> &Selection<u32> {
        match dimension {
            Dimension::Floors => &self.floors,
            Dimension::Rooms => &self.rooms,
            Dimension::Bedrooms => &self.bedrooms,
            Dimension::Bathrooms => &self.bathrooms,
        }
    }

    fn selection_mut(&mut self, dimension: Dimension) -> &mut Selection<u32> {
        match dimension {
            Dimension::Floors => &mut self.floors,
            Dimension::Rooms => &mut self.rooms,
            Dimension::Bedrooms => &mut self.bedrooms,
            Dimension::Bathrooms => &mut self.bathrooms,
        }
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        self.price_range.contains(record.price)
            && self.area_range.contains(record.area)
            && self.materials.admits(record.material.as_str())
            && Dimension::ALL
                .iter()
                .all(|d| self.selection(*d).admits(&d.value_of(record)))
    }
}

/// Records of `catalog` matching every active constraint of `spec`.
pub fn filter<'a>(catalog: &'a [ProjectRecord], spec: &FilterSpec) -> Vec<&'a ProjectRecord> {
    catalog.iter().filter(|record| spec.matches(record)).collect()
}
