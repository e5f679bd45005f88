//! Enumerated types and values.

use crate::ValueError;
use indexmap::IndexMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// An enumerated type: element names bound to one or more ordinal ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    elements: IndexMap<String, Vec<RangeInclusive<i64>>>,
}

impl EnumType {
    pub fn builder(name: impl Into<String>) -> EnumTypeBuilder {
        EnumTypeBuilder {
            name: name.into(),
            elements: IndexMap::new(),
            next: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, &[RangeInclusive<i64>])> {
        self.elements
            .iter()
            .map(|(name, ranges)| (name.as_str(), ranges.as_slice()))
    }

    /// Default ordinal of an element: the start of its first range.
    pub fn ordinal_of(&self, element: &str) -> Option<i64> {
        self.elements
            .get(element)
            .and_then(|ranges| ranges.first())
            .map(|r| *r.start())
    }

    pub fn name_of(&self, ordinal: i64) -> Option<&str> {
        self.elements
            .iter()
            .find(|(_, ranges)| ranges.iter().any(|r| r.contains(&ordinal)))
            .map(|(name, _)| name.as_str())
    }

    pub fn value(self: &Arc<Self>, element: &str) -> Result<EnumValue, ValueError> {
        let ordinal = self
            .ordinal_of(element)
            .ok_or_else(|| ValueError::UnknownElement {
                ty: self.name.clone(),
                element: element.to_string(),
            })?;
        self.value_with(element, ordinal)
    }

    /// Builds a value for an element that spans several ordinals, e.g.
    /// `red(3)` for `red(0..10)`.
    pub fn value_with(self: &Arc<Self>, element: &str, ordinal: i64) -> Result<EnumValue, ValueError> {
        match self.name_of(ordinal) {
            Some(name) if name == element => Ok(EnumValue {
                ty: Arc::clone(self),
                name: element.to_string(),
                ordinal,
            }),
            Some(_) => Err(ValueError::UnknownOrdinal {
                ty: self.name.clone(),
                ordinal,
            }),
            None if self.elements.contains_key(element) => Err(ValueError::UnknownOrdinal {
                ty: self.name.clone(),
                ordinal,
            }),
            None => Err(ValueError::UnknownElement {
                ty: self.name.clone(),
                element: element.to_string(),
            }),
        }
    }
}

pub struct EnumTypeBuilder {
    name: String,
    elements: IndexMap<String, Vec<RangeInclusive<i64>>>,
    next: i64,
}

impl EnumTypeBuilder {
    /// Adds an element with an implicit ordinal: one above the largest
    /// ordinal assigned so far.
    pub fn element(self, name: impl Into<String>) -> Result<Self, ValueError> {
        let next = self.next;
        self.element_with(name, [next..=next])
    }

    pub fn element_with(
        mut self,
        name: impl Into<String>,
        ranges: impl IntoIterator<Item = RangeInclusive<i64>>,
    ) -> Result<Self, ValueError> {
        let name = name.into();
        if self.elements.contains_key(&name) {
            return Err(ValueError::DuplicateElement {
                ty: self.name,
                element: name,
            });
        }

        let ranges: Vec<_> = ranges.into_iter().collect();
        for (i, range) in ranges.iter().enumerate() {
            if range.start() > range.end() {
                return Err(ValueError::InvalidRange {
                    element: name,
                    first: *range.start(),
                    last: *range.end(),
                });
            }
            let siblings = ranges[..i].iter().map(|r| (name.as_str(), r));
            let existing = self
                .elements
                .iter()
                .flat_map(|(n, rs)| rs.iter().map(move |r| (n.as_str(), r)));
            if let Some((other, r)) = existing.chain(siblings).find(|(_, r)| overlaps(r, range)) {
                return Err(ValueError::RangeCollision {
                    ordinal: *r.start().max(range.start()),
                    existing: other.to_string(),
                    element: name,
                });
            }
        }

        if let Some(max) = ranges.iter().map(|r| *r.end()).max() {
            self.next = self.next.max(max.saturating_add(1));
        }
        self.elements.insert(name, ranges);
        Ok(self)
    }

    pub fn build(self) -> Result<Arc<EnumType>, ValueError> {
        if self.elements.is_empty() {
            return Err(ValueError::NoElements(self.name));
        }
        Ok(Arc::new(EnumType {
            name: self.name,
            elements: self.elements,
        }))
    }
}

fn overlaps(a: &RangeInclusive<i64>, b: &RangeInclusive<i64>) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

/// A value of an enumerated type.
#[derive(Debug, Clone)]
pub struct EnumValue {
    ty: Arc<EnumType>,
    name: String,
    ordinal: i64,
}

impl EnumValue {
    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    /// Rebinds this value to the element that owns `ordinal`.
    pub fn set_ordinal(&mut self, ordinal: i64) -> Result<(), ValueError> {
        let name = self
            .ty
            .name_of(ordinal)
            .ok_or_else(|| ValueError::UnknownOrdinal {
                ty: self.ty.name.clone(),
                ordinal,
            })?;
        self.name = name.to_string();
        self.ordinal = ordinal;
        Ok(())
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.ty, &other.ty) || self.ty == other.ty) && self.ordinal == other.ordinal
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
