//! Product record generation.

use std::fmt;

/// Category label assigned to a product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    /// Picks the category for a 1-based record index.
    ///
    /// The mapping cycles with period three: `index % 3 == 0` is `A`,
    /// `1` is `B` and `2` is `C`.
    pub fn from_index(index: u64) -> Self {
        match index % 3 {
            0 => Category::A,
            1 => Category::B,
            _ => Category::C,
        }
    }

    /// Returns the value stored in the `type` column.
    pub fn label(&self) -> &'static str {
        match self {
            Category::A => "Type A",
            Category::B => "Type B",
            Category::C => "Type C",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generated product row ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based position in the insertion sequence.
    pub index: u64,
    pub name: String,
    pub category: Category,
}

impl Record {
    /// Builds the record at `index`. The result depends on nothing else.
    pub fn at(index: u64) -> Self {
        Self {
            index,
            name: format!("Product {index}"),
            category: Category::from_index(index),
        }
    }
}

/// Lazily yields `Record::at(1)` through `Record::at(count)` in order.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    yielded: u64,
    count: u64,
}

impl RecordGenerator {
    /// Creates a generator for `count` records.
    pub fn new(count: u64) -> Self {
        Self { yielded: 0, count }
    }

    /// Number of records not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.count - self.yielded
    }
}

impl Iterator for RecordGenerator {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.yielded == self.count {
            return None;
        }
        self.yielded += 1;
        Some(Record::at(self.yielded))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_name_uses_one_based_index() {
        assert_eq!(Record::at(1).name, "Product 1");
        assert_eq!(Record::at(182_679_498).name, "Product 182679498");
    }

    #[test]
    fn test_category_cycles_with_period_three() {
        assert_eq!(Category::from_index(3), Category::A);
        assert_eq!(Category::from_index(4), Category::B);
        assert_eq!(Category::from_index(5), Category::C);
        assert_eq!(Category::from_index(6), Category::A);

        for i in 1..300 {
            assert_eq!(Category::from_index(i), Category::from_index(i + 3));
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Record::at(3).category.label(), "Type A");
        assert_eq!(Record::at(1).category.to_string(), "Type B");
        assert_eq!(Record::at(2).category.label(), "Type C");
    }

    #[test]
    fn test_generator_yields_records_in_order() {
        let records: Vec<Record> = RecordGenerator::new(3).collect();

        let pairs: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.category.label()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Product 1", "Type B"),
                ("Product 2", "Type C"),
                ("Product 3", "Type A"),
            ]
        );
    }

    #[test]
    fn test_generator_is_reproducible() {
        let first: Vec<Record> = RecordGenerator::new(50).collect();
        let second: Vec<Record> = RecordGenerator::new(50).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_generator() {
        let mut generator = RecordGenerator::new(0);
        assert_eq!(generator.remaining(), 0);
        assert!(generator.next().is_none());
    }

    #[test]
    fn test_size_hint_tracks_remaining() {
        let mut generator = RecordGenerator::new(5);
        assert_eq!(generator.size_hint(), (5, Some(5)));
        generator.next();
        generator.next();
        assert_eq!(generator.remaining(), 3);
        assert_eq!(generator.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_generator_handles_largest_count() {
        let mut generator = RecordGenerator::new(u64::MAX);
        assert_eq!(generator.remaining(), u64::MAX);
        let (lower, _) = generator.size_hint();
        assert!(lower > 0);
        assert_eq!(generator.next().map(|r| r.index), Some(1));
        assert_eq!(generator.remaining(), u64::MAX - 1);
    }

    #[test]
    fn test_generator_stops_after_last_index() {
        let mut generator = RecordGenerator {
            yielded: u64::MAX - 1,
            count: u64::MAX,
        };

        let last = generator.next().unwrap();
        assert_eq!(last.index, u64::MAX);
        assert_eq!(last.name, format!("Product {}", u64::MAX));
        assert_eq!(generator.remaining(), 0);
        assert_eq!(generator.size_hint(), (0, Some(0)));
        assert!(generator.next().is_none());
    }
}
