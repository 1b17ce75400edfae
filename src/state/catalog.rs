//! The in-memory catalog: an immutable list of normalized country records.

use std::sync::Arc;

use crate::state::types::CountryRecord;

/// Immutable working set of countries for one view lifecycle.
///
/// Clones share the same backing slice, so handing the catalog to the facet
/// extractor and the pipeline costs a reference-count bump.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Records in source order.
    records: Arc<[CountryRecord]>,
}

impl Catalog {
    /// Wrap records in source order.
    #[must_use]
    pub fn from_records(records: Vec<CountryRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Records in source order.
    #[must_use]
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty (not loaded or failed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by alpha-3 code, case-insensitively.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&CountryRecord> {
        let code = code.trim();
        self.records
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code))
    }

    /// What: Resolve a country's border codes to records present in the catalog.
    ///
    /// Inputs:
    /// - `record`: Country whose `borders` are resolved
    ///
    /// Output:
    /// - Neighbour records in border order; codes missing from the catalog are skipped.
    #[must_use]
    pub fn neighbors(&self, record: &CountryRecord) -> Vec<&CountryRecord> {
        record
            .borders
            .iter()
            .filter_map(|code| self.by_code(code))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Code lookup is case-insensitive and neighbours skip unknown codes
    ///
    /// - Input: FRA bordering ESP (present) and AND (absent)
    /// - Output: Lookup by lowercase code works; only ESP resolves
    fn catalog_lookup_and_neighbors() {
        let mut fra = CountryRecord::new("FRA", "France");
        fra.borders = vec!["ESP".into(), "AND".into()];
        let esp = CountryRecord::new("ESP", "Spain");
        let cat = Catalog::from_records(vec![fra, esp]);

        let f = cat.by_code(" fra ").expect("france");
        assert_eq!(f.name_common, "France");
        let n: Vec<&str> = cat
            .neighbors(f)
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(n, vec!["ESP"]);
        assert!(cat.by_code("XXX").is_none());
        assert_eq!(cat.clone().len(), 2);
    }
}
